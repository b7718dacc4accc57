//! Structural bounds on function types.
//!
//! Two function types have a useful SLB/SUB only when their shapes are
//! compatible:
//! - same number of generic parameters, with mutually-subtype bounds
//!   after alpha renaming,
//! - no mixing of named parameters on one side with optional positional
//!   on the other (no function shape can express the merge),
//! - compatible positional arities where named parameters are involved.
//!
//! When a gate fails, SLB falls to the bottom of the client's lattice
//! and SUB falls to the raw `Function` type.
//!
//! Parameters are contravariant: the SLB of two function types takes the
//! SUB of corresponding parameters, and vice versa.

use crate::instantiate::{instantiate_type, TypeSubstitution};
use crate::nullability::{intersect, nullability_from_bound, unite};
use crate::oracle::{ClassHierarchy, SubtypeMode, SubtypeOracle};
use crate::types::{FunctionShape, NamedParam, TypeId, TypeKey};

use super::super::bounds::StandardBounds;

impl<'a, O: SubtypeOracle, H: ClassHierarchy> StandardBounds<'a, O, H> {
    /// DOWN of two function types.
    pub(crate) fn function_lower_bound(&self, t1: TypeId, t2: TypeId, nnbd: bool) -> TypeId {
        let db = self.db;
        let (TypeKey::Function(f_id), TypeKey::Function(g_id)) =
            (db.type_key(t1), db.type_key(t2))
        else {
            return self.function_lower_fallback(
                crate::nullability::declared_nullability(db, t1),
                crate::nullability::declared_nullability(db, t2),
                nnbd,
            );
        };
        let f = db.function_shape(f_id);
        let g = db.function_shape(g_id);
        let mode = subtype_mode(nnbd);

        let Some(subst) = self.alpha_rename_params(&f, &g, mode) else {
            return self.function_lower_fallback(f.nullability, g.nullability, nnbd);
        };

        let have_named = !f.named.is_empty() || !g.named.is_empty();
        let have_optional = f.has_optional_positional() || g.has_optional_positional();
        if have_named && have_optional {
            // No function shape can carry both; there is no common
            // subtype below the two to synthesize.
            return self.function_lower_fallback(f.nullability, g.nullability, nnbd);
        }
        if have_named && f.positional.len() != g.positional.len() {
            return self.function_lower_fallback(f.nullability, g.nullability, nnbd);
        }

        let min_len = f.positional.len().min(g.positional.len());
        let mut positional = Vec::with_capacity(f.positional.len().max(g.positional.len()));
        for i in 0..min_len {
            let g_param = instantiate_type(db, g.positional[i], &subst);
            positional.push(self.upper_bound(f.positional[i], g_param, nnbd));
        }
        positional.extend_from_slice(&f.positional[min_len..]);
        for &param in &g.positional[min_len..] {
            positional.push(instantiate_type(db, param, &subst));
        }
        // A parameter optional in either operand is optional in the
        // bound.
        let required_count = f.required_count.min(g.required_count);

        let named = self.merge_named_lower(&f.named, &g.named, &subst, nnbd);
        let g_return = instantiate_type(db, g.return_type, &subst);
        let return_type = self.lower_bound(f.return_type, g_return, nnbd);

        db.function(FunctionShape {
            type_params: f.type_params.clone(),
            required_count,
            positional,
            named,
            return_type,
            nullability: intersect(f.nullability, g.nullability),
        })
    }

    /// UP of two function types.
    pub(crate) fn function_upper_bound(&self, t1: TypeId, t2: TypeId, nnbd: bool) -> TypeId {
        let db = self.db;
        let (TypeKey::Function(f_id), TypeKey::Function(g_id)) =
            (db.type_key(t1), db.type_key(t2))
        else {
            return self.function_upper_fallback(
                crate::nullability::declared_nullability(db, t1),
                crate::nullability::declared_nullability(db, t2),
            );
        };
        let f = db.function_shape(f_id);
        let g = db.function_shape(g_id);
        let mode = subtype_mode(nnbd);

        let Some(subst) = self.alpha_rename_params(&f, &g, mode) else {
            return self.function_upper_fallback(f.nullability, g.nullability);
        };

        let have_named = !f.named.is_empty() || !g.named.is_empty();
        let have_optional = f.has_optional_positional() || g.has_optional_positional();
        if have_named && have_optional {
            return self.function_upper_fallback(f.nullability, g.nullability);
        }

        let named = if have_named {
            if f.positional.len() != g.positional.len() {
                return self.function_upper_fallback(f.nullability, g.nullability);
            }
            match self.merge_named_upper(&f.named, &g.named, &subst, nnbd) {
                Some(named) => named,
                // A required named parameter on one side only: no
                // supertype shape can omit it or make it optional.
                None => return self.function_upper_fallback(f.nullability, g.nullability),
            }
        } else {
            if f.required_count != g.required_count {
                return self.function_upper_fallback(f.nullability, g.nullability);
            }
            Vec::new()
        };

        let min_len = f.positional.len().min(g.positional.len());
        let mut positional = Vec::with_capacity(min_len);
        for i in 0..min_len {
            let g_param = instantiate_type(db, g.positional[i], &subst);
            positional.push(self.lower_bound(f.positional[i], g_param, nnbd));
        }
        let g_return = instantiate_type(db, g.return_type, &subst);
        let return_type = self.upper_bound(f.return_type, g_return, nnbd);

        db.function(FunctionShape {
            type_params: f.type_params.clone(),
            required_count: f.required_count,
            positional,
            named,
            return_type,
            nullability: unite(f.nullability, g.nullability),
        })
    }

    /// Build the alpha-renaming substitution from `g`'s binders to uses
    /// of `f`'s, then require the renamed bounds to be mutual subtypes.
    /// `None` means the two generic signatures are incompatible.
    fn alpha_rename_params(
        &self,
        f: &FunctionShape,
        g: &FunctionShape,
        mode: SubtypeMode,
    ) -> Option<TypeSubstitution> {
        let db = self.db;
        if f.type_params.len() != g.type_params.len() {
            return None;
        }
        let mut subst = TypeSubstitution::new();
        if f.type_params.is_empty() {
            return Some(subst);
        }
        for (&g_param, &f_param) in g.type_params.iter().zip(&f.type_params) {
            let f_decl = db.type_param_decl(f_param);
            let tag = nullability_from_bound(db, self.core, f_decl.bound);
            subst.insert(g_param, db.type_param(f_param, tag, None));
        }
        for (&f_param, &g_param) in f.type_params.iter().zip(&g.type_params) {
            let f_bound = db.type_param_decl(f_param).bound;
            let g_bound = instantiate_type(db, db.type_param_decl(g_param).bound, &subst);
            if !self.oracle.are_mutual_subtypes(db, f_bound, g_bound, mode) {
                return None;
            }
        }
        Some(subst)
    }

    /// Union-merge of two sorted named-parameter lists for DOWN: a name
    /// on one side only joins as optional; a name on both sides takes
    /// the UP of the types and stays required only if required on both.
    fn merge_named_lower(
        &self,
        f_named: &[NamedParam],
        g_named: &[NamedParam],
        subst: &TypeSubstitution,
        nnbd: bool,
    ) -> Vec<NamedParam> {
        let db = self.db;
        let mut out = Vec::with_capacity(f_named.len() + g_named.len());
        let mut i = 0;
        let mut j = 0;
        while i < f_named.len() && j < g_named.len() {
            let f_name = db.resolve_atom(f_named[i].name);
            let g_name = db.resolve_atom(g_named[j].name);
            match f_name.cmp(&g_name) {
                std::cmp::Ordering::Less => {
                    out.push(NamedParam {
                        name: f_named[i].name,
                        ty: f_named[i].ty,
                        required: false,
                    });
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    out.push(NamedParam {
                        name: g_named[j].name,
                        ty: instantiate_type(db, g_named[j].ty, subst),
                        required: false,
                    });
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    let g_ty = instantiate_type(db, g_named[j].ty, subst);
                    out.push(NamedParam {
                        name: f_named[i].name,
                        ty: self.upper_bound(f_named[i].ty, g_ty, nnbd),
                        required: f_named[i].required && g_named[j].required,
                    });
                    i += 1;
                    j += 1;
                }
            }
        }
        for entry in &f_named[i..] {
            out.push(NamedParam {
                name: entry.name,
                ty: entry.ty,
                required: false,
            });
        }
        for entry in &g_named[j..] {
            out.push(NamedParam {
                name: entry.name,
                ty: instantiate_type(db, entry.ty, subst),
                required: false,
            });
        }
        out
    }

    /// Intersection-merge of two sorted named-parameter lists for UP: a
    /// name on both sides takes the DOWN of the types and is required if
    /// required on either; a name on one side only is dropped, unless it
    /// is required there - then no common supertype shape exists.
    fn merge_named_upper(
        &self,
        f_named: &[NamedParam],
        g_named: &[NamedParam],
        subst: &TypeSubstitution,
        nnbd: bool,
    ) -> Option<Vec<NamedParam>> {
        let db = self.db;
        let mut out = Vec::new();
        let mut i = 0;
        let mut j = 0;
        while i < f_named.len() && j < g_named.len() {
            let f_name = db.resolve_atom(f_named[i].name);
            let g_name = db.resolve_atom(g_named[j].name);
            match f_name.cmp(&g_name) {
                std::cmp::Ordering::Less => {
                    if f_named[i].required {
                        return None;
                    }
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    if g_named[j].required {
                        return None;
                    }
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    let g_ty = instantiate_type(db, g_named[j].ty, subst);
                    out.push(NamedParam {
                        name: f_named[i].name,
                        ty: self.lower_bound(f_named[i].ty, g_ty, nnbd),
                        required: f_named[i].required || g_named[j].required,
                    });
                    i += 1;
                    j += 1;
                }
            }
        }
        if f_named[i..].iter().any(|entry| entry.required)
            || g_named[j..].iter().any(|entry| entry.required)
        {
            return None;
        }
        Some(out)
    }

    pub(crate) fn function_lower_fallback(
        &self,
        nf: crate::types::Nullability,
        ng: crate::types::Nullability,
        nnbd: bool,
    ) -> TypeId {
        if nnbd {
            self.db.never(intersect(nf, ng))
        } else {
            TypeId::BOTTOM
        }
    }

    pub(crate) fn function_upper_fallback(
        &self,
        nf: crate::types::Nullability,
        ng: crate::types::Nullability,
    ) -> TypeId {
        self.core.function_raw(self.db, unite(nf, ng))
    }
}

fn subtype_mode(nnbd: bool) -> SubtypeMode {
    if nnbd {
        SubtypeMode::WithNullability
    } else {
        SubtypeMode::IgnoringNullability
    }
}
