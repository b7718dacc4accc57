//! Type-parameter substitution.
//!
//! Replaces uses of type parameters with concrete types throughout a
//! type structure. The engine uses this in two places: alpha-renaming
//! one generic function type's parameters into another's before
//! comparing them, and widening a type parameter to its bound (with the
//! parameter itself replaced by `Object`) in the type-parameter
//! upper-bound rule.
//!
//! Substitution is capture-avoiding: when it changes the bound of a
//! nested generic function type's binder, the binder is freshened and
//! its uses are redirected to the fresh declaration.

use rustc_hash::FxHashMap;

use crate::db::TypeDatabase;
use crate::nullability::{declared_nullability, unite, with_declared_nullability};
use crate::types::{ParamId, TypeId, TypeKey, TypeParamDecl};

/// A substitution map from type-parameter declaration sites to types.
#[derive(Clone, Debug, Default)]
pub struct TypeSubstitution {
    map: FxHashMap<ParamId, TypeId>,
}

impl TypeSubstitution {
    pub fn new() -> Self {
        TypeSubstitution {
            map: FxHashMap::default(),
        }
    }

    pub fn insert(&mut self, param: ParamId, ty: TypeId) {
        self.map.insert(param, ty);
    }

    pub fn get(&self, param: ParamId) -> Option<TypeId> {
        self.map.get(&param).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Apply `substitution` to `ty`, returning the substituted type.
/// Returns `ty` itself when nothing changes.
pub fn instantiate_type(
    db: &dyn TypeDatabase,
    ty: TypeId,
    substitution: &TypeSubstitution,
) -> TypeId {
    if substitution.is_empty() {
        return ty;
    }
    let mut instantiator = Instantiator {
        db,
        active: substitution.map.clone(),
    };
    instantiator.instantiate(ty)
}

struct Instantiator<'a> {
    db: &'a dyn TypeDatabase,
    /// The substitution currently in scope; binders shadow entries and
    /// freshened binders add redirects while their body is visited.
    active: FxHashMap<ParamId, TypeId>,
}

impl<'a> Instantiator<'a> {
    fn instantiate(&mut self, ty: TypeId) -> TypeId {
        match self.db.type_key(ty) {
            TypeKey::Dynamic
            | TypeKey::Void
            | TypeKey::Invalid
            | TypeKey::Bottom
            | TypeKey::Unknown
            | TypeKey::Never(_) => ty,
            TypeKey::Interface {
                class,
                nullability,
                args,
            } => {
                let list = self.db.type_list(args);
                let mut new_args = Vec::with_capacity(list.len());
                let mut changed = false;
                for &arg in list.iter() {
                    let new_arg = self.instantiate(arg);
                    changed |= new_arg != arg;
                    new_args.push(new_arg);
                }
                if changed {
                    self.db.interface(class, nullability, new_args)
                } else {
                    ty
                }
            }
            TypeKey::Function(shape_id) => self.instantiate_function(ty, shape_id),
            TypeKey::TypeParam {
                param,
                nullability,
                promoted_bound,
            } => {
                if let Some(&replacement) = self.active.get(&param) {
                    // Promotion is a flow-analysis artifact; it does not
                    // survive substitution. The use's declared tag joins
                    // the replacement's.
                    let combined =
                        unite(declared_nullability(self.db, replacement), nullability);
                    return with_declared_nullability(self.db, replacement, combined);
                }
                match promoted_bound {
                    Some(bound) => {
                        let new_bound = self.instantiate(bound);
                        if new_bound != bound {
                            self.db.type_param(param, nullability, Some(new_bound))
                        } else {
                            ty
                        }
                    }
                    None => ty,
                }
            }
        }
    }

    fn instantiate_function(
        &mut self,
        ty: TypeId,
        shape_id: crate::types::FunctionShapeId,
    ) -> TypeId {
        let shape = self.db.function_shape(shape_id);

        // Binders shadow outer entries for the duration of the body.
        let mut saved: Vec<(ParamId, Option<TypeId>)> = Vec::new();
        for &param in &shape.type_params {
            saved.push((param, self.active.remove(&param)));
        }

        // If the substitution reaches into any binder bound, freshen the
        // whole binder list so self- and sibling-references stay
        // consistent, then patch the bounds with the redirects in scope.
        let mut type_params = shape.type_params.clone();
        let mut changed = false;
        let bounds_touched = shape.type_params.iter().any(|&param| {
            let bound = self.db.type_param_decl(param).bound;
            self.instantiate(bound) != bound
        });
        if bounds_touched {
            for (i, &param) in shape.type_params.iter().enumerate() {
                let decl = self.db.type_param_decl(param);
                let fresh = self.db.fresh_type_param(TypeParamDecl {
                    name: decl.name,
                    bound: decl.bound,
                    variance: decl.variance,
                });
                type_params[i] = fresh;
                // NonNullable is neutral under the tag join, so each use
                // keeps its own declared tag.
                let redirect =
                    self.db
                        .type_param(fresh, crate::types::Nullability::NonNullable, None);
                self.active.insert(param, redirect);
                saved.push((param, None));
            }
            for (i, &param) in shape.type_params.iter().enumerate() {
                let bound = self.db.type_param_decl(param).bound;
                let patched = self.instantiate(bound);
                self.db.set_type_param_bound(type_params[i], patched);
            }
            changed = true;
        }

        let mut positional = Vec::with_capacity(shape.positional.len());
        for &param in &shape.positional {
            let new_param = self.instantiate(param);
            changed |= new_param != param;
            positional.push(new_param);
        }
        let mut named = Vec::with_capacity(shape.named.len());
        for entry in &shape.named {
            let new_ty = self.instantiate(entry.ty);
            changed |= new_ty != entry.ty;
            named.push(crate::types::NamedParam {
                name: entry.name,
                ty: new_ty,
                required: entry.required,
            });
        }
        let return_type = self.instantiate(shape.return_type);
        changed |= return_type != shape.return_type;

        // Restore the outer substitution.
        for (param, entry) in saved.into_iter().rev() {
            match entry {
                Some(prev) => {
                    self.active.insert(param, prev);
                }
                None => {
                    self.active.remove(&param);
                }
            }
        }

        if !changed {
            return ty;
        }
        self.db.function(crate::types::FunctionShape {
            type_params,
            required_count: shape.required_count,
            positional,
            named,
            return_type,
            nullability: shape.nullability,
        })
    }
}
