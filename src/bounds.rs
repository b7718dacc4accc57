//! The standard-bounds engine.
//!
//! `StandardBounds` computes the standard lower bound (SLB, "DOWN") and
//! standard upper bound (SUB, "UP") of two types. The two computations
//! are mutually recursive: contravariant positions flip one into the
//! other.
//!
//! The engine handles **WHAT** (the lattice rules); the subtype relation
//! and the interface-hierarchy walk come in as oracles. All functions
//! here take `TypeId`s and return `TypeId`s - pure logic, no AST, no
//! diagnostics.
//!
//! Rule families:
//! - nullability-aware SLB/SUB (this module)
//! - structural function-type bounds (`bounds_rules::functions`)
//! - type-parameter upper bounds (`bounds_rules::type_params`)
//! - the nullability-oblivious lattice (`bounds_rules::oblivious`)

use tracing::trace;

use crate::db::TypeDatabase;
use crate::def::{ClassId, CoreTypes};
use crate::format::format_type;
use crate::nullability::{
    declared_nullability, intersect, non_null, nullability_of, unite, with_declared_nullability,
};
use crate::oracle::{ClassHierarchy, SubtypeMode, SubtypeOracle};
use crate::predicates::{is_bottom, is_null, is_object, is_top, morebottom, moretop};
use crate::types::{Nullability, TypeId, TypeKey, TypeListId};

/// The bounds engine. Holds no mutable state; every operation is a
/// deterministic function of its inputs and the supplied oracles.
pub struct StandardBounds<'a, O: SubtypeOracle, H: ClassHierarchy> {
    pub(crate) db: &'a dyn TypeDatabase,
    pub(crate) core: &'a CoreTypes,
    pub(crate) oracle: &'a O,
    pub(crate) hierarchy: &'a H,
}

impl<'a, O: SubtypeOracle, H: ClassHierarchy> StandardBounds<'a, O, H> {
    pub fn new(
        db: &'a dyn TypeDatabase,
        core: &'a CoreTypes,
        oracle: &'a O,
        hierarchy: &'a H,
    ) -> Self {
        StandardBounds {
            db,
            core,
            oracle,
            hierarchy,
        }
    }

    /// The standard lower bound: the greatest type below both operands.
    /// `nnbd` selects the nullability-aware rules; legacy clients get
    /// the oblivious lattice.
    pub fn standard_lower_bound(&self, t1: TypeId, t2: TypeId, nnbd: bool) -> TypeId {
        trace!(
            t1 = %format_type(self.db, t1),
            t2 = %format_type(self.db, t2),
            nnbd,
            "standard_lower_bound"
        );
        self.lower_bound(t1, t2, nnbd)
    }

    /// The standard upper bound: the least type above both operands.
    pub fn standard_upper_bound(&self, t1: TypeId, t2: TypeId, nnbd: bool) -> TypeId {
        trace!(
            t1 = %format_type(self.db, t1),
            t2 = %format_type(self.db, t2),
            nnbd,
            "standard_upper_bound"
        );
        self.upper_bound(t1, t2, nnbd)
    }

    pub(crate) fn lower_bound(&self, t1: TypeId, t2: TypeId, nnbd: bool) -> TypeId {
        // DOWN(T, T) = T. Interning makes this a u32 compare.
        if t1 == t2 {
            return t1;
        }
        if nnbd {
            self.lower_bound_aware(t1, t2)
        } else {
            self.lower_bound_oblivious(t1, t2)
        }
    }

    pub(crate) fn upper_bound(&self, t1: TypeId, t2: TypeId, nnbd: bool) -> TypeId {
        // UP(T, T) = T.
        if t1 == t2 {
            return t1;
        }
        if nnbd {
            self.upper_bound_aware(t1, t2)
        } else {
            self.upper_bound_oblivious(t1, t2)
        }
    }

    // =========================================================================
    // Nullability-aware SLB
    // =========================================================================

    fn lower_bound_aware(&self, t1: TypeId, t2: TypeId) -> TypeId {
        let db = self.db;
        let core = self.core;

        // DOWN(?, T) = T, DOWN(T, ?) = T.
        if t1.is_unknown() {
            return t2;
        }
        if t2.is_unknown() {
            return t1;
        }

        let t1_top = is_top(db, core, t1);
        let t2_top = is_top(db, core, t2);
        if t1_top && t2_top {
            // Both top: the lower of the two.
            return if moretop(db, core, t1, t2) { t2 } else { t1 };
        }
        if t1_top {
            return t2;
        }
        if t2_top {
            return t1;
        }

        let t1_bottom = is_bottom(db, core, t1);
        let t2_bottom = is_bottom(db, core, t2);
        if t1_bottom && t2_bottom {
            return if morebottom(db, core, t1, t2) { t1 } else { t2 };
        }
        if t1_bottom {
            return t1;
        }
        if t2_bottom {
            return t2;
        }

        let t1_null = is_null(db, core, t1);
        let t2_null = is_null(db, core, t2);
        if t1_null && t2_null {
            return if morebottom(db, core, t1, t2) { t1 } else { t2 };
        }
        let n1 = declared_nullability(db, t1);
        let n2 = declared_nullability(db, t2);
        if t1_null {
            // Null meets a potentially-nullable type at Null, anything
            // else strictly below it.
            return match n2 {
                Nullability::Nullable | Nullability::Legacy => t1,
                _ => TypeId::NEVER,
            };
        }
        if t2_null {
            return match n1 {
                Nullability::Nullable | Nullability::Legacy => t2,
                _ => TypeId::NEVER,
            };
        }

        let t1_object = is_object(db, core, t1);
        let t2_object = is_object(db, core, t2);
        if t1_object && t2_object {
            return if moretop(db, core, t1, t2) { t2 } else { t1 };
        }
        if t1_object {
            if nullability_of(db, core, t2) == Nullability::NonNullable {
                return t2;
            }
            let stripped = non_null(db, t2);
            if nullability_of(db, core, stripped) == Nullability::NonNullable {
                return stripped;
            }
            return TypeId::NEVER;
        }
        if t2_object {
            if nullability_of(db, core, t1) == Nullability::NonNullable {
                return t1;
            }
            let stripped = non_null(db, t1);
            if nullability_of(db, core, stripped) == Nullability::NonNullable {
                return stripped;
            }
            return TypeId::NEVER;
        }

        if matches!(db.type_key(t1), TypeKey::Function(_))
            && matches!(db.type_key(t2), TypeKey::Function(_))
        {
            return self.function_lower_bound(t1, t2, true);
        }

        // DOWN(T1, T2) = T1 if T1 <: T2, modulo nullability: the check
        // runs on the non-null images and the survivor carries the meet
        // of the declared tags.
        let mode = SubtypeMode::WithNullability;
        if self
            .oracle
            .is_subtype(db, non_null(db, t1), non_null(db, t2), mode)
        {
            return with_declared_nullability(db, t1, intersect(n1, n2));
        }
        if self
            .oracle
            .is_subtype(db, non_null(db, t2), non_null(db, t1), mode)
        {
            return with_declared_nullability(db, t2, intersect(n1, n2));
        }

        db.never(intersect(n1, n2))
    }

    // =========================================================================
    // Nullability-aware SUB
    // =========================================================================

    fn upper_bound_aware(&self, t1: TypeId, t2: TypeId) -> TypeId {
        let db = self.db;
        let core = self.core;

        // UP(?, T) = T, UP(T, ?) = T.
        if t1.is_unknown() {
            return t2;
        }
        if t2.is_unknown() {
            return t1;
        }

        let t1_top = is_top(db, core, t1);
        let t2_top = is_top(db, core, t2);
        if t1_top && t2_top {
            // Both top: the higher of the two.
            return if moretop(db, core, t1, t2) { t1 } else { t2 };
        }
        if t1_top {
            return t1;
        }
        if t2_top {
            return t2;
        }

        let t1_bottom = is_bottom(db, core, t1);
        let t2_bottom = is_bottom(db, core, t2);
        if t1_bottom && t2_bottom {
            // Both bottom: the higher loses, so return the one that is
            // not more bottom.
            return if morebottom(db, core, t1, t2) { t2 } else { t1 };
        }
        if t1_bottom {
            return t2;
        }
        if t2_bottom {
            return t1;
        }

        let t1_null = is_null(db, core, t1);
        let t2_null = is_null(db, core, t2);
        if t1_null && t2_null {
            return if morebottom(db, core, t1, t2) { t2 } else { t1 };
        }
        if t1_null {
            return with_declared_nullability(db, t2, Nullability::Nullable);
        }
        if t2_null {
            return with_declared_nullability(db, t1, Nullability::Nullable);
        }

        let t1_object = is_object(db, core, t1);
        let t2_object = is_object(db, core, t2);
        if t1_object && t2_object {
            return if moretop(db, core, t1, t2) { t1 } else { t2 };
        }
        if t1_object {
            if nullability_of(db, core, t2) == Nullability::NonNullable {
                return t1;
            }
            return with_declared_nullability(db, t1, Nullability::Nullable);
        }
        if t2_object {
            if nullability_of(db, core, t1) == Nullability::NonNullable {
                return t2;
            }
            return with_declared_nullability(db, t2, Nullability::Nullable);
        }

        // Type parameters, promoted or not, bound through their bounds.
        if let TypeKey::TypeParam { promoted_bound, .. } = db.type_key(t1) {
            return match promoted_bound {
                None => self.type_param_upper_bound(t1, t2),
                Some(_) => self.intersection_upper_bound(t1, t2),
            };
        }
        if let TypeKey::TypeParam { promoted_bound, .. } = db.type_key(t2) {
            return match promoted_bound {
                None => self.type_param_upper_bound(t2, t1),
                Some(_) => self.intersection_upper_bound(t2, t1),
            };
        }

        let n1 = declared_nullability(db, t1);
        let n2 = declared_nullability(db, t2);
        if matches!(db.type_key(t1), TypeKey::Function(_)) {
            if matches!(db.type_key(t2), TypeKey::Function(_)) {
                return self.function_upper_bound(t1, t2, true);
            }
            if self.is_function_class_interface(t2) {
                return core.function_raw(db, unite(n1, n2));
            }
            // A function type and an unrelated interface only share
            // Object.
            return core.object_raw(db, unite(n1, n2));
        }
        if matches!(db.type_key(t2), TypeKey::Function(_)) {
            if self.is_function_class_interface(t1) {
                return core.function_raw(db, unite(n1, n2));
            }
            return core.object_raw(db, unite(n1, n2));
        }

        let mode = SubtypeMode::WithNullability;
        if self.oracle.is_subtype(db, t1, t2, mode) {
            return with_declared_nullability(db, t2, unite(n1, n2));
        }
        if self.oracle.is_subtype(db, t2, t1, mode) {
            return with_declared_nullability(db, t1, unite(n1, n2));
        }

        if let (
            TypeKey::Interface {
                class: c1,
                args: a1,
                ..
            },
            TypeKey::Interface {
                class: c2,
                args: a2,
                ..
            },
        ) = (db.type_key(t1), db.type_key(t2))
        {
            if c1 == c2 {
                if let Some(args) = self.same_class_args_upper_bound(c1, a1, a2, true) {
                    return db.interface(c1, unite(n1, n2), args);
                }
                return self.hierarchy.legacy_least_upper_bound(db, t1, t2, true);
            }
        }

        self.hierarchy.legacy_least_upper_bound(db, t1, t2, true)
    }

    // =========================================================================
    // Shared helpers
    // =========================================================================

    /// Pointwise bound of two argument lists of the same class, guided
    /// by declared variance: covariant arguments join, contravariant
    /// arguments meet, invariant arguments must be mutual subtypes.
    /// `None` when an invariant argument disagrees; the caller falls
    /// back to the hierarchy walk.
    pub(crate) fn same_class_args_upper_bound(
        &self,
        class: ClassId,
        args1: TypeListId,
        args2: TypeListId,
        nnbd: bool,
    ) -> Option<Vec<TypeId>> {
        let db = self.db;
        let info = db.class_info(class);
        let a1 = db.type_list(args1);
        let a2 = db.type_list(args2);
        debug_assert_eq!(a1.len(), a2.len());
        debug_assert_eq!(a1.len(), info.type_params.len());

        let mode = if nnbd {
            SubtypeMode::WithNullability
        } else {
            SubtypeMode::IgnoringNullability
        };
        let mut args = Vec::with_capacity(a1.len());
        for i in 0..a1.len().min(a2.len()) {
            let variance = info
                .type_params
                .get(i)
                .map(|&p| db.type_param_decl(p).variance)
                .unwrap_or_default();
            if variance.is_contravariant() {
                args.push(self.lower_bound(a1[i], a2[i], nnbd));
            } else if variance.is_invariant() {
                if !self.oracle.are_mutual_subtypes(db, a1[i], a2[i], mode) {
                    return None;
                }
                args.push(a1[i]);
            } else {
                args.push(self.upper_bound(a1[i], a2[i], nnbd));
            }
        }
        Some(args)
    }

    pub(crate) fn is_function_class_interface(&self, ty: TypeId) -> bool {
        matches!(
            self.db.type_key(ty),
            TypeKey::Interface { class, .. } if class == self.core.function
        )
    }
}
