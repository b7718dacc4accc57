//! The nullability-oblivious lattice, used for clients that predate the
//! nullability migration.
//!
//! Much simpler than the aware rules: `void`, `dynamic`, and the legacy
//! `Object` absorb upward and are neutral downward (in that priority
//! order); `Bottom` and `Null` absorb downward and are neutral upward.
//! The one subtlety is the SLB treatment of `FutureOr`, which
//! distributes into its arms.

use crate::format::format_type;
use crate::nullability::{declared_nullability, intersect, nullability_of, unite};
use crate::oracle::{ClassHierarchy, SubtypeMode, SubtypeOracle};
use crate::types::{Nullability, TypeId, TypeKey};

use super::super::bounds::StandardBounds;

impl<'a, O: SubtypeOracle, H: ClassHierarchy> StandardBounds<'a, O, H> {
    pub(crate) fn lower_bound_oblivious(&self, t1: TypeId, t2: TypeId) -> TypeId {
        let db = self.db;

        if t1.is_unknown() {
            return t2;
        }
        if t2.is_unknown() {
            return t1;
        }

        // void, dynamic, and Object are neutral downward, in that order.
        if t1 == TypeId::VOID {
            return t2;
        }
        if t2 == TypeId::VOID {
            return t1;
        }
        if t1 == TypeId::DYNAMIC {
            return t2;
        }
        if t2 == TypeId::DYNAMIC {
            return t1;
        }
        if self.is_raw_object_interface(t1) {
            return t2;
        }
        if self.is_raw_object_interface(t2) {
            return t1;
        }

        // Bottom and Null absorb downward.
        if t1 == TypeId::BOTTOM {
            return t1;
        }
        if t2 == TypeId::BOTTOM {
            return t2;
        }
        if self.is_null_interface(t1) {
            return t1;
        }
        if self.is_null_interface(t2) {
            return t2;
        }

        if matches!(db.type_key(t1), TypeKey::Function(_))
            && matches!(db.type_key(t2), TypeKey::Function(_))
        {
            return self.function_lower_bound(t1, t2, false);
        }

        if let Some(result) = self.future_or_lower_bound(t1, t2) {
            return result;
        }

        let mode = SubtypeMode::IgnoringNullability;
        if self.oracle.is_subtype(db, t1, t2, mode) {
            return t1;
        }
        if self.oracle.is_subtype(db, t2, t1, mode) {
            return t2;
        }

        TypeId::BOTTOM
    }

    pub(crate) fn upper_bound_oblivious(&self, t1: TypeId, t2: TypeId) -> TypeId {
        let db = self.db;

        if t1.is_unknown() {
            return t2;
        }
        if t2.is_unknown() {
            return t1;
        }

        // void, dynamic, and Object absorb upward, in that order.
        if t1 == TypeId::VOID || t2 == TypeId::VOID {
            return TypeId::VOID;
        }
        if t1 == TypeId::DYNAMIC || t2 == TypeId::DYNAMIC {
            return TypeId::DYNAMIC;
        }
        if self.is_raw_object_interface(t1) {
            return t1;
        }
        if self.is_raw_object_interface(t2) {
            return t2;
        }

        // Bottom and Null are neutral upward.
        if t1 == TypeId::BOTTOM || self.is_null_interface(t1) {
            return t2;
        }
        if t2 == TypeId::BOTTOM || self.is_null_interface(t2) {
            return t1;
        }

        let t1_function = matches!(db.type_key(t1), TypeKey::Function(_));
        let t2_function = matches!(db.type_key(t2), TypeKey::Function(_));
        if t1_function && t2_function {
            return self.function_upper_bound(t1, t2, false);
        }

        // A function type against an interface joins as the raw
        // Function type.
        let t1 = if t1_function && matches!(db.type_key(t2), TypeKey::Interface { .. }) {
            self.core.function_raw(db, Nullability::Legacy)
        } else {
            t1
        };
        let t2 = if t2_function && matches!(db.type_key(t1), TypeKey::Interface { .. }) {
            self.core.function_raw(db, Nullability::Legacy)
        } else {
            t2
        };

        if let (
            TypeKey::Interface {
                class: c1,
                args: a1,
                nullability: n1,
            },
            TypeKey::Interface {
                class: c2,
                args: a2,
                nullability: n2,
            },
        ) = (db.type_key(t1), db.type_key(t2))
        {
            if c1 == c2 {
                if let Some(args) = self.same_class_args_upper_bound(c1, a1, a2, false) {
                    return db.interface(c1, unite(n1, n2), args);
                }
            }
            return self.hierarchy.legacy_least_upper_bound(db, t1, t2, false);
        }

        debug_assert!(
            false,
            "no oblivious upper bound rule for {} and {}",
            format_type(db, t1),
            format_type(db, t2)
        );
        TypeId::DYNAMIC
    }

    /// The SLB distribution rules for `FutureOr`:
    /// `SLB(FutureOr<A>, FutureOr<B>) = FutureOr<SLB(A, B)>`,
    /// `SLB(FutureOr<A>, Future<B>) = Future<SLB(A, B)>`, and
    /// `SLB(FutureOr<A>, B) = SLB(A, B)` otherwise; symmetric in the
    /// other operand. The outer constructor carries the meet of the
    /// operands' effective nullabilities.
    fn future_or_lower_bound(&self, t1: TypeId, t2: TypeId) -> Option<TypeId> {
        let db = self.db;
        let core = self.core;

        if let Some(a) = core.future_or_argument(db, t1) {
            let n1 = nullability_of(db, core, t1);
            if let Some(b) = core.future_or_argument(db, t2) {
                let n2 = nullability_of(db, core, t2);
                let arg = self.lower_bound(a, b, false);
                return Some(core.future_or(db, intersect(n1, n2), arg));
            }
            if let Some(b) = self.future_argument(t2) {
                let n2 = declared_nullability(db, t2);
                let arg = self.lower_bound(a, b, false);
                return Some(core.future(db, intersect(n1, n2), arg));
            }
            return Some(self.lower_bound(a, t2, false));
        }

        if let Some(b) = core.future_or_argument(db, t2) {
            let n2 = nullability_of(db, core, t2);
            if let Some(a) = self.future_argument(t1) {
                let n1 = declared_nullability(db, t1);
                let arg = self.lower_bound(a, b, false);
                return Some(core.future(db, intersect(n1, n2), arg));
            }
            return Some(self.lower_bound(t1, b, false));
        }

        None
    }

    fn future_argument(&self, ty: TypeId) -> Option<TypeId> {
        match self.db.type_key(ty) {
            TypeKey::Interface { class, args, .. } if class == self.core.future => {
                self.db.type_list(args).first().copied()
            }
            _ => None,
        }
    }

    pub(crate) fn is_raw_object_interface(&self, ty: TypeId) -> bool {
        matches!(
            self.db.type_key(ty),
            TypeKey::Interface { class, args, .. }
                if class == self.core.object && self.db.type_list(args).is_empty()
        )
    }

    pub(crate) fn is_null_interface(&self, ty: TypeId) -> bool {
        matches!(
            self.db.type_key(ty),
            TypeKey::Interface { class, .. } if class == self.core.null
        )
    }
}
