//! Upper bounds involving type parameters.
//!
//! A type parameter bounds against another type through its bound: if
//! neither operand is a subtype of the other, the parameter is widened
//! to its declared bound (for a plain use) or its promoted bound (for an
//! intersection use `X & B`), with the parameter itself replaced by
//! `Object` inside the bound. That substitution is the termination
//! device: each widening step strictly shrinks the set of bounds that
//! can refer back to the parameter, so F-bounded chains cannot recurse
//! forever.

use crate::instantiate::{instantiate_type, TypeSubstitution};
use crate::nullability::{declared_nullability, unite, with_declared_nullability};
use crate::oracle::{ClassHierarchy, SubtypeMode, SubtypeOracle};
use crate::types::{TypeId, TypeKey};

use super::super::bounds::StandardBounds;

impl<'a, O: SubtypeOracle, H: ClassHierarchy> StandardBounds<'a, O, H> {
    /// UP of an unpromoted type-parameter use and an arbitrary type.
    pub(crate) fn type_param_upper_bound(&self, tp: TypeId, other: TypeId) -> TypeId {
        let db = self.db;
        let TypeKey::TypeParam {
            param,
            nullability: n1,
            promoted_bound: None,
        } = db.type_key(tp)
        else {
            return other;
        };
        let bound = db.type_param_decl(param).bound;
        self.widening_upper_bound(tp, param, bound, n1, other)
    }

    /// UP of a promoted use `X & B` and an arbitrary type. The subtype
    /// probes run against the demoted `X`; the widening runs on `B`.
    pub(crate) fn intersection_upper_bound(&self, tp: TypeId, other: TypeId) -> TypeId {
        let db = self.db;
        let TypeKey::TypeParam {
            param,
            nullability: n1,
            promoted_bound: Some(bound),
        } = db.type_key(tp)
        else {
            return other;
        };
        let demoted = db.type_param(param, n1, None);
        self.widening_upper_bound(demoted, param, bound, n1, other)
    }

    fn widening_upper_bound(
        &self,
        self_ty: TypeId,
        param: crate::types::ParamId,
        bound: TypeId,
        n1: crate::types::Nullability,
        other: TypeId,
    ) -> TypeId {
        let db = self.db;
        let n2 = declared_nullability(db, other);
        let mode = SubtypeMode::WithNullability;

        if self.oracle.is_subtype(db, self_ty, other, mode) {
            return with_declared_nullability(db, other, unite(n1, n2));
        }
        if self.oracle.is_subtype(db, other, self_ty, mode) {
            return with_declared_nullability(db, self_ty, unite(n1, n2));
        }

        let mut subst = TypeSubstitution::new();
        subst.insert(param, self.core.object_non_nullable(db));
        let widened = instantiate_type(db, bound, &subst);
        let result = self.upper_bound(widened, other, true);
        let tag = unite(declared_nullability(db, result), unite(n1, n2));
        with_declared_nullability(db, result, tag)
    }
}
