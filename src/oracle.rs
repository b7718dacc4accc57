//! Oracles the bounds engine consumes.
//!
//! The engine never decides subtyping or walks class hierarchies itself;
//! both come in through these traits, supplied by the surrounding
//! compiler. This keeps the engine a pure function of its inputs and
//! lets tests drive it with a small stub world.

use crate::db::TypeDatabase;
use crate::types::TypeId;

/// Which nullability semantics a subtype query runs under.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubtypeMode {
    /// Nullability-aware: `T` is not a subtype of `S` if `T` admits
    /// `null` and `S` does not.
    WithNullability,
    /// Pre-migration semantics: nullability tags are ignored.
    IgnoringNullability,
}

/// The general subtype relation, consumed as an oracle.
pub trait SubtypeOracle {
    fn is_subtype(&self, db: &dyn TypeDatabase, sub: TypeId, sup: TypeId, mode: SubtypeMode)
        -> bool;

    /// Mutual subtyping. The default body is two directed checks;
    /// implementations with a cheaper equivalence test can override it.
    fn are_mutual_subtypes(
        &self,
        db: &dyn TypeDatabase,
        a: TypeId,
        b: TypeId,
        mode: SubtypeMode,
    ) -> bool {
        self.is_subtype(db, a, b, mode) && self.is_subtype(db, b, a, mode)
    }
}

/// The interface-hierarchy walker, consumed as an oracle.
///
/// Called only when the structural upper-bound rules fall through; both
/// operands are interface types when that happens. `nnbd` tells the
/// walker which client semantics the result should carry.
pub trait ClassHierarchy {
    fn legacy_least_upper_bound(
        &self,
        db: &dyn TypeDatabase,
        a: TypeId,
        b: TypeId,
        nnbd: bool,
    ) -> TypeId;
}
