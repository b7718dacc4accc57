//! Standard-bounds engine for the Dash type system.
//!
//! This crate computes the standard lower bound (greatest lower bound,
//! "DOWN") and standard upper bound (least upper bound, "UP") of two
//! types in a nullability-aware object language:
//! - `TypeInterner` - interned type storage with O(1) equality
//! - `StandardBounds` - the SLB/SUB engine, aware and oblivious families
//! - predicates and total orders on the lattice extremes
//! - type-parameter substitution with binder freshening
//!
//! The general subtype relation and the interface-hierarchy walk are
//! consumed through the `SubtypeOracle` and `ClassHierarchy` traits; the
//! engine itself is a pure function of its inputs.

pub mod bounds;
mod bounds_rules;
pub mod db;
pub mod def;
pub mod format;
pub mod instantiate;
pub mod intern;
pub mod nullability;
pub mod oracle;
pub mod predicates;
pub mod types;

pub use bounds::StandardBounds;
pub use db::TypeDatabase;
pub use def::{ClassId, ClassInfo, CoreTypes};
pub use instantiate::{instantiate_type, TypeSubstitution};
pub use intern::TypeInterner;
pub use oracle::{ClassHierarchy, SubtypeMode, SubtypeOracle};
pub use types::{
    Atom, FunctionShape, FunctionShapeId, NamedParam, Nullability, ParamId, TypeId, TypeKey,
    TypeListId, TypeParamDecl, Variance,
};

#[cfg(test)]
mod tests;
