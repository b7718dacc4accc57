//! The nullability algebra.
//!
//! Two views of a type's nullability exist side by side:
//!
//! - the *declared* tag, stored in the shape (the `?`/`*` suffix as
//!   written), and
//! - the *computed* nullability, which reduces `FutureOr` and consults
//!   promoted bounds.
//!
//! `unite` and `intersect` are the join and meet used to tag bound
//! results: `unite` prefers `nullable`, then `legacy`, then
//! `undetermined`; `intersect` prefers `nonNullable`, then
//! `undetermined`, then `legacy`.

use crate::db::TypeDatabase;
use crate::def::CoreTypes;
use crate::types::{Nullability, TypeId, TypeKey};

/// Join of two nullabilities: the result can hold `null` if either
/// operand can.
pub fn unite(a: Nullability, b: Nullability) -> Nullability {
    use Nullability::*;
    if a == Nullable || b == Nullable {
        return Nullable;
    }
    if a == Legacy || b == Legacy {
        return Legacy;
    }
    if a == Undetermined || b == Undetermined {
        return Undetermined;
    }
    NonNullable
}

/// Meet of two nullabilities: the result excludes `null` if either
/// operand does.
pub fn intersect(a: Nullability, b: Nullability) -> Nullability {
    use Nullability::*;
    if a == NonNullable || b == NonNullable {
        return NonNullable;
    }
    if a == Undetermined || b == Undetermined {
        return Undetermined;
    }
    if a == Legacy || b == Legacy {
        return Legacy;
    }
    Nullable
}

/// The declared tag of a type. Forms without a suffix position read as
/// the tag their lattice role implies: `dynamic` and `void` admit
/// `null`, the bottoms do not.
pub fn declared_nullability(db: &dyn TypeDatabase, ty: TypeId) -> Nullability {
    match db.type_key(ty) {
        TypeKey::Dynamic | TypeKey::Void => Nullability::Nullable,
        TypeKey::Invalid | TypeKey::Unknown => Nullability::Undetermined,
        TypeKey::Bottom => Nullability::NonNullable,
        TypeKey::Never(n) => n,
        TypeKey::Interface { nullability, .. } => nullability,
        TypeKey::Function(shape) => db.function_shape(shape).nullability,
        TypeKey::TypeParam { nullability, .. } => nullability,
    }
}

/// The computed nullability: `FutureOr<T>` reduces through its argument,
/// `Null` is nullable, and a promoted parameter intersects its tag with
/// the promoted bound.
pub fn nullability_of(db: &dyn TypeDatabase, core: &CoreTypes, ty: TypeId) -> Nullability {
    match db.type_key(ty) {
        TypeKey::Interface {
            class,
            nullability,
            args,
        } => {
            if class == core.future_or {
                let arg = db.type_list(args).first().copied().unwrap_or(TypeId::INVALID);
                return future_or_nullability(db, core, arg, nullability);
            }
            if class == core.null {
                return Nullability::Nullable;
            }
            nullability
        }
        TypeKey::TypeParam {
            nullability,
            promoted_bound: Some(bound),
            ..
        } => intersect(nullability, nullability_of(db, core, bound)),
        _ => declared_nullability(db, ty),
    }
}

/// Nullability of `FutureOr<argument>` at declared tag `declared`:
/// non-nullable exactly when both the wrapper and the argument are,
/// nullable when either is, legacy otherwise.
pub fn future_or_nullability(
    db: &dyn TypeDatabase,
    core: &CoreTypes,
    argument: TypeId,
    declared: Nullability,
) -> Nullability {
    unite(nullability_of(db, core, argument), declared)
}

/// The nullability a fresh, unpromoted use of a type parameter gets from
/// its bound: a bound that admits `null` leaves the use undetermined.
pub fn nullability_from_bound(
    db: &dyn TypeDatabase,
    core: &CoreTypes,
    bound: TypeId,
) -> Nullability {
    match nullability_of(db, core, bound) {
        Nullability::Nullable | Nullability::Undetermined => Nullability::Undetermined,
        Nullability::Legacy => Nullability::Legacy,
        Nullability::NonNullable => Nullability::NonNullable,
    }
}

/// Re-tag `ty` with `nullability`. Identity when the tag already
/// matches. Forms without a suffix position are returned unchanged.
///
/// Re-tagging a promoted parameter use as nullable drops the promotion:
/// promoted uses are potentially-non-nullable by construction.
pub fn with_declared_nullability(
    db: &dyn TypeDatabase,
    ty: TypeId,
    nullability: Nullability,
) -> TypeId {
    match db.type_key(ty) {
        TypeKey::Dynamic
        | TypeKey::Void
        | TypeKey::Invalid
        | TypeKey::Bottom
        | TypeKey::Unknown => ty,
        TypeKey::Never(n) => {
            if n == nullability {
                ty
            } else {
                db.never(nullability)
            }
        }
        TypeKey::Interface {
            class,
            nullability: n,
            args,
        } => {
            if n == nullability {
                ty
            } else {
                db.intern(TypeKey::Interface {
                    class,
                    nullability,
                    args,
                })
            }
        }
        TypeKey::Function(shape_id) => {
            let shape = db.function_shape(shape_id);
            if shape.nullability == nullability {
                ty
            } else {
                let mut shape = (*shape).clone();
                shape.nullability = nullability;
                db.function(shape)
            }
        }
        TypeKey::TypeParam {
            param,
            nullability: n,
            promoted_bound,
        } => {
            if n == nullability {
                ty
            } else if nullability == Nullability::Nullable {
                db.type_param(param, nullability, None)
            } else {
                db.type_param(param, nullability, promoted_bound)
            }
        }
    }
}

/// Shallow strip of the nullability suffix: the same type, declared
/// non-nullable.
pub fn non_null(db: &dyn TypeDatabase, ty: TypeId) -> TypeId {
    with_declared_nullability(db, ty, Nullability::NonNullable)
}
