//! Classification of the lattice extremes.
//!
//! `is_top`, `is_object`, `is_bottom`, and `is_null` identify the
//! syntactic forms equivalent to the extremes of the subtype lattice; at
//! most one of them holds for a given type. `moretop` and `morebottom`
//! are total orders on the TOP∪OBJECT and BOTTOM∪NULL sets, used to pick
//! deterministically among equivalent extremes.
//!
//! Both orders are partial functions: calling one outside its domain is
//! an internal consistency failure and panics with both operands
//! rendered. Callers establish the precondition with the predicates
//! first.

use crate::db::TypeDatabase;
use crate::def::CoreTypes;
use crate::format::format_type;
use crate::nullability::{declared_nullability, non_null};
use crate::types::{Nullability, TypeId, TypeKey};

/// Is `ty` equivalent to the top of the lattice?
///
/// `dynamic`, `void`, any `T?`/`T*` whose non-nullable image is top or
/// `Object`, and non-nullable `FutureOr<S>` with a top `S`.
pub fn is_top(db: &dyn TypeDatabase, core: &CoreTypes, ty: TypeId) -> bool {
    match db.type_key(ty) {
        TypeKey::Invalid => false,
        TypeKey::Dynamic | TypeKey::Void => true,
        _ => {
            let declared = declared_nullability(db, ty);
            if declared == Nullability::Nullable || declared == Nullability::Legacy {
                let stripped = non_null(db, ty);
                return is_top(db, core, stripped) || is_object(db, core, stripped);
            }
            match db.type_key(ty) {
                TypeKey::Interface {
                    class,
                    nullability: Nullability::NonNullable,
                    args,
                } if class == core.future_or => {
                    let arg = db.type_list(args).first().copied().unwrap_or(TypeId::INVALID);
                    is_top(db, core, arg)
                }
                _ => false,
            }
        }
    }
}

/// Is `ty` equivalent to non-nullable `Object`? Either `Object` itself
/// or non-nullable `FutureOr<S>` with an Object-equivalent `S`.
pub fn is_object(db: &dyn TypeDatabase, core: &CoreTypes, ty: TypeId) -> bool {
    match db.type_key(ty) {
        TypeKey::Interface {
            class,
            nullability: Nullability::NonNullable,
            args,
        } => {
            if class == core.object {
                return db.type_list(args).is_empty();
            }
            if class == core.future_or {
                let arg = db.type_list(args).first().copied().unwrap_or(TypeId::INVALID);
                return is_object(db, core, arg);
            }
            false
        }
        _ => false,
    }
}

/// Is `ty` equivalent to the bottom of the lattice?
///
/// Non-nullable `Never`, a non-nullable promoted parameter `X & B` with
/// a bottom `B`, a non-nullable unpromoted parameter whose declared
/// bound is bottom, and the oblivious `Bottom`.
pub fn is_bottom(db: &dyn TypeDatabase, core: &CoreTypes, ty: TypeId) -> bool {
    match db.type_key(ty) {
        TypeKey::Invalid => false,
        TypeKey::Bottom => true,
        TypeKey::Never(Nullability::NonNullable) => true,
        TypeKey::TypeParam {
            param,
            nullability: Nullability::NonNullable,
            promoted_bound,
        } => match promoted_bound {
            Some(bound) => is_bottom(db, core, bound),
            None => is_bottom(db, core, db.type_param_decl(param).bound),
        },
        _ => false,
    }
}

/// Is `ty` equivalent to `Null`? Either `Null` itself or a `T?`/`T*`
/// whose non-nullable image is bottom (e.g. `Never?`).
pub fn is_null(db: &dyn TypeDatabase, core: &CoreTypes, ty: TypeId) -> bool {
    match db.type_key(ty) {
        TypeKey::Invalid => false,
        TypeKey::Interface {
            class,
            nullability: Nullability::NonNullable,
            ..
        } if class == core.null => true,
        _ => {
            let declared = declared_nullability(db, ty);
            (declared == Nullability::Nullable || declared == Nullability::Legacy)
                && is_bottom(db, core, non_null(db, ty))
        }
    }
}

/// Total order on TOP∪OBJECT: does `s` sit above `t`?
///
/// `void` beats everything, then `dynamic`, then non-nullable `Object`;
/// mixed suffixes order `nonNullable > nullable > legacy`; two
/// non-nullable `FutureOr`s compare by argument.
///
/// # Panics
///
/// If either operand is not TOP or OBJECT.
// TODO(nnbd): revisit the nullable-over-legacy ordering once the mixed
// suffix question is settled; morebottom swaps it deliberately.
pub fn moretop(db: &dyn TypeDatabase, core: &CoreTypes, s: TypeId, t: TypeId) -> bool {
    let s_key = db.type_key(s);
    let t_key = db.type_key(t);

    if matches!(s_key, TypeKey::Void) {
        return true;
    }
    if matches!(t_key, TypeKey::Void) {
        return false;
    }
    if matches!(s_key, TypeKey::Dynamic) {
        return true;
    }
    if matches!(t_key, TypeKey::Dynamic) {
        return false;
    }
    if is_non_nullable_object(db, core, &s_key) {
        return true;
    }
    if is_non_nullable_object(db, core, &t_key) {
        return false;
    }

    let s_n = declared_nullability(db, s);
    let t_n = declared_nullability(db, t);
    if s_n == Nullability::Legacy && t_n == Nullability::Legacy {
        return moretop(db, core, non_null(db, s), non_null(db, t));
    }
    if t_n == Nullability::Legacy {
        return true;
    }
    if s_n == Nullability::Legacy {
        return false;
    }
    if s_n == Nullability::Nullable && t_n == Nullability::Nullable {
        return moretop(db, core, non_null(db, s), non_null(db, t));
    }
    if t_n == Nullability::Nullable {
        return true;
    }
    if s_n == Nullability::Nullable {
        return false;
    }

    match (&s_key, &t_key) {
        (
            TypeKey::Interface {
                class: s_class,
                args: s_args,
                ..
            },
            TypeKey::Interface {
                class: t_class,
                args: t_args,
                ..
            },
        ) if *s_class == core.future_or && *t_class == core.future_or => {
            let s_arg = db.type_list(*s_args).first().copied().unwrap_or(TypeId::INVALID);
            let t_arg = db.type_list(*t_args).first().copied().unwrap_or(TypeId::INVALID);
            moretop(db, core, s_arg, t_arg)
        }
        _ => panic!(
            "moretop({}, {}): operands are not top or Object types",
            format_type(db, s),
            format_type(db, t)
        ),
    }
}

/// Total order on BOTTOM∪NULL: does `s` sit below `t`?
///
/// Non-nullable `Never` beats everything, then `Null`; mixed suffixes
/// order `legacy` below `nullable` (mirroring `moretop` with swapped
/// polarity); promoted parameters sit below unpromoted ones, and two
/// parameters compare by (promoted) bound.
///
/// # Panics
///
/// If either operand is not BOTTOM or NULL.
pub fn morebottom(db: &dyn TypeDatabase, core: &CoreTypes, s: TypeId, t: TypeId) -> bool {
    let s_key = db.type_key(s);
    let t_key = db.type_key(t);

    if matches!(s_key, TypeKey::Never(Nullability::NonNullable) | TypeKey::Bottom) {
        return true;
    }
    if matches!(t_key, TypeKey::Never(Nullability::NonNullable) | TypeKey::Bottom) {
        return false;
    }
    if is_null_class(core, &s_key) {
        return true;
    }
    if is_null_class(core, &t_key) {
        return false;
    }

    let s_n = declared_nullability(db, s);
    let t_n = declared_nullability(db, t);
    if s_n == Nullability::Nullable && t_n == Nullability::Nullable {
        return morebottom(db, core, non_null(db, s), non_null(db, t));
    }
    if t_n == Nullability::Nullable {
        return true;
    }
    if s_n == Nullability::Nullable {
        return false;
    }
    if s_n == Nullability::Legacy && t_n == Nullability::Legacy {
        return morebottom(db, core, non_null(db, s), non_null(db, t));
    }
    if t_n == Nullability::Legacy {
        return true;
    }
    if s_n == Nullability::Legacy {
        return false;
    }

    match (&s_key, &t_key) {
        (
            TypeKey::TypeParam {
                promoted_bound: Some(s_bound),
                ..
            },
            TypeKey::TypeParam {
                promoted_bound: Some(t_bound),
                ..
            },
        ) => morebottom(db, core, *s_bound, *t_bound),
        (TypeKey::TypeParam { promoted_bound: Some(_), .. }, _) => true,
        (_, TypeKey::TypeParam { promoted_bound: Some(_), .. }) => false,
        (
            TypeKey::TypeParam { param: s_param, .. },
            TypeKey::TypeParam { param: t_param, .. },
        ) => morebottom(
            db,
            core,
            db.type_param_decl(*s_param).bound,
            db.type_param_decl(*t_param).bound,
        ),
        _ => panic!(
            "morebottom({}, {}): operands are not bottom or Null types",
            format_type(db, s),
            format_type(db, t)
        ),
    }
}

fn is_non_nullable_object(db: &dyn TypeDatabase, core: &CoreTypes, key: &TypeKey) -> bool {
    matches!(
        key,
        TypeKey::Interface {
            class,
            nullability: Nullability::NonNullable,
            args,
        } if *class == core.object && db.type_list(*args).is_empty()
    )
}

fn is_null_class(core: &CoreTypes, key: &TypeKey) -> bool {
    matches!(
        key,
        TypeKey::Interface { class, .. } if *class == core.null
    )
}
