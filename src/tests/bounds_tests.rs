//! End-to-end scenarios for the nullability-aware SLB/SUB rules.

use crate::bounds::StandardBounds;
use crate::db::TypeDatabase;
use crate::nullability::declared_nullability;
use crate::tests::harness::TestWorld;
use crate::types::Nullability::{Legacy, NonNullable, Nullable};
use crate::types::{TypeId, TypeKey};

macro_rules! engine {
    ($world:ident, $oracle:ident, $hierarchy:ident, $engine:ident) => {
        let $world = TestWorld::new();
        let $oracle = $world.oracle();
        let $hierarchy = $world.hierarchy();
        let $engine = StandardBounds::new(&$world.db, &$world.core, &$oracle, &$hierarchy);
    };
}

#[test]
fn test_identity() {
    engine!(world, oracle, hierarchy, engine);
    let int = world.ty(world.int);
    assert_eq!(engine.standard_lower_bound(int, int, true), int);
    assert_eq!(engine.standard_upper_bound(int, int, true), int);
}

#[test]
fn test_unknown_passes_through() {
    engine!(world, oracle, hierarchy, engine);
    let int = world.ty(world.int);
    assert_eq!(engine.standard_lower_bound(TypeId::UNKNOWN, int, true), int);
    assert_eq!(engine.standard_lower_bound(int, TypeId::UNKNOWN, true), int);
    assert_eq!(engine.standard_upper_bound(TypeId::UNKNOWN, int, true), int);
    assert_eq!(engine.standard_upper_bound(int, TypeId::UNKNOWN, true), int);
}

#[test]
fn test_upper_bound_of_unrelated_classes_uses_hierarchy() {
    engine!(world, oracle, hierarchy, engine);
    let int = world.ty(world.int);
    let double = world.ty(world.double);
    let num = world.ty(world.num);
    assert_eq!(engine.standard_upper_bound(int, double, true), num);
}

#[test]
fn test_lower_bound_strips_nullability() {
    engine!(world, oracle, hierarchy, engine);
    let int = world.ty(world.int);
    let int_q = world.ty_n(world.int, Nullable);
    assert_eq!(engine.standard_lower_bound(int_q, int, true), int);
    assert_eq!(engine.standard_lower_bound(int, int_q, true), int);
}

#[test]
fn test_upper_bound_never_is_neutral() {
    engine!(world, oracle, hierarchy, engine);
    let int = world.ty(world.int);
    assert_eq!(engine.standard_upper_bound(TypeId::NEVER, int, true), int);
    assert_eq!(engine.standard_upper_bound(int, TypeId::NEVER, true), int);
}

#[test]
fn test_upper_bound_null_lifts_to_nullable() {
    engine!(world, oracle, hierarchy, engine);
    let int = world.ty(world.int);
    let int_q = world.ty_n(world.int, Nullable);
    let null = world.core.null_type(&world.db);
    assert_eq!(engine.standard_upper_bound(null, int, true), int_q);
    assert_eq!(engine.standard_upper_bound(int, null, true), int_q);
}

#[test]
fn test_lower_bound_null_meets_nullable_at_null() {
    engine!(world, oracle, hierarchy, engine);
    let null = world.core.null_type(&world.db);
    let int = world.ty(world.int);
    let int_q = world.ty_n(world.int, Nullable);
    let int_star = world.ty_n(world.int, Legacy);

    assert_eq!(engine.standard_lower_bound(null, int_q, true), null);
    assert_eq!(engine.standard_lower_bound(int_star, null, true), null);
    // Against a non-nullable type, nothing but Never is below Null.
    assert_eq!(engine.standard_lower_bound(null, int, true), TypeId::NEVER);
}

#[test]
fn test_lower_bound_with_top_returns_other() {
    engine!(world, oracle, hierarchy, engine);
    let int_q = world.ty_n(world.int, Nullable);
    let object_q = world.core.object_raw(&world.db, Nullable);
    assert_eq!(engine.standard_lower_bound(object_q, int_q, true), int_q);
    assert_eq!(engine.standard_lower_bound(int_q, TypeId::DYNAMIC, true), int_q);
}

#[test]
fn test_bounds_of_two_tops_use_moretop() {
    engine!(world, oracle, hierarchy, engine);
    let object_q = world.core.object_raw(&world.db, Nullable);
    // UP picks the higher top, DOWN the lower one.
    assert_eq!(
        engine.standard_upper_bound(TypeId::VOID, TypeId::DYNAMIC, true),
        TypeId::VOID
    );
    assert_eq!(
        engine.standard_lower_bound(TypeId::VOID, TypeId::DYNAMIC, true),
        TypeId::DYNAMIC
    );
    assert_eq!(
        engine.standard_lower_bound(TypeId::DYNAMIC, object_q, true),
        object_q
    );
}

#[test]
fn test_object_against_non_nullable_operand() {
    engine!(world, oracle, hierarchy, engine);
    let db = &world.db;
    let object = world.core.object_non_nullable(db);
    let object_q = world.core.object_raw(db, Nullable);
    let int = world.ty(world.int);
    let int_q = world.ty_n(world.int, Nullable);

    // DOWN(Object, T) keeps the non-nullable operand, or strips the
    // suffix when that suffices.
    assert_eq!(engine.standard_lower_bound(object, int, true), int);
    assert_eq!(engine.standard_lower_bound(object, int_q, true), int);

    // UP(Object, T) is Object, lifted to Object? when T admits null.
    assert_eq!(engine.standard_upper_bound(object, int, true), object);
    assert_eq!(engine.standard_upper_bound(object, int_q, true), object_q);
}

#[test]
fn test_lower_bound_object_against_nullable_only_form() {
    engine!(world, oracle, hierarchy, engine);
    let db = &world.db;
    let object = world.core.object_non_nullable(db);
    // FutureOr<int?> cannot be made non-nullable by stripping the
    // suffix, so the meet with Object collapses to Never.
    let int_q = world.ty_n(world.int, Nullable);
    let fo = world.generic(world.core.future_or, NonNullable, int_q);
    assert_eq!(engine.standard_lower_bound(object, fo, true), TypeId::NEVER);
}

#[test]
fn test_upper_bound_same_class_covariant() {
    engine!(world, oracle, hierarchy, engine);
    let int = world.ty(world.int);
    let double = world.ty(world.double);
    let num = world.ty(world.num);
    let list_int = world.generic(world.list, NonNullable, int);
    let list_double = world.generic(world.list, NonNullable, double);
    let list_num = world.generic(world.list, NonNullable, num);
    assert_eq!(
        engine.standard_upper_bound(list_int, list_double, true),
        list_num
    );
}

#[test]
fn test_upper_bound_same_class_invariant_falls_back_to_hierarchy() {
    engine!(world, oracle, hierarchy, engine);
    let int = world.ty(world.int);
    let double = world.ty(world.double);
    let cell_int = world.generic(world.cell, NonNullable, int);
    let cell_double = world.generic(world.cell, NonNullable, double);
    let object = world.core.object_non_nullable(&world.db);
    assert_eq!(
        engine.standard_upper_bound(cell_int, cell_double, true),
        object
    );

    // Equal invariant arguments keep the class, uniting the suffixes.
    let cell_int2 = world.generic(world.cell, Nullable, int);
    let result = engine.standard_upper_bound(cell_int, cell_int2, true);
    match world.db.type_key(result) {
        TypeKey::Interface {
            class, nullability, ..
        } => {
            assert_eq!(class, world.cell);
            assert_eq!(nullability, Nullable);
        }
        other => panic!("expected Cell interface, got {:?}", other),
    }
}

#[test]
fn test_upper_bound_subtype_carries_united_nullability() {
    engine!(world, oracle, hierarchy, engine);
    let int_q = world.ty_n(world.int, Nullable);
    let num = world.ty(world.num);
    let num_q = world.ty_n(world.num, Nullable);
    assert_eq!(engine.standard_upper_bound(int_q, num, true), num_q);
}

#[test]
fn test_lower_bound_unrelated_classes_is_never() {
    engine!(world, oracle, hierarchy, engine);
    let db = &world.db;
    let int = world.ty(world.int);
    let string = world.ty(world.string);
    assert_eq!(engine.standard_lower_bound(int, string, true), TypeId::NEVER);

    // The Never fallback carries the meet of the declared tags.
    let int_q = world.ty_n(world.int, Nullable);
    let string_q = world.ty_n(world.string, Nullable);
    let result = engine.standard_lower_bound(int_q, string_q, true);
    assert_eq!(result, db.never(Nullable));
    assert_eq!(declared_nullability(db, result), Nullable);
}

#[test]
fn test_function_against_function_class_interface() {
    engine!(world, oracle, hierarchy, engine);
    let db = &world.db;
    let int = world.ty(world.int);
    let f = world.fn_type(vec![int], TypeId::VOID);
    let function_class = world.core.function_raw(db, NonNullable);
    assert_eq!(
        engine.standard_upper_bound(f, function_class, true),
        function_class
    );

    // Against an unrelated interface, the join is Object.
    let object = world.core.object_non_nullable(db);
    assert_eq!(engine.standard_upper_bound(f, int, true), object);
    assert_eq!(engine.standard_upper_bound(int, f, true), object);
}

#[test]
fn test_bounds_mix_futureor_via_subtyping() {
    engine!(world, oracle, hierarchy, engine);
    let int = world.ty(world.int);
    let fo_int = world.generic(world.core.future_or, NonNullable, int);
    // int <: FutureOr<int>, so the bounds resolve by the subtype rules.
    assert_eq!(engine.standard_lower_bound(fo_int, int, true), int);
    assert_eq!(engine.standard_upper_bound(fo_int, int, true), fo_int);
}
