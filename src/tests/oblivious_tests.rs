//! Scenarios for the nullability-oblivious lattice. Legacy clients tag
//! everything `*`, so the tests construct legacy-tagged types
//! throughout.

use crate::bounds::StandardBounds;
use crate::db::TypeDatabase;
use crate::tests::harness::TestWorld;
use crate::types::Nullability::Legacy;
use crate::types::{FunctionShape, TypeId};

macro_rules! engine {
    ($world:ident, $oracle:ident, $hierarchy:ident, $engine:ident) => {
        let $world = TestWorld::new();
        let $oracle = $world.oracle();
        let $hierarchy = $world.hierarchy();
        let $engine = StandardBounds::new(&$world.db, &$world.core, &$oracle, &$hierarchy);
    };
}

#[test]
fn test_void_and_dynamic_absorb_upward() {
    engine!(world, oracle, hierarchy, engine);
    let int = world.ty_n(world.int, Legacy);
    assert_eq!(
        engine.standard_upper_bound(TypeId::VOID, int, false),
        TypeId::VOID
    );
    assert_eq!(
        engine.standard_upper_bound(int, TypeId::DYNAMIC, false),
        TypeId::DYNAMIC
    );
    // void wins over dynamic.
    assert_eq!(
        engine.standard_upper_bound(TypeId::DYNAMIC, TypeId::VOID, false),
        TypeId::VOID
    );
}

#[test]
fn test_void_and_dynamic_neutral_downward() {
    engine!(world, oracle, hierarchy, engine);
    let int = world.ty_n(world.int, Legacy);
    assert_eq!(engine.standard_lower_bound(TypeId::VOID, int, false), int);
    assert_eq!(engine.standard_lower_bound(int, TypeId::DYNAMIC, false), int);
}

#[test]
fn test_legacy_object_absorbs_upward_below_dynamic() {
    engine!(world, oracle, hierarchy, engine);
    let db = &world.db;
    let int = world.ty_n(world.int, Legacy);
    let object = world.core.object_raw(db, Legacy);
    assert_eq!(engine.standard_upper_bound(object, int, false), object);
    assert_eq!(
        engine.standard_upper_bound(object, TypeId::DYNAMIC, false),
        TypeId::DYNAMIC
    );
    assert_eq!(engine.standard_lower_bound(object, int, false), int);
}

#[test]
fn test_bottom_and_null_absorb_downward() {
    engine!(world, oracle, hierarchy, engine);
    let int = world.ty_n(world.int, Legacy);
    let null = world.core.null_type(&world.db);
    assert_eq!(
        engine.standard_lower_bound(TypeId::BOTTOM, int, false),
        TypeId::BOTTOM
    );
    assert_eq!(engine.standard_lower_bound(int, null, false), null);
    assert_eq!(engine.standard_upper_bound(TypeId::BOTTOM, int, false), int);
    assert_eq!(engine.standard_upper_bound(null, int, false), int);
}

#[test]
fn test_subtype_rule_applies_downward() {
    engine!(world, oracle, hierarchy, engine);
    let int = world.ty_n(world.int, Legacy);
    let num = world.ty_n(world.num, Legacy);
    assert_eq!(engine.standard_lower_bound(int, num, false), int);
    assert_eq!(engine.standard_lower_bound(num, int, false), int);

    // Unrelated classes bottom out.
    let string = world.ty_n(world.string, Legacy);
    assert_eq!(
        engine.standard_lower_bound(int, string, false),
        TypeId::BOTTOM
    );
}

#[test]
fn test_upper_bound_goes_through_hierarchy_not_subtyping() {
    engine!(world, oracle, hierarchy, engine);
    let db = &world.db;
    let int = world.ty_n(world.int, Legacy);
    let fo_int = world.generic(world.core.future_or, Legacy, int);
    let future_int = world.generic(world.core.future, Legacy, int);

    // Future<int> <: FutureOr<int>, but the oblivious UP has no subtype
    // rule; unrelated constructors join through the hierarchy walk.
    let object_star = world.core.object_raw(db, Legacy);
    assert_eq!(
        engine.standard_upper_bound(fo_int, future_int, false),
        object_star
    );
}

#[test]
fn test_lower_bound_distributes_futureor() {
    engine!(world, oracle, hierarchy, engine);
    let int = world.ty_n(world.int, Legacy);
    let num = world.ty_n(world.num, Legacy);
    let fo_int = world.generic(world.core.future_or, Legacy, int);
    let fo_num = world.generic(world.core.future_or, Legacy, num);
    let future_num = world.generic(world.core.future, Legacy, num);

    // SLB(FutureOr<A>, FutureOr<B>) = FutureOr<SLB(A, B)>.
    assert_eq!(
        engine.standard_lower_bound(fo_int, fo_num, false),
        fo_int
    );
    // SLB(FutureOr<A>, Future<B>) = Future<SLB(A, B)>.
    let future_int = world.generic(world.core.future, Legacy, int);
    assert_eq!(
        engine.standard_lower_bound(fo_int, future_num, false),
        future_int
    );
    assert_eq!(
        engine.standard_lower_bound(future_num, fo_int, false),
        future_int
    );
    // SLB(FutureOr<A>, B) = SLB(A, B).
    assert_eq!(engine.standard_lower_bound(fo_num, int, false), int);
    assert_eq!(engine.standard_lower_bound(int, fo_num, false), int);
}

#[test]
fn test_same_class_pointwise_upward() {
    engine!(world, oracle, hierarchy, engine);
    let int = world.ty_n(world.int, Legacy);
    let double = world.ty_n(world.double, Legacy);
    let num = world.ty_n(world.num, Legacy);
    let list_int = world.generic(world.list, Legacy, int);
    let list_double = world.generic(world.list, Legacy, double);
    let list_num = world.generic(world.list, Legacy, num);
    assert_eq!(
        engine.standard_upper_bound(list_int, list_double, false),
        list_num
    );

    // Invariant argument mismatch falls back to the hierarchy walk.
    let cell_int = world.generic(world.cell, Legacy, int);
    let cell_double = world.generic(world.cell, Legacy, double);
    assert_eq!(
        engine.standard_upper_bound(cell_int, cell_double, false),
        world.core.object_raw(&world.db, Legacy)
    );
}

#[test]
fn test_function_against_interface_upward() {
    engine!(world, oracle, hierarchy, engine);
    let db = &world.db;
    let int = world.ty_n(world.int, Legacy);
    let f = db.function(FunctionShape {
        type_params: Vec::new(),
        required_count: 1,
        positional: vec![int],
        named: Vec::new(),
        return_type: TypeId::VOID,
        nullability: Legacy,
    });

    // The function joins the raw Function type, and unrelated
    // interfaces join it at Object through the hierarchy.
    let function_star = world.core.function_raw(db, Legacy);
    assert_eq!(
        engine.standard_upper_bound(f, function_star, false),
        function_star
    );
    assert_eq!(
        engine.standard_upper_bound(f, int, false),
        world.core.object_raw(db, Legacy)
    );
}

#[test]
fn test_function_lower_bound_rejects_mixed_shapes() {
    engine!(world, oracle, hierarchy, engine);
    let db = &world.db;
    let int = world.ty_n(world.int, Legacy);

    let with_named = db.function(FunctionShape {
        type_params: Vec::new(),
        required_count: 0,
        positional: Vec::new(),
        named: vec![world.named("a", int, false)],
        return_type: TypeId::VOID,
        nullability: Legacy,
    });
    let with_optional = db.function(FunctionShape {
        type_params: Vec::new(),
        required_count: 0,
        positional: vec![int],
        named: Vec::new(),
        return_type: TypeId::VOID,
        nullability: Legacy,
    });

    // The synthesized type would need both optional positional and
    // named parameters; the oblivious lattice bottoms out instead.
    assert_eq!(
        engine.standard_lower_bound(with_named, with_optional, false),
        TypeId::BOTTOM
    );
}

#[test]
fn test_function_bounds_structural_in_oblivious_mode() {
    engine!(world, oracle, hierarchy, engine);
    let int = world.ty_n(world.int, Legacy);
    let num = world.ty_n(world.num, Legacy);

    let f = world_fn(&world, vec![int], TypeId::VOID);
    let g = world_fn(&world, vec![num], TypeId::VOID);
    assert_eq!(engine.standard_upper_bound(f, g, false), f);
    assert_eq!(engine.standard_lower_bound(f, g, false), g);
}

fn world_fn(world: &TestWorld, positional: Vec<TypeId>, return_type: TypeId) -> TypeId {
    let required_count = positional.len();
    world.db.function(FunctionShape {
        type_params: Vec::new(),
        required_count,
        positional,
        named: Vec::new(),
        return_type,
        nullability: Legacy,
    })
}
