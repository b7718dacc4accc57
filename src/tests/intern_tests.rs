use crate::db::TypeDatabase;
use crate::intern::TypeInterner;
use crate::nullability::with_declared_nullability;
use crate::tests::harness::TestWorld;
use crate::types::{FunctionShape, Nullability, TypeId, TypeKey};

#[test]
fn test_interner_sentinels() {
    let interner = TypeInterner::new();

    assert_eq!(interner.lookup(TypeId::NONE), None);
    assert_eq!(interner.lookup(TypeId::DYNAMIC), Some(TypeKey::Dynamic));
    assert_eq!(interner.lookup(TypeId::VOID), Some(TypeKey::Void));
    assert_eq!(
        interner.lookup(TypeId::NEVER),
        Some(TypeKey::Never(Nullability::NonNullable))
    );

    // Re-interning a sentinel shape returns the sentinel id.
    assert_eq!(interner.intern(TypeKey::Dynamic), TypeId::DYNAMIC);
    assert_eq!(
        interner.intern(TypeKey::Never(Nullability::NonNullable)),
        TypeId::NEVER
    );
}

#[test]
fn test_interner_deduplication() {
    let world = TestWorld::new();
    let db = &world.db;

    let a = db.interface(world.int, Nullability::NonNullable, Vec::new());
    let b = db.interface(world.int, Nullability::NonNullable, Vec::new());
    let c = db.interface(world.int, Nullability::Nullable, Vec::new());

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(a.0 >= TypeId::FIRST_USER);
}

#[test]
fn test_interner_generic_deduplication() {
    let world = TestWorld::new();
    let db = &world.db;

    let int = world.ty(world.int);
    let a = world.generic(world.list, Nullability::NonNullable, int);
    let b = world.generic(world.list, Nullability::NonNullable, int);
    assert_eq!(a, b);

    let num = world.ty(world.num);
    let c = world.generic(world.list, Nullability::NonNullable, num);
    assert_ne!(a, c);

    match db.type_key(a) {
        TypeKey::Interface { class, args, .. } => {
            assert_eq!(class, world.list);
            assert_eq!(db.type_list(args).as_ref(), &[int]);
        }
        other => panic!("expected interface type, got {:?}", other),
    }
}

#[test]
fn test_interner_atoms() {
    let interner = TypeInterner::new();
    let a = interner.intern_string("name");
    let b = interner.intern_string("name");
    let c = interner.intern_string("other");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.resolve_atom(a).as_ref(), "name");
}

#[test]
fn test_function_interning_dedups() {
    let world = TestWorld::new();
    let int = world.ty(world.int);
    let a = world.fn_type(vec![int], TypeId::VOID);
    let b = world.fn_type(vec![int], TypeId::VOID);
    assert_eq!(a, b);
}

#[test]
fn test_with_declared_nullability_is_identity_on_match() {
    let world = TestWorld::new();
    let db = &world.db;

    let int = world.ty(world.int);
    assert_eq!(
        with_declared_nullability(db, int, Nullability::NonNullable),
        int
    );

    let int_q = with_declared_nullability(db, int, Nullability::Nullable);
    assert_ne!(int, int_q);
    assert_eq!(
        with_declared_nullability(db, int_q, Nullability::NonNullable),
        int
    );

    // Forms without a suffix position are returned unchanged.
    assert_eq!(
        with_declared_nullability(db, TypeId::DYNAMIC, Nullability::NonNullable),
        TypeId::DYNAMIC
    );
}

#[test]
#[should_panic(expected = "sorted")]
fn test_function_rejects_unsorted_named() {
    let world = TestWorld::new();
    let int = world.ty(world.int);
    world.db.function(FunctionShape {
        type_params: Vec::new(),
        required_count: 0,
        positional: Vec::new(),
        named: vec![world.named("b", int, false), world.named("a", int, false)],
        return_type: TypeId::VOID,
        nullability: Nullability::NonNullable,
    });
}

#[test]
#[should_panic(expected = "required count")]
fn test_function_rejects_bad_required_count() {
    let world = TestWorld::new();
    let int = world.ty(world.int);
    world.db.function(FunctionShape {
        type_params: Vec::new(),
        required_count: 2,
        positional: vec![int],
        named: Vec::new(),
        return_type: TypeId::VOID,
        nullability: Nullability::NonNullable,
    });
}
