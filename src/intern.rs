//! Type interning for structural deduplication.
//!
//! Converts `TypeKey` structures into lightweight `TypeId` handles.
//!
//! Benefits:
//! - O(1) type equality (just compare TypeId values)
//! - Memory efficient (each unique structure stored once)
//! - The identity rule of both bound computations is a u32 compare
//!
//! The tables use interior mutability so the engine can borrow the
//! interner immutably; concurrent interning is safe.

use std::sync::{Arc, RwLock};

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::db::TypeDatabase;
use crate::def::{ClassId, ClassInfo};
use crate::types::{
    Atom, FunctionShape, FunctionShapeId, Nullability, ParamId, TypeId, TypeKey, TypeListId,
    TypeParamDecl,
};

const TYPE_LIST_INLINE: usize = 4;

type TypeListBuffer = SmallVec<[TypeId; TYPE_LIST_INLINE]>;

struct KeyTable {
    key_to_id: FxHashMap<TypeKey, u32>,
    id_to_key: Vec<TypeKey>,
}

struct AtomTable {
    map: FxHashMap<Arc<str>, u32>,
    atoms: Vec<Arc<str>>,
}

/// Interner for lists of type arguments. The empty list is index 0 so
/// raw interface types never allocate.
struct ListTable {
    map: FxHashMap<Arc<[TypeId]>, u32>,
    lists: Vec<Arc<[TypeId]>>,
}

impl ListTable {
    fn new() -> Self {
        let empty: Arc<[TypeId]> = Arc::from(Vec::new());
        let mut map = FxHashMap::default();
        map.insert(empty.clone(), 0);
        ListTable {
            map,
            lists: vec![empty],
        }
    }
}

struct ShapeTable {
    map: FxHashMap<Arc<FunctionShape>, u32>,
    shapes: Vec<Arc<FunctionShape>>,
}

/// Interned type storage.
pub struct TypeInterner {
    types: RwLock<KeyTable>,
    atoms: RwLock<AtomTable>,
    lists: RwLock<ListTable>,
    functions: RwLock<ShapeTable>,
    classes: RwLock<Vec<Arc<ClassInfo>>>,
    params: RwLock<Vec<Arc<TypeParamDecl>>>,
}

impl TypeInterner {
    pub fn new() -> Self {
        let interner = TypeInterner {
            types: RwLock::new(KeyTable {
                key_to_id: FxHashMap::default(),
                id_to_key: Vec::new(),
            }),
            atoms: RwLock::new(AtomTable {
                map: FxHashMap::default(),
                atoms: Vec::new(),
            }),
            lists: RwLock::new(ListTable::new()),
            functions: RwLock::new(ShapeTable {
                map: FxHashMap::default(),
                shapes: Vec::new(),
            }),
            classes: RwLock::new(Vec::new()),
            params: RwLock::new(Vec::new()),
        };

        // Slot 0 is the NONE placeholder; lookups on it return None.
        {
            let mut table = interner.types.write().unwrap();
            table.id_to_key.push(TypeKey::Unknown);
        }

        // Pre-register the sentinels in TypeId order.
        let invalid = interner.intern(TypeKey::Invalid);
        let dynamic = interner.intern(TypeKey::Dynamic);
        let void = interner.intern(TypeKey::Void);
        let bottom = interner.intern(TypeKey::Bottom);
        let unknown = interner.intern(TypeKey::Unknown);
        let never = interner.intern(TypeKey::Never(Nullability::NonNullable));
        debug_assert_eq!(invalid, TypeId::INVALID);
        debug_assert_eq!(dynamic, TypeId::DYNAMIC);
        debug_assert_eq!(void, TypeId::VOID);
        debug_assert_eq!(bottom, TypeId::BOTTOM);
        debug_assert_eq!(unknown, TypeId::UNKNOWN);
        debug_assert_eq!(never, TypeId::NEVER);

        // Burn the remaining reserved slots so user types start at
        // FIRST_USER even if sentinels are added later.
        {
            let mut table = interner.types.write().unwrap();
            while table.id_to_key.len() < TypeId::FIRST_USER as usize {
                table.id_to_key.push(TypeKey::Invalid);
            }
        }

        interner
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        TypeInterner::new()
    }
}

impl TypeDatabase for TypeInterner {
    fn intern(&self, key: TypeKey) -> TypeId {
        if let Some(&id) = self.types.read().unwrap().key_to_id.get(&key) {
            return TypeId(id);
        }
        let mut table = self.types.write().unwrap();
        // Racing writers may have interned it between the locks.
        if let Some(&id) = table.key_to_id.get(&key) {
            return TypeId(id);
        }
        let id = table.id_to_key.len() as u32;
        table.id_to_key.push(key.clone());
        table.key_to_id.insert(key, id);
        TypeId(id)
    }

    fn lookup(&self, id: TypeId) -> Option<TypeKey> {
        if id == TypeId::NONE {
            return None;
        }
        self.types.read().unwrap().id_to_key.get(id.0 as usize).cloned()
    }

    fn intern_string(&self, s: &str) -> Atom {
        if let Some(&id) = self.atoms.read().unwrap().map.get(s) {
            return Atom(id);
        }
        let mut table = self.atoms.write().unwrap();
        if let Some(&id) = table.map.get(s) {
            return Atom(id);
        }
        let arc: Arc<str> = Arc::from(s);
        let id = table.atoms.len() as u32;
        table.atoms.push(arc.clone());
        table.map.insert(arc, id);
        Atom(id)
    }

    fn resolve_atom(&self, atom: Atom) -> Arc<str> {
        self.atoms.read().unwrap().atoms[atom.0 as usize].clone()
    }

    fn intern_type_list(&self, items: Vec<TypeId>) -> TypeListId {
        if items.is_empty() {
            return TypeListId::EMPTY;
        }
        let buffer: TypeListBuffer = SmallVec::from_vec(items);
        if let Some(&id) = self.lists.read().unwrap().map.get(buffer.as_slice()) {
            return TypeListId(id);
        }
        let mut table = self.lists.write().unwrap();
        if let Some(&id) = table.map.get(buffer.as_slice()) {
            return TypeListId(id);
        }
        let arc: Arc<[TypeId]> = Arc::from(buffer.into_vec());
        let id = table.lists.len() as u32;
        table.lists.push(arc.clone());
        table.map.insert(arc, id);
        TypeListId(id)
    }

    fn type_list(&self, id: TypeListId) -> Arc<[TypeId]> {
        self.lists.read().unwrap().lists[id.0 as usize].clone()
    }

    fn function_shape(&self, id: FunctionShapeId) -> Arc<FunctionShape> {
        self.functions.read().unwrap().shapes[id.0 as usize].clone()
    }

    fn register_class(&self, info: ClassInfo) -> ClassId {
        let mut classes = self.classes.write().unwrap();
        let id = classes.len() as u32;
        classes.push(Arc::new(info));
        ClassId(id)
    }

    fn class_info(&self, id: ClassId) -> Arc<ClassInfo> {
        self.classes.read().unwrap()[id.0 as usize].clone()
    }

    fn fresh_type_param(&self, decl: TypeParamDecl) -> ParamId {
        let mut params = self.params.write().unwrap();
        let id = params.len() as u32;
        params.push(Arc::new(decl));
        ParamId(id)
    }

    fn type_param_decl(&self, id: ParamId) -> Arc<TypeParamDecl> {
        self.params.read().unwrap()[id.0 as usize].clone()
    }

    fn set_type_param_bound(&self, id: ParamId, bound: TypeId) {
        let mut params = self.params.write().unwrap();
        let decl = &params[id.0 as usize];
        params[id.0 as usize] = Arc::new(TypeParamDecl {
            name: decl.name,
            bound,
            variance: decl.variance,
        });
    }

    fn function(&self, shape: FunctionShape) -> TypeId {
        debug_assert!(
            shape.required_count <= shape.positional.len(),
            "required count {} exceeds positional arity {}",
            shape.required_count,
            shape.positional.len()
        );
        debug_assert!(
            shape
                .named
                .windows(2)
                .all(|w| self.resolve_atom(w[0].name) < self.resolve_atom(w[1].name)),
            "named parameters must be sorted and duplicate-free"
        );
        debug_assert!(
            shape.named.is_empty() || !shape.has_optional_positional(),
            "a function type cannot mix named and optional positional parameters"
        );

        if let Some(&id) = self.functions.read().unwrap().map.get(&shape) {
            return self.intern(TypeKey::Function(FunctionShapeId(id)));
        }
        let shape_id = {
            let mut table = self.functions.write().unwrap();
            if let Some(&id) = table.map.get(&shape) {
                id
            } else {
                let arc = Arc::new(shape);
                let id = table.shapes.len() as u32;
                table.shapes.push(arc.clone());
                table.map.insert(arc, id);
                id
            }
        };
        self.intern(TypeKey::Function(FunctionShapeId(shape_id)))
    }
}
