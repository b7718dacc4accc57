//! Class descriptors and the well-known core classes.
//!
//! The engine does not walk class hierarchies itself (that is the
//! legacy-LUB oracle's job), but it needs per-class type-parameter
//! declarations for variance-aware pointwise bounds, and it needs the
//! identities of a handful of core classes: `Object`, `Function`,
//! `Future`, `FutureOr`, and `Null`.

use crate::db::TypeDatabase;
use crate::types::{Atom, Nullability, ParamId, TypeId};

/// Identity of a class declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassId(pub u32);

/// A class declaration as the bounds engine sees it: a name and the
/// type-parameter binders (each carrying bound and variance).
#[derive(Clone, Debug)]
pub struct ClassInfo {
    pub name: Atom,
    pub type_params: Vec<ParamId>,
}

/// The well-known classes the bound rules special-case, plus the raw
/// instantiations the fallback rules produce.
#[derive(Clone, Debug)]
pub struct CoreTypes {
    pub object: ClassId,
    pub function: ClassId,
    pub future: ClassId,
    pub future_or: ClassId,
    pub null: ClassId,
}

impl CoreTypes {
    /// Register the core classes in `db`. `Future` and `FutureOr` each
    /// take one covariant parameter bounded by `Object?`.
    pub fn install(db: &dyn TypeDatabase) -> CoreTypes {
        use crate::types::{TypeParamDecl, Variance};

        let object = db.register_class(ClassInfo {
            name: db.intern_string("Object"),
            type_params: Vec::new(),
        });
        let function = db.register_class(ClassInfo {
            name: db.intern_string("Function"),
            type_params: Vec::new(),
        });
        let null = db.register_class(ClassInfo {
            name: db.intern_string("Null"),
            type_params: Vec::new(),
        });

        let object_nullable = db.interface(object, Nullability::Nullable, Vec::new());
        let future_param = db.fresh_type_param(TypeParamDecl {
            name: db.intern_string("T"),
            bound: object_nullable,
            variance: Variance::COVARIANT,
        });
        let future = db.register_class(ClassInfo {
            name: db.intern_string("Future"),
            type_params: vec![future_param],
        });
        let future_or_param = db.fresh_type_param(TypeParamDecl {
            name: db.intern_string("T"),
            bound: object_nullable,
            variance: Variance::COVARIANT,
        });
        let future_or = db.register_class(ClassInfo {
            name: db.intern_string("FutureOr"),
            type_params: vec![future_or_param],
        });

        CoreTypes {
            object,
            function,
            future,
            future_or,
            null,
        }
    }

    /// `Object` at the given nullability.
    pub fn object_raw(&self, db: &dyn TypeDatabase, nullability: Nullability) -> TypeId {
        db.interface(self.object, nullability, Vec::new())
    }

    /// The canonical non-nullable `Object`.
    pub fn object_non_nullable(&self, db: &dyn TypeDatabase) -> TypeId {
        self.object_raw(db, Nullability::NonNullable)
    }

    /// The raw `Function` type at the given nullability, the upper-bound
    /// fallback for structurally incompatible function types.
    pub fn function_raw(&self, db: &dyn TypeDatabase, nullability: Nullability) -> TypeId {
        db.interface(self.function, nullability, Vec::new())
    }

    /// The interface type `Null` (declared non-nullable; its computed
    /// nullability is nullable).
    pub fn null_type(&self, db: &dyn TypeDatabase) -> TypeId {
        db.interface(self.null, Nullability::NonNullable, Vec::new())
    }

    pub fn future(
        &self,
        db: &dyn TypeDatabase,
        nullability: Nullability,
        argument: TypeId,
    ) -> TypeId {
        db.interface(self.future, nullability, vec![argument])
    }

    pub fn future_or(
        &self,
        db: &dyn TypeDatabase,
        nullability: Nullability,
        argument: TypeId,
    ) -> TypeId {
        db.interface(self.future_or, nullability, vec![argument])
    }

    /// The type argument of `Future<T>` or `FutureOr<T>`, if `ty` is one.
    pub fn future_or_argument(&self, db: &dyn TypeDatabase, ty: TypeId) -> Option<TypeId> {
        match db.type_key(ty) {
            crate::types::TypeKey::Interface { class, args, .. } if class == self.future_or => {
                db.type_list(args).first().copied()
            }
            _ => None,
        }
    }
}
