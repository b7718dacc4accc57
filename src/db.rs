//! The `TypeDatabase` trait: everything the bound rules need from type
//! storage, behind a trait object so the engine stays decoupled from the
//! concrete interner (and so tests can wrap it).

use std::sync::Arc;

use crate::def::{ClassId, ClassInfo};
use crate::types::{
    Atom, FunctionShape, FunctionShapeId, Nullability, ParamId, TypeId, TypeKey, TypeListId,
    TypeParamDecl,
};

pub trait TypeDatabase {
    /// Intern a shape, returning its canonical handle.
    fn intern(&self, key: TypeKey) -> TypeId;

    /// Look up the shape of an interned type. `None` only for
    /// `TypeId::NONE` and ids from a different database.
    fn lookup(&self, id: TypeId) -> Option<TypeKey>;

    /// Like `lookup`, but total: unknown ids read as `Invalid`, which is
    /// inert in every rule.
    fn type_key(&self, id: TypeId) -> TypeKey {
        self.lookup(id).unwrap_or(TypeKey::Invalid)
    }

    fn intern_string(&self, s: &str) -> Atom;
    fn resolve_atom(&self, atom: Atom) -> Arc<str>;

    fn intern_type_list(&self, items: Vec<TypeId>) -> TypeListId;
    fn type_list(&self, id: TypeListId) -> Arc<[TypeId]>;

    fn function_shape(&self, id: FunctionShapeId) -> Arc<FunctionShape>;

    fn register_class(&self, info: ClassInfo) -> ClassId;
    fn class_info(&self, id: ClassId) -> Arc<ClassInfo>;

    /// Register a fresh type-parameter declaration site.
    fn fresh_type_param(&self, decl: TypeParamDecl) -> ParamId;
    fn type_param_decl(&self, id: ParamId) -> Arc<TypeParamDecl>;
    /// Patch a declaration's bound. Needed for F-bounded parameters,
    /// whose bound can only be built after the binder exists.
    fn set_type_param_bound(&self, id: ParamId, bound: TypeId);

    // Typed constructors. These are the only way the engine builds types,
    // so structural invariants (sorted named lists, required counts) are
    // checked here.

    fn interface(&self, class: ClassId, nullability: Nullability, args: Vec<TypeId>) -> TypeId {
        let args = self.intern_type_list(args);
        self.intern(TypeKey::Interface {
            class,
            nullability,
            args,
        })
    }

    fn function(&self, shape: FunctionShape) -> TypeId;

    fn type_param(
        &self,
        param: ParamId,
        nullability: Nullability,
        promoted_bound: Option<TypeId>,
    ) -> TypeId {
        self.intern(TypeKey::TypeParam {
            param,
            nullability,
            promoted_bound,
        })
    }

    fn never(&self, nullability: Nullability) -> TypeId {
        self.intern(TypeKey::Never(nullability))
    }
}
