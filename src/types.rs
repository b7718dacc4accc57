//! Type representation for the bounds engine.
//!
//! Types are represented as lightweight `TypeId` handles that point into
//! an interning table. The actual structure is stored in `TypeKey`.
//!
//! Every type form that can carry a nullability suffix (`?` for nullable,
//! `*` for legacy) stores its *declared* tag in its shape; the *computed*
//! nullability (which reduces `FutureOr` and consults type-parameter
//! bounds) lives in the `nullability` module.

use serde::Serialize;

use crate::def::ClassId;

/// A lightweight handle to an interned type.
/// Equality check is O(1) - just compare the u32 values.
///
/// Because the interner hash-conses structurally, `TypeId` equality is
/// structural identity, which is exactly the identity short-circuit the
/// bound computations start with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Default)]
pub struct TypeId(pub u32);

impl TypeId {
    /// Internal placeholder - no valid type.
    pub const NONE: TypeId = TypeId(0);

    /// Error sentinel - produced by earlier phases for malformed code.
    /// Never a top, bottom, or null type; the engine treats it as inert.
    pub const INVALID: TypeId = TypeId(1);

    /// The `dynamic` type.
    pub const DYNAMIC: TypeId = TypeId(2);

    /// The `void` type.
    pub const VOID: TypeId = TypeId(3);

    /// The structural bottom of the nullability-oblivious lattice.
    pub const BOTTOM: TypeId = TypeId(4);

    /// The inference placeholder "?". Passes through both bound
    /// computations untouched.
    pub const UNKNOWN: TypeId = TypeId(5);

    /// The non-nullable `Never` type. Other nullabilities of `Never`
    /// intern on demand.
    pub const NEVER: TypeId = TypeId(6);

    /// First id handed out for user-constructed types.
    pub const FIRST_USER: u32 = 16;

    pub fn is_sentinel(self) -> bool {
        self.0 < Self::FIRST_USER
    }

    pub fn is_invalid(self) -> bool {
        self == Self::INVALID
    }

    pub fn is_unknown(self) -> bool {
        self == Self::UNKNOWN
    }
}

/// Declared nullability suffix of a type.
///
/// `Undetermined` shows up on uses of type parameters whose bound is
/// nullable: whether the use can hold `null` depends on the instantiation.
/// It never survives into the result of a bound computation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Nullability {
    /// No suffix. The type excludes `null`.
    NonNullable,
    /// The `?` suffix.
    Nullable,
    /// The `*` suffix, produced by pre-migration code.
    Legacy,
    /// Depends on the instantiation of a type parameter.
    Undetermined,
}

/// Interned list of TypeId values (interface type arguments).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeListId(pub u32);

impl TypeListId {
    /// The empty list is always interned at index 0.
    pub const EMPTY: TypeListId = TypeListId(0);
}

/// Interned function shape.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionShapeId(pub u32);

/// Identity of a type-parameter declaration site.
///
/// Two uses of the same `ParamId` refer to the same binder; alpha
/// renaming between two generic function types is performed by
/// substituting one function's `ParamId`s with uses of the other's.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

bitflags::bitflags! {
    /// How a type parameter may vary. Declared on class and function
    /// binders; `COVARIANT` is the default when a declaration does not
    /// specify one. A parameter used in both positions is invariant.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct Variance: u8 {
        const COVARIANT = 1 << 0;
        const CONTRAVARIANT = 1 << 1;
        const INVARIANT = Self::COVARIANT.bits() | Self::CONTRAVARIANT.bits();
    }
}

impl Variance {
    pub fn is_covariant(self) -> bool {
        self == Variance::COVARIANT
    }

    pub fn is_contravariant(self) -> bool {
        self == Variance::CONTRAVARIANT
    }

    pub fn is_invariant(self) -> bool {
        self == Variance::INVARIANT
    }
}

impl Default for Variance {
    fn default() -> Self {
        Variance::COVARIANT
    }
}

/// An interned name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Atom(pub u32);

/// The structural "shape" of a type.
/// This is the key used for interning - structurally identical types
/// will have the same TypeKey and therefore the same TypeId.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKey {
    /// The `dynamic` type.
    Dynamic,

    /// The `void` type.
    Void,

    /// Error recovery type produced by earlier phases.
    Invalid,

    /// Structural bottom of the nullability-oblivious lattice.
    Bottom,

    /// The inference placeholder "?".
    Unknown,

    /// The `Never` type at the given declared nullability.
    Never(Nullability),

    /// A nominal class type: `C`, `C?`, `C*`, `C<T1, .., Tn>`.
    Interface {
        class: ClassId,
        nullability: Nullability,
        args: TypeListId,
    },

    /// A structural function type.
    Function(FunctionShapeId),

    /// A use of a type parameter. `promoted_bound` present means the
    /// intersection form `X & B` produced by flow promotion.
    TypeParam {
        param: ParamId,
        nullability: Nullability,
        promoted_bound: Option<TypeId>,
    },
}

/// Named parameter in a function type. Named parameter lists are kept
/// sorted lexicographically by name and are duplicate-free.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NamedParam {
    pub name: Atom,
    pub ty: TypeId,
    pub required: bool,
}

/// A type-parameter declaration: the binder of a generic class or
/// generic function type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeParamDecl {
    pub name: Atom,
    pub bound: TypeId,
    pub variance: Variance,
}

/// Function shape for function types.
///
/// `required_count <= positional.len()`; entries past `required_count`
/// are optional positional parameters. A function type never has both
/// optional positional and named parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionShape {
    pub type_params: Vec<ParamId>,
    pub required_count: usize,
    pub positional: Vec<TypeId>,
    /// Sorted by name; duplicate-free.
    pub named: Vec<NamedParam>,
    pub return_type: TypeId,
    pub nullability: Nullability,
}

impl FunctionShape {
    pub fn has_optional_positional(&self) -> bool {
        self.required_count < self.positional.len()
    }
}
