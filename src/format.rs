//! Plain-text rendering of types.
//!
//! Used for internal-error messages and test diagnostics; this is not a
//! user-facing pretty printer.

use std::fmt::Write;

use crate::db::TypeDatabase;
use crate::types::{Nullability, TypeId, TypeKey};

fn suffix(nullability: Nullability) -> &'static str {
    match nullability {
        Nullability::NonNullable => "",
        Nullability::Nullable => "?",
        Nullability::Legacy => "*",
        Nullability::Undetermined => "%",
    }
}

/// Render `ty` as source-like text, e.g. `List<int?>*` or
/// `int Function(num, {required String name})`.
pub fn format_type(db: &dyn TypeDatabase, ty: TypeId) -> String {
    let mut out = String::new();
    write_type(db, ty, &mut out);
    out
}

fn write_type(db: &dyn TypeDatabase, ty: TypeId, out: &mut String) {
    match db.type_key(ty) {
        TypeKey::Dynamic => out.push_str("dynamic"),
        TypeKey::Void => out.push_str("void"),
        TypeKey::Invalid => out.push_str("<invalid>"),
        TypeKey::Bottom => out.push_str("<bottom>"),
        TypeKey::Unknown => out.push('?'),
        TypeKey::Never(n) => {
            out.push_str("Never");
            out.push_str(suffix(n));
        }
        TypeKey::Interface {
            class,
            nullability,
            args,
        } => {
            out.push_str(&db.resolve_atom(db.class_info(class).name));
            let args = db.type_list(args);
            if !args.is_empty() {
                out.push('<');
                for (i, &arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_type(db, arg, out);
                }
                out.push('>');
            }
            out.push_str(suffix(nullability));
        }
        TypeKey::Function(shape_id) => {
            let shape = db.function_shape(shape_id);
            write_type(db, shape.return_type, out);
            out.push_str(" Function");
            if !shape.type_params.is_empty() {
                out.push('<');
                for (i, &param) in shape.type_params.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    let decl = db.type_param_decl(param);
                    out.push_str(&db.resolve_atom(decl.name));
                    out.push_str(" extends ");
                    write_type(db, decl.bound, out);
                }
                out.push('>');
            }
            out.push('(');
            let mut first = true;
            for (i, &param) in shape.positional.iter().enumerate() {
                if !first {
                    out.push_str(", ");
                }
                first = false;
                if i == shape.required_count {
                    out.push('[');
                }
                write_type(db, param, out);
            }
            if shape.has_optional_positional() {
                out.push(']');
            }
            if !shape.named.is_empty() {
                if !first {
                    out.push_str(", ");
                }
                out.push('{');
                for (i, named) in shape.named.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    if named.required {
                        out.push_str("required ");
                    }
                    write_type(db, named.ty, out);
                    let _ = write!(out, " {}", db.resolve_atom(named.name));
                }
                out.push('}');
            }
            out.push(')');
            out.push_str(suffix(shape.nullability));
        }
        TypeKey::TypeParam {
            param,
            nullability,
            promoted_bound,
        } => {
            let decl = db.type_param_decl(param);
            out.push_str(&db.resolve_atom(decl.name));
            out.push_str(suffix(nullability));
            if let Some(bound) = promoted_bound {
                out.push_str(" & ");
                write_type(db, bound, out);
            }
        }
    }
}
