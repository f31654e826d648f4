//! Display names for types.
//!
//! Images use Delphi syntax (`array of Integer`, `^TNode<T>`,
//! `reference to function(Integer): string`) so that diagnostics and
//! `is_named` comparisons read like source code.

use std::fmt::Write as _;

use crate::{AliasKind, ArrayKind, Idx, ProceduralKind, TypeData, TypeFactory};

/// Case-insensitive identifier comparison.
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

impl TypeFactory {
    /// Display name of a type.
    ///
    /// A weak alias displays as the type it aliases; a strong alias displays
    /// as its own name.
    pub fn image(&self, idx: Idx) -> String {
        let mut buf = String::new();
        self.write_image(idx, &mut buf);
        buf
    }

    /// The alias's own name, for aliases of either kind.
    pub fn alias_image(&self, idx: Idx) -> Option<String> {
        match self.data(idx) {
            TypeData::Alias { name, .. } => Some(self.lookup(*name).to_owned()),
            _ => None,
        }
    }

    fn write_image(&self, idx: Idx, buf: &mut String) {
        if let Some(name) = idx.name() {
            buf.push_str(name);
            return;
        }
        if !self.is_valid(idx) {
            buf.push_str(Idx::UNKNOWN.display_name());
            return;
        }

        match self.data(idx) {
            TypeData::Alias {
                kind: AliasKind::Weak,
                aliased,
                ..
            } => self.write_image(*aliased, buf),
            TypeData::Alias {
                kind: AliasKind::Strong,
                name,
                ..
            }
            | TypeData::Enumeration { name, .. }
            | TypeData::Subrange { name, .. }
            | TypeData::TypeParameter { name, .. } => buf.push_str(self.lookup(*name)),
            TypeData::Struct(data) => {
                buf.push_str(self.lookup(data.name));
                if !data.type_args.is_empty() {
                    buf.push('<');
                    self.write_list(&data.type_args, ", ", buf);
                    buf.push('>');
                }
            }
            TypeData::Pointer { target, .. } => {
                buf.push('^');
                self.write_image(*target, buf);
            }
            TypeData::Set(element) => {
                buf.push_str("set of ");
                self.write_image(*element, buf);
            }
            TypeData::File(element) => {
                buf.push_str("file of ");
                self.write_image(*element, buf);
            }
            TypeData::ClassReference(class) => {
                buf.push_str("class of ");
                self.write_image(*class, buf);
            }
            TypeData::Array { element, kind } => {
                match kind {
                    ArrayKind::Fixed { length } => {
                        let _ = write!(buf, "array[0..{}] of ", length.saturating_sub(1));
                    }
                    ArrayKind::Dynamic | ArrayKind::Open => buf.push_str("array of "),
                }
                self.write_image(*element, buf);
            }
            TypeData::ArrayConstructor(elements) => {
                buf.push('[');
                self.write_list(elements, ", ", buf);
                buf.push(']');
            }
            TypeData::Procedural { kind, params, ret } => {
                if *kind == ProceduralKind::Reference {
                    buf.push_str("reference to ");
                }
                let is_function = *ret != Idx::VOID;
                buf.push_str(if is_function { "function" } else { "procedure" });
                if !params.is_empty() {
                    buf.push('(');
                    self.write_list(params, "; ", buf);
                    buf.push(')');
                }
                if is_function {
                    buf.push_str(": ");
                    self.write_image(*ret, buf);
                }
                if *kind == ProceduralKind::Method {
                    buf.push_str(" of object");
                }
            }
            // Intrinsics and matchers are named by their fixed index.
            TypeData::Unknown
            | TypeData::Untyped
            | TypeData::Void
            | TypeData::Integer(_)
            | TypeData::Boolean(_)
            | TypeData::Char(_)
            | TypeData::Real(_)
            | TypeData::String(_)
            | TypeData::Variant(_)
            | TypeData::Matcher(_) => buf.push_str(idx.display_name()),
        }
    }

    fn write_list(&self, types: &[Idx], separator: &str, buf: &mut String) {
        for (i, &ty) in types.iter().enumerate() {
            if i > 0 {
                buf.push_str(separator);
            }
            self.write_image(ty, buf);
        }
    }
}
