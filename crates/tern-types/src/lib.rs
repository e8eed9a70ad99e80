//! Type information for a single Go file.
//!
//! [`check_file`] resolves names through Go's lexical scopes and computes the static type
//! of identifiers and expressions. Only the file itself is visible: members of imported
//! packages have no known type, and expressions that depend on them stay untyped.

mod check;
mod expr;
mod info;
mod object;
mod ty;

pub use info::{TypeError, TypeInfo};
pub use object::{Object, ObjectId, ObjectKind};
pub use ty::{BasicKind, ChanDir, Field, InterfaceType, Method, NamedType, Signature, Type, Var};

use tern_syntax::{GoParse, SyntaxToken};

/// Answers "what is the type of the object this identifier denotes?".
///
/// Refactorings only depend on this trait, so they can run against the built-in checker or
/// against a type source that knows more packages.
pub trait TypeOracle {
    /// `None` when the identifier is unresolved or its type is unknown.
    fn type_of_ident(&self, ident: &SyntaxToken) -> Option<Type>;
}

impl<T: TypeOracle + ?Sized> TypeOracle for &T {
    fn type_of_ident(&self, ident: &SyntaxToken) -> Option<Type> {
        (**self).type_of_ident(ident)
    }
}

/// Type-checks one parsed file.
pub fn check_file(parse: &GoParse) -> TypeInfo {
    let _span = tracing::debug_span!(target: "tern.types", "check_file").entered();
    let Some(file) = parse.source_file() else {
        return TypeInfo::default();
    };
    let info = check::Checker::new().check_source_file(&file);
    tracing::debug!(
        target: "tern.types",
        objects = info.objects.len(),
        errors = info.errors.len(),
        "checked file"
    );
    info
}
