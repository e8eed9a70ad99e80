use std::collections::HashMap;

use tern_syntax::ast::{self, AstNode};
use tern_syntax::{SyntaxKind, SyntaxToken, TextRange};
use thiserror::Error;

use crate::object::{Object, ObjectId};
use crate::ty::Type;
use crate::TypeOracle;

/// A problem found while resolving names or types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TypeError {
    pub message: String,
    pub range: TextRange,
}

/// Everything the checker learned about one file.
///
/// Identifiers are keyed by the range of their token, expressions by the range and kind of
/// their node.
#[derive(Debug, Clone, Default)]
pub struct TypeInfo {
    pub(crate) objects: Vec<Object>,
    pub(crate) defs: HashMap<TextRange, ObjectId>,
    pub(crate) uses: HashMap<TextRange, ObjectId>,
    pub(crate) types: HashMap<(TextRange, SyntaxKind), Type>,
    pub errors: Vec<TypeError>,
}

impl TypeInfo {
    pub fn object(&self, id: ObjectId) -> &Object {
        &self.objects[id.index()]
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &Object)> + '_ {
        self.objects
            .iter()
            .enumerate()
            .map(|(idx, obj)| (ObjectId::from_index(idx), obj))
    }

    /// Object declared by `ident`, if it is a declaring occurrence.
    pub fn def_of(&self, ident: &SyntaxToken) -> Option<&Object> {
        self.defs
            .get(&ident.text_range())
            .map(|id| self.object(*id))
    }

    /// Object `ident` refers to, if it is a use.
    pub fn use_of(&self, ident: &SyntaxToken) -> Option<&Object> {
        self.uses
            .get(&ident.text_range())
            .map(|id| self.object(*id))
    }

    pub fn object_of(&self, ident: &SyntaxToken) -> Option<&Object> {
        self.def_of(ident).or_else(|| self.use_of(ident))
    }

    /// Type recorded for a value expression.
    pub fn type_of_expr(&self, expr: &ast::Expr) -> Option<&Type> {
        let node = expr.syntax();
        self.types.get(&(node.text_range(), node.kind()))
    }

    pub(crate) fn alloc(&mut self, object: Object) -> ObjectId {
        self.objects.push(object);
        ObjectId::from_index(self.objects.len() - 1)
    }

    pub(crate) fn object_mut(&mut self, id: ObjectId) -> &mut Object {
        &mut self.objects[id.index()]
    }
}

impl TypeOracle for TypeInfo {
    fn type_of_ident(&self, ident: &SyntaxToken) -> Option<Type> {
        self.object_of(ident)?.ty.clone()
    }
}
