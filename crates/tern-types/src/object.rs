use std::collections::HashMap;

use tern_syntax::TextRange;

use crate::ty::{BasicKind, InterfaceType, Method, Signature, Type, Var};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectKind {
    Var,
    Const,
    TypeName,
    Func,
    /// Imported package, with its import path.
    PkgName(String),
    Builtin,
    Nil,
}

/// A named language entity: variable, constant, type, function or package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    pub name: String,
    pub kind: ObjectKind,
    /// `None` when the type could not be determined.
    pub ty: Option<Type>,
    /// Range of the declaring identifier; `None` for predeclared and implicit objects.
    pub decl: Option<TextRange>,
    pub(crate) const_value: Option<i128>,
}

impl Object {
    pub(crate) fn new(name: impl Into<String>, kind: ObjectKind, ty: Option<Type>) -> Self {
        Self {
            name: name.into(),
            kind,
            ty,
            decl: None,
            const_value: None,
        }
    }

    pub(crate) fn declared_at(mut self, range: TextRange) -> Self {
        self.decl = Some(range);
        self
    }

    pub fn is_predeclared(&self) -> bool {
        self.decl.is_none()
            && matches!(
                self.kind,
                ObjectKind::Builtin | ObjectKind::Nil | ObjectKind::TypeName | ObjectKind::Const
            )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ScopeId(usize);

#[derive(Debug, Default)]
pub(crate) struct Scope {
    parent: Option<ScopeId>,
    names: HashMap<String, ObjectId>,
}

/// Lexical scopes, from the universe down to the innermost block.
#[derive(Debug)]
pub(crate) struct Scopes {
    scopes: Vec<Scope>,
}

impl Scopes {
    pub(crate) const UNIVERSE: ScopeId = ScopeId(0);

    pub(crate) fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
        }
    }

    pub(crate) fn child(&mut self, parent: ScopeId) -> ScopeId {
        self.scopes.push(Scope {
            parent: Some(parent),
            names: HashMap::new(),
        });
        ScopeId(self.scopes.len() - 1)
    }

    pub(crate) fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes[scope.0].parent
    }

    pub(crate) fn insert(&mut self, scope: ScopeId, name: &str, id: ObjectId) {
        self.scopes[scope.0].names.insert(name.to_string(), id);
    }

    pub(crate) fn lookup_local(&self, scope: ScopeId, name: &str) -> Option<ObjectId> {
        self.scopes[scope.0].names.get(name).copied()
    }

    pub(crate) fn lookup(&self, mut scope: ScopeId, name: &str) -> Option<ObjectId> {
        loop {
            if let Some(id) = self.lookup_local(scope, name) {
                return Some(id);
            }
            scope = self.parent(scope)?;
        }
    }
}

const BUILTIN_FUNCS: &[&str] = &[
    "append", "cap", "clear", "close", "complex", "copy", "delete", "imag", "len", "make", "max",
    "min", "new", "panic", "print", "println", "real", "recover",
];

const BASIC_TYPES: &[&str] = &[
    "bool", "byte", "complex64", "complex128", "float32", "float64", "int", "int8", "int16",
    "int32", "int64", "rune", "string", "uint", "uint8", "uint16", "uint32", "uint64", "uintptr",
];

/// Predeclared objects, in the order they are allocated.
pub(crate) fn universe_objects() -> Vec<Object> {
    let mut objects = Vec::new();
    for name in BASIC_TYPES {
        let kind = BasicKind::from_type_name(name).unwrap_or(BasicKind::Invalid);
        objects.push(Object::new(
            *name,
            ObjectKind::TypeName,
            Some(Type::Basic(kind)),
        ));
    }
    for name in ["error", "any", "comparable"] {
        objects.push(Object::new(
            name,
            ObjectKind::TypeName,
            Some(Type::named(None, name)),
        ));
    }
    for name in ["true", "false"] {
        objects.push(Object::new(
            name,
            ObjectKind::Const,
            Some(Type::Basic(BasicKind::UntypedBool)),
        ));
    }
    objects.push(Object::new(
        "iota",
        ObjectKind::Const,
        Some(Type::Basic(BasicKind::UntypedInt)),
    ));
    objects.push(Object::new(
        "nil",
        ObjectKind::Nil,
        Some(Type::Basic(BasicKind::UntypedNil)),
    ));
    for name in BUILTIN_FUNCS {
        objects.push(Object::new(*name, ObjectKind::Builtin, None));
    }
    objects
}

/// Underlying types of the predeclared named types.
pub(crate) fn universe_named() -> Vec<(&'static str, Type)> {
    let error = InterfaceType {
        methods: vec![Method {
            name: "Error".to_string(),
            sig: Signature {
                results: vec![Var {
                    name: None,
                    ty: Type::Basic(BasicKind::String),
                }],
                ..Signature::default()
            },
        }],
        embeds: Vec::new(),
    };
    vec![
        ("error", Type::Interface(error)),
        ("any", Type::Interface(InterfaceType::default())),
        ("comparable", Type::Interface(InterfaceType::default())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_parent_scopes_and_inner_names_shadow() {
        let mut scopes = Scopes::new();
        let outer = scopes.child(Scopes::UNIVERSE);
        let inner = scopes.child(outer);
        scopes.insert(Scopes::UNIVERSE, "int", ObjectId::from_index(0));
        scopes.insert(outer, "x", ObjectId::from_index(1));
        scopes.insert(inner, "x", ObjectId::from_index(2));

        assert_eq!(scopes.lookup(inner, "x"), Some(ObjectId::from_index(2)));
        assert_eq!(scopes.lookup(outer, "x"), Some(ObjectId::from_index(1)));
        assert_eq!(scopes.lookup(inner, "int"), Some(ObjectId::from_index(0)));
        assert_eq!(scopes.lookup_local(inner, "int"), None);
        assert_eq!(scopes.lookup(inner, "missing"), None);
    }

    #[test]
    fn universe_declares_builtins_once() {
        let objects = universe_objects();
        let mut names: Vec<&str> = objects.iter().map(|o| o.name.as_str()).collect();
        let before = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), before);
        assert!(objects.iter().all(Object::is_predeclared));
    }
}
