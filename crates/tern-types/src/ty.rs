use std::fmt;

/// Predeclared basic types, including the untyped kinds of constant expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicKind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    /// Alias of `uint8` that keeps its own spelling.
    Byte,
    /// Alias of `int32` that keeps its own spelling.
    Rune,
    UntypedBool,
    UntypedInt,
    UntypedRune,
    UntypedFloat,
    UntypedComplex,
    UntypedString,
    UntypedNil,
    Invalid,
}

impl BasicKind {
    pub fn name(self) -> &'static str {
        match self {
            BasicKind::Bool => "bool",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Uintptr => "uintptr",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
            BasicKind::Complex64 => "complex64",
            BasicKind::Complex128 => "complex128",
            BasicKind::String => "string",
            BasicKind::Byte => "byte",
            BasicKind::Rune => "rune",
            BasicKind::UntypedBool => "untyped bool",
            BasicKind::UntypedInt => "untyped int",
            BasicKind::UntypedRune => "untyped rune",
            BasicKind::UntypedFloat => "untyped float",
            BasicKind::UntypedComplex => "untyped complex",
            BasicKind::UntypedString => "untyped string",
            BasicKind::UntypedNil => "untyped nil",
            BasicKind::Invalid => "invalid type",
        }
    }

    /// Predeclared type names visible in the universe scope.
    pub fn from_type_name(name: &str) -> Option<BasicKind> {
        Some(match name {
            "bool" => BasicKind::Bool,
            "int" => BasicKind::Int,
            "int8" => BasicKind::Int8,
            "int16" => BasicKind::Int16,
            "int32" => BasicKind::Int32,
            "int64" => BasicKind::Int64,
            "uint" => BasicKind::Uint,
            "uint8" => BasicKind::Uint8,
            "uint16" => BasicKind::Uint16,
            "uint32" => BasicKind::Uint32,
            "uint64" => BasicKind::Uint64,
            "uintptr" => BasicKind::Uintptr,
            "float32" => BasicKind::Float32,
            "float64" => BasicKind::Float64,
            "complex64" => BasicKind::Complex64,
            "complex128" => BasicKind::Complex128,
            "string" => BasicKind::String,
            "byte" => BasicKind::Byte,
            "rune" => BasicKind::Rune,
            _ => return None,
        })
    }

    pub fn is_untyped(self) -> bool {
        matches!(
            self,
            BasicKind::UntypedBool
                | BasicKind::UntypedInt
                | BasicKind::UntypedRune
                | BasicKind::UntypedFloat
                | BasicKind::UntypedComplex
                | BasicKind::UntypedString
                | BasicKind::UntypedNil
        )
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            BasicKind::Int
                | BasicKind::Int8
                | BasicKind::Int16
                | BasicKind::Int32
                | BasicKind::Int64
                | BasicKind::Uint
                | BasicKind::Uint8
                | BasicKind::Uint16
                | BasicKind::Uint32
                | BasicKind::Uint64
                | BasicKind::Uintptr
                | BasicKind::Byte
                | BasicKind::Rune
                | BasicKind::UntypedInt
                | BasicKind::UntypedRune
        )
    }

    pub fn is_string(self) -> bool {
        matches!(self, BasicKind::String | BasicKind::UntypedString)
    }

    /// Rank of an untyped numeric kind; a binary expression of two untyped operands takes
    /// the kind with the higher rank.
    fn untyped_rank(self) -> u8 {
        match self {
            BasicKind::UntypedInt => 1,
            BasicKind::UntypedRune => 2,
            BasicKind::UntypedFloat => 3,
            BasicKind::UntypedComplex => 4,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedType {
    /// Local name of the declaring package as written in this file, `None` for types of
    /// the current package and predeclared types such as `error`.
    pub package: Option<String>,
    pub name: String,
    /// Type arguments of an instantiated generic type.
    pub args: Vec<Type>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

/// A named or anonymous entry of a parameter or result list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Var {
    pub name: Option<String>,
    pub ty: Type,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Signature {
    pub params: Vec<Var>,
    pub results: Vec<Var>,
    /// The last parameter is `...T`; its recorded type is `[]T`.
    pub variadic: bool,
    /// Type parameters still to be instantiated: those of a generic function, or of the
    /// receiver type for a method.
    pub type_params: Vec<String>,
}

impl Signature {
    pub fn subst(&self, params: &[String], args: &[Type]) -> Signature {
        let vars = |vars: &[Var]| {
            vars.iter()
                .map(|var| Var {
                    name: var.name.clone(),
                    ty: var.ty.subst(params, args),
                })
                .collect()
        };
        Signature {
            params: vars(&self.params),
            results: vars(&self.results),
            variadic: self.variadic,
            type_params: self.type_params.clone(),
        }
    }

    /// Replaces every type parameter with its argument. Left generic when the argument
    /// count does not match.
    pub fn instantiate(&self, args: &[Type]) -> Signature {
        if args.len() != self.type_params.len() {
            return self.clone();
        }
        Signature {
            type_params: Vec::new(),
            ..self.subst(&self.type_params, args)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    /// `None` for embedded fields.
    pub name: Option<String>,
    pub ty: Type,
    pub tag: Option<String>,
}

impl Field {
    /// Name the field is selected by; embedded fields use their type name.
    pub fn selector_name(&self) -> Option<&str> {
        if let Some(name) = &self.name {
            return Some(name);
        }
        match &self.ty {
            Type::Named(named) => Some(&named.name),
            Type::Pointer(elem) => match elem.as_ref() {
                Type::Named(named) => Some(&named.name),
                _ => None,
            },
            Type::Basic(kind) => Some(kind.name()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Method {
    pub name: String,
    pub sig: Signature,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct InterfaceType {
    pub methods: Vec<Method>,
    pub embeds: Vec<Type>,
}

/// Static type of a Go expression or object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Basic(BasicKind),
    Named(NamedType),
    Pointer(Box<Type>),
    Slice(Box<Type>),
    Array(u64, Box<Type>),
    Map(Box<Type>, Box<Type>),
    Chan(ChanDir, Box<Type>),
    Func(Signature),
    Struct(Vec<Field>),
    Interface(InterfaceType),
    /// Multiple values of a call; the empty tuple is a call without results.
    Tuple(Vec<Type>),
    /// A type parameter of the enclosing generic declaration.
    TypeParam(String),
}

impl Type {
    pub const INVALID: Type = Type::Basic(BasicKind::Invalid);

    pub fn named(package: Option<&str>, name: &str) -> Type {
        Type::Named(NamedType {
            package: package.map(str::to_string),
            name: name.to_string(),
            args: Vec::new(),
        })
    }

    pub fn pointer(elem: Type) -> Type {
        Type::Pointer(Box::new(elem))
    }

    pub fn slice(elem: Type) -> Type {
        Type::Slice(Box::new(elem))
    }

    pub fn basic_kind(&self) -> Option<BasicKind> {
        match self {
            Type::Basic(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn is_untyped(&self) -> bool {
        self.basic_kind().is_some_and(BasicKind::is_untyped)
    }

    pub fn is_untyped_nil(&self) -> bool {
        self.basic_kind() == Some(BasicKind::UntypedNil)
    }

    pub fn is_invalid(&self) -> bool {
        self.basic_kind() == Some(BasicKind::Invalid)
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, Type::Tuple(_))
    }

    /// A generic function that has not been instantiated.
    pub fn is_generic_func(&self) -> bool {
        matches!(self, Type::Func(sig) if !sig.type_params.is_empty())
    }

    /// `true` if an invalid type appears anywhere inside this type.
    pub fn contains_invalid(&self) -> bool {
        self.any(&|ty| ty.is_invalid())
    }

    /// `true` if one of the type parameters `names` appears inside this type.
    pub fn mentions_type_params(&self, names: &[String]) -> bool {
        self.any(&|ty| matches!(ty, Type::TypeParam(name) if names.contains(name)))
    }

    /// `pred` holds for this type or any type nested inside it.
    fn any(&self, pred: &dyn Fn(&Type) -> bool) -> bool {
        if pred(self) {
            return true;
        }
        let sig_any = |sig: &Signature| {
            sig.params
                .iter()
                .chain(&sig.results)
                .any(|var| var.ty.any(pred))
        };
        match self {
            Type::Basic(_) | Type::TypeParam(_) => false,
            Type::Named(named) => named.args.iter().any(|arg| arg.any(pred)),
            Type::Pointer(elem) | Type::Slice(elem) | Type::Array(_, elem) | Type::Chan(_, elem) => {
                elem.any(pred)
            }
            Type::Map(key, value) => key.any(pred) || value.any(pred),
            Type::Func(sig) => sig_any(sig),
            Type::Struct(fields) => fields.iter().any(|field| field.ty.any(pred)),
            Type::Interface(iface) => {
                iface.methods.iter().any(|method| sig_any(&method.sig))
                    || iface.embeds.iter().any(|embed| embed.any(pred))
            }
            Type::Tuple(elems) => elems.iter().any(|elem| elem.any(pred)),
        }
    }

    /// Replaces the type parameters `params` with the matching `args`.
    pub fn subst(&self, params: &[String], args: &[Type]) -> Type {
        let boxed = |ty: &Type| Box::new(ty.subst(params, args));
        match self {
            Type::TypeParam(name) => params
                .iter()
                .position(|param| param == name)
                .and_then(|idx| args.get(idx))
                .cloned()
                .unwrap_or_else(|| self.clone()),
            Type::Basic(_) => self.clone(),
            Type::Named(named) => Type::Named(NamedType {
                package: named.package.clone(),
                name: named.name.clone(),
                args: named.args.iter().map(|arg| arg.subst(params, args)).collect(),
            }),
            Type::Pointer(elem) => Type::Pointer(boxed(elem)),
            Type::Slice(elem) => Type::Slice(boxed(elem)),
            Type::Array(len, elem) => Type::Array(*len, boxed(elem)),
            Type::Map(key, value) => Type::Map(boxed(key), boxed(value)),
            Type::Chan(dir, elem) => Type::Chan(*dir, boxed(elem)),
            Type::Func(sig) => Type::Func(sig.subst(params, args)),
            Type::Struct(fields) => Type::Struct(
                fields
                    .iter()
                    .map(|field| Field {
                        ty: field.ty.subst(params, args),
                        ..field.clone()
                    })
                    .collect(),
            ),
            Type::Interface(iface) => Type::Interface(InterfaceType {
                methods: iface
                    .methods
                    .iter()
                    .map(|method| Method {
                        name: method.name.clone(),
                        sig: method.sig.subst(params, args),
                    })
                    .collect(),
                embeds: iface.embeds.iter().map(|embed| embed.subst(params, args)).collect(),
            }),
            Type::Tuple(elems) => Type::Tuple(elems.iter().map(|elem| elem.subst(params, args)).collect()),
        }
    }

    /// Type a value of this type gets when it initializes a variable without an explicit
    /// type. Untyped `nil` has no default type and stays as is.
    pub fn default_type(&self) -> Type {
        match self {
            Type::Basic(kind) => Type::Basic(match kind {
                BasicKind::UntypedBool => BasicKind::Bool,
                BasicKind::UntypedInt => BasicKind::Int,
                BasicKind::UntypedRune => BasicKind::Rune,
                BasicKind::UntypedFloat => BasicKind::Float64,
                BasicKind::UntypedComplex => BasicKind::Complex128,
                BasicKind::UntypedString => BasicKind::String,
                other => *other,
            }),
            other => other.clone(),
        }
    }

    /// Result kind of an arithmetic expression on two untyped operands.
    pub fn larger_untyped(a: BasicKind, b: BasicKind) -> BasicKind {
        if a.untyped_rank() >= b.untyped_rank() {
            a
        } else {
            b
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Basic(kind) => f.write_str(kind.name()),
            Type::Named(named) => {
                if let Some(pkg) = &named.package {
                    write!(f, "{pkg}.")?;
                }
                f.write_str(&named.name)?;
                write_list(f, "[", &named.args, "]")
            }
            Type::TypeParam(name) => f.write_str(name),
            Type::Pointer(elem) => write!(f, "*{elem}"),
            Type::Slice(elem) => write!(f, "[]{elem}"),
            Type::Array(len, elem) => write!(f, "[{len}]{elem}"),
            Type::Map(key, value) => write!(f, "map[{key}]{value}"),
            Type::Chan(dir, elem) => {
                let prefix = match dir {
                    ChanDir::Both => "chan ",
                    ChanDir::Send => "chan<- ",
                    ChanDir::Recv => "<-chan ",
                };
                // `chan (<-chan T)` needs parentheses to keep its meaning.
                if *dir == ChanDir::Both && matches!(elem.as_ref(), Type::Chan(ChanDir::Recv, _)) {
                    write!(f, "{prefix}({elem})")
                } else {
                    write!(f, "{prefix}{elem}")
                }
            }
            Type::Func(sig) => write!(f, "func{sig}"),
            Type::Struct(fields) => {
                f.write_str("struct{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    if let Some(name) = &field.name {
                        write!(f, "{name} ")?;
                    }
                    write!(f, "{}", field.ty)?;
                    if let Some(tag) = &field.tag {
                        write!(f, " {tag:?}")?;
                    }
                }
                f.write_str("}")
            }
            Type::Interface(iface) => {
                f.write_str("interface{")?;
                let mut first = true;
                for method in &iface.methods {
                    if !first {
                        f.write_str("; ")?;
                    }
                    first = false;
                    write!(f, "{}{}", method.name, method.sig)?;
                }
                for embed in &iface.embeds {
                    if !first {
                        f.write_str("; ")?;
                    }
                    first = false;
                    write!(f, "{embed}")?;
                }
                f.write_str("}")
            }
            Type::Tuple(types) if types.is_empty() => f.write_str("()"),
            Type::Tuple(types) => write_list(f, "(", types, ")"),
        }
    }
}

/// `open a, b close`; nothing at all for an empty list.
fn write_list(f: &mut fmt::Formatter<'_>, open: &str, types: &[Type], close: &str) -> fmt::Result {
    if types.is_empty() {
        return Ok(());
    }
    f.write_str(open)?;
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{ty}")?;
    }
    f.write_str(close)
}

/// Prints `(params) results` without the `func` keyword.
impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if let Some(name) = &param.name {
                write!(f, "{name} ")?;
            }
            let last = i + 1 == self.params.len();
            match (&param.ty, self.variadic && last) {
                (Type::Slice(elem), true) => write!(f, "...{elem}")?,
                (ty, _) => write!(f, "{ty}")?,
            }
        }
        f.write_str(")")?;

        match self.results.as_slice() {
            [] => Ok(()),
            [Var { name: None, ty }] => write!(f, " {ty}"),
            results => {
                f.write_str(" (")?;
                for (i, result) in results.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    if let Some(name) = &result.name {
                        write!(f, "{name} ")?;
                    }
                    write!(f, "{}", result.ty)?;
                }
                f.write_str(")")
            }
        }
    }
}
