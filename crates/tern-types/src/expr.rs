use tern_syntax::ast::{self, AstNode};
use tern_syntax::SyntaxKind;

use crate::check::Checker;
use crate::object::ObjectKind;
use crate::ty::{BasicKind, ChanDir, Field, InterfaceType, Method, NamedType, Signature, Type, Var};

/// Embedded fields are searched at most this deep.
const MAX_EMBEDDING_DEPTH: usize = 8;

impl Checker {
    // --- Type expressions ---

    pub(crate) fn resolve_type(&mut self, ty: &ast::TypeRef) -> Type {
        match ty {
            ast::TypeRef::TypeName(name) => self.type_name(name),
            ast::TypeRef::PointerType(ptr) => Type::pointer(self.elem_type(ptr.elem())),
            ast::TypeRef::SliceType(slice) => Type::slice(self.elem_type(slice.elem())),
            ast::TypeRef::ArrayType(array) => {
                let elem = self.elem_type(array.elem());
                let Some(len_expr) = array.len() else {
                    // `[...]T` is only valid in front of a composite literal.
                    return Type::INVALID;
                };
                self.expr(&len_expr);
                match self.const_int(&len_expr) {
                    Some(len) if len >= 0 => Type::Array(len as u64, Box::new(elem)),
                    _ => Type::INVALID,
                }
            }
            ast::TypeRef::MapType(map) => {
                let key = self.elem_type(map.key());
                let value = self.elem_type(map.value());
                Type::Map(Box::new(key), Box::new(value))
            }
            ast::TypeRef::ChanType(chan) => {
                let dir = if chan.is_recv_only() {
                    ChanDir::Recv
                } else if chan.is_send_only() {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                Type::Chan(dir, Box::new(self.elem_type(chan.elem())))
            }
            ast::TypeRef::FuncType(func) => Type::Func(self.signature(func.param_list(), func.result())),
            ast::TypeRef::StructType(st) => {
                let mut fields = Vec::new();
                for decl in st.fields() {
                    let ty = self.elem_type(decl.ty());
                    let tag = field_tag(&decl);
                    if decl.is_embedded() {
                        fields.push(Field { name: None, ty, tag });
                        continue;
                    }
                    for name in decl.names() {
                        fields.push(Field {
                            name: Some(name.text()),
                            ty: ty.clone(),
                            tag: tag.clone(),
                        });
                    }
                }
                Type::Struct(fields)
            }
            ast::TypeRef::InterfaceType(iface) => {
                let methods = iface
                    .methods()
                    .map(|spec| Method {
                        name: spec.name().map(|name| name.text()).unwrap_or_default(),
                        sig: self.signature(spec.param_list(), spec.result()),
                    })
                    .collect();
                let embeds = iface.embedded().map(|ty| self.resolve_type(&ty)).collect();
                Type::Interface(InterfaceType { methods, embeds })
            }
        }
    }

    fn elem_type(&mut self, ty: Option<ast::TypeRef>) -> Type {
        ty.map(|ty| self.resolve_type(&ty)).unwrap_or(Type::INVALID)
    }

    fn type_name(&mut self, name: &ast::TypeName) -> Type {
        let base = self.type_name_base(name);
        let Some(list) = name.type_args() else {
            return base;
        };
        let args = list.types().map(|ty| self.resolve_type(&ty)).collect();
        match base {
            Type::Named(named) => Type::Named(NamedType { args, ..named }),
            _ => Type::INVALID,
        }
    }

    fn type_name_base(&mut self, name: &ast::TypeName) -> Type {
        let Some(tok) = name.name_token() else {
            return Type::INVALID;
        };
        if let Some(qualifier) = name.qualifier() {
            return match self.lookup(qualifier.text()) {
                Some(id) if matches!(self.info.object(id).kind, ObjectKind::PkgName(_)) => {
                    self.record_use(&qualifier, id);
                    Type::named(Some(qualifier.text()), tok.text())
                }
                _ => {
                    self.error(qualifier.text_range(), format!("undefined: {}", qualifier.text()));
                    Type::INVALID
                }
            };
        }
        match self.lookup(tok.text()) {
            Some(id) if self.info.object(id).kind == ObjectKind::TypeName => {
                self.record_use(&tok, id);
                self.object_type(id).unwrap_or(Type::INVALID)
            }
            Some(_) => {
                self.error(tok.text_range(), format!("{} is not a type", tok.text()));
                Type::INVALID
            }
            None => {
                self.error(tok.text_range(), format!("undefined: {}", tok.text()));
                Type::INVALID
            }
        }
    }

    pub(crate) fn signature(
        &mut self,
        params: Option<ast::ParamList>,
        result: Option<ast::FuncResult>,
    ) -> Signature {
        let mut sig = Signature::default();
        if let Some(list) = params {
            let (vars, variadic) = self.param_vars(&list);
            sig.params = vars;
            sig.variadic = variadic;
        }
        if let Some(result) = result {
            if let Some(list) = result.param_list() {
                sig.results = self.param_vars(&list).0;
            } else if let Some(ty) = result.ty() {
                sig.results = vec![Var {
                    name: None,
                    ty: self.resolve_type(&ty),
                }];
            }
        }
        sig
    }

    fn param_vars(&mut self, list: &ast::ParamList) -> (Vec<Var>, bool) {
        let mut vars = Vec::new();
        let mut variadic = false;
        for param in list.params() {
            let mut ty = self.elem_type(param.ty());
            variadic = param.is_variadic();
            if variadic {
                ty = Type::slice(ty);
            }
            let names: Vec<String> = param.names().map(|name| name.text()).collect();
            if names.is_empty() {
                vars.push(Var { name: None, ty });
            } else {
                vars.extend(names.into_iter().map(|name| Var {
                    name: Some(name),
                    ty: ty.clone(),
                }));
            }
        }
        (vars, variadic)
    }

    /// The type `expr` denotes, when it is a type expression.
    ///
    /// `pkg.Name` is only taken for a type when `qualified` is set, since other packages'
    /// members are not known.
    pub(crate) fn as_type(&mut self, expr: &ast::Expr, qualified: bool) -> Option<Type> {
        match expr {
            ast::Expr::TypeRef(ty) => Some(self.resolve_type(ty)),
            ast::Expr::ParenExpr(paren) => self.as_type(&paren.expr()?, qualified),
            ast::Expr::NameRef(name) => {
                let tok = name.ident_token()?;
                let id = self.lookup(tok.text())?;
                if self.info.object(id).kind != ObjectKind::TypeName {
                    return None;
                }
                self.record_use(&tok, id);
                self.object_type(id)
            }
            ast::Expr::SelectorExpr(sel) if qualified => {
                let ast::Expr::NameRef(pkg) = sel.expr()? else {
                    return None;
                };
                let pkg_tok = pkg.ident_token()?;
                let id = self.lookup(pkg_tok.text())?;
                if !matches!(self.info.object(id).kind, ObjectKind::PkgName(_)) {
                    return None;
                }
                self.record_use(&pkg_tok, id);
                let field = sel.field_token()?;
                Some(Type::named(Some(pkg_tok.text()), field.text()))
            }
            ast::Expr::UnaryExpr(unary) if unary.op_kind() == Some(SyntaxKind::Star) => {
                self.as_type(&unary.operand()?, qualified).map(Type::pointer)
            }
            // `List[int]` in a conversion or composite literal.
            ast::Expr::IndexExpr(index) => {
                let Type::Named(named) = self.as_type(&index.base()?, qualified)? else {
                    return None;
                };
                let args = self.type_args(index)?;
                Some(Type::Named(NamedType { args, ..named }))
            }
            _ => None,
        }
    }

    // --- Value expressions ---

    /// Types `expr` and records the result; `None` when the type is unknown.
    pub(crate) fn expr(&mut self, expr: &ast::Expr) -> Option<Type> {
        let ty = self.expr_inner(expr);
        if let Some(ty) = &ty {
            let node = expr.syntax();
            self.info
                .types
                .insert((node.text_range(), node.kind()), ty.clone());
        }
        ty
    }

    fn expr_inner(&mut self, expr: &ast::Expr) -> Option<Type> {
        match expr {
            ast::Expr::NameRef(name) => self.name_ref(name),
            ast::Expr::Literal(lit) => {
                let kind = match lit.kind()? {
                    SyntaxKind::IntLiteral => BasicKind::UntypedInt,
                    SyntaxKind::FloatLiteral => BasicKind::UntypedFloat,
                    SyntaxKind::ImaginaryLiteral => BasicKind::UntypedComplex,
                    SyntaxKind::RuneLiteral => BasicKind::UntypedRune,
                    SyntaxKind::StringLiteral | SyntaxKind::RawStringLiteral => {
                        BasicKind::UntypedString
                    }
                    _ => return None,
                };
                Some(Type::Basic(kind))
            }
            ast::Expr::CompositeLit(lit) => self.composite_lit(lit),
            ast::Expr::FuncLit(func) => {
                let sig = self.signature(func.param_list(), func.result());
                self.in_scope(|this| {
                    if let Some(list) = func.param_list() {
                        this.declare_params(&list);
                    }
                    if let Some(list) = func.result().and_then(|result| result.param_list()) {
                        this.declare_params(&list);
                    }
                    for stmt in func.body().iter().flat_map(|body| body.stmts()) {
                        this.stmt(&stmt);
                    }
                });
                Some(Type::Func(sig))
            }
            ast::Expr::ParenExpr(paren) => self.expr(&paren.expr()?),
            ast::Expr::SelectorExpr(sel) => self.selector(sel),
            ast::Expr::IndexExpr(index) => {
                let base = index.base().and_then(|base| self.expr(&base));
                if let Some(Type::Func(sig)) = &base {
                    if !sig.type_params.is_empty() {
                        // Explicit instantiation `Map[int, string]`.
                        let args = self.type_args(index)?;
                        return Some(Type::Func(sig.instantiate(&args)));
                    }
                }
                for idx in index.indices() {
                    self.expr(&idx);
                }
                self.index_type(&base?)
            }
            ast::Expr::SliceExpr(slice) => {
                let base = slice.base().and_then(|base| self.expr(&base));
                for bound in slice.bounds() {
                    self.expr(&bound);
                }
                self.slice_type(&base?)
            }
            ast::Expr::TypeAssertExpr(assert) => {
                if let Some(operand) = assert.expr() {
                    self.expr(&operand);
                }
                if assert.is_type_switch() {
                    return None;
                }
                Some(self.resolve_type(&assert.ty()?))
            }
            ast::Expr::CallExpr(call) => self.call(call),
            ast::Expr::UnaryExpr(unary) => self.unary(unary),
            ast::Expr::BinaryExpr(binary) => self.binary(binary),
            ast::Expr::TypeRef(ty) => {
                self.resolve_type(ty);
                None
            }
        }
    }

    /// The entries of `f[A, B]` read as types; `None` unless every one is a type.
    fn type_args(&mut self, index: &ast::IndexExpr) -> Option<Vec<Type>> {
        let args: Vec<Option<Type>> = index
            .indices()
            .map(|idx| self.as_type(&idx, true))
            .collect();
        args.into_iter().collect()
    }

    fn name_ref(&mut self, name: &ast::NameRef) -> Option<Type> {
        let tok = name.ident_token()?;
        if tok.text() == "_" {
            return None;
        }
        let Some(id) = self.lookup(tok.text()) else {
            self.error(tok.text_range(), format!("undefined: {}", tok.text()));
            return None;
        };
        self.record_use(&tok, id);
        match self.info.object(id).kind {
            ObjectKind::Var | ObjectKind::Const | ObjectKind::Func | ObjectKind::Nil => {
                self.object_type(id)
            }
            ObjectKind::TypeName | ObjectKind::PkgName(_) | ObjectKind::Builtin => None,
        }
    }

    fn selector(&mut self, sel: &ast::SelectorExpr) -> Option<Type> {
        let base = sel.expr()?;
        let field = sel.field_token()?;

        if let ast::Expr::NameRef(name) = &base {
            if let Some(tok) = name.ident_token() {
                if let Some(id) = self.lookup(tok.text()) {
                    if matches!(self.info.object(id).kind, ObjectKind::PkgName(_)) {
                        // Members of other packages are not known.
                        self.record_use(&tok, id);
                        return None;
                    }
                }
            }
        }
        if self.as_type(&base, false).is_some() {
            // Method expression `T.Method`.
            return None;
        }

        let ty = self.expr(&base)?;
        self.member(&ty, field.text(), 0)
    }

    /// Field or method `name` of a value of type `ty`.
    fn member(&mut self, ty: &Type, name: &str, depth: usize) -> Option<Type> {
        if depth > MAX_EMBEDDING_DEPTH {
            return None;
        }
        let base = match ty {
            Type::Pointer(elem) => elem.as_ref(),
            other => other,
        };
        if let Type::Named(named) = base {
            if named.package.is_none() {
                let method = self
                    .named
                    .get(&named.name)
                    .and_then(|info| info.methods.iter().find(|m| m.name == name))
                    .map(|method| method.sig.instantiate(&named.args));
                if let Some(sig) = method {
                    return Some(Type::Func(sig));
                }
            }
        }

        match self.underlying(base)? {
            Type::Struct(fields) => {
                if let Some(field) = fields.iter().find(|f| f.name.as_deref() == Some(name)) {
                    return Some(field.ty.clone());
                }
                fields
                    .iter()
                    .filter(|f| f.name.is_none())
                    .find_map(|f| self.member(&f.ty, name, depth + 1))
            }
            Type::Interface(iface) => {
                if let Some(method) = iface.methods.iter().find(|m| m.name == name) {
                    return Some(Type::Func(method.sig.clone()));
                }
                iface
                    .embeds
                    .iter()
                    .find_map(|embed| self.member(embed, name, depth + 1))
            }
            _ => None,
        }
    }

    fn index_type(&mut self, base: &Type) -> Option<Type> {
        match self.underlying(base)? {
            Type::Slice(elem) | Type::Array(_, elem) => Some(*elem),
            Type::Pointer(elem) => match self.underlying(&elem)? {
                Type::Array(_, elem) => Some(*elem),
                _ => None,
            },
            Type::Map(_, value) => Some(*value),
            Type::Basic(kind) if kind.is_string() => Some(Type::Basic(BasicKind::Byte)),
            _ => None,
        }
    }

    fn slice_type(&mut self, base: &Type) -> Option<Type> {
        match self.underlying(base)? {
            Type::Slice(_) => Some(base.clone()),
            Type::Array(_, elem) => Some(Type::Slice(elem)),
            Type::Pointer(elem) => match self.underlying(&elem)? {
                Type::Array(_, elem) => Some(Type::Slice(elem)),
                _ => None,
            },
            Type::Basic(kind) if kind.is_string() => Some(base.default_type()),
            _ => None,
        }
    }

    fn call(&mut self, call: &ast::CallExpr) -> Option<Type> {
        let args = call.args();
        let Some(callee) = call.callee() else {
            self.exprs(&args);
            return None;
        };

        if let Some(target) = self.as_type(&callee, false) {
            // Conversion `T(x)`.
            self.exprs(&args);
            return Some(target);
        }

        if let Some(builtin) = self.builtin_callee(&callee) {
            return self.builtin_call(&builtin, &args);
        }

        let callee_ty = self.expr(&callee);
        self.exprs(&args);
        match self.underlying(&callee_ty?)? {
            // Inferred type arguments are not computed.
            Type::Func(sig) => Some(call_result(&sig))
                .filter(|result| !result.mentions_type_params(&sig.type_params)),
            _ => None,
        }
    }

    fn exprs(&mut self, exprs: &[ast::Expr]) -> Vec<Option<Type>> {
        exprs.iter().map(|expr| self.expr(expr)).collect()
    }

    fn builtin_callee(&mut self, callee: &ast::Expr) -> Option<String> {
        let ast::Expr::NameRef(name) = callee else {
            return None;
        };
        let tok = name.ident_token()?;
        let id = self.lookup(tok.text())?;
        if self.info.object(id).kind != ObjectKind::Builtin {
            return None;
        }
        self.record_use(&tok, id);
        Some(tok.text().to_string())
    }

    fn builtin_call(&mut self, name: &str, args: &[ast::Expr]) -> Option<Type> {
        match name {
            "make" | "new" => {
                let (first, rest) = args.split_first()?;
                let ty = self.as_type(first, true);
                self.exprs(rest);
                let ty = ty?;
                Some(if name == "new" { Type::pointer(ty) } else { ty })
            }
            "len" | "cap" | "copy" => {
                self.exprs(args);
                Some(Type::Basic(BasicKind::Int))
            }
            "append" => {
                let types = self.exprs(args);
                types.into_iter().next().flatten().filter(|ty| !ty.is_untyped_nil())
            }
            "complex" => {
                let types = self.exprs(args);
                let kinds: Vec<Option<BasicKind>> = types
                    .iter()
                    .map(|ty| ty.as_ref().and_then(Type::basic_kind))
                    .collect();
                let kind = if kinds.iter().all(|kind| kind.is_some_and(BasicKind::is_untyped)) {
                    BasicKind::UntypedComplex
                } else if kinds.contains(&Some(BasicKind::Float32)) {
                    BasicKind::Complex64
                } else {
                    BasicKind::Complex128
                };
                Some(Type::Basic(kind))
            }
            "real" | "imag" => {
                let types = self.exprs(args);
                let kind = match types.first().cloned().flatten().and_then(|ty| ty.basic_kind()) {
                    Some(BasicKind::Complex64) => BasicKind::Float32,
                    Some(kind) if kind.is_untyped() => BasicKind::UntypedFloat,
                    _ => BasicKind::Float64,
                };
                Some(Type::Basic(kind))
            }
            "min" | "max" => {
                let types: Vec<Type> = self.exprs(args).into_iter().flatten().collect();
                if let Some(typed) = types.iter().find(|ty| !ty.is_untyped()) {
                    return Some(typed.clone());
                }
                types
                    .iter()
                    .filter_map(Type::basic_kind)
                    .reduce(Type::larger_untyped)
                    .map(Type::Basic)
            }
            "recover" => {
                self.exprs(args);
                Some(Type::named(None, "any"))
            }
            _ => {
                self.exprs(args);
                Some(Type::Tuple(Vec::new()))
            }
        }
    }

    fn unary(&mut self, unary: &ast::UnaryExpr) -> Option<Type> {
        let operand = unary.operand()?;
        let ty = self.expr(&operand);
        match unary.op_kind()? {
            SyntaxKind::Amp => ty.map(Type::pointer),
            SyntaxKind::Star => match self.underlying(&ty?)? {
                Type::Pointer(elem) => Some(*elem),
                _ => None,
            },
            SyntaxKind::Arrow => match self.underlying(&ty?)? {
                Type::Chan(_, elem) => Some(*elem),
                _ => None,
            },
            _ => ty,
        }
    }

    fn binary(&mut self, binary: &ast::BinaryExpr) -> Option<Type> {
        let lhs = binary.lhs().and_then(|lhs| self.expr(&lhs));
        let rhs = binary.rhs().and_then(|rhs| self.expr(&rhs));
        let untyped_bool = Type::Basic(BasicKind::UntypedBool);

        match binary.op_kind()? {
            SyntaxKind::EqEq
            | SyntaxKind::NotEq
            | SyntaxKind::Lt
            | SyntaxKind::LtEq
            | SyntaxKind::Gt
            | SyntaxKind::GtEq => Some(untyped_bool),
            SyntaxKind::AmpAmp | SyntaxKind::PipePipe => [lhs, rhs]
                .into_iter()
                .flatten()
                .find(|ty| !ty.is_untyped())
                .or(Some(untyped_bool)),
            SyntaxKind::Shl | SyntaxKind::Shr => lhs,
            _ => match (lhs, rhs) {
                (Some(lhs), _) if !lhs.is_untyped() => Some(lhs),
                (_, Some(rhs)) if !rhs.is_untyped() => Some(rhs),
                (Some(lhs), Some(rhs)) => match (lhs.basic_kind(), rhs.basic_kind()) {
                    (Some(a), Some(b)) => Some(Type::Basic(Type::larger_untyped(a, b))),
                    _ => None,
                },
                (lhs, rhs) => lhs.or(rhs),
            },
        }
    }

    fn composite_lit(&mut self, lit: &ast::CompositeLit) -> Option<Type> {
        let ty = match lit.type_expr() {
            Some(ast::Expr::TypeRef(ast::TypeRef::ArrayType(array))) if array.len().is_none() => {
                // `[...]T{...}` takes its length from the elements.
                let elem = self.elem_type(array.elem());
                let len = lit
                    .literal_value()
                    .map(|value| value.elements().count())
                    .unwrap_or(0);
                Some(Type::Array(len as u64, Box::new(elem)))
            }
            Some(expr) => {
                let ty = self.as_type(&expr, true);
                if ty.is_none() {
                    self.expr(&expr);
                }
                ty
            }
            None => None,
        };
        if let Some(value) = lit.literal_value() {
            self.literal_value(&value, ty.as_ref());
        }
        ty
    }

    fn literal_value(&mut self, value: &ast::LiteralValue, ty: Option<&Type>) {
        let underlying = ty.and_then(|ty| self.underlying(ty));
        for (idx, element) in value.elements().enumerate() {
            let ast::Element::KeyedElement(keyed) = element else {
                let hint = underlying.as_ref().and_then(|ty| element_type(ty, idx));
                self.element(&element, hint.as_ref());
                continue;
            };
            let hint = match (&underlying, keyed.key()) {
                // Struct keys are field names, not expressions.
                (Some(Type::Struct(fields)), Some(ast::Element::Expr(ast::Expr::NameRef(key)))) => {
                    let key = key.text();
                    fields
                        .iter()
                        .find(|field| field.selector_name() == Some(key.as_str()))
                        .map(|field| field.ty.clone())
                }
                (Some(Type::Struct(_)), _) | (None, _) => None,
                (Some(ty), Some(key)) => {
                    let key_hint = match ty {
                        Type::Map(key, _) => Some(key.as_ref().clone()),
                        _ => None,
                    };
                    self.element(&key, key_hint.as_ref());
                    element_type(ty, idx)
                }
                (Some(ty), None) => element_type(ty, idx),
            };
            if let Some(value) = keyed.value() {
                self.element(&value, hint.as_ref());
            }
        }
    }

    fn element(&mut self, element: &ast::Element, hint: Option<&Type>) {
        match element {
            ast::Element::Expr(expr) => {
                self.expr(expr);
            }
            ast::Element::LiteralValue(value) => {
                // Elided `{...}` of a `[]*T` takes `T`.
                let ty = match hint {
                    Some(Type::Pointer(elem)) => Some(elem.as_ref()),
                    other => other,
                };
                self.literal_value(value, ty);
            }
            ast::Element::KeyedElement(keyed) => {
                for inner in keyed.key().into_iter().chain(keyed.value()) {
                    self.element(&inner, None);
                }
            }
        }
    }

    // --- Constants ---

    /// Value of an integer constant expression, if it can be computed.
    pub(crate) fn const_int(&mut self, expr: &ast::Expr) -> Option<i128> {
        match expr {
            ast::Expr::Literal(lit) => {
                let tok = lit.token()?;
                match tok.kind() {
                    SyntaxKind::IntLiteral => parse_int(tok.text()),
                    SyntaxKind::RuneLiteral => parse_rune(tok.text()),
                    _ => None,
                }
            }
            ast::Expr::NameRef(name) => {
                let id = self.lookup(&name.text())?;
                if self.info.object(id).kind != ObjectKind::Const {
                    return None;
                }
                self.const_value_of(id)
            }
            ast::Expr::ParenExpr(paren) => self.const_int(&paren.expr()?),
            ast::Expr::UnaryExpr(unary) => {
                let value = self.const_int(&unary.operand()?)?;
                match unary.op_kind()? {
                    SyntaxKind::Minus => value.checked_neg(),
                    SyntaxKind::Plus => Some(value),
                    SyntaxKind::Caret => Some(!value),
                    _ => None,
                }
            }
            ast::Expr::BinaryExpr(binary) => {
                let lhs = self.const_int(&binary.lhs()?)?;
                let rhs = self.const_int(&binary.rhs()?)?;
                match binary.op_kind()? {
                    SyntaxKind::Plus => lhs.checked_add(rhs),
                    SyntaxKind::Minus => lhs.checked_sub(rhs),
                    SyntaxKind::Star => lhs.checked_mul(rhs),
                    SyntaxKind::Slash => lhs.checked_div(rhs),
                    SyntaxKind::Percent => lhs.checked_rem(rhs),
                    SyntaxKind::Shl => u32::try_from(rhs).ok().and_then(|rhs| lhs.checked_shl(rhs)),
                    SyntaxKind::Shr => u32::try_from(rhs).ok().and_then(|rhs| lhs.checked_shr(rhs)),
                    SyntaxKind::Amp => Some(lhs & rhs),
                    SyntaxKind::Pipe => Some(lhs | rhs),
                    SyntaxKind::Caret => Some(lhs ^ rhs),
                    SyntaxKind::AmpCaret => Some(lhs & !rhs),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

/// Type of the element at position `idx` of a composite literal of type `ty`.
fn element_type(ty: &Type, idx: usize) -> Option<Type> {
    match ty {
        Type::Slice(elem) | Type::Array(_, elem) | Type::Map(_, elem) => Some(elem.as_ref().clone()),
        Type::Struct(fields) => fields.get(idx).map(|field| field.ty.clone()),
        _ => None,
    }
}

fn call_result(sig: &Signature) -> Type {
    match sig.results.as_slice() {
        [single] => single.ty.clone(),
        results => Type::Tuple(results.iter().map(|var| var.ty.clone()).collect()),
    }
}

fn field_tag(decl: &ast::FieldDecl) -> Option<String> {
    let tok = decl
        .syntax()
        .children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|tok| {
            matches!(
                tok.kind(),
                SyntaxKind::StringLiteral | SyntaxKind::RawStringLiteral
            )
        })?;
    let text = tok.text();
    let inner = &text[1..text.len().saturating_sub(1).max(1)];
    if tok.kind() == SyntaxKind::RawStringLiteral {
        return Some(inner.to_string());
    }
    Some(inner.replace("\\\"", "\"").replace("\\\\", "\\"))
}

fn parse_int(text: &str) -> Option<i128> {
    let digits: String = text.chars().filter(|c| *c != '_').collect();
    let lower = digits.to_ascii_lowercase();
    let (radix, body) = if let Some(rest) = lower.strip_prefix("0x") {
        (16, rest)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (2, rest)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (8, rest)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (8, &lower[1..])
    } else {
        (10, lower.as_str())
    };
    i128::from_str_radix(body, radix).ok()
}

fn parse_rune(text: &str) -> Option<i128> {
    let inner = text.strip_prefix('\'')?.strip_suffix('\'')?;
    let mut chars = inner.chars();
    let value = match chars.next()? {
        '\\' => match chars.next()? {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            '\\' => '\\',
            '\'' => '\'',
            _ => return None,
        },
        c => c,
    };
    Some(value as i128)
}
