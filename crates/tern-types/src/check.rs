use std::collections::HashMap;

use tern_syntax::ast;
use tern_syntax::{SyntaxToken, TextRange};

use crate::info::{TypeError, TypeInfo};
use crate::object::{universe_named, universe_objects, Object, ObjectId, ObjectKind, ScopeId, Scopes};
use crate::ty::{BasicKind, Method, Signature, Type};

/// Declaration state of a named type of this file.
#[derive(Debug)]
pub(crate) struct NamedInfo {
    spec: Option<ast::TypeSpec>,
    scope: ScopeId,
    /// Type parameter names of a generic type.
    params: Vec<String>,
    underlying: Option<Type>,
    resolving: bool,
    pub(crate) methods: Vec<Method>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecKind {
    Var,
    Const,
}

/// A package-level `var` or `const` spec whose types are computed on first use.
#[derive(Debug)]
struct PendingSpec {
    spec: ast::ValueSpec,
    /// Spec that provides type and values to a `const` spec that repeats the previous one.
    template: Option<ast::ValueSpec>,
    kind: SpecKind,
    iota: i128,
    objects: Vec<Option<ObjectId>>,
}

pub(crate) struct Checker {
    pub(crate) info: TypeInfo,
    pub(crate) scopes: Scopes,
    pub(crate) scope: ScopeId,
    file_scope: ScopeId,
    pub(crate) named: HashMap<String, NamedInfo>,
    pending: HashMap<ObjectId, usize>,
    pending_specs: Vec<PendingSpec>,
    pub(crate) iota: Option<i128>,
    pub(crate) iota_object: Option<ObjectId>,
}

impl Checker {
    pub(crate) fn new() -> Self {
        let mut info = TypeInfo::default();
        let mut scopes = Scopes::new();
        let mut iota_object = None;
        for object in universe_objects() {
            let name = object.name.clone();
            let id = info.alloc(object);
            if name == "iota" {
                iota_object = Some(id);
            }
            scopes.insert(Scopes::UNIVERSE, &name, id);
        }

        let mut named = HashMap::new();
        for (name, underlying) in universe_named() {
            named.insert(
                name.to_string(),
                NamedInfo {
                    spec: None,
                    scope: Scopes::UNIVERSE,
                    params: Vec::new(),
                    underlying: Some(underlying),
                    resolving: false,
                    methods: Vec::new(),
                },
            );
        }

        let package_scope = scopes.child(Scopes::UNIVERSE);
        let file_scope = scopes.child(package_scope);
        Self {
            info,
            scopes,
            scope: file_scope,
            file_scope,
            named,
            pending: HashMap::new(),
            pending_specs: Vec::new(),
            iota: None,
            iota_object,
        }
    }

    pub(crate) fn check_source_file(mut self, file: &ast::SourceFile) -> TypeInfo {
        let package_scope = self
            .scopes
            .parent(self.file_scope)
            .unwrap_or(Scopes::UNIVERSE);

        for decl in file.imports() {
            for spec in decl.specs() {
                self.import_spec(&spec);
            }
        }

        let mut funcs = Vec::new();
        let mut aliases = Vec::new();
        for decl in file.decls() {
            match decl {
                ast::Decl::FuncDecl(func) => {
                    let id = func.name().and_then(|name| {
                        let object = self.object_for(&name, ObjectKind::Func, None)?;
                        let id = self.info.alloc(object);
                        self.record_def(&name, id);
                        if func.receiver().is_none() && name.text() != "_" {
                            self.scopes.insert(package_scope, &name.text(), id);
                        }
                        Some(id)
                    });
                    funcs.push((func, id));
                }
                ast::Decl::TypeDecl(decl) => {
                    for spec in decl.specs() {
                        if let Some(id) = self.declare_type_name(&spec, package_scope) {
                            if spec.is_alias() {
                                aliases.push((spec, id));
                            }
                        }
                    }
                }
                ast::Decl::VarDecl(decl) => {
                    for spec in decl.specs() {
                        self.declare_pending(spec, None, SpecKind::Var, 0, package_scope);
                    }
                }
                ast::Decl::ConstDecl(decl) => {
                    let mut template: Option<ast::ValueSpec> = None;
                    for (iota, spec) in decl.specs().enumerate() {
                        let repeats = spec.values().is_none();
                        let from = if repeats { template.clone() } else { None };
                        if !repeats {
                            template = Some(spec.clone());
                        }
                        self.declare_pending(
                            spec,
                            from,
                            SpecKind::Const,
                            iota as i128,
                            package_scope,
                        );
                    }
                }
            }
        }

        for (spec, id) in aliases {
            let target = spec.ty().map(|ty| self.resolve_type(&ty));
            self.info.object_mut(id).ty = target;
        }

        // Signatures before bodies, so calls see every function of the file.
        for (func, id) in &funcs {
            let sig = self.in_scope(|this| {
                let type_params = this.declare_func_type_params(func);
                Signature {
                    type_params,
                    ..this.signature(func.param_list(), func.result())
                }
            });
            if let Some(id) = id {
                self.info.object_mut(*id).ty = Some(Type::Func(sig.clone()));
            }
            if let (Some(recv), Some(name)) = (func.receiver(), func.name()) {
                if let Some(base) = receiver_base(&recv) {
                    if let Some(named) = self.named.get_mut(&base) {
                        named.methods.push(Method {
                            name: name.text(),
                            sig,
                        });
                    }
                }
            }
        }

        let package_types: Vec<String> = self
            .named
            .iter()
            .filter(|(_, info)| info.spec.is_some())
            .map(|(name, _)| name.clone())
            .collect();
        for name in package_types {
            self.named_underlying(&name);
        }

        for idx in 0..self.pending_specs.len() {
            self.resolve_pending(idx);
        }

        for (func, _) in &funcs {
            self.func_body(func);
        }

        self.info
    }

    fn import_spec(&mut self, spec: &ast::ImportSpec) {
        let (Some(path), Some(local)) = (spec.path(), spec.local_name()) else {
            return;
        };
        if spec.is_dot_import() || local == "_" {
            return;
        }
        let mut object = Object::new(local.clone(), ObjectKind::PkgName(path), None);
        if let Some(tok) = spec.alias().and_then(|alias| alias.ident_token()) {
            object = object.declared_at(tok.text_range());
            let id = self.info.alloc(object);
            self.info.defs.insert(tok.text_range(), id);
            self.scopes.insert(self.file_scope, &local, id);
        } else {
            let id = self.info.alloc(object);
            self.scopes.insert(self.file_scope, &local, id);
        }
    }

    fn declare_type_name(&mut self, spec: &ast::TypeSpec, scope: ScopeId) -> Option<ObjectId> {
        let name = spec.name()?;
        let text = name.text();
        let ty = (!spec.is_alias()).then(|| Type::named(None, &text));
        let object = self.object_for(&name, ObjectKind::TypeName, ty)?;
        let id = self.info.alloc(object);
        self.record_def(&name, id);
        if text == "_" {
            return None;
        }
        self.scopes.insert(scope, &text, id);
        if !spec.is_alias() {
            let params = spec
                .type_params()
                .map(|list| list.names().iter().map(ast::Name::text).collect())
                .unwrap_or_default();
            self.named.insert(
                text,
                NamedInfo {
                    spec: Some(spec.clone()),
                    scope,
                    params,
                    underlying: None,
                    resolving: false,
                    methods: Vec::new(),
                },
            );
        }
        Some(id)
    }

    fn declare_pending(
        &mut self,
        spec: ast::ValueSpec,
        template: Option<ast::ValueSpec>,
        kind: SpecKind,
        iota: i128,
        scope: ScopeId,
    ) {
        let idx = self.pending_specs.len();
        let object_kind = match kind {
            SpecKind::Var => ObjectKind::Var,
            SpecKind::Const => ObjectKind::Const,
        };
        let mut objects = Vec::new();
        for name in spec.names() {
            let id = self.object_for(&name, object_kind.clone(), None).map(|object| {
                let id = self.info.alloc(object);
                self.record_def(&name, id);
                if name.text() != "_" {
                    self.scopes.insert(scope, &name.text(), id);
                }
                self.pending.insert(id, idx);
                id
            });
            objects.push(id);
        }
        self.pending_specs.push(PendingSpec {
            spec,
            template,
            kind,
            iota,
            objects,
        });
    }

    fn resolve_pending(&mut self, idx: usize) {
        let Some(pending) = self.pending_specs.get(idx) else {
            return;
        };
        let objects = pending.objects.clone();
        if objects
            .iter()
            .flatten()
            .all(|id| !self.pending.contains_key(id))
        {
            return;
        }
        for id in objects.iter().flatten() {
            self.pending.remove(id);
        }
        let spec = pending.spec.clone();
        let template = pending.template.clone();
        let kind = pending.kind;
        let iota = pending.iota;

        let saved = std::mem::replace(&mut self.scope, self.file_scope);
        let resolved = self.value_spec(&spec, template.as_ref(), kind, iota);
        self.scope = saved;

        for (id, (ty, value)) in objects.iter().zip(resolved) {
            if let Some(id) = id {
                let object = self.info.object_mut(*id);
                object.ty = ty;
                object.const_value = value;
            }
        }
    }

    /// Types (and constant values) of the names of one `var` or `const` spec.
    fn value_spec(
        &mut self,
        spec: &ast::ValueSpec,
        template: Option<&ast::ValueSpec>,
        kind: SpecKind,
        iota: i128,
    ) -> Vec<(Option<Type>, Option<i128>)> {
        let count = spec.names().count();
        let source = template.unwrap_or(spec);
        let declared = source.ty().map(|ty| self.resolve_type(&ty));
        let values: Vec<ast::Expr> = source
            .values()
            .map(|list| list.exprs().collect())
            .unwrap_or_default();

        let saved_iota = self.iota;
        if kind == SpecKind::Const {
            self.iota = Some(iota);
        }
        let value_types = self.assignment_types(&values, count);
        let const_values: Vec<Option<i128>> = (0..count)
            .map(|idx| match (kind, values.get(idx)) {
                (SpecKind::Const, Some(expr)) => self.const_int(expr),
                _ => None,
            })
            .collect();
        self.iota = saved_iota;

        value_types
            .into_iter()
            .zip(const_values)
            .map(|(value_ty, value)| {
                let ty = match (&declared, kind) {
                    (Some(ty), _) => Some(ty.clone()),
                    (None, SpecKind::Var) => value_ty.map(|ty| ty.default_type()),
                    (None, SpecKind::Const) => value_ty,
                };
                (ty, value)
            })
            .collect()
    }

    /// Types of `count` names initialized from `values`, including the
    /// `v, ok := m[k]` and multi-value call forms.
    pub(crate) fn assignment_types(
        &mut self,
        values: &[ast::Expr],
        count: usize,
    ) -> Vec<Option<Type>> {
        // A generic function must be instantiated before it can be stored.
        self.assignment_types_inner(values, count)
            .into_iter()
            .map(|ty| ty.filter(|ty| !ty.is_generic_func()))
            .collect()
    }

    fn assignment_types_inner(&mut self, values: &[ast::Expr], count: usize) -> Vec<Option<Type>> {
        if values.len() == count {
            return values.iter().map(|value| self.expr(value)).collect();
        }

        if let [value] = values {
            let ty = self.expr(value);
            if let Some(Type::Tuple(types)) = &ty {
                if types.len() == count {
                    return types.iter().cloned().map(Some).collect();
                }
            } else if count == 2 && is_comma_ok(value) {
                return vec![ty, Some(Type::Basic(BasicKind::Bool))];
            }
            return vec![None; count];
        }

        for value in values {
            self.expr(value);
        }
        vec![None; count]
    }

    // --- Objects and scopes ---

    fn object_for(&self, name: &ast::Name, kind: ObjectKind, ty: Option<Type>) -> Option<Object> {
        let tok = name.ident_token()?;
        Some(Object::new(tok.text(), kind, ty).declared_at(tok.text_range()))
    }

    fn record_def(&mut self, name: &ast::Name, id: ObjectId) {
        if let Some(tok) = name.ident_token() {
            self.info.defs.insert(tok.text_range(), id);
        }
    }

    pub(crate) fn record_use(&mut self, tok: &SyntaxToken, id: ObjectId) {
        self.info.uses.insert(tok.text_range(), id);
    }

    pub(crate) fn error(&mut self, range: TextRange, message: String) {
        tracing::trace!(target: "tern.types", %message, ?range, "type error");
        self.info.errors.push(TypeError { message, range });
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<ObjectId> {
        self.scopes.lookup(self.scope, name)
    }

    /// Declares a local object for a declaring identifier token.
    pub(crate) fn define(&mut self, tok: &SyntaxToken, kind: ObjectKind, ty: Option<Type>) -> ObjectId {
        let object = Object::new(tok.text(), kind, ty).declared_at(tok.text_range());
        let id = self.info.alloc(object);
        self.info.defs.insert(tok.text_range(), id);
        if tok.text() != "_" {
            self.scopes.insert(self.scope, tok.text(), id);
        }
        id
    }

    /// Type of the object `id`, computing it first for package-level declarations.
    pub(crate) fn object_type(&mut self, id: ObjectId) -> Option<Type> {
        if let Some(idx) = self.pending.get(&id).copied() {
            self.resolve_pending(idx);
        }
        self.info.object(id).ty.clone()
    }

    pub(crate) fn const_value_of(&mut self, id: ObjectId) -> Option<i128> {
        if Some(id) == self.iota_object {
            return self.iota;
        }
        if let Some(idx) = self.pending.get(&id).copied() {
            self.resolve_pending(idx);
        }
        self.info.object(id).const_value
    }

    pub(crate) fn in_scope<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = self.scope;
        self.scope = self.scopes.child(saved);
        let result = f(self);
        self.scope = saved;
        result
    }

    /// Underlying type of a type; `None` for types declared in other packages and for type
    /// parameters.
    pub(crate) fn underlying(&mut self, ty: &Type) -> Option<Type> {
        match ty {
            Type::Named(named) if named.package.is_none() => {
                let underlying = self.named_underlying(&named.name)?;
                let params = &self.named.get(&named.name)?.params;
                if params.len() != named.args.len() {
                    return None;
                }
                Some(underlying.subst(params, &named.args))
            }
            Type::Named(_) | Type::TypeParam(_) => None,
            other => Some(other.clone()),
        }
    }

    fn named_underlying(&mut self, name: &str) -> Option<Type> {
        let info = self.named.get_mut(name)?;
        if let Some(underlying) = &info.underlying {
            return Some(underlying.clone());
        }
        if info.resolving {
            return None;
        }
        info.resolving = true;
        let spec = info.spec.clone()?;
        let scope = info.scope;

        let saved = std::mem::replace(&mut self.scope, scope);
        let ty = self.in_scope(|this| {
            if let Some(list) = spec.type_params() {
                this.declare_type_params(&list);
            }
            spec.ty()
                .map(|ty| this.resolve_type(&ty))
                .unwrap_or(Type::INVALID)
        });
        self.scope = saved;

        let underlying = match ty {
            Type::Named(_) => self.underlying(&ty),
            other => Some(other),
        };
        if let Some(info) = self.named.get_mut(name) {
            info.underlying = underlying.clone();
            info.resolving = false;
        }
        underlying
    }

    // --- Function bodies and statements ---

    fn func_body(&mut self, func: &ast::FuncDecl) {
        let Some(body) = func.body() else {
            return;
        };
        let saved = std::mem::replace(&mut self.scope, self.file_scope);
        self.in_scope(|this| {
            this.declare_func_type_params(func);
            if let Some(list) = func.receiver().and_then(|recv| recv.param_list()) {
                this.declare_params(&list);
            }
            if let Some(list) = func.param_list() {
                this.declare_params(&list);
            }
            if let Some(list) = func.result().and_then(|result| result.param_list()) {
                this.declare_params(&list);
            }
            // The body shares the scope of the parameters.
            for stmt in body.stmts() {
                this.stmt(&stmt);
            }
        });
        self.scope = saved;
    }

    /// Brings the type parameters of a generic declaration into the current scope.
    fn declare_type_params(&mut self, list: &ast::TypeParamList) -> Vec<String> {
        let names = list.names();
        for name in &names {
            if let Some(tok) = name.ident_token() {
                let ty = Type::TypeParam(tok.text().to_string());
                self.define(&tok, ObjectKind::TypeName, Some(ty));
            }
        }
        // Constraints may refer to any parameter of the list.
        for param in list.params() {
            for term in param.constraint().iter().flat_map(|c| c.terms()) {
                self.resolve_type(&term);
            }
        }
        names.iter().map(ast::Name::text).collect()
    }

    /// Type parameters of a generic function, or the ones a method's receiver names in
    /// `func (l *List[T]) ...`.
    fn declare_func_type_params(&mut self, func: &ast::FuncDecl) -> Vec<String> {
        if let Some(list) = func.type_params() {
            return self.declare_type_params(&list);
        }
        let Some(recv) = func.receiver() else {
            return Vec::new();
        };
        receiver_type_params(&recv)
            .into_iter()
            .map(|tok| {
                let name = tok.text().to_string();
                self.define(&tok, ObjectKind::TypeName, Some(Type::TypeParam(name.clone())));
                name
            })
            .collect()
    }

    pub(crate) fn declare_params(&mut self, list: &ast::ParamList) {
        for param in list.params() {
            let mut ty = param.ty().map(|ty| self.resolve_type(&ty));
            if param.is_variadic() {
                ty = ty.map(Type::slice);
            }
            for name in param.names() {
                if let Some(tok) = name.ident_token() {
                    self.define(&tok, ObjectKind::Var, ty.clone());
                }
            }
        }
    }

    pub(crate) fn block(&mut self, block: &ast::Block) {
        self.in_scope(|this| {
            for stmt in block.stmts() {
                this.stmt(&stmt);
            }
        });
    }

    pub(crate) fn stmt(&mut self, stmt: &ast::Stmt) {
        match stmt {
            ast::Stmt::DeclStmt(decl) => match decl.decl() {
                Some(ast::Decl::VarDecl(decl)) => {
                    for spec in decl.specs() {
                        self.local_value_spec(&spec, None, SpecKind::Var, 0);
                    }
                }
                Some(ast::Decl::ConstDecl(decl)) => {
                    let mut template: Option<ast::ValueSpec> = None;
                    for (iota, spec) in decl.specs().enumerate() {
                        if spec.values().is_some() {
                            template = Some(spec.clone());
                            self.local_value_spec(&spec, None, SpecKind::Const, iota as i128);
                        } else {
                            let from = template.clone();
                            self.local_value_spec(&spec, from.as_ref(), SpecKind::Const, iota as i128);
                        }
                    }
                }
                Some(ast::Decl::TypeDecl(decl)) => {
                    for spec in decl.specs() {
                        let scope = self.scope;
                        if let Some(id) = self.declare_type_name(&spec, scope) {
                            if spec.is_alias() {
                                let target = spec.ty().map(|ty| self.resolve_type(&ty));
                                self.info.object_mut(id).ty = target;
                            } else if let Some(name) = spec.name() {
                                self.named_underlying(&name.text());
                            }
                        }
                    }
                }
                Some(ast::Decl::FuncDecl(_)) | None => {}
            },
            ast::Stmt::AssignStmt(assign) => self.assign(assign),
            ast::Stmt::IncDecStmt(stmt) => {
                if let Some(expr) = stmt.expr() {
                    self.expr(&expr);
                }
            }
            ast::Stmt::SendStmt(stmt) => {
                for expr in stmt.channel().into_iter().chain(stmt.value()) {
                    self.expr(&expr);
                }
            }
            ast::Stmt::ExprStmt(stmt) => {
                if let Some(expr) = stmt.expr() {
                    self.expr(&expr);
                }
            }
            ast::Stmt::ReturnStmt(stmt) => {
                for expr in stmt.values().iter().flat_map(|list| list.exprs()) {
                    self.expr(&expr);
                }
            }
            ast::Stmt::IfStmt(stmt) => self.if_stmt(stmt),
            ast::Stmt::ForStmt(stmt) => self.for_stmt(stmt),
            ast::Stmt::SwitchStmt(stmt) => self.switch_stmt(stmt),
            ast::Stmt::SelectStmt(stmt) => {
                for clause in stmt.clauses() {
                    self.in_scope(|this| {
                        if let Some(comm) = clause.comm() {
                            this.simple_stmt(&comm);
                        }
                        for stmt in clause.stmts() {
                            this.stmt(&stmt);
                        }
                    });
                }
            }
            ast::Stmt::Block(block) => self.block(block),
            ast::Stmt::DeferStmt(stmt) => {
                if let Some(call) = stmt.call() {
                    self.expr(&call);
                }
            }
            ast::Stmt::GoStmt(stmt) => {
                if let Some(call) = stmt.call() {
                    self.expr(&call);
                }
            }
            ast::Stmt::BranchStmt(_) => {}
            ast::Stmt::LabeledStmt(stmt) => {
                if let Some(inner) = stmt.stmt() {
                    self.stmt(&inner);
                }
            }
        }
    }

    fn simple_stmt(&mut self, stmt: &ast::SimpleStmt) {
        match stmt {
            ast::SimpleStmt::AssignStmt(assign) => self.assign(assign),
            ast::SimpleStmt::IncDecStmt(stmt) => self.stmt(&stmt.clone().into()),
            ast::SimpleStmt::SendStmt(stmt) => self.stmt(&stmt.clone().into()),
            ast::SimpleStmt::ExprStmt(stmt) => self.stmt(&stmt.clone().into()),
        }
    }

    fn local_value_spec(
        &mut self,
        spec: &ast::ValueSpec,
        template: Option<&ast::ValueSpec>,
        kind: SpecKind,
        iota: i128,
    ) {
        // Initializers are evaluated before the names come into scope.
        let resolved = self.value_spec(spec, template, kind, iota);
        let object_kind = match kind {
            SpecKind::Var => ObjectKind::Var,
            SpecKind::Const => ObjectKind::Const,
        };
        for (name, (ty, value)) in spec.names().zip(resolved) {
            if let Some(tok) = name.ident_token() {
                let id = self.define(&tok, object_kind.clone(), ty);
                self.info.object_mut(id).const_value = value;
            }
        }
    }

    fn assign(&mut self, assign: &ast::AssignStmt) {
        let lhs: Vec<ast::Expr> = assign
            .lhs()
            .map(|list| list.exprs().collect())
            .unwrap_or_default();
        let rhs: Vec<ast::Expr> = assign
            .rhs()
            .map(|list| list.exprs().collect())
            .unwrap_or_default();

        if !assign.is_define() {
            for expr in lhs.iter().chain(&rhs) {
                if !is_blank(expr) {
                    self.expr(expr);
                }
            }
            return;
        }

        let types = self.assignment_types(&rhs, lhs.len());
        for (expr, ty) in lhs.iter().zip(types) {
            let ast::Expr::NameRef(name) = expr else {
                self.expr(expr);
                continue;
            };
            let Some(tok) = name.ident_token() else {
                continue;
            };
            // `:=` redeclares names that already exist in the same scope.
            if tok.text() != "_" {
                if let Some(existing) = self.scopes.lookup_local(self.scope, tok.text()) {
                    self.record_use(&tok, existing);
                    continue;
                }
            }
            self.define(&tok, ObjectKind::Var, ty.map(|ty| ty.default_type()));
        }
    }

    fn if_stmt(&mut self, stmt: &ast::IfStmt) {
        self.in_scope(|this| {
            if let Some(init) = stmt.init() {
                this.simple_stmt(&init);
            }
            if let Some(cond) = stmt.condition() {
                this.expr(&cond);
            }
            if let Some(then) = stmt.then_branch() {
                this.block(&then);
            }
            match stmt.else_branch() {
                Some(ast::Stmt::IfStmt(nested)) => this.if_stmt(&nested),
                Some(other) => this.stmt(&other),
                None => {}
            }
        });
    }

    fn for_stmt(&mut self, stmt: &ast::ForStmt) {
        self.in_scope(|this| {
            if let Some(clause) = stmt.clause() {
                if let Some(init) = clause.init() {
                    this.simple_stmt(&init);
                }
                if let Some(cond) = clause.condition() {
                    this.expr(&cond);
                }
                if let Some(post) = clause.post() {
                    this.simple_stmt(&post);
                }
            } else if let Some(range) = stmt.range_clause() {
                this.range_clause(&range);
            } else if let Some(cond) = stmt.condition() {
                this.expr(&cond);
            }
            if let Some(body) = stmt.body() {
                this.block(&body);
            }
        });
    }

    fn range_clause(&mut self, clause: &ast::RangeClause) {
        let ranged = clause.expr().and_then(|expr| self.expr(&expr));
        let (key, value) = match ranged.as_ref() {
            Some(ty) => self.range_types(ty),
            None => (None, None),
        };

        let lhs: Vec<ast::Expr> = clause
            .lhs()
            .map(|list| list.exprs().collect())
            .unwrap_or_default();
        if !clause.is_define() {
            for expr in lhs.iter().filter(|expr| !is_blank(expr)) {
                self.expr(expr);
            }
            return;
        }
        for (expr, ty) in lhs.iter().zip([key, value]) {
            if let ast::Expr::NameRef(name) = expr {
                if let Some(tok) = name.ident_token() {
                    self.define(&tok, ObjectKind::Var, ty);
                }
            }
        }
    }

    fn range_types(&mut self, ty: &Type) -> (Option<Type>, Option<Type>) {
        let int = Some(Type::Basic(BasicKind::Int));
        match self.underlying(ty) {
            Some(Type::Slice(elem)) | Some(Type::Array(_, elem)) => (int, Some(*elem)),
            Some(Type::Pointer(elem)) => match self.underlying(&elem) {
                Some(Type::Array(_, elem)) => (int, Some(*elem)),
                _ => (None, None),
            },
            Some(Type::Map(key, value)) => (Some(*key), Some(*value)),
            Some(Type::Chan(_, elem)) => (Some(*elem), None),
            Some(Type::Basic(kind)) if kind.is_string() => {
                (int, Some(Type::Basic(BasicKind::Rune)))
            }
            Some(Type::Basic(kind)) if kind.is_integer() => (Some(ty.default_type()), None),
            _ => (None, None),
        }
    }

    fn switch_stmt(&mut self, stmt: &ast::SwitchStmt) {
        self.in_scope(|this| {
            if let Some(init) = stmt.init() {
                this.simple_stmt(&init);
            }

            let mut binding: Option<(String, Option<Type>)> = None;
            let mut type_switch = false;
            if let Some(guard) = stmt.guard() {
                type_switch = true;
                let subject = guard
                    .rhs()
                    .and_then(|list| list.exprs().next())
                    .and_then(|expr| match expr {
                        ast::Expr::TypeAssertExpr(assert) => assert.expr(),
                        other => Some(other),
                    })
                    .and_then(|expr| this.expr(&expr));
                let name = guard
                    .lhs()
                    .and_then(|list| list.exprs().next())
                    .and_then(|expr| match expr {
                        ast::Expr::NameRef(name) => Some(name.text()),
                        _ => None,
                    })
                    .filter(|name| name != "_");
                binding = name.map(|name| (name, subject));
            } else if let Some(tag) = stmt.tag() {
                type_switch = matches!(&tag, ast::Expr::TypeAssertExpr(assert) if assert.is_type_switch());
                this.expr(&tag);
            }

            for clause in stmt.clauses() {
                this.in_scope(|this| {
                    let mut case_types = Vec::new();
                    for value in clause.values().iter().flat_map(|list| list.exprs()) {
                        if type_switch {
                            let ty = this.as_type(&value, true);
                            if ty.is_none() {
                                this.expr(&value);
                            }
                            case_types.push(ty);
                        } else {
                            this.expr(&value);
                        }
                    }
                    if let Some((name, subject)) = &binding {
                        // The clause variable takes the case type when exactly one is listed.
                        let ty = match case_types.as_slice() {
                            [Some(ty)] => Some(ty.clone()),
                            _ => subject.clone(),
                        };
                        let id = this.info.alloc(Object::new(name.clone(), ObjectKind::Var, ty));
                        this.scopes.insert(this.scope, name, id);
                    }
                    for stmt in clause.stmts() {
                        this.stmt(&stmt);
                    }
                });
            }
        });
    }
}

/// Name of the type a method is declared on: `T` for both `(t T)` and `(t *T)`.
fn receiver_base(recv: &ast::Receiver) -> Option<String> {
    Some(receiver_type_name(recv)?.name_token()?.text().to_string())
}

fn receiver_type_name(recv: &ast::Receiver) -> Option<ast::TypeName> {
    let mut ty = recv.param()?.ty()?;
    loop {
        match ty {
            ast::TypeRef::PointerType(ptr) => ty = ptr.elem()?,
            ast::TypeRef::TypeName(name) if name.qualifier().is_none() => return Some(name),
            _ => return None,
        }
    }
}

/// Identifiers in the type argument list of a receiver type.
fn receiver_type_params(recv: &ast::Receiver) -> Vec<SyntaxToken> {
    let Some(args) = receiver_type_name(recv).and_then(|name| name.type_args()) else {
        return Vec::new();
    };
    args.types()
        .filter_map(|ty| match ty {
            ast::TypeRef::TypeName(name) if name.qualifier().is_none() => name.name_token(),
            _ => None,
        })
        .collect()
}

fn is_blank(expr: &ast::Expr) -> bool {
    matches!(expr, ast::Expr::NameRef(name) if name.text() == "_")
}

/// Expressions that yield an extra `bool` when assigned to two names.
fn is_comma_ok(expr: &ast::Expr) -> bool {
    match expr {
        ast::Expr::ParenExpr(paren) => paren.expr().is_some_and(|inner| is_comma_ok(&inner)),
        ast::Expr::IndexExpr(_) => true,
        ast::Expr::TypeAssertExpr(assert) => !assert.is_type_switch(),
        ast::Expr::UnaryExpr(unary) => unary.op_kind() == Some(tern_syntax::SyntaxKind::Arrow),
        _ => false,
    }
}
