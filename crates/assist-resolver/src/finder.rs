//! Offset-to-context resolution.
//!
//! [`CompletionNodeFinder`] walks the tree once in the order fixed by
//! [`DepthFirstVisitor`]. Each override descends first and then tests whether
//! the caret falls in the part of its node no child claimed. The first rule that
//! fires breaks out of the walk with the finished context.
use std::ops::ControlFlow;

use assist_core::ir::*;
use assist_core::visit::{
    DepthFirstVisitor, walk_annotation, walk_annotation_constant, walk_array, walk_binary,
    walk_block, walk_cast, walk_catch, walk_class, walk_class_expr, walk_closure,
    walk_constructor_call, walk_declaration, walk_expression_stmt, walk_field,
    walk_field_access, walk_for, walk_for_in, walk_list_expr, walk_map, walk_map_entry,
    walk_method, walk_method_call, walk_parameter, walk_property, walk_property_expr,
    walk_range, walk_static_method_call,
};
use assist_core::ProgramTree;
use smallvec::SmallVec;

use crate::context::{Anchor, ContentAssistContext, MethodInfo};
use crate::location::LocationKind;
use crate::request::CompletionRequest;

/// Why the walk stopped early.
pub enum Resolution<'t> {
    Found(Box<ContentAssistContext<'t>>),
    /// The caret is somewhere nothing can be proposed, such as inside a string.
    NoCompletion,
}

type Flow<'t> = ControlFlow<Resolution<'t>>;

/// Cursor state for one resolution. Build a fresh finder per request.
pub struct CompletionNodeFinder<'t, 'r> {
    tree: &'t ProgramTree,
    request: &'r CompletionRequest,
    /// Innermost container whose children are being visited is last.
    block_stack: SmallVec<[NodeId; 16]>,
    declaration_stack: SmallVec<[NodeId; 8]>,
    /// Argument tuples of the calls being descended into.
    argument_list_stack: SmallVec<[NodeId; 4]>,
    lhs: Option<NodeId>,
}

impl<'t, 'r> CompletionNodeFinder<'t, 'r> {
    pub fn new(tree: &'t ProgramTree, request: &'r CompletionRequest) -> Self {
        Self {
            tree,
            request,
            block_stack: SmallVec::new(),
            declaration_stack: SmallVec::new(),
            argument_list_stack: SmallVec::new(),
            lhs: None,
        }
    }

    /// Walk from the module root and return the context of the first rule that fires.
    pub fn find(mut self) -> Option<ContentAssistContext<'t>> {
        let root = self.tree.root();
        if self.tree.get(root).is_none() {
            tracing::debug!("tree has no root node {}", root);
            return None;
        }
        match self.visit_node(root) {
            ControlFlow::Break(Resolution::Found(context)) => {
                tracing::trace!(
                    "resolved offset {} to {} at {:?}",
                    self.request.completion_offset,
                    context.location(),
                    context.completion_node()
                );
                Some(*context)
            }
            ControlFlow::Break(Resolution::NoCompletion) => None,
            ControlFlow::Continue(()) => {
                tracing::trace!("no rule matched offset {}", self.request.completion_offset);
                None
            }
        }
    }

    // -----------------------------------------------------------------------
    // cursor state
    // -----------------------------------------------------------------------

    fn with_block<R>(&mut self, id: NodeId, f: impl FnOnce(&mut Self) -> R) -> R {
        self.block_stack.push(id);
        let result = f(self);
        self.block_stack.pop();
        result
    }

    fn with_declaration<R>(&mut self, id: NodeId, f: impl FnOnce(&mut Self) -> R) -> R {
        self.declaration_stack.push(id);
        let result = f(self);
        self.declaration_stack.pop();
        result
    }

    fn with_lhs<R>(&mut self, lhs: Option<NodeId>, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = std::mem::replace(&mut self.lhs, lhs);
        let result = f(self);
        self.lhs = saved;
        result
    }

    fn block(&self) -> Option<NodeId> {
        self.block_stack.last().copied()
    }

    fn declaration(&self) -> Option<NodeId> {
        self.declaration_stack.last().copied()
    }

    // -----------------------------------------------------------------------
    // offsets
    // -----------------------------------------------------------------------

    fn offset(&self) -> usize {
        self.request.completion_offset
    }

    fn supporting(&self) -> usize {
        self.request.supporting_end()
    }

    fn span(&self, id: NodeId) -> Span {
        self.tree.span(id)
    }

    /// The caret or the supporting end lies in `(start, end]` of a real node.
    fn matches(&self, id: NodeId) -> bool {
        let span = self.span(id);
        if span.is_synthetic() {
            return false;
        }
        let within = |at: usize| at > span.start && at <= span.end;
        within(self.offset()) || within(self.supporting())
    }

    /// Caret strictly after the start and at or before the end, ignoring the
    /// supporting end.
    fn caret_within(&self, id: NodeId) -> bool {
        let span = self.span(id);
        self.offset() > span.start && self.offset() <= span.end
    }

    /// `off <= start || end < off`: the caret is outside the node.
    fn caret_outside(&self, id: NodeId) -> bool {
        let span = self.span(id);
        self.offset() <= span.start || span.end < self.offset()
    }

    /// [`matches`](Self::matches) for a type reference. A type the caret is not
    /// in still has its type arguments checked.
    fn check_type(&mut self, id: Option<NodeId>) -> ControlFlow<Resolution<'t>, bool> {
        let Some(id) = id else {
            return ControlFlow::Continue(false);
        };
        if self.matches(id) {
            return ControlFlow::Continue(true);
        }
        if !self.span(id).is_synthetic() {
            if let Node::TypeRef(type_ref) = self.tree.node(id) {
                if !type_ref.generics.is_empty() {
                    self.visit_generics(&type_ref.generics, id)?;
                }
            }
        }
        ControlFlow::Continue(false)
    }

    fn expression_or_statement(&self) -> LocationKind {
        match self.request.supporting_node_end {
            None => LocationKind::Statement,
            Some(_) => LocationKind::Expression,
        }
    }

    fn expression_or_script(&self) -> LocationKind {
        match self.request.supporting_node_end {
            None => LocationKind::Script,
            Some(_) => LocationKind::Expression,
        }
    }

    // -----------------------------------------------------------------------
    // results
    // -----------------------------------------------------------------------

    fn found(
        &self,
        completion_node: Option<NodeId>,
        containing_code_block: Option<NodeId>,
        location: LocationKind,
    ) -> Flow<'t> {
        let anchor = Anchor {
            completion_node,
            containing_code_block,
            containing_declaration: self.declaration(),
            lhs_node: self.lhs,
        };
        ControlFlow::Break(Resolution::Found(Box::new(ContentAssistContext::new(
            self.tree,
            self.request,
            anchor,
            location,
            None,
        ))))
    }

    /// Signature help for the call `expression`, whose callee is named by
    /// `method_expression` and ends at `method_name_end`.
    fn found_call(
        &self,
        expression: NodeId,
        method_expression: NodeId,
        method_name: &str,
        method_name_end: usize,
    ) -> Flow<'t> {
        let anchor = Anchor {
            completion_node: Some(expression),
            containing_code_block: self.block(),
            containing_declaration: self.declaration(),
            lhs_node: self.lhs,
        };
        let info = MethodInfo {
            method_expression,
            method_name: method_name.to_string(),
            method_name_end,
        };
        ControlFlow::Break(Resolution::Found(Box::new(ContentAssistContext::new(
            self.tree,
            self.request,
            anchor,
            LocationKind::MethodContext,
            Some(info),
        ))))
    }

    // -----------------------------------------------------------------------
    // shared sub-walks
    // -----------------------------------------------------------------------

    /// Visit call arguments unless the caret sits right at the start of one, in
    /// which case the call itself answers with signature help.
    fn visit_arguments(&mut self, arguments: NodeId) -> Flow<'t> {
        let offset = self.offset();
        let tuple = match self.tree.node(arguments) {
            Node::ArgumentList(list) => Some(list),
            _ => None,
        };
        let at_argument_start = match tuple {
            Some(list) => list.items.iter().any(|item| self.span(*item).start == offset),
            None => self.span(arguments).start == offset,
        };

        if tuple.is_some() {
            self.argument_list_stack.push(arguments);
        }
        let flow = if at_argument_start {
            ControlFlow::Continue(())
        } else {
            // the outer receiver means nothing inside an argument list
            self.with_lhs(None, |this| this.visit_node(arguments))
        };
        if tuple.is_some() {
            self.argument_list_stack.pop();
        }
        flow
    }

    /// Type arguments of `node`, for a caret between the first `<` and last `>`.
    fn visit_generics(&mut self, generics: &[NodeId], node: NodeId) -> Flow<'t> {
        let (Some(first), Some(last)) = (generics.first(), generics.last()) else {
            return ControlFlow::Continue(());
        };
        let (first, last) = (self.span(*first), self.span(*last));
        let offset = self.offset();
        if first.is_synthetic() || last.is_synthetic() || offset < first.start || offset > last.end {
            return ControlFlow::Continue(());
        }

        for gt_id in generics {
            let span = self.span(*gt_id);
            if span.is_synthetic() || offset < span.start || offset > span.end {
                continue;
            }
            if let Node::GenericsType(gt) = self.tree.node(*gt_id) {
                if !gt.is_placeholder && self.check_type(gt.type_ref)? {
                    return self.found(gt.type_ref, Some(node), LocationKind::Generics);
                }
                if self.check_type(gt.lower_bound)? {
                    return self.found(gt.lower_bound, Some(node), LocationKind::Generics);
                }
                for bound in &gt.upper_bounds {
                    if self.check_type(Some(*bound))? {
                        return self.found(Some(*bound), Some(node), LocationKind::Generics);
                    }
                }
            }
            return self.found(Some(*gt_id), Some(node), LocationKind::Generics);
        }
        self.found(None, Some(node), LocationKind::Generics)
    }

    /// `foo(a) b|` parses as `foo(a).b`: a call with arguments followed by a
    /// bare name. Completing on the name completes on the call's result.
    fn check_for_command_expression(&self, left: NodeId, right: NodeId) -> Flow<'t> {
        let has_arguments = match self.tree.node(left) {
            Node::MethodCall(call) => matches!(
                self.tree.node(call.arguments),
                Node::ArgumentList(list) if !list.items.is_empty()
            ),
            _ => false,
        };
        if !has_arguments {
            return ControlFlow::Continue(());
        }
        match self.left_most(right) {
            Some(left_most)
                if self.tree.kind(left_most) == NodeKind::Constant && self.matches(left_most) =>
            {
                self.found(Some(left), self.block(), LocationKind::Expression)
            }
            _ => ControlFlow::Continue(()),
        }
    }

    fn left_most(&self, id: NodeId) -> Option<NodeId> {
        match self.tree.node(id) {
            Node::Constant(_) => Some(id),
            Node::PropertyExpr(p) | Node::Attribute(p) => self.left_most(p.object),
            Node::MethodCall(call) => self.left_most(call.object),
            Node::Binary(binary) => self.left_most(binary.left),
            _ => None,
        }
    }

    fn right_most(&self, id: NodeId) -> Option<NodeId> {
        match self.tree.node(id) {
            Node::Variable(_) | Node::Constant(_) => Some(id),
            Node::PropertyExpr(p) | Node::Attribute(p) => self.right_most(p.property),
            Node::Binary(binary) => self.right_most(binary.right),
            _ => None,
        }
    }

    /// Source text a call context reports for a plain reference.
    fn reference_text(&self, id: NodeId) -> &'t str {
        match self.tree.node(id) {
            Node::Variable(var) => &var.name,
            Node::Constant(constant) => &constant.text,
            _ => "",
        }
    }

    /// Is `expr` one of the arguments of the innermost call being visited,
    /// directly or as an entry of its named-argument map?
    fn is_argument(&self, expr: NodeId) -> bool {
        let Some(top) = self.argument_list_stack.last() else {
            return false;
        };
        match self.tree.node(*top) {
            Node::ArgumentList(list) => self.is_argument_in(expr, &list.items),
            _ => false,
        }
    }

    fn is_argument_in(&self, expr: NodeId, args: &[NodeId]) -> bool {
        for arg in args {
            if *arg == expr {
                return true;
            }
            if let Node::NamedArgumentList(named) = self.tree.node(*arg) {
                return self.is_argument_in(expr, &named.entries);
            }
        }
        false
    }

    /// Assignment-shaped expressions: the left side is pending while the right
    /// side is visited. A caret past the left side with nothing assigned yet
    /// completes the right side.
    fn visit_assignment(
        &mut self,
        id: NodeId,
        left: NodeId,
        right: NodeId,
        walk: impl FnOnce(&mut Self) -> Flow<'t>,
    ) -> Flow<'t> {
        self.with_lhs(Some(left), |this| {
            walk(this)?;
            let nothing_assigned =
                this.span(right).is_synthetic() || this.tree.kind(right) == NodeKind::EmptyExpr;
            if nothing_assigned && this.matches(id) && this.offset() > this.span(left).end {
                return this.found(Some(id), this.block(), this.expression_or_statement());
            }
            ControlFlow::Continue(())
        })
    }

    /// Type a constructor call instantiates, as the user perceives it.
    fn constructor_type(&self, call: &ConstructorCallExpr) -> Option<NodeId> {
        match call.special {
            Some(special) => {
                let enclosing = self.declaration()?;
                let class = match self.tree.kind(enclosing) {
                    NodeKind::Class => Some(enclosing),
                    _ => self.tree.declaring_class(enclosing),
                }?;
                match special {
                    SpecialCall::This => Some(class),
                    SpecialCall::Super => self.tree.class(class)?.super_class,
                }
            }
            None => {
                let Some(anonymous) = call.anonymous_class.and_then(|id| self.tree.class(id)) else {
                    return Some(call.type_ref);
                };
                let super_class = anonymous
                    .super_class
                    .filter(|id| !self.tree.type_ref(*id).is_some_and(|t| t.is_object()));
                super_class
                    .or_else(|| anonymous.interfaces.first().copied())
                    .or(Some(call.type_ref))
            }
        }
    }

    fn type_generics(&self, id: NodeId) -> &'t [NodeId] {
        match self.tree.node(id) {
            Node::TypeRef(type_ref) => &type_ref.generics,
            Node::Class(class) => &class.generics,
            _ => &[],
        }
    }
}

impl<'t> DepthFirstVisitor<'t> for CompletionNodeFinder<'t, '_> {
    type Break = Resolution<'t>;

    fn tree(&self) -> &'t ProgramTree {
        self.tree
    }

    // -----------------------------------------------------------------------
    // declarations
    // -----------------------------------------------------------------------

    fn visit_package(&mut self, id: NodeId, package: &'t PackageNode) -> Flow<'t> {
        self.with_declaration(id, |this| {
            this.visit_list(&package.annotations)?;
            if this.matches(id) {
                return this.found(None, Some(id), LocationKind::Package);
            }
            ControlFlow::Continue(())
        })
    }

    fn visit_import(&mut self, id: NodeId, import: &'t ImportNode) -> Flow<'t> {
        self.with_declaration(id, |this| {
            this.visit_list(&import.annotations)?;
            if this.matches(id) {
                return this.found(None, Some(id), LocationKind::Import);
            }
            ControlFlow::Continue(())
        })
    }

    fn visit_class(&mut self, id: NodeId, class: &'t ClassNode) -> Flow<'t> {
        if self.caret_outside(id) {
            return ControlFlow::Continue(());
        }
        self.with_declaration(id, |this| {
            this.visit_generics(&class.generics, id)?;

            if this.check_type(class.super_class)? {
                return this.found(None, Some(id), LocationKind::Extends);
            }
            for interface in &class.interfaces {
                if this.check_type(Some(*interface))? {
                    return this.found(None, Some(id), LocationKind::Implements);
                }
            }

            this.with_block(id, |this| walk_class(this, id, class))?;

            // a script's top level is answered by its run-body
            if !class.flags.is_script {
                return this.found(None, Some(id), LocationKind::ClassBody);
            }
            ControlFlow::Continue(())
        })
    }

    fn visit_field(&mut self, id: NodeId, field: &'t FieldNode) -> Flow<'t> {
        if self.caret_outside(id) {
            return ControlFlow::Continue(());
        }
        let is_enum = field.flags.is_enum_constant;
        self.with_declaration(id, |this| {
            if !is_enum && this.check_type(field.type_ref)? {
                return this.found(None, field.declaring_class, LocationKind::ClassBody);
            }
            this.with_block(id, |this| walk_field(this, id, field))
        })?;

        // enum bodies and static initializers lie within the field's range but
        // belong to the class
        let rooted_elsewhere =
            field.flags.is_static && self.span(id).end > field.name_end + 1;
        if !is_enum && !rooted_elsewhere {
            return self.found(Some(id), field.declaring_class, LocationKind::ClassBody);
        }
        ControlFlow::Continue(())
    }

    fn visit_property(&mut self, id: NodeId, property: &'t PropertyNode) -> Flow<'t> {
        if self.caret_outside(id) {
            return ControlFlow::Continue(());
        }
        self.with_declaration(id, |this| {
            if this.check_type(property.type_ref)? {
                return this.found(None, property.declaring_class, LocationKind::ClassBody);
            }
            this.with_block(id, |this| walk_property(this, id, property))
        })
    }

    fn visit_method(&mut self, id: NodeId, method: &'t MethodNode) -> Flow<'t> {
        if method.flags.static_init {
            return ControlFlow::Continue(());
        }

        if method.flags.script_body {
            let Some(body) = method.body else {
                return ControlFlow::Continue(());
            };
            return self.with_declaration(id, |this| {
                this.with_block(id, |this| {
                    this.visit_node(body)?;
                    if this.span(body).is_synthetic() {
                        return ControlFlow::Continue(());
                    }
                    this.found(Some(body), Some(body), this.expression_or_script())
                })
            });
        }

        // an annotation member's default value is assigned to the member
        let lhs = if method.flags.annotation_default {
            Some(id)
        } else {
            self.lhs
        };
        self.with_lhs(lhs, |this| {
            this.with_declaration(id, |this| {
                this.visit_generics(&method.generics, id)?;

                if this.check_type(method.return_type)? {
                    return this.found(None, method.declaring_class, LocationKind::ClassBody);
                }
                for exception in &method.exceptions {
                    if this.check_type(Some(*exception))? {
                        return this.found(None, Some(id), LocationKind::Exceptions);
                    }
                }

                this.with_block(id, |this| walk_method(this, id, method))?;

                let offset = this.offset();
                let lparen = method.name_end + 1;
                if lparen < offset && offset <= this.span(id).end {
                    match method.rparen {
                        Some(rparen) if offset <= rparen => {
                            return this.found(None, Some(id), LocationKind::Parameter);
                        }
                        _ => {
                            if let Some(body) = method.body.filter(|body| this.matches(*body)) {
                                return this.found(
                                    Some(body),
                                    Some(body),
                                    this.expression_or_statement(),
                                );
                            }
                        }
                    }
                }
                ControlFlow::Continue(())
            })
        })
    }

    fn visit_constructor(&mut self, id: NodeId, constructor: &'t MethodNode) -> Flow<'t> {
        self.visit_method(id, constructor)
    }

    fn visit_annotation(&mut self, id: NodeId, annotation: &'t AnnotationNode) -> Flow<'t> {
        let name = self.span(annotation.class_ref);
        let offset = self.offset();
        if !name.is_synthetic() && name.start <= offset && offset <= name.end {
            return self.found(Some(annotation.class_ref), Some(id), LocationKind::Annotation);
        }
        self.with_block(id, |this| {
            walk_annotation(this, id, annotation)?;
            let end = this.span(id).end;
            // annotation has a body
            if end > name.end && name.end < offset && offset < end {
                return this.found(Some(id), Some(id), LocationKind::AnnotationBody);
            }
            ControlFlow::Continue(())
        })
    }

    fn visit_parameter(&mut self, id: NodeId, parameter: &'t ParameterNode) -> Flow<'t> {
        self.with_block(id, |this| walk_parameter(this, id, parameter))?;

        let block = self.block();
        let in_catch = block.is_some_and(|block| self.tree.kind(block) == NodeKind::Catch);
        let offset = self.offset();
        let name = parameter.name_span;

        let before_name = self.matches(id) && offset < name.start;
        if self.check_type(parameter.type_ref)? || before_name {
            let location = if in_catch {
                LocationKind::Exceptions
            } else {
                LocationKind::Parameter
            };
            return self.found(Some(id), block, location);
        }

        if !name.is_synthetic() && name.start <= offset && offset <= name.end {
            // `catch (ex|)` and `catch (? ex)` still want an exception type
            let untyped = parameter
                .type_ref
                .is_none_or(|type_ref| self.span(type_ref).end < 1);
            let location = if in_catch && (parameter.name == "?" || untyped) {
                LocationKind::Exceptions
            } else {
                LocationKind::Parameter
            };
            return self.found(Some(id), block, location);
        }

        // default value expressions
        if self.matches(id) {
            return self.found(Some(id), block, self.expression_or_statement());
        }
        ControlFlow::Continue(())
    }

    fn visit_variable(&mut self, owner: NodeId, initializer: Option<NodeId>) -> Flow<'t> {
        self.with_lhs(Some(owner), |this| this.visit_opt(initializer))
    }

    // -----------------------------------------------------------------------
    // statements
    // -----------------------------------------------------------------------

    fn visit_block(&mut self, id: NodeId, block: &'t BlockStmt) -> Flow<'t> {
        self.with_block(id, |this| {
            walk_block(this, id, block)?;
            // inside this block but inside none of its statements
            if this.matches(id) {
                return this.found(Some(id), Some(id), this.expression_or_statement());
            }
            ControlFlow::Continue(())
        })
    }

    fn visit_catch(&mut self, id: NodeId, stmt: &'t CatchStmt) -> Flow<'t> {
        self.with_block(id, |this| walk_catch(this, id, stmt))
    }

    fn visit_for(&mut self, id: NodeId, stmt: &'t ForStmt) -> Flow<'t> {
        self.with_block(id, |this| walk_for(this, id, stmt))
    }

    fn visit_for_in(&mut self, id: NodeId, stmt: &'t ForInStmt) -> Flow<'t> {
        self.with_block(id, |this| walk_for_in(this, id, stmt))
    }

    /// `obj.method |`: a caret after the expression but still inside the
    /// statement completes on the right-most name.
    fn visit_expression_stmt(&mut self, id: NodeId, stmt: &'t ExpressionStmt) -> Flow<'t> {
        walk_expression_stmt(self, id, stmt)?;
        if !self.matches(id) {
            return ControlFlow::Continue(());
        }

        let expr_end = self.span(stmt.expression).end;
        let stmt_end = self.span(id).end;
        let in_gap = |at: usize| at > expr_end && at <= stmt_end;
        if !in_gap(self.offset()) && !in_gap(self.supporting()) {
            return ControlFlow::Continue(());
        }

        let target = match self.tree.kind(stmt.expression) {
            NodeKind::Variable | NodeKind::Constant => Some(stmt.expression),
            NodeKind::PropertyExpr | NodeKind::Attribute => self.right_most(stmt.expression),
            _ => None,
        };
        let Some(target) = target else {
            return ControlFlow::Continue(());
        };

        let request = self.request;
        if request.supporting_node_end.is_some_and(|end| end > 0)
            && request.full_completion_expression.ends_with('.')
            && request.completion_expression.is_empty()
        {
            return self.found(Some(target), self.block(), LocationKind::Expression);
        }
        self.found_call(target, target, self.reference_text(target), self.span(target).end)
    }

    // -----------------------------------------------------------------------
    // expressions
    // -----------------------------------------------------------------------

    fn visit_array(&mut self, id: NodeId, expr: &'t ArrayExpr) -> Flow<'t> {
        if self.matches(id) {
            return self.found(Some(id), self.block(), self.expression_or_statement());
        }
        walk_array(self, id, expr)
    }

    fn visit_binary(&mut self, id: NodeId, expr: &'t BinaryExpr) -> Flow<'t> {
        if expr.op.is_assignment() {
            return self.visit_assignment(id, expr.left, expr.right, |this| {
                walk_binary(this, id, expr)
            });
        }
        walk_binary(self, id, expr)?;
        // `list[|]`
        if expr.op == BinaryOp::Index && self.matches(id) {
            return self.found(Some(id), self.block(), self.expression_or_statement());
        }
        ControlFlow::Continue(())
    }

    fn visit_declaration(&mut self, id: NodeId, expr: &'t DeclarationExpr) -> Flow<'t> {
        self.visit_assignment(id, expr.left, expr.right, |this| walk_declaration(this, id, expr))
    }

    fn visit_cast(&mut self, id: NodeId, expr: &'t CastExpr) -> Flow<'t> {
        if self.check_type(Some(expr.type_ref))? {
            return self.found(Some(expr.type_ref), self.block(), self.expression_or_statement());
        }
        walk_cast(self, id, expr)
    }

    fn visit_class_expr(&mut self, id: NodeId, expr: &'t ClassExpr) -> Flow<'t> {
        if self.matches(id) {
            return self.found(Some(id), self.block(), self.expression_or_statement());
        }
        walk_class_expr(self, id, expr)
    }

    fn visit_field_access(&mut self, id: NodeId, expr: &'t FieldAccessExpr) -> Flow<'t> {
        if self.matches(id) {
            return self.found(Some(id), self.block(), self.expression_or_statement());
        }
        walk_field_access(self, id, expr)
    }

    fn visit_closure(&mut self, id: NodeId, expr: &'t ClosureExpr) -> Flow<'t> {
        self.with_block(id, |this| walk_closure(this, id, expr))?;
        // the code block may end at its last statement rather than at `}`
        if self.matches(id) {
            return self.found(Some(id), Some(expr.code), self.expression_or_statement());
        }
        ControlFlow::Continue(())
    }

    fn visit_constant(&mut self, id: NodeId, expr: &'t ConstantExpr) -> Flow<'t> {
        if self.caret_within(id) {
            if expr.is_string_literal(self.span(id)) {
                tracing::trace!("offset {} is inside string literal {}", self.offset(), id);
                return ControlFlow::Break(Resolution::NoCompletion);
            }
            return self.found(Some(id), self.block(), self.expression_or_statement());
        }
        ControlFlow::Continue(())
    }

    /// `@interface X { Y value() default @Y(...) }`
    fn visit_annotation_constant(&mut self, id: NodeId, expr: &'t AnnotationConstantExpr) -> Flow<'t> {
        walk_annotation_constant(self, id, expr)?;
        let class_ref = match self.tree.node(expr.annotation) {
            Node::Annotation(annotation) => Some(annotation.class_ref),
            _ => None,
        };
        if self.check_type(class_ref)? {
            return self.found(Some(id), self.block(), LocationKind::Annotation);
        }
        if self.caret_within(id) {
            return self.found(Some(id), self.block(), self.expression_or_statement());
        }
        ControlFlow::Continue(())
    }

    fn visit_constructor_call(&mut self, id: NodeId, expr: &'t ConstructorCallExpr) -> Flow<'t> {
        let end = self.span(id).end;
        // `new Type().|`
        if self.supporting() > 0 && self.supporting() == end {
            return self.found(Some(id), self.block(), LocationKind::Expression);
        }
        if self.caret_outside(id) {
            return walk_constructor_call(self, id, expr);
        }

        self.visit_list(&expr.annotations)?;

        let offset = self.offset();
        if offset <= expr.name_start {
            return self.found(Some(id), self.block(), self.expression_or_statement());
        }

        let constructor_type = self.constructor_type(expr);
        if offset <= expr.name_end + 1 {
            return self.found(constructor_type, self.block(), LocationKind::Constructor);
        }

        if let Some(ty) = constructor_type {
            let generics = self.type_generics(ty);
            self.visit_generics(generics, id)?;
        }
        self.visit_arguments(expr.arguments)?;
        self.visit_opt(expr.anonymous_class)?;

        // `new Type()|`
        if self.request.completion_end > self.span(expr.arguments).end {
            return self.found(Some(id), self.block(), LocationKind::Statement);
        }
        // at a paren, a comma, or the start of an argument
        let name = constructor_type
            .and_then(|ty| self.tree.simple_type_name(ty))
            .unwrap_or_default();
        self.found_call(id, constructor_type.unwrap_or(id), name, expr.name_end + 1)
    }

    fn visit_gstring(&mut self, _id: NodeId, expr: &'t GStringExpr) -> Flow<'t> {
        self.visit_list(&expr.values)?;
        if expr.strings.iter().any(|part| self.matches(*part)) {
            tracing::trace!("offset {} is inside string text", self.offset());
            return ControlFlow::Break(Resolution::NoCompletion);
        }
        ControlFlow::Continue(())
    }

    fn visit_list_expr(&mut self, id: NodeId, expr: &'t ListExpr) -> Flow<'t> {
        walk_list_expr(self, id, expr)?;
        // `[]._` or `[10]._`
        if self.matches(id) {
            return self.found(Some(id), self.declaration(), LocationKind::Expression);
        }
        ControlFlow::Continue(())
    }

    fn visit_map(&mut self, id: NodeId, expr: &'t MapExpr) -> Flow<'t> {
        walk_map(self, id, expr)?;
        // a named-argument map is answered by its call
        if self.matches(id) && !self.is_argument(id) {
            return self.found(Some(id), self.declaration(), LocationKind::Expression);
        }
        ControlFlow::Continue(())
    }

    fn visit_map_entry(&mut self, id: NodeId, expr: &'t MapEntryExpr) -> Flow<'t> {
        // value of a named argument: the key is what is being assigned
        if self.matches(expr.value) && self.is_argument(id) {
            return self.with_lhs(Some(expr.key), |this| walk_map_entry(this, id, expr));
        }
        walk_map_entry(self, id, expr)
    }

    fn visit_method_call(&mut self, id: NodeId, expr: &'t MethodCallExpr) -> Flow<'t> {
        // `method().|`
        if self.supporting() > 0 && self.supporting() == self.span(id).end {
            return self.found(Some(id), self.block(), LocationKind::Expression);
        }
        if self.caret_outside(id) {
            return walk_method_call(self, id, expr);
        }

        self.visit_list(&expr.annotations)?;
        self.check_for_command_expression(expr.object, expr.method)?;
        self.visit_node(expr.object)?;

        let offset = self.offset();
        if self.span(expr.object).end < offset && offset <= self.span(expr.method).start {
            self.visit_generics(&expr.generics, id)?;
            // `foo.\nbar()`: completing after the dot
            return self.found(Some(expr.object), self.block(), LocationKind::Expression);
        }

        self.visit_node(expr.method)?;
        self.visit_arguments(expr.arguments)?;

        // `method()|`
        if self.request.completion_end > self.span(expr.arguments).end {
            return self.found(Some(id), self.block(), LocationKind::Statement);
        }
        let name = match self.tree.node(expr.method) {
            Node::Constant(constant) => constant.text.as_str(),
            _ => "",
        };
        self.found_call(id, expr.method, name, self.span(expr.method).end)
    }

    fn visit_property_expr(&mut self, id: NodeId, expr: &'t PropertyExpr) -> Flow<'t> {
        if !self.matches(id) {
            return ControlFlow::Continue(());
        }
        self.check_for_command_expression(expr.object, expr.property)?;

        let offset = self.offset();
        if offset > self.span(expr.object).end && offset < self.span(expr.property).start {
            // `foo.\nbar`: completing after the dot
            return self.found(Some(expr.object), self.block(), LocationKind::Expression);
        }

        walk_property_expr(self, id, expr)?;
        self.found(Some(id), self.block(), LocationKind::Expression)
    }

    fn visit_range(&mut self, id: NodeId, expr: &'t RangeExpr) -> Flow<'t> {
        walk_range(self, id, expr)?;
        if self.caret_within(id) {
            let offset = self.offset();
            if offset <= self.span(expr.from).end || offset >= self.span(expr.to).start {
                return self.found(Some(id), self.block(), LocationKind::Statement);
            }
            // `1..|5`: inside the operator
            return ControlFlow::Break(Resolution::NoCompletion);
        }
        ControlFlow::Continue(())
    }

    fn visit_static_method_call(&mut self, id: NodeId, expr: &'t StaticMethodCallExpr) -> Flow<'t> {
        if self.supporting() > 0 && self.supporting() == self.span(id).end {
            return self.found(Some(id), self.block(), LocationKind::Expression);
        }
        if self.caret_outside(id) {
            return walk_static_method_call(self, id, expr);
        }

        self.visit_list(&expr.annotations)?;

        let offset = self.offset();
        if expr.name_start < offset && offset <= expr.name_end + 1 {
            return self.found(Some(id), self.block(), LocationKind::Statement);
        }

        self.visit_arguments(expr.arguments)?;
        if self.request.completion_end > self.span(expr.arguments).end {
            return self.found(Some(id), self.block(), LocationKind::Statement);
        }
        self.found_call(id, id, &expr.method, expr.name_end + 1)
    }

    fn visit_variable_expr(&mut self, id: NodeId, expr: &'t VariableExpr) -> Flow<'t> {
        self.visit_list(&expr.annotations)?;
        if expr.is_declaration && self.check_type(expr.origin_type)? {
            return self.found(expr.origin_type, self.block(), self.expression_or_statement());
        }
        if self.matches(id) {
            let in_annotation = self
                .block()
                .is_some_and(|block| self.tree.kind(block) == NodeKind::Annotation);
            let location = if in_annotation {
                LocationKind::AnnotationBody
            } else if self.request.supporting_node_end.is_none() {
                LocationKind::Statement
            } else {
                LocationKind::Expression
            };
            return self.found(Some(id), self.block(), location);
        }
        ControlFlow::Continue(())
    }
}
