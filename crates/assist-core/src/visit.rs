//! Depth-first traversal of the program tree.
//!
//! `DepthFirstVisitor` fixes, once, the order in which the children of every
//! node kind are visited. Consumers override the `visit_*` methods they care
//! about and call the matching free `walk_*` function to continue with the
//! default traversal, in the style of `syn::visit`.
//!
//! # Traversal order
//!
//! - module: package, imports, static imports, every non-anonymous class, and
//!   the script run-body last;
//! - class: annotations, static initializer statements (not for enums),
//!   instance initializers, members (`visit_class_contents`), trait members,
//!   non-synthetic non-anonymous inner classes;
//! - field: annotations, transform annotations, initializer, lazy accessor
//!   body, enum constant initializer;
//! - method and constructor: annotations, parameters, body;
//! - statements and expressions: natural source order. After an expression is
//!   visited, the expression it was rewritten from (if any) is visited too.
//!
//! # Early exit
//!
//! Every method returns `ControlFlow<Self::Break>`. Returning `Break` unwinds
//! the whole walk through `?`, which is how a visitor reports "found it".
//!
//! ```ignore
//! struct FirstCall<'t> {
//!     tree: &'t ProgramTree,
//! }
//!
//! impl<'t> DepthFirstVisitor<'t> for FirstCall<'t> {
//!     type Break = NodeId;
//!
//!     fn tree(&self) -> &'t ProgramTree {
//!         self.tree
//!     }
//!
//!     fn visit_method_call(&mut self, id: NodeId, _call: &'t MethodCallExpr) -> ControlFlow<NodeId> {
//!         ControlFlow::Break(id)
//!     }
//! }
//! ```

use std::ops::ControlFlow;

use crate::ir::*;
use crate::tree::ProgramTree;

pub trait DepthFirstVisitor<'t> {
    type Break;

    fn tree(&self) -> &'t ProgramTree;

    // -------------------------------------------------------------------
    // helpers
    // -------------------------------------------------------------------

    fn visit_list(&mut self, ids: &[NodeId]) -> ControlFlow<Self::Break> {
        for id in ids {
            self.visit_node(*id)?;
        }
        ControlFlow::Continue(())
    }

    fn visit_opt(&mut self, id: Option<NodeId>) -> ControlFlow<Self::Break> {
        match id {
            Some(id) => self.visit_node(id),
            None => ControlFlow::Continue(()),
        }
    }

    fn visit_node(&mut self, id: NodeId) -> ControlFlow<Self::Break> {
        walk_node(self, id)
    }

    /// Entry point for every expression; visits the rewritten-from original too.
    fn visit_expression(&mut self, id: NodeId) -> ControlFlow<Self::Break> {
        walk_expression(self, id)
    }

    /// A variable-like declaration (field, property, parameter, annotation
    /// member) together with its initializer.
    fn visit_variable(&mut self, _owner: NodeId, initializer: Option<NodeId>) -> ControlFlow<Self::Break> {
        self.visit_opt(initializer)
    }

    // -------------------------------------------------------------------
    // declarations
    // -------------------------------------------------------------------

    fn visit_module(&mut self, id: NodeId, module: &'t ModuleNode) -> ControlFlow<Self::Break> {
        walk_module(self, id, module)
    }

    fn visit_package(&mut self, id: NodeId, package: &'t PackageNode) -> ControlFlow<Self::Break> {
        walk_package(self, id, package)
    }

    fn visit_import(&mut self, id: NodeId, import: &'t ImportNode) -> ControlFlow<Self::Break> {
        walk_import(self, id, import)
    }

    fn visit_class(&mut self, id: NodeId, class: &'t ClassNode) -> ControlFlow<Self::Break> {
        walk_class(self, id, class)
    }

    /// Declared members of a class: properties, fields, constructors, methods.
    fn visit_class_contents(&mut self, id: NodeId, class: &'t ClassNode) -> ControlFlow<Self::Break> {
        walk_class_contents(self, id, class)
    }

    fn visit_field(&mut self, id: NodeId, field: &'t FieldNode) -> ControlFlow<Self::Break> {
        walk_field(self, id, field)
    }

    fn visit_property(&mut self, id: NodeId, property: &'t PropertyNode) -> ControlFlow<Self::Break> {
        walk_property(self, id, property)
    }

    fn visit_method(&mut self, id: NodeId, method: &'t MethodNode) -> ControlFlow<Self::Break> {
        walk_method(self, id, method)
    }

    fn visit_constructor(&mut self, id: NodeId, method: &'t MethodNode) -> ControlFlow<Self::Break> {
        walk_method(self, id, method)
    }

    fn visit_parameter(&mut self, id: NodeId, parameter: &'t ParameterNode) -> ControlFlow<Self::Break> {
        walk_parameter(self, id, parameter)
    }

    fn visit_annotation(&mut self, id: NodeId, annotation: &'t AnnotationNode) -> ControlFlow<Self::Break> {
        walk_annotation(self, id, annotation)
    }

    fn visit_annotation_member(
        &mut self,
        id: NodeId,
        member: &'t AnnotationMemberNode,
    ) -> ControlFlow<Self::Break> {
        self.visit_variable(id, Some(member.value))
    }

    // -------------------------------------------------------------------
    // statements
    // -------------------------------------------------------------------

    fn visit_block(&mut self, id: NodeId, block: &'t BlockStmt) -> ControlFlow<Self::Break> {
        walk_block(self, id, block)
    }

    fn visit_expression_stmt(&mut self, id: NodeId, stmt: &'t ExpressionStmt) -> ControlFlow<Self::Break> {
        walk_expression_stmt(self, id, stmt)
    }

    fn visit_return(&mut self, id: NodeId, stmt: &'t ReturnStmt) -> ControlFlow<Self::Break> {
        walk_return(self, id, stmt)
    }

    fn visit_if(&mut self, id: NodeId, stmt: &'t IfStmt) -> ControlFlow<Self::Break> {
        walk_if(self, id, stmt)
    }

    fn visit_for(&mut self, id: NodeId, stmt: &'t ForStmt) -> ControlFlow<Self::Break> {
        walk_for(self, id, stmt)
    }

    fn visit_for_in(&mut self, id: NodeId, stmt: &'t ForInStmt) -> ControlFlow<Self::Break> {
        walk_for_in(self, id, stmt)
    }

    fn visit_while(&mut self, id: NodeId, stmt: &'t WhileStmt) -> ControlFlow<Self::Break> {
        walk_while(self, id, stmt)
    }

    fn visit_do_while(&mut self, id: NodeId, stmt: &'t WhileStmt) -> ControlFlow<Self::Break> {
        walk_do_while(self, id, stmt)
    }

    fn visit_try(&mut self, id: NodeId, stmt: &'t TryStmt) -> ControlFlow<Self::Break> {
        walk_try(self, id, stmt)
    }

    fn visit_catch(&mut self, id: NodeId, stmt: &'t CatchStmt) -> ControlFlow<Self::Break> {
        walk_catch(self, id, stmt)
    }

    fn visit_switch(&mut self, id: NodeId, stmt: &'t SwitchStmt) -> ControlFlow<Self::Break> {
        walk_switch(self, id, stmt)
    }

    fn visit_case(&mut self, id: NodeId, stmt: &'t CaseStmt) -> ControlFlow<Self::Break> {
        walk_case(self, id, stmt)
    }

    fn visit_throw(&mut self, id: NodeId, stmt: &'t ThrowStmt) -> ControlFlow<Self::Break> {
        walk_throw(self, id, stmt)
    }

    fn visit_synchronized(&mut self, id: NodeId, stmt: &'t SynchronizedStmt) -> ControlFlow<Self::Break> {
        walk_synchronized(self, id, stmt)
    }

    fn visit_assert(&mut self, id: NodeId, stmt: &'t AssertStmt) -> ControlFlow<Self::Break> {
        walk_assert(self, id, stmt)
    }

    fn visit_labeled(&mut self, id: NodeId, stmt: &'t LabeledStmt) -> ControlFlow<Self::Break> {
        walk_labeled(self, id, stmt)
    }

    // -------------------------------------------------------------------
    // expressions
    // -------------------------------------------------------------------

    fn visit_variable_expr(&mut self, id: NodeId, expr: &'t VariableExpr) -> ControlFlow<Self::Break> {
        walk_variable_expr(self, id, expr)
    }

    fn visit_constant(&mut self, id: NodeId, expr: &'t ConstantExpr) -> ControlFlow<Self::Break> {
        walk_constant(self, id, expr)
    }

    fn visit_annotation_constant(&mut self, id: NodeId, expr: &'t AnnotationConstantExpr) -> ControlFlow<Self::Break> {
        walk_annotation_constant(self, id, expr)
    }

    fn visit_property_expr(&mut self, id: NodeId, expr: &'t PropertyExpr) -> ControlFlow<Self::Break> {
        walk_property_expr(self, id, expr)
    }

    fn visit_attribute(&mut self, id: NodeId, expr: &'t PropertyExpr) -> ControlFlow<Self::Break> {
        self.visit_property_expr(id, expr)
    }

    fn visit_field_access(&mut self, id: NodeId, expr: &'t FieldAccessExpr) -> ControlFlow<Self::Break> {
        walk_field_access(self, id, expr)
    }

    fn visit_method_call(&mut self, id: NodeId, expr: &'t MethodCallExpr) -> ControlFlow<Self::Break> {
        walk_method_call(self, id, expr)
    }

    fn visit_static_method_call(&mut self, id: NodeId, expr: &'t StaticMethodCallExpr) -> ControlFlow<Self::Break> {
        walk_static_method_call(self, id, expr)
    }

    fn visit_constructor_call(&mut self, id: NodeId, expr: &'t ConstructorCallExpr) -> ControlFlow<Self::Break> {
        walk_constructor_call(self, id, expr)
    }

    fn visit_binary(&mut self, id: NodeId, expr: &'t BinaryExpr) -> ControlFlow<Self::Break> {
        walk_binary(self, id, expr)
    }

    fn visit_declaration(&mut self, id: NodeId, expr: &'t DeclarationExpr) -> ControlFlow<Self::Break> {
        walk_declaration(self, id, expr)
    }

    fn visit_ternary(&mut self, id: NodeId, expr: &'t TernaryExpr) -> ControlFlow<Self::Break> {
        walk_ternary(self, id, expr)
    }

    fn visit_elvis(&mut self, id: NodeId, expr: &'t ElvisExpr) -> ControlFlow<Self::Break> {
        walk_elvis(self, id, expr)
    }

    /// `!x`, `-x`, `+x`, `~x`, `*x`, `*:x` and boolean wrappers.
    fn visit_unary(&mut self, id: NodeId, kind: NodeKind, expr: &'t UnaryExpr) -> ControlFlow<Self::Break> {
        walk_unary(self, id, kind, expr)
    }

    fn visit_increment(&mut self, id: NodeId, expr: &'t IncrementExpr) -> ControlFlow<Self::Break> {
        walk_increment(self, id, expr)
    }

    fn visit_cast(&mut self, id: NodeId, expr: &'t CastExpr) -> ControlFlow<Self::Break> {
        walk_cast(self, id, expr)
    }

    fn visit_class_expr(&mut self, id: NodeId, expr: &'t ClassExpr) -> ControlFlow<Self::Break> {
        walk_class_expr(self, id, expr)
    }

    fn visit_closure(&mut self, id: NodeId, expr: &'t ClosureExpr) -> ControlFlow<Self::Break> {
        walk_closure(self, id, expr)
    }

    fn visit_lambda(&mut self, id: NodeId, expr: &'t ClosureExpr) -> ControlFlow<Self::Break> {
        self.visit_closure(id, expr)
    }

    fn visit_list_expr(&mut self, id: NodeId, expr: &'t ListExpr) -> ControlFlow<Self::Break> {
        walk_list_expr(self, id, expr)
    }

    fn visit_argument_list(&mut self, id: NodeId, expr: &'t ListExpr) -> ControlFlow<Self::Break> {
        walk_argument_list(self, id, expr)
    }

    fn visit_map(&mut self, id: NodeId, expr: &'t MapExpr) -> ControlFlow<Self::Break> {
        walk_map(self, id, expr)
    }

    fn visit_named_argument_list(&mut self, id: NodeId, expr: &'t MapExpr) -> ControlFlow<Self::Break> {
        self.visit_map(id, expr)
    }

    fn visit_map_entry(&mut self, id: NodeId, expr: &'t MapEntryExpr) -> ControlFlow<Self::Break> {
        walk_map_entry(self, id, expr)
    }

    fn visit_gstring(&mut self, id: NodeId, expr: &'t GStringExpr) -> ControlFlow<Self::Break> {
        walk_gstring(self, id, expr)
    }

    fn visit_range(&mut self, id: NodeId, expr: &'t RangeExpr) -> ControlFlow<Self::Break> {
        walk_range(self, id, expr)
    }

    fn visit_array(&mut self, id: NodeId, expr: &'t ArrayExpr) -> ControlFlow<Self::Break> {
        walk_array(self, id, expr)
    }

    /// `obj.&name` and `obj::name`.
    fn visit_method_pointer(&mut self, id: NodeId, expr: &'t MethodPointerExpr) -> ControlFlow<Self::Break> {
        walk_method_pointer(self, id, expr)
    }
}

/// Dispatch `id` to the visit method of its kind.
pub fn walk_node<'t, V>(v: &mut V, id: NodeId) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    let tree = v.tree();
    match tree.node(id) {
        Node::Module(n) => v.visit_module(id, n),
        Node::Package(n) => v.visit_package(id, n),
        Node::Import(n) => v.visit_import(id, n),
        Node::Class(n) => v.visit_class(id, n),
        Node::Field(n) => v.visit_field(id, n),
        Node::Property(n) => v.visit_property(id, n),
        Node::Method(n) => v.visit_method(id, n),
        Node::Constructor(n) => v.visit_constructor(id, n),
        Node::Parameter(n) => v.visit_parameter(id, n),
        Node::Annotation(n) => v.visit_annotation(id, n),
        Node::AnnotationMember(n) => v.visit_annotation_member(id, n),
        // type references are inspected by their owners, never walked
        Node::GenericsType(_) | Node::TypeRef(_) => ControlFlow::Continue(()),

        Node::Block(n) => v.visit_block(id, n),
        Node::ExpressionStmt(n) => v.visit_expression_stmt(id, n),
        Node::Return(n) => v.visit_return(id, n),
        Node::If(n) => v.visit_if(id, n),
        Node::For(n) => v.visit_for(id, n),
        Node::ForIn(n) => v.visit_for_in(id, n),
        Node::While(n) => v.visit_while(id, n),
        Node::DoWhile(n) => v.visit_do_while(id, n),
        Node::Try(n) => v.visit_try(id, n),
        Node::Catch(n) => v.visit_catch(id, n),
        Node::Switch(n) => v.visit_switch(id, n),
        Node::Case(n) => v.visit_case(id, n),
        Node::Throw(n) => v.visit_throw(id, n),
        Node::Synchronized(n) => v.visit_synchronized(id, n),
        Node::Assert(n) => v.visit_assert(id, n),
        Node::Labeled(n) => v.visit_labeled(id, n),
        Node::Break(_) | Node::Continue(_) | Node::EmptyStmt => ControlFlow::Continue(()),

        _ => v.visit_expression(id),
    }
}

/// Visit expression `id` by kind, then the expression it was rewritten from.
pub fn walk_expression<'t, V>(v: &mut V, id: NodeId) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    let tree = v.tree();
    let data = tree.data(id);
    match &data.node {
        Node::Variable(n) => v.visit_variable_expr(id, n)?,
        Node::Constant(n) => v.visit_constant(id, n)?,
        Node::AnnotationConstant(n) => v.visit_annotation_constant(id, n)?,
        Node::PropertyExpr(n) => v.visit_property_expr(id, n)?,
        Node::Attribute(n) => v.visit_attribute(id, n)?,
        Node::FieldAccess(n) => v.visit_field_access(id, n)?,
        Node::MethodCall(n) => v.visit_method_call(id, n)?,
        Node::StaticMethodCall(n) => v.visit_static_method_call(id, n)?,
        Node::ConstructorCall(n) => v.visit_constructor_call(id, n)?,
        Node::Binary(n) => v.visit_binary(id, n)?,
        Node::Declaration(n) => v.visit_declaration(id, n)?,
        Node::Ternary(n) => v.visit_ternary(id, n)?,
        Node::Elvis(n) => v.visit_elvis(id, n)?,
        Node::Not(n)
        | Node::UnaryMinus(n)
        | Node::UnaryPlus(n)
        | Node::BitwiseNegation(n)
        | Node::Spread(n)
        | Node::SpreadMap(n)
        | Node::BooleanExpr(n) => v.visit_unary(id, data.node.kind(), n)?,
        Node::Prefix(n) | Node::Postfix(n) => v.visit_increment(id, n)?,
        Node::Cast(n) => v.visit_cast(id, n)?,
        Node::ClassExpr(n) => v.visit_class_expr(id, n)?,
        Node::Closure(n) => v.visit_closure(id, n)?,
        Node::Lambda(n) => v.visit_lambda(id, n)?,
        Node::List(n) => v.visit_list_expr(id, n)?,
        Node::ArgumentList(n) => v.visit_argument_list(id, n)?,
        Node::Map(n) => v.visit_map(id, n)?,
        Node::NamedArgumentList(n) => v.visit_named_argument_list(id, n)?,
        Node::MapEntry(n) => v.visit_map_entry(id, n)?,
        Node::GString(n) => v.visit_gstring(id, n)?,
        Node::Range(n) => v.visit_range(id, n)?,
        Node::Array(n) => v.visit_array(id, n)?,
        Node::MethodPointer(n) | Node::MethodReference(n) => v.visit_method_pointer(id, n)?,
        Node::EmptyExpr => {}
        // declarations and statements reach here only through a caller mistake
        _ => return walk_node(v, id),
    }
    v.visit_opt(data.original)
}

pub fn walk_module<'t, V>(v: &mut V, _id: NodeId, module: &'t ModuleNode) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    let tree = v.tree();
    v.visit_opt(module.package)?;
    v.visit_list(&module.imports)?;
    v.visit_list(&module.static_imports)?;
    for class_id in &module.classes {
        // anonymous classes are reached through their constructor call
        if tree.class(*class_id).is_some_and(|class| class.flags.is_anonymous) {
            continue;
        }
        v.visit_node(*class_id)?;
    }
    v.visit_opt(module.run_method)
}

pub fn walk_class<'t, V>(v: &mut V, id: NodeId, class: &'t ClassNode) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    let tree = v.tree();
    v.visit_list(&class.annotations)?;

    // enum constants pick their initializers out of this block one by one
    if !class.flags.is_enum {
        if let Some(body) = class
            .static_init
            .and_then(|init| tree.method(init))
            .and_then(|init| init.body)
        {
            match tree.node(body) {
                Node::Block(block) => v.visit_list(&block.statements)?,
                _ => v.visit_node(body)?,
            }
        }
    }

    v.visit_list(&class.object_initializers)?;
    v.visit_class_contents(id, class)?;
    v.visit_list(&class.trait_fields)?;
    v.visit_list(&class.trait_methods)?;

    for inner_id in &class.inner_classes {
        let skip = tree
            .class(*inner_id)
            .is_some_and(|inner| inner.flags.is_synthetic || inner.flags.is_anonymous);
        if !skip {
            v.visit_node(*inner_id)?;
        }
    }
    ControlFlow::Continue(())
}

/// Members in declaration-kind order. The script run-body and synthesized
/// static initializers are never visited from here.
pub fn walk_class_contents<'t, V>(v: &mut V, _id: NodeId, class: &'t ClassNode) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    let tree = v.tree();
    v.visit_list(&class.properties)?;
    v.visit_list(&class.fields)?;
    v.visit_list(&class.constructors)?;
    for method_id in &class.methods {
        let deferred = tree
            .method(*method_id)
            .is_some_and(|method| method.flags.script_body || method.flags.static_init);
        if !deferred {
            v.visit_node(*method_id)?;
        }
    }
    ControlFlow::Continue(())
}

pub fn walk_field<'t, V>(v: &mut V, id: NodeId, field: &'t FieldNode) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_list(&field.annotations)?;
    v.visit_list(&field.transform_annotations)?;
    v.visit_variable(id, field.initializer)?;
    v.visit_opt(field.lazy_accessor)?;
    if field.flags.is_enum_constant {
        if let Some(init) = enum_constant_initializer(v.tree(), id, field) {
            v.visit_node(init)?;
        }
    }
    ControlFlow::Continue(())
}

/// Right-hand side of the `FIELD = ...` assignment in the enum's static
/// initializer that targets `field_id`.
pub fn enum_constant_initializer(tree: &ProgramTree, field_id: NodeId, field: &FieldNode) -> Option<NodeId> {
    let class = tree.class(field.declaring_class?)?;
    let body = tree.method(class.static_init?)?.body?;
    let Node::Block(block) = tree.node(body) else {
        return None;
    };
    block.statements.iter().find_map(|stmt| {
        let Node::ExpressionStmt(stmt) = tree.node(*stmt) else {
            return None;
        };
        let Node::Binary(assign) = tree.node(stmt.expression) else {
            return None;
        };
        match tree.node(assign.left) {
            Node::FieldAccess(target) if target.field == Some(field_id) => Some(assign.right),
            _ => None,
        }
    })
}

pub fn walk_property<'t, V>(v: &mut V, id: NodeId, property: &'t PropertyNode) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_list(&property.annotations)?;
    v.visit_opt(property.getter_block)?;
    v.visit_opt(property.setter_block)?;
    v.visit_variable(id, property.initializer)
}

pub fn walk_method<'t, V>(v: &mut V, _id: NodeId, method: &'t MethodNode) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_list(&method.annotations)?;
    v.visit_list(&method.parameters)?;
    v.visit_opt(method.body)
}

pub fn walk_parameter<'t, V>(v: &mut V, id: NodeId, parameter: &'t ParameterNode) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_list(&parameter.annotations)?;
    v.visit_variable(id, parameter.default_value)
}

pub fn walk_package<'t, V>(v: &mut V, _id: NodeId, package: &'t PackageNode) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_list(&package.annotations)
}

pub fn walk_import<'t, V>(v: &mut V, _id: NodeId, import: &'t ImportNode) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_list(&import.annotations)
}

pub fn walk_annotation<'t, V>(v: &mut V, _id: NodeId, annotation: &'t AnnotationNode) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_list(&annotation.members)
}

pub fn walk_block<'t, V>(v: &mut V, _id: NodeId, block: &'t BlockStmt) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_list(&block.statements)
}

pub fn walk_expression_stmt<'t, V>(v: &mut V, _id: NodeId, stmt: &'t ExpressionStmt) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_node(stmt.expression)
}

pub fn walk_return<'t, V>(v: &mut V, _id: NodeId, stmt: &'t ReturnStmt) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_opt(stmt.expression)
}

pub fn walk_if<'t, V>(v: &mut V, _id: NodeId, stmt: &'t IfStmt) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_node(stmt.condition)?;
    v.visit_node(stmt.then_branch)?;
    v.visit_opt(stmt.else_branch)
}

pub fn walk_for<'t, V>(v: &mut V, _id: NodeId, stmt: &'t ForStmt) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_list(&stmt.init)?;
    v.visit_opt(stmt.condition)?;
    v.visit_list(&stmt.update)?;
    v.visit_node(stmt.body)
}

pub fn walk_for_in<'t, V>(v: &mut V, _id: NodeId, stmt: &'t ForInStmt) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_node(stmt.variable)?;
    v.visit_node(stmt.collection)?;
    v.visit_node(stmt.body)
}

pub fn walk_while<'t, V>(v: &mut V, _id: NodeId, stmt: &'t WhileStmt) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_node(stmt.condition)?;
    v.visit_node(stmt.body)
}

pub fn walk_do_while<'t, V>(v: &mut V, _id: NodeId, stmt: &'t WhileStmt) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_node(stmt.body)?;
    v.visit_node(stmt.condition)
}

pub fn walk_try<'t, V>(v: &mut V, _id: NodeId, stmt: &'t TryStmt) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_list(&stmt.resources)?;
    v.visit_node(stmt.body)?;
    v.visit_list(&stmt.catches)?;
    v.visit_opt(stmt.finally)
}

pub fn walk_catch<'t, V>(v: &mut V, _id: NodeId, stmt: &'t CatchStmt) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_node(stmt.parameter)?;
    v.visit_node(stmt.body)
}

pub fn walk_switch<'t, V>(v: &mut V, _id: NodeId, stmt: &'t SwitchStmt) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_node(stmt.expression)?;
    v.visit_list(&stmt.cases)?;
    v.visit_opt(stmt.default)
}

pub fn walk_case<'t, V>(v: &mut V, _id: NodeId, stmt: &'t CaseStmt) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_node(stmt.expression)?;
    v.visit_node(stmt.body)
}

pub fn walk_throw<'t, V>(v: &mut V, _id: NodeId, stmt: &'t ThrowStmt) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_node(stmt.expression)
}

pub fn walk_synchronized<'t, V>(v: &mut V, _id: NodeId, stmt: &'t SynchronizedStmt) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_node(stmt.expression)?;
    v.visit_node(stmt.body)
}

pub fn walk_assert<'t, V>(v: &mut V, _id: NodeId, stmt: &'t AssertStmt) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_node(stmt.condition)?;
    v.visit_opt(stmt.message)
}

pub fn walk_labeled<'t, V>(v: &mut V, _id: NodeId, stmt: &'t LabeledStmt) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_node(stmt.statement)
}

pub fn walk_variable_expr<'t, V>(v: &mut V, _id: NodeId, expr: &'t VariableExpr) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_list(&expr.annotations)
}

pub fn walk_constant<'t, V>(_v: &mut V, _id: NodeId, _expr: &'t ConstantExpr) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    ControlFlow::Continue(())
}

pub fn walk_annotation_constant<'t, V>(v: &mut V, _id: NodeId, expr: &'t AnnotationConstantExpr) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_node(expr.annotation)
}

pub fn walk_property_expr<'t, V>(v: &mut V, _id: NodeId, expr: &'t PropertyExpr) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_node(expr.object)?;
    v.visit_node(expr.property)
}

pub fn walk_field_access<'t, V>(_v: &mut V, _id: NodeId, _expr: &'t FieldAccessExpr) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    ControlFlow::Continue(())
}

pub fn walk_method_call<'t, V>(v: &mut V, _id: NodeId, expr: &'t MethodCallExpr) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_list(&expr.annotations)?;
    v.visit_node(expr.object)?;
    v.visit_node(expr.method)?;
    v.visit_node(expr.arguments)
}

pub fn walk_static_method_call<'t, V>(v: &mut V, _id: NodeId, expr: &'t StaticMethodCallExpr) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_list(&expr.annotations)?;
    v.visit_node(expr.arguments)
}

pub fn walk_constructor_call<'t, V>(v: &mut V, _id: NodeId, expr: &'t ConstructorCallExpr) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_list(&expr.annotations)?;
    v.visit_node(expr.arguments)?;
    v.visit_opt(expr.anonymous_class)
}

pub fn walk_binary<'t, V>(v: &mut V, _id: NodeId, expr: &'t BinaryExpr) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_node(expr.left)?;
    v.visit_node(expr.right)
}

pub fn walk_declaration<'t, V>(v: &mut V, _id: NodeId, expr: &'t DeclarationExpr) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_list(&expr.annotations)?;
    v.visit_node(expr.left)?;
    v.visit_node(expr.right)
}

pub fn walk_ternary<'t, V>(v: &mut V, _id: NodeId, expr: &'t TernaryExpr) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_node(expr.condition)?;
    v.visit_node(expr.true_expr)?;
    v.visit_node(expr.false_expr)
}

pub fn walk_elvis<'t, V>(v: &mut V, _id: NodeId, expr: &'t ElvisExpr) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_node(expr.condition)?;
    v.visit_node(expr.false_expr)
}

pub fn walk_unary<'t, V>(v: &mut V, _id: NodeId, _kind: NodeKind, expr: &'t UnaryExpr) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_node(expr.expression)
}

pub fn walk_increment<'t, V>(v: &mut V, _id: NodeId, expr: &'t IncrementExpr) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_node(expr.expression)
}

pub fn walk_cast<'t, V>(v: &mut V, _id: NodeId, expr: &'t CastExpr) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_node(expr.expression)
}

pub fn walk_class_expr<'t, V>(_v: &mut V, _id: NodeId, _expr: &'t ClassExpr) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    ControlFlow::Continue(())
}

pub fn walk_closure<'t, V>(v: &mut V, _id: NodeId, expr: &'t ClosureExpr) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_list(&expr.parameters)?;
    v.visit_node(expr.code)
}

pub fn walk_list_expr<'t, V>(v: &mut V, _id: NodeId, expr: &'t ListExpr) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_list(&expr.items)
}

pub fn walk_argument_list<'t, V>(v: &mut V, _id: NodeId, expr: &'t ListExpr) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_list(&expr.items)
}

pub fn walk_map<'t, V>(v: &mut V, _id: NodeId, expr: &'t MapExpr) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_list(&expr.entries)
}

pub fn walk_map_entry<'t, V>(v: &mut V, _id: NodeId, expr: &'t MapEntryExpr) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_node(expr.key)?;
    v.visit_node(expr.value)
}

pub fn walk_gstring<'t, V>(v: &mut V, _id: NodeId, expr: &'t GStringExpr) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_list(&expr.strings)?;
    v.visit_list(&expr.values)
}

pub fn walk_range<'t, V>(v: &mut V, _id: NodeId, expr: &'t RangeExpr) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_node(expr.from)?;
    v.visit_node(expr.to)
}

pub fn walk_array<'t, V>(v: &mut V, _id: NodeId, expr: &'t ArrayExpr) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_list(&expr.sizes)?;
    v.visit_list(&expr.initializers)
}

pub fn walk_method_pointer<'t, V>(v: &mut V, _id: NodeId, expr: &'t MethodPointerExpr) -> ControlFlow<V::Break>
where
    V: DepthFirstVisitor<'t> + ?Sized,
{
    v.visit_node(expr.object)?;
    v.visit_node(expr.method)
}
