//! Node model of the program tree.
//!
//! Every node is stored once in the [`ProgramTree`](crate::ProgramTree) arena and
//! refers to its children through [`NodeId`] handles. Payload structs carry only
//! the typed child slots and the few offsets the completion rules need beyond the
//! node's own [`Span`].

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, IntoStaticStr};

/// Handle of a node inside a [`ProgramTree`](crate::ProgramTree).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Byte range `[start, end)` of a node in the edited source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const SYNTHETIC: Span = Span { start: 0, end: 0 };

    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Compiler-made nodes have no real source position.
    pub fn is_synthetic(&self) -> bool {
        self.end == 0 || self.end < self.start
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when `other` lies within `self`. Synthetic ranges are never nested.
    pub fn encloses(&self, other: Span) -> bool {
        !self.is_synthetic()
            && !other.is_synthetic()
            && self.start <= other.start
            && other.end <= self.end
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}..{})", self.start, self.end)
    }
}

/// One arena slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub span: Span,
    pub node: Node,
    /// Set when this expression was rewritten from another one (constant
    /// folding, implicit super calls); the original is visited after it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum NodeKind {
    Module,
    Package,
    Import,
    Class,
    Field,
    Property,
    Method,
    Constructor,
    Parameter,
    Annotation,
    AnnotationMember,
    GenericsType,
    TypeRef,

    Block,
    ExpressionStmt,
    Return,
    If,
    For,
    ForIn,
    While,
    DoWhile,
    Try,
    Catch,
    Switch,
    Case,
    Break,
    Continue,
    Throw,
    Synchronized,
    Assert,
    Labeled,
    EmptyStmt,

    Variable,
    Constant,
    AnnotationConstant,
    PropertyExpr,
    Attribute,
    FieldAccess,
    MethodCall,
    StaticMethodCall,
    ConstructorCall,
    Binary,
    Declaration,
    Ternary,
    Elvis,
    Not,
    UnaryMinus,
    UnaryPlus,
    BitwiseNegation,
    Prefix,
    Postfix,
    Cast,
    ClassExpr,
    Closure,
    Lambda,
    List,
    Map,
    MapEntry,
    ArgumentList,
    NamedArgumentList,
    GString,
    Range,
    Array,
    Spread,
    SpreadMap,
    MethodPointer,
    MethodReference,
    BooleanExpr,
    EmptyExpr,
}

impl NodeKind {
    pub fn is_declaration(self) -> bool {
        matches!(
            self,
            NodeKind::Module
                | NodeKind::Package
                | NodeKind::Import
                | NodeKind::Class
                | NodeKind::Field
                | NodeKind::Property
                | NodeKind::Method
                | NodeKind::Constructor
                | NodeKind::Parameter
                | NodeKind::Annotation
                | NodeKind::AnnotationMember
                | NodeKind::GenericsType
                | NodeKind::TypeRef
        )
    }

    pub fn is_statement(self) -> bool {
        matches!(
            self,
            NodeKind::Block
                | NodeKind::ExpressionStmt
                | NodeKind::Return
                | NodeKind::If
                | NodeKind::For
                | NodeKind::ForIn
                | NodeKind::While
                | NodeKind::DoWhile
                | NodeKind::Try
                | NodeKind::Catch
                | NodeKind::Switch
                | NodeKind::Case
                | NodeKind::Break
                | NodeKind::Continue
                | NodeKind::Throw
                | NodeKind::Synchronized
                | NodeKind::Assert
                | NodeKind::Labeled
                | NodeKind::EmptyStmt
        )
    }

    pub fn is_expression(self) -> bool {
        !self.is_declaration() && !self.is_statement()
    }
}

// ---------------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModuleNode {
    #[serde(default)]
    pub package: Option<NodeId>,
    #[serde(default)]
    pub imports: Vec<NodeId>,
    #[serde(default)]
    pub static_imports: Vec<NodeId>,
    #[serde(default)]
    pub classes: Vec<NodeId>,
    /// Implicit body of a script; visited after every class.
    #[serde(default)]
    pub run_method: Option<NodeId>,
}

impl ModuleNode {
    pub fn is_script(&self) -> bool {
        self.run_method.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PackageNode {
    pub name: String,
    #[serde(default)]
    pub annotations: Vec<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    #[default]
    Single,
    Star,
    Static,
    StaticStar,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImportNode {
    /// Qualified type name, or package name for star imports.
    pub name: String,
    #[serde(default, rename = "import_kind")]
    pub kind: ImportKind,
    /// Member name of a single static import.
    #[serde(default)]
    pub member: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub annotations: Vec<NodeId>,
}

impl ImportNode {
    pub fn is_static(&self) -> bool {
        matches!(self.kind, ImportKind::Static | ImportKind::StaticStar)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassFlags {
    pub is_script: bool,
    pub is_enum: bool,
    pub is_interface: bool,
    pub is_annotation_type: bool,
    pub is_trait: bool,
    pub is_anonymous: bool,
    pub is_synthetic: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassNode {
    pub name: String,
    #[serde(default)]
    pub flags: ClassFlags,
    #[serde(default)]
    pub annotations: Vec<NodeId>,
    #[serde(default)]
    pub generics: Vec<NodeId>,
    /// Superclass as written in the header; absent when implicit.
    #[serde(default)]
    pub super_class: Option<NodeId>,
    #[serde(default)]
    pub interfaces: Vec<NodeId>,
    /// Synthesized `<clinit>` method holding static initializer statements.
    #[serde(default)]
    pub static_init: Option<NodeId>,
    #[serde(default)]
    pub object_initializers: Vec<NodeId>,
    #[serde(default)]
    pub properties: Vec<NodeId>,
    #[serde(default)]
    pub fields: Vec<NodeId>,
    #[serde(default)]
    pub constructors: Vec<NodeId>,
    #[serde(default)]
    pub methods: Vec<NodeId>,
    /// Members contributed by traits, attached as metadata.
    #[serde(default)]
    pub trait_fields: Vec<NodeId>,
    #[serde(default)]
    pub trait_methods: Vec<NodeId>,
    #[serde(default)]
    pub inner_classes: Vec<NodeId>,
    #[serde(default)]
    pub outer_class: Option<NodeId>,
}

impl ClassNode {
    pub fn name_without_package(&self) -> &str {
        simple_name(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldFlags {
    pub is_static: bool,
    pub is_final: bool,
    pub is_enum_constant: bool,
    pub is_synthetic: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldNode {
    pub name: String,
    /// Offset of the last character of the name.
    pub name_end: usize,
    #[serde(default)]
    pub flags: FieldFlags,
    #[serde(default)]
    pub type_ref: Option<NodeId>,
    #[serde(default)]
    pub initializer: Option<NodeId>,
    #[serde(default)]
    pub annotations: Vec<NodeId>,
    /// Annotations a script keeps in field-transform metadata instead of on the node.
    #[serde(default)]
    pub transform_annotations: Vec<NodeId>,
    /// Generated accessor of a `@Lazy` field.
    #[serde(default)]
    pub lazy_accessor: Option<NodeId>,
    #[serde(default)]
    pub declaring_class: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PropertyNode {
    pub name: String,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub type_ref: Option<NodeId>,
    #[serde(default)]
    pub initializer: Option<NodeId>,
    #[serde(default)]
    pub annotations: Vec<NodeId>,
    #[serde(default)]
    pub getter_block: Option<NodeId>,
    #[serde(default)]
    pub setter_block: Option<NodeId>,
    #[serde(default)]
    pub declaring_class: Option<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodFlags {
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_synthetic: bool,
    /// Implicit top-level body of a script.
    pub script_body: bool,
    /// Synthesized static initializer method.
    pub static_init: bool,
    /// Annotation type member with a `default` value as its body.
    pub annotation_default: bool,
}

/// Shared shape of methods and constructors.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MethodNode {
    pub name: String,
    /// Offset of the last character of the name.
    pub name_end: usize,
    /// Offset of the `)` closing the parameter list.
    #[serde(default)]
    pub rparen: Option<usize>,
    #[serde(default)]
    pub flags: MethodFlags,
    #[serde(default)]
    pub annotations: Vec<NodeId>,
    #[serde(default)]
    pub generics: Vec<NodeId>,
    #[serde(default)]
    pub return_type: Option<NodeId>,
    #[serde(default)]
    pub parameters: Vec<NodeId>,
    #[serde(default)]
    pub exceptions: Vec<NodeId>,
    #[serde(default)]
    pub body: Option<NodeId>,
    #[serde(default)]
    pub declaring_class: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParameterNode {
    pub name: String,
    /// `[start, end)` of the name alone.
    pub name_span: Span,
    #[serde(default)]
    pub type_ref: Option<NodeId>,
    #[serde(default)]
    pub default_value: Option<NodeId>,
    #[serde(default)]
    pub annotations: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnotationNode {
    pub class_ref: NodeId,
    #[serde(default)]
    pub members: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnotationMemberNode {
    pub name: String,
    pub value: NodeId,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenericsTypeNode {
    #[serde(default)]
    pub type_ref: Option<NodeId>,
    #[serde(default)]
    pub is_placeholder: bool,
    #[serde(default)]
    pub lower_bound: Option<NodeId>,
    #[serde(default)]
    pub upper_bounds: Vec<NodeId>,
}

/// Reference to a type as written in source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TypeRefNode {
    pub name: String,
    #[serde(default)]
    pub generics: Vec<NodeId>,
}

impl TypeRefNode {
    pub fn name_without_package(&self) -> &str {
        simple_name(&self.name)
    }

    pub fn is_object(&self) -> bool {
        self.name == "Object" || self.name == "java.lang.Object"
    }
}

fn simple_name(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(_, simple)| simple)
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockStmt {
    #[serde(default)]
    pub statements: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpressionStmt {
    pub expression: NodeId,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReturnStmt {
    #[serde(default)]
    pub expression: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IfStmt {
    pub condition: NodeId,
    pub then_branch: NodeId,
    #[serde(default)]
    pub else_branch: Option<NodeId>,
}

/// Classic `for (init; cond; update)` loop.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForStmt {
    #[serde(default)]
    pub init: Vec<NodeId>,
    #[serde(default)]
    pub condition: Option<NodeId>,
    #[serde(default)]
    pub update: Vec<NodeId>,
    pub body: NodeId,
}

/// `for (x in collection)` loop.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForInStmt {
    pub variable: NodeId,
    pub collection: NodeId,
    pub body: NodeId,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WhileStmt {
    pub condition: NodeId,
    pub body: NodeId,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TryStmt {
    #[serde(default)]
    pub resources: Vec<NodeId>,
    pub body: NodeId,
    #[serde(default)]
    pub catches: Vec<NodeId>,
    #[serde(default)]
    pub finally: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatchStmt {
    pub parameter: NodeId,
    pub body: NodeId,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SwitchStmt {
    pub expression: NodeId,
    #[serde(default)]
    pub cases: Vec<NodeId>,
    #[serde(default)]
    pub default: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CaseStmt {
    pub expression: NodeId,
    pub body: NodeId,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JumpStmt {
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThrowStmt {
    pub expression: NodeId,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SynchronizedStmt {
    pub expression: NodeId,
    pub body: NodeId,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssertStmt {
    pub condition: NodeId,
    #[serde(default)]
    pub message: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LabeledStmt {
    pub label: String,
    pub statement: NodeId,
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VariableExpr {
    pub name: String,
    /// Declared type, for variables declared by this very expression.
    #[serde(default)]
    pub origin_type: Option<NodeId>,
    /// The expression declares the variable rather than referencing it.
    #[serde(default)]
    pub is_declaration: bool,
    #[serde(default)]
    pub annotations: Vec<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstantKind {
    /// Quoted string literals and bare names such as method names.
    #[default]
    String,
    Number,
    Boolean,
    Null,
    Char,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConstantExpr {
    /// Constant value as text, without quotes.
    pub text: String,
    #[serde(default, rename = "constant_kind")]
    pub kind: ConstantKind,
}

impl ConstantExpr {
    /// A String-typed constant whose source range is longer than its text has quotes.
    pub fn is_string_literal(&self, span: Span) -> bool {
        self.kind == ConstantKind::String && span.len() > self.text.len()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnotationConstantExpr {
    pub annotation: NodeId,
}

/// `object.property`, also used for `.@` attribute access.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PropertyExpr {
    pub object: NodeId,
    pub property: NodeId,
    #[serde(default)]
    pub safe: bool,
    #[serde(default)]
    pub spread: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldAccessExpr {
    pub name: String,
    /// Field this expression reads or assigns.
    #[serde(default)]
    pub field: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MethodCallExpr {
    pub object: NodeId,
    pub method: NodeId,
    pub arguments: NodeId,
    #[serde(default)]
    pub generics: Vec<NodeId>,
    #[serde(default)]
    pub implicit_this: bool,
    #[serde(default)]
    pub safe: bool,
    #[serde(default)]
    pub spread: bool,
    #[serde(default)]
    pub annotations: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StaticMethodCallExpr {
    pub method: String,
    /// Offsets of the first and last character of the name as written.
    pub name_start: usize,
    pub name_end: usize,
    pub arguments: NodeId,
    #[serde(default)]
    pub owner_type: Option<NodeId>,
    #[serde(default)]
    pub annotations: Vec<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialCall {
    This,
    Super,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConstructorCallExpr {
    pub type_ref: NodeId,
    /// Offsets of the first and last character of the name as written.
    pub name_start: usize,
    pub name_end: usize,
    pub arguments: NodeId,
    /// `this(...)` or `super(...)` inside a constructor.
    #[serde(default)]
    pub special: Option<SpecialCall>,
    #[serde(default)]
    pub anonymous_class: Option<NodeId>,
    #[serde(default)]
    pub annotations: Vec<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BinaryOp {
    Assign,
    PlusAssign,
    MinusAssign,
    MultiplyAssign,
    DivideAssign,
    ModAssign,
    PowerAssign,
    ElvisAssign,
    Plus,
    Minus,
    Multiply,
    Divide,
    Mod,
    Power,
    Equal,
    NotEqual,
    Identical,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Compare,
    And,
    Or,
    BitAnd,
    BitOr,
    BitXor,
    LeftShift,
    RightShift,
    In,
    InstanceOf,
    RegexFind,
    RegexMatch,
    /// `a[b]`
    Index,
}

impl BinaryOp {
    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            BinaryOp::Assign
                | BinaryOp::PlusAssign
                | BinaryOp::MinusAssign
                | BinaryOp::MultiplyAssign
                | BinaryOp::DivideAssign
                | BinaryOp::ModAssign
                | BinaryOp::PowerAssign
                | BinaryOp::ElvisAssign
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub left: NodeId,
    pub right: NodeId,
}

/// `def x = value`; `right` is an empty expression when nothing is assigned.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeclarationExpr {
    pub left: NodeId,
    pub right: NodeId,
    #[serde(default)]
    pub annotations: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TernaryExpr {
    pub condition: NodeId,
    pub true_expr: NodeId,
    pub false_expr: NodeId,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ElvisExpr {
    pub condition: NodeId,
    pub false_expr: NodeId,
}

/// Operand wrapper shared by `!x`, `-x`, `+x`, `~x`, `*x`, `*:x` and `(boolean) x`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UnaryExpr {
    pub expression: NodeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncrementOp {
    Increment,
    Decrement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncrementExpr {
    pub op: IncrementOp,
    pub expression: NodeId,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CastExpr {
    pub type_ref: NodeId,
    pub expression: NodeId,
    #[serde(default)]
    pub coerce: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassExpr {
    pub type_ref: NodeId,
}

/// Closure or lambda literal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClosureExpr {
    #[serde(default)]
    pub parameters: Vec<NodeId>,
    pub code: NodeId,
}

/// List literal, argument tuple.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListExpr {
    #[serde(default)]
    pub items: Vec<NodeId>,
}

/// Map literal, named argument list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapExpr {
    #[serde(default)]
    pub entries: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapEntryExpr {
    pub key: NodeId,
    pub value: NodeId,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GStringExpr {
    /// Constant text chunks between the interpolated values.
    #[serde(default)]
    pub strings: Vec<NodeId>,
    #[serde(default)]
    pub values: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RangeExpr {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(default)]
    pub inclusive: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArrayExpr {
    #[serde(default)]
    pub element_type: Option<NodeId>,
    #[serde(default)]
    pub sizes: Vec<NodeId>,
    #[serde(default)]
    pub initializers: Vec<NodeId>,
}

/// `obj.&name` or `obj::name`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MethodPointerExpr {
    pub object: NodeId,
    pub method: NodeId,
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Module(ModuleNode),
    Package(PackageNode),
    Import(ImportNode),
    Class(ClassNode),
    Field(FieldNode),
    Property(PropertyNode),
    Method(MethodNode),
    Constructor(MethodNode),
    Parameter(ParameterNode),
    Annotation(AnnotationNode),
    AnnotationMember(AnnotationMemberNode),
    GenericsType(GenericsTypeNode),
    TypeRef(TypeRefNode),

    Block(BlockStmt),
    ExpressionStmt(ExpressionStmt),
    Return(ReturnStmt),
    If(IfStmt),
    For(ForStmt),
    ForIn(ForInStmt),
    While(WhileStmt),
    DoWhile(WhileStmt),
    Try(TryStmt),
    Catch(CatchStmt),
    Switch(SwitchStmt),
    Case(CaseStmt),
    Break(JumpStmt),
    Continue(JumpStmt),
    Throw(ThrowStmt),
    Synchronized(SynchronizedStmt),
    Assert(AssertStmt),
    Labeled(LabeledStmt),
    EmptyStmt,

    Variable(VariableExpr),
    Constant(ConstantExpr),
    AnnotationConstant(AnnotationConstantExpr),
    PropertyExpr(PropertyExpr),
    Attribute(PropertyExpr),
    FieldAccess(FieldAccessExpr),
    MethodCall(MethodCallExpr),
    StaticMethodCall(StaticMethodCallExpr),
    ConstructorCall(ConstructorCallExpr),
    Binary(BinaryExpr),
    Declaration(DeclarationExpr),
    Ternary(TernaryExpr),
    Elvis(ElvisExpr),
    Not(UnaryExpr),
    UnaryMinus(UnaryExpr),
    UnaryPlus(UnaryExpr),
    BitwiseNegation(UnaryExpr),
    Prefix(IncrementExpr),
    Postfix(IncrementExpr),
    Cast(CastExpr),
    ClassExpr(ClassExpr),
    Closure(ClosureExpr),
    Lambda(ClosureExpr),
    List(ListExpr),
    Map(MapExpr),
    MapEntry(MapEntryExpr),
    ArgumentList(ListExpr),
    NamedArgumentList(MapExpr),
    GString(GStringExpr),
    Range(RangeExpr),
    Array(ArrayExpr),
    Spread(UnaryExpr),
    SpreadMap(UnaryExpr),
    MethodPointer(MethodPointerExpr),
    MethodReference(MethodPointerExpr),
    BooleanExpr(UnaryExpr),
    EmptyExpr,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Module(_) => NodeKind::Module,
            Node::Package(_) => NodeKind::Package,
            Node::Import(_) => NodeKind::Import,
            Node::Class(_) => NodeKind::Class,
            Node::Field(_) => NodeKind::Field,
            Node::Property(_) => NodeKind::Property,
            Node::Method(_) => NodeKind::Method,
            Node::Constructor(_) => NodeKind::Constructor,
            Node::Parameter(_) => NodeKind::Parameter,
            Node::Annotation(_) => NodeKind::Annotation,
            Node::AnnotationMember(_) => NodeKind::AnnotationMember,
            Node::GenericsType(_) => NodeKind::GenericsType,
            Node::TypeRef(_) => NodeKind::TypeRef,
            Node::Block(_) => NodeKind::Block,
            Node::ExpressionStmt(_) => NodeKind::ExpressionStmt,
            Node::Return(_) => NodeKind::Return,
            Node::If(_) => NodeKind::If,
            Node::For(_) => NodeKind::For,
            Node::ForIn(_) => NodeKind::ForIn,
            Node::While(_) => NodeKind::While,
            Node::DoWhile(_) => NodeKind::DoWhile,
            Node::Try(_) => NodeKind::Try,
            Node::Catch(_) => NodeKind::Catch,
            Node::Switch(_) => NodeKind::Switch,
            Node::Case(_) => NodeKind::Case,
            Node::Break(_) => NodeKind::Break,
            Node::Continue(_) => NodeKind::Continue,
            Node::Throw(_) => NodeKind::Throw,
            Node::Synchronized(_) => NodeKind::Synchronized,
            Node::Assert(_) => NodeKind::Assert,
            Node::Labeled(_) => NodeKind::Labeled,
            Node::EmptyStmt => NodeKind::EmptyStmt,
            Node::Variable(_) => NodeKind::Variable,
            Node::Constant(_) => NodeKind::Constant,
            Node::AnnotationConstant(_) => NodeKind::AnnotationConstant,
            Node::PropertyExpr(_) => NodeKind::PropertyExpr,
            Node::Attribute(_) => NodeKind::Attribute,
            Node::FieldAccess(_) => NodeKind::FieldAccess,
            Node::MethodCall(_) => NodeKind::MethodCall,
            Node::StaticMethodCall(_) => NodeKind::StaticMethodCall,
            Node::ConstructorCall(_) => NodeKind::ConstructorCall,
            Node::Binary(_) => NodeKind::Binary,
            Node::Declaration(_) => NodeKind::Declaration,
            Node::Ternary(_) => NodeKind::Ternary,
            Node::Elvis(_) => NodeKind::Elvis,
            Node::Not(_) => NodeKind::Not,
            Node::UnaryMinus(_) => NodeKind::UnaryMinus,
            Node::UnaryPlus(_) => NodeKind::UnaryPlus,
            Node::BitwiseNegation(_) => NodeKind::BitwiseNegation,
            Node::Prefix(_) => NodeKind::Prefix,
            Node::Postfix(_) => NodeKind::Postfix,
            Node::Cast(_) => NodeKind::Cast,
            Node::ClassExpr(_) => NodeKind::ClassExpr,
            Node::Closure(_) => NodeKind::Closure,
            Node::Lambda(_) => NodeKind::Lambda,
            Node::List(_) => NodeKind::List,
            Node::Map(_) => NodeKind::Map,
            Node::MapEntry(_) => NodeKind::MapEntry,
            Node::ArgumentList(_) => NodeKind::ArgumentList,
            Node::NamedArgumentList(_) => NodeKind::NamedArgumentList,
            Node::GString(_) => NodeKind::GString,
            Node::Range(_) => NodeKind::Range,
            Node::Array(_) => NodeKind::Array,
            Node::Spread(_) => NodeKind::Spread,
            Node::SpreadMap(_) => NodeKind::SpreadMap,
            Node::MethodPointer(_) => NodeKind::MethodPointer,
            Node::MethodReference(_) => NodeKind::MethodReference,
            Node::BooleanExpr(_) => NodeKind::BooleanExpr,
            Node::EmptyExpr => NodeKind::EmptyExpr,
        }
    }

    /// Every child id in source order, including type references.
    ///
    /// Back links (`declaring_class`, `outer_class`, `FieldAccessExpr::field`),
    /// a variable's origin type (written before the variable name) and the
    /// `original` slot are not children.
    pub fn children(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let one = |id: &Option<NodeId>, out: &mut Vec<NodeId>| out.extend(id.iter().copied());
        match self {
            Node::Module(m) => {
                one(&m.package, &mut out);
                out.extend(&m.imports);
                out.extend(&m.static_imports);
                out.extend(&m.classes);
                one(&m.run_method, &mut out);
            }
            Node::Package(p) => out.extend(&p.annotations),
            Node::Import(i) => out.extend(&i.annotations),
            Node::Class(c) => {
                out.extend(&c.annotations);
                out.extend(&c.generics);
                one(&c.super_class, &mut out);
                out.extend(&c.interfaces);
                one(&c.static_init, &mut out);
                out.extend(&c.object_initializers);
                out.extend(&c.properties);
                out.extend(&c.fields);
                out.extend(&c.constructors);
                out.extend(&c.methods);
                out.extend(&c.trait_fields);
                out.extend(&c.trait_methods);
                out.extend(&c.inner_classes);
            }
            Node::Field(f) => {
                out.extend(&f.annotations);
                out.extend(&f.transform_annotations);
                one(&f.type_ref, &mut out);
                one(&f.initializer, &mut out);
                one(&f.lazy_accessor, &mut out);
            }
            Node::Property(p) => {
                out.extend(&p.annotations);
                one(&p.type_ref, &mut out);
                one(&p.getter_block, &mut out);
                one(&p.setter_block, &mut out);
                one(&p.initializer, &mut out);
            }
            Node::Method(m) | Node::Constructor(m) => {
                out.extend(&m.annotations);
                out.extend(&m.generics);
                one(&m.return_type, &mut out);
                out.extend(&m.parameters);
                out.extend(&m.exceptions);
                one(&m.body, &mut out);
            }
            Node::Parameter(p) => {
                out.extend(&p.annotations);
                one(&p.type_ref, &mut out);
                one(&p.default_value, &mut out);
            }
            Node::Annotation(a) => {
                out.push(a.class_ref);
                out.extend(&a.members);
            }
            Node::AnnotationMember(m) => out.push(m.value),
            Node::GenericsType(g) => {
                one(&g.type_ref, &mut out);
                one(&g.lower_bound, &mut out);
                out.extend(&g.upper_bounds);
            }
            Node::TypeRef(t) => out.extend(&t.generics),
            Node::Block(b) => out.extend(&b.statements),
            Node::ExpressionStmt(s) => out.push(s.expression),
            Node::Return(r) => one(&r.expression, &mut out),
            Node::If(s) => {
                out.push(s.condition);
                out.push(s.then_branch);
                one(&s.else_branch, &mut out);
            }
            Node::For(s) => {
                out.extend(&s.init);
                one(&s.condition, &mut out);
                out.extend(&s.update);
                out.push(s.body);
            }
            Node::ForIn(s) => out.extend([s.variable, s.collection, s.body]),
            Node::While(s) => out.extend([s.condition, s.body]),
            Node::DoWhile(s) => out.extend([s.body, s.condition]),
            Node::Try(s) => {
                out.extend(&s.resources);
                out.push(s.body);
                out.extend(&s.catches);
                one(&s.finally, &mut out);
            }
            Node::Catch(s) => out.extend([s.parameter, s.body]),
            Node::Switch(s) => {
                out.push(s.expression);
                out.extend(&s.cases);
                one(&s.default, &mut out);
            }
            Node::Case(s) => out.extend([s.expression, s.body]),
            Node::Break(_) | Node::Continue(_) | Node::EmptyStmt | Node::EmptyExpr => {}
            Node::Throw(s) => out.push(s.expression),
            Node::Synchronized(s) => out.extend([s.expression, s.body]),
            Node::Assert(s) => {
                out.push(s.condition);
                one(&s.message, &mut out);
            }
            Node::Labeled(s) => out.push(s.statement),
            Node::Variable(v) => out.extend(&v.annotations),
            Node::Constant(_) | Node::FieldAccess(_) => {}
            Node::AnnotationConstant(a) => out.push(a.annotation),
            Node::PropertyExpr(p) | Node::Attribute(p) => out.extend([p.object, p.property]),
            Node::MethodCall(c) => {
                out.extend(&c.annotations);
                out.push(c.object);
                out.extend(&c.generics);
                out.push(c.method);
                out.push(c.arguments);
            }
            Node::StaticMethodCall(c) => {
                out.extend(&c.annotations);
                one(&c.owner_type, &mut out);
                out.push(c.arguments);
            }
            Node::ConstructorCall(c) => {
                out.extend(&c.annotations);
                out.push(c.type_ref);
                out.push(c.arguments);
                one(&c.anonymous_class, &mut out);
            }
            Node::Binary(b) => out.extend([b.left, b.right]),
            Node::Declaration(d) => {
                out.extend(&d.annotations);
                out.extend([d.left, d.right]);
            }
            Node::Ternary(t) => out.extend([t.condition, t.true_expr, t.false_expr]),
            Node::Elvis(e) => out.extend([e.condition, e.false_expr]),
            Node::Not(u)
            | Node::UnaryMinus(u)
            | Node::UnaryPlus(u)
            | Node::BitwiseNegation(u)
            | Node::Spread(u)
            | Node::SpreadMap(u)
            | Node::BooleanExpr(u) => out.push(u.expression),
            Node::Prefix(p) | Node::Postfix(p) => out.push(p.expression),
            Node::Cast(c) => out.extend([c.type_ref, c.expression]),
            Node::ClassExpr(c) => out.push(c.type_ref),
            Node::Closure(c) | Node::Lambda(c) => {
                out.extend(&c.parameters);
                out.push(c.code);
            }
            Node::List(l) | Node::ArgumentList(l) => out.extend(&l.items),
            Node::Map(m) | Node::NamedArgumentList(m) => out.extend(&m.entries),
            Node::MapEntry(e) => out.extend([e.key, e.value]),
            Node::GString(g) => {
                out.extend(&g.strings);
                out.extend(&g.values);
            }
            Node::Range(r) => out.extend([r.from, r.to]),
            Node::Array(a) => {
                one(&a.element_type, &mut out);
                out.extend(&a.sizes);
                out.extend(&a.initializers);
            }
            Node::MethodPointer(p) | Node::MethodReference(p) => out.extend([p.object, p.method]),
        }
        out
    }

    /// Name carried by named declarations and references, for display.
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Package(p) => Some(&p.name),
            Node::Import(i) => Some(&i.name),
            Node::Class(c) => Some(&c.name),
            Node::Field(f) => Some(&f.name),
            Node::Property(p) => Some(&p.name),
            Node::Method(m) | Node::Constructor(m) => Some(&m.name),
            Node::Parameter(p) => Some(&p.name),
            Node::AnnotationMember(m) => Some(&m.name),
            Node::TypeRef(t) => Some(&t.name),
            Node::Variable(v) => Some(&v.name),
            Node::Constant(c) => Some(&c.text),
            Node::FieldAccess(f) => Some(&f.name),
            Node::StaticMethodCall(c) => Some(&c.method),
            Node::Labeled(l) => Some(&l.label),
            _ => None,
        }
    }

    /// Declaring class back link of class members.
    pub fn declaring_class(&self) -> Option<NodeId> {
        match self {
            Node::Field(f) => f.declaring_class,
            Node::Property(p) => p.declaring_class,
            Node::Method(m) | Node::Constructor(m) => m.declaring_class,
            Node::Class(c) => c.outer_class,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn synthetic_spans() {
        assert!(Span::SYNTHETIC.is_synthetic());
        assert!(Span::new(10, 4).is_synthetic());
        assert!(!Span::new(0, 3).is_synthetic());
        assert!(Span::new(0, 10).encloses(Span::new(2, 10)));
        assert!(!Span::new(0, 10).encloses(Span::new(2, 11)));
        assert!(!Span::new(0, 10).encloses(Span::SYNTHETIC));
    }

    #[test]
    fn node_kinds_partition() {
        for kind in NodeKind::iter() {
            let groups = [
                kind.is_declaration(),
                kind.is_statement(),
                kind.is_expression(),
            ];
            assert_eq!(groups.iter().filter(|g| **g).count(), 1, "{kind}");
        }
        assert_eq!(NodeKind::PropertyExpr.to_string(), "property_expr");
    }

    #[test]
    fn string_literal_detection() {
        let quoted = ConstantExpr {
            text: "hello".into(),
            kind: ConstantKind::String,
        };
        assert!(quoted.is_string_literal(Span::new(0, 7)));
        assert!(!quoted.is_string_literal(Span::new(0, 5)));

        let number = ConstantExpr {
            text: "12".into(),
            kind: ConstantKind::Number,
        };
        assert!(!number.is_string_literal(Span::new(0, 4)));
    }

    #[test]
    fn simple_names() {
        let t = TypeRefNode {
            name: "java.util.List".into(),
            generics: vec![],
        };
        assert_eq!(t.name_without_package(), "List");
        let t = TypeRefNode {
            name: "Foo".into(),
            generics: vec![],
        };
        assert_eq!(t.name_without_package(), "Foo");
    }

    #[test]
    fn node_json_is_tagged() {
        let node = Node::Variable(VariableExpr {
            name: "x".into(),
            ..Default::default()
        });
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.starts_with(r#"{"kind":"variable""#), "{json}");
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }
}
