//! The resolved completion location and what consumers derive from it.
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use assist_core::ir::{ImportKind, Node, NodeId, NodeKind};
use assist_core::ProgramTree;
use once_cell::sync::Lazy;
use once_cell::unsync::OnceCell;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::AssistConfig;
use crate::location::LocationKind;
use crate::request::CompletionRequest;

static FIELD_ACCESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.@\s*[\w$]*$").expect("field access pattern"));
static METHOD_POINTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\.&|::)\s*[\w$]*$").expect("method pointer pattern"));

/// Callee of a call the caret sits inside, for signature help.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodInfo {
    /// Node naming the callee: the method name, the constructed type, or the
    /// call itself for static calls.
    pub method_expression: NodeId,
    pub method_name: String,
    /// Offset just past the callee name.
    pub method_name_end: usize,
}

/// How the member being completed is reached from its receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberAccess {
    /// `a.b`, `a?.b`, `a*.b` or no receiver at all.
    Plain,
    /// `a.@b`
    Field,
    /// `a.&b` or `a::b`
    MethodPointer,
}

/// Variables visible at the completion node, as computed by a type inference pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VariableScope {
    /// Variable name to inferred type name.
    pub bindings: BTreeMap<String, String>,
}

impl VariableScope {
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.bindings.get(name).map(String::as_str)
    }
}

/// External inference run on demand against the same tree.
pub trait ScopeInference {
    fn infer_scope(
        &self,
        tree: &ProgramTree,
        node: Option<NodeId>,
        declaration: Option<NodeId>,
    ) -> VariableScope;
}

impl<F> ScopeInference for F
where
    F: Fn(&ProgramTree, Option<NodeId>, Option<NodeId>) -> VariableScope,
{
    fn infer_scope(
        &self,
        tree: &ProgramTree,
        node: Option<NodeId>,
        declaration: Option<NodeId>,
    ) -> VariableScope {
        self(tree, node, declaration)
    }
}

/// Snapshot of one resolved completion location.
///
/// Immutable once built. The two lazily filled caches are computed at most once
/// per context.
pub struct ContentAssistContext<'t> {
    completion_location: usize,
    completion_end: usize,
    completion_expression: String,
    full_completion_expression: String,
    completion_node: Option<NodeId>,
    containing_code_block: Option<NodeId>,
    containing_declaration: Option<NodeId>,
    lhs_node: Option<NodeId>,
    location: LocationKind,
    method_info: Option<MethodInfo>,
    tree: &'t ProgramTree,
    favorite_static_members: OnceCell<BTreeSet<String>>,
    variable_scope: OnceCell<VariableScope>,
}

/// Where a context is anchored in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Anchor {
    pub completion_node: Option<NodeId>,
    pub containing_code_block: Option<NodeId>,
    pub containing_declaration: Option<NodeId>,
    pub lhs_node: Option<NodeId>,
}

impl<'t> ContentAssistContext<'t> {
    pub(crate) fn new(
        tree: &'t ProgramTree,
        request: &CompletionRequest,
        anchor: Anchor,
        location: LocationKind,
        method_info: Option<MethodInfo>,
    ) -> Self {
        Self {
            completion_location: request.completion_offset,
            completion_end: request.completion_end,
            completion_expression: request.completion_expression.clone(),
            full_completion_expression: request.full_completion_expression.clone(),
            completion_node: anchor.completion_node,
            containing_code_block: anchor.containing_code_block,
            containing_declaration: anchor.containing_declaration,
            lhs_node: anchor.lhs_node,
            location,
            method_info,
            tree,
            favorite_static_members: OnceCell::new(),
            variable_scope: OnceCell::new(),
        }
    }

    pub fn tree(&self) -> &'t ProgramTree {
        self.tree
    }

    /// Caret offset.
    pub fn completion_location(&self) -> usize {
        self.completion_location
    }

    pub fn completion_end(&self) -> usize {
        self.completion_end
    }

    pub fn completion_expression(&self) -> &str {
        &self.completion_expression
    }

    pub fn full_completion_expression(&self) -> &str {
        &self.full_completion_expression
    }

    pub fn completion_node(&self) -> Option<NodeId> {
        self.completion_node
    }

    pub fn containing_code_block(&self) -> Option<NodeId> {
        self.containing_code_block
    }

    pub fn containing_declaration(&self) -> Option<NodeId> {
        self.containing_declaration
    }

    /// Left-hand side the completed expression is being assigned to.
    pub fn lhs_node(&self) -> Option<NodeId> {
        self.lhs_node
    }

    pub fn location(&self) -> LocationKind {
        self.location
    }

    pub fn method_info(&self) -> Option<&MethodInfo> {
        self.method_info.as_ref()
    }

    /// The node the proposal pipeline treats as being completed; for a call
    /// context, the callee.
    pub fn perceived_completion_node(&self) -> Option<NodeId> {
        match &self.method_info {
            Some(info) => Some(info.method_expression),
            None => self.completion_node,
        }
    }

    pub fn perceived_completion_expression(&self) -> &str {
        match &self.method_info {
            Some(info) => &info.method_name,
            None => &self.completion_expression,
        }
    }

    /// Typed text with whitespace dropped where a qualified type name is being
    /// written, the perceived expression elsewhere.
    pub fn qualified_completion_expression(&self) -> String {
        if self.location.is_type_position() {
            self.full_completion_expression
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect()
        } else {
            self.perceived_completion_expression().to_string()
        }
    }

    /// Class whose body the caret is in.
    pub fn enclosing_type(&self) -> Option<NodeId> {
        let declaration = self.containing_declaration?;
        match self.tree.kind(declaration) {
            NodeKind::Class => Some(declaration),
            _ => self.tree.declaring_class(declaration),
        }
    }

    /// True when the first non-blank character after the token is `(`.
    pub fn is_paren_after(&self, source: &str) -> bool {
        source
            .get(self.completion_end..)
            .and_then(|rest| rest.chars().find(|c| !c.is_whitespace()))
            == Some('(')
    }

    pub fn member_access(&self) -> MemberAccess {
        if FIELD_ACCESS.is_match(&self.full_completion_expression) {
            MemberAccess::Field
        } else if METHOD_POINTER.is_match(&self.full_completion_expression) {
            MemberAccess::MethodPointer
        } else {
            MemberAccess::Plain
        }
    }

    /// Configured favourite static members plus the module's static imports,
    /// as `Type.member` or `Type.*`.
    pub fn favorite_static_members(&self, config: &AssistConfig) -> &BTreeSet<String> {
        self.favorite_static_members.get_or_init(|| {
            let mut members: BTreeSet<String> =
                config.favorite_static_members.iter().cloned().collect();
            let imports = self
                .tree
                .module()
                .map(|module| module.static_imports.as_slice())
                .unwrap_or_default();
            for id in imports {
                let Some(Node::Import(import)) = self.tree.get(*id).map(|data| &data.node) else {
                    continue;
                };
                match (import.kind, &import.member) {
                    (ImportKind::StaticStar, _) => {
                        members.insert(format!("{}.*", import.name));
                    }
                    (ImportKind::Static, Some(member)) => {
                        members.insert(format!("{}.{}", import.name, member));
                    }
                    _ => {}
                }
            }
            members
        })
    }

    /// Variables in scope at the completion node, inferred on first use.
    pub fn variable_scope(&self, inference: &dyn ScopeInference) -> &VariableScope {
        self.variable_scope.get_or_init(|| {
            inference.infer_scope(
                self.tree,
                self.perceived_completion_node(),
                self.containing_declaration,
            )
        })
    }

    pub fn summary(&self) -> ContextSummary {
        let kind_of = |id: Option<NodeId>| id.map(|id| self.tree.kind(id).to_string());
        ContextSummary {
            location: self.location,
            completion_location: self.completion_location,
            completion_end: self.completion_end,
            completion_expression: self.completion_expression.clone(),
            full_completion_expression: self.full_completion_expression.clone(),
            completion_node: self.completion_node,
            completion_node_kind: kind_of(self.completion_node),
            containing_code_block: self.containing_code_block,
            containing_code_block_kind: kind_of(self.containing_code_block),
            containing_declaration: self.containing_declaration,
            containing_declaration_kind: kind_of(self.containing_declaration),
            lhs_node: self.lhs_node,
            method_info: self.method_info.clone(),
        }
    }
}

impl fmt::Debug for ContentAssistContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentAssistContext")
            .field("location", &self.location)
            .field("completion_location", &self.completion_location)
            .field("completion_end", &self.completion_end)
            .field("completion_expression", &self.completion_expression)
            .field("full_completion_expression", &self.full_completion_expression)
            .field("completion_node", &self.completion_node)
            .field("containing_code_block", &self.containing_code_block)
            .field("containing_declaration", &self.containing_declaration)
            .field("lhs_node", &self.lhs_node)
            .field("method_info", &self.method_info)
            .finish()
    }
}

/// Plain-data view of a context, for printing and JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSummary {
    pub location: LocationKind,
    pub completion_location: usize,
    pub completion_end: usize,
    pub completion_expression: String,
    pub full_completion_expression: String,
    pub completion_node: Option<NodeId>,
    pub completion_node_kind: Option<String>,
    pub containing_code_block: Option<NodeId>,
    pub containing_code_block_kind: Option<String>,
    pub containing_declaration: Option<NodeId>,
    pub containing_declaration_kind: Option<String>,
    pub lhs_node: Option<NodeId>,
    pub method_info: Option<MethodInfo>,
}

fn write_node(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    id: Option<NodeId>,
    kind: &Option<String>,
) -> fmt::Result {
    match (id, kind) {
        (Some(id), Some(kind)) => write!(f, " {}={}:{}", label, kind, id),
        (Some(id), None) => write!(f, " {}={}", label, id),
        _ => Ok(()),
    }
}

impl fmt::Display for ContextSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @{}", self.location, self.completion_location)?;
        write_node(f, "node", self.completion_node, &self.completion_node_kind)?;
        write_node(f, "block", self.containing_code_block, &self.containing_code_block_kind)?;
        write_node(f, "decl", self.containing_declaration, &self.containing_declaration_kind)?;
        if let Some(lhs) = self.lhs_node {
            write!(f, " lhs={}", lhs)?;
        }
        if let Some(info) = &self.method_info {
            write!(f, " call={}@{}", info.method_name, info.method_name_end)?;
        }
        Ok(())
    }
}
