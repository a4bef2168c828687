use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, IntoStaticStr};

/// What is being completed at the caret.
///
/// Proposal providers are looked up by this value, so the set is closed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    IntoStaticStr,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    /// Name in a package declaration.
    Package,
    /// Name in an import.
    Import,
    /// Type name of an annotation.
    Annotation,
    /// Member name inside an annotation's parentheses.
    AnnotationBody,
    /// Type or name of a method parameter.
    Parameter,
    Implements,
    Extends,
    /// Type in a `throws` clause or a catch parameter.
    Exceptions,
    /// Member of the expression before a dot.
    Expression,
    /// Type name after `new`.
    Constructor,
    /// Start of a new statement.
    Statement,
    /// Member declaration inside a class body.
    ClassBody,
    /// Top level of a script body.
    Script,
    /// Inside the argument list of a call; signature help.
    MethodContext,
    /// Type argument between `<` and `>`.
    Generics,
}

impl LocationKind {
    /// Locations where the typed text names a type, possibly qualified.
    pub fn is_type_position(self) -> bool {
        matches!(
            self,
            LocationKind::Package
                | LocationKind::Import
                | LocationKind::Annotation
                | LocationKind::Implements
                | LocationKind::Extends
                | LocationKind::Exceptions
                | LocationKind::Constructor
                | LocationKind::Generics
        )
    }
}
