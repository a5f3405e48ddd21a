//! AST node handles as seen by error records.
//!
//! The parser owns the real syntax tree; errors only need to know what
//! kind of node failed and where it sits. A [`Node`] is cheap to clone:
//! its [`Location`] shares the document through an `Arc`.

use std::sync::Arc;

use crate::source::Source;

/// Kind of a GraphQL syntax node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Name,

    // Executable documents
    Document,
    OperationDefinition,
    VariableDefinition,
    SelectionSet,
    Field,
    Argument,
    FragmentSpread,
    InlineFragment,
    FragmentDefinition,

    // Values
    Variable,
    IntValue,
    FloatValue,
    StringValue,
    BooleanValue,
    NullValue,
    EnumValue,
    ListValue,
    ObjectValue,
    ObjectField,

    Directive,

    // Type references
    NamedType,
    ListType,
    NonNullType,

    // Type system
    SchemaDefinition,
    OperationTypeDefinition,
    ScalarTypeDefinition,
    ObjectTypeDefinition,
    FieldDefinition,
    InputValueDefinition,
    InterfaceTypeDefinition,
    UnionTypeDefinition,
    EnumTypeDefinition,
    EnumValueDefinition,
    InputObjectTypeDefinition,
    DirectiveDefinition,
    SchemaExtension,
    TypeExtension,
}

/// Where a node came from: a byte range in its owning document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub start: usize,
    pub end: usize,
    pub source: Arc<Source>,
}

impl Location {
    pub fn new(source: Arc<Source>, start: usize, end: usize) -> Self {
        Location { start, end, source }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    /// Absent for synthesized nodes that never had source text.
    pub loc: Option<Location>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Node { kind, loc: None }
    }

    pub fn located(kind: NodeKind, source: Arc<Source>, start: usize, end: usize) -> Self {
        Node {
            kind,
            loc: Some(Location::new(source, start, end)),
        }
    }
}
