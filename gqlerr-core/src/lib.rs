//! Structured error records for a GraphQL processing pipeline.
//!
//! A [`GraphQLError`] describes a failure that already happened somewhere
//! in parsing, validation or execution. The crate is organised as:
//!
//!   source text + byte offsets
//!     -> source    (documents, offset -> line/column)
//!     -> ast       (node handles pointing back into documents)
//!     -> printer   (highlighted excerpts)
//!     -> graphql_error (normalization, display string, response object)
//!
//! Higher-level tools (CLI, servers, etc.) should depend on this crate
//! rather than reimplementing the response error shape.

// ---------------------------------------------------------------------
// Documents and locations
// ---------------------------------------------------------------------

pub mod ast;
pub mod printer;
pub mod source;

// ---------------------------------------------------------------------
// Response paths and diagnostic traces
// ---------------------------------------------------------------------

pub mod path;
pub mod trace;

// ---------------------------------------------------------------------
// Error records and helpers around them
// ---------------------------------------------------------------------

pub mod error;
pub mod graphql_error;
pub mod located_error;
pub mod syntax_error;

// ---------------------------------------------------------------------
// Public API re-exports
// ---------------------------------------------------------------------

pub use ast::{Location, Node, NodeKind};
pub use error::CoreError;
pub use graphql_error::{
    ErrorCause, ErrorOptions, Extensions, GraphQLError, NodesInput, OpaqueCause, ResponseError,
    parse_extensions,
};
pub use located_error::located_error;
pub use path::{PathSegment, ResponsePath, parse_path};
pub use printer::{print_location, print_source_location};
pub use source::{Source, SourceLocation, get_location};
pub use syntax_error::syntax_error;
pub use trace::Trace;
