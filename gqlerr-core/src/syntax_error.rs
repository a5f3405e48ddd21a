use std::sync::Arc;

use crate::graphql_error::{ErrorOptions, GraphQLError};
use crate::source::Source;

/// Error for a document that failed to lex or parse at `position`.
pub fn syntax_error(source: Arc<Source>, position: usize, description: &str) -> GraphQLError {
    GraphQLError::new(
        format!("Syntax Error: {description}"),
        ErrorOptions::new().source(source).positions(vec![position]),
    )
}
