//! Attach document and response context to errors raised during
//! execution.

use std::sync::Arc;

use crate::graphql_error::{ErrorCause, ErrorOptions, GraphQLError, NodesInput};
use crate::path::PathSegment;

/// Wrap `original` so it points at the failing `nodes` and response `path`.
///
/// A GraphQL error that already carries a path is returned as is. One
/// without a path keeps its own nodes (falling back to `nodes`), source
/// and positions. Any other error contributes only its message. The
/// original is kept as the cause either way, so its extensions and trace
/// carry over.
pub fn located_error(
    original: Arc<dyn ErrorCause>,
    nodes: Option<NodesInput>,
    path: Option<Vec<PathSegment>>,
) -> GraphQLError {
    if let Some(error) = original.as_graphql_error() {
        if error.path().is_some() {
            tracing::debug!(error_message = error.message(), "error is already located");
            return error.clone();
        }

        let mut options = ErrorOptions::new();
        let own_nodes = error.nodes().map(|own| NodesInput::from(own.to_vec()));
        if let Some(nodes) = own_nodes.or(nodes) {
            options = options.nodes(nodes);
        }
        if let Some(source) = error.source_document() {
            options = options.source(Arc::clone(source));
        }
        if let Some(positions) = error.positions() {
            options = options.positions(positions.to_vec());
        }
        if let Some(path) = path {
            options = options.path(path);
        }
        let message = error.message().to_string();
        return GraphQLError::new(message, options.shared_cause(original));
    }

    let mut options = ErrorOptions::new();
    if let Some(nodes) = nodes {
        options = options.nodes(nodes);
    }
    if let Some(path) = path {
        options = options.path(path);
    }
    GraphQLError::new(original.to_string(), options.shared_cause(original))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ast::{Node, NodeKind};
    use crate::graphql_error::OpaqueCause;
    use crate::source::{Source, SourceLocation};

    fn field_node(source: &Arc<Source>) -> Node {
        Node::located(NodeKind::Field, Arc::clone(source), 2, 7)
    }

    fn user_path() -> Vec<PathSegment> {
        vec![PathSegment::from("user"), PathSegment::from("name")]
    }

    #[test]
    fn locates_plain_errors() {
        let source = Arc::new(Source::new("{ field }"));
        let original: Arc<dyn ErrorCause> = Arc::new(OpaqueCause::new("resolver failed"));
        let error = located_error(
            Arc::clone(&original),
            Some(field_node(&source).into()),
            Some(user_path()),
        );

        assert_eq!(error.message(), "resolver failed");
        assert_eq!(error.locations(), Some(&[SourceLocation::new(1, 3)][..]));
        assert_eq!(error.path(), Some(&user_path()[..]));
        assert!(Arc::ptr_eq(error.cause().expect("cause"), &original));
    }

    #[test]
    fn returns_already_located_errors_unchanged() {
        let inner = GraphQLError::new(
            "inner",
            ErrorOptions::new().path(vec![PathSegment::from("other")]),
        );
        let source = Arc::new(Source::new("{ field }"));
        let error = located_error(
            Arc::new(inner.clone()),
            Some(field_node(&source).into()),
            Some(user_path()),
        );

        assert_eq!(error.message(), "inner");
        assert_eq!(error.path(), Some(&[PathSegment::from("other")][..]));
        assert!(error.nodes().is_none());
        assert!(error.trace().ptr_eq(inner.trace()));
    }

    #[test]
    fn keeps_own_location_of_unlocated_graphql_errors() {
        let own_source = Arc::new(Source::new("{\n  own\n}"));
        let inner = GraphQLError::new(
            "inner",
            ErrorOptions::new()
                .source(Arc::clone(&own_source))
                .positions(vec![4])
                .extensions(
                    json!({"code": "INNER"})
                        .as_object()
                        .cloned()
                        .unwrap_or_default(),
                ),
        );

        let other_source = Arc::new(Source::new("{ field }"));
        let error = located_error(
            Arc::new(inner.clone()),
            Some(field_node(&other_source).into()),
            Some(user_path()),
        );

        assert_eq!(error.message(), "inner");
        assert!(error.nodes().is_some());
        assert_eq!(error.positions(), Some(&[4][..]));
        assert_eq!(error.locations(), Some(&[SourceLocation::new(2, 3)][..]));
        assert_eq!(error.path(), Some(&user_path()[..]));
        assert_eq!(error.extensions().get("code"), Some(&json!("INNER")));
        assert!(error.trace().ptr_eq(inner.trace()));
    }

    #[test]
    fn prefers_the_original_nodes() {
        let own_source = Arc::new(Source::new("{ mine }"));
        let inner = GraphQLError::new(
            "inner",
            ErrorOptions::new().nodes(Node::located(
                NodeKind::Field,
                Arc::clone(&own_source),
                2,
                6,
            )),
        );
        let other_source = Arc::new(Source::new("{\n  field\n}"));
        let error = located_error(
            Arc::new(inner),
            Some(Node::located(NodeKind::Field, other_source, 4, 9).into()),
            None,
        );

        let nodes = error.nodes().expect("nodes");
        assert_eq!(nodes.len(), 1);
        let loc = nodes[0].loc.as_ref().expect("located");
        assert!(Arc::ptr_eq(&loc.source, &own_source));
        assert!(error.path().is_none());
    }
}
