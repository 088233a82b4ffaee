use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use markup5ever_rcdom::{Handle, SerializableHandle};
use tracing::warn;

use super::dom::DocumentTree;

fn serialize_handle(handle: &Handle, traversal_scope: TraversalScope) -> String {
    let mut buf: Vec<u8> = Vec::new();

    let serializable: SerializableHandle = handle.clone().into();
    let opts = SerializeOpts {
        traversal_scope,
        ..SerializeOpts::default()
    };
    if let Err(err) = serialize(&mut buf, &serializable, opts) {
        warn!(error = %err, "unable to serialize DOM into buffer");
    }

    String::from_utf8_lossy(&buf).into_owned()
}

/// Serializes the content of the tree (the children of its root) back into
/// an HTML string, without surrounding whitespace
pub fn serialize_document(tree: &DocumentTree) -> String {
    serialize_handle(tree.root(), TraversalScope::ChildrenOnly(None))
        .trim()
        .to_string()
}

/// Markup of a single node, the node itself included
pub fn serialize_node(node: &Handle) -> String {
    serialize_handle(node, TraversalScope::IncludeNode)
}
