//! HTML parsing and tree manipulation
//!
//! - `dom`: parsing into a mutable tree and the traversal/extraction primitives
//! - `serializer`: turning the cleaned tree back into text
//! - `utils`: class attribute matching

pub mod dom;
pub mod serializer;
pub mod utils;

pub use dom::{
    detach_node, find_all, find_all_preceding, find_first, find_parent_by_name, get_ancestors,
    get_child_node_by_name, get_node_attr, get_node_name, get_parent_node, get_text, html_to_dom,
    is_comment, is_element, is_element_named, next_sibling, set_node_attr, top_level_ancestor,
    DocumentTree,
};
pub use serializer::{serialize_document, serialize_node};
pub use utils::{class_contains, class_contains_any, has_class, WHITESPACES};
