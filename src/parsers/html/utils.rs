use markup5ever_rcdom::Handle;

use super::dom::get_node_attr;

/// ASCII whitespace, the separator of class attribute tokens
pub const WHITESPACES: &[char] = &[' ', '\t', '\n', '\x0c', '\r'];

/// Checks whether the raw class attribute contains `fragment` anywhere
/// (`"infobox"` matches `class="infobox_v2 vevent"`)
pub fn class_contains(node: &Handle, fragment: &str) -> bool {
    get_node_attr(node, "class")
        .map(|class| class.contains(fragment))
        .unwrap_or(false)
}

/// Checks whether the raw class attribute contains any of the given literals.
/// Empty literals never match.
pub fn class_contains_any(node: &Handle, literals: &[String]) -> bool {
    match get_node_attr(node, "class") {
        Some(class) => literals
            .iter()
            .any(|literal| !literal.is_empty() && class.contains(literal.as_str())),
        None => false,
    }
}

/// Checks whether `class` is one of the node's whitespace-separated class names
pub fn has_class(node: &Handle, class: &str) -> bool {
    get_node_attr(node, "class")
        .map(|value| value.split(WHITESPACES).any(|token| token == class))
        .unwrap_or(false)
}
