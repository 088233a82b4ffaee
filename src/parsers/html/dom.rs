use std::rc::Rc;

use encoding_rs::Encoding;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parsed page content with a handle on the element that holds it.
///
/// Rendered wiki pages are fragments, so the root is the `<body>` the parser
/// wraps them in; its direct children are the top-level nodes of the page.
pub struct DocumentTree {
    /// Owns the nodes above `root`
    _dom: RcDom,
    root: Handle,
}

impl DocumentTree {
    /// Parses UTF-8 encoded page content
    pub fn parse(data: &[u8]) -> DocumentTree {
        DocumentTree::parse_with_encoding(data, "utf-8")
    }

    pub fn parse_with_encoding(data: &[u8], document_encoding: &str) -> DocumentTree {
        let dom = html_to_dom(data, document_encoding.to_string());
        let root = get_child_node_by_name(&dom.document, "html")
            .and_then(|html| get_child_node_by_name(&html, "body"))
            .unwrap_or_else(|| dom.document.clone());

        DocumentTree { _dom: dom, root }
    }

    pub fn root(&self) -> &Handle {
        &self.root
    }
}

/// Converts HTML bytes into a DOM, keeping every node of the fragment inside `<body>`
pub fn html_to_dom(data: &[u8], document_encoding: String) -> RcDom {
    let s: String;

    if let Some(encoding) = Encoding::for_label(document_encoding.as_bytes()) {
        let (string, _, _) = encoding.decode(data);
        s = string.to_string();
    } else {
        s = String::from_utf8_lossy(data).to_string();
    }

    // An explicit head/body pair stops leading scripts and comments
    // from being hoisted out of the content
    let wrapped = format!("<!DOCTYPE html><html><head></head><body>{s}</body></html>");

    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .one(wrapped.as_bytes())
}

/// Returns the first direct child element with the given tag name
pub fn get_child_node_by_name(parent: &Handle, node_name: &str) -> Option<Handle> {
    let children = parent.children.borrow();
    let matching_children = children.iter().find(|child| match child.data {
        NodeData::Element { ref name, .. } => &*name.local == node_name,
        _ => false,
    });
    matching_children.cloned()
}

pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => {
            for attr in attrs.borrow().iter() {
                if &*attr.name.local == attr_name {
                    return Some(attr.value.to_string());
                }
            }
            None
        }
        _ => None,
    }
}

pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

pub fn is_element(node: &Handle) -> bool {
    matches!(node.data, NodeData::Element { .. })
}

pub fn is_element_named(node: &Handle, tag: &str) -> bool {
    get_node_name(node) == Some(tag)
}

pub fn is_comment(node: &Handle) -> bool {
    matches!(node.data, NodeData::Comment { .. })
}

/// Text of a text node, `None` for every other kind of node
pub fn get_text(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Text { contents } => Some(contents.borrow().to_string()),
        _ => None,
    }
}

/// Returns the parent without disturbing the node's back-reference
pub fn get_parent_node(child: &Handle) -> Option<Handle> {
    let weak = child.parent.take();
    let parent = weak.as_ref().and_then(|node| node.upgrade());
    child.parent.set(weak);
    parent
}

/// Sets an attribute, or removes it entirely when `attr_value` is `None`
pub fn set_node_attr(node: &Handle, attr_name: &str, attr_value: Option<String>) {
    use html5ever::interface::{Attribute, QualName};
    use html5ever::tendril::format_tendril;
    use html5ever::{namespace_url, ns, LocalName};

    if let NodeData::Element { attrs, .. } = &node.data {
        let attrs_mut = &mut attrs.borrow_mut();
        let mut i = 0;
        let mut found_existing_attr: bool = false;

        while i < attrs_mut.len() {
            if &attrs_mut[i].name.local == attr_name {
                found_existing_attr = true;

                if let Some(attr_value) = attr_value.clone() {
                    attrs_mut[i].value.clear();
                    attrs_mut[i].value.push_slice(attr_value.as_str());
                } else {
                    attrs_mut.remove(i);
                    continue;
                }
            }

            i += 1;
        }

        if !found_existing_attr {
            if let Some(attr_value) = attr_value {
                let name = LocalName::from(attr_name);

                attrs_mut.push(Attribute {
                    name: QualName::new(None, ns!(), name),
                    value: format_tendril!("{}", attr_value),
                });
            }
        }
    };
}

/// Removes a node and its subtree from the tree.
///
/// Calling it again on the same node, or on a node whose parent was
/// already detached, does nothing harmful.
pub fn detach_node(node: &Handle) {
    if let Some(parent) = get_parent_node(node) {
        parent
            .children
            .borrow_mut()
            .retain(|child| !Rc::ptr_eq(child, node));
    }
    node.parent.set(None);
}

/// Collects every descendant of `node` (not `node` itself) matching the
/// predicate, in document order
pub fn find_all<P>(node: &Handle, predicate: P) -> Vec<Handle>
where
    P: Fn(&Handle) -> bool,
{
    let mut found_nodes = Vec::new();
    collect_matching(node, &predicate, &mut found_nodes);
    found_nodes
}

fn collect_matching<P>(node: &Handle, predicate: &P, found_nodes: &mut Vec<Handle>)
where
    P: Fn(&Handle) -> bool,
{
    for child_node in node.children.borrow().iter() {
        if predicate(child_node) {
            found_nodes.push(child_node.clone());
        }
        collect_matching(child_node, predicate, found_nodes);
    }
}

/// First descendant of `node` matching the predicate, in document order
pub fn find_first<P>(node: &Handle, predicate: P) -> Option<Handle>
where
    P: Fn(&Handle) -> bool,
{
    fn search<P: Fn(&Handle) -> bool>(node: &Handle, predicate: &P) -> Option<Handle> {
        for child_node in node.children.borrow().iter() {
            if predicate(child_node) {
                return Some(child_node.clone());
            }
            if let Some(found) = search(child_node, predicate) {
                return Some(found);
            }
        }
        None
    }

    search(node, &predicate)
}

/// Ancestors of a node, nearest first
pub fn get_ancestors(node: &Handle) -> Vec<Handle> {
    let mut ancestors = Vec::new();
    let mut current = get_parent_node(node);

    while let Some(parent) = current {
        current = get_parent_node(&parent);
        ancestors.push(parent);
    }

    ancestors
}

/// Nearest ancestor element with the given tag name
pub fn find_parent_by_name(node: &Handle, tag: &str) -> Option<Handle> {
    get_ancestors(node)
        .into_iter()
        .find(|ancestor| is_element_named(ancestor, tag))
}

pub fn next_sibling(node: &Handle) -> Option<Handle> {
    let parent = get_parent_node(node)?;
    let siblings = parent.children.borrow();
    let position = siblings.iter().position(|child| Rc::ptr_eq(child, node))?;
    let sibling = siblings.get(position + 1).cloned();
    sibling
}

/// Walks up from `node` to the ancestor sitting directly under `root`.
///
/// A node that is itself a child of `root` is returned as is; `None` means
/// the node is not inside `root` at all.
pub fn top_level_ancestor(root: &Handle, node: &Handle) -> Option<Handle> {
    let mut current = node.clone();

    loop {
        let parent = get_parent_node(&current)?;
        if Rc::ptr_eq(&parent, root) {
            return Some(current);
        }
        current = parent;
    }
}

/// Elements that start before `target` in document order, excluding its
/// ancestors
pub fn find_all_preceding<P>(root: &Handle, target: &Handle, predicate: P) -> Vec<Handle>
where
    P: Fn(&Handle) -> bool,
{
    fn visit<P: Fn(&Handle) -> bool>(
        node: &Handle,
        target: &Handle,
        predicate: &P,
        found_nodes: &mut Vec<Handle>,
    ) -> bool {
        for child_node in node.children.borrow().iter() {
            if Rc::ptr_eq(child_node, target) {
                return true;
            }

            let index = found_nodes.len();
            let matched = predicate(child_node);
            if matched {
                found_nodes.push(child_node.clone());
            }

            if visit(child_node, target, predicate, found_nodes) {
                // An ancestor of the target does not precede it
                if matched {
                    found_nodes.remove(index);
                }
                return true;
            }
        }
        false
    }

    let mut found_nodes = Vec::new();
    visit(root, target, &predicate, &mut found_nodes);
    found_nodes
}
