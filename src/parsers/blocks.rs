//! Level-2 heading delimited sections of a rendered page.

use markup5ever_rcdom::Handle;
use regex::Regex;

use crate::error::{Result, WikimediaError};

use super::html::dom::{
    detach_node, find_all, find_parent_by_name, get_text, is_element, is_element_named,
    next_sibling,
};

const SECTION_HEADING: &str = "h2";

/// Joins heading patterns into one alternation; `None` for an empty list
pub fn compile_titles(titles: &[String]) -> Result<Option<Regex>> {
    let titles: Vec<&str> = titles
        .iter()
        .map(String::as_str)
        .filter(|title| !title.is_empty())
        .collect();

    if titles.is_empty() {
        return Ok(None);
    }

    Regex::new(&format!("({})", titles.join("|")))
        .map(Some)
        .map_err(|err| WikimediaError::Config(format!("invalid section titles: {err}")))
}

/// Finds the sections whose heading text matches `titles`.
///
/// For every matching text node inside an `h2`, the heading and all of its
/// following siblings up to the next `h2` are returned, never leaving the
/// heading's parent. Matching text outside of any `h2` is ignored. With
/// `exclude_boundary_text` only element nodes after the heading are kept.
pub fn find_block_contents(
    root: &Handle,
    titles: &Regex,
    exclude_boundary_text: bool,
) -> Vec<Handle> {
    let mut items = Vec::new();

    let title_nodes = find_all(root, |node| {
        get_text(node)
            .map(|text| titles.is_match(&text))
            .unwrap_or(false)
    });

    for title_node in title_nodes {
        let Some(heading) = find_parent_by_name(&title_node, SECTION_HEADING) else {
            continue;
        };

        if !exclude_boundary_text {
            items.push(heading.clone());
        }

        let mut next = next_sibling(&heading);
        while let Some(node) = next {
            if is_element_named(&node, SECTION_HEADING) {
                break;
            }
            if !exclude_boundary_text || is_element(&node) {
                items.push(node.clone());
            }
            next = next_sibling(&node);
        }
    }

    items
}

/// Deletes every section whose heading matches `titles`; returns the
/// number of detached nodes
pub fn remove_blocks(root: &Handle, titles: &Regex) -> usize {
    let items = find_block_contents(root, titles, false);
    for item in &items {
        detach_node(item);
    }
    items.len()
}
