//! Removal of wiki chrome from a rendered page.
//!
//! The steps run in a fixed order. Several categories only register class
//! literals into shared buckets (tables, divs, spans), which are removed in
//! one batch near the end, and heading patterns, whose sections are removed
//! right after. Attribute stripping comes last because the batch removal
//! still needs the `class` attributes.

use markup5ever_rcdom::Handle;
use regex::Regex;
use tracing::trace;

use crate::error::Result;

use super::blocks::{compile_titles, remove_blocks};
use super::garbage::GarbageRules;
use super::html::dom::{
    detach_node, find_all, find_all_preceding, find_first, get_node_attr, is_comment, is_element,
    is_element_named, set_node_attr, top_level_ancestor, DocumentTree,
};
use super::html::utils::{class_contains, class_contains_any, has_class};

const AUDIO_PLAYER_ID_PREFIX: &str = "ogg_player_";

/// Class literals collected while sanitizing one tree
#[derive(Debug, Default)]
struct ClassBuckets {
    tables: Vec<String>,
    divs: Vec<String>,
    spans: Vec<String>,
}

impl ClassBuckets {
    fn seeded(rules: &GarbageRules) -> ClassBuckets {
        ClassBuckets {
            tables: rules.table_classes.clone(),
            divs: rules.div_classes.clone(),
            spans: rules.span_classes.clone(),
        }
    }

    fn add_tables(&mut self, literals: &[&str]) {
        self.tables.extend(literals.iter().map(|l| l.to_string()));
    }

    fn add_divs(&mut self, literals: &[&str]) {
        self.divs.extend(literals.iter().map(|l| l.to_string()));
    }

    fn add_spans(&mut self, literals: &[&str]) {
        self.spans.extend(literals.iter().map(|l| l.to_string()));
    }
}

/// Applies a [`GarbageRules`] configuration to parsed pages
pub struct ContentSanitizer {
    rules: GarbageRules,
    block_titles: Option<Regex>,
}

impl ContentSanitizer {
    /// Validates the rules and compiles the section title patterns once
    pub fn new(rules: &GarbageRules) -> Result<ContentSanitizer> {
        rules.validate()?;
        let block_titles = compile_titles(&rules.removed_block_titles())?;

        Ok(ContentSanitizer {
            rules: rules.clone(),
            block_titles,
        })
    }

    pub fn rules(&self) -> &GarbageRules {
        &self.rules
    }

    /// Strips everything the rules ask for from the tree, in place
    pub fn sanitize<'t>(&self, tree: &'t mut DocumentTree) -> &'t mut DocumentTree {
        let root = tree.root().clone();
        let rules = &self.rules;
        let mut buckets = ClassBuckets::seeded(rules);

        if rules.edit_links {
            let removed = detach_all(&root, |node| has_class(node, "editsection"));
            trace!(removed, "edit links");
        }

        if rules.contents {
            let removed = detach_all(&root, |node| {
                get_node_attr(node, "id").as_deref() == Some("toc") && has_class(node, "toc")
            });
            trace!(removed, "table of contents");
        }

        if rules.script {
            let removed = detach_all(&root, |node| is_element_named(node, "script"));
            trace!(removed, "scripts");
        }

        if rules.comments {
            let removed = detach_all(&root, is_comment);
            trace!(removed, "comments");
        }

        // Section titles of external links, see also and references were
        // compiled in `new`; references also own two list classes
        if rules.reference {
            buckets.add_divs(&["reflist", "references-small"]);
        }

        if rules.reference_links {
            let removed = detach_all(&root, |node| {
                is_element_named(node, "sup") && has_class(node, "reference")
            });
            trace!(removed, "reference links");
        }

        if let Some(infobox) = find_first(&root, |node| class_contains(node, "infobox")) {
            if rules.disambiguation {
                // Hatnotes conventionally sit above the infobox
                let preceding = find_all_preceding(&root, &infobox, is_element);
                for node in &preceding {
                    detach_node(node);
                }
                trace!(removed = preceding.len(), "elements preceding infobox");
            }
            if rules.infobox {
                detach_node(&infobox);
                // Pages may carry secondary infoboxes further down
                buckets.add_tables(&["infobox"]);
                buckets.add_divs(&["infobox"]);
            }
        }

        if rules.sisterproject {
            buckets.add_tables(&["metadata"]);
            buckets.add_divs(&["sisterproject", "wikiquote-box"]);
        }

        if rules.navbox {
            buckets.add_tables(&["navbox", "NavFrame", "toccolours"]);
            buckets.add_divs(&["navbox", "NavFrame"]);
        }

        if rules.disambiguation {
            buckets.add_divs(&["dablink"]);
        }

        if rules.thumb_images {
            buckets.add_divs(&["thumb"]);
        }

        if rules.audio {
            let players = find_all(&root, |node| {
                is_element_named(node, "div")
                    && get_node_attr(node, "id")
                        .map(|id| id.starts_with(AUDIO_PLAYER_ID_PREFIX))
                        .unwrap_or(false)
            });
            // Resolve every container first, players may share one
            let containers: Vec<Handle> = players
                .iter()
                .filter_map(|player| top_level_ancestor(&root, player))
                .collect();
            for container in &containers {
                detach_node(container);
            }
            trace!(removed = containers.len(), "audio players");
            buckets.add_spans(&["audiolink", "audiolinkinfo"]);
        }

        // Lock icon of protected pages
        detach_all(&root, |node| {
            get_node_attr(node, "id").as_deref() == Some("protected-icon")
        });
        buckets.add_divs(&["metadata"]);

        let removed = detach_all(&root, |node| {
            (is_element_named(node, "table") && class_contains_any(node, &buckets.tables))
                || (is_element_named(node, "div") && class_contains_any(node, &buckets.divs))
                || (is_element_named(node, "span") && class_contains_any(node, &buckets.spans))
        });
        trace!(removed, "class literals");

        if let Some(block_titles) = &self.block_titles {
            let removed = remove_blocks(&root, block_titles);
            trace!(removed, "section blocks");
        }

        if rules.style_attribute {
            for node in find_all(&root, is_element) {
                set_node_attr(&node, "style", None);
                set_node_attr(&node, "bgcolor", None);
            }
        }

        if rules.class_attribute {
            for node in find_all(&root, is_element) {
                set_node_attr(&node, "class", None);
            }
        }

        tree
    }
}

/// Convenience wrapper validating `rules` and sanitizing `tree` in one go
pub fn sanitize<'t>(
    tree: &'t mut DocumentTree,
    rules: &GarbageRules,
) -> Result<&'t mut DocumentTree> {
    let sanitizer = ContentSanitizer::new(rules)?;
    Ok(sanitizer.sanitize(tree))
}

fn detach_all<P>(root: &Handle, predicate: P) -> usize
where
    P: Fn(&Handle) -> bool,
{
    let nodes = find_all(root, predicate);
    for node in &nodes {
        detach_node(node);
    }
    nodes.len()
}
