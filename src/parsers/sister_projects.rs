//! Discovery of links to the same article on sister projects (Wikiquote,
//! Commons, Wiktionary, ...).
//!
//! Only the "external links" section of a page is searched, and inside it
//! only the boxes the wikis use for sister project links:
//!
//! - en: `<table class="metadata plainlinks mbox-small">` with interwiki anchors
//! - ru: `<div class="infobox sisterproject noprint wikiquote-box">` with
//!   `wikiquote-ref` / `wikicommons-ref` spans

use std::sync::OnceLock;

use markup5ever_rcdom::Handle;
use regex::Regex;
use tracing::debug;

use crate::error::Result;
use crate::projects::ProjectRegistry;
use crate::utils::url::decode_title;

use super::blocks::{compile_titles, find_block_contents};
use super::html::dom::{find_all, find_first, get_node_attr, is_element_named, DocumentTree};
use super::html::utils::has_class;

/// "This page has a counterpart titled `title` on project `project_code`"
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SisterProjectLink {
    pub project_code: String,
    pub title: String,
}

impl SisterProjectLink {
    pub fn new(project_code: &str, title: &str) -> SisterProjectLink {
        SisterProjectLink {
            project_code: project_code.to_string(),
            title: title.to_string(),
        }
    }
}

fn project_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:http:)?//([^/]+)/wiki/(?:Special:Search/)?([^/?]+)(?:\?.*)?$")
            .expect("valid project URL pattern")
    })
}

fn interwiki_href_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:http:)?//.+\.org/wiki/").expect("valid interwiki pattern"))
}

fn interwiki_class_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(extiw|external text)$").expect("valid interwiki class pattern"))
}

fn ref_span_class_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"wikiquote-ref|wikicommons-ref").expect("valid ref class pattern"))
}

/// Whether a section item is one of the sister project boxes
fn is_sister_project_box(node: &Handle) -> bool {
    (is_element_named(node, "table") && has_class(node, "plainlinks"))
        || (is_element_named(node, "div")
            && has_class(node, "infobox")
            && has_class(node, "sisterproject"))
}

fn attr_matches(node: &Handle, attr_name: &str, re: &Regex) -> bool {
    get_node_attr(node, attr_name)
        .map(|value| re.is_match(&value))
        .unwrap_or(false)
}

/// Hrefs of sister project links inside one box, in document order
fn collect_hrefs(item: &Handle, lang: &str) -> Vec<String> {
    match lang {
        "ru" => find_all(item, |node| {
            is_element_named(node, "span") && attr_matches(node, "class", ref_span_class_regex())
        })
        .iter()
        .filter_map(|span| find_first(span, |node| is_element_named(node, "a")))
        .filter_map(|anchor| get_node_attr(&anchor, "href"))
        .collect(),
        "en" => find_all(item, |node| {
            is_element_named(node, "a")
                && attr_matches(node, "href", interwiki_href_regex())
                && attr_matches(node, "class", interwiki_class_regex())
        })
        .iter()
        .filter_map(|anchor| get_node_attr(anchor, "href"))
        .collect(),
        // Other wikis lay their boxes out differently
        _ => Vec::new(),
    }
}

/// Resolves one href against the registry; a link may match several projects
pub fn resolve_project_url(
    href: &str,
    lang: &str,
    registry: &ProjectRegistry,
) -> Result<Vec<SisterProjectLink>> {
    let mut links = Vec::new();

    let Some(captures) = project_url_regex().captures(href) else {
        return Ok(links);
    };
    let domain = &captures[1];
    let encoded_title = &captures[2];

    for project in registry.iter() {
        if domain == project.domain_for(lang) {
            let title = decode_title(encoded_title)?;
            links.push(SisterProjectLink {
                project_code: project.code.clone(),
                title,
            });
        }
    }

    Ok(links)
}

/// Collects the sister project links of a page.
///
/// The tree is only read, so this can run before the sanitizer deletes the
/// external links section. Duplicates are kept in page order.
pub fn extract_sister_projects(
    tree: &DocumentTree,
    lang: &str,
    registry: &ProjectRegistry,
    section_titles: &[String],
) -> Result<Vec<SisterProjectLink>> {
    let Some(titles) = compile_titles(section_titles)? else {
        return Ok(Vec::new());
    };

    let hrefs: Vec<String> = find_block_contents(tree.root(), &titles, true)
        .iter()
        .filter(|item| is_sister_project_box(item))
        .flat_map(|item| collect_hrefs(item, lang))
        .collect();

    let mut links = Vec::new();
    for href in &hrefs {
        links.extend(resolve_project_url(href, lang, registry)?);
    }

    debug!(lang, found = links.len(), "sister project links");
    Ok(links)
}
