use std::collections::BTreeMap;

use tracing::debug;

use crate::error::Result;
use crate::parsers::{
    extract_sister_projects, parse_gallery_images, serialize_document, ContentSanitizer,
    DocumentTree, GalleryImage, GarbageRules, SisterProjectLink,
};
use crate::projects::{ProjectRegistry, WikiProject};
use crate::utils::url::get_referer_url;

const ANSI_COLOR_RED: &str = "\x1b[31m";
const ANSI_COLOR_RESET: &str = "\x1b[0m";
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Everything an import keeps from one rendered page
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProcessedContent {
    /// Cleaned HTML fragment (children of `<body>`)
    pub content: String,
    /// Found in the external links section before it was removed
    pub sister_projects: Vec<SisterProjectLink>,
    pub images: Vec<GalleryImage>,
}

/// Cleans a rendered page and collects what it links to.
///
/// Sister project links and gallery images are read before sanitizing,
/// since both live in sections the sanitizer deletes.
pub fn process_content(
    raw: &[u8],
    lang: &str,
    registry: &ProjectRegistry,
    rules: &GarbageRules,
) -> Result<ProcessedContent> {
    let sanitizer = ContentSanitizer::new(rules)?;
    process_content_with(raw, lang, registry, &sanitizer)
}

/// Same as [`process_content`] with an already validated sanitizer
pub fn process_content_with(
    raw: &[u8],
    lang: &str,
    registry: &ProjectRegistry,
    sanitizer: &ContentSanitizer,
) -> Result<ProcessedContent> {
    let mut tree = DocumentTree::parse(raw);

    let sister_projects = extract_sister_projects(
        &tree,
        lang,
        registry,
        &sanitizer.rules().titles.external_links,
    )?;
    let images = parse_gallery_images(tree.root());

    sanitizer.sanitize(&mut tree);
    let content = serialize_document(&tree);

    debug!(
        lang,
        bytes = content.len(),
        sister_projects = sister_projects.len(),
        images = images.len(),
        "processed page"
    );

    Ok(ProcessedContent {
        content,
        sister_projects,
        images,
    })
}

/// Headers sent with every page request
pub fn request_headers(
    project: &WikiProject,
    lang: &str,
    user_agent: &str,
) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert("User-Agent".to_string(), user_agent.to_string());
    headers.insert("Accept".to_string(), ACCEPT.to_string());
    headers.insert(
        "Accept-Language".to_string(),
        format!("{lang},en-us;q=0.7,en;q=0.3"),
    );
    headers.insert("Referer".to_string(), get_referer_url(project, lang));
    headers
}

/// Prints an error message to stderr, in red when asked to
pub fn print_error_message(msg: &str, color: bool) {
    if color {
        eprintln!("{ANSI_COLOR_RED}{msg}{ANSI_COLOR_RESET}");
    } else {
        eprintln!("{msg}");
    }
}
