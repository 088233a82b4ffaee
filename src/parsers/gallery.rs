//! Image galleries (`<ul class="gallery">`), used mostly on Commons pages.

use std::sync::OnceLock;

use markup5ever_rcdom::Handle;
use regex::Regex;

use super::html::dom::{
    find_all, find_first, get_node_attr, get_text, is_element, is_element_named,
};
use super::html::serializer::serialize_node;
use super::html::utils::has_class;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GalleryImage {
    /// Full-size file URL
    pub url: String,
    pub caption: String,
}

fn thumbnail_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.+)thumb/(.+)/[^/]+").expect("valid thumbnail pattern"))
}

/// Maps a thumbnail URL to the original file:
/// `//upload.wikimedia.org/wikipedia/commons/thumb/4/45/Einst_4.jpg/83px-Einst_4.jpg`
/// becomes `http://upload.wikimedia.org/wikipedia/commons/4/45/Einst_4.jpg`
pub fn original_image_url(src: &str) -> String {
    let url = thumbnail_regex().replace(src, "${1}${2}").into_owned();

    if url.starts_with("//") {
        format!("http:{url}")
    } else {
        url
    }
}

/// First child of the paragraph inside the caption div, as text or markup;
/// empty when missing
fn gallery_caption(item: &Handle) -> String {
    find_first(item, |node| {
        is_element_named(node, "div") && has_class(node, "gallerytext")
    })
    .and_then(|text_div| find_first(&text_div, |node| is_element_named(node, "p")))
    .and_then(|paragraph| {
        let first = paragraph.children.borrow().first().cloned()?;
        get_text(&first).or_else(|| is_element(&first).then(|| serialize_node(&first)))
    })
    .unwrap_or_default()
}

/// Collects the images of every gallery box below `root`; boxes without an
/// image are skipped
pub fn parse_gallery_images(root: &Handle) -> Vec<GalleryImage> {
    let mut images = Vec::new();

    for item in find_all(root, |node| {
        is_element_named(node, "li") && has_class(node, "gallerybox")
    }) {
        let Some(src) = find_first(&item, |node| is_element_named(node, "img"))
            .and_then(|img| get_node_attr(&img, "src"))
        else {
            continue;
        };

        images.push(GalleryImage {
            url: original_image_url(&src),
            caption: gallery_caption(&item),
        });
    }

    images
}
