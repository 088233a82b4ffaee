use percent_encoding::percent_decode_str;
pub use url::Url;

use crate::error::Result;
use crate::projects::WikiProject;

/// Decodes a percent-encoded page title taken from a link.
///
/// Invalid UTF-8 is reported instead of being replaced.
pub fn decode_title(encoded_title: &str) -> Result<String> {
    Ok(percent_decode_str(encoded_title).decode_utf8()?.into_owned())
}

/// URL of the bare rendered article body (`action=render`) of a page
pub fn get_render_url(project: &WikiProject, title: &str, lang: &str) -> Result<Url> {
    let mut url = Url::parse(&format!("https://{}/w/index.php", project.domain_for(lang)))?;

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("title", title);
        query.append_pair("action", "render");
        if !project.subdomain_lang {
            // Shared multilingual wikis pick the interface language from here
            query.append_pair("uselang", lang);
        }
    }

    Ok(url)
}

pub fn get_referer_url(project: &WikiProject, lang: &str) -> String {
    format!("https://{}/", project.domain_for(lang))
}
