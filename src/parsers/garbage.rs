//! Configuration of what gets stripped from a rendered wiki page.
//!
//! Every removal category is an independent toggle. The literal lists only
//! seed the buckets the sanitizer fills while it runs; the value itself is
//! never changed by sanitizing, so one `GarbageRules` can be shared by any
//! number of imports.

use regex::Regex;
use serde::Deserialize;

use crate::error::{Result, WikimediaError};

/// Heading patterns of the sections that are cut out of a page (and, for
/// external links, searched for sister project boxes first).
///
/// Entries are regular expression fragments joined into one alternation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SectionTitles {
    pub external_links: Vec<String>,
    pub see_also: Vec<String>,
    pub references: Vec<String>,
}

impl SectionTitles {
    pub fn russian() -> SectionTitles {
        SectionTitles {
            external_links: vec!["Ссылки".to_string()],
            see_also: vec!["См[^ ]+ также".to_string()],
            references: vec!["Примечания".to_string(), "Источники".to_string()],
        }
    }

    pub fn english() -> SectionTitles {
        SectionTitles {
            external_links: vec!["links".to_string()],
            see_also: vec!["See also".to_string()],
            references: vec!["References".to_string()],
        }
    }

    /// Titles for a page language; unknown languages get every locale
    pub fn for_language(lang: &str) -> SectionTitles {
        match lang {
            "ru" => SectionTitles::russian(),
            "en" => SectionTitles::english(),
            _ => SectionTitles::russian().merged(SectionTitles::english()),
        }
    }

    fn merged(mut self, other: SectionTitles) -> SectionTitles {
        self.external_links.extend(other.external_links);
        self.see_also.extend(other.see_also);
        self.references.extend(other.references);
        self
    }

    fn all(&self) -> impl Iterator<Item = &String> {
        self.external_links
            .iter()
            .chain(self.see_also.iter())
            .chain(self.references.iter())
    }
}

impl Default for SectionTitles {
    fn default() -> Self {
        SectionTitles::for_language("")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GarbageRules {
    /// `[edit]` links next to headings
    pub edit_links: bool,
    /// Table of contents
    pub contents: bool,
    pub script: bool,
    pub comments: bool,
    /// Whole "External links" section
    pub external_links: bool,
    /// Whole "See also" section
    pub see_also: bool,
    /// Reference lists and the "References" section
    pub reference: bool,
    /// `[1]`-style superscripts pointing into the reference list
    pub reference_links: bool,
    pub infobox: bool,
    /// Boxes linking to Wikiquote, Commons and other sister projects
    pub sisterproject: bool,
    pub navbox: bool,
    /// "For other uses, see ..." hatnotes
    pub disambiguation: bool,
    pub thumb_images: bool,
    pub audio: bool,
    /// `style` and `bgcolor` attributes
    pub style_attribute: bool,
    pub class_attribute: bool,

    /// Extra class literals of tables to remove
    pub table_classes: Vec<String>,
    /// Extra class literals of divs to remove
    pub div_classes: Vec<String>,
    /// Extra class literals of spans to remove
    pub span_classes: Vec<String>,
    /// Extra heading patterns whose whole section is removed
    pub block_titles: Vec<String>,

    pub titles: SectionTitles,
}

impl GarbageRules {
    /// Everything enabled, with the section titles of `lang`
    pub fn for_language(lang: &str) -> GarbageRules {
        GarbageRules {
            edit_links: true,
            contents: true,
            script: true,
            comments: true,
            external_links: true,
            see_also: true,
            reference: true,
            reference_links: true,
            infobox: true,
            sisterproject: true,
            navbox: true,
            disambiguation: true,
            thumb_images: true,
            audio: true,
            style_attribute: true,
            class_attribute: true,
            table_classes: Vec::new(),
            div_classes: Vec::new(),
            span_classes: Vec::new(),
            block_titles: Vec::new(),
            titles: SectionTitles::for_language(lang),
        }
    }

    /// Every category switched off; only the unconditional clean-up runs
    pub fn disabled() -> GarbageRules {
        GarbageRules {
            edit_links: false,
            contents: false,
            script: false,
            comments: false,
            external_links: false,
            see_also: false,
            reference: false,
            reference_links: false,
            infobox: false,
            sisterproject: false,
            navbox: false,
            disambiguation: false,
            thumb_images: false,
            audio: false,
            style_attribute: false,
            class_attribute: false,
            ..GarbageRules::default()
        }
    }

    /// Rejects literals that would match every element and title patterns
    /// that are not valid regular expressions
    pub fn validate(&self) -> Result<()> {
        let literals = [
            ("table_classes", &self.table_classes),
            ("div_classes", &self.div_classes),
            ("span_classes", &self.span_classes),
        ];
        for (list_name, list) in literals {
            if list.iter().any(|literal| literal.is_empty()) {
                return Err(WikimediaError::Config(format!(
                    "{list_name} contains an empty class literal"
                )));
            }
        }

        for pattern in self.block_titles.iter().chain(self.titles.all()) {
            if pattern.is_empty() {
                return Err(WikimediaError::Config(
                    "section title patterns must not be empty".to_string(),
                ));
            }
            if let Err(err) = Regex::new(pattern) {
                return Err(WikimediaError::Config(format!(
                    "invalid section title pattern \"{pattern}\": {err}"
                )));
            }
        }

        Ok(())
    }

    /// Title patterns of every section this configuration removes
    pub fn removed_block_titles(&self) -> Vec<String> {
        let mut titles = self.block_titles.clone();

        if self.external_links {
            titles.extend(self.titles.external_links.iter().cloned());
        }
        if self.see_also {
            titles.extend(self.titles.see_also.iter().cloned());
        }
        if self.reference {
            titles.extend(self.titles.references.iter().cloned());
        }

        titles
    }
}

impl Default for GarbageRules {
    fn default() -> Self {
        GarbageRules::for_language("")
    }
}
