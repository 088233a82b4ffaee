//! Registry of known Wikimedia projects and how their domains are built.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, WikimediaError};

/// A wiki site sharing the MediaWiki rendering conventions
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct WikiProject {
    pub code: String,
    pub domain: String,
    /// Whether every language lives on its own subdomain (`ru.wikiquote.org`)
    #[serde(default)]
    pub subdomain_lang: bool,
}

impl WikiProject {
    pub fn new(code: &str, domain: &str, subdomain_lang: bool) -> WikiProject {
        WikiProject {
            code: code.to_string(),
            domain: domain.to_string(),
            subdomain_lang,
        }
    }

    pub fn domain_for(&self, lang: &str) -> String {
        if self.subdomain_lang {
            format!("{}.{}", lang, self.domain)
        } else {
            self.domain.clone()
        }
    }
}

#[derive(Deserialize)]
struct RegistryFile {
    #[serde(default, rename = "project")]
    projects: Vec<WikiProject>,
}

/// Ordered set of projects, looked up by code.
///
/// Read-only once built; wrap it in an `Arc` to share it between imports.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectRegistry {
    projects: Vec<WikiProject>,
}

impl ProjectRegistry {
    pub fn new() -> ProjectRegistry {
        ProjectRegistry::default()
    }

    /// Wikipedia and its sister projects
    pub fn with_defaults() -> ProjectRegistry {
        let mut registry = ProjectRegistry::new();

        for (code, domain) in [
            ("wikipedia", "wikipedia.org"),
            ("wikiquote", "wikiquote.org"),
            ("wiktionary", "wiktionary.org"),
            ("wikibooks", "wikibooks.org"),
            ("wikisource", "wikisource.org"),
            ("wikinews", "wikinews.org"),
            ("wikiversity", "wikiversity.org"),
            ("wikivoyage", "wikivoyage.org"),
        ] {
            registry.register(WikiProject::new(code, domain, true));
        }

        for (code, domain) in [
            ("wikicommons", "commons.wikimedia.org"),
            ("wikispecies", "species.wikimedia.org"),
            ("wikidata", "www.wikidata.org"),
        ] {
            registry.register(WikiProject::new(code, domain, false));
        }

        registry
    }

    /// Parses `[[project]]` tables:
    ///
    /// ```toml
    /// [[project]]
    /// code = "wikiquote"
    /// domain = "wikiquote.org"
    /// subdomain_lang = true
    /// ```
    pub fn from_toml_str(text: &str) -> Result<ProjectRegistry> {
        let file: RegistryFile = toml::from_str(text)
            .map_err(|err| WikimediaError::Config(format!("invalid project registry: {err}")))?;

        let mut registry = ProjectRegistry::new();
        for project in file.projects {
            if project.code.is_empty() || project.domain.is_empty() {
                return Err(WikimediaError::Config(
                    "project code and domain must not be empty".to_string(),
                ));
            }
            registry.register(project);
        }

        Ok(registry)
    }

    pub fn load(path: &Path) -> Result<ProjectRegistry> {
        let text = fs::read_to_string(path)?;
        ProjectRegistry::from_toml_str(&text)
    }

    /// Adds a project, replacing one with the same code in place
    pub fn register(&mut self, project: WikiProject) {
        match self.projects.iter_mut().find(|p| p.code == project.code) {
            Some(existing) => *existing = project,
            None => self.projects.push(project),
        }
    }

    pub fn get(&self, code: &str) -> Option<&WikiProject> {
        self.projects.iter().find(|project| project.code == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WikiProject> {
        self.projects.iter()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
