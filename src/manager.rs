//! Importing pages into a [`PageStore`], following sister project links.

use std::collections::{HashSet, VecDeque};

use chrono::Utc;
use tracing::{debug, warn};

use crate::core::{process_content, request_headers, ProcessedContent};
use crate::error::{Result, WikimediaError};
use crate::network::{Fetcher, DEFAULT_USER_AGENT};
use crate::parsers::{GarbageRules, SisterProjectLink};
use crate::projects::{ProjectRegistry, WikiProject};
use crate::storage::{ObjectRef, PageFilter, PageStore, Wikipage};
use crate::utils::url::{get_render_url, Url};

/// Identity of a page across one import run
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PageKey {
    pub project: String,
    pub title: String,
    pub lang: String,
}

impl PageKey {
    pub fn new(project: &str, title: &str, lang: &str) -> PageKey {
        PageKey {
            project: project.to_string(),
            title: title.to_string(),
            lang: lang.to_string(),
        }
    }
}

/// One page to (re)import
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateRequest {
    pub project: String,
    pub title: String,
    pub lang: String,
    pub object: Option<ObjectRef>,
    /// Also import the pages this one links to on sister projects
    pub sister_projects: bool,
}

impl UpdateRequest {
    pub fn new(project: &str, title: &str, lang: &str) -> UpdateRequest {
        UpdateRequest {
            project: project.to_string(),
            title: title.to_string(),
            lang: lang.to_string(),
            object: None,
            sister_projects: false,
        }
    }

    pub fn object(mut self, object: ObjectRef) -> UpdateRequest {
        self.object = Some(object);
        self
    }

    pub fn sister_projects(mut self, sister_projects: bool) -> UpdateRequest {
        self.sister_projects = sister_projects;
        self
    }

    fn key(&self) -> PageKey {
        PageKey::new(&self.project, &self.title, &self.lang)
    }
}

pub struct WikipageManager<F: Fetcher, S: PageStore> {
    fetcher: F,
    store: S,
    registry: ProjectRegistry,
    languages: Vec<String>,
    default_language: Option<String>,
    rules: Option<GarbageRules>,
    sister_depth: usize,
    user_agent: String,
}

impl<F: Fetcher, S: PageStore> WikipageManager<F, S> {
    pub fn new(
        fetcher: F,
        store: S,
        registry: ProjectRegistry,
        languages: Vec<String>,
    ) -> WikipageManager<F, S> {
        WikipageManager {
            fetcher,
            store,
            registry,
            languages,
            default_language: None,
            rules: None,
            sister_depth: 1,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Uses `rules` for every language instead of the per-language defaults
    pub fn with_rules(mut self, rules: GarbageRules) -> WikipageManager<F, S> {
        self.rules = Some(rules);
        self
    }

    /// Number of sister project hops followed; values below 1 count as 1
    pub fn with_sister_depth(mut self, depth: usize) -> WikipageManager<F, S> {
        self.sister_depth = depth.max(1);
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> WikipageManager<F, S> {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn with_default_language(mut self, lang: &str) -> WikipageManager<F, S> {
        self.default_language = Some(lang.to_string());
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn registry(&self) -> &ProjectRegistry {
        &self.registry
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Explicit default, else the first allowed language
    pub fn default_language(&self) -> &str {
        self.default_language
            .as_deref()
            .or_else(|| self.languages.first().map(String::as_str))
            .unwrap_or("en")
    }

    pub fn get_language<'a>(&self, lang: &'a str) -> Result<&'a str> {
        if lang.chars().count() == 2 && self.languages.iter().any(|allowed| allowed == lang) {
            Ok(lang)
        } else {
            Err(WikimediaError::InvalidLanguage(lang.to_string()))
        }
    }

    pub fn get_project(&self, code: &str) -> Result<&WikiProject> {
        self.registry
            .get(code)
            .ok_or_else(|| WikimediaError::UnknownProject(code.to_string()))
    }

    pub fn render_url(&self, project_code: &str, title: &str, lang: &str) -> Result<Url> {
        get_render_url(self.get_project(project_code)?, title, lang)
    }

    /// Downloads and cleans one page without storing it.
    ///
    /// A 4xx answer means the title does not exist in that language and is
    /// reported as [`WikimediaError::InvalidTitle`].
    pub fn fetch_page(
        &self,
        project_code: &str,
        title: &str,
        lang: &str,
    ) -> Result<ProcessedContent> {
        let project = self.get_project(project_code)?;
        let url = get_render_url(project, title, lang)?;
        let headers = request_headers(project, lang, &self.user_agent);

        let raw = self.fetcher.fetch(&url, &headers).map_err(|err| {
            if err.is_not_found() {
                WikimediaError::InvalidTitle {
                    project: project_code.to_string(),
                    title: title.to_string(),
                    lang: lang.to_string(),
                }
            } else {
                WikimediaError::Fetch(err)
            }
        })?;

        match &self.rules {
            Some(rules) => process_content(&raw, lang, &self.registry, rules),
            None => process_content(&raw, lang, &self.registry, &GarbageRules::for_language(lang)),
        }
    }

    /// Imports a page, and its sister pages when requested
    pub fn update(&self, request: UpdateRequest) -> Result<Wikipage> {
        let mut visited = HashSet::new();
        self.update_with_visited(request, &mut visited)
    }

    /// Like [`update`](Self::update), sharing `visited` with other runs.
    ///
    /// The requested page itself is always refreshed; sister pages already
    /// in `visited` are skipped.
    pub fn update_with_visited(
        &self,
        request: UpdateRequest,
        visited: &mut HashSet<PageKey>,
    ) -> Result<Wikipage> {
        let lang = self.get_language(&request.lang)?;
        self.get_project(&request.project)?;

        visited.insert(request.key());
        let page = self.import(&request.project, &request.title, lang, request.object.as_ref())?;

        if request.sister_projects {
            if let Some(object) = &request.object {
                let stale = PageFilter::new().object(Some(object)).lang(lang);
                let deleted = self.store.delete(&stale, Some(page.id));
                debug!(deleted, "dropped stale pages of object");
            }

            let mut queue: VecDeque<(SisterProjectLink, usize)> =
                page.sister_projects.iter().cloned().map(|link| (link, 1)).collect();

            while let Some((link, depth)) = queue.pop_front() {
                let key = PageKey::new(&link.project_code, &link.title, lang);
                if !visited.insert(key) {
                    continue;
                }

                match self.import(&link.project_code, &link.title, lang, request.object.as_ref()) {
                    Ok(sister) => {
                        // One page per sister project and object; the requested
                        // project keeps the page imported first
                        if let Some(object) = &request.object {
                            if sister.project != request.project {
                                let stale = PageFilter::new()
                                    .object(Some(object))
                                    .lang(lang)
                                    .project(&sister.project);
                                self.store.delete(&stale, Some(sister.id));
                            }
                        }
                        if depth < self.sister_depth {
                            queue.extend(
                                sister.sister_projects.into_iter().map(|link| (link, depth + 1)),
                            );
                        }
                    }
                    Err(err) if err.is_recoverable() => {
                        warn!(
                            project = %link.project_code,
                            title = %link.title,
                            lang,
                            "skipping sister page: {err}"
                        );
                    }
                    Err(err) => return Err(err),
                }
            }
        } else if let Some(object) = &request.object {
            let stale = PageFilter::new()
                .object(Some(object))
                .lang(lang)
                .project(&request.project);
            let deleted = self.store.delete(&stale, Some(page.id));
            debug!(deleted, "dropped stale pages of object");
        }

        Ok(page)
    }

    /// Content of the newest stored page of `project_code` for `object`
    pub fn content(
        &self,
        object: &ObjectRef,
        project_code: &str,
        lang: Option<&str>,
    ) -> Result<Option<String>> {
        self.get_project(project_code)?;
        let lang = self.get_language(lang.unwrap_or_else(|| self.default_language()))?;
        let filter = PageFilter::new()
            .object(Some(object))
            .project(project_code)
            .lang(lang);

        Ok(self.store.latest(&filter).map(|page| page.content))
    }

    fn import(
        &self,
        project_code: &str,
        title: &str,
        lang: &str,
        object: Option<&ObjectRef>,
    ) -> Result<Wikipage> {
        let processed = self.fetch_page(project_code, title, lang)?;

        let page = self.store.save(Wikipage {
            id: 0,
            lang: lang.to_string(),
            project: project_code.to_string(),
            title: title.to_string(),
            content: processed.content,
            sister_projects: processed.sister_projects,
            images: processed.images,
            updated: Utc::now(),
            object: object.cloned(),
        });

        debug!(project = project_code, title, lang, id = page.id, "imported page");
        Ok(page)
    }
}
