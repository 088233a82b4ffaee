//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use wikimedia::{ObjectRef, UpdateRequest};

    use super::super::canned::{manager, ru_page, CannedWiki};

    fn wiki() -> CannedWiki {
        CannedWiki::new()
            .page(
                "ru.wikipedia.org",
                "Lebowski",
                &ru_page("Фильм", &["//ru.wikiquote.org/wiki/Big_Lebowski"]),
            )
            .page("ru.wikiquote.org", "Big_Lebowski", &ru_page("Цитаты", &[]))
    }

    #[test]
    fn content_per_project() {
        let wiki = wiki();
        let manager = manager(&wiki);
        let film = ObjectRef::new("film", 42);

        manager
            .update(
                UpdateRequest::new("wikipedia", "Lebowski", "ru")
                    .object(film.clone())
                    .sister_projects(true),
            )
            .unwrap();

        assert_eq!(
            manager.content(&film, "wikiquote", None).unwrap().as_deref(),
            Some("<p>Цитаты</p>")
        );
        assert_eq!(
            manager.content(&film, "wikipedia", Some("ru")).unwrap().as_deref(),
            Some("<p>Фильм</p>")
        );
        assert_eq!(manager.content(&film, "wikipedia", Some("en")).unwrap(), None);
        assert_eq!(manager.content(&film, "wikibooks", None).unwrap(), None);
        assert_eq!(
            manager.content(&ObjectRef::new("film", 43), "wikipedia", None).unwrap(),
            None
        );
    }

    #[test]
    fn default_language_is_configurable() {
        let wiki = wiki();
        let manager = manager(&wiki).with_default_language("en");
        let film = ObjectRef::new("film", 42);

        manager
            .update(UpdateRequest::new("wikipedia", "Lebowski", "ru").object(film.clone()))
            .unwrap();

        assert_eq!(manager.content(&film, "wikipedia", None).unwrap(), None);
        assert!(manager.content(&film, "wikipedia", Some("ru")).unwrap().is_some());
    }
}

//  ███████╗ █████╗ ██╗██╗     ██╗███╗   ██╗ ██████╗
//  ██╔════╝██╔══██╗██║██║     ██║████╗  ██║██╔════╝
//  █████╗  ███████║██║██║     ██║██╔██╗ ██║██║  ███╗
//  ██╔══╝  ██╔══██║██║██║     ██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║██║███████╗██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚═╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod failing {
    use wikimedia::{ObjectRef, WikimediaError};

    use super::super::canned::{manager, CannedWiki};

    #[test]
    fn language_not_allowed() {
        let wiki = CannedWiki::new();
        let result = manager(&wiki).content(&ObjectRef::new("film", 1), "wikipedia", Some("de"));

        assert!(matches!(result, Err(WikimediaError::InvalidLanguage(_))));
    }

    #[test]
    fn unknown_project() {
        let wiki = CannedWiki::new();
        let result = manager(&wiki).content(&ObjectRef::new("film", 1), "wikifoo", None);

        assert!(matches!(result, Err(WikimediaError::UnknownProject(_))));
    }
}
