//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use wikimedia::{request_headers, WikiProject};

    #[test]
    fn shared_wiki_referer() {
        let project = WikiProject::new("wikicommons", "commons.wikimedia.org", false);
        let headers = request_headers(&project, "ru", "test-agent");

        assert_eq!(headers["Referer"], "https://commons.wikimedia.org/");
        assert_eq!(headers["User-Agent"], "test-agent");
        assert_eq!(headers.len(), 4);
    }

    #[test]
    fn language_is_preferred() {
        let project = WikiProject::new("wikipedia", "wikipedia.org", true);
        let headers = request_headers(&project, "en", "test-agent");

        assert!(headers["Accept-Language"].starts_with("en,"));
        assert_eq!(headers["Referer"], "https://en.wikipedia.org/");
    }
}
