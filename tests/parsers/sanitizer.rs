//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use wikimedia::html::{detach_node, find_first, has_class};
    use wikimedia::{sanitize, serialize_document, ContentSanitizer, DocumentTree, GarbageRules};

    fn clean(html: &str, rules: &GarbageRules) -> String {
        let mut tree = DocumentTree::parse(html.as_bytes());
        sanitize(&mut tree, rules).unwrap();
        serialize_document(&tree)
    }

    #[test]
    fn class_attribute_removed_after_class_literals() {
        let mut rules = GarbageRules::disabled();
        rules.navbox = true;
        rules.class_attribute = true;

        assert_eq!(
            clean("<div class=\"navbox\">Films</div><p class=\"lead\">Body</p>", &rules),
            "<p>Body</p>"
        );
    }

    #[test]
    fn disabled_categories_are_kept() {
        let html = "<p>Intro<span class=\"editsection\">[edit]</span></p>\
            <!-- note -->\
            <table id=\"toc\" class=\"toc\"><tr><td>Contents</td></tr></table>\
            <script>var x;</script>\
            <div class=\"navbox\" style=\"color: red\">Nav</div>\
            <h2>See also</h2><p>Related</p>";
        let cleaned = clean(html, &GarbageRules::disabled());

        assert!(cleaned.contains("editsection"));
        assert!(cleaned.contains("<!-- note -->"));
        assert!(cleaned.contains("id=\"toc\""));
        assert!(cleaned.contains("<script>"));
        assert!(cleaned.contains("class=\"navbox\""));
        assert!(cleaned.contains("style=\"color: red\""));
        assert!(cleaned.contains("<h2>See also</h2><p>Related</p>"));
    }

    /// Cleans `html` with every English category on, then again with the
    /// ones `switch_off` disables
    fn clean_with_and_without(
        html: &str,
        switch_off: impl FnOnce(&mut GarbageRules),
    ) -> (String, String) {
        let all_on = GarbageRules::for_language("en");
        let mut one_off = all_on.clone();
        switch_off(&mut one_off);

        (clean(html, &all_on), clean(html, &one_off))
    }

    #[test]
    fn reference_toggle() {
        let (on, off) = clean_with_and_without(
            "<p>Text</p><div class=\"reflist\">1. Source</div>\
             <h2>References</h2><p>Cited work</p>",
            |rules| rules.reference = false,
        );

        assert_eq!(on, "<p>Text</p>");
        assert!(off.contains("<div>1. Source</div>"));
        assert!(off.contains("<h2>References</h2><p>Cited work</p>"));
    }

    #[test]
    fn reference_links_toggle() {
        let html = "<p>Text<sup class=\"reference\">[1]</sup></p>";
        let (on, off) = clean_with_and_without(html, |rules| rules.reference_links = false);

        assert_eq!(on, "<p>Text</p>");
        assert_eq!(off, "<p>Text<sup>[1]</sup></p>");
    }

    #[test]
    fn sisterproject_toggle() {
        let (on, off) = clean_with_and_without(
            "<table class=\"metadata plainlinks\"><tr><td>Commons</td></tr></table>\
             <div class=\"wikiquote-box\">Quotes</div>\
             <div class=\"sisterproject\">Wiktionary</div>\
             <p>Body</p>",
            |rules| rules.sisterproject = false,
        );

        assert_eq!(on, "<p>Body</p>");
        assert!(off.contains("<td>Commons</td>"));
        assert!(off.contains("<div>Quotes</div>"));
        assert!(off.contains("<div>Wiktionary</div>"));
    }

    #[test]
    fn thumb_images_toggle() {
        let html = "<div class=\"thumb\"><img src=\"a.jpg\"></div><p>Body</p>";
        let (on, off) = clean_with_and_without(html, |rules| rules.thumb_images = false);

        assert_eq!(on, "<p>Body</p>");
        assert_eq!(off, "<div><img src=\"a.jpg\"></div><p>Body</p>");
    }

    #[test]
    fn audio_toggle() {
        let html = "<table><tr><td><div id=\"ogg_player_1\">Play</div></td></tr></table>\
            <p>Body<span class=\"audiolink\">listen</span></p>";
        let (on, off) = clean_with_and_without(html, |rules| rules.audio = false);

        assert_eq!(on, "<p>Body</p>");
        assert!(off.contains("<div id=\"ogg_player_1\">Play</div>"));
        assert!(off.contains("<p>Body<span>listen</span></p>"));
    }

    #[test]
    fn class_attribute_toggle() {
        let html = "<p class=\"lead\">Body <b class=\"name\">Lebowski</b></p>";
        let (on, off) = clean_with_and_without(html, |rules| rules.class_attribute = false);

        assert_eq!(on, "<p>Body <b>Lebowski</b></p>");
        assert_eq!(off, html);
    }

    #[test]
    fn toc_needs_both_id_and_class() {
        let mut rules = GarbageRules::disabled();
        rules.contents = true;

        assert_eq!(
            clean("<div id=\"toc\">kept</div><div class=\"toc\">kept too</div>", &rules),
            "<div id=\"toc\">kept</div><div class=\"toc\">kept too</div>"
        );
        assert_eq!(clean("<div id=\"toc\" class=\"toc\">gone</div>", &rules), "");
    }

    #[test]
    fn block_stops_at_next_heading_and_parent() {
        let html = "<div><h2>See also</h2><p>Nested</p></div><p>Outside</p>\
            <h2>Plot</h2><p>Story</p>\
            <h2>See also</h2><p>Related</p>\
            <h2>Cast</h2><p>Actors</p>";
        let mut rules = GarbageRules::disabled();
        rules.see_also = true;
        rules.titles = wikimedia::SectionTitles::english();

        assert_eq!(
            clean(html, &rules),
            "<div></div><p>Outside</p><h2>Plot</h2><p>Story</p><h2>Cast</h2><p>Actors</p>"
        );
    }

    #[test]
    fn extra_block_titles() {
        let mut rules = GarbageRules::disabled();
        rules.block_titles = vec!["Trivia".to_string()];

        assert_eq!(
            clean("<p>Body</p><h2>Trivia</h2><ul><li>Fact</li></ul>", &rules),
            "<p>Body</p>"
        );
    }

    #[test]
    fn extra_class_literals() {
        let mut rules = GarbageRules::disabled();
        rules.table_classes = vec!["wikitable".to_string()];
        rules.span_classes = vec!["noprint".to_string()];

        assert_eq!(
            clean(
                "<table class=\"wikitable\"><tr><td>x</td></tr></table>\
                 <p>Body<span class=\"noprint\">!</span></p>\
                 <div class=\"wikitable\">kept</div>",
                &rules
            ),
            "<p>Body</p><div class=\"wikitable\">kept</div>"
        );
    }

    #[test]
    fn sanitizing_is_idempotent() {
        let html = "<table class=\"infobox\"><tr><td>Card</td></tr></table>\
            <p>Text<sup class=\"reference\">[1]</sup></p>\
            <div class=\"thumb\"><img src=\"a.jpg\"></div>\
            <h2>References</h2><div class=\"reflist\">1. Source</div>";
        let rules = GarbageRules::for_language("en");
        let sanitizer = ContentSanitizer::new(&rules).unwrap();

        let mut tree = DocumentTree::parse(html.as_bytes());
        sanitizer.sanitize(&mut tree);
        let once = serialize_document(&tree);
        sanitizer.sanitize(&mut tree);
        let twice = serialize_document(&tree);

        assert_eq!(once, "<p>Text</p>");
        assert_eq!(once, twice);
    }

    #[test]
    fn detaching_child_then_parent() {
        let tree = DocumentTree::parse(b"<div class=\"outer\"><span class=\"inner\">x</span></div><p>y</p>");
        let inner = find_first(tree.root(), |node| has_class(node, "inner")).unwrap();
        let outer = find_first(tree.root(), |node| has_class(node, "outer")).unwrap();

        detach_node(&inner);
        detach_node(&outer);
        detach_node(&outer);
        detach_node(&inner);

        assert_eq!(serialize_document(&tree), "<p>y</p>");
    }

    #[test]
    fn one_sanitizer_many_pages() {
        let sanitizer = ContentSanitizer::new(&GarbageRules::for_language("ru")).unwrap();

        for body in ["Первая", "Вторая"] {
            let html = format!("<div class=\"dablink\">См. также</div><p>{body}</p>");
            let mut tree = DocumentTree::parse(html.as_bytes());
            sanitizer.sanitize(&mut tree);
            assert_eq!(serialize_document(&tree), format!("<p>{body}</p>"));
        }
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
    use wikimedia::{ContentSanitizer, GarbageRules, WikimediaError};

    #[test]
    fn empty_literal_is_rejected() {
        let mut rules = GarbageRules::for_language("en");
        rules.div_classes = vec!["ok".to_string(), String::new()];

        assert!(matches!(
            ContentSanitizer::new(&rules),
            Err(WikimediaError::Config(_))
        ));
    }

    #[test]
    fn empty_title_pattern_is_rejected() {
        let mut rules = GarbageRules::for_language("en");
        rules.titles.see_also.push(String::new());

        assert!(ContentSanitizer::new(&rules).is_err());
    }
}
