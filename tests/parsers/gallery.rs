//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use wikimedia::gallery::original_image_url;
    use wikimedia::{parse_gallery_images, DocumentTree, GalleryImage};

    use crate::fixture;

    #[test]
    fn gallery_boxes() {
        let tree = DocumentTree::parse(&fixture("gallery_page.html"));

        assert_eq!(
            parse_gallery_images(tree.root()),
            vec![
                GalleryImage {
                    url: "http://upload.wikimedia.org/wikipedia/commons/4/45/Einst_4.jpg"
                        .to_string(),
                    caption: "Einstein in 1921".to_string(),
                },
                GalleryImage {
                    url: "http://upload.wikimedia.org/wikipedia/commons/a/a0/Einstein_1905.jpg"
                        .to_string(),
                    caption: String::new(),
                },
            ]
        );
    }

    #[test]
    fn full_size_urls_are_kept() {
        assert_eq!(
            original_image_url("https://upload.wikimedia.org/wikipedia/commons/4/45/Einst_4.jpg"),
            "https://upload.wikimedia.org/wikipedia/commons/4/45/Einst_4.jpg"
        );
    }

    #[test]
    fn page_without_gallery() {
        let tree = DocumentTree::parse(b"<p>No pictures</p><img src=\"a.png\">");
        assert!(parse_gallery_images(tree.root()).is_empty());
    }
}
