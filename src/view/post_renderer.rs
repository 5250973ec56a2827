use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::rich_text::{Components, RichTextRenderer};
use crate::content::Post;
use crate::text_utils::format_long_date;

#[derive(ramhorns::Content)]
struct ViewTag<'a> {
    tag: &'a str,
}

#[derive(ramhorns::Content)]
struct ViewItem<'a> {
    head: &'a str,
    post_title: &'a str,
    date: &'a str,
    has_author: bool,
    author: &'a str,
    has_author_image: bool,
    author_image: &'a str,
    has_main_image: bool,
    main_image: &'a str,
    main_image_alt: &'a str,
    tags: &'a Vec<ViewTag<'a>>,
    post_content: &'a str,
}

pub struct PostRenderer<'a> {
    pub template: Template<'a>,
}

impl PostRenderer<'_> {
    pub fn new(view_tpl_src: &str) -> io::Result<PostRenderer> {
        let template = match Template::new(view_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing post view template: {}", e)));
            }
        };

        Ok(PostRenderer {
            template,
        })
    }

    pub fn render<C: Components>(&self, post: &Post, body: &RichTextRenderer<C>, head: &str) -> String {
        let tags: &Vec<ViewTag> = &post.categories.iter().map(|c| ViewTag { tag: c.title.as_str() }).collect();
        let date = post.published_at.as_ref().map(format_long_date).unwrap_or_default();
        let post_content = body.render(&post.body);

        let author = post.author.as_ref();
        let author_image = author.and_then(|a| a.image.as_ref()).and_then(|i| i.url());
        let main_image = post.main_image.as_ref().and_then(|i| i.url());
        let main_image_alt = post.main_image.as_ref()
            .and_then(|i| i.alt.as_deref())
            .unwrap_or(post.title.as_str());

        self.template.render(&ViewItem {
            head,
            post_title: post.title.as_str(),
            date: date.as_str(),
            has_author: author.is_some(),
            author: author.map(|a| a.name.as_str()).unwrap_or_default(),
            has_author_image: author_image.is_some(),
            author_image: author_image.unwrap_or_default(),
            has_main_image: main_image.is_some(),
            main_image: main_image.unwrap_or_default(),
            main_image_alt,
            tags,
            post_content: post_content.as_str(),
        })
    }
}
