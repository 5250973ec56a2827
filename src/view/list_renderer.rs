use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::controller::listing::{CategoryFilter, ListingController};
use crate::query_string::listing_link;
use crate::text_utils::{excerpt, format_long_date};

#[derive(ramhorns::Content)]
struct ListPage<'a> {
    head: &'a str,
    post_list: Vec<PostItem<'a>>,
    categories: Vec<ViewCategory<'a>>,
    all_selected: bool,
    all_link: String,
    empty: bool,
    show_more: bool,
    more_link: String,
}

#[derive(ramhorns::Content)]
struct PostItem<'a> {
    date: String,
    link: String,
    title: &'a str,
    summary: String,
    has_image: bool,
    image: &'a str,
    image_alt: &'a str,
    tags: Vec<ViewTag<'a>>,
}

#[derive(ramhorns::Content)]
struct ViewTag<'a> {
    tag: &'a str,
}

#[derive(ramhorns::Content)]
struct ViewCategory<'a> {
    title: &'a str,
    link: String,
    selected: bool,
}

pub struct ListRenderer<'a> {
    pub template: Template<'a>,
}

impl ListRenderer<'_> {
    pub fn new(list_tpl_src: &str) -> io::Result<ListRenderer> {
        let template = match Template::new(list_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing list template: {}", e)));
            }
        };

        Ok(ListRenderer {
            template,
        })
    }

    pub fn render(&self, listing: &ListingController, head: &str) -> String {
        let state = listing.state();

        let mut post_list = vec![];
        for post in listing.visible_posts() {
            let image = post.main_image.as_ref();
            post_list.push(PostItem {
                date: post.published_at.as_ref().map(format_long_date).unwrap_or_default(),
                link: format!("/blogs/{}", post.slug.current),
                title: post.title.as_str(),
                summary: excerpt(&post.body),
                has_image: image.and_then(|i| i.url()).is_some(),
                image: image.and_then(|i| i.url()).unwrap_or_default(),
                image_alt: image.and_then(|i| i.alt.as_deref()).unwrap_or(post.title.as_str()),
                tags: post.categories.iter().map(|c| ViewTag { tag: c.title.as_str() }).collect(),
            });
        }

        let categories = state.categories.iter()
            .map(|category| {
                let filter = CategoryFilter::Category(category.id.clone());
                ViewCategory {
                    title: category.title.as_str(),
                    selected: filter == state.selected,
                    link: listing_link(&filter, 0),
                }
            })
            .collect();

        let show_more = listing.has_more();
        let more_link = listing_link(&state.selected, state.paginator.steps() + 1);

        self.template.render(&ListPage {
            head,
            empty: post_list.is_empty(),
            post_list,
            categories,
            all_selected: state.selected == CategoryFilter::All,
            all_link: listing_link(&CategoryFilter::All, 0),
            show_more,
            more_link,
        })
    }
}
