use spdlog::{error, info, warn};

use crate::content::client::{fetch_as, ContentSource};
use crate::content::query::Query;
use crate::content::{Category, CategoryId, PostSummary};
use crate::controller::scope::ScopeGuard;
use crate::paginator::Paginator;

#[derive(Debug, Clone, PartialEq)]
pub enum CategoryFilter {
    All,
    Category(CategoryId),
}

impl CategoryFilter {
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            None | Some("") | Some("all") => CategoryFilter::All,
            Some(id) => CategoryFilter::Category(CategoryId(id.to_string())),
        }
    }

    pub fn matches(&self, post: &PostSummary) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(id) => post.has_category(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Loading,
    Ready,
}

#[derive(Debug, Clone)]
pub struct ListingState {
    pub phase: Phase,
    pub posts: Vec<PostSummary>,
    pub categories: Vec<Category>,
    pub selected: CategoryFilter,
    pub paginator: Paginator,
}

/// Order preserving subsequence of `posts` accepted by `filter`.
pub fn filter_posts<'a>(posts: &'a [PostSummary], filter: &CategoryFilter) -> Vec<&'a PostSummary> {
    posts.iter().filter(|post| filter.matches(post)).collect()
}

/// Blog listing: the post and category lists, a category filter and an
/// incremental reveal over the filtered posts.
pub struct ListingController {
    state: ListingState,
}

impl ListingController {
    pub fn new(initial_visible: u32, load_more_step: u32) -> Self {
        ListingController {
            state: ListingState {
                phase: Phase::Loading,
                posts: vec![],
                categories: vec![],
                selected: CategoryFilter::All,
                paginator: Paginator::new(initial_visible, load_more_step),
            },
        }
    }

    /// Fetches posts and categories concurrently and leaves the loading
    /// phase once both have answered. Returns false when the view went
    /// away before the answers arrived; the state is then left untouched.
    pub async fn load<S: ContentSource>(&mut self, source: &S, guard: &ScopeGuard) -> bool {
        let list_posts = Query::list_posts();
        let list_categories = Query::list_categories();
        let (posts, categories) = tokio::join!(
            fetch_as::<_, Vec<PostSummary>>(source, &list_posts),
            fetch_as::<_, Vec<Category>>(source, &list_categories),
        );

        if !guard.is_live() {
            warn!("Discarding post list fetched for a closed view");
            return false;
        }

        match (posts, categories) {
            (Ok(posts), Ok(categories)) => {
                info!("Fetched {} posts and {} categories", posts.len(), categories.len());
                self.state.posts = posts;
                self.state.categories = categories;
            }
            (posts, categories) => {
                if let Err(e) = posts {
                    error!("Error fetching post list: {}", e);
                }
                if let Err(e) = categories {
                    error!("Error fetching category list: {}", e);
                }
                self.state.posts = vec![];
                self.state.categories = vec![];
            }
        }

        self.state.phase = Phase::Ready;
        true
    }

    pub fn select_category(&mut self, filter: CategoryFilter) {
        self.state.selected = filter;
        self.state.paginator.reset();
    }

    pub fn load_more(&mut self) {
        self.state.paginator.load_more();
    }

    pub fn state(&self) -> &ListingState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.phase == Phase::Loading
    }

    pub fn filtered(&self) -> Vec<&PostSummary> {
        filter_posts(&self.state.posts, &self.state.selected)
    }

    pub fn visible_posts(&self) -> Vec<&PostSummary> {
        let filtered = self.filtered();
        self.state.paginator.page(&filtered).to_vec()
    }

    pub fn has_more(&self) -> bool {
        self.state.paginator.has_more(self.filtered().len())
    }
}

#[cfg(test)]
mod tests {
    use crate::controller::scope::ViewScope;
    use crate::test_data::{StaticSource, CATEGORY_LIST, POST_LIST};

    use super::*;

    fn source() -> StaticSource {
        StaticSource::new()
            .with(Query::list_posts(), POST_LIST)
            .with(Query::list_categories(), CATEGORY_LIST)
    }

    fn slugs(posts: &[&PostSummary]) -> Vec<String> {
        posts.iter().map(|post| post.slug.current.clone()).collect()
    }

    async fn loaded() -> ListingController {
        let scope = ViewScope::new();
        let mut controller = ListingController::new(4, 3);
        assert!(controller.load(&source(), &scope.guard()).await);
        controller
    }

    #[tokio::test]
    async fn test_load_more_reveals_everything() {
        let mut controller = loaded().await;
        assert!(!controller.is_loading());
        assert_eq!(controller.state().categories.len(), 3);

        assert_eq!(slugs(&controller.visible_posts()), ["hello-world", "css-grids", "async-rust", "design-systems"]);
        assert!(controller.has_more());

        controller.load_more();
        assert_eq!(controller.visible_posts().len(), 7);
        assert_eq!(controller.visible_posts()[6].slug.current, "untitled-notes");
        assert!(!controller.has_more());
    }

    #[tokio::test]
    async fn test_untitled_post_keeps_listing() {
        let source = StaticSource::new()
            .with(Query::list_posts(), r#"[
                {"_id": "a", "slug": {"current": "first"}, "title": "First"},
                {"_id": "b", "slug": {"current": "second"}, "title": null}
            ]"#)
            .with(Query::list_categories(), r#"[{"_id": "c", "title": null}]"#);
        let scope = ViewScope::new();
        let mut controller = ListingController::new(4, 3);
        assert!(controller.load(&source, &scope.guard()).await);

        assert_eq!(controller.state().posts.len(), 2);
        assert_eq!(controller.state().posts[1].title, "");
        assert_eq!(controller.state().categories.len(), 1);
    }

    #[tokio::test]
    async fn test_filter_keeps_store_order() {
        let mut controller = loaded().await;
        controller.select_category(CategoryFilter::from_param(Some("cat-rust")));
        assert_eq!(slugs(&controller.filtered()), ["hello-world", "async-rust", "ownership", "long-read"]);
        assert_eq!(controller.visible_posts().len(), 4);
        assert!(!controller.has_more());

        controller.select_category(CategoryFilter::from_param(Some("cat-css")));
        assert_eq!(slugs(&controller.visible_posts()), ["css-grids", "design-systems"]);

        controller.select_category(CategoryFilter::from_param(Some("cat-nothing")));
        assert!(controller.visible_posts().is_empty());
        assert!(!controller.has_more());
    }

    #[tokio::test]
    async fn test_all_filter_is_identity() {
        let controller = loaded().await;
        let all = filter_posts(&controller.state().posts, &CategoryFilter::All);
        assert_eq!(all.len(), controller.state().posts.len());
        assert_eq!(CategoryFilter::from_param(Some("all")), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_param(None), CategoryFilter::All);
    }

    #[tokio::test]
    async fn test_selecting_a_category_resets_the_reveal() {
        let mut controller = loaded().await;
        controller.load_more();
        controller.load_more();
        assert_eq!(controller.state().paginator.visible(), 10);

        controller.select_category(CategoryFilter::All);
        assert_eq!(controller.state().paginator.visible(), 4);
        assert_eq!(controller.visible_posts().len(), 4);
    }

    #[tokio::test]
    async fn test_failed_fetch_yields_empty_ready_state() {
        let source = StaticSource::new()
            .with(Query::list_posts(), POST_LIST)
            .failing(Query::list_categories());
        let scope = ViewScope::new();
        let mut controller = ListingController::new(4, 3);
        assert!(controller.load(&source, &scope.guard()).await);

        assert!(!controller.is_loading());
        assert!(controller.state().posts.is_empty());
        assert!(controller.visible_posts().is_empty());
        assert!(!controller.has_more());
    }

    #[tokio::test]
    async fn test_malformed_list_yields_empty_ready_state() {
        let source = StaticSource::new()
            .with(Query::list_posts(), r#"[{"title": "no id, no slug"}]"#)
            .with(Query::list_categories(), CATEGORY_LIST);
        let scope = ViewScope::new();
        let mut controller = ListingController::new(4, 3);
        controller.load(&source, &scope.guard()).await;
        assert!(!controller.is_loading());
        assert!(controller.state().posts.is_empty());
    }

    #[tokio::test]
    async fn test_closed_view_discards_results() {
        let scope = ViewScope::new();
        let guard = scope.guard();
        drop(scope);

        let mut controller = ListingController::new(4, 3);
        assert!(!controller.load(&source(), &guard).await);
        assert!(controller.is_loading());
        assert!(controller.state().posts.is_empty());
    }
}
