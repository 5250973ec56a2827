use spdlog::{error, info, warn};

use crate::content::client::{fetch_as, ContentError, ContentSource};
use crate::content::query::Query;
use crate::content::Post;
use crate::controller::scope::ScopeGuard;

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    NotFound,
    Found(Box<Post>),
}

/// Single post view addressed by slug.
pub struct DetailController {
    slug: String,
    state: DetailState,
}

impl DetailController {
    pub fn new(slug: &str) -> Self {
        DetailController {
            slug: slug.to_string(),
            state: DetailState::Loading,
        }
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn into_state(self) -> DetailState {
        self.state
    }

    /// Fetches the post. Failures of any kind end in `NotFound`; no retry.
    pub async fn load<S: ContentSource>(&mut self, source: &S, guard: &ScopeGuard) -> bool {
        let result = fetch_as::<_, Post>(source, &Query::post_by_slug(&self.slug)).await;

        if !guard.is_live() {
            warn!("Discarding post {} fetched for a closed view", self.slug);
            return false;
        }

        self.state = match result {
            Ok(post) => DetailState::Found(Box::new(post)),
            Err(ContentError::NotFound) => {
                info!("Post not found: {}", self.slug);
                DetailState::NotFound
            }
            Err(e) => {
                error!("Error fetching post {}: {}", self.slug, e);
                DetailState::NotFound
            }
        };

        true
    }
}
