use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::content::blocks::Block;

pub mod asset;
pub mod blocks;
pub mod client;
pub mod query;
pub mod rich_text;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct CategoryId(pub String);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: CategoryId,
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Slug {
    pub current: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Asset {
    pub url: Option<String>,
    #[serde(rename = "_ref")]
    pub asset_ref: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageRef {
    pub asset: Option<Asset>,
    pub alt: Option<String>,
}

impl ImageRef {
    pub fn url(&self) -> Option<&str> {
        self.asset.as_ref().and_then(|asset| asset.url.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Author {
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    pub image: Option<ImageRef>,
}

/// Summary projection used by the post list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub slug: Slug,
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    pub published_at: Option<DateTime<Utc>>,
    pub main_image: Option<ImageRef>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub categories: Vec<Category>,
    /// Only the first block of the body, enough for the excerpt.
    #[serde(default, deserialize_with = "nullable_vec")]
    pub body: Vec<Block>,
}

impl PostSummary {
    pub fn has_category(&self, id: &CategoryId) -> bool {
        self.categories.iter().any(|category| &category.id == id)
    }
}

/// Full projection used by the detail view.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub slug: Option<Slug>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub body: Vec<Block>,
    pub main_image: Option<ImageRef>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub categories: Vec<Category>,
    pub author: Option<Author>,
}

// GROQ projections yield `null` for missing arrays, not an absent key
fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: serde::Deserializer<'de>,
        T: Deserialize<'de>,
{
    let value: Option<Vec<T>> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use crate::test_data::{POST_DETAIL, POST_LIST};

    use super::*;

    #[test]
    fn test_deserialize_post_list() {
        let posts: Vec<PostSummary> = serde_json::from_str(POST_LIST).unwrap();
        assert_eq!(posts.len(), 7);
        assert_eq!(posts[0].slug.current, "hello-world");
        assert!(posts[0].has_category(&CategoryId("cat-rust".to_string())));
        assert!(!posts[0].has_category(&CategoryId("cat-css".to_string())));
        // null title, categories and body
        assert_eq!(posts[6].title, "");
        assert!(posts[6].categories.is_empty());
        assert!(posts[6].body.is_empty());
    }

    #[test]
    fn test_deserialize_post_detail() {
        let post: Post = serde_json::from_str(POST_DETAIL).unwrap();
        assert_eq!(post.title, "Hello World");
        assert_eq!(post.author.as_ref().unwrap().name, "Ada Lovelace");
        assert_eq!(post.main_image.as_ref().unwrap().url(), Some("https://cdn.sanity.io/images/abc123/production/main-1200x600.jpg"));
        assert_eq!(post.categories.len(), 2);
        assert_eq!(post.body.len(), 8);
    }

    #[test]
    fn test_null_strings_decode_as_empty() {
        let post: Post = serde_json::from_str(r#"{
            "title": null,
            "categories": [{"_id": "cat-x", "title": null}],
            "author": {"name": null}
        }"#).unwrap();
        assert_eq!(post.title, "");
        assert_eq!(post.categories[0].title, "");
        assert_eq!(post.author.unwrap().name, "");
    }
}
