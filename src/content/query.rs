use serde_json::Value;

/// A GROQ query plus its `$name` parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub groq: &'static str,
    pub params: Vec<(String, Value)>,
}

// Image assets are dereferenced so the renderer gets a ready URL
const LIST_POSTS: &str = r#"*[_type == "post" && defined(slug.current)] | order(publishedAt desc) {
  _id,
  slug,
  title,
  publishedAt,
  mainImage { alt, asset -> { url } },
  categories[] -> { _id, title },
  "body": body[0...1]
}"#;

const LIST_CATEGORIES: &str = r#"*[_type == "category"] | order(title asc) {
  _id,
  title
}"#;

const POST_BY_SLUG: &str = r#"*[_type == "post" && slug.current == $slug][0] {
  slug,
  title,
  publishedAt,
  body[] {
    ...,
    _type == "image" => { "asset": asset -> { url, alt } }
  },
  mainImage { alt, asset -> { url, alt } },
  categories[] -> { _id, title },
  author -> { name, image { asset -> { url } } }
}"#;

impl Query {
    pub fn list_posts() -> Self {
        Query { groq: LIST_POSTS, params: vec![] }
    }

    pub fn list_categories() -> Self {
        Query { groq: LIST_CATEGORIES, params: vec![] }
    }

    pub fn post_by_slug(slug: &str) -> Self {
        Query {
            groq: POST_BY_SLUG,
            params: vec![("slug".to_string(), Value::String(slug.to_string()))],
        }
    }

    /// Query string pairs as the HTTP query API expects them:
    /// parameters are prefixed with `$` and JSON encoded.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.params.len() + 1);
        pairs.push(("query".to_string(), self.groq.to_string()));
        for (name, value) in self.params.iter() {
            pairs.push((format!("${}", name), value.to_string()));
        }
        pairs
    }
}
