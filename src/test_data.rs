#[cfg(test)]
pub const POST_LIST: &str = r##"[
  {
    "_id": "p1",
    "slug": {"current": "hello-world"},
    "title": "Hello World",
    "publishedAt": "2024-06-01T10:00:00Z",
    "mainImage": {"asset": {"url": "https://cdn.sanity.io/images/abc123/production/main-1200x600.jpg"}, "alt": "Keyboard"},
    "categories": [{"_id": "cat-rust", "title": "Rust"}],
    "body": [{"_type": "block", "style": "normal", "markDefs": [], "children": [{"_type": "span", "text": "Hello from the first post.", "marks": []}]}]
  },
  {
    "_id": "p2",
    "slug": {"current": "css-grids"},
    "title": "CSS Grids in Practice",
    "publishedAt": "2024-05-20T08:30:00.000Z",
    "mainImage": null,
    "categories": [{"_id": "cat-css", "title": "CSS"}],
    "body": [{"_type": "block", "children": [{"_type": "span", "text": "Grids are great."}]}]
  },
  {
    "_id": "p3",
    "slug": {"current": "async-rust"},
    "title": "Async Rust Without Tears",
    "publishedAt": "2024-05-02T12:00:00Z",
    "categories": [{"_id": "cat-rust", "title": "Rust"}, {"_id": "cat-async", "title": "Async"}],
    "body": [{"_type": "block", "children": [{"_type": "span", "text": "Futures do nothing unless polled."}]}]
  },
  {
    "_id": "p4",
    "slug": {"current": "design-systems"},
    "title": "Design Systems",
    "publishedAt": "2024-04-11T09:15:00Z",
    "categories": [{"_id": "cat-css", "title": "CSS"}],
    "body": [{"_type": "image", "asset": {"url": "https://cdn.sanity.io/images/abc123/production/ds-800x600.png"}}]
  },
  {
    "_id": "p5",
    "slug": {"current": "ownership"},
    "title": "Ownership Explained",
    "publishedAt": "2024-03-03T18:45:00Z",
    "categories": [{"_id": "cat-rust", "title": "Rust"}],
    "body": [{"_type": "block", "children": [{"_type": "span", "text": "Every value has one owner."}]}]
  },
  {
    "_id": "p6",
    "slug": {"current": "long-read"},
    "title": "A Long Read",
    "publishedAt": "2024-02-14T07:00:00Z",
    "categories": [{"_id": "cat-rust", "title": "Rust"}],
    "body": [{"_type": "block", "children": [{"_type": "span", "text": "This opening paragraph goes on for quite a while, well past the point where a summary card would have room for it, because some writers never learned to stop typing once they got going."}]}]
  },
  {
    "_id": "p7",
    "slug": {"current": "untitled-notes"},
    "title": null,
    "publishedAt": "2024-01-01T00:00:00Z",
    "categories": null,
    "body": null
  }
]"##;

#[cfg(test)]
pub const CATEGORY_LIST: &str = r##"[
  {"_id": "cat-async", "title": "Async"},
  {"_id": "cat-css", "title": "CSS"},
  {"_id": "cat-rust", "title": "Rust"}
]"##;

#[cfg(test)]
pub const POST_DETAIL: &str = r##"{
  "slug": {"current": "hello-world"},
  "title": "Hello World",
  "publishedAt": "2024-06-01T10:00:00Z",
  "mainImage": {"asset": {"url": "https://cdn.sanity.io/images/abc123/production/main-1200x600.jpg"}},
  "categories": [{"_id": "cat-rust", "title": "Rust"}, {"_id": "cat-async", "title": "Async"}],
  "author": {"name": "Ada Lovelace", "image": {"asset": {"url": "https://cdn.sanity.io/images/abc123/production/ada-100x100.jpg"}}},
  "body": [
    {"_type": "block", "style": "h1", "children": [{"_type": "span", "text": "Hello World"}]},
    {"_type": "block", "style": "normal", "markDefs": [{"_key": "l1", "_type": "link", "href": "https://www.rust-lang.org"}],
     "children": [
       {"_type": "span", "text": "Welcome to ", "marks": []},
       {"_type": "span", "text": "my blog", "marks": ["strong", "em"]},
       {"_type": "span", "text": ", powered by ", "marks": []},
       {"_type": "span", "text": "Rust", "marks": ["l1"]}
     ]},
    {"_type": "block", "style": "blockquote", "children": [{"_type": "span", "text": "Fearless concurrency"}]},
    {"_type": "block", "listItem": "bullet", "level": 1, "children": [{"_type": "span", "text": "Fast"}]},
    {"_type": "block", "listItem": "bullet", "level": 1, "children": [{"_type": "span", "text": "Safe"}]},
    {"_type": "block", "listItem": "number", "level": 1, "children": [{"_type": "span", "text": "Install rustup"}]},
    {"_type": "image", "asset": {"url": "https://cdn.sanity.io/images/abc123/production/crab-640x480.png"}, "alt": "Ferris", "caption": "Our mascot"},
    {"_type": "code", "code": "fn main() {\n    println!(\"<hi>\");\n}", "language": "rust"}
  ]
}"##;

#[cfg(test)]
pub const QUERY_RESPONSE: &str = r##"{"ms": 12, "query": "*[_type == \"category\"]", "result": [{"_id": "cat-rust", "title": "Rust"}]}"##;

#[cfg(test)]
pub const QUERY_ERROR: &str = r##"{"error": {"description": "expected '}' following object body", "type": "queryParseError", "start": 10, "end": 11}}"##;

#[cfg(test)]
pub use static_source::StaticSource;


#[cfg(test)]
pub fn test_site() -> crate::config::Site {
    crate::config::Site {
        name: "Ada Writes".to_string(),
        url: "https://ada.example.com".to_string(),
        author: "Ada".to_string(),
        job_title: Some("Frontend developer".to_string()),
        default_title: "Ada | Frontend developer".to_string(),
        default_description: "Portfolio & blog".to_string(),
        default_keywords: "rust, web".to_string(),
        default_og_image: "https://ada.example.com/profile.jpg".to_string(),
        same_as: vec!["https://github.com/ada".to_string()],
    }
}
