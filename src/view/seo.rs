use chrono::{SecondsFormat, Utc};
use quick_xml::escape::escape;
use serde_json::{json, Value};

use crate::config::Site;
use crate::content::Post;

const DEFAULT_OG_TYPE: &str = "website";
const DEFAULT_TWITTER_CARD: &str = "summary_large_image";
const DESCRIPTION_CHARS: usize = 160;

/// Document head options of a page. Anything left out falls back to the
/// site defaults from the configuration.
#[derive(Debug, Default, Clone)]
pub struct SeoOptions {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub og_image: Option<String>,
    pub og_url: Option<String>,
    pub og_type: Option<String>,
    pub twitter_card: Option<String>,
    pub canonical_url: Option<String>,
    pub author: Option<String>,
    pub published_at: Option<String>,
    pub is_blog_post: bool,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn meta_name(html: &mut String, name: &str, content: &str) {
    html.push_str(&format!("<meta name=\"{}\" content=\"{}\"/>\n", name, escape(content)));
}

fn meta_property(html: &mut String, property: &str, content: &str) {
    html.push_str(&format!("<meta property=\"{}\" content=\"{}\"/>\n", property, escape(content)));
}

fn json_ld(html: &mut String, value: &Value) {
    // "</script>" inside a string must not end the element
    let json = value.to_string().replace("</", "<\\/");
    html.push_str(&format!("<script type=\"application/ld+json\">{}</script>\n", json));
}

impl SeoOptions {
    pub fn for_listing(site: &Site) -> Self {
        let url = format!("{}/blogs", site.url);
        SeoOptions {
            title: Some(format!("Blog | {}", site.name)),
            og_url: Some(url.clone()),
            canonical_url: Some(url),
            ..Default::default()
        }
    }

    /// Head of a post page. The description is the start of the first
    /// span of the body.
    pub fn for_post(site: &Site, post: &Post, slug: &str) -> Self {
        let url = format!("{}/blogs/{}", site.url, slug);
        let description = post.body.first()
            .and_then(|block| block.first_text())
            .map(|text| text.chars().take(DESCRIPTION_CHARS).collect());
        let keywords = post.categories.iter()
            .map(|c| c.title.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        SeoOptions {
            title: Some(format!("{} | Blog - {}", post.title, site.author)),
            description,
            keywords: Some(keywords),
            og_image: post.main_image.as_ref().and_then(|i| i.url()).map(str::to_string),
            og_url: Some(url.clone()),
            canonical_url: Some(url),
            author: post.author.as_ref().map(|a| a.name.clone()),
            published_at: post.published_at.map(|d| d.to_rfc3339_opts(SecondsFormat::Millis, true)),
            is_blog_post: true,
            ..Default::default()
        }
    }

    pub fn render(&self, site: &Site) -> String {
        let title = non_empty(&self.title).unwrap_or(&site.default_title);
        let description = non_empty(&self.description).unwrap_or(&site.default_description);
        let keywords = non_empty(&self.keywords).unwrap_or(&site.default_keywords);
        let og_image = non_empty(&self.og_image).unwrap_or(&site.default_og_image);
        let og_url = non_empty(&self.og_url).unwrap_or(&site.url);
        let og_type = non_empty(&self.og_type).unwrap_or(DEFAULT_OG_TYPE);
        let twitter_card = non_empty(&self.twitter_card).unwrap_or(DEFAULT_TWITTER_CARD);
        let canonical_url = non_empty(&self.canonical_url).unwrap_or(&site.url);

        let mut html = String::new();
        html.push_str(&format!("<title>{}</title>\n", escape(title)));
        meta_name(&mut html, "description", description);
        meta_name(&mut html, "keywords", keywords);
        meta_name(&mut html, "author", &site.author);
        meta_name(&mut html, "robots", "index, follow");
        html.push_str(&format!("<link rel=\"canonical\" href=\"{}\"/>\n", escape(canonical_url)));

        meta_property(&mut html, "og:title", title);
        meta_property(&mut html, "og:description", description);
        meta_property(&mut html, "og:image", og_image);
        meta_property(&mut html, "og:url", og_url);
        meta_property(&mut html, "og:type", og_type);
        meta_property(&mut html, "og:site_name", &site.name);

        meta_name(&mut html, "twitter:card", twitter_card);
        meta_name(&mut html, "twitter:title", title);
        meta_name(&mut html, "twitter:description", description);
        meta_name(&mut html, "twitter:image", og_image);

        json_ld(&mut html, &self.person(site));
        if self.is_blog_post {
            json_ld(&mut html, &self.blog_posting(site, title, description, og_image, og_url));
        }

        html
    }

    fn person(&self, site: &Site) -> Value {
        let mut person = json!({
            "@context": "https://schema.org",
            "@type": "Person",
            "name": site.author,
            "url": site.url,
        });
        if let Some(ref job_title) = site.job_title {
            person["jobTitle"] = json!(job_title);
        }
        if !site.same_as.is_empty() {
            person["sameAs"] = json!(site.same_as);
        }
        person
    }

    fn blog_posting(&self, site: &Site, title: &str, description: &str, image: &str, url: &str) -> Value {
        let author = non_empty(&self.author).unwrap_or(&site.author);
        let published_at = non_empty(&self.published_at)
            .map(str::to_string)
            .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));

        json!({
            "@context": "https://schema.org",
            "@type": "BlogPosting",
            "headline": title,
            "description": description,
            "image": image,
            "author": {"@type": "Person", "name": author},
            "publisher": {
                "@type": "Organization",
                "name": site.author,
                "logo": {"@type": "ImageObject", "url": site.default_og_image},
            },
            "datePublished": published_at,
            "dateModified": published_at,
            "mainEntityOfPage": {"@type": "WebPage", "@id": url},
        })
    }
}
