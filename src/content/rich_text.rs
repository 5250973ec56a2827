use quick_xml::escape::escape;

use crate::content::asset::image_url;
use crate::content::blocks::{Block, BlockStyle, CodeBlock, ImageBlock, ListKind, Mark, Span, TextBlock, UnknownBlock};

/// Dispatch table used by [`RichTextRenderer`]: one handler per block style,
/// mark, list kind and leaf block type.
///
/// Every handler has a plain HTML default, so an implementation only
/// overrides what it wants to style. `children` arguments are already
/// rendered HTML; everything else is raw text and must be escaped.
pub trait Components {
    fn block(&self, style: &BlockStyle, children: &str) -> String {
        match style {
            BlockStyle::H1 => format!("<h1>{}</h1>", children),
            BlockStyle::H2 => format!("<h2>{}</h2>", children),
            BlockStyle::H3 => format!("<h3>{}</h3>", children),
            BlockStyle::Blockquote => format!("<blockquote>{}</blockquote>", children),
            BlockStyle::Normal | BlockStyle::Other(_) => format!("<p>{}</p>", children),
        }
    }

    fn mark(&self, mark: &Mark, children: &str) -> String {
        match mark {
            Mark::Strong => format!("<strong>{}</strong>", children),
            Mark::Em => format!("<em>{}</em>", children),
            Mark::Link { href } if is_safe_href(href) => {
                format!(r#"<a href="{}">{}</a>"#, escape(href.as_str()), children)
            }
            Mark::Link { .. } | Mark::Other(_) => children.to_string(),
        }
    }

    fn list(&self, kind: &ListKind, items: &str) -> String {
        match kind {
            ListKind::Number => format!("<ol>{}</ol>", items),
            ListKind::Bullet | ListKind::Other(_) => format!("<ul>{}</ul>", items),
        }
    }

    fn list_item(&self, _kind: &ListKind, children: &str) -> String {
        format!("<li>{}</li>", children)
    }

    fn image_src(&self, image: &ImageBlock) -> Option<String> {
        image.url.clone()
    }

    fn image(&self, image: &ImageBlock) -> String {
        let Some(src) = self.image_src(image) else {
            return String::new();
        };
        let alt = image.alt.as_deref().unwrap_or_default();
        let mut html = format!(r#"<figure><img src="{}" alt="{}"/>"#, escape(src.as_str()), escape(alt));
        if let Some(ref caption) = image.caption {
            html.push_str(&format!("<figcaption>{}</figcaption>", escape(caption.as_str())));
        }
        html.push_str("</figure>");
        html
    }

    fn code(&self, code: &CodeBlock) -> String {
        match code.language {
            Some(ref lang) => format!(r#"<pre><code class="language-{}">{}</code></pre>"#, escape(lang.as_str()), escape(code.code.as_str())),
            None => format!("<pre><code>{}</code></pre>", escape(code.code.as_str())),
        }
    }

    fn unknown(&self, _block: &UnknownBlock, children: &str) -> String {
        if children.is_empty() {
            return String::new();
        }
        self.block(&BlockStyle::Normal, children)
    }
}

fn is_safe_href(href: &str) -> bool {
    let scheme = href.trim_start().to_ascii_lowercase();
    !(scheme.starts_with("javascript:") || scheme.starts_with("data:") || scheme.starts_with("vbscript:"))
}

/// Unstyled HTML output.
pub struct PlainComponents;

impl Components for PlainComponents {}

/// Markup used by the site theme.
pub struct SiteComponents {
    pub project_id: String,
    pub dataset: String,
}

impl Components for SiteComponents {
    fn block(&self, style: &BlockStyle, children: &str) -> String {
        match style {
            BlockStyle::H1 => format!(r#"<h1 class="text-3xl font-bold mb-6 text-white">{}</h1>"#, children),
            BlockStyle::H2 => format!(r#"<h2 class="text-2xl font-bold mb-4 text-white">{}</h2>"#, children),
            BlockStyle::H3 => format!(r#"<h3 class="text-xl font-semibold mb-3 text-white">{}</h3>"#, children),
            BlockStyle::Blockquote => format!(
                r#"<blockquote class="border-l-4 border-neon-blue pl-6 my-6 italic text-gray-300 bg-white/5 py-4 rounded-r-lg">{}</blockquote>"#,
                children),
            BlockStyle::Normal | BlockStyle::Other(_) => format!(r#"<p class="mb-4 text-gray-300 leading-relaxed">{}</p>"#, children),
        }
    }

    fn mark(&self, mark: &Mark, children: &str) -> String {
        match mark {
            Mark::Strong => format!(r#"<strong class="font-bold text-white">{}</strong>"#, children),
            Mark::Em => format!(r#"<em class="italic text-neon-blue">{}</em>"#, children),
            Mark::Link { href } if is_safe_href(href) => format!(
                r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="text-neon-blue hover:text-purple-400 underline transition-colors duration-200">{}</a>"#,
                escape(href.as_str()), children),
            Mark::Link { .. } | Mark::Other(_) => children.to_string(),
        }
    }

    fn list(&self, kind: &ListKind, items: &str) -> String {
        match kind {
            ListKind::Number => format!(r#"<ol class="list-decimal list-inside mb-4 text-gray-300 space-y-2">{}</ol>"#, items),
            ListKind::Bullet | ListKind::Other(_) => format!(r#"<ul class="list-disc list-inside mb-4 text-gray-300 space-y-2">{}</ul>"#, items),
        }
    }

    fn list_item(&self, _kind: &ListKind, children: &str) -> String {
        format!(r#"<li class="text-gray-300">{}</li>"#, children)
    }

    fn image_src(&self, image: &ImageBlock) -> Option<String> {
        image.url.clone().or_else(|| {
            image.asset_ref.as_deref()
                .and_then(|asset_ref| image_url(asset_ref, &self.project_id, &self.dataset))
        })
    }

    fn image(&self, image: &ImageBlock) -> String {
        let Some(src) = self.image_src(image) else {
            return String::new();
        };
        let alt = image.alt.as_deref().unwrap_or_default();
        let mut html = format!(
            r#"<div class="my-8"><img src="{}" alt="{}" class="w-full rounded-lg shadow-2xl"/>"#,
            escape(src.as_str()), escape(alt));
        if let Some(ref caption) = image.caption {
            html.push_str(&format!(r#"<p class="text-center text-sm text-gray-400 mt-2 italic">{}</p>"#, escape(caption.as_str())));
        }
        html.push_str("</div>");
        html
    }

    fn code(&self, code: &CodeBlock) -> String {
        format!(
            r#"<pre class="bg-gray-900 p-4 rounded-lg overflow-x-auto my-6 border border-gray-700"><code class="text-green-400 text-sm">{}</code></pre>"#,
            escape(code.code.as_str()))
    }
}

pub struct RichTextRenderer<C: Components> {
    components: C,
}

impl<C: Components> RichTextRenderer<C> {
    pub fn new(components: C) -> Self {
        RichTextRenderer { components }
    }

    pub fn render(&self, blocks: &[Block]) -> String {
        let mut html = String::new();
        let mut i = 0;

        while i < blocks.len() {
            if blocks[i].list_item().is_none() {
                html.push_str(&self.render_block(&blocks[i]));
                i += 1;
                continue;
            }

            // Consecutive list items form one list, whatever their kind or level
            let start = i;
            while i < blocks.len() && blocks[i].list_item().is_some() {
                i += 1;
            }
            let items: Vec<&TextBlock> = blocks[start..i].iter().filter_map(Block::list_item).collect();
            html.push_str(&self.render_list(&items));
        }

        html
    }

    fn render_block(&self, block: &Block) -> String {
        match block {
            Block::Text(text) => self.components.block(&text.style, &self.render_spans(&text.children)),
            Block::Image(image) => self.components.image(image),
            Block::Code(code) => self.components.code(code),
            Block::Unknown(unknown) => self.components.unknown(unknown, &self.render_spans(&unknown.children)),
        }
    }

    fn render_spans(&self, spans: &[Span]) -> String {
        spans.iter()
            .map(|span| {
                // First mark ends up outermost
                span.marks.iter().rev().fold(escape(span.text.as_str()).to_string(), |html, mark| {
                    self.components.mark(mark, &html)
                })
            })
            .collect()
    }

    fn render_list(&self, items: &[&TextBlock]) -> String {
        let mut html = String::new();
        let mut i = 0;

        while i < items.len() {
            let kind = items[i].list_item.clone().unwrap_or(ListKind::Bullet);
            let mut rendered_items = String::new();

            while i < items.len() && items[i].list_item.as_ref().unwrap_or(&ListKind::Bullet) == &kind {
                let item_level = items[i].level;
                let mut children = self.render_spans(&items[i].children);
                i += 1;

                // Deeper items belong to the item just rendered
                let nested_start = i;
                while i < items.len() && items[i].level > item_level {
                    i += 1;
                }
                if nested_start < i {
                    children.push_str(&self.render_list(&items[nested_start..i]));
                }

                rendered_items.push_str(&self.components.list_item(&kind, &children));
            }

            html.push_str(&self.components.list(&kind, &rendered_items));
        }

        html
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::content::Post;
    use crate::test_data::POST_DETAIL;

    use super::*;

    fn blocks(value: serde_json::Value) -> Vec<Block> {
        serde_json::from_value(value).unwrap()
    }

    fn text(style: &str, text: &str) -> serde_json::Value {
        json!({"_type": "block", "style": style, "children": [{"_type": "span", "text": text}]})
    }

    fn item(kind: &str, level: u32, text: &str) -> serde_json::Value {
        json!({"_type": "block", "listItem": kind, "level": level, "children": [{"_type": "span", "text": text}]})
    }

    #[test]
    fn test_render_styles() {
        let renderer = RichTextRenderer::new(PlainComponents);
        let html = renderer.render(&blocks(json!([
            text("h1", "One"), text("h2", "Two"), text("h3", "Three"),
            text("normal", "Body"), text("blockquote", "Quote"), text("h5", "Fallback")
        ])));
        assert_eq!(html, "<h1>One</h1><h2>Two</h2><h3>Three</h3><p>Body</p><blockquote>Quote</blockquote><p>Fallback</p>");
    }

    #[test]
    fn test_marks_nest_in_order() {
        let renderer = RichTextRenderer::new(PlainComponents);
        let html = renderer.render(&blocks(json!([{
            "_type": "block",
            "markDefs": [{"_key": "k", "_type": "link", "href": "https://a.b/?x=1&y=2"}],
            "children": [
                {"_type": "span", "text": "a", "marks": ["strong", "em", "k"]},
                {"_type": "span", "text": "b", "marks": ["mystery"]}
            ]
        }])));
        assert_eq!(html, r#"<p><strong><em><a href="https://a.b/?x=1&amp;y=2">a</a></em></strong>b</p>"#);
    }

    #[test]
    fn test_text_is_escaped() {
        let renderer = RichTextRenderer::new(PlainComponents);
        let html = renderer.render(&blocks(json!([text("normal", "<script>alert('x')</script>")])));
        assert_eq!(html, "<p>&lt;script&gt;alert(&apos;x&apos;)&lt;/script&gt;</p>");
    }

    #[test]
    fn test_unsafe_links_lose_their_anchor() {
        let renderer = RichTextRenderer::new(PlainComponents);
        let html = renderer.render(&blocks(json!([{
            "_type": "block",
            "markDefs": [{"_key": "k", "_type": "link", "href": " JavaScript:alert(1)"}],
            "children": [{"_type": "span", "text": "click", "marks": ["k"]}]
        }])));
        assert_eq!(html, "<p>click</p>");
    }

    #[test]
    fn test_lists_group_and_nest() {
        let renderer = RichTextRenderer::new(PlainComponents);
        let html = renderer.render(&blocks(json!([
            item("bullet", 1, "a"),
            item("bullet", 2, "a.1"),
            item("bullet", 2, "a.2"),
            item("bullet", 1, "b"),
            item("number", 1, "one"),
            text("normal", "after"),
            item("number", 1, "again")
        ])));
        assert_eq!(html, concat!(
            "<ul><li>a<ul><li>a.1</li><li>a.2</li></ul></li><li>b</li></ul>",
            "<ol><li>one</li></ol>",
            "<p>after</p>",
            "<ol><li>again</li></ol>"
        ));
    }

    #[test]
    fn test_list_starting_deep_keeps_siblings_flat() {
        let renderer = RichTextRenderer::new(PlainComponents);
        let html = renderer.render(&blocks(json!([
            item("bullet", 3, "x"),
            item("bullet", 3, "y"),
            item("odd", 1, "z")
        ])));
        assert_eq!(html, "<ul><li>x</li><li>y</li></ul><ul><li>z</li></ul>");
    }

    #[test]
    fn test_deep_item_after_shallow_sibling() {
        let renderer = RichTextRenderer::new(PlainComponents);
        let html = renderer.render(&blocks(json!([
            item("bullet", 2, "a"),
            item("bullet", 2, "b"),
            item("bullet", 3, "c"),
            item("bullet", 2, "d")
        ])));
        assert_eq!(html, "<ul><li>a</li><li>b<ul><li>c</li></ul></li><li>d</li></ul>");
    }

    #[test]
    fn test_leaf_blocks() {
        let renderer = RichTextRenderer::new(PlainComponents);
        let html = renderer.render(&blocks(json!([
            {"_type": "image", "asset": {"url": "https://cdn/x.png"}, "alt": "X", "caption": "A & B"},
            {"_type": "image", "asset": {"_ref": "image-abc-10x10-png"}},
            {"_type": "code", "code": "a < b", "language": "rust"},
            {"_type": "code"}
        ])));
        assert_eq!(html, concat!(
            r#"<figure><img src="https://cdn/x.png" alt="X"/><figcaption>A &amp; B</figcaption></figure>"#,
            r#"<pre><code class="language-rust">a &lt; b</code></pre>"#,
            "<pre><code></code></pre>"
        ));
    }

    #[test]
    fn test_unknown_blocks_never_fail() {
        let renderer = RichTextRenderer::new(PlainComponents);
        let html = renderer.render(&blocks(json!([
            {"_type": "callout", "children": [{"_type": "span", "text": "note"}]},
            {"_type": "youtube", "url": "https://youtu.be/x"},
            "just a string",
            null
        ])));
        assert_eq!(html, "<p>note</p>");
        assert_eq!(renderer.render(&[]), "");
    }

    #[test]
    fn test_site_components_resolve_asset_refs() {
        let renderer = RichTextRenderer::new(SiteComponents {
            project_id: "abc123".to_string(),
            dataset: "production".to_string(),
        });
        let html = renderer.render(&blocks(json!([
            {"_type": "image", "asset": {"_ref": "image-abc-10x10-png"}}
        ])));
        assert_eq!(html, r#"<div class="my-8"><img src="https://cdn.sanity.io/images/abc123/production/abc-10x10.png" alt="" class="w-full rounded-lg shadow-2xl"/></div>"#);
    }

    #[test]
    fn test_render_full_post() {
        let post: Post = serde_json::from_str(POST_DETAIL).unwrap();
        let renderer = RichTextRenderer::new(SiteComponents {
            project_id: "abc123".to_string(),
            dataset: "production".to_string(),
        });
        let html = renderer.render(&post.body);
        assert!(html.starts_with(r#"<h1 class="text-3xl font-bold mb-6 text-white">Hello World</h1>"#));
        assert!(html.contains(r#"<strong class="font-bold text-white"><em class="italic text-neon-blue">my blog</em></strong>"#));
        assert!(html.contains(r#"<ul class="list-disc list-inside mb-4 text-gray-300 space-y-2"><li class="text-gray-300">Fast</li><li class="text-gray-300">Safe</li></ul>"#));
        assert!(html.contains("Our mascot"));
        assert!(html.contains("println!(&quot;&lt;hi&gt;&quot;);"));
    }
}
