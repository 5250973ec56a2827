use serde::Deserialize;
use serde_json::{Map, Value};

/// One structural unit of a Portable Text body.
///
/// Decoding never fails: any JSON value that is not a recognised block
/// becomes [`Block::Unknown`], so a body written with newer block types
/// still renders.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum Block {
    Text(TextBlock),
    Image(ImageBlock),
    Code(CodeBlock),
    Unknown(UnknownBlock),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub style: BlockStyle,
    pub list_item: Option<ListKind>,
    pub level: u32,
    pub children: Vec<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockStyle {
    H1,
    H2,
    H3,
    Normal,
    Blockquote,
    Other(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListKind {
    Bullet,
    Number,
    Other(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub marks: Vec<Mark>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Strong,
    Em,
    Link { href: String },
    Other(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    pub url: Option<String>,
    pub asset_ref: Option<String>,
    pub alt: Option<String>,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    pub code: String,
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnknownBlock {
    pub type_name: String,
    pub children: Vec<Span>,
}

impl From<Value> for Block {
    fn from(value: Value) -> Self {
        let Value::Object(obj) = value else {
            return Block::Unknown(UnknownBlock {
                type_name: String::new(),
                children: vec![],
            });
        };

        match str_field(&obj, "_type") {
            Some("block") => Block::Text(TextBlock::from_object(&obj)),
            Some("image") => Block::Image(ImageBlock::from_object(&obj)),
            Some("code") => Block::Code(CodeBlock {
                code: str_field(&obj, "code").unwrap_or_default().to_string(),
                language: str_field(&obj, "language").map(str::to_string),
            }),
            other => Block::Unknown(UnknownBlock {
                type_name: other.unwrap_or_default().to_string(),
                children: parse_spans(&obj),
            }),
        }
    }
}

impl Block {
    /// Text of the first child span, if the block carries spans at all.
    pub fn first_text(&self) -> Option<&str> {
        let children = match self {
            Block::Text(text) => &text.children,
            Block::Unknown(unknown) => &unknown.children,
            Block::Image(_) | Block::Code(_) => return None,
        };
        children.first().map(|span| span.text.as_str())
    }

    pub fn list_item(&self) -> Option<&TextBlock> {
        match self {
            Block::Text(text) if text.list_item.is_some() => Some(text),
            _ => None,
        }
    }
}

impl TextBlock {
    fn from_object(obj: &Map<String, Value>) -> Self {
        let style = match str_field(obj, "style") {
            None | Some("normal") => BlockStyle::Normal,
            Some("h1") => BlockStyle::H1,
            Some("h2") => BlockStyle::H2,
            Some("h3") => BlockStyle::H3,
            Some("blockquote") => BlockStyle::Blockquote,
            Some(other) => BlockStyle::Other(other.to_string()),
        };

        let list_item = str_field(obj, "listItem").map(|kind| match kind {
            "bullet" => ListKind::Bullet,
            "number" => ListKind::Number,
            other => ListKind::Other(other.to_string()),
        });

        let level = obj.get("level")
            .and_then(Value::as_u64)
            .map(|level| level.clamp(1, u32::MAX as u64) as u32)
            .unwrap_or(1);

        TextBlock {
            style,
            list_item,
            level,
            children: parse_spans(obj),
        }
    }
}

impl ImageBlock {
    fn from_object(obj: &Map<String, Value>) -> Self {
        let asset = obj.get("asset").and_then(Value::as_object);
        let url = asset.and_then(|a| str_field(a, "url")).map(str::to_string);
        let asset_ref = asset.and_then(|a| str_field(a, "_ref")).map(str::to_string);

        // alt lives on the image in the schema, but dereferenced assets carry it too
        let alt = str_field(obj, "alt")
            .or_else(|| asset.and_then(|a| str_field(a, "alt")))
            .map(str::to_string);

        ImageBlock {
            url,
            asset_ref,
            alt,
            caption: str_field(obj, "caption").map(str::to_string),
        }
    }
}

fn str_field<'a>(obj: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    obj.get(name).and_then(Value::as_str)
}

fn parse_spans(obj: &Map<String, Value>) -> Vec<Span> {
    let mark_defs: Vec<&Map<String, Value>> = obj.get("markDefs")
        .and_then(Value::as_array)
        .map(|defs| defs.iter().filter_map(Value::as_object).collect())
        .unwrap_or_default();

    let Some(children) = obj.get("children").and_then(Value::as_array) else {
        return vec![];
    };

    children.iter()
        .filter_map(Value::as_object)
        .map(|child| {
            let text = str_field(child, "text").unwrap_or_default().to_string();
            let marks = child.get("marks")
                .and_then(Value::as_array)
                .map(|marks| marks.iter()
                    .filter_map(Value::as_str)
                    .map(|mark| resolve_mark(mark, &mark_defs))
                    .collect())
                .unwrap_or_default();
            Span { text, marks }
        })
        .collect()
}

fn resolve_mark(name: &str, mark_defs: &[&Map<String, Value>]) -> Mark {
    match name {
        "strong" => return Mark::Strong,
        "em" => return Mark::Em,
        _ => {}
    }

    let def = mark_defs.iter().find(|def| str_field(def, "_key") == Some(name));
    match def {
        Some(def) if str_field(def, "_type") == Some("link") => Mark::Link {
            href: str_field(def, "href").unwrap_or_default().to_string(),
        },
        Some(def) => Mark::Other(str_field(def, "_type").unwrap_or(name).to_string()),
        None => Mark::Other(name.to_string()),
    }
}
