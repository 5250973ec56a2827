use chrono::{DateTime, Utc};

use crate::content::blocks::Block;

pub const EXCERPT_CHARS: usize = 150;
pub const EXCERPT_ELLIPSIS: &str = "...";
pub const EXCERPT_PLACEHOLDER: &str = "Read more...";

/// Summary of a post body: the first block's first span, cut to
/// [`EXCERPT_CHARS`] characters and followed by an ellipsis.
pub fn excerpt(body: &[Block]) -> String {
    let text = body.first().and_then(Block::first_text).unwrap_or_default();
    if text.is_empty() {
        return EXCERPT_PLACEHOLDER.to_string();
    }

    let mut summary: String = text.chars().take(EXCERPT_CHARS).collect();
    summary.push_str(EXCERPT_ELLIPSIS);
    summary
}

/// Date as shown on the site, e.g. "June 1, 2024".
pub fn format_long_date(date_time: &DateTime<Utc>) -> String {
    date_time.format("%B %-d, %Y").to_string()
}
