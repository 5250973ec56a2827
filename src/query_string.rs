use std::collections::HashMap;

use crate::controller::listing::CategoryFilter;

/// Upper bound for `more`, a hand-edited URL should not loop for ages.
const MAX_LOAD_MORE: u32 = 1000;

#[derive(PartialEq, Debug)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let vs: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        let items: HashMap<String, String> = vs.into_iter().collect();

        QueryString {
            items,
        }
    }

    pub fn get_category(&self) -> CategoryFilter {
        CategoryFilter::from_param(self.items.get("category").map(String::as_str))
    }

    /// How many times "load more" was pressed.
    pub fn get_more(&self) -> u32 {
        let val = self.items.get("more").and_then(|v| v.parse::<u32>().ok()).unwrap_or(0);
        val.min(MAX_LOAD_MORE)
    }
}

/// Link to the listing with `filter` applied and `more` extra steps revealed.
pub fn listing_link(filter: &CategoryFilter, more: u32) -> String {
    let mut pairs: Vec<(&str, String)> = vec![];
    if let CategoryFilter::Category(ref id) = filter {
        pairs.push(("category", id.0.clone()));
    }
    if more > 0 {
        pairs.push(("more", more.to_string()));
    }

    match serde_urlencoded::to_string(&pairs) {
        Ok(qs) if !qs.is_empty() => format!("/blogs?{}", qs),
        _ => "/blogs".to_string(),
    }
}
