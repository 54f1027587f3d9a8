pub mod portfolio;
pub mod profiles;
pub mod requests;

use serde::Deserialize;

/// Query for the client dashboard's freelancer list: `?search=&visible=`.
///
/// `visible` is how many matches are currently revealed; each "see more"
/// adds one page. Values are rounded up to a whole number of pages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RevealQuery {
    pub search: Option<String>,
    pub visible: Option<usize>,
}

impl RevealQuery {
    pub fn search(&self) -> &str {
        self.search.as_deref().unwrap_or_default()
    }

    pub fn visible(&self, page_size: usize) -> usize {
        let page_size = page_size.max(1);
        match self.visible {
            Some(n) if n > page_size => n.div_ceil(page_size).saturating_mul(page_size),
            _ => page_size,
        }
    }
}

/// One revealed slice of a filtered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal<T> {
    pub items: Vec<T>,
    pub total_matches: usize,
    pub has_more: bool,
    pub next_visible: usize,
}

/// Keep the first `visible` items and report whether "see more" applies.
pub fn reveal<T>(matches: Vec<T>, visible: usize, page_size: usize) -> Reveal<T> {
    let total_matches = matches.len();
    let items: Vec<T> = matches.into_iter().take(visible).collect();
    let has_more = visible < total_matches;
    Reveal {
        items,
        total_matches,
        has_more,
        next_visible: if has_more {
            visible.saturating_add(page_size)
        } else {
            visible
        },
    }
}

