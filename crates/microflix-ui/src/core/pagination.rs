//! Page navigation model for list views.
//!
//! The window itself lives next to the `Page` envelope so native callers
//! share it; this module turns it into link labels and targets.

pub use microflix_api_models::pagination::{FULL_LISTING_LIMIT, PageSlot, window};

/// Label shown for an elided run of pages.
pub const GAP_LABEL: &str = "…";

/// One rendered entry of the page navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageLink {
    /// One-based page number, or [`GAP_LABEL`].
    pub label: String,
    /// Zero-based page to load when activated. `None` for gaps.
    pub target: Option<u32>,
    /// Marks the page currently shown.
    pub current: bool,
}

/// Navigation links for `current` out of `total` pages.
#[must_use]
pub fn page_links(current: u32, total: u32) -> Vec<PageLink> {
    window(current, total)
        .into_iter()
        .map(|slot| match slot {
            PageSlot::Page(index) => PageLink {
                label: index.saturating_add(1).to_string(),
                target: Some(index),
                current: index == current,
            },
            PageSlot::Gap => PageLink {
                label: GAP_LABEL.to_string(),
                target: None,
                current: false,
            },
        })
        .collect()
}

/// Page before `current`, if any.
#[must_use]
pub const fn previous_page(current: u32) -> Option<u32> {
    current.checked_sub(1)
}

/// Page after `current` when `total` pages exist.
#[must_use]
pub fn next_page(current: u32, total: u32) -> Option<u32> {
    current.checked_add(1).filter(|next| *next < total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_label_one_based_and_mark_current() {
        let links = page_links(10, 20);
        let labels: Vec<&str> = links.iter().map(|link| link.label.as_str()).collect();
        assert_eq!(labels, ["1", GAP_LABEL, "10", "11", "12", GAP_LABEL, "20"]);

        let current: Vec<_> = links.iter().filter(|link| link.current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].target, Some(10));
        assert!(links[1].target.is_none());
    }

    #[test]
    fn single_page_has_no_neighbours() {
        assert_eq!(page_links(0, 1).len(), 1);
        assert_eq!(previous_page(0), None);
        assert_eq!(next_page(0, 1), None);
    }

    #[test]
    fn neighbours_stay_in_range() {
        assert_eq!(previous_page(3), Some(2));
        assert_eq!(next_page(3, 5), Some(4));
        assert_eq!(next_page(4, 5), None);
        assert_eq!(next_page(u32::MAX, u32::MAX), None);
    }

    #[test]
    fn empty_listing_renders_nothing() {
        assert!(page_links(0, 0).is_empty());
    }
}
