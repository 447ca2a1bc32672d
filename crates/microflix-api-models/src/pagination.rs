//! Compact page navigation windows.

use serde::{Deserialize, Serialize};

/// Page counts up to this size are listed in full.
pub const FULL_LISTING_LIMIT: u32 = 7;

/// One entry of a navigation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "index")]
pub enum PageSlot {
    /// A navigable zero-based page index.
    Page(u32),
    /// An elided run of pages.
    Gap,
}

/// Navigation window for `current` out of `total` pages.
///
/// Small page counts are listed in full. Larger ones keep the first page,
/// the last page and the neighbours of `current`, with [`PageSlot::Gap`]
/// standing in for the elided runs, so the result never exceeds seven
/// entries. An out-of-range `current` does not panic but yields an
/// unspecified window.
#[must_use]
pub fn window(current: u32, total: u32) -> Vec<PageSlot> {
    if total <= FULL_LISTING_LIMIT {
        return (0..total).map(PageSlot::Page).collect();
    }

    let last = total - 1;
    let mut slots = Vec::with_capacity(FULL_LISTING_LIMIT as usize);
    slots.push(PageSlot::Page(0));
    if current > 3 {
        slots.push(PageSlot::Gap);
    }

    let start = current.saturating_sub(1).max(1);
    let end = current.saturating_add(1).min(total - 2);
    slots.extend((start..=end).map(PageSlot::Page));

    if current < total - 4 {
        slots.push(PageSlot::Gap);
    }
    slots.push(PageSlot::Page(last));
    slots
}

#[cfg(test)]
mod tests {
    use super::PageSlot::{Gap, Page};
    use super::*;

    #[test]
    fn small_totals_are_listed_in_full() {
        assert_eq!(
            window(0, 5),
            vec![Page(0), Page(1), Page(2), Page(3), Page(4)]
        );
        assert_eq!(window(3, 7).len(), 7);
        assert!(window(0, 0).is_empty());
    }

    #[test]
    fn middle_page_has_gaps_on_both_sides() {
        assert_eq!(
            window(10, 20),
            vec![Page(0), Gap, Page(9), Page(10), Page(11), Gap, Page(19)]
        );
    }

    #[test]
    fn early_page_has_no_leading_gap() {
        assert_eq!(
            window(2, 20),
            vec![Page(0), Page(1), Page(2), Page(3), Gap, Page(19)]
        );
        assert_eq!(window(0, 20), vec![Page(0), Page(1), Gap, Page(19)]);
    }

    #[test]
    fn late_page_has_no_trailing_gap() {
        assert_eq!(
            window(19, 20),
            vec![Page(0), Gap, Page(18), Page(19)]
        );
        // The trailing gap is only emitted below `total - 4`.
        assert_eq!(
            window(16, 20),
            vec![Page(0), Gap, Page(15), Page(16), Page(17), Page(19)]
        );
    }

    #[test]
    fn window_is_bounded_and_ordered() {
        for total in 0..60 {
            for current in 0..total {
                let slots = window(current, total);
                assert!(slots.len() <= 7, "window({current}, {total}) = {slots:?}");
                let pages: Vec<u32> = slots
                    .iter()
                    .filter_map(|slot| match slot {
                        Page(index) => Some(*index),
                        Gap => None,
                    })
                    .collect();
                assert!(pages.windows(2).all(|pair| pair[0] < pair[1]));
                assert!(pages.contains(&current));
            }
        }
    }

    #[test]
    fn out_of_range_current_does_not_panic() {
        let _ = window(u32::MAX, 20);
        let _ = window(500, 9);
    }
}
