//! Catalog listing state.

use microflix_api_models::{Movie, MovieQuery, Page};

use crate::core::remote::{Loadable, Remote};

/// Movies per catalog page.
pub const PAGE_SIZE: u32 = 12;
/// Fallback message when the catalog cannot be loaded.
pub const LIST_FAILED: &str = "Failed to load movies.";
/// Fallback message when a single movie cannot be loaded.
pub const DETAIL_FAILED: &str = "Failed to load this movie.";

/// Query for one page of the default catalog listing.
#[must_use]
pub fn listing_query(page: u32) -> MovieQuery {
    MovieQuery::page(page, PAGE_SIZE)
}

/// Listing state.
pub type ListState = Loadable<Page<Movie>>;

impl ListState {
    /// Total pages to offer in navigation; zero until loaded.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        match &self.data {
            Remote::Loaded(page) => page.total_pages,
            Remote::Loading | Remote::Failed => 0,
        }
    }
}
