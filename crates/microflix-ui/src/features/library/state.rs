//! The signed-in user's own lists: watchlist and ratings.
//!
//! # Design
//! - Both pages fetch the list first, then every referenced movie, and pair
//!   them in list order.
//! - One removal runs at a time; the row disappears only once the gateway
//!   confirms it.

use microflix_api_models::{EngagementItem, Movie, Rating};

use crate::core::feedback::{Feedback, Notices};
use crate::core::remote::Remote;

/// Fallback message when the watchlist cannot be loaded.
pub const WATCHLIST_LOAD_FAILED: &str = "Failed to load watchlist.";
/// Fallback message when a watchlist entry cannot be removed.
pub const WATCHLIST_UPDATE_FAILED: &str = "Failed to update watchlist.";
/// Fallback message when the user's ratings cannot be loaded.
pub const RATINGS_LOAD_FAILED: &str = "Failed to load your ratings.";
/// Fallback message when a rating cannot be removed.
pub const RATING_REMOVE_FAILED: &str = "Failed to remove rating.";

/// A row that refers to one movie.
pub trait ShelfEntry {
    /// Movie the row is about.
    fn movie_id(&self) -> i64;
}

/// Watchlist row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WatchlistEntry {
    /// The movie.
    pub movie: Movie,
    /// The stored engagement.
    pub item: EngagementItem,
}

impl ShelfEntry for WatchlistEntry {
    fn movie_id(&self) -> i64 {
        self.item.movie_id
    }
}

/// A movie together with the user's score for it.
#[derive(Clone, Debug, PartialEq)]
pub struct RatedMovie {
    /// The movie.
    pub movie: Movie,
    /// The user's rating.
    pub rating: Rating,
}

impl ShelfEntry for RatedMovie {
    fn movie_id(&self) -> i64 {
        self.rating.movie_id
    }
}

/// Pair watchlist items with movies fetched in the same order.
#[must_use]
pub fn watchlist_entries(items: Vec<EngagementItem>, movies: Vec<Movie>) -> Vec<WatchlistEntry> {
    items
        .into_iter()
        .zip(movies)
        .map(|(item, movie)| WatchlistEntry { movie, item })
        .collect()
}

/// Pair ratings with movies fetched in the same order.
#[must_use]
pub fn rated_movies(ratings: Vec<Rating>, movies: Vec<Movie>) -> Vec<RatedMovie> {
    ratings
        .into_iter()
        .zip(movies)
        .map(|(rating, movie)| RatedMovie { movie, rating })
        .collect()
}

/// State of a personal list page.
#[derive(Clone, Debug, PartialEq)]
pub struct Shelf<T> {
    /// Rows, once loaded.
    pub entries: Remote<Vec<T>>,
    /// Movie whose removal is in flight.
    pub removing: Option<i64>,
    /// Messages shown above the list.
    pub notices: Notices,
}

impl<T> Default for Shelf<T> {
    fn default() -> Self {
        Self {
            entries: Remote::Loading,
            removing: None,
            notices: Notices::default(),
        }
    }
}

/// Transitions of a [`Shelf`].
#[derive(Clone, Debug, PartialEq)]
pub enum ShelfEvent<T> {
    /// A load began.
    Started,
    /// Rows arrived.
    Loaded(Vec<T>),
    /// Removal of a movie began.
    Removing(i64),
    /// The gateway confirmed a removal.
    Removed(i64),
    /// A load or removal failed.
    Failed(Feedback),
    /// The user closed a notice.
    Dismiss(u64),
}

impl<T: ShelfEntry> Shelf<T> {
    /// Next state after `event`.
    #[must_use]
    pub fn apply(mut self, event: ShelfEvent<T>) -> Self {
        match event {
            ShelfEvent::Started => {
                self.entries = Remote::Loading;
                self.removing = None;
                self.notices.clear();
            }
            ShelfEvent::Loaded(rows) => self.entries = Remote::Loaded(rows),
            ShelfEvent::Removing(movie_id) => self.removing = Some(movie_id),
            ShelfEvent::Removed(movie_id) => {
                if let Remote::Loaded(rows) = &mut self.entries {
                    rows.retain(|row| row.movie_id() != movie_id);
                }
                self.removing = None;
            }
            ShelfEvent::Failed(feedback) => {
                self.removing = None;
                if matches!(self.entries, Remote::Loading) {
                    self.entries = Remote::Failed;
                }
                if let Feedback::Message(message) = feedback {
                    self.notices.error(message);
                }
            }
            ShelfEvent::Dismiss(id) => {
                self.notices.dismiss(id);
            }
        }
        self
    }

    /// Whether removal controls should be disabled.
    #[must_use]
    pub const fn busy(&self) -> bool {
        self.removing.is_some()
    }
}
