//! Rating and watchlist state for one movie, as seen by the signed-in user.
//!
//! # Design
//! - Pure transitions so the view only dispatches events.
//! - Failures land in `notices`; a rejected token flips the state to
//!   signed out and the view clears the stored session.

use microflix_api_models::Rating;
use microflix_session::AuthView;

use crate::core::feedback::{Feedback, Notices};
use crate::core::forms::format_rating_input;

/// Fallback message when loading the per-user state fails.
pub const LOAD_FAILED: &str = "Failed to load your movie state.";
/// Fallback message when saving a rating fails.
pub const SAVE_FAILED: &str = "Failed to save rating.";
/// Fallback message when deleting a rating fails.
pub const DELETE_FAILED: &str = "Failed to delete rating.";
/// Fallback message when toggling the watchlist fails.
pub const WATCHLIST_FAILED: &str = "Failed to update watchlist.";

/// Per-movie actions state.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct MovieActionsState {
    /// Session as last seen by this view.
    pub auth: AuthView,
    /// Stored rating, if any.
    pub rating: Option<Rating>,
    /// Contents of the rating field.
    pub rating_input: String,
    /// Whether the movie is on the watchlist.
    pub in_watchlist: bool,
    /// Per-user state is being fetched.
    pub loading: bool,
    /// A rating save or delete is in flight.
    pub saving_rating: bool,
    /// A watchlist change is in flight.
    pub toggling_watchlist: bool,
    /// Messages shown above the controls.
    pub notices: Notices,
}

/// Transitions of [`MovieActionsState`].
#[derive(Clone, Debug, PartialEq)]
pub enum MovieActionsEvent {
    /// The session changed; start over.
    Session(AuthView),
    /// Rating and watchlist membership arrived.
    Loaded {
        /// Stored rating.
        rating: Option<Rating>,
        /// Watchlist membership.
        in_watchlist: bool,
    },
    /// The user edited the rating field.
    InputChanged(String),
    /// The rating field failed validation.
    Invalid(String),
    /// A rating save or delete started.
    SavingStarted,
    /// The rating was stored.
    RatingSaved(Rating),
    /// The rating was deleted.
    RatingRemoved,
    /// A watchlist change started.
    ToggleStarted,
    /// Watchlist membership changed.
    WatchlistChanged(bool),
    /// A call failed.
    Failed(Feedback),
    /// The user closed a notice.
    Dismiss(u64),
}

impl MovieActionsState {
    /// Initial state for a session view.
    #[must_use]
    pub fn for_session(auth: AuthView) -> Self {
        let loading = auth.is_signed_in();
        Self {
            auth,
            loading,
            ..Self::default()
        }
    }

    /// Apply one event.
    #[must_use]
    pub fn apply(mut self, event: MovieActionsEvent) -> Self {
        match event {
            MovieActionsEvent::Session(auth) => return Self::for_session(auth),
            MovieActionsEvent::Loaded {
                rating,
                in_watchlist,
            } => {
                self.rating_input = rating
                    .as_ref()
                    .map(|rating| format_rating_input(rating.rate))
                    .unwrap_or_default();
                self.rating = rating;
                self.in_watchlist = in_watchlist;
                self.loading = false;
            }
            MovieActionsEvent::InputChanged(value) => self.rating_input = value,
            MovieActionsEvent::Invalid(message) => {
                self.notices.clear();
                self.notices.error(message);
            }
            MovieActionsEvent::SavingStarted => {
                self.saving_rating = true;
                self.notices.clear();
            }
            MovieActionsEvent::RatingSaved(rating) => {
                self.rating_input = format_rating_input(rating.rate);
                self.rating = Some(rating);
                self.saving_rating = false;
            }
            MovieActionsEvent::RatingRemoved => {
                self.rating = None;
                self.rating_input.clear();
                self.saving_rating = false;
            }
            MovieActionsEvent::ToggleStarted => {
                self.toggling_watchlist = true;
                self.notices.clear();
            }
            MovieActionsEvent::WatchlistChanged(present) => {
                self.in_watchlist = present;
                self.toggling_watchlist = false;
            }
            MovieActionsEvent::Failed(Feedback::AuthExpired) => {
                return Self::for_session(AuthView::SignedOut);
            }
            MovieActionsEvent::Failed(Feedback::Message(message)) => {
                self.loading = false;
                self.saving_rating = false;
                self.toggling_watchlist = false;
                self.notices.error(message);
            }
            MovieActionsEvent::Dismiss(id) => {
                self.notices.dismiss(id);
            }
        }
        self
    }

    /// Controls are disabled while a call is in flight.
    #[must_use]
    pub const fn busy(&self) -> bool {
        self.loading || self.saving_rating || self.toggling_watchlist
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rating(rate: f64) -> Rating {
        serde_json::from_value(json!({
            "id": 5,
            "userId": "6f1f0c36-3d3c-4f54-9a38-4f2f4b8c6a10",
            "movieId": 42,
            "rate": rate,
            "createdAt": "2025-01-02T03:04:05Z",
            "updatedAt": "2025-01-02T03:04:05Z"
        }))
        .expect("rating fixture")
    }

    fn signed_in() -> MovieActionsState {
        MovieActionsState::for_session(AuthView::SignedIn {
            display_name: "Ana".into(),
        })
    }

    #[test]
    fn signed_out_does_not_load() {
        let state = MovieActionsState::for_session(AuthView::SignedOut);
        assert!(!state.loading);
        assert!(signed_in().loading);
    }

    #[test]
    fn loaded_rating_fills_the_input() {
        let state = signed_in().apply(MovieActionsEvent::Loaded {
            rating: Some(rating(8.0)),
            in_watchlist: true,
        });
        assert_eq!(state.rating_input, "8.0");
        assert!(state.in_watchlist);
        assert!(!state.busy());
    }

    #[test]
    fn failure_keeps_data_and_shows_message() {
        let state = signed_in()
            .apply(MovieActionsEvent::Loaded {
                rating: Some(rating(6.0)),
                in_watchlist: false,
            })
            .apply(MovieActionsEvent::SavingStarted)
            .apply(MovieActionsEvent::Failed(Feedback::Message(
                SAVE_FAILED.into(),
            )));
        assert!(!state.saving_rating);
        assert!(state.rating.is_some());
        assert_eq!(state.notices.items()[0].message, SAVE_FAILED);
    }

    #[test]
    fn expired_token_signs_the_view_out() {
        let state = signed_in()
            .apply(MovieActionsEvent::ToggleStarted)
            .apply(MovieActionsEvent::Failed(Feedback::AuthExpired));
        assert_eq!(state.auth, AuthView::SignedOut);
        assert!(!state.busy());
        assert!(state.notices.is_empty());
    }

    #[test]
    fn new_action_clears_previous_notice() {
        let state = signed_in()
            .apply(MovieActionsEvent::Invalid("Rating must be between 1.0 and 10.0.".into()))
            .apply(MovieActionsEvent::SavingStarted);
        assert!(state.notices.is_empty());
    }

    #[test]
    fn removing_rating_empties_the_input() {
        let state = signed_in()
            .apply(MovieActionsEvent::RatingSaved(rating(9.5)))
            .apply(MovieActionsEvent::RatingRemoved);
        assert!(state.rating.is_none());
        assert!(state.rating_input.is_empty());
    }

    #[test]
    fn dismiss_removes_notice() {
        let state = signed_in().apply(MovieActionsEvent::Invalid("bad".into()));
        let id = state.notices.items()[0].id;
        let state = state.apply(MovieActionsEvent::Dismiss(id));
        assert!(state.notices.is_empty());
    }
}
