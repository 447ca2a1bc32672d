//! Watchlist engagements.

use microflix_api_models::EngagementItem;

use super::RATING_SERVICE;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::request::ApiRequest;
use crate::transport::Transport;

fn watchlist_path(movie_id: i64) -> String {
    format!("{RATING_SERVICE}/engagements/watchlist/{movie_id}")
}

impl<T: Transport> ApiClient<T> {
    /// The caller's watchlist, newest first.
    ///
    /// # Errors
    ///
    /// Returns any gateway failure.
    pub async fn fetch_watchlist(&self, token: &str) -> Result<Vec<EngagementItem>, ApiError> {
        self.fetch(
            ApiRequest::get(format!("{RATING_SERVICE}/engagements/watchlist")).bearer(token),
        )
        .await
    }

    /// Whether a movie is on the caller's watchlist.
    ///
    /// # Errors
    ///
    /// Returns any gateway failure.
    pub async fn is_in_watchlist(&self, movie_id: i64, token: &str) -> Result<bool, ApiError> {
        self.fetch(ApiRequest::get(format!("{}/me", watchlist_path(movie_id))).bearer(token))
            .await
    }

    /// Add a movie. Adding twice is harmless.
    ///
    /// # Errors
    ///
    /// Returns any gateway failure.
    pub async fn add_to_watchlist(&self, movie_id: i64, token: &str) -> Result<(), ApiError> {
        self.send(ApiRequest::put(watchlist_path(movie_id)).bearer(token))
            .await
    }

    /// Remove a movie. Removing an absent movie is harmless.
    ///
    /// # Errors
    ///
    /// Returns any gateway failure.
    pub async fn remove_from_watchlist(&self, movie_id: i64, token: &str) -> Result<(), ApiError> {
        self.send(ApiRequest::delete(watchlist_path(movie_id)).bearer(token))
            .await
    }
}
