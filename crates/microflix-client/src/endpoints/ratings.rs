//! Ratings: public summaries and the signed-in user's own scores.

use microflix_api_models::{Rating, RatingRequest, RatingSummary, RatingValue};

use super::RATING_SERVICE;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::request::ApiRequest;
use crate::transport::Transport;

impl<T: Transport> ApiClient<T> {
    /// Average and count for a movie. No authentication required.
    ///
    /// # Errors
    ///
    /// Returns any gateway failure.
    pub async fn fetch_rating_summary(&self, movie_id: i64) -> Result<RatingSummary, ApiError> {
        self.fetch(ApiRequest::get(format!(
            "{RATING_SERVICE}/ratings/movie/{movie_id}/summary"
        )))
        .await
    }

    /// Every rating the token's owner has given.
    ///
    /// # Errors
    ///
    /// Returns any gateway failure.
    pub async fn fetch_my_ratings(&self, token: &str) -> Result<Vec<Rating>, ApiError> {
        self.fetch(ApiRequest::get(format!("{RATING_SERVICE}/ratings/me")).bearer(token))
            .await
    }

    /// The caller's rating for one movie; `None` when they have not rated it.
    ///
    /// # Errors
    ///
    /// Returns any gateway failure other than 404.
    pub async fn fetch_my_rating(
        &self,
        movie_id: i64,
        token: &str,
    ) -> Result<Option<Rating>, ApiError> {
        let request =
            ApiRequest::get(format!("{RATING_SERVICE}/ratings/movie/{movie_id}/me")).bearer(token);
        match self.fetch(request).await {
            Ok(rating) => Ok(Some(rating)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Create or replace the caller's rating for a movie.
    ///
    /// # Errors
    ///
    /// Returns any gateway failure.
    pub async fn upsert_my_rating(
        &self,
        movie_id: i64,
        rate: RatingValue,
        token: &str,
    ) -> Result<Rating, ApiError> {
        let body = RatingRequest { movie_id, rate };
        self.fetch(
            ApiRequest::post(format!("{RATING_SERVICE}/ratings"))
                .bearer(token)
                .json(&body)?,
        )
        .await
    }

    /// Change an existing rating; fails with 404 when none exists.
    ///
    /// # Errors
    ///
    /// Returns any gateway failure.
    pub async fn update_my_rating(
        &self,
        movie_id: i64,
        rate: RatingValue,
        token: &str,
    ) -> Result<Rating, ApiError> {
        let body = RatingRequest { movie_id, rate };
        self.fetch(
            ApiRequest::patch(format!("{RATING_SERVICE}/ratings"))
                .bearer(token)
                .json(&body)?,
        )
        .await
    }

    /// Remove the caller's rating for a movie.
    ///
    /// # Errors
    ///
    /// Returns any gateway failure.
    pub async fn delete_my_rating(&self, movie_id: i64, token: &str) -> Result<(), ApiError> {
        self.send(ApiRequest::delete(format!("{RATING_SERVICE}/ratings/{movie_id}")).bearer(token))
            .await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use httpmock::{Method, MockServer};
    use serde_json::json;

    use super::*;
    use crate::endpoints::test_support::{JSON, origin_client};

    const RATING: &str = r#"{"id":5,"userId":"6f1f0c36-3d3c-4f54-9a38-4f2f4b8c6a10","movieId":42,
        "rate":8.5,"createdAt":"2025-01-02T03:04:05Z","updatedAt":"2025-01-02T03:04:05Z"}"#;

    #[tokio::test]
    async fn missing_rating_is_none() -> Result<(), ApiError> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(Method::GET)
                .path("/rating-service/api/v1/ratings/movie/42/me")
                .header("authorization", "Bearer jwt");
            then.status(404)
                .header("content-type", JSON)
                .body(r#"{"title":"Not Found"}"#);
        });

        let rating = origin_client(&server).fetch_my_rating(42, "jwt").await?;
        assert!(rating.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn expired_token_is_not_swallowed() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(Method::GET)
                .path("/rating-service/api/v1/ratings/movie/42/me");
            then.status(401);
        });

        let err = origin_client(&server)
            .fetch_my_rating(42, "stale")
            .await
            .expect_err("401 propagates");
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn upsert_posts_movie_and_rate() -> Result<(), ApiError> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(Method::POST)
                .path("/rating-service/api/v1/ratings")
                .header("authorization", "Bearer jwt")
                .json_body(json!({"movieId": 42, "rate": 8.5}));
            then.status(201).header("content-type", JSON).body(RATING);
        });

        let rate = RatingValue::new(8.5).expect("valid rating");
        let rating = origin_client(&server)
            .upsert_my_rating(42, rate, "jwt")
            .await?;

        mock.assert();
        assert!((rating.rate - 8.5).abs() < f64::EPSILON);
        Ok(())
    }

    #[tokio::test]
    async fn summary_without_ratings_has_no_average() -> Result<(), ApiError> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(Method::GET)
                .path("/rating-service/api/v1/ratings/movie/7/summary");
            then.status(200)
                .header("content-type", JSON)
                .body(r#"{"movieId":7,"average":null,"count":0}"#);
        });

        let summary = origin_client(&server).fetch_rating_summary(7).await?;
        assert_eq!(summary.average, None);
        assert_eq!(summary.count, 0);
        Ok(())
    }

    #[tokio::test]
    async fn delete_accepts_no_content() -> Result<(), ApiError> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(Method::DELETE)
                .path("/rating-service/api/v1/ratings/42");
            then.status(204);
        });

        origin_client(&server).delete_my_rating(42, "jwt").await?;
        mock.assert();
        Ok(())
    }
}
