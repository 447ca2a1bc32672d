//! Movie catalog.

use microflix_api_models::{Movie, MovieQuery, Page};
use url::form_urlencoded;

use super::MOVIE_SERVICE;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::request::ApiRequest;
use crate::transport::Transport;

/// Path and query string for a catalog search.
#[must_use]
pub fn movies_path(query: &MovieQuery) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in query.to_pairs() {
        serializer.append_pair(key, &value);
    }
    format!("{MOVIE_SERVICE}/movies?{}", serializer.finish())
}

impl<T: Transport> ApiClient<T> {
    /// One page of the catalog. No authentication required.
    ///
    /// # Errors
    ///
    /// Returns any gateway failure.
    pub async fn fetch_movies(&self, query: &MovieQuery) -> Result<Page<Movie>, ApiError> {
        self.fetch(ApiRequest::get(movies_path(query))).await
    }

    /// A single movie.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404 for unknown ids.
    pub async fn fetch_movie(&self, id: i64) -> Result<Movie, ApiError> {
        self.fetch(ApiRequest::get(format!("{MOVIE_SERVICE}/movies/{id}")))
            .await
    }
}

#[cfg(test)]
mod path_tests {
    use super::*;
    use microflix_api_models::MovieSort;

    #[test]
    fn search_terms_are_encoded() {
        let query = MovieQuery {
            query: Some("the thing".into()),
            sort: MovieSort::TitleAsc,
            ..MovieQuery::page(2, 12)
        };
        assert_eq!(
            movies_path(&query),
            "/movie-service/api/v1/movies?query=the+thing&sort=title_asc&page=2&size=12"
        );
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use httpmock::{Method, MockServer};

    use super::*;
    use crate::endpoints::test_support::{JSON, origin_client};

    #[tokio::test]
    async fn catalog_page_is_decoded() -> Result<(), ApiError> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(Method::GET)
                .path("/movie-service/api/v1/movies")
                .query_param("page", "1")
                .query_param("size", "2");
            then.status(200).header("content-type", JSON).body(
                r#"{"content":[{"id":1,"title":"Alien","releaseYear":1979,"genres":["Horror"]}],
                    "totalElements":3,"totalPages":2,"number":1,"size":2}"#,
            );
        });

        let page = origin_client(&server)
            .fetch_movies(&MovieQuery::page(1, 2))
            .await?;

        mock.assert();
        assert_eq!(page.content[0].title, "Alien");
        assert_eq!(page.content[0].release_year, Some(1979));
        assert!(!page.has_next());
        assert!(page.has_previous());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_movie_is_not_found() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(Method::GET).path("/movie-service/api/v1/movies/404");
            then.status(404)
                .header("content-type", JSON)
                .body(r#"{"title":"Not Found","detail":"Movie not found"}"#);
        });

        let err = origin_client(&server)
            .fetch_movie(404)
            .await
            .expect_err("missing movie");
        assert!(err.is_not_found());
    }
}
