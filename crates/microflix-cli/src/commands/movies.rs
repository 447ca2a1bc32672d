use microflix_api_models::MovieQuery;
use tracing::debug;

use crate::cli::{MovieIdArgs, MovieListArgs, OutputFormat};
use crate::client::{AppContext, CliError, CliResult};
use crate::output::{render_movie, render_movie_page};

pub(crate) async fn handle_movie_list(
    ctx: &AppContext,
    args: MovieListArgs,
    format: OutputFormat,
) -> CliResult<()> {
    if args.size == 0 {
        return Err(CliError::validation("page size must be at least 1"));
    }
    let query = MovieQuery {
        query: args.query,
        genre: args.genre,
        year: args.year,
        sort: args.sort,
        page: args.page,
        size: args.size,
    };

    let page = ctx
        .api
        .fetch_movies(&query)
        .await
        .map_err(|err| ctx.classify(err))?;
    print!("{}", render_movie_page(&page, format)?);
    Ok(())
}

pub(crate) async fn handle_movie_show(
    ctx: &AppContext,
    args: MovieIdArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let movie = ctx
        .api
        .fetch_movie(args.movie_id)
        .await
        .map_err(|err| ctx.classify(err))?;

    // The summary is decoration; a failing rating service should not hide
    // the movie itself.
    let summary = match ctx.api.fetch_rating_summary(args.movie_id).await {
        Ok(summary) => Some(summary),
        Err(err) => {
            debug!(error = %err, movie_id = args.movie_id, "rating summary unavailable");
            None
        }
    };

    print!("{}", render_movie(&movie, summary.as_ref(), format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use microflix_api_models::MovieSort;
    use tempfile::TempDir;

    use super::*;
    use crate::commands::test_support::{JSON, context_with};

    #[tokio::test]
    async fn list_sends_filters() {
        let server = MockServer::start_async().await;
        let dir = TempDir::new().expect("temp dir");
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/movie-service/api/v1/movies")
                .query_param("genre", "Horror")
                .query_param("sort", "title_asc")
                .query_param("page", "0")
                .query_param("size", "5");
            then.status(200).header("content-type", JSON).body(
                r#"{"content":[],"totalElements":0,"totalPages":0,"number":0,"size":5}"#,
            );
        });

        handle_movie_list(
            &context_with(&server, &dir),
            MovieListArgs {
                query: None,
                genre: Some("Horror".into()),
                year: None,
                sort: MovieSort::TitleAsc,
                page: 0,
                size: 5,
            },
            OutputFormat::Table,
        )
        .await
        .expect("listing should succeed");
        mock.assert();
    }

    #[tokio::test]
    async fn zero_page_size_is_rejected() {
        let server = MockServer::start_async().await;
        let dir = TempDir::new().expect("temp dir");
        let err = handle_movie_list(
            &context_with(&server, &dir),
            MovieListArgs {
                query: None,
                genre: None,
                year: None,
                sort: MovieSort::default(),
                page: 0,
                size: 0,
            },
            OutputFormat::Json,
        )
        .await
        .expect_err("validation");
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn show_survives_missing_summary() {
        let server = MockServer::start_async().await;
        let dir = TempDir::new().expect("temp dir");
        server.mock(|when, then| {
            when.method(GET).path("/movie-service/api/v1/movies/1");
            then.status(200)
                .header("content-type", JSON)
                .body(r#"{"id":1,"title":"Alien","genres":[]}"#);
        });
        server.mock(|when, then| {
            when.method(GET)
                .path("/rating-service/api/v1/ratings/movie/1/summary");
            then.status(503);
        });

        handle_movie_show(
            &context_with(&server, &dir),
            MovieIdArgs { movie_id: 1 },
            OutputFormat::Table,
        )
        .await
        .expect("show should succeed");
    }

    #[tokio::test]
    async fn unknown_movie_is_a_failure() {
        let server = MockServer::start_async().await;
        let dir = TempDir::new().expect("temp dir");
        server.mock(|when, then| {
            when.method(GET).path("/movie-service/api/v1/movies/9");
            then.status(404)
                .header("content-type", JSON)
                .body(r#"{"title":"Not Found","detail":"Movie 9 does not exist"}"#);
        });

        let err = handle_movie_show(
            &context_with(&server, &dir),
            MovieIdArgs { movie_id: 9 },
            OutputFormat::Table,
        )
        .await
        .expect_err("missing movie");
        assert_eq!(err.display_message(), "Movie 9 does not exist (status 404)");
    }
}
