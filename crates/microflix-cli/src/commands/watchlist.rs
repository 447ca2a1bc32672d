use crate::cli::{MovieIdArgs, OutputFormat};
use crate::client::{AppContext, CliResult};
use crate::output::{render_membership, render_watchlist};

pub(crate) async fn handle_watchlist_list(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let session = ctx.require_session()?;
    let items = ctx
        .api
        .fetch_watchlist(&session.token)
        .await
        .map_err(|err| ctx.classify(err))?;
    print!("{}", render_watchlist(&items, format)?);
    Ok(())
}

pub(crate) async fn handle_watchlist_check(
    ctx: &AppContext,
    args: MovieIdArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let session = ctx.require_session()?;
    let present = ctx
        .api
        .is_in_watchlist(args.movie_id, &session.token)
        .await
        .map_err(|err| ctx.classify(err))?;
    print!("{}", render_membership(args.movie_id, present, format)?);
    Ok(())
}

pub(crate) async fn handle_watchlist_add(ctx: &AppContext, args: MovieIdArgs) -> CliResult<()> {
    let session = ctx.require_session()?;
    ctx.api
        .add_to_watchlist(args.movie_id, &session.token)
        .await
        .map_err(|err| ctx.classify(err))?;
    println!("Added movie {} to your watchlist", args.movie_id);
    Ok(())
}

pub(crate) async fn handle_watchlist_remove(ctx: &AppContext, args: MovieIdArgs) -> CliResult<()> {
    let session = ctx.require_session()?;
    ctx.api
        .remove_from_watchlist(args.movie_id, &session.token)
        .await
        .map_err(|err| ctx.classify(err))?;
    println!("Removed movie {} from your watchlist", args.movie_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use tempfile::TempDir;

    use super::*;
    use crate::commands::test_support::{JSON, signed_in};

    #[tokio::test]
    async fn add_puts_with_bearer() {
        let server = MockServer::start_async().await;
        let dir = TempDir::new().expect("temp dir");
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/rating-service/api/v1/engagements/watchlist/42")
                .header("authorization", "Bearer jwt");
            then.status(204);
        });

        handle_watchlist_add(&signed_in(&server, &dir), MovieIdArgs { movie_id: 42 })
            .await
            .expect("add should succeed");
        mock.assert();
    }

    #[tokio::test]
    async fn list_renders_entries() {
        let server = MockServer::start_async().await;
        let dir = TempDir::new().expect("temp dir");
        server.mock(|when, then| {
            when.method(GET)
                .path("/rating-service/api/v1/engagements/watchlist");
            then.status(200).header("content-type", JSON).body(
                r#"[{"userId":"6f1f0c36-3d3c-4f54-9a38-4f2f4b8c6a10","movieId":42,"type":"WATCHLIST","addedAt":"2025-03-01T10:00:00Z"}]"#,
            );
        });

        handle_watchlist_list(&signed_in(&server, &dir), OutputFormat::Table)
            .await
            .expect("list should succeed");
    }

    #[tokio::test]
    async fn server_error_is_a_failure() {
        let server = MockServer::start_async().await;
        let dir = TempDir::new().expect("temp dir");
        server.mock(|when, then| {
            when.method(DELETE)
                .path("/rating-service/api/v1/engagements/watchlist/42");
            then.status(503);
        });
        let ctx = signed_in(&server, &dir);

        let err = handle_watchlist_remove(&ctx, MovieIdArgs { movie_id: 42 })
            .await
            .expect_err("unavailable");

        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.display_message(), "Request failed with status 503");
        assert!(ctx.session.load().is_some());
    }
}
