use microflix_api_models::RatingValue;
use tracing::info;

use crate::cli::{MovieIdArgs, OutputFormat, RatingSetArgs};
use crate::client::{AppContext, CliError, CliResult};
use crate::output::{render_rating, render_ratings, render_summary};

pub(crate) async fn handle_rating_summary(
    ctx: &AppContext,
    args: MovieIdArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let summary = ctx
        .api
        .fetch_rating_summary(args.movie_id)
        .await
        .map_err(|err| ctx.classify(err))?;
    print!("{}", render_summary(&summary, format)?);
    Ok(())
}

pub(crate) async fn handle_ratings_mine(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let session = ctx.require_session()?;
    let ratings = ctx
        .api
        .fetch_my_ratings(&session.token)
        .await
        .map_err(|err| ctx.classify(err))?;
    print!("{}", render_ratings(&ratings, format)?);
    Ok(())
}

pub(crate) async fn handle_rating_get(
    ctx: &AppContext,
    args: MovieIdArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let session = ctx.require_session()?;
    let rating = ctx
        .api
        .fetch_my_rating(args.movie_id, &session.token)
        .await
        .map_err(|err| ctx.classify(err))?;
    print!("{}", render_rating(args.movie_id, rating.as_ref(), format)?);
    Ok(())
}

pub(crate) async fn handle_rating_set(
    ctx: &AppContext,
    args: RatingSetArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let rate = args
        .rate
        .parse::<RatingValue>()
        .map_err(|err| CliError::validation(err.to_string()))?;
    let session = ctx.require_session()?;

    let result = if args.update_only {
        ctx.api
            .update_my_rating(args.movie_id, rate, &session.token)
            .await
    } else {
        ctx.api
            .upsert_my_rating(args.movie_id, rate, &session.token)
            .await
    };
    let rating = result.map_err(|err| ctx.classify(err))?;

    info!(movie_id = args.movie_id, rate = %rate, "rating saved");
    print!("{}", render_rating(args.movie_id, Some(&rating), format)?);
    Ok(())
}

pub(crate) async fn handle_rating_remove(ctx: &AppContext, args: MovieIdArgs) -> CliResult<()> {
    let session = ctx.require_session()?;
    ctx.api
        .delete_my_rating(args.movie_id, &session.token)
        .await
        .map_err(|err| ctx.classify(err))?;
    println!("Removed rating for movie {}", args.movie_id);
    Ok(())
}
