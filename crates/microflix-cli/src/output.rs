//! Output renderers and formatting helpers for CLI commands.
//!
//! Renderers return the text to print so handlers stay thin and tests can
//! assert on output.

use std::fmt::Write as _;

use anyhow::anyhow;
use microflix_api_models::{
    EngagementItem, Movie, Page, PageSlot, Profile, Rating, RatingSummary, window,
};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

fn to_json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))
}

pub(crate) fn render_movie_page(page: &Page<Movie>, format: OutputFormat) -> CliResult<String> {
    if format == OutputFormat::Json {
        return to_json(page);
    }
    let mut out = String::new();
    let _ = writeln!(out, "{:>8} {:>6} TITLE", "ID", "YEAR");
    for movie in &page.content {
        let _ = writeln!(
            out,
            "{:>8} {:>6} {}",
            movie.id,
            format_year(movie.release_year),
            movie.title
        );
    }
    if page.content.is_empty() {
        let _ = writeln!(out, "no movies found");
    }
    let _ = writeln!(
        out,
        "page {} of {} ({} movies): {}",
        page.number.saturating_add(1),
        page.total_pages.max(1),
        page.total_elements,
        format_page_window(page.number, page.total_pages)
    );
    Ok(out)
}

pub(crate) fn render_movie(
    movie: &Movie,
    summary: Option<&RatingSummary>,
    format: OutputFormat,
) -> CliResult<String> {
    if format == OutputFormat::Json {
        #[derive(Serialize)]
        struct MovieView<'a> {
            movie: &'a Movie,
            ratings: Option<&'a RatingSummary>,
        }
        return to_json(&MovieView {
            movie,
            ratings: summary,
        });
    }
    let mut out = String::new();
    let _ = writeln!(out, "id: {}", movie.id);
    let _ = writeln!(out, "title: {}", movie.title);
    let _ = writeln!(out, "year: {}", format_year(movie.release_year));
    if !movie.genres.is_empty() {
        let _ = writeln!(out, "genres: {}", movie.genres.join(", "));
    }
    if let Some(overview) = movie.overview.as_deref().filter(|text| !text.trim().is_empty()) {
        let _ = writeln!(out, "overview: {overview}");
    }
    if let Some(summary) = summary {
        let _ = writeln!(out, "rating: {}", format_summary(summary));
    }
    Ok(out)
}

pub(crate) fn render_summary(summary: &RatingSummary, format: OutputFormat) -> CliResult<String> {
    if format == OutputFormat::Json {
        return to_json(summary);
    }
    Ok(format!("movie {}: {}\n", summary.movie_id, format_summary(summary)))
}

pub(crate) fn render_ratings(ratings: &[Rating], format: OutputFormat) -> CliResult<String> {
    if format == OutputFormat::Json {
        return to_json(ratings);
    }
    let mut out = String::new();
    let _ = writeln!(out, "{:>8} {:>5} UPDATED", "MOVIE", "RATE");
    for rating in ratings {
        let _ = writeln!(
            out,
            "{:>8} {:>5.1} {}",
            rating.movie_id,
            rating.rate,
            rating.updated_at.format("%Y-%m-%d %H:%M")
        );
    }
    if ratings.is_empty() {
        let _ = writeln!(out, "no ratings yet");
    }
    Ok(out)
}

pub(crate) fn render_rating(
    movie_id: i64,
    rating: Option<&Rating>,
    format: OutputFormat,
) -> CliResult<String> {
    if format == OutputFormat::Json {
        return to_json(&rating);
    }
    Ok(rating.map_or_else(
        || format!("movie {movie_id}: not rated\n"),
        |rating| format!("movie {movie_id}: {:.1}\n", rating.rate),
    ))
}

pub(crate) fn render_watchlist(items: &[EngagementItem], format: OutputFormat) -> CliResult<String> {
    if format == OutputFormat::Json {
        return to_json(items);
    }
    let mut out = String::new();
    let _ = writeln!(out, "{:>8} ADDED", "MOVIE");
    for item in items.iter().filter(|item| item.is_watchlist()) {
        let _ = writeln!(
            out,
            "{:>8} {}",
            item.movie_id,
            item.added_at.format("%Y-%m-%d %H:%M")
        );
    }
    if items.is_empty() {
        let _ = writeln!(out, "watchlist is empty");
    }
    Ok(out)
}

pub(crate) fn render_membership(
    movie_id: i64,
    present: bool,
    format: OutputFormat,
) -> CliResult<String> {
    if format == OutputFormat::Json {
        return to_json(&serde_json::json!({ "movieId": movie_id, "inWatchlist": present }));
    }
    let verdict = if present { "on" } else { "not on" };
    Ok(format!("movie {movie_id} is {verdict} your watchlist\n"))
}

pub(crate) fn render_profile(profile: &Profile, format: OutputFormat) -> CliResult<String> {
    if format == OutputFormat::Json {
        return to_json(profile);
    }
    let mut out = String::new();
    let _ = writeln!(out, "id: {}", profile.id);
    let _ = writeln!(out, "email: {}", profile.email);
    let _ = writeln!(out, "display name: {}", profile.display_name);
    if !profile.roles.is_empty() {
        let _ = writeln!(out, "roles: {}", profile.roles.join(", "));
    }
    Ok(out)
}

/// Page navigation line, one-based, with the current page bracketed and
/// elided runs shown as `…`.
#[must_use]
pub(crate) fn format_page_window(current: u32, total: u32) -> String {
    window(current, total)
        .into_iter()
        .map(|slot| match slot {
            PageSlot::Page(index) if index == current => format!("[{}]", index + 1),
            PageSlot::Page(index) => (index + 1).to_string(),
            PageSlot::Gap => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_summary(summary: &RatingSummary) -> String {
    match summary.average {
        Some(average) if summary.count > 0 => {
            let noun = if summary.count == 1 { "rating" } else { "ratings" };
            format!("{average:.1} / 10 ({} {noun})", summary.count)
        }
        _ => "no ratings yet".to_string(),
    }
}

fn format_year(year: Option<i32>) -> String {
    year.map_or_else(|| "-".to_string(), |year| year.to_string())
}
