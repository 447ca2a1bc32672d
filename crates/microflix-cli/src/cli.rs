//! Argument parsing and command dispatch.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use microflix_api_models::{DEFAULT_PAGE_SIZE, MovieSort};
use microflix_client::config::{DEFAULT_GATEWAY_BASE_URL, GATEWAY_BASE_URL_ENV};
use microflix_telemetry::{LoggingConfig, init_logging};

use crate::client::{AppContext, CliError, CliResult};
use crate::commands::auth::{handle_login, handle_logout, handle_register, handle_whoami};
use crate::commands::movies::{handle_movie_list, handle_movie_show};
use crate::commands::profile::{handle_profile_password, handle_profile_rename};
use crate::commands::ratings::{
    handle_rating_get, handle_rating_remove, handle_rating_set, handle_rating_summary,
    handle_ratings_mine,
};
use crate::commands::watchlist::{
    handle_watchlist_add, handle_watchlist_check, handle_watchlist_list, handle_watchlist_remove,
};

/// Directory under `$HOME` holding the stored session by default.
const DEFAULT_SESSION_DIR: &str = ".microflix";

/// Parses CLI arguments, executes the requested command and reports any
/// error on stderr. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::for_service("microflix-cli");
    logging.level = "warn";
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err}");
    }

    match dispatch(cli).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

async fn dispatch(cli: Cli) -> CliResult<()> {
    let session_dir = match cli.session_dir {
        Some(dir) => dir,
        None => default_session_dir(std::env::var_os("HOME"))?,
    };
    let ctx = AppContext::new(&cli.gateway_url, session_dir)?;
    let output = cli.output;

    match cli.command {
        Command::Login(args) => handle_login(&ctx, args).await,
        Command::Register(args) => handle_register(&ctx, args).await,
        Command::Logout => handle_logout(&ctx),
        Command::Whoami => handle_whoami(&ctx, output).await,
        Command::Profile(profile) => match profile {
            ProfileCommand::Rename(args) => handle_profile_rename(&ctx, args, output).await,
            ProfileCommand::Password(args) => handle_profile_password(&ctx, args).await,
        },
        Command::Movies(movies) => match movies {
            MoviesCommand::Ls(args) => handle_movie_list(&ctx, args, output).await,
            MoviesCommand::Show(args) => handle_movie_show(&ctx, args, output).await,
        },
        Command::Ratings(ratings) => match ratings {
            RatingsCommand::Summary(args) => handle_rating_summary(&ctx, args, output).await,
            RatingsCommand::Mine => handle_ratings_mine(&ctx, output).await,
            RatingsCommand::Get(args) => handle_rating_get(&ctx, args, output).await,
            RatingsCommand::Set(args) => handle_rating_set(&ctx, args, output).await,
            RatingsCommand::Rm(args) => handle_rating_remove(&ctx, args).await,
        },
        Command::Watchlist(watchlist) => match watchlist {
            WatchlistCommand::Ls => handle_watchlist_list(&ctx, output).await,
            WatchlistCommand::Check(args) => handle_watchlist_check(&ctx, args, output).await,
            WatchlistCommand::Add(args) => handle_watchlist_add(&ctx, args).await,
            WatchlistCommand::Rm(args) => handle_watchlist_remove(&ctx, args).await,
        },
    }
}

pub(crate) fn default_session_dir(home: Option<OsString>) -> CliResult<PathBuf> {
    home.filter(|home| !home.is_empty())
        .map(|home| PathBuf::from(home).join(DEFAULT_SESSION_DIR))
        .ok_or_else(|| {
            CliError::validation("HOME is not set; pass --session-dir or set MICROFLIX_SESSION_DIR")
        })
}

#[derive(Parser)]
#[command(name = "microflix", about = "Browse, rate and track movies on Microflix")]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = GATEWAY_BASE_URL_ENV,
        default_value = DEFAULT_GATEWAY_BASE_URL,
        help = "Gateway base address"
    )]
    pub(crate) gateway_url: String,
    #[arg(
        long,
        global = true,
        env = "MICROFLIX_SESSION_DIR",
        help = "Directory holding the stored session (default: $HOME/.microflix)"
    )]
    pub(crate) session_dir: Option<PathBuf>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    pub(crate) output: OutputFormat,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Sign in and store the session.
    Login(LoginArgs),
    /// Create an account and store the session.
    Register(RegisterArgs),
    /// Forget the stored session.
    Logout,
    /// Show the signed-in profile.
    Whoami,
    /// Change your display name or password.
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Browse the catalog.
    #[command(subcommand)]
    Movies(MoviesCommand),
    /// Read and manage ratings.
    #[command(subcommand)]
    Ratings(RatingsCommand),
    /// Manage the watchlist.
    #[command(subcommand)]
    Watchlist(WatchlistCommand),
}

#[derive(Subcommand)]
pub(crate) enum ProfileCommand {
    /// Change the display name.
    Rename(RenameArgs),
    /// Change the password.
    Password(PasswordArgs),
}

#[derive(Subcommand)]
pub(crate) enum MoviesCommand {
    /// List a page of the catalog.
    Ls(MovieListArgs),
    /// Show one movie with its rating summary.
    Show(MovieIdArgs),
}

#[derive(Subcommand)]
pub(crate) enum RatingsCommand {
    /// Public average and count for a movie.
    Summary(MovieIdArgs),
    /// Every rating you have given.
    Mine,
    /// Your rating for one movie.
    Get(MovieIdArgs),
    /// Rate a movie from 1.0 to 10.0.
    Set(RatingSetArgs),
    /// Remove your rating for a movie.
    Rm(MovieIdArgs),
}

#[derive(Subcommand)]
pub(crate) enum WatchlistCommand {
    /// List your watchlist.
    Ls,
    /// Check whether a movie is on your watchlist.
    Check(MovieIdArgs),
    /// Add a movie to your watchlist.
    Add(MovieIdArgs),
    /// Remove a movie from your watchlist.
    Rm(MovieIdArgs),
}

#[derive(Args, Debug, Clone)]
pub(crate) struct LoginArgs {
    #[arg(long)]
    pub(crate) email: String,
    #[arg(
        long,
        env = "MICROFLIX_PASSWORD",
        hide_env_values = true,
        help = "Password (prompted when omitted)"
    )]
    pub(crate) password: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct RegisterArgs {
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long)]
    pub(crate) display_name: String,
    #[arg(
        long,
        env = "MICROFLIX_PASSWORD",
        hide_env_values = true,
        help = "Password (prompted when omitted)"
    )]
    pub(crate) password: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct RenameArgs {
    pub(crate) display_name: String,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct PasswordArgs {
    #[arg(
        long,
        env = "MICROFLIX_PASSWORD",
        hide_env_values = true,
        help = "Current password (prompted when omitted)"
    )]
    pub(crate) current: Option<String>,
    #[arg(
        long,
        env = "MICROFLIX_NEW_PASSWORD",
        hide_env_values = true,
        help = "New password (prompted when omitted)"
    )]
    pub(crate) new: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct MovieListArgs {
    #[arg(long, help = "Title search")]
    pub(crate) query: Option<String>,
    #[arg(long)]
    pub(crate) genre: Option<String>,
    #[arg(long)]
    pub(crate) year: Option<i32>,
    #[arg(long, default_value_t = MovieSort::default())]
    pub(crate) sort: MovieSort,
    #[arg(long, default_value_t = 0, help = "Zero-based page index")]
    pub(crate) page: u32,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub(crate) size: u32,
}

#[derive(Args, Debug, Clone, Copy)]
pub(crate) struct MovieIdArgs {
    pub(crate) movie_id: i64,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct RatingSetArgs {
    pub(crate) movie_id: i64,
    #[arg(allow_hyphen_values = true, help = "Score between 1.0 and 10.0")]
    pub(crate) rate: String,
    #[arg(long, help = "Only change an existing rating")]
    pub(crate) update_only: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}
