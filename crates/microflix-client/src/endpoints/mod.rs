//! Typed wrappers over the gateway's resource endpoints.
//!
//! Each submodule extends [`crate::ApiClient`] with the calls for one
//! backend resource. Authenticated calls take the bearer token explicitly.

pub mod auth;
pub mod movies;
pub mod profile;
pub mod ratings;
pub mod watchlist;

/// Routing root of the user service.
pub const USER_SERVICE: &str = "/user-service/api/v1";
/// Routing root of the movie service.
pub const MOVIE_SERVICE: &str = "/movie-service/api/v1";
/// Routing root of the rating service.
pub const RATING_SERVICE: &str = "/rating-service/api/v1";
