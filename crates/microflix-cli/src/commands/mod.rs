//! Command handlers grouped by resource.

pub(crate) mod auth;
pub(crate) mod movies;
pub(crate) mod profile;
pub(crate) mod ratings;
pub(crate) mod watchlist;
