//! Feature modules: DOM-free state next to wasm-only views.

pub mod auth;
pub mod library;
pub mod movie_actions;
pub mod movies;
