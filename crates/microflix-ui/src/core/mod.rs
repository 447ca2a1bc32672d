//! Core, DOM-free primitives and helpers for the Web UI.
pub mod feedback;
pub mod forms;
pub mod pagination;
pub mod remote;
