//! Sign-in and registration pages.

/// Fallback message when the gateway gives no reason for a failed login.
pub const LOGIN_FAILED: &str = "Login failed.";
/// Fallback message when the gateway gives no reason for a failed sign-up.
pub const REGISTER_FAILED: &str = "Registration failed.";

#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
