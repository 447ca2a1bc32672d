//! Login and registration.

use microflix_api_models::{AuthResponse, LoginRequest, RegisterRequest};

use super::USER_SERVICE;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::request::ApiRequest;
use crate::transport::Transport;

impl<T: Transport> ApiClient<T> {
    /// Exchange credentials for a session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] for rejected credentials (401) and any
    /// other gateway failure.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.fetch(ApiRequest::post(format!("{USER_SERVICE}/auth/login")).json(request)?)
            .await
    }

    /// Create an account; the response is already a signed-in session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] for validation failures or a taken email.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.fetch(ApiRequest::post(format!("{USER_SERVICE}/auth/register")).json(request)?)
            .await
    }
}
