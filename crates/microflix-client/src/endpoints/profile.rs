//! Signed-in user's profile.

use microflix_api_models::{ChangePasswordRequest, Profile, UpdateProfileRequest};

use super::USER_SERVICE;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::request::ApiRequest;
use crate::transport::Transport;

impl<T: Transport> ApiClient<T> {
    /// Profile of the token's owner.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 401 when the token is no longer
    /// accepted.
    pub async fn fetch_profile(&self, token: &str) -> Result<Profile, ApiError> {
        self.fetch(ApiRequest::get(format!("{USER_SERVICE}/users/me")).bearer(token))
            .await
    }

    /// Change the display name.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] when the backend rejects the name.
    pub async fn update_profile(
        &self,
        token: &str,
        request: &UpdateProfileRequest,
    ) -> Result<Profile, ApiError> {
        self.fetch(
            ApiRequest::patch(format!("{USER_SERVICE}/users/me"))
                .bearer(token)
                .json(request)?,
        )
        .await
    }

    /// Rotate the password. Succeeds with an empty body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] when the old password is wrong or the new
    /// one is rejected.
    pub async fn change_password(
        &self,
        token: &str,
        request: &ChangePasswordRequest,
    ) -> Result<(), ApiError> {
        self.send(
            ApiRequest::patch(format!("{USER_SERVICE}/users/me/password"))
                .bearer(token)
                .json(request)?,
        )
        .await
    }
}
