//! Auth & User Endpoints

use super::{decode, ensure_success, ApiClient};
use crate::error::{ClientError, ClientResult};
use crate::models::{JwtResponse, LoginRequest, SignupRequest, User};
use crate::transport::Method;

impl ApiClient {
    /// `POST /api/auth/signin`; sent without a bearer token
    pub async fn sign_in(&self, username: &str, password: &str) -> ClientResult<JwtResponse> {
        let body = serde_json::to_value(LoginRequest { username, password })?;
        let response = self.send(Method::Post, "/api/auth/signin", Some(body), true).await?;
        if !response.is_success() {
            log::warn!("Sign-in rejected: HTTP {}", response.status);
            return Err(ClientError::Auth);
        }
        decode(&response)
    }

    /// `POST /api/auth/signup`; sent without a bearer token
    pub async fn sign_up(&self, request: &SignupRequest) -> ClientResult<()> {
        let body = serde_json::to_value(request)?;
        let response = self.send(Method::Post, "/api/auth/signup", Some(body), true).await?;
        if !response.is_success() {
            log::warn!("Sign-up rejected: HTTP {}", response.status);
            return Err(ClientError::Validation("Registration failed".to_string()));
        }
        Ok(())
    }

    pub async fn current_user(&self) -> ClientResult<User> {
        let response = self.send(Method::Get, "/api/users/me", None, false).await?;
        decode(&ensure_success(response, "fetch user data")?)
    }
}
