//! Session Store
//!
//! Owns the bearer token and the signed-in identity. The token is persisted
//! under a fixed storage key so a reload can restore the session.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::info;

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::models::{Session, SignupRequest, User};
use crate::storage::TokenStorage;

#[derive(Debug, Default)]
struct SessionState {
    session: Option<Session>,
    user: Option<User>,
}

#[derive(Clone)]
pub struct SessionStore {
    api: ApiClient,
    storage: Arc<dyn TokenStorage>,
    token_key: Arc<str>,
    state: Arc<Mutex<SessionState>>,
}

impl SessionStore {
    pub fn new(api: ApiClient, storage: Arc<dyn TokenStorage>, token_key: &str) -> Self {
        Self {
            api,
            storage,
            token_key: Arc::from(token_key),
            state: Arc::new(Mutex::new(SessionState::default())),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn session(&self) -> Option<Session> {
        self.state().session.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().session.as_ref().is_some_and(Session::is_authenticated)
    }

    /// Sign in and persist the token
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<Session> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ClientError::Validation("Username and password are required".to_string()));
        }

        let jwt = self.api.sign_in(username.trim(), password).await?;
        let user = User {
            id: jwt.id,
            username: jwt.username.clone(),
            email: jwt.email.clone(),
            roles: jwt.roles.clone(),
            ..Default::default()
        };
        let session = Session::from(jwt);

        if let Some(token) = &session.token {
            self.storage.set(&self.token_key, token);
        }
        self.api.credentials().set(session.token.clone());
        {
            let mut state = self.state();
            state.session = Some(session.clone());
            state.user = Some(user);
        }
        info!("Signed in as {}", username.trim());
        Ok(session)
    }

    /// Create an account. The user still has to sign in afterwards.
    pub async fn register(&self, request: &SignupRequest) -> ClientResult<()> {
        let missing = [
            ("Username", request.username.trim()),
            ("Email", request.email.trim()),
            ("Password", request.password.as_str()),
        ]
        .into_iter()
        .find(|(_, value)| value.is_empty());
        if let Some((field, _)) = missing {
            return Err(ClientError::Validation(format!("{field} is required")));
        }

        self.api.sign_up(request).await?;
        info!("Registered {}", request.username.trim());
        Ok(())
    }

    /// Forget the token, in memory and in storage
    pub fn logout(&self) {
        self.storage.remove(&self.token_key);
        self.api.credentials().set(None);
        *self.state() = SessionState::default();
        info!("Signed out");
    }

    /// Rebuild the session from a persisted token, if any
    pub fn restore(&self) -> Option<Session> {
        let token = self.storage.get(&self.token_key).filter(|t| !t.is_empty())?;
        let session = Session::from_token(token);
        self.api.credentials().set(session.token.clone());
        self.state().session = Some(session.clone());
        info!("Restored session from storage");
        Some(session)
    }

    /// Fetch `/api/users/me` and fill in the session identity
    pub async fn load_current_user(&self) -> ClientResult<User> {
        let user = self.api.current_user().await?;
        let mut state = self.state();
        if let Some(session) = state.session.as_mut() {
            session.user_id = Some(user.id);
            session.username = Some(user.username.clone());
            session.email = user.email.clone();
        }
        state.user = Some(user.clone());
        Ok(user)
    }
}
