use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::OnceCell;

use crate::api::ApiClient;
use crate::db::{LocalStorage, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use crate::errors::AppError;
use crate::models::{Registration, User, UserType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Loading,
    Authenticated,
    Anonymous,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Uninitialized => "uninitialized",
            SessionState::Loading => "loading",
            SessionState::Authenticated => "authenticated",
            SessionState::Anonymous => "anonymous",
        }
    }
}

/// Immutable view of the session handed to guards and views.
#[derive(Debug, Clone)]
pub struct Session {
    pub state: SessionState,
    user: Option<User>,
    access_token: Option<String>,
}

impl Session {
    fn empty(state: SessionState) -> Self {
        Self {
            state,
            user: None,
            access_token: None,
        }
    }

    pub fn anonymous() -> Self {
        Self::empty(SessionState::Anonymous)
    }

    pub fn loading() -> Self {
        Self::empty(SessionState::Loading)
    }

    pub fn authenticated(user: User, access_token: String) -> Self {
        Self {
            state: SessionState::Authenticated,
            user: Some(user),
            access_token: Some(access_token),
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(
            self.state,
            SessionState::Authenticated | SessionState::Anonymous
        )
    }

    /// The signed-in user; always `None` until the session has settled.
    pub fn user(&self) -> Option<&User> {
        if self.is_settled() {
            self.user.as_ref()
        } else {
            None
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    pub fn is_provider(&self) -> bool {
        self.user()
            .map_or(false, |u| u.user_type == UserType::Provider)
    }

    pub fn is_renter(&self) -> bool {
        self.user().map_or(false, |u| u.user_type == UserType::Renter)
    }

    pub fn has_shop(&self) -> bool {
        self.user().and_then(|u| u.has_shop).unwrap_or(false)
    }

    pub fn is_superuser(&self) -> bool {
        self.user().map_or(false, |u| u.is_superuser)
    }
}

/// Holds the signed-in user and tokens for the lifetime of the client.
///
/// Startup is single-flight: however many callers await [`initialize`],
/// exactly one fetch/refresh sequence runs.
///
/// [`initialize`]: SessionStore::initialize
pub struct SessionStore {
    api: ApiClient,
    storage: Arc<dyn LocalStorage>,
    inner: RwLock<Session>,
    init: OnceCell<SessionState>,
}

impl SessionStore {
    pub fn new(api: ApiClient, storage: Arc<dyn LocalStorage>) -> Self {
        Self {
            api,
            storage,
            inner: RwLock::new(Session::empty(SessionState::Uninitialized)),
            init: OnceCell::new(),
        }
    }

    pub fn snapshot(&self) -> Session {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn state(&self) -> SessionState {
        self.snapshot().state
    }

    pub fn access_token(&self) -> Option<String> {
        self.snapshot().access_token
    }

    pub fn user(&self) -> Option<User> {
        self.snapshot().user().cloned()
    }

    fn update(&self, f: impl FnOnce(&mut Session)) {
        let mut session = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut session);
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, key, "failed to read local storage");
                None
            }
        }
    }

    pub async fn initialize(&self) -> SessionState {
        *self.init.get_or_init(|| self.bootstrap()).await
    }

    async fn bootstrap(&self) -> SessionState {
        self.update(|s| s.state = SessionState::Loading);

        let Some(access) = self.read_key(ACCESS_TOKEN_KEY) else {
            self.update(|s| *s = Session::empty(SessionState::Anonymous));
            tracing::debug!("no stored token, session is anonymous");
            return SessionState::Anonymous;
        };
        let refresh = self.read_key(REFRESH_TOKEN_KEY);

        self.update(|s| s.access_token = Some(access.clone()));

        match self.api.current_user(&access).await {
            Ok(user) => return self.settle(user, access),
            Err(e) => tracing::warn!(error = %e, "stored token rejected"),
        }

        let Some(refresh) = refresh else {
            self.logout();
            return SessionState::Anonymous;
        };

        let refreshed = match self.refresh_access(&refresh).await {
            Ok(access) => access,
            Err(e) => {
                tracing::warn!(error = %e, "token refresh failed, signing out");
                self.logout();
                return SessionState::Anonymous;
            }
        };

        match self.api.current_user(&refreshed).await {
            Ok(user) => self.settle(user, refreshed),
            Err(e) => {
                tracing::warn!(error = %e, "user fetch failed after refresh, signing out");
                self.logout();
                SessionState::Anonymous
            }
        }
    }

    fn settle(&self, user: User, access: String) -> SessionState {
        tracing::info!(username = %user.username, user_type = user.user_type.as_str(), "session authenticated");
        self.update(|s| *s = Session::authenticated(user, access));
        SessionState::Authenticated
    }

    async fn refresh_access(&self, refresh: &str) -> Result<String, AppError> {
        tracing::info!("refreshing access token");
        let token = self.api.refresh_token(refresh).await?;
        self.storage.set(ACCESS_TOKEN_KEY, &token.access)?;
        self.update(|s| s.access_token = Some(token.access.clone()));
        Ok(token.access)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<User, AppError> {
        self.initialize().await;

        let tokens = self.api.login(username, password).await?;
        self.storage.set(ACCESS_TOKEN_KEY, &tokens.access)?;
        self.storage.set(REFRESH_TOKEN_KEY, &tokens.refresh)?;
        self.update(|s| s.access_token = Some(tokens.access.clone()));

        match self.api.current_user(&tokens.access).await {
            Ok(user) => {
                self.settle(user.clone(), tokens.access);
                Ok(user)
            }
            Err(e) => {
                self.logout();
                Err(e)
            }
        }
    }

    /// Creates the account, then signs in with the same credentials.
    pub async fn register(&self, data: &Registration) -> Result<User, AppError> {
        self.api.register(data).await?;
        self.login(&data.username, &data.password).await
    }

    /// Clears tokens and user. Never touches the network.
    pub fn logout(&self) {
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!(error = %e, key, "failed to clear local storage");
            }
        }
        self.update(|s| *s = Session::empty(SessionState::Anonymous));
        tracing::info!("session cleared");
    }

    /// Re-reads the user after server-side changes (shop created, subscription paid).
    pub async fn refresh_user(&self) -> Result<User, AppError> {
        let api = &self.api;
        let user = self
            .authorized(|token| async move { api.current_user(&token).await })
            .await?;
        self.set_user(user.clone());
        Ok(user)
    }

    /// Replaces the cached user with a fresher copy from the server.
    pub fn set_user(&self, user: User) {
        self.update(|s| {
            if s.state == SessionState::Authenticated {
                s.user = Some(user);
            }
        });
    }

    /// Runs `op` with the current access token. A 401 triggers one refresh
    /// and one retry; a failed refresh signs the user out.
    pub async fn authorized<T, F, Fut>(&self, op: F) -> Result<T, AppError>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let token = self.access_token().ok_or(AppError::NotAuthenticated)?;

        let err = match op(token).await {
            Err(e) if e.is_unauthorized() => e,
            other => return other,
        };

        let Some(refresh) = self.read_key(REFRESH_TOKEN_KEY) else {
            tracing::warn!("access token expired and no refresh token stored");
            self.logout();
            return Err(err);
        };

        match self.refresh_access(&refresh).await {
            Ok(token) => op(token).await,
            Err(refresh_err) => {
                tracing::warn!(error = %refresh_err, "token refresh failed, signing out");
                self.logout();
                Err(err)
            }
        }
    }
}
