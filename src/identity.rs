use async_trait::async_trait;
use axum::http::{HeaderMap, header};
use reqwest::StatusCode;
use std::sync::Arc;

use crate::{
    config::Endpoints,
    models::{Identity, IdentityPayload, RegisterForm, User},
};

/// IdentityError
///
/// Everything that can go wrong while resolving the current session. None of these
/// reach the page: the client logs them and answers `Identity::Anonymous`.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("identity service unreachable: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("identity service answered {0}")]
    Rejected(StatusCode),
    #[error("identity response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("identity response is invalid: {0}")]
    InvalidPayload(&'static str),
}

/// RegistrationError
///
/// Failure modes of forwarding a registration form to the identity service.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("identity service rejected the registration with {0}")]
    Rejected(StatusCode),
    #[error("identity service unreachable: {0}")]
    Transport(#[source] reqwest::Error),
}

/// SessionCredentials
///
/// The ambient credentials of the incoming browser request. Only the `Cookie` header is
/// carried; it is forwarded verbatim to the identity service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionCredentials {
    cookie: Option<String>,
}

impl SessionCredentials {
    pub fn new(cookie: impl Into<String>) -> Self {
        Self {
            cookie: Some(cookie.into()),
        }
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        let cookie = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect::<Vec<_>>()
            .join("; ");

        Self {
            cookie: (!cookie.is_empty()).then_some(cookie),
        }
    }

    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }
}

// 1. IdentityService Contract
/// IdentityService
///
/// Abstract contract for talking to the external identity service. Handlers depend on
/// this trait only, so tests swap the HTTP client for `MockIdentityService`.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Resolves the session behind `credentials`. Never fails: every error path
    /// converges on `Identity::Anonymous`.
    async fn authenticated(&self, credentials: &SessionCredentials) -> Identity;

    /// Creates a customer account from a validated registration form.
    async fn register(&self, form: RegisterForm) -> Result<(), RegistrationError>;
}

// 2. The Real Implementation (HTTP)
/// HttpIdentityClient
///
/// The concrete implementation backed by `reqwest`. One request per call, no retries
/// and no timeout beyond the platform defaults.
#[derive(Clone)]
pub struct HttpIdentityClient {
    client: reqwest::Client,
    identity_url: String,
    registration_url: String,
}

impl HttpIdentityClient {
    pub fn new(endpoints: &Endpoints) -> Self {
        Self {
            client: reqwest::Client::new(),
            identity_url: endpoints.identity.clone(),
            registration_url: endpoints.registration.clone(),
        }
    }

    /// fetch_user
    ///
    /// The single fallible boundary of the identity lookup. Each step translates its
    /// failure into an `IdentityError` so the caller can collapse them in one place.
    async fn fetch_user(&self, credentials: &SessionCredentials) -> Result<User, IdentityError> {
        let mut request = self
            .client
            .get(&self.identity_url)
            .header(header::ACCEPT, "application/json");

        if let Some(cookie) = credentials.cookie() {
            request = request.header(header::COOKIE, cookie);
        }

        let response = request.send().await.map_err(IdentityError::Transport)?;

        if !response.status().is_success() {
            return Err(IdentityError::Rejected(response.status()));
        }

        let payload = response
            .json::<IdentityPayload>()
            .await
            .map_err(IdentityError::Decode)?;

        payload.validate().map_err(IdentityError::InvalidPayload)
    }
}

#[async_trait]
impl IdentityService for HttpIdentityClient {
    async fn authenticated(&self, credentials: &SessionCredentials) -> Identity {
        match self.fetch_user(credentials).await {
            Ok(user) => {
                tracing::debug!(role = ?user.role, "session resolved");
                Identity::Authenticated(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "identity lookup failed, continuing as anonymous");
                Identity::Anonymous
            }
        }
    }

    /// register
    ///
    /// Forwards the form as a customer account in JSON. Any 2xx counts as created.
    async fn register(&self, form: RegisterForm) -> Result<(), RegistrationError> {
        let response = self
            .client
            .post(&self.registration_url)
            .json(&form.into_request())
            .send()
            .await
            .map_err(RegistrationError::Transport)?;

        if !response.status().is_success() {
            return Err(RegistrationError::Rejected(response.status()));
        }

        Ok(())
    }
}

// 3. The Mock Implementation (For Tests)
/// MockIdentityService
///
/// Answers every lookup with a fixed identity, so handler tests run without an
/// identity service on the network.
#[derive(Clone, Default)]
pub struct MockIdentityService {
    pub identity: Identity,
    /// When true, every registration is rejected.
    pub reject_registrations: bool,
}

impl MockIdentityService {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(user: User) -> Self {
        Self {
            identity: Identity::Authenticated(user),
            reject_registrations: false,
        }
    }

    pub fn rejecting_registrations() -> Self {
        Self {
            identity: Identity::Anonymous,
            reject_registrations: true,
        }
    }
}

#[async_trait]
impl IdentityService for MockIdentityService {
    async fn authenticated(&self, _credentials: &SessionCredentials) -> Identity {
        self.identity.clone()
    }

    async fn register(&self, _form: RegisterForm) -> Result<(), RegistrationError> {
        if self.reject_registrations {
            return Err(RegistrationError::Rejected(StatusCode::BAD_REQUEST));
        }
        Ok(())
    }
}

/// IdentityState
///
/// The concrete type used to share the identity service across the application state.
pub type IdentityState = Arc<dyn IdentityService>;
