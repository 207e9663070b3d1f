use std::env;

/// Path of the identity-status endpoint on the identity service.
pub const AUTHENTICATED_PATH: &str = "/users/authenticated";
/// Path of the customer registration endpoint on the identity service.
pub const REGISTRATION_PATH: &str = "/users/registr";

/// AppConfig
///
/// Holds the storefront's entire configuration state. This struct is immutable once
/// loaded and reaches handlers as part of `AppState`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Selects the log format and the fail-fast rules.
    pub env: Env,
    // Socket address the storefront listens on.
    pub bind_addr: String,
    // Base URL of the external identity service (no trailing slash).
    pub identity_service_url: String,
}

/// Env
///
/// Defines the runtime context. Local development gets readable logs and a default
/// identity service address; production demands every external address explicitly.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

/// Endpoints
///
/// Every URL the rendered pages point at, derived once from the configuration so the
/// renderer never bakes a host or port into its markup.
#[derive(Clone, Debug, PartialEq)]
pub struct Endpoints {
    /// `GET` identity-status endpoint, called with the caller's session cookie.
    pub identity: String,
    /// `POST` endpoint that creates a customer account.
    pub registration: String,
    /// Form action of the logout button.
    pub logout: String,
    /// Form action of the login page.
    pub login_action: String,
    /// Storefront-local login page.
    pub login_page: String,
    /// Storefront-local registration page.
    pub register_page: String,
}

impl Default for AppConfig {
    /// default
    ///
    /// Provides a non-panicking AppConfig for test setup, pointing at the local identity
    /// service address without reading any environment variable.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: "127.0.0.1:8082".to_string(),
            identity_service_url: "http://localhost:8081".to_string(),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads all parameters from environment variables at startup.
    ///
    /// # Panics
    /// Panics in production when `IDENTITY_SERVICE_URL` is missing, so the storefront
    /// never starts pointing its login and identity calls at a developer machine.
    pub fn load() -> Self {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let identity_service_url = match env {
            Env::Production => env::var("IDENTITY_SERVICE_URL")
                .expect("FATAL: IDENTITY_SERVICE_URL must be set in production."),
            Env::Local => env::var("IDENTITY_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8081".to_string()),
        };

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8082".to_string());

        Self {
            env,
            bind_addr,
            identity_service_url: identity_service_url.trim_end_matches('/').to_string(),
        }
    }

    /// endpoints
    ///
    /// Derives the full set of URLs used by the identity client and the page markup.
    pub fn endpoints(&self) -> Endpoints {
        let base = self.identity_service_url.trim_end_matches('/');
        Endpoints {
            identity: format!("{base}{AUTHENTICATED_PATH}"),
            registration: format!("{base}{REGISTRATION_PATH}"),
            logout: format!("{base}/logout"),
            login_action: format!("{base}/login"),
            login_page: "/login".to_string(),
            register_page: "/register".to_string(),
        }
    }
}
