use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use ts_rs::TS;
use utoipa::ToSchema;

// --- Identity Schemas ---

/// Role
///
/// The permission level attached to an authenticated session. Governs which
/// navigation links are rendered and which restricted pages may be viewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum Role {
    Administrator,
    Customer,
}

/// User
///
/// The identity record resolved for the current page load. Constructed fresh from each
/// identity-service response and dropped once the page has been rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct User {
    pub role: Role,
    pub name: String,
    pub email: String,
}

impl User {
    /// The name shown in greetings, falling back to the email when no name was supplied.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

/// Identity
///
/// The normalized outcome of an identity lookup. Every failure path of the lookup
/// converges on `Anonymous`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Identity {
    Authenticated(User),
    #[default]
    Anonymous,
}

impl Identity {
    /// The role of the authenticated user, `None` for anonymous sessions.
    pub fn role(&self) -> Option<Role> {
        match self {
            Identity::Authenticated(user) => Some(user.role),
            Identity::Anonymous => None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Identity::Authenticated(user) => Some(user),
            Identity::Anonymous => None,
        }
    }
}

/// IdentityPayload
///
/// Raw body of a successful `GET /users/authenticated` response. Every field is optional
/// so that shape problems are reported by `validate` instead of by the JSON decoder.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentityPayload {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl IdentityPayload {
    /// validate
    ///
    /// Checks the decoded payload against the identity schema and builds the `User`.
    /// The email is mandatory, the role must be one of the known roles, and a missing
    /// name becomes an empty string.
    pub fn validate(self) -> Result<User, &'static str> {
        let email = self
            .email
            .filter(|email| !email.trim().is_empty())
            .ok_or("email is missing")?;

        let role = match self.role.as_deref() {
            Some("ADMINISTRATOR") => Role::Administrator,
            Some("CUSTOMER") => Role::Customer,
            Some(_) => return Err("role is not recognized"),
            None => return Err("role is missing"),
        };

        Ok(User {
            role,
            name: self.name.unwrap_or_default(),
            email,
        })
    }
}

// --- Registration Schemas ---

static PERSON_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-zÀ-ÿ]+(?:[ '-][A-Za-zÀ-ÿ]+)*$").expect("static name pattern")
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static email pattern")
});

/// RegisterForm
///
/// Input payload of the storefront registration form (POST /register).
/// The password is only passed through to the identity service, never logged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl RegisterForm {
    /// validate
    ///
    /// Applies the account rules of the identity service before anything leaves the
    /// storefront, returning the first violated rule's message.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("Name is required");
        }
        if !PERSON_NAME.is_match(&self.name) {
            return Err("Name can only contain letters, spaces, hyphens, and apostrophes");
        }
        if self.surname.trim().is_empty() {
            return Err("Name is required");
        }
        if !PERSON_NAME.is_match(&self.surname) {
            return Err("Surname can only contain letters, spaces, hyphens, and apostrophes");
        }
        if !EMAIL.is_match(&self.email) {
            return Err("Invalid email format");
        }
        if self.password.trim().is_empty() {
            return Err("Password is required");
        }
        let length = self.password.chars().count();
        if !(8..=20).contains(&length) {
            return Err("Password must be between 8 and 20 characters");
        }
        Ok(())
    }

    /// Builds the JSON body sent to the identity service. New accounts are always customers.
    pub fn into_request(self) -> RegisterUserRequest {
        RegisterUserRequest {
            name: self.name,
            surname: self.surname,
            email: self.email,
            password: self.password,
            role: Role::Customer,
        }
    }
}

/// RegisterUserRequest
///
/// Body of `POST /users/registr` on the identity service.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}
