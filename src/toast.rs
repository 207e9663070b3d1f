use serde::{Deserialize, Serialize};
use std::time::Duration;
use ts_rs::TS;
use utoipa::ToSchema;

/// How long a "please log in" toast stays up.
pub const LOGIN_TOAST: Duration = Duration::from_millis(3000);
/// How long an "access denied" toast stays up.
pub const DENIED_TOAST: Duration = Duration::from_millis(5000);

/// Toast
///
/// A transient, auto-dismissing notification shown in the `toast` region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Toast {
    pub message: String,
    #[ts(type = "number")]
    pub duration_ms: u64,
}

impl Toast {
    pub fn new(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            duration_ms: duration.as_millis() as u64,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}
