use axum::extract::rejection::FormRejection;
use thiserror::Error;
use tracing::error;

use crate::outcome::Redirect;
use crate::strings;

/// Why a dashboard request did not succeed.
///
/// The first three carry the message shown to the admin. Store failures and
/// unreadable form bodies are logged and shown as the generic server error.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("invalid input: {0}")]
    Invalid(&'static str),

    #[error("conflict: {0}")]
    Conflict(&'static str),

    #[error("not found: {0}")]
    NotFound(&'static str),

    #[error("store failure: {0:#}")]
    Store(#[from] anyhow::Error),

    #[error("unreadable form: {0}")]
    Form(#[from] FormRejection),
}

impl DashboardError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Invalid(msg) | Self::Conflict(msg) | Self::NotFound(msg) => msg,
            Self::Store(_) | Self::Form(_) => strings::SERVER_ERROR,
        }
    }

    /// Rejections go back to `local`; store failures go to `fallback`.
    pub fn into_redirect(self, local: &str, fallback: &str) -> Redirect {
        match &self {
            Self::Store(e) => {
                error!("Store failure: {:#}", e);
                Redirect::error(fallback, self.user_message())
            }
            Self::Form(e) => {
                error!("Unreadable form body: {}", e);
                Redirect::error(fallback, self.user_message())
            }
            _ => Redirect::error(local, self.user_message()),
        }
    }
}
