use serde::{Deserialize, Serialize};

// -- Session --

/// Claims carried by the session cookie. Shared with whatever issues the
/// session at login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Administrator id.
    pub sub: String,
    pub exp: usize,
}

// -- Settings forms --

#[derive(Debug, Deserialize)]
pub struct EditInfoForm {
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordForm {
    #[serde(default)]
    pub password: String,
    #[serde(default, rename = "confirmPassword")]
    pub confirm_password: String,
}

// -- Flash --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

/// One-shot notice shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}
