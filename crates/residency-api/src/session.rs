//! Session gate. Every dashboard handler takes an [`AdminSession`], so no
//! handler body runs without a valid session cookie for an existing admin.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use residency_types::ObjectId;
use residency_types::api::Claims;
use residency_types::models::Admin;
use tracing::warn;

use crate::auth::AppState;
use crate::error::DashboardError;
use crate::outcome::Redirect;
use crate::routes::{DASHBOARD, LOGIN};
use crate::strings;

pub const SESSION_COOKIE: &str = "residency_session";

const SESSION_DAYS: i64 = 30;

/// The administrator a request acts for.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub admin_id: ObjectId,
}

#[derive(Debug)]
pub enum SessionRejection {
    /// No cookie, a bad token, or an admin that no longer exists.
    Unauthenticated,
    /// The admin lookup itself failed.
    Store(anyhow::Error),
}

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthenticated => Redirect::error(LOGIN, strings::LOGIN_REQUIRED).into_response(),
            Self::Store(e) => DashboardError::Store(e)
                .into_redirect(DASHBOARD, DASHBOARD)
                .into_response(),
        }
    }
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = SessionRejection;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(SESSION_COOKIE).ok_or(SessionRejection::Unauthenticated)?;

        let claims = decode::<Claims>(
            token.value(),
            &DecodingKey::from_secret(state.session_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| {
            warn!("Rejected session for {}: {}", parts.uri.path(), e);
            SessionRejection::Unauthenticated
        })?
        .claims;

        let admin_id = ObjectId::parse(&claims.sub).ok_or_else(|| {
            warn!("Rejected session with malformed subject {}", claims.sub);
            SessionRejection::Unauthenticated
        })?;

        if !state.admins.admin_exists(&admin_id).map_err(SessionRejection::Store)? {
            warn!("Rejected session for deleted admin {}", admin_id);
            return Err(SessionRejection::Unauthenticated);
        }

        Ok(Self { admin_id })
    }
}

/// Signed session token for `admin`, in the format the gate accepts.
pub fn issue_session_token(secret: &str, admin: &Admin) -> anyhow::Result<String> {
    let claims = Claims {
        sub: admin.id.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::days(SESSION_DAYS)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}
