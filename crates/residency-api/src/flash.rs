//! One-shot flash messages carried in a cookie across a redirect.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64;
use residency_types::api::Flash;

pub const FLASH_COOKIE: &str = "flash";

pub fn encode(flash: &Flash) -> String {
    // Serializing a two-field struct cannot fail
    let json = serde_json::to_vec(flash).unwrap_or_default();
    B64.encode(json)
}

pub fn decode(value: &str) -> Option<Flash> {
    let bytes = B64.decode(value).ok()?;
    serde_json::from_slice(&bytes).ok()
}

pub(crate) fn cookie(flash: &Flash) -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE, encode(flash)))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// A cookie that tells the browser to drop `name`.
pub(crate) fn removal(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::build((name, "")).path("/").build();
    cookie.make_removal();
    cookie
}

/// The flash that arrived with this request, if any. A garbled cookie is
/// treated as absent.
#[derive(Debug, Default)]
pub struct IncomingFlash(pub Option<Flash>);

impl<S> FromRequestParts<S> for IncomingFlash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(Self(jar.get(FLASH_COOKIE).and_then(|c| decode(c.value()))))
    }
}
