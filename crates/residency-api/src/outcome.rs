//! What a dashboard handler hands back: a rendered page, or a redirect that
//! may carry a flash for the next page.

use axum::response::{self, Html, IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use residency_types::api::Flash;

use crate::flash::{self, FLASH_COOKIE};
use crate::session::SESSION_COOKIE;
use crate::views;

#[derive(Debug)]
pub enum Outcome {
    Page(Page),
    Redirect(Redirect),
}

impl From<Page> for Outcome {
    fn from(page: Page) -> Self {
        Self::Page(page)
    }
}

impl From<Redirect> for Outcome {
    fn from(redirect: Redirect) -> Self {
        Self::Redirect(redirect)
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Self::Page(page) => page.into_response(),
            Self::Redirect(redirect) => redirect.into_response(),
        }
    }
}

/// A rendered view. Showing a flash consumes it.
#[derive(Debug)]
pub struct Page {
    title: &'static str,
    body: String,
    flash: Option<Flash>,
}

impl Page {
    pub fn new(title: &'static str, body: String, flash: Option<Flash>) -> Self {
        Self { title, body, flash }
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        let mut jar = CookieJar::new();
        if self.flash.is_some() {
            jar = jar.add(flash::removal(FLASH_COOKIE));
        }
        let html = views::layout(self.title, self.flash.as_ref(), &self.body);
        (jar, Html(html)).into_response()
    }
}

#[derive(Debug)]
pub struct Redirect {
    to: String,
    flash: Option<Flash>,
    end_session: bool,
}

impl Redirect {
    pub fn to(target: &str) -> Self {
        Self {
            to: target.to_string(),
            flash: None,
            end_session: false,
        }
    }

    pub fn success(target: &str, message: &str) -> Self {
        Self::to(target).with_flash(Flash::success(message))
    }

    pub fn error(target: &str, message: &str) -> Self {
        Self::to(target).with_flash(Flash::error(message))
    }

    pub fn with_flash(mut self, flash: Flash) -> Self {
        self.flash = Some(flash);
        self
    }

    /// Also drop the session cookie.
    pub fn ending_session(mut self) -> Self {
        self.end_session = true;
        self
    }

    pub fn target(&self) -> &str {
        &self.to
    }

    pub fn flash(&self) -> Option<&Flash> {
        self.flash.as_ref()
    }
}

impl IntoResponse for Redirect {
    fn into_response(self) -> Response {
        let mut jar = CookieJar::new();
        if let Some(flash) = &self.flash {
            jar = jar.add(flash::cookie(flash));
        }
        if self.end_session {
            jar = jar.add(flash::removal(SESSION_COOKIE));
        }
        (jar, response::Redirect::to(&self.to)).into_response()
    }
}
