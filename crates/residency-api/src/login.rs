use crate::flash::IncomingFlash;
use crate::outcome::Page;
use crate::views;

/// GET /auth/login
///
/// Landing page for signed-out admins. Renders the flash left by account
/// deletion or a rejected session; signing in is handled elsewhere.
pub async fn page(IncomingFlash(flash): IncomingFlash) -> Page {
    Page::new("Login", views::login(), flash)
}
