//! Read-only listings: user accounts, residents, both notification feeds,
//! and the single-resident view.

use axum::extract::{Path, State};
use residency_db::NotificationStore;
use residency_types::api::Flash;
use residency_types::models::{Notification, Populated, Resident};

use crate::auth::{AppState, AppStateInner};
use crate::error::DashboardError;
use crate::flash::IncomingFlash;
use crate::outcome::{Outcome, Page};
use crate::populate::{populate, populate_one};
use crate::routes::DASHBOARD;
use crate::session::AdminSession;
use crate::{strings, validation, views};

/// GET /dashboard/accounts
pub async fn accounts(
    State(state): State<AppState>,
    _session: AdminSession,
    IncomingFlash(flash): IncomingFlash,
) -> Outcome {
    match state.users.list_users() {
        Ok(users) => Page::new("Accounts", views::accounts(&users), flash).into(),
        Err(e) => DashboardError::from(e).into_redirect(DASHBOARD, DASHBOARD).into(),
    }
}

/// GET /dashboard/residents
pub async fn residents(
    State(state): State<AppState>,
    _session: AdminSession,
    IncomingFlash(flash): IncomingFlash,
) -> Outcome {
    let listed = state
        .residents
        .list_residents()
        .and_then(|rs| populate(state.users.as_ref(), rs));

    match listed {
        Ok(residents) => Page::new("Residents", views::residents(&residents), flash).into(),
        Err(e) => DashboardError::from(e).into_redirect(DASHBOARD, DASHBOARD).into(),
    }
}

/// GET /dashboard/notifications/users
pub async fn user_notifications(
    State(state): State<AppState>,
    _session: AdminSession,
    IncomingFlash(flash): IncomingFlash,
) -> Outcome {
    feed_page(&state, state.user_notifications.as_ref(), "User notifications", flash)
}

/// GET /dashboard/notifications/residents
pub async fn resident_notifications(
    State(state): State<AppState>,
    _session: AdminSession,
    IncomingFlash(flash): IncomingFlash,
) -> Outcome {
    feed_page(&state, state.resident_notifications.as_ref(), "Resident notifications", flash)
}

/// GET /dashboard/resident/{residentID}
pub async fn resident_detail(
    State(state): State<AppState>,
    _session: AdminSession,
    IncomingFlash(flash): IncomingFlash,
    Path(resident_id): Path<String>,
) -> Outcome {
    match load_resident(&state, &resident_id) {
        Ok(entry) => Page::new("Request", views::resident_detail(&entry), flash).into(),
        Err(e) => e.into_redirect(DASHBOARD, DASHBOARD).into(),
    }
}

fn feed_page(
    state: &AppStateInner,
    feed: &dyn NotificationStore,
    title: &'static str,
    flash: Option<Flash>,
) -> Outcome {
    let listed: anyhow::Result<Vec<Populated<Notification>>> = feed
        .list_notifications()
        .and_then(|ns| populate(state.users.as_ref(), ns));

    match listed {
        Ok(entries) => Page::new(title, views::notifications(&entries), flash).into(),
        Err(e) => DashboardError::from(e).into_redirect(DASHBOARD, DASHBOARD).into(),
    }
}

/// Validates the id before touching the store, checks existence, then
/// fetches again with the user expanded.
fn load_resident(state: &AppStateInner, raw_id: &str) -> Result<Populated<Resident>, DashboardError> {
    let id = validation::resident_id(raw_id)?;

    if state.residents.find_resident(&id)?.is_none() {
        return Err(DashboardError::NotFound(strings::RESIDENT_NOT_FOUND));
    }

    let resident = state
        .residents
        .find_resident(&id)?
        .ok_or(DashboardError::NotFound(strings::RESIDENT_NOT_FOUND))?;

    Ok(populate_one(state.users.as_ref(), resident)?)
}
