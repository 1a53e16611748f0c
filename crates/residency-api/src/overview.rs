use axum::extract::State;
use residency_types::models::Admin;

use crate::auth::{AppState, AppStateInner};
use crate::error::DashboardError;
use crate::flash::IncomingFlash;
use crate::outcome::{Outcome, Page};
use crate::routes::DASHBOARD;
use crate::session::AdminSession;
use crate::views;

/// Aggregates shown on the dashboard landing page.
pub struct Overview {
    pub admins: Vec<Admin>,
    pub users_count: u64,
    pub residents_count: u64,
}

impl Overview {
    pub fn admins_count(&self) -> usize {
        self.admins.len()
    }
}

/// GET /dashboard
pub async fn index(
    State(state): State<AppState>,
    _session: AdminSession,
    IncomingFlash(flash): IncomingFlash,
) -> Outcome {
    match load(&state) {
        Ok(overview) => Page::new("Dashboard", views::overview(&overview), flash).into(),
        Err(e) => e.into_redirect(DASHBOARD, DASHBOARD).into(),
    }
}

fn load(state: &AppStateInner) -> Result<Overview, DashboardError> {
    Ok(Overview {
        admins: state.admins.list_admins()?,
        users_count: state.users.count_users()?,
        residents_count: state.residents.count_residents()?,
    })
}
