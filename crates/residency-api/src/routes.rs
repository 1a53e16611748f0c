use axum::{
    Router,
    routing::{get, post},
};

use crate::auth::AppState;
use crate::{login, overview, records, settings};

pub const DASHBOARD: &str = "/dashboard";
pub const SETTINGS: &str = "/dashboard/settings";
pub const LOGIN: &str = "/auth/login";

pub fn build_router(state: AppState) -> Router {
    let dashboard = Router::new()
        .route("/", get(overview::index))
        .route("/settings", get(settings::show))
        .route("/settings/editInfo", post(settings::edit_info))
        .route("/settings/changePassword", post(settings::change_password))
        .route("/settings/deleteAccount", post(settings::delete_account))
        .route("/accounts", get(records::accounts))
        .route("/residents", get(records::residents))
        .route("/notifications/users", get(records::user_notifications))
        .route("/notifications/residents", get(records::resident_notifications))
        .route("/resident/{resident_id}", get(records::resident_detail));

    Router::new()
        .nest(DASHBOARD, dashboard)
        .route(LOGIN, get(login::page))
        .with_state(state)
}
