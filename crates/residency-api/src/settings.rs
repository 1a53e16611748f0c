use anyhow::anyhow;
use axum::Form;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use residency_types::ObjectId;
use residency_types::api::{ChangePasswordForm, EditInfoForm};
use residency_types::models::{Admin, AdminPatch};
use tracing::{debug, info};

use crate::auth::{AppState, AppStateInner, hash_password};
use crate::error::DashboardError;
use crate::flash::IncomingFlash;
use crate::outcome::{Outcome, Page, Redirect};
use crate::routes::{DASHBOARD, LOGIN, SETTINGS};
use crate::session::AdminSession;
use crate::{strings, validation, views};

/// GET /dashboard/settings
pub async fn show(
    State(state): State<AppState>,
    session: AdminSession,
    IncomingFlash(flash): IncomingFlash,
) -> Outcome {
    match current_admin(&state, &session.admin_id) {
        Ok(admin) => Page::new("Settings", views::settings(&admin), flash).into(),
        Err(e) => e.into_redirect(DASHBOARD, DASHBOARD).into(),
    }
}

/// POST /dashboard/settings/editInfo
pub async fn edit_info(
    State(state): State<AppState>,
    session: AdminSession,
    form: Result<Form<EditInfoForm>, FormRejection>,
) -> Redirect {
    let applied = form
        .map_err(DashboardError::from)
        .and_then(|Form(form)| apply_edit_info(&state, &session.admin_id, &form));

    match applied {
        Ok(()) => Redirect::success(SETTINGS, strings::INFO_UPDATED),
        Err(e) => e.into_redirect(SETTINGS, DASHBOARD),
    }
}

/// POST /dashboard/settings/changePassword
pub async fn change_password(
    State(state): State<AppState>,
    session: AdminSession,
    form: Result<Form<ChangePasswordForm>, FormRejection>,
) -> Redirect {
    let applied = form
        .map_err(DashboardError::from)
        .and_then(|Form(form)| apply_change_password(&state, &session.admin_id, &form));

    match applied {
        Ok(()) => Redirect::success(SETTINGS, strings::PASSWORD_CHANGED),
        Err(e) => e.into_redirect(SETTINGS, SETTINGS),
    }
}

/// POST /dashboard/settings/deleteAccount
///
/// No confirmation step: the session's account is removed outright.
pub async fn delete_account(State(state): State<AppState>, session: AdminSession) -> Redirect {
    match state.admins.delete_admin(&session.admin_id) {
        Ok(()) => {
            info!("Admin {} deleted their account", session.admin_id);
            Redirect::success(LOGIN, strings::ACCOUNT_DELETED).ending_session()
        }
        Err(e) => DashboardError::from(e).into_redirect(SETTINGS, SETTINGS),
    }
}

fn current_admin(state: &AppStateInner, admin_id: &ObjectId) -> Result<Admin, DashboardError> {
    let admin = state
        .admins
        .find_admin(admin_id)?
        .ok_or_else(|| anyhow!("Session admin {} no longer exists", admin_id))?;
    Ok(admin)
}

fn apply_edit_info(
    state: &AppStateInner,
    admin_id: &ObjectId,
    form: &EditInfoForm,
) -> Result<(), DashboardError> {
    validation::fullname(&form.fullname)?;
    validation::email(&form.email)?;

    let admin = current_admin(state, admin_id)?;

    let patch = if admin.email == form.email {
        AdminPatch {
            fullname: Some(form.fullname.clone()),
            ..Default::default()
        }
    } else {
        if state.admins.find_admin_by_email(&form.email)?.is_some() {
            return Err(DashboardError::Conflict(strings::ACCOUNT_EXISTS));
        }
        AdminPatch {
            fullname: Some(form.fullname.clone()),
            email: Some(form.email.clone()),
            ..Default::default()
        }
    };

    state.admins.update_admin(admin_id, &patch)?;
    debug!("Admin {} updated profile", admin_id);
    Ok(())
}

fn apply_change_password(
    state: &AppStateInner,
    admin_id: &ObjectId,
    form: &ChangePasswordForm,
) -> Result<(), DashboardError> {
    validation::new_password(&form.password, &form.confirm_password)?;

    let patch = AdminPatch {
        password: Some(hash_password(&form.password)?),
        ..Default::default()
    };
    state.admins.update_admin(admin_id, &patch)?;
    debug!("Admin {} changed password", admin_id);
    Ok(())
}
