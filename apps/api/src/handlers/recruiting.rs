use axum::Json;
use axum::extract::{Extension, State};
use campusforge_core::AppError;
use campusforge_domain::{ApplicationId, Capability};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::auth::{VerifiedIdentity, require_capability};
use crate::dto::{ApplicationResponse, IntakeResponse, UpdateApplicationStatusResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

use super::required_field;

pub async fn intake_application_handler(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<IntakeResponse>> {
    let application = state.recruiting_service.intake(payload).await?;
    info!(
        application_id = %application.id,
        position = application.position.as_str(),
        "application recorded"
    );

    Ok(Json(IntakeResponse {
        message: "Application submitted and saved successfully.",
        data: application.into(),
    }))
}

pub async fn list_pending_applications_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
) -> ApiResult<Json<Vec<ApplicationResponse>>> {
    require_capability(&identity, Capability::ReviewApplications)?;
    let applications = state
        .recruiting_service
        .list_pending()
        .await?
        .into_iter()
        .map(ApplicationResponse::from)
        .collect();

    Ok(Json(applications))
}

pub async fn update_application_status_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<UpdateApplicationStatusResponse>> {
    require_capability(&identity, Capability::ReviewApplications)?;
    let application_id = required_field(&payload, "applicationId")?;
    let new_status = required_field(&payload, "newStatus")?;
    let id = parse_application_id(application_id)?;

    let updated = state
        .recruiting_service
        .update_status(id, new_status)
        .await?;
    info!(application_id, new_status, "application status updated");

    Ok(Json(UpdateApplicationStatusResponse {
        message: "Application status updated successfully.",
        updated_application: updated.into(),
    }))
}

fn parse_application_id(value: &str) -> Result<ApplicationId, ApiError> {
    Uuid::parse_str(value)
        .map(ApplicationId::from_uuid)
        .map_err(|_| AppError::Validation(format!("invalid application id '{value}'")).into())
}

#[cfg(test)]
mod tests;
