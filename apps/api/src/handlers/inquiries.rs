use axum::Json;
use axum::extract::{Extension, Query, State};
use campusforge_core::AppError;
use campusforge_domain::{Capability, InquiryId};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::auth::{VerifiedIdentity, require_capability};
use crate::dto::{CreateInquiryResponse, InquiryResponse, InquirySummaryResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

use super::required_field;

#[derive(Debug, serde::Deserialize)]
pub struct InquiryListQuery {
    pub status: Option<String>,
}

pub async fn create_inquiry_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<CreateInquiryResponse>> {
    let claim = require_capability(&identity, Capability::SubmitInquiry)?;
    let order_id = state.inquiry_service.submit(claim, payload).await?;
    info!(%order_id, "inquiry recorded");

    Ok(Json(CreateInquiryResponse {
        message: "Inquiry received!",
        order_id: order_id.to_string(),
    }))
}

pub async fn list_inquiries_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    Query(query): Query<InquiryListQuery>,
) -> ApiResult<Json<Vec<InquiryResponse>>> {
    require_capability(&identity, Capability::ViewAllInquiries)?;
    let inquiries = state
        .inquiry_service
        .list_queue(query.status.as_deref())
        .await?
        .into_iter()
        .map(InquiryResponse::from)
        .collect();

    Ok(Json(inquiries))
}

pub async fn list_own_inquiries_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
) -> ApiResult<Json<Vec<InquirySummaryResponse>>> {
    let claim = require_capability(&identity, Capability::ViewOwnInquiries)?;
    let inquiries = state
        .inquiry_service
        .list_own(claim.subject())
        .await?
        .into_iter()
        .map(InquirySummaryResponse::from)
        .collect();

    Ok(Json(inquiries))
}

pub async fn update_inquiry_status_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<InquiryResponse>> {
    let claim = require_capability(&identity, Capability::UpdateInquiryStatus)?;
    let order_id = required_field(&payload, "orderId")?;
    let new_status = required_field(&payload, "newStatus")?;
    let inquiry_id = parse_inquiry_id(order_id)?;

    let updated = state
        .inquiry_service
        .update_status(inquiry_id, new_status, claim.subject())
        .await?;
    info!(order_id, new_status, "inquiry status updated");

    Ok(Json(updated.into()))
}

fn parse_inquiry_id(value: &str) -> Result<InquiryId, ApiError> {
    Uuid::parse_str(value)
        .map(InquiryId::from_uuid)
        .map_err(|_| AppError::Validation(format!("invalid inquiry id '{value}'")).into())
}

#[cfg(test)]
mod tests;
