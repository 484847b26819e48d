use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use service::company::domain::{CompanyRecord, CreateCompanyRequest, UpdateStatusRequest};
use tracing::info;

use crate::{errors::ApiError, state::ServerState};

#[derive(Debug, Serialize)]
pub struct RecordWithMessage {
    pub message: &'static str,
    pub record: CompanyRecord,
}

#[derive(Debug, Serialize)]
pub struct RecordBody {
    pub record: CompanyRecord,
}

#[derive(Debug, Serialize)]
pub struct RecordList {
    pub records: Vec<CompanyRecord>,
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

/// `POST /process-data`: store a new company (201).
pub async fn process_data(
    State(state): State<ServerState>,
    payload: Result<Json<CreateCompanyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RecordWithMessage>), ApiError> {
    let Json(req) = payload?;
    let record = state.companies.create(req).await?;
    Ok((StatusCode::CREATED, Json(RecordWithMessage { message: "Company stored", record })))
}

/// `POST /update-status`: change the status of an existing company.
pub async fn update_status(
    State(state): State<ServerState>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<RecordWithMessage>, ApiError> {
    let Json(req) = payload?;
    let record = state.companies.update_status(req).await?;
    Ok(Json(RecordWithMessage { message: "Status updated", record }))
}

/// `GET /empresas`: every company in insertion order.
pub async fn list(State(state): State<ServerState>) -> Result<Json<RecordList>, ApiError> {
    let records = state.companies.list().await?;
    info!(count = records.len(), "list companies");
    Ok(Json(RecordList { records }))
}

/// `GET /empresa/:tax_id`
pub async fn get(
    State(state): State<ServerState>,
    Path(tax_id): Path<String>,
) -> Result<Json<RecordBody>, ApiError> {
    let record = state.companies.get(&tax_id).await?;
    Ok(Json(RecordBody { record }))
}

/// `DELETE /empresa/:tax_id`: hard delete; the body carries only a message.
pub async fn delete(
    State(state): State<ServerState>,
    Path(tax_id): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    state.companies.delete(&tax_id).await?;
    Ok(Json(MessageBody { message: "Company deleted" }))
}
