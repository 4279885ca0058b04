// src/handlers/kpis.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::kpi::{CreateKpiPayload, Kpi, UpdateKpiPayload},
};

// POST /api/kpis
#[utoipa::path(
    post,
    path = "/api/kpis",
    tag = "KPIs",
    request_body = CreateKpiPayload,
    responses(
        (status = 201, description = "KPI criado", body = Kpi),
        (status = 404, description = "Filial não encontrada"),
        (status = 409, description = "Nome já usado na filial")
    )
)]
pub async fn create_kpi(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateKpiPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let kpi = app_state.kpi_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(kpi)))
}

// GET /api/kpis/branch/{branchId}
#[utoipa::path(
    get,
    path = "/api/kpis/branch/{branchId}",
    tag = "KPIs",
    params(("branchId" = Uuid, Path, description = "ID da filial")),
    responses(
        (status = 200, description = "KPIs da filial, ordenados por nome", body = Vec<Kpi>)
    )
)]
pub async fn list_branch_kpis(
    State(app_state): State<AppState>,
    Path(branch_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let kpis = app_state.kpi_service.list_for_branch(branch_id).await;
    Ok((StatusCode::OK, Json(kpis)))
}

// GET /api/kpis/{id}
#[utoipa::path(
    get,
    path = "/api/kpis/{id}",
    tag = "KPIs",
    params(("id" = Uuid, Path, description = "ID do KPI")),
    responses(
        (status = 200, description = "KPI encontrado", body = Kpi),
        (status = 404, description = "KPI não encontrado")
    )
)]
pub async fn get_kpi(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let kpi = app_state.kpi_service.get(id).await?;
    Ok((StatusCode::OK, Json(kpi)))
}

// PUT /api/kpis/{id}
#[utoipa::path(
    put,
    path = "/api/kpis/{id}",
    tag = "KPIs",
    params(("id" = Uuid, Path, description = "ID do KPI")),
    request_body = UpdateKpiPayload,
    responses(
        (status = 200, description = "KPI atualizado", body = Kpi),
        (status = 404, description = "KPI não encontrado"),
        (status = 409, description = "Nome já usado na filial")
    )
)]
pub async fn update_kpi(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateKpiPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let kpi = app_state.kpi_service.update(id, payload).await?;
    Ok((StatusCode::OK, Json(kpi)))
}

// DELETE /api/kpis/{id}
#[utoipa::path(
    delete,
    path = "/api/kpis/{id}",
    tag = "KPIs",
    params(("id" = Uuid, Path, description = "ID do KPI")),
    responses(
        (status = 204, description = "KPI excluído"),
        (status = 404, description = "KPI não encontrado")
    )
)]
pub async fn delete_kpi(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.kpi_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
