// src/handlers/revenues.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::revenue::{
        CreateRevenuePayload, ProposeProgressPayload, ResolveProgressPayload, Revenue,
        RevenueChangeRequest,
    },
    services::Resolution,
};

// POST /api/revenues
#[utoipa::path(
    post,
    path = "/api/revenues",
    tag = "Receitas",
    request_body = CreateRevenuePayload,
    responses(
        (status = 201, description = "Campanha de receita criada", body = Revenue),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_revenue(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateRevenuePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let revenue = app_state.revenue_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(revenue)))
}

// GET /api/revenues
#[utoipa::path(
    get,
    path = "/api/revenues",
    tag = "Receitas",
    responses(
        (status = 200, description = "Campanhas, mais recentes primeiro", body = Vec<Revenue>)
    )
)]
pub async fn list_revenues(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let revenues = app_state.revenue_service.list().await;
    Ok((StatusCode::OK, Json(revenues)))
}

// GET /api/revenues/{id}
#[utoipa::path(
    get,
    path = "/api/revenues/{id}",
    tag = "Receitas",
    params(("id" = Uuid, Path, description = "ID da campanha")),
    responses(
        (status = 200, description = "Campanha encontrada", body = Revenue),
        (status = 404, description = "Receita não encontrada")
    )
)]
pub async fn get_revenue(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let revenue = app_state.revenue_service.get(id).await?;
    Ok((StatusCode::OK, Json(revenue)))
}

// DELETE /api/revenues/{id}
#[utoipa::path(
    delete,
    path = "/api/revenues/{id}",
    tag = "Receitas",
    params(("id" = Uuid, Path, description = "ID da campanha")),
    responses(
        (status = 204, description = "Campanha excluída"),
        (status = 404, description = "Receita não encontrada")
    )
)]
pub async fn delete_revenue(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.revenue_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/revenues/progress-requests
#[utoipa::path(
    post,
    path = "/api/revenues/progress-requests",
    tag = "Receitas",
    request_body = ProposeProgressPayload,
    responses(
        (status = 201, description = "Solicitação de progresso registrada", body = RevenueChangeRequest),
        (status = 400, description = "Valor atingido negativo"),
        (status = 404, description = "Receita ou usuário não encontrado")
    )
)]
pub async fn propose_progress(
    State(app_state): State<AppState>,
    Json(payload): Json<ProposeProgressPayload>,
) -> Result<impl IntoResponse, AppError> {
    let request = app_state.revenue_service.propose(payload).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

// GET /api/revenues/progress-requests
#[utoipa::path(
    get,
    path = "/api/revenues/progress-requests",
    tag = "Receitas",
    responses(
        (status = 200, description = "Solicitações pendentes, mais recentes primeiro", body = Vec<RevenueChangeRequest>)
    )
)]
pub async fn list_progress_requests(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let requests = app_state.revenue_service.list_requests().await;
    Ok((StatusCode::OK, Json(requests)))
}

// PUT /api/revenues/branch
//
// Decide uma solicitação pendente. O aceite devolve a campanha atualizada;
// a rejeição só descarta a solicitação.
#[utoipa::path(
    put,
    path = "/api/revenues/branch",
    tag = "Receitas",
    request_body = ResolveProgressPayload,
    responses(
        (status = 200, description = "Decisão aplicada", body = Revenue),
        (status = 400, description = "Status desconhecido ou valores negativos"),
        (status = 404, description = "Receita não encontrada ou filial fora da campanha")
    )
)]
pub async fn resolve_progress(
    State(app_state): State<AppState>,
    Json(payload): Json<ResolveProgressPayload>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = app_state.revenue_service.resolve(payload).await?;
    match outcome {
        Resolution::Applied(revenue) => Ok((StatusCode::OK, Json(revenue)).into_response()),
        Resolution::Rejected => Ok((
            StatusCode::OK,
            Json(json!({ "message": "Solicitação rejeitada e descartada." })),
        )
            .into_response()),
    }
}
