// src/handlers/dashboard.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::dashboard::{DashboardSummary, DepartmentKpiBreakdown, KpiDepartmentBreakdown},
    services::DashboardScope,
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    pub user_id: Option<Uuid>,
    // Visão elevada (admin) enxerga o conjunto inteiro e a lista de
    // usuários; sem ela o userId é obrigatório.
    #[serde(default)]
    pub is_admin: bool,
}

// GET /api/tasks/dashboard
#[utoipa::path(
    get,
    path = "/api/tasks/dashboard",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Resumo consolidado do dashboard", body = DashboardSummary),
        (status = 400, description = "userId ausente sem visão elevada")
    )
)]
pub async fn get_dashboard_summary(
    State(app_state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state
        .dashboard_service
        .summary(DashboardScope {
            user_id: query.user_id,
            is_elevated: query.is_admin,
        })
        .await?;
    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/tasks/department-graph
#[utoipa::path(
    get,
    path = "/api/tasks/department-graph",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Agregado KPI → departamentos (percentuais em média)", body = Vec<KpiDepartmentBreakdown>)
    )
)]
pub async fn get_department_graph(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let graph = app_state.dashboard_service.department_graph().await?;
    Ok((StatusCode::OK, Json(graph)))
}

// GET /api/tasks/individual-department-graph
#[utoipa::path(
    get,
    path = "/api/tasks/individual-department-graph",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Agregado departamento → KPIs (somas brutas)", body = Vec<DepartmentKpiBreakdown>)
    )
)]
pub async fn get_individual_department_graph(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let graph = app_state
        .dashboard_service
        .individual_department_graph()
        .await?;
    Ok((StatusCode::OK, Json(graph)))
}
