// src/handlers/performance.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::performance::{Evaluation, EvaluatePayload, PerformanceReport},
};

// GET /api/performance/{userId}
#[utoipa::path(
    get,
    path = "/api/performance/{userId}",
    tag = "Desempenho",
    params(("userId" = Uuid, Path, description = "ID do usuário avaliado")),
    responses(
        (status = 200, description = "Relatório de desempenho (ou aviso de que não há tarefas)", body = PerformanceReport),
        (status = 404, description = "Usuário não encontrado")
    )
)]
pub async fn evaluate_user(
    State(app_state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = app_state.performance_service.evaluate(user_id).await?;
    Ok(evaluation_response(outcome))
}

// POST /api/performance/evaluate
#[utoipa::path(
    post,
    path = "/api/performance/evaluate",
    tag = "Desempenho",
    request_body = EvaluatePayload,
    responses(
        (status = 200, description = "Relatório de desempenho (ou aviso de que não há tarefas)", body = PerformanceReport),
        (status = 404, description = "Usuário não encontrado")
    )
)]
pub async fn evaluate(
    State(app_state): State<AppState>,
    Json(payload): Json<EvaluatePayload>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = app_state
        .performance_service
        .evaluate(payload.user_id)
        .await?;
    Ok(evaluation_response(outcome))
}

// O desfecho sem tarefas sai com o marcador `noTasks` para o chamador
// distinguir do relatório pela estrutura, não pela mensagem.
fn evaluation_response(outcome: Evaluation) -> impl IntoResponse {
    match outcome {
        Evaluation::Report(report) => (StatusCode::OK, Json(report)).into_response(),
        Evaluation::NoTasksAssigned => (
            StatusCode::OK,
            Json(json!({
                "noTasks": true,
                "message": "Nenhuma tarefa atribuída a este usuário.",
            })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    #[tokio::test]
    async fn no_tasks_outcome_carries_structural_marker() {
        let response = evaluation_response(Evaluation::NoTasksAssigned).into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["noTasks"], Value::Bool(true));
        assert!(body["message"].is_string());
    }
}
