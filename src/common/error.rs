use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Tarefa não encontrada")]
    TaskNotFound,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("KPI não encontrado")]
    KpiNotFound,

    #[error("Filial não encontrada")]
    BranchNotFound,

    #[error("Receita não encontrada")]
    RevenueNotFound,

    #[error("Solicitação não encontrada")]
    RequestNotFound,

    // A filial existe, mas não participa da campanha de receita informada.
    #[error("Filial não faz parte da receita")]
    BranchNotInRevenue,

    #[error("Status inválido: {0}")]
    InvalidStatus(String),

    #[error("Entrada inválida: {0}")]
    InvalidInput(String),

    #[error("KPI já existe")]
    KpiAlreadyExists,

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::TaskNotFound => (StatusCode::NOT_FOUND, "Tarefa não encontrada.".to_owned()),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "Usuário não encontrado.".to_owned()),
            AppError::KpiNotFound => (StatusCode::NOT_FOUND, "KPI não encontrado.".to_owned()),
            AppError::BranchNotFound => (StatusCode::NOT_FOUND, "Filial não encontrada.".to_owned()),
            AppError::RevenueNotFound => {
                (StatusCode::NOT_FOUND, "Receita não encontrada.".to_owned())
            }
            AppError::RequestNotFound => {
                (StatusCode::NOT_FOUND, "Solicitação não encontrada.".to_owned())
            }
            AppError::BranchNotInRevenue => (
                StatusCode::NOT_FOUND,
                "A filial não faz parte desta receita.".to_owned(),
            ),
            AppError::InvalidStatus(s) => {
                (StatusCode::BAD_REQUEST, format!("Status inválido: {s}."))
            }
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::KpiAlreadyExists => (
                StatusCode::CONFLICT,
                "Já existe um KPI com este nome na filial.".to_owned(),
            ),

            // Erros internos viram 500; o `tracing` loga a mensagem
            // detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_owned(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
