// src/models/revenue.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::error::AppError;

// --- Structs ---

// Histórico append-only: entradas passadas nunca são editadas ou removidas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AchievedHistoryEntry {
    pub value: Decimal,
    pub date: DateTime<Utc>,
}

// Fatia de uma campanha de receita atribuída a uma filial. Só o fluxo de
// aprovação pode mexer em `target`/`achieved`, nunca uma escrita direta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TargetBranch {
    pub branch_id: Uuid,
    pub target: Decimal,
    pub achieved: Decimal,
    pub achieved_history: Vec<AchievedHistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Revenue {
    pub id: Uuid,
    #[schema(example = "Meta Anual 2026")]
    pub revenue_name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_target: Decimal,
    pub target_branches: Vec<TargetBranch>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Proposta pendente de atualização de `achieved`. Vive até a primeira
// decisão e é apagada nos dois desfechos; não existe estado terminal
// persistido de aceite ou rejeição.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenueChangeRequest {
    pub id: Uuid,
    // Nome de exibição de quem solicitou, capturado na proposta.
    pub name: String,
    pub target_name: String,
    pub user_id: Uuid,
    pub revenue_id: Uuid,
    pub branch_id: Uuid,
    pub achieved: Decimal,
    pub created_at: DateTime<Utc>,
}

// --- Enums ---

// O status chega como texto livre do cliente; qualquer valor fora dos dois
// conhecidos vira `InvalidStatus` em vez de erro de desserialização.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionStatus {
    Accepted,
    Rejected,
}

impl DecisionStatus {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "accepted" => Ok(DecisionStatus::Accepted),
            "rejected" => Ok(DecisionStatus::Rejected),
            other => Err(AppError::InvalidStatus(other.to_owned())),
        }
    }
}

// --- Payloads ---

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TargetBranchPayload {
    pub id: Uuid,
    pub target: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRevenuePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Meta Anual 2026")]
    pub revenue_name: String,

    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_target: Decimal,
    pub target_branches: Vec<TargetBranchPayload>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProposeProgressPayload {
    pub revenue_id: Uuid,
    pub branch_id: Uuid,
    pub user_id: Uuid,
    pub achieved: Decimal,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolveProgressPayload {
    pub request_id: Uuid,
    pub revenue_id: Uuid,
    pub branch_id: Uuid,
    #[schema(example = "accepted")]
    pub status: String,
    pub target: Option<Decimal>,
    pub achieved: Option<Decimal>,
}
