// src/models/kpi.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- Enums ---

// O tipo do KPI decide qual par de campos da tarefa entra nas agregações:
// Metric usa os valores monetários, Percentage usa os percentuais.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum KpiKind {
    Metric,
    Percentage,
}

impl KpiKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            KpiKind::Metric => "Metric",
            KpiKind::Percentage => "Percentage",
        }
    }
}

// --- Structs ---

// O par (name, branch) é único; o repositório garante isso na criação.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "Vendas Mensais")]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: KpiKind,
    pub branch: Uuid,
    #[schema(example = 0.10)]
    pub weight_value: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Snapshot do KPI embutido na tarefa no momento da atribuição.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KpiRef {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: KpiKind,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateKpiPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Vendas Mensais")]
    pub name: String,

    #[serde(rename = "type")]
    pub kind: KpiKind,

    pub branch_id: Uuid,

    #[schema(example = 0.10)]
    pub weight_value: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateKpiPayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub kind: Option<KpiKind>,

    pub weight_value: Option<Decimal>,
}
