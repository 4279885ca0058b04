// src/models/task.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::kpi::KpiRef;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

// Etapa do ciclo de vida da tarefa. O campo `status` (rótulo livre) é
// independente; para conclusão e atraso a etapa é a fonte de verdade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Stage {
    #[serde(rename = "todo")]
    Todo,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "overdue")]
    Overdue,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Todo => "todo",
            Stage::InProgress => "in progress",
            Stage::Completed => "completed",
            Stage::Overdue => "overdue",
        }
    }
}

// --- Structs ---

// Entrada do log de atividades; o log é append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "type")]
    pub kind: Stage,
    pub text: String,
    pub date: DateTime<Utc>,
    pub by: Uuid,
    pub collected_monetary: Decimal,
    pub collected_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    #[schema(example = "Fechar contrato trimestral")]
    pub title: String,
    pub description: String,
    #[schema(example = "Filial Centro")]
    pub branch: String,
    #[schema(example = "Comercial")]
    pub department: String,
    pub date: DateTime<Utc>,
    pub priority: Priority,
    pub stage: Stage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub activities: Vec<Activity>,
    pub team: Vec<Uuid>,
    pub is_trashed: bool,
    pub monetary_value: Option<Decimal>,
    pub monetary_value_achieved: Option<Decimal>,
    pub percent_value: Option<Decimal>,
    pub percent_value_achieved: Option<Decimal>,
    pub kpi: Option<KpiRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskPayload {
    #[validate(length(min = 1, message = "required"))]
    pub title: String,

    #[validate(length(min = 1, message = "required"))]
    pub description: String,

    #[validate(length(min = 1, message = "required"))]
    pub branch: String,

    #[validate(length(min = 1, message = "required"))]
    pub department: String,

    pub date: DateTime<Utc>,
    pub priority: Priority,
    pub stage: Stage,
    pub status: Option<String>,
    pub team: Vec<Uuid>,
    pub monetary_value: Option<Decimal>,
    pub monetary_value_achieved: Option<Decimal>,
    pub percent_value: Option<Decimal>,
    pub percent_value_achieved: Option<Decimal>,

    // Referência ao KPI; o snapshot embutido é montado a partir do cadastro.
    pub kpi_id: Option<Uuid>,

    // Quem está atribuindo a tarefa (assina a atividade inicial).
    pub created_by: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateTaskPayload {
    pub created_by: Uuid,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskPayload {
    #[validate(length(min = 1, message = "required"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    pub description: Option<String>,

    pub date: Option<DateTime<Utc>>,
    pub priority: Option<Priority>,
    pub stage: Option<Stage>,
    pub status: Option<String>,
    pub team: Option<Vec<Uuid>>,
    pub monetary_value: Option<Decimal>,
    pub monetary_value_achieved: Option<Decimal>,
    pub percent_value: Option<Decimal>,
    pub percent_value_achieved: Option<Decimal>,
    pub kpi_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStagePayload {
    pub stage: Stage,
    // Valores coletados nesta transição; são somados aos acumulados.
    pub monetary_value_achieved: Option<Decimal>,
    pub percent_value_achieved: Option<Decimal>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostActivityPayload {
    #[serde(rename = "type")]
    pub kind: Stage,

    #[validate(length(min = 1, message = "required"))]
    pub activity: String,

    pub by: Uuid,
    pub monetary_value_achieved: Option<Decimal>,
    pub percent_value_achieved: Option<Decimal>,
}
