// src/models/performance.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::task::{Priority, Stage};

// Nota por tarefa. Para KPI Metric é o percentual atingido com duas casas;
// para KPI Percentage o motor emite só o marcador "x" (decisão de produto
// herdada: a conta numérica fica no campo `percentage`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TaskRating {
    NotApplicable,
    Placeholder,
    Value(Decimal),
}

impl Serialize for TaskRating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TaskRating::NotApplicable => serializer.serialize_str("N/A"),
            TaskRating::Placeholder => serializer.serialize_str("x"),
            TaskRating::Value(v) => serializer.serialize_str(&format!("{:.2}", v)),
        }
    }
}

// Contribuição percentual (meta ÷ atingido). Os dois zeros têm formas
// distintas no fio — "0" texto quando meta e atingido zeram, 0 numérico
// quando só o atingido é zero — e os clientes dependem dessa distinção.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PercentContribution {
    NotApplicable,
    ZeroText,
    ZeroNumber,
    Value(Decimal),
}

impl Serialize for PercentContribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PercentContribution::NotApplicable => serializer.serialize_str("N/A"),
            PercentContribution::ZeroText => serializer.serialize_str("0"),
            PercentContribution::ZeroNumber => serializer.serialize_i32(0),
            PercentContribution::Value(v) => serializer.serialize_str(&format!("{:.2}", v)),
        }
    }
}

// Contagem de tarefas por etapa. `started` permanece no formato por
// compatibilidade de contrato, mas nenhuma etapa atual o alimenta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StageCounts {
    pub completed: u64,
    pub in_progress: u64,
    pub started: u64,
    pub todo: u64,
    pub overdue: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskEvaluation {
    pub id: Uuid,
    pub name: String,
    #[schema(example = "Vendas Mensais")]
    pub kpi_name: String,
    #[schema(example = "Metric")]
    pub kpi_type: String,
    pub created_at: DateTime<Utc>,
    pub stage: Stage,
    pub priority: Priority,
    pub kpi_weight: Decimal,
    #[schema(value_type = String, example = "25.00")]
    pub rating: TaskRating,
    #[schema(value_type = String, example = "1.25")]
    pub percentage: PercentContribution,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub user: String,
    pub overall_rating: Decimal,
    pub status_counts: StageCounts,
    pub total_tasks: u64,
    pub tasks: Vec<TaskEvaluation>,
    pub total_rating: Decimal,
    pub total_percentage: Decimal,
}

// Resultado brando: usuário sem tarefas não é falha, o chamador recebe um
// aviso em vez de erro.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Report(PerformanceReport),
    NoTasksAssigned,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatePayload {
    pub user_id: Uuid,
}
