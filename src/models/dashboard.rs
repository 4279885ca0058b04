// src/models/dashboard.rs

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::kpi::KpiKind;
use crate::models::org::User;
use crate::models::task::Task;

// Todos os agrupamentos usam BTreeMap: a acumulação é associativa (a ordem
// de entrada das tarefas não muda nenhum total) e a saída fica determinística.

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BranchStageBucket {
    pub total: u64,
    pub stages: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotalsByBranch {
    pub by_branch: BTreeMap<String, u64>,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TasksOverview {
    pub by_branch: BTreeMap<String, BranchStageBucket>,
    // Total por etapa somado entre todas as filiais.
    pub total: BTreeMap<String, u64>,
}

// Entrada do histograma de prioridades ({name, total}).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriorityCount {
    #[schema(example = "high")]
    pub name: String,
    pub total: u64,
}

// Célula de desempenho por (departamento, KPI).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentKpiCell {
    pub name: String,
    pub completed: u64,
    pub overdue: u64,
    pub in_progress: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummaryEntry {
    pub name: String,
    pub total_monetary_value: Decimal,
    pub completed_monetary_value: Decimal,
    pub revenue_target: Decimal,
    pub revenue_achieved: Decimal,
    pub total_percentage_value: Decimal,
    pub completed_percentage_value: Decimal,
    pub percentage_revenue_target: Decimal,
    pub percentage_revenue_achieved: Decimal,
    pub branch: String,
    #[serde(rename = "type")]
    pub kind: KpiKind,
}

impl KpiSummaryEntry {
    pub fn new(name: String, branch: String, kind: KpiKind) -> Self {
        Self {
            name,
            total_monetary_value: Decimal::ZERO,
            completed_monetary_value: Decimal::ZERO,
            revenue_target: Decimal::ZERO,
            revenue_achieved: Decimal::ZERO,
            total_percentage_value: Decimal::ZERO,
            completed_percentage_value: Decimal::ZERO,
            percentage_revenue_target: Decimal::ZERO,
            percentage_revenue_achieved: Decimal::ZERO,
            branch,
            kind,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BranchSummaryEntry {
    pub total_monetary_value: Decimal,
    pub completed_monetary_value: Decimal,
    pub revenue_target: Decimal,
    pub revenue_achieved: Decimal,
    pub total_percentage_value: Decimal,
    pub completed_percentage_value: Decimal,
    pub percentage_revenue_target: Decimal,
    pub percentage_revenue_achieved: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverallMonetaryTotals {
    pub total_monetary_value: Decimal,
    pub completed_monetary_value: Decimal,
    pub revenue_target: Decimal,
    pub revenue_achieved: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverallPercentageTotals {
    pub total_percentage_value: Decimal,
    pub completed_percentage_value: Decimal,
    pub percentage_revenue_target: Decimal,
    pub percentage_revenue_achieved: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_tasks: TotalsByBranch,
    pub total_overdue_tasks: TotalsByBranch,
    pub last_10_task: Vec<Task>,
    // Preenchido só na visão elevada.
    pub users: Vec<User>,
    pub tasks: TasksOverview,
    pub graph_data: Vec<PriorityCount>,
    pub department_performance: BTreeMap<String, BTreeMap<String, DepartmentKpiCell>>,
    pub kpi_summary: BTreeMap<String, KpiSummaryEntry>,
    pub branch_summary: BTreeMap<String, BranchSummaryEntry>,
    pub overall_monetary_totals: OverallMonetaryTotals,
    pub overall_percentage_totals: OverallPercentageTotals,
}

// --- Gráficos por departamento ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentMetrics {
    pub monetary_value: Decimal,
    pub monetary_value_achieved: Decimal,
    pub percent_value: Decimal,
    pub percent_value_achieved: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentMetricsEntry {
    pub department: String,
    pub metrics: DepartmentMetrics,
}

// Visão KPI → departamentos; métricas percentuais saem como MÉDIA por
// contagem de tarefas do par.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KpiDepartmentBreakdown {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: KpiKind,
    pub departments: Vec<DepartmentMetricsEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KpiTotals {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: KpiKind,
    pub monetary_value: Decimal,
    pub monetary_value_achieved: Decimal,
    pub percent_value: Decimal,
    pub percent_value_achieved: Decimal,
}

// Visão departamento → KPIs; aqui os valores ficam como SOMA bruta, sem
// média. A assimetria com KpiDepartmentBreakdown é comportamento herdado
// e está pendente de esclarecimento com o produto.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentKpiBreakdown {
    pub department: String,
    pub branch: Uuid,
    pub kpis: Vec<KpiTotals>,
}
