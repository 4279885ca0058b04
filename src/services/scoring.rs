// src/services/scoring.rs
//
// Motor de pontuação: funções puras que convertem uma tarefa (e o peso do
// seu KPI) em contribuição numérica e nota de exibição. Nenhuma consulta,
// nenhum efeito colateral.

use rust_decimal::Decimal;

use crate::models::kpi::KpiKind;
use crate::models::performance::{PercentContribution, TaskRating};
use crate::models::task::{Priority, Stage, Task};

pub fn status_score(stage: Stage) -> Decimal {
    match stage {
        Stage::Completed => Decimal::ONE,
        Stage::InProgress => Decimal::new(5, 1),
        Stage::Todo => Decimal::ZERO,
        Stage::Overdue => -Decimal::ONE,
    }
}

pub fn priority_multiplier(priority: Priority) -> Decimal {
    match priority {
        Priority::High => Decimal::from(5),
        Priority::Medium => Decimal::TWO,
        Priority::Low => Decimal::ONE,
    }
}

// Contribuição da tarefa: score da etapa × multiplicador de prioridade ×
// (1 + peso do KPI). Sem KPI o peso é zero; a ausência nunca é erro.
pub fn task_contribution(task: &Task, kpi_weight: Decimal) -> Decimal {
    status_score(task.stage) * priority_multiplier(task.priority) * (Decimal::ONE + kpi_weight)
}

// Nota de exibição. KPI Metric: atingido ÷ meta × 100 (duas casas), só com
// os dois valores presentes; divisão impossível degrada para N/A. KPI
// Percentage: sai o marcador "x" — a conta numérica fica em
// `task_percentage_contribution`.
pub fn task_rating(task: &Task) -> TaskRating {
    match task.kpi.as_ref().map(|k| k.kind) {
        Some(KpiKind::Metric) => match (task.monetary_value, task.monetary_value_achieved) {
            (Some(target), Some(achieved)) => achieved
                .checked_div(target)
                .map(|ratio| TaskRating::Value((ratio * Decimal::ONE_HUNDRED).round_dp(2)))
                .unwrap_or(TaskRating::NotApplicable),
            _ => TaskRating::NotApplicable,
        },
        Some(KpiKind::Percentage) => TaskRating::Placeholder,
        None => TaskRating::NotApplicable,
    }
}

// Contribuição percentual, só para KPI Percentage. A razão é meta ÷
// atingido (nessa direção mesmo; clientes dependem dela). Zeros têm duas
// formas distintas no fio, ver `PercentContribution`.
pub fn task_percentage_contribution(task: &Task) -> PercentContribution {
    match task.kpi.as_ref().map(|k| k.kind) {
        Some(KpiKind::Percentage) => {
            let target = task.percent_value.unwrap_or(Decimal::ZERO);
            let achieved = task.percent_value_achieved.unwrap_or(Decimal::ZERO);
            if target.round_dp(2).is_zero() && achieved.round_dp(2).is_zero() {
                PercentContribution::ZeroText
            } else if !achieved.is_zero() {
                match target.checked_div(achieved) {
                    Some(ratio) => PercentContribution::Value(ratio.round_dp(2)),
                    None => PercentContribution::ZeroNumber,
                }
            } else {
                PercentContribution::ZeroNumber
            }
        }
        _ => PercentContribution::NotApplicable,
    }
}
