// src/services/dashboard_service.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{OrgRepository, TaskRepository},
    models::dashboard::{
        BranchStageBucket, BranchSummaryEntry, DashboardSummary, DepartmentKpiBreakdown,
        DepartmentKpiCell, DepartmentMetrics, DepartmentMetricsEntry, KpiDepartmentBreakdown,
        KpiSummaryEntry, KpiTotals, OverallMonetaryTotals, OverallPercentageTotals, PriorityCount,
        TasksOverview, TotalsByBranch,
    },
    models::kpi::{Kpi, KpiKind},
    models::task::{Stage, Task},
};

// Escopo da consulta: sem visão elevada o conjunto fica restrito às
// tarefas do próprio usuário.
#[derive(Debug, Clone, Copy)]
pub struct DashboardScope {
    pub user_id: Option<Uuid>,
    pub is_elevated: bool,
}

const UNCATEGORIZED_KEY: &str = "uncategorized";
const UNCATEGORIZED_NAME: &str = "Uncategorized";
const UNSPECIFIED_BRANCH: &str = "Unspecified";

#[derive(Clone)]
pub struct DashboardService {
    tasks: TaskRepository,
    org: OrgRepository,
}

impl DashboardService {
    pub fn new(tasks: TaskRepository, org: OrgRepository) -> Self {
        Self { tasks, org }
    }

    // Todas as dobras abaixo são associativas: qualquer ordem de iteração
    // das tarefas produz os mesmos totais.
    pub async fn summary(&self, scope: DashboardScope) -> Result<DashboardSummary, AppError> {
        let tasks = if scope.is_elevated {
            self.tasks.find_active().await
        } else {
            let user_id = scope.user_id.ok_or_else(|| {
                AppError::InvalidInput("userId é obrigatório sem visão elevada.".to_owned())
            })?;
            self.tasks.find_active_for_user(user_id).await
        };

        let users = self.org.users_by_id().await;
        let kpis = self.org.kpis_by_id().await;
        let now = Utc::now();

        // --- Tarefas por filial e etapa ---
        let mut by_branch: BTreeMap<String, BranchStageBucket> = BTreeMap::new();
        for task in &tasks {
            let bucket = by_branch.entry(branch_label(task)).or_default();
            bucket.total += 1;
            *bucket
                .stages
                .entry(task.stage.as_str().to_owned())
                .or_insert(0) += 1;
        }

        let total_by_branch: BTreeMap<String, u64> = by_branch
            .iter()
            .map(|(branch, bucket)| (branch.clone(), bucket.total))
            .collect();

        let mut stage_totals: BTreeMap<String, u64> = BTreeMap::new();
        for bucket in by_branch.values() {
            for (stage, count) in &bucket.stages {
                *stage_totals.entry(stage.clone()).or_insert(0) += count;
            }
        }

        // --- Atrasadas por filial (sinal de relatório, nada é persistido) ---
        let mut overdue_by_branch: BTreeMap<String, u64> = BTreeMap::new();
        for task in &tasks {
            if is_overdue_for_report(task, now) {
                *overdue_by_branch.entry(branch_label(task)).or_insert(0) += 1;
            }
        }
        let total_overdue: u64 = overdue_by_branch.values().sum();

        // --- Histograma de prioridades ---
        let mut priorities: BTreeMap<String, u64> = BTreeMap::new();
        for task in &tasks {
            *priorities
                .entry(task.priority.as_str().to_owned())
                .or_insert(0) += 1;
        }
        let graph_data = priorities
            .into_iter()
            .map(|(name, total)| PriorityCount { name, total })
            .collect();

        // --- Desempenho por departamento (via time de cada tarefa) ---
        let mut department_performance: BTreeMap<String, BTreeMap<String, DepartmentKpiCell>> =
            BTreeMap::new();
        for task in &tasks {
            let (kpi_key, kpi_name, _) = kpi_identity(task, &kpis);
            for member in &task.team {
                let Some(user) = users.get(member) else {
                    continue;
                };
                if user.department.is_empty() {
                    continue;
                }
                let cell = department_performance
                    .entry(user.department.clone())
                    .or_default()
                    .entry(kpi_key.clone())
                    .or_insert_with(|| DepartmentKpiCell {
                        name: kpi_name.clone(),
                        completed: 0,
                        overdue: 0,
                        in_progress: 0,
                    });
                let status = lowercase_status(task);
                if status.as_deref() == Some("complete") || task.stage == Stage::Completed {
                    cell.completed += 1;
                } else if status.as_deref() == Some("in progress")
                    || task.stage == Stage::InProgress
                {
                    cell.in_progress += 1;
                } else if task.date < now {
                    cell.overdue += 1;
                }
            }
        }

        // --- Resumos por KPI e por filial ---
        let mut kpi_summary: BTreeMap<String, KpiSummaryEntry> = BTreeMap::new();
        let mut branch_summary: BTreeMap<String, BranchSummaryEntry> = BTreeMap::new();
        for task in &tasks {
            let (kpi_key, kpi_name, kind) = kpi_identity(task, &kpis);
            let branch = branch_label(task);

            let entry = kpi_summary
                .entry(kpi_key)
                .or_insert_with(|| KpiSummaryEntry::new(kpi_name, branch.clone(), kind));
            let branch_entry = branch_summary.entry(branch).or_default();

            match kind {
                KpiKind::Metric => {
                    let total = task.monetary_value.unwrap_or(Decimal::ZERO);
                    let achieved = task.monetary_value_achieved.unwrap_or(Decimal::ZERO);
                    entry.total_monetary_value += total;
                    entry.completed_monetary_value += achieved;
                    branch_entry.total_monetary_value += total;
                    branch_entry.completed_monetary_value += achieved;
                }
                KpiKind::Percentage => {
                    let total = task.percent_value.unwrap_or(Decimal::ZERO);
                    let achieved = task.percent_value_achieved.unwrap_or(Decimal::ZERO);
                    entry.total_percentage_value += total;
                    entry.completed_percentage_value += achieved;
                    branch_entry.total_percentage_value += total;
                    branch_entry.completed_percentage_value += achieved;
                }
            }
        }

        // Derivação alvo/atingido após a dobra completa.
        for entry in kpi_summary.values_mut() {
            match entry.kind {
                KpiKind::Metric => {
                    entry.revenue_target =
                        entry.total_monetary_value - entry.completed_monetary_value;
                    entry.revenue_achieved = entry.completed_monetary_value;
                }
                KpiKind::Percentage => {
                    entry.percentage_revenue_target =
                        entry.total_percentage_value - entry.completed_percentage_value;
                    entry.percentage_revenue_achieved = entry.completed_percentage_value;
                }
            }
        }
        for entry in branch_summary.values_mut() {
            entry.revenue_target = entry.total_monetary_value - entry.completed_monetary_value;
            entry.revenue_achieved = entry.completed_monetary_value;
            entry.percentage_revenue_target =
                entry.total_percentage_value - entry.completed_percentage_value;
            entry.percentage_revenue_achieved = entry.completed_percentage_value;
        }

        // --- Totais gerais (dobrados do resumo por KPI) ---
        let mut overall_monetary_totals = OverallMonetaryTotals::default();
        let mut overall_percentage_totals = OverallPercentageTotals::default();
        for entry in kpi_summary.values() {
            match entry.kind {
                KpiKind::Metric => {
                    overall_monetary_totals.total_monetary_value += entry.total_monetary_value;
                    overall_monetary_totals.completed_monetary_value +=
                        entry.completed_monetary_value;
                }
                KpiKind::Percentage => {
                    overall_percentage_totals.total_percentage_value +=
                        entry.total_percentage_value;
                    overall_percentage_totals.completed_percentage_value +=
                        entry.completed_percentage_value;
                }
            }
        }
        overall_monetary_totals.revenue_target = overall_monetary_totals.total_monetary_value
            - overall_monetary_totals.completed_monetary_value;
        overall_monetary_totals.revenue_achieved = overall_monetary_totals.completed_monetary_value;
        overall_percentage_totals.percentage_revenue_target =
            overall_percentage_totals.total_percentage_value
                - overall_percentage_totals.completed_percentage_value;
        overall_percentage_totals.percentage_revenue_achieved =
            overall_percentage_totals.completed_percentage_value;

        let users_list = if scope.is_elevated {
            self.org.recent_active_users(10).await
        } else {
            Vec::new()
        };

        Ok(DashboardSummary {
            total_tasks: TotalsByBranch {
                by_branch: total_by_branch,
                total: tasks.len() as u64,
            },
            total_overdue_tasks: TotalsByBranch {
                by_branch: overdue_by_branch,
                total: total_overdue,
            },
            last_10_task: tasks.iter().take(10).cloned().collect(),
            users: users_list,
            tasks: TasksOverview {
                by_branch,
                total: stage_totals,
            },
            graph_data,
            department_performance,
            kpi_summary,
            branch_summary,
            overall_monetary_totals,
            overall_percentage_totals,
        })
    }

    // KPI → departamentos, com métricas percentuais em MÉDIA por tarefa.
    pub async fn department_graph(&self) -> Result<Vec<KpiDepartmentBreakdown>, AppError> {
        let tasks = self.tasks.find_active_with_kpi().await;
        let kpis = self.org.kpis_by_id().await;

        struct Accum {
            metrics: DepartmentMetrics,
            task_count: u64,
        }
        struct Group {
            name: String,
            kind: KpiKind,
            departments: BTreeMap<String, Accum>,
        }

        let mut groups: BTreeMap<Uuid, Group> = BTreeMap::new();
        for task in &tasks {
            if task.team.is_empty() || task.department.is_empty() {
                continue;
            }
            let Some(kpi_ref) = &task.kpi else { continue };
            let Some(kpi) = kpis.get(&kpi_ref.id) else {
                continue;
            };

            let group = groups.entry(kpi.id).or_insert_with(|| Group {
                name: kpi.name.clone(),
                kind: kpi.kind,
                departments: BTreeMap::new(),
            });
            let accum = group
                .departments
                .entry(task.department.clone())
                .or_insert_with(|| Accum {
                    metrics: DepartmentMetrics::default(),
                    task_count: 0,
                });
            accum.task_count += 1;
            match group.kind {
                KpiKind::Metric => {
                    accum.metrics.monetary_value += task.monetary_value.unwrap_or(Decimal::ZERO);
                    accum.metrics.monetary_value_achieved +=
                        task.monetary_value_achieved.unwrap_or(Decimal::ZERO);
                }
                KpiKind::Percentage => {
                    accum.metrics.percent_value += task.percent_value.unwrap_or(Decimal::ZERO);
                    accum.metrics.percent_value_achieved +=
                        task.percent_value_achieved.unwrap_or(Decimal::ZERO);
                }
            }
        }

        let breakdowns = groups
            .into_iter()
            .map(|(id, group)| {
                let kind = group.kind;
                KpiDepartmentBreakdown {
                    id,
                    name: group.name,
                    kind,
                    departments: group
                        .departments
                        .into_iter()
                        .map(|(department, mut accum)| {
                            if kind == KpiKind::Percentage && accum.task_count > 0 {
                                let count = Decimal::from(accum.task_count);
                                accum.metrics.percent_value /= count;
                                accum.metrics.percent_value_achieved /= count;
                            }
                            DepartmentMetricsEntry {
                                department,
                                metrics: accum.metrics,
                            }
                        })
                        .collect(),
                }
            })
            .collect();

        Ok(breakdowns)
    }

    // Departamento → KPIs, com somas brutas (sem média) e incluindo
    // departamentos sem nenhuma tarefa.
    pub async fn individual_department_graph(
        &self,
    ) -> Result<Vec<DepartmentKpiBreakdown>, AppError> {
        let departments = self.org.list_departments().await;
        let tasks = self.tasks.find_active_with_kpi().await;
        let kpis = self.org.kpis_by_id().await;

        let mut by_department: BTreeMap<String, BTreeMap<Uuid, KpiTotals>> = BTreeMap::new();
        for task in &tasks {
            let Some(kpi_ref) = &task.kpi else { continue };
            let Some(kpi) = kpis.get(&kpi_ref.id) else {
                continue;
            };
            let entry = by_department
                .entry(task.department.clone())
                .or_default()
                .entry(kpi.id)
                .or_insert_with(|| KpiTotals {
                    id: kpi.id,
                    name: kpi.name.clone(),
                    kind: kpi.kind,
                    monetary_value: Decimal::ZERO,
                    monetary_value_achieved: Decimal::ZERO,
                    percent_value: Decimal::ZERO,
                    percent_value_achieved: Decimal::ZERO,
                });
            match kpi.kind {
                KpiKind::Metric => {
                    entry.monetary_value += task.monetary_value.unwrap_or(Decimal::ZERO);
                    entry.monetary_value_achieved +=
                        task.monetary_value_achieved.unwrap_or(Decimal::ZERO);
                }
                KpiKind::Percentage => {
                    entry.percent_value += task.percent_value.unwrap_or(Decimal::ZERO);
                    entry.percent_value_achieved +=
                        task.percent_value_achieved.unwrap_or(Decimal::ZERO);
                }
            }
        }

        let result = departments
            .into_iter()
            .map(|department| DepartmentKpiBreakdown {
                kpis: by_department
                    .get(&department.name)
                    .map(|entries| entries.values().cloned().collect())
                    .unwrap_or_default(),
                department: department.name,
                branch: department.branch,
            })
            .collect();

        Ok(result)
    }
}

fn branch_label(task: &Task) -> String {
    if task.branch.is_empty() {
        UNSPECIFIED_BRANCH.to_owned()
    } else {
        task.branch.clone()
    }
}

fn lowercase_status(task: &Task) -> Option<String> {
    task.status.as_deref().map(str::to_lowercase)
}

// Sinal de atraso usado só nos relatórios: rótulo livre diferente de
// "complete", etapa não concluída e vencimento estritamente no passado.
fn is_overdue_for_report(task: &Task, now: DateTime<Utc>) -> bool {
    lowercase_status(task).as_deref() != Some("complete")
        && task.stage != Stage::Completed
        && task.date < now
}

// Identidade do KPI para os resumos: tarefas sem KPI (ou com cadastro já
// removido) caem no balde "uncategorized" e contam como Metric.
fn kpi_identity(
    task: &Task,
    kpis: &std::collections::HashMap<Uuid, Kpi>,
) -> (String, String, KpiKind) {
    match task.kpi.as_ref().and_then(|r| kpis.get(&r.id)) {
        Some(kpi) => (kpi.id.to_string(), kpi.name.clone(), kpi.kind),
        None => (
            UNCATEGORIZED_KEY.to_owned(),
            UNCATEGORIZED_NAME.to_owned(),
            KpiKind::Metric,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::db::store::Db;
    use crate::models::kpi::KpiRef;
    use crate::models::org::{Department, User};
    use crate::models::task::Priority;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn service(db: &Db) -> DashboardService {
        DashboardService::new(
            TaskRepository::new(db.clone()),
            OrgRepository::new(db.clone()),
        )
    }

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, day, 12, 0, 0).unwrap()
    }

    fn task(branch: &str, department: &str, stage: Stage, priority: Priority) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: "Tarefa".into(),
            description: "—".into(),
            branch: branch.to_owned(),
            department: department.to_owned(),
            date: at(10),
            priority,
            stage,
            status: None,
            activities: vec![],
            team: vec![],
            is_trashed: false,
            monetary_value: None,
            monetary_value_achieved: None,
            percent_value: None,
            percent_value_achieved: None,
            kpi: None,
            created_at: at(1),
            updated_at: at(1),
        }
    }

    async fn seed_kpi(db: &Db, name: &str, kind: KpiKind) -> Kpi {
        let kpi = Kpi {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            kind,
            branch: Uuid::new_v4(),
            weight_value: dec("0.10"),
            created_at: at(1),
            updated_at: at(1),
        };
        db.kpis.save(kpi.id, kpi.clone()).await;
        kpi
    }

    fn kpi_ref(kpi: &Kpi) -> KpiRef {
        KpiRef {
            id: kpi.id,
            name: kpi.name.clone(),
            kind: kpi.kind,
        }
    }

    const ELEVATED: DashboardScope = DashboardScope {
        user_id: None,
        is_elevated: true,
    };

    #[tokio::test]
    async fn totals_are_order_independent() {
        let metric = Kpi {
            id: Uuid::new_v4(),
            name: "Vendas".into(),
            kind: KpiKind::Metric,
            branch: Uuid::new_v4(),
            weight_value: dec("0.10"),
            created_at: at(1),
            updated_at: at(1),
        };

        let mut tasks = Vec::new();
        for day in 1..=6u32 {
            let mut t = task("Filial Centro", "Comercial", Stage::Completed, Priority::High);
            t.created_at = at(day);
            t.monetary_value = Some(dec("100"));
            t.monetary_value_achieved = Some(dec("40"));
            t.kpi = Some(kpi_ref(&metric));
            tasks.push(t);
        }

        let forward = Db::new();
        forward.kpis.save(metric.id, metric.clone()).await;
        for t in &tasks {
            forward.tasks.save(t.id, t.clone()).await;
        }

        let reversed = Db::new();
        reversed.kpis.save(metric.id, metric.clone()).await;
        for t in tasks.iter().rev() {
            reversed.tasks.save(t.id, t.clone()).await;
        }

        let a = service(&forward).summary(ELEVATED).await.unwrap();
        let b = service(&reversed).summary(ELEVATED).await.unwrap();
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
    }

    #[tokio::test]
    async fn branch_buckets_and_overdue_signal() {
        let db = Db::new();

        // Vencida ontem, sem rótulo "complete": conta como atrasada.
        let mut overdue = task("", "Comercial", Stage::InProgress, Priority::Low);
        overdue.date = Utc::now() - chrono::Duration::days(1);
        db.tasks.save(overdue.id, overdue).await;

        // Vencida mas concluída pela etapa: fora do sinal de atraso.
        let mut done = task("Filial Centro", "Comercial", Stage::Completed, Priority::High);
        done.date = Utc::now() - chrono::Duration::days(1);
        db.tasks.save(done.id, done).await;

        // Vencida mas com rótulo livre "Complete": fora do sinal.
        let mut labeled = task("Filial Centro", "Comercial", Stage::InProgress, Priority::Medium);
        labeled.date = Utc::now() - chrono::Duration::days(1);
        labeled.status = Some("Complete".into());
        db.tasks.save(labeled.id, labeled).await;

        let summary = service(&db).summary(ELEVATED).await.unwrap();

        assert_eq!(summary.total_tasks.total, 3);
        assert_eq!(summary.total_tasks.by_branch["Unspecified"], 1);
        assert_eq!(summary.total_tasks.by_branch["Filial Centro"], 2);
        assert_eq!(summary.total_overdue_tasks.total, 1);
        assert_eq!(summary.total_overdue_tasks.by_branch["Unspecified"], 1);
        assert_eq!(
            summary.tasks.by_branch["Filial Centro"].stages["completed"],
            1
        );
        assert_eq!(summary.tasks.total["in progress"], 2);

        let high = summary
            .graph_data
            .iter()
            .find(|p| p.name == "high")
            .unwrap();
        assert_eq!(high.total, 1);
    }

    #[tokio::test]
    async fn summaries_split_by_kpi_kind_and_derive_targets() {
        let db = Db::new();
        let metric = seed_kpi(&db, "Vendas", KpiKind::Metric).await;
        let percent = seed_kpi(&db, "Cobertura", KpiKind::Percentage).await;

        let mut t1 = task("Filial Centro", "Comercial", Stage::Completed, Priority::High);
        t1.kpi = Some(kpi_ref(&metric));
        t1.monetary_value = Some(dec("1000"));
        t1.monetary_value_achieved = Some(dec("400"));
        db.tasks.save(t1.id, t1).await;

        let mut t2 = task("Filial Centro", "Comercial", Stage::InProgress, Priority::Low);
        t2.kpi = Some(kpi_ref(&percent));
        t2.percent_value = Some(dec("80"));
        t2.percent_value_achieved = Some(dec("20"));
        db.tasks.save(t2.id, t2).await;

        // Sem KPI: balde "uncategorized", tratado como Metric.
        let mut t3 = task("Filial Norte", "Comercial", Stage::Todo, Priority::Medium);
        t3.monetary_value = Some(dec("500"));
        db.tasks.save(t3.id, t3).await;

        let summary = service(&db).summary(ELEVATED).await.unwrap();

        let metric_entry = &summary.kpi_summary[&metric.id.to_string()];
        assert_eq!(metric_entry.total_monetary_value, dec("1000"));
        assert_eq!(metric_entry.completed_monetary_value, dec("400"));
        assert_eq!(metric_entry.revenue_target, dec("600"));
        assert_eq!(metric_entry.revenue_achieved, dec("400"));

        let percent_entry = &summary.kpi_summary[&percent.id.to_string()];
        assert_eq!(percent_entry.total_percentage_value, dec("80"));
        assert_eq!(percent_entry.percentage_revenue_target, dec("60"));

        let uncategorized = &summary.kpi_summary["uncategorized"];
        assert_eq!(uncategorized.total_monetary_value, dec("500"));
        assert_eq!(uncategorized.name, "Uncategorized");

        let centro = &summary.branch_summary["Filial Centro"];
        assert_eq!(centro.total_monetary_value, dec("1000"));
        assert_eq!(centro.revenue_target, dec("600"));
        assert_eq!(centro.total_percentage_value, dec("80"));
        assert_eq!(centro.percentage_revenue_achieved, dec("20"));

        assert_eq!(
            summary.overall_monetary_totals.total_monetary_value,
            dec("1500")
        );
        assert_eq!(summary.overall_monetary_totals.revenue_target, dec("1100"));
        assert_eq!(
            summary.overall_percentage_totals.completed_percentage_value,
            dec("20")
        );
    }

    #[tokio::test]
    async fn department_performance_uses_member_departments() {
        let db = Db::new();
        let user_id = Uuid::new_v4();
        db.users
            .save(
                user_id,
                User {
                    id: user_id,
                    name: "Ana".into(),
                    title: "Analista".into(),
                    department: "Comercial".into(),
                    branch: Uuid::new_v4(),
                    is_admin: false,
                    is_active: true,
                    created_at: at(1),
                },
            )
            .await;

        let mut done = task("Filial Centro", "Comercial", Stage::Completed, Priority::High);
        done.team = vec![user_id];
        db.tasks.save(done.id, done).await;

        let mut late = task("Filial Centro", "Comercial", Stage::Todo, Priority::Low);
        late.team = vec![user_id];
        late.date = Utc::now() - chrono::Duration::days(2);
        db.tasks.save(late.id, late).await;

        let summary = service(&db).summary(ELEVATED).await.unwrap();
        let cell = &summary.department_performance["Comercial"]["uncategorized"];
        assert_eq!(cell.completed, 1);
        assert_eq!(cell.overdue, 1);
        assert_eq!(cell.in_progress, 0);
    }

    #[tokio::test]
    async fn non_elevated_scope_requires_and_respects_user() {
        let db = Db::new();
        let member = Uuid::new_v4();

        let mut mine = task("Filial Centro", "Comercial", Stage::Todo, Priority::Low);
        mine.team = vec![member];
        db.tasks.save(mine.id, mine).await;

        let other = task("Filial Centro", "Comercial", Stage::Todo, Priority::Low);
        db.tasks.save(other.id, other).await;

        let svc = service(&db);
        let err = svc
            .summary(DashboardScope {
                user_id: None,
                is_elevated: false,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        let summary = svc
            .summary(DashboardScope {
                user_id: Some(member),
                is_elevated: false,
            })
            .await
            .unwrap();
        assert_eq!(summary.total_tasks.total, 1);
        assert!(summary.users.is_empty());
    }

    #[tokio::test]
    async fn department_graph_averages_percentages() {
        let db = Db::new();
        let percent = seed_kpi(&db, "Cobertura", KpiKind::Percentage).await;
        let member = Uuid::new_v4();

        // Duas tarefas no mesmo par (KPI, departamento) para distinguir
        // média de soma.
        for (value, achieved) in [("40", "20"), ("60", "40")] {
            let mut t = task("Filial Centro", "Comercial", Stage::InProgress, Priority::Low);
            t.team = vec![member];
            t.kpi = Some(kpi_ref(&percent));
            t.percent_value = Some(dec(value));
            t.percent_value_achieved = Some(dec(achieved));
            db.tasks.save(t.id, t).await;
        }

        let graph = service(&db).department_graph().await.unwrap();
        assert_eq!(graph.len(), 1);
        let entry = &graph[0].departments[0];
        assert_eq!(entry.department, "Comercial");
        assert_eq!(entry.metrics.percent_value, dec("50"));
        assert_eq!(entry.metrics.percent_value_achieved, dec("30"));
    }

    #[tokio::test]
    async fn individual_department_graph_keeps_raw_sums() {
        let db = Db::new();
        let percent = seed_kpi(&db, "Cobertura", KpiKind::Percentage).await;
        for name in ["Comercial", "Jurídico"] {
            // "Jurídico" fica sem tarefas e mesmo assim deve aparecer.
            let id = Uuid::new_v4();
            db.departments
                .save(
                    id,
                    Department {
                        id,
                        name: name.to_owned(),
                        description: None,
                        branch: Uuid::new_v4(),
                        created_at: at(1),
                    },
                )
                .await;
        }

        for (value, achieved) in [("40", "20"), ("60", "40")] {
            let mut t = task("Filial Centro", "Comercial", Stage::InProgress, Priority::Low);
            t.kpi = Some(kpi_ref(&percent));
            t.percent_value = Some(dec(value));
            t.percent_value_achieved = Some(dec(achieved));
            db.tasks.save(t.id, t).await;
        }

        let graph = service(&db).individual_department_graph().await.unwrap();
        assert_eq!(graph.len(), 2);

        let comercial = graph.iter().find(|d| d.department == "Comercial").unwrap();
        assert_eq!(comercial.kpis.len(), 1);
        // Soma bruta, sem divisão pela contagem.
        assert_eq!(comercial.kpis[0].percent_value, dec("100"));
        assert_eq!(comercial.kpis[0].percent_value_achieved, dec("60"));

        let juridico = graph.iter().find(|d| d.department == "Jurídico").unwrap();
        assert!(juridico.kpis.is_empty());
    }
}
