// src/services/performance_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{OrgRepository, TaskRepository},
    models::kpi::KpiKind,
    models::performance::{
        Evaluation, PercentContribution, PerformanceReport, StageCounts, TaskEvaluation,
        TaskRating,
    },
    models::task::Stage,
    services::scoring,
};

#[derive(Clone)]
pub struct PerformanceService {
    tasks: TaskRepository,
    org: OrgRepository,
}

impl PerformanceService {
    pub fn new(tasks: TaskRepository, org: OrgRepository) -> Self {
        Self { tasks, org }
    }

    // Avaliação de um usuário sobre o snapshot atual das tarefas ativas em
    // que ele participa. Sem tarefas o resultado é brando (NoTasksAssigned);
    // campos numéricos ausentes degradam para zero, nunca abortam.
    pub async fn evaluate(&self, user_id: Uuid) -> Result<Evaluation, AppError> {
        let tasks = self.tasks.find_active_for_user(user_id).await;
        if tasks.is_empty() {
            return Ok(Evaluation::NoTasksAssigned);
        }

        let user = self
            .org
            .find_user(user_id)
            .await
            .ok_or(AppError::UserNotFound)?;

        // O peso vem do cadastro do KPI, não do snapshot embutido na tarefa.
        let kpis = self.org.kpis_by_id().await;
        let weight_of = |task: &crate::models::task::Task| -> Decimal {
            task.kpi
                .as_ref()
                .and_then(|r| kpis.get(&r.id))
                .map(|k| k.weight_value)
                .unwrap_or(Decimal::ZERO)
        };

        tracing::debug!(%user_id, task_count = tasks.len(), "avaliando desempenho");

        let mut status_counts = StageCounts::default();
        for task in &tasks {
            match task.stage {
                Stage::Completed => status_counts.completed += 1,
                Stage::InProgress => status_counts.in_progress += 1,
                Stage::Todo => status_counts.todo += 1,
                Stage::Overdue => status_counts.overdue += 1,
            }
        }

        let total_tasks = tasks.len() as u64;
        let total_weighted_score: Decimal = tasks
            .iter()
            .map(|t| scoring::task_contribution(t, weight_of(t)))
            .sum();
        let overall_rating = (total_weighted_score / Decimal::from(total_tasks)).round_dp(2);

        // Totais por tipo de KPI, acumulados junto com as linhas e
        // ignorando os marcadores não numéricos.
        let mut total_rating = Decimal::ZERO;
        let mut total_percentage = Decimal::ZERO;
        let mut rows = Vec::with_capacity(tasks.len());
        for t in &tasks {
            let rating = scoring::task_rating(t);
            let percentage = scoring::task_percentage_contribution(t);
            match t.kpi.as_ref().map(|k| k.kind) {
                Some(KpiKind::Metric) => {
                    if let TaskRating::Value(v) = rating {
                        total_rating += v;
                    }
                }
                Some(KpiKind::Percentage) => {
                    if let PercentContribution::Value(v) = percentage {
                        total_percentage += v;
                    }
                }
                None => {}
            }
            rows.push(TaskEvaluation {
                id: t.id,
                name: t.title.clone(),
                kpi_name: t
                    .kpi
                    .as_ref()
                    .map(|k| k.name.clone())
                    .unwrap_or_else(|| "N/A".to_owned()),
                kpi_type: t
                    .kpi
                    .as_ref()
                    .map(|k| k.kind.as_str().to_owned())
                    .unwrap_or_else(|| "N/A".to_owned()),
                created_at: t.created_at,
                stage: t.stage,
                priority: t.priority,
                kpi_weight: weight_of(t).round_dp(2),
                rating,
                percentage,
            });
        }
        let total_rating = total_rating.round_dp(2);
        let total_percentage = total_percentage.round_dp(2);

        Ok(Evaluation::Report(PerformanceReport {
            user: user.name,
            overall_rating,
            status_counts,
            total_tasks,
            tasks: rows,
            total_rating,
            total_percentage,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::db::store::Db;
    use crate::models::kpi::{Kpi, KpiKind, KpiRef};
    use crate::models::org::User;
    use crate::models::task::{Priority, Task};

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn service(db: &Db) -> PerformanceService {
        PerformanceService::new(
            TaskRepository::new(db.clone()),
            OrgRepository::new(db.clone()),
        )
    }

    async fn seed_user(db: &Db, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        db.users
            .save(
                id,
                User {
                    id,
                    name: name.to_owned(),
                    title: "Analista".into(),
                    department: "Comercial".into(),
                    branch: Uuid::new_v4(),
                    is_admin: false,
                    is_active: true,
                    created_at: Utc::now(),
                },
            )
            .await;
        id
    }

    async fn seed_kpi(db: &Db, kind: KpiKind, weight: &str) -> Kpi {
        let id = Uuid::new_v4();
        let kpi = Kpi {
            id,
            name: format!("KPI {id}"),
            kind,
            branch: Uuid::new_v4(),
            weight_value: dec(weight),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        db.kpis.save(id, kpi.clone()).await;
        kpi
    }

    fn base_task(member: Uuid, stage: Stage, priority: Priority) -> Task {
        let now = Utc::now();
        Task {
            id: Uuid::new_v4(),
            title: "Tarefa".into(),
            description: "—".into(),
            branch: "Filial Centro".into(),
            department: "Comercial".into(),
            date: now,
            priority,
            stage,
            status: None,
            activities: vec![],
            team: vec![member],
            is_trashed: false,
            monetary_value: None,
            monetary_value_achieved: None,
            percent_value: None,
            percent_value_achieved: None,
            kpi: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn user_without_tasks_gets_soft_result() {
        let db = Db::new();
        let user = seed_user(&db, "Ana").await;
        let outcome = service(&db).evaluate(user).await.unwrap();
        assert_eq!(outcome, Evaluation::NoTasksAssigned);
    }

    #[tokio::test]
    async fn unknown_user_with_tasks_is_not_found() {
        let db = Db::new();
        let ghost = Uuid::new_v4();
        let task = base_task(ghost, Stage::Todo, Priority::Low);
        db.tasks.save(task.id, task).await;
        let err = service(&db).evaluate(ghost).await.unwrap_err();
        assert!(matches!(err, AppError::UserNotFound));
    }

    #[tokio::test]
    async fn report_aggregates_contributions_and_totals() {
        let db = Db::new();
        let user = seed_user(&db, "Ana").await;
        let metric = seed_kpi(&db, KpiKind::Metric, "0.20").await;
        let percent = seed_kpi(&db, KpiKind::Percentage, "0.10").await;

        // completed/high com peso 0.20 → contribuição 6.0; rating 25.00.
        let mut t1 = base_task(user, Stage::Completed, Priority::High);
        t1.kpi = Some(KpiRef {
            id: metric.id,
            name: metric.name.clone(),
            kind: KpiKind::Metric,
        });
        t1.monetary_value = Some(dec("1000"));
        t1.monetary_value_achieved = Some(dec("250"));
        db.tasks.save(t1.id, t1).await;

        // overdue/low com peso 0.10 → contribuição -1.1; percentage 2.00.
        let mut t2 = base_task(user, Stage::Overdue, Priority::Low);
        t2.kpi = Some(KpiRef {
            id: percent.id,
            name: percent.name.clone(),
            kind: KpiKind::Percentage,
        });
        t2.percent_value = Some(dec("50"));
        t2.percent_value_achieved = Some(dec("25"));
        db.tasks.save(t2.id, t2).await;

        let outcome = service(&db).evaluate(user).await.unwrap();
        let report = match outcome {
            Evaluation::Report(r) => r,
            Evaluation::NoTasksAssigned => panic!("esperava relatório"),
        };

        assert_eq!(report.user, "Ana");
        assert_eq!(report.total_tasks, 2);
        assert_eq!(report.status_counts.completed, 1);
        assert_eq!(report.status_counts.overdue, 1);
        assert_eq!(report.status_counts.started, 0);
        // (6.0 + (-1.1)) / 2 = 2.45
        assert_eq!(report.overall_rating, dec("2.45"));
        assert_eq!(report.total_rating, dec("25.00"));
        assert_eq!(report.total_percentage, dec("2.00"));

        let metric_row = report
            .tasks
            .iter()
            .find(|r| r.kpi_type == "Metric")
            .unwrap();
        assert_eq!(metric_row.rating, TaskRating::Value(dec("25.00")));
        assert_eq!(metric_row.kpi_weight, dec("0.20"));
        assert_eq!(
            metric_row.percentage,
            PercentContribution::NotApplicable
        );
    }

    #[tokio::test]
    async fn trashed_tasks_are_ignored() {
        let db = Db::new();
        let user = seed_user(&db, "Ana").await;
        let mut task = base_task(user, Stage::Completed, Priority::High);
        task.is_trashed = true;
        db.tasks.save(task.id, task).await;

        let outcome = service(&db).evaluate(user).await.unwrap();
        assert_eq!(outcome, Evaluation::NoTasksAssigned);
    }

    #[tokio::test]
    async fn evaluation_is_idempotent() {
        let db = Db::new();
        let user = seed_user(&db, "Ana").await;
        let task = base_task(user, Stage::InProgress, Priority::Medium);
        db.tasks.save(task.id, task).await;

        let svc = service(&db);
        let first = svc.evaluate(user).await.unwrap();
        let second = svc.evaluate(user).await.unwrap();
        assert_eq!(first, second);
    }
}
