// src/services/task_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{OrgRepository, TaskRepository},
    models::kpi::{KpiKind, KpiRef},
    models::task::{
        Activity, CreateTaskPayload, DuplicateTaskPayload, PostActivityPayload, Stage, Task,
        UpdateStagePayload, UpdateTaskPayload,
    },
};

#[derive(Clone)]
pub struct TaskService {
    tasks: TaskRepository,
    org: OrgRepository,
}

impl TaskService {
    pub fn new(tasks: TaskRepository, org: OrgRepository) -> Self {
        Self { tasks, org }
    }

    pub async fn create(&self, payload: CreateTaskPayload) -> Result<Task, AppError> {
        let kpi = match payload.kpi_id {
            Some(id) => Some(self.snapshot_kpi(id).await?),
            None => None,
        };

        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            title: payload.title,
            description: payload.description,
            branch: payload.branch,
            department: payload.department,
            date: payload.date,
            priority: payload.priority,
            stage: payload.stage,
            status: payload.status,
            activities: vec![Activity {
                kind: Stage::Todo,
                text: "Tarefa criada e atribuída à equipe.".to_owned(),
                date: now,
                by: payload.created_by,
                collected_monetary: Decimal::ZERO,
                collected_percent: Decimal::ZERO,
            }],
            team: payload.team,
            is_trashed: false,
            monetary_value: payload.monetary_value,
            monetary_value_achieved: payload.monetary_value_achieved,
            percent_value: payload.percent_value,
            percent_value_achieved: payload.percent_value_achieved,
            kpi,
            created_at: now,
            updated_at: now,
        };

        tracing::info!(task_id = %task.id, "tarefa criada");
        Ok(self.tasks.create(task).await)
    }

    pub async fn get(&self, id: Uuid) -> Result<Task, AppError> {
        self.tasks.find_by_id(id).await
    }

    pub async fn list(
        &self,
        team_member: Option<Uuid>,
        stage: Option<Stage>,
        trashed: bool,
        search: Option<&str>,
    ) -> Vec<Task> {
        self.tasks.list(team_member, stage, trashed, search).await
    }

    // Varredura de atraso sobre o conjunto ativo, persistida antes de
    // devolver a lista. Três correções, nesta ordem:
    //   1. etapa vencida e não concluída vira "overdue";
    //   2. "overdue" com prazo futuro (prazo foi estendido) volta para
    //      "in progress";
    //   3. KPI Percentage com meta definida e atingido >= meta vira
    //      "completed" — sem meta definida nada muda, senão 0 >= 0
    //      concluiria tarefa sem valores.
    pub async fn list_all(&self) -> Vec<Task> {
        let now = Utc::now();
        let mut tasks = self.tasks.find_active().await;
        for task in &mut tasks {
            let before = task.stage;

            if task.stage != Stage::Completed && task.stage != Stage::Overdue && task.date < now {
                task.stage = Stage::Overdue;
            } else if task.stage == Stage::Overdue && task.date >= now {
                task.stage = Stage::InProgress;
            }

            let is_percentage = task
                .kpi
                .as_ref()
                .is_some_and(|k| k.kind == KpiKind::Percentage);
            if is_percentage {
                if let Some(target) = task.percent_value {
                    let achieved = task.percent_value_achieved.unwrap_or(Decimal::ZERO);
                    if achieved >= target {
                        task.stage = Stage::Completed;
                    }
                }
            }

            if task.stage != before {
                task.updated_at = now;
                self.tasks.save(task).await;
            }
        }
        tasks
    }

    pub async fn update(&self, id: Uuid, payload: UpdateTaskPayload) -> Result<Task, AppError> {
        let mut task = self.tasks.find_by_id(id).await?;

        if let Some(title) = payload.title {
            task.title = title;
        }
        if let Some(description) = payload.description {
            task.description = description;
        }
        if let Some(date) = payload.date {
            task.date = date;
        }
        if let Some(priority) = payload.priority {
            task.priority = priority;
        }
        if let Some(stage) = payload.stage {
            task.stage = stage;
        }
        if payload.status.is_some() {
            task.status = payload.status;
        }
        if let Some(team) = payload.team {
            task.team = team;
        }
        if payload.monetary_value.is_some() {
            task.monetary_value = payload.monetary_value;
        }
        if payload.monetary_value_achieved.is_some() {
            task.monetary_value_achieved = payload.monetary_value_achieved;
        }
        if payload.percent_value.is_some() {
            task.percent_value = payload.percent_value;
        }
        if payload.percent_value_achieved.is_some() {
            task.percent_value_achieved = payload.percent_value_achieved;
        }
        if let Some(kpi_id) = payload.kpi_id {
            task.kpi = Some(self.snapshot_kpi(kpi_id).await?);
        }

        task.updated_at = Utc::now();
        self.tasks.save(&task).await;
        Ok(task)
    }

    // Transição de etapa com acúmulo dos valores coletados: os deltas são
    // somados aos atingidos, nunca sobrescritos.
    pub async fn update_stage(
        &self,
        id: Uuid,
        payload: UpdateStagePayload,
    ) -> Result<Task, AppError> {
        let mut task = self.tasks.find_by_id(id).await?;
        task.stage = payload.stage;

        if let Some(delta) = payload.monetary_value_achieved {
            let current = task.monetary_value_achieved.unwrap_or(Decimal::ZERO);
            task.monetary_value_achieved = Some(current + delta);
        }
        if let Some(delta) = payload.percent_value_achieved {
            let current = task.percent_value_achieved.unwrap_or(Decimal::ZERO);
            task.percent_value_achieved = Some(current + delta);
        }

        task.updated_at = Utc::now();
        self.tasks.save(&task).await;
        Ok(task)
    }

    // Registra uma atividade no log. Os valores coletados entram na coluna
    // do tipo de KPI da tarefa e também acumulam nos atingidos; o tipo da
    // atividade move a etapa.
    pub async fn post_activity(
        &self,
        id: Uuid,
        payload: PostActivityPayload,
    ) -> Result<Task, AppError> {
        let mut task = self.tasks.find_by_id(id).await?;

        let mut collected_monetary = Decimal::ZERO;
        let mut collected_percent = Decimal::ZERO;
        match task.kpi.as_ref().map(|k| k.kind) {
            Some(KpiKind::Metric) => {
                if let Some(delta) = payload.monetary_value_achieved {
                    collected_monetary = delta;
                    let current = task.monetary_value_achieved.unwrap_or(Decimal::ZERO);
                    task.monetary_value_achieved = Some(current + delta);
                }
            }
            Some(KpiKind::Percentage) => {
                if let Some(delta) = payload.percent_value_achieved {
                    collected_percent = delta;
                    let current = task.percent_value_achieved.unwrap_or(Decimal::ZERO);
                    task.percent_value_achieved = Some(current + delta);
                }
            }
            None => {}
        }

        let now = Utc::now();
        task.activities.push(Activity {
            kind: payload.kind,
            text: payload.activity,
            date: now,
            by: payload.by,
            collected_monetary,
            collected_percent,
        });
        task.stage = payload.kind;
        task.updated_at = now;

        self.tasks.save(&task).await;
        Ok(task)
    }

    // Cópia da tarefa com o progresso zerado; o log recomeça.
    pub async fn duplicate(
        &self,
        id: Uuid,
        payload: DuplicateTaskPayload,
    ) -> Result<Task, AppError> {
        let original = self.tasks.find_by_id(id).await?;
        let now = Utc::now();

        let copy = Task {
            id: Uuid::new_v4(),
            title: format!("Duplicate - {}", original.title),
            stage: Stage::Todo,
            status: None,
            activities: vec![Activity {
                kind: Stage::Todo,
                text: "Tarefa duplicada.".to_owned(),
                date: now,
                by: payload.created_by,
                collected_monetary: Decimal::ZERO,
                collected_percent: Decimal::ZERO,
            }],
            monetary_value_achieved: None,
            percent_value_achieved: None,
            is_trashed: false,
            created_at: now,
            updated_at: now,
            ..original
        };

        Ok(self.tasks.create(copy).await)
    }

    // --- Lixeira ---

    pub async fn trash(&self, id: Uuid) -> Result<Task, AppError> {
        self.set_trashed(id, true).await
    }

    pub async fn restore(&self, id: Uuid) -> Result<Task, AppError> {
        self.set_trashed(id, false).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.tasks.delete(id).await
    }

    pub async fn delete_all_trashed(&self) {
        self.tasks.delete_trashed().await;
    }

    pub async fn restore_all_trashed(&self) {
        self.tasks.restore_trashed().await;
    }

    async fn set_trashed(&self, id: Uuid, trashed: bool) -> Result<Task, AppError> {
        let mut task = self.tasks.find_by_id(id).await?;
        task.is_trashed = trashed;
        task.updated_at = Utc::now();
        self.tasks.save(&task).await;
        Ok(task)
    }

    async fn snapshot_kpi(&self, id: Uuid) -> Result<KpiRef, AppError> {
        let kpi = self.org.find_kpi(id).await?;
        Ok(KpiRef {
            id: kpi.id,
            name: kpi.name,
            kind: kpi.kind,
        })
    }
}
