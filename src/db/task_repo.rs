// src/db/task_repo.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::Db,
    models::task::{Stage, Task},
};

#[derive(Clone)]
pub struct TaskRepository {
    db: Db,
}

impl TaskRepository {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn create(&self, task: Task) -> Task {
        self.db.tasks.save(task.id, task.clone()).await;
        task
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Task, AppError> {
        self.db
            .tasks
            .find_by_id(id)
            .await
            .ok_or(AppError::TaskNotFound)
    }

    pub async fn save(&self, task: &Task) {
        self.db.tasks.save(task.id, task.clone()).await;
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if self.db.tasks.delete(id).await {
            Ok(())
        } else {
            Err(AppError::TaskNotFound)
        }
    }

    pub async fn delete_trashed(&self) {
        self.db.tasks.retain(|t| !t.is_trashed).await;
    }

    pub async fn restore_trashed(&self) {
        self.db
            .tasks
            .update_each(|t| {
                if t.is_trashed {
                    t.is_trashed = false;
                }
            })
            .await;
    }

    // Conjunto ativo (não lixeira), mais recentes primeiro.
    pub async fn find_active(&self) -> Vec<Task> {
        let mut tasks = self.db.tasks.find(|t| !t.is_trashed).await;
        sort_recent_first(&mut tasks);
        tasks
    }

    pub async fn find_active_for_user(&self, user_id: Uuid) -> Vec<Task> {
        let mut tasks = self
            .db
            .tasks
            .find(|t| !t.is_trashed && t.team.contains(&user_id))
            .await;
        sort_recent_first(&mut tasks);
        tasks
    }

    // Tarefas ativas que carregam referência de KPI (insumo dos gráficos
    // por departamento).
    pub async fn find_active_with_kpi(&self) -> Vec<Task> {
        let mut tasks = self
            .db
            .tasks
            .find(|t| !t.is_trashed && t.kpi.is_some())
            .await;
        sort_recent_first(&mut tasks);
        tasks
    }

    pub async fn all(&self) -> Vec<Task> {
        let mut tasks = self.db.tasks.all().await;
        sort_recent_first(&mut tasks);
        tasks
    }

    pub async fn list(
        &self,
        team_member: Option<Uuid>,
        stage: Option<Stage>,
        trashed: bool,
        search: Option<&str>,
    ) -> Vec<Task> {
        let needle = search.map(str::to_lowercase);
        let mut tasks = self
            .db
            .tasks
            .find(|t| {
                if t.is_trashed != trashed {
                    return false;
                }
                if let Some(member) = team_member {
                    if !t.team.contains(&member) {
                        return false;
                    }
                }
                if let Some(wanted) = stage {
                    if t.stage != wanted {
                        return false;
                    }
                }
                if let Some(needle) = &needle {
                    let hit = t.title.to_lowercase().contains(needle)
                        || t.stage.as_str().contains(needle)
                        || t.priority.as_str().contains(needle);
                    if !hit {
                        return false;
                    }
                }
                true
            })
            .await;
        sort_recent_first(&mut tasks);
        tasks
    }
}

fn sort_recent_first(tasks: &mut [Task]) {
    // Desempate por id para manter a ordenação total estável.
    tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}
