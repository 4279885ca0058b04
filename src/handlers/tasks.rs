// src/handlers/tasks.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::task::{
        CreateTaskPayload, DuplicateTaskPayload, PostActivityPayload, Stage, Task,
        UpdateStagePayload, UpdateTaskPayload,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct TaskListQuery {
    // Restringe às tarefas em que o usuário participa.
    pub user_id: Option<Uuid>,
    pub stage: Option<Stage>,
    #[serde(default)]
    pub is_trashed: bool,
    pub search: Option<String>,
}

// POST /api/tasks
#[utoipa::path(
    post,
    path = "/api/tasks",
    tag = "Tarefas",
    request_body = CreateTaskPayload,
    responses(
        (status = 201, description = "Tarefa criada", body = Task),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "KPI não encontrado")
    )
)]
pub async fn create_task(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateTaskPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let task = app_state.task_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

// GET /api/tasks
//
// A leitura faz a varredura de atraso antes de aplicar os filtros, então o
// conjunto devolvido já reflete etapas corrigidas.
#[utoipa::path(
    get,
    path = "/api/tasks",
    tag = "Tarefas",
    params(TaskListQuery),
    responses(
        (status = 200, description = "Lista de tarefas", body = Vec<Task>)
    )
)]
pub async fn get_all_tasks(
    State(app_state): State<AppState>,
    Query(query): Query<TaskListQuery>,
) -> Result<impl IntoResponse, AppError> {
    if !query.is_trashed {
        app_state.task_service.list_all().await;
    }
    let tasks = app_state
        .task_service
        .list(
            query.user_id,
            query.stage,
            query.is_trashed,
            query.search.as_deref(),
        )
        .await;
    Ok((StatusCode::OK, Json(tasks)))
}

// GET /api/tasks/{id}
#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    tag = "Tarefas",
    params(("id" = Uuid, Path, description = "ID da tarefa")),
    responses(
        (status = 200, description = "Tarefa encontrada", body = Task),
        (status = 404, description = "Tarefa não encontrada")
    )
)]
pub async fn get_task(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let task = app_state.task_service.get(id).await?;
    Ok((StatusCode::OK, Json(task)))
}

// PUT /api/tasks/{id}
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    tag = "Tarefas",
    params(("id" = Uuid, Path, description = "ID da tarefa")),
    request_body = UpdateTaskPayload,
    responses(
        (status = 200, description = "Tarefa atualizada", body = Task),
        (status = 404, description = "Tarefa não encontrada")
    )
)]
pub async fn update_task(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTaskPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let task = app_state.task_service.update(id, payload).await?;
    Ok((StatusCode::OK, Json(task)))
}

// PATCH /api/tasks/{id}/stage
#[utoipa::path(
    patch,
    path = "/api/tasks/{id}/stage",
    tag = "Tarefas",
    params(("id" = Uuid, Path, description = "ID da tarefa")),
    request_body = UpdateStagePayload,
    responses(
        (status = 200, description = "Etapa atualizada", body = Task),
        (status = 404, description = "Tarefa não encontrada")
    )
)]
pub async fn update_task_stage(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStagePayload>,
) -> Result<impl IntoResponse, AppError> {
    let task = app_state.task_service.update_stage(id, payload).await?;
    Ok((StatusCode::OK, Json(task)))
}

// POST /api/tasks/{id}/activity
#[utoipa::path(
    post,
    path = "/api/tasks/{id}/activity",
    tag = "Tarefas",
    params(("id" = Uuid, Path, description = "ID da tarefa")),
    request_body = PostActivityPayload,
    responses(
        (status = 200, description = "Atividade registrada", body = Task),
        (status = 404, description = "Tarefa não encontrada")
    )
)]
pub async fn post_task_activity(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PostActivityPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let task = app_state.task_service.post_activity(id, payload).await?;
    Ok((StatusCode::OK, Json(task)))
}

// POST /api/tasks/{id}/duplicate
#[utoipa::path(
    post,
    path = "/api/tasks/{id}/duplicate",
    tag = "Tarefas",
    params(("id" = Uuid, Path, description = "ID da tarefa")),
    request_body = DuplicateTaskPayload,
    responses(
        (status = 201, description = "Tarefa duplicada", body = Task),
        (status = 404, description = "Tarefa não encontrada")
    )
)]
pub async fn duplicate_task(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<DuplicateTaskPayload>,
) -> Result<impl IntoResponse, AppError> {
    let task = app_state.task_service.duplicate(id, payload).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

// PATCH /api/tasks/{id}/trash
#[utoipa::path(
    patch,
    path = "/api/tasks/{id}/trash",
    tag = "Tarefas",
    params(("id" = Uuid, Path, description = "ID da tarefa")),
    responses(
        (status = 200, description = "Tarefa movida para a lixeira", body = Task),
        (status = 404, description = "Tarefa não encontrada")
    )
)]
pub async fn trash_task(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let task = app_state.task_service.trash(id).await?;
    Ok((StatusCode::OK, Json(task)))
}

// PATCH /api/tasks/{id}/restore
#[utoipa::path(
    patch,
    path = "/api/tasks/{id}/restore",
    tag = "Tarefas",
    params(("id" = Uuid, Path, description = "ID da tarefa")),
    responses(
        (status = 200, description = "Tarefa restaurada", body = Task),
        (status = 404, description = "Tarefa não encontrada")
    )
)]
pub async fn restore_task(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let task = app_state.task_service.restore(id).await?;
    Ok((StatusCode::OK, Json(task)))
}

// DELETE /api/tasks/{id}
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    tag = "Tarefas",
    params(("id" = Uuid, Path, description = "ID da tarefa")),
    responses(
        (status = 204, description = "Tarefa excluída definitivamente"),
        (status = 404, description = "Tarefa não encontrada")
    )
)]
pub async fn delete_task(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.task_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/tasks/trash
#[utoipa::path(
    delete,
    path = "/api/tasks/trash",
    tag = "Tarefas",
    responses(
        (status = 204, description = "Lixeira esvaziada")
    )
)]
pub async fn empty_trash(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    app_state.task_service.delete_all_trashed().await;
    Ok(StatusCode::NO_CONTENT)
}

// PATCH /api/tasks/trash/restore
#[utoipa::path(
    patch,
    path = "/api/tasks/trash/restore",
    tag = "Tarefas",
    responses(
        (status = 204, description = "Lixeira restaurada")
    )
)]
pub async fn restore_trash(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    app_state.task_service.restore_all_trashed().await;
    Ok(StatusCode::NO_CONTENT)
}
