//src/main.rs

use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new().expect("Falha ao inicializar o estado da aplicação.");

    let task_routes = Router::new()
        .route(
            "/",
            post(handlers::tasks::create_task).get(handlers::tasks::get_all_tasks),
        )
        // Agregados ficam antes das rotas com {id}.
        .route("/dashboard", get(handlers::dashboard::get_dashboard_summary))
        .route(
            "/department-graph",
            get(handlers::dashboard::get_department_graph),
        )
        .route(
            "/individual-department-graph",
            get(handlers::dashboard::get_individual_department_graph),
        )
        .route("/trash", delete(handlers::tasks::empty_trash))
        .route("/trash/restore", patch(handlers::tasks::restore_trash))
        .route(
            "/{id}",
            get(handlers::tasks::get_task)
                .put(handlers::tasks::update_task)
                .delete(handlers::tasks::delete_task),
        )
        .route("/{id}/stage", patch(handlers::tasks::update_task_stage))
        .route("/{id}/activity", post(handlers::tasks::post_task_activity))
        .route("/{id}/duplicate", post(handlers::tasks::duplicate_task))
        .route("/{id}/trash", patch(handlers::tasks::trash_task))
        .route("/{id}/restore", patch(handlers::tasks::restore_task));

    let kpi_routes = Router::new()
        .route("/", post(handlers::kpis::create_kpi))
        .route("/branch/{branchId}", get(handlers::kpis::list_branch_kpis))
        .route(
            "/{id}",
            get(handlers::kpis::get_kpi)
                .put(handlers::kpis::update_kpi)
                .delete(handlers::kpis::delete_kpi),
        );

    let revenue_routes = Router::new()
        .route(
            "/",
            post(handlers::revenues::create_revenue).get(handlers::revenues::list_revenues),
        )
        .route(
            "/progress-requests",
            post(handlers::revenues::propose_progress)
                .get(handlers::revenues::list_progress_requests),
        )
        .route("/branch", put(handlers::revenues::resolve_progress))
        .route(
            "/{id}",
            get(handlers::revenues::get_revenue).delete(handlers::revenues::delete_revenue),
        );

    let performance_routes = Router::new()
        .route("/evaluate", post(handlers::performance::evaluate))
        .route("/{userId}", get(handlers::performance::evaluate_user));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/tasks", task_routes)
        .nest("/api/kpis", kpi_routes)
        .nest("/api/revenues", revenue_routes)
        .nest("/api/performance", performance_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
