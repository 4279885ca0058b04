// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Tarefas ---
        handlers::tasks::create_task,
        handlers::tasks::get_all_tasks,
        handlers::tasks::get_task,
        handlers::tasks::update_task,
        handlers::tasks::update_task_stage,
        handlers::tasks::post_task_activity,
        handlers::tasks::duplicate_task,
        handlers::tasks::trash_task,
        handlers::tasks::restore_task,
        handlers::tasks::delete_task,
        handlers::tasks::empty_trash,
        handlers::tasks::restore_trash,

        // --- Dashboard ---
        handlers::dashboard::get_dashboard_summary,
        handlers::dashboard::get_department_graph,
        handlers::dashboard::get_individual_department_graph,

        // --- Desempenho ---
        handlers::performance::evaluate_user,
        handlers::performance::evaluate,

        // --- KPIs ---
        handlers::kpis::create_kpi,
        handlers::kpis::list_branch_kpis,
        handlers::kpis::get_kpi,
        handlers::kpis::update_kpi,
        handlers::kpis::delete_kpi,

        // --- Receitas ---
        handlers::revenues::create_revenue,
        handlers::revenues::list_revenues,
        handlers::revenues::get_revenue,
        handlers::revenues::delete_revenue,
        handlers::revenues::propose_progress,
        handlers::revenues::list_progress_requests,
        handlers::revenues::resolve_progress,
    ),
    components(
        schemas(
            // --- Tarefas ---
            models::task::Priority,
            models::task::Stage,
            models::task::Activity,
            models::task::Task,
            models::task::CreateTaskPayload,
            models::task::UpdateTaskPayload,
            models::task::UpdateStagePayload,
            models::task::PostActivityPayload,
            models::task::DuplicateTaskPayload,

            // --- KPIs ---
            models::kpi::KpiKind,
            models::kpi::Kpi,
            models::kpi::KpiRef,
            models::kpi::CreateKpiPayload,
            models::kpi::UpdateKpiPayload,

            // --- Cadastros ---
            models::org::Branch,
            models::org::Department,
            models::org::User,

            // --- Desempenho ---
            models::performance::StageCounts,
            models::performance::TaskEvaluation,
            models::performance::PerformanceReport,
            models::performance::EvaluatePayload,

            // --- Dashboard ---
            models::dashboard::BranchStageBucket,
            models::dashboard::TotalsByBranch,
            models::dashboard::TasksOverview,
            models::dashboard::PriorityCount,
            models::dashboard::DepartmentKpiCell,
            models::dashboard::KpiSummaryEntry,
            models::dashboard::BranchSummaryEntry,
            models::dashboard::OverallMonetaryTotals,
            models::dashboard::OverallPercentageTotals,
            models::dashboard::DashboardSummary,
            models::dashboard::DepartmentMetrics,
            models::dashboard::DepartmentMetricsEntry,
            models::dashboard::KpiDepartmentBreakdown,
            models::dashboard::KpiTotals,
            models::dashboard::DepartmentKpiBreakdown,

            // --- Receitas ---
            models::revenue::AchievedHistoryEntry,
            models::revenue::TargetBranch,
            models::revenue::Revenue,
            models::revenue::RevenueChangeRequest,
            models::revenue::TargetBranchPayload,
            models::revenue::CreateRevenuePayload,
            models::revenue::ProposeProgressPayload,
            models::revenue::ResolveProgressPayload,
        )
    ),
    tags(
        (name = "Tarefas", description = "Ciclo de vida das tarefas e lixeira"),
        (name = "Dashboard", description = "Indicadores e Gráficos Gerenciais"),
        (name = "Desempenho", description = "Avaliação de desempenho por usuário"),
        (name = "KPIs", description = "Indicadores-chave por filial"),
        (name = "Receitas", description = "Campanhas de receita e aprovação de progresso")
    )
)]
pub struct ApiDoc;
