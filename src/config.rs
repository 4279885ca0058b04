// src/config.rs

use crate::{
    db::{Db, OrgRepository, RevenueRepository, TaskRepository},
    services::{DashboardService, KpiService, PerformanceService, RevenueService, TaskService},
};

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub task_service: TaskService,
    pub kpi_service: KpiService,
    pub performance_service: PerformanceService,
    pub dashboard_service: DashboardService,
    pub revenue_service: RevenueService,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let db = Db::new();

        // --- Monta o gráfico de dependências ---
        let task_repo = TaskRepository::new(db.clone());
        let org_repo = OrgRepository::new(db.clone());
        let revenue_repo = RevenueRepository::new(db.clone());

        let task_service = TaskService::new(task_repo.clone(), org_repo.clone());
        let kpi_service = KpiService::new(org_repo.clone());
        let performance_service = PerformanceService::new(task_repo.clone(), org_repo.clone());
        let dashboard_service = DashboardService::new(task_repo, org_repo.clone());
        let revenue_service = RevenueService::new(revenue_repo, org_repo);

        Ok(Self {
            db,
            task_service,
            kpi_service,
            performance_service,
            dashboard_service,
            revenue_service,
        })
    }
}
