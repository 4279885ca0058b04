pub mod scoring;
pub mod task_service;
pub use task_service::TaskService;
pub mod kpi_service;
pub use kpi_service::KpiService;
pub mod performance_service;
pub use performance_service::PerformanceService;
pub mod dashboard_service;
pub use dashboard_service::{DashboardScope, DashboardService};
pub mod revenue_service;
pub use revenue_service::{Resolution, RevenueService};
