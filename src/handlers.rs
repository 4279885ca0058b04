pub mod dashboard;
pub mod kpis;
pub mod performance;
pub mod revenues;
pub mod tasks;
