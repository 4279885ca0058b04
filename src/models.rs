pub mod task;
pub mod kpi;
pub mod org;
pub mod revenue;
pub mod performance;
pub mod dashboard;
