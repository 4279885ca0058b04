pub mod store;
pub use store::{Collection, Db};
pub mod task_repo;
pub use task_repo::TaskRepository;
pub mod org_repo;
pub use org_repo::OrgRepository;
pub mod revenue_repo;
pub use revenue_repo::RevenueRepository;
