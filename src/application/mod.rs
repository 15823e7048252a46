pub mod create_workflow;
pub mod dashboard_service;
pub mod detail_binding;
pub mod dto;

pub use create_workflow::{CreatePhase, CreateWorkflow};
pub use dashboard_service::DashboardService;
pub use detail_binding::{DetailBinding, DetailState, DetailTicket};
pub use dto::{FormField, OrderForm};
