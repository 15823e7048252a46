pub mod adapters;
pub mod config;

pub use adapters::HttpOrderService;
pub use config::OrderServiceConfig;
