pub mod order_service_port;

pub use order_service_port::{CreateOrderRequest, OrderServicePort, DEFAULT_TERMINAL_TYPE};
