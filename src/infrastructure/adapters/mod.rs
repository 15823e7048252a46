pub mod http_order_service;

pub use http_order_service::HttpOrderService;
