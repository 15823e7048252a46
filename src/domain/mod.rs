pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::{Order, OrderData, OrderDetails, OrderListSnapshot};
pub use errors::{DashboardError, DashboardResult, FieldError, FieldErrors};
pub use value_objects::{Amount, OrderId, OrderStatus, StatusColor};
