use crate::domain::errors::DashboardResult;
use crate::domain::{Order, OrderId, OrderListSnapshot};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Fixed channel identifier sent with every creation request.
pub const DEFAULT_TERMINAL_TYPE: &str = "WEB";

/// Order creation request body.
///
/// Value object built by form validation and handed straight to the
/// service; never persisted beyond the lifetime of the creation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub amount: String,

    pub currency: String,

    #[serde(
        rename = "goodCategory",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub good_category: Option<String>,

    #[serde(rename = "terminalType")]
    pub terminal_type: String,
}

/// External order service port.
///
/// The port does no polling and no caching of its own; consumers decide
/// when to fetch, so staleness is bounded by user interaction rather
/// than a timer.
#[async_trait]
pub trait OrderServicePort: Send + Sync {
    /// Fetch the full current set of orders, in service response order.
    async fn list_orders(&self) -> DashboardResult<OrderListSnapshot>;

    /// Fetch one order's full detail by id.
    async fn get_order(&self, id: &OrderId) -> DashboardResult<Order>;

    /// Create a new order; the response is the freshly created order,
    /// pending, with its QR code link.
    async fn create_order(&self, request: &CreateOrderRequest) -> DashboardResult<Order>;
}
