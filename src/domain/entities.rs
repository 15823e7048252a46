use crate::domain::value_objects::{Amount, OrderId, OrderStatus};
use serde::{Deserialize, Serialize};

/// Payment order as reported by the external order service.
///
/// The client never mutates an order; status transitions happen
/// out-of-band on the service (someone scans the QR code, the gateway
/// settles or expires the order) and are picked up on the next fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Service-assigned identifier, immutable once created
    #[serde(rename = "_id")]
    pub id: OrderId,

    /// Authoritative status when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,

    /// Nested order detail payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<OrderDetails>,
}

/// Detail payload nested under an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetails {
    /// Human-facing order code, immutable after creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Legacy status field, used as fallback when the top-level
    /// status is absent; same value domain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<OrderData>,
}

/// Gateway-side order data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderData {
    /// Requested amount, set at creation
    #[serde(
        rename = "totalFee",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub total_fee: Option<Amount>,

    /// Asset code, set at creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Scannable payment code URL; present while the order is pending
    #[serde(
        rename = "qrcodeLink",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub qrcode_link: Option<String>,
}

impl Order {
    /// Resolves the single authoritative status from the redundant
    /// status fields: top-level `status` wins, then `details.status`,
    /// then `pending`. The `pending` default is display-only — an order
    /// with no status information is never treated as settled.
    pub fn resolved_status(&self) -> OrderStatus {
        self.status
            .or_else(|| self.details.as_ref().and_then(|d| d.status))
            .unwrap_or(OrderStatus::Pending)
    }

    /// The QR panel is shown iff the resolved status is pending.
    pub fn shows_qr(&self) -> bool {
        self.resolved_status() == OrderStatus::Pending
    }

    pub fn code(&self) -> Option<&str> {
        self.details.as_ref()?.code.as_deref()
    }

    pub fn total_fee(&self) -> Option<&Amount> {
        self.details.as_ref()?.data.as_ref()?.total_fee.as_ref()
    }

    pub fn currency(&self) -> Option<&str> {
        self.details.as_ref()?.data.as_ref()?.currency.as_deref()
    }

    pub fn qrcode_link(&self) -> Option<&str> {
        self.details.as_ref()?.data.as_ref()?.qrcode_link.as_deref()
    }
}

/// Ordered list of orders in service response order.
///
/// Fully replaced (never merged) on every successful list fetch, so the
/// view always reflects exactly one service response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderListSnapshot {
    orders: Vec<Order>,
}

impl OrderListSnapshot {
    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Order> {
        self.orders.iter()
    }
}
