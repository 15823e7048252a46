use crate::domain::errors::{DashboardError, DashboardResult};
use crate::domain::{Order, OrderId, OrderListSnapshot};
use crate::infrastructure::config::OrderServiceConfig;
use crate::ports::{CreateOrderRequest, OrderServicePort};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use tracing::{debug, error};

/// HTTP adapter for the external order service.
#[derive(Clone)]
pub struct HttpOrderService {
    config: Arc<OrderServiceConfig>,
    client: Client,
}

impl HttpOrderService {
    pub fn new(config: Arc<OrderServiceConfig>) -> DashboardResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { config, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn check_status(
        response: reqwest::Response,
        context: &str,
    ) -> DashboardResult<reqwest::Response> {
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("{} failed: {} - {}", context, status, error_text);
            return Err(DashboardError::Retrieval(format!(
                "{}: API returned {}: {}",
                context, status, error_text
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl OrderServicePort for HttpOrderService {
    async fn list_orders(&self) -> DashboardResult<OrderListSnapshot> {
        let url = self.endpoint("payment-methods/binance-pay/orders");
        debug!(url = %url, "fetching order list");

        let response = self.client.get(&url).send().await?;
        let response = Self::check_status(response, "list orders").await?;

        let body = response.text().await?;
        let snapshot: OrderListSnapshot = serde_json::from_str(&body)?;
        debug!(count = snapshot.len(), "order list fetched");
        Ok(snapshot)
    }

    async fn get_order(&self, id: &OrderId) -> DashboardResult<Order> {
        let url = self.endpoint(&format!("payment-methods/binance-pay/orders/{}", id));
        debug!(url = %url, "fetching order detail");

        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(DashboardError::NotFound(id.clone()));
        }

        let response = Self::check_status(response, "get order").await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn create_order(&self, request: &CreateOrderRequest) -> DashboardResult<Order> {
        let url = self.endpoint("payment-methods/binance-pay/create-order");
        debug!(url = %url, amount = %request.amount, "creating order");

        let response = self.client.post(&url).json(request).send().await?;
        let response = Self::check_status(response, "create order").await?;

        let body = response.text().await?;
        let order: Order = serde_json::from_str(&body)?;
        debug!(id = %order.id, "order created by service");
        Ok(order)
    }
}
