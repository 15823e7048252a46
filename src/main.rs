mod application;
mod domain;
mod infrastructure;
mod ports;

use application::DashboardService;
use infrastructure::{HttpOrderService, OrderServiceConfig};
use std::sync::Arc;
use tracing::{info, warn, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    dotenvy::dotenv().ok();

    info!("Starting payment order dashboard...");

    let config = OrderServiceConfig::from_env();
    info!("Order service configured at {}", config.base_url);

    let order_service = Arc::new(HttpOrderService::new(config)?);
    let mut dashboard = DashboardService::new(order_service);

    // Initial mount: populate the list once; later refreshes are
    // event-triggered (after order creation), never on a timer.
    if let Err(err) = dashboard.refresh_orders().await {
        warn!("Initial order list fetch failed: {}", err);
    }

    info!("Tracking {} orders:", dashboard.snapshot().len());
    for order in dashboard.snapshot().iter() {
        let status = order.resolved_status();
        info!(
            "  {:<12} {:>10} {:<6} {} ({})",
            order.code().unwrap_or("-"),
            order.total_fee().map(|a| a.as_str()).unwrap_or("-"),
            order.currency().unwrap_or("-"),
            status,
            status.color()
        );
    }

    Ok(())
}
