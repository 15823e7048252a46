use crate::application::create_workflow::{CreatePhase, CreateWorkflow};
use crate::application::detail_binding::{DetailBinding, DetailState, DetailTicket};
use crate::application::dto::{FormField, OrderForm};
use crate::domain::errors::{DashboardError, DashboardResult};
use crate::domain::{Order, OrderId, OrderListSnapshot};
use crate::ports::OrderServicePort;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Dashboard core owning the three stateful slices: the order list
/// snapshot, the detail binding, and the create workflow.
///
/// All state mutation goes through the methods below, driven by shell
/// events; the service itself schedules nothing on a timer. Refresh is
/// event-triggered: initial mount and after a successful creation.
pub struct DashboardService<S: OrderServicePort> {
    orders: Arc<S>,
    snapshot: OrderListSnapshot,
    refreshing: bool,
    detail: DetailBinding,
    create: CreateWorkflow,
}

impl<S: OrderServicePort> DashboardService<S> {
    pub fn new(orders: Arc<S>) -> Self {
        Self {
            orders,
            snapshot: OrderListSnapshot::default(),
            refreshing: false,
            detail: DetailBinding::new(),
            create: CreateWorkflow::new(),
        }
    }

    /// Re-fetch the order list and replace the snapshot.
    ///
    /// Fail-soft: on error the previous snapshot is retained untouched,
    /// the failure is logged and returned for optional surfacing.
    pub async fn refresh_orders(&mut self) -> DashboardResult<()> {
        self.begin_refresh();
        let result = self.orders.list_orders().await;
        self.complete_refresh(result)
    }

    /// Explicit path for shells that schedule the list fetch
    /// themselves: raise the refresh indicator.
    pub fn begin_refresh(&mut self) {
        self.refreshing = true;
    }

    /// Run the list fetch without touching state.
    pub async fn fetch_orders(&self) -> DashboardResult<OrderListSnapshot> {
        self.orders.list_orders().await
    }

    /// Apply a list fetch result and drop the refresh indicator. On
    /// failure the previous snapshot stays in place.
    pub fn complete_refresh(
        &mut self,
        result: DashboardResult<OrderListSnapshot>,
    ) -> DashboardResult<()> {
        self.refreshing = false;
        match result {
            Ok(snapshot) => {
                debug!(count = snapshot.len(), "order list refreshed");
                self.snapshot = snapshot;
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "order list refresh failed, keeping previous snapshot");
                Err(err)
            }
        }
    }

    /// Select an order and fetch its detail: the convenience path that
    /// begins, fetches, and completes in one call.
    pub async fn select_order(&mut self, id: OrderId) {
        let ticket = self.detail.begin(id.clone());
        let result = self.orders.get_order(&id).await;
        if let Err(err) = &result {
            error!(id = %id, error = %err, "order detail fetch failed");
        }
        self.detail.complete(ticket, result);
    }

    /// Explicit path for shells that schedule fetches themselves:
    /// record the selection and obtain a ticket.
    pub fn begin_detail(&mut self, id: OrderId) -> DetailTicket {
        self.detail.begin(id)
    }

    /// Run the detail fetch for a previously recorded selection.
    pub async fn fetch_detail(&self, id: &OrderId) -> DashboardResult<Order> {
        self.orders.get_order(id).await
    }

    /// Apply a detail fetch result; discarded if the selection has
    /// changed since the ticket was issued.
    pub fn complete_detail(
        &mut self,
        ticket: DetailTicket,
        result: DashboardResult<Order>,
    ) -> bool {
        self.detail.complete(ticket, result)
    }

    pub fn set_form_field(&mut self, field: FormField, value: String) {
        self.create.set_field(field, value);
    }

    /// Submit the creation form.
    ///
    /// Validation failure keeps the workflow idle and makes no network
    /// call. On success the created order becomes the workflow result
    /// and the list is re-fetched exactly once, sequenced strictly
    /// after the creation response; a failed refresh does not undo the
    /// creation. On failure the workflow returns to idle with the error
    /// attached and may be resubmitted.
    pub async fn submit_create(&mut self) -> DashboardResult<()> {
        let request = match self.create.begin_submit() {
            Ok(Some(request)) => request,
            // Duplicate submit while in flight; nothing to do
            Ok(None) => return Ok(()),
            Err(err) => return Err(err),
        };

        info!(
            amount = %request.amount,
            currency = %request.currency,
            "submitting order creation"
        );

        match self.orders.create_order(&request).await {
            Ok(order) => {
                info!(id = %order.id, "order created");
                self.create.complete(Ok(order));
                if let Err(err) = self.refresh_orders().await {
                    error!(error = %err, "list refresh after creation failed");
                }
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "order creation failed");
                self.create.complete(Err(err.clone()));
                Err(err)
            }
        }
    }

    /// Shell's close event for the shared modal: clears the detail
    /// selection (cancelling any in-flight fetch) and dismisses the
    /// creation result.
    pub fn dismiss(&mut self) {
        self.detail.clear();
        self.create.close();
    }

    pub fn snapshot(&self) -> &OrderListSnapshot {
        &self.snapshot
    }

    /// Whether a list refresh is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn detail(&self) -> &DetailState {
        self.detail.state()
    }

    pub fn selection(&self) -> Option<&OrderId> {
        self.detail.selection()
    }

    pub fn create_phase(&self) -> CreatePhase {
        self.create.phase()
    }

    pub fn created_order(&self) -> Option<&Order> {
        self.create.created()
    }

    pub fn create_error(&self) -> Option<&DashboardError> {
        self.create.error()
    }

    pub fn form(&self) -> &OrderForm {
        self.create.form()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OrderData, OrderDetails, OrderStatus};
    use crate::ports::CreateOrderRequest;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted port: queued results per operation, recorded call
    /// counts, so tests drive success, failure, and ordering
    /// deterministically without a network.
    #[derive(Default)]
    struct ScriptedOrderService {
        list_results: Mutex<VecDeque<DashboardResult<OrderListSnapshot>>>,
        get_results: Mutex<VecDeque<DashboardResult<Order>>>,
        create_results: Mutex<VecDeque<DashboardResult<Order>>>,
        list_calls: AtomicUsize,
        get_calls: AtomicUsize,
        create_calls: AtomicUsize,
    }

    impl ScriptedOrderService {
        fn push_list(&self, result: DashboardResult<OrderListSnapshot>) {
            self.list_results.lock().unwrap().push_back(result);
        }

        fn push_get(&self, result: DashboardResult<Order>) {
            self.get_results.lock().unwrap().push_back(result);
        }

        fn push_create(&self, result: DashboardResult<Order>) {
            self.create_results.lock().unwrap().push_back(result);
        }

        fn list_calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }

        fn get_calls(&self) -> usize {
            self.get_calls.load(Ordering::SeqCst)
        }

        fn create_calls(&self) -> usize {
            self.create_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl OrderServicePort for ScriptedOrderService {
        async fn list_orders(&self) -> DashboardResult<OrderListSnapshot> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.list_results
                .lock()
                .unwrap()
                .pop_front()
                .expect("unscripted list_orders call")
        }

        async fn get_order(&self, _id: &OrderId) -> DashboardResult<Order> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);
            self.get_results
                .lock()
                .unwrap()
                .pop_front()
                .expect("unscripted get_order call")
        }

        async fn create_order(&self, _request: &CreateOrderRequest) -> DashboardResult<Order> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            self.create_results
                .lock()
                .unwrap()
                .pop_front()
                .expect("unscripted create_order call")
        }
    }

    fn order(id: &str, status: OrderStatus) -> Order {
        Order {
            id: OrderId::from(id),
            status: Some(status),
            details: Some(OrderDetails {
                code: Some(format!("PAY-{}", id)),
                status: Some(status),
                data: Some(OrderData {
                    total_fee: None,
                    currency: Some("USDT".to_string()),
                    qrcode_link: (status == OrderStatus::Pending)
                        .then(|| format!("https://qr.example/{}", id)),
                }),
            }),
        }
    }

    fn snapshot(ids: &[&str]) -> OrderListSnapshot {
        OrderListSnapshot::new(
            ids.iter()
                .map(|id| order(id, OrderStatus::Pending))
                .collect(),
        )
    }

    fn service() -> (DashboardService<ScriptedOrderService>, Arc<ScriptedOrderService>) {
        let port = Arc::new(ScriptedOrderService::default());
        (DashboardService::new(port.clone()), port)
    }

    #[tokio::test]
    async fn test_initial_refresh_populates_snapshot() {
        let (mut dashboard, port) = service();
        port.push_list(Ok(snapshot(&["a", "b"])));

        dashboard.refresh_orders().await.unwrap();
        assert_eq!(dashboard.snapshot().len(), 2);
        assert_eq!(dashboard.snapshot().orders()[0].id.as_str(), "a");
    }

    #[tokio::test]
    async fn test_refresh_is_idempotent_without_mutation() {
        let (mut dashboard, port) = service();
        port.push_list(Ok(snapshot(&["a", "b"])));
        port.push_list(Ok(snapshot(&["a", "b"])));

        dashboard.refresh_orders().await.unwrap();
        let first = dashboard.snapshot().clone();
        dashboard.refresh_orders().await.unwrap();

        assert_eq!(dashboard.snapshot(), &first);
    }

    #[tokio::test]
    async fn test_refresh_exposes_loading_indicator() {
        let (mut dashboard, port) = service();
        assert!(!dashboard.is_refreshing());

        dashboard.begin_refresh();
        assert!(dashboard.is_refreshing());

        port.push_list(Ok(snapshot(&["a"])));
        let result = dashboard.fetch_orders().await;
        dashboard.complete_refresh(result).unwrap();

        assert!(!dashboard.is_refreshing());
        assert_eq!(dashboard.snapshot().len(), 1);

        // The indicator drops on failure too, snapshot untouched
        dashboard.begin_refresh();
        let err = Err(DashboardError::Retrieval("timeout".to_string()));
        assert!(dashboard.complete_refresh(err).is_err());
        assert!(!dashboard.is_refreshing());
        assert_eq!(dashboard.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_retains_previous_snapshot() {
        let (mut dashboard, port) = service();
        port.push_list(Ok(snapshot(&["a"])));
        port.push_list(Err(DashboardError::Retrieval("timeout".to_string())));

        dashboard.refresh_orders().await.unwrap();
        let result = dashboard.refresh_orders().await;

        assert!(result.is_err());
        assert_eq!(dashboard.snapshot().len(), 1);
        assert_eq!(dashboard.snapshot().orders()[0].id.as_str(), "a");
    }

    #[tokio::test]
    async fn test_select_order_binds_detail() {
        let (mut dashboard, port) = service();
        port.push_get(Ok(order("a", OrderStatus::Settled)));

        dashboard.select_order(OrderId::from("a")).await;

        match dashboard.detail() {
            DetailState::Loaded(order) => {
                assert_eq!(order.id.as_str(), "a");
                assert!(!order.shows_qr());
            }
            other => panic!("expected loaded detail, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_detail_fetch_surfaces_error() {
        let (mut dashboard, port) = service();
        port.push_get(Err(DashboardError::NotFound(OrderId::from("ghost"))));

        dashboard.select_order(OrderId::from("ghost")).await;

        assert_eq!(
            dashboard.detail(),
            &DetailState::Failed(DashboardError::NotFound(OrderId::from("ghost")))
        );
    }

    #[tokio::test]
    async fn test_selection_change_race_resolves_to_newest() {
        let (mut dashboard, port) = service();
        port.push_get(Ok(order("b", OrderStatus::Pending)));
        port.push_get(Ok(order("a", OrderStatus::Pending)));

        // Select A, then B before A's fetch resolves
        let ticket_a = dashboard.begin_detail(OrderId::from("a"));
        let ticket_b = dashboard.begin_detail(OrderId::from("b"));

        // B resolves first and is applied; A's late result is discarded
        let result_b = dashboard.fetch_detail(&OrderId::from("b")).await;
        assert!(dashboard.complete_detail(ticket_b, result_b));

        let result_a = dashboard.fetch_detail(&OrderId::from("a")).await;
        assert!(!dashboard.complete_detail(ticket_a, result_a));

        match dashboard.detail() {
            DetailState::Loaded(order) => assert_eq!(order.id.as_str(), "b"),
            other => panic!("expected loaded detail, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_creation_success_flow() {
        let (mut dashboard, port) = service();
        port.push_create(Ok(order("new", OrderStatus::Pending)));
        port.push_list(Ok(snapshot(&["a", "new"])));

        dashboard.set_form_field(FormField::Amount, "10".to_string());
        dashboard.submit_create().await.unwrap();

        assert_eq!(dashboard.create_phase(), CreatePhase::Created);
        let created = dashboard.created_order().unwrap();
        assert_eq!(created.resolved_status(), OrderStatus::Pending);
        assert!(!created.qrcode_link().unwrap().is_empty());

        // Exactly one list refresh, sequenced after the creation
        assert_eq!(port.create_calls(), 1);
        assert_eq!(port.list_calls(), 1);
        assert_eq!(dashboard.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn test_creation_validation_makes_no_network_call() {
        let (mut dashboard, port) = service();
        dashboard.set_form_field(FormField::Amount, "".to_string());

        let result = dashboard.submit_create().await;

        match result {
            Err(DashboardError::Validation(errors)) => {
                assert!(errors.for_field("amount").is_some());
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(dashboard.create_phase(), CreatePhase::Idle);
        assert_eq!(port.create_calls(), 0);
        assert_eq!(port.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_creation_failure_returns_to_idle_without_refresh() {
        let (mut dashboard, port) = service();
        port.push_create(Err(DashboardError::Retrieval("503".to_string())));

        dashboard.set_form_field(FormField::Amount, "10".to_string());
        let result = dashboard.submit_create().await;

        assert!(result.is_err());
        assert_eq!(dashboard.create_phase(), CreatePhase::Idle);
        assert!(dashboard.create_error().is_some());
        assert_eq!(port.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_failed_post_creation_refresh_keeps_creation() {
        let (mut dashboard, port) = service();
        port.push_list(Ok(snapshot(&["a"])));
        port.push_create(Ok(order("new", OrderStatus::Pending)));
        port.push_list(Err(DashboardError::Retrieval("timeout".to_string())));

        dashboard.refresh_orders().await.unwrap();
        dashboard.set_form_field(FormField::Amount, "10".to_string());
        dashboard.submit_create().await.unwrap();

        // Creation stands; the stale-but-good snapshot is retained
        assert_eq!(dashboard.create_phase(), CreatePhase::Created);
        assert_eq!(dashboard.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_dismiss_clears_detail_and_creation() {
        let (mut dashboard, port) = service();
        port.push_get(Ok(order("a", OrderStatus::Pending)));
        dashboard.select_order(OrderId::from("a")).await;

        dashboard.dismiss();

        assert_eq!(dashboard.detail(), &DetailState::Empty);
        assert!(dashboard.selection().is_none());
        assert_eq!(dashboard.create_phase(), CreatePhase::Idle);
        assert_eq!(port.get_calls(), 1);
    }
}
