use crate::application::dto::{FormField, OrderForm};
use crate::domain::errors::{DashboardError, DashboardResult};
use crate::domain::Order;
use crate::ports::CreateOrderRequest;
use tracing::debug;

/// Creation workflow phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatePhase {
    /// Form shown, nothing in flight
    Idle,
    /// Creation request in flight; duplicate submits are ignored
    Submitting,
    /// Order created; its QR code is on display until dismissed
    Created,
}

/// State machine for creating one order.
///
/// idle -> submitting on a validated submit; submitting -> created on
/// success (the service response, a pending order with its QR link, is
/// held as the result); submitting -> idle on failure with the error
/// attached so the form can be resubmitted. `close` clears the held
/// result and returns the same instance to a state equivalent to idle.
#[derive(Debug, Default)]
pub struct CreateWorkflow {
    phase: CreatePhase,
    form: OrderForm,
    created: Option<Order>,
    error: Option<DashboardError>,
}

impl Default for CreatePhase {
    fn default() -> Self {
        CreatePhase::Idle
    }
}

impl CreateWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, field: FormField, value: String) {
        self.form.set_field(field, value);
    }

    /// Validate the form and enter `Submitting`.
    ///
    /// Returns the request to send, or the validation error. On a
    /// validation failure the workflow stays in `Idle` with the
    /// per-field errors attached and no request is produced. Returns
    /// `Ok(None)` when a submit is already in flight.
    pub fn begin_submit(&mut self) -> DashboardResult<Option<CreateOrderRequest>> {
        if self.phase == CreatePhase::Submitting {
            debug!("ignoring duplicate submit while a creation is in flight");
            return Ok(None);
        }

        match self.form.validate() {
            Ok(request) => {
                self.phase = CreatePhase::Submitting;
                self.error = None;
                Ok(Some(request))
            }
            Err(err) => {
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Apply the creation outcome.
    pub fn complete(&mut self, result: Result<Order, DashboardError>) {
        match result {
            Ok(order) => {
                self.phase = CreatePhase::Created;
                self.created = Some(order);
                self.error = None;
            }
            Err(err) => {
                // No partial order is considered created client-side
                self.phase = CreatePhase::Idle;
                self.created = None;
                self.error = Some(err);
            }
        }
    }

    /// Dismiss the creation view: drop the held result and error. Form
    /// field values persist so a follow-up order starts from the same
    /// inputs.
    pub fn close(&mut self) {
        self.phase = CreatePhase::Idle;
        self.created = None;
        self.error = None;
    }

    pub fn phase(&self) -> CreatePhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == CreatePhase::Submitting
    }

    pub fn form(&self) -> &OrderForm {
        &self.form
    }

    /// The created order while the workflow is in `Created`.
    pub fn created(&self) -> Option<&Order> {
        self.created.as_ref()
    }

    pub fn error(&self) -> Option<&DashboardError> {
        self.error.as_ref()
    }
}
