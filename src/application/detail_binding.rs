use crate::domain::errors::DashboardError;
use crate::domain::{Order, OrderId};
use tracing::debug;

/// State of the bound detail view.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    /// No selection
    Empty,
    /// Fetch in flight for the current selection
    Loading,
    /// Detail fetched and bound
    Loaded(Order),
    /// Fetch failed; bound value is absent and the error is surfaced
    Failed(DashboardError),
}

/// Token tying a fetch completion back to the selection it was issued
/// for. Completions carrying a stale token are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailTicket {
    generation: u64,
}

/// Binds the currently selected order id to its detail fetch.
///
/// Every selection change bumps a generation counter and hands out a
/// ticket; a completion is applied only if its ticket is still current.
/// A slow response for a superseded selection, or one arriving after
/// the view was torn down, resolves to a no-op instead of clobbering
/// the newer state.
#[derive(Debug, Default)]
pub struct DetailBinding {
    selection: Option<OrderId>,
    generation: u64,
    state: DetailState,
}

impl Default for DetailState {
    fn default() -> Self {
        DetailState::Empty
    }
}

impl DetailBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new selection and start loading. Returns the ticket the
    /// eventual completion must present.
    pub fn begin(&mut self, id: OrderId) -> DetailTicket {
        self.generation += 1;
        self.selection = Some(id);
        self.state = DetailState::Loading;
        DetailTicket {
            generation: self.generation,
        }
    }

    /// Clear the selection. Bumps the generation so any in-flight fetch
    /// is discarded when it resolves.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.selection = None;
        self.state = DetailState::Empty;
    }

    /// Apply a fetch result if the ticket is still current. Returns
    /// whether the result was applied.
    pub fn complete(
        &mut self,
        ticket: DetailTicket,
        result: Result<Order, DashboardError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                "discarding stale detail fetch result"
            );
            return false;
        }

        self.state = match result {
            Ok(order) => DetailState::Loaded(order),
            Err(err) => DetailState::Failed(err),
        };
        true
    }

    pub fn selection(&self) -> Option<&OrderId> {
        self.selection.as_ref()
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, DetailState::Loading)
    }

    /// The bound order, if one is loaded.
    pub fn order(&self) -> Option<&Order> {
        match &self.state {
            DetailState::Loaded(order) => Some(order),
            _ => None,
        }
    }
}
