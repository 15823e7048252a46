use crate::domain::errors::{DashboardError, DashboardResult, FieldErrors};
use crate::ports::{CreateOrderRequest, DEFAULT_TERMINAL_TYPE};

/// Form fields the visual shell can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Amount,
    Currency,
    GoodCategory,
}

/// Mutable creation form state behind the shell's field-change events.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderForm {
    pub amount: String,
    pub currency: String,
    pub good_category: Option<String>,
    pub terminal_type: String,
}

impl Default for OrderForm {
    fn default() -> Self {
        Self {
            amount: String::new(),
            currency: "USDT".to_string(),
            good_category: None,
            terminal_type: DEFAULT_TERMINAL_TYPE.to_string(),
        }
    }
}

impl OrderForm {
    pub fn set_field(&mut self, field: FormField, value: String) {
        match field {
            FormField::Amount => self.amount = value,
            FormField::Currency => self.currency = value,
            FormField::GoodCategory => {
                self.good_category = if value.is_empty() { None } else { Some(value) }
            }
        }
    }

    /// Validate required fields and build the creation request.
    ///
    /// Validation runs locally; a failure here never produces a
    /// network call.
    pub fn validate(&self) -> DashboardResult<CreateOrderRequest> {
        let mut errors = FieldErrors::new();

        if self.amount.trim().is_empty() {
            errors.push("amount", "amount is required");
        }
        if self.currency.trim().is_empty() {
            errors.push("currency", "currency is required");
        }

        if !errors.is_empty() {
            return Err(DashboardError::Validation(errors));
        }

        Ok(CreateOrderRequest {
            amount: self.amount.trim().to_string(),
            currency: self.currency.trim().to_string(),
            good_category: self.good_category.clone(),
            terminal_type: self.terminal_type.clone(),
        })
    }
}
