// ============================================================================
// Dashboard Core - Product Entity
// File: crates/dashboard-core/src/domain/product.rs
// Description: Product record mirrored from the remote service, plus drafts
// ============================================================================

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::DomainError;

pub type ProductId = i64;

pub const NAME_REQUIRED: &str = "Product Name cannot be empty.";
pub const UNIT_PRICE_INVALID: &str = "Unit Price must be a number greater than 0.";
pub const QUANTITY_INVALID: &str = "Quantity must be a number greater than 0.";

/// Product as held by the remote service. Wire names are the service's own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "nama_produk")]
    pub name: String,
    #[serde(rename = "harga_satuan")]
    pub unit_price: f64,
    pub quantity: f64,
}

impl Product {
    pub fn from_draft(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            unit_price: draft.unit_price,
            quantity: draft.quantity,
        }
    }

    pub fn stock_value(&self) -> f64 {
        self.unit_price * self.quantity
    }

    /// First space-separated word of the name.
    pub fn category(&self) -> &str {
        self.name.split(' ').next().unwrap_or_default()
    }

    pub fn matches(&self, needle_lowercase: &str) -> bool {
        needle_lowercase.is_empty() || self.name.to_lowercase().contains(needle_lowercase)
    }
}

/// A numeric form field: either a JSON number or the text the user typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// `None` when the input is not a finite number.
    pub fn coerce(&self) -> Option<f64> {
        let value = match self {
            NumericInput::Number(n) => *n,
            NumericInput::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

/// Raw product form as submitted, before coercion and validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductForm {
    #[serde(default, alias = "nama_produk")]
    pub name: String,
    #[serde(default, alias = "harga_satuan")]
    pub unit_price: Option<NumericInput>,
    #[serde(default)]
    pub quantity: Option<NumericInput>,
}

impl ProductForm {
    pub fn new(
        name: impl Into<String>,
        unit_price: impl Into<NumericInput>,
        quantity: impl Into<NumericInput>,
    ) -> Self {
        Self {
            name: name.into(),
            unit_price: Some(unit_price.into()),
            quantity: Some(quantity.into()),
        }
    }
}

/// Validated product fields, ready to send to the remote service.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ProductDraft {
    #[validate(length(min = 1, message = "Product Name cannot be empty."))]
    pub name: String,

    #[validate(range(exclusive_min = 0.0, message = "Unit Price must be a number greater than 0."))]
    pub unit_price: f64,

    #[validate(range(exclusive_min = 0.0, message = "Quantity must be a number greater than 0."))]
    pub quantity: f64,
}

impl TryFrom<ProductForm> for ProductDraft {
    type Error = DomainError;

    /// Checks fields in form order and reports the first failure only.
    fn try_from(form: ProductForm) -> Result<Self, Self::Error> {
        let name = form.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::Validation(NAME_REQUIRED.into()));
        }

        let unit_price = form
            .unit_price
            .as_ref()
            .and_then(NumericInput::coerce)
            .ok_or_else(|| DomainError::Validation(UNIT_PRICE_INVALID.into()))?;
        let quantity = form
            .quantity
            .as_ref()
            .and_then(NumericInput::coerce)
            .ok_or_else(|| DomainError::Validation(QUANTITY_INVALID.into()))?;

        let draft = Self {
            name,
            unit_price,
            quantity,
        };

        draft.validate().map_err(|errors| {
            let message = ["name", "unit_price", "quantity"]
                .iter()
                .find_map(|field| {
                    errors
                        .field_errors()
                        .get(*field)
                        .and_then(|list| list.first())
                        .and_then(|e| e.message.as_ref())
                        .map(|m| m.to_string())
                })
                .unwrap_or_else(|| errors.to_string());
            DomainError::Validation(message)
        })?;

        Ok(draft)
    }
}
