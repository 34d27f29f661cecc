//! Product rows destined for the `products` table

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One product row as accepted by the bulk insert endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub price_list_id: Uuid,
    pub supplier_id: Uuid,
    pub supplier_code: String,
    pub description: String,
    #[serde(default)]
    pub selling_uom: Option<String>,
    #[serde(default)]
    pub pricing_uom: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl ProductRecord {
    pub fn new<C: Into<String>, D: Into<String>>(
        price_list_id: Uuid,
        supplier_id: Uuid,
        supplier_code: C,
        description: D,
    ) -> Self {
        Self {
            price_list_id,
            supplier_id,
            supplier_code: supplier_code.into(),
            description: description.into(),
            selling_uom: None,
            pricing_uom: None,
            price: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_uoms<S: Into<String>>(mut self, selling: S, pricing: S) -> Self {
        self.selling_uom = Some(selling.into());
        self.pricing_uom = Some(pricing.into());
        self
    }

    /// Rows without a supplier code or description are never imported
    pub fn is_importable(&self) -> bool {
        !self.supplier_code.trim().is_empty() && !self.description.trim().is_empty()
    }

    /// Trim the identifying text fields in place
    pub fn normalize(mut self) -> Self {
        let code = self.supplier_code.trim();
        if code.len() != self.supplier_code.len() {
            self.supplier_code = code.to_string();
        }
        let desc = self.description.trim();
        if desc.len() != self.description.len() {
            self.description = desc.to_string();
        }
        self
    }
}
