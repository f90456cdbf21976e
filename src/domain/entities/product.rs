//! # Product Entity
//!
//! Represents a product record resolved by barcode.
//!
//! This module provides the [`Product`] entity returned by product
//! providers and stored in product caches.
//!
//! # Examples
//!
//! ```
//! use getproduct::domain::entities::Product;
//! use getproduct::domain::value_objects::Barcode;
//!
//! let product = Product::builder(Barcode::new("111").unwrap())
//!     .name("TestProduct")
//!     .unit("pcs")
//!     .build();
//!
//! assert_eq!(product.rating(), 2);
//! ```

use crate::domain::value_objects::Barcode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A product description resolved by barcode.
///
/// Products are immutable after construction. The [`rating`](Self::rating)
/// reflects how complete the description is and is used to pick the best
/// answer when several providers respond.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// The barcode this product is keyed by.
    barcode: Barcode,
    /// Product name.
    #[serde(default)]
    name: String,
    /// Unit of measure.
    #[serde(default)]
    unit: String,
    /// Free-form description.
    #[serde(default)]
    description: String,
    /// Manufacturer name.
    #[serde(default)]
    manufacturer: String,
}

impl Product {
    /// Creates a product with all descriptive fields.
    #[must_use]
    pub fn new(
        barcode: Barcode,
        name: impl Into<String>,
        unit: impl Into<String>,
        description: impl Into<String>,
        manufacturer: impl Into<String>,
    ) -> Self {
        Self {
            barcode,
            name: name.into(),
            unit: unit.into(),
            description: description.into(),
            manufacturer: manufacturer.into(),
        }
    }

    /// Returns a builder for constructing a product.
    #[must_use]
    pub fn builder(barcode: Barcode) -> ProductBuilder {
        ProductBuilder::new(barcode)
    }

    /// Returns the barcode.
    #[inline]
    #[must_use]
    pub fn barcode(&self) -> &Barcode {
        &self.barcode
    }

    /// Returns the product name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit of measure.
    #[inline]
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Returns the description.
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the manufacturer.
    #[inline]
    #[must_use]
    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    /// Returns the completeness rating of this product.
    ///
    /// One point per non-blank descriptive field (name, unit, description,
    /// manufacturer), so the rating ranges from 0 to 4.
    #[must_use]
    pub fn rating(&self) -> u32 {
        [
            &self.name,
            &self.unit,
            &self.description,
            &self.manufacturer,
        ]
        .into_iter()
        .map(|field| u32::from(!field.trim().is_empty()))
        .sum()
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Product({} \"{}\")", self.barcode, self.name)
    }
}

/// Builder for constructing [`Product`] instances.
#[derive(Debug, Clone)]
pub struct ProductBuilder {
    barcode: Barcode,
    name: String,
    unit: String,
    description: String,
    manufacturer: String,
}

impl ProductBuilder {
    /// Creates a builder with only the barcode set.
    #[must_use]
    pub fn new(barcode: Barcode) -> Self {
        Self {
            barcode,
            name: String::new(),
            unit: String::new(),
            description: String::new(),
            manufacturer: String::new(),
        }
    }

    /// Sets the product name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the unit of measure.
    #[must_use]
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the manufacturer.
    #[must_use]
    pub fn manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = manufacturer.into();
        self
    }

    /// Builds the product.
    #[must_use]
    pub fn build(self) -> Product {
        Product {
            barcode: self.barcode,
            name: self.name,
            unit: self.unit,
            description: self.description,
            manufacturer: self.manufacturer,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn barcode() -> Barcode {
        Barcode::new("111").unwrap()
    }

    #[test]
    fn new_sets_all_fields() {
        let product = Product::new(barcode(), "TestProduct", "pcs", "TestDescription", "TestM");
        assert_eq!(product.barcode().as_str(), "111");
        assert_eq!(product.name(), "TestProduct");
        assert_eq!(product.unit(), "pcs");
        assert_eq!(product.description(), "TestDescription");
        assert_eq!(product.manufacturer(), "TestM");
    }

    #[test]
    fn rating_counts_populated_fields() {
        assert_eq!(Product::builder(barcode()).build().rating(), 0);
        assert_eq!(Product::builder(barcode()).name("a").build().rating(), 1);
        assert_eq!(
            Product::builder(barcode())
                .name("a")
                .description("b")
                .manufacturer("c")
                .build()
                .rating(),
            3
        );
        assert_eq!(Product::new(barcode(), "a", "b", "c", "d").rating(), 4);
    }

    #[test]
    fn rating_ignores_blank_fields() {
        let product = Product::new(barcode(), "name", "  ", "\t", "");
        assert_eq!(product.rating(), 1);
    }

    #[test]
    fn serializes_without_rating() {
        let product = Product::new(barcode(), "TestProduct", "pcs", "", "TestM");
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["barcode"], "111");
        assert_eq!(json["name"], "TestProduct");
        assert!(json.get("rating").is_none());
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let product: Product = serde_json::from_str(r#"{"barcode":"111","name":"x"}"#).unwrap();
        assert_eq!(product.name(), "x");
        assert_eq!(product.manufacturer(), "");
    }

    #[test]
    fn display() {
        let product = Product::builder(barcode()).name("Milk").build();
        assert_eq!(product.to_string(), "Product(111 \"Milk\")");
    }
}
