//! Product record
//!
//! The JSON form of this struct is what lives in the cache and what callers
//! receive. Renaming a field breaks entries written by older deployments.

use serde::{Deserialize, Serialize};

/// A product as read from the durable store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn widget() -> Product {
        Product {
            id: 42,
            name: "Widget".to_string(),
            description: "A widget".to_string(),
            price: 9.99,
        }
    }

    #[test]
    fn test_product_wire_shape() {
        let value = serde_json::to_value(widget()).unwrap();
        assert_eq!(
            value,
            json!({"id": 42, "name": "Widget", "description": "A widget", "price": 9.99})
        );
    }

    #[test]
    fn test_product_field_order_is_stable() {
        let encoded = serde_json::to_string(&widget()).unwrap();
        assert_eq!(
            encoded,
            r#"{"id":42,"name":"Widget","description":"A widget","price":9.99}"#
        );
    }

    #[test]
    fn test_product_decodes_previously_cached_entry() {
        let cached = r#"{"id":3,"name":"Gadget","description":"","price":0.5}"#;
        let product: Product = serde_json::from_str(cached).unwrap();
        assert_eq!(product.id, 3);
        assert_eq!(product.description, "");
        assert_eq!(product.price, 0.5);
    }

    #[test]
    fn test_product_rejects_missing_fields() {
        let truncated = r#"{"id":3,"name":"Gadget"}"#;
        assert!(serde_json::from_str::<Product>(truncated).is_err());
    }
}
