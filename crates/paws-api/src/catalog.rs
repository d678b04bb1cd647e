//! Catalog read endpoints.
//!
//! Consumed by the add-to-cart callers; the cart itself only ever sees
//! the resulting records.

use serde_json::Value;

use paws_commerce::catalog::CatalogRecord;

use crate::transport::HttpTransport;
use crate::{envelope, ApiClient, ApiError};

impl<T: HttpTransport> ApiClient<T> {
    /// `GET /products`.
    pub async fn products(&self) -> Result<Vec<CatalogRecord>, ApiError> {
        let value = self.get("/products").await?;
        parse_records(&value)
    }

    /// `GET /services`.
    pub async fn services(&self) -> Result<Vec<CatalogRecord>, ApiError> {
        let value = self.get("/services").await?;
        parse_records(&value)
    }
}

fn parse_records(value: &Value) -> Result<Vec<CatalogRecord>, ApiError> {
    serde_json::from_value(envelope::data(value).clone())
        .map_err(|e| ApiError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::MockTransport;
    use crate::ApiConfig;
    use serde_json::json;

    #[tokio::test]
    async fn test_products_parses_wrapped_list() {
        let transport = MockTransport::replying(vec![(
            200,
            json!({"data": [
                {"id": "p1", "name": "Dog Shampoo", "price": 100, "stockQuantity": 3},
                {"id": "p2", "name": "Chew Toy", "price": 50, "promotion": {"price": 40}}
            ]}),
        )]);
        let client = ApiClient::with_transport(ApiConfig::new("http://backend/api"), transport);

        let records = client.products().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].stock_quantity, Some(3));
        assert!(records[1].has_promotion());
    }

    #[tokio::test]
    async fn test_services_parses_bare_list() {
        let transport = MockTransport::replying(vec![(
            200,
            json!([{"id": "s1", "name": "Home Grooming", "price": 250, "kind": "service"}]),
        )]);
        let client = ApiClient::with_transport(ApiConfig::new("http://backend/api"), transport);

        let records = client.services().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind.as_str(), "service");
    }
}
