//! Order History HTTP Adapter
//!
//! Implements [`OrderHistoryPort`] against the trading backend's REST
//! endpoint. This is a collaborator boundary: orders are fetched and
//! refreshed independently of the price stream, and no credentials
//! ever attach to the stream itself.

use async_trait::async_trait;

use crate::application::ports::{OrderHistoryError, OrderHistoryPort};
use crate::domain::orders::Order;
use crate::infrastructure::config::OrdersSettings;

/// HTTP client for the order-history endpoint.
#[derive(Debug)]
pub struct OrderHistoryClient {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl OrderHistoryClient {
    /// Create a new client from settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(settings: &OrdersSettings) -> Result<Self, OrderHistoryError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| OrderHistoryError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            auth_token: settings.auth_token.clone(),
        })
    }

    async fn get_orders(&self) -> Result<Vec<Order>, OrderHistoryError> {
        let url = format!("{}/api/orders", self.base_url);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| OrderHistoryError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(OrderHistoryError::Status { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| OrderHistoryError::Parse(e.to_string()))
    }
}

#[async_trait]
impl OrderHistoryPort for OrderHistoryClient {
    async fn fetch_orders(&self) -> Result<Vec<Order>, OrderHistoryError> {
        let orders = self.get_orders().await?;
        tracing::debug!(count = orders.len(), "fetched order history");
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let settings = OrdersSettings {
            base_url: "http://localhost:8080/".to_string(),
            auth_token: None,
            timeout: Duration::from_secs(5),
        };

        let client = OrderHistoryClient::new(&settings).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn order_list_parses() {
        let json = r#"[
            {"id":"1","symbol":"AAPL","side":"buy","orderType":"market",
             "quantity":5,"price":150.0,"status":"done",
             "createdAt":"2024-01-15T10:00:00Z"},
            {"id":"2","symbol":"TSLA","side":"sell","orderType":"limit",
             "quantity":3,"price":250.0,"status":"pending",
             "createdAt":"2024-01-16T09:30:00Z"}
        ]"#;

        let orders: Vec<Order> = serde_json::from_str(json).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].symbol, "AAPL");
        assert_eq!(orders[1].quantity, 3);
    }
}
