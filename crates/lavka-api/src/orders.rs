//! Order endpoints for the storefront API client.

use reqwest::Method;

use crate::client::StoreClient;
use crate::error::ApiError;
use crate::types::{Order, OrderPayload, OrderUpdate};

impl StoreClient {
    /// Lists all orders belonging to the current API key.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Transport`] / [`ApiError::Http`] as for any call.
    /// - [`ApiError::Deserialize`] if the body is not an order list.
    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        let body = self.request_json(Method::GET, "orders", &[]).await?;
        serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
            context: "listOrders".to_string(),
            source: e,
        })
    }

    /// Fetches one order by identifier.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Transport`] / [`ApiError::Http`] as for any call.
    /// - [`ApiError::Deserialize`] if the body is not an order.
    pub async fn get_order(&self, id: i64) -> Result<Order, ApiError> {
        let body = self
            .request_json(Method::GET, &format!("orders/{id}"), &[])
            .await?;
        serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
            context: format!("getOrder(id={id})"),
            source: e,
        })
    }

    /// Creates an order from a full payload and returns the stored order.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Transport`] / [`ApiError::Http`] as for any call; HTTP
    ///   failures carry the server's validation message.
    /// - [`ApiError::Deserialize`] if the body is not the created order.
    pub async fn create_order(&self, payload: &OrderPayload) -> Result<Order, ApiError> {
        let body = self
            .request_json_with_body(Method::POST, "orders", payload)
            .await?;
        serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
            context: "createOrder".to_string(),
            source: e,
        })
    }

    /// Replaces an order's editable fields.
    ///
    /// # Errors
    ///
    /// Same classification as [`StoreClient::create_order`].
    pub async fn update_order(&self, id: i64, payload: &OrderUpdate) -> Result<Order, ApiError> {
        let body = self
            .request_json_with_body(Method::PUT, &format!("orders/{id}"), payload)
            .await?;
        serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
            context: format!("updateOrder(id={id})"),
            source: e,
        })
    }

    /// Deletes an order. The response body, if any, is discarded.
    ///
    /// # Errors
    ///
    /// [`ApiError::Transport`] / [`ApiError::Http`] as for any call.
    pub async fn delete_order(&self, id: i64) -> Result<(), ApiError> {
        self.request_json(Method::DELETE, &format!("orders/{id}"), &[])
            .await?;
        Ok(())
    }
}
