use contracts::domain::order::OrderSummary;
use contracts::shared::api::{ApiError, TagOrderRequest, TagOrderResponse};
use gloo_net::http::Request;

use crate::shared::api_utils::api_base;

/// Ошибка загрузки заказа: отказ сервера отделён от проблем транспорта,
/// потому что тексты отказов показываются пользователю как есть.
#[derive(Debug, Clone)]
pub enum FetchError {
    Rejected(String),
    Transport(String),
}

/// Fetch order details by display number or name
pub async fn fetch_order(identifier: &str) -> Result<OrderSummary, FetchError> {
    let url = format!(
        "{}/api/get_order/{}",
        api_base(),
        urlencoding::encode(identifier)
    );

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| FetchError::Transport(format!("Failed to send request: {}", e)))?;

    if !response.ok() {
        let message = match response.json::<ApiError>().await {
            Ok(err) => err.error,
            Err(_) => format!("Failed to fetch order: {}", response.status()),
        };
        return Err(FetchError::Rejected(message));
    }

    response
        .json::<OrderSummary>()
        .await
        .map_err(|e| FetchError::Transport(format!("Failed to parse response: {}", e)))
}

/// Request the Paid tag for a single order
pub async fn tag_order(order_id: i64) -> Result<TagOrderResponse, String> {
    let response = Request::post(&format!("{}/api/tag_order", api_base()))
        .json(&TagOrderRequest { order_id })
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    response
        .json::<TagOrderResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
