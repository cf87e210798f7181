use serde::{Deserialize, Serialize};

/// Тело ошибки, которое backend отдаёт вместе с не-2xx статусом
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// POST /api/tag_order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagOrderRequest {
    pub order_id: i64,
}

/// Ответ на простановку тега. Отказ — это success=false с текстом,
/// а не 5xx: клиент различает их по содержимому.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagOrderResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TagOrderResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// POST /api/mark_paid_batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchMarkPaidRequest {
    pub orders: Vec<i64>,
}

/// Результат по одному заказу из batch-запроса
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItemResult {
    pub order_id: i64,
    /// "success" | "skipped" | "error"
    pub status: String,
    pub message: String,
}

/// POST /api/check_csv_orders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckCsvRequest {
    pub orders: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckCsvResponse {
    pub results: Vec<CsvCheckResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvCheckResult {
    pub order_number: String,
    /// "Valid" | "Already Tagged Paid" | "Already Paid" | "Order Not Found" | текст ошибки
    pub status: String,
}
