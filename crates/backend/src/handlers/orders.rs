use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::order::{has_paid_tag, OrderSummary};
use contracts::shared::api::{
    ApiError, BatchItemResult, BatchMarkPaidRequest, CheckCsvRequest, CheckCsvResponse,
    CsvCheckResult, TagOrderRequest, TagOrderResponse,
};

use crate::shared::shopify::{self, tags, ShopifyError, ShopifyOrder};

fn to_summary(order: ShopifyOrder) -> OrderSummary {
    OrderSummary {
        order_id: order.id,
        order_name: order.name,
        city: order.shipping_address.and_then(|a| a.city),
        total_price: order.total_price.unwrap_or_default(),
        tags: order.tags,
        payment_status: order.financial_status,
    }
}

/// Handler для поиска заказа по номеру или имени
pub async fn get_order(
    Path(identifier): Path<String>,
) -> Result<Json<OrderSummary>, (StatusCode, Json<ApiError>)> {
    match shopify::client().find_order_by_name(&identifier).await {
        Ok(order) => Ok(Json(to_summary(order))),
        Err(ShopifyError::NotFound) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiError::new("Order not found")),
        )),
        Err(e) => {
            tracing::error!("Failed to fetch order {}: {}", identifier, e);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ApiError::with_details("Failed to fetch order", e.to_string())),
            ))
        }
    }
}

/// Handler для простановки тега Paid на один заказ.
///
/// Любой отказ — это success=false с текстом, а не 5xx: клиент массовой
/// пометки различает результаты по телу ответа.
pub async fn tag_order(Json(req): Json<TagOrderRequest>) -> Json<TagOrderResponse> {
    let client = shopify::client();

    let order = match client.get_order(req.order_id).await {
        Ok(order) => order,
        Err(ShopifyError::NotFound) => {
            return Json(TagOrderResponse::failure("Order not found"));
        }
        Err(e) => {
            tracing::error!("Failed to fetch order {}: {}", req.order_id, e);
            return Json(TagOrderResponse::failure("Failed to fetch order"));
        }
    };

    if tags::is_tagged_paid(&order.tags) {
        return Json(TagOrderResponse::failure("Already tagged Paid"));
    }

    match client
        .update_tags(order.id, &tags::append_paid_tag(&order.tags))
        .await
    {
        Ok(()) => Json(TagOrderResponse::ok()),
        Err(e) => {
            tracing::error!("Failed to update tags for order {}: {}", order.id, e);
            Json(TagOrderResponse::failure("Failed to update tags"))
        }
    }
}

/// Handler для массовой пометки: capture авторизованной транзакции,
/// если она есть, иначе тег Paid. Ошибки по одному заказу не прерывают
/// обработку остальных.
pub async fn mark_paid_batch(
    Json(req): Json<BatchMarkPaidRequest>,
) -> Json<Vec<BatchItemResult>> {
    let client = shopify::client();
    let mut results = Vec::with_capacity(req.orders.len());

    for order_id in req.orders {
        results.push(mark_one_paid(client, order_id).await);
    }

    Json(results)
}

async fn mark_one_paid(
    client: &'static shopify::ShopifyClient,
    order_id: i64,
) -> BatchItemResult {
    let item = |status: &str, message: &str| BatchItemResult {
        order_id,
        status: status.to_string(),
        message: message.to_string(),
    };

    let transactions = match client.list_transactions(order_id).await {
        Ok(transactions) => transactions,
        Err(e) => {
            tracing::error!("Failed to fetch transactions for {}: {}", order_id, e);
            return item("error", "Failed to fetch transactions");
        }
    };

    if let Some(auth) = transactions.iter().find(|t| t.kind == "authorization") {
        return match client
            .capture_transaction(order_id, auth.id, &auth.amount)
            .await
        {
            Ok(()) => item("success", "Payment captured"),
            Err(e) => {
                tracing::error!("Failed to capture transaction for {}: {}", order_id, e);
                item("error", "Failed to capture payment")
            }
        };
    }

    let order = match client.get_order(order_id).await {
        Ok(order) => order,
        Err(e) => {
            tracing::error!("Failed to fetch order {}: {}", order_id, e);
            return item("error", "Failed to fetch order");
        }
    };

    if tags::is_tagged_paid(&order.tags) {
        return item("skipped", "Already has 'Paid' tag");
    }

    match client
        .update_tags(order_id, &tags::append_paid_tag(&order.tags))
        .await
    {
        Ok(()) => item("success", "Tag added"),
        Err(e) => {
            tracing::error!("Failed to update tags for {}: {}", order_id, e);
            item("error", "Failed to update tags")
        }
    }
}

/// Handler для серверной проверки номеров из CSV: на каждый номер
/// возвращается строка статуса, порядок совпадает с запросом.
pub async fn check_csv_orders(Json(req): Json<CheckCsvRequest>) -> Json<CheckCsvResponse> {
    let client = shopify::client();
    let mut results = Vec::with_capacity(req.orders.len());

    for raw_number in req.orders {
        let order_number = raw_number.trim_start_matches('#').to_string();

        let status = match client.find_order_by_name(&order_number).await {
            Ok(order) => {
                if has_paid_tag(&order.tags) {
                    "Already Tagged Paid".to_string()
                } else if order.financial_status.as_deref() == Some("paid") {
                    "Already Paid".to_string()
                } else {
                    "Valid".to_string()
                }
            }
            Err(ShopifyError::NotFound) => "Order Not Found".to_string(),
            Err(e) => {
                tracing::error!("Failed to check order {}: {}", order_number, e);
                format!("Error: {e}")
            }
        };

        results.push(CsvCheckResult {
            order_number,
            status,
        });
    }

    Json(CheckCsvResponse { results })
}
