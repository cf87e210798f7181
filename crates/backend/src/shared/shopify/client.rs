use once_cell::sync::OnceCell;
use serde::Deserialize;
use thiserror::Error;

use crate::shared::config::ShopifyConfig;

#[derive(Debug, Error)]
pub enum ShopifyError {
    #[error("shopify request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("shopify returned {code}: {body}")]
    Status { code: u16, body: String },
    #[error("order not found")]
    NotFound,
}

/// Заказ в том виде, в котором его присылает Admin API
#[derive(Debug, Clone, Deserialize)]
pub struct ShopifyOrder {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub financial_status: Option<String>,
    #[serde(default)]
    pub total_price: Option<String>,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub shipping_address: Option<ShippingAddress>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShippingAddress {
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub kind: String,
    pub amount: String,
}

#[derive(Deserialize)]
struct OrdersEnvelope {
    #[serde(default)]
    orders: Vec<ShopifyOrder>,
}

#[derive(Deserialize)]
struct OrderEnvelope {
    order: ShopifyOrder,
}

#[derive(Deserialize)]
struct TransactionsEnvelope {
    #[serde(default)]
    transactions: Vec<Transaction>,
}

/// Клиент Shopify Admin API (REST, JSON)
pub struct ShopifyClient {
    http: reqwest::Client,
    store_url: String,
    api_version: String,
    access_token: String,
}

static CLIENT: OnceCell<ShopifyClient> = OnceCell::new();

/// Инициализация глобального клиента из конфигурации. Вызывается один
/// раз при старте, до первого запроса.
pub fn init(config: &ShopifyConfig) -> anyhow::Result<()> {
    let client = ShopifyClient {
        http: reqwest::Client::new(),
        store_url: config.store_url.clone(),
        api_version: config.api_version.clone(),
        access_token: config.access_token.clone(),
    };
    CLIENT
        .set(client)
        .map_err(|_| anyhow::anyhow!("shopify client already initialized"))
}

pub fn client() -> &'static ShopifyClient {
    CLIENT
        .get()
        .expect("shopify client not initialized; call shopify::init() first")
}

impl ShopifyClient {
    fn base(&self) -> String {
        format!(
            "https://{}/admin/api/{}",
            self.store_url, self.api_version
        )
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ShopifyError> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ShopifyError::NotFound);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ShopifyError::Status {
                code: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Ищет заказ по отображаемому номеру ("1001" или "#1001").
    pub async fn find_order_by_name(&self, name: &str) -> Result<ShopifyOrder, ShopifyError> {
        let name = if name.starts_with('#') {
            name.to_string()
        } else {
            format!("#{name}")
        };

        let response = self
            .http
            .get(format!("{}/orders.json", self.base()))
            .header("X-Shopify-Access-Token", &self.access_token)
            .query(&[("status", "any"), ("name", name.as_str())])
            .send()
            .await?;
        let response = Self::check(response).await?;

        let envelope: OrdersEnvelope = response.json().await?;
        envelope
            .orders
            .into_iter()
            .next()
            .ok_or(ShopifyError::NotFound)
    }

    pub async fn get_order(&self, order_id: i64) -> Result<ShopifyOrder, ShopifyError> {
        let response = self
            .http
            .get(format!("{}/orders/{}.json", self.base(), order_id))
            .header("X-Shopify-Access-Token", &self.access_token)
            .send()
            .await?;
        let response = Self::check(response).await?;

        let envelope: OrderEnvelope = response.json().await?;
        Ok(envelope.order)
    }

    /// Полностью заменяет строку тегов заказа
    pub async fn update_tags(&self, order_id: i64, tags: &str) -> Result<(), ShopifyError> {
        let payload = serde_json::json!({
            "order": { "id": order_id, "tags": tags }
        });

        let response = self
            .http
            .put(format!("{}/orders/{}.json", self.base(), order_id))
            .header("X-Shopify-Access-Token", &self.access_token)
            .json(&payload)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn list_transactions(
        &self,
        order_id: i64,
    ) -> Result<Vec<Transaction>, ShopifyError> {
        let response = self
            .http
            .get(format!(
                "{}/orders/{}/transactions.json",
                self.base(),
                order_id
            ))
            .header("X-Shopify-Access-Token", &self.access_token)
            .send()
            .await?;
        let response = Self::check(response).await?;

        let envelope: TransactionsEnvelope = response.json().await?;
        Ok(envelope.transactions)
    }

    /// Capture ранее авторизованной транзакции на её полную сумму
    pub async fn capture_transaction(
        &self,
        order_id: i64,
        parent_id: i64,
        amount: &str,
    ) -> Result<(), ShopifyError> {
        let payload = serde_json::json!({
            "transaction": {
                "parent_id": parent_id,
                "amount": amount,
                "kind": "capture"
            }
        });

        let response = self
            .http
            .post(format!(
                "{}/orders/{}/transactions.json",
                self.base(),
                order_id
            ))
            .header("X-Shopify-Access-Token", &self.access_token)
            .json(&payload)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
