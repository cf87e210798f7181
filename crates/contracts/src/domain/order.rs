use serde::{Deserialize, Serialize};

/// Снимок заказа, который backend отдаёт по GET /api/get_order/{identifier}.
///
/// Поля соответствуют ответу Shopify Admin API: order_id — числовой id,
/// order_name — отображаемый номер ("#1001"), total_price — сумма строкой.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_id: i64,
    pub order_name: String,
    /// Город из shipping_address (может отсутствовать)
    #[serde(default)]
    pub city: Option<String>,
    /// Сумма заказа строкой, как её присылает Shopify ("1250.00")
    #[serde(default)]
    pub total_price: String,
    /// Теги через запятую
    #[serde(default)]
    pub tags: String,
    /// financial_status из Shopify ("paid", "pending", ...)
    #[serde(default)]
    pub payment_status: Option<String>,
}

/// Вердикт проверки заказа перед постановкой в очередь
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Тег "paid" уже стоит — заказ не ставим
    AlreadyTagged,
    /// Заказ уже оплачен в Shopify
    AlreadyPaid,
    /// Можно ставить в очередь
    Admissible,
}

/// Проверяет наличие тега "paid": список через запятую, сравнение
/// без учёта регистра, пробелы по краям игнорируются.
pub fn has_paid_tag(tags: &str) -> bool {
    tags.split(',')
        .any(|t| t.trim().eq_ignore_ascii_case("paid"))
}

impl OrderSummary {
    /// Классификация по приоритету: сначала тег, потом статус оплаты.
    pub fn classify(&self) -> Classification {
        if has_paid_tag(&self.tags) {
            Classification::AlreadyTagged
        } else if self.payment_status.as_deref() == Some("paid") {
            Classification::AlreadyPaid
        } else {
            Classification::Admissible
        }
    }

    /// Сумма как число; нечитаемое значение считается нулём,
    /// как и в исходном UI.
    pub fn price_value(&self) -> f64 {
        self.total_price.trim().parse().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(tags: &str, payment_status: Option<&str>) -> OrderSummary {
        OrderSummary {
            order_id: 1,
            order_name: "#1001".to_string(),
            city: Some("Colombo".to_string()),
            total_price: "10.00".to_string(),
            tags: tags.to_string(),
            payment_status: payment_status.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_has_paid_tag_any_position_any_case() {
        assert!(has_paid_tag("paid"));
        assert!(has_paid_tag("PAID"));
        assert!(has_paid_tag("vip, Paid, rush"));
        assert!(has_paid_tag("vip,  paid "));
        assert!(!has_paid_tag(""));
        assert!(!has_paid_tag("prepaid"));
        assert!(!has_paid_tag("vip, rush"));
    }

    #[test]
    fn test_paid_tag_wins_over_payment_status() {
        // Тег проверяется раньше статуса оплаты
        assert_eq!(
            order("Paid", Some("paid")).classify(),
            Classification::AlreadyTagged
        );
        assert_eq!(
            order("a, paid", Some("pending")).classify(),
            Classification::AlreadyTagged
        );
    }

    #[test]
    fn test_paid_status_blocks_admission() {
        assert_eq!(
            order("vip", Some("paid")).classify(),
            Classification::AlreadyPaid
        );
    }

    #[test]
    fn test_admissible() {
        assert_eq!(order("", None).classify(), Classification::Admissible);
        assert_eq!(
            order("vip", Some("pending")).classify(),
            Classification::Admissible
        );
    }

    #[test]
    fn test_price_value_fallback() {
        let mut o = order("", None);
        assert_eq!(o.price_value(), 10.0);
        o.total_price = "not-a-number".to_string();
        assert_eq!(o.price_value(), 0.0);
        o.total_price = " 15.50 ".to_string();
        assert_eq!(o.price_value(), 15.5);
    }
}
