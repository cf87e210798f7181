//! Правила работы со строкой тегов Shopify.
//!
//! Admin API хранит теги одной строкой через запятую; сервер ставит
//! ровно "Paid" (с большой буквы) и проверяет его точным сравнением,
//! в отличие от клиентской проверки без учёта регистра.

/// Стоит ли уже серверный тег "Paid" (точное совпадение после trim)
pub fn is_tagged_paid(tags: &str) -> bool {
    tags.split(',').any(|t| t.trim() == "Paid")
}

/// Возвращает строку тегов с добавленным "Paid"
pub fn append_paid_tag(tags: &str) -> String {
    if tags.trim().is_empty() {
        "Paid".to_string()
    } else {
        format!("{tags}, Paid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_tagged_paid_exact_match_only() {
        assert!(is_tagged_paid("Paid"));
        assert!(is_tagged_paid("vip, Paid"));
        assert!(is_tagged_paid(" Paid , rush"));
        // серверная проверка чувствительна к регистру
        assert!(!is_tagged_paid("paid"));
        assert!(!is_tagged_paid("PAID"));
        assert!(!is_tagged_paid("Prepaid"));
        assert!(!is_tagged_paid(""));
    }

    #[test]
    fn test_append_paid_tag() {
        assert_eq!(append_paid_tag(""), "Paid");
        assert_eq!(append_paid_tag("  "), "Paid");
        assert_eq!(append_paid_tag("vip"), "vip, Paid");
        assert_eq!(append_paid_tag("vip, rush"), "vip, rush, Paid");
    }
}
