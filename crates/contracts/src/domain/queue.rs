use serde::{Deserialize, Serialize};

use super::order::OrderSummary;

/// Проекция заказа, живущая только пока заказ стоит в очереди
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedOrder {
    pub order_id: i64,
    pub order_name: String,
    pub city: Option<String>,
    /// Сумма уже распарсена при постановке в очередь
    pub total_price: f64,
}

impl From<&OrderSummary> for QueuedOrder {
    fn from(order: &OrderSummary) -> Self {
        Self {
            order_id: order.order_id,
            order_name: order.order_name.clone(),
            city: order.city.clone(),
            total_price: order.price_value(),
        }
    }
}

/// Результат попытки постановки заказа в очередь
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmitOutcome {
    /// Принят; position — позиция в списке, начиная с 1
    Admitted { position: usize },
    DuplicateById,
    DuplicateByName,
}

impl AdmitOutcome {
    pub fn is_admitted(&self) -> bool {
        matches!(self, AdmitOutcome::Admitted { .. })
    }
}

/// Очередь заказов на пометку. Порядок вставки = порядок отображения =
/// порядок обхода при массовой простановке тегов.
///
/// Инварианты: ни order_id, ни order_name не повторяются;
/// total() всегда равен сумме total_price по всем записям.
#[derive(Debug, Clone, Default)]
pub struct TagQueue {
    entries: Vec<QueuedOrder>,
}

impl TagQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ставит заказ в очередь, если там ещё нет записи с тем же
    /// order_id или order_name.
    pub fn try_admit(&mut self, order: QueuedOrder) -> AdmitOutcome {
        if self.entries.iter().any(|e| e.order_id == order.order_id) {
            return AdmitOutcome::DuplicateById;
        }
        if self.entries.iter().any(|e| e.order_name == order.order_name) {
            return AdmitOutcome::DuplicateByName;
        }
        self.entries.push(order);
        AdmitOutcome::Admitted {
            position: self.entries.len(),
        }
    }

    /// Есть ли в очереди заказ с таким идентификатором (номер или имя).
    /// Ведущий '#' не учитывается, чтобы "1001" находил "#1001".
    pub fn contains_identifier(&self, identifier: &str) -> bool {
        let bare = identifier.trim().trim_start_matches('#');
        self.entries.iter().any(|e| {
            e.order_name.trim_start_matches('#') == bare || e.order_id.to_string() == bare
        })
    }

    /// Единственный поддерживаемый способ удаления — очистить всё
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[QueuedOrder] {
        &self.entries
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.total_price).sum()
    }

    /// Итог для отображения, всегда с двумя знаками ("0.00" для пустой)
    pub fn total_display(&self) -> String {
        format!("{:.2}", self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queued(id: i64, name: &str, price: f64) -> QueuedOrder {
        QueuedOrder {
            order_id: id,
            order_name: name.to_string(),
            city: None,
            total_price: price,
        }
    }

    #[test]
    fn test_admit_assigns_positions() {
        let mut q = TagQueue::new();
        assert_eq!(
            q.try_admit(queued(1, "#1001", 10.0)),
            AdmitOutcome::Admitted { position: 1 }
        );
        assert_eq!(
            q.try_admit(queued(2, "#1002", 15.5)),
            AdmitOutcome::Admitted { position: 2 }
        );
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn test_duplicate_by_id_leaves_queue_unchanged() {
        let mut q = TagQueue::new();
        q.try_admit(queued(1, "#1001", 10.0));
        q.try_admit(queued(2, "#1002", 15.5));

        let outcome = q.try_admit(queued(1, "#9999", 99.0));
        assert_eq!(outcome, AdmitOutcome::DuplicateById);
        assert!(!outcome.is_admitted());
        assert_eq!(q.len(), 2);
        assert_eq!(q.total_display(), "25.50");
    }

    #[test]
    fn test_duplicate_by_name_leaves_queue_unchanged() {
        let mut q = TagQueue::new();
        q.try_admit(queued(1, "#1001", 10.0));

        assert_eq!(
            q.try_admit(queued(99, "#1001", 10.0)),
            AdmitOutcome::DuplicateByName
        );
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_total_matches_sum_of_prices() {
        let mut q = TagQueue::new();
        assert_eq!(q.total_display(), "0.00");

        q.try_admit(queued(1, "#1001", 10.0));
        q.try_admit(queued(2, "#1002", 15.5));
        assert_eq!(q.total_display(), "25.50");

        // повторная постановка не меняет итог
        q.try_admit(queued(1, "#1001", 10.0));
        assert_eq!(q.len(), 2);
        assert_eq!(q.total_display(), "25.50");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut q = TagQueue::new();
        q.try_admit(queued(1, "#1001", 10.0));
        q.try_admit(queued(2, "#1002", 15.5));

        q.clear();
        assert!(q.is_empty());
        assert!(q.entries().is_empty());
        assert_eq!(q.total_display(), "0.00");
    }

    #[test]
    fn test_contains_identifier_by_name_and_id() {
        let mut q = TagQueue::new();
        q.try_admit(queued(450001, "#1001", 10.0));

        assert!(q.contains_identifier("#1001"));
        assert!(q.contains_identifier("1001"));
        assert!(q.contains_identifier("450001"));
        assert!(!q.contains_identifier("1002"));
    }

    #[test]
    fn test_iteration_order_is_insertion_order() {
        let mut q = TagQueue::new();
        q.try_admit(queued(3, "#3", 1.0));
        q.try_admit(queued(1, "#1", 1.0));
        q.try_admit(queued(2, "#2", 1.0));

        let ids: Vec<i64> = q.entries().iter().map(|e| e.order_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
