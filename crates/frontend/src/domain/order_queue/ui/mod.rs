pub mod csv_import;

use contracts::domain::order::Classification;
use contracts::domain::queue::{AdmitOutcome, QueuedOrder, TagQueue};
use leptos::ev;
use leptos::prelude::*;

use super::api::{self, FetchError};
use crate::shared::status::StatusMessage;
use self::csv_import::CsvImportModal;

/// Состояние строки в таблице. После массовой простановки очередь
/// очищается, но строки остаются на экране с финальным статусом.
#[derive(Debug, Clone, PartialEq)]
pub enum RowStatus {
    Queued,
    Tagging,
    Tagged,
    Failed(String),
    RequestError,
}

impl RowStatus {
    fn label(&self) -> String {
        match self {
            RowStatus::Queued => "Queued".to_string(),
            RowStatus::Tagging => "Tagging...".to_string(),
            RowStatus::Tagged => "✅ Tagged Paid".to_string(),
            RowStatus::Failed(message) => format!("❌ {message}"),
            RowStatus::RequestError => "❌ Request error".to_string(),
        }
    }

    fn style(&self) -> &'static str {
        match self {
            RowStatus::Tagged => "color: #28a745; font-weight: 600;",
            RowStatus::Failed(_) => "color: #dc3545; font-weight: 600;",
            RowStatus::RequestError => "color: #dc3545; opacity: 0.6;",
            _ => "color: #555;",
        }
    }
}

#[derive(Clone)]
struct QueueRow {
    /// Позиция, выданная очередью при постановке (начиная с 1)
    position: usize,
    order: QueuedOrder,
    status: RwSignal<RowStatus>,
}

/// Статус строки по результату запроса на простановку тега.
/// Отказ сервера и ошибка транспорта раскрашиваются по-разному.
fn row_status_for(result: Result<contracts::shared::api::TagOrderResponse, String>) -> RowStatus {
    match result {
        Ok(resp) if resp.success => RowStatus::Tagged,
        Ok(resp) => RowStatus::Failed(
            resp.message.unwrap_or_else(|| "Tagging failed".to_string()),
        ),
        Err(_) => RowStatus::RequestError,
    }
}

/// Проверяет заказ и ставит его в очередь. Возвращает true, если заказ
/// реально добавлен. Используется и ручным вводом, и импортом из файла.
async fn add_order(
    identifier: String,
    queue: RwSignal<TagQueue>,
    rows: RwSignal<Vec<QueueRow>>,
    set_status: WriteSignal<Option<StatusMessage>>,
) -> bool {
    let identifier = identifier.trim().to_string();
    if identifier.is_empty() {
        set_status.set(Some(StatusMessage::error("Please enter an order ID")));
        return false;
    }

    set_status.set(Some(StatusMessage::info("Checking...")));

    let order = match api::fetch_order(&identifier).await {
        Ok(order) => order,
        Err(FetchError::Rejected(message)) => {
            set_status.set(Some(StatusMessage::error(message)));
            return false;
        }
        Err(FetchError::Transport(e)) => {
            log::error!("fetch_order failed: {e}");
            set_status.set(Some(StatusMessage::error("Error loading order")));
            return false;
        }
    };

    match order.classify() {
        Classification::AlreadyTagged => {
            set_status.set(Some(StatusMessage::error(format!(
                "Order {} is already tagged as Paid.",
                order.order_name
            ))));
            false
        }
        Classification::AlreadyPaid => {
            set_status.set(Some(StatusMessage::error(format!(
                "{} is already marked as paid.",
                order.order_name
            ))));
            false
        }
        Classification::Admissible => {
            let entry = QueuedOrder::from(&order);
            let outcome = queue
                .try_update(|q| q.try_admit(entry.clone()))
                .unwrap_or(AdmitOutcome::DuplicateById);

            if let AdmitOutcome::Admitted { position } = outcome {
                rows.update(|r| {
                    r.push(QueueRow {
                        position,
                        order: entry,
                        status: RwSignal::new(RowStatus::Queued),
                    })
                });
                set_status.set(Some(StatusMessage::success(format!(
                    "{} added.",
                    order.order_name
                ))));
                true
            } else {
                set_status.set(Some(StatusMessage::error(format!(
                    "{} is already added.",
                    order.order_name
                ))));
                false
            }
        }
    }
}

#[component]
pub fn OrderQueuePage() -> impl IntoView {
    let queue = RwSignal::new(TagQueue::new());
    let rows = RwSignal::new(Vec::<QueueRow>::new());
    let (input, set_input) = signal(String::new());
    let (status, set_status) = signal(Option::<StatusMessage>::None);
    let (is_tagging, set_is_tagging) = signal(false);
    let (show_csv, set_show_csv) = signal(false);

    // Ручное добавление (кнопка и Enter в поле ввода)
    let submit = move || {
        if is_tagging.get_untracked() {
            return;
        }
        let identifier = input.get_untracked();
        leptos::task::spawn_local(async move {
            if add_order(identifier, queue, rows, set_status).await {
                set_input.set(String::new());
            }
        });
    };

    let handle_add = move |_| submit();

    let handle_key = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            submit();
        }
    };

    let mark_all_paid = move |_| {
        if is_tagging.get_untracked() {
            return;
        }
        if queue.with_untracked(|q| q.is_empty()) {
            set_status.set(Some(StatusMessage::error("Queue is empty.")));
            return;
        }

        set_is_tagging.set(true);
        set_status.set(Some(StatusMessage::info("Tagging orders...")));

        leptos::task::spawn_local(async move {
            let entries = queue.with_untracked(|q| q.entries().to_vec());

            // Строго по одному, в порядке очереди
            for entry in entries {
                let row_status = rows.with_untracked(|r| {
                    r.iter()
                        .rev()
                        .find(|row| row.order.order_id == entry.order_id)
                        .map(|row| row.status)
                });
                let Some(row_status) = row_status else {
                    continue;
                };

                row_status.set(RowStatus::Tagging);

                let result = api::tag_order(entry.order_id).await;
                if let Err(e) = &result {
                    log::error!("tag_order failed: {e}");
                }
                row_status.set(row_status_for(result));
            }

            // Очередь пуста, но строки остаются на экране
            queue.update(|q| q.clear());
            set_status.set(Some(StatusMessage::success("Finished tagging.")));
            set_is_tagging.set(false);
        });
    };

    let clear_all = move |_| {
        if is_tagging.get_untracked() {
            return;
        }
        queue.update(|q| q.clear());
        rows.update(|r| r.clear());
        set_input.set(String::new());
        set_status.set(None);
    };

    let handle_csv_confirm = Callback::new(move |numbers: Vec<String>| {
        set_show_csv.set(false);
        leptos::task::spawn_local(async move {
            for number in numbers {
                add_order(number, queue, rows, set_status).await;
            }
        });
    });

    let handle_csv_close = Callback::new(move |_: ()| {
        set_show_csv.set(false);
    });

    view! {
        <div style="max-width: 720px; margin: 24px auto; font-family: Arial, sans-serif;">
            <h1 style="margin-bottom: 16px;">"Order Tagging"</h1>

            <div style="display: flex; gap: 8px; margin-bottom: 8px;">
                <input
                    type="text"
                    placeholder="Order ID (e.g. 1001 or #1001)"
                    style="flex: 1; padding: 6px 10px; border: 1px solid #ccc; border-radius: 4px;"
                    prop:value=move || input.get()
                    on:input=move |ev| set_input.set(event_target_value(&ev))
                    on:keydown=handle_key
                />
                <button
                    style="padding: 6px 14px;"
                    on:click=handle_add
                    disabled=move || is_tagging.get()
                >
                    "Add Order"
                </button>
                <button
                    style="padding: 6px 14px;"
                    on:click=move |_| set_show_csv.set(true)
                    disabled=move || is_tagging.get()
                >
                    "Upload CSV"
                </button>
            </div>

            {move || status.get().map(|s| {
                let style = s.style();
                view! { <div style=style>{s.text}</div> }
            })}

            // Шапка и итог скрыты, пока на экране нет ни одной строки
            {move || (!rows.get().is_empty()).then(|| view! {
                <table style="width: 100%; border-collapse: collapse; margin-top: 12px;">
                    <thead>
                        <tr style="border-bottom: 2px solid #ddd; text-align: left;">
                            <th style="padding: 6px;">"#"</th>
                            <th style="padding: 6px;">"Order"</th>
                            <th style="padding: 6px;">"City"</th>
                            <th style="padding: 6px;">"Total"</th>
                            <th style="padding: 6px;">"Status"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || rows.get().iter().map(|row| {
                            let order = row.order.clone();
                            let row_status = row.status;
                            view! {
                                <tr style="border-bottom: 1px solid #eee;">
                                    <td style="padding: 6px;">{row.position}</td>
                                    <td style="padding: 6px;">{order.order_name.clone()}</td>
                                    <td style="padding: 6px;">{order.city.clone().unwrap_or_default()}</td>
                                    <td style="padding: 6px;">{format!("Rs. {:.2}", order.total_price)}</td>
                                    <td style="padding: 6px;">
                                        {move || {
                                            let s = row_status.get();
                                            let style = s.style();
                                            view! { <span style=style>{s.label()}</span> }
                                        }}
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>

                <div style="margin-top: 12px; font-weight: 600;">
                    {move || queue.with(|q| format!("Total: Rs. {} ({} orders)", q.total_display(), q.len()))}
                </div>
            })}

            <div style="display: flex; gap: 8px; margin-top: 16px;">
                <button
                    style="padding: 8px 16px; background: #28a745; color: white; border: none; border-radius: 4px;"
                    on:click=mark_all_paid
                    disabled=move || is_tagging.get()
                >
                    "Mark All as Paid"
                </button>
                <button
                    style="padding: 8px 16px;"
                    on:click=clear_all
                    disabled=move || is_tagging.get()
                >
                    "Clear All"
                </button>
            </div>

            {move || show_csv.get().then(|| view! {
                <CsvImportModal
                    queue=queue
                    on_confirm=handle_csv_confirm
                    on_close=handle_csv_close
                />
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::api::TagOrderResponse;

    fn queued(id: i64, name: &str, price: f64) -> QueuedOrder {
        QueuedOrder {
            order_id: id,
            order_name: name.to_string(),
            city: None,
            total_price: price,
        }
    }

    #[test]
    fn test_row_status_reflects_each_result_independently() {
        assert_eq!(row_status_for(Ok(TagOrderResponse::ok())), RowStatus::Tagged);
        assert_eq!(
            row_status_for(Ok(TagOrderResponse::failure("Already tagged Paid"))),
            RowStatus::Failed("Already tagged Paid".to_string())
        );
        assert_eq!(
            row_status_for(Err("network down".to_string())),
            RowStatus::RequestError
        );
    }

    #[test]
    fn test_failure_without_message_gets_fallback_text() {
        let resp = TagOrderResponse {
            success: false,
            message: None,
        };
        assert_eq!(
            row_status_for(Ok(resp)),
            RowStatus::Failed("Tagging failed".to_string())
        );
    }

    #[test]
    fn test_bulk_pass_empties_queue_while_statuses_stay_per_order() {
        let mut q = TagQueue::new();
        assert_eq!(
            q.try_admit(queued(1, "#1001", 10.0)),
            AdmitOutcome::Admitted { position: 1 }
        );
        assert_eq!(
            q.try_admit(queued(2, "#1002", 15.5)),
            AdmitOutcome::Admitted { position: 2 }
        );

        // Проход по очереди: первый заказ помечен, второй получил отказ
        let statuses: Vec<RowStatus> = q
            .entries()
            .iter()
            .map(|e| {
                if e.order_id == 1 {
                    row_status_for(Ok(TagOrderResponse::ok()))
                } else {
                    row_status_for(Ok(TagOrderResponse::failure("Failed to update tags")))
                }
            })
            .collect();

        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.total_display(), "0.00");

        // Отказ по одному заказу не трогает статусы остальных
        assert_eq!(statuses[0], RowStatus::Tagged);
        assert_eq!(
            statuses[1],
            RowStatus::Failed("Failed to update tags".to_string())
        );
    }
}
