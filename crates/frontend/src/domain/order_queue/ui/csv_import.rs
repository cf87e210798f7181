use contracts::domain::csv::{parse_candidates, Validity};
use contracts::domain::order::Classification;
use contracts::domain::queue::TagQueue;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use super::super::api::{self, FetchError};
use crate::shared::file_reader::read_file_text;

#[derive(Clone)]
struct CsvRow {
    line_no: usize,
    order_number: String,
    validity: RwSignal<Validity>,
    reason: RwSignal<String>,
}

/// Проверка одного кандидата. Каждая строка проверяется своим запросом,
/// без ожидания соседних; против очереди проверяется только её текущее
/// состояние на момент старта проверки.
async fn check_candidate(row: CsvRow, queue: RwSignal<TagQueue>) {
    if queue.with_untracked(|q| q.contains_identifier(&row.order_number)) {
        row.validity.set(Validity::Invalid);
        row.reason.set("Already in queue".to_string());
        return;
    }

    match api::fetch_order(&row.order_number).await {
        Ok(order) => match order.classify() {
            Classification::AlreadyTagged => {
                row.validity.set(Validity::Invalid);
                row.reason.set("Already tagged Paid".to_string());
            }
            Classification::AlreadyPaid => {
                row.validity.set(Validity::Invalid);
                row.reason.set("Already paid".to_string());
            }
            Classification::Admissible => {
                row.validity.set(Validity::Valid);
            }
        },
        Err(FetchError::Rejected(message)) => {
            row.validity.set(Validity::Invalid);
            row.reason.set(message);
        }
        Err(FetchError::Transport(e)) => {
            log::error!("csv check failed: {e}");
            row.validity.set(Validity::Invalid);
            row.reason.set("Request error".to_string());
        }
    }
}

#[component]
pub fn CsvImportModal(
    /// Текущая очередь — для отсева уже добавленных номеров
    queue: RwSignal<TagQueue>,
    /// Вызывается с номерами всех валидных строк
    on_confirm: Callback<Vec<String>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let (rows, set_rows) = signal(Vec::<CsvRow>::new());
    let (file_name, set_file_name) = signal(Option::<String>::None);
    let (error, set_error) = signal(Option::<String>::None);

    // Обработка выбора файла
    let handle_file_select = move |ev: web_sys::Event| {
        let input = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());
        let Some(input) = input else { return };
        let Some(files) = input.files() else { return };
        let Some(file) = files.get(0) else { return };

        set_file_name.set(Some(file.name()));
        set_error.set(None);
        set_rows.set(Vec::new());

        leptos::task::spawn_local(async move {
            let text = match read_file_text(file).await {
                Ok(text) => text,
                Err(e) => {
                    set_error.set(Some(e));
                    return;
                }
            };

            let csv_rows: Vec<CsvRow> = parse_candidates(&text)
                .into_iter()
                .map(|c| CsvRow {
                    line_no: c.line_no,
                    order_number: c.order_number,
                    validity: RwSignal::new(Validity::Pending),
                    reason: RwSignal::new(String::new()),
                })
                .collect();

            if csv_rows.is_empty() {
                set_error.set(Some("No order numbers found in file".to_string()));
                return;
            }

            for row in &csv_rows {
                let row = row.clone();
                leptos::task::spawn_local(async move {
                    check_candidate(row, queue).await;
                });
            }

            set_rows.set(csv_rows);
        });
    };

    let pending_count =
        move || rows.get().iter().filter(|r| r.validity.get() == Validity::Pending).count();
    let valid_count =
        move || rows.get().iter().filter(|r| r.validity.get() == Validity::Valid).count();
    let invalid_count =
        move || rows.get().iter().filter(|r| r.validity.get() == Validity::Invalid).count();

    let handle_confirm = move |_| {
        let numbers: Vec<String> = rows
            .get_untracked()
            .iter()
            .filter(|r| r.validity.get_untracked() == Validity::Valid)
            .map(|r| r.order_number.clone())
            .collect();
        on_confirm.run(numbers);
    };

    let handle_overlay_click = move |_| {
        on_close.run(());
    };

    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    let handle_close = move |_| {
        on_close.run(());
    };

    view! {
        <div
            style="position: fixed; inset: 0; background: rgba(0,0,0,0.4); display: flex; align-items: center; justify-content: center;"
            on:click=handle_overlay_click
        >
            <div
                style="background: white; border-radius: 6px; padding: 16px; width: 520px; max-height: 80vh; overflow-y: auto;"
                on:click=stop_propagation
            >
                <div style="display: flex; justify-content: space-between; align-items: center; margin-bottom: 12px;">
                    <h2 style="margin: 0;">"Import orders from CSV"</h2>
                    <button on:click=handle_close>"✕"</button>
                </div>

                <div style="margin-bottom: 12px;">
                    <input type="file" accept=".csv,.txt" on:change=handle_file_select />
                    {move || file_name.get().map(|name| view! {
                        <div style="margin-top: 4px; color: #555;">{name}</div>
                    })}
                </div>

                {move || error.get().map(|e| view! {
                    <div style="margin: 8px 0; color: #dc3545;">{e}</div>
                })}

                {move || (!rows.get().is_empty()).then(|| view! {
                    <div>
                        <div style="margin-bottom: 8px; color: #555;">
                            {move || format!(
                                "{} valid, {} skipped, {} checking",
                                valid_count(),
                                invalid_count(),
                                pending_count()
                            )}
                        </div>

                        <table style="width: 100%; border-collapse: collapse;">
                            <thead>
                                <tr style="border-bottom: 2px solid #ddd; text-align: left;">
                                    <th style="padding: 4px;">"Line"</th>
                                    <th style="padding: 4px;">"Order"</th>
                                    <th style="padding: 4px;">"Status"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || rows.get().iter().map(|row| {
                                    let validity = row.validity;
                                    let reason = row.reason;
                                    view! {
                                        <tr style="border-bottom: 1px solid #eee;">
                                            <td style="padding: 4px;">{row.line_no}</td>
                                            <td style="padding: 4px;">{format!("#{}", row.order_number)}</td>
                                            <td style="padding: 4px;">
                                                {move || match validity.get() {
                                                    Validity::Pending => view! {
                                                        <span style="color: #555;">"Checking..."</span>
                                                    }.into_any(),
                                                    Validity::Valid => view! {
                                                        <span style="color: #28a745;">"Valid"</span>
                                                    }.into_any(),
                                                    Validity::Invalid => view! {
                                                        <span style="color: #dc3545;">{reason.get()}</span>
                                                    }.into_any(),
                                                }}
                                            </td>
                                        </tr>
                                    }
                                }).collect_view()}
                            </tbody>
                        </table>

                        <div style="display: flex; gap: 8px; margin-top: 12px;">
                            <button
                                style="padding: 6px 14px; background: #28a745; color: white; border: none; border-radius: 4px;"
                                on:click=handle_confirm
                                disabled=move || pending_count() > 0 || valid_count() == 0
                            >
                                {move || format!("Add {} orders", valid_count())}
                            </button>
                            <button style="padding: 6px 14px;" on:click=handle_close>
                                "Cancel"
                            </button>
                        </div>
                    </div>
                })}
            </div>
        </div>
    }
}
