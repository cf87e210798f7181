use leptos::prelude::*;

use crate::domain::order_queue::ui::OrderQueuePage;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <OrderQueuePage />
    }
}
