//! Label/value rows used inside detail dialogs.

use leptos::prelude::*;

#[component]
pub fn DetailSection(#[prop(into)] title: String, children: Children) -> impl IntoView {
    view! {
        <div class="detail-section">
            <div class="detail-section-title">{title}</div>
            {children()}
        </div>
    }
}

#[component]
pub fn DetailRow(#[prop(into)] label: String, #[prop(into)] value: String, #[prop(optional, into)] value_class: String) -> impl IntoView {
    view! {
        <div class="detail-row">
            <span class="detail-label">{label}</span>
            <span class=format!("detail-value {value_class}")>{value}</span>
        </div>
    }
}
