//! Paginated, sortable, filterable table over a `TableState` signal.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every list in the console renders through this component. Client-mode
//! tables are fed by their view with `TableState::set_data`. Server-mode
//! tables either fetch pages themselves (when the config names an endpoint)
//! or hand each `TableQuery` to `on_page_change`.
//!
//! DESIGN
//! ======
//! The component owns no data; it only turns DOM events into `TableState`
//! transitions. Filter edits on server tables wait for a quiet period before
//! a page is requested. A self-fetched page whose reply arrives after a
//! newer request was issued is dropped.

#[cfg(test)]
#[path = "data_table_test.rs"]
mod data_table_test;

use leptos::prelude::*;
use serde_json::Value;

use crate::net::query::ListResponse;
use crate::state::table::{Cell, FILTER_DEBOUNCE_MS, PageItem, Row, TableQuery, TableState, row_id};

/// Per-row action buttons. Each callback receives the row id.
#[derive(Clone, Copy, Default)]
pub struct RowActions {
    pub on_edit: Option<Callback<String>>,
    pub on_delete: Option<Callback<String>>,
    pub on_toggle: Option<Callback<String>>,
    /// Decides the toggle icon: running rows offer Stop, others Start.
    pub is_running: Option<Callback<Row, bool>>,
}

impl RowActions {
    fn any(&self) -> bool {
        self.on_edit.is_some() || self.on_delete.is_some() || self.on_toggle.is_some()
    }
}

#[component]
pub fn DataTable(
    state: RwSignal<TableState>,
    #[prop(optional)] on_row_click: Option<Callback<Row>>,
    #[prop(optional)] on_page_change: Option<Callback<TableQuery>>,
    /// Called with every page the table fetched itself.
    #[prop(optional)]
    on_loaded: Option<Callback<ListResponse<Value>>>,
    /// Maps a fetched record to a row, or drops it; defaults to the record
    /// object itself.
    #[prop(optional)]
    transform: Option<Callback<Value, Option<Row>>>,
    /// Bump to refetch the current page.
    #[prop(optional)]
    reload: Option<RwSignal<u64>>,
    #[prop(optional)] actions: RowActions,
    #[prop(optional)] on_add: Option<Callback<()>>,
    #[prop(optional, into)] add_label: Option<String>,
) -> impl IntoView {
    let reload = reload.unwrap_or_else(|| RwSignal::new(0));
    let loading = RwSignal::new(false);
    let load_error = RwSignal::new(None::<String>);
    let debounce_gen = StoredValue::new(0_u64);

    let is_server = state.with_untracked(TableState::is_server);

    let request_page = Callback::new(move |()| {
        if let Some(cb) = on_page_change {
            if let Some(query) = state.with_untracked(TableState::query) {
                cb.run(query);
            }
        } else {
            reload.update(|n| *n += 1);
        }
    });

    #[cfg(feature = "hydrate")]
    {
        Effect::new(move |_| {
            let generation = reload.get();
            if state.with_untracked(|s| s.endpoint().is_some()) {
                leptos::task::spawn_local(fetch_page(state, transform, on_loaded, loading, load_error, (reload, generation)));
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (transform, on_loaded);
    }

    let on_filter = move |key: String, value: String| {
        state.update(|s| s.set_filter(&key, &value));
        if !is_server {
            return;
        }
        let generation = debounce_gen.get_value() + 1;
        debounce_gen.set_value(generation);
        #[cfg(feature = "hydrate")]
        {
            gloo_timers::callback::Timeout::new(FILTER_DEBOUNCE_MS, move || {
                if debounce_gen.get_value() == generation {
                    request_page.run(());
                }
            })
            .forget();
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = FILTER_DEBOUNCE_MS;
        }
    };

    let go_to = move |page: usize| {
        let changed = state.try_update(|s| s.go_to_page(page)).unwrap_or(false);
        if changed && is_server {
            request_page.run(());
        }
    };

    let (columns, sortable, filterable, page_sizes, status_column, empty_message) = state.with_untracked(|s| {
        let config = s.config();
        (
            config.columns.clone(),
            config.sortable,
            config.filterable,
            config.page_size_options.clone(),
            config.status_column.clone(),
            config.empty_message.clone(),
        )
    });
    let column_span = columns.len() + usize::from(actions.any());

    let header = columns
        .iter()
        .map(|column| {
            let key = column.key.clone();
            let indicator_key = key.clone();
            let on_sort = move |_| {
                if !sortable {
                    return;
                }
                state.update(|s| s.sort_by(&key));
                if is_server {
                    request_page.run(());
                }
            };
            view! {
                <th class:sortable=sortable on:click=on_sort>
                    {column.label.clone()}
                    {sortable.then(|| view! {
                        <span class="sort-indicator">{move || state.with(|s| s.sort_indicator(&indicator_key))}</span>
                    })}
                </th>
            }
        })
        .collect_view();

    let filter_row = filterable.then(|| {
        let cells = columns
            .iter()
            .map(|column| {
                let key = column.key.clone();
                let value_key = key.clone();
                let invalid_key = key.clone();
                let placeholder = format!("Filter {}", column.label);
                view! {
                    <th>
                        <input
                            type="text"
                            class="column-filter"
                            class:invalid=move || state.with(|s| s.is_filter_invalid(&invalid_key))
                            placeholder=placeholder
                            prop:value=move || state.with(|s| s.filter_value(&value_key).to_owned())
                            on:input=move |ev| on_filter(key.clone(), event_target_value(&ev))
                        />
                    </th>
                }
            })
            .collect_view();
        view! {
            <tr class="filter-row">
                {cells}
                {actions.any().then(|| view! { <th></th> })}
            </tr>
        }
    });

    let body_columns = columns.clone();
    let body = move || {
        let rows = state.with(|s| s.page_rows().to_vec());
        if rows.is_empty() {
            let message = load_error.get().unwrap_or_else(|| empty_message.clone());
            return view! {
                <tr>
                    <td class="empty-row" colspan=column_span.to_string()>{message}</td>
                </tr>
            }
            .into_any();
        }
        rows.into_iter()
            .map(|row| {
                let cells = body_columns
                    .iter()
                    .map(|column| {
                        let as_status = status_column.as_deref() == Some(column.key.as_str());
                        view! { <td>{cell_view(column.render(&row, as_status))}</td> }
                    })
                    .collect_view();
                let action_cell = actions.any().then(|| action_buttons(actions, &row));
                let clickable = on_row_click.is_some();
                view! {
                    <tr
                        class:clickable=clickable
                        on:click=move |_| {
                            if let Some(cb) = on_row_click {
                                cb.run(row.clone());
                            }
                        }
                    >
                        {cells}
                        {action_cell}
                    </tr>
                }
            })
            .collect_view()
            .into_any()
    };

    let size_selector = (!page_sizes.is_empty()).then(|| {
        let options = page_sizes
            .iter()
            .map(|size| {
                let size = *size;
                view! {
                    <option value=size.to_string() selected=move || state.with(|s| s.rows_per_page() == size)>
                        {size.to_string()}
                    </option>
                }
            })
            .collect_view();
        view! {
            <select
                class="page-size"
                on:change=move |ev| {
                    if let Ok(rows) = event_target_value(&ev).parse::<usize>() {
                        state.update(|s| s.set_rows_per_page(rows));
                        if is_server {
                            request_page.run(());
                        }
                    }
                }
            >
                {options}
            </select>
        }
    });

    let pages = move || {
        state
            .with(TableState::page_range)
            .into_iter()
            .map(|item| match item {
                PageItem::Page(page) => {
                    let active = state.with(|s| s.current_page() == page);
                    view! {
                        <button class="page-btn" class:active=active on:click=move |_| go_to(page)>
                            {page.to_string()}
                        </button>
                    }
                    .into_any()
                }
                PageItem::Gap => view! { <span class="page-gap">"…"</span> }.into_any(),
            })
            .collect_view()
    };

    view! {
        <div class="data-table-container">
            <div class="table-toolbar">
                {on_add.map(|cb| {
                    let label = add_label.clone().unwrap_or_else(|| "Add".to_owned());
                    view! { <button class="btn btn--primary" on:click=move |_| cb.run(())>{label}</button> }
                })}
                {size_selector}
                <Show when=move || loading.get()>
                    <span class="table-loading">"Loading…"</span>
                </Show>
            </div>
            <table class="data-table">
                <thead>
                    <tr>
                        {header}
                        {actions.any().then(|| view! { <th>"Actions"</th> })}
                    </tr>
                    {filter_row}
                </thead>
                <tbody>{body}</tbody>
            </table>
            <div class="pagination">
                <span class="pagination-info">{move || state.with(TableState::pagination_info)}</span>
                <div class="pagination-controls">
                    <button
                        class="page-btn"
                        disabled=move || state.with(|s| s.current_page() <= 1)
                        on:click=move |_| go_to(state.with_untracked(TableState::current_page).saturating_sub(1))
                    >
                        "Previous"
                    </button>
                    {pages}
                    <button
                        class="page-btn"
                        disabled=move || state.with(|s| s.current_page() >= s.total_pages())
                        on:click=move |_| go_to(state.with_untracked(TableState::current_page) + 1)
                    >
                        "Next"
                    </button>
                </div>
            </div>
        </div>
    }
}

fn cell_view(cell: Cell) -> AnyView {
    match cell {
        Cell::Text(text) => text.into_any(),
        Cell::Badge { class, text } => view! { <span class=format!("status-badge {class}")>{text}</span> }.into_any(),
        Cell::Tags(tags) => view! {
            <span class="l8-tags">
                {tags.into_iter().map(|t| view! { <span class="l8-tag">{t}</span> }).collect_view()}
            </span>
        }
        .into_any(),
    }
}

fn action_buttons(actions: RowActions, row: &Row) -> impl IntoView + use<> {
    let id = row_id(row);
    let running = actions.is_running.is_some_and(|cb| cb.run(row.clone()));
    let edit_id = id.clone();
    let delete_id = id.clone();
    view! {
        <td class="row-actions">
            {actions.on_toggle.map(|cb| {
                let (icon, title) = if running { ("⏹️", "Stop") } else { ("▶️", "Start") };
                view! {
                    <button
                        class="action-btn"
                        title=title
                        on:click=move |ev| {
                            ev.stop_propagation();
                            cb.run(id.clone());
                        }
                    >
                        {icon}
                    </button>
                }
            })}
            {actions.on_edit.map(|cb| view! {
                <button
                    class="action-btn"
                    title="Edit"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        cb.run(edit_id.clone());
                    }
                >
                    "Edit"
                </button>
            })}
            {actions.on_delete.map(|cb| view! {
                <button
                    class="action-btn action-btn--danger"
                    title="Delete"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        cb.run(delete_id.clone());
                    }
                >
                    "Delete"
                </button>
            })}
        </td>
    }
}

/// Fetch the current page from the table's endpoint and install it.
/// Whether a page reply issued at `generation` is still the latest request.
/// A disposed table (`latest` is `None`) accepts nothing.
pub fn reply_is_current(latest: Option<u64>, generation: u64) -> bool {
    latest == Some(generation)
}

#[cfg(feature = "hydrate")]
async fn fetch_page(
    state: RwSignal<TableState>,
    transform: Option<Callback<Value, Option<Row>>>,
    on_loaded: Option<Callback<ListResponse<Value>>>,
    loading: RwSignal<bool>,
    load_error: RwSignal<Option<String>>,
    (reload, generation): (RwSignal<u64>, u64),
) {
    let Some((endpoint, query)) = state.with_untracked(|s| Some((s.endpoint()?.to_owned(), s.query()?))) else {
        return;
    };
    loading.set(true);
    let result = crate::net::api::fetch_list::<Value>(&endpoint, &query.text, "Failed to load data").await;
    if !reply_is_current(reload.try_get_untracked(), generation) {
        return;
    }
    loading.set(false);
    match result {
        Ok(page) => {
            let rows = page
                .list
                .iter()
                .filter_map(|record| match transform {
                    Some(t) => t.run(record.clone()),
                    None => record.as_object().cloned(),
                })
                .collect();
            let total = usize::try_from(page.total()).unwrap_or(usize::MAX);
            state.update(|s| {
                s.set_server_data(rows, total);
                s.set_invalid_filters(query.invalid_filters);
            });
            load_error.set(None);
            if let Some(cb) = on_loaded {
                cb.run(page);
            }
        }
        Err(e) => {
            log::error!("table page fetch failed: {e}");
            state.update(|s| s.set_server_data(Vec::new(), 0));
            load_error.set(Some(e.user_message()));
        }
    }
}
