use crate::state::use_app_ctx;
use folio_core::{AvailableStocks, Position};
use leptos::*;

#[cfg(target_arch = "wasm32")]
use crate::state::SessionAuth;
#[cfg(target_arch = "wasm32")]
use api_client::{ApiError, FolioClient};
#[cfg(target_arch = "wasm32")]
use app_shell::Notice;
#[cfg(target_arch = "wasm32")]
use folio_core::Portfolio;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::spawn_local;

#[cfg(target_arch = "wasm32")]
async fn fetch_positions(client: &FolioClient) -> Result<Vec<Position>, ApiError> {
    client.portfolio(&SessionAuth).await.map(|p| p.stocks)
}

/// Builds the position from the dialog fields; `None` until a symbol is
/// chosen and the allocation is positive.
fn build_position(
    symbol: &str,
    allocation: &str,
    price: &str,
    date: &str,
) -> Option<Position> {
    if symbol.is_empty() {
        return None;
    }
    let allocation: f64 = allocation.parse().ok()?;
    if allocation <= 0.0 {
        return None;
    }
    Some(Position {
        symbol: symbol.to_string(),
        allocation,
        purchase_price: price.parse().ok(),
        purchase_date: if date.is_empty() {
            None
        } else {
            Some(date.to_string())
        },
    })
}

/// Portfolio management: the holdings table with add and delete, saved via
/// full-list replace.
#[component]
pub fn PortfolioPage() -> impl IntoView {
    let ctx = use_app_ctx();
    let (positions, set_positions) = create_signal::<Vec<Position>>(Vec::new());
    let (loading, set_loading) = create_signal(true);
    let (dialog_open, set_dialog_open) = create_signal(false);

    // Dialog form state, reset on close.
    let (available, set_available) = create_signal(AvailableStocks::new());
    let (form_symbol, set_form_symbol) = create_signal(String::new());
    let (form_allocation, set_form_allocation) = create_signal(String::new());
    let (form_price, set_form_price) = create_signal(String::new());
    let (form_date, set_form_date) = create_signal(String::new());

    #[cfg(target_arch = "wasm32")]
    {
        let ctx = ctx.clone();
        spawn_local(async move {
            match fetch_positions(&ctx.client()).await {
                Ok(stocks) => set_positions.set(stocks),
                Err(e) => {
                    web_sys::console::error_1(&format!("portfolio fetch failed: {e}").into());
                    ctx.notify(Notice::error(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    }

    // The dialog's symbol list loads when it first opens.
    #[cfg(target_arch = "wasm32")]
    {
        let ctx = ctx.clone();
        create_effect(move |_| {
            if !dialog_open.get() || !available.get_untracked().is_empty() {
                return;
            }
            let client = ctx.client();
            spawn_local(async move {
                match client.available_stocks().await {
                    Ok(stocks) => set_available.set(stocks),
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("available stocks fetch failed: {e}").into(),
                        );
                    }
                }
            });
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (&ctx, &set_positions, &set_loading, &set_available);

    let close_dialog = move || {
        set_form_symbol.set(String::new());
        set_form_allocation.set(String::new());
        set_form_price.set(String::new());
        set_form_date.set(String::new());
        set_dialog_open.set(false);
    };

    #[cfg(target_arch = "wasm32")]
    let add_position = {
        let ctx = ctx.clone();
        move |new_position: Position| {
            let ctx = ctx.clone();
            let updated = {
                let mut stocks = positions.get_untracked();
                stocks.push(new_position);
                Portfolio { stocks }
            };
            spawn_local(async move {
                let client = ctx.client();
                match client.save_portfolio(&SessionAuth, &updated).await {
                    Ok(_) => {
                        match fetch_positions(&client).await {
                            Ok(stocks) => set_positions.set(stocks),
                            Err(e) => web_sys::console::error_1(
                                &format!("portfolio refresh failed: {e}").into(),
                            ),
                        }
                        ctx.notify(Notice::success("Stock added successfully!"));
                    }
                    Err(e) => {
                        web_sys::console::error_1(&format!("portfolio save failed: {e}").into());
                        ctx.notify(Notice::error(e.to_string()));
                    }
                }
            });
        }
    };
    #[cfg(not(target_arch = "wasm32"))]
    let add_position = move |_new_position: Position| {};

    #[cfg(target_arch = "wasm32")]
    let delete_position = {
        let ctx = ctx.clone();
        move |symbol: String| {
            let ctx = ctx.clone();
            spawn_local(async move {
                let client = ctx.client();
                match client.delete_position(&SessionAuth, &symbol).await {
                    Ok(()) => {
                        match fetch_positions(&client).await {
                            Ok(stocks) => set_positions.set(stocks),
                            Err(e) => web_sys::console::error_1(
                                &format!("portfolio refresh failed: {e}").into(),
                            ),
                        }
                        ctx.notify(Notice::success("Stock removed successfully!"));
                    }
                    Err(e) => {
                        web_sys::console::error_1(&format!("delete failed: {e}").into());
                        ctx.notify(Notice::error(e.to_string()));
                    }
                }
            });
        }
    };
    #[cfg(not(target_arch = "wasm32"))]
    let delete_position = move |_symbol: String| {};

    let table_rows = move || {
        let list = positions.get();
        if loading.get() {
            return view! { <tr><td colspan="5" class="muted">"Loading..."</td></tr> }
                .into_view();
        }
        if list.is_empty() {
            return view! {
                <tr><td colspan="5" class="muted">"No stocks in portfolio"</td></tr>
            }
            .into_view();
        }
        list.into_iter()
            .map(|position| {
                let symbol = position.symbol.clone();
                let delete = delete_position.clone();
                let price = position
                    .purchase_price
                    .map(|p| format!("${p:.2}"))
                    .unwrap_or_else(|| "N/A".to_string());
                let date = position
                    .purchase_date
                    .clone()
                    .unwrap_or_else(|| "N/A".to_string());
                view! {
                    <tr>
                        <td>{position.symbol.clone()}</td>
                        <td class="numeric">{format!("{}%", position.allocation)}</td>
                        <td class="numeric">{price}</td>
                        <td class="numeric">{date}</td>
                        <td class="numeric">
                            <button on:click=move |_| delete(symbol.clone())>"Remove"</button>
                        </td>
                    </tr>
                }
            })
            .collect_view()
    };

    let can_submit = move || {
        build_position(
            &form_symbol.get(),
            &form_allocation.get(),
            &form_price.get(),
            &form_date.get(),
        )
        .is_some()
    };

    let submit = move |_: ev::MouseEvent| {
        if let Some(position) = build_position(
            &form_symbol.get_untracked(),
            &form_allocation.get_untracked(),
            &form_price.get_untracked(),
            &form_date.get_untracked(),
        ) {
            add_position(position);
            close_dialog();
        }
    };

    let dialog = move || {
        if !dialog_open.get() {
            return ().into_view();
        }
        let submit = submit.clone();
        view! {
            <div class="dialog-backdrop">
                <div class="panel dialog">
                    <div class="panel-title">"Add Stock to Portfolio"</div>
                    <div class="field-stack">
                        <label class="section-label" for="add-symbol">"Stock Symbol"</label>
                        <select
                            id="add-symbol"
                            on:change=move |ev| set_form_symbol.set(event_target_value(&ev))
                        >
                            <option value="">"Select a stock"</option>
                            {move || {
                                available
                                    .get()
                                    .into_iter()
                                    .map(|(symbol, name)| {
                                        view! {
                                            <option value=symbol.clone()>
                                                {format!("{name} ({symbol})")}
                                            </option>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </select>
                    </div>
                    <div class="field-stack">
                        <label class="section-label" for="add-allocation">"Allocation (%)"</label>
                        <input
                            id="add-allocation"
                            type="number"
                            min="0"
                            max="100"
                            value=move || form_allocation.get()
                            on:input=move |ev| set_form_allocation.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="field-stack">
                        <label class="section-label" for="add-price">"Purchase Price"</label>
                        <input
                            id="add-price"
                            type="number"
                            min="0"
                            step="0.01"
                            value=move || form_price.get()
                            on:input=move |ev| set_form_price.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="field-stack">
                        <label class="section-label" for="add-date">"Purchase Date"</label>
                        <input
                            id="add-date"
                            type="date"
                            value=move || form_date.get()
                            on:input=move |ev| set_form_date.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="dialog-actions">
                        <button on:click=move |_| close_dialog()>"Cancel"</button>
                        <button class="primary" disabled=move || !can_submit() on:click=submit>
                            "Add"
                        </button>
                    </div>
                </div>
            </div>
        }
        .into_view()
    };

    view! {
        <div class="panel">
            <div class="panel-title">"Portfolio Management"</div>
            <button class="primary" on:click=move |_| set_dialog_open.set(true)>
                "Add Stock"
            </button>
            <table class="data-table" style="margin-top: var(--space-3);">
                <thead>
                    <tr>
                        <th>"Symbol"</th>
                        <th>"Allocation (%)"</th>
                        <th>"Purchase Price"</th>
                        <th>"Purchase Date"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>{table_rows}</tbody>
            </table>
        </div>
        {dialog}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_requires_symbol_and_positive_allocation() {
        assert!(build_position("", "25", "", "").is_none());
        assert!(build_position("MSFT", "0", "", "").is_none());
        assert!(build_position("MSFT", "-5", "", "").is_none());
        assert!(build_position("MSFT", "abc", "", "").is_none());
        assert!(build_position("MSFT", "25", "", "").is_some());
    }

    #[test]
    fn optional_fields_only_set_when_given() {
        let bare = build_position("MSFT", "25", "", "").unwrap();
        assert!(bare.purchase_price.is_none());
        assert!(bare.purchase_date.is_none());

        let full = build_position("MSFT", "25", "310.55", "2024-01-09").unwrap();
        assert_eq!(full.purchase_price, Some(310.55));
        assert_eq!(full.purchase_date.as_deref(), Some("2024-01-09"));
    }
}
