use crate::state::use_app_ctx;
use folio_core::ScreenerRow;
use leptos::*;
use screen_engine::{
    paginate, sort_rows, Factor, FactorWeights, PageState, SortColumn, SortDirection, SortState,
    PAGE_SIZES,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::spawn_local;

fn format_cell(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{v:.precision$}"),
        None => "N/A".to_string(),
    }
}

/// Multi-factor screener: tune the four scoring weights, apply them against
/// the server, then sort and page through the scored results locally.
#[component]
pub fn ScreenerPage() -> impl IntoView {
    let ctx = use_app_ctx();
    let rows = create_rw_signal::<Vec<ScreenerRow>>(Vec::new());
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal::<Option<String>>(None);
    let weights = create_rw_signal(FactorWeights::default());
    let sort = create_rw_signal(SortState::default());
    let pstate = create_rw_signal(PageState::default());

    let weights_valid = create_memo(move |_| weights.get().is_valid());
    let weight_sum = create_memo(move |_| weights.get().sum());

    #[cfg(target_arch = "wasm32")]
    let run_screen = {
        let ctx = ctx.clone();
        move || {
            let client = ctx.client();
            let payload = weights.get_untracked();
            set_loading.set(true);
            spawn_local(async move {
                match client.screen(&payload).await {
                    Ok(resp) => {
                        rows.set(resp.stocks);
                        pstate.update(|p| p.reset());
                        set_error.set(None);
                    }
                    Err(e) => {
                        web_sys::console::error_1(&format!("screener fetch failed: {e}").into());
                        set_error.set(Some(e.to_string()));
                        // Prior results are stale for the failed weights; drop them.
                        rows.set(Vec::new());
                        pstate.update(|p| p.reset());
                    }
                }
                set_loading.set(false);
            });
        }
    };
    #[cfg(not(target_arch = "wasm32"))]
    let run_screen = {
        let _ = (&ctx, &set_loading, &set_error);
        move || {}
    };

    // Initial load with the default equal weights.
    #[cfg(target_arch = "wasm32")]
    run_screen();

    let sorted = create_memo(move |_| {
        let state = sort.get();
        sort_rows(&rows.get(), state.column, state.direction)
    });

    let weight_controls = move || {
        Factor::ALL
            .into_iter()
            .map(|factor| {
                let value = move || weights.get().get(factor);
                view! {
                    <div class="weight-stack">
                        <span class="section-label">
                            {move || format!("{}: {:.0}%", factor.label(), value() * 100.0)}
                        </span>
                        <input
                            type="range"
                            min="0"
                            max="1"
                            step="0.05"
                            value=move || value().to_string()
                            on:input=move |ev| {
                                if let Ok(v) = event_target_value(&ev).parse::<f64>() {
                                    weights.update(|w| w.set(factor, v));
                                }
                            }
                        />
                    </div>
                }
            })
            .collect_view()
    };

    let apply = {
        let run_screen = run_screen.clone();
        move |_| {
            if weights_valid.get_untracked() {
                run_screen();
            }
        }
    };

    let header_cells = move || {
        SortColumn::ALL
            .into_iter()
            .map(|column| {
                let is_active = move || sort.get().column == column;
                let indicator = move || {
                    let state = sort.get();
                    if state.column != column {
                        return "";
                    }
                    match state.direction {
                        SortDirection::Ascending => " \u{25b2}",
                        SortDirection::Descending => " \u{25bc}",
                    }
                };
                view! {
                    <th>
                        <button
                            class:active=is_active
                            on:click=move |_| sort.update(|s| s.request(column))
                        >
                            {column.label()}
                            {indicator}
                        </button>
                    </th>
                }
            })
            .collect_view()
    };

    let page_rows = move || {
        let data = sorted.get();
        let state = pstate.get();
        paginate(&data, state.page, state.per_page)
            .iter()
            .map(|row| {
                view! {
                    <tr>
                        <td>{row.symbol.clone()}</td>
                        <td>{row.company.clone()}</td>
                        <td class="numeric">{format_cell(row.pe_ratio, 2)}</td>
                        <td class="numeric">{format_cell(row.roe, 2)}</td>
                        <td class="numeric">{format_cell(row.roa, 2)}</td>
                        <td class="numeric">{format_cell(row.dividend_yield, 2)}</td>
                        <td class="numeric">{format_cell(row.weighted_score, 1)}</td>
                    </tr>
                }
            })
            .collect_view()
    };

    let pager = move || {
        let state = pstate.get();
        let total = sorted.get().len();
        let pages = state.page_count(total);
        let at_start = state.page == 0;
        let at_end = pages == 0 || state.page + 1 >= pages;
        view! {
            <div class="pager">
                <span class="pager-label">"Rows per page"</span>
                <select on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                        pstate.update(|p| p.set_per_page(size));
                    }
                }>
                    {PAGE_SIZES
                        .into_iter()
                        .map(|size| {
                            view! {
                                <option
                                    value=size.to_string()
                                    selected=move || pstate.get().per_page == size
                                >
                                    {size.to_string()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <button
                    disabled=at_start
                    on:click=move |_| pstate.update(|p| p.set_page(p.page.saturating_sub(1)))
                >
                    "Prev"
                </button>
                <button disabled=at_end on:click=move |_| pstate.update(|p| p.set_page(p.page + 1))>
                    "Next"
                </button>
                <span class="pager-label">
                    {format!("Page {} of {} ({} stocks)", state.page + 1, pages.max(1), total)}
                </span>
            </div>
        }
    };

    view! {
        <div class="panel">
            <div class="panel-title">"Configure Metric Weights"</div>
            <div class="weight-grid">{weight_controls}</div>
            <div class="weight-actions">
                <span>
                    {move || format!("Sum: {:.2}", weight_sum.get())}
                    {move || {
                        (!weights_valid.get())
                            .then(|| view! { <span class="sum-bad">" (should be 1.0)"</span> })
                    }}
                </span>
                <button on:click=move |_| weights.update(|w| w.normalize())>"Normalize"</button>
                <button on:click=move |_| weights.update(|w| w.reset())>"Reset"</button>
                <button class="primary" disabled=move || !weights_valid.get() on:click=apply>
                    "Apply Weights"
                </button>
            </div>
        </div>
        <div class="panel">
            {move || {
                if loading.get() {
                    return view! { <div class="muted">"Loading..."</div> }.into_view();
                }
                if let Some(e) = error.get() {
                    return view! { <div class="error-text">{e}</div> }.into_view();
                }
                view! {
                    <table class="data-table">
                        <thead>
                            <tr>{header_cells}</tr>
                        </thead>
                        <tbody>{page_rows}</tbody>
                    </table>
                    {pager}
                }
                .into_view()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_format_with_precision_or_na() {
        assert_eq!(format_cell(None, 2), "N/A");
        assert_eq!(format_cell(Some(12.345), 2), "12.35");
        assert_eq!(format_cell(Some(64.27), 1), "64.3");
    }
}
