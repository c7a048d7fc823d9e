use crate::history::HistoryPanel;
use crate::state::use_app_ctx;
use folio_core::{PerformanceSummary, Position};
use leptos::*;

#[cfg(target_arch = "wasm32")]
use crate::state::SessionAuth;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::spawn_local;

/// Landing page: the signed-in user's portfolio, performance summary and
/// price history for the selected holding.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_app_ctx();
    let (positions, set_positions) = create_signal::<Vec<Position>>(Vec::new());
    let (selected, set_selected) = create_signal::<Option<String>>(None);
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal::<Option<String>>(None);

    #[cfg(target_arch = "wasm32")]
    {
        let client = ctx.client();
        spawn_local(async move {
            match client.portfolio(&SessionAuth).await {
                Ok(portfolio) => {
                    // First holding selected by default.
                    set_selected.set(portfolio.stocks.first().map(|p| p.symbol.clone()));
                    set_positions.set(portfolio.stocks);
                    set_error.set(None);
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("portfolio fetch failed: {e}").into());
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (&ctx, &set_positions, &set_selected, &set_loading, &set_error);

    let holdings = move || {
        let list = positions.get();
        if list.is_empty() {
            return view! {
                <div class="muted">"No stocks in your portfolio. Start by adding some!"</div>
            }
            .into_view();
        }
        list.into_iter()
            .map(|position| {
                let symbol = position.symbol.clone();
                let is_selected = {
                    let symbol = symbol.clone();
                    move || selected.get().as_deref() == Some(symbol.as_str())
                };
                view! {
                    <button
                        class="row-item"
                        class:active=is_selected
                        on:click=move |_| set_selected.set(Some(symbol.clone()))
                    >
                        <span>{position.symbol.clone()}</span>
                        <span class="muted">{format!("Allocation: {}%", position.allocation)}</span>
                    </button>
                }
            })
            .collect_view()
    };

    let chart_symbol = Signal::derive(move || selected.get().unwrap_or_default());
    // Bool memo so switching between holdings updates the panel through its
    // symbol signal instead of remounting it.
    let has_selection = create_memo(move |_| selected.get().is_some());

    view! {
        {move || {
            if loading.get() {
                return view! { <div class="panel muted">"Loading..."</div> }.into_view();
            }
            if let Some(e) = error.get() {
                return view! { <div class="panel error-text">{e}</div> }.into_view();
            }
            view! {
                <div class="panel-row">
                    <div class="panel">
                        <div class="panel-title">"Your Portfolio"</div>
                        <div class="row-list">{holdings}</div>
                    </div>
                    <PerformancePanel/>
                </div>
                {move || {
                    if has_selection.get() {
                        view! { <HistoryPanel symbol=chart_symbol/> }.into_view()
                    } else {
                        view! { <div class="panel muted">"Select a stock to view chart"</div> }
                            .into_view()
                    }
                }}
            }
            .into_view()
        }}
    }
}

/// Account-level performance metrics from `/user-portfolio/performance`.
#[component]
pub fn PerformancePanel() -> impl IntoView {
    let ctx = use_app_ctx();
    let (summary, set_summary) = create_signal::<Option<PerformanceSummary>>(None);
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal::<Option<String>>(None);

    #[cfg(target_arch = "wasm32")]
    {
        let client = ctx.client();
        spawn_local(async move {
            match client.performance(&SessionAuth).await {
                Ok(data) => {
                    set_summary.set(Some(data));
                    set_error.set(None);
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("performance fetch failed: {e}").into());
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (&ctx, &set_summary, &set_loading, &set_error);

    let body = move || {
        if loading.get() {
            return view! { <div class="muted">"Loading..."</div> }.into_view();
        }
        if let Some(e) = error.get() {
            return view! { <div class="error-text">{e}</div> }.into_view();
        }
        let Some(summary) = summary.get() else {
            return view! { <div class="muted">"No performance data available"</div> }.into_view();
        };
        let daily_class = if summary.daily_change >= 0.0 {
            "stat-value positive"
        } else {
            "stat-value negative"
        };
        let return_class = if summary.total_return >= 0.0 {
            "stat-value positive"
        } else {
            "stat-value negative"
        };
        let sectors = summary
            .sector_allocation
            .iter()
            .map(|(sector, pct)| {
                view! {
                    <div>
                        <span>{format!("{sector}: {pct}%")}</span>
                        <div class="sector-bar" style=format!("width: {pct}%;")></div>
                    </div>
                }
            })
            .collect_view();
        view! {
            <div class="stat-grid">
                <div class="stat-card">
                    <div class="section-label">"Total Value"</div>
                    <div class="stat-value">{format!("${:.2}", summary.total_value)}</div>
                </div>
                <div class="stat-card">
                    <div class="section-label">"Daily Change"</div>
                    <div class=daily_class>{format!("{:+.2}%", summary.daily_change)}</div>
                </div>
                <div class="stat-card">
                    <div class="section-label">"Total Return"</div>
                    <div class=return_class>{format!("{:+.2}%", summary.total_return)}</div>
                </div>
                <div class="stat-card">
                    <div class="section-label">"Risk Level"</div>
                    <div class="stat-value">{summary.risk_level.clone()}</div>
                </div>
            </div>
            <div class="section-label" style="margin-top: var(--space-3);">
                "Sector Allocation"
            </div>
            {sectors}
        }
        .into_view()
    };

    view! {
        <div class="panel">
            <div class="panel-title">"Performance Metrics"</div>
            {body}
        </div>
    }
}
