use crate::history::HistoryPanel;
use crate::state::use_app_ctx;
use app_shell::FetchGuard;
use folio_core::{AvailableStocks, FinancialMetrics, RiskMetrics, TechnicalIndicators};
use leptos::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::spawn_local;

fn format_metric(value: Option<f64>, suffix: &str) -> String {
    match value {
        Some(v) => format!("{v:.2}{suffix}"),
        None => "N/A".to_string(),
    }
}

/// Per-stock explorer: symbol picker, price history and the three metric
/// bundles behind tabs.
#[component]
pub fn StocksPage() -> impl IntoView {
    let ctx = use_app_ctx();
    let (stocks, set_stocks) = create_signal(AvailableStocks::new());
    let (selected, set_selected) = create_signal(String::new());
    let (financials, set_financials) = create_signal::<Option<FinancialMetrics>>(None);
    let (technicals, set_technicals) = create_signal::<Option<TechnicalIndicators>>(None);
    let (risk, set_risk) = create_signal::<Option<RiskMetrics>>(None);
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal::<Option<String>>(None);
    let (active_tab, set_active_tab) = create_signal("financial".to_string());
    let guard = FetchGuard::new();

    #[cfg(target_arch = "wasm32")]
    {
        let client = ctx.client();
        spawn_local(async move {
            match client.available_stocks().await {
                Ok(available) => {
                    if let Some(first) = available.keys().next().cloned() {
                        set_selected.set(first);
                    }
                    set_stocks.set(available);
                    set_error.set(None);
                }
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("available stocks fetch failed: {e}").into(),
                    );
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    }

    // Refetch the metric bundles whenever the selection changes. A rapid
    // re-selection invalidates the older ticket.
    #[cfg(target_arch = "wasm32")]
    {
        let ctx = ctx.clone();
        let guard = guard.clone();
        create_effect(move |_| {
            let symbol = selected.get();
            if symbol.is_empty() {
                return;
            }
            let ticket = guard.issue();
            let guard = guard.clone();
            let client = ctx.client();
            set_loading.set(true);
            spawn_local(async move {
                let financial = client.financial_metrics(&symbol).await;
                let technical = client.technical_indicators(&symbol).await;
                let risk_result = client.risk_metrics(&symbol).await;
                if !guard.is_current(ticket) {
                    return;
                }
                match (financial, technical, risk_result) {
                    (Ok(f), Ok(t), Ok(r)) => {
                        set_financials.set(Some(f));
                        set_technicals.set(Some(t));
                        set_risk.set(Some(r));
                        set_error.set(None);
                    }
                    (f, t, r) => {
                        let e = [
                            f.err().map(|e| e.to_string()),
                            t.err().map(|e| e.to_string()),
                            r.err().map(|e| e.to_string()),
                        ]
                        .into_iter()
                        .flatten()
                        .next()
                        .unwrap_or_else(|| "metrics fetch failed".to_string());
                        web_sys::console::error_1(
                            &format!("metrics fetch failed for {symbol}: {e}").into(),
                        );
                        set_financials.set(None);
                        set_technicals.set(None);
                        set_risk.set(None);
                        set_error.set(Some(e));
                    }
                }
                set_loading.set(false);
            });
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (
        &ctx,
        &guard,
        &set_stocks,
        &set_selected,
        &set_financials,
        &set_technicals,
        &set_risk,
        &set_loading,
        &set_error,
    );

    let tab_button = move |id: &'static str, label: &'static str| {
        let is_active = move || active_tab.get() == id;
        view! {
            <button
                class="tab-btn"
                class:active=is_active
                on:click=move |_| set_active_tab.set(id.to_string())
            >
                {label}
            </button>
        }
    };

    let metric_card = |label: &'static str, value: String| {
        view! {
            <div class="stat-card">
                <div class="section-label">{label}</div>
                <div class="stat-value">{value}</div>
            </div>
        }
    };

    let tab_body = move || match active_tab.get().as_str() {
        "technical" => technicals
            .get()
            .map(|t| {
                view! {
                    <div class="stat-grid">
                        {metric_card("SMA (20)", format_metric(t.sma_20, ""))}
                        {metric_card("SMA (50)", format_metric(t.sma_50, ""))}
                        {metric_card("SMA (200)", format_metric(t.sma_200, ""))}
                        {metric_card("RSI (14)", format_metric(t.rsi_14, ""))}
                        {metric_card("MACD", format_metric(t.macd, ""))}
                        {metric_card("MACD Signal", format_metric(t.macd_signal, ""))}
                    </div>
                }
                .into_view()
            })
            .unwrap_or_else(|| ().into_view()),
        "risk" => risk
            .get()
            .map(|r| {
                view! {
                    <div class="stat-grid">
                        {metric_card("Beta", format_metric(Some(r.beta), ""))}
                        {metric_card("Volatility", format_metric(Some(r.volatility * 100.0), "%"))}
                        {metric_card("Sharpe Ratio", format_metric(Some(r.sharpe_ratio), ""))}
                        {metric_card(
                            "Max Drawdown",
                            format_metric(Some(r.max_drawdown * 100.0), "%"),
                        )}
                    </div>
                }
                .into_view()
            })
            .unwrap_or_else(|| ().into_view()),
        _ => financials
            .get()
            .map(|f| {
                view! {
                    <div class="stat-grid">
                        {metric_card("P/E Ratio", format_metric(f.pe_ratio, ""))}
                        {metric_card("Return on Equity", format_metric(f.roe, "%"))}
                        {metric_card("Return on Assets", format_metric(f.roa, "%"))}
                        {metric_card("Dividend Score", format_metric(f.dividend_score, ""))}
                        {metric_card("Dividend Yield", format_metric(f.dividend_yield, "%"))}
                        {metric_card("Payout Ratio", format_metric(f.payout_ratio, "%"))}
                    </div>
                }
                .into_view()
            })
            .unwrap_or_else(|| ().into_view()),
    };

    let chart_symbol = Signal::derive(move || selected.get());
    let has_selection = create_memo(move |_| !selected.get().is_empty());

    view! {
        <div class="panel">
            <div class="field-stack" style="max-width: 320px;">
                <label class="section-label" for="stock-select">"Stock"</label>
                <select
                    id="stock-select"
                    disabled=move || loading.get()
                    on:change=move |ev| set_selected.set(event_target_value(&ev))
                >
                    {move || {
                        stocks
                            .get()
                            .into_iter()
                            .map(|(symbol, name)| {
                                let is_selected = {
                                    let symbol = symbol.clone();
                                    move || selected.get() == symbol
                                };
                                view! {
                                    <option value=symbol.clone() selected=is_selected>
                                        {format!("{name} ({symbol})")}
                                    </option>
                                }
                            })
                            .collect_view()
                    }}
                </select>
            </div>
        </div>
        {move || {
            if has_selection.get() {
                view! { <HistoryPanel symbol=chart_symbol/> }.into_view()
            } else {
                ().into_view()
            }
        }}
        {move || {
            if loading.get() {
                return view! { <div class="panel muted">"Loading..."</div> }.into_view();
            }
            if let Some(e) = error.get() {
                return view! { <div class="panel error-text">{e}</div> }.into_view();
            }
            if selected.get_untracked().is_empty() {
                return view! { <div class="panel muted">"No stocks available"</div> }
                    .into_view();
            }
            view! {
                <div class="panel">
                    <div class="tab-row">
                        {tab_button("financial", "Financial Metrics")}
                        {tab_button("technical", "Technical Indicators")}
                        {tab_button("risk", "Risk Metrics")}
                    </div>
                    {tab_body}
                </div>
            }
            .into_view()
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_metrics_render_as_na() {
        assert_eq!(format_metric(None, "%"), "N/A");
        assert_eq!(format_metric(Some(12.345), ""), "12.35");
        assert_eq!(format_metric(Some(7.0), "%"), "7.00%");
    }
}
