use crate::state::use_app_ctx;
use app_shell::FetchGuard;
use folio_core::{HistoryPeriod, PricePoint, StockHistory};
use leptos::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::spawn_local;

/// How many recent sessions the panel lists below the summary.
const RECENT_ROWS: usize = 10;

/// Aggregates over one fetched history window, oldest point first.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSummary {
    pub last_close: f64,
    pub change_pct: f64,
    pub high: f64,
    pub low: f64,
}

pub fn window_summary(points: &[PricePoint]) -> Option<WindowSummary> {
    let first = points.first()?;
    let last = points.last()?;
    let change_pct = if first.close != 0.0 {
        (last.close - first.close) / first.close * 100.0
    } else {
        0.0
    };
    let mut high = f64::MIN;
    let mut low = f64::MAX;
    for p in points {
        high = high.max(p.high);
        low = low.min(p.low);
    }
    Some(WindowSummary {
        last_close: last.close,
        change_pct,
        high,
        low,
    })
}

/// Price history for one symbol with a selectable look-back period.
/// Refetches when the symbol or period changes; only the newest in-flight
/// response is allowed to land.
#[component]
pub fn HistoryPanel(#[prop(into)] symbol: Signal<String>) -> impl IntoView {
    let ctx = use_app_ctx();
    let (period, set_period) = create_signal(HistoryPeriod::default());
    let (history, set_history) = create_signal::<Option<StockHistory>>(None);
    let (loading, set_loading) = create_signal(false);
    let (error, set_error) = create_signal::<Option<String>>(None);
    let guard = FetchGuard::new();

    #[cfg(target_arch = "wasm32")]
    {
        let guard = guard.clone();
        create_effect(move |_| {
            let sym = symbol.get();
            let period = period.get();
            if sym.is_empty() {
                set_history.set(None);
                return;
            }
            let ticket = guard.issue();
            let guard = guard.clone();
            let client = ctx.client();
            set_loading.set(true);
            spawn_local(async move {
                let result = client.history(&sym, period).await;
                if !guard.is_current(ticket) {
                    return;
                }
                match result {
                    Ok(h) => {
                        set_history.set(Some(h));
                        set_error.set(None);
                    }
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("history fetch failed for {sym}: {e}").into(),
                        );
                        set_error.set(Some(e.to_string()));
                        set_history.set(None);
                    }
                }
                set_loading.set(false);
            });
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (&ctx, &guard, &set_history, &set_loading, &set_error);

    let body = move || {
        if loading.get() {
            return view! { <div class="muted">"Loading..."</div> }.into_view();
        }
        if let Some(e) = error.get() {
            return view! { <div class="error-text">{e}</div> }.into_view();
        }
        let Some(history) = history.get() else {
            return view! { <div class="muted">"No data available for this stock"</div> }
                .into_view();
        };
        let points = history.sorted_points();
        let Some(summary) = window_summary(&points) else {
            return view! { <div class="muted">"No data available for this stock"</div> }
                .into_view();
        };
        let change_class = if summary.change_pct >= 0.0 {
            "stat-value positive"
        } else {
            "stat-value negative"
        };
        let recent = points
            .iter()
            .rev()
            .take(RECENT_ROWS)
            .map(|p| {
                view! {
                    <tr>
                        <td>{p.date.clone()}</td>
                        <td class="numeric">{format!("{:.2}", p.close)}</td>
                        <td class="numeric">{format!("{:.0}", p.volume)}</td>
                    </tr>
                }
            })
            .collect_view();
        view! {
            <div class="stat-grid">
                <div class="stat-card">
                    <div class="section-label">"Last close"</div>
                    <div class="stat-value">{format!("{:.2}", summary.last_close)}</div>
                </div>
                <div class="stat-card">
                    <div class="section-label">"Change"</div>
                    <div class=change_class>{format!("{:+.2}%", summary.change_pct)}</div>
                </div>
                <div class="stat-card">
                    <div class="section-label">"High"</div>
                    <div class="stat-value">{format!("{:.2}", summary.high)}</div>
                </div>
                <div class="stat-card">
                    <div class="section-label">"Low"</div>
                    <div class="stat-value">{format!("{:.2}", summary.low)}</div>
                </div>
            </div>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Date"</th>
                        <th>"Close"</th>
                        <th>"Volume"</th>
                    </tr>
                </thead>
                <tbody>{recent}</tbody>
            </table>
        }
        .into_view()
    };

    view! {
        <div class="panel">
            <div class="panel-title">
                {move || format!("{} Price History", symbol.get())}
            </div>
            <div class="field-stack" style="max-width: 160px;">
                <label class="section-label" for="period-select">"Period"</label>
                <select
                    id="period-select"
                    on:change=move |ev| {
                        if let Some(p) = HistoryPeriod::from_str(&event_target_value(&ev)) {
                            set_period.set(p);
                        }
                    }
                >
                    {HistoryPeriod::ALL
                        .into_iter()
                        .map(|p| {
                            view! {
                                <option value=p.as_str() selected=move || period.get() == p>
                                    {p.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>
            {body}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(date: &str, close: f64, high: f64, low: f64) -> PricePoint {
        PricePoint {
            date: date.into(),
            open: close,
            high,
            low,
            close,
            volume: 1_000.0,
        }
    }

    #[test]
    fn summary_spans_the_window() {
        let points = vec![
            point("2024-01-02", 100.0, 101.0, 98.0),
            point("2024-01-03", 104.0, 106.5, 99.0),
            point("2024-01-04", 102.0, 105.0, 97.5),
        ];
        let summary = window_summary(&points).unwrap();
        assert_eq!(summary.last_close, 102.0);
        assert!((summary.change_pct - 2.0).abs() < 1e-9);
        assert_eq!(summary.high, 106.5);
        assert_eq!(summary.low, 97.5);
    }

    #[test]
    fn summary_of_empty_window_is_none() {
        assert!(window_summary(&[]).is_none());
    }

    #[test]
    fn zero_first_close_does_not_divide() {
        let points = vec![
            point("2024-01-02", 0.0, 1.0, 0.0),
            point("2024-01-03", 5.0, 5.0, 4.0),
        ];
        assert_eq!(window_summary(&points).unwrap().change_pct, 0.0);
    }
}
