use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Symbol -> display name, as served by `/stocks/available`.
///
/// Ordered map so select lists render deterministically.
pub type AvailableStocks = BTreeMap<String, String>;

/// Look-back window accepted by the price history endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HistoryPeriod {
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[default]
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "2Y")]
    TwoYears,
    #[serde(rename = "5Y")]
    FiveYears,
}

impl HistoryPeriod {
    pub const ALL: [HistoryPeriod; 6] = [
        HistoryPeriod::OneMonth,
        HistoryPeriod::ThreeMonths,
        HistoryPeriod::SixMonths,
        HistoryPeriod::OneYear,
        HistoryPeriod::TwoYears,
        HistoryPeriod::FiveYears,
    ];

    /// Wire value used in the `period` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryPeriod::OneMonth => "1M",
            HistoryPeriod::ThreeMonths => "3M",
            HistoryPeriod::SixMonths => "6M",
            HistoryPeriod::OneYear => "1Y",
            HistoryPeriod::TwoYears => "2Y",
            HistoryPeriod::FiveYears => "5Y",
        }
    }

    /// Parse the wire value, e.g. "6M".
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "1M" => Some(HistoryPeriod::OneMonth),
            "3M" => Some(HistoryPeriod::ThreeMonths),
            "6M" => Some(HistoryPeriod::SixMonths),
            "1Y" => Some(HistoryPeriod::OneYear),
            "2Y" => Some(HistoryPeriod::TwoYears),
            "5Y" => Some(HistoryPeriod::FiveYears),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HistoryPeriod::OneMonth => "1 Month",
            HistoryPeriod::ThreeMonths => "3 Months",
            HistoryPeriod::SixMonths => "6 Months",
            HistoryPeriod::OneYear => "1 Year",
            HistoryPeriod::TwoYears => "2 Years",
            HistoryPeriod::FiveYears => "5 Years",
        }
    }
}

/// One daily bar from `/stocks/{symbol}/history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// ISO date, e.g. "2024-03-01".
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PricePoint {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockHistory {
    pub symbol: String,
    pub company_name: String,
    #[serde(default)]
    pub data: Vec<PricePoint>,
}

impl StockHistory {
    /// Points ordered oldest-first. The server does not guarantee order;
    /// unparseable dates fall back to string comparison.
    pub fn sorted_points(&self) -> Vec<PricePoint> {
        let mut points = self.data.clone();
        points.sort_by(|a, b| match (a.parsed_date(), b.parsed_date()) {
            (Some(da), Some(db)) => da.cmp(&db),
            _ => a.date.cmp(&b.date),
        });
        points
    }
}

/// One holding in the user portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    /// Percentage of the portfolio, 0-100.
    pub allocation: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<String>,
}

/// Full portfolio as exchanged with `/user-portfolio/`. Saving replaces the
/// whole list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    #[serde(default)]
    pub stocks: Vec<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub total_value: f64,
    /// Percent change over the last session.
    pub daily_change: f64,
    pub total_return: f64,
    pub risk_level: String,
    #[serde(default)]
    pub sector_allocation: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetrics {
    pub symbol: String,
    pub company_name: Option<String>,
    pub pe_ratio: Option<f64>,
    pub roe: Option<f64>,
    pub roa: Option<f64>,
    pub dividend_score: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub payout_ratio: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalIndicators {
    pub symbol: String,
    pub sma_20: Option<f64>,
    pub sma_50: Option<f64>,
    pub sma_200: Option<f64>,
    pub ema_20: Option<f64>,
    pub rsi_14: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub bollinger_upper: Option<f64>,
    pub bollinger_lower: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub symbol: String,
    pub beta: f64,
    pub volatility: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
}

/// One screener result. Scores are computed server-side; every metric is
/// optional and opaque to the client apart from ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenerRow {
    pub symbol: String,
    pub company: String,
    pub pe_ratio: Option<f64>,
    pub roe: Option<f64>,
    pub roa: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub weighted_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenerResponse {
    #[serde(default)]
    pub stocks: Vec<ScreenerRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_wire_round_trip() {
        for period in HistoryPeriod::ALL {
            assert_eq!(HistoryPeriod::from_str(period.as_str()), Some(period));
        }
        assert!(HistoryPeriod::from_str("7D").is_none());
        assert_eq!(HistoryPeriod::default(), HistoryPeriod::SixMonths);
    }

    #[test]
    fn history_points_sort_oldest_first() {
        let history = StockHistory {
            symbol: "AAPL".into(),
            company_name: "Apple Inc.".into(),
            data: vec![
                PricePoint {
                    date: "2024-03-04".into(),
                    open: 2.0,
                    high: 2.0,
                    low: 2.0,
                    close: 2.0,
                    volume: 10.0,
                },
                PricePoint {
                    date: "2024-02-29".into(),
                    open: 1.0,
                    high: 1.0,
                    low: 1.0,
                    close: 1.0,
                    volume: 10.0,
                },
                PricePoint {
                    date: "2024-03-01".into(),
                    open: 1.5,
                    high: 1.5,
                    low: 1.5,
                    close: 1.5,
                    volume: 10.0,
                },
            ],
        };
        let sorted = history.sorted_points();
        let dates: Vec<&str> = sorted.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-02-29", "2024-03-01", "2024-03-04"]);
    }

    #[test]
    fn portfolio_decodes_missing_fields() {
        let portfolio: Portfolio = serde_json::from_str(
            r#"{"stocks":[{"symbol":"MSFT","allocation":60.0},
                          {"symbol":"IBM","allocation":40.0,
                           "purchase_price":141.5,"purchase_date":"2023-11-02"}]}"#,
        )
        .unwrap();
        assert_eq!(portfolio.stocks.len(), 2);
        assert!(portfolio.stocks[0].purchase_price.is_none());
        assert_eq!(portfolio.stocks[1].purchase_price, Some(141.5));

        let empty: Portfolio = serde_json::from_str("{}").unwrap();
        assert!(empty.stocks.is_empty());
    }

    #[test]
    fn position_omits_absent_optionals() {
        let json = serde_json::to_string(&Position {
            symbol: "MSFT".into(),
            allocation: 25.0,
            purchase_price: None,
            purchase_date: None,
        })
        .unwrap();
        assert!(!json.contains("purchase_price"));
        assert!(!json.contains("purchase_date"));
    }

    #[test]
    fn screener_row_tolerates_sparse_metrics() {
        let resp: ScreenerResponse = serde_json::from_str(
            r#"{"stocks":[{"symbol":"A","company":"Alpha","pe_ratio":12.5,
                           "roe":null,"roa":null,"dividend_yield":null,
                           "weighted_score":64.2},
                          {"symbol":"B","company":"Beta","pe_ratio":null,
                           "roe":8.1,"roa":3.3,"dividend_yield":1.9,
                           "weighted_score":null}]}"#,
        )
        .unwrap();
        assert_eq!(resp.stocks[0].weighted_score, Some(64.2));
        assert!(resp.stocks[1].weighted_score.is_none());
    }
}
