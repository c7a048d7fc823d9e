use folio_core::ScreenerRow;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Tolerance for the weight-sum validity check.
pub const WEIGHT_EPSILON: f64 = 0.01;

/// Rows-per-page choices offered by the result table.
pub const PAGE_SIZES: [usize; 3] = [10, 25, 50];

/// The four scoring factors the screener exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Factor {
    PeRatio,
    Roe,
    Roa,
    DividendYield,
}

impl Factor {
    pub const ALL: [Factor; 4] = [
        Factor::PeRatio,
        Factor::Roe,
        Factor::Roa,
        Factor::DividendYield,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Factor::PeRatio => "P/E Ratio",
            Factor::Roe => "Return on Equity",
            Factor::Roa => "Return on Assets",
            Factor::DividendYield => "Dividend Yield",
        }
    }
}

/// User-tunable factor weights sent to `/screener/` as the scoring payload.
/// Fields stay within [0, 1]; the set is valid when the sum is within
/// `WEIGHT_EPSILON` of 1.0. Serialized field names match the wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorWeights {
    pub pe_ratio: f64,
    pub roe: f64,
    pub roa: f64,
    pub dividend_yield: f64,
}

impl Default for FactorWeights {
    /// Equal weights across all four factors.
    fn default() -> Self {
        Self {
            pe_ratio: 0.25,
            roe: 0.25,
            roa: 0.25,
            dividend_yield: 0.25,
        }
    }
}

impl FactorWeights {
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::PeRatio => self.pe_ratio,
            Factor::Roe => self.roe,
            Factor::Roa => self.roa,
            Factor::DividendYield => self.dividend_yield,
        }
    }

    /// Replace one factor's weight, clamped to [0, 1]. Other factors are
    /// untouched; no auto-normalization.
    pub fn set(&mut self, factor: Factor, value: f64) {
        let value = value.clamp(0.0, 1.0);
        match factor {
            Factor::PeRatio => self.pe_ratio = value,
            Factor::Roe => self.roe = value,
            Factor::Roa => self.roa = value,
            Factor::DividendYield => self.dividend_yield = value,
        }
    }

    pub fn sum(&self) -> f64 {
        self.pe_ratio + self.roe + self.roa + self.dividend_yield
    }

    pub fn is_valid(&self) -> bool {
        (self.sum() - 1.0).abs() < WEIGHT_EPSILON
    }

    /// Rescale so the sum becomes 1.0, preserving relative proportions.
    /// No-op when the sum is zero.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum > 0.0 {
            self.pe_ratio /= sum;
            self.roe /= sum;
            self.roa /= sum;
            self.dividend_yield /= sum;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Columns of the screener result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortColumn {
    Symbol,
    Company,
    PeRatio,
    Roe,
    Roa,
    DividendYield,
    WeightedScore,
}

impl SortColumn {
    pub const ALL: [SortColumn; 7] = [
        SortColumn::Symbol,
        SortColumn::Company,
        SortColumn::PeRatio,
        SortColumn::Roe,
        SortColumn::Roa,
        SortColumn::DividendYield,
        SortColumn::WeightedScore,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortColumn::Symbol => "Symbol",
            SortColumn::Company => "Company",
            SortColumn::PeRatio => "P/E Ratio",
            SortColumn::Roe => "ROE (%)",
            SortColumn::Roa => "ROA (%)",
            SortColumn::DividendYield => "Dividend Yield (%)",
            SortColumn::WeightedScore => "Score",
        }
    }

    fn text_key<'a>(&self, row: &'a ScreenerRow) -> Option<&'a str> {
        match self {
            SortColumn::Symbol => Some(&row.symbol),
            SortColumn::Company => Some(&row.company),
            _ => None,
        }
    }

    /// Missing metrics compare as negative infinity: lowest ascending,
    /// last descending.
    fn numeric_key(&self, row: &ScreenerRow) -> f64 {
        let value = match self {
            SortColumn::PeRatio => row.pe_ratio,
            SortColumn::Roe => row.roe,
            SortColumn::Roa => row.roa,
            SortColumn::DividendYield => row.dividend_yield,
            SortColumn::WeightedScore => row.weighted_score,
            SortColumn::Symbol | SortColumn::Company => None,
        };
        value.unwrap_or(f64::NEG_INFINITY)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(&self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Active sort column and direction for the result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for SortState {
    /// Best score first.
    fn default() -> Self {
        Self {
            column: SortColumn::WeightedScore,
            direction: SortDirection::Descending,
        }
    }
}

impl SortState {
    /// Header-click transition: a repeat click on the active column flips
    /// the direction, a click on another column selects it ascending.
    pub fn request(&mut self, column: SortColumn) {
        if self.column == column {
            self.direction = self.direction.toggled();
        } else {
            self.column = column;
            self.direction = SortDirection::Ascending;
        }
    }
}

/// Ordered copy of `rows`. Textual columns compare as case-sensitive
/// strings; numeric columns treat missing values as negative infinity.
/// Equal keys carry no secondary tie-break.
pub fn sort_rows(
    rows: &[ScreenerRow],
    column: SortColumn,
    direction: SortDirection,
) -> Vec<ScreenerRow> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| {
        let ord = match (column.text_key(a), column.text_key(b)) {
            (Some(ka), Some(kb)) => ka.cmp(kb),
            _ => column
                .numeric_key(a)
                .partial_cmp(&column.numeric_key(b))
                .unwrap_or(Ordering::Equal),
        };
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    sorted
}

/// Zero-based page index plus rows-per-page. The page resets whenever the
/// page size changes or the underlying data is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    pub page: usize,
    pub per_page: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page: 0,
            per_page: PAGE_SIZES[0],
        }
    }
}

impl PageState {
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = per_page;
        self.page = 0;
    }

    /// Call when the data set is replaced.
    pub fn reset(&mut self) {
        self.page = 0;
    }

    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.per_page)
    }
}

/// The half-open slice `[page * per_page, page * per_page + per_page)`
/// clipped to the data; out-of-range pages are empty.
pub fn paginate<T>(rows: &[T], page: usize, per_page: usize) -> &[T] {
    let start = page.saturating_mul(per_page).min(rows.len());
    let end = start.saturating_add(per_page).min(rows.len());
    &rows[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(symbol: &str, company: &str, score: Option<f64>) -> ScreenerRow {
        ScreenerRow {
            symbol: symbol.into(),
            company: company.into(),
            pe_ratio: None,
            roe: None,
            roa: None,
            dividend_yield: None,
            weighted_score: score,
        }
    }

    #[test]
    fn default_weights_are_valid() {
        let weights = FactorWeights::default();
        assert_eq!(weights.sum(), 1.0);
        assert!(weights.is_valid());
    }

    #[test]
    fn all_ones_invalid_until_normalized() {
        let mut weights = FactorWeights {
            pe_ratio: 1.0,
            roe: 1.0,
            roa: 1.0,
            dividend_yield: 1.0,
        };
        assert!(!weights.is_valid());
        weights.normalize();
        assert!(weights.is_valid());
        assert!((weights.pe_ratio - 0.25).abs() < 1e-12);
        assert!((weights.dividend_yield - 0.25).abs() < 1e-12);
    }

    #[test]
    fn normalize_preserves_proportions() {
        let mut weights = FactorWeights {
            pe_ratio: 0.8,
            roe: 0.4,
            roa: 0.2,
            dividend_yield: 0.2,
        };
        weights.normalize();
        assert!((weights.sum() - 1.0).abs() < 1e-12);
        assert!((weights.pe_ratio / weights.roe - 2.0).abs() < 1e-12);
        assert!((weights.roe / weights.roa - 2.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_is_noop_on_zero_sum() {
        let mut weights = FactorWeights {
            pe_ratio: 0.0,
            roe: 0.0,
            roa: 0.0,
            dividend_yield: 0.0,
        };
        weights.normalize();
        assert_eq!(weights.sum(), 0.0);
    }

    #[test]
    fn set_clamps_and_leaves_others_alone() {
        let mut weights = FactorWeights::default();
        weights.set(Factor::Roe, 1.7);
        assert_eq!(weights.roe, 1.0);
        weights.set(Factor::Roa, -0.3);
        assert_eq!(weights.roa, 0.0);
        assert_eq!(weights.pe_ratio, 0.25);
        assert_eq!(weights.dividend_yield, 0.25);
    }

    #[test]
    fn skewed_but_unit_sum_is_valid() {
        let mut weights = FactorWeights::default();
        weights.set(Factor::PeRatio, 0.4);
        weights.set(Factor::Roe, 0.3);
        weights.set(Factor::Roa, 0.2);
        weights.set(Factor::DividendYield, 0.1);
        assert!(weights.is_valid());
    }

    #[test]
    fn weights_serialize_with_wire_names() {
        let json = serde_json::to_string(&FactorWeights::default()).unwrap();
        for key in ["pe_ratio", "roe", "roa", "dividend_yield"] {
            assert!(json.contains(key), "missing {key} in {json}");
        }
    }

    #[test]
    fn missing_score_sorts_low_ascending_last_descending() {
        let rows = vec![row("A", "Alpha", Some(10.0)), row("B", "Beta", None)];

        let asc = sort_rows(&rows, SortColumn::WeightedScore, SortDirection::Ascending);
        assert_eq!(asc[0].symbol, "B");

        let desc = sort_rows(&rows, SortColumn::WeightedScore, SortDirection::Descending);
        assert_eq!(desc[0].symbol, "A");
        assert_eq!(desc[1].symbol, "B");
    }

    #[test]
    fn sort_is_idempotent_and_non_mutating() {
        let rows = vec![
            row("C", "Gamma", Some(3.0)),
            row("A", "Alpha", Some(9.0)),
            row("B", "Beta", None),
        ];
        let original = rows.clone();
        let once = sort_rows(&rows, SortColumn::WeightedScore, SortDirection::Descending);
        let twice = sort_rows(&once, SortColumn::WeightedScore, SortDirection::Descending);
        assert_eq!(once, twice);
        assert_eq!(rows, original);
    }

    #[test]
    fn textual_sort_uses_string_order() {
        let rows = vec![
            row("MSFT", "Microsoft", None),
            row("AAPL", "Apple", None),
            row("IBM", "IBM", None),
        ];
        let asc = sort_rows(&rows, SortColumn::Symbol, SortDirection::Ascending);
        let symbols: Vec<&str> = asc.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "IBM", "MSFT"]);

        let desc = sort_rows(&rows, SortColumn::Company, SortDirection::Descending);
        assert_eq!(desc[0].company, "Microsoft");
    }

    #[test]
    fn request_sort_toggles_and_switches() {
        let mut state = SortState::default();
        assert_eq!(state.column, SortColumn::WeightedScore);
        assert_eq!(state.direction, SortDirection::Descending);

        state.request(SortColumn::WeightedScore);
        assert_eq!(state.direction, SortDirection::Ascending);
        state.request(SortColumn::WeightedScore);
        assert_eq!(state.direction, SortDirection::Descending);

        state.request(SortColumn::Symbol);
        assert_eq!(state.column, SortColumn::Symbol);
        assert_eq!(state.direction, SortDirection::Ascending);
    }

    #[test]
    fn paginate_clips_and_reassembles() {
        let rows: Vec<u32> = (0..23).collect();
        assert_eq!(paginate(&rows, 0, 10).len(), 10);
        assert_eq!(paginate(&rows, 2, 10), &[20, 21, 22]);
        assert!(paginate(&rows, 3, 10).is_empty());
        assert!(paginate(&rows, 100, 10).is_empty());

        let state = PageState {
            page: 0,
            per_page: 10,
        };
        let mut reassembled = Vec::new();
        for page in 0..state.page_count(rows.len()) {
            reassembled.extend_from_slice(paginate(&rows, page, state.per_page));
        }
        assert_eq!(reassembled, rows);
    }

    #[test]
    fn page_resets_on_size_change() {
        let mut state = PageState::default();
        state.set_page(4);
        state.set_per_page(25);
        assert_eq!(state.page, 0);
        assert_eq!(state.per_page, 25);
        state.set_page(2);
        state.reset();
        assert_eq!(state.page, 0);
    }
}
