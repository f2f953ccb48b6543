//! Per-symbol outcome tracking for fan-out fetches.

use serde::Serialize;

/// Outcome of the request for a single symbol.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SymbolAttempt {
    pub symbol: String,
    pub records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Structured record of what each symbol returned.
///
/// Returned next to the results so callers can inspect partial failures
/// instead of scraping logs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FetchDiagnostics {
    pub attempts: Vec<SymbolAttempt>,
}

impl FetchDiagnostics {
    pub fn new() -> Self {
        Self {
            attempts: Vec::new(),
        }
    }

    pub fn record_success(&mut self, symbol: impl Into<String>, records: usize) {
        self.attempts.push(SymbolAttempt {
            symbol: symbol.into(),
            records,
            warning: None,
        });
    }

    pub fn record_empty(&mut self, symbol: impl Into<String>) {
        let symbol = symbol.into();
        let warning = format!("Symbol Error: No data found for symbol {}", symbol);
        self.attempts.push(SymbolAttempt {
            symbol,
            records: 0,
            warning: Some(warning),
        });
    }

    /// Summary for logging/debugging.
    pub fn summary(&self) -> String {
        self.attempts
            .iter()
            .map(|a| match &a.warning {
                Some(_) => format!("{}: EMPTY", a.symbol),
                None => format!("{}: {} records", a.symbol, a.records),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Check if any symbol produced data.
    pub fn has_success(&self) -> bool {
        self.attempts.iter().any(|a| a.records > 0)
    }

    /// All warnings, as `(symbol, message)`.
    pub fn warnings(&self) -> Vec<(&str, &str)> {
        self.attempts
            .iter()
            .filter_map(|a| a.warning.as_deref().map(|w| (a.symbol.as_str(), w)))
            .collect()
    }

    /// Symbols that came back empty, in request order.
    pub fn empty_symbols(&self) -> Vec<&str> {
        self.warnings().into_iter().map(|(symbol, _)| symbol).collect()
    }

    /// Total number of records across all symbols.
    pub fn total_records(&self) -> usize {
        self.attempts.iter().map(|a| a.records).sum()
    }
}
