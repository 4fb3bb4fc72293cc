// In crates/report-loader/src/store.rs

use core_types::Report;

/// Holds the one report currently being viewed.
///
/// A report is only ever swapped in whole. A failed load leaves the previous
/// report in place, still renderable.
#[derive(Debug, Default)]
pub struct ReportStore {
    report: Option<Report>,
    /// Bumped on every successful load.
    generation: u64,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `bytes` and, only on success, replaces the held report.
    pub fn load(&mut self, bytes: &[u8]) -> crate::Result<&Report> {
        let report = match crate::load(bytes) {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(error = %e, kept_previous = self.report.is_some(), "Report load failed.");
                return Err(e);
            }
        };
        Ok(self.replace(report))
    }

    pub fn replace(&mut self, report: Report) -> &Report {
        self.generation += 1;
        tracing::info!(
            generation = self.generation,
            trades = report.closed_trades.len(),
            orders = report.orders.len(),
            "Report loaded."
        );
        self.report.insert(report)
    }

    pub fn current(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.report.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::sample_document;
    use crate::Error;

    #[test]
    fn starts_empty() {
        let store = ReportStore::new();
        assert!(!store.is_loaded());
        assert_eq!(store.generation(), 0);
    }

    #[test]
    fn failed_load_keeps_the_previous_report() {
        let mut store = ReportStore::new();
        let bytes = serde_json::to_vec(&sample_document()).unwrap();
        store.load(&bytes).unwrap();
        let before = store.current().cloned();

        assert!(matches!(store.load(b"not json"), Err(Error::Parse(_))));
        assert!(matches!(store.load(b"{}"), Err(Error::Schema { .. })));

        assert_eq!(store.current().cloned(), before);
        assert_eq!(store.generation(), 1);
    }

    #[test]
    fn successful_load_replaces_the_report() {
        let mut store = ReportStore::new();
        store
            .load(&serde_json::to_vec(&sample_document()).unwrap())
            .unwrap();

        let mut second = sample_document();
        second["totalPerformance"]["closedTrades"] = serde_json::json!([]);
        store.load(&serde_json::to_vec(&second).unwrap()).unwrap();

        assert_eq!(store.generation(), 2);
        assert!(store.current().unwrap().closed_trades.is_empty());
    }
}
