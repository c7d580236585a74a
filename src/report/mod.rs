//! End-of-run tallies.

use std::fmt;

/// Counters filled in by an action executor and printed once at the end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub matched: usize,
    pub acted: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn record_match(&mut self) {
        self.matched += 1;
    }

    pub fn record_success(&mut self) {
        self.acted += 1;
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Render with workflow-specific wording.
    pub fn display<'a>(&'a self, labels: &'a SummaryLabels) -> SummaryDisplay<'a> {
        SummaryDisplay {
            summary: self,
            labels,
        }
    }
}

/// Wording for each counter line.
#[derive(Debug, Clone)]
pub struct SummaryLabels {
    pub matched: String,
    pub acted: String,
    pub failed: String,
}

impl SummaryLabels {
    pub fn new(
        matched: impl Into<String>,
        acted: impl Into<String>,
        failed: impl Into<String>,
    ) -> Self {
        Self {
            matched: matched.into(),
            acted: acted.into(),
            failed: failed.into(),
        }
    }
}

pub struct SummaryDisplay<'a> {
    summary: &'a RunSummary,
    labels: &'a SummaryLabels,
}

impl fmt::Display for SummaryDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SUMMARY")?;
        writeln!(f, "- {}: {}", self.labels.matched, self.summary.matched)?;
        write!(f, "- {}: {}", self.labels.acted, self.summary.acted)?;
        if self.summary.has_failures() {
            write!(f, "\n- {}: {}", self.labels.failed, self.summary.failed)?;
        }
        Ok(())
    }
}
