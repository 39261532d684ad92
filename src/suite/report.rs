//! Per-model reports and the run summary.

use crate::checks::{FailureCategory, ScenarioOutcome};
use crate::scenario::Scenario;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Attempted/passed counts for one scenario.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScenarioTally {
    pub attempted: u32,
    pub passed: u32,
}

/// One scenario invocation as recorded in a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeRecord {
    /// 1-based iteration number.
    pub iteration: u32,
    pub scenario: Scenario,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<FailureCategory>,
    pub reason: String,
}

/// Counters for one model. Only grows while the suite runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuiteReport {
    pub model: String,
    pub attempted: u32,
    pub passed: u32,
    pub scenarios: BTreeMap<Scenario, ScenarioTally>,
    pub outcomes: Vec<OutcomeRecord>,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl SuiteReport {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            attempted: 0,
            passed: 0,
            scenarios: BTreeMap::new(),
            outcomes: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn record(&mut self, iteration: u32, scenario: Scenario, outcome: &ScenarioOutcome) {
        let passed = outcome.is_pass();
        let tally = self.scenarios.entry(scenario).or_default();
        tally.attempted += 1;
        self.attempted += 1;
        if passed {
            tally.passed += 1;
            self.passed += 1;
        }
        self.outcomes.push(OutcomeRecord {
            iteration,
            scenario,
            passed,
            category: outcome.failure().map(|f| f.category()),
            reason: outcome.reason(),
        });
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Percentage of attempted tests that passed; 0 when nothing ran.
    pub fn success_rate(&self) -> f64 {
        if self.attempted == 0 {
            return 0.0;
        }
        f64::from(self.passed) / f64::from(self.attempted) * 100.0
    }

    pub fn is_success(&self) -> bool {
        self.attempted == self.passed
    }

    pub fn failures(&self) -> impl Iterator<Item = &OutcomeRecord> {
        self.outcomes.iter().filter(|o| !o.passed)
    }

    /// Failure counts by category.
    pub fn failure_categories(&self) -> BTreeMap<FailureCategory, u32> {
        let mut counts = BTreeMap::new();
        for category in self.failures().filter_map(|o| o.category) {
            *counts.entry(category).or_insert(0) += 1;
        }
        counts
    }
}

/// Reports for every model in one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub gateway: String,
    pub reports: Vec<SuiteReport>,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunSummary {
    pub fn new(gateway: impl Into<String>) -> Self {
        Self {
            gateway: gateway.into(),
            reports: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn push(&mut self, report: SuiteReport) {
        self.reports.push(report);
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// True iff every model passed every attempted test.
    pub fn overall_success(&self) -> bool {
        self.reports.iter().all(SuiteReport::is_success)
    }

    pub fn report(&self, model: &str) -> Option<&SuiteReport> {
        self.reports.iter().find(|r| r.model == model)
    }
}
