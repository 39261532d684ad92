use super::{FatalError, SuiteReport};
use crate::checks::ScenarioOutcome;
use crate::config::ConformanceConfig;
use crate::gateway::Gateway;
use crate::logging::generate_request_id;
use crate::scenario::ScenarioSet;
use std::sync::Arc;
use tracing::Instrument;

/// Drives the scenarios for one model at a time.
///
/// Each iteration runs every scenario in order. A failing scenario is recorded
/// and the run moves on; nothing short of a fatal setup error stops it early.
pub struct SuiteOrchestrator {
    gateway: Arc<dyn Gateway>,
    scenarios: ScenarioSet,
    iterations: u32,
    log_content: bool,
}

impl SuiteOrchestrator {
    pub fn new(gateway: Arc<dyn Gateway>, scenarios: ScenarioSet, iterations: u32) -> Self {
        Self {
            gateway,
            scenarios,
            iterations,
            log_content: false,
        }
    }

    /// Build from configuration. Contract errors surface here as fatal.
    pub fn from_config(
        gateway: Arc<dyn Gateway>,
        config: &ConformanceConfig,
    ) -> Result<Self, FatalError> {
        let scenarios = ScenarioSet::from_config(config)?;
        Ok(Self::new(gateway, scenarios, config.suite.iterations)
            .with_content_logging(config.logging.enable_content_logging))
    }

    pub fn with_content_logging(mut self, enabled: bool) -> Self {
        self.log_content = enabled;
        self
    }

    pub fn gateway(&self) -> &dyn Gateway {
        self.gateway.as_ref()
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Check the preconditions that would make a run meaningless.
    pub fn check_ready(&self) -> Result<(), FatalError> {
        if self.iterations == 0 {
            return Err(FatalError::NoIterations);
        }
        if self.scenarios.is_empty() {
            return Err(FatalError::NoScenarios);
        }
        Ok(())
    }

    /// Run every iteration for `model` and return its finished report.
    pub async fn run_model(&self, model: &str) -> Result<SuiteReport, FatalError> {
        self.check_ready()?;
        if model.trim().is_empty() {
            return Err(FatalError::BlankModel);
        }

        let mut report = SuiteReport::new(model);

        for iteration in 1..=self.iterations {
            tracing::debug!(model, iteration, "Starting iteration");

            for runner in self.scenarios.runners() {
                let scenario = runner.scenario();
                let span = tracing::info_span!(
                    "scenario",
                    model = %model,
                    scenario = %scenario,
                    iteration,
                    request_id = %generate_request_id(),
                );

                let outcome = async {
                    let outcome = runner
                        .run(self.gateway.as_ref(), model, self.log_content)
                        .await;
                    match &outcome {
                        ScenarioOutcome::Pass(kind) => {
                            tracing::info!(note = %kind, "Scenario passed");
                        }
                        ScenarioOutcome::Fail(failure) => {
                            tracing::warn!(
                                category = %failure.category(),
                                reason = %failure,
                                "Scenario failed"
                            );
                        }
                    }
                    outcome
                }
                .instrument(span)
                .await;

                report.record(iteration, scenario, &outcome);
            }
        }

        report.finish();
        tracing::info!(
            model,
            attempted = report.attempted,
            passed = report.passed,
            success_rate = %format!("{:.1}%", report.success_rate()),
            "Model suite finished"
        );

        Ok(report)
    }
}
