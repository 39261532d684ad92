use super::{FatalError, RunSummary, SuiteOrchestrator};
use std::collections::HashSet;

/// Runs the suite once per model, in order.
///
/// Models are independent: a model that fails everything does not keep the
/// next one from running. Only a fatal error ends the run early, and all of
/// those are detected before the first request.
pub struct MultiModelDriver {
    orchestrator: SuiteOrchestrator,
}

impl MultiModelDriver {
    pub fn new(orchestrator: SuiteOrchestrator) -> Self {
        Self { orchestrator }
    }

    pub async fn run(&self, models: &[String]) -> Result<RunSummary, FatalError> {
        validate_models(models)?;
        self.orchestrator.check_ready()?;

        let mut summary = RunSummary::new(self.orchestrator.gateway().endpoint());
        tracing::info!(
            gateway = %summary.gateway,
            models = models.len(),
            iterations = self.orchestrator.iterations(),
            "Starting conformance run"
        );

        for model in models {
            let report = self.orchestrator.run_model(model).await?;
            summary.push(report);
        }

        summary.finish();
        tracing::info!(
            overall_success = summary.overall_success(),
            "Conformance run finished"
        );
        Ok(summary)
    }
}

fn validate_models(models: &[String]) -> Result<(), FatalError> {
    if models.is_empty() {
        return Err(FatalError::NoModels);
    }
    let mut seen = HashSet::new();
    for (index, model) in models.iter().enumerate() {
        if model.trim().is_empty() {
            return Err(FatalError::InvalidModel {
                index,
                reason: "model identifier cannot be blank".to_string(),
            });
        }
        if !seen.insert(model.as_str()) {
            return Err(FatalError::InvalidModel {
                index,
                reason: format!("duplicate model identifier '{}'", model),
            });
        }
    }
    Ok(())
}
