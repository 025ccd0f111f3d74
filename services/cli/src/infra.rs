use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use riskwise::assessment::{AnswerSet, ModelRegistry, RiskAssessmentService};
use riskwise::config::AppConfig;
use riskwise::error::AppError;
use riskwise::telemetry;
use tracing::{info, warn};

/// Load configuration, start telemetry and load every available model artifact.
pub(crate) fn bootstrap(models: Option<PathBuf>) -> Result<RiskAssessmentService, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(dir) = models {
        config.models.dir = dir;
    }

    telemetry::init(&config.telemetry)?;

    let registry = ModelRegistry::load_dir(&config.models.dir)?;
    if registry.is_empty() {
        warn!(dir = %config.models.dir.display(), "no model artifacts loaded");
    }
    info!(
        ?config.environment,
        dir = %config.models.dir.display(),
        domains = registry.domains().count(),
        "risk models ready"
    );

    Ok(RiskAssessmentService::new(Arc::new(registry)))
}

pub(crate) fn read_answers(path: &Path) -> Result<AnswerSet, AppError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
