use std::collections::BTreeMap;
use std::path::Path;

use tracing::{info, warn};

use super::domains::RiskDomain;
use super::inference::RiskInferenceAdapter;
use super::model::{ArtifactError, ModelArtifact};

/// Loaded adapters keyed by domain. Built once at startup, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    adapters: BTreeMap<RiskDomain, RiskInferenceAdapter>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `artifact` to `domain`'s schema and policy, replacing any earlier adapter.
    pub fn with_artifact(
        mut self,
        domain: RiskDomain,
        artifact: ModelArtifact,
    ) -> Result<Self, ArtifactError> {
        let adapter = RiskInferenceAdapter::bind(domain.schema(), artifact, domain.policy())?;
        self.adapters.insert(domain, adapter);
        Ok(self)
    }

    /// Load `<slug>.json` for every domain found in `dir`.
    ///
    /// A missing file leaves that domain unavailable; a file that exists but fails to
    /// parse or validate aborts the load.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let dir = dir.as_ref();
        let mut registry = Self::new();

        for domain in RiskDomain::ordered() {
            let path = dir.join(domain.artifact_file());
            if !path.is_file() {
                warn!(
                    %domain,
                    path = %path.display(),
                    "model artifact not found; domain unavailable"
                );
                continue;
            }
            let artifact = ModelArtifact::from_path(&path)?;
            registry = registry.with_artifact(domain, artifact)?;
            info!(%domain, path = %path.display(), "model artifact loaded");
        }

        Ok(registry)
    }

    pub fn adapter(&self, domain: RiskDomain) -> Option<&RiskInferenceAdapter> {
        self.adapters.get(&domain)
    }

    pub fn domains(&self) -> impl Iterator<Item = RiskDomain> + '_ {
        self.adapters.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}
