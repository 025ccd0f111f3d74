use std::fs;
use std::path::PathBuf;

use riskwise::assessment::{ArtifactError, ModelArtifact, ModelRegistry, RiskDomain};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("riskwise-{name}-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("scratch dir");
    dir
}

const THYROID_ARTIFACT: &str = r#"{
  "schema": "thyroid",
  "schema_version": 1,
  "feature_cols": [
    "Age", "Gender", "Family_History", "Radiation_Exposure", "Iodine_Deficiency",
    "Smoking", "Obesity", "Diabetes", "Nodule_Size", "Ethnicity_Asian",
    "Ethnicity_Caucasian", "Ethnicity_Hispanic", "Ethnicity_Middle Eastern"
  ],
  "model": {
    "kind": "gradient_boosted_trees",
    "base_margin": -0.5,
    "trees": [
      {
        "nodes": [
          { "kind": "split", "feature": 8, "threshold": 2.0, "left": 1, "right": 2 },
          { "kind": "leaf", "value": -1.0 },
          { "kind": "leaf", "value": 1.0 }
        ]
      }
    ]
  }
}"#;

#[test]
fn missing_artifacts_leave_domains_unavailable() {
    let dir = scratch_dir("partial");
    fs::write(dir.join("thyroid.json"), THYROID_ARTIFACT).expect("write artifact");

    let registry = ModelRegistry::load_dir(&dir).expect("partial directory loads");
    assert_eq!(registry.domains().collect::<Vec<_>>(), vec![RiskDomain::Thyroid]);
    assert!(registry.adapter(RiskDomain::Diabetes).is_none());

    fs::remove_dir_all(dir).ok();
}

#[test]
fn invalid_artifact_aborts_loading() {
    let dir = scratch_dir("invalid");
    let drifted = THYROID_ARTIFACT.replace(
        "\"Obesity\", \"Diabetes\"",
        "\"Diabetes\", \"Obesity\"",
    );
    fs::write(dir.join("thyroid.json"), drifted).expect("write artifact");

    match ModelRegistry::load_dir(&dir) {
        Err(ArtifactError::ColumnOrder {
            position,
            expected,
            found,
        }) => {
            assert_eq!(position, 6);
            assert_eq!(expected, "Obesity");
            assert_eq!(found, "Diabetes");
        }
        other => panic!("expected column drift to be rejected, got {other:?}"),
    }

    fs::write(dir.join("thyroid.json"), "{ not json").expect("write artifact");
    assert!(matches!(
        ModelRegistry::load_dir(&dir),
        Err(ArtifactError::Parse(_))
    ));

    fs::remove_dir_all(dir).ok();
}

#[test]
fn trees_with_backward_children_are_rejected() {
    let cyclic = THYROID_ARTIFACT.replace("\"left\": 1, \"right\": 2", "\"left\": 0, \"right\": 2");
    let artifact = ModelArtifact::from_reader(cyclic.as_bytes()).expect("parses");

    let result = ModelRegistry::new().with_artifact(RiskDomain::Thyroid, artifact);
    assert!(matches!(
        result,
        Err(ArtifactError::InvalidTree { tree: 0, .. })
    ));
}

#[test]
fn tree_splits_reference_existing_features() {
    let wide = THYROID_ARTIFACT.replace("\"feature\": 8", "\"feature\": 13");
    let artifact = ModelArtifact::from_reader(wide.as_bytes()).expect("parses");

    assert!(ModelRegistry::new()
        .with_artifact(RiskDomain::Thyroid, artifact)
        .is_err());
}

#[test]
fn unknown_model_kind_fails_to_parse() {
    let forest = THYROID_ARTIFACT.replace("gradient_boosted_trees", "random_forest");
    assert!(matches!(
        ModelArtifact::from_reader(forest.as_bytes()),
        Err(ArtifactError::Parse(_))
    ));
}
