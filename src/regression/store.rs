use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::model::TrainedModel;
use crate::error::{PipelineError, Result};

/// Tag written into every artifact so foreign JSON is rejected on load.
const ARTIFACT_FORMAT: &str = "kinneret-area-model";
const ARTIFACT_VERSION: u32 = 1;

#[derive(Serialize)]
struct ArtifactRef<'a> {
    format: &'a str,
    version: u32,
    model: &'a TrainedModel,
}

#[derive(Deserialize)]
struct Artifact {
    format: String,
    version: u32,
    model: TrainedModel,
}

/// Write `model` to `path`, replacing any existing file.
///
/// The bytes go to a temporary file in the same directory which is renamed
/// over `path` only once fully written, so a failed save never leaves a
/// truncated artifact behind.
pub fn save(model: &TrainedModel, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| PipelineError::io(dir, e))?;

    let artifact = ArtifactRef {
        format: ARTIFACT_FORMAT,
        version: ARTIFACT_VERSION,
        model,
    };
    let bytes =
        serde_json::to_vec_pretty(&artifact).map_err(|e| PipelineError::io(path, e.into()))?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".model-")
        .suffix(".partial")
        .tempfile_in(dir)
        .map_err(|e| PipelineError::io(dir, e))?;
    tmp.write_all(&bytes)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| PipelineError::io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| PipelineError::io(path, e.error))?;

    log::debug!("wrote {} byte model artifact to {}", bytes.len(), path.display());
    Ok(())
}

/// Read a model previously written by [`save`].
pub fn load(path: &Path) -> Result<TrainedModel> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(PipelineError::NotFound(path.to_path_buf()));
        }
        Err(e) => return Err(PipelineError::io(path, e)),
    };

    let corrupt = |reason: String| PipelineError::CorruptArtifact {
        path: path.to_path_buf(),
        reason,
    };

    let artifact: Artifact =
        serde_json::from_slice(&bytes).map_err(|e| corrupt(e.to_string()))?;
    if artifact.format != ARTIFACT_FORMAT {
        return Err(corrupt(format!("unknown format '{}'", artifact.format)));
    }
    if artifact.version != ARTIFACT_VERSION {
        return Err(corrupt(format!(
            "unsupported version {} (expected {ARTIFACT_VERSION})",
            artifact.version
        )));
    }
    if !artifact.model.is_finite() {
        return Err(corrupt("non-finite coefficients".into()));
    }
    Ok(artifact.model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Dataset, Record};
    use crate::regression::{features, trainer};

    fn trained() -> TrainedModel {
        let ds: Dataset = (0..12)
            .map(|i| {
                let i = i as f32;
                Record {
                    floor1: i,
                    floor2: (i * 7.0) % 5.0,
                    floor3: (i * 3.0) % 4.0,
                    floor4: i * i,
                    temperature: 20.0 + (i % 3.0),
                    area: 3.0 * i + 1.5,
                }
            })
            .collect();
        let (params, vectors) = features::fit(&ds).unwrap();
        trainer::train(params, &vectors).unwrap()
    }

    #[test]
    fn load_of_save_predicts_identically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let model = trained();

        save(&model, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, model);
        let sample = Record {
            floor1: 123.0,
            floor2: 212.0,
            floor3: 232.0,
            floor4: 12.0,
            temperature: 23.0,
            area: 0.0,
        };
        assert_eq!(loaded.predict(&sample), model.predict(&sample));
    }

    #[test]
    fn save_overwrites_and_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/models/model.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"stale").unwrap();

        save(&trained(), &path).unwrap();
        assert!(load(&path).is_ok());

        let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".partial"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn missing_artifact_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, PipelineError::NotFound(_)));
    }

    #[test]
    fn garbage_bytes_are_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, b"\x00\x01not json").unwrap();
        assert!(matches!(load(&path), Err(PipelineError::CorruptArtifact { .. })));
    }

    #[test]
    fn wrong_version_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        save(&trained(), &path).unwrap();

        let mut value: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        value["version"] = serde_json::json!(99);
        std::fs::write(&path, serde_json::to_vec(&value).unwrap()).unwrap();

        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("version 99"), "{err}");
    }

    #[test]
    fn foreign_format_tag_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        save(&trained(), &path).unwrap();

        let mut value: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        value["format"] = serde_json::json!("other");
        std::fs::write(&path, serde_json::to_vec(&value).unwrap()).unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, PipelineError::CorruptArtifact { .. }));
        assert!(err.to_string().contains("unknown format 'other'"), "{err}");
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let err = save(&trained(), &blocker.join("model.json")).unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
    }
}
