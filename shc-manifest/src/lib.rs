mod manifest_entry;
mod parse;
mod stage;
mod uniform_binding;

pub use manifest_entry::*;
pub use stage::*;
pub use uniform_binding::*;

use parse::RawManifest;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("the manifest `{}` does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read the manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse the manifest: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unexpected stage name `{stage}` for `{filename}`; expected 'vertex', 'tessellation_control', 'tessellation_evaluation', 'geometry', 'fragment', or 'compute'")]
    MalformedEntry { stage: String, filename: String },
}

/// The shader list of one run, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new(entries: Vec<ManifestEntry>) -> Self {
        Self { entries }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(ManifestError::NotFound(path.to_owned()));
            }
            Err(err) => return Err(err.into()),
        };

        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ManifestError> {
        let raw: RawManifest = serde_json::from_str(content)?;
        Ok(Self::new(raw.into_entries()?))
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Entries of the given stage, preserving their input order.
    pub fn entries_for(&self, stage: Stage) -> impl Iterator<Item = &ManifestEntry> {
        self.entries.iter().filter(move |entry| entry.stage == stage)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_groups_by_stage() {
        let manifest = Manifest::from_json_str(
            r#"{"shaders": [
                {"stage": "fragment", "filename": "b.frag"},
                {"stage": "vertex", "filename": "a.vert"},
                {"stage": "fragment", "filename": "a.frag"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(manifest.len(), 3);

        let fragments: Vec<_> = manifest
            .entries_for(Stage::Fragment)
            .map(|entry| entry.filename.as_str())
            .collect();
        assert_eq!(fragments, vec!["b.frag", "a.frag"]);
        assert_eq!(manifest.entries_for(Stage::Compute).count(), 0);
    }

    #[test]
    fn test_manifest_unknown_stage() {
        let err = Manifest::from_json_str(
            r#"{"shaders": [
                {"stage": "vertex", "filename": "a.vert"},
                {"stage": "pixel", "filename": "a.ps"}
            ]}"#,
        )
        .unwrap_err();

        match err {
            ManifestError::MalformedEntry { stage, filename } => {
                assert_eq!(stage, "pixel");
                assert_eq!(filename, "a.ps");
            }
            err => panic!("unexpected error: {}", err),
        }
    }

    #[test]
    fn test_manifest_uniforms() {
        let manifest = Manifest::from_json_str(
            r#"{"shaders": [{
                "stage": "vertex",
                "filename": "model.vert",
                "uniforms": [
                    {"uniform_name": "frame", "shader_params": [
                        {"name": "VKN_SHADER_PARAM_VECTOR_NAME_TIME", "floats": 1},
                        {"name": "VKN_SHADER_PARAM_VECTOR_NAME_ONE_OVER_GAMMA", "floats": 4}
                    ]},
                    {"uniform_name": "albedo", "image": "VKN_SHADER_PARAM_IMAGE_NAME_0"}
                ]
            }]}"#,
        )
        .unwrap();

        let entry = &manifest.entries()[0];
        assert!(entry.has_uniforms());
        assert_eq!(
            entry.uniforms,
            vec![
                UniformBinding::vectors(
                    "frame",
                    vec![
                        VectorParam::new("VKN_SHADER_PARAM_VECTOR_NAME_TIME", 1),
                        VectorParam::new("VKN_SHADER_PARAM_VECTOR_NAME_ONE_OVER_GAMMA", 4),
                    ]
                ),
                UniformBinding::image("albedo", "VKN_SHADER_PARAM_IMAGE_NAME_0"),
            ]
        );
    }

    #[test]
    fn test_manifest_skips_incomplete_uniforms() {
        let manifest = Manifest::from_json_str(
            r#"{"shaders": [{
                "stage": "fragment",
                "filename": "lit.frag",
                "uniforms": [
                    {"shader_params": [{"name": "A", "floats": 4}]},
                    {"uniform_name": "empty"},
                    {"uniform_name": "params", "shader_params": [
                        {"name": "A"},
                        {"name": "B", "floats": 2}
                    ]},
                    {"uniform_name": "both", "shader_params": [], "image": "IMG"}
                ]
            }]}"#,
        )
        .unwrap();

        let uniforms = &manifest.entries()[0].uniforms;
        assert_eq!(uniforms.len(), 2);
        assert_eq!(
            uniforms[0],
            UniformBinding::vectors("params", vec![VectorParam::new("B", 2)])
        );
        assert_eq!(uniforms[1].name, "both");
        assert_eq!(uniforms[1].kind.as_vectors().map(|params| params.len()), Some(0));
    }

    #[test]
    fn test_manifest_entry_without_uniforms() {
        let manifest =
            Manifest::from_json_str(r#"{"shaders":[{"stage":"vertex","filename":"basic.vert"}]}"#)
                .unwrap();

        assert!(!manifest.entries()[0].has_uniforms());
    }

    #[test]
    fn test_manifest_invalid_documents() {
        assert!(matches!(
            Manifest::from_json_str(r#"{"entries": []}"#),
            Err(ManifestError::Parse(_))
        ));
        assert!(matches!(
            Manifest::from_json_str(
                r#"{"shaders":[{"stage":"vertex","filename":"a.vert","uniforms":[
                    {"uniform_name":"u","shader_params":[{"name":"A","floats":300}]}
                ]}]}"#
            ),
            Err(ManifestError::Parse(_))
        ));
    }

    #[test]
    fn test_manifest_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shaders.json");

        assert!(matches!(
            Manifest::load(&path),
            Err(ManifestError::NotFound(missing)) if missing == path
        ));

        std::fs::write(
            &path,
            r#"{"shaders":[{"stage":"compute","filename":"cull.comp"}]}"#,
        )
        .unwrap();

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(
            manifest.entries(),
            &[ManifestEntry::new(Stage::Compute, "cull.comp")]
        );
    }

    #[test]
    fn test_manifest_entry_base_name() {
        let entry = ManifestEntry::new(Stage::Vertex, "sub/dir/basic.vert");
        assert_eq!(entry.base_name(), "basic.vert");
    }
}
