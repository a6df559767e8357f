use crate::error::GeneratorError;
use log::debug;
use shc_manifest::{ManifestEntry, Stage};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Index of every file under a shader source root, keyed by base name.
#[derive(Debug, Clone)]
pub struct SourceLocator {
    root: PathBuf,
    files: BTreeMap<String, Vec<PathBuf>>,
}

impl SourceLocator {
    pub fn scan(root: impl Into<PathBuf>) -> Result<Self, GeneratorError> {
        let root = root.into();
        let mut files = BTreeMap::<String, Vec<PathBuf>>::new();
        let mut dirs = vec![root.clone()];

        loop {
            if dirs.is_empty() {
                break;
            }

            let mut added_dirs = Vec::new();

            for dir in &dirs {
                for entry in dir.read_dir()? {
                    let entry = entry?;
                    let metadata = entry.metadata()?;

                    if metadata.is_dir() {
                        added_dirs.push(entry.path());
                        continue;
                    }

                    if !metadata.is_file() {
                        continue;
                    }

                    let name = entry.file_name().to_string_lossy().to_string();
                    files.entry(name).or_default().push(entry.path());
                }
            }

            dirs = added_dirs;
        }

        for candidates in files.values_mut() {
            candidates.sort();
        }

        debug!(
            "indexed {} file name(s) under `{}`.",
            files.len(),
            root.display()
        );

        Ok(Self { root, files })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Finds the single file named `filename`. A name shared by several files is an error.
    pub fn locate(&self, filename: &str) -> Result<Option<&Path>, GeneratorError> {
        match self.files.get(filename).map(Vec::as_slice) {
            None | Some([]) => Ok(None),
            Some([path]) => Ok(Some(path)),
            Some(candidates) => Err(GeneratorError::AmbiguousShaderSource {
                filename: filename.to_owned(),
                candidates: candidates.to_vec(),
            }),
        }
    }

    /// Resolves every entry of a stage, reporting all missing files at once.
    pub fn locate_stage(
        &self,
        stage: Stage,
        entries: &[&ManifestEntry],
    ) -> Result<Vec<PathBuf>, GeneratorError> {
        let mut located = Vec::with_capacity(entries.len());
        let mut missing = Vec::new();

        for entry in entries {
            match self.locate(entry.base_name())? {
                Some(path) => {
                    debug!("found `{}` at `{}`.", entry.filename, path.display());
                    located.push(path.to_owned());
                }
                None => missing.push(entry.filename.clone()),
            }
        }

        if !missing.is_empty() {
            return Err(GeneratorError::ShaderSourceNotFound {
                stage,
                filenames: missing,
            });
        }

        Ok(located)
    }
}
