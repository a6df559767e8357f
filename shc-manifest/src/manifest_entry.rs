use crate::{Stage, UniformBinding};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManifestEntry {
    pub stage: Stage,
    pub filename: String,
    pub uniforms: Vec<UniformBinding>,
}

impl ManifestEntry {
    pub fn new(stage: Stage, filename: impl Into<String>) -> Self {
        Self {
            stage,
            filename: filename.into(),
            uniforms: Vec::new(),
        }
    }

    pub fn with_uniforms(mut self, uniforms: Vec<UniformBinding>) -> Self {
        self.uniforms = uniforms;
        self
    }

    /// The base name of the entry's file, used for source lookup and tag generation.
    pub fn base_name(&self) -> &str {
        Path::new(&self.filename)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.filename)
    }

    pub fn has_uniforms(&self) -> bool {
        !self.uniforms.is_empty()
    }
}
