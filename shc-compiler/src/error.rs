use shc_manifest::{ManifestError, Stage};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("the manifest `{}` does not exist", .0.display())]
    ManifestNotFound(PathBuf),
    #[error("the shader compiler `{}` does not exist", .0.display())]
    CompilerBinaryNotFound(PathBuf),
    #[error("unexpected stage name `{stage}` for `{filename}`; expected 'vertex', 'tessellation_control', 'tessellation_evaluation', 'geometry', 'fragment', or 'compute'")]
    MalformedManifestEntry { stage: String, filename: String },
    #[error("failed to find {} {stage} shader source(s): {}", .filenames.len(), .filenames.join(", "))]
    ShaderSourceNotFound {
        stage: Stage,
        filenames: Vec<String>,
    },
    #[error("the shader source `{filename}` is ambiguous; it matches {}", join_paths(.candidates))]
    AmbiguousShaderSource {
        filename: String,
        candidates: Vec<PathBuf>,
    },
    #[error("the shader identifier `{identifier}` is generated by both `{first}` and `{second}`")]
    DuplicateIdentifier {
        identifier: String,
        first: String,
        second: String,
    },
    #[error("failed to compile the shader `{filename}`:\n{diagnostic}")]
    ShaderCompilationFailed { filename: String, diagnostic: String },
    #[error("failed to launch the shader compiler `{}`", .program.display())]
    CompilerLaunch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to load the manifest")]
    Manifest(#[source] ManifestError),
    #[error("failed to format the generated header")]
    Format(#[from] std::fmt::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<ManifestError> for GeneratorError {
    fn from(err: ManifestError) -> Self {
        match err {
            ManifestError::NotFound(path) => Self::ManifestNotFound(path),
            ManifestError::MalformedEntry { stage, filename } => {
                Self::MalformedManifestEntry { stage, filename }
            }
            err => Self::Manifest(err),
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| format!("`{}`", path.display()))
        .collect::<Vec<_>>()
        .join(", ")
}
