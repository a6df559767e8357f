use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Vertex,
    TessellationControl,
    TessellationEvaluation,
    Geometry,
    Fragment,
    Compute,
}

impl Stage {
    /// All stages, in the order their sections appear in the generated header.
    pub const ALL: [Stage; 6] = [
        Stage::Vertex,
        Stage::TessellationControl,
        Stage::TessellationEvaluation,
        Stage::Geometry,
        Stage::Fragment,
        Stage::Compute,
    ];

    pub fn from_manifest_name(name: &str) -> Option<Self> {
        match name {
            "vertex" => Some(Self::Vertex),
            "tessellation_control" => Some(Self::TessellationControl),
            "tessellation_evaluation" => Some(Self::TessellationEvaluation),
            "geometry" => Some(Self::Geometry),
            "fragment" => Some(Self::Fragment),
            "compute" => Some(Self::Compute),
            _ => None,
        }
    }

    pub fn manifest_name(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::TessellationControl => "tessellation_control",
            Self::TessellationEvaluation => "tessellation_evaluation",
            Self::Geometry => "geometry",
            Self::Fragment => "fragment",
            Self::Compute => "compute",
        }
    }

    /// Section title of the stage's block in the generated header.
    pub fn title(self) -> &'static str {
        match self {
            Self::Vertex => "Vertex Shaders",
            Self::TessellationControl => "Tessellation Control Shaders",
            Self::TessellationEvaluation => "Tessellation Evaluation Shaders",
            Self::Geometry => "Geometry Shaders",
            Self::Fragment => "Fragment Shaders",
            Self::Compute => "Compute Shaders",
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.manifest_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_manifest_names() {
        for stage in Stage::ALL {
            assert_eq!(Stage::from_manifest_name(stage.manifest_name()), Some(stage));
        }
    }

    #[test]
    fn test_stage_unknown_name() {
        assert_eq!(Stage::from_manifest_name("pixel"), None);
        assert_eq!(Stage::from_manifest_name("Vertex"), None);
    }
}
