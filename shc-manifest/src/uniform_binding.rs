#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VectorParam {
    pub name: String,
    pub floats: u8,
}

impl VectorParam {
    pub fn new(name: impl Into<String>, floats: u8) -> Self {
        Self {
            name: name.into(),
            floats,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UniformBinding {
    pub name: String,
    pub kind: UniformKind,
}

impl UniformBinding {
    pub fn vectors(name: impl Into<String>, params: Vec<VectorParam>) -> Self {
        Self {
            name: name.into(),
            kind: UniformKind::Vectors(params),
        }
    }

    pub fn image(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: UniformKind::Image(image.into()),
        }
    }
}

/// A binding is either a list of vector parameters or a single image, never both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UniformKind {
    Vectors(Vec<VectorParam>),
    Image(String),
}

impl UniformKind {
    pub fn as_vectors(&self) -> Option<&[VectorParam]> {
        match self {
            Self::Vectors(params) => Some(params),
            _ => None,
        }
    }
}
