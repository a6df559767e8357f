use crate::{
    document::{align_columns, ArrayDecl, TypeNames},
    shader_table::ShaderTag,
};
use shc_manifest::{UniformBinding, UniformKind, VectorParam};

/// A uniform's slices of the flat vector-param and image-name arrays of its shader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformRecord {
    pub name: String,
    pub vector_offset: Option<usize>,
    pub vector_count: usize,
    pub image_offset: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniformLayout {
    vector_params: Vec<VectorParam>,
    image_names: Vec<String>,
    records: Vec<UniformRecord>,
}

impl UniformLayout {
    pub fn pack(bindings: &[UniformBinding]) -> Self {
        let mut layout = Self::default();

        for binding in bindings {
            let record = match &binding.kind {
                UniformKind::Vectors(params) => {
                    let vector_offset = if params.is_empty() {
                        None
                    } else {
                        Some(layout.vector_params.len())
                    };
                    layout.vector_params.extend(params.iter().cloned());

                    UniformRecord {
                        name: binding.name.clone(),
                        vector_offset,
                        vector_count: params.len(),
                        image_offset: None,
                    }
                }
                UniformKind::Image(image) => {
                    let image_offset = Some(layout.image_names.len());
                    layout.image_names.push(image.clone());

                    UniformRecord {
                        name: binding.name.clone(),
                        vector_offset: None,
                        vector_count: 0,
                        image_offset,
                    }
                }
            };

            layout.records.push(record);
        }

        layout
    }

    pub fn uniform_count(&self) -> usize {
        self.records.len()
    }

    /// The name of the shader's uniform array, or `None` when it has no uniforms.
    pub fn table_reference(&self, tag: &ShaderTag) -> Option<String> {
        if self.records.is_empty() {
            None
        } else {
            Some(tag.uniforms_name())
        }
    }

    pub fn declarations(&self, tag: &ShaderTag, types: &TypeNames) -> Vec<ArrayDecl> {
        let mut declarations = Vec::new();

        if !self.vector_params.is_empty() {
            let cells: Vec<Vec<String>> = self
                .vector_params
                .iter()
                .map(|param| vec![format!("{},", param.name), param.floats.to_string()])
                .collect();

            declarations.push(ArrayDecl {
                type_name: types.uniform_vector.clone(),
                name: tag.vector_params_name(),
                rows: align_columns(&cells),
            });
        }

        if !self.image_names.is_empty() {
            declarations.push(ArrayDecl {
                type_name: types.image_name.clone(),
                name: tag.image_params_name(),
                rows: self
                    .image_names
                    .iter()
                    .map(|image| format!("\t{}", image))
                    .collect(),
            });
        }

        if !self.records.is_empty() {
            let vector_params_name = tag.vector_params_name();
            let image_params_name = tag.image_params_name();

            let cells: Vec<Vec<String>> = self
                .records
                .iter()
                .map(|record| {
                    vec![
                        format!("{},", c_string_literal(&record.name)),
                        format!("{},", element_pointer(&vector_params_name, record.vector_offset)),
                        format!("{},", record.vector_count),
                        element_pointer(&image_params_name, record.image_offset),
                    ]
                })
                .collect();

            declarations.push(ArrayDecl {
                type_name: types.uniform.clone(),
                name: tag.uniforms_name(),
                rows: align_columns(&cells),
            });
        }

        declarations
    }
}

fn element_pointer(array: &str, offset: Option<usize>) -> String {
    match offset {
        Some(offset) => format!("&{}[ {} ]", array, offset),
        None => "NULL".to_owned(),
    }
}

fn c_string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');

    for c in value.chars() {
        match c {
            '"' | '\\' => {
                literal.push('\\');
                literal.push(c);
            }
            _ => literal.push(c),
        }
    }

    literal.push('"');
    literal
}
