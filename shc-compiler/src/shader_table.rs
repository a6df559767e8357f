use crate::{
    document::{align_columns, ArrayDecl, EnumDecl, TypeNames},
    error::GeneratorError,
    uniform_layout::UniformLayout,
};
use std::{
    collections::{btree_map::Entry, BTreeMap},
    path::Path,
};

/// Identifier parts derived from a shader's base file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShaderTag {
    prefix: String,
    stem: String,
    extension: String,
}

impl ShaderTag {
    pub fn new(prefix: &str, filename: &str) -> Self {
        let path = Path::new(filename);
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|extension| extension.to_string_lossy().to_string())
            .unwrap_or_default();

        Self {
            prefix: prefix.to_owned(),
            stem: identifier_part(&stem),
            extension: identifier_part(&extension),
        }
    }

    /// `{PREFIX}_NAME_{EXT}_{STEM}`, the enum member and table sort key.
    pub fn identifier(&self) -> String {
        format!("{}_NAME_{}_{}", self.prefix, self.extension, self.stem)
    }

    pub fn bytecode_name(&self) -> String {
        self.array_name("BYTECODE")
    }

    pub fn vector_params_name(&self) -> String {
        self.array_name("SHADER_PARAMS")
    }

    pub fn image_params_name(&self) -> String {
        self.array_name("IMAGE_PARAMS")
    }

    pub fn uniforms_name(&self) -> String {
        self.array_name("UNIFORMS")
    }

    fn array_name(&self, kind: &str) -> String {
        format!("{}_{}_{}_{}", self.prefix, kind, self.stem, self.extension)
    }
}

fn identifier_part(part: &str) -> String {
    part.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderTableRow {
    pub identifier: String,
    pub source: String,
    pub bytecode: String,
    pub uniforms: Option<String>,
    pub uniform_count: usize,
}

impl ShaderTableRow {
    pub fn size_expression(&self) -> String {
        format!("sizeof( {} )", self.bytecode)
    }
}

/// One row per shader, kept ordered by identifier.
#[derive(Debug, Clone, Default)]
pub struct ShaderTable {
    rows: BTreeMap<String, ShaderTableRow>,
}

impl ShaderTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        source: &str,
        tag: &ShaderTag,
        layout: &UniformLayout,
    ) -> Result<(), GeneratorError> {
        let identifier = tag.identifier();

        match self.rows.entry(identifier) {
            Entry::Occupied(entry) => Err(GeneratorError::DuplicateIdentifier {
                identifier: entry.key().clone(),
                first: entry.get().source.clone(),
                second: source.to_owned(),
            }),
            Entry::Vacant(entry) => {
                let row = ShaderTableRow {
                    identifier: entry.key().clone(),
                    source: source.to_owned(),
                    bytecode: tag.bytecode_name(),
                    uniforms: layout.table_reference(tag),
                    uniform_count: layout.uniform_count(),
                };
                entry.insert(row);
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn enum_members(&self) -> Vec<String> {
        self.rows.keys().cloned().collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = &ShaderTableRow> {
        self.rows.values()
    }

    pub fn to_enum_decl(&self, prefix: &str, types: &TypeNames) -> EnumDecl {
        EnumDecl {
            name: types.name_enum.clone(),
            members: self.enum_members(),
            sentinel: format!("{}_NAME_CNT", prefix),
        }
    }

    pub fn to_array_decl(&self, prefix: &str, types: &TypeNames) -> Option<ArrayDecl> {
        if self.is_empty() {
            return None;
        }

        let cells: Vec<Vec<String>> = self
            .rows()
            .map(|row| {
                vec![
                    format!("/* {} */", row.identifier),
                    format!("{},", row.bytecode),
                    format!("{},", row.size_expression()),
                    format!("{},", row.uniforms.as_deref().unwrap_or("NULL")),
                    row.uniform_count.to_string(),
                ]
            })
            .collect();

        Some(ArrayDecl {
            type_name: types.element.clone(),
            name: format!("{}_TABLE", prefix),
            rows: align_columns(&cells),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shc_manifest::{UniformBinding, VectorParam};

    fn types() -> TypeNames {
        TypeNames::new("VKN_SHADERS", "vector_name_type", "image_name_type")
    }

    #[test]
    fn test_shader_tag_names() {
        let tag = ShaderTag::new("VKN_SHADERS", "basic.vert");

        assert_eq!(tag.identifier(), "VKN_SHADERS_NAME_VERT_BASIC");
        assert_eq!(tag.bytecode_name(), "VKN_SHADERS_BYTECODE_BASIC_VERT");
        assert_eq!(tag.vector_params_name(), "VKN_SHADERS_SHADER_PARAMS_BASIC_VERT");
        assert_eq!(tag.image_params_name(), "VKN_SHADERS_IMAGE_PARAMS_BASIC_VERT");
        assert_eq!(tag.uniforms_name(), "VKN_SHADERS_UNIFORMS_BASIC_VERT");
    }

    #[test]
    fn test_shader_tag_sanitizes_identifier() {
        let tag = ShaderTag::new("VKN", "post-fx.v2.frag");
        assert_eq!(tag.identifier(), "VKN_NAME_FRAG_POST_FX_V2");
    }

    #[test]
    fn test_table_sorted_by_identifier() {
        let mut table = ShaderTable::new();
        let empty = UniformLayout::default();

        for filename in ["sprite.frag", "basic.vert", "cull.comp", "basic.frag"] {
            let tag = ShaderTag::new("VKN_SHADERS", filename);
            table.insert(filename, &tag, &empty).unwrap();
        }

        let members = table.enum_members();
        assert_eq!(
            members,
            vec![
                "VKN_SHADERS_NAME_COMP_CULL",
                "VKN_SHADERS_NAME_FRAG_BASIC",
                "VKN_SHADERS_NAME_FRAG_SPRITE",
                "VKN_SHADERS_NAME_VERT_BASIC",
            ]
        );

        let row_identifiers: Vec<&str> = table.rows().map(|row| row.identifier.as_str()).collect();
        assert_eq!(row_identifiers, members);
    }

    #[test]
    fn test_table_rejects_duplicate_identifier() {
        let mut table = ShaderTable::new();
        let empty = UniformLayout::default();

        table
            .insert("a/basic.vert", &ShaderTag::new("P", "basic.vert"), &empty)
            .unwrap();
        let err = table
            .insert("b/basic.vert", &ShaderTag::new("P", "basic.vert"), &empty)
            .unwrap_err();

        match err {
            GeneratorError::DuplicateIdentifier {
                identifier,
                first,
                second,
            } => {
                assert_eq!(identifier, "P_NAME_VERT_BASIC");
                assert_eq!(first, "a/basic.vert");
                assert_eq!(second, "b/basic.vert");
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_table_rows_reference_uniforms() {
        let mut table = ShaderTable::new();
        let plain = ShaderTag::new("P", "basic.vert");
        let lit = ShaderTag::new("P", "lit.frag");
        let layout = UniformLayout::pack(&[UniformBinding::vectors(
            "frame",
            vec![VectorParam::new("TIME", 1)],
        )]);

        table.insert("basic.vert", &plain, &UniformLayout::default()).unwrap();
        table.insert("lit.frag", &lit, &layout).unwrap();

        let decl = table.to_array_decl("P", &types()).unwrap();
        assert_eq!(decl.name, "P_TABLE");
        assert_eq!(decl.type_name, "vkn_shaders_element_type");
        assert_eq!(
            decl.rows,
            vec![
                "\t{ /* P_NAME_FRAG_LIT */   P_BYTECODE_LIT_FRAG,   sizeof( P_BYTECODE_LIT_FRAG ),   P_UNIFORMS_LIT_FRAG, 1 }",
                "\t{ /* P_NAME_VERT_BASIC */ P_BYTECODE_BASIC_VERT, sizeof( P_BYTECODE_BASIC_VERT ), NULL,                0 }",
            ]
        );

        let enum_decl = table.to_enum_decl("P", &types());
        assert_eq!(enum_decl.sentinel, "P_NAME_CNT");
        assert_eq!(enum_decl.members.len(), 2);
    }

    #[test]
    fn test_empty_table_has_no_array() {
        let table = ShaderTable::new();
        assert!(table.to_array_decl("P", &types()).is_none());
        assert!(table.to_enum_decl("P", &types()).members.is_empty());
    }
}
