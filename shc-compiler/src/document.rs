mod template;

use self::template::{
    write_element_type, write_section_banner, write_shader_banner, write_uniform_type,
    write_vector_param_type, FILE_BANNER, TABLE_SECTION_TITLE,
};
use crate::{bytecode::format_word_array, error::GeneratorError};
use shc_manifest::Stage;
use std::{
    fmt::{Result as FmtResult, Write},
    path::{Path, PathBuf},
};

/// Names of the types declared by, or referenced from, the generated header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNames {
    pub name_enum: String,
    pub uniform_vector: String,
    pub uniform: String,
    pub element: String,
    pub vector_name: String,
    pub image_name: String,
}

impl TypeNames {
    pub fn new(prefix: &str, vector_name: &str, image_name: &str) -> Self {
        let prefix = prefix.to_lowercase();

        Self {
            name_enum: format!("{}_name_type", prefix),
            uniform_vector: format!("{}_uniform_vector_type", prefix),
            uniform: format!("{}_uniform_type", prefix),
            element: format!("{}_element_type", prefix),
            vector_name: vector_name.to_owned(),
            image_name: image_name.to_owned(),
        }
    }
}

/// A `static const` array whose rows are already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayDecl {
    pub type_name: String,
    pub name: String,
    pub rows: Vec<String>,
}

impl ArrayDecl {
    fn write(&self, output: &mut impl Write) -> FmtResult {
        writeln!(output, "static const {} {}[] =", self.type_name, self.name)?;
        writeln!(output, "    {{")?;
        writeln!(output, "{}", self.rows.join(",\n"))?;
        writeln!(output, "    }};")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BytecodeDecl {
    pub name: String,
    pub words: Vec<u32>,
}

impl BytecodeDecl {
    fn write(&self, output: &mut impl Write) -> FmtResult {
        writeln!(output, "static const u32 {}[] =", self.name)?;
        writeln!(output, "\t{{")?;
        writeln!(output, "\t{}", format_word_array(&self.words))?;
        writeln!(output, "\t}};")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderBlock {
    pub filename: String,
    pub bytecode: BytecodeDecl,
    /// Vector params, image names and uniform records, in that order, when present.
    pub arrays: Vec<ArrayDecl>,
}

impl ShaderBlock {
    fn write(&self, output: &mut impl Write) -> FmtResult {
        write_shader_banner(output, &self.filename)?;
        writeln!(output)?;
        self.bytecode.write(output)?;

        for array in &self.arrays {
            writeln!(output)?;
            array.write(output)?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSection {
    pub stage: Stage,
    pub shaders: Vec<ShaderBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDecl {
    pub name: String,
    pub members: Vec<String>,
    pub sentinel: String,
}

impl EnumDecl {
    fn write(&self, output: &mut impl Write) -> FmtResult {
        writeln!(output, "typedef enum")?;
        writeln!(output, "    {{")?;

        for member in &self.members {
            writeln!(output, "\t{},", member)?;
        }

        writeln!(output, "\t/* count */")?;
        writeln!(output, "\t{}", self.sentinel)?;
        writeln!(output, "    }} {};", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderDocument {
    pub includes: Vec<String>,
    pub types: TypeNames,
    pub name_enum: EnumDecl,
    pub sections: Vec<StageSection>,
    /// Absent when the manifest lists no shaders.
    pub table: Option<ArrayDecl>,
}

impl HeaderDocument {
    pub fn render(&self) -> Result<String, GeneratorError> {
        let mut output = String::new();

        output.push_str(FILE_BANNER);
        writeln!(output)?;
        writeln!(output, "#pragma once")?;
        writeln!(output)?;

        if !self.includes.is_empty() {
            for include in &self.includes {
                writeln!(output, "#include \"{}\"", include)?;
            }
            writeln!(output)?;
        }

        self.name_enum.write(&mut output)?;
        writeln!(output)?;
        write_vector_param_type(&mut output, &self.types)?;
        writeln!(output)?;
        write_uniform_type(&mut output, &self.types)?;
        writeln!(output)?;
        write_element_type(&mut output, &self.types)?;

        for section in &self.sections {
            if section.shaders.is_empty() {
                continue;
            }

            writeln!(output)?;
            write_section_banner(&mut output, section.stage.title())?;

            for shader in &section.shaders {
                writeln!(output)?;
                shader.write(&mut output)?;
            }
        }

        if let Some(table) = &self.table {
            writeln!(output)?;
            write_section_banner(&mut output, TABLE_SECTION_TITLE)?;
            table.write(&mut output)?;
        }

        Ok(output)
    }
}

/// Formats rows of cells as `{ ... }` initializers, padding every column but the last to
/// the widest cell in that column.
pub fn align_columns(rows: &[Vec<String>]) -> Vec<String> {
    let mut widths = Vec::<usize>::new();

    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            if widths.len() <= index {
                widths.push(0);
            }
            widths[index] = widths[index].max(cell.len());
        }
    }

    rows.iter()
        .map(|row| {
            let cells: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(index, cell)| {
                    if index + 1 == row.len() {
                        cell.clone()
                    } else {
                        format!("{:<width$}", cell, width = widths[index])
                    }
                })
                .collect();

            format!("\t{{ {} }}", cells.join(" "))
        })
        .collect()
}

pub fn header_path(folder: &Path, name: &str) -> PathBuf {
    folder.join(format!("{}.hpp", name))
}

/// Writes `<folder>/<name>.hpp`, creating the folder when missing.
pub fn write_header(folder: &Path, name: &str, contents: &str) -> Result<PathBuf, GeneratorError> {
    std::fs::create_dir_all(folder)?;

    let path = header_path(folder, name);
    std::fs::write(&path, contents)?;

    Ok(path)
}
