use super::TypeNames;
use std::fmt::{Result as FmtResult, Write};

pub const FILE_BANNER: &str = "\
/*********************************************************************
*
*   This file is auto-generated.  DO NOT MODIFY IT DIRECTLY.
*   See 'shc-compiler' for more details.
*
*********************************************************************/
";

pub const TABLE_SECTION_TITLE: &str = "Code and uniforms";

pub fn write_section_banner(output: &mut impl Write, title: &str) -> FmtResult {
    writeln!(output, "/*--------------------------------------------------------")?;
    writeln!(output, "    {}", title)?;
    writeln!(output, "--------------------------------------------------------*/")
}

pub fn write_shader_banner(output: &mut impl Write, filename: &str) -> FmtResult {
    writeln!(output, "/*********************************************************")?;
    writeln!(output, "*")?;
    writeln!(output, "*   SHADER NAME:")?;
    writeln!(output, "*       {}", filename)?;
    writeln!(output, "*")?;
    writeln!(output, "*********************************************************/")
}

pub fn write_vector_param_type(output: &mut impl Write, types: &TypeNames) -> FmtResult {
    writeln!(output, "typedef struct")?;
    writeln!(output, "    {{")?;
    writeln!(output, "    {}", types.vector_name)?;
    writeln!(output, "                        name;       /* shader vector param name     */")?;
    writeln!(output, "    u8                  num_floats; /* floats read of parameter     */")?;
    writeln!(output, "    }} {};", types.uniform_vector)
}

pub fn write_uniform_type(output: &mut impl Write, types: &TypeNames) -> FmtResult {
    writeln!(output, "typedef struct")?;
    writeln!(output, "    {{")?;
    writeln!(output, "    const char         *str_name;   /* uniform string name          */")?;
    writeln!(output, "    const {}", types.uniform_vector)?;
    writeln!(output, "                       *vectors;    /* shader vector parameters     */")?;
    writeln!(output, "    u32                 vector_cnt; /* number of vector parameters  */")?;
    writeln!(output, "    const {}", types.image_name)?;
    writeln!(output, "                       *image;      /* shader image parameter       */")?;
    writeln!(output, "    }} {};", types.uniform)
}

pub fn write_element_type(output: &mut impl Write, types: &TypeNames) -> FmtResult {
    writeln!(output, "typedef struct")?;
    writeln!(output, "    {{")?;
    writeln!(output, "    const u32          *bytecode;   /* shader bytecode              */")?;
    writeln!(output, "    u32                 size;       /* bytecode size                */")?;
    writeln!(output, "    const {}", types.uniform)?;
    writeln!(output, "                       *uniforms;   /* shader uniforms              */")?;
    writeln!(output, "    u32                 uniform_cnt;/* number of shader uniforms    */")?;
    writeln!(output, "    }} {};", types.element)
}
