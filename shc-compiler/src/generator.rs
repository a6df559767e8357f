use crate::{
    bytecode::{words_from_bytes, BytecodeCompiler},
    document::{BytecodeDecl, HeaderDocument, ShaderBlock, StageSection, TypeNames},
    error::GeneratorError,
    shader_table::{ShaderTable, ShaderTag},
    source_locator::SourceLocator,
    uniform_layout::UniformLayout,
};
use log::{info, warn};
use shc_manifest::{Manifest, ManifestEntry, Stage};

pub const DEFAULT_PREFIX: &str = "SHADER";
pub const DEFAULT_VECTOR_NAME_TYPE: &str = "VKN_shader_param_vector_name_type";
pub const DEFAULT_IMAGE_NAME_TYPE: &str = "VKN_shader_param_image_name_type";
pub const DEFAULT_INCLUDES: [&str; 2] = ["Global.hpp", "VknShaderParamTypes.hpp"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub prefix: String,
    pub includes: Vec<String>,
    pub vector_name_type: String,
    pub image_name_type: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_owned(),
            includes: DEFAULT_INCLUDES.iter().map(|include| include.to_string()).collect(),
            vector_name_type: DEFAULT_VECTOR_NAME_TYPE.to_owned(),
            image_name_type: DEFAULT_IMAGE_NAME_TYPE.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedHeader {
    pub contents: String,
    pub shader_count: usize,
}

struct PlannedShader<'a> {
    entry: &'a ManifestEntry,
    tag: ShaderTag,
    layout: UniformLayout,
}

/// Compiles every shader of the manifest and renders the header.
///
/// Identifiers are registered for all stages before anything is compiled, so name clashes
/// are reported without running the compiler. Each stage then resolves all of its sources
/// before compiling them in manifest order; the first failure ends the run.
pub fn generate_header(
    manifest: &Manifest,
    locator: &SourceLocator,
    compiler: &impl BytecodeCompiler,
    options: &GeneratorOptions,
) -> Result<GeneratedHeader, GeneratorError> {
    let types = TypeNames::new(
        &options.prefix,
        &options.vector_name_type,
        &options.image_name_type,
    );
    let mut table = ShaderTable::new();
    let mut plans = Vec::new();

    for stage in Stage::ALL {
        let mut planned = Vec::new();

        for entry in manifest.entries_for(stage) {
            let tag = ShaderTag::new(&options.prefix, entry.base_name());
            let layout = UniformLayout::pack(&entry.uniforms);
            table.insert(&entry.filename, &tag, &layout)?;
            planned.push(PlannedShader { entry, tag, layout });
        }

        if !planned.is_empty() {
            plans.push((stage, planned));
        }
    }

    let mut sections = Vec::with_capacity(plans.len());

    for (stage, planned) in plans {
        info!("compiling {} {} shader(s).", planned.len(), stage);

        let entries: Vec<&ManifestEntry> = planned.iter().map(|shader| shader.entry).collect();
        let sources = locator.locate_stage(stage, &entries)?;
        let mut shaders = Vec::with_capacity(planned.len());

        for (shader, source) in planned.iter().zip(&sources) {
            let bytes = compiler.compile(source)?;
            let words = words_from_bytes(&bytes);

            if words.is_empty() {
                return Err(GeneratorError::ShaderCompilationFailed {
                    filename: shader.entry.filename.clone(),
                    diagnostic: format!(
                        "the compiler produced no bytecode ({} byte(s) of output)",
                        bytes.len()
                    ),
                });
            }

            if bytes.len() % 4 != 0 {
                warn!(
                    "the bytecode of `{}` is not a multiple of 4 bytes; the last {} byte(s) are dropped.",
                    shader.entry.filename,
                    bytes.len() % 4
                );
            }

            shaders.push(ShaderBlock {
                filename: shader.entry.filename.clone(),
                bytecode: BytecodeDecl {
                    name: shader.tag.bytecode_name(),
                    words,
                },
                arrays: shader.layout.declarations(&shader.tag, &types),
            });
        }

        sections.push(StageSection { stage, shaders });
    }

    let document = HeaderDocument {
        includes: options.includes.clone(),
        name_enum: table.to_enum_decl(&options.prefix, &types),
        table: table.to_array_decl(&options.prefix, &types),
        types,
        sections,
    };

    Ok(GeneratedHeader {
        contents: document.render()?,
        shader_count: table.len(),
    })
}
