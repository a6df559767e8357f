use crate::{
    bytecode::ExternalCompiler,
    document::{header_path, write_header},
    error::GeneratorError,
    generator::{generate_header, GeneratorOptions},
    source_locator::SourceLocator,
};
use anyhow::{anyhow, bail, Context, Error as AnyError};
use clap::ArgMatches;
use log::{info, warn};
use shc_manifest::Manifest;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateArgs {
    pub manifest: PathBuf,
    pub shaders: Option<PathBuf>,
    pub compiler: PathBuf,
    pub output_dir: PathBuf,
    pub output_name: String,
    pub options: GeneratorOptions,
    pub check: bool,
}

impl GenerateArgs {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, AnyError> {
        let compiler_dir = required::<PathBuf>(matches, "compiler-dir")?;
        let compiler_name = required::<String>(matches, "compiler-name")?;
        let includes = matches
            .get_many::<String>("include")
            .map(|includes| includes.cloned().collect())
            .unwrap_or_default();

        Ok(Self {
            manifest: required(matches, "manifest")?,
            shaders: matches.get_one::<PathBuf>("shaders").cloned(),
            compiler: compiler_dir.join(compiler_name),
            output_dir: required(matches, "output-dir")?,
            output_name: required(matches, "output-name")?,
            options: GeneratorOptions {
                prefix: required(matches, "prefix")?,
                includes,
                vector_name_type: required(matches, "vector-name-type")?,
                image_name_type: required(matches, "image-name-type")?,
            },
            check: matches.get_flag("check"),
        })
    }
}

fn required<T>(matches: &ArgMatches, id: &str) -> Result<T, AnyError>
where
    T: Clone + Send + Sync + 'static,
{
    matches
        .get_one::<T>(id)
        .cloned()
        .ok_or_else(|| anyhow!("the argument `--{}` is required", id))
}

pub fn generate(args: &GenerateArgs) -> Result<(), AnyError> {
    info!("generating the shader header.");

    if !is_identifier(&args.options.prefix) {
        bail!(
            "the prefix `{}` is not a valid identifier",
            args.options.prefix
        );
    }

    if !args.manifest.is_file() {
        return Err(GeneratorError::ManifestNotFound(args.manifest.clone()).into());
    }

    if !args.compiler.is_file() {
        return Err(GeneratorError::CompilerBinaryNotFound(args.compiler.clone()).into());
    }

    let manifest = Manifest::load(&args.manifest)
        .map_err(GeneratorError::from)
        .with_context(|| {
            format!(
                "failed to load the manifest `{}`",
                args.manifest.display()
            )
        })?;

    info!(
        "loaded {} shader(s) from `{}`.",
        manifest.len(),
        args.manifest.display()
    );

    let shaders_root = match &args.shaders {
        Some(shaders) => shaders.clone(),
        None => match args.manifest.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_owned(),
            _ => std::env::current_dir()?,
        },
    };

    if !shaders_root.is_dir() {
        bail!(
            "the shader root `{}` must be a directory",
            shaders_root.display()
        );
    }

    let locator = SourceLocator::scan(&shaders_root).with_context(|| {
        format!(
            "failed to scan the shader root `{}`",
            shaders_root.display()
        )
    })?;
    let compiler = ExternalCompiler::new(&args.compiler);

    info!(
        "compiling sources under `{}` with `{}`.",
        locator.root().display(),
        compiler.program().display()
    );

    let header = generate_header(&manifest, &locator, &compiler, &args.options)?;
    let output = header_path(&args.output_dir, &args.output_name);

    if args.check {
        let existing = match std::fs::read_to_string(&output) {
            Ok(existing) => existing,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                bail!("the header `{}` does not exist", output.display());
            }
            Err(err) => {
                return Err(anyhow!(err)).with_context(|| {
                    format!("failed to read the header `{}`", output.display())
                });
            }
        };

        if existing != header.contents {
            bail!(
                "the header `{}` is out of date; run without `--check` to regenerate it",
                output.display()
            );
        }

        info!("the header `{}` is up to date.", output.display());
        return Ok(());
    }

    if output.exists() {
        warn!(
            "the output path `{}` already exists, it will be overwritten.",
            output.display()
        );
    }

    let output = write_header(&args.output_dir, &args.output_name, &header.contents)
        .with_context(|| format!("failed to write the header to `{}`", output.display()))?;

    info!(
        "generated {} shader(s) into `{}`.",
        header.shader_count,
        output.display()
    );

    Ok(())
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();

    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
