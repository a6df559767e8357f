mod generate;

pub use generate::*;

use crate::generator::{
    DEFAULT_IMAGE_NAME_TYPE, DEFAULT_INCLUDES, DEFAULT_PREFIX, DEFAULT_VECTOR_NAME_TYPE,
};
use clap::{builder::ValueParser, Arg, ArgAction, Command};

#[cfg(windows)]
pub const DEFAULT_COMPILER_NAME: &str = "glslc.exe";
#[cfg(not(windows))]
pub const DEFAULT_COMPILER_NAME: &str = "glslc";

pub fn cli() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(true)
        .arg(
            Arg::new("manifest")
                .long("manifest")
                .short('m')
                .value_parser(ValueParser::path_buf())
                .required(true)
                .help("JSON manifest listing the shaders to compile"),
        )
        .arg(
            Arg::new("shaders")
                .long("shaders")
                .short('s')
                .value_parser(ValueParser::path_buf())
                .help("Root directory searched for shader sources [default: the manifest's directory]"),
        )
        .arg(
            Arg::new("compiler-dir")
                .long("compiler-dir")
                .short('c')
                .value_parser(ValueParser::path_buf())
                .required(true)
                .help("Directory containing the shader compiler"),
        )
        .arg(
            Arg::new("compiler-name")
                .long("compiler-name")
                .default_value(DEFAULT_COMPILER_NAME)
                .help("File name of the shader compiler"),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .short('o')
                .value_parser(ValueParser::path_buf())
                .required(true)
                .help("Directory receiving the generated header; created when missing"),
        )
        .arg(
            Arg::new("output-name")
                .long("output-name")
                .short('n')
                .required(true)
                .help("Name of the generated header, without the `.hpp` extension"),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .short('p')
                .default_value(DEFAULT_PREFIX)
                .help("Prefix of every generated identifier"),
        )
        .arg(
            Arg::new("include")
                .long("include")
                .short('i')
                .action(ArgAction::Append)
                .default_values(DEFAULT_INCLUDES)
                .help("Header to `#include` from the generated file; may be repeated"),
        )
        .arg(
            Arg::new("vector-name-type")
                .long("vector-name-type")
                .default_value(DEFAULT_VECTOR_NAME_TYPE)
                .help("Type of the vector parameter names listed in the manifest"),
        )
        .arg(
            Arg::new("image-name-type")
                .long("image-name-type")
                .default_value(DEFAULT_IMAGE_NAME_TYPE)
                .help("Type of the image names listed in the manifest"),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .action(ArgAction::SetTrue)
                .help("Fail if the existing header differs from the generated one instead of writing it"),
        )
}
