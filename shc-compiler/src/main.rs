mod bytecode;
mod cli;
mod document;
mod error;
mod generator;
mod shader_table;
mod source_locator;
mod uniform_layout;

use cli::{cli, generate, GenerateArgs};
use log::{error, LevelFilter};

fn main() {
    env_logger::Builder::from_env("LOG")
        .filter_level(LevelFilter::Info)
        .format_module_path(false)
        .format_target(false)
        .init();

    let matches = cli().get_matches();
    let result = GenerateArgs::from_matches(&matches).and_then(|args| generate(&args));

    if let Err(err) = result {
        let mut errors = Vec::new();

        for cause in err.chain() {
            errors.push(format!("- {}", cause));
        }

        error!("failed to generate the shader header. error:\n{}", errors.join("\n"));
        std::process::exit(1);
    }
}
