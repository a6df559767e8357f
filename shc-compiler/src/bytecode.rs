use crate::error::GeneratorError;
use log::debug;
use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

/// Lines of a formatted word array are broken at the first element boundary past this width.
pub const MAX_LINE_LENGTH: usize = 170;

pub trait BytecodeCompiler {
    /// Compiles the source file, returning the compiler's raw binary output.
    fn compile(&self, source: &Path) -> Result<Vec<u8>, GeneratorError>;
}

/// Runs an external compiler as `<program> <source> -o -`.
#[derive(Debug, Clone)]
pub struct ExternalCompiler {
    program: PathBuf,
}

impl ExternalCompiler {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl BytecodeCompiler for ExternalCompiler {
    fn compile(&self, source: &Path) -> Result<Vec<u8>, GeneratorError> {
        debug!(
            "compiling `{}` with `{}`.",
            source.display(),
            self.program.display()
        );

        let output = Command::new(&self.program)
            .arg(source)
            .arg("-o")
            .arg("-")
            .stdin(Stdio::null())
            .output()
            .map_err(|err| GeneratorError::CompilerLaunch {
                program: self.program.clone(),
                source: err,
            })?;

        if !output.status.success() {
            let diagnostic = if output.stderr.is_empty() {
                String::from_utf8_lossy(&output.stdout).to_string()
            } else {
                String::from_utf8_lossy(&output.stderr).to_string()
            };

            return Err(GeneratorError::ShaderCompilationFailed {
                filename: source.display().to_string(),
                diagnostic,
            });
        }

        debug!(
            "compiled `{}` into {} byte(s).",
            source.display(),
            output.stdout.len()
        );

        Ok(output.stdout)
    }
}

/// Packs little-endian bytes into words. Trailing bytes that do not fill a word are dropped.
pub fn words_from_bytes(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

pub fn format_word_array(words: &[u32]) -> String {
    let mut formatted = String::with_capacity(words.len() * 12);
    let mut line_length = 0;

    for (index, word) in words.iter().enumerate() {
        if index != 0 {
            formatted.push(',');
            line_length += 1;

            if MAX_LINE_LENGTH < line_length {
                formatted.push_str("\n\t");
                line_length = 0;
            } else {
                formatted.push(' ');
                line_length += 1;
            }
        }

        let word = format!("0x{:08x}", word);
        line_length += word.len();
        formatted.push_str(&word);
    }

    formatted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_from_bytes_little_endian() {
        let bytes = [0x03, 0x02, 0x23, 0x07, 0x00, 0x00, 0x01, 0x00];
        assert_eq!(words_from_bytes(&bytes), vec![0x07230203, 0x00010000]);
    }

    #[test]
    fn test_words_from_bytes_drops_partial_word() {
        assert_eq!(words_from_bytes(&[1, 0, 0, 0, 9, 9, 9]), vec![1]);
        assert_eq!(words_from_bytes(&[9, 9]), Vec::<u32>::new());
    }

    #[test]
    fn test_format_word_array_short() {
        assert_eq!(
            format_word_array(&[0x07230203, 0x10]),
            "0x07230203, 0x00000010"
        );
        assert_eq!(format_word_array(&[]), "");
    }

    #[test]
    fn test_format_word_array_wraps_at_element_boundary() {
        let words: Vec<u32> = (0..40).collect();
        let formatted = format_word_array(&words);
        let lines: Vec<&str> = formatted.split('\n').collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].split(", ").count(), 15);
        assert!(lines[0].ends_with(','));
        assert!(lines[1].starts_with("\t0x0000000f"));

        let rejoined: Vec<u32> = formatted
            .split(',')
            .map(|word| u32::from_str_radix(word.trim().trim_start_matches("0x"), 16).unwrap())
            .collect();
        assert_eq!(rejoined, words);
    }

    #[cfg(unix)]
    #[test]
    fn test_external_compiler_captures_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("emit.sh");
        std::fs::write(&script, "printf 'ABCDEF'\n").unwrap();

        let compiler = ExternalCompiler::new("sh");
        let output = compiler.compile(&script).unwrap();
        assert_eq!(output, b"ABCDEF");
        assert_eq!(words_from_bytes(&output), vec![0x44434241]);
    }

    #[cfg(unix)]
    #[test]
    fn test_external_compiler_reports_diagnostic() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("broken.sh");
        std::fs::write(&script, "echo 'broken.frag:3: error: syntax' >&2\nexit 2\n").unwrap();

        let compiler = ExternalCompiler::new("sh");
        match compiler.compile(&script) {
            Err(GeneratorError::ShaderCompilationFailed {
                filename,
                diagnostic,
            }) => {
                assert_eq!(filename, script.display().to_string());
                assert_eq!(diagnostic, "broken.frag:3: error: syntax\n");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_external_compiler_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let compiler = ExternalCompiler::new(dir.path().join("no-such-compiler"));

        assert!(matches!(
            compiler.compile(&dir.path().join("basic.vert")),
            Err(GeneratorError::CompilerLaunch { .. })
        ));
    }
}
