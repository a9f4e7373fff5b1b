use std::fmt;
use std::path::PathBuf;

/// Input file used when none is given on the command line.
pub const DEFAULT_INPUT: &str = "scanme.txt";

/// Longest line accepted before truncation (a 1024-byte buffer with terminator).
pub const DEFAULT_MAX_LINE_BYTES: usize = 1023;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
}

impl InputSource {
    /// `-` selects stdin, anything else is a path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(PathBuf::from(arg))
        }
    }

    /// Name used in diagnostic reports.
    pub fn name(&self) -> String {
        match self {
            InputSource::File(path) => path.display().to_string(),
            InputSource::Stdin => "<stdin>".to_string(),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: InputSource,
    pub max_line_bytes: usize,
    pub diagnostics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: InputSource::File(PathBuf::from(DEFAULT_INPUT)),
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
            diagnostics: false,
        }
    }
}

impl Config {
    pub fn with_input(mut self, input: InputSource) -> Self {
        self.input = input;
        self
    }

    pub fn with_max_line_bytes(mut self, max_line_bytes: usize) -> Self {
        self.max_line_bytes = max_line_bytes;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: bool) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_cli_contract() {
        let config = Config::default();
        assert_eq!(config.input, InputSource::File(PathBuf::from("scanme.txt")));
        assert_eq!(config.max_line_bytes, 1023);
        assert!(!config.diagnostics);
    }

    #[test]
    fn dash_means_stdin() {
        assert_eq!(InputSource::from_arg("-"), InputSource::Stdin);
        assert_eq!(
            InputSource::from_arg("lines.txt"),
            InputSource::File(PathBuf::from("lines.txt"))
        );
        assert_eq!(InputSource::Stdin.to_string(), "<stdin>");
    }
}
