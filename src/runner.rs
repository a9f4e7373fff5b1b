use crate::config::{Config, InputSource};
use crate::error::ExprCheckError;
use crate::lexer::is_line_space;
use crate::validator::validate;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

/// Counters for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lines_read: usize,
    pub valid: usize,
    pub invalid: usize,
    pub skipped: usize,
    pub truncated: usize,
}

/// Open the configured input and validate it line by line onto stdout.
pub fn run_file(config: &Config) -> Result<RunSummary, ExprCheckError> {
    log::info!("validating lines from {}", config.input);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &config.input {
        InputSource::File(path) => {
            let file = File::open(path).map_err(|source| ExprCheckError::Open {
                path: path.clone(),
                source,
            })?;
            run(BufReader::new(file), &mut out, config)
        }
        InputSource::Stdin => {
            let stdin = io::stdin();
            run(stdin.lock(), &mut out, config)
        }
    }
}

/// Validate every line of `reader`, writing one verdict per non-blank line.
pub fn run<R: BufRead, W: Write>(
    mut reader: R,
    writer: &mut W,
    config: &Config,
) -> Result<RunSummary, ExprCheckError> {
    let mut summary = RunSummary::default();
    let mut buffer = Vec::new();
    let source_name = config.input.name();

    loop {
        buffer.clear();
        let read = reader
            .read_until(b'\n', &mut buffer)
            .map_err(|source| ExprCheckError::Read { source })?;
        if read == 0 {
            break;
        }
        summary.lines_read += 1;

        let raw = String::from_utf8_lossy(&buffer);
        let raw = raw.trim_end_matches(&['\n', '\r'][..]);

        let line = truncate_to_boundary(raw, config.max_line_bytes);
        if line.len() < raw.len() {
            summary.truncated += 1;
            log::warn!(
                "line {} is {} bytes, truncated to {}",
                summary.lines_read,
                raw.len(),
                line.len()
            );
            eprintln!("Warning: Line {} exceeds buffer size", summary.lines_read);
        }

        let line = line.trim_end_matches(is_line_space);
        if line.chars().all(is_line_space) {
            summary.skipped += 1;
            continue;
        }

        let result = validate(line);
        if result.is_valid {
            summary.valid += 1;
        } else {
            summary.invalid += 1;
            if config.diagnostics {
                result
                    .report(line, Some(&source_name))
                    .map_err(|source| ExprCheckError::Write { source })?;
            }
        }

        writeln!(writer, "{}", result.render(line))
            .map_err(|source| ExprCheckError::Write { source })?;
    }

    writer
        .flush()
        .map_err(|source| ExprCheckError::Write { source })?;

    log::info!(
        "{} lines read: {} valid, {} invalid, {} skipped",
        summary.lines_read,
        summary.valid,
        summary.invalid,
        summary.skipped
    );
    Ok(summary)
}

fn truncate_to_boundary(line: &str, max_bytes: usize) -> &str {
    if line.len() <= max_bytes {
        return line;
    }
    let mut end = max_bytes;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    &line[..end]
}
