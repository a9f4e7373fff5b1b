use crate::lexer::is_line_space;
use crate::validator::validate;
use std::io::{self, Write};

/// Interactive mode: one verdict per entered line, with a report for rejected ones.
/// Nothing is remembered between lines.

pub fn start() -> io::Result<()> {
    println!("exprcheck v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'exit' or press Ctrl+D to quit");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        match stdin.read_line(&mut line) {
            Ok(0) => {
                // EOF reached (Ctrl+D or piped input ended)
                println!();
                break;
            }
            Ok(_) => {
                let line = line.trim_end_matches(is_line_space);
                if line.chars().all(is_line_space) {
                    continue;
                }
                if line.trim() == "exit" || line.trim() == "quit" {
                    println!("Goodbye!");
                    break;
                }

                check_line(line)?;
            }
            Err(error) => {
                log::error!("failed to read input: {}", error);
                eprintln!("Error reading input: {}", error);
                break;
            }
        }
    }

    Ok(())
}

fn check_line(line: &str) -> io::Result<()> {
    let result = validate(line);
    result.report(line, None)?;
    println!("{}", result.render(line));
    Ok(())
}
