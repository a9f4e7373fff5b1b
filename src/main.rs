use clap::{value_parser, Arg, Command};
use exprcheck::config::{Config, InputSource, DEFAULT_INPUT, DEFAULT_MAX_LINE_BYTES};
use exprcheck::{repl, runner};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let matches = Command::new("exprcheck")
        .about("Checks one arithmetic expression or assignment per line and explains rejections")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("file")
                .help("Input file, one expression per line ('-' reads stdin)")
                .value_name("FILE")
                .default_value(DEFAULT_INPUT)
                .index(1),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start in interactive mode")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("diagnostics")
                .short('d')
                .long("diagnostics")
                .help("Print a detailed report for every invalid line on stderr")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("max-line-bytes")
                .long("max-line-bytes")
                .help(format!(
                    "Truncate longer lines with a warning [default: {}]",
                    DEFAULT_MAX_LINE_BYTES
                ))
                .value_name("N")
                .value_parser(value_parser!(usize)),
        )
        .get_matches();

    if matches.get_flag("interactive") {
        return match repl::start() {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => {
                eprintln!("Error: {}", error);
                ExitCode::FAILURE
            }
        };
    }

    let mut config = Config::default().with_diagnostics(matches.get_flag("diagnostics"));
    if let Some(file) = matches.get_one::<String>("file") {
        config = config.with_input(InputSource::from_arg(file));
    }
    if let Some(max) = matches.get_one::<usize>("max-line-bytes") {
        config = config.with_max_line_bytes(*max);
    }

    match runner::run_file(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{}", error);
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}
