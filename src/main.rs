use clap::Parser;
use env_logger::Env;
use f5clean::config::load_config;
use f5clean::usage::write_usage;
use f5clean::{CleanArgs, CleanError, CleanOptions, CleanReport, clean};
use log::error;
use std::process::ExitCode;

/// Exit status used for both usage and runtime failures.
const EXIT_ERROR: u8 = 1;

fn run(cli: CleanArgs) -> Result<CleanReport, CleanError> {
    let args = load_config(&cli)?;
    let options = CleanOptions::resolve(args)?;
    clean(&options)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = CleanArgs::parse();
    if cli.single_file().is_none() {
        if let Err(e) = write_usage(std::io::stdout().lock()) {
            error!("error printing usage: {e}");
        }
        return ExitCode::from(EXIT_ERROR);
    }

    match run(cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
