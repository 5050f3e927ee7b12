use std::io;
use std::process::ExitCode;

use clap::Parser;

use tariff_lookup::cli::{self, Cli, Outcome};

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli::init_logging(cli.verbose);

    let mut stdout = io::stdout().lock();
    match cli::run(&cli, &mut stdout) {
        Ok(Outcome::Found(_)) => ExitCode::SUCCESS,
        Ok(Outcome::Rejected(e)) => {
            eprintln!("{e}");
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}
