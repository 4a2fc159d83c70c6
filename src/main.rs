use anyhow::Result;

use courtside::cli::Command;
use courtside::{handle_ingest, handle_process, handle_serve, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(command)
}

fn execute_command(command: Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(port),
        Command::Ingest { date } => handle_ingest(date),
        Command::Process { date } => {
            let report = handle_process(date)?;
            // Exit code 2 lets schedulers distinguish data gaps from crashes.
            if !report.is_complete() {
                std::process::exit(2);
            }
            Ok(())
        }
    }
}
