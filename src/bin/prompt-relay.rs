use std::{
    error::Error,
    io::{self, Write},
    process::ExitCode,
};

use clap::{CommandFactory, Parser, error::ErrorKind};
use prompt_relay::{Client, RelayError, cli::Cli, relay};

fn report(error: &dyn Error) {
    eprintln!("Error: {error}");
    let mut source = error.source();
    while let Some(cause) = source {
        eprintln!("Caused by: {cause}");
        source = cause.source();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if let Err(error) = prompt_relay::logging::init() {
        eprintln!("Warning: logging disabled: {error}");
    }

    let (request, config) = match Cli::parse().into_relay_request() {
        Ok(parts) => parts,
        Err(error @ RelayError::MissingArgument(_)) => Cli::command()
            .error(ErrorKind::MissingRequiredArgument, error)
            .exit(),
        Err(error) => {
            report(&error);
            return ExitCode::FAILURE;
        }
    };

    let reply = match Client::new(config) {
        Ok(client) => relay(&client, &request).await,
        Err(error) => Err(error.into()),
    };

    match reply {
        Ok(reply) => match writeln!(io::stdout().lock(), "{reply}") {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => {
                report(&error);
                ExitCode::FAILURE
            }
        },
        Err(error) => {
            report(&error);
            ExitCode::FAILURE
        }
    }
}
