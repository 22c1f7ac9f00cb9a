use matrix_harness::{cli, commands::run, demo::fibonacci};
use std::process::ExitCode;

fn main() -> ExitCode {
    matrix_harness::init();

    // Parse command line arguments
    let config = match cli::parse_args() {
        Ok(config) => config,
        Err(e) => {
            if let Some(clap_error) = e.downcast_ref::<clap::Error>() {
                clap_error.exit();
            }
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = fibonacci::matrix()
        .and_then(|matrix| run::execute(config, &matrix, fibonacci::register));

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
