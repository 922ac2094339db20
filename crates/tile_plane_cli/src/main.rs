#![forbid(unsafe_code)]

use std::process::ExitCode;

fn main() -> ExitCode {
    match tile_plane_cli::run_from_env() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
