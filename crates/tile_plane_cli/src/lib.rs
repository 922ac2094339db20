//! Text interpreter for [`tile_plane`].
//!
//! Reads one command per line, executes it against a single plane and
//! prints replies. Malformed lines produce an error message and are
//! otherwise ignored.

#![forbid(unsafe_code)]

pub mod cli;
pub mod command;
pub mod error;
pub mod interpreter;

pub use cli::run_from_env;
pub use command::Command;
pub use error::{CliError, CommandError};
pub use interpreter::{run, Interpreter, Reply, RunOptions, SessionStats};
