//! Command execution against a plane and the line loop around it.

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use tile_plane::{PathStep, Plane, PlaneConfig};
use tracing::{debug, warn};

use crate::command::Command;
use crate::error::CommandError;

/// Typed result of one command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Command ran; nothing to print.
    Done,
    /// Color and intensity of a tile, `None` if dark.
    Tile(Option<(String, i32)>),
    /// Rule listing lines in priority order.
    Rules(Vec<String>),
    /// Block intensity sum.
    Sum(i64),
    /// Traced path, `None` if it ran into a dark cell.
    Path(Option<Vec<PathStep>>),
    /// Shortest path length in tiles, `None` if there is no path.
    Length(Option<usize>),
    /// Stop reading input.
    Quit,
}

impl Reply {
    /// Text printed for this reply, without the final newline.
    ///
    /// `None` means the command prints nothing at all.
    pub fn render(&self) -> Option<String> {
        match self {
            Reply::Done | Reply::Quit | Reply::Tile(None) | Reply::Path(None) => None,
            Reply::Tile(Some((color, intensity))) => Some(format!("{color} {intensity}")),
            Reply::Rules(lines) => {
                let mut text = String::from("(");
                for line in lines {
                    text.push('\n');
                    text.push_str(line);
                }
                text.push_str("\n)");
                Some(text)
            }
            Reply::Sum(sum) => Some(sum.to_string()),
            Reply::Path(Some(steps)) => {
                let mut text = String::from("[");
                for step in steps {
                    let _ = write!(
                        text,
                        "\n{} {} {} {}",
                        step.position.x, step.position.y, step.color, step.intensity
                    );
                }
                text.push_str("\n]");
                Some(text)
            }
            Reply::Length(Some(len)) => Some(len.to_string()),
            Reply::Length(None) => Some("-1".to_string()),
        }
    }
}

/// Options for [`run`].
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Echo each input line before its output.
    pub echo: bool,
}

/// Statistics from one [`run`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Non-blank lines read.
    pub commands: usize,
    /// Lines rejected with an error.
    pub errors: usize,
    /// Whether the session ended with `q` rather than end of input.
    pub quit: bool,
}

/// Owns one plane and executes commands against it.
#[derive(Debug, Default)]
pub struct Interpreter {
    plane: Plane,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_config(PlaneConfig::default())
    }

    pub fn with_config(config: PlaneConfig) -> Self {
        Self {
            plane: Plane::with_config(config),
        }
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Parse and execute one line.
    pub fn execute_line(&mut self, line: &str) -> Result<Reply, CommandError> {
        let command = Command::parse(line)?;
        self.execute(command)
    }

    /// Execute one command.
    pub fn execute(&mut self, command: Command) -> Result<Reply, CommandError> {
        let plane = &mut self.plane;
        let reply = match command {
            Command::Color {
                pos,
                color,
                intensity,
            } => {
                plane.set_tile(pos, color, intensity);
                Reply::Done
            }
            Command::Off { pos } => {
                plane.remove_tile(pos);
                Reply::Done
            }
            Command::AddRule { text } => {
                plane.add_rule(&text)?;
                Reply::Done
            }
            Command::State { pos } => Reply::Tile(
                plane
                    .get_tile(pos)
                    .map(|tile| (tile.color.clone(), tile.intensity)),
            ),
            Command::PrintRules => {
                Reply::Rules(plane.rules().iter().map(ToString::to_string).collect())
            }
            Command::Block { pos } => Reply::Sum(plane.sum_intensity(pos, false)),
            Command::HomogeneousBlock { pos } => Reply::Sum(plane.sum_intensity(pos, true)),
            Command::Propagate { pos } => {
                plane.apply_at(pos);
                Reply::Done
            }
            Command::PropagateBlock { pos } => {
                plane.apply_to_block(pos);
                Reply::Done
            }
            Command::Reorder => {
                plane.reorder_rules();
                Reply::Done
            }
            Command::Track { start, directions } => {
                Reply::Path(plane.follow_path(start, &directions))
            }
            Command::Length { from, to } => Reply::Length(plane.shortest_distance(from, to)),
            Command::Quit => Reply::Quit,
        };
        Ok(reply)
    }
}

/// Read commands line by line until `q` or end of input.
///
/// Replies and error messages are written to `output`; a bad line never
/// stops the loop. Blank lines are skipped.
pub fn run<R: BufRead, W: Write>(
    interpreter: &mut Interpreter,
    input: R,
    output: &mut W,
    options: &RunOptions,
) -> io::Result<SessionStats> {
    let mut stats = SessionStats::default();

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        stats.commands += 1;
        if options.echo {
            writeln!(output, "> {line}")?;
        }

        match interpreter.execute_line(&line) {
            Ok(Reply::Quit) => {
                stats.quit = true;
                break;
            }
            Ok(reply) => {
                if let Some(text) = reply.render() {
                    writeln!(output, "{text}")?;
                }
            }
            Err(err) => {
                stats.errors += 1;
                warn!(line = %line, error = %err, "command rejected");
                writeln!(output, "{err}")?;
            }
        }
    }

    output.flush()?;
    debug!(
        commands = stats.commands,
        errors = stats.errors,
        tiles = interpreter.plane().tile_count(),
        "session finished"
    );
    Ok(stats)
}
