//! Parsing of one input line into a typed command.

use tile_plane::{Coord, Direction};

use crate::error::CommandError;

/// One interpreter command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `C x y color i`
    Color { pos: Coord, color: String, intensity: i32 },
    /// `S x y`
    Off { pos: Coord },
    /// `r beta k1 c1 k2 c2 ...`
    AddRule { text: String },
    /// `? x y`
    State { pos: Coord },
    /// `s`
    PrintRules,
    /// `b x y`
    Block { pos: Coord },
    /// `B x y`
    HomogeneousBlock { pos: Coord },
    /// `p x y`
    Propagate { pos: Coord },
    /// `P x y`
    PropagateBlock { pos: Coord },
    /// `o`
    Reorder,
    /// `t x y d1,d2,...`
    Track { start: Coord, directions: Vec<Direction> },
    /// `L x1 y1 x2 y2`
    Length { from: Coord, to: Coord },
    /// `q`
    Quit,
}

impl Command {
    /// Parse one line.
    ///
    /// Tokens are separated by whitespace. Numeric arguments that do not
    /// parse are rejected rather than read as zero.
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&verb, args)) = tokens.split_first() else {
            return Err(CommandError::Empty);
        };

        let command = match verb {
            "C" => {
                expect_args(verb, args, 4)?;
                Command::Color {
                    pos: coord(args[0], args[1])?,
                    color: args[2].to_string(),
                    intensity: number(args[3])?,
                }
            }
            "S" => Command::Off {
                pos: coord_args(verb, args)?,
            },
            "r" => Command::AddRule {
                text: args.join(" "),
            },
            "?" => Command::State {
                pos: coord_args(verb, args)?,
            },
            "s" => {
                expect_args(verb, args, 0)?;
                Command::PrintRules
            }
            "b" => Command::Block {
                pos: coord_args(verb, args)?,
            },
            "B" => Command::HomogeneousBlock {
                pos: coord_args(verb, args)?,
            },
            "p" => Command::Propagate {
                pos: coord_args(verb, args)?,
            },
            "P" => Command::PropagateBlock {
                pos: coord_args(verb, args)?,
            },
            "o" => {
                expect_args(verb, args, 0)?;
                Command::Reorder
            }
            "t" => {
                expect_args(verb, args, 3)?;
                let directions = args[2]
                    .split(',')
                    .map(str::parse::<Direction>)
                    .collect::<Result<Vec<_>, _>>()?;
                Command::Track {
                    start: coord(args[0], args[1])?,
                    directions,
                }
            }
            "L" => {
                expect_args(verb, args, 4)?;
                Command::Length {
                    from: coord(args[0], args[1])?,
                    to: coord(args[2], args[3])?,
                }
            }
            "q" => {
                expect_args(verb, args, 0)?;
                Command::Quit
            }
            _ => {
                return Err(CommandError::UnknownOperation {
                    verb: verb.to_string(),
                })
            }
        };
        Ok(command)
    }
}

fn expect_args(verb: &str, args: &[&str], expected: usize) -> Result<(), CommandError> {
    if args.len() != expected {
        return Err(CommandError::arity(verb, expected, args.len()));
    }
    Ok(())
}

fn coord_args(verb: &str, args: &[&str]) -> Result<Coord, CommandError> {
    expect_args(verb, args, 2)?;
    coord(args[0], args[1])
}

fn coord(x: &str, y: &str) -> Result<Coord, CommandError> {
    Ok(Coord::new(number(x)?, number(y)?))
}

fn number(token: &str) -> Result<i32, CommandError> {
    token.parse().map_err(|_| CommandError::InvalidNumber {
        token: token.to_string(),
    })
}
