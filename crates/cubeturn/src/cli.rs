use std::path::PathBuf;

use cubeturn_core::{CubeState, Cubie};
use cubeturn_notation::MoveSequence;
use cubeturn_view::{InstantAnimator, Sequencer, Submission};
use eyre::{Context, Result, bail};
use serde::Serialize;

use crate::prefs::Preferences;
use crate::terminal::TerminalAnimator;

/// Cubeturn command-line interface
///
/// Moves are written as single characters from `FfBbRrLlUuDd`. Uppercase
/// turns the face clockwise and lowercase turns it counterclockwise.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// Skip turn animations.
    #[arg(long, global = true)]
    pub instant: bool,
    /// Additional preferences file to load.
    #[arg(long, global = true, value_name = "FILE")]
    pub prefs: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Play moves on a solved cube and print the result.
    Play {
        /// Moves to play. Unknown characters are skipped.
        moves: String,
    },
    /// Scramble a solved cube and print the result.
    Scramble {
        /// Number of moves.
        #[arg(short = 'n', long)]
        length: Option<usize>,
        /// Random seed, for a reproducible scramble.
        #[arg(long)]
        seed: Option<u64>,
        /// Solve the cube again after scrambling.
        #[arg(long)]
        solve: bool,
    },
    /// Print the moves that undo a sequence.
    Invert {
        /// Moves to invert. Unknown characters are skipped.
        moves: String,
    },
    /// Print the position and orientation of every cubie.
    Snapshot {
        /// Print JSON instead of a facelet net.
        #[arg(long)]
        json: bool,
        /// Moves to play on a solved cube first. Unknown characters are
        /// skipped.
        moves: Option<String>,
    },
}

pub(crate) fn exec(args: Args, prefs: &Preferences) -> Result<()> {
    match args.subcommand {
        Subcommand::Play { moves } => {
            let sequencer = new_sequencer(args.instant, prefs);
            if sequencer.play_str(&moves)? == Submission::Ignored {
                log::warn!("no moves to play");
            }
            sequencer.wait_idle()?;
            print_cube(&sequencer);
            Ok(())
        }

        Subcommand::Scramble {
            length,
            seed,
            solve,
        } => {
            let sequencer = new_sequencer(args.instant, prefs);
            let length = length.unwrap_or(prefs.scramble.length);
            let scramble = match seed {
                Some(seed) => sequencer.scramble_seeded(seed, length)?,
                None => sequencer.scramble(length)?,
            };
            let Some(scramble) = scramble else {
                bail!("sequencer is busy");
            };
            sequencer.wait_idle()?;
            println!("scramble: {scramble}");
            print_cube(&sequencer);

            if solve {
                sequencer.solve()?;
                sequencer.wait_idle()?;
                println!();
                print_cube(&sequencer);
            }
            Ok(())
        }

        Subcommand::Invert { moves } => {
            println!("{}", MoveSequence::parse_lenient(&moves).inverse());
            Ok(())
        }

        Subcommand::Snapshot { json, moves } => {
            let moves = MoveSequence::parse_lenient(moves.as_deref().unwrap_or_default());
            let mut state = CubeState::new_solved();
            moves.apply(&mut state)?;

            if json {
                let snapshot = state.snapshot();
                write_json_output(&SnapshotOutput {
                    moves: moves.to_string(),
                    solved: state.is_solved(),
                    cubies: &snapshot.cubies,
                })
            } else {
                print!("{}", state.facelets());
                Ok(())
            }
        }
    }
}

#[derive(Serialize)]
struct SnapshotOutput<'a> {
    moves: String,
    solved: bool,
    cubies: &'a [Cubie],
}

fn new_sequencer(instant: bool, prefs: &Preferences) -> Sequencer {
    if instant {
        Sequencer::new(InstantAnimator)
    } else {
        Sequencer::new(TerminalAnimator::new(prefs.animation.clone()))
    }
}

fn print_cube(sequencer: &Sequencer) {
    print!("{}", sequencer.facelets());
    println!("shuffle code: {}", sequencer.shuffle_code());
    println!("solved: {}", sequencer.is_solved());
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_parse_scramble_args() {
        let args =
            Args::try_parse_from(["cubeturn", "scramble", "-n", "20", "--seed", "5", "--instant"])
                .unwrap();
        assert!(args.instant);
        match args.subcommand {
            Subcommand::Scramble {
                length,
                seed,
                solve,
            } => {
                assert_eq!(length, Some(20));
                assert_eq!(seed, Some(5));
                assert!(!solve);
            }
            other => panic!("wrong subcommand {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_prefs() {
        let args = Args::try_parse_from(["cubeturn", "--prefs", "a.yaml", "invert", "RUf"]).unwrap();
        assert_eq!(args.prefs, Some(PathBuf::from("a.yaml")));
        assert!(matches!(args.subcommand, Subcommand::Invert { moves } if moves == "RUf"));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Args::try_parse_from(["cubeturn"]).is_err());
    }

    #[test]
    fn test_exec_instant_commands() {
        let prefs = Preferences::default();
        for argv in [
            vec!["cubeturn", "--instant", "play", "RUru"],
            vec!["cubeturn", "--instant", "scramble", "--seed", "1", "--solve"],
            vec!["cubeturn", "invert", "RUru"],
            vec!["cubeturn", "snapshot", "--json", "FfBb"],
        ] {
            exec(Args::try_parse_from(argv).unwrap(), &prefs).unwrap();
        }
    }

    #[test]
    fn test_exec_skips_unknown_moves() {
        let prefs = Preferences::default();
        for argv in [
            vec!["cubeturn", "--instant", "play", "R2 x"],
            vec!["cubeturn", "invert", "R2"],
            vec!["cubeturn", "snapshot", "R?u"],
            vec!["cubeturn", "snapshot", "--json", "xyz"],
        ] {
            exec(Args::try_parse_from(argv).unwrap(), &prefs).unwrap();
        }
    }
}
