//! Headless play: run a list of move tokens and report each snapshot.
//!
//! Tokens use one-based box numbers: `c5` measures box 5, `q1:5` entangles
//! box 5 with control box 1.

use quantum_tictactoe::{Bit, CollapseSource, MoveRejection, QuantumGame, Snapshot};
use serde::Serialize;
use std::str::FromStr;
use tracing::{debug, info, instrument};

/// Error parsing a script.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ScriptError {
    /// The token is not `c<N>` or `q<C>:<T>`.
    #[display("Unrecognized move '{}' (expected c<N> or q<C>:<T>)", _0)]
    BadMove(String),

    /// A box number was zero or not a number.
    #[display("Invalid box number '{}' in move '{}'", _0, _1)]
    BadBox(String, String),

    /// A bit string held something other than 0 or 1.
    #[display("Invalid collapse bit '{}' (expected 0 or 1)", _0)]
    BadBit(char),
}

impl std::error::Error for ScriptError {}

/// One parsed move, with zero-based indices as the engine expects.
///
/// Indices past the board are kept so the engine can reject them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptMove {
    /// Classical move on a box.
    Classical(usize),
    /// Quantum move from control to target.
    Quantum {
        /// Control box index.
        control: usize,
        /// Target box index.
        target: usize,
    },
}

fn parse_box(number: &str, token: &str) -> Result<usize, ScriptError> {
    match number.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(ScriptError::BadBox(number.to_string(), token.to_string())),
    }
}

impl FromStr for ScriptMove {
    type Err = ScriptError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        let lower = token.to_ascii_lowercase();
        if let Some(rest) = lower.strip_prefix('c') {
            return Ok(ScriptMove::Classical(parse_box(rest, token)?));
        }
        if let Some(rest) = lower.strip_prefix('q')
            && let Some((control, target)) = rest.split_once(':')
        {
            return Ok(ScriptMove::Quantum {
                control: parse_box(control, token)?,
                target: parse_box(target, token)?,
            });
        }
        Err(ScriptError::BadMove(token.to_string()))
    }
}

impl std::fmt::Display for ScriptMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptMove::Classical(index) => write!(f, "c{}", index + 1),
            ScriptMove::Quantum { control, target } => write!(f, "q{}:{}", control + 1, target + 1),
        }
    }
}

/// Parses a string of `0`/`1` characters into collapse bits.
#[instrument]
pub fn parse_bits(bits: &str) -> Result<Vec<Bit>, ScriptError> {
    bits.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| Bit::from_char(c).ok_or(ScriptError::BadBit(c)))
        .collect()
}

/// Result of one scripted move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptRecord {
    /// The move as written.
    #[serde(rename = "move")]
    pub mv: String,
    /// Whether the engine accepted it.
    pub accepted: bool,
    /// Rejection reason code, when rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Cells whose marks were reversed by this move.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reversed: Vec<usize>,
    /// Game state after the move.
    pub snapshot: Snapshot,
}

/// Applies each move in turn, recording the engine's answer.
///
/// Rejected moves are recorded and the script carries on.
#[instrument(skip(game, moves), fields(moves = moves.len()))]
pub fn run_script<C: CollapseSource>(game: &mut QuantumGame<C>, moves: &[ScriptMove]) -> Vec<ScriptRecord> {
    let records: Vec<ScriptRecord> = moves
        .iter()
        .map(|mv| {
            let result: Result<Vec<usize>, MoveRejection> = match *mv {
                ScriptMove::Classical(index) => game
                    .apply_classical_move(index)
                    .map(|outcome| outcome.reversed().map(|p| p.number()).collect()),
                ScriptMove::Quantum { control, target } => {
                    game.apply_quantum_move(control, target).map(|_| Vec::new())
                }
            };
            debug!(%mv, ok = result.is_ok(), "Scripted move");
            let (accepted, reason, reversed) = match result {
                Ok(reversed) => (true, None, reversed),
                Err(rejection) => (false, Some(rejection.reason().to_string()), Vec::new()),
            };
            ScriptRecord {
                mv: mv.to_string(),
                accepted,
                reason,
                reversed,
                snapshot: game.snapshot(),
            }
        })
        .collect();
    info!(
        accepted = records.iter().filter(|r| r.accepted).count(),
        "Script finished"
    );
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantum_tictactoe::ScriptedCollapse;

    #[test]
    fn test_parse_moves() {
        assert_eq!("c5".parse::<ScriptMove>(), Ok(ScriptMove::Classical(4)));
        assert_eq!(
            "Q1:9".parse::<ScriptMove>(),
            Ok(ScriptMove::Quantum {
                control: 0,
                target: 8
            })
        );
        assert_eq!("c12".parse::<ScriptMove>(), Ok(ScriptMove::Classical(11)));
        assert!(matches!("c0".parse::<ScriptMove>(), Err(ScriptError::BadBox(..))));
        assert!(matches!("x3".parse::<ScriptMove>(), Err(ScriptError::BadMove(_))));
        assert!(matches!("q13".parse::<ScriptMove>(), Err(ScriptError::BadMove(_))));
    }

    #[test]
    fn test_display_round_trips_token() {
        let mv = ScriptMove::Quantum {
            control: 2,
            target: 6,
        };
        assert_eq!(mv.to_string(), "q3:7");
    }

    #[test]
    fn test_parse_bits() {
        assert_eq!(parse_bits("10 1"), Ok(vec![Bit::One, Bit::Zero, Bit::One]));
        assert_eq!(parse_bits("12"), Err(ScriptError::BadBit('2')));
    }

    #[test]
    fn test_run_script_records_rejections_and_reversals() {
        let mut game = QuantumGame::new(ScriptedCollapse::new([Bit::Zero, Bit::One]));
        let moves: Vec<ScriptMove> = ["q1:2", "c2", "q1:2", "c1"]
            .iter()
            .map(|t| t.parse().unwrap())
            .collect();

        let records = run_script(&mut game, &moves);

        assert_eq!(records.len(), 4);
        assert!(!records[0].accepted);
        assert_eq!(records[0].reason.as_deref(), Some("target must be classical"));
        assert!(records[1].accepted && records[2].accepted && records[3].accepted);
        assert_eq!(records[3].reversed, vec![2]);
        let json = serde_json::to_value(&records[3]).unwrap();
        assert_eq!(json["move"], "c1");
        assert!(json.get("reason").is_none());
    }
}
