//! Randomized invariant checks over arbitrary move sequences.

use proptest::prelude::*;
use quantum_tictactoe::{
    Bit, Board, CellState, Player, Position, QuantumGame, ScriptedCollapse, rules,
};

#[derive(Debug, Clone, Copy)]
enum Step {
    Classical(usize),
    Quantum(usize, usize),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0usize..11).prop_map(Step::Classical),
        (0usize..11, 0usize..11).prop_map(|(c, t)| Step::Quantum(c, t)),
    ]
}

fn bits() -> impl Strategy<Value = Vec<Bit>> {
    prop::collection::vec(any::<bool>().prop_map(Bit::from), 0..12)
}

fn states(board: &Board) -> Vec<CellState> {
    board.cells().iter().map(|c| c.state()).collect()
}

proptest! {
    #[test]
    fn rejected_moves_change_nothing(steps in prop::collection::vec(step(), 0..30), coin in bits()) {
        let mut game = QuantumGame::new(ScriptedCollapse::new(coin));
        for step in steps {
            let before = game.snapshot();
            let accepted = match step {
                Step::Classical(i) => game.apply_classical_move(i).is_ok(),
                Step::Quantum(c, t) => game.apply_quantum_move(c, t).is_ok(),
            };
            if !accepted {
                prop_assert_eq!(game.snapshot(), before);
            }
        }
    }

    #[test]
    fn classical_move_collapses_exactly_one_cell(steps in prop::collection::vec(step(), 0..30), coin in bits()) {
        let mut game = QuantumGame::new(ScriptedCollapse::new(coin));
        for step in steps {
            let before = game.board().clone();
            match step {
                Step::Classical(i) => {
                    let Ok(outcome) = game.apply_classical_move(i) else { continue };
                    let after = game.board();
                    let changed: Vec<Position> = before
                        .iter()
                        .filter(|(pos, cell)| cell.state() != after.get(*pos).state())
                        .map(|(pos, _)| pos)
                        .collect();
                    prop_assert_eq!(changed, vec![outcome.position]);
                    prop_assert!(after.get(outcome.position).value().is_some());

                    // Only cells linked to the measured box may change value, and they lose the link.
                    let linked = before.entangled_targets(outcome.position);
                    for (pos, cell) in before.iter() {
                        if pos == outcome.position {
                            continue;
                        }
                        if linked.contains(&pos) {
                            prop_assert_eq!(after.get(pos).entangled_with(), None);
                        } else {
                            prop_assert_eq!(after.get(pos), cell);
                        }
                    }
                }
                Step::Quantum(c, t) => {
                    if game.apply_quantum_move(c, t).is_ok() {
                        // Links change, states and values never do.
                        prop_assert_eq!(states(game.board()), states(&before));
                        for (pos, cell) in before.iter() {
                            prop_assert_eq!(game.board().get(pos).value(), cell.value());
                        }
                        prop_assert_eq!(game.board().get(Position::from_index(t).unwrap()).entangled_with(), Position::from_index(c));
                    }
                }
            }
            prop_assert!(game.board().links_consistent());
        }
    }

    #[test]
    fn turn_passes_until_game_ends(steps in prop::collection::vec(step(), 0..30), coin in bits()) {
        let mut game = QuantumGame::new(ScriptedCollapse::new(coin));
        for step in steps {
            let mover = game.current_player();
            let accepted = match step {
                Step::Classical(i) => game.apply_classical_move(i).is_ok(),
                Step::Quantum(c, t) => game.apply_quantum_move(c, t).is_ok(),
            };
            if accepted && !game.is_over() {
                prop_assert_eq!(game.current_player(), mover.opponent());
            } else {
                prop_assert_eq!(game.current_player(), mover);
            }
            prop_assert_eq!(game.is_over(), rules::evaluate(game.board()).is_some());
        }
    }

    #[test]
    fn reset_always_restores_fresh_game(steps in prop::collection::vec(step(), 0..30), coin in bits()) {
        let mut game = QuantumGame::new(ScriptedCollapse::new(coin));
        for step in steps {
            let _ = match step {
                Step::Classical(i) => game.apply_classical_move(i).map(|_| ()),
                Step::Quantum(c, t) => game.apply_quantum_move(c, t).map(|_| ()),
            };
        }
        game.reset();
        prop_assert_eq!(game.board(), &Board::new());
        prop_assert_eq!(game.current_player(), Player::X);
        prop_assert!(!game.is_over());
    }
}
