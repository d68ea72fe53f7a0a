use rand::Rng;
use tracing::trace;

use crate::core::{GameState, PlacementOutcome};
use crate::types::GameError;

/// Place tray piece `index` at (row, col) and return the resulting state.
///
/// The input state is left as it was. The returned outcome carries a refill
/// ticket when the tray ran dry; redeem it with
/// [`GameState::complete_refill`] after the caller's pause.
pub fn apply_place<R: Rng + Clone>(
    state: &GameState<R>,
    index: usize,
    row: i32,
    col: i32,
) -> Result<(GameState<R>, PlacementOutcome), GameError> {
    let mut next = state.clone();
    let outcome = next.place_piece(index, row, col).map_err(|err| {
        trace!(index, row, col, code = err.code(), "placement rejected");
        err
    })?;
    Ok((next, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_leaves_previous_state_intact() {
        let gs = GameState::new(1);
        let before = gs.snapshot();

        let (next, outcome) = apply_place(&gs, 0, 0, 0).unwrap();
        assert_eq!(gs.snapshot(), before);
        assert_eq!(next.tray().len(), 2);
        assert_eq!(next.score(), outcome.score);
        assert!(!next.board().is_empty());
    }

    #[test]
    fn place_rejected_when_out_of_bounds() {
        let gs = GameState::new(1);
        let err = apply_place(&gs, 0, -50, 0).unwrap_err();
        assert!(matches!(err, GameError::InvalidPlacement { .. }));

        let err = apply_place(&gs, 0, 0, 10).unwrap_err();
        assert!(matches!(err, GameError::InvalidPlacement { .. }));
    }

    #[test]
    fn place_rejected_when_index_out_of_range() {
        let gs = GameState::new(1);
        let err = apply_place(&gs, 3, 0, 0).unwrap_err();
        assert_eq!(err, GameError::OutOfRange { index: 3, len: 3 });
        assert_eq!(err.code(), "out_of_range");
    }

    #[test]
    fn place_rejected_when_blocked_by_collision() {
        let gs = GameState::new(1);
        let first = gs.tray().pieces()[0];
        let second = gs.tray().pieces()[1];

        let (gs, _) = apply_place(&gs, 0, 4, 4).unwrap();

        // Line up the first filled cell of the second piece with the first
        // filled cell of the piece already on the board.
        let (ar, ac) = first.shape.filled_cells().next().unwrap();
        let (br, bc) = second.shape.filled_cells().next().unwrap();
        let row = 4 + ar as i32 - br as i32;
        let col = 4 + ac as i32 - bc as i32;

        // Tray shifted left, so the second piece is now at index 0.
        let err = apply_place(&gs, 0, row, col).unwrap_err();
        assert_eq!(err, GameError::InvalidPlacement { row, col });
    }
}
