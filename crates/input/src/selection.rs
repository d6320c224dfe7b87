//! Cursor and selection state.
//!
//! A click on a cell follows the classic rules: nothing happens while the
//! board is busy or the game is over; clicking the selected cell deselects
//! it; with nothing selected the cell becomes the selection; clicking a
//! neighbour of the selection asks for a swap; any other cell takes over the
//! selection.

use log::trace;

use crate::types::{BoardAction, CellIndex};

/// What a click or action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Nothing to do (e.g. cancel without a selection).
    Ignored,
    CursorMoved(CellIndex),
    /// The board is not taking input, or the cell is off the board.
    Rejected,
    Selected(CellIndex),
    Deselected,
    /// Hand this pair to the board. The selection has been cleared.
    SwapRequested { from: CellIndex, to: CellIndex },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionHandler {
    width: u8,
    height: u8,
    cursor: CellIndex,
    selected: Option<CellIndex>,
}

impl SelectionHandler {
    /// Cursor starts in the middle of a `width` x `height` board.
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cursor: CellIndex::new(width / 2, height / 2),
            selected: None,
        }
    }

    pub fn cursor(&self) -> CellIndex {
        self.cursor
    }

    pub fn selected(&self) -> Option<CellIndex> {
        self.selected
    }

    /// Back to the initial state (new session).
    pub fn reset(&mut self) {
        *self = Self::new(self.width, self.height);
    }

    pub fn apply(&mut self, action: BoardAction, accepting: bool) -> SelectionOutcome {
        if let Some(dir) = action.direction() {
            if let Some(next) = self.cursor.step(dir, self.width, self.height) {
                self.cursor = next;
                return SelectionOutcome::CursorMoved(next);
            }
            return SelectionOutcome::Ignored;
        }
        match action {
            BoardAction::Select => self.click(self.cursor, accepting),
            BoardAction::Cancel => self.cancel(),
            // Restart belongs to the session, not the selection.
            _ => SelectionOutcome::Ignored,
        }
    }

    pub fn cancel(&mut self) -> SelectionOutcome {
        match self.selected.take() {
            Some(_) => SelectionOutcome::Deselected,
            None => SelectionOutcome::Ignored,
        }
    }

    /// Click `cell`. `accepting` is false while the board animates or the
    /// game is over.
    pub fn click(&mut self, cell: CellIndex, accepting: bool) -> SelectionOutcome {
        if !accepting || cell.x >= self.width || cell.y >= self.height {
            return SelectionOutcome::Rejected;
        }

        let outcome = match self.selected {
            Some(sel) if sel == cell => {
                self.selected = None;
                SelectionOutcome::Deselected
            }
            Some(sel) if sel.is_adjacent(cell) => {
                self.selected = None;
                SelectionOutcome::SwapRequested { from: sel, to: cell }
            }
            _ => {
                self.selected = Some(cell);
                SelectionOutcome::Selected(cell)
            }
        };
        trace!("selection: click {:?} -> {:?}", cell, outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: u8, y: u8) -> CellIndex {
        CellIndex::new(x, y)
    }

    #[test]
    fn test_select_then_deselect() {
        let mut sel = SelectionHandler::new(6, 6);
        assert_eq!(sel.click(c(1, 1), true), SelectionOutcome::Selected(c(1, 1)));
        assert_eq!(sel.selected(), Some(c(1, 1)));
        assert_eq!(sel.click(c(1, 1), true), SelectionOutcome::Deselected);
        assert_eq!(sel.selected(), None);
    }

    #[test]
    fn test_adjacent_click_requests_swap() {
        let mut sel = SelectionHandler::new(6, 6);
        sel.click(c(2, 2), true);
        assert_eq!(
            sel.click(c(2, 3), true),
            SelectionOutcome::SwapRequested {
                from: c(2, 2),
                to: c(2, 3)
            }
        );
        assert_eq!(sel.selected(), None);
    }

    #[test]
    fn test_far_click_moves_selection() {
        let mut sel = SelectionHandler::new(6, 6);
        sel.click(c(0, 0), true);
        assert_eq!(sel.click(c(3, 3), true), SelectionOutcome::Selected(c(3, 3)));
        // diagonal is not adjacent
        assert_eq!(sel.click(c(4, 4), true), SelectionOutcome::Selected(c(4, 4)));
    }

    #[test]
    fn test_rejected_while_busy() {
        let mut sel = SelectionHandler::new(6, 6);
        sel.click(c(0, 0), true);
        assert_eq!(sel.click(c(1, 0), false), SelectionOutcome::Rejected);
        assert_eq!(sel.selected(), Some(c(0, 0)));
        assert_eq!(sel.click(c(6, 0), true), SelectionOutcome::Rejected);
    }

    #[test]
    fn test_cursor_stays_on_board() {
        let mut sel = SelectionHandler::new(2, 2);
        assert_eq!(sel.cursor(), c(1, 1));
        assert_eq!(
            sel.apply(BoardAction::CursorUp, true),
            SelectionOutcome::Ignored
        );
        assert_eq!(
            sel.apply(BoardAction::CursorLeft, true),
            SelectionOutcome::CursorMoved(c(0, 1))
        );
        assert_eq!(
            sel.apply(BoardAction::CursorDown, false),
            SelectionOutcome::CursorMoved(c(0, 0))
        );
    }

    #[test]
    fn test_select_and_cancel_actions() {
        let mut sel = SelectionHandler::new(4, 4);
        assert_eq!(
            sel.apply(BoardAction::Select, true),
            SelectionOutcome::Selected(c(2, 2))
        );
        assert_eq!(sel.apply(BoardAction::Cancel, true), SelectionOutcome::Deselected);
        assert_eq!(sel.apply(BoardAction::Cancel, true), SelectionOutcome::Ignored);
        assert_eq!(sel.apply(BoardAction::Restart, true), SelectionOutcome::Ignored);
    }
}
