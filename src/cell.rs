/// A single cell of a generation.
///
/// The discriminants are the numeric values used when counting neighbours, so
/// `u8::from(cell)` is `0` for a dead cell and `1` for a live one.
#[repr(u8)]
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Cell {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl Cell {
    pub const fn is_alive(self) -> bool {
        matches!(self, Cell::Alive)
    }

    /// Apply the B3/S23 rule to a cell with `neighbors` live cells around it.
    ///
    /// ```notrust
    /// alive, 2 or 3 neighbours -> alive
    /// alive, anything else     -> dead
    /// dead,  exactly 3         -> alive
    /// dead,  anything else     -> dead
    /// ```
    pub const fn next(self, neighbors: u8) -> Cell {
        match (self, neighbors) {
            (Cell::Alive, 2 | 3) | (Cell::Dead, 3) => Cell::Alive,
            _ => Cell::Dead,
        }
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> u8 {
        cell as u8
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Cell {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}
