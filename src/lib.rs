pub mod camera;
pub mod cell;
pub mod config;
pub mod events;
pub mod grid;
pub mod pattern;
pub mod world;

/// Signed cell coordinate. Reads accept any offset, including ones outside the grid.
pub type Offset = isize;
