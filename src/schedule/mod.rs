//! Day schedule grid.
//!
//! Sessions become rectangles on a time-slot x track grid: rows are the
//! distinct start times of the day, columns are the tracks in position
//! order, and the `extend_width` / `extend_height` hints become spans.

pub mod grid;
pub mod render;

pub use grid::{days, GridCell, ScheduleGrid, Slot, Unplaced, UnplacedReason};
pub use render::render_markdown;
