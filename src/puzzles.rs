//! Puzzle-to-matrix builders.
//!
//! Each builder maps a puzzle's placements onto columns of a 0/1 matrix,
//! solves it with [`DancingLinks`](crate::DancingLinks) and translates the
//! selected rows back into placements.

pub mod instant_insanity;
pub mod iq_stix;
pub mod polyomino;

pub use instant_insanity::{Color, Cube, InstantInsanity, Stacking};
pub use iq_stix::{IqStix, Line, Stick};
pub use polyomino::{calendar_board, calendar_cell, pentominoes, Board, Packing, Placement, Shape};
