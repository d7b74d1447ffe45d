//! Move legality: line-of-sight, attacks, castling and the per-piece dispatcher

pub mod attack;
mod castling;
pub mod legality;
pub mod ray;

pub use attack::{attackers, in_check, is_attacked};
pub use legality::{apply, validate, MovePlan};
pub use ray::path_clear;
