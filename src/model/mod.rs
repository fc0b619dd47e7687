//! Typed rows of the catalog tables

pub mod card;
pub mod names;
pub mod skill;
pub mod team;

pub use card::*;
pub use names::*;
pub use skill::*;
pub use team::*;
