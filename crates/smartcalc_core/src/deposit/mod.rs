//! Interest-bearing deposit simulator
//!
//! [`schedule`] resolves the calendars, [`taxes`] tracks the yearly
//! exemption and [`simulation`] walks the term one day at a time.

pub mod schedule;
pub mod simulation;
pub mod taxes;

pub use simulation::calculate;
