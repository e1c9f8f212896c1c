//! Agent — an independent particle moving over the trail field.
//!
//! Agents never talk to each other. They read the field, move, and mark
//! the field; every interaction between agents goes through those marks.

use crate::field::{Deposit, TrailField};
use crate::types::Position;

/// A particle that senses and deposits into a [`TrailField`].
///
/// The runtime drives each agent in two phases per step:
/// 1. [`Agent::step`] reads the field (as it stood at the end of the
///    previous step) and updates heading and position
/// 2. [`Agent::deposit_request`] describes the mark to leave, which the
///    runtime applies once every agent has moved
pub trait Agent {
    /// The agent's current continuous position.
    fn position(&self) -> Position;

    /// Current heading in radians.
    fn heading(&self) -> f64;

    /// Sense, steer and move. Must not mutate the field.
    fn step(&mut self, field: &TrailField);

    /// The deposit this agent makes at its current position.
    fn deposit_request(&self, field: &TrailField) -> Deposit;

    /// Deposit straight into the field instead of deferring.
    fn deposit(&self, field: &mut TrailField) {
        let deposit = self.deposit_request(field);
        field.apply_deposit(&deposit);
    }
}
