//! Agent-facing view of a Q-value table.
//!
//! A learning agent reads and writes Q-values through this trait without
//! caring whether the table lives in the process-wide registry (see
//! [`crate::handle::TableHandle`]) or is owned directly as a
//! [`TableRecord`].

use crate::{
    Result,
    adapters::BinaryFileRepository,
    ports::TableRepository,
    registry::TableRecord,
};

/// Table of Q-values indexed by state and action.
pub trait StateMatrix {
    /// Get the Q-value of a state-action pair.
    fn get_q(&self, state: u64, action: u32) -> Result<f32>;

    /// Set the Q-value of a state-action pair.
    fn set_q(&mut self, state: u64, action: u32, value: f32) -> Result<()>;

    /// Maximum Q-value over the actions of a state.
    fn max_value(&self, state: u64) -> Result<f32>;

    /// Number of actions per state.
    fn num_actions(&self) -> Result<u32>;

    /// Number of states.
    fn num_states(&self) -> Result<u64>;

    /// Persist the table to its file.
    ///
    /// Called once the agent is done with the table, typically when the
    /// host process is about to exit.
    fn shutdown(&mut self) -> Result<()>;
}

impl StateMatrix for TableRecord {
    fn get_q(&self, state: u64, action: u32) -> Result<f32> {
        self.matrix().get(state, action)
    }

    fn set_q(&mut self, state: u64, action: u32, value: f32) -> Result<()> {
        self.matrix_mut().set(state, action, value)
    }

    fn max_value(&self, state: u64) -> Result<f32> {
        self.matrix().max_over_actions(state)
    }

    fn num_actions(&self) -> Result<u32> {
        Ok(TableRecord::num_actions(self))
    }

    fn num_states(&self) -> Result<u64> {
        Ok(TableRecord::num_states(self))
    }

    fn shutdown(&mut self) -> Result<()> {
        BinaryFileRepository::new().save(self, None)
    }
}
