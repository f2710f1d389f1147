//! Flat row-major matrix of Q-values.

use crate::error::{Error, Result};

/// Value every cell starts at when a matrix is created.
pub const DEFAULT_Q_VALUE: f32 = 0.0;

/// Fixed-size grid of Q-values addressed by `(state, action)`.
///
/// Cells are stored row-major by state: all actions of state 0, then all
/// actions of state 1, and so on. The buffer length always equals
/// `num_states * num_actions`.
#[derive(Debug, Clone, PartialEq)]
pub struct QMatrix {
    num_states: u64,
    num_actions: u32,
    values: Vec<f32>,
}

impl QMatrix {
    /// Create a matrix with every cell at [`DEFAULT_Q_VALUE`].
    ///
    /// # Examples
    ///
    /// ```
    /// use statematrix::matrix::QMatrix;
    ///
    /// let matrix = QMatrix::new(3, 2)?;
    /// assert_eq!(matrix.get(2, 1)?, 0.0);
    /// # Ok::<(), statematrix::Error>(())
    /// ```
    pub fn new(num_states: u64, num_actions: u32) -> Result<Self> {
        Self::with_default(num_states, num_actions, DEFAULT_Q_VALUE)
    }

    /// Create a matrix with every cell at `default`.
    pub fn with_default(num_states: u64, num_actions: u32, default: f32) -> Result<Self> {
        let (mut values, cells) = Self::allocate(num_states, num_actions)?;
        values.resize(cells, default);
        Ok(Self {
            num_states,
            num_actions,
            values,
        })
    }

    /// Build a matrix from an existing row-major buffer.
    ///
    /// Returns `None` when the buffer length does not match the dimensions.
    pub(crate) fn from_values(num_states: u64, num_actions: u32, values: Vec<f32>) -> Option<Self> {
        let cells = cell_count(num_states, num_actions)?;
        (values.len() == cells).then_some(Self {
            num_states,
            num_actions,
            values,
        })
    }

    /// Reserve an empty buffer with room for the requested cells, returning it
    /// along with the cell count.
    ///
    /// Dimensions must fit the file header (`i64` states, `i32` actions), so a
    /// matrix that exists can always be saved and reloaded unchanged.
    pub(crate) fn allocate(num_states: u64, num_actions: u32) -> Result<(Vec<f32>, usize)> {
        if i64::try_from(num_states).is_err() || i32::try_from(num_actions).is_err() {
            return Err(Error::DimensionsTooLarge {
                num_states,
                num_actions,
            });
        }
        let failure = || Error::AllocationFailure {
            num_states,
            num_actions: u64::from(num_actions),
        };
        let cells = cell_count(num_states, num_actions).ok_or_else(failure)?;
        let mut values = Vec::new();
        values.try_reserve_exact(cells).map_err(|_| failure())?;
        Ok((values, cells))
    }

    pub fn num_states(&self) -> u64 {
        self.num_states
    }

    pub fn num_actions(&self) -> u32 {
        self.num_actions
    }

    /// Number of cells in the matrix.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All cells in row-major order.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Get the Q-value of a state-action pair.
    pub fn get(&self, state: u64, action: u32) -> Result<f32> {
        let index = self.index_of(state, action)?;
        Ok(self.values[index])
    }

    /// Set the Q-value of a state-action pair.
    pub fn set(&mut self, state: u64, action: u32, value: f32) -> Result<()> {
        let index = self.index_of(state, action)?;
        self.values[index] = value;
        Ok(())
    }

    /// Borrow the action values of one state.
    pub fn row(&self, state: u64) -> Result<&[f32]> {
        if state >= self.num_states {
            return Err(self.out_of_range(state, 0));
        }
        let width = self.num_actions as usize;
        let start = state as usize * width;
        Ok(&self.values[start..start + width])
    }

    /// Maximum Q-value over all actions of a state.
    ///
    /// A state with no actions has no maximum and yields [`Error::EmptyRow`].
    pub fn max_over_actions(&self, state: u64) -> Result<f32> {
        self.best_action(state).map(|(_, value)| value)
    }

    /// Index of the first action holding the state's maximum Q-value.
    pub fn greedy_action(&self, state: u64) -> Result<u32> {
        self.best_action(state).map(|(action, _)| action)
    }

    fn best_action(&self, state: u64) -> Result<(u32, f32)> {
        let row = self.row(state)?;
        let (&first, rest) = row.split_first().ok_or(Error::EmptyRow { state })?;
        let mut best = (0u32, first);
        for (offset, &value) in rest.iter().enumerate() {
            if value > best.1 {
                best = (offset as u32 + 1, value);
            }
        }
        Ok(best)
    }

    fn index_of(&self, state: u64, action: u32) -> Result<usize> {
        if state >= self.num_states || action >= self.num_actions {
            return Err(self.out_of_range(state, action));
        }
        Ok(state as usize * self.num_actions as usize + action as usize)
    }

    fn out_of_range(&self, state: u64, action: u32) -> Error {
        Error::IndexOutOfRange {
            state: i64::try_from(state).unwrap_or(i64::MAX),
            action: i64::from(action),
            num_states: self.num_states,
            num_actions: self.num_actions,
        }
    }
}

/// Number of cells for the given dimensions, or `None` if it overflows `usize`.
pub(crate) fn cell_count(num_states: u64, num_actions: u32) -> Option<usize> {
    let states = usize::try_from(num_states).ok()?;
    states.checked_mul(num_actions as usize)
}
