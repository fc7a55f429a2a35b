//! Contract-wide mutual exclusion for state-changing calls

use crate::error::{ReservoirError, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReentrancyGuard {
    entered: bool,
}

impl ReentrancyGuard {
    pub fn enter(&mut self) -> Result<()> {
        if self.entered {
            return Err(ReservoirError::ReentrantCall);
        }
        self.entered = true;
        Ok(())
    }

    pub fn exit(&mut self) {
        self.entered = false;
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }
}
