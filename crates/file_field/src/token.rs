//! Activation liveness tokens.

use std::{cell::Cell, rc::Rc};

/// Liveness handle for one activation, passed into every asynchronous step.
///
/// Continuations check [`ActivationToken::is_live`] before touching controller state or the
/// widget runtime; teardown flips it off for every clone at once.
#[derive(Debug, Clone)]
pub struct ActivationToken {
    generation: u64,
    alive: Rc<Cell<bool>>,
}

impl ActivationToken {
    /// Creates a live token for activation number `generation`.
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            alive: Rc::new(Cell::new(true)),
        }
    }

    /// Returns the activation number this token belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns whether the activation is still current.
    pub fn is_live(&self) -> bool {
        self.alive.get()
    }

    /// Marks the activation as torn down.
    pub fn cancel(&self) {
        self.alive.set(false);
    }
}
