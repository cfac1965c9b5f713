//! Thread-safe wrapper for hosts that tick on one thread and read or send
//! input from others

use crate::runtime::{Command, Simulation};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, PoisonError, RwLock, RwLockReadGuard};

/// A [`Simulation`] behind a single tick boundary
///
/// `tick` is the only writer. Commands sent through [`SharedSimulation::sender`]
/// wait in a channel and are handed to the simulation at the start of the next
/// tick, so input never lands in the middle of one.
pub struct SharedSimulation {
    state: RwLock<Simulation>,
    inbox: Mutex<Receiver<Command>>,
    sender: Sender<Command>,
}

impl SharedSimulation {
    pub fn new(sim: Simulation) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            state: RwLock::new(sim),
            inbox: Mutex::new(receiver),
            sender,
        }
    }

    /// A handle input threads can send commands through
    pub fn sender(&self) -> Sender<Command> {
        self.sender.clone()
    }

    /// Run one tick under the exclusive lock
    pub fn tick(&self) {
        let mut sim = self.state.write().unwrap_or_else(PoisonError::into_inner);
        {
            let inbox = self.inbox.lock().unwrap_or_else(PoisonError::into_inner);
            while let Ok(command) = inbox.try_recv() {
                sim.enqueue(command);
            }
        }
        sim.tick();
    }

    /// Shared read access between ticks
    pub fn read(&self) -> RwLockReadGuard<'_, Simulation> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn into_inner(self) -> Simulation {
        self.state.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}
