//! Impact queue: the hand-off between event sources and the tick thread.
//!
//! Collision or input callbacks may fire on any thread. They only ever send
//! points into the queue; the driver drains it right before `advance`, so
//! the wave buffer is mutated from a single thread.

use crossbeam_channel::{Receiver, Sender};
use glam::Vec3;

/// Cloneable producer handle for impact points.
#[derive(Debug, Clone)]
pub struct ImpactSender {
    sender: Sender<Vec3>,
}

impl ImpactSender {
    /// Queue an impact. Returns `false` if the owning driver was dropped.
    pub fn send(&self, point: Vec3) -> bool {
        self.sender.send(point).is_ok()
    }
}

/// Consumer side, owned by the driver.
#[derive(Debug)]
pub struct ImpactQueue {
    sender: Sender<Vec3>,
    receiver: Receiver<Vec3>,
}

impl ImpactQueue {
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self { sender, receiver }
    }

    pub fn sender(&self) -> ImpactSender {
        ImpactSender {
            sender: self.sender.clone(),
        }
    }

    /// Take every queued point in arrival order without blocking.
    pub fn drain(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.receiver.try_iter()
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl Default for ImpactQueue {
    fn default() -> Self {
        Self::new()
    }
}
