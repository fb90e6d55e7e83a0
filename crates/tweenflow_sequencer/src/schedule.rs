// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame ticks for cooperative waiting.
//!
//! An update loop owns a [`FrameClock`] and ticks it once per frame, after
//! advancing its sequencers. Waiting tasks hold a [`FrameSignal`] and wake
//! once per tick to re-check their condition. [`FrameScheduler`] bundles the
//! clock with a single-threaded executor so both happen in one call.

use futures::executor::LocalPool;
use futures::future::RemoteHandle;
use futures::task::{LocalSpawnExt, SpawnError};
use std::future::Future;
use tokio::sync::watch;

/// Source of frame ticks
#[derive(Debug)]
pub struct FrameClock {
    sender: watch::Sender<u64>,
}

impl FrameClock {
    /// Create a clock at frame zero
    pub fn new() -> Self {
        let (sender, _) = watch::channel(0);
        Self { sender }
    }

    /// Advance to the next frame and wake every signal
    pub fn tick(&self) {
        self.sender.send_modify(|frame| *frame += 1);
    }

    /// Number of ticks so far
    pub fn frame(&self) -> u64 {
        *self.sender.borrow()
    }

    /// New signal that wakes on the next tick
    pub fn signal(&self) -> FrameSignal {
        FrameSignal {
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Waits for ticks of a [`FrameClock`]
#[derive(Debug, Clone)]
pub struct FrameSignal {
    receiver: watch::Receiver<u64>,
}

impl FrameSignal {
    /// Wait for the next tick. Returns `None` once the clock is gone.
    pub async fn next_frame(&mut self) -> Option<u64> {
        self.receiver.changed().await.ok()?;
        Some(*self.receiver.borrow_and_update())
    }
}

/// Single-threaded executor resumed once per frame
#[derive(Debug)]
pub struct FrameScheduler {
    pool: LocalPool,
    clock: FrameClock,
}

impl FrameScheduler {
    /// Create a scheduler with no tasks
    pub fn new() -> Self {
        Self {
            pool: LocalPool::new(),
            clock: FrameClock::new(),
        }
    }

    /// Queue a task. It first runs on the next [`Self::tick`] or
    /// [`Self::run_until_stalled`].
    pub fn spawn(&self, task: impl Future<Output = ()> + 'static) -> Result<(), SpawnError> {
        self.pool.spawner().spawn_local(task)
    }

    /// Queue a task and get a handle to its output
    pub fn spawn_with_handle<F>(&self, task: F) -> Result<RemoteHandle<F::Output>, SpawnError>
    where
        F: Future + 'static,
        F::Output: 'static,
    {
        self.pool.spawner().spawn_local_with_handle(task)
    }

    /// Run queued tasks until none can make progress without a new tick
    pub fn run_until_stalled(&mut self) {
        self.pool.run_until_stalled();
    }

    /// Advance the clock and let every waiting task check its condition once
    pub fn tick(&mut self) {
        self.clock.tick();
        self.pool.run_until_stalled();
    }

    /// Number of ticks so far
    pub fn frame(&self) -> u64 {
        self.clock.frame()
    }

    /// New signal on this scheduler's clock
    pub fn signal(&self) -> FrameSignal {
        self.clock.signal()
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}
