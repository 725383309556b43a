//! Main-thread token
//!
//! GLFW must be driven from one OS thread for the whole time it is
//! initialized, and the Vulkan handles created next to it are only touched
//! from that thread as well. [`MainThread`] makes that requirement a value:
//! it can only be obtained on the pinned thread, it cannot leave that thread
//! (`!Send`, `!Sync`), and every windowing and graphics call takes a
//! `&MainThread`.

use std::marker::PhantomData;
use std::sync::OnceLock;
use std::thread::{self, ThreadId};
use thiserror::Error;

static PINNED: OnceLock<ThreadId> = OnceLock::new();

/// Thread pinning errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThreadError {
    /// Another thread already owns the windowing library
    #[error("windowing is pinned to thread {pinned:?}, called from {current:?}")]
    PinnedElsewhere {
        /// Thread that pinned first
        pinned: ThreadId,
        /// Thread that attempted to pin
        current: ThreadId,
    },
}

/// Proof that the caller runs on the thread pinned for windowing and Vulkan
#[derive(Debug)]
pub struct MainThread {
    id: ThreadId,
    _not_send: PhantomData<*const ()>,
}

impl MainThread {
    /// Pin the calling thread for the rest of the process
    ///
    /// The first call wins. Later calls from the same thread hand out another
    /// token; calls from any other thread fail.
    pub fn pin() -> Result<Self, ThreadError> {
        Self::pin_in(&PINNED)
    }

    fn pin_in(slot: &OnceLock<ThreadId>) -> Result<Self, ThreadError> {
        let current = thread::current().id();
        let pinned = *slot.get_or_init(|| current);

        if pinned == current {
            log::debug!("Main thread pinned: {current:?}");
            Ok(Self::new(current))
        } else {
            Err(ThreadError::PinnedElsewhere { pinned, current })
        }
    }

    fn new(id: ThreadId) -> Self {
        Self {
            id,
            _not_send: PhantomData,
        }
    }

    /// Token for the current thread without touching the process-wide pin
    ///
    /// Tests run on many threads at once and drive fakes only.
    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self::new(thread::current().id())
    }

    /// Id of the pinned thread
    pub const fn id(&self) -> ThreadId {
        self.id
    }
}
