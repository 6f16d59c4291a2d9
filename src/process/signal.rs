use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use signal_hook::consts::SIGINT;

use super::ProcessError;

/// Set from the SIGINT handler, read by the prompt loop.
///
/// The handler does nothing except store `true`, so the shell outlives ^C
/// while a foreground child, which gets the default disposition back on
/// exec, is interrupted.
#[derive(Clone, Debug, Default)]
pub struct InterruptFlag {
    raised: Arc<AtomicBool>,
}

impl InterruptFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&self) -> Result<(), ProcessError> {
        signal_hook::flag::register(SIGINT, Arc::clone(&self.raised))
            .map(|_| ())
            .map_err(ProcessError::Signal)
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    pub fn clear(&self) {
        self.raised.store(false, Ordering::SeqCst);
    }

    /// Reports whether the flag was raised and lowers it again.
    pub fn take(&self) -> bool {
        self.raised.swap(false, Ordering::SeqCst)
    }
}
