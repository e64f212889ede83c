// guard.rs - One upload at a time
//
// The ticket owns the slot; dropping it (success, failure, or an abandoned
// future) frees the slot again.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct UploadGuard {
    busy: Rc<Cell<bool>>,
}

#[derive(Debug)]
pub struct UploadTicket {
    busy: Rc<Cell<bool>>,
}

impl UploadGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot, or None if an upload is already running.
    pub fn try_acquire(&self) -> Option<UploadTicket> {
        if self.busy.replace(true) {
            return None;
        }
        Some(UploadTicket { busy: Rc::clone(&self.busy) })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }
}

impl Drop for UploadTicket {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}
