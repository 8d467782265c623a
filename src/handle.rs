//! One-shot ownership cell for native handles.
//!
//! Every wrapper owns its raw handle through a [`HandleCell`]. Explicit
//! `destroy`/release paths and `Drop` all funnel through [`HandleCell::take`],
//! and only the first caller gets the non-null pointer back, so the native
//! drop runs exactly once no matter how the wrapper is torn down.

use std::sync::atomic::{AtomicPtr, Ordering};

pub(crate) struct HandleCell<T> {
    raw: AtomicPtr<T>,
}

impl<T> HandleCell<T> {
    pub(crate) fn new(raw: *mut T) -> Self {
        Self {
            raw: AtomicPtr::new(raw),
        }
    }

    /// Returns the live handle, or null after it has been taken.
    ///
    /// Using a handle concurrently with release is a caller bug; this only
    /// guarantees the release itself is not doubled.
    pub(crate) fn get(&self) -> *mut T {
        self.raw.load(Ordering::Acquire)
    }

    /// Takes the handle out of the cell. The first caller gets the pointer
    /// and becomes responsible for the native drop; everyone after gets
    /// `None`.
    pub(crate) fn take(&self) -> Option<*mut T> {
        let raw = self.raw.swap(std::ptr::null_mut(), Ordering::AcqRel);
        if raw.is_null() {
            None
        } else {
            Some(raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn take_is_one_shot() {
        let cell = HandleCell::new(0x1000 as *mut u8);
        assert_eq!(cell.take(), Some(0x1000 as *mut u8));
        assert_eq!(cell.take(), None);
        assert!(cell.get().is_null());
    }

    #[test]
    fn concurrent_takers_release_once() {
        for _ in 0..100 {
            let cell = Arc::new(HandleCell::new(0x2000 as *mut u8));
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let cell = Arc::clone(&cell);
                    std::thread::spawn(move || cell.take().is_some())
                })
                .collect();
            let winners = handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|&won| won)
                .count();
            assert_eq!(winners, 1);
        }
    }
}
