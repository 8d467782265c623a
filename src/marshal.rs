//! Per-call marshalling arena.
//!
//! Flattening a descriptor for a native call produces transient C-shaped
//! allocations: NUL-terminated strings, boxed structs reached through
//! pointers, arrays passed as `(count, pointer)`. A [`CallArena`] owns all of
//! them for the duration of one native call; dropping it at the end of the
//! call releases everything at once. Pointers handed out by the arena stay
//! valid until the arena is dropped, never longer.

use std::any::Any;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

#[derive(Default)]
pub(crate) struct CallArena {
    strings: Vec<CString>,
    blocks: Vec<Box<dyn Any>>,
}

impl CallArena {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Copies `s` into an owned NUL-terminated string and returns its
    /// pointer. Interior NUL bytes are stripped; C has no way to carry them.
    pub(crate) fn cstr(&mut self, s: &str) -> *const c_char {
        let mut bytes = s.as_bytes().to_vec();
        bytes.retain(|&b| b != 0);
        // No interior NULs remain after the retain above.
        let owned = unsafe { CString::from_vec_unchecked(bytes) };
        let ptr = owned.as_ptr();
        self.strings.push(owned);
        ptr
    }

    /// Label convention: the empty string marshals as a null pointer.
    pub(crate) fn label(&mut self, s: &str) -> *const c_char {
        if s.is_empty() {
            ptr::null()
        } else {
            self.cstr(s)
        }
    }

    /// Boxes `value` in the arena and returns a pointer to it. The address
    /// is stable for the arena's lifetime.
    pub(crate) fn alloc<T: 'static>(&mut self, value: T) -> *const T {
        let boxed = Box::new(value);
        let ptr: *const T = &*boxed;
        self.blocks.push(boxed);
        ptr
    }

    /// Moves `values` into the arena and returns the `(count, pointer)` pair
    /// the C descriptors expect. An empty array marshals as `(0, null)`.
    pub(crate) fn slice<T: 'static>(&mut self, values: Vec<T>) -> (u32, *const T) {
        if values.is_empty() {
            return (0, ptr::null());
        }
        let count = values.len() as u32;
        let ptr = values.as_ptr();
        self.blocks.push(Box::new(values));
        (count, ptr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    #[test]
    fn strings_are_nul_terminated() {
        let mut arena = CallArena::new();
        let p = arena.cstr("storage buffer");
        let s = unsafe { CStr::from_ptr(p) };
        assert_eq!(s.to_str().unwrap(), "storage buffer");
    }

    #[test]
    fn interior_nul_is_stripped() {
        let mut arena = CallArena::new();
        let p = arena.cstr("a\0b");
        let s = unsafe { CStr::from_ptr(p) };
        assert_eq!(s.to_str().unwrap(), "ab");
    }

    #[test]
    fn empty_label_is_null() {
        let mut arena = CallArena::new();
        assert!(arena.label("").is_null());
        assert!(!arena.label("x").is_null());
    }

    #[test]
    fn empty_slice_is_count_zero_null() {
        let mut arena = CallArena::new();
        let (count, ptr) = arena.slice(Vec::<u64>::new());
        assert_eq!(count, 0);
        assert!(ptr.is_null());
    }

    #[test]
    fn pointers_stay_valid_as_the_arena_grows() {
        let mut arena = CallArena::new();
        let a = arena.alloc(0xABCD_u32);
        let (count, b) = arena.slice(vec![1u64, 2, 3]);
        let strings: Vec<_> = (0..64).map(|i| arena.cstr(&format!("s{i}"))).collect();
        let c = arena.alloc([7u8; 128]);

        assert_eq!(unsafe { *a }, 0xABCD);
        assert_eq!(count, 3);
        assert_eq!(unsafe { std::slice::from_raw_parts(b, 3) }, &[1, 2, 3]);
        for (i, p) in strings.iter().enumerate() {
            let s = unsafe { CStr::from_ptr(*p) };
            assert_eq!(s.to_str().unwrap(), format!("s{i}"));
        }
        assert_eq!(unsafe { (*c)[127] }, 7);
    }
}
