//! Callback bridge between the native library and Rust.
//!
//! The native side is only ever given two things: the address of one of the
//! fixed non-capturing `extern "C"` trampolines below, and an opaque
//! correlation token smuggled through the `userdata` pointer. The token
//! resolves through a generation-counted slot table to the Rust-side state
//! for that callback. A stale token (slot reused, entry already consumed)
//! resolves to nothing instead of to somebody else's memory.

use std::any::Any;
use std::ffi::CStr;
use std::os::raw::{c_char, c_void};
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::error::{ErrorKind, ErrorSink, GabbroError};
use crate::native::*;

/// Raw pointer that may cross threads inside a callback payload. The native
/// library already hands these handles between threads; the wrapper types
/// re-impose ownership on top.
pub(crate) struct SendPtr<T>(pub *mut T);

unsafe impl<T> Send for SendPtr<T> {}

/// Correlation token: slot index in the low half, generation in the high
/// half, packed so it can ride through a C `void*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token(u64);

impl Token {
    fn pack(index: u32, generation: u32) -> Self {
        Self((generation as u64) << 32 | index as u64)
    }

    fn index(self) -> usize {
        (self.0 & 0xFFFF_FFFF) as usize
    }

    fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    pub(crate) fn as_userdata(self) -> *mut c_void {
        self.0 as usize as *mut c_void
    }

    pub(crate) fn from_userdata(ptr: *mut c_void) -> Self {
        Self(ptr as usize as u64)
    }
}

enum Entry {
    /// Consumed by at most one trampoline firing.
    Once(Box<dyn Any + Send>),
    /// Lives until explicitly unregistered (the per-device error sink).
    Persistent(Arc<dyn Any + Send + Sync>),
}

struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

#[derive(Default)]
struct Slots {
    slots: Vec<Slot>,
    free: Vec<usize>,
}

/// Generation-counted registry of callback state, keyed by [`Token`].
pub(crate) struct CallbackTable {
    inner: Mutex<Slots>,
}

impl CallbackTable {
    fn new() -> Self {
        Self {
            inner: Mutex::new(Slots::default()),
        }
    }

    fn insert(&self, entry: Entry) -> Token {
        let mut inner = self.inner.lock();
        if let Some(index) = inner.free.pop() {
            let slot = &mut inner.slots[index];
            slot.entry = Some(entry);
            Token::pack(index as u32, slot.generation)
        } else {
            let index = inner.slots.len() as u32;
            inner.slots.push(Slot {
                generation: 0,
                entry: Some(entry),
            });
            Token::pack(index, 0)
        }
    }

    pub(crate) fn register_once<T: Send + 'static>(&self, value: T) -> Token {
        self.insert(Entry::Once(Box::new(value)))
    }

    pub(crate) fn register_persistent<T: Send + Sync + 'static>(&self, value: Arc<T>) -> Token {
        self.insert(Entry::Persistent(value))
    }

    /// Consumes a one-shot entry. Returns `None` for stale tokens, wrong
    /// generations, persistent entries and mismatched payload types.
    pub(crate) fn take_once<T: 'static>(&self, token: Token) -> Option<T> {
        let mut inner = self.inner.lock();
        let index = token.index();
        let slot = inner.slots.get_mut(index)?;
        if slot.generation != token.generation() {
            return None;
        }
        match slot.entry.take() {
            Some(Entry::Once(boxed)) => match boxed.downcast::<T>() {
                Ok(value) => {
                    slot.generation = slot.generation.wrapping_add(1);
                    inner.free.push(index);
                    Some(*value)
                }
                Err(boxed) => {
                    slot.entry = Some(Entry::Once(boxed));
                    None
                }
            },
            other => {
                slot.entry = other;
                None
            }
        }
    }

    /// Looks up a persistent entry without consuming it.
    pub(crate) fn get_persistent<T: Send + Sync + 'static>(&self, token: Token) -> Option<Arc<T>> {
        let inner = self.inner.lock();
        let slot = inner.slots.get(token.index())?;
        if slot.generation != token.generation() {
            return None;
        }
        match &slot.entry {
            Some(Entry::Persistent(arc)) => Arc::clone(arc).downcast::<T>().ok(),
            _ => None,
        }
    }

    /// Frees a slot regardless of entry kind. Safe against double and stale
    /// calls.
    pub(crate) fn unregister(&self, token: Token) {
        let mut inner = self.inner.lock();
        let index = token.index();
        let Some(slot) = inner.slots.get_mut(index) else {
            return;
        };
        if slot.generation != token.generation() || slot.entry.is_none() {
            return;
        }
        slot.entry = None;
        slot.generation = slot.generation.wrapping_add(1);
        inner.free.push(index);
    }
}

/// Tracks the one-shot registration for an in-flight async callback, so the
/// slot is reclaimed even if the native side never fires it. Unregistering a
/// token the trampoline already consumed is a no-op, so this never races the
/// normal consumption path.
pub(crate) struct PendingToken {
    slot: Mutex<Option<Token>>,
}

impl PendingToken {
    pub(crate) fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Records a newly registered token, releasing any previously recorded
    /// one that never fired.
    pub(crate) fn replace(&self, token: Token) {
        if let Some(displaced) = self.slot.lock().replace(token) {
            table().unregister(displaced);
        }
    }
}

impl Drop for PendingToken {
    fn drop(&mut self) {
        if let Some(token) = self.slot.lock().take() {
            table().unregister(token);
        }
    }
}

static TABLE: Lazy<CallbackTable> = Lazy::new(CallbackTable::new);

pub(crate) fn table() -> &'static CallbackTable {
    &TABLE
}

/// One-shot rendezvous between a native callback and the thread that made
/// the call. The caller keeps one half, registers the other in the table.
pub(crate) struct Completion<T>(Arc<Mutex<Option<T>>>);

impl<T> Completion<T> {
    pub(crate) fn new() -> Self {
        Self(Arc::new(Mutex::new(None)))
    }

    pub(crate) fn set(&self, value: T) {
        *self.0.lock() = Some(value);
    }

    pub(crate) fn take(&self) -> Option<T> {
        self.0.lock().take()
    }
}

impl<T> Clone for Completion<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

pub(crate) struct AdapterResponse {
    pub status: WGPURequestAdapterStatus,
    pub adapter: SendPtr<WGPUAdapterImpl>,
    pub message: String,
}

pub(crate) struct DeviceResponse {
    pub status: WGPURequestDeviceStatus,
    pub device: SendPtr<WGPUDeviceImpl>,
    pub message: String,
}

pub(crate) struct ScopeResponse {
    pub kind: WGPUErrorType,
    pub message: String,
}

/// Payload for `wgpuBufferMapAsync`: the user's completion closure.
pub(crate) type MapClosure = Box<dyn FnOnce(WGPUBufferMapAsyncStatus) + Send + 'static>;

pub(crate) struct MapPayload(pub MapClosure);

unsafe fn message_to_string(message: *const c_char) -> String {
    if message.is_null() {
        String::new()
    } else {
        CStr::from_ptr(message).to_string_lossy().into_owned()
    }
}

pub(crate) fn error_kind_from_native(kind: WGPUErrorType) -> ErrorKind {
    match kind {
        WGPUErrorType_Validation => ErrorKind::Validation,
        WGPUErrorType_OutOfMemory => ErrorKind::OutOfMemory,
        WGPUErrorType_DeviceLost => ErrorKind::DeviceLost,
        _ => ErrorKind::Unknown,
    }
}

pub(crate) unsafe extern "C" fn request_adapter_trampoline(
    status: WGPURequestAdapterStatus,
    adapter: WGPUAdapter,
    message: *const c_char,
    userdata: *mut c_void,
) {
    let token = Token::from_userdata(userdata);
    if let Some(completion) = table().take_once::<Completion<AdapterResponse>>(token) {
        completion.set(AdapterResponse {
            status,
            adapter: SendPtr(adapter),
            message: message_to_string(message),
        });
    }
}

pub(crate) unsafe extern "C" fn request_device_trampoline(
    status: WGPURequestDeviceStatus,
    device: WGPUDevice,
    message: *const c_char,
    userdata: *mut c_void,
) {
    let token = Token::from_userdata(userdata);
    if let Some(completion) = table().take_once::<Completion<DeviceResponse>>(token) {
        completion.set(DeviceResponse {
            status,
            device: SendPtr(device),
            message: message_to_string(message),
        });
    }
}

pub(crate) unsafe extern "C" fn pop_error_scope_trampoline(
    kind: WGPUErrorType,
    message: *const c_char,
    userdata: *mut c_void,
) {
    let token = Token::from_userdata(userdata);
    if let Some(completion) = table().take_once::<Completion<ScopeResponse>>(token) {
        completion.set(ScopeResponse {
            kind,
            message: message_to_string(message),
        });
    }
}

pub(crate) unsafe extern "C" fn uncaptured_error_trampoline(
    kind: WGPUErrorType,
    message: *const c_char,
    userdata: *mut c_void,
) {
    if kind == WGPUErrorType_NoError {
        return;
    }
    let token = Token::from_userdata(userdata);
    if let Some(sink) = table().get_persistent::<ErrorSink>(token) {
        sink.store(GabbroError::native(
            error_kind_from_native(kind),
            message_to_string(message),
        ));
    } else {
        // Device already torn down; the message is all that is left.
        log::error!(
            "uncaptured wgpu error after device teardown: {}",
            message_to_string(message)
        );
    }
}

pub(crate) unsafe extern "C" fn buffer_map_trampoline(
    status: WGPUBufferMapAsyncStatus,
    userdata: *mut c_void,
) {
    let token = Token::from_userdata(userdata);
    if let Some(payload) = table().take_once::<MapPayload>(token) {
        (payload.0)(status);
    }
}

pub(crate) unsafe extern "C" fn log_trampoline(level: WGPULogLevel, message: *const c_char) {
    let level = match level {
        WGPULogLevel_Error => log::Level::Error,
        WGPULogLevel_Warn => log::Level::Warn,
        WGPULogLevel_Info => log::Level::Info,
        WGPULogLevel_Debug => log::Level::Debug,
        _ => log::Level::Trace,
    };
    log::log!(target: "wgpu_native", level, "{}", message_to_string(message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn once_entry_is_consumed_at_most_once() {
        let token = table().register_once(41_u32);
        assert_eq!(table().take_once::<u32>(token), Some(41));
        assert_eq!(table().take_once::<u32>(token), None);
    }

    #[test]
    fn stale_token_does_not_reach_a_reused_slot() {
        let first = table().register_once("first".to_string());
        table().unregister(first);
        // The slot may be reused immediately; the old token must still miss.
        let second = table().register_once("second".to_string());
        assert_eq!(table().take_once::<String>(first), None);
        assert_eq!(table().take_once::<String>(second).as_deref(), Some("second"));
    }

    #[test]
    fn wrong_payload_type_does_not_consume() {
        let token = table().register_once(7_u64);
        assert!(table().take_once::<String>(token).is_none());
        assert_eq!(table().take_once::<u64>(token), Some(7));
    }

    #[test]
    fn persistent_entry_survives_lookups_until_unregistered() {
        let sink = Arc::new(ErrorSink::new());
        let token = table().register_persistent(Arc::clone(&sink));
        assert!(table().get_persistent::<ErrorSink>(token).is_some());
        assert!(table().get_persistent::<ErrorSink>(token).is_some());
        // Not consumable through the one-shot path.
        assert!(table().take_once::<ErrorSink>(token).is_none());
        table().unregister(token);
        assert!(table().get_persistent::<ErrorSink>(token).is_none());
    }

    #[test]
    fn pending_token_reclaims_unfired_registrations() {
        let pending = PendingToken::new();
        let first = table().register_once(1_u8);
        pending.replace(first);
        let second = table().register_once(2_u8);
        pending.replace(second);
        // Displacing an unfired registration frees it.
        assert!(table().take_once::<u8>(first).is_none());
        drop(pending);
        assert!(table().take_once::<u8>(second).is_none());
    }

    #[test]
    fn pending_token_leaves_fired_slots_alone() {
        let pending = PendingToken::new();
        let token = table().register_once(7_u8);
        pending.replace(token);
        assert_eq!(table().take_once::<u8>(token), Some(7));
        // The slot may be reused by an unrelated registration; dropping the
        // stale pending token must not free it.
        let unrelated = table().register_once(9_u8);
        drop(pending);
        assert_eq!(table().take_once::<u8>(unrelated), Some(9));
    }

    #[test]
    fn token_survives_the_userdata_round_trip() {
        let token = table().register_once(3.5_f64);
        let roundtrip = Token::from_userdata(token.as_userdata());
        assert_eq!(roundtrip, token);
        assert_eq!(table().take_once::<f64>(roundtrip), Some(3.5));
    }

    #[test]
    fn trampoline_delivers_into_completion() {
        let completion = Completion::<ScopeResponse>::new();
        let token = table().register_once(completion.clone());
        let message = std::ffi::CString::new("buffer binding out of range").unwrap();
        unsafe {
            pop_error_scope_trampoline(
                WGPUErrorType_Validation,
                message.as_ptr(),
                token.as_userdata(),
            );
        }
        let response = completion.take().expect("trampoline fired");
        assert_eq!(response.kind, WGPUErrorType_Validation);
        assert_eq!(response.message, "buffer binding out of range");
        // Consumed: a second firing with the same token is a no-op.
        unsafe {
            pop_error_scope_trampoline(WGPUErrorType_Validation, message.as_ptr(), token.as_userdata());
        }
        assert!(completion.take().is_none());
    }
}
