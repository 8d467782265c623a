//! Buffer management

use std::sync::Arc;

use crate::callback::{self, buffer_map_trampoline, MapPayload, PendingToken};
use crate::device::{Device, DeviceShared};
use crate::enums::{BufferUsages, MapMode};
use crate::error::{GabbroError, Result};
use crate::handle::HandleCell;
use crate::marshal::CallArena;
use crate::native::*;

/// Buffer descriptor for creating buffers
#[derive(Debug, Clone, Default)]
pub struct BufferDescriptor<'a> {
    pub label: &'a str,
    pub size: u64,
    pub usage: BufferUsages,
    pub mapped_at_creation: bool,
}

/// A region of GPU-addressable memory.
pub struct Buffer {
    pub(crate) device: Arc<DeviceShared>,
    pub(crate) handle: HandleCell<WGPUBufferImpl>,
    size: u64,
    usage: BufferUsages,
    map_registration: PendingToken,
}

impl Device {
    pub fn create_buffer(&self, descriptor: &BufferDescriptor<'_>) -> Result<Buffer> {
        let mut arena = CallArena::new();
        let desc = WGPUBufferDescriptor {
            nextInChain: std::ptr::null(),
            label: arena.label(descriptor.label),
            usage: descriptor.usage.bits(),
            size: descriptor.size,
            mappedAtCreation: descriptor.mapped_at_creation,
        };
        let raw = self
            .shared
            .create_scoped("Buffer", |api, device| unsafe {
                (api.wgpuDeviceCreateBuffer)(device, &desc)
            })?;
        Ok(Buffer {
            device: Arc::clone(&self.shared),
            handle: HandleCell::new(raw),
            size: descriptor.size,
            usage: descriptor.usage,
            map_registration: PendingToken::new(),
        })
    }
}

impl Buffer {
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn usage(&self) -> BufferUsages {
        self.usage
    }

    /// Asks the native library to map the range for host access. `callback`
    /// fires during a later [`Device::poll`](crate::Device::poll); only then
    /// may [`Buffer::mapped_range`] be used.
    pub fn map_async(
        &self,
        mode: MapMode,
        offset: usize,
        size: usize,
        callback: impl FnOnce(Result<()>) + Send + 'static,
    ) {
        let payload = MapPayload(Box::new(move |status| {
            callback(map_status_to_result(status));
        }));
        let token = callback::table().register_once(payload);
        self.map_registration.replace(token);
        unsafe {
            (self.device.api.wgpuBufferMapAsync)(
                self.handle.get(),
                mode.bits(),
                offset,
                size,
                buffer_map_trampoline,
                token.as_userdata(),
            );
        }
    }

    /// View of a mapped range. `None` when the buffer is not currently
    /// mapped over the requested range.
    pub fn mapped_range(&self, offset: usize, size: usize) -> Option<&[u8]> {
        let ptr =
            unsafe { (self.device.api.wgpuBufferGetMappedRange)(self.handle.get(), offset, size) };
        if ptr.is_null() {
            None
        } else {
            Some(unsafe { std::slice::from_raw_parts(ptr as *const u8, size) })
        }
    }

    /// Mutable view of a mapped range, for filling buffers created with
    /// `mapped_at_creation` or mapped for write.
    pub fn mapped_range_mut(&mut self, offset: usize, size: usize) -> Option<&mut [u8]> {
        let ptr =
            unsafe { (self.device.api.wgpuBufferGetMappedRange)(self.handle.get(), offset, size) };
        if ptr.is_null() {
            None
        } else {
            Some(unsafe { std::slice::from_raw_parts_mut(ptr as *mut u8, size) })
        }
    }

    /// Invalidates outstanding mapped ranges and returns the buffer to the
    /// GPU. Exclusive access means a live [`Buffer::mapped_range`] borrow
    /// cannot outlive the mapping behind it:
    ///
    /// ```compile_fail
    /// fn read_after_unmap(buffer: &mut gabbro::Buffer) -> u8 {
    ///     let bytes = buffer.mapped_range(0, 16).unwrap();
    ///     buffer.unmap();
    ///     bytes[0]
    /// }
    /// ```
    pub fn unmap(&mut self) {
        unsafe { (self.device.api.wgpuBufferUnmap)(self.handle.get()) };
    }

    /// Frees the backing memory now, invalidating any mapping with it. The
    /// wrapper stays valid; every later use of the buffer in a submission is
    /// a validation error.
    pub fn destroy(&mut self) {
        unsafe { (self.device.api.wgpuBufferDestroy)(self.handle.get()) };
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        if let Some(raw) = self.handle.take() {
            unsafe { (self.device.api.wgpuBufferDrop)(raw) };
        }
    }
}

fn map_status_to_result(status: WGPUBufferMapAsyncStatus) -> Result<()> {
    let message = match status {
        WGPUBufferMapAsyncStatus_Success => return Ok(()),
        WGPUBufferMapAsyncStatus_Error => "mapping failed",
        WGPUBufferMapAsyncStatus_DeviceLost => "device lost",
        WGPUBufferMapAsyncStatus_DestroyedBeforeCallback => "buffer destroyed before callback",
        WGPUBufferMapAsyncStatus_UnmappedBeforeCallback => "buffer unmapped before callback",
        _ => "unknown mapping failure",
    };
    Err(GabbroError::BufferMap {
        message: message.to_string(),
    })
}

/// Binding and copy descriptors use `WGPU_WHOLE_SIZE` to mean "from the
/// offset to the end of the buffer". Callers of the wrappers say the same
/// thing with a size of 0.
pub(crate) fn size_or_whole(size: u64) -> u64 {
    if size == 0 {
        WGPU_WHOLE_SIZE
    } else {
        size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_status_mapping() {
        assert!(map_status_to_result(WGPUBufferMapAsyncStatus_Success).is_ok());
        let err = map_status_to_result(WGPUBufferMapAsyncStatus_DestroyedBeforeCallback).unwrap_err();
        assert_eq!(
            err.to_string(),
            "buffer mapping failed: buffer destroyed before callback"
        );
        let err = map_status_to_result(WGPUBufferMapAsyncStatus_DeviceLost).unwrap_err();
        assert_eq!(err.to_string(), "buffer mapping failed: device lost");
    }

    #[test]
    fn zero_size_means_the_rest_of_the_buffer() {
        assert_eq!(size_or_whole(0), WGPU_WHOLE_SIZE);
        assert_eq!(size_or_whole(256), 256);
    }
}
