//! Window surfaces and swap chains

use std::sync::Arc;

use crate::adapter::Adapter;
use crate::device::{Device, DeviceShared};
use crate::enums::{PresentMode, TextureFormat, TextureUsages};
use crate::error::{GabbroError, Result};
use crate::handle::HandleCell;
use crate::native::api::Api;
use crate::native::*;
use crate::texture::TextureView;

/// Presentable window surface created by
/// [`Instance::create_surface`](crate::Instance::create_surface).
pub struct Surface {
    pub(crate) api: Arc<Api>,
    pub(crate) handle: HandleCell<WGPUSurfaceImpl>,
}

/// Swap chain configuration for a surface.
#[derive(Debug, Clone, Copy)]
pub struct SwapChainDescriptor {
    pub usage: TextureUsages,
    pub format: TextureFormat,
    pub width: u32,
    pub height: u32,
    pub present_mode: PresentMode,
}

/// Chain of presentable textures for one surface. Recreated on resize; the
/// native library ties its lifetime to the device, so there is no release
/// call here.
pub struct SwapChain {
    device: Arc<DeviceShared>,
    raw: WGPUSwapChain,
}

impl Surface {
    pub(crate) fn from_raw(api: Arc<Api>, raw: WGPUSurface) -> Self {
        Self {
            api,
            handle: HandleCell::new(raw),
        }
    }

    /// The format the surface prefers for presentation on this adapter.
    pub fn get_preferred_format(&self, adapter: &Adapter) -> Option<TextureFormat> {
        let raw = unsafe {
            (self.api.wgpuSurfaceGetPreferredFormat)(self.handle.get(), adapter.raw())
        };
        TextureFormat::from_raw(raw)
    }

    pub fn get_supported_formats(&self, adapter: &Adapter) -> Vec<TextureFormat> {
        let mut count: usize = 0;
        let ptr = unsafe {
            (self.api.wgpuSurfaceGetSupportedFormats)(self.handle.get(), adapter.raw(), &mut count)
        };
        copy_freed_slice(&self.api, ptr, count)
            .iter()
            .filter_map(|&raw| TextureFormat::from_raw(raw))
            .collect()
    }

    pub fn get_supported_present_modes(&self, adapter: &Adapter) -> Vec<PresentMode> {
        let mut count: usize = 0;
        let ptr = unsafe {
            (self.api.wgpuSurfaceGetSupportedPresentModes)(
                self.handle.get(),
                adapter.raw(),
                &mut count,
            )
        };
        copy_freed_slice(&self.api, ptr, count)
            .iter()
            .filter_map(|&raw| PresentMode::from_raw(raw))
            .collect()
    }
}

/// Copies a native-owned array and returns the allocation through
/// `wgpuFree`, which insists on the original size and alignment.
fn copy_freed_slice<T: Copy>(api: &Api, ptr: *mut T, count: usize) -> Vec<T> {
    if ptr.is_null() || count == 0 {
        return Vec::new();
    }
    let values = unsafe { std::slice::from_raw_parts(ptr, count) }.to_vec();
    unsafe {
        (api.wgpuFree)(
            ptr.cast(),
            count * std::mem::size_of::<T>(),
            std::mem::align_of::<T>(),
        );
    }
    values
}

impl Drop for Surface {
    fn drop(&mut self) {
        if let Some(raw) = self.handle.take() {
            unsafe { (self.api.wgpuSurfaceDrop)(raw) };
        }
    }
}

impl Device {
    pub fn create_swap_chain(
        &self,
        surface: &Surface,
        descriptor: &SwapChainDescriptor,
    ) -> Result<SwapChain> {
        let desc = WGPUSwapChainDescriptor {
            nextInChain: std::ptr::null(),
            label: std::ptr::null(),
            usage: descriptor.usage.bits(),
            format: descriptor.format.to_raw(),
            width: descriptor.width,
            height: descriptor.height,
            presentMode: descriptor.present_mode.to_raw(),
        };
        let raw = self
            .shared
            .create_scoped("SwapChain", |api, device| unsafe {
                (api.wgpuDeviceCreateSwapChain)(device, surface.handle.get(), &desc)
            })?;
        Ok(SwapChain {
            device: Arc::clone(&self.shared),
            raw,
        })
    }
}

impl SwapChain {
    /// View of the texture to render the next frame into. Fails when the
    /// surface is outdated, usually after a resize.
    pub fn get_current_texture_view(&self) -> Result<TextureView> {
        let raw = unsafe { (self.device.api.wgpuSwapChainGetCurrentTextureView)(self.raw) };
        if raw.is_null() {
            return Err(GabbroError::Acquisition {
                resource: "TextureView",
            });
        }
        Ok(TextureView::from_raw(Arc::clone(&self.device), raw))
    }

    pub fn present(&self) {
        unsafe { (self.device.api.wgpuSwapChainPresent)(self.raw) };
    }
}
