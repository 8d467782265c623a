//! Texture management

use std::sync::Arc;

use crate::device::{Device, DeviceShared};
use crate::enums::{TextureAspect, TextureDimension, TextureFormat, TextureUsages, TextureViewDimension};
use crate::error::Result;
use crate::handle::HandleCell;
use crate::marshal::CallArena;
use crate::native::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent3d {
    pub width: u32,
    pub height: u32,
    pub depth_or_array_layers: u32,
}

impl Default for Extent3d {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            depth_or_array_layers: 1,
        }
    }
}

impl Extent3d {
    pub(crate) fn to_native(self) -> WGPUExtent3D {
        WGPUExtent3D {
            width: self.width,
            height: self.height,
            depthOrArrayLayers: self.depth_or_array_layers,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Origin3d {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Origin3d {
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    pub(crate) fn to_native(self) -> WGPUOrigin3D {
        WGPUOrigin3D {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }
}

/// Texture descriptor for creating textures
#[derive(Debug, Clone)]
pub struct TextureDescriptor<'a> {
    pub label: &'a str,
    pub size: Extent3d,
    pub mip_level_count: u32,
    pub sample_count: u32,
    pub dimension: TextureDimension,
    pub format: TextureFormat,
    pub usage: TextureUsages,
    /// Formats views of this texture may reinterpret it as.
    pub view_formats: &'a [TextureFormat],
}

impl Default for TextureDescriptor<'_> {
    fn default() -> Self {
        Self {
            label: "",
            size: Extent3d::default(),
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: TextureFormat::Rgba8Unorm,
            usage: TextureUsages::empty(),
            view_formats: &[],
        }
    }
}

/// View descriptor; zero values mean "derive from the texture".
#[derive(Debug, Clone, Default)]
pub struct TextureViewDescriptor<'a> {
    pub label: &'a str,
    pub format: Option<TextureFormat>,
    pub dimension: TextureViewDimension,
    pub base_mip_level: u32,
    pub mip_level_count: u32,
    pub base_array_layer: u32,
    pub array_layer_count: u32,
    pub aspect: TextureAspect,
}

pub struct Texture {
    pub(crate) device: Arc<DeviceShared>,
    pub(crate) handle: HandleCell<WGPUTextureImpl>,
    size: Extent3d,
    format: TextureFormat,
}

pub struct TextureView {
    pub(crate) device: Arc<DeviceShared>,
    pub(crate) handle: HandleCell<WGPUTextureViewImpl>,
}

impl Device {
    pub fn create_texture(&self, descriptor: &TextureDescriptor<'_>) -> Result<Texture> {
        let mut arena = CallArena::new();
        let (view_format_count, view_formats) = arena.slice(
            descriptor
                .view_formats
                .iter()
                .map(|f| f.to_raw())
                .collect::<Vec<_>>(),
        );
        let desc = WGPUTextureDescriptor {
            nextInChain: std::ptr::null(),
            label: arena.label(descriptor.label),
            usage: descriptor.usage.bits(),
            dimension: descriptor.dimension.to_raw(),
            size: descriptor.size.to_native(),
            format: descriptor.format.to_raw(),
            mipLevelCount: descriptor.mip_level_count,
            sampleCount: descriptor.sample_count,
            viewFormatCount: view_format_count,
            viewFormats: view_formats,
        };
        let raw = self
            .shared
            .create_scoped("Texture", |api, device| unsafe {
                (api.wgpuDeviceCreateTexture)(device, &desc)
            })?;
        Ok(Texture {
            device: Arc::clone(&self.shared),
            handle: HandleCell::new(raw),
            size: descriptor.size,
            format: descriptor.format,
        })
    }
}

impl Texture {
    pub fn size(&self) -> Extent3d {
        self.size
    }

    pub fn format(&self) -> TextureFormat {
        self.format
    }

    /// Creates a view. `None` derives every view parameter from the texture.
    pub fn create_view(&self, descriptor: Option<&TextureViewDescriptor<'_>>) -> Result<TextureView> {
        let mut arena = CallArena::new();
        let default_desc = TextureViewDescriptor::default();
        let descriptor = descriptor.unwrap_or(&default_desc);
        let desc = WGPUTextureViewDescriptor {
            nextInChain: std::ptr::null(),
            label: arena.label(descriptor.label),
            format: descriptor.format.map_or(0, |f| f.to_raw()),
            dimension: descriptor.dimension.to_raw(),
            baseMipLevel: descriptor.base_mip_level,
            mipLevelCount: descriptor.mip_level_count,
            baseArrayLayer: descriptor.base_array_layer,
            arrayLayerCount: descriptor.array_layer_count,
            aspect: descriptor.aspect.to_raw(),
        };
        let raw = unsafe { (self.device.api.wgpuTextureCreateView)(self.handle.get(), &desc) };
        if raw.is_null() {
            return Err(crate::error::GabbroError::Acquisition {
                resource: "TextureView",
            });
        }
        Ok(TextureView {
            device: Arc::clone(&self.device),
            handle: HandleCell::new(raw),
        })
    }

    /// Frees the backing memory now; the wrapper stays valid, later GPU use
    /// is a validation error.
    pub fn destroy(&self) {
        unsafe { (self.device.api.wgpuTextureDestroy)(self.handle.get()) };
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        if let Some(raw) = self.handle.take() {
            unsafe { (self.device.api.wgpuTextureDrop)(raw) };
        }
    }
}

impl TextureView {
    pub(crate) fn from_raw(device: Arc<DeviceShared>, raw: WGPUTextureView) -> Self {
        Self {
            device,
            handle: HandleCell::new(raw),
        }
    }
}

impl Drop for TextureView {
    fn drop(&mut self) {
        if let Some(raw) = self.handle.take() {
            unsafe { (self.device.api.wgpuTextureViewDrop)(raw) };
        }
    }
}
