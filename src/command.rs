//! Command encoding
//!
//! A [`CommandEncoder`] records copies and passes into a [`CommandBuffer`]
//! that the queue later submits.

use std::sync::Arc;

use crate::buffer::{size_or_whole, Buffer};
use crate::compute_pass::ComputePass;
use crate::device::{Device, DeviceShared};
use crate::enums::TextureAspect;
use crate::error::{GabbroError, Result};
use crate::handle::HandleCell;
use crate::marshal::CallArena;
use crate::native::*;
use crate::render_pass::{RenderPass, RenderPassDescriptor};
use crate::texture::{Extent3d, Origin3d, Texture};

/// Row layout of texel data living in a buffer or host slice.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextureDataLayout {
    pub offset: u64,
    /// 0 is allowed for copies spanning a single row.
    pub bytes_per_row: u32,
    /// 0 is allowed for copies spanning a single image.
    pub rows_per_image: u32,
}

impl TextureDataLayout {
    pub(crate) fn to_native(self) -> WGPUTextureDataLayout {
        WGPUTextureDataLayout {
            nextInChain: std::ptr::null(),
            offset: self.offset,
            bytesPerRow: self.bytes_per_row,
            rowsPerImage: self.rows_per_image,
        }
    }
}

pub struct ImageCopyBuffer<'a> {
    pub buffer: &'a Buffer,
    pub layout: TextureDataLayout,
}

pub struct ImageCopyTexture<'a> {
    pub texture: &'a Texture,
    pub mip_level: u32,
    pub origin: Origin3d,
    pub aspect: TextureAspect,
}

impl ImageCopyTexture<'_> {
    pub(crate) fn to_native(&self) -> WGPUImageCopyTexture {
        WGPUImageCopyTexture {
            nextInChain: std::ptr::null(),
            texture: self.texture.handle.get(),
            mipLevel: self.mip_level,
            origin: self.origin.to_native(),
            aspect: self.aspect.to_raw(),
        }
    }
}

impl ImageCopyBuffer<'_> {
    pub(crate) fn to_native(&self) -> WGPUImageCopyBuffer {
        WGPUImageCopyBuffer {
            nextInChain: std::ptr::null(),
            layout: self.layout.to_native(),
            buffer: self.buffer.handle.get(),
        }
    }
}

pub struct CommandEncoder {
    pub(crate) device: Arc<DeviceShared>,
    pub(crate) handle: HandleCell<WGPUCommandEncoderImpl>,
}

/// Finished recording, ready for [`Queue::submit`](crate::Queue::submit).
pub struct CommandBuffer {
    pub(crate) device: Arc<DeviceShared>,
    pub(crate) handle: HandleCell<WGPUCommandBufferImpl>,
}

impl Device {
    pub fn create_command_encoder(&self, label: &str) -> Result<CommandEncoder> {
        let mut arena = CallArena::new();
        let desc = WGPUCommandEncoderDescriptor {
            nextInChain: std::ptr::null(),
            label: arena.label(label),
        };
        let raw = self
            .shared
            .create_scoped("CommandEncoder", |api, device| unsafe {
                (api.wgpuDeviceCreateCommandEncoder)(device, &desc)
            })?;
        Ok(CommandEncoder {
            device: Arc::clone(&self.shared),
            handle: HandleCell::new(raw),
        })
    }
}

impl CommandEncoder {
    pub fn begin_compute_pass(&self, label: &str) -> Result<ComputePass> {
        let mut arena = CallArena::new();
        let desc = WGPUComputePassDescriptor {
            nextInChain: std::ptr::null(),
            label: arena.label(label),
            timestampWriteCount: 0,
            timestampWrites: std::ptr::null(),
        };
        let raw =
            unsafe { (self.device.api.wgpuCommandEncoderBeginComputePass)(self.handle.get(), &desc) };
        if raw.is_null() {
            return Err(GabbroError::Acquisition {
                resource: "ComputePass",
            });
        }
        Ok(ComputePass::from_raw(Arc::clone(&self.device), raw))
    }

    pub fn begin_render_pass(&self, descriptor: &RenderPassDescriptor<'_>) -> Result<RenderPass> {
        crate::render_pass::begin(self, descriptor)
    }

    pub fn copy_buffer_to_buffer(
        &self,
        source: &Buffer,
        source_offset: u64,
        destination: &Buffer,
        destination_offset: u64,
        size: u64,
    ) {
        unsafe {
            (self.device.api.wgpuCommandEncoderCopyBufferToBuffer)(
                self.handle.get(),
                source.handle.get(),
                source_offset,
                destination.handle.get(),
                destination_offset,
                size,
            );
        }
    }

    pub fn copy_buffer_to_texture(
        &self,
        source: &ImageCopyBuffer<'_>,
        destination: &ImageCopyTexture<'_>,
        copy_size: Extent3d,
    ) {
        let source = source.to_native();
        let destination = destination.to_native();
        let copy_size = copy_size.to_native();
        unsafe {
            (self.device.api.wgpuCommandEncoderCopyBufferToTexture)(
                self.handle.get(),
                &source,
                &destination,
                &copy_size,
            );
        }
    }

    pub fn copy_texture_to_buffer(
        &self,
        source: &ImageCopyTexture<'_>,
        destination: &ImageCopyBuffer<'_>,
        copy_size: Extent3d,
    ) {
        let source = source.to_native();
        let destination = destination.to_native();
        let copy_size = copy_size.to_native();
        unsafe {
            (self.device.api.wgpuCommandEncoderCopyTextureToBuffer)(
                self.handle.get(),
                &source,
                &destination,
                &copy_size,
            );
        }
    }

    pub fn copy_texture_to_texture(
        &self,
        source: &ImageCopyTexture<'_>,
        destination: &ImageCopyTexture<'_>,
        copy_size: Extent3d,
    ) {
        let source = source.to_native();
        let destination = destination.to_native();
        let copy_size = copy_size.to_native();
        unsafe {
            (self.device.api.wgpuCommandEncoderCopyTextureToTexture)(
                self.handle.get(),
                &source,
                &destination,
                &copy_size,
            );
        }
    }

    /// Fills `size` bytes from `offset` with zeroes. A `size` of 0 clears to
    /// the end of the buffer.
    pub fn clear_buffer(&self, buffer: &Buffer, offset: u64, size: u64) {
        let size = size_or_whole(size);
        unsafe {
            (self.device.api.wgpuCommandEncoderClearBuffer)(
                self.handle.get(),
                buffer.handle.get(),
                offset,
                size,
            );
        }
    }

    pub fn insert_debug_marker(&self, label: &str) {
        let mut arena = CallArena::new();
        unsafe {
            (self.device.api.wgpuCommandEncoderInsertDebugMarker)(
                self.handle.get(),
                arena.cstr(label),
            );
        }
    }

    pub fn push_debug_group(&self, label: &str) {
        let mut arena = CallArena::new();
        unsafe {
            (self.device.api.wgpuCommandEncoderPushDebugGroup)(self.handle.get(), arena.cstr(label));
        }
    }

    pub fn pop_debug_group(&self) {
        unsafe { (self.device.api.wgpuCommandEncoderPopDebugGroup)(self.handle.get()) };
    }

    /// Ends recording. Finishing consumes the native encoder, so the wrapper
    /// goes with it.
    pub fn finish(self, label: &str) -> Result<CommandBuffer> {
        let raw_encoder = self.handle.take().ok_or(GabbroError::Acquisition {
            resource: "CommandEncoder",
        })?;
        let mut arena = CallArena::new();
        let desc = WGPUCommandBufferDescriptor {
            nextInChain: std::ptr::null(),
            label: arena.label(label),
        };
        let raw = unsafe { (self.device.api.wgpuCommandEncoderFinish)(raw_encoder, &desc) };
        if raw.is_null() {
            return Err(GabbroError::Acquisition {
                resource: "CommandBuffer",
            });
        }
        Ok(CommandBuffer {
            device: Arc::clone(&self.device),
            handle: HandleCell::new(raw),
        })
    }
}

impl Drop for CommandEncoder {
    fn drop(&mut self) {
        // Only reached when the encoder was never finished.
        if let Some(raw) = self.handle.take() {
            unsafe { (self.device.api.wgpuCommandEncoderDrop)(raw) };
        }
    }
}

impl Drop for CommandBuffer {
    fn drop(&mut self) {
        if let Some(raw) = self.handle.take() {
            unsafe { (self.device.api.wgpuCommandBufferDrop)(raw) };
        }
    }
}
