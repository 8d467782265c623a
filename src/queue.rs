//! Queue submission and data uploads

use std::sync::Arc;

use smallvec::SmallVec;

use crate::buffer::Buffer;
use crate::command::{CommandBuffer, ImageCopyTexture, TextureDataLayout};
use crate::device::{DeviceShared, SubmissionIndex};
use crate::native::*;
use crate::texture::Extent3d;

/// The device's command queue. Obtained through
/// [`Device::queue`](crate::Device::queue); not independently destroyed.
pub struct Queue {
    device: Arc<DeviceShared>,
    raw: WGPUQueue,
}

impl Queue {
    pub(crate) fn from_raw(device: Arc<DeviceShared>, raw: WGPUQueue) -> Self {
        Self { device, raw }
    }

    /// Submits finished command buffers and releases them. The returned index
    /// can be handed to [`Device::poll`](crate::Device::poll) to wait for
    /// this submission.
    pub fn submit(&self, command_buffers: impl IntoIterator<Item = CommandBuffer>) -> SubmissionIndex {
        let buffers: SmallVec<[CommandBuffer; 4]> = command_buffers.into_iter().collect();
        let raw_buffers: SmallVec<[WGPUCommandBuffer; 4]> =
            buffers.iter().map(|b| b.handle.get()).collect();
        let index = unsafe {
            (self.device.api.wgpuQueueSubmitForIndex)(
                self.raw,
                raw_buffers.len() as u32,
                if raw_buffers.is_empty() {
                    std::ptr::null()
                } else {
                    raw_buffers.as_ptr()
                },
            )
        };
        drop(buffers);
        SubmissionIndex {
            raw: WGPUWrappedSubmissionIndex {
                queue: self.raw,
                submissionIndex: index,
            },
        }
    }

    /// Schedules a write of `data` into the buffer at `offset`. The copy is
    /// enqueued before any previously submitted work runs; `data` is read
    /// before the call returns.
    pub fn write_buffer(&self, buffer: &Buffer, offset: u64, data: &[u8]) {
        unsafe {
            (self.device.api.wgpuQueueWriteBuffer)(
                self.raw,
                buffer.handle.get(),
                offset,
                data.as_ptr().cast(),
                data.len(),
            );
        }
    }

    /// Schedules a write of texel `data` into a texture region.
    pub fn write_texture(
        &self,
        destination: &ImageCopyTexture<'_>,
        data: &[u8],
        layout: TextureDataLayout,
        size: Extent3d,
    ) {
        let destination = destination.to_native();
        let layout = layout.to_native();
        let size = size.to_native();
        unsafe {
            (self.device.api.wgpuQueueWriteTexture)(
                self.raw,
                &destination,
                data.as_ptr().cast(),
                data.len(),
                &layout,
                &size,
            );
        }
    }
}
