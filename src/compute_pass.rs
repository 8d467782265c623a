//! Compute pass recording

use std::sync::Arc;

use crate::bind_group::BindGroup;
use crate::buffer::Buffer;
use crate::device::DeviceShared;
use crate::handle::HandleCell;
use crate::native::*;
use crate::pipeline::ComputePipeline;

/// Records dispatches inside a command encoder. Ended explicitly by
/// [`ComputePass::end`] or implicitly on drop.
pub struct ComputePass {
    device: Arc<DeviceShared>,
    handle: HandleCell<WGPUComputePassEncoderImpl>,
}

impl ComputePass {
    pub(crate) fn from_raw(device: Arc<DeviceShared>, raw: WGPUComputePassEncoder) -> Self {
        Self {
            device,
            handle: HandleCell::new(raw),
        }
    }

    pub fn set_pipeline(&self, pipeline: &ComputePipeline) {
        unsafe {
            (self.device.api.wgpuComputePassEncoderSetPipeline)(
                self.handle.get(),
                pipeline.handle.get(),
            );
        }
    }

    pub fn set_bind_group(&self, index: u32, bind_group: &BindGroup, dynamic_offsets: &[u32]) {
        unsafe {
            (self.device.api.wgpuComputePassEncoderSetBindGroup)(
                self.handle.get(),
                index,
                bind_group.handle.get(),
                dynamic_offsets.len() as u32,
                if dynamic_offsets.is_empty() {
                    std::ptr::null()
                } else {
                    dynamic_offsets.as_ptr()
                },
            );
        }
    }

    pub fn dispatch_workgroups(&self, x: u32, y: u32, z: u32) {
        unsafe {
            (self.device.api.wgpuComputePassEncoderDispatchWorkgroups)(self.handle.get(), x, y, z);
        }
    }

    /// Workgroup counts come from three `u32`s at `indirect_offset` in
    /// `indirect_buffer`.
    pub fn dispatch_workgroups_indirect(&self, indirect_buffer: &Buffer, indirect_offset: u64) {
        unsafe {
            (self.device.api.wgpuComputePassEncoderDispatchWorkgroupsIndirect)(
                self.handle.get(),
                indirect_buffer.handle.get(),
                indirect_offset,
            );
        }
    }

    pub fn end(self) {
        if let Some(raw) = self.handle.take() {
            unsafe { (self.device.api.wgpuComputePassEncoderEnd)(raw) };
        }
    }
}

impl Drop for ComputePass {
    fn drop(&mut self) {
        if let Some(raw) = self.handle.take() {
            unsafe { (self.device.api.wgpuComputePassEncoderEnd)(raw) };
        }
    }
}
