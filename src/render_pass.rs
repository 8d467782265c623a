//! Render pass recording

use std::sync::Arc;

use crate::bind_group::BindGroup;
use crate::buffer::{size_or_whole, Buffer};
use crate::command::CommandEncoder;
use crate::device::DeviceShared;
use crate::enums::{IndexFormat, LoadOp, ShaderStages, StoreOp};
use crate::error::{GabbroError, Result};
use crate::handle::HandleCell;
use crate::marshal::CallArena;
use crate::native::*;
use crate::pipeline::RenderPipeline;
use crate::texture::TextureView;

/// Double-precision RGBA used for clears and the blend constant.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const TRANSPARENT: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };

    pub(crate) fn to_native(self) -> WGPUColor {
        WGPUColor {
            r: self.r,
            g: self.g,
            b: self.b,
            a: self.a,
        }
    }
}

pub struct RenderPassColorAttachment<'a> {
    pub view: &'a TextureView,
    /// Multisample resolve destination.
    pub resolve_target: Option<&'a TextureView>,
    pub load_op: LoadOp,
    pub store_op: StoreOp,
    pub clear_value: Color,
}

pub struct RenderPassDepthStencilAttachment<'a> {
    pub view: &'a TextureView,
    pub depth_load_op: LoadOp,
    pub depth_store_op: StoreOp,
    pub depth_clear_value: f32,
    pub depth_read_only: bool,
    pub stencil_load_op: LoadOp,
    pub stencil_store_op: StoreOp,
    pub stencil_clear_value: u32,
    pub stencil_read_only: bool,
}

pub struct RenderPassDescriptor<'a> {
    pub label: &'a str,
    pub color_attachments: &'a [RenderPassColorAttachment<'a>],
    pub depth_stencil_attachment: Option<RenderPassDepthStencilAttachment<'a>>,
}

/// Records draws inside a command encoder. Ended explicitly by
/// [`RenderPass::end`] or implicitly on drop.
pub struct RenderPass {
    device: Arc<DeviceShared>,
    handle: HandleCell<WGPURenderPassEncoderImpl>,
}

pub(crate) fn begin(
    encoder: &CommandEncoder,
    descriptor: &RenderPassDescriptor<'_>,
) -> Result<RenderPass> {
    let mut arena = CallArena::new();
    let (color_count, colors) = arena.slice(
        descriptor
            .color_attachments
            .iter()
            .map(|a| WGPURenderPassColorAttachment {
                view: a.view.handle.get(),
                resolveTarget: a
                    .resolve_target
                    .map_or(std::ptr::null_mut(), |v| v.handle.get()),
                loadOp: a.load_op.to_raw(),
                storeOp: a.store_op.to_raw(),
                clearValue: a.clear_value.to_native(),
            })
            .collect::<Vec<_>>(),
    );
    let depth_stencil = match &descriptor.depth_stencil_attachment {
        Some(ds) => arena.alloc(WGPURenderPassDepthStencilAttachment {
            view: ds.view.handle.get(),
            depthLoadOp: ds.depth_load_op.to_raw(),
            depthStoreOp: ds.depth_store_op.to_raw(),
            depthClearValue: ds.depth_clear_value,
            depthReadOnly: ds.depth_read_only,
            stencilLoadOp: ds.stencil_load_op.to_raw(),
            stencilStoreOp: ds.stencil_store_op.to_raw(),
            stencilClearValue: ds.stencil_clear_value,
            stencilReadOnly: ds.stencil_read_only,
        }),
        None => std::ptr::null(),
    };
    let desc = WGPURenderPassDescriptor {
        nextInChain: std::ptr::null(),
        label: arena.label(descriptor.label),
        colorAttachmentCount: color_count,
        colorAttachments: colors,
        depthStencilAttachment: depth_stencil,
        occlusionQuerySet: std::ptr::null_mut(),
        timestampWriteCount: 0,
        timestampWrites: std::ptr::null(),
    };
    let raw = unsafe {
        (encoder.device.api.wgpuCommandEncoderBeginRenderPass)(encoder.handle.get(), &desc)
    };
    if raw.is_null() {
        return Err(GabbroError::Acquisition {
            resource: "RenderPass",
        });
    }
    Ok(RenderPass {
        device: Arc::clone(&encoder.device),
        handle: HandleCell::new(raw),
    })
}

impl RenderPass {
    pub fn set_pipeline(&self, pipeline: &RenderPipeline) {
        unsafe {
            (self.device.api.wgpuRenderPassEncoderSetPipeline)(
                self.handle.get(),
                pipeline.handle.get(),
            );
        }
    }

    pub fn set_bind_group(&self, index: u32, bind_group: &BindGroup, dynamic_offsets: &[u32]) {
        unsafe {
            (self.device.api.wgpuRenderPassEncoderSetBindGroup)(
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

    /// Binds `buffer[offset..offset + size]` to vertex input `slot`. A `size`
    /// of 0 binds to the end of the buffer.
    pub fn set_vertex_buffer(&self, slot: u32, buffer: &Buffer, offset: u64, size: u64) {
        let size = size_or_whole(size);
        unsafe {
            (self.device.api.wgpuRenderPassEncoderSetVertexBuffer)(
                self.handle.get(),
                slot,
                buffer.handle.get(),
                offset,
                size,
            );
        }
    }

    pub fn set_index_buffer(&self, buffer: &Buffer, format: IndexFormat, offset: u64, size: u64) {
        let size = size_or_whole(size);
        unsafe {
            (self.device.api.wgpuRenderPassEncoderSetIndexBuffer)(
                self.handle.get(),
                buffer.handle.get(),
                format.to_raw(),
                offset,
                size,
            );
        }
    }

    /// Writes `data` into the push constant window at `offset`. Both must
    /// respect 4-byte alignment.
    pub fn set_push_constants(&self, stages: ShaderStages, offset: u32, data: &[u8]) {
        unsafe {
            (self.device.api.wgpuRenderPassEncoderSetPushConstants)(
                self.handle.get(),
                stages.bits(),
                offset,
                data.len() as u32,
                data.as_ptr().cast(),
            );
        }
    }

    pub fn set_viewport(&self, x: f32, y: f32, width: f32, height: f32, min_depth: f32, max_depth: f32) {
        unsafe {
            (self.device.api.wgpuRenderPassEncoderSetViewport)(
                self.handle.get(),
                x,
                y,
                width,
                height,
                min_depth,
                max_depth,
            );
        }
    }

    pub fn set_scissor_rect(&self, x: u32, y: u32, width: u32, height: u32) {
        unsafe {
            (self.device.api.wgpuRenderPassEncoderSetScissorRect)(
                self.handle.get(),
                x,
                y,
                width,
                height,
            );
        }
    }

    pub fn set_blend_constant(&self, color: Color) {
        let color = color.to_native();
        unsafe {
            (self.device.api.wgpuRenderPassEncoderSetBlendConstant)(self.handle.get(), &color);
        }
    }

    pub fn set_stencil_reference(&self, reference: u32) {
        unsafe {
            (self.device.api.wgpuRenderPassEncoderSetStencilReference)(self.handle.get(), reference);
        }
    }

    pub fn draw(&self, vertices: std::ops::Range<u32>, instances: std::ops::Range<u32>) {
        unsafe {
            (self.device.api.wgpuRenderPassEncoderDraw)(
                self.handle.get(),
                vertices.end - vertices.start,
                instances.end - instances.start,
                vertices.start,
                instances.start,
            );
        }
    }

    pub fn draw_indexed(
        &self,
        indices: std::ops::Range<u32>,
        base_vertex: i32,
        instances: std::ops::Range<u32>,
    ) {
        unsafe {
            (self.device.api.wgpuRenderPassEncoderDrawIndexed)(
                self.handle.get(),
                indices.end - indices.start,
                instances.end - instances.start,
                indices.start,
                base_vertex,
                instances.start,
            );
        }
    }

    pub fn draw_indirect(&self, indirect_buffer: &Buffer, indirect_offset: u64) {
        unsafe {
            (self.device.api.wgpuRenderPassEncoderDrawIndirect)(
                self.handle.get(),
                indirect_buffer.handle.get(),
                indirect_offset,
            );
        }
    }

    pub fn draw_indexed_indirect(&self, indirect_buffer: &Buffer, indirect_offset: u64) {
        unsafe {
            (self.device.api.wgpuRenderPassEncoderDrawIndexedIndirect)(
                self.handle.get(),
                indirect_buffer.handle.get(),
                indirect_offset,
            );
        }
    }

    pub fn end(self) {
        if let Some(raw) = self.handle.take() {
            unsafe { (self.device.api.wgpuRenderPassEncoderEnd)(raw) };
        }
    }
}

impl Drop for RenderPass {
    fn drop(&mut self) {
        if let Some(raw) = self.handle.take() {
            unsafe { (self.device.api.wgpuRenderPassEncoderEnd)(raw) };
        }
    }
}
