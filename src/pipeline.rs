//! Shader modules, pipeline layouts and pipelines.

use std::ops::Range;
use std::sync::Arc;

use crate::bind_group::BindGroupLayout;
use crate::device::{Device, DeviceShared};
use crate::enums::{
    BlendFactor, BlendOperation, ColorWrites, CompareFunction, CullMode, FrontFace, IndexFormat,
    PrimitiveTopology, ShaderStages, StencilOperation, TextureFormat, VertexFormat, VertexStepMode,
};
use crate::error::Result;
use crate::handle::HandleCell;
use crate::marshal::CallArena;
use crate::native::*;

/// Shader text or binary handed to the native compiler.
pub enum ShaderSource<'a> {
    Wgsl(&'a str),
    SpirV(&'a [u32]),
}

pub struct ShaderModuleDescriptor<'a> {
    pub label: &'a str,
    pub source: ShaderSource<'a>,
}

/// Push constant window visible to the given stages.
#[derive(Debug, Clone)]
pub struct PushConstantRange {
    pub stages: ShaderStages,
    pub range: Range<u32>,
}

#[derive(Default)]
pub struct PipelineLayoutDescriptor<'a> {
    pub label: &'a str,
    pub bind_group_layouts: &'a [&'a BindGroupLayout],
    pub push_constant_ranges: &'a [PushConstantRange],
}

pub struct ComputePipelineDescriptor<'a> {
    pub label: &'a str,
    /// `None` lets the native library derive a layout from the shader.
    pub layout: Option<&'a PipelineLayout>,
    pub module: &'a ShaderModule,
    pub entry_point: &'a str,
}

#[derive(Debug, Clone, Copy)]
pub struct VertexAttribute {
    pub format: VertexFormat,
    pub offset: u64,
    pub shader_location: u32,
}

pub struct VertexBufferLayout<'a> {
    pub array_stride: u64,
    pub step_mode: VertexStepMode,
    pub attributes: &'a [VertexAttribute],
}

pub struct VertexState<'a> {
    pub module: &'a ShaderModule,
    pub entry_point: &'a str,
    pub buffers: &'a [VertexBufferLayout<'a>],
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PrimitiveState {
    pub topology: PrimitiveTopology,
    pub strip_index_format: IndexFormat,
    pub front_face: FrontFace,
    pub cull_mode: CullMode,
}

#[derive(Debug, Clone, Copy)]
pub struct StencilFaceState {
    pub compare: CompareFunction,
    pub fail_op: StencilOperation,
    pub depth_fail_op: StencilOperation,
    pub pass_op: StencilOperation,
}

impl StencilFaceState {
    pub const IGNORE: Self = Self {
        compare: CompareFunction::Always,
        fail_op: StencilOperation::Keep,
        depth_fail_op: StencilOperation::Keep,
        pass_op: StencilOperation::Keep,
    };

    fn to_native(self) -> WGPUStencilFaceState {
        WGPUStencilFaceState {
            compare: self.compare.to_raw(),
            failOp: self.fail_op.to_raw(),
            depthFailOp: self.depth_fail_op.to_raw(),
            passOp: self.pass_op.to_raw(),
        }
    }
}

impl Default for StencilFaceState {
    fn default() -> Self {
        Self::IGNORE
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DepthStencilState {
    pub format: TextureFormat,
    pub depth_write_enabled: bool,
    pub depth_compare: CompareFunction,
    pub stencil_front: StencilFaceState,
    pub stencil_back: StencilFaceState,
    pub stencil_read_mask: u32,
    pub stencil_write_mask: u32,
    pub depth_bias: i32,
    pub depth_bias_slope_scale: f32,
    pub depth_bias_clamp: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct MultisampleState {
    pub count: u32,
    pub mask: u32,
    pub alpha_to_coverage_enabled: bool,
}

impl Default for MultisampleState {
    fn default() -> Self {
        Self {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BlendComponent {
    pub operation: BlendOperation,
    pub src_factor: BlendFactor,
    pub dst_factor: BlendFactor,
}

impl BlendComponent {
    pub const REPLACE: Self = Self {
        operation: BlendOperation::Add,
        src_factor: BlendFactor::One,
        dst_factor: BlendFactor::Zero,
    };

    pub const OVER: Self = Self {
        operation: BlendOperation::Add,
        src_factor: BlendFactor::One,
        dst_factor: BlendFactor::OneMinusSrcAlpha,
    };

    fn to_native(self) -> WGPUBlendComponent {
        WGPUBlendComponent {
            operation: self.operation.to_raw(),
            srcFactor: self.src_factor.to_raw(),
            dstFactor: self.dst_factor.to_raw(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BlendState {
    pub color: BlendComponent,
    pub alpha: BlendComponent,
}

impl BlendState {
    pub const REPLACE: Self = Self {
        color: BlendComponent::REPLACE,
        alpha: BlendComponent::REPLACE,
    };

    pub const ALPHA_BLENDING: Self = Self {
        color: BlendComponent {
            operation: BlendOperation::Add,
            src_factor: BlendFactor::SrcAlpha,
            dst_factor: BlendFactor::OneMinusSrcAlpha,
        },
        alpha: BlendComponent::OVER,
    };

    pub const PREMULTIPLIED_ALPHA_BLENDING: Self = Self {
        color: BlendComponent::OVER,
        alpha: BlendComponent::OVER,
    };
}

#[derive(Debug, Clone, Copy)]
pub struct ColorTargetState {
    pub format: TextureFormat,
    pub blend: Option<BlendState>,
    pub write_mask: ColorWrites,
}

pub struct FragmentState<'a> {
    pub module: &'a ShaderModule,
    pub entry_point: &'a str,
    pub targets: &'a [ColorTargetState],
}

pub struct RenderPipelineDescriptor<'a> {
    pub label: &'a str,
    pub layout: Option<&'a PipelineLayout>,
    pub vertex: VertexState<'a>,
    pub primitive: PrimitiveState,
    pub depth_stencil: Option<DepthStencilState>,
    pub multisample: MultisampleState,
    pub fragment: Option<FragmentState<'a>>,
}

pub struct ShaderModule {
    pub(crate) device: Arc<DeviceShared>,
    pub(crate) handle: HandleCell<WGPUShaderModuleImpl>,
}

pub struct PipelineLayout {
    pub(crate) device: Arc<DeviceShared>,
    pub(crate) handle: HandleCell<WGPUPipelineLayoutImpl>,
}

pub struct ComputePipeline {
    pub(crate) device: Arc<DeviceShared>,
    pub(crate) handle: HandleCell<WGPUComputePipelineImpl>,
}

pub struct RenderPipeline {
    pub(crate) device: Arc<DeviceShared>,
    pub(crate) handle: HandleCell<WGPURenderPipelineImpl>,
}

impl Device {
    pub fn create_shader_module(
        &self,
        descriptor: &ShaderModuleDescriptor<'_>,
    ) -> Result<ShaderModule> {
        let mut arena = CallArena::new();
        let chain = match descriptor.source {
            ShaderSource::Wgsl(code) => {
                let code = arena.cstr(code);
                arena
                    .alloc(WGPUShaderModuleWGSLDescriptor {
                        chain: WGPUChainedStruct {
                            next: std::ptr::null(),
                            sType: WGPUSType_ShaderModuleWGSLDescriptor,
                        },
                        code,
                    })
                    .cast::<WGPUChainedStruct>()
            }
            ShaderSource::SpirV(words) => {
                let (code_size, code) = arena.slice(words.to_vec());
                arena
                    .alloc(WGPUShaderModuleSPIRVDescriptor {
                        chain: WGPUChainedStruct {
                            next: std::ptr::null(),
                            sType: WGPUSType_ShaderModuleSPIRVDescriptor,
                        },
                        codeSize: code_size,
                        code,
                    })
                    .cast()
            }
        };
        let desc = WGPUShaderModuleDescriptor {
            nextInChain: chain,
            label: arena.label(descriptor.label),
            hintCount: 0,
            hints: std::ptr::null(),
        };
        let raw = self
            .shared
            .create_scoped("ShaderModule", |api, device| unsafe {
                (api.wgpuDeviceCreateShaderModule)(device, &desc)
            })?;
        Ok(ShaderModule {
            device: Arc::clone(&self.shared),
            handle: HandleCell::new(raw),
        })
    }

    pub fn create_pipeline_layout(
        &self,
        descriptor: &PipelineLayoutDescriptor<'_>,
    ) -> Result<PipelineLayout> {
        let mut arena = CallArena::new();
        let (layout_count, layouts) = arena.slice(
            descriptor
                .bind_group_layouts
                .iter()
                .map(|l| l.handle.get())
                .collect::<Vec<_>>(),
        );
        let next_in_chain = if descriptor.push_constant_ranges.is_empty() {
            std::ptr::null()
        } else {
            let (range_count, ranges) = arena.slice(
                descriptor
                    .push_constant_ranges
                    .iter()
                    .map(|r| WGPUPushConstantRange {
                        stages: r.stages.bits(),
                        start: r.range.start,
                        end: r.range.end,
                    })
                    .collect::<Vec<_>>(),
            );
            arena
                .alloc(WGPUPipelineLayoutExtras {
                    chain: WGPUChainedStruct {
                        next: std::ptr::null(),
                        sType: WGPUSType_PipelineLayoutExtras,
                    },
                    pushConstantRangeCount: range_count,
                    pushConstantRanges: ranges,
                })
                .cast()
        };
        let desc = WGPUPipelineLayoutDescriptor {
            nextInChain: next_in_chain,
            label: arena.label(descriptor.label),
            bindGroupLayoutCount: layout_count,
            bindGroupLayouts: layouts,
        };
        let raw = self
            .shared
            .create_scoped("PipelineLayout", |api, device| unsafe {
                (api.wgpuDeviceCreatePipelineLayout)(device, &desc)
            })?;
        Ok(PipelineLayout {
            device: Arc::clone(&self.shared),
            handle: HandleCell::new(raw),
        })
    }

    pub fn create_compute_pipeline(
        &self,
        descriptor: &ComputePipelineDescriptor<'_>,
    ) -> Result<ComputePipeline> {
        let mut arena = CallArena::new();
        let desc = WGPUComputePipelineDescriptor {
            nextInChain: std::ptr::null(),
            label: arena.label(descriptor.label),
            layout: descriptor
                .layout
                .map_or(std::ptr::null_mut(), |l| l.handle.get()),
            compute: WGPUProgrammableStageDescriptor {
                nextInChain: std::ptr::null(),
                module: descriptor.module.handle.get(),
                entryPoint: arena.cstr(descriptor.entry_point),
                constantCount: 0,
                constants: std::ptr::null(),
            },
        };
        let raw = self
            .shared
            .create_scoped("ComputePipeline", |api, device| unsafe {
                (api.wgpuDeviceCreateComputePipeline)(device, &desc)
            })?;
        Ok(ComputePipeline {
            device: Arc::clone(&self.shared),
            handle: HandleCell::new(raw),
        })
    }

    pub fn create_render_pipeline(
        &self,
        descriptor: &RenderPipelineDescriptor<'_>,
    ) -> Result<RenderPipeline> {
        let mut arena = CallArena::new();

        let native_buffers = descriptor
            .vertex
            .buffers
            .iter()
            .map(|buffer| {
                let (attribute_count, attributes) = arena.slice(
                    buffer
                        .attributes
                        .iter()
                        .map(|a| WGPUVertexAttribute {
                            format: a.format.to_raw(),
                            offset: a.offset,
                            shaderLocation: a.shader_location,
                        })
                        .collect::<Vec<_>>(),
                );
                WGPUVertexBufferLayout {
                    arrayStride: buffer.array_stride,
                    stepMode: buffer.step_mode.to_raw(),
                    attributeCount: attribute_count,
                    attributes,
                }
            })
            .collect::<Vec<_>>();
        let (buffer_count, buffers) = arena.slice(native_buffers);

        let depth_stencil = match &descriptor.depth_stencil {
            Some(ds) => arena.alloc(WGPUDepthStencilState {
                nextInChain: std::ptr::null(),
                format: ds.format.to_raw(),
                depthWriteEnabled: ds.depth_write_enabled,
                depthCompare: ds.depth_compare.to_raw(),
                stencilFront: ds.stencil_front.to_native(),
                stencilBack: ds.stencil_back.to_native(),
                stencilReadMask: ds.stencil_read_mask,
                stencilWriteMask: ds.stencil_write_mask,
                depthBias: ds.depth_bias,
                depthBiasSlopeScale: ds.depth_bias_slope_scale,
                depthBiasClamp: ds.depth_bias_clamp,
            }),
            None => std::ptr::null(),
        };

        let fragment = match &descriptor.fragment {
            Some(fragment) => {
                let native_targets = fragment
                    .targets
                    .iter()
                    .map(|target| WGPUColorTargetState {
                        nextInChain: std::ptr::null(),
                        format: target.format.to_raw(),
                        blend: match target.blend {
                            Some(blend) => arena.alloc(WGPUBlendState {
                                color: blend.color.to_native(),
                                alpha: blend.alpha.to_native(),
                            }),
                            None => std::ptr::null(),
                        },
                        writeMask: target.write_mask.bits(),
                    })
                    .collect::<Vec<_>>();
                let (target_count, targets) = arena.slice(native_targets);
                let entry_point = arena.cstr(fragment.entry_point);
                arena.alloc(WGPUFragmentState {
                    nextInChain: std::ptr::null(),
                    module: fragment.module.handle.get(),
                    entryPoint: entry_point,
                    constantCount: 0,
                    constants: std::ptr::null(),
                    targetCount: target_count,
                    targets,
                })
            }
            None => std::ptr::null(),
        };

        let desc = WGPURenderPipelineDescriptor {
            nextInChain: std::ptr::null(),
            label: arena.label(descriptor.label),
            layout: descriptor
                .layout
                .map_or(std::ptr::null_mut(), |l| l.handle.get()),
            vertex: WGPUVertexState {
                nextInChain: std::ptr::null(),
                module: descriptor.vertex.module.handle.get(),
                entryPoint: arena.cstr(descriptor.vertex.entry_point),
                constantCount: 0,
                constants: std::ptr::null(),
                bufferCount: buffer_count,
                buffers,
            },
            primitive: WGPUPrimitiveState {
                nextInChain: std::ptr::null(),
                topology: descriptor.primitive.topology.to_raw(),
                stripIndexFormat: descriptor.primitive.strip_index_format.to_raw(),
                frontFace: descriptor.primitive.front_face.to_raw(),
                cullMode: descriptor.primitive.cull_mode.to_raw(),
            },
            depthStencil: depth_stencil,
            multisample: WGPUMultisampleState {
                nextInChain: std::ptr::null(),
                count: descriptor.multisample.count,
                mask: descriptor.multisample.mask,
                alphaToCoverageEnabled: descriptor.multisample.alpha_to_coverage_enabled,
            },
            fragment,
        };
        let raw = self
            .shared
            .create_scoped("RenderPipeline", |api, device| unsafe {
                (api.wgpuDeviceCreateRenderPipeline)(device, &desc)
            })?;
        Ok(RenderPipeline {
            device: Arc::clone(&self.shared),
            handle: HandleCell::new(raw),
        })
    }
}

impl ComputePipeline {
    /// The layout the native library derived (or was given) for `group`.
    pub fn get_bind_group_layout(&self, group: u32) -> Result<BindGroupLayout> {
        let raw = unsafe {
            (self.device.api.wgpuComputePipelineGetBindGroupLayout)(self.handle.get(), group)
        };
        if raw.is_null() {
            return Err(crate::error::GabbroError::Acquisition {
                resource: "BindGroupLayout",
            });
        }
        Ok(BindGroupLayout::from_raw(Arc::clone(&self.device), raw))
    }
}

impl RenderPipeline {
    pub fn get_bind_group_layout(&self, group: u32) -> Result<BindGroupLayout> {
        let raw = unsafe {
            (self.device.api.wgpuRenderPipelineGetBindGroupLayout)(self.handle.get(), group)
        };
        if raw.is_null() {
            return Err(crate::error::GabbroError::Acquisition {
                resource: "BindGroupLayout",
            });
        }
        Ok(BindGroupLayout::from_raw(Arc::clone(&self.device), raw))
    }
}

impl Drop for ShaderModule {
    fn drop(&mut self) {
        if let Some(raw) = self.handle.take() {
            unsafe { (self.device.api.wgpuShaderModuleDrop)(raw) };
        }
    }
}

impl Drop for PipelineLayout {
    fn drop(&mut self) {
        if let Some(raw) = self.handle.take() {
            unsafe { (self.device.api.wgpuPipelineLayoutDrop)(raw) };
        }
    }
}

impl Drop for ComputePipeline {
    fn drop(&mut self) {
        if let Some(raw) = self.handle.take() {
            unsafe { (self.device.api.wgpuComputePipelineDrop)(raw) };
        }
    }
}

impl Drop for RenderPipeline {
    fn drop(&mut self) {
        if let Some(raw) = self.handle.take() {
            unsafe { (self.device.api.wgpuRenderPipelineDrop)(raw) };
        }
    }
}
