//! Safe Rust bindings over the `wgpu_native` C library.
//!
//! The native library is reached either through normal linking (feature
//! `link`) or by loading a shared library at runtime (feature `dlopen`,
//! the default). Everything starts at [`Instance`]: request an [`Adapter`],
//! open a [`Device`], then create resources and record work through the
//! usual WebGPU object graph.
//!
//! Wrapper types own their native handle and release it on drop. Resource
//! creation runs inside a native validation error scope, so a bad
//! descriptor surfaces as an `Err` on the creating call instead of a
//! global error hook.

mod adapter;
mod bind_group;
mod buffer;
mod callback;
mod command;
mod compute_pass;
mod device;
mod enums;
mod error;
mod handle;
mod instance;
mod limits;
mod marshal;
mod native;
mod pipeline;
mod queue;
mod render_pass;
mod sampler;
mod surface;
mod texture;
mod util;

pub use adapter::{Adapter, AdapterProperties, DeviceDescriptor};
pub use bind_group::{
    BindGroup, BindGroupDescriptor, BindGroupEntry, BindGroupLayout, BindGroupLayoutDescriptor,
    BindGroupLayoutEntry, BindingResource, BindingType,
};
pub use buffer::{Buffer, BufferDescriptor};
pub use command::{
    CommandBuffer, CommandEncoder, ImageCopyBuffer, ImageCopyTexture, TextureDataLayout,
};
pub use compute_pass::ComputePass;
pub use device::{Device, ErrorFilter, SubmissionIndex};
pub use enums::{
    AdapterType, AddressMode, BackendType, BlendFactor, BlendOperation, BufferBindingType,
    BufferUsages, ColorWrites, CompareFunction, CullMode, FeatureName, FilterMode, FrontFace,
    IndexFormat, LoadOp, MapMode, MipmapFilterMode, NativeFeatures, PowerPreference, PresentMode,
    PrimitiveTopology, SamplerBindingType, ShaderStages, StencilOperation, StorageTextureAccess,
    StoreOp, TextureAspect, TextureDimension, TextureFormat, TextureSampleType, TextureUsages,
    TextureViewDimension, VertexFormat, VertexStepMode,
};
pub use error::{ErrorKind, GabbroError, Result};
pub use instance::{Instance, NativeLogLevel, RequestAdapterOptions, SurfaceTarget, Version};
pub use limits::{
    Limits, COPY_BUFFER_ALIGNMENT, COPY_BYTES_PER_ROW_ALIGNMENT, MAP_ALIGNMENT,
    PUSH_CONSTANT_ALIGNMENT, QUERY_RESOLVE_BUFFER_ALIGNMENT, QUERY_SET_MAX_QUERIES, QUERY_SIZE,
    VERTEX_STRIDE_ALIGNMENT,
};
pub use pipeline::{
    BlendComponent, BlendState, ColorTargetState, ComputePipeline, ComputePipelineDescriptor,
    DepthStencilState, FragmentState, MultisampleState, PipelineLayout, PipelineLayoutDescriptor,
    PrimitiveState, PushConstantRange, RenderPipeline, RenderPipelineDescriptor, ShaderModule,
    ShaderModuleDescriptor, ShaderSource, StencilFaceState, VertexAttribute, VertexBufferLayout,
    VertexState,
};
pub use queue::Queue;
pub use render_pass::{
    Color, RenderPass, RenderPassColorAttachment, RenderPassDepthStencilAttachment,
    RenderPassDescriptor,
};
pub use sampler::{Sampler, SamplerDescriptor};
pub use surface::{Surface, SwapChain, SwapChainDescriptor};
pub use texture::{
    Extent3d, Origin3d, Texture, TextureDescriptor, TextureView, TextureViewDescriptor,
};
pub use util::{padded_buffer_size, BufferInitDescriptor};
