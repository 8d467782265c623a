//! Raw mirror of the wgpu-native C ABI.
//!
//! Everything in this module is a pure data contract: opaque handle typedefs,
//! `#[repr(C)]` struct layouts, raw enum values and callback signatures that
//! must be bit-identical to the pinned `webgpu.h`/`wgpu.h` headers. No logic
//! lives here; a mismatch is not detectable at compile time and shows up as
//! memory corruption, which is why the layout tests at the bottom assert
//! size/align/offset for every mirrored struct.

#![allow(non_snake_case, non_camel_case_types, non_upper_case_globals)]

pub mod api;

use std::os::raw::{c_char, c_void};

macro_rules! opaque_handles {
    ($($impl_name:ident => $handle:ident),* $(,)?) => {
        $(
            #[repr(C)]
            pub struct $impl_name {
                _unused: [u8; 0],
            }
            pub type $handle = *mut $impl_name;
        )*
    };
}

opaque_handles! {
    WGPUAdapterImpl => WGPUAdapter,
    WGPUBindGroupImpl => WGPUBindGroup,
    WGPUBindGroupLayoutImpl => WGPUBindGroupLayout,
    WGPUBufferImpl => WGPUBuffer,
    WGPUCommandBufferImpl => WGPUCommandBuffer,
    WGPUCommandEncoderImpl => WGPUCommandEncoder,
    WGPUComputePassEncoderImpl => WGPUComputePassEncoder,
    WGPUComputePipelineImpl => WGPUComputePipeline,
    WGPUDeviceImpl => WGPUDevice,
    WGPUInstanceImpl => WGPUInstance,
    WGPUPipelineLayoutImpl => WGPUPipelineLayout,
    WGPUQuerySetImpl => WGPUQuerySet,
    WGPUQueueImpl => WGPUQueue,
    WGPURenderPassEncoderImpl => WGPURenderPassEncoder,
    WGPURenderPipelineImpl => WGPURenderPipeline,
    WGPUSamplerImpl => WGPUSampler,
    WGPUShaderModuleImpl => WGPUShaderModule,
    WGPUSurfaceImpl => WGPUSurface,
    WGPUSwapChainImpl => WGPUSwapChain,
    WGPUTextureImpl => WGPUTexture,
    WGPUTextureViewImpl => WGPUTextureView,
}

// Raw enums are plain u32 at the ABI boundary (bindgen style); the typed
// host-facing enums live in `crate::enums` and cast down to these.
pub type WGPUAdapterType = u32;
pub type WGPUBackendType = u32;
pub type WGPUBufferMapAsyncStatus = u32;
pub type WGPUErrorFilter = u32;
pub type WGPUErrorType = u32;
pub type WGPUFeatureName = u32;
pub type WGPUIndexFormat = u32;
pub type WGPULogLevel = u32;
pub type WGPUPowerPreference = u32;
pub type WGPUPresentMode = u32;
pub type WGPURequestAdapterStatus = u32;
pub type WGPURequestDeviceStatus = u32;
pub type WGPUSType = u32;
pub type WGPUSubmissionIndex = u64;
pub type WGPUTextureFormat = u32;

pub type WGPUBufferUsageFlags = u32;
pub type WGPUColorWriteMaskFlags = u32;
pub type WGPUMapModeFlags = u32;
pub type WGPUShaderStageFlags = u32;
pub type WGPUTextureUsageFlags = u32;

pub const WGPURequestAdapterStatus_Success: WGPURequestAdapterStatus = 0x00000000;
pub const WGPURequestDeviceStatus_Success: WGPURequestDeviceStatus = 0x00000000;

pub const WGPUBufferMapAsyncStatus_Success: WGPUBufferMapAsyncStatus = 0x00000000;
pub const WGPUBufferMapAsyncStatus_Error: WGPUBufferMapAsyncStatus = 0x00000001;
pub const WGPUBufferMapAsyncStatus_Unknown: WGPUBufferMapAsyncStatus = 0x00000002;
pub const WGPUBufferMapAsyncStatus_DeviceLost: WGPUBufferMapAsyncStatus = 0x00000003;
pub const WGPUBufferMapAsyncStatus_DestroyedBeforeCallback: WGPUBufferMapAsyncStatus = 0x00000004;
pub const WGPUBufferMapAsyncStatus_UnmappedBeforeCallback: WGPUBufferMapAsyncStatus = 0x00000005;

pub const WGPUErrorFilter_Validation: WGPUErrorFilter = 0x00000000;
pub const WGPUErrorFilter_OutOfMemory: WGPUErrorFilter = 0x00000001;

pub const WGPUErrorType_NoError: WGPUErrorType = 0x00000000;
pub const WGPUErrorType_Validation: WGPUErrorType = 0x00000001;
pub const WGPUErrorType_OutOfMemory: WGPUErrorType = 0x00000002;
pub const WGPUErrorType_Unknown: WGPUErrorType = 0x00000003;
pub const WGPUErrorType_DeviceLost: WGPUErrorType = 0x00000004;

pub const WGPULogLevel_Off: WGPULogLevel = 0x00000000;
pub const WGPULogLevel_Error: WGPULogLevel = 0x00000001;
pub const WGPULogLevel_Warn: WGPULogLevel = 0x00000002;
pub const WGPULogLevel_Info: WGPULogLevel = 0x00000003;
pub const WGPULogLevel_Debug: WGPULogLevel = 0x00000004;
pub const WGPULogLevel_Trace: WGPULogLevel = 0x00000005;

// webgpu.h chain tags
pub const WGPUSType_Invalid: WGPUSType = 0x00000000;
pub const WGPUSType_SurfaceDescriptorFromMetalLayer: WGPUSType = 0x00000001;
pub const WGPUSType_SurfaceDescriptorFromWindowsHWND: WGPUSType = 0x00000002;
pub const WGPUSType_SurfaceDescriptorFromXlibWindow: WGPUSType = 0x00000003;
pub const WGPUSType_SurfaceDescriptorFromCanvasHTMLSelector: WGPUSType = 0x00000004;
pub const WGPUSType_ShaderModuleSPIRVDescriptor: WGPUSType = 0x00000005;
pub const WGPUSType_ShaderModuleWGSLDescriptor: WGPUSType = 0x00000006;
pub const WGPUSType_PrimitiveDepthClipControl: WGPUSType = 0x00000007;
pub const WGPUSType_SurfaceDescriptorFromWaylandSurface: WGPUSType = 0x00000008;
pub const WGPUSType_SurfaceDescriptorFromAndroidNativeWindow: WGPUSType = 0x00000009;
pub const WGPUSType_SurfaceDescriptorFromXcbWindow: WGPUSType = 0x0000000A;

// wgpu.h (native extension) chain tags
pub const WGPUSType_DeviceExtras: WGPUSType = 0x60000001;
pub const WGPUSType_AdapterExtras: WGPUSType = 0x60000002;
pub const WGPUSType_RequiredLimitsExtras: WGPUSType = 0x60000003;
pub const WGPUSType_PipelineLayoutExtras: WGPUSType = 0x60000004;
pub const WGPUSType_SupportedLimitsExtras: WGPUSType = 0x60000005;

pub const WGPU_WHOLE_SIZE: u64 = u64::MAX;
pub const WGPU_WHOLE_MAP_SIZE: usize = usize::MAX;
pub const WGPU_LIMIT_U32_UNDEFINED: u32 = u32::MAX;
pub const WGPU_LIMIT_U64_UNDEFINED: u64 = u64::MAX;
pub const WGPU_ARRAY_LAYER_COUNT_UNDEFINED: u32 = u32::MAX;
pub const WGPU_MIP_LEVEL_COUNT_UNDEFINED: u32 = u32::MAX;
pub const WGPU_COPY_STRIDE_UNDEFINED: u32 = u32::MAX;

pub type WGPULogCallback = unsafe extern "C" fn(level: WGPULogLevel, message: *const c_char);
pub type WGPURequestAdapterCallback = unsafe extern "C" fn(
    status: WGPURequestAdapterStatus,
    adapter: WGPUAdapter,
    message: *const c_char,
    userdata: *mut c_void,
);
pub type WGPURequestDeviceCallback = unsafe extern "C" fn(
    status: WGPURequestDeviceStatus,
    device: WGPUDevice,
    message: *const c_char,
    userdata: *mut c_void,
);
pub type WGPUErrorCallback =
    unsafe extern "C" fn(type_: WGPUErrorType, message: *const c_char, userdata: *mut c_void);
pub type WGPUBufferMapCallback =
    unsafe extern "C" fn(status: WGPUBufferMapAsyncStatus, userdata: *mut c_void);

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUChainedStruct {
    pub next: *const WGPUChainedStruct,
    pub sType: WGPUSType,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUChainedStructOut {
    pub next: *mut WGPUChainedStructOut,
    pub sType: WGPUSType,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPURequestAdapterOptions {
    pub nextInChain: *const WGPUChainedStruct,
    pub compatibleSurface: WGPUSurface,
    pub powerPreference: WGPUPowerPreference,
    pub forceFallbackAdapter: bool,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUAdapterExtras {
    pub chain: WGPUChainedStruct,
    pub backend: WGPUBackendType,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUSurfaceDescriptor {
    pub nextInChain: *const WGPUChainedStruct,
    pub label: *const c_char,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUSurfaceDescriptorFromWindowsHWND {
    pub chain: WGPUChainedStruct,
    pub hinstance: *mut c_void,
    pub hwnd: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUSurfaceDescriptorFromXlibWindow {
    pub chain: WGPUChainedStruct,
    pub display: *mut c_void,
    pub window: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUSurfaceDescriptorFromXcbWindow {
    pub chain: WGPUChainedStruct,
    pub connection: *mut c_void,
    pub window: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUSurfaceDescriptorFromMetalLayer {
    pub chain: WGPUChainedStruct,
    pub layer: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUSurfaceDescriptorFromWaylandSurface {
    pub chain: WGPUChainedStruct,
    pub display: *mut c_void,
    pub surface: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUSurfaceDescriptorFromAndroidNativeWindow {
    pub chain: WGPUChainedStruct,
    pub window: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct WGPULimits {
    pub maxTextureDimension1D: u32,
    pub maxTextureDimension2D: u32,
    pub maxTextureDimension3D: u32,
    pub maxTextureArrayLayers: u32,
    pub maxBindGroups: u32,
    pub maxDynamicUniformBuffersPerPipelineLayout: u32,
    pub maxDynamicStorageBuffersPerPipelineLayout: u32,
    pub maxSampledTexturesPerShaderStage: u32,
    pub maxSamplersPerShaderStage: u32,
    pub maxStorageBuffersPerShaderStage: u32,
    pub maxStorageTexturesPerShaderStage: u32,
    pub maxUniformBuffersPerShaderStage: u32,
    pub maxUniformBufferBindingSize: u64,
    pub maxStorageBufferBindingSize: u64,
    pub minUniformBufferOffsetAlignment: u32,
    pub minStorageBufferOffsetAlignment: u32,
    pub maxVertexBuffers: u32,
    pub maxVertexAttributes: u32,
    pub maxVertexBufferArrayStride: u32,
    pub maxInterStageShaderComponents: u32,
    pub maxComputeWorkgroupStorageSize: u32,
    pub maxComputeInvocationsPerWorkgroup: u32,
    pub maxComputeWorkgroupSizeX: u32,
    pub maxComputeWorkgroupSizeY: u32,
    pub maxComputeWorkgroupSizeZ: u32,
    pub maxComputeWorkgroupsPerDimension: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUSupportedLimits {
    pub nextInChain: *mut WGPUChainedStructOut,
    pub limits: WGPULimits,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUSupportedLimitsExtras {
    pub chain: WGPUChainedStructOut,
    pub maxPushConstantSize: u32,
    pub maxBufferSize: u64,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPURequiredLimits {
    pub nextInChain: *const WGPUChainedStruct,
    pub limits: WGPULimits,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPURequiredLimitsExtras {
    pub chain: WGPUChainedStruct,
    pub maxPushConstantSize: u32,
    pub maxBufferSize: u64,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUAdapterProperties {
    pub nextInChain: *mut WGPUChainedStructOut,
    pub vendorID: u32,
    pub deviceID: u32,
    pub name: *const c_char,
    pub driverDescription: *const c_char,
    pub adapterType: WGPUAdapterType,
    pub backendType: WGPUBackendType,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUQueueDescriptor {
    pub nextInChain: *const WGPUChainedStruct,
    pub label: *const c_char,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUDeviceDescriptor {
    pub nextInChain: *const WGPUChainedStruct,
    pub label: *const c_char,
    pub requiredFeaturesCount: u32,
    pub requiredFeatures: *const WGPUFeatureName,
    pub requiredLimits: *const WGPURequiredLimits,
    pub defaultQueue: WGPUQueueDescriptor,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUDeviceExtras {
    pub chain: WGPUChainedStruct,
    pub nativeFeatures: u32,
    pub label: *const c_char,
    pub tracePath: *const c_char,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUBufferBindingLayout {
    pub nextInChain: *const WGPUChainedStruct,
    pub type_: u32,
    pub hasDynamicOffset: bool,
    pub minBindingSize: u64,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUSamplerBindingLayout {
    pub nextInChain: *const WGPUChainedStruct,
    pub type_: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUTextureBindingLayout {
    pub nextInChain: *const WGPUChainedStruct,
    pub sampleType: u32,
    pub viewDimension: u32,
    pub multisampled: bool,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUStorageTextureBindingLayout {
    pub nextInChain: *const WGPUChainedStruct,
    pub access: u32,
    pub format: WGPUTextureFormat,
    pub viewDimension: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUBindGroupLayoutEntry {
    pub nextInChain: *const WGPUChainedStruct,
    pub binding: u32,
    pub visibility: WGPUShaderStageFlags,
    pub buffer: WGPUBufferBindingLayout,
    pub sampler: WGPUSamplerBindingLayout,
    pub texture: WGPUTextureBindingLayout,
    pub storageTexture: WGPUStorageTextureBindingLayout,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUBindGroupLayoutDescriptor {
    pub nextInChain: *const WGPUChainedStruct,
    pub label: *const c_char,
    pub entryCount: u32,
    pub entries: *const WGPUBindGroupLayoutEntry,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUBindGroupEntry {
    pub nextInChain: *const WGPUChainedStruct,
    pub binding: u32,
    pub buffer: WGPUBuffer,
    pub offset: u64,
    pub size: u64,
    pub sampler: WGPUSampler,
    pub textureView: WGPUTextureView,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUBindGroupDescriptor {
    pub nextInChain: *const WGPUChainedStruct,
    pub label: *const c_char,
    pub layout: WGPUBindGroupLayout,
    pub entryCount: u32,
    pub entries: *const WGPUBindGroupEntry,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUBufferDescriptor {
    pub nextInChain: *const WGPUChainedStruct,
    pub label: *const c_char,
    pub usage: WGPUBufferUsageFlags,
    pub size: u64,
    pub mappedAtCreation: bool,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUCommandEncoderDescriptor {
    pub nextInChain: *const WGPUChainedStruct,
    pub label: *const c_char,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUCommandBufferDescriptor {
    pub nextInChain: *const WGPUChainedStruct,
    pub label: *const c_char,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUConstantEntry {
    pub nextInChain: *const WGPUChainedStruct,
    pub key: *const c_char,
    pub value: f64,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUProgrammableStageDescriptor {
    pub nextInChain: *const WGPUChainedStruct,
    pub module: WGPUShaderModule,
    pub entryPoint: *const c_char,
    pub constantCount: u32,
    pub constants: *const WGPUConstantEntry,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUComputePipelineDescriptor {
    pub nextInChain: *const WGPUChainedStruct,
    pub label: *const c_char,
    pub layout: WGPUPipelineLayout,
    pub compute: WGPUProgrammableStageDescriptor,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUPipelineLayoutDescriptor {
    pub nextInChain: *const WGPUChainedStruct,
    pub label: *const c_char,
    pub bindGroupLayoutCount: u32,
    pub bindGroupLayouts: *const WGPUBindGroupLayout,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUPushConstantRange {
    pub stages: WGPUShaderStageFlags,
    pub start: u32,
    pub end: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUPipelineLayoutExtras {
    pub chain: WGPUChainedStruct,
    pub pushConstantRangeCount: u32,
    pub pushConstantRanges: *const WGPUPushConstantRange,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUVertexAttribute {
    pub format: u32,
    pub offset: u64,
    pub shaderLocation: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUVertexBufferLayout {
    pub arrayStride: u64,
    pub stepMode: u32,
    pub attributeCount: u32,
    pub attributes: *const WGPUVertexAttribute,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUVertexState {
    pub nextInChain: *const WGPUChainedStruct,
    pub module: WGPUShaderModule,
    pub entryPoint: *const c_char,
    pub constantCount: u32,
    pub constants: *const WGPUConstantEntry,
    pub bufferCount: u32,
    pub buffers: *const WGPUVertexBufferLayout,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUPrimitiveState {
    pub nextInChain: *const WGPUChainedStruct,
    pub topology: u32,
    pub stripIndexFormat: WGPUIndexFormat,
    pub frontFace: u32,
    pub cullMode: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUStencilFaceState {
    pub compare: u32,
    pub failOp: u32,
    pub depthFailOp: u32,
    pub passOp: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUDepthStencilState {
    pub nextInChain: *const WGPUChainedStruct,
    pub format: WGPUTextureFormat,
    pub depthWriteEnabled: bool,
    pub depthCompare: u32,
    pub stencilFront: WGPUStencilFaceState,
    pub stencilBack: WGPUStencilFaceState,
    pub stencilReadMask: u32,
    pub stencilWriteMask: u32,
    pub depthBias: i32,
    pub depthBiasSlopeScale: f32,
    pub depthBiasClamp: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUMultisampleState {
    pub nextInChain: *const WGPUChainedStruct,
    pub count: u32,
    pub mask: u32,
    pub alphaToCoverageEnabled: bool,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUBlendComponent {
    pub operation: u32,
    pub srcFactor: u32,
    pub dstFactor: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUBlendState {
    pub color: WGPUBlendComponent,
    pub alpha: WGPUBlendComponent,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUColorTargetState {
    pub nextInChain: *const WGPUChainedStruct,
    pub format: WGPUTextureFormat,
    pub blend: *const WGPUBlendState,
    pub writeMask: WGPUColorWriteMaskFlags,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUFragmentState {
    pub nextInChain: *const WGPUChainedStruct,
    pub module: WGPUShaderModule,
    pub entryPoint: *const c_char,
    pub constantCount: u32,
    pub constants: *const WGPUConstantEntry,
    pub targetCount: u32,
    pub targets: *const WGPUColorTargetState,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPURenderPipelineDescriptor {
    pub nextInChain: *const WGPUChainedStruct,
    pub label: *const c_char,
    pub layout: WGPUPipelineLayout,
    pub vertex: WGPUVertexState,
    pub primitive: WGPUPrimitiveState,
    pub depthStencil: *const WGPUDepthStencilState,
    pub multisample: WGPUMultisampleState,
    pub fragment: *const WGPUFragmentState,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUSamplerDescriptor {
    pub nextInChain: *const WGPUChainedStruct,
    pub label: *const c_char,
    pub addressModeU: u32,
    pub addressModeV: u32,
    pub addressModeW: u32,
    pub magFilter: u32,
    pub minFilter: u32,
    pub mipmapFilter: u32,
    pub lodMinClamp: f32,
    pub lodMaxClamp: f32,
    pub compare: u32,
    pub maxAnisotropy: u16,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUShaderModuleCompilationHint {
    pub nextInChain: *const WGPUChainedStruct,
    pub entryPoint: *const c_char,
    pub layout: WGPUPipelineLayout,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUShaderModuleDescriptor {
    pub nextInChain: *const WGPUChainedStruct,
    pub label: *const c_char,
    pub hintCount: u32,
    pub hints: *const WGPUShaderModuleCompilationHint,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUShaderModuleSPIRVDescriptor {
    pub chain: WGPUChainedStruct,
    pub codeSize: u32,
    pub code: *const u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUShaderModuleWGSLDescriptor {
    pub chain: WGPUChainedStruct,
    pub code: *const c_char,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUSwapChainDescriptor {
    pub nextInChain: *const WGPUChainedStruct,
    pub label: *const c_char,
    pub usage: WGPUTextureUsageFlags,
    pub format: WGPUTextureFormat,
    pub width: u32,
    pub height: u32,
    pub presentMode: WGPUPresentMode,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WGPUExtent3D {
    pub width: u32,
    pub height: u32,
    pub depthOrArrayLayers: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WGPUOrigin3D {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUTextureDescriptor {
    pub nextInChain: *const WGPUChainedStruct,
    pub label: *const c_char,
    pub usage: WGPUTextureUsageFlags,
    pub dimension: u32,
    pub size: WGPUExtent3D,
    pub format: WGPUTextureFormat,
    pub mipLevelCount: u32,
    pub sampleCount: u32,
    pub viewFormatCount: u32,
    pub viewFormats: *const WGPUTextureFormat,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUTextureViewDescriptor {
    pub nextInChain: *const WGPUChainedStruct,
    pub label: *const c_char,
    pub format: WGPUTextureFormat,
    pub dimension: u32,
    pub baseMipLevel: u32,
    pub mipLevelCount: u32,
    pub baseArrayLayer: u32,
    pub arrayLayerCount: u32,
    pub aspect: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUComputePassTimestampWrite {
    pub querySet: WGPUQuerySet,
    pub queryIndex: u32,
    pub location: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUComputePassDescriptor {
    pub nextInChain: *const WGPUChainedStruct,
    pub label: *const c_char,
    pub timestampWriteCount: u32,
    pub timestampWrites: *const WGPUComputePassTimestampWrite,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WGPUColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPURenderPassColorAttachment {
    pub view: WGPUTextureView,
    pub resolveTarget: WGPUTextureView,
    pub loadOp: u32,
    pub storeOp: u32,
    pub clearValue: WGPUColor,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPURenderPassDepthStencilAttachment {
    pub view: WGPUTextureView,
    pub depthLoadOp: u32,
    pub depthStoreOp: u32,
    pub depthClearValue: f32,
    pub depthReadOnly: bool,
    pub stencilLoadOp: u32,
    pub stencilStoreOp: u32,
    pub stencilClearValue: u32,
    pub stencilReadOnly: bool,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPURenderPassTimestampWrite {
    pub querySet: WGPUQuerySet,
    pub queryIndex: u32,
    pub location: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPURenderPassDescriptor {
    pub nextInChain: *const WGPUChainedStruct,
    pub label: *const c_char,
    pub colorAttachmentCount: u32,
    pub colorAttachments: *const WGPURenderPassColorAttachment,
    pub depthStencilAttachment: *const WGPURenderPassDepthStencilAttachment,
    pub occlusionQuerySet: WGPUQuerySet,
    pub timestampWriteCount: u32,
    pub timestampWrites: *const WGPURenderPassTimestampWrite,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUTextureDataLayout {
    pub nextInChain: *const WGPUChainedStruct,
    pub offset: u64,
    pub bytesPerRow: u32,
    pub rowsPerImage: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUImageCopyBuffer {
    pub nextInChain: *const WGPUChainedStruct,
    pub layout: WGPUTextureDataLayout,
    pub buffer: WGPUBuffer,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUImageCopyTexture {
    pub nextInChain: *const WGPUChainedStruct,
    pub texture: WGPUTexture,
    pub mipLevel: u32,
    pub origin: WGPUOrigin3D,
    pub aspect: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WGPUWrappedSubmissionIndex {
    pub queue: WGPUQueue,
    pub submissionIndex: WGPUSubmissionIndex,
}

// Layout checks against the pinned headers. The numbers are the LP64
// (x86_64 / aarch64) layouts; the structs have no fields whose size differs
// between those targets.
#[cfg(test)]
#[cfg(target_pointer_width = "64")]
mod tests {
    use super::*;
    use std::mem::{align_of, offset_of, size_of};

    #[test]
    fn handle_is_pointer_sized() {
        assert_eq!(size_of::<WGPUAdapter>(), size_of::<usize>());
        assert_eq!(size_of::<Option<WGPUBuffer>>(), size_of::<usize>());
    }

    #[test]
    fn chained_struct_layout() {
        assert_eq!(size_of::<WGPUChainedStruct>(), 16);
        assert_eq!(align_of::<WGPUChainedStruct>(), 8);
        assert_eq!(offset_of!(WGPUChainedStruct, next), 0);
        assert_eq!(offset_of!(WGPUChainedStruct, sType), 8);
    }

    #[test]
    fn limits_layout() {
        assert_eq!(size_of::<WGPULimits>(), 112);
        assert_eq!(offset_of!(WGPULimits, maxUniformBufferBindingSize), 48);
        assert_eq!(offset_of!(WGPULimits, maxStorageBufferBindingSize), 56);
        assert_eq!(offset_of!(WGPULimits, minUniformBufferOffsetAlignment), 64);
        assert_eq!(offset_of!(WGPULimits, maxComputeWorkgroupsPerDimension), 108);
        assert_eq!(size_of::<WGPUSupportedLimits>(), 120);
        assert_eq!(size_of::<WGPURequiredLimits>(), 120);
        assert_eq!(size_of::<WGPURequiredLimitsExtras>(), 32);
        assert_eq!(size_of::<WGPUSupportedLimitsExtras>(), 32);
        assert_eq!(offset_of!(WGPURequiredLimitsExtras, maxPushConstantSize), 16);
        assert_eq!(offset_of!(WGPURequiredLimitsExtras, maxBufferSize), 24);
    }

    #[test]
    fn adapter_layouts() {
        assert_eq!(size_of::<WGPURequestAdapterOptions>(), 24);
        assert_eq!(offset_of!(WGPURequestAdapterOptions, compatibleSurface), 8);
        assert_eq!(offset_of!(WGPURequestAdapterOptions, powerPreference), 16);
        assert_eq!(offset_of!(WGPURequestAdapterOptions, forceFallbackAdapter), 20);
        assert_eq!(size_of::<WGPUAdapterExtras>(), 24);
        assert_eq!(size_of::<WGPUAdapterProperties>(), 48);
        assert_eq!(offset_of!(WGPUAdapterProperties, name), 16);
        assert_eq!(offset_of!(WGPUAdapterProperties, adapterType), 32);
    }

    #[test]
    fn surface_descriptor_layouts() {
        assert_eq!(size_of::<WGPUSurfaceDescriptor>(), 16);
        assert_eq!(size_of::<WGPUSurfaceDescriptorFromWindowsHWND>(), 32);
        assert_eq!(size_of::<WGPUSurfaceDescriptorFromXlibWindow>(), 32);
        assert_eq!(size_of::<WGPUSurfaceDescriptorFromXcbWindow>(), 32);
        assert_eq!(size_of::<WGPUSurfaceDescriptorFromMetalLayer>(), 24);
        assert_eq!(size_of::<WGPUSurfaceDescriptorFromWaylandSurface>(), 32);
        assert_eq!(size_of::<WGPUSurfaceDescriptorFromAndroidNativeWindow>(), 24);
        assert_eq!(offset_of!(WGPUSurfaceDescriptorFromXlibWindow, window), 24);
    }

    #[test]
    fn device_descriptor_layout() {
        assert_eq!(size_of::<WGPUQueueDescriptor>(), 16);
        assert_eq!(size_of::<WGPUDeviceDescriptor>(), 56);
        assert_eq!(offset_of!(WGPUDeviceDescriptor, requiredFeatures), 24);
        assert_eq!(offset_of!(WGPUDeviceDescriptor, requiredLimits), 32);
        assert_eq!(offset_of!(WGPUDeviceDescriptor, defaultQueue), 40);
        assert_eq!(size_of::<WGPUDeviceExtras>(), 40);
        assert_eq!(offset_of!(WGPUDeviceExtras, label), 24);
    }

    #[test]
    fn bind_group_layouts() {
        assert_eq!(size_of::<WGPUBufferBindingLayout>(), 24);
        assert_eq!(offset_of!(WGPUBufferBindingLayout, minBindingSize), 16);
        assert_eq!(size_of::<WGPUSamplerBindingLayout>(), 16);
        assert_eq!(size_of::<WGPUTextureBindingLayout>(), 24);
        assert_eq!(size_of::<WGPUStorageTextureBindingLayout>(), 24);
        assert_eq!(size_of::<WGPUBindGroupLayoutEntry>(), 104);
        assert_eq!(offset_of!(WGPUBindGroupLayoutEntry, buffer), 16);
        assert_eq!(offset_of!(WGPUBindGroupLayoutEntry, sampler), 40);
        assert_eq!(offset_of!(WGPUBindGroupLayoutEntry, texture), 56);
        assert_eq!(offset_of!(WGPUBindGroupLayoutEntry, storageTexture), 80);
        assert_eq!(size_of::<WGPUBindGroupLayoutDescriptor>(), 32);
        assert_eq!(size_of::<WGPUBindGroupEntry>(), 56);
        assert_eq!(offset_of!(WGPUBindGroupEntry, buffer), 16);
        assert_eq!(offset_of!(WGPUBindGroupEntry, sampler), 40);
        assert_eq!(offset_of!(WGPUBindGroupEntry, textureView), 48);
        assert_eq!(size_of::<WGPUBindGroupDescriptor>(), 40);
    }

    #[test]
    fn buffer_descriptor_layout() {
        assert_eq!(size_of::<WGPUBufferDescriptor>(), 40);
        assert_eq!(offset_of!(WGPUBufferDescriptor, usage), 16);
        assert_eq!(offset_of!(WGPUBufferDescriptor, size), 24);
        assert_eq!(offset_of!(WGPUBufferDescriptor, mappedAtCreation), 32);
    }

    #[test]
    fn pipeline_layouts() {
        assert_eq!(size_of::<WGPUConstantEntry>(), 24);
        assert_eq!(size_of::<WGPUProgrammableStageDescriptor>(), 40);
        assert_eq!(size_of::<WGPUComputePipelineDescriptor>(), 64);
        assert_eq!(offset_of!(WGPUComputePipelineDescriptor, compute), 24);
        assert_eq!(size_of::<WGPUPipelineLayoutDescriptor>(), 32);
        assert_eq!(size_of::<WGPUPushConstantRange>(), 12);
        assert_eq!(size_of::<WGPUPipelineLayoutExtras>(), 32);
    }

    #[test]
    fn render_pipeline_layouts() {
        assert_eq!(size_of::<WGPUVertexAttribute>(), 24);
        assert_eq!(offset_of!(WGPUVertexAttribute, offset), 8);
        assert_eq!(offset_of!(WGPUVertexAttribute, shaderLocation), 16);
        assert_eq!(size_of::<WGPUVertexBufferLayout>(), 24);
        assert_eq!(size_of::<WGPUVertexState>(), 56);
        assert_eq!(size_of::<WGPUPrimitiveState>(), 24);
        assert_eq!(size_of::<WGPUStencilFaceState>(), 16);
        assert_eq!(size_of::<WGPUDepthStencilState>(), 72);
        assert_eq!(offset_of!(WGPUDepthStencilState, depthCompare), 16);
        assert_eq!(offset_of!(WGPUDepthStencilState, stencilFront), 20);
        assert_eq!(offset_of!(WGPUDepthStencilState, depthBiasClamp), 68);
        assert_eq!(size_of::<WGPUMultisampleState>(), 24);
        assert_eq!(size_of::<WGPUBlendComponent>(), 12);
        assert_eq!(size_of::<WGPUBlendState>(), 24);
        assert_eq!(size_of::<WGPUColorTargetState>(), 32);
        assert_eq!(offset_of!(WGPUColorTargetState, blend), 16);
        assert_eq!(offset_of!(WGPUColorTargetState, writeMask), 24);
        assert_eq!(size_of::<WGPUFragmentState>(), 56);
        assert_eq!(size_of::<WGPURenderPipelineDescriptor>(), 144);
        assert_eq!(offset_of!(WGPURenderPipelineDescriptor, vertex), 24);
        assert_eq!(offset_of!(WGPURenderPipelineDescriptor, primitive), 80);
        assert_eq!(offset_of!(WGPURenderPipelineDescriptor, depthStencil), 104);
        assert_eq!(offset_of!(WGPURenderPipelineDescriptor, multisample), 112);
        assert_eq!(offset_of!(WGPURenderPipelineDescriptor, fragment), 136);
    }

    #[test]
    fn sampler_descriptor_layout() {
        assert_eq!(size_of::<WGPUSamplerDescriptor>(), 56);
        assert_eq!(offset_of!(WGPUSamplerDescriptor, lodMinClamp), 40);
        assert_eq!(offset_of!(WGPUSamplerDescriptor, maxAnisotropy), 52);
    }

    #[test]
    fn shader_module_layouts() {
        assert_eq!(size_of::<WGPUShaderModuleCompilationHint>(), 24);
        assert_eq!(size_of::<WGPUShaderModuleDescriptor>(), 32);
        assert_eq!(size_of::<WGPUShaderModuleSPIRVDescriptor>(), 32);
        assert_eq!(offset_of!(WGPUShaderModuleSPIRVDescriptor, code), 24);
        assert_eq!(size_of::<WGPUShaderModuleWGSLDescriptor>(), 24);
    }

    #[test]
    fn texture_layouts() {
        assert_eq!(size_of::<WGPUExtent3D>(), 12);
        assert_eq!(size_of::<WGPUOrigin3D>(), 12);
        assert_eq!(size_of::<WGPUTextureDescriptor>(), 64);
        assert_eq!(offset_of!(WGPUTextureDescriptor, size), 24);
        assert_eq!(offset_of!(WGPUTextureDescriptor, format), 36);
        assert_eq!(offset_of!(WGPUTextureDescriptor, viewFormats), 56);
        assert_eq!(size_of::<WGPUTextureViewDescriptor>(), 48);
        assert_eq!(offset_of!(WGPUTextureViewDescriptor, aspect), 40);
        assert_eq!(size_of::<WGPUSwapChainDescriptor>(), 40);
        assert_eq!(offset_of!(WGPUSwapChainDescriptor, presentMode), 32);
    }

    #[test]
    fn pass_layouts() {
        assert_eq!(size_of::<WGPUComputePassDescriptor>(), 32);
        assert_eq!(size_of::<WGPUColor>(), 32);
        assert_eq!(size_of::<WGPURenderPassColorAttachment>(), 56);
        assert_eq!(offset_of!(WGPURenderPassColorAttachment, loadOp), 16);
        assert_eq!(offset_of!(WGPURenderPassColorAttachment, clearValue), 24);
        assert_eq!(size_of::<WGPURenderPassDepthStencilAttachment>(), 40);
        assert_eq!(offset_of!(WGPURenderPassDepthStencilAttachment, stencilLoadOp), 24);
        assert_eq!(offset_of!(WGPURenderPassDepthStencilAttachment, stencilReadOnly), 36);
        assert_eq!(size_of::<WGPURenderPassDescriptor>(), 64);
        assert_eq!(offset_of!(WGPURenderPassDescriptor, occlusionQuerySet), 40);
        assert_eq!(offset_of!(WGPURenderPassDescriptor, timestampWrites), 56);
    }

    #[test]
    fn copy_layouts() {
        assert_eq!(size_of::<WGPUTextureDataLayout>(), 24);
        assert_eq!(size_of::<WGPUImageCopyBuffer>(), 40);
        assert_eq!(offset_of!(WGPUImageCopyBuffer, buffer), 32);
        assert_eq!(size_of::<WGPUImageCopyTexture>(), 40);
        assert_eq!(offset_of!(WGPUImageCopyTexture, origin), 20);
        assert_eq!(offset_of!(WGPUImageCopyTexture, aspect), 32);
        assert_eq!(size_of::<WGPUCommandBufferDescriptor>(), 16);
        assert_eq!(size_of::<WGPUWrappedSubmissionIndex>(), 16);
    }
}
