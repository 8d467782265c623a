//! Resolution of the native entry points.
//!
//! Every bound function is listed exactly once in the `native_api!` invocation
//! below, which generates the [`Api`] function table. Higher layers hold an
//! `Arc<Api>` and call through the table, so the rest of the crate is
//! indifferent to whether symbols came from the link line or from a library
//! opened at runtime.

use super::*;
use crate::error::Result;

#[cfg(feature = "dlopen")]
use crate::error::GabbroError;

macro_rules! native_api {
    ($(
        fn $name:ident($($arg:ident: $ty:ty),* $(,)?) $(-> $ret:ty)?;
    )*) => {
        /// Function table over the bound wgpu-native ABI.
        pub struct Api {
            $(pub $name: unsafe extern "C" fn($($ty),*) $(-> $ret)?,)*
            // Keeps the opened library alive for as long as any resolved
            // function pointer can be called.
            #[cfg(feature = "dlopen")]
            _lib: Option<libloading::Library>,
        }

        #[cfg(feature = "link")]
        mod linked {
            use super::super::*;
            extern "C" {
                $(pub fn $name($($arg: $ty),*) $(-> $ret)?;)*
            }
        }

        impl Api {
            /// Resolves every entry point from link-time symbols.
            #[cfg(feature = "link")]
            pub fn linked() -> Self {
                Self {
                    $($name: linked::$name,)*
                    #[cfg(feature = "dlopen")]
                    _lib: None,
                }
            }

            /// Opens `path` and resolves every entry point from it.
            ///
            /// # Safety
            /// The file must be a wgpu-native build matching the header
            /// surface this crate mirrors. A library with different struct
            /// layouts or calling conventions is undefined behavior.
            #[cfg(feature = "dlopen")]
            pub unsafe fn load(path: &std::path::Path) -> Result<Self> {
                let lib = libloading::Library::new(path)?;
                let api = Self {
                    $($name: {
                        let sym: libloading::Symbol<
                            unsafe extern "C" fn($($ty),*) $(-> $ret)?,
                        > = lib.get(concat!(stringify!($name), "\0").as_bytes())?;
                        *sym
                    },)*
                    _lib: None,
                };
                log::debug!("loaded wgpu_native from {}", path.display());
                Ok(Self { _lib: Some(lib), ..api })
            }
        }
    };
}

impl Api {
    /// Like [`Api::load`], but first checks the file's SHA-256 digest against
    /// `sha256_hex`. Nothing from an unverified file is ever executed.
    ///
    /// # Safety
    /// Same contract as [`Api::load`].
    #[cfg(feature = "dlopen")]
    pub unsafe fn load_verified(path: &std::path::Path, sha256_hex: &str) -> Result<Self> {
        use sha2::{Digest, Sha256};

        let contents = std::fs::read(path)?;
        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let actual = hex_digest(&hasher.finalize());
        if !actual.eq_ignore_ascii_case(sha256_hex) {
            return Err(GabbroError::LibraryHashMismatch {
                path: path.to_owned(),
                expected: sha256_hex.to_ascii_lowercase(),
                actual,
            });
        }
        Self::load(path)
    }
}

#[cfg(feature = "dlopen")]
fn hex_digest(bytes: &[u8]) -> String {
    use std::fmt::Write;
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}

native_api! {
    fn wgpuGetVersion() -> u32;
    fn wgpuSetLogCallback(callback: WGPULogCallback);
    fn wgpuSetLogLevel(level: WGPULogLevel);
    fn wgpuFree(ptr: *mut c_void, size: usize, align: usize);

    fn wgpuInstanceRequestAdapter(
        instance: WGPUInstance,
        options: *const WGPURequestAdapterOptions,
        callback: WGPURequestAdapterCallback,
        userdata: *mut c_void,
    );
    fn wgpuInstanceCreateSurface(
        instance: WGPUInstance,
        descriptor: *const WGPUSurfaceDescriptor,
    ) -> WGPUSurface;

    fn wgpuAdapterEnumerateFeatures(adapter: WGPUAdapter, features: *mut WGPUFeatureName) -> usize;
    fn wgpuAdapterHasFeature(adapter: WGPUAdapter, feature: WGPUFeatureName) -> bool;
    fn wgpuAdapterGetLimits(adapter: WGPUAdapter, limits: *mut WGPUSupportedLimits) -> bool;
    fn wgpuAdapterGetProperties(adapter: WGPUAdapter, properties: *mut WGPUAdapterProperties);
    fn wgpuAdapterRequestDevice(
        adapter: WGPUAdapter,
        descriptor: *const WGPUDeviceDescriptor,
        callback: WGPURequestDeviceCallback,
        userdata: *mut c_void,
    );
    fn wgpuAdapterDrop(adapter: WGPUAdapter);

    fn wgpuDeviceSetUncapturedErrorCallback(
        device: WGPUDevice,
        callback: WGPUErrorCallback,
        userdata: *mut c_void,
    );
    fn wgpuDevicePushErrorScope(device: WGPUDevice, filter: WGPUErrorFilter);
    fn wgpuDevicePopErrorScope(
        device: WGPUDevice,
        callback: WGPUErrorCallback,
        userdata: *mut c_void,
    ) -> bool;
    fn wgpuDeviceEnumerateFeatures(device: WGPUDevice, features: *mut WGPUFeatureName) -> usize;
    fn wgpuDeviceHasFeature(device: WGPUDevice, feature: WGPUFeatureName) -> bool;
    fn wgpuDeviceGetLimits(device: WGPUDevice, limits: *mut WGPUSupportedLimits) -> bool;
    fn wgpuDeviceGetQueue(device: WGPUDevice) -> WGPUQueue;
    fn wgpuDevicePoll(
        device: WGPUDevice,
        wait: bool,
        wrappedSubmissionIndex: *const WGPUWrappedSubmissionIndex,
    ) -> bool;
    fn wgpuDeviceCreateBindGroupLayout(
        device: WGPUDevice,
        descriptor: *const WGPUBindGroupLayoutDescriptor,
    ) -> WGPUBindGroupLayout;
    fn wgpuDeviceCreateBindGroup(
        device: WGPUDevice,
        descriptor: *const WGPUBindGroupDescriptor,
    ) -> WGPUBindGroup;
    fn wgpuDeviceCreateBuffer(
        device: WGPUDevice,
        descriptor: *const WGPUBufferDescriptor,
    ) -> WGPUBuffer;
    fn wgpuDeviceCreateCommandEncoder(
        device: WGPUDevice,
        descriptor: *const WGPUCommandEncoderDescriptor,
    ) -> WGPUCommandEncoder;
    fn wgpuDeviceCreateComputePipeline(
        device: WGPUDevice,
        descriptor: *const WGPUComputePipelineDescriptor,
    ) -> WGPUComputePipeline;
    fn wgpuDeviceCreatePipelineLayout(
        device: WGPUDevice,
        descriptor: *const WGPUPipelineLayoutDescriptor,
    ) -> WGPUPipelineLayout;
    fn wgpuDeviceCreateRenderPipeline(
        device: WGPUDevice,
        descriptor: *const WGPURenderPipelineDescriptor,
    ) -> WGPURenderPipeline;
    fn wgpuDeviceCreateSampler(
        device: WGPUDevice,
        descriptor: *const WGPUSamplerDescriptor,
    ) -> WGPUSampler;
    fn wgpuDeviceCreateShaderModule(
        device: WGPUDevice,
        descriptor: *const WGPUShaderModuleDescriptor,
    ) -> WGPUShaderModule;
    fn wgpuDeviceCreateSwapChain(
        device: WGPUDevice,
        surface: WGPUSurface,
        descriptor: *const WGPUSwapChainDescriptor,
    ) -> WGPUSwapChain;
    fn wgpuDeviceCreateTexture(
        device: WGPUDevice,
        descriptor: *const WGPUTextureDescriptor,
    ) -> WGPUTexture;
    fn wgpuDeviceDrop(device: WGPUDevice);

    fn wgpuBufferMapAsync(
        buffer: WGPUBuffer,
        mode: WGPUMapModeFlags,
        offset: usize,
        size: usize,
        callback: WGPUBufferMapCallback,
        userdata: *mut c_void,
    );
    fn wgpuBufferGetMappedRange(buffer: WGPUBuffer, offset: usize, size: usize) -> *mut c_void;
    fn wgpuBufferUnmap(buffer: WGPUBuffer);
    fn wgpuBufferDestroy(buffer: WGPUBuffer);
    fn wgpuBufferDrop(buffer: WGPUBuffer);

    fn wgpuCommandEncoderBeginComputePass(
        encoder: WGPUCommandEncoder,
        descriptor: *const WGPUComputePassDescriptor,
    ) -> WGPUComputePassEncoder;
    fn wgpuCommandEncoderBeginRenderPass(
        encoder: WGPUCommandEncoder,
        descriptor: *const WGPURenderPassDescriptor,
    ) -> WGPURenderPassEncoder;
    fn wgpuCommandEncoderClearBuffer(
        encoder: WGPUCommandEncoder,
        buffer: WGPUBuffer,
        offset: u64,
        size: u64,
    );
    fn wgpuCommandEncoderCopyBufferToBuffer(
        encoder: WGPUCommandEncoder,
        source: WGPUBuffer,
        sourceOffset: u64,
        destination: WGPUBuffer,
        destinationOffset: u64,
        size: u64,
    );
    fn wgpuCommandEncoderCopyBufferToTexture(
        encoder: WGPUCommandEncoder,
        source: *const WGPUImageCopyBuffer,
        destination: *const WGPUImageCopyTexture,
        copySize: *const WGPUExtent3D,
    );
    fn wgpuCommandEncoderCopyTextureToBuffer(
        encoder: WGPUCommandEncoder,
        source: *const WGPUImageCopyTexture,
        destination: *const WGPUImageCopyBuffer,
        copySize: *const WGPUExtent3D,
    );
    fn wgpuCommandEncoderCopyTextureToTexture(
        encoder: WGPUCommandEncoder,
        source: *const WGPUImageCopyTexture,
        destination: *const WGPUImageCopyTexture,
        copySize: *const WGPUExtent3D,
    );
    fn wgpuCommandEncoderFinish(
        encoder: WGPUCommandEncoder,
        descriptor: *const WGPUCommandBufferDescriptor,
    ) -> WGPUCommandBuffer;
    fn wgpuCommandEncoderInsertDebugMarker(encoder: WGPUCommandEncoder, markerLabel: *const c_char);
    fn wgpuCommandEncoderPushDebugGroup(encoder: WGPUCommandEncoder, groupLabel: *const c_char);
    fn wgpuCommandEncoderPopDebugGroup(encoder: WGPUCommandEncoder);
    fn wgpuCommandEncoderDrop(encoder: WGPUCommandEncoder);

    fn wgpuComputePassEncoderSetPipeline(
        pass: WGPUComputePassEncoder,
        pipeline: WGPUComputePipeline,
    );
    fn wgpuComputePassEncoderSetBindGroup(
        pass: WGPUComputePassEncoder,
        groupIndex: u32,
        group: WGPUBindGroup,
        dynamicOffsetCount: u32,
        dynamicOffsets: *const u32,
    );
    fn wgpuComputePassEncoderDispatchWorkgroups(
        pass: WGPUComputePassEncoder,
        workgroupCountX: u32,
        workgroupCountY: u32,
        workgroupCountZ: u32,
    );
    fn wgpuComputePassEncoderDispatchWorkgroupsIndirect(
        pass: WGPUComputePassEncoder,
        indirectBuffer: WGPUBuffer,
        indirectOffset: u64,
    );
    fn wgpuComputePassEncoderEnd(pass: WGPUComputePassEncoder);

    fn wgpuComputePipelineGetBindGroupLayout(
        pipeline: WGPUComputePipeline,
        groupIndex: u32,
    ) -> WGPUBindGroupLayout;
    fn wgpuComputePipelineDrop(pipeline: WGPUComputePipeline);
    fn wgpuRenderPipelineGetBindGroupLayout(
        pipeline: WGPURenderPipeline,
        groupIndex: u32,
    ) -> WGPUBindGroupLayout;
    fn wgpuRenderPipelineDrop(pipeline: WGPURenderPipeline);
    fn wgpuPipelineLayoutDrop(layout: WGPUPipelineLayout);

    fn wgpuQueueSubmitForIndex(
        queue: WGPUQueue,
        commandCount: u32,
        commands: *const WGPUCommandBuffer,
    ) -> WGPUSubmissionIndex;
    fn wgpuQueueWriteBuffer(
        queue: WGPUQueue,
        buffer: WGPUBuffer,
        bufferOffset: u64,
        data: *const c_void,
        size: usize,
    );
    fn wgpuQueueWriteTexture(
        queue: WGPUQueue,
        destination: *const WGPUImageCopyTexture,
        data: *const c_void,
        dataSize: usize,
        dataLayout: *const WGPUTextureDataLayout,
        writeSize: *const WGPUExtent3D,
    );

    fn wgpuRenderPassEncoderSetPipeline(pass: WGPURenderPassEncoder, pipeline: WGPURenderPipeline);
    fn wgpuRenderPassEncoderSetBindGroup(
        pass: WGPURenderPassEncoder,
        groupIndex: u32,
        group: WGPUBindGroup,
        dynamicOffsetCount: u32,
        dynamicOffsets: *const u32,
    );
    fn wgpuRenderPassEncoderSetVertexBuffer(
        pass: WGPURenderPassEncoder,
        slot: u32,
        buffer: WGPUBuffer,
        offset: u64,
        size: u64,
    );
    fn wgpuRenderPassEncoderSetIndexBuffer(
        pass: WGPURenderPassEncoder,
        buffer: WGPUBuffer,
        format: WGPUIndexFormat,
        offset: u64,
        size: u64,
    );
    fn wgpuRenderPassEncoderDraw(
        pass: WGPURenderPassEncoder,
        vertexCount: u32,
        instanceCount: u32,
        firstVertex: u32,
        firstInstance: u32,
    );
    fn wgpuRenderPassEncoderDrawIndexed(
        pass: WGPURenderPassEncoder,
        indexCount: u32,
        instanceCount: u32,
        firstIndex: u32,
        baseVertex: i32,
        firstInstance: u32,
    );
    fn wgpuRenderPassEncoderDrawIndirect(
        pass: WGPURenderPassEncoder,
        indirectBuffer: WGPUBuffer,
        indirectOffset: u64,
    );
    fn wgpuRenderPassEncoderDrawIndexedIndirect(
        pass: WGPURenderPassEncoder,
        indirectBuffer: WGPUBuffer,
        indirectOffset: u64,
    );
    fn wgpuRenderPassEncoderSetViewport(
        pass: WGPURenderPassEncoder,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        minDepth: f32,
        maxDepth: f32,
    );
    fn wgpuRenderPassEncoderSetScissorRect(
        pass: WGPURenderPassEncoder,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    );
    fn wgpuRenderPassEncoderSetBlendConstant(pass: WGPURenderPassEncoder, color: *const WGPUColor);
    fn wgpuRenderPassEncoderSetStencilReference(pass: WGPURenderPassEncoder, reference: u32);
    fn wgpuRenderPassEncoderSetPushConstants(
        pass: WGPURenderPassEncoder,
        stages: WGPUShaderStageFlags,
        offset: u32,
        sizeBytes: u32,
        data: *const c_void,
    );
    fn wgpuRenderPassEncoderEnd(pass: WGPURenderPassEncoder);

    fn wgpuSurfaceGetPreferredFormat(
        surface: WGPUSurface,
        adapter: WGPUAdapter,
    ) -> WGPUTextureFormat;
    fn wgpuSurfaceGetSupportedFormats(
        surface: WGPUSurface,
        adapter: WGPUAdapter,
        count: *mut usize,
    ) -> *mut WGPUTextureFormat;
    fn wgpuSurfaceGetSupportedPresentModes(
        surface: WGPUSurface,
        adapter: WGPUAdapter,
        count: *mut usize,
    ) -> *mut WGPUPresentMode;
    fn wgpuSurfaceDrop(surface: WGPUSurface);

    fn wgpuSwapChainGetCurrentTextureView(swapChain: WGPUSwapChain) -> WGPUTextureView;
    fn wgpuSwapChainPresent(swapChain: WGPUSwapChain);

    fn wgpuTextureCreateView(
        texture: WGPUTexture,
        descriptor: *const WGPUTextureViewDescriptor,
    ) -> WGPUTextureView;
    fn wgpuTextureDestroy(texture: WGPUTexture);
    fn wgpuTextureDrop(texture: WGPUTexture);
    fn wgpuTextureViewDrop(textureView: WGPUTextureView);

    fn wgpuBindGroupDrop(bindGroup: WGPUBindGroup);
    fn wgpuBindGroupLayoutDrop(bindGroupLayout: WGPUBindGroupLayout);
    fn wgpuCommandBufferDrop(commandBuffer: WGPUCommandBuffer);
    fn wgpuSamplerDrop(sampler: WGPUSampler);
    fn wgpuShaderModuleDrop(shaderModule: WGPUShaderModule);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Api>();
    }

    #[cfg(feature = "dlopen")]
    #[test]
    fn load_missing_library_fails() {
        let err = unsafe { Api::load(std::path::Path::new("/nonexistent/libwgpu_native.so")) };
        assert!(err.is_err());
    }

    #[cfg(feature = "dlopen")]
    #[test]
    fn hex_digest_formats_lowercase() {
        assert_eq!(hex_digest(&[0x00, 0xab, 0x0f]), "00ab0f");
    }
}
