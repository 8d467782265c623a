//! Device limits and the alignment constants the native library enforces.

use crate::native;

pub const COPY_BYTES_PER_ROW_ALIGNMENT: u32 = 256;
pub const QUERY_RESOLVE_BUFFER_ALIGNMENT: u64 = 256;
pub const COPY_BUFFER_ALIGNMENT: u64 = 4;
pub const MAP_ALIGNMENT: u64 = 8;
pub const VERTEX_STRIDE_ALIGNMENT: u64 = 4;
pub const PUSH_CONSTANT_ALIGNMENT: u32 = 4;
pub const QUERY_SET_MAX_QUERIES: u32 = 8192;
pub const QUERY_SIZE: u32 = 8;

/// Resource limits, requested at device creation and queried from adapters
/// and devices.
///
/// `max_push_constant_size` and `max_buffer_size` are wgpu-native extensions;
/// they travel through an extras chain on the wire but are ordinary fields
/// here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_texture_dimension_1d: u32,
    pub max_texture_dimension_2d: u32,
    pub max_texture_dimension_3d: u32,
    pub max_texture_array_layers: u32,
    pub max_bind_groups: u32,
    pub max_dynamic_uniform_buffers_per_pipeline_layout: u32,
    pub max_dynamic_storage_buffers_per_pipeline_layout: u32,
    pub max_sampled_textures_per_shader_stage: u32,
    pub max_samplers_per_shader_stage: u32,
    pub max_storage_buffers_per_shader_stage: u32,
    pub max_storage_textures_per_shader_stage: u32,
    pub max_uniform_buffers_per_shader_stage: u32,
    pub max_uniform_buffer_binding_size: u64,
    pub max_storage_buffer_binding_size: u64,
    pub min_uniform_buffer_offset_alignment: u32,
    pub min_storage_buffer_offset_alignment: u32,
    pub max_vertex_buffers: u32,
    pub max_vertex_attributes: u32,
    pub max_vertex_buffer_array_stride: u32,
    pub max_inter_stage_shader_components: u32,
    pub max_compute_workgroup_storage_size: u32,
    pub max_compute_invocations_per_workgroup: u32,
    pub max_compute_workgroup_size_x: u32,
    pub max_compute_workgroup_size_y: u32,
    pub max_compute_workgroup_size_z: u32,
    pub max_compute_workgroups_per_dimension: u32,
    pub max_push_constant_size: u32,
    pub max_buffer_size: u64,
}

impl Default for Limits {
    /// The WebGPU defaults, guaranteed supported by conformant adapters.
    fn default() -> Self {
        Self {
            max_texture_dimension_1d: 8192,
            max_texture_dimension_2d: 8192,
            max_texture_dimension_3d: 2048,
            max_texture_array_layers: 256,
            max_bind_groups: 4,
            max_dynamic_uniform_buffers_per_pipeline_layout: 8,
            max_dynamic_storage_buffers_per_pipeline_layout: 4,
            max_sampled_textures_per_shader_stage: 16,
            max_samplers_per_shader_stage: 16,
            max_storage_buffers_per_shader_stage: 8,
            max_storage_textures_per_shader_stage: 4,
            max_uniform_buffers_per_shader_stage: 12,
            max_uniform_buffer_binding_size: 64 << 10,
            max_storage_buffer_binding_size: 128 << 20,
            min_uniform_buffer_offset_alignment: 256,
            min_storage_buffer_offset_alignment: 256,
            max_vertex_buffers: 8,
            max_vertex_attributes: 16,
            max_vertex_buffer_array_stride: 2048,
            max_inter_stage_shader_components: 60,
            max_compute_workgroup_storage_size: 16384,
            max_compute_invocations_per_workgroup: 256,
            max_compute_workgroup_size_x: 256,
            max_compute_workgroup_size_y: 256,
            max_compute_workgroup_size_z: 64,
            max_compute_workgroups_per_dimension: 65535,
            max_push_constant_size: 0,
            max_buffer_size: 1 << 28,
        }
    }
}

impl Limits {
    /// Conservative limits for downlevel (GLES / older D3D) backends.
    pub fn downlevel_defaults() -> Self {
        Self {
            max_texture_dimension_1d: 2048,
            max_texture_dimension_2d: 2048,
            max_texture_dimension_3d: 256,
            max_storage_buffers_per_shader_stage: 4,
            max_uniform_buffer_binding_size: 16 << 10,
            ..Self::default()
        }
    }

    pub(crate) fn to_native(&self) -> native::WGPULimits {
        native::WGPULimits {
            maxTextureDimension1D: self.max_texture_dimension_1d,
            maxTextureDimension2D: self.max_texture_dimension_2d,
            maxTextureDimension3D: self.max_texture_dimension_3d,
            maxTextureArrayLayers: self.max_texture_array_layers,
            maxBindGroups: self.max_bind_groups,
            maxDynamicUniformBuffersPerPipelineLayout: self
                .max_dynamic_uniform_buffers_per_pipeline_layout,
            maxDynamicStorageBuffersPerPipelineLayout: self
                .max_dynamic_storage_buffers_per_pipeline_layout,
            maxSampledTexturesPerShaderStage: self.max_sampled_textures_per_shader_stage,
            maxSamplersPerShaderStage: self.max_samplers_per_shader_stage,
            maxStorageBuffersPerShaderStage: self.max_storage_buffers_per_shader_stage,
            maxStorageTexturesPerShaderStage: self.max_storage_textures_per_shader_stage,
            maxUniformBuffersPerShaderStage: self.max_uniform_buffers_per_shader_stage,
            maxUniformBufferBindingSize: self.max_uniform_buffer_binding_size,
            maxStorageBufferBindingSize: self.max_storage_buffer_binding_size,
            minUniformBufferOffsetAlignment: self.min_uniform_buffer_offset_alignment,
            minStorageBufferOffsetAlignment: self.min_storage_buffer_offset_alignment,
            maxVertexBuffers: self.max_vertex_buffers,
            maxVertexAttributes: self.max_vertex_attributes,
            maxVertexBufferArrayStride: self.max_vertex_buffer_array_stride,
            maxInterStageShaderComponents: self.max_inter_stage_shader_components,
            maxComputeWorkgroupStorageSize: self.max_compute_workgroup_storage_size,
            maxComputeInvocationsPerWorkgroup: self.max_compute_invocations_per_workgroup,
            maxComputeWorkgroupSizeX: self.max_compute_workgroup_size_x,
            maxComputeWorkgroupSizeY: self.max_compute_workgroup_size_y,
            maxComputeWorkgroupSizeZ: self.max_compute_workgroup_size_z,
            maxComputeWorkgroupsPerDimension: self.max_compute_workgroups_per_dimension,
        }
    }

    pub(crate) fn from_native(limits: &native::WGPULimits, extras: Option<(u32, u64)>) -> Self {
        let (max_push_constant_size, max_buffer_size) = extras.unwrap_or((0, 0));
        Self {
            max_texture_dimension_1d: limits.maxTextureDimension1D,
            max_texture_dimension_2d: limits.maxTextureDimension2D,
            max_texture_dimension_3d: limits.maxTextureDimension3D,
            max_texture_array_layers: limits.maxTextureArrayLayers,
            max_bind_groups: limits.maxBindGroups,
            max_dynamic_uniform_buffers_per_pipeline_layout: limits
                .maxDynamicUniformBuffersPerPipelineLayout,
            max_dynamic_storage_buffers_per_pipeline_layout: limits
                .maxDynamicStorageBuffersPerPipelineLayout,
            max_sampled_textures_per_shader_stage: limits.maxSampledTexturesPerShaderStage,
            max_samplers_per_shader_stage: limits.maxSamplersPerShaderStage,
            max_storage_buffers_per_shader_stage: limits.maxStorageBuffersPerShaderStage,
            max_storage_textures_per_shader_stage: limits.maxStorageTexturesPerShaderStage,
            max_uniform_buffers_per_shader_stage: limits.maxUniformBuffersPerShaderStage,
            max_uniform_buffer_binding_size: limits.maxUniformBufferBindingSize,
            max_storage_buffer_binding_size: limits.maxStorageBufferBindingSize,
            min_uniform_buffer_offset_alignment: limits.minUniformBufferOffsetAlignment,
            min_storage_buffer_offset_alignment: limits.minStorageBufferOffsetAlignment,
            max_vertex_buffers: limits.maxVertexBuffers,
            max_vertex_attributes: limits.maxVertexAttributes,
            max_vertex_buffer_array_stride: limits.maxVertexBufferArrayStride,
            max_inter_stage_shader_components: limits.maxInterStageShaderComponents,
            max_compute_workgroup_storage_size: limits.maxComputeWorkgroupStorageSize,
            max_compute_invocations_per_workgroup: limits.maxComputeInvocationsPerWorkgroup,
            max_compute_workgroup_size_x: limits.maxComputeWorkgroupSizeX,
            max_compute_workgroup_size_y: limits.maxComputeWorkgroupSizeY,
            max_compute_workgroup_size_z: limits.maxComputeWorkgroupSizeZ,
            max_compute_workgroups_per_dimension: limits.maxComputeWorkgroupsPerDimension,
            max_push_constant_size,
            max_buffer_size,
        }
    }
}

/// Queries limits through `get`, chaining the extras struct so the
/// wgpu-native extension fields come back in the same call.
pub(crate) fn query_limits(
    get: impl FnOnce(*mut native::WGPUSupportedLimits) -> bool,
) -> Option<Limits> {
    let mut extras = native::WGPUSupportedLimitsExtras {
        chain: native::WGPUChainedStructOut {
            next: std::ptr::null_mut(),
            sType: native::WGPUSType_SupportedLimitsExtras,
        },
        maxPushConstantSize: 0,
        maxBufferSize: 0,
    };
    let mut supported = native::WGPUSupportedLimits {
        nextInChain: &mut extras.chain,
        limits: native::WGPULimits::default(),
    };
    if get(&mut supported) {
        Some(Limits::from_native(
            &supported.limits,
            Some((extras.maxPushConstantSize, extras.maxBufferSize)),
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_round_trip_preserves_every_field() {
        let limits = Limits {
            max_bind_groups: 6,
            max_storage_buffer_binding_size: 1 << 30,
            max_compute_workgroup_size_z: 128,
            max_push_constant_size: 128,
            max_buffer_size: 1 << 32,
            ..Limits::default()
        };
        let raw = limits.to_native();
        let back = Limits::from_native(&raw, Some((128, 1 << 32)));
        assert_eq!(back, limits);
    }

    #[test]
    fn missing_extras_read_as_zero() {
        let raw = Limits::default().to_native();
        let back = Limits::from_native(&raw, None);
        assert_eq!(back.max_push_constant_size, 0);
        assert_eq!(back.max_buffer_size, 0);
    }

    #[test]
    fn downlevel_is_not_above_default() {
        let default = Limits::default();
        let downlevel = Limits::downlevel_defaults();
        assert!(downlevel.max_texture_dimension_2d <= default.max_texture_dimension_2d);
        assert!(downlevel.max_uniform_buffer_binding_size <= default.max_uniform_buffer_binding_size);
    }
}
