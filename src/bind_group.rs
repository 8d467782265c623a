//! Bind group management
//!
//! Handles creation of bind groups and bind group layouts for binding
//! buffers, textures and samplers to shaders.

use std::sync::Arc;

use crate::buffer::{size_or_whole, Buffer};
use crate::device::{Device, DeviceShared};
use crate::enums::{
    BufferBindingType, SamplerBindingType, ShaderStages, StorageTextureAccess, TextureFormat,
    TextureSampleType, TextureViewDimension,
};
use crate::error::Result;
use crate::handle::HandleCell;
use crate::marshal::CallArena;
use crate::native::*;
use crate::sampler::Sampler;
use crate::texture::TextureView;

/// What one shader-visible binding slot holds.
#[derive(Debug, Clone, Copy)]
pub enum BindingType {
    Buffer {
        ty: BufferBindingType,
        has_dynamic_offset: bool,
        /// 0 means "validated at draw time against the actual binding".
        min_binding_size: u64,
    },
    Sampler(SamplerBindingType),
    Texture {
        sample_type: TextureSampleType,
        view_dimension: TextureViewDimension,
        multisampled: bool,
    },
    StorageTexture {
        access: StorageTextureAccess,
        format: TextureFormat,
        view_dimension: TextureViewDimension,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct BindGroupLayoutEntry {
    pub binding: u32,
    pub visibility: ShaderStages,
    pub ty: BindingType,
}

pub struct BindGroupLayoutDescriptor<'a> {
    pub label: &'a str,
    pub entries: &'a [BindGroupLayoutEntry],
}

/// Resource bound into one slot of a bind group.
pub enum BindingResource<'a> {
    Buffer {
        buffer: &'a Buffer,
        offset: u64,
        /// 0 binds from `offset` to the end of the buffer.
        size: u64,
    },
    Sampler(&'a Sampler),
    TextureView(&'a TextureView),
}

pub struct BindGroupEntry<'a> {
    pub binding: u32,
    pub resource: BindingResource<'a>,
}

pub struct BindGroupDescriptor<'a> {
    pub label: &'a str,
    pub layout: &'a BindGroupLayout,
    pub entries: &'a [BindGroupEntry<'a>],
}

pub struct BindGroupLayout {
    pub(crate) device: Arc<DeviceShared>,
    pub(crate) handle: HandleCell<WGPUBindGroupLayoutImpl>,
}

pub struct BindGroup {
    pub(crate) device: Arc<DeviceShared>,
    pub(crate) handle: HandleCell<WGPUBindGroupImpl>,
}

fn layout_entry_to_native(entry: &BindGroupLayoutEntry) -> WGPUBindGroupLayoutEntry {
    // The C entry carries all four binding sub-structs; the unused ones stay
    // zeroed, which the native side reads as "not this kind".
    let mut native = WGPUBindGroupLayoutEntry {
        nextInChain: std::ptr::null(),
        binding: entry.binding,
        visibility: entry.visibility.bits(),
        buffer: WGPUBufferBindingLayout {
            nextInChain: std::ptr::null(),
            type_: 0,
            hasDynamicOffset: false,
            minBindingSize: 0,
        },
        sampler: WGPUSamplerBindingLayout {
            nextInChain: std::ptr::null(),
            type_: 0,
        },
        texture: WGPUTextureBindingLayout {
            nextInChain: std::ptr::null(),
            sampleType: 0,
            viewDimension: 0,
            multisampled: false,
        },
        storageTexture: WGPUStorageTextureBindingLayout {
            nextInChain: std::ptr::null(),
            access: 0,
            format: 0,
            viewDimension: 0,
        },
    };
    match entry.ty {
        BindingType::Buffer {
            ty,
            has_dynamic_offset,
            min_binding_size,
        } => {
            native.buffer.type_ = ty.to_raw();
            native.buffer.hasDynamicOffset = has_dynamic_offset;
            native.buffer.minBindingSize = min_binding_size;
        }
        BindingType::Sampler(ty) => {
            native.sampler.type_ = ty.to_raw();
        }
        BindingType::Texture {
            sample_type,
            view_dimension,
            multisampled,
        } => {
            native.texture.sampleType = sample_type.to_raw();
            native.texture.viewDimension = view_dimension.to_raw();
            native.texture.multisampled = multisampled;
        }
        BindingType::StorageTexture {
            access,
            format,
            view_dimension,
        } => {
            native.storageTexture.access = access.to_raw();
            native.storageTexture.format = format.to_raw();
            native.storageTexture.viewDimension = view_dimension.to_raw();
        }
    }
    native
}

impl Device {
    pub fn create_bind_group_layout(
        &self,
        descriptor: &BindGroupLayoutDescriptor<'_>,
    ) -> Result<BindGroupLayout> {
        let mut arena = CallArena::new();
        let (entry_count, entries) = arena.slice(
            descriptor
                .entries
                .iter()
                .map(layout_entry_to_native)
                .collect::<Vec<_>>(),
        );
        let desc = WGPUBindGroupLayoutDescriptor {
            nextInChain: std::ptr::null(),
            label: arena.label(descriptor.label),
            entryCount: entry_count,
            entries,
        };
        let raw = self
            .shared
            .create_scoped("BindGroupLayout", |api, device| unsafe {
                (api.wgpuDeviceCreateBindGroupLayout)(device, &desc)
            })?;
        Ok(BindGroupLayout {
            device: Arc::clone(&self.shared),
            handle: HandleCell::new(raw),
        })
    }

    pub fn create_bind_group(&self, descriptor: &BindGroupDescriptor<'_>) -> Result<BindGroup> {
        let mut arena = CallArena::new();
        let native_entries = descriptor
            .entries
            .iter()
            .map(|entry| {
                let mut native = WGPUBindGroupEntry {
                    nextInChain: std::ptr::null(),
                    binding: entry.binding,
                    buffer: std::ptr::null_mut(),
                    offset: 0,
                    size: 0,
                    sampler: std::ptr::null_mut(),
                    textureView: std::ptr::null_mut(),
                };
                match entry.resource {
                    BindingResource::Buffer {
                        buffer,
                        offset,
                        size,
                    } => {
                        native.buffer = buffer.handle.get();
                        native.offset = offset;
                        native.size = size_or_whole(size);
                    }
                    BindingResource::Sampler(sampler) => {
                        native.sampler = sampler.handle.get();
                    }
                    BindingResource::TextureView(view) => {
                        native.textureView = view.handle.get();
                    }
                }
                native
            })
            .collect::<Vec<_>>();
        let (entry_count, entries) = arena.slice(native_entries);
        let desc = WGPUBindGroupDescriptor {
            nextInChain: std::ptr::null(),
            label: arena.label(descriptor.label),
            layout: descriptor.layout.handle.get(),
            entryCount: entry_count,
            entries,
        };
        let raw = self
            .shared
            .create_scoped("BindGroup", |api, device| unsafe {
                (api.wgpuDeviceCreateBindGroup)(device, &desc)
            })?;
        Ok(BindGroup {
            device: Arc::clone(&self.shared),
            handle: HandleCell::new(raw),
        })
    }
}

impl BindGroupLayout {
    pub(crate) fn from_raw(device: Arc<DeviceShared>, raw: WGPUBindGroupLayout) -> Self {
        Self {
            device,
            handle: HandleCell::new(raw),
        }
    }
}

impl Drop for BindGroupLayout {
    fn drop(&mut self) {
        if let Some(raw) = self.handle.take() {
            unsafe { (self.device.api.wgpuBindGroupLayoutDrop)(raw) };
        }
    }
}

impl Drop for BindGroup {
    fn drop(&mut self) {
        if let Some(raw) = self.handle.take() {
            unsafe { (self.device.api.wgpuBindGroupDrop)(raw) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unused_binding_kinds_marshal_as_zero() {
        let entry = BindGroupLayoutEntry {
            binding: 3,
            visibility: ShaderStages::COMPUTE,
            ty: BindingType::Buffer {
                ty: BufferBindingType::Storage,
                has_dynamic_offset: false,
                min_binding_size: 16,
            },
        };
        let native = layout_entry_to_native(&entry);
        assert_eq!(native.binding, 3);
        assert_eq!(native.visibility, 4);
        assert_eq!(native.buffer.type_, BufferBindingType::Storage.to_raw());
        assert_eq!(native.buffer.minBindingSize, 16);
        assert_eq!(native.sampler.type_, 0);
        assert_eq!(native.texture.sampleType, 0);
        assert_eq!(native.storageTexture.access, 0);
    }

    #[test]
    fn texture_binding_marshals_its_dimension() {
        let entry = BindGroupLayoutEntry {
            binding: 0,
            visibility: ShaderStages::FRAGMENT,
            ty: BindingType::Texture {
                sample_type: TextureSampleType::Float,
                view_dimension: TextureViewDimension::D2Array,
                multisampled: false,
            },
        };
        let native = layout_entry_to_native(&entry);
        assert_eq!(native.texture.sampleType, 1);
        assert_eq!(native.texture.viewDimension, 3);
        assert_eq!(native.buffer.type_, 0);
    }
}
