//! Sampler management

use std::sync::Arc;

use crate::device::{Device, DeviceShared};
use crate::enums::{AddressMode, CompareFunction, FilterMode, MipmapFilterMode};
use crate::error::Result;
use crate::handle::HandleCell;
use crate::marshal::CallArena;
use crate::native::*;

/// Sampler descriptor for creating samplers
#[derive(Debug, Clone)]
pub struct SamplerDescriptor<'a> {
    pub label: &'a str,
    pub address_mode_u: AddressMode,
    pub address_mode_v: AddressMode,
    pub address_mode_w: AddressMode,
    pub mag_filter: FilterMode,
    pub min_filter: FilterMode,
    pub mipmap_filter: MipmapFilterMode,
    pub lod_min_clamp: f32,
    pub lod_max_clamp: f32,
    pub compare: CompareFunction,
    pub max_anisotropy: u16,
}

impl Default for SamplerDescriptor<'_> {
    fn default() -> Self {
        Self {
            label: "",
            address_mode_u: AddressMode::default(),
            address_mode_v: AddressMode::default(),
            address_mode_w: AddressMode::default(),
            mag_filter: FilterMode::default(),
            min_filter: FilterMode::default(),
            mipmap_filter: MipmapFilterMode::default(),
            lod_min_clamp: 0.0,
            lod_max_clamp: 32.0,
            compare: CompareFunction::Undefined,
            max_anisotropy: 1,
        }
    }
}

pub struct Sampler {
    pub(crate) device: Arc<DeviceShared>,
    pub(crate) handle: HandleCell<WGPUSamplerImpl>,
}

impl Device {
    pub fn create_sampler(&self, descriptor: &SamplerDescriptor<'_>) -> Result<Sampler> {
        let mut arena = CallArena::new();
        let desc = WGPUSamplerDescriptor {
            nextInChain: std::ptr::null(),
            label: arena.label(descriptor.label),
            addressModeU: descriptor.address_mode_u.to_raw(),
            addressModeV: descriptor.address_mode_v.to_raw(),
            addressModeW: descriptor.address_mode_w.to_raw(),
            magFilter: descriptor.mag_filter.to_raw(),
            minFilter: descriptor.min_filter.to_raw(),
            mipmapFilter: descriptor.mipmap_filter.to_raw(),
            lodMinClamp: descriptor.lod_min_clamp,
            lodMaxClamp: descriptor.lod_max_clamp,
            compare: descriptor.compare.to_raw(),
            maxAnisotropy: descriptor.max_anisotropy,
        };
        let raw = self
            .shared
            .create_scoped("Sampler", |api, device| unsafe {
                (api.wgpuDeviceCreateSampler)(device, &desc)
            })?;
        Ok(Sampler {
            device: Arc::clone(&self.shared),
            handle: HandleCell::new(raw),
        })
    }
}

impl Drop for Sampler {
    fn drop(&mut self) {
        if let Some(raw) = self.handle.take() {
            unsafe { (self.device.api.wgpuSamplerDrop)(raw) };
        }
    }
}
