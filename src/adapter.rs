//! GPU adapter handling

use std::ffi::CStr;
use std::sync::Arc;

use crate::callback::{self, request_device_trampoline, Completion, DeviceResponse};
use crate::device::Device;
use crate::enums::{AdapterType, BackendType, FeatureName, NativeFeatures};
use crate::error::{GabbroError, Result};
use crate::handle::HandleCell;
use crate::limits::{self, Limits};
use crate::marshal::CallArena;
use crate::native::api::Api;
use crate::native::*;

/// Identity of a physical adapter as reported by the native library.
#[derive(Debug, Clone)]
pub struct AdapterProperties {
    pub vendor_id: u32,
    pub device_id: u32,
    pub name: String,
    pub driver_description: String,
    pub adapter_type: AdapterType,
    pub backend_type: BackendType,
}

/// What to ask for when turning an adapter into a device.
#[derive(Default)]
pub struct DeviceDescriptor<'a> {
    pub label: &'a str,
    pub required_features: &'a [FeatureName],
    /// `None` requests the adapter-independent default limits.
    pub required_limits: Option<Limits>,
    pub native_features: NativeFeatures,
    /// Directory for an API trace of everything the device does.
    pub trace_path: Option<&'a str>,
}

/// A physical GPU (or software rasterizer) the native library can open.
pub struct Adapter {
    pub(crate) api: Arc<Api>,
    pub(crate) handle: HandleCell<WGPUAdapterImpl>,
}

impl Adapter {
    pub(crate) fn from_raw(api: Arc<Api>, raw: WGPUAdapter) -> Self {
        Self {
            api,
            handle: HandleCell::new(raw),
        }
    }

    pub(crate) fn raw(&self) -> WGPUAdapter {
        self.handle.get()
    }

    pub fn properties(&self) -> AdapterProperties {
        let mut props = WGPUAdapterProperties {
            nextInChain: std::ptr::null_mut(),
            vendorID: 0,
            deviceID: 0,
            name: std::ptr::null(),
            driverDescription: std::ptr::null(),
            adapterType: 0,
            backendType: 0,
        };
        unsafe { (self.api.wgpuAdapterGetProperties)(self.handle.get(), &mut props) };
        let read_str = |p: *const std::os::raw::c_char| {
            if p.is_null() {
                String::new()
            } else {
                unsafe { CStr::from_ptr(p) }.to_string_lossy().into_owned()
            }
        };
        AdapterProperties {
            vendor_id: props.vendorID,
            device_id: props.deviceID,
            name: read_str(props.name),
            driver_description: read_str(props.driverDescription),
            adapter_type: AdapterType::from_raw(props.adapterType).unwrap_or(AdapterType::Unknown),
            backend_type: BackendType::from_raw(props.backendType).unwrap_or(BackendType::Null),
        }
    }

    pub fn limits(&self) -> Limits {
        limits::query_limits(|supported| unsafe {
            (self.api.wgpuAdapterGetLimits)(self.handle.get(), supported)
        })
        .unwrap_or_default()
    }

    pub fn features(&self) -> Vec<FeatureName> {
        let adapter = self.handle.get();
        let count = unsafe { (self.api.wgpuAdapterEnumerateFeatures)(adapter, std::ptr::null_mut()) };
        if count == 0 {
            return Vec::new();
        }
        let mut raw = vec![0u32; count];
        unsafe { (self.api.wgpuAdapterEnumerateFeatures)(adapter, raw.as_mut_ptr()) };
        raw.into_iter().filter_map(FeatureName::from_raw).collect()
    }

    pub fn has_feature(&self, feature: FeatureName) -> bool {
        unsafe { (self.api.wgpuAdapterHasFeature)(self.handle.get(), feature.to_raw()) }
    }

    /// Opens a logical device on this adapter.
    ///
    /// The native callback resolves before the call returns for this entry
    /// point; a request the library rejects (unsupported limits or features)
    /// comes back as [`GabbroError::RequestDeviceFailed`].
    pub fn request_device(&self, descriptor: &DeviceDescriptor<'_>) -> Result<Device> {
        let mut arena = CallArena::new();

        let required_limits = {
            let extras = arena.alloc(WGPURequiredLimitsExtras {
                chain: WGPUChainedStruct {
                    next: std::ptr::null(),
                    sType: WGPUSType_RequiredLimitsExtras,
                },
                maxPushConstantSize: descriptor
                    .required_limits
                    .map_or(0, |l| l.max_push_constant_size),
                maxBufferSize: descriptor.required_limits.map_or(0, |l| l.max_buffer_size),
            });
            arena.alloc(WGPURequiredLimits {
                nextInChain: extras.cast(),
                limits: descriptor
                    .required_limits
                    .unwrap_or_default()
                    .to_native(),
            })
        };

        let (feature_count, features) = arena.slice(
            descriptor
                .required_features
                .iter()
                .map(|f| f.to_raw())
                .collect::<Vec<_>>(),
        );

        let extras = WGPUDeviceExtras {
            chain: WGPUChainedStruct {
                next: std::ptr::null(),
                sType: WGPUSType_DeviceExtras,
            },
            nativeFeatures: descriptor.native_features.bits(),
            label: arena.label(descriptor.label),
            tracePath: descriptor
                .trace_path
                .map_or(std::ptr::null(), |p| arena.cstr(p)),
        };
        let extras = arena.alloc(extras);

        let desc = WGPUDeviceDescriptor {
            nextInChain: extras.cast(),
            label: arena.label(descriptor.label),
            requiredFeaturesCount: feature_count,
            requiredFeatures: features,
            requiredLimits: required_limits,
            defaultQueue: WGPUQueueDescriptor {
                nextInChain: std::ptr::null(),
                label: std::ptr::null(),
            },
        };

        let completion = Completion::<DeviceResponse>::new();
        let token = callback::table().register_once(completion.clone());
        unsafe {
            (self.api.wgpuAdapterRequestDevice)(
                self.handle.get(),
                &desc,
                request_device_trampoline,
                token.as_userdata(),
            );
        }
        drop(arena);

        let Some(response) = completion.take() else {
            callback::table().unregister(token);
            return Err(GabbroError::CallbackNotResolved {
                operation: "request_device",
            });
        };
        if response.status != WGPURequestDeviceStatus_Success || response.device.0.is_null() {
            return Err(GabbroError::RequestDeviceFailed {
                message: response.message,
            });
        }
        Ok(Device::from_raw(Arc::clone(&self.api), response.device.0))
    }
}

impl Drop for Adapter {
    fn drop(&mut self) {
        if let Some(raw) = self.handle.take() {
            unsafe { (self.api.wgpuAdapterDrop)(raw) };
        }
    }
}
