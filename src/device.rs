//! GPU device wrapper and the error scope protocol around its factories.

use std::sync::Arc;

use crate::callback::{
    self, pop_error_scope_trampoline, uncaptured_error_trampoline, Completion, ScopeResponse,
};
use crate::enums::FeatureName;
use crate::error::{ErrorSink, GabbroError, Result};
use crate::handle::HandleCell;
use crate::limits::{self, Limits};
use crate::native::api::Api;
use crate::native::*;
use crate::queue::Queue;

/// Errors an error scope can capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorFilter {
    Validation,
    OutOfMemory,
}

impl ErrorFilter {
    fn to_raw(self) -> WGPUErrorFilter {
        match self {
            Self::Validation => WGPUErrorFilter_Validation,
            Self::OutOfMemory => WGPUErrorFilter_OutOfMemory,
        }
    }
}

/// Index of one queue submission, for [`Device::poll`] to wait on.
pub struct SubmissionIndex {
    pub(crate) raw: WGPUWrappedSubmissionIndex,
}

/// State shared between a device and everything created from it.
///
/// Child wrappers (buffers, pipelines, encoders) hold an `Arc` to this, so
/// the native device outlives any child that can still reach the library.
pub(crate) struct DeviceShared {
    pub(crate) api: Arc<Api>,
    pub(crate) handle: HandleCell<WGPUDeviceImpl>,
    pub(crate) sink: Arc<ErrorSink>,
    error_token: callback::Token,
}

impl DeviceShared {
    pub(crate) fn raw(&self) -> WGPUDevice {
        self.handle.get()
    }

    /// Runs `create` inside a validation error scope and resolves the scope
    /// synchronously, so a validation failure is attributed to this exact
    /// call instead of surfacing later through the uncaptured-error sink.
    pub(crate) fn create_scoped<T>(
        &self,
        resource: &'static str,
        create: impl FnOnce(&Api, WGPUDevice) -> *mut T,
    ) -> Result<*mut T> {
        let api = &self.api;
        let device = self.raw();
        unsafe { (api.wgpuDevicePushErrorScope)(device, WGPUErrorFilter_Validation) };
        let raw = create(api, device);

        let completion = Completion::<ScopeResponse>::new();
        let token = callback::table().register_once(completion.clone());
        unsafe {
            (api.wgpuDevicePopErrorScope)(device, pop_error_scope_trampoline, token.as_userdata())
        };
        let Some(response) = completion.take() else {
            callback::table().unregister(token);
            return Err(GabbroError::CallbackNotResolved {
                operation: resource,
            });
        };
        if response.kind != WGPUErrorType_NoError {
            return Err(GabbroError::native(
                callback::error_kind_from_native(response.kind),
                response.message,
            ));
        }
        if raw.is_null() {
            return Err(GabbroError::Acquisition { resource });
        }
        Ok(raw)
    }
}

impl Drop for DeviceShared {
    fn drop(&mut self) {
        if let Some(raw) = self.handle.take() {
            unsafe { (self.api.wgpuDeviceDrop)(raw) };
        }
        self.sink.report_undrained();
        callback::table().unregister(self.error_token);
    }
}

/// An open connection to a GPU. Created through
/// [`Adapter::request_device`](crate::Adapter::request_device).
pub struct Device {
    pub(crate) shared: Arc<DeviceShared>,
}

impl Device {
    /// Wraps a freshly acquired native device and registers its
    /// uncaptured-error sink.
    pub(crate) fn from_raw(api: Arc<Api>, raw: WGPUDevice) -> Self {
        let sink = Arc::new(ErrorSink::new());
        let error_token = callback::table().register_persistent(Arc::clone(&sink));
        unsafe {
            (api.wgpuDeviceSetUncapturedErrorCallback)(
                raw,
                uncaptured_error_trampoline,
                error_token.as_userdata(),
            );
        }
        Self {
            shared: Arc::new(DeviceShared {
                api,
                handle: HandleCell::new(raw),
                sink,
                error_token,
            }),
        }
    }

    /// The device's default queue.
    pub fn queue(&self) -> Queue {
        let raw = unsafe { (self.shared.api.wgpuDeviceGetQueue)(self.shared.raw()) };
        Queue::from_raw(Arc::clone(&self.shared), raw)
    }

    /// Processes outstanding device work. With `wait` the call blocks until
    /// the submission in `wait_for` (or all work) completes. Returns whether
    /// the queue is empty.
    pub fn poll(&self, wait: bool, wait_for: Option<&SubmissionIndex>) -> bool {
        let index = wait_for
            .map(|i| &i.raw as *const WGPUWrappedSubmissionIndex)
            .unwrap_or(std::ptr::null());
        unsafe { (self.shared.api.wgpuDevicePoll)(self.shared.raw(), wait, index) }
    }

    pub fn limits(&self) -> Limits {
        limits::query_limits(|supported| unsafe {
            (self.shared.api.wgpuDeviceGetLimits)(self.shared.raw(), supported)
        })
        .unwrap_or_default()
    }

    pub fn features(&self) -> Vec<FeatureName> {
        let api = &self.shared.api;
        let device = self.shared.raw();
        let count = unsafe { (api.wgpuDeviceEnumerateFeatures)(device, std::ptr::null_mut()) };
        if count == 0 {
            return Vec::new();
        }
        let mut raw = vec![0u32; count];
        unsafe { (api.wgpuDeviceEnumerateFeatures)(device, raw.as_mut_ptr()) };
        raw.into_iter().filter_map(FeatureName::from_raw).collect()
    }

    pub fn has_feature(&self, feature: FeatureName) -> bool {
        unsafe { (self.shared.api.wgpuDeviceHasFeature)(self.shared.raw(), feature.to_raw()) }
    }

    /// Opens an error scope capturing errors of the given kind. Scopes nest;
    /// each push must be matched by a [`Device::pop_error_scope`].
    pub fn push_error_scope(&self, filter: ErrorFilter) {
        unsafe { (self.shared.api.wgpuDevicePushErrorScope)(self.shared.raw(), filter.to_raw()) };
    }

    /// Closes the innermost error scope and returns the error it captured,
    /// if any.
    pub fn pop_error_scope(&self) -> Result<Option<GabbroError>> {
        let completion = Completion::<ScopeResponse>::new();
        let token = callback::table().register_once(completion.clone());
        unsafe {
            (self.shared.api.wgpuDevicePopErrorScope)(
                self.shared.raw(),
                pop_error_scope_trampoline,
                token.as_userdata(),
            )
        };
        let Some(response) = completion.take() else {
            callback::table().unregister(token);
            return Err(GabbroError::CallbackNotResolved {
                operation: "pop_error_scope",
            });
        };
        if response.kind == WGPUErrorType_NoError {
            Ok(None)
        } else {
            Ok(Some(GabbroError::native(
                callback::error_kind_from_native(response.kind),
                response.message,
            )))
        }
    }

    /// Takes the pending uncaptured error, if the native library reported one
    /// outside any error scope since the last call.
    pub fn take_uncaptured_error(&self) -> Option<GabbroError> {
        self.shared.sink.drain()
    }
}
