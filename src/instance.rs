//! Entry object: library resolution, adapter requests, surfaces, native logs.

use std::os::raw::c_void;
use std::sync::Arc;

use raw_window_handle::{HasDisplayHandle, HasWindowHandle, RawDisplayHandle, RawWindowHandle};

use crate::adapter::Adapter;
use crate::callback::{self, log_trampoline, request_adapter_trampoline, AdapterResponse, Completion};
use crate::enums::{BackendType, PowerPreference};
use crate::error::{GabbroError, Result};
use crate::marshal::CallArena;
use crate::native::api::Api;
use crate::native::*;
use crate::surface::Surface;

/// Verbosity of the native library's own log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeLogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl NativeLogLevel {
    fn to_raw(self) -> WGPULogLevel {
        match self {
            Self::Off => WGPULogLevel_Off,
            Self::Error => WGPULogLevel_Error,
            Self::Warn => WGPULogLevel_Warn,
            Self::Info => WGPULogLevel_Info,
            Self::Debug => WGPULogLevel_Debug,
            Self::Trace => WGPULogLevel_Trace,
        }
    }
}

/// How to pick an adapter.
#[derive(Default)]
pub struct RequestAdapterOptions<'a> {
    pub compatible_surface: Option<&'a Surface>,
    pub power_preference: PowerPreference,
    pub force_fallback_adapter: bool,
    /// Restrict the request to one backend (wgpu-native extension).
    pub backend: Option<BackendType>,
}

/// Platform payload for surface creation, for callers holding bare window
/// system pointers. [`Instance::create_surface`] derives one of these from a
/// `raw-window-handle` window instead.
pub enum SurfaceTarget {
    WindowsHwnd {
        hinstance: *mut c_void,
        hwnd: *mut c_void,
    },
    XlibWindow {
        display: *mut c_void,
        window: u32,
    },
    XcbWindow {
        connection: *mut c_void,
        window: u32,
    },
    WaylandSurface {
        display: *mut c_void,
        surface: *mut c_void,
    },
    MetalLayer {
        layer: *mut c_void,
    },
    AndroidNativeWindow {
        window: *mut c_void,
    },
}

/// Entry object owning the resolved native library.
///
/// All calls into the native library are synchronous procedure calls made on
/// the caller's thread; the instance itself imposes no thread affinity.
/// Cloning is cheap and shares the underlying library.
#[derive(Clone)]
pub struct Instance {
    pub(crate) api: Arc<Api>,
}

impl Instance {
    fn from_api(api: Api) -> Self {
        // Route the native library's log output into the `log` facade. Off
        // by default until raised via `set_native_log_level`.
        unsafe { (api.wgpuSetLogCallback)(log_trampoline) };
        Self { api: Arc::new(api) }
    }

    /// Uses the wgpu_native the binary was linked against.
    #[cfg(feature = "link")]
    pub fn new() -> Self {
        Self::from_api(Api::linked())
    }

    /// Loads wgpu_native from a shared library at `path`.
    ///
    /// # Safety
    /// See [`Api::load`].
    #[cfg(feature = "dlopen")]
    pub unsafe fn from_library(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Ok(Self::from_api(Api::load(path.as_ref())?))
    }

    /// Like [`Instance::from_library`], refusing to execute a library whose
    /// SHA-256 digest does not match `sha256_hex`.
    ///
    /// # Safety
    /// See [`Api::load`].
    #[cfg(feature = "dlopen")]
    pub unsafe fn from_library_verified(
        path: impl AsRef<std::path::Path>,
        sha256_hex: &str,
    ) -> Result<Self> {
        Ok(Self::from_api(Api::load_verified(path.as_ref(), sha256_hex)?))
    }

    /// Version of the loaded native library, as packed by `wgpuGetVersion`.
    pub fn version(&self) -> Version {
        Version(unsafe { (self.api.wgpuGetVersion)() })
    }

    pub fn set_native_log_level(&self, level: NativeLogLevel) {
        unsafe { (self.api.wgpuSetLogLevel)(level.to_raw()) };
    }

    /// Picks an adapter matching `options`.
    ///
    /// The native callback resolves before the call returns for this entry
    /// point; no adapter matching the options comes back as
    /// [`GabbroError::RequestAdapterFailed`].
    pub fn request_adapter(&self, options: &RequestAdapterOptions<'_>) -> Result<Adapter> {
        let mut arena = CallArena::new();

        let next_in_chain = match options.backend {
            Some(backend) => arena
                .alloc(WGPUAdapterExtras {
                    chain: WGPUChainedStruct {
                        next: std::ptr::null(),
                        sType: WGPUSType_AdapterExtras,
                    },
                    backend: backend.to_raw(),
                })
                .cast(),
            None => std::ptr::null(),
        };
        let opts = WGPURequestAdapterOptions {
            nextInChain: next_in_chain,
            compatibleSurface: options
                .compatible_surface
                .map_or(std::ptr::null_mut(), |s| s.handle.get()),
            powerPreference: options.power_preference.to_raw(),
            forceFallbackAdapter: options.force_fallback_adapter,
        };

        let completion = Completion::<AdapterResponse>::new();
        let token = callback::table().register_once(completion.clone());
        unsafe {
            (self.api.wgpuInstanceRequestAdapter)(
                std::ptr::null_mut(),
                &opts,
                request_adapter_trampoline,
                token.as_userdata(),
            );
        }
        drop(arena);

        let Some(response) = completion.take() else {
            callback::table().unregister(token);
            return Err(GabbroError::CallbackNotResolved {
                operation: "request_adapter",
            });
        };
        if response.status != WGPURequestAdapterStatus_Success || response.adapter.0.is_null() {
            return Err(GabbroError::RequestAdapterFailed {
                message: response.message,
            });
        }
        Ok(Adapter::from_raw(Arc::clone(&self.api), response.adapter.0))
    }

    /// Creates a surface for a window implementing the `raw-window-handle`
    /// traits.
    pub fn create_surface(
        &self,
        window: &(impl HasWindowHandle + HasDisplayHandle),
    ) -> Result<Surface> {
        let window_handle = window
            .window_handle()
            .map_err(|_| GabbroError::Acquisition {
                resource: "window handle",
            })
            .map(|h| h.as_raw())?;
        let display_handle = window
            .display_handle()
            .map_err(|_| GabbroError::Acquisition {
                resource: "display handle",
            })
            .map(|h| h.as_raw())?;

        let target = match (window_handle, display_handle) {
            (RawWindowHandle::Win32(window), _) => SurfaceTarget::WindowsHwnd {
                hinstance: window
                    .hinstance
                    .map_or(std::ptr::null_mut(), |h| h.get() as *mut c_void),
                hwnd: window.hwnd.get() as *mut c_void,
            },
            (RawWindowHandle::Xlib(window), RawDisplayHandle::Xlib(display)) => {
                SurfaceTarget::XlibWindow {
                    display: display
                        .display
                        .map_or(std::ptr::null_mut(), |d| d.as_ptr()),
                    window: window.window as u32,
                }
            }
            (RawWindowHandle::Xcb(window), RawDisplayHandle::Xcb(display)) => {
                SurfaceTarget::XcbWindow {
                    connection: display
                        .connection
                        .map_or(std::ptr::null_mut(), |c| c.as_ptr()),
                    window: window.window.get(),
                }
            }
            (RawWindowHandle::Wayland(window), RawDisplayHandle::Wayland(display)) => {
                SurfaceTarget::WaylandSurface {
                    display: display.display.as_ptr(),
                    surface: window.surface.as_ptr(),
                }
            }
            (RawWindowHandle::AndroidNdk(window), _) => SurfaceTarget::AndroidNativeWindow {
                window: window.a_native_window.as_ptr(),
            },
            _ => {
                return Err(GabbroError::Acquisition {
                    resource: "surface (unsupported window system; use create_surface_unsafe)",
                })
            }
        };
        unsafe { self.create_surface_unsafe(target) }
    }

    /// Creates a surface from bare platform pointers.
    ///
    /// # Safety
    /// The pointers must identify a live window/layer of the stated kind and
    /// stay valid for the lifetime of the surface.
    pub unsafe fn create_surface_unsafe(&self, target: SurfaceTarget) -> Result<Surface> {
        let mut arena = CallArena::new();
        let chain = match target {
            SurfaceTarget::WindowsHwnd { hinstance, hwnd } => arena
                .alloc(WGPUSurfaceDescriptorFromWindowsHWND {
                    chain: WGPUChainedStruct {
                        next: std::ptr::null(),
                        sType: WGPUSType_SurfaceDescriptorFromWindowsHWND,
                    },
                    hinstance,
                    hwnd,
                })
                .cast::<WGPUChainedStruct>(),
            SurfaceTarget::XlibWindow { display, window } => arena
                .alloc(WGPUSurfaceDescriptorFromXlibWindow {
                    chain: WGPUChainedStruct {
                        next: std::ptr::null(),
                        sType: WGPUSType_SurfaceDescriptorFromXlibWindow,
                    },
                    display,
                    window,
                })
                .cast(),
            SurfaceTarget::XcbWindow { connection, window } => arena
                .alloc(WGPUSurfaceDescriptorFromXcbWindow {
                    chain: WGPUChainedStruct {
                        next: std::ptr::null(),
                        sType: WGPUSType_SurfaceDescriptorFromXcbWindow,
                    },
                    connection,
                    window,
                })
                .cast(),
            SurfaceTarget::WaylandSurface { display, surface } => arena
                .alloc(WGPUSurfaceDescriptorFromWaylandSurface {
                    chain: WGPUChainedStruct {
                        next: std::ptr::null(),
                        sType: WGPUSType_SurfaceDescriptorFromWaylandSurface,
                    },
                    display,
                    surface,
                })
                .cast(),
            SurfaceTarget::MetalLayer { layer } => arena
                .alloc(WGPUSurfaceDescriptorFromMetalLayer {
                    chain: WGPUChainedStruct {
                        next: std::ptr::null(),
                        sType: WGPUSType_SurfaceDescriptorFromMetalLayer,
                    },
                    layer,
                })
                .cast(),
            SurfaceTarget::AndroidNativeWindow { window } => arena
                .alloc(WGPUSurfaceDescriptorFromAndroidNativeWindow {
                    chain: WGPUChainedStruct {
                        next: std::ptr::null(),
                        sType: WGPUSType_SurfaceDescriptorFromAndroidNativeWindow,
                    },
                    window,
                })
                .cast(),
        };
        let desc = WGPUSurfaceDescriptor {
            nextInChain: chain,
            label: std::ptr::null(),
        };
        let raw = (self.api.wgpuInstanceCreateSurface)(std::ptr::null_mut(), &desc);
        drop(arena);
        if raw.is_null() {
            return Err(GabbroError::Acquisition { resource: "Surface" });
        }
        Ok(Surface::from_raw(Arc::clone(&self.api), raw))
    }
}

/// Packed native library version, `major.minor.patch.build`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version(pub u32);

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.0 >> 24 & 0xFF,
            self.0 >> 16 & 0xFF,
            self.0 >> 8 & 0xFF,
            self.0 & 0xFF
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_formats_packed_bytes() {
        assert_eq!(Version(0x00_0D_02_01).to_string(), "0.13.2.1");
        assert_eq!(Version(0).to_string(), "0.0.0.0");
    }
}
