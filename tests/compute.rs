//! End-to-end smoke tests against a real `wgpu_native` shared library.
//!
//! Ignored by default: they need a GPU (or software adapter) and the path to
//! the shared library in `GABBRO_NATIVE_LIB`.

use std::sync::{Arc, Mutex};

use gabbro::{
    Adapter, BindGroupDescriptor, BindGroupEntry, BindingResource, BufferDescriptor, BufferUsages,
    ComputePipelineDescriptor, Device, DeviceDescriptor, Instance, Limits, MapMode, PowerPreference,
    RequestAdapterOptions, ShaderModuleDescriptor, ShaderSource,
};

const DOUBLE_SHADER: &str = r#"
@group(0) @binding(0)
var<storage, read_write> values: array<u32>;

@compute @workgroup_size(64)
fn main(@builtin(global_invocation_id) id: vec3<u32>) {
    if (id.x < arrayLength(&values)) {
        values[id.x] = values[id.x] * 2u;
    }
}
"#;

fn open_device() -> (Instance, Adapter, Device) {
    let _ = env_logger::builder().is_test(true).try_init();
    let path = std::env::var("GABBRO_NATIVE_LIB")
        .expect("set GABBRO_NATIVE_LIB to the wgpu_native shared library");
    let instance = unsafe { Instance::from_library(std::path::Path::new(&path)) }
        .expect("load native library");
    let adapter = instance
        .request_adapter(&RequestAdapterOptions {
            power_preference: PowerPreference::HighPerformance,
            ..Default::default()
        })
        .expect("request adapter");
    let device = adapter
        .request_device(&DeviceDescriptor::default())
        .expect("request device");
    (instance, adapter, device)
}

#[test]
#[ignore = "needs a GPU and GABBRO_NATIVE_LIB"]
fn compute_shader_doubles_storage_buffer() {
    let (_instance, _adapter, device) = open_device();
    let queue = device.queue();

    let input: Vec<u32> = (0..256u32).collect();
    let byte_len = (input.len() * std::mem::size_of::<u32>()) as u64;

    let storage = device
        .create_buffer_init(&gabbro::BufferInitDescriptor {
            label: "doubling input",
            contents: bytemuck::cast_slice(&input),
            usage: BufferUsages::STORAGE | BufferUsages::COPY_SRC,
        })
        .expect("storage buffer");
    let mut readback = device
        .create_buffer(&BufferDescriptor {
            label: "readback",
            size: byte_len,
            usage: BufferUsages::MAP_READ | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
        .expect("readback buffer");

    let module = device
        .create_shader_module(&ShaderModuleDescriptor {
            label: "doubler",
            source: ShaderSource::Wgsl(DOUBLE_SHADER),
        })
        .expect("shader module");
    let pipeline = device
        .create_compute_pipeline(&ComputePipelineDescriptor {
            label: "doubler",
            layout: None,
            module: &module,
            entry_point: "main",
        })
        .expect("compute pipeline");
    let layout = pipeline.get_bind_group_layout(0).expect("derived layout");
    let bind_group = device
        .create_bind_group(&BindGroupDescriptor {
            label: "doubler bindings",
            layout: &layout,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: BindingResource::Buffer {
                    buffer: &storage,
                    offset: 0,
                    size: 0,
                },
            }],
        })
        .expect("bind group");

    let encoder = device.create_command_encoder("doubling").expect("encoder");
    {
        let pass = encoder.begin_compute_pass("doubling").expect("pass");
        pass.set_pipeline(&pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        pass.dispatch_workgroups((input.len() as u32 + 63) / 64, 1, 1);
        pass.end();
    }
    encoder.copy_buffer_to_buffer(&storage, 0, &readback, 0, byte_len);
    let commands = encoder.finish("doubling").expect("finish");
    let index = queue.submit([commands]);
    assert!(device.poll(true, Some(&index)));

    let map_result: Arc<Mutex<Option<gabbro::Result<()>>>> = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&map_result);
    readback.map_async(MapMode::READ, 0, byte_len as usize, move |result| {
        *slot.lock().unwrap() = Some(result);
    });
    device.poll(true, None);
    let mapped = map_result.lock().unwrap().take().expect("map callback ran");
    mapped.expect("mapping succeeded");

    let bytes = readback.mapped_range(0, byte_len as usize).expect("mapped");
    let values: &[u32] = bytemuck::cast_slice(bytes);
    for (i, &v) in values.iter().enumerate() {
        assert_eq!(v, (i as u32) * 2);
    }
    readback.unmap();
}

#[test]
#[ignore = "needs a GPU and GABBRO_NATIVE_LIB"]
fn unsatisfiable_limits_fail_device_request() {
    let (_instance, adapter, _device) = open_device();
    let result = adapter.request_device(&DeviceDescriptor {
        required_limits: Some(Limits {
            max_bind_groups: u32::MAX,
            ..Limits::default()
        }),
        ..Default::default()
    });
    match result {
        Err(gabbro::GabbroError::RequestDeviceFailed { message }) => {
            assert!(!message.is_empty(), "failure reason should be reported");
        }
        Err(other) => panic!("expected a device request failure, got {other}"),
        Ok(_) => panic!("device request should not satisfy impossible limits"),
    }
}

#[test]
#[ignore = "needs a GPU and GABBRO_NATIVE_LIB"]
fn bad_descriptor_fails_on_the_creating_call() {
    let (_instance, _adapter, device) = open_device();
    // Mappable buffers only allow COPY_SRC or COPY_DST alongside the map bit.
    let result = device.create_buffer(&BufferDescriptor {
        label: "invalid usage",
        size: 16,
        usage: BufferUsages::MAP_READ | BufferUsages::STORAGE,
        mapped_at_creation: false,
    });
    assert!(result.is_err());
    assert!(device.take_uncaptured_error().is_none());
}
