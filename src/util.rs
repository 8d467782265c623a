//! Convenience helpers layered on the core API

use crate::buffer::{Buffer, BufferDescriptor};
use crate::device::Device;
use crate::enums::BufferUsages;
use crate::error::Result;
use crate::limits::COPY_BUFFER_ALIGNMENT;
use crate::queue::Queue;

/// Rounds `unpadded_size` up to a valid copy-capable buffer size. Copy
/// sources and destinations must be non-empty multiples of 4 bytes.
pub fn padded_buffer_size(unpadded_size: u64) -> u64 {
    let align_mask = COPY_BUFFER_ALIGNMENT - 1;
    ((unpadded_size + align_mask) & !align_mask).max(COPY_BUFFER_ALIGNMENT)
}

pub struct BufferInitDescriptor<'a> {
    pub label: &'a str,
    pub contents: &'a [u8],
    pub usage: BufferUsages,
}

impl Device {
    /// Creates a buffer pre-filled with `contents`, padded so it stays usable
    /// as a copy source or destination.
    pub fn create_buffer_init(&self, descriptor: &BufferInitDescriptor<'_>) -> Result<Buffer> {
        if descriptor.contents.is_empty() {
            return self.create_buffer(&BufferDescriptor {
                label: descriptor.label,
                size: 0,
                usage: descriptor.usage,
                mapped_at_creation: false,
            });
        }
        let size = padded_buffer_size(descriptor.contents.len() as u64);
        let mut buffer = self.create_buffer(&BufferDescriptor {
            label: descriptor.label,
            size,
            usage: descriptor.usage,
            mapped_at_creation: true,
        })?;
        if let Some(mapped) = buffer.mapped_range_mut(0, size as usize) {
            mapped[..descriptor.contents.len()].copy_from_slice(descriptor.contents);
        }
        buffer.unmap();
        Ok(buffer)
    }
}

impl Queue {
    /// [`Queue::write_buffer`] for plain-old-data slices.
    pub fn write_buffer_of<T: bytemuck::NoUninit>(&self, buffer: &Buffer, offset: u64, data: &[T]) {
        self.write_buffer(buffer, offset, bytemuck::cast_slice(data));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_rounds_up_to_copy_alignment() {
        assert_eq!(padded_buffer_size(0), 4);
        assert_eq!(padded_buffer_size(1), 4);
        assert_eq!(padded_buffer_size(4), 4);
        assert_eq!(padded_buffer_size(5), 8);
        assert_eq!(padded_buffer_size(256), 256);
        assert_eq!(padded_buffer_size(257), 260);
    }
}
