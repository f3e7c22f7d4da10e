//! The frame provider stub.
//!
//! `FrameProvider` is the safe-Rust core both C-ABI entry points delegate
//! to. It is responsible for:
//! - Writing the configured frame descriptor into present output slots
//! - Filling the caller's buffer with the deterministic ramp pattern
//! - Emitting one diagnostic line per call with all parameter identities
//!
//! The provider MUST NOT:
//! - Hold state across calls
//! - Write past the shape's pattern region
//! - Fail for any reason other than an absent frame buffer

use std::sync::Arc;

use crate::diag::{DiagnosticSink, StderrSink};
use crate::frame::{CameraHandle, FrameDescriptor, FrameOutputs, StatusCode};
use crate::pattern;

/// Stateless single-frame provider.
///
/// Safe to share across threads; concurrent grabs are fine as long as
/// callers do not pass overlapping buffers.
pub struct FrameProvider {
    shape: FrameDescriptor,
    sink: Arc<dyn DiagnosticSink>,
}

impl FrameProvider {
    /// Provider with the given shape, diagnostics to standard error.
    pub fn new(shape: FrameDescriptor) -> Self {
        Self::with_sink(shape, Arc::new(StderrSink))
    }

    pub fn with_sink(shape: FrameDescriptor, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { shape, sink }
    }

    pub fn shape(&self) -> FrameDescriptor {
        self.shape
    }

    /// Grab a single frame into the caller's output slots.
    ///
    /// Present descriptor slots always receive the configured constants,
    /// independent of the final status; absent ones are silently skipped.
    /// The buffer, when present, gets the ramp pattern over the pattern
    /// region (clamped to the buffer length, never past
    /// [`FrameDescriptor::frame_bytes`]). An absent buffer is the one
    /// recognized failure.
    pub fn single_frame(&self, handle: CameraHandle, outputs: FrameOutputs<'_>) -> StatusCode {
        self.sink.record(&format!(
            "[qhy-stub] single_frame handle={:#x} w={} h={} bpp={} ch={} imgdata={}",
            handle.into_raw(),
            fmt_slot(slot_addr(&outputs.width)),
            fmt_slot(slot_addr(&outputs.height)),
            fmt_slot(slot_addr(&outputs.bits_per_pixel)),
            fmt_slot(slot_addr(&outputs.channels)),
            fmt_slot(outputs.buffer.as_deref().map(|b| b.as_ptr() as usize)),
        ));

        if let Some(width) = outputs.width {
            *width = self.shape.width;
        }
        if let Some(height) = outputs.height {
            *height = self.shape.height;
        }
        if let Some(bits_per_pixel) = outputs.bits_per_pixel {
            *bits_per_pixel = self.shape.bits_per_pixel;
        }
        if let Some(channels) = outputs.channels {
            *channels = self.shape.channels;
        }

        match outputs.buffer {
            Some(buffer) => {
                let region = buffer.len().min(self.shape.frame_bytes());
                pattern::fill_pattern(&mut buffer[..region]);
                StatusCode::Success
            }
            None => {
                self.sink
                    .record("[qhy-stub] ERROR: frame buffer slot is null");
                StatusCode::Failure
            }
        }
    }

    /// Echo the address of the caller's buffer, or 0 when absent.
    ///
    /// Never fails. Exists so foreign callers can check what pointer the
    /// library actually received.
    pub fn buffer_address(&self, buffer: Option<&[u8]>) -> usize {
        let addr = buffer.map(|b| b.as_ptr() as usize).unwrap_or(0);
        self.sink.record(&format!(
            "[qhy-stub] buffer_address imgdata={}",
            fmt_slot(buffer.map(|b| b.as_ptr() as usize)),
        ));
        addr
    }
}

impl Default for FrameProvider {
    fn default() -> Self {
        Self::new(FrameDescriptor::stub_default())
    }
}

fn slot_addr<T: ?Sized>(slot: &Option<&mut T>) -> Option<usize> {
    slot.as_ref().map(|value| {
        let ptr: *const T = &**value;
        ptr.cast::<u8>() as usize
    })
}

fn fmt_slot(addr: Option<usize>) -> String {
    match addr {
        Some(addr) => format!("{addr:#x}"),
        None => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::MemorySink;
    use std::sync::Arc;

    fn recording_provider() -> (FrameProvider, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let provider = FrameProvider::with_sink(FrameDescriptor::stub_default(), sink.clone());
        (provider, sink)
    }

    #[test]
    fn grab_writes_descriptor_and_ramp() {
        let (provider, _sink) = recording_provider();
        let (mut w, mut h, mut bpp, mut ch) = (0u32, 0u32, 0u32, 0u32);
        let mut buffer = [0u8; 32];

        let status = provider.single_frame(
            CameraHandle::from_raw(0x1),
            FrameOutputs {
                width: Some(&mut w),
                height: Some(&mut h),
                bits_per_pixel: Some(&mut bpp),
                channels: Some(&mut ch),
                buffer: Some(&mut buffer),
            },
        );

        assert_eq!(status, StatusCode::Success);
        assert_eq!((w, h, bpp, ch), (8, 4, 8, 1));
        let expected: Vec<u8> = (0u8..32).collect();
        assert_eq!(&buffer[..], &expected[..]);
    }

    #[test]
    fn missing_buffer_fails_but_descriptor_slots_are_still_written() {
        let (provider, sink) = recording_provider();
        let (mut w, mut h, mut bpp, mut ch) = (0u32, 0u32, 0u32, 0u32);

        let status = provider.single_frame(
            CameraHandle::from_raw(0x1),
            FrameOutputs {
                width: Some(&mut w),
                height: Some(&mut h),
                bits_per_pixel: Some(&mut bpp),
                channels: Some(&mut ch),
                buffer: None,
            },
        );

        assert_eq!(status, StatusCode::Failure);
        assert_eq!((w, h, bpp, ch), (8, 4, 8, 1));

        // Call line plus the missing-buffer error line.
        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("single_frame"));
        assert!(lines[0].contains("imgdata=null"));
        assert!(lines[1].contains("ERROR"));
    }

    #[test]
    fn absent_descriptor_slots_are_skipped() {
        let (provider, _sink) = recording_provider();
        let mut bpp = 777u32;
        let mut buffer = [0u8; 32];

        let status = provider.single_frame(
            CameraHandle::default(),
            FrameOutputs {
                bits_per_pixel: Some(&mut bpp),
                buffer: Some(&mut buffer),
                ..Default::default()
            },
        );

        assert_eq!(status, StatusCode::Success);
        assert_eq!(bpp, 8);
    }

    #[test]
    fn oversized_buffer_only_gets_the_pattern_region() {
        let (provider, _sink) = recording_provider();
        let mut buffer = [0xaau8; 64];

        let status = provider.single_frame(
            CameraHandle::default(),
            FrameOutputs {
                buffer: Some(&mut buffer),
                ..Default::default()
            },
        );

        assert_eq!(status, StatusCode::Success);
        let expected: Vec<u8> = (0u8..32).collect();
        assert_eq!(&buffer[..32], &expected[..]);
        assert!(buffer[32..].iter().all(|b| *b == 0xaa));
    }

    #[test]
    fn short_buffer_is_clamped_not_overrun() {
        let (provider, _sink) = recording_provider();
        let mut buffer = [0u8; 16];

        let status = provider.single_frame(
            CameraHandle::default(),
            FrameOutputs {
                buffer: Some(&mut buffer),
                ..Default::default()
            },
        );

        assert_eq!(status, StatusCode::Success);
        let expected: Vec<u8> = (0u8..16).collect();
        assert_eq!(&buffer[..], &expected[..]);
    }

    #[test]
    fn successful_grab_emits_one_diagnostic_line() {
        let (provider, sink) = recording_provider();
        let mut buffer = [0u8; 32];

        provider.single_frame(
            CameraHandle::from_raw(0xdead),
            FrameOutputs {
                buffer: Some(&mut buffer),
                ..Default::default()
            },
        );

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("handle=0xdead"));
        assert!(lines[0].contains("w=null"));
    }

    #[test]
    fn buffer_address_echoes_identity_or_zero() {
        let (provider, sink) = recording_provider();
        let buffer = [0u8; 32];

        let addr = provider.buffer_address(Some(&buffer));
        assert_eq!(addr, buffer.as_ptr() as usize);
        assert_eq!(provider.buffer_address(None), 0);

        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("buffer_address"));
        assert!(lines[1].contains("imgdata=null"));
    }

    #[test]
    fn configured_shape_drives_descriptor_and_region() {
        let shape = FrameDescriptor {
            width: 4,
            height: 2,
            bits_per_pixel: 16,
            channels: 1,
        };
        let provider = FrameProvider::with_sink(shape, Arc::new(MemorySink::new()));
        let (mut w, mut bpp) = (0u32, 0u32);
        let mut buffer = [0xffu8; 32];

        let status = provider.single_frame(
            CameraHandle::default(),
            FrameOutputs {
                width: Some(&mut w),
                bits_per_pixel: Some(&mut bpp),
                buffer: Some(&mut buffer),
                ..Default::default()
            },
        );

        assert_eq!(status, StatusCode::Success);
        assert_eq!((w, bpp), (4, 16));
        // 4 * 2 * 1 * 2 bytes = 16-byte region; rest untouched.
        let expected: Vec<u8> = (0u8..16).collect();
        assert_eq!(&buffer[..16], &expected[..]);
        assert!(buffer[16..].iter().all(|b| *b == 0xff));
    }

    #[test]
    fn concurrent_grabs_into_disjoint_buffers() {
        let provider = Arc::new(FrameProvider::with_sink(
            FrameDescriptor::stub_default(),
            Arc::new(MemorySink::new()),
        ));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let provider = provider.clone();
                std::thread::spawn(move || {
                    let mut buffer = [0u8; 32];
                    let status = provider.single_frame(
                        CameraHandle::from_raw(i),
                        FrameOutputs {
                            buffer: Some(&mut buffer),
                            ..Default::default()
                        },
                    );
                    (status, buffer)
                })
            })
            .collect();

        let expected: Vec<u8> = (0u8..32).collect();
        for handle in handles {
            let (status, buffer) = handle.join().expect("grab thread");
            assert_eq!(status, StatusCode::Success);
            assert_eq!(&buffer[..], &expected[..]);
        }
    }
}
