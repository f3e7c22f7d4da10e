//! C-ABI entry points.
//!
//! These exports use the exact symbol names and signatures the host-side
//! ctypes declarations were written against, so a client built for the
//! vendor shared library loads this stub without modification:
//!
//! ```c
//! uint32_t  DummyGetQHYCCDSingleFrame(void* handle, uint32_t* w, uint32_t* h,
//!                                     uint32_t* bpp, uint32_t* ch,
//!                                     uint8_t* imgdata);
//! uintptr_t DummyBufferAddress(uint8_t* imgdata);
//! ```
//!
//! This layer only translates raw pointers into [`FrameOutputs`] option
//! slots and delegates to [`FrameProvider`]. Diagnostics go to standard
//! error, as the original shared library's did.

use std::ffi::c_void;
use std::slice;
use std::sync::OnceLock;

use crate::config::StubConfig;
use crate::diag::{DiagnosticSink, StderrSink};
use crate::frame::{CameraHandle, FrameDescriptor, FrameOutputs};
use crate::provider::FrameProvider;

/// Shape the C-ABI surface reports. Resolved once per process from
/// `QHY_STUB_*` configuration; a bad config falls back to the fixed
/// vendor shape rather than failing the load.
fn stub_shape() -> FrameDescriptor {
    static SHAPE: OnceLock<FrameDescriptor> = OnceLock::new();
    *SHAPE.get_or_init(|| match StubConfig::load() {
        Ok(cfg) => cfg.shape,
        Err(err) => {
            StderrSink.record(&format!(
                "[qhy-stub] invalid configuration, using default shape: {err:#}"
            ));
            FrameDescriptor::stub_default()
        }
    })
}

/// Grab a single stub frame.
///
/// Returns 0 on success, 1 when `imgdata` is null. Null descriptor
/// pointers are skipped, not errors. The handle is uninterpreted.
///
/// # Safety
///
/// Each non-null descriptor pointer must be valid for a `u32` write. A
/// non-null `imgdata` must point at a writable region of at least the
/// configured frame size (32 bytes for the default shape); this caller
/// precondition is not enforced.
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn DummyGetQHYCCDSingleFrame(
    handle: *mut c_void,
    w: *mut u32,
    h: *mut u32,
    bpp: *mut u32,
    ch: *mut u32,
    imgdata: *mut u8,
) -> u32 {
    let shape = stub_shape();
    let provider = FrameProvider::new(shape);

    let buffer = if imgdata.is_null() {
        None
    } else {
        Some(slice::from_raw_parts_mut(imgdata, shape.frame_bytes()))
    };

    provider
        .single_frame(
            CameraHandle::from_raw(handle as usize),
            FrameOutputs {
                width: w.as_mut(),
                height: h.as_mut(),
                bits_per_pixel: bpp.as_mut(),
                channels: ch.as_mut(),
                buffer,
            },
        )
        .code()
}

/// Report the address the library sees for a caller buffer, or 0 for null.
///
/// Never dereferences the pointer; exists to debug foreign-call
/// marshalling (byref vs. array decay).
///
/// # Safety
///
/// `imgdata` may be null or any value; it is only inspected, never read.
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn DummyBufferAddress(imgdata: *mut u8) -> usize {
    let provider = FrameProvider::new(stub_shape());
    let buffer = if imgdata.is_null() {
        None
    } else {
        // Zero-length view: keeps the address, never touches the bytes.
        Some(slice::from_raw_parts(imgdata, 0))
    };
    provider.buffer_address(buffer)
}
