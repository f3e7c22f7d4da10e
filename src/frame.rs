//! Frame data model.
//!
//! - `FrameDescriptor`: the shape a grab reports (width, height, bit depth,
//!   channel count).
//! - `CameraHandle`: opaque session token, passed through uninterpreted.
//! - `FrameOutputs`: the caller's five optional output slots. Absent slots
//!   mean "caller doesn't want that value", not an error.
//! - `StatusCode`: the vendor's 0 = success / 1 = failure convention.

/// Build-time cap on the pattern region size accepted from configuration.
/// Full-frame reads on current QHY sensors are on the order of 120 MB; a
/// 1 GiB cap leaves headroom without letting a typo'd shape near address
/// space limits.
pub const MAX_FRAME_BYTES: usize = 1 << 30;

/// Shape of a grabbed frame.
///
/// The stub default matches the vendor test double: an 8x4 mono frame at
/// 8 bits per pixel, a 32-byte pattern region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameDescriptor {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u32,
    pub channels: u32,
}

impl FrameDescriptor {
    pub const fn stub_default() -> Self {
        Self {
            width: 8,
            height: 4,
            bits_per_pixel: 8,
            channels: 1,
        }
    }

    /// Size of the pattern region in bytes. The provider never writes past
    /// this many bytes regardless of how large the caller's buffer is.
    ///
    /// Saturates at `usize::MAX` for shapes whose product exceeds the
    /// address space; configuration validation caps accepted shapes at
    /// [`MAX_FRAME_BYTES`], far below that.
    pub fn frame_bytes(&self) -> usize {
        let bytes_per_sample = u128::from(self.bits_per_pixel.div_ceil(8));
        let total = u128::from(self.width)
            * u128::from(self.height)
            * u128::from(self.channels)
            * bytes_per_sample;
        usize::try_from(total).unwrap_or(usize::MAX)
    }
}

impl Default for FrameDescriptor {
    fn default() -> Self {
        Self::stub_default()
    }
}

/// Opaque camera session token.
///
/// The real SDK hands out `void*` session handles; the stub carries the raw
/// value through untouched and only echoes it in diagnostics. No lifecycle
/// is managed here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CameraHandle(usize);

impl CameraHandle {
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    pub const fn into_raw(self) -> usize {
        self.0
    }
}

/// The caller's output slots for a single-frame grab.
///
/// Each slot is caller-owned storage the provider may write into. `None`
/// slots are silently skipped, except the buffer: a grab with no buffer is
/// the one recognized failure.
#[derive(Default)]
pub struct FrameOutputs<'a> {
    pub width: Option<&'a mut u32>,
    pub height: Option<&'a mut u32>,
    pub bits_per_pixel: Option<&'a mut u32>,
    pub channels: Option<&'a mut u32>,
    pub buffer: Option<&'a mut [u8]>,
}

/// Operation result, per the mimicked vendor convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum StatusCode {
    Success = 0,
    Failure = 1,
}

impl StatusCode {
    /// Raw wire value returned across the C ABI.
    pub const fn code(self) -> u32 {
        self as u32
    }
}
