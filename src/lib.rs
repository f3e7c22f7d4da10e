//! qhy-stub: a deterministic stand-in for the QHYCCD camera SDK.
//!
//! Integration code for QHY cameras is normally written against
//! `qhyccd.dll` / `libqhyccd.so` and loaded through a C foreign-function
//! layer. This crate builds a drop-in shared library that mimics the
//! single-frame grab entry point so host software can be exercised without
//! a camera attached:
//!
//! - `DummyGetQHYCCDSingleFrame`: writes a fixed frame descriptor and a
//!   deterministic pixel pattern into caller-owned output slots.
//! - `DummyBufferAddress`: echoes back the address of a caller buffer, for
//!   debugging foreign-function marshalling.
//!
//! The stub is stateless. It MUST NOT:
//! - Allocate or free caller memory
//! - Touch hardware or block
//! - Report failures beyond the vendor's 0 = success / 1 = failure code
//!
//! Layering:
//! - [`pattern`]: pure pattern generation, no I/O
//! - [`frame`]: frame descriptor, opaque handle, output slots, status code
//! - [`diag`]: injectable diagnostic sinks (stderr, `log` facade, test)
//! - [`provider`]: the safe-Rust provider both entry points delegate to
//! - [`config`]: optional shape overrides via config file / environment
//! - [`ffi`]: the C-ABI exports under the vendor-convention symbol names

pub mod config;
pub mod diag;
pub mod ffi;
pub mod frame;
pub mod pattern;
pub mod provider;

pub use config::StubConfig;
pub use diag::{DiagnosticSink, LogSink, StderrSink};
pub use frame::{CameraHandle, FrameDescriptor, FrameOutputs, StatusCode};
pub use provider::FrameProvider;
