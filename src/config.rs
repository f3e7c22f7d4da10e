//! Stub shape configuration.
//!
//! The zero-config path reproduces the fixed 8x4 mono shape of the original
//! vendor stub. Deployments that want broader coverage can override the
//! reported shape via an optional JSON config file (named by
//! `QHY_STUB_CONFIG`) and per-field environment variables.

use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::Path;

use crate::frame::{FrameDescriptor, MAX_FRAME_BYTES};

#[derive(Debug, Deserialize, Default)]
struct StubConfigFile {
    frame: Option<FrameConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
struct FrameConfigFile {
    width: Option<u32>,
    height: Option<u32>,
    bits_per_pixel: Option<u32>,
    channels: Option<u32>,
}

/// Resolved stub configuration.
#[derive(Debug, Clone)]
pub struct StubConfig {
    pub shape: FrameDescriptor,
}

impl StubConfig {
    /// Resolve configuration: defaults, then config file, then environment.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("QHY_STUB_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) => Some(read_config_file(Path::new(path))?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default());
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: StubConfigFile) -> Self {
        let defaults = FrameDescriptor::stub_default();
        let frame = file.frame.unwrap_or_default();
        Self {
            shape: FrameDescriptor {
                width: frame.width.unwrap_or(defaults.width),
                height: frame.height.unwrap_or(defaults.height),
                bits_per_pixel: frame.bits_per_pixel.unwrap_or(defaults.bits_per_pixel),
                channels: frame.channels.unwrap_or(defaults.channels),
            },
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Some(width) = env_u32("QHY_STUB_WIDTH")? {
            self.shape.width = width;
        }
        if let Some(height) = env_u32("QHY_STUB_HEIGHT")? {
            self.shape.height = height;
        }
        if let Some(bits_per_pixel) = env_u32("QHY_STUB_BPP")? {
            self.shape.bits_per_pixel = bits_per_pixel;
        }
        if let Some(channels) = env_u32("QHY_STUB_CHANNELS")? {
            self.shape.channels = channels;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.shape.width == 0 || self.shape.height == 0 {
            return Err(anyhow!("frame dimensions must be greater than zero"));
        }
        if self.shape.channels == 0 {
            return Err(anyhow!("channel count must be greater than zero"));
        }
        if self.shape.bits_per_pixel == 0 {
            return Err(anyhow!("bit depth must be greater than zero"));
        }
        if self.shape.bits_per_pixel % 8 != 0 {
            return Err(anyhow!("bit depth must be a multiple of 8"));
        }
        if self.shape.frame_bytes() > MAX_FRAME_BYTES {
            return Err(anyhow!(
                "frame size {} exceeds the {} byte cap",
                self.shape.frame_bytes(),
                MAX_FRAME_BYTES
            ));
        }
        Ok(())
    }
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            shape: FrameDescriptor::stub_default(),
        }
    }
}

fn read_config_file(path: &Path) -> Result<StubConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}

fn env_u32(key: &str) -> Result<Option<u32>> {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => {
            let value = raw
                .trim()
                .parse()
                .map_err(|_| anyhow!("{} must be an unsigned integer", key))?;
            Ok(Some(value))
        }
        _ => Ok(None),
    }
}
