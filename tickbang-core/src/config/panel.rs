//! Panel configuration
//!
//! Values the controller init sequence needs that differ between glass
//! variants of the same controller.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Highest value the electronic volume (contrast) register accepts
pub const MAX_CONTRAST: u8 = 0x3F;

/// Contrast used by the reference panel
pub const DEFAULT_CONTRAST: u8 = 0x30;

/// Time the controller needs after a software reset, in milliseconds
pub const DEFAULT_RESET_SETTLE_MS: u32 = 10;

/// Errors from building a panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelConfigError {
    /// Contrast above [`MAX_CONTRAST`]
    ContrastOutOfRange(u8),
}

/// Panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    /// Electronic volume sent during init (0x00-0x3F)
    pub contrast: u8,
    /// Delay after the software reset command
    pub reset_settle_ms: u32,
}

impl PanelConfig {
    /// Reference panel settings
    pub const fn new() -> Self {
        Self {
            contrast: DEFAULT_CONTRAST,
            reset_settle_ms: DEFAULT_RESET_SETTLE_MS,
        }
    }

    /// Use a different contrast
    pub fn with_contrast(self, contrast: u8) -> Result<Self, PanelConfigError> {
        if contrast > MAX_CONTRAST {
            return Err(PanelConfigError::ContrastOutOfRange(contrast));
        }
        Ok(Self { contrast, ..self })
    }

    /// Use a different settle delay after software reset
    pub const fn with_reset_settle_ms(self, reset_settle_ms: u32) -> Self {
        Self {
            reset_settle_ms,
            ..self
        }
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::new()
    }
}
