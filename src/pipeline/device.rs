//! Device state signals.
//!
//! The device is the root input of the layout pipeline: screen size, safe-area
//! insets and the platform rules for using them. Changing it re-runs the
//! layout derived.
//!
//! Profiles can be built from the presets or loaded from TOML:
//!
//! ```toml
//! name = "Pixel"
//! platform = "android"
//! os_version = 13
//! width = 412.0
//! height = 915.0
//! scale = 2.625
//!
//! [safe_area_insets]
//! left = 0.0
//! top = 24.0
//! right = 0.0
//! bottom = 0.0
//! ```

use std::cell::RefCell;

use serde::{Deserialize, Serialize};
use spark_signals::{Signal, signal};

use crate::error::ConfigError;
use crate::layout::Viewport;
use crate::types::{Frame, Insets, Platform};

/// First iOS major version with safe-area insets.
pub const SAFE_AREA_MIN_IOS: u32 = 11;

// =============================================================================
// Device
// =============================================================================

/// A device profile, in dips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    pub name: String,
    pub platform: Platform,
    /// Major OS version.
    pub os_version: u32,
    /// Screen width in dips.
    pub width: f32,
    /// Screen height in dips.
    pub height: f32,
    /// Physical pixels per dip.
    pub scale: f32,
    /// Distance from each screen edge to the unobstructed area.
    pub safe_area_insets: Insets,
    /// Origin of the top layout guide on iOS before safe areas existed.
    pub layout_guide_origin: [f32; 2],
}

impl Default for Device {
    fn default() -> Self {
        Self::iphone_x()
    }
}

impl Device {
    /// iPhone X, portrait: notch on top, home indicator at the bottom.
    pub fn iphone_x() -> Self {
        Self {
            name: "iPhone X".to_string(),
            platform: Platform::Ios,
            os_version: 12,
            width: 375.0,
            height: 812.0,
            scale: 3.0,
            safe_area_insets: Insets::new(0.0, 44.0, 0.0, 34.0),
            layout_guide_origin: [0.0, 44.0],
        }
    }

    /// iPhone X, landscape: notch on the left, insets on both sides.
    pub fn iphone_x_landscape() -> Self {
        Self {
            name: "iPhone X (landscape)".to_string(),
            width: 812.0,
            height: 375.0,
            safe_area_insets: Insets::new(44.0, 0.0, 44.0, 21.0),
            layout_guide_origin: [44.0, 0.0],
            ..Self::iphone_x()
        }
    }

    /// iPhone 8 on iOS 10: no safe-area insets, content below the status bar.
    pub fn iphone_8_ios10() -> Self {
        Self {
            name: "iPhone 8 (iOS 10)".to_string(),
            platform: Platform::Ios,
            os_version: 10,
            width: 375.0,
            height: 667.0,
            scale: 2.0,
            safe_area_insets: Insets::ZERO,
            layout_guide_origin: [0.0, 20.0],
        }
    }

    /// A typical Android phone with a translucent status bar.
    pub fn android_phone() -> Self {
        Self {
            name: "Android phone".to_string(),
            platform: Platform::Android,
            os_version: 9,
            width: 360.0,
            height: 640.0,
            scale: 3.0,
            safe_area_insets: Insets::new(0.0, 24.0, 0.0, 0.0),
            layout_guide_origin: [0.0, 0.0],
        }
    }

    /// Load a profile from TOML. Missing fields fall back to the default device.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let device: Device = toml::from_str(source)?;
        device.validate()?;
        Ok(device)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "screen size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.scale > 0.0) {
            return Err(ConfigError::Invalid(format!("scale must be positive, got {}", self.scale)));
        }
        let Insets { left, top, right, bottom } = self.safe_area_insets;
        if [left, top, right, bottom].iter().any(|v| !(*v >= 0.0)) {
            return Err(ConfigError::Invalid("safe-area insets must be non-negative".to_string()));
        }
        if left + right >= self.width || top + bottom >= self.height {
            return Err(ConfigError::Invalid("safe-area insets cover the whole screen".to_string()));
        }
        Ok(())
    }

    /// iOS before safe areas: layout starts at the layout guide, no insets.
    pub fn is_legacy(&self) -> bool {
        self.platform == Platform::Ios && self.os_version < SAFE_AREA_MIN_IOS
    }

    /// The physical screen rectangle.
    pub fn screen(&self) -> Frame {
        Frame::new(0.0, 0.0, self.width, self.height)
    }

    /// Safe-area insets reported by the platform (zero on legacy iOS).
    pub fn safe_area_insets(&self) -> Insets {
        if self.is_legacy() {
            Insets::ZERO
        } else {
            self.safe_area_insets
        }
    }

    /// Origin of the full-screen area a root view can occupy.
    ///
    /// The screen origin, except on legacy iOS where the layout guide
    /// pushes content below the status bar.
    pub fn full_screen_origin(&self) -> (f32, f32) {
        if self.is_legacy() {
            (self.layout_guide_origin[0], self.layout_guide_origin[1])
        } else {
            (0.0, 0.0)
        }
    }

    /// The viewport roots are laid out in.
    pub fn viewport(&self) -> Viewport {
        if self.is_legacy() {
            let (left, top) = self.full_screen_origin();
            Viewport {
                screen: self.screen(),
                content: Frame::from_edges(left, top, self.width, self.height),
                expand_to_screen: false,
            }
        } else {
            Viewport::with_safe_area(self.width, self.height, self.safe_area_insets)
        }
    }
}

// =============================================================================
// Device Signal
// =============================================================================

thread_local! {
    static DEVICE: RefCell<Signal<Device>> = RefCell::new(signal(Device::default()));
}

/// Get the current device.
pub fn device() -> Device {
    DEVICE.with(|d| d.borrow().get())
}

/// Set the current device (re-runs layout).
pub fn set_device(device: Device) {
    DEVICE.with(|d| d.borrow().set(device));
}

/// Get the device signal for reactive tracking.
pub fn device_signal() -> Signal<Device> {
    DEVICE.with(|d| d.borrow().clone())
}

// =============================================================================
// Tests
// =============================================================================
