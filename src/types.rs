//! Core types for safe-layout.
//!
//! These types define the foundation that everything builds on.
//! They flow from the builder into the view slots, through the layout pass,
//! and back out to the geometry accessors used by the test harness.

use serde::{Deserialize, Serialize};

// =============================================================================
// Dimension - Supports absolute and percentage values
// =============================================================================

/// A dimension value that can be absolute (dips) or percentage.
///
/// - `Auto`: Auto-size based on content
/// - `Dip(n)`: Absolute value in device-independent pixels
/// - `Percent(n)`: Percentage of parent (0-100)
///
/// # Examples
///
/// ```
/// use safe_layout::types::Dimension;
///
/// let width = Dimension::Dip(120.0);      // 120 dips
/// let height = Dimension::Percent(100.0); // Full parent height
/// let auto = Dimension::Auto;             // Content-determined
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    /// Auto-size based on content.
    #[default]
    Auto,
    /// Absolute size in device-independent pixels.
    Dip(f32),
    /// Percentage of parent size (0-100).
    Percent(f32),
}

impl Dimension {
    /// Check if this dimension is content-determined.
    #[inline]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl From<f32> for Dimension {
    fn from(value: f32) -> Self {
        Self::Dip(value)
    }
}

// =============================================================================
// View Types
// =============================================================================

/// The kind of view living at an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewType {
    /// Unallocated slot.
    #[default]
    None,
    /// Children positioned at explicit `left`/`top` offsets.
    AbsoluteLayout,
    /// Children pinned to edges in turn, last child filling the rest.
    DockLayout,
    /// Children placed into row/column cells.
    GridLayout,
    /// Children placed sequentially along one axis.
    StackLayout,
    /// Text leaf.
    Label,
    /// Text leaf with intrinsic padding.
    Button,
}

impl ViewType {
    /// Resolve an XML element name.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "AbsoluteLayout" => Some(Self::AbsoluteLayout),
            "DockLayout" => Some(Self::DockLayout),
            "GridLayout" => Some(Self::GridLayout),
            "StackLayout" => Some(Self::StackLayout),
            "Label" => Some(Self::Label),
            "Button" => Some(Self::Button),
            _ => None,
        }
    }

    /// XML element name for this type.
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::AbsoluteLayout => "AbsoluteLayout",
            Self::DockLayout => "DockLayout",
            Self::GridLayout => "GridLayout",
            Self::StackLayout => "StackLayout",
            Self::Label => "Label",
            Self::Button => "Button",
        }
    }

    /// Layout containers can hold children and overflow the safe area.
    #[inline]
    pub const fn is_layout(&self) -> bool {
        matches!(
            self,
            Self::AbsoluteLayout | Self::DockLayout | Self::GridLayout | Self::StackLayout
        )
    }

    /// Leaves are measured from their text content.
    #[inline]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Label | Self::Button)
    }
}

// =============================================================================
// Container Enums
// =============================================================================

/// Edge a dock layout child is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dock {
    #[default]
    Left,
    Top,
    Right,
    Bottom,
}

/// Stack layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// Horizontal placement of a view inside the slot its parent gives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlignment {
    #[default]
    Stretch,
    Left,
    Center,
    Right,
}

/// Vertical placement of a view inside the slot its parent gives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlignment {
    #[default]
    Stretch,
    Top,
    Middle,
    Bottom,
}

/// Whether a view takes part in layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    /// Laid out, but not drawn.
    Hidden,
    /// Removed from layout entirely.
    Collapse,
}

// =============================================================================
// Grid Item Specs
// =============================================================================

/// One row or column definition of a grid layout.
///
/// ```
/// use safe_layout::types::ItemSpec;
///
/// let rows = [ItemSpec::Star(1.0), ItemSpec::Auto, ItemSpec::Pixel(48.0)];
/// assert!(rows[0].is_star());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemSpec {
    /// Sized to the largest child in the track.
    Auto,
    /// Fixed size in dips.
    Pixel(f32),
    /// Weighted share of the remaining space.
    Star(f32),
}

impl Default for ItemSpec {
    fn default() -> Self {
        Self::Star(1.0)
    }
}

impl ItemSpec {
    #[inline]
    pub const fn is_star(&self) -> bool {
        matches!(self, Self::Star(_))
    }
}

// =============================================================================
// Insets
// =============================================================================

/// Per-edge distances, in dips.
///
/// Used both for the device's safe-area insets and for the insets a view
/// actually absorbed during layout.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Insets {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Insets {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create insets from the four edges. Negative values are clamped to 0.
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left: if left > 0.0 { left } else { 0.0 },
            top: if top > 0.0 { top } else { 0.0 },
            right: if right > 0.0 { right } else { 0.0 },
            bottom: if bottom > 0.0 { bottom } else { 0.0 },
        }
    }

    /// Sum of left and right.
    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.left == 0.0 && self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0
    }
}

bitflags::bitflags! {
    /// A set of rectangle edges.
    ///
    /// Combine with bitwise OR: `Edges::LEFT | Edges::TOP`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Edges: u8 {
        const NONE = 0;
        const LEFT = 1 << 0;
        const TOP = 1 << 1;
        const RIGHT = 1 << 2;
        const BOTTOM = 1 << 3;
        const ALL = Self::LEFT.bits() | Self::TOP.bits() | Self::RIGHT.bits() | Self::BOTTOM.bits();
    }
}

// =============================================================================
// Frame - Computed view geometry
// =============================================================================

/// The rectangle a view occupies on screen after layout, in dips.
///
/// Coordinates are absolute: (0, 0) is the top-left corner of the physical
/// screen, not of the parent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// Build a frame from its four edges.
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            width: (right - left).max(0.0),
            height: (bottom - top).max(0.0),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Shrink the frame by per-edge insets.
    pub fn inset(&self, insets: Insets) -> Self {
        Self::from_edges(
            self.left + insets.left,
            self.top + insets.top,
            self.right() - insets.right,
            self.bottom() - insets.bottom,
        )
    }
}

// =============================================================================
// Platform
// =============================================================================

/// Operating system family of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Ios,
    Android,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_type_from_tag() {
        assert_eq!(ViewType::from_tag("DockLayout"), Some(ViewType::DockLayout));
        assert_eq!(ViewType::from_tag("Label"), Some(ViewType::Label));
        assert_eq!(ViewType::from_tag("dockLayout"), None);
        assert_eq!(ViewType::from_tag("WebView"), None);
    }

    #[test]
    fn test_view_type_kinds() {
        assert!(ViewType::GridLayout.is_layout());
        assert!(!ViewType::GridLayout.is_leaf());
        assert!(ViewType::Button.is_leaf());
        assert!(!ViewType::None.is_layout());
        assert!(!ViewType::None.is_leaf());
    }

    #[test]
    fn test_insets_clamp_negative() {
        let insets = Insets::new(-4.0, 44.0, 0.0, 34.0);
        assert_eq!(insets.left, 0.0);
        assert_eq!(insets.vertical(), 78.0);
        assert!(Insets::ZERO.is_zero());
    }

    #[test]
    fn test_frame_edges() {
        let frame = Frame::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(frame.right(), 110.0);
        assert_eq!(frame.bottom(), 70.0);

        let inner = frame.inset(Insets::new(5.0, 5.0, 5.0, 5.0));
        assert_eq!(inner, Frame::new(15.0, 25.0, 90.0, 40.0));

        // Degenerate frames never go negative
        let collapsed = Frame::from_edges(10.0, 10.0, 5.0, 5.0);
        assert_eq!(collapsed.width, 0.0);
        assert_eq!(collapsed.height, 0.0);
    }

    #[test]
    fn test_edges_all() {
        assert!(Edges::ALL.contains(Edges::LEFT | Edges::BOTTOM));
        assert_eq!(Edges::default(), Edges::NONE);
    }
}
