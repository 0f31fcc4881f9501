//! Layout input and output types.

use crate::types::{Frame, Insets};

// =============================================================================
// Viewport - where the roots are laid out
// =============================================================================

/// The rectangles a layout pass works with, in dips.
///
/// `screen` is the physical screen. `content` is where root views are laid
/// out: the safe area on devices that report insets, the area below the
/// layout guide on legacy devices.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub screen: Frame,
    pub content: Frame,
    /// Whether containers flush with the content edges may grow to the screen edges.
    pub expand_to_screen: bool,
}

impl Viewport {
    /// A viewport without insets: content is the whole screen.
    pub fn full_screen(width: f32, height: f32) -> Self {
        let screen = Frame::new(0.0, 0.0, width, height);
        Self { screen, content: screen, expand_to_screen: false }
    }

    /// A viewport whose content area is the screen minus `insets`.
    pub fn with_safe_area(width: f32, height: f32, insets: Insets) -> Self {
        let screen = Frame::new(0.0, 0.0, width, height);
        Self { screen, content: screen.inset(insets), expand_to_screen: true }
    }

    /// Distance between each content edge and the matching screen edge.
    pub fn insets(&self) -> Insets {
        Insets::new(
            self.content.left - self.screen.left,
            self.content.top - self.screen.top,
            self.screen.right() - self.content.right(),
            self.screen.bottom() - self.content.bottom(),
        )
    }
}

// =============================================================================
// ComputedLayout - output of a layout pass
// =============================================================================

/// Output of a layout pass.
///
/// Frames are absolute: (0, 0) is the top-left corner of the screen.
/// Arrays are indexed by view index; indices that took no part in the pass
/// (unallocated or collapsed) have no frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComputedLayout {
    pub frames: Vec<Option<Frame>>,
    /// Safe-area insets each view absorbed by growing under the system bars.
    pub safe_area_insets: Vec<Insets>,
    /// Root views laid out in this pass.
    pub roots: Vec<usize>,
    /// Set when the pass failed; the frames are then empty.
    pub error: Option<String>,
}

impl ComputedLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty layout sized for indices `0..len`.
    pub fn with_len(len: usize) -> Self {
        Self {
            frames: vec![None; len],
            safe_area_insets: vec![Insets::ZERO; len],
            roots: Vec::new(),
            error: None,
        }
    }

    /// A layout that records a failed pass.
    pub fn failed(message: impl Into<String>) -> Self {
        Self { error: Some(message.into()), ..Self::default() }
    }

    /// Frame of the view at `index`, if it was laid out.
    pub fn frame(&self, index: usize) -> Option<Frame> {
        self.frames.get(index).copied().flatten()
    }

    /// Safe-area insets of the view at `index` (zero when it absorbed none).
    pub fn insets(&self, index: usize) -> Insets {
        self.safe_area_insets.get(index).copied().unwrap_or_default()
    }

    pub fn set_frame(&mut self, index: usize, frame: Frame) {
        if index >= self.frames.len() {
            self.frames.resize(index + 1, None);
            self.safe_area_insets.resize(index + 1, Insets::ZERO);
        }
        self.frames[index] = Some(frame);
    }

    pub fn set_insets(&mut self, index: usize, insets: Insets) {
        if index >= self.safe_area_insets.len() {
            self.frames.resize(index + 1, None);
            self.safe_area_insets.resize(index + 1, Insets::ZERO);
        }
        self.safe_area_insets[index] = insets;
    }

    /// Whether the view at `index` was laid out in this pass.
    pub fn contains(&self, index: usize) -> bool {
        self.frame(index).is_some()
    }
}
