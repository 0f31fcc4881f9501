//! Text Arrays
//!
//! Text-related properties of leaf views:
//! - textContent: The text string to display
//! - fontSize: Font size in dips
//!
//! Uses `TrackedSlotArray` for stable reactive cells with fine-grained tracking.

use spark_signals::{TrackedSlotArray, tracked_slot_array};

use super::dirty::LAYOUT_DIRTY_SET;
use super::ClearAll;

/// Font size used when none is set.
pub const DEFAULT_FONT_SIZE: f32 = 17.0;

// =============================================================================
// Arrays
// =============================================================================

thread_local! {
    /// Text content string.
    static TEXT_CONTENT: TrackedSlotArray<String> = tracked_slot_array(
        Some(String::new()),
        LAYOUT_DIRTY_SET.with(|s| s.clone())
    );

    /// Font size in dips.
    static FONT_SIZE: TrackedSlotArray<f32> = tracked_slot_array(
        Some(DEFAULT_FONT_SIZE),
        LAYOUT_DIRTY_SET.with(|s| s.clone())
    );
}

// =============================================================================
// Capacity Management
// =============================================================================

/// Ensure arrays have capacity for the given index.
pub fn ensure_capacity(index: usize) {
    TEXT_CONTENT.with(|arr| {
        let _ = arr.peek(index);
    });
    FONT_SIZE.with(|arr| {
        let _ = arr.peek(index);
    });
}

/// Clear values at index.
pub fn clear_at_index(index: usize) {
    TEXT_CONTENT.with(|arr| arr.clear(index));
    FONT_SIZE.with(|arr| arr.clear(index));
}

/// Reset all arrays.
pub fn reset() {
    TEXT_CONTENT.with(|arr| arr.clear_all());
    FONT_SIZE.with(|arr| arr.clear_all());
}

// =============================================================================
// Text Content
// =============================================================================

/// Get text content at index (reactive).
pub fn get_text_content(index: usize) -> String {
    TEXT_CONTENT.with(|arr| arr.get(index)).unwrap_or_default()
}

/// Set text content at index.
pub fn set_text_content(index: usize, content: String) {
    TEXT_CONTENT.with(|arr| arr.set_value(index, content));
}

// =============================================================================
// Font Size
// =============================================================================

/// Get font size at index (reactive).
pub fn get_font_size(index: usize) -> f32 {
    FONT_SIZE.with(|arr| arr.get(index)).unwrap_or(DEFAULT_FONT_SIZE)
}

/// Set font size at index.
pub fn set_font_size(index: usize, size: f32) {
    FONT_SIZE.with(|arr| arr.set_value(index, size));
}
