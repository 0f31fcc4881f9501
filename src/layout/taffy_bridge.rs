//! Taffy Bridge - Integration with Taffy layout engine
//!
//! Converts view properties to Taffy styles, runs layout computation,
//! and extracts absolute frames back into a `ComputedLayout`.
//!
//! Each layout container kind maps onto a Taffy algorithm:
//!
//! | Container       | Taffy                                                     |
//! |-----------------|-----------------------------------------------------------|
//! | `AbsoluteLayout`| single-cell grid, children start-aligned, offset by margin |
//! | `DockLayout`    | chain of synthetic flex nodes, one per docked child        |
//! | `GridLayout`    | grid, star tracks as `minmax(0, Nfr)`                      |
//! | `StackLayout`   | flex column/row, children never shrink                     |
//!
//! Synthetic nodes carry no view index; only nodes that map back to a view
//! produce a frame.

use std::collections::HashMap;
use std::time::Instant;

use taffy::geometry::{Line, MinMax, Point, Rect, Size};
use taffy::style_helpers::{line, span};
use taffy::{
    AlignItems, AlignSelf, AvailableSpace, Dimension as TaffyDimension, Display, FlexDirection,
    GridPlacement, JustifyContent, LengthPercentage, LengthPercentageAuto, MaxTrackSizingFunction,
    MinTrackSizingFunction, NodeId, Style, TaffyError, TaffyTree, TrackSizingFunction,
};
use tracing::{debug, trace};

use crate::engine::arrays::{core, layout as props, text};
use crate::engine::get_allocated_indices;
use crate::error::LayoutError;
use crate::types::{
    Dimension, Dock, Frame, HorizontalAlignment, ItemSpec, Orientation, VerticalAlignment,
    ViewType,
};

use super::safe_area::apply_safe_area;
use super::text_measure::{measure_text, min_content_width};
use super::types::{ComputedLayout, Viewport};

/// Intrinsic button padding around the text, horizontal and vertical, in dips.
pub const BUTTON_PADDING: (f32, f32) = (12.0, 8.0);

// =============================================================================
// VALUE CONVERSION
// =============================================================================

/// Convert our Dimension to Taffy's Dimension.
fn to_taffy_dimension(dim: Dimension) -> TaffyDimension {
    match dim {
        Dimension::Auto => TaffyDimension::Auto,
        Dimension::Dip(n) => TaffyDimension::Length(n),
        Dimension::Percent(p) => TaffyDimension::Percent(p / 100.0),
    }
}

fn horizontal_self(align: HorizontalAlignment) -> AlignSelf {
    match align {
        HorizontalAlignment::Stretch => AlignSelf::Stretch,
        HorizontalAlignment::Left => AlignSelf::Start,
        HorizontalAlignment::Center => AlignSelf::Center,
        HorizontalAlignment::Right => AlignSelf::End,
    }
}

fn vertical_self(align: VerticalAlignment) -> AlignSelf {
    match align {
        VerticalAlignment::Stretch => AlignSelf::Stretch,
        VerticalAlignment::Top => AlignSelf::Start,
        VerticalAlignment::Middle => AlignSelf::Center,
        VerticalAlignment::Bottom => AlignSelf::End,
    }
}

fn track(spec: ItemSpec) -> TrackSizingFunction {
    let minmax = match spec {
        ItemSpec::Auto => MinMax {
            min: MinTrackSizingFunction::Auto,
            max: MaxTrackSizingFunction::Auto,
        },
        ItemSpec::Pixel(px) => MinMax {
            min: MinTrackSizingFunction::Fixed(LengthPercentage::Length(px)),
            max: MaxTrackSizingFunction::Fixed(LengthPercentage::Length(px)),
        },
        // minmax(0, Nfr) so star tracks split space by weight, ignoring content
        ItemSpec::Star(weight) => MinMax {
            min: MinTrackSizingFunction::Fixed(LengthPercentage::Length(0.0)),
            max: MaxTrackSizingFunction::Fraction(weight),
        },
    };
    TrackSizingFunction::Single(minmax)
}

fn tracks(specs: &[ItemSpec]) -> Vec<TrackSizingFunction> {
    if specs.is_empty() {
        vec![track(ItemSpec::Star(1.0))]
    } else {
        specs.iter().copied().map(track).collect()
    }
}

/// Grid line placement for a zero-based cell index and a span.
fn cell(index: u16, span_count: u16) -> Line<GridPlacement> {
    let start = i16::try_from(index).unwrap_or(i16::MAX - 1).saturating_add(1);
    Line {
        start: line::<GridPlacement>(start),
        end: span::<GridPlacement>(span_count.max(1)),
    }
}

const ZERO_SIZE: Size<TaffyDimension> = Size {
    width: TaffyDimension::Length(0.0),
    height: TaffyDimension::Length(0.0),
};

// =============================================================================
// STYLE BUILDING
// =============================================================================

/// How a view is placed by whatever contains it.
#[derive(Debug, Clone, Copy)]
enum Placement {
    /// Root view, sized to the viewport content area.
    Root(Size<f32>),
    Absolute,
    Dock(Dock),
    /// Last child of a dock layout that stretches it.
    DockFill,
    Grid,
    Stack(Orientation),
}

/// Build the Taffy style for a view from its own properties.
fn base_style(idx: usize) -> Style {
    let [margin_top, margin_right, margin_bottom, margin_left] = props::get_margin(idx);
    let [padding_top, padding_right, padding_bottom, padding_left] = props::get_padding(idx);

    Style {
        size: Size {
            width: to_taffy_dimension(props::get_width(idx)),
            height: to_taffy_dimension(props::get_height(idx)),
        },
        min_size: Size {
            width: TaffyDimension::Length(props::get_min_width(idx)),
            height: TaffyDimension::Length(props::get_min_height(idx)),
        },
        margin: Rect {
            top: LengthPercentageAuto::Length(margin_top),
            right: LengthPercentageAuto::Length(margin_right),
            bottom: LengthPercentageAuto::Length(margin_bottom),
            left: LengthPercentageAuto::Length(margin_left),
        },
        padding: Rect {
            top: LengthPercentage::Length(padding_top),
            right: LengthPercentage::Length(padding_right),
            bottom: LengthPercentage::Length(padding_bottom),
            left: LengthPercentage::Length(padding_left),
        },
        ..Default::default()
    }
}

/// Adjust a view's style for the container placing it.
fn apply_placement(style: &mut Style, idx: usize, placement: Placement) {
    let horizontal = props::get_horizontal_alignment(idx);
    let vertical = props::get_vertical_alignment(idx);

    match placement {
        Placement::Root(size) => {
            style.size = Size {
                width: TaffyDimension::Length(size.width),
                height: TaffyDimension::Length(size.height),
            };
            style.margin = Rect {
                top: LengthPercentageAuto::Length(0.0),
                right: LengthPercentageAuto::Length(0.0),
                bottom: LengthPercentageAuto::Length(0.0),
                left: LengthPercentageAuto::Length(0.0),
            };
        }
        Placement::Absolute => {
            style.grid_row = cell(0, 1);
            style.grid_column = cell(0, 1);
            style.justify_self = Some(AlignSelf::Start);
            style.align_self = Some(AlignSelf::Start);
            style.margin.left =
                LengthPercentageAuto::Length(props::get_left(idx) + props::get_margin_left(idx));
            style.margin.top =
                LengthPercentageAuto::Length(props::get_top(idx) + props::get_margin_top(idx));
        }
        Placement::Dock(dock) => {
            style.flex_shrink = 0.0;
            style.align_self = Some(match dock {
                Dock::Left | Dock::Right => vertical_self(vertical),
                Dock::Top | Dock::Bottom => horizontal_self(horizontal),
            });
        }
        Placement::DockFill => {
            style.grid_row = cell(0, 1);
            style.grid_column = cell(0, 1);
            style.justify_self = Some(horizontal_self(horizontal));
            style.align_self = Some(vertical_self(vertical));
        }
        Placement::Grid => {
            style.grid_row = cell(props::get_row(idx), props::get_row_span(idx));
            style.grid_column = cell(props::get_col(idx), props::get_col_span(idx));
            style.justify_self = Some(horizontal_self(horizontal));
            style.align_self = Some(vertical_self(vertical));
        }
        Placement::Stack(orientation) => {
            style.flex_shrink = 0.0;
            style.align_self = Some(match orientation {
                Orientation::Vertical => horizontal_self(horizontal),
                Orientation::Horizontal => vertical_self(vertical),
            });
        }
    }
}

/// Style of one link in a dock chain: a flex line holding a docked child
/// and the rest of the chain, which takes whatever space is left.
fn dock_link_style(direction: FlexDirection) -> Style {
    Style {
        display: Display::Flex,
        flex_direction: direction,
        flex_grow: 1.0,
        flex_shrink: 1.0,
        min_size: ZERO_SIZE,
        align_items: Some(AlignItems::Stretch),
        ..Default::default()
    }
}

/// Style of the cell holding a dock layout's stretched last child.
fn dock_fill_style() -> Style {
    Style {
        display: Display::Grid,
        grid_template_rows: vec![track(ItemSpec::Star(1.0))],
        grid_template_columns: vec![track(ItemSpec::Star(1.0))],
        flex_grow: 1.0,
        flex_shrink: 1.0,
        min_size: ZERO_SIZE,
        ..Default::default()
    }
}

// =============================================================================
// TEXT MEASUREMENT
// =============================================================================

/// Measure function for leaf views.
fn measure_view(
    idx: usize,
    known_dimensions: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
) -> Size<f32> {
    if let Size { width: Some(width), height: Some(height) } = known_dimensions {
        return Size { width, height };
    }

    let view_type = core::get_view_type(idx);
    if !view_type.is_leaf() {
        return Size {
            width: known_dimensions.width.unwrap_or(0.0),
            height: known_dimensions.height.unwrap_or(0.0),
        };
    }

    let content = text::get_text_content(idx);
    let font_size = text::get_font_size(idx);

    let (pad_x, pad_y, wrap_width) = match view_type {
        // Buttons never wrap
        ViewType::Button => (BUTTON_PADDING.0, BUTTON_PADDING.1, None),
        _ => {
            let wrap = match (known_dimensions.width, available_space.width) {
                (Some(width), _) => Some(width),
                (None, AvailableSpace::Definite(width)) => Some(width),
                (None, AvailableSpace::MinContent) => Some(min_content_width(&content, font_size)),
                (None, AvailableSpace::MaxContent) => None,
            };
            (0.0, 0.0, wrap)
        }
    };

    let (text_width, text_height) = measure_text(&content, font_size, wrap_width);

    Size {
        width: known_dimensions.width.unwrap_or(text_width + 2.0 * pad_x),
        height: known_dimensions.height.unwrap_or(text_height + 2.0 * pad_y),
    }
}

// =============================================================================
// TREE BUILDING
// =============================================================================

/// Taffy tree for one root view plus the node → view mapping.
struct TreeBuilder {
    tree: TaffyTree<usize>,
    views: HashMap<NodeId, usize>,
}

impl TreeBuilder {
    fn new() -> Self {
        let mut tree = TaffyTree::new();
        // Frames are compared against exact inset values
        tree.disable_rounding();
        Self { tree, views: HashMap::new() }
    }

    /// Build the node for view `idx` and, recursively, its children.
    fn build(&mut self, idx: usize, placement: Placement) -> Result<NodeId, TaffyError> {
        let view_type = core::get_view_type(idx);
        let mut style = base_style(idx);
        apply_placement(&mut style, idx, placement);

        let children: Vec<usize> = core::get_children(idx)
            .into_iter()
            .filter(|&child| !core::is_collapsed(child))
            .collect();

        let node = match view_type {
            ViewType::AbsoluteLayout => {
                style.display = Display::Grid;
                style.grid_template_rows = vec![track(ItemSpec::Auto)];
                style.grid_template_columns = vec![track(ItemSpec::Auto)];
                let nodes = self.build_all(&children, |_| Placement::Absolute)?;
                self.tree.new_with_children(style, &nodes)?
            }
            ViewType::DockLayout => {
                style.display = Display::Flex;
                style.flex_direction = FlexDirection::Column;
                style.align_items = Some(AlignItems::Stretch);
                let head = self.build_dock_chain(idx, &children)?;
                self.tree.new_with_children(style, &[head])?
            }
            ViewType::GridLayout => {
                style.display = Display::Grid;
                style.grid_template_rows = tracks(&props::get_rows(idx));
                style.grid_template_columns = tracks(&props::get_columns(idx));
                let nodes = self.build_all(&children, |_| Placement::Grid)?;
                self.tree.new_with_children(style, &nodes)?
            }
            ViewType::StackLayout => {
                let orientation = props::get_orientation(idx);
                style.display = Display::Flex;
                style.flex_direction = match orientation {
                    Orientation::Vertical => FlexDirection::Column,
                    Orientation::Horizontal => FlexDirection::Row,
                };
                style.align_items = Some(AlignItems::Stretch);
                style.justify_content = Some(JustifyContent::Start);
                let nodes = self.build_all(&children, |_| Placement::Stack(orientation))?;
                self.tree.new_with_children(style, &nodes)?
            }
            ViewType::Label | ViewType::Button | ViewType::None => {
                self.tree.new_leaf_with_context(style, idx)?
            }
        };

        self.views.insert(node, idx);
        Ok(node)
    }

    fn build_all(
        &mut self,
        children: &[usize],
        placement: impl Fn(usize) -> Placement,
    ) -> Result<Vec<NodeId>, TaffyError> {
        children
            .iter()
            .map(|&child| self.build(child, placement(child)))
            .collect()
    }

    /// Build the dock chain for `children`, innermost link first.
    ///
    /// Each docked child splits the remaining space into its own strip and
    /// the rest, so children dock in declaration order.
    fn build_dock_chain(&mut self, idx: usize, children: &[usize]) -> Result<NodeId, TaffyError> {
        let (docked, mut rest) = match children.split_last() {
            Some((&last, docked)) if props::get_stretch_last_child(idx) => {
                let fill = self.build(last, Placement::DockFill)?;
                (docked, self.tree.new_with_children(dock_fill_style(), &[fill])?)
            }
            _ => {
                let spacer = Style {
                    flex_grow: 1.0,
                    flex_shrink: 1.0,
                    min_size: ZERO_SIZE,
                    ..Default::default()
                };
                (children, self.tree.new_leaf(spacer)?)
            }
        };

        for &child in docked.iter().rev() {
            let dock = props::get_dock(child);
            let node = self.build(child, Placement::Dock(dock))?;
            let (direction, pair) = match dock {
                Dock::Left => (FlexDirection::Row, [node, rest]),
                Dock::Right => (FlexDirection::Row, [rest, node]),
                Dock::Top => (FlexDirection::Column, [node, rest]),
                Dock::Bottom => (FlexDirection::Column, [rest, node]),
            };
            rest = self.tree.new_with_children(dock_link_style(direction), &pair)?;
        }

        Ok(rest)
    }

    /// Walk the computed tree, accumulating absolute positions.
    fn collect_frames(
        &self,
        node: NodeId,
        origin: Point<f32>,
        out: &mut ComputedLayout,
    ) -> Result<(), TaffyError> {
        let (location, size) = {
            let layout = self.tree.layout(node)?;
            (layout.location, layout.size)
        };
        let position = Point { x: origin.x + location.x, y: origin.y + location.y };

        if let Some(&idx) = self.views.get(&node) {
            out.set_frame(idx, Frame::new(position.x, position.y, size.width, size.height));
        }

        for child in self.tree.children(node)? {
            self.collect_frames(child, position, out)?;
        }
        Ok(())
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Lay out one root view into the viewport's content area.
fn layout_root(root: usize, viewport: &Viewport, out: &mut ComputedLayout) -> Result<(), LayoutError> {
    let content = viewport.content;
    let mut builder = TreeBuilder::new();
    let node = builder.build(
        root,
        Placement::Root(Size { width: content.width, height: content.height }),
    )?;

    let available = Size {
        width: AvailableSpace::Definite(content.width),
        height: AvailableSpace::Definite(content.height),
    };

    builder.tree.compute_layout_with_measure(
        node,
        available,
        |known_dimensions, available_space, _node_id, context, _style| match context {
            Some(&mut idx) => measure_view(idx, known_dimensions, available_space),
            None => Size::ZERO,
        },
    )?;

    builder.collect_frames(node, Point { x: content.left, y: content.top }, out)?;
    out.roots.push(root);

    trace!(root, nodes = builder.tree.total_node_count(), "laid out root");
    Ok(())
}

/// Compute layout for every root view.
///
/// Roots are allocated views without a parent. Each is laid out in the
/// viewport's content area, then grown under the system bars where allowed.
pub fn try_compute_layout(viewport: &Viewport) -> Result<ComputedLayout, LayoutError> {
    let started = Instant::now();
    let indices = get_allocated_indices();
    let len = indices.iter().max().map_or(0, |&max| max + 1);
    let mut result = ComputedLayout::with_len(len);

    let roots: Vec<usize> = indices
        .into_iter()
        .filter(|&idx| core::get_parent_index(idx).is_none() && !core::is_collapsed(idx))
        .collect();

    for &root in &roots {
        layout_root(root, viewport, &mut result)?;
        apply_safe_area(&mut result, root, viewport);
    }

    debug!(
        roots = roots.len(),
        views = len,
        elapsed_us = started.elapsed().as_micros() as u64,
        "layout pass"
    );
    Ok(result)
}

/// Compute layout for every root view, recording a failure in the result
/// instead of returning it.
pub fn compute_layout(viewport: &Viewport) -> ComputedLayout {
    try_compute_layout(viewport).unwrap_or_else(|err| ComputedLayout::failed(err.to_string()))
}
