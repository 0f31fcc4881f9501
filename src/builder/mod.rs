//! XML Builder - View trees from markup.
//!
//! Every element allocates one view. Children are created inside the
//! parent's context, so they attach to it as they are allocated.
//!
//! # Example
//!
//! ```ignore
//! use safe_layout::builder::parse;
//!
//! let page = parse(r#"
//!     <DockLayout id="dock" stretchLastChild="true">
//!         <Label id="top" dock="top" text="Header" />
//!         <Button id="fill" text="Body" />
//!     </DockLayout>
//! "#)?;
//!
//! let header = page.get_view_by_id("top").unwrap();
//! ```
//!
//! Cosmetic attributes (`backgroundColor`, `color`, `class`, `style`) are
//! accepted and dropped. Unknown attributes are dropped with a debug log.
//! A failed build releases every view it allocated.

use roxmltree::{Document, Node};
use tracing::{debug, trace};

use crate::engine::arrays::{core, layout, text};
use crate::engine::{allocate_index, pop_parent_context, push_parent_context, release_index};
use crate::error::{BuildError, StyleError};
use crate::pipeline::device::device;
use crate::styling::{
    bool_converter, dock_converter, horizontal_alignment_converter, index_converter,
    item_specs_converter, length_converter, number_converter, orientation_converter,
    thickness_converter, vertical_alignment_converter, visibility_converter,
};
use crate::types::{Dimension, ViewType};
use crate::view::View;

/// Attributes that only affect painting.
const COSMETIC_ATTRIBUTES: [&str; 4] = ["backgroundColor", "color", "class", "style"];

/// Build a view tree from an XML fragment.
///
/// Lengths given in `px` are converted with the current device's scale.
pub fn parse(xml: &str) -> Result<View, BuildError> {
    let document = Document::parse(xml)?;
    let scale = device().scale;
    build_element(document.root_element(), scale)
}

fn build_element(node: Node<'_, '_>, scale: f32) -> Result<View, BuildError> {
    let tag = node.tag_name().name();
    let view_type =
        ViewType::from_tag(tag).ok_or_else(|| BuildError::UnknownElement(tag.to_string()))?;

    let index = allocate_index(node.attribute("id"));
    core::set_view_type(index, view_type);
    debug!(index, tag, id = node.attribute("id"), "created view");

    let built = apply_attributes(index, view_type, node, scale)
        .and_then(|()| build_children(index, view_type, node, scale));

    match built {
        Ok(()) => Ok(View::from_allocated(index)),
        Err(err) => {
            release_index(index);
            Err(err)
        }
    }
}

fn build_children(
    index: usize,
    view_type: ViewType,
    node: Node<'_, '_>,
    scale: f32,
) -> Result<(), BuildError> {
    let elements: Vec<Node<'_, '_>> = node.children().filter(Node::is_element).collect();
    if elements.is_empty() {
        return Ok(());
    }
    if view_type.is_leaf() {
        return Err(BuildError::ChildrenNotAllowed { tag: view_type.tag() });
    }

    push_parent_context(index);
    let result = elements
        .into_iter()
        .try_for_each(|child| build_element(child, scale).map(|_| ()));
    pop_parent_context();
    result
}

fn apply_attributes(
    index: usize,
    view_type: ViewType,
    node: Node<'_, '_>,
    scale: f32,
) -> Result<(), BuildError> {
    for attr in node.attributes() {
        let (name, value) = (attr.name(), attr.value());
        apply_attribute(index, name, value, scale).map_err(|source| {
            BuildError::InvalidAttribute {
                tag: view_type.tag(),
                name: name.to_string(),
                value: value.to_string(),
                source,
            }
        })?;
    }
    Ok(())
}

fn apply_attribute(index: usize, name: &str, value: &str, scale: f32) -> Result<(), StyleError> {
    match name {
        // Recorded at allocation
        "id" => {}

        // Text
        "text" => text::set_text_content(index, value.to_string()),
        "fontSize" => text::set_font_size(index, positive(value)?),

        // Sizing
        "width" => layout::set_width(index, length_converter(value, scale)?),
        "height" => layout::set_height(index, length_converter(value, scale)?),
        "minWidth" => layout::set_min_width(index, min_length(value, scale)?),
        "minHeight" => layout::set_min_height(index, min_length(value, scale)?),

        // Spacing
        "margin" => layout::set_margin(index, thickness_converter(value)?),
        "marginTop" => layout::set_margin_top(index, number_converter(value)?),
        "marginRight" => layout::set_margin_right(index, number_converter(value)?),
        "marginBottom" => layout::set_margin_bottom(index, number_converter(value)?),
        "marginLeft" => layout::set_margin_left(index, number_converter(value)?),
        "padding" => layout::set_padding(index, thickness_converter(value)?),
        "paddingTop" => layout::set_padding_top(index, number_converter(value)?),
        "paddingRight" => layout::set_padding_right(index, number_converter(value)?),
        "paddingBottom" => layout::set_padding_bottom(index, number_converter(value)?),
        "paddingLeft" => layout::set_padding_left(index, number_converter(value)?),

        // Alignment
        "horizontalAlignment" => {
            layout::set_horizontal_alignment(index, horizontal_alignment_converter(value)?)
        }
        "verticalAlignment" => {
            layout::set_vertical_alignment(index, vertical_alignment_converter(value)?)
        }

        // Absolute
        "left" => layout::set_left(index, number_converter(value)?),
        "top" => layout::set_top(index, number_converter(value)?),

        // Dock
        "dock" => layout::set_dock(index, dock_converter(value)?),
        "stretchLastChild" => layout::set_stretch_last_child(index, bool_converter(value)?),

        // Stack
        "orientation" => layout::set_orientation(index, orientation_converter(value)?),

        // Grid
        "rows" => layout::set_rows(index, item_specs_converter(value)?),
        "columns" => layout::set_columns(index, item_specs_converter(value)?),
        "row" => layout::set_row(index, index_converter(value)?),
        "col" => layout::set_col(index, index_converter(value)?),
        "rowSpan" => layout::set_row_span(index, span(value)?),
        "colSpan" => layout::set_col_span(index, span(value)?),

        // Safe area and visibility
        "iosOverflowSafeArea" => layout::set_overflow_safe_area(index, bool_converter(value)?),
        "visibility" => core::set_visibility(index, visibility_converter(value)?),

        _ if COSMETIC_ATTRIBUTES.contains(&name) => {
            trace!(index, name, "ignored cosmetic attribute");
        }
        _ => debug!(index, name, value, "ignored unknown attribute"),
    }
    Ok(())
}

fn positive(value: &str) -> Result<f32, StyleError> {
    number_converter(value)
        .ok()
        .filter(|n| *n > 0.0)
        .ok_or_else(|| StyleError::InvalidNumber(value.to_string()))
}

/// Minimum sizes are plain dips; `auto` means no minimum.
fn min_length(value: &str, scale: f32) -> Result<f32, StyleError> {
    match length_converter(value, scale)? {
        Dimension::Auto => Ok(0.0),
        Dimension::Dip(n) if n >= 0.0 => Ok(n),
        _ => Err(StyleError::InvalidLength(value.to_string())),
    }
}

fn span(value: &str) -> Result<u16, StyleError> {
    match index_converter(value)? {
        0 => Err(StyleError::InvalidNumber(value.to_string())),
        n => Ok(n),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{get_allocated_count, get_current_parent_index, reset_registry};
    use crate::pipeline::device::{Device, set_device};
    use crate::types::{Dock, ItemSpec, Orientation, Visibility};

    fn setup() {
        reset_registry();
        set_device(Device::iphone_x());
    }

    #[test]
    fn test_parse_tree() {
        setup();

        let root = parse(
            r#"
            <StackLayout id="stack" orientation="horizontal">
                <Label id="first" text="Hello" fontSize="20" />
                <!-- comment -->
                <Button id="second" text="Go" />
            </StackLayout>
            "#,
        )
        .unwrap();

        assert_eq!(root.view_type(), ViewType::StackLayout);
        assert_eq!(layout::get_orientation(root.index()), Orientation::Horizontal);
        assert_eq!(root.children().len(), 2);

        let first = root.get_view_by_id("first").unwrap();
        assert_eq!(first.text(), "Hello");
        assert_eq!(text::get_font_size(first.index()), 20.0);
        assert_eq!(first.parent(), Some(root));
        assert_eq!(get_current_parent_index(), None);
    }

    #[test]
    fn test_parse_layout_attributes() {
        setup();

        let root = parse(
            r#"
            <GridLayout rows="*, auto, 40" columns="2*" width="300px" height="50%" margin="1 2">
                <DockLayout row="1" col="0" rowSpan="2" dock="bottom" stretchLastChild="false"
                            iosOverflowSafeArea="false" visibility="collapse" />
            </GridLayout>
            "#,
        )
        .unwrap();
        let i = root.index();

        assert_eq!(
            layout::get_rows(i),
            vec![ItemSpec::Star(1.0), ItemSpec::Auto, ItemSpec::Pixel(40.0)]
        );
        assert_eq!(layout::get_columns(i), vec![ItemSpec::Star(2.0)]);
        // 300 physical pixels at scale 3
        assert_eq!(layout::get_width(i), Dimension::Dip(100.0));
        assert_eq!(layout::get_height(i), Dimension::Percent(50.0));
        assert_eq!(layout::get_margin(i), [1.0, 2.0, 1.0, 2.0]);

        let dock = root.children()[0].index();
        assert_eq!(layout::get_row(dock), 1);
        assert_eq!(layout::get_row_span(dock), 2);
        assert_eq!(layout::get_dock(dock), Dock::Bottom);
        assert!(!layout::get_stretch_last_child(dock));
        assert!(!layout::get_overflow_safe_area(dock));
        assert_eq!(core::get_visibility(dock), Visibility::Collapse);
    }

    #[test]
    fn test_cosmetic_and_unknown_attributes_ignored() {
        setup();
        let root = parse(
            r#"<AbsoluteLayout backgroundColor="red" class="page" automationText="x" />"#,
        )
        .unwrap();
        assert_eq!(root.view_type(), ViewType::AbsoluteLayout);
    }

    #[test]
    fn test_unknown_element() {
        setup();
        let err = parse(r#"<StackLayout><WebView /></StackLayout>"#).unwrap_err();
        assert!(matches!(err, BuildError::UnknownElement(ref tag) if tag == "WebView"));
        assert_eq!(get_allocated_count(), 0);
        assert_eq!(get_current_parent_index(), None);
    }

    #[test]
    fn test_leaf_with_children() {
        setup();
        let err = parse(r#"<Label><Button /></Label>"#).unwrap_err();
        assert!(matches!(err, BuildError::ChildrenNotAllowed { tag: "Label" }));
        assert_eq!(get_allocated_count(), 0);
    }

    #[test]
    fn test_invalid_attribute() {
        setup();
        let err = parse(r#"<DockLayout><Label dock="middle" /></DockLayout>"#).unwrap_err();
        match err {
            BuildError::InvalidAttribute { tag, name, value, .. } => {
                assert_eq!(tag, "Label");
                assert_eq!(name, "dock");
                assert_eq!(value, "middle");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(get_allocated_count(), 0);

        assert!(parse(r#"<GridLayout rowSpan="0" />"#).is_err());
        assert!(parse(r#"<Label fontSize="-3" />"#).is_err());
        assert!(parse(r#"<Label minWidth="10%" />"#).is_err());
    }

    #[test]
    fn test_malformed_xml() {
        setup();
        assert!(matches!(parse("<StackLayout>"), Err(BuildError::Xml(_))));
    }
}
