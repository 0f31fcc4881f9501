//! Safe-area layout scenarios.
//!
//! Each scenario builds a page from markup, lays it out on the current
//! device and checks where the safe-area insets ended up:
//! - an empty container covers the whole screen
//! - leaf children of the root stay inside the safe area
//! - nested containers flush with the root extend under the system bars too
//!
//! [`run_all`] runs every scenario on a device and reports each outcome.

use tracing::debug;

use crate::builder::parse;
use crate::engine::reset_registry;
use crate::pipeline::device::{Device, device, set_device};
use crate::pipeline::layout_derived::clear_layout;
use crate::view::View;
use super::assertions::*;
use super::geometry::{bottom, height, left, right, top, width};
use super::wait::{HasRoot, execute_snippet};
use super::ScenarioError;

type ScenarioResult = Result<(), ScenarioError>;

fn required(view: Option<View>, id: &'static str) -> Result<View, ScenarioError> {
    view.ok_or(ScenarioError::MissingView(id))
}

fn noop<U>(_: &U) {}

/// Every scenario starts from an empty registry.
fn fresh_page(xml: &str) -> Result<View, ScenarioError> {
    reset_registry();
    clear_layout();
    Ok(parse(xml)?)
}

// =============================================================================
// Common
// =============================================================================

fn layout_in_full_screen_test(layout: &View) -> ScenarioResult {
    let device = device();
    let (origin_x, origin_y) = device.full_screen_origin();

    let (l, t, r, b) = (left(layout), top(layout), right(layout), bottom(layout));
    equal(l, origin_x, format!("{layout}.left"))?;
    equal(t, origin_y, format!("{layout}.top"))?;
    equal(r, device.width, format!("{layout}.right"))?;
    equal(b, device.height, format!("{layout}.bottom"))?;
    Ok(())
}

/// `count` labels with the given text, the first two named `child0` and `child1`.
fn labels(count: usize, text: &str) -> String {
    (0..count)
        .map(|i| match i {
            0 | 1 => format!(r#"<Label id="child{i}" text="{text}" />"#),
            _ => format!(r#"<Label text="{text}" />"#),
        })
        .collect()
}

const OVERFLOWING_TEXT: &str = "overflowing text, overflowing text, overflowing text, \
                                overflowing text, overflowing text, overflowing text";

// =============================================================================
// Absolute
// =============================================================================

struct AbsoluteViews {
    root: View,
    child0: Option<View>,
}

impl HasRoot for AbsoluteViews {
    fn root(&self) -> View {
        self.root
    }
}

fn get_absolute_views(xml: &str) -> Result<AbsoluteViews, ScenarioError> {
    let root = fresh_page(xml)?;
    Ok(AbsoluteViews { root, child0: root.get_view_by_id("child0") })
}

pub fn test_absolute_in_full_screen() -> ScenarioResult {
    let snippet = r#"<AbsoluteLayout id="abs" backgroundColor="Crimson"></AbsoluteLayout>"#;

    execute_snippet(get_absolute_views(snippet)?, noop, |ui| {
        layout_in_full_screen_test(&ui.root)
    })
}

pub fn test_absolute_children_components_in_safe_area() -> ScenarioResult {
    let snippet = r#"
        <AbsoluteLayout id="abs">
            <Button id="child0" text="Left: 0, Top: 0" left="0" top="0" backgroundColor="red" />
            <Button text="Left: 30, Top: 80" left="30" top="80" backgroundColor="green" />
            <Button text="Left: 150, Top: 25" left="150" top="25" backgroundColor="blue" />
            <Button text="Left: 70, Top: 150" left="70" top="150" backgroundColor="yellow" />
        </AbsoluteLayout>
    "#;

    execute_snippet(get_absolute_views(snippet)?, noop, |ui| {
        let child0 = required(ui.child0, "child0")?;
        let insets = ui.root.get_safe_area_insets();
        equal(left(&child0), insets.left, format!("{child0}.left"))?;
        equal(top(&child0), insets.top, format!("{child0}.top"))?;
        Ok(())
    })
}

pub fn test_absolute_nested_layouts_beyond_safe_area() -> ScenarioResult {
    let snippet = r#"
        <AbsoluteLayout id="abs">
            <AbsoluteLayout id="child0" left="0" top="0" backgroundColor="red">
                <Label text="Left: 0, Top: 0" />
            </AbsoluteLayout>
            <AbsoluteLayout left="30" top="80" backgroundColor="green">
                <Label text="Left: 30, Top: 80" />
            </AbsoluteLayout>
            <AbsoluteLayout left="150" top="25" backgroundColor="blue">
                <Label text="Left: 150, Top: 25" />
            </AbsoluteLayout>
            <AbsoluteLayout left="70" top="150" backgroundColor="yellow">
                <Label text="Left: 70, Top: 150" />
            </AbsoluteLayout>
        </AbsoluteLayout>
    "#;

    execute_snippet(get_absolute_views(snippet)?, noop, |ui| {
        let child0 = required(ui.child0, "child0")?;
        is_left_aligned_with(&ui.root, &child0)?;
        is_top_aligned_with(&ui.root, &child0)?;
        Ok(())
    })
}

// =============================================================================
// Dock
// =============================================================================

struct DockViews {
    root: View,
    child_left: Option<View>,
    child_top: Option<View>,
    child_right: Option<View>,
    child_bottom: Option<View>,
    child_fill: Option<View>,
}

impl HasRoot for DockViews {
    fn root(&self) -> View {
        self.root
    }
}

impl DockViews {
    fn docked(&self) -> Result<[View; 5], ScenarioError> {
        Ok([
            required(self.child_left, "childLeft")?,
            required(self.child_top, "childTop")?,
            required(self.child_right, "childRight")?,
            required(self.child_bottom, "childBottom")?,
            required(self.child_fill, "childFill")?,
        ])
    }
}

fn get_dock_views(xml: &str) -> Result<DockViews, ScenarioError> {
    let root = fresh_page(xml)?;
    Ok(DockViews {
        root,
        child_left: root.get_view_by_id("childLeft"),
        child_top: root.get_view_by_id("childTop"),
        child_right: root.get_view_by_id("childRight"),
        child_bottom: root.get_view_by_id("childBottom"),
        child_fill: root.get_view_by_id("childFill"),
    })
}

pub fn test_dock_in_full_screen() -> ScenarioResult {
    let snippet = r#"<DockLayout id="dock" backgroundColor="Crimson"></DockLayout>"#;

    execute_snippet(get_dock_views(snippet)?, noop, |ui| {
        layout_in_full_screen_test(&ui.root)
    })
}

pub fn test_dock_children_components_in_safe_area() -> ScenarioResult {
    let snippet = r#"
        <DockLayout id="dock" stretchLastChild="true">
            <Label id="childLeft" dock="Left" text="left" backgroundColor="red" />
            <Label id="childTop" dock="Top" text="top" backgroundColor="green" />
            <Label id="childRight" dock="Right" text="right" backgroundColor="blue" />
            <Label id="childBottom" dock="Bottom" text="bottom" backgroundColor="yellow" />
            <Label id="childFill" text="fill" />
        </DockLayout>
    "#;

    execute_snippet(get_dock_views(snippet)?, noop, |ui| {
        let root = &ui.root;
        let [child_left, child_top, child_right, child_bottom, child_fill] = ui.docked()?;
        let insets = root.get_safe_area_insets();

        equal(left(&child_left), insets.left, format!("{child_left}.left"))?;
        equal(top(&child_left), insets.top, format!("{child_left}.top"))?;

        equal(top(&child_top), insets.top, format!("{child_top}.top"))?;
        equal(right(&child_top), width(root) - insets.right, format!("{child_top}.right"))?;

        equal(right(&child_right), width(root) - insets.right, format!("{child_right}.right"))?;
        equal(bottom(&child_right), height(root) - insets.bottom, format!("{child_right}.bottom"))?;

        equal(bottom(&child_bottom), height(root) - insets.bottom, format!("{child_bottom}.bottom"))?;

        is_left_with(&child_left, &child_fill, width(&child_left))?;
        is_below_with(&child_top, &child_fill, height(&child_top))?;
        is_right_with(&child_fill, &child_right, width(&child_right))?;
        is_above_with(&child_fill, &child_bottom, height(&child_bottom))?;
        Ok(())
    })
}

pub fn test_dock_nested_layouts_beyond_safe_area() -> ScenarioResult {
    let snippet = r#"
        <DockLayout id="dock" stretchLastChild="true">
            <DockLayout id="childLeft" dock="Left" backgroundColor="red">
                <Label text="left" />
            </DockLayout>
            <DockLayout id="childTop" dock="Top" backgroundColor="green">
                <Label text="top" />
            </DockLayout>
            <DockLayout id="childRight" dock="Right" backgroundColor="blue">
                <Label text="right" />
            </DockLayout>
            <DockLayout id="childBottom" dock="Bottom" backgroundColor="yellow">
                <Label text="bottom" />
            </DockLayout>
            <DockLayout id="childFill">
                <Label text="fill" />
            </DockLayout>
        </DockLayout>
    "#;

    execute_snippet(get_dock_views(snippet)?, noop, |ui| {
        let root = &ui.root;
        let [child_left, child_top, child_right, child_bottom, child_fill] = ui.docked()?;

        is_left_aligned_with(root, &child_left)?;
        is_top_aligned_with(root, &child_left)?;

        is_top_aligned_with(root, &child_top)?;
        is_right_aligned_with(root, &child_top)?;

        is_right_aligned_with(root, &child_right)?;
        is_bottom_aligned_with(root, &child_right)?;

        let nested_heights = height(&child_top) + height(&child_fill) + height(&child_bottom);
        equal(height(root), nested_heights, format!("{root} height vs sum of nested dock heights"))?;

        let nested_widths = width(&child_left) + width(&child_fill) + width(&child_right);
        equal(width(root), nested_widths, format!("{root} width vs sum of nested dock widths"))?;
        Ok(())
    })
}

// =============================================================================
// Grid
// =============================================================================

struct GridViews {
    root: View,
    grid: Option<View>,
    cells: [[Option<View>; 3]; 3],
}

impl HasRoot for GridViews {
    fn root(&self) -> View {
        self.root
    }
}

impl GridViews {
    fn grid_and_cells(&self) -> Result<(View, [[View; 3]; 3]), ScenarioError> {
        const IDS: [[&str; 3]; 3] = [
            ["cell00", "cell01", "cell02"],
            ["cell10", "cell11", "cell12"],
            ["cell20", "cell21", "cell22"],
        ];
        let grid = required(self.grid, "grid")?;
        let mut cells = [[grid; 3]; 3];
        for (r, row) in IDS.iter().enumerate() {
            for (c, id) in row.iter().enumerate() {
                cells[r][c] = required(self.cells[r][c], *id)?;
            }
        }
        Ok((grid, cells))
    }
}

fn get_grid_views(xml: &str) -> Result<GridViews, ScenarioError> {
    let root = fresh_page(xml)?;
    let cell = |r: usize, c: usize| root.get_view_by_id(&format!("cell{r}{c}"));
    Ok(GridViews {
        root,
        grid: root.get_view_by_id("grid"),
        cells: [
            [cell(0, 0), cell(0, 1), cell(0, 2)],
            [cell(1, 0), cell(1, 1), cell(1, 2)],
            [cell(2, 0), cell(2, 1), cell(2, 2)],
        ],
    })
}

/// A 3x3 star grid with one `tag` element per cell.
fn grid_of(tag: &str, attributes: &str) -> String {
    let cells: String = (0..3)
        .flat_map(|r| (0..3).map(move |c| (r, c)))
        .map(|(r, c)| format!(r#"<{tag} row="{r}" col="{c}" id="cell{r}{c}" {attributes}></{tag}>"#))
        .collect();
    format!(
        r#"<GridLayout id="grid" rows="*, *, *" columns="*, *, *" backgroundColor="Crimson">{cells}</GridLayout>"#
    )
}

pub fn test_grid_layout_in_full_screen() -> ScenarioResult {
    let snippet = r#"<GridLayout id="grid" backgroundColor="Crimson"></GridLayout>"#;

    execute_snippet(get_grid_views(snippet)?, noop, |ui| {
        layout_in_full_screen_test(&ui.root)
    })
}

pub fn test_component_cells_layout_in_safe_area() -> ScenarioResult {
    let snippet = grid_of("Label", r#"text="overflowing text, overflowing text""#);

    execute_snippet(get_grid_views(&snippet)?, noop, |ui| {
        let (grid, cells) = ui.grid_and_cells()?;
        let insets = ui.root.get_safe_area_insets();

        for row in &cells {
            equal(left(&row[0]), insets.left, format!("{}.left", row[0]))?;
        }
        for cell in &cells[0] {
            is_below_with(&grid, cell, insets.top)?;
        }
        for row in &cells {
            equal(right(&row[2]), width(&grid) - insets.right, format!("{}.right", row[2]))?;
        }
        for cell in &cells[2] {
            is_above_with(cell, &grid, insets.bottom)?;
        }

        height_equal(&cells[0][1], &cells[1][1])?;
        height_equal(&cells[1][1], &cells[2][1])?;
        let heights_and_insets = insets.top
            + height(&cells[0][1])
            + height(&cells[1][1])
            + height(&cells[2][1])
            + insets.bottom;
        equal(height(&grid), heights_and_insets, "grid height vs sum of cell heights and insets")?;

        width_equal(&cells[1][0], &cells[1][1])?;
        width_equal(&cells[1][1], &cells[1][2])?;
        let widths_and_insets = insets.left
            + width(&cells[1][0])
            + width(&cells[1][1])
            + width(&cells[1][2])
            + insets.right;
        equal(width(&grid), widths_and_insets, "grid width vs sum of cell widths and insets")?;
        Ok(())
    })
}

pub fn test_nested_grid_cells_layout_beyond_safe_area() -> ScenarioResult {
    let snippet = grid_of("GridLayout", r#"backgroundColor="SkyBlue""#);

    execute_snippet(get_grid_views(&snippet)?, noop, |ui| {
        let (grid, cells) = ui.grid_and_cells()?;

        for row in &cells {
            is_left_aligned_with(&grid, &row[0])?;
            is_right_aligned_with(&grid, &row[2])?;
        }
        for cell in &cells[0] {
            is_top_aligned_with(&grid, cell)?;
        }
        for cell in &cells[2] {
            is_bottom_aligned_with(&grid, cell)?;
        }

        let (h01, h11, h21) = (height(&cells[0][1]), height(&cells[1][1]), height(&cells[2][1]));
        greater_or_equal(h01, h11, "cell01 height")?;
        less_or_equal(h11, h21, "cell11 height")?;
        equal(height(&grid), h01 + h11 + h21, "grid height vs sum of nested grid heights")?;

        let (w10, w11, w12) = (width(&cells[1][0]), width(&cells[1][1]), width(&cells[1][2]));
        greater_or_equal(w10, w11, "cell10 width")?;
        less_or_equal(w11, w12, "cell11 width")?;
        equal(width(&grid), w10 + w11 + w12, "grid width vs sum of nested grid widths")?;
        Ok(())
    })
}

// =============================================================================
// Stack
// =============================================================================

struct StackViews {
    root: View,
    child0: Option<View>,
    child1: Option<View>,
}

impl HasRoot for StackViews {
    fn root(&self) -> View {
        self.root
    }
}

impl StackViews {
    fn first_two(&self) -> Result<(View, View), ScenarioError> {
        Ok((required(self.child0, "child0")?, required(self.child1, "child1")?))
    }
}

fn get_stack_views(xml: &str) -> Result<StackViews, ScenarioError> {
    let root = fresh_page(xml)?;
    Ok(StackViews {
        root,
        child0: root.get_view_by_id("child0"),
        child1: root.get_view_by_id("child1"),
    })
}

pub fn test_stack_in_full_screen() -> ScenarioResult {
    let snippet = r#"<StackLayout id="stack" backgroundColor="Crimson"></StackLayout>"#;

    execute_snippet(get_stack_views(snippet)?, noop, |ui| {
        layout_in_full_screen_test(&ui.root)
    })
}

pub fn test_stack_horizontal_children_components_in_safe_area() -> ScenarioResult {
    let snippet = format!(
        r#"<StackLayout id="stack" orientation="horizontal" backgroundColor="Crimson">{}</StackLayout>"#,
        labels(27, "123")
    );

    execute_snippet(get_stack_views(&snippet)?, noop, |ui| {
        let root = &ui.root;
        let (child0, child1) = ui.first_two()?;
        let insets = root.get_safe_area_insets();

        equal(left(&child0), insets.left, format!("{child0}.left"))?;
        equal(top(&child0), insets.top, format!("{child0}.top"))?;
        equal(bottom(&child0), height(root) - insets.bottom, format!("{child0}.bottom"))?;
        is_left_with(&child0, &child1, width(&child0))?;
        Ok(())
    })
}

pub fn test_stack_vertical_children_components_in_safe_area() -> ScenarioResult {
    let snippet = format!(
        r#"<StackLayout id="stack" orientation="vertical" backgroundColor="Crimson">{}</StackLayout>"#,
        labels(41, OVERFLOWING_TEXT)
    );

    execute_snippet(get_stack_views(&snippet)?, noop, |ui| {
        let root = &ui.root;
        let (child0, child1) = ui.first_two()?;
        let insets = root.get_safe_area_insets();

        equal(left(&child0), insets.left, format!("{child0}.left"))?;
        equal(top(&child0), insets.top, format!("{child0}.top"))?;
        equal(right(&child0), width(root) - insets.right, format!("{child0}.right"))?;
        is_below_with(&child0, &child1, height(&child0))?;
        Ok(())
    })
}

pub fn test_stack_nested_layouts_beyond_safe_area() -> ScenarioResult {
    const COLORS: [&str; 13] = [
        "GoldenRod", "LemonChiffon", "Crimson", "Chocolate", "Cornsilk", "BurlyWood", "Khaki",
        "LightBlue", "GoldenRod", "Indigo", "Crimson", "Chocolate", "SkyBlue",
    ];
    let nested: String = COLORS
        .iter()
        .enumerate()
        .map(|(i, color)| {
            let id = if i < 2 { format!(r#" id="child{i}""#) } else { String::new() };
            format!(
                r#"<StackLayout{id} backgroundColor="{color}">{}</StackLayout>"#,
                labels_without_ids(3, OVERFLOWING_TEXT)
            )
        })
        .collect();
    let snippet =
        format!(r#"<StackLayout id="stack" backgroundColor="Crimson">{nested}</StackLayout>"#);

    execute_snippet(get_stack_views(&snippet)?, noop, |ui| {
        let root = &ui.root;
        let child0 = required(ui.child0, "child0")?;
        is_left_aligned_with(root, &child0)?;
        is_top_aligned_with(root, &child0)?;
        is_right_aligned_with(root, &child0)?;
        Ok(())
    })
}

fn labels_without_ids(count: usize, text: &str) -> String {
    format!(r#"<Label text="{text}" />"#).repeat(count)
}

// =============================================================================
// Runner
// =============================================================================

/// A named scenario entry point.
pub type Scenario = fn() -> ScenarioResult;

/// Every safe-area scenario, in declaration order.
pub const SCENARIOS: [(&str, Scenario); 13] = [
    ("test_absolute_in_full_screen", test_absolute_in_full_screen),
    ("test_absolute_children_components_in_safe_area", test_absolute_children_components_in_safe_area),
    ("test_absolute_nested_layouts_beyond_safe_area", test_absolute_nested_layouts_beyond_safe_area),
    ("test_dock_in_full_screen", test_dock_in_full_screen),
    ("test_dock_children_components_in_safe_area", test_dock_children_components_in_safe_area),
    ("test_dock_nested_layouts_beyond_safe_area", test_dock_nested_layouts_beyond_safe_area),
    ("test_grid_layout_in_full_screen", test_grid_layout_in_full_screen),
    ("test_component_cells_layout_in_safe_area", test_component_cells_layout_in_safe_area),
    ("test_nested_grid_cells_layout_beyond_safe_area", test_nested_grid_cells_layout_beyond_safe_area),
    ("test_stack_in_full_screen", test_stack_in_full_screen),
    ("test_stack_horizontal_children_components_in_safe_area", test_stack_horizontal_children_components_in_safe_area),
    ("test_stack_vertical_children_components_in_safe_area", test_stack_vertical_children_components_in_safe_area),
    ("test_stack_nested_layouts_beyond_safe_area", test_stack_nested_layouts_beyond_safe_area),
];

/// How a scenario ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Pass,
    /// An assertion did not hold, or the layout never became valid.
    Fail(String),
    /// The scenario could not run (bad markup, failed layout pass).
    Error(String),
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl From<ScenarioResult> for Outcome {
    fn from(result: ScenarioResult) -> Self {
        match result {
            Ok(()) => Self::Pass,
            Err(err @ (ScenarioError::Assertion(_) | ScenarioError::Timeout { .. })) => {
                Self::Fail(err.to_string())
            }
            Err(err) => Self::Error(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioReport {
    pub name: &'static str,
    pub outcome: Outcome,
}

/// Run every scenario on `device`.
///
/// A failing scenario does not stop the others. The previous device is
/// restored afterwards.
pub fn run_all(device_profile: Device) -> Vec<ScenarioReport> {
    let previous = device();
    debug!(device = %device_profile.name, "running safe-area scenarios");
    set_device(device_profile);

    let reports = SCENARIOS
        .iter()
        .map(|&(name, scenario)| {
            debug!(name, "scenario start");
            let outcome = Outcome::from(scenario());
            debug!(name, ?outcome, "scenario finish");
            ScenarioReport { name, outcome }
        })
        .collect();

    set_device(previous);
    reports
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::engine::get_allocated_count;
    use crate::testing::assertions::AssertionError;

    fn setup(profile: Device) {
        reset_registry();
        clear_layout();
        set_device(profile);
    }

    #[test]
    fn test_full_screen_portrait() {
        setup(Device::iphone_x());
        test_absolute_in_full_screen().unwrap();
        test_grid_layout_in_full_screen().unwrap();
        // Scenarios unmount what they build
        assert_eq!(get_allocated_count(), 0);
    }

    #[test]
    fn test_children_in_safe_area_portrait() {
        setup(Device::iphone_x());
        test_absolute_children_components_in_safe_area().unwrap();
        test_dock_children_components_in_safe_area().unwrap();
        test_component_cells_layout_in_safe_area().unwrap();
    }

    #[test]
    fn test_legacy_children_start_below_status_bar() {
        setup(Device::iphone_8_ios10());
        let err = test_absolute_children_components_in_safe_area().unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::Assertion(AssertionError::Mismatch { actual, expected, .. })
                if actual == 20.0 && expected == 0.0
        ));
        set_device(Device::default());
    }

    #[test]
    fn test_outcome_classification() {
        assert_eq!(Outcome::from(Ok(())), Outcome::Pass);
        assert!(matches!(
            Outcome::from(Err(ScenarioError::MissingView("child0"))),
            Outcome::Error(_)
        ));
        assert!(matches!(
            Outcome::from(Err(ScenarioError::from(AssertionError::Check("nope".to_string())))),
            Outcome::Fail(_)
        ));
        assert!(matches!(
            Outcome::from(Err(ScenarioError::Timeout {
                view: "GridLayout(0)".to_string(),
                timeout: Duration::from_secs(1),
            })),
            Outcome::Fail(_)
        ));
    }

    #[test]
    fn test_legacy_nested_grid_tolerates_uneven_thirds() {
        setup(Device::iphone_8_ios10());
        test_nested_grid_cells_layout_beyond_safe_area().unwrap();
        set_device(Device::default());
    }

    #[test]
    fn test_run_all_restores_device() {
        setup(Device::android_phone());
        let reports = run_all(Device::iphone_x_landscape());

        assert_eq!(reports.len(), SCENARIOS.len());
        assert!(reports.iter().all(|r| r.outcome.is_pass()), "{reports:#?}");
        assert_eq!(device(), Device::android_phone());
        set_device(Device::default());
    }
}
