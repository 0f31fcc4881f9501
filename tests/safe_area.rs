//! Safe-area scenarios across device profiles.
//!
//! Every scenario must pass on devices with safe-area insets. On iOS before
//! safe areas, frames start below the status bar while the reported insets
//! are zero, so the scenarios comparing leaf children against insets fail.

use safe_layout::testing::scenarios::{self, SCENARIOS};
use safe_layout::{Device, Outcome, ScenarioReport, run_all};

fn failures(reports: &[ScenarioReport]) -> Vec<&ScenarioReport> {
    reports.iter().filter(|r| !r.outcome.is_pass()).collect()
}

#[test]
fn portrait_notch_device_passes_every_scenario() {
    let reports = run_all(Device::iphone_x());
    assert_eq!(reports.len(), SCENARIOS.len());
    assert!(failures(&reports).is_empty(), "{:#?}", failures(&reports));
}

#[test]
fn landscape_notch_device_passes_every_scenario() {
    let reports = run_all(Device::iphone_x_landscape());
    assert!(failures(&reports).is_empty(), "{:#?}", failures(&reports));
}

#[test]
fn android_passes_every_scenario() {
    let reports = run_all(Device::android_phone());
    assert!(failures(&reports).is_empty(), "{:#?}", failures(&reports));
}

#[test]
fn legacy_ios_fails_only_children_against_insets() {
    let reports = run_all(Device::iphone_8_ios10());

    let mut failed: Vec<&str> = failures(&reports).iter().map(|r| r.name).collect();
    failed.sort_unstable();
    assert_eq!(
        failed,
        vec![
            "test_absolute_children_components_in_safe_area",
            "test_dock_children_components_in_safe_area",
            "test_stack_horizontal_children_components_in_safe_area",
            "test_stack_vertical_children_components_in_safe_area",
        ]
    );

    // Failures are assertion mismatches, not build or layout errors
    for report in failures(&reports) {
        assert!(matches!(report.outcome, Outcome::Fail(_)), "{report:?}");
    }
}

#[test]
fn custom_device_from_toml() {
    let device = Device::from_toml_str(
        r#"
        name = "Pixel"
        platform = "android"
        os_version = 13
        width = 412.0
        height = 915.0
        scale = 2.625

        [safe_area_insets]
        top = 24.0
        bottom = 48.0
        "#,
    )
    .unwrap();

    let reports = run_all(device);
    assert!(failures(&reports).is_empty(), "{:#?}", failures(&reports));
}

#[test]
fn scenarios_callable_on_their_own() {
    safe_layout::set_device(Device::iphone_x());
    scenarios::test_dock_nested_layouts_beyond_safe_area().unwrap();
    scenarios::test_stack_nested_layouts_beyond_safe_area().unwrap();
    scenarios::test_nested_grid_cells_layout_beyond_safe_area().unwrap();
}
