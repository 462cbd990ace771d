//! Given/when step definitions for export behavioural scenarios.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{TimeZone, Utc};
use clap::ValueEnum;
use mockall::mock;
use rstest_bdd_macros::{given, when};
use storeflow::error::ExportError;
use storeflow::export::{Bitmap, DirectorySink, ExportFormat, Exporter, Rasterizer};
use storeflow::flow::{StepRegistry, WalkthroughController};
use storeflow::render::FlowScene;
use tempfile::TempDir;

use super::state::{CaptureRequest, ExportScenario, StepResult};

mock! {
    #[derive(Debug)]
    Raster {}

    impl Rasterizer for Raster {
        fn rasterize(
            &self,
            svg: &str,
            width: u32,
            height: u32,
            scale: u32,
        ) -> Result<Bitmap, ExportError>;
    }
}

/// Rasteriser that paints a blank page of the requested size and remembers
/// what it was asked for.
fn recording_rasterizer(requests: Arc<Mutex<Option<CaptureRequest>>>) -> MockRaster {
    let mut raster = MockRaster::new();
    raster
        .expect_rasterize()
        .returning(move |_, width, height, scale| {
            *requests.lock().unwrap_or_else(PoisonError::into_inner) = Some(CaptureRequest {
                width,
                height,
                scale,
            });
            let pixel_width = width * scale;
            let pixel_height = height * scale;
            let len = usize::try_from(pixel_width * pixel_height * 4).unwrap_or_default();
            Bitmap::from_rgba(pixel_width, pixel_height, vec![255; len])
        });
    raster
}

#[given("an empty export directory")]
fn an_empty_export_directory(export_scenario: &ExportScenario) -> StepResult<()> {
    let workspace =
        TempDir::new().map_err(|error| format!("failed to create temp dir: {error}"))?;
    export_scenario.workspace.set(Arc::new(workspace));
    let root = export_scenario.workspace_root()?;
    export_scenario.output_dir.set(root.join("exports"));
    Ok(())
}

#[given("a {width} by {height} canvas at scale {scale}")]
fn a_canvas_at_scale(export_scenario: &ExportScenario, width: u32, height: u32, scale: u32) {
    let mut settings = export_scenario.settings();
    settings.canvas_width = width;
    settings.canvas_height = height;
    settings.scale = scale;
    export_scenario.settings.set(settings);
}

#[given("the side panel is kept during capture")]
fn the_side_panel_is_kept(export_scenario: &ExportScenario) {
    let mut settings = export_scenario.settings();
    settings.hide_side_panel = false;
    export_scenario.settings.set(settings);
}

#[given("the export directory is blocked by a file")]
fn the_export_directory_is_blocked(export_scenario: &ExportScenario) -> StepResult<()> {
    let blocker = export_scenario.workspace_root()?.join("blocker");
    std::fs::write(blocker.as_std_path(), b"not a directory")
        .map_err(|error| format!("failed to write blocker: {error}"))?;
    export_scenario.output_dir.set(blocker.join("exports"));
    Ok(())
}

#[when("the flowchart is exported as {format}")]
fn the_flowchart_is_exported_as(
    export_scenario: &ExportScenario,
    format: String,
) -> StepResult<()> {
    let requested = ExportFormat::from_str(&format, true)?;
    let registry = StepRegistry::bookstore()
        .map_err(|error| format!("built-in flow should validate: {error}"))?;
    let controller = WalkthroughController::new(Arc::new(registry));
    let settings = export_scenario.settings();
    let mut scene = FlowScene::new(&controller, settings.canvas_width, settings.canvas_height);

    let requests = Arc::new(Mutex::new(None));
    let exporter = Exporter::new(
        recording_rasterizer(Arc::clone(&requests)),
        DirectorySink::new(export_scenario.output_dir()?),
        settings,
    );
    let exported_at = Utc
        .with_ymd_and_hms(2025, 1, 20, 9, 30, 0)
        .single()
        .ok_or_else(|| String::from("fixed timestamp should be valid"))?;

    export_scenario
        .outcome
        .set(exporter.export(requested, &mut scene, exported_at));
    export_scenario.still_exporting.set(exporter.is_exporting());
    if let Some(request) = *requests.lock().unwrap_or_else(PoisonError::into_inner) {
        export_scenario.capture.set(request);
    }
    Ok(())
}
