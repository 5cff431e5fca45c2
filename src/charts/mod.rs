//! Chart Bootstrapper - Declarative chart configurations.
//!
//! Three static charts, each bound to a canvas id. Configurations are plain
//! serializable data; rendering belongs to the external charting library.
//! A chart whose canvas is missing from the page is skipped silently.

use serde::Serialize;

use crate::error::Result;
use crate::theme::Palette;
use crate::types::Rgba;

pub mod presets;

pub use presets::{languages_doughnut, skills_radar, visualization_bars};

// =============================================================================
// CONFIG TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Radar,
    Doughnut,
    Bar,
}

/// A full chart configuration, serialized as the library's config object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    /// Nested options are passed through as-is.
    pub options: serde_json::Value,
}

impl ChartConfig {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// One color for the whole dataset, or one per data point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorSpec {
    One(Rgba),
    Many(Vec<Rgba>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<ColorSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Rgba>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_skipped: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_background_color: Option<Rgba>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_border_color: Option<Rgba>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_hover_background_color: Option<Rgba>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_hover_border_color: Option<Rgba>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_hover_radius: Option<u32>,
}

// =============================================================================
// MOUNTS
// =============================================================================

/// A chart and the canvas it renders into.
#[derive(Clone, Copy)]
pub struct ChartMount {
    pub canvas_id: &'static str,
    pub build: fn(&Palette) -> ChartConfig,
}

/// Every chart on the page.
pub const CHART_MOUNTS: [ChartMount; 3] = [
    ChartMount {
        canvas_id: "skillsRadar",
        build: skills_radar,
    },
    ChartMount {
        canvas_id: "languagesChart",
        build: languages_doughnut,
    },
    ChartMount {
        canvas_id: "progressChart",
        build: visualization_bars,
    },
];

/// Build and render every chart whose canvas `find` locates.
///
/// Missing canvases are skipped; render failures are logged and skipped.
/// Returns the number of charts rendered.
pub fn bootstrap<M, Find, Render>(palette: &Palette, mut find: Find, mut render: Render) -> usize
where
    Find: FnMut(&str) -> Option<M>,
    Render: FnMut(M, &ChartConfig) -> Result<()>,
{
    let mut rendered = 0;
    for mount in CHART_MOUNTS {
        let Some(target) = find(mount.canvas_id) else {
            log::debug!("no #{} on page, skipping chart", mount.canvas_id);
            continue;
        };

        let config = (mount.build)(palette);
        match render(target, &config) {
            Ok(()) => {
                log::debug!("mounted {:?} chart on #{}", config.kind, mount.canvas_id);
                rendered += 1;
            }
            Err(err) => log::warn!("chart #{} not rendered: {err}", mount.canvas_id),
        }
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PageError;

    #[test]
    fn test_bootstrap_without_canvases_is_noop() {
        let mut renders = 0;
        let count = bootstrap(
            &Palette::sunset(),
            |_| None::<()>,
            |_, _| {
                renders += 1;
                Ok(())
            },
        );
        assert_eq!(count, 0);
        assert_eq!(renders, 0);
    }

    #[test]
    fn test_bootstrap_renders_present_canvases_only() {
        let mut kinds = Vec::new();
        let count = bootstrap(
            &Palette::sunset(),
            |id| (id != "languagesChart").then(|| id.to_string()),
            |id, config| {
                kinds.push((id, config.kind));
                Ok(())
            },
        );
        assert_eq!(count, 2);
        assert_eq!(
            kinds,
            vec![
                ("skillsRadar".to_string(), ChartKind::Radar),
                ("progressChart".to_string(), ChartKind::Bar),
            ]
        );
    }

    #[test]
    fn test_bootstrap_survives_render_failure() {
        let count = bootstrap(
            &Palette::sunset(),
            |id| Some(id.to_string()),
            |id, _| {
                if id == "skillsRadar" {
                    Err(PageError::Js("Chart is not defined".into()))
                } else {
                    Ok(())
                }
            },
        );
        assert_eq!(count, 2);
    }

    #[test]
    fn test_config_serializes_type_key() {
        let json = skills_radar(&Palette::sunset()).to_json().unwrap();
        assert!(json.starts_with("{\"type\":\"radar\""));
    }

    #[test]
    fn test_dataset_skips_unset_fields() {
        let dataset = Dataset {
            data: vec![1, 2],
            ..Dataset::default()
        };
        let value = serde_json::to_value(&dataset).unwrap();
        assert_eq!(value, serde_json::json!({ "data": [1, 2] }));
    }
}
