//! The three charts shown on the page.
//!
//! All values are hand-authored constants.

use serde_json::json;

use super::{ChartConfig, ChartData, ChartKind, ColorSpec, Dataset};
use crate::theme::Palette;
use crate::types::Rgba;

const FONT_FAMILY: &str = "'Inter', sans-serif";

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

// =============================================================================
// Skills radar
// =============================================================================

pub const RADAR_LABELS: [&str; 6] = [
    "Machine Learning",
    "Data Analysis",
    "Python",
    "Statistics",
    "Visualization",
    "Deep Learning",
];
pub const RADAR_SCORES: [u32; 6] = [85, 90, 92, 80, 88, 75];

/// Radar of six skill categories on a 0-100 scale.
pub fn skills_radar(palette: &Palette) -> ChartConfig {
    let grid = palette.grid(0.08).to_css();
    ChartConfig {
        kind: ChartKind::Radar,
        data: ChartData {
            labels: labels(&RADAR_LABELS),
            datasets: vec![Dataset {
                label: Some("Skill Level".into()),
                data: RADAR_SCORES.to_vec(),
                background_color: Some(ColorSpec::One(palette.primary.with_opacity(0.2))),
                border_color: Some(palette.primary),
                border_width: Some(2),
                point_background_color: Some(palette.primary),
                point_border_color: Some(Rgba::WHITE),
                point_hover_background_color: Some(Rgba::WHITE),
                point_hover_border_color: Some(palette.primary),
                point_radius: Some(4),
                point_hover_radius: Some(6),
                ..Dataset::default()
            }],
        },
        options: json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "scales": {
                "r": {
                    "beginAtZero": true,
                    "max": 100,
                    "ticks": {
                        "stepSize": 20,
                        "color": palette.text_muted,
                        "backdropColor": "transparent"
                    },
                    "grid": { "color": grid },
                    "angleLines": { "color": grid },
                    "pointLabels": {
                        "color": palette.text_muted,
                        "font": { "size": 11, "family": FONT_FAMILY }
                    }
                }
            },
            "plugins": { "legend": { "display": false } }
        }),
    }
}

// =============================================================================
// Languages doughnut
// =============================================================================

pub const LANGUAGE_LABELS: [&str; 5] = ["Python", "SQL", "R", "Java", "Others"];
pub const LANGUAGE_SHARES: [u32; 5] = [45, 25, 15, 10, 5];

/// Doughnut of language usage shares, legend at the bottom.
pub fn languages_doughnut(palette: &Palette) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Doughnut,
        data: ChartData {
            labels: labels(&LANGUAGE_LABELS),
            datasets: vec![Dataset {
                data: LANGUAGE_SHARES.to_vec(),
                background_color: Some(ColorSpec::Many(palette.series().to_vec())),
                border_color: Some(palette.surface),
                border_width: Some(3),
                hover_offset: Some(10),
                ..Dataset::default()
            }],
        },
        options: json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "cutout": "65%",
            "plugins": {
                "legend": {
                    "position": "bottom",
                    "labels": {
                        "color": palette.text_muted,
                        "padding": 15,
                        "font": { "size": 11, "family": FONT_FAMILY },
                        "usePointStyle": true,
                        "pointStyle": "circle"
                    }
                }
            }
        }),
    }
}

// =============================================================================
// Visualization bars
// =============================================================================

pub const TOOL_LABELS: [&str; 5] = [
    "Power BI",
    "Tableau",
    "Data Storytelling",
    "Dashboard Design",
    "ETL/Power Query",
];
pub const TOOL_SCORES: [u32; 5] = [90, 80, 88, 85, 82];

/// Horizontal bars of visualization tool proficiency on a 0-100 scale.
pub fn visualization_bars(palette: &Palette) -> ChartConfig {
    let ticks = json!({ "color": palette.text_muted, "font": { "size": 10 } });
    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: labels(&TOOL_LABELS),
            datasets: vec![Dataset {
                label: Some("Skill Level".into()),
                data: TOOL_SCORES.to_vec(),
                background_color: Some(ColorSpec::Many(palette.series().to_vec())),
                border_radius: Some(8),
                border_skipped: Some(false),
                ..Dataset::default()
            }],
        },
        options: json!({
            "indexAxis": "y",
            "responsive": true,
            "maintainAspectRatio": false,
            "scales": {
                "x": {
                    "beginAtZero": true,
                    "max": 100,
                    "grid": { "color": palette.grid(0.05), "drawBorder": false },
                    "ticks": ticks
                },
                "y": {
                    "grid": { "display": false, "drawBorder": false },
                    "ticks": ticks
                }
            },
            "plugins": { "legend": { "display": false } }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn to_value(config: &ChartConfig) -> Value {
        serde_json::to_value(config).unwrap()
    }

    #[test]
    fn test_radar_payload() {
        let value = to_value(&skills_radar(&Palette::sunset()));
        assert_eq!(value["type"], "radar");
        assert_eq!(value["data"]["labels"].as_array().map(Vec::len), Some(6));
        assert_eq!(value["data"]["datasets"][0]["data"], json!([85, 90, 92, 80, 88, 75]));
        assert_eq!(value["data"]["datasets"][0]["backgroundColor"], "rgba(255, 149, 0, 0.2)");
        assert_eq!(value["data"]["datasets"][0]["borderColor"], "#ff9500");
        assert_eq!(value["data"]["datasets"][0]["pointBorderColor"], "#ffffff");
        assert_eq!(value["options"]["scales"]["r"]["max"], 100);
        assert_eq!(value["options"]["scales"]["r"]["ticks"]["stepSize"], 20);
        assert_eq!(value["options"]["plugins"]["legend"]["display"], false);
    }

    #[test]
    fn test_doughnut_payload() {
        let value = to_value(&languages_doughnut(&Palette::sunset()));
        assert_eq!(value["type"], "doughnut");
        assert_eq!(value["data"]["datasets"][0]["data"], json!([45, 25, 15, 10, 5]));
        assert_eq!(
            value["data"]["datasets"][0]["backgroundColor"],
            json!(["#ff9500", "#ff6b00", "#ff3b30", "#ffb340", "#1d1d1f"])
        );
        assert_eq!(value["data"]["datasets"][0]["hoverOffset"], 10);
        assert!(value["data"]["datasets"][0].get("label").is_none());
        assert_eq!(value["options"]["cutout"], "65%");
        assert_eq!(value["options"]["plugins"]["legend"]["position"], "bottom");
    }

    #[test]
    fn test_bar_payload() {
        let value = to_value(&visualization_bars(&Palette::sunset()));
        assert_eq!(value["type"], "bar");
        assert_eq!(value["options"]["indexAxis"], "y");
        assert_eq!(value["data"]["datasets"][0]["data"], json!([90, 80, 88, 85, 82]));
        assert_eq!(value["data"]["datasets"][0]["borderRadius"], 8);
        assert_eq!(value["data"]["datasets"][0]["borderSkipped"], false);
        assert_eq!(value["options"]["scales"]["x"]["max"], 100);
        assert_eq!(value["options"]["scales"]["x"]["grid"]["color"], "rgba(0, 0, 0, 0.05)");
        assert_eq!(value["options"]["scales"]["y"]["grid"]["display"], false);
    }

    #[test]
    fn test_shares_sum_to_hundred() {
        assert_eq!(LANGUAGE_SHARES.iter().sum::<u32>(), 100);
    }

    #[test]
    fn test_scores_within_scale() {
        assert!(RADAR_SCORES.iter().chain(TOOL_SCORES.iter()).all(|s| *s <= 100));
    }
}
