use std::io::{BufRead, Write};

use anyhow::Result;
use madori_layout::{
    compute, locate, Extent, LayoutMode, Margin, NormalSource, PlacementConfig, Point, Presets,
    Rect, Size,
};
use serde::{Deserialize, Serialize};

/// One line of input: the window, the displays, and what to do with it.
/// Unset fields fall back to the configured preset for `mode`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlacementRequest {
    pub window: Rect,
    /// Bottom-left-origin display frames; the first one is primary.
    pub displays: Vec<Rect>,
    pub mode: LayoutMode,
    #[serde(default)]
    pub width: Option<Extent>,
    #[serde(default)]
    pub height: Option<Extent>,
    #[serde(default)]
    pub random_bias: Option<bool>,
    #[serde(default)]
    pub limit_aspect_ratio: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlacementResponse {
    Placement { size: Option<Size>, position: Point },
    Unchanged,
    Error { message: String },
}

pub fn handle_request(
    req: &PlacementRequest,
    config: &PlacementConfig,
    presets: &Presets,
    bias: &mut impl NormalSource,
) -> PlacementResponse {
    let mut intent = presets.intent(req.mode);
    if let Some(width) = req.width {
        intent.width = width;
    }
    if let Some(height) = req.height {
        intent.height = height;
    }
    if let Some(random_bias) = req.random_bias {
        intent.random_bias = random_bias;
    }
    if let Some(limit) = req.limit_aspect_ratio {
        intent.limit_aspect_ratio = limit;
    }

    let screen = match locate(&req.window, &req.displays) {
        Ok(screen) => screen,
        Err(e) => {
            return PlacementResponse::Error {
                message: e.to_string(),
            }
        }
    };
    let margin = Margin::for_display(&screen, config);

    match compute(&req.window, &screen, margin, &intent, config, bias) {
        Some(result) => PlacementResponse::Placement {
            size: req.mode.resizes().then_some(result.size),
            position: result.position,
        },
        None => PlacementResponse::Unchanged,
    }
}

/// Answer JSON-lines placement requests until `input` is exhausted.
pub fn run_filter(
    input: impl BufRead,
    mut output: impl Write,
    config: &PlacementConfig,
    presets: &Presets,
    bias: &mut impl NormalSource,
) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<PlacementRequest>(&line) {
            Ok(req) => handle_request(&req, config, presets, bias),
            Err(e) => {
                tracing::warn!("Invalid request: {}", e);
                PlacementResponse::Error {
                    message: format!("invalid request: {}", e),
                }
            }
        };

        serde_json::to_writer(&mut output, &response)?;
        writeln!(output)?;
        output.flush()?;
    }

    Ok(())
}
