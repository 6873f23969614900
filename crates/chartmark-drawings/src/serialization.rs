//! Save/load of drawings.
//!
//! The persisted form is a JSON array of `{type, points, options}` records,
//! one per committed drawing, in z-order. [`DrawingsFile`] wraps the same
//! records with a version and timestamp for standalone files.
//!
//! Loading is lenient per record: an unknown `type`, a wrong point count or
//! undecodable options drops that record with a warning and keeps the rest.

use anyhow::{Context, Result};
use chartmark_core::ChartPoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::drawing::Drawing;
use crate::error::DrawingResult;
use crate::model::AnnotationShape;
use crate::registry;

/// Drawings file format version
const FILE_FORMAT_VERSION: &str = "1.0";

/// One persisted drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub points: Vec<Option<ChartPoint>>,
    #[serde(default)]
    pub options: Value,
}

impl DrawingRecord {
    pub fn from_drawing(drawing: &Drawing) -> DrawingResult<Self> {
        let shape = drawing.shape();
        Ok(Self {
            kind: shape.kind().tag().to_string(),
            points: shape.points().to_vec(),
            options: shape.options_value()?,
        })
    }

    /// Rebuilds the drawing through the kind registry. The result has a fresh id.
    pub fn into_drawing(self) -> DrawingResult<Drawing> {
        let shape = registry::build(&self.kind, &self.points, self.options)?;
        Ok(Drawing::new(shape))
    }
}

pub fn to_records(drawings: &[Drawing]) -> DrawingResult<Vec<DrawingRecord>> {
    drawings.iter().map(DrawingRecord::from_drawing).collect()
}

/// Encodes drawings as a JSON array of records.
pub fn save_drawings(drawings: &[Drawing]) -> DrawingResult<String> {
    Ok(serde_json::to_string(&to_records(drawings)?)?)
}

/// Decodes a JSON array of records.
///
/// Fails only when `json` is not an array; bad elements are skipped.
pub fn load_drawings(json: &str) -> DrawingResult<Vec<Drawing>> {
    let values: Vec<Value> = serde_json::from_str(json)?;
    Ok(decode_values(values))
}

fn decode_values(values: Vec<Value>) -> Vec<Drawing> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match decode_value(value) {
            Ok(drawing) => Some(drawing),
            Err(e) => {
                tracing::warn!("Skipping drawing record {}: {}", index, e);
                None
            }
        })
        .collect()
}

fn decode_value(value: Value) -> DrawingResult<Drawing> {
    let record: DrawingRecord = serde_json::from_value(value)?;
    record.into_drawing()
}

/// Standalone drawings file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingsFile {
    pub version: String,
    pub saved_at: DateTime<Utc>,
    pub drawings: Vec<Value>,
}

impl DrawingsFile {
    pub fn from_drawings(drawings: &[Drawing]) -> DrawingResult<Self> {
        let drawings = to_records(drawings)?
            .into_iter()
            .map(serde_json::to_value)
            .collect::<serde_json::Result<Vec<_>>>()?;
        Ok(Self {
            version: FILE_FORMAT_VERSION.to_string(),
            saved_at: Utc::now(),
            drawings,
        })
    }

    /// Save drawings to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize drawings")?;

        std::fs::write(path.as_ref(), json).context("Failed to write drawings file")?;

        Ok(())
    }

    /// Load drawings file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read drawings file")?;

        let file: DrawingsFile =
            serde_json::from_str(&content).context("Failed to parse drawings file")?;

        if file.version != FILE_FORMAT_VERSION {
            tracing::warn!(
                "Drawings file version {} differs from {}",
                file.version,
                FILE_FORMAT_VERSION
            );
        }

        Ok(file)
    }

    /// Decodes the stored records, skipping bad ones.
    pub fn drawings(&self) -> Vec<Drawing> {
        decode_values(self.drawings.clone())
    }
}
