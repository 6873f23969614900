//! # Chartmark
//!
//! Interactive drawing and measurement annotations for financial charts.
//!
//! ## Architecture
//!
//! Chartmark is organized as a workspace with multiple crates:
//!
//! 1. **chartmark-core** - Chart points, coordinate mapping, host trait, headless host
//! 2. **chartmark-settings** - Interaction tolerances, label metrics and palettes
//! 3. **chartmark-drawings** - Annotation kinds, drawing tool, persistence, toolbox
//! 4. **chartmark** - Re-exports, logging setup and the replay binary
//!
//! ## Features
//!
//! - **Measurement**: price change, percentage and bar count between two points
//! - **Shapes**: boxes, trend lines, horizontal, ray and vertical lines
//! - **Editing**: hover, drag, corner and endpoint handles, delete and undo
//! - **Persistence**: JSON records, additive loading, versioned drawings files

pub use chartmark_core::{
    Anchor, ChartEvent, ChartHost, ChartPoint, CoordinateMapper, CursorStyle, DrawingId,
    HeadlessHost, HostEventKind, Key, KeyEvent, LinearChartScale, Modifiers, MouseEventParams,
    PixelPoint, SubscriptionId, Timestamp, ViewPoint,
};
pub use chartmark_drawings::{
    load_drawings, save_drawings, Drawing, DrawingError, DrawingKind, DrawingRecord, DrawingTool,
    DrawingsFile, RenderCommand, ToolBox,
};
pub use chartmark_settings::{Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, leaving stdout to command output
/// - RUST_LOG environment variable support
/// - Targets, levels and line numbers
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
