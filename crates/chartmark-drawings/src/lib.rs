//! # Chartmark Drawings
//!
//! Interactive annotations for financial charts: measurement boxes, boxes,
//! trend lines, horizontal and ray lines, and vertical lines.
//!
//! ## Core Components
//!
//! - **Model**: one shape per kind, anchored in time/logical/price space
//! - **Interaction**: hover, whole-shape drag and handle drag
//! - **Drawing tool**: click-to-place lifecycle and event routing
//! - **Registry**: type tag to arity and factory
//! - **Serialization**: JSON records and versioned drawings files
//! - **Toolbox**: tool selection and hotkeys
//!
//! ## Architecture
//!
//! ```text
//! ToolBox (hotkeys, selection, save sink)
//!   └── DrawingTool (collection, active drawing, host subscriptions)
//!         └── Drawing (id, interaction state, pixel view)
//!               └── Shape (Measure, Box, TrendLine, ...)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chartmark_core::HeadlessHost;
//! use chartmark_drawings::{DrawingKind, DrawingTool};
//!
//! let mut tool = DrawingTool::new(HeadlessHost::default(), Default::default());
//! tool.begin_drawing(DrawingKind::Measure);
//! tool.simulate_click(100.0, 300.0);
//! tool.simulate_click(200.0, 150.0);
//! assert_eq!(tool.drawings().len(), 1);
//! ```

pub mod drawing;
pub mod drawing_tool;
pub mod error;
pub mod interaction;
pub mod model;
pub mod options;
pub mod registry;
pub mod render;
pub mod serialization;
pub mod toolbox;

pub use drawing::Drawing;
pub use drawing_tool::{DrawingTool, PersistCallback};
pub use error::{DrawingError, DrawingResult};
pub use interaction::{DragDelta, HandleLayout, HoverOutcome, InteractionState};
pub use model::{
    AnnotationShape, BoxShape, DrawingKind, HorizontalLine, Measure, MeasureStats, RayLine, Shape,
    TrendLine, VerticalLine,
};
pub use options::{BoxOptions, DrawingOptions, FillOptions, LineStyle, LineTextOptions, MeasureOptions};
pub use registry::KindEntry;
pub use render::{Rect, RenderCommand, RenderContext, TextAlign};
pub use serialization::{load_drawings, save_drawings, DrawingRecord, DrawingsFile};
pub use toolbox::{SaveSink, ToolBox};
