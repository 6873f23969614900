//! Tool selection and keyboard shortcuts on top of a [`DrawingTool`].

use std::collections::HashSet;

use chartmark_core::{ChartEvent, ChartHost, CursorStyle, Key, KeyEvent, MouseEventParams};
use chartmark_settings::Config;

use crate::drawing::Drawing;
use crate::drawing_tool::DrawingTool;
use crate::error::DrawingResult;
use crate::model::DrawingKind;
use crate::serialization::{load_drawings, save_drawings};

/// Receives the serialized collection after every persisted change.
pub type SaveSink = Box<dyn FnMut(String)>;

pub struct ToolBox<H: ChartHost> {
    tool: DrawingTool<H>,
    active_tool: Option<DrawingKind>,
    hidden: HashSet<DrawingKind>,
}

impl<H: ChartHost> ToolBox<H> {
    /// Creates a toolbox whose tool saves every change through `sink`.
    pub fn new(host: H, settings: Config, mut sink: SaveSink) -> Self {
        let persist = Box::new(move |drawings: &[Drawing]| match save_drawings(drawings) {
            Ok(json) => sink(json),
            Err(e) => tracing::error!("Failed to serialize drawings: {}", e),
        });
        Self {
            tool: DrawingTool::new(host, settings).with_persist_callback(persist),
            active_tool: None,
            hidden: HashSet::new(),
        }
    }

    pub fn tool(&self) -> &DrawingTool<H> {
        &self.tool
    }

    pub fn tool_mut(&mut self) -> &mut DrawingTool<H> {
        &mut self.tool
    }

    pub fn active_tool(&self) -> Option<DrawingKind> {
        self.active_tool
    }

    /// Tools that can still be selected, in toolbar order.
    pub fn available_tools(&self) -> Vec<DrawingKind> {
        DrawingKind::ALL
            .into_iter()
            .filter(|kind| !self.hidden.contains(kind))
            .collect()
    }

    /// Selects a tool, or deselects it if it is already active.
    ///
    /// # Returns
    ///
    /// `false` if the tool is hidden.
    pub fn select_tool(&mut self, kind: DrawingKind) -> bool {
        if self.hidden.contains(&kind) {
            tracing::debug!("{} is hidden", kind);
            return false;
        }
        if self.active_tool == Some(kind) {
            self.deselect();
            return true;
        }
        self.tool.stop_drawing();
        self.active_tool = Some(kind);
        self.tool.begin_drawing(kind);
        self.tool.host_mut().set_cursor(CursorStyle::Crosshair);
        true
    }

    /// Removes a tool from the toolbox, stopping it if active.
    pub fn hide_tool(&mut self, kind: DrawingKind) {
        if self.active_tool == Some(kind) {
            self.deselect();
        }
        self.hidden.insert(kind);
    }

    fn deselect(&mut self) {
        self.tool.stop_drawing();
        self.active_tool = None;
        self.tool.host_mut().set_cursor(CursorStyle::Default);
    }

    /// Routes a host event through the shortcuts, then to the tool.
    ///
    /// # Returns
    ///
    /// `true` if a shortcut or modifier click consumed the event. Anything
    /// else was forwarded to the tool and the host keeps its own handling.
    pub fn handle_event(&mut self, event: ChartEvent) -> bool {
        match event {
            ChartEvent::KeyDown(key) => {
                if self.handle_shortcut(key) {
                    return true;
                }
            }
            ChartEvent::Click(params) => {
                if self.handle_modifier_click(&params) {
                    self.sync_active_tool();
                    return true;
                }
            }
            _ => {}
        }
        self.tool.handle_event(event);
        self.sync_active_tool();
        false
    }

    fn handle_shortcut(&mut self, event: KeyEvent) -> bool {
        let modifiers = event.modifiers;
        match event.key {
            Key::Escape => {
                let armed = self.active_tool.is_some() || self.tool.is_drawing();
                if armed {
                    self.deselect();
                }
                armed
            }
            Key::Char(c) if modifiers.alt && !modifiers.command() => {
                let c = c.to_ascii_lowercase();
                match DrawingKind::ALL.into_iter().find(|k| k.hotkey() == c) {
                    Some(kind) => {
                        self.select_tool(kind);
                        true
                    }
                    None => false,
                }
            }
            Key::Char(c) if modifiers.command() && c.eq_ignore_ascii_case(&'z') => {
                self.undo();
                true
            }
            _ => false,
        }
    }

    fn handle_modifier_click(&mut self, params: &MouseEventParams) -> bool {
        if !params.modifiers.shift || self.active_tool.is_some() {
            return false;
        }
        let Some(point) = params.point else {
            return false;
        };
        if !self.select_tool(DrawingKind::Measure) {
            return false;
        }
        self.tool.simulate_click(point.x, point.y);
        true
    }

    /// Clears the selection once the tool has committed or abandoned its drawing.
    fn sync_active_tool(&mut self) {
        if self.active_tool.is_some() && !self.tool.is_drawing() {
            self.active_tool = None;
            self.tool.host_mut().set_cursor(CursorStyle::Default);
        }
    }

    /// Deletes the most recently committed drawing.
    pub fn undo(&mut self) {
        if self.tool.undo_last().is_none() {
            tracing::debug!("Nothing to undo");
        }
    }

    /// Serializes the collection and hands it to the save sink.
    pub fn save_drawings(&mut self) {
        self.tool.persist();
    }

    /// Adds the drawings in `json` after the existing ones.
    ///
    /// # Returns
    ///
    /// The number of drawings added; bad records are skipped.
    pub fn load_drawings(&mut self, json: &str) -> DrawingResult<usize> {
        let drawings = load_drawings(json)?;
        let count = drawings.len();
        for drawing in drawings {
            self.tool.add_new_drawing(drawing);
        }
        tracing::info!("Loaded {} drawing(s)", count);
        Ok(count)
    }

    /// Removes every drawing without saving.
    pub fn clear_drawings(&mut self) {
        self.tool.clear_drawings();
    }

    pub fn reposition_on_time(&mut self) {
        self.tool.reposition_on_time();
    }
}
