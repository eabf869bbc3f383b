//! Pointer and scroll state. Pure transitions; re-rendering is up to the
//! caller.

use glam::Vec2;

use crate::config::CursorConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    /// Top-left of the halo marker.
    pub cursor: (f64, f64),
    /// Top-left of the small dot marker.
    pub cursor_dot: (f64, f64),
    pub hovering_interactive: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    pub past_threshold: bool,
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub pointer: PointerState,
    pub scroll: ScrollState,
    config: CursorConfig,
}

impl UiState {
    pub fn new(config: CursorConfig) -> Self {
        Self {
            pointer: PointerState::default(),
            scroll: ScrollState::default(),
            config,
        }
    }

    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64) {
        let halo = self.config.halo_offset;
        let dot = self.config.dot_offset;
        self.pointer.cursor = (client_x - halo, client_y - halo);
        self.pointer.cursor_dot = (client_x - dot, client_y - dot);
    }

    pub fn on_scroll(&mut self, scroll_y: f64) {
        self.scroll.past_threshold = scroll_y > self.config.scroll_threshold;
    }

    pub fn on_hover_start(&mut self) {
        self.pointer.hovering_interactive = true;
    }

    pub fn on_hover_end(&mut self) {
        self.pointer.hovering_interactive = false;
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(CursorConfig::default())
    }
}

/// Maps client coordinates into `[-1, 1]` on both axes, y growing downwards.
pub fn normalized_pointer(client_x: f64, client_y: f64, width: f64, height: f64) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        ((client_x / width) * 2.0 - 1.0) as f32,
        ((client_y / height) * 2.0 - 1.0) as f32,
    )
}
