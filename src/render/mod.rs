//! Render hand-off
//!
//! The core never touches pixels. Each drawable entity describes itself as a
//! [`DrawCommand`] and hands it to a [`RenderSink`] owned by the host.

pub mod instance;

pub use instance::{DrawInstance, InstanceBatch, colors};

use glam::Vec2;

/// Visual handle attached to an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Visual {
    /// Image asset, by file name
    Sprite { source: &'static str },
    /// Filled ellipse
    Ellipse { color: [f32; 4] },
}

/// One entity, ready to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub center: Vec2,
    /// Bounding box (width, height)
    pub size: Vec2,
    /// Degrees, counter-clockwise
    pub rotation: f32,
    pub visual: Visual,
}

/// Which HUD slot a text label occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSlot {
    Title,
    Message,
    Score,
    Lives,
}

/// HUD text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub slot: LabelSlot,
    pub text: String,
}

impl Label {
    pub fn new(slot: LabelSlot, text: impl Into<String>) -> Self {
        Self {
            slot,
            text: text.into(),
        }
    }
}

/// Receives draw hand-offs for one frame
pub trait RenderSink {
    fn draw(&mut self, command: &DrawCommand);
    fn label(&mut self, label: &Label);
}

/// Anything with a position, a circular extent and a visual handle
pub trait Drawable {
    fn position(&self) -> Vec2;
    fn radius(&self) -> f32;
    fn visual(&self) -> Visual;

    fn rotation(&self) -> f32 {
        0.0
    }

    fn draw_command(&self) -> DrawCommand {
        DrawCommand {
            center: self.position(),
            size: Vec2::splat(self.radius() * 2.0),
            rotation: self.rotation(),
            visual: self.visual(),
        }
    }

    fn draw(&self, sink: &mut dyn RenderSink) {
        sink.draw(&self.draw_command());
    }
}
