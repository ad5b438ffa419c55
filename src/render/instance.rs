//! GPU-ready draw instances
//!
//! [`InstanceBatch`] is a [`RenderSink`] that flattens draw commands into
//! `Pod` instances a renderer can upload in one buffer write.

use bytemuck::{Pod, Zeroable};

use super::{DrawCommand, Label, RenderSink, Visual};

/// Sprite sheet order; `DrawInstance::kind` is 1 + index here
pub const SPRITES: [&str; 4] = [
    "ship.png",
    "asteroid-small.png",
    "asteroid-medium.png",
    "asteroid-large.png",
];

/// `kind` value for untextured ellipses
pub const KIND_ELLIPSE: u32 = 0;

/// One instanced quad
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct DrawInstance {
    pub center: [f32; 2],
    pub size: [f32; 2],
    /// Radians
    pub rotation: f32,
    pub kind: u32,
    pub color: [f32; 4],
}

impl DrawInstance {
    pub fn from_command(command: &DrawCommand) -> Self {
        let (kind, color) = match command.visual {
            Visual::Ellipse { color } => (KIND_ELLIPSE, color),
            Visual::Sprite { source } => (sprite_kind(source), colors::WHITE),
        };
        Self {
            center: command.center.to_array(),
            size: command.size.to_array(),
            rotation: command.rotation.to_radians(),
            kind,
            color,
        }
    }
}

/// Instance kind for a sprite source; unknown sprites draw as ellipses
pub fn sprite_kind(source: &str) -> u32 {
    SPRITES
        .iter()
        .position(|s| *s == source)
        .map(|i| i as u32 + 1)
        .unwrap_or(KIND_ELLIPSE)
}

/// Colors for game elements
pub mod colors {
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BULLET: [f32; 4] = [1.0, 0.9, 0.3, 1.0];
}

/// Collects one frame's instances and labels
#[derive(Debug, Default)]
pub struct InstanceBatch {
    pub instances: Vec<DrawInstance>,
    pub labels: Vec<Label>,
}

impl InstanceBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw bytes for a vertex/instance buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.labels.clear();
    }
}

impl RenderSink for InstanceBatch {
    fn draw(&mut self, command: &DrawCommand) {
        self.instances.push(DrawInstance::from_command(command));
    }

    fn label(&mut self, label: &Label) {
        self.labels.push(label.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_instance_layout_is_tight() {
        assert_eq!(std::mem::size_of::<DrawInstance>(), 40);
    }

    #[test]
    fn test_sprite_kinds() {
        assert_eq!(sprite_kind("ship.png"), 1);
        assert_eq!(sprite_kind("asteroid-large.png"), 4);
        assert_eq!(sprite_kind("missing.png"), KIND_ELLIPSE);
    }

    #[test]
    fn test_batch_collects_bytes() {
        let mut batch = InstanceBatch::new();
        batch.draw(&DrawCommand {
            center: Vec2::new(10.0, 20.0),
            size: Vec2::splat(4.0),
            rotation: 180.0,
            visual: Visual::Ellipse { color: colors::BULLET },
        });
        assert_eq!(batch.instances.len(), 1);
        assert_eq!(batch.as_bytes().len(), 40);

        let inst = batch.instances[0];
        assert_eq!(inst.center, [10.0, 20.0]);
        assert_eq!(inst.kind, KIND_ELLIPSE);
        assert!((inst.rotation - std::f32::consts::PI).abs() < 1e-6);

        batch.clear();
        assert!(batch.instances.is_empty());
    }
}
