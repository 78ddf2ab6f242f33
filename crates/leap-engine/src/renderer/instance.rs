use bytemuck::{Pod, Zeroable};

/// Per-instance sprite data handed to the host renderer.
/// Must match the host protocol: 8 floats = 32 bytes stride.
///
/// Negative scales mirror the sprite (facing left, inverted gravity).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// X position of the sprite centre in world space.
    pub x: f32,
    /// Y position of the sprite centre in world space.
    pub y: f32,
    /// Horizontal world-space size (negative = mirrored).
    pub scale_x: f32,
    /// Vertical world-space size (negative = flipped).
    pub scale_y: f32,
    /// Atlas column.
    pub sprite_col: f32,
    /// Atlas row.
    pub atlas_row: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// Which atlas the cell lives in (0 = tileset, 1 = sprites).
    pub atlas: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Render buffer: tiles first, then entity sprites in spawn order.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
    /// Instances [0..tile_split) are tiles, the rest are entities.
    pub tile_split: u32,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            tile_split: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.tile_split = 0;
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for host-side reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    /// Instance data viewed as flat floats.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), RenderInstance::STRIDE_BYTES);
    }

    #[test]
    fn floats_view_matches_instances() {
        let mut buf = RenderBuffer::new();
        buf.push(RenderInstance { x: 3.0, alpha: 0.5, ..Default::default() });
        buf.push(RenderInstance::default());
        assert_eq!(buf.instance_count(), 2);
        let floats = buf.as_floats();
        assert_eq!(floats.len(), 16);
        assert_eq!(floats[0], 3.0);
        assert_eq!(floats[6], 0.5);
    }
}
