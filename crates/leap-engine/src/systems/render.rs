use crate::assets::registry::AssetRegistry;
use crate::core::world::World;
use crate::renderer::instance::RenderBuffer;

/// Build the render buffer for a world: every tile first, then each
/// drawable entity in spawn order. Sets `tile_split` at the boundary.
pub fn build_render_buffer(world: &World, assets: &AssetRegistry, buffer: &mut RenderBuffer) {
    buffer.clear();

    for tile in world.map().build_instances() {
        buffer.push(tile);
    }
    buffer.tile_split = buffer.instance_count();

    for entity in world.iter().filter(|e| !e.is_retired()) {
        if let Some(instance) = entity.render_instance(assets) {
            buffer.push(instance);
        }
    }
}
