use bytemuck::{Pod, Zeroable};

/// Unique identifier for an entity in the world. Assigned on admission;
/// `EntityId::UNASSIGNED` until then.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EntityId(pub u32);

impl EntityId {
    pub const UNASSIGNED: EntityId = EntityId(0);
}

/// A sound event forwarded to the host.
/// The numeric value comes from the asset manifest's sound table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

/// A game event communicated to the host.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// A player died; `a/b` hold where.
    pub const PLAYER_DIED: f32 = 1.0;
    /// The stage was cleared; `a` holds the stage number.
    pub const STAGE_CLEARED: f32 = 2.0;
    /// The stage restarted; `a` holds the attempt count.
    pub const STAGE_RESTARTED: f32 = 3.0;
    /// A new stage was loaded; `a` holds its number.
    pub const STAGE_STARTED: f32 = 4.0;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}
