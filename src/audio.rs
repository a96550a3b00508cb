//! Fire-and-forget sound cues. The terminal has one instrument: the bell.

use std::io::Write;

use tile_runner::entities::GameEvent;

use crate::assets::{AssetCatalog, Cue, SoundEffect};

pub struct Audio<'a> {
    catalog: &'a AssetCatalog,
    enabled: bool,
}

impl<'a> Audio<'a> {
    pub fn new(catalog: &'a AssetCatalog, enabled: bool) -> Audio<'a> {
        Audio { catalog, enabled }
    }

    /// Trigger the cue for every event of the last frame. At most one bell
    /// rings per frame.
    pub fn play<W: Write>(&self, out: &mut W, events: &[GameEvent]) -> std::io::Result<()> {
        let mut ring = false;
        for &event in events {
            let cue = Cue::from(event);
            tracing::trace!(?cue, "sound cue");
            ring |= self.catalog.sound(cue) == SoundEffect::Bell;
        }
        if ring && self.enabled {
            out.write_all(b"\x07")?;
        }
        Ok(())
    }
}
