//! Asset catalog for the terminal front end.
//!
//! Built once at startup and handed to the renderer and the audio layer. The
//! simulation core never sees it.

use std::collections::HashMap;

use crossterm::style::Color;
use tile_runner::entities::{GameEvent, ItemKind, Sprite};

/// How one tile of a sprite looks on screen. `text` is two columns wide.
#[derive(Clone, Copy, Debug)]
pub struct Glyph {
    pub text: &'static str,
    pub color: Color,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundEffect {
    Bell,
    Silent,
}

/// Sound cues are keyed without the power-up payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Jump,
    Stomp,
    PowerUp,
    Hit,
    LevelCleared,
    GameOver,
}

impl From<GameEvent> for Cue {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::Jump => Cue::Jump,
            GameEvent::Stomp => Cue::Stomp,
            GameEvent::PowerUp(_) => Cue::PowerUp,
            GameEvent::Hit => Cue::Hit,
            GameEvent::LevelCleared => Cue::LevelCleared,
            GameEvent::GameOver => Cue::GameOver,
        }
    }
}

#[derive(Debug)]
pub struct AssetCatalog {
    sprites: HashMap<Sprite, Glyph>,
    sounds: HashMap<Cue, SoundEffect>,
}

impl AssetCatalog {
    pub fn load() -> AssetCatalog {
        let sprites = HashMap::from([
            (Sprite::Brick, Glyph { text: "▓▓", color: Color::DarkYellow }),
            (Sprite::Pipe, Glyph { text: "[]", color: Color::Green }),
            (Sprite::Flag, Glyph { text: "|>", color: Color::White }),
            (Sprite::Enemy, Glyph { text: "<>", color: Color::Red }),
            (Sprite::Mushroom, Glyph { text: "()", color: Color::Magenta }),
            (Sprite::Star, Glyph { text: "**", color: Color::Yellow }),
            (Sprite::PlayerSmall, Glyph { text: "@@", color: Color::White }),
            (Sprite::PlayerBig, Glyph { text: "@@", color: Color::Cyan }),
        ]);

        let sounds = HashMap::from([
            (Cue::Jump, SoundEffect::Bell),
            (Cue::Stomp, SoundEffect::Bell),
            (Cue::PowerUp, SoundEffect::Bell),
            (Cue::Hit, SoundEffect::Bell),
            (Cue::LevelCleared, SoundEffect::Silent),
            (Cue::GameOver, SoundEffect::Silent),
        ]);

        tracing::debug!(sprites = sprites.len(), sounds = sounds.len(), "asset catalog loaded");
        AssetCatalog { sprites, sounds }
    }

    pub fn glyph(&self, sprite: Sprite) -> Glyph {
        self.sprites.get(&sprite).copied().unwrap_or(Glyph {
            text: "??",
            color: Color::Magenta,
        })
    }

    pub fn sound(&self, cue: Cue) -> SoundEffect {
        self.sounds.get(&cue).copied().unwrap_or(SoundEffect::Silent)
    }

    /// Glyph for a power-up in the HUD legend.
    pub fn item_glyph(&self, kind: ItemKind) -> Glyph {
        match kind {
            ItemKind::Mushroom => self.glyph(Sprite::Mushroom),
            ItemKind::Star => self.glyph(Sprite::Star),
        }
    }
}
