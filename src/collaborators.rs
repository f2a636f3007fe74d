/// Seams between the simulation and the outside world.
///
/// The session never touches a terminal, a sound device or a keyboard
/// directly: it draws through a `Renderer`, fires cues through an
/// `AudioCue` and reads one `InputSnapshot` per tick.

use log::debug;

use crate::entities::{EnemyKind, PowerupKind};

// ── Rendering ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sprite {
    Player,
    /// Aura drawn around the player while the personal shield is up.
    PlayerShield,
    Enemy(EnemyKind),
    /// Explosion animation frame, `0..explosion_frames`.
    Explosion(u32),
    PlayerBullet,
    EnemyBullet,
    Powerup(PowerupKind),
    /// Defensive barrier with its remaining health.
    Barrier(u32),
}

pub trait Renderer {
    /// Place `sprite` with its top-left corner at world position `(x, y)`.
    fn draw_sprite(&mut self, sprite: Sprite, x: f32, y: f32);
}

// ── Audio ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Shoot,
    Explosion,
    Powerup,
    GameOver,
    BackgroundMusic,
}

impl Cue {
    pub fn name(&self) -> &'static str {
        match self {
            Cue::Shoot => "shoot",
            Cue::Explosion => "explosion",
            Cue::Powerup => "powerup",
            Cue::GameOver => "game_over",
            Cue::BackgroundMusic => "background_music",
        }
    }
}

/// Fire-and-forget audio. Every method defaults to a silent no-op so a
/// sink only overrides what it can actually play.
pub trait AudioCue {
    fn play(&mut self, _cue: Cue) {}
    fn loop_cue(&mut self, _cue: Cue) {}
    fn stop(&mut self, _cue: Cue) {}
}

/// Used when no audio device is wanted.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAudio;

impl AudioCue for NullAudio {}

/// Writes every cue to the log at debug level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogAudio;

impl AudioCue for LogAudio {
    fn play(&mut self, cue: Cue) {
        debug!("[Audio] play {}", cue.name());
    }

    fn loop_cue(&mut self, cue: Cue) {
        debug!("[Audio] loop {}", cue.name());
    }

    fn stop(&mut self, cue: Cue) {
        debug!("[Audio] stop {}", cue.name());
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Logical actions for one tick.
///
/// Movement, shooting and dash are level-triggered (true while held);
/// `pause`, `restart` and `quit` are edge-triggered and must be true only
/// on the tick the key was pressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub move_left: bool,
    pub move_right: bool,
    pub shoot: bool,
    pub dash: bool,
    pub pause: bool,
    pub restart: bool,
    pub quit: bool,
}

impl InputSnapshot {
    /// -1, 0 or 1; opposite keys held together cancel out.
    pub fn direction(&self) -> i32 {
        (self.move_right as i32) - (self.move_left as i32)
    }
}
