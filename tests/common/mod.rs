#![allow(dead_code)]

use space_invaders::collaborators::{AudioCue, Cue, Renderer, Sprite};
use space_invaders::config::Tuning;
use space_invaders::session::GameState;

use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Fresh state with no barriers, so tests place exactly what they need.
pub fn empty_state(tuning: &Tuning) -> GameState {
    let mut state = GameState::new(tuning);
    state.barriers.clear();
    state
}

#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub events: Vec<(&'static str, Cue)>,
}

impl RecordingAudio {
    pub fn played(&self, cue: Cue) -> usize {
        self.events
            .iter()
            .filter(|(action, c)| *action == "play" && *c == cue)
            .count()
    }
}

impl AudioCue for RecordingAudio {
    fn play(&mut self, cue: Cue) {
        self.events.push(("play", cue));
    }

    fn loop_cue(&mut self, cue: Cue) {
        self.events.push(("loop", cue));
    }

    fn stop(&mut self, cue: Cue) {
        self.events.push(("stop", cue));
    }
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub sprites: Vec<(Sprite, f32, f32)>,
}

impl Renderer for RecordingRenderer {
    fn draw_sprite(&mut self, sprite: Sprite, x: f32, y: f32) {
        self.sprites.push((sprite, x, y));
    }
}
