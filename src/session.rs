/// One play session: owns every entity and advances them a tick at a time.
///
/// Per tick, while playing:
///   1. input → player movement, dash, shooting
///   2. player timers
///   3. spawn a wave if the field is clear
///   4. bullets move
///   5. enemies move or advance their explosion
///   6. enemies roll to shoot
///   7. formation bounce / loss line
///   8. power-ups fall
///   9. collisions
///
/// Paused and game-over sessions still render but never simulate.

use log::info;
use rand::rngs::StdRng;

use crate::collaborators::{AudioCue, Cue, InputSnapshot, Renderer, Sprite};
use crate::collision::{self, CollisionReport};
use crate::config::Tuning;
use crate::entities::{Barrier, Bullet, BulletOwner, Enemy, Player, Powerup};
use crate::formation;
use crate::geometry::{BARRIER_WIDTH, BULLET_WIDTH, ENEMY_SIZE, PLAYER_SIZE};
use crate::score::ScoreStore;
use crate::spawner;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Paused,
    GameOver,
}

/// What the front end should do after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// ── State ─────────────────────────────────────────────────────────────────────

/// Every entity collection plus the session counters.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub powerups: Vec<Powerup>,
    pub barriers: Vec<Barrier>,
    pub score: u32,
    /// Level of the next wave to spawn.
    pub level: u32,
    pub wave_size: u32,
    pub speed_multiplier: f32,
    pub status: GameStatus,
    pub frame: u64,
}

impl GameState {
    pub fn new(tuning: &Tuning) -> Self {
        GameState {
            player: Player::new(tuning),
            enemies: Vec::new(),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            powerups: Vec::new(),
            barriers: default_barriers(tuning),
            score: 0,
            level: 1,
            wave_size: tuning.wave_base,
            speed_multiplier: 1.0,
            status: GameStatus::Playing,
            frame: 0,
        }
    }
}

/// Three barriers spread across the lower part of the field.
pub fn default_barriers(tuning: &Tuning) -> Vec<Barrier> {
    let w = tuning.screen_width;
    let y = tuning.screen_height - 170.0;
    [w / 4.0, w / 2.0, w * 3.0 / 4.0]
        .into_iter()
        .map(|cx| Barrier::new(cx - BARRIER_WIDTH / 2.0, y, tuning.barrier_health))
        .collect()
}

/// Read-only numbers for the HUD and overlays.
#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    pub score: u32,
    pub level: u32,
    pub lives: u32,
    pub power_level: u32,
    /// Remaining fraction of the weapon power-up, 0.0 when inactive.
    pub power_remaining: f32,
    /// Remaining fraction of the personal shield, 0.0 when inactive.
    pub shield_remaining: f32,
    /// 1.0 when a dash is available.
    pub dash_ready: f32,
    pub status: GameStatus,
    pub new_high_score: bool,
    pub high_scores: Vec<u32>,
}

// ── Session ───────────────────────────────────────────────────────────────────

pub struct GameSession {
    pub state: GameState,
    tuning: Tuning,
    rng: StdRng,
    audio: Box<dyn AudioCue>,
    scores: ScoreStore,
    new_high_score: bool,
}

impl GameSession {
    pub fn new(tuning: Tuning, rng: StdRng, audio: Box<dyn AudioCue>, scores: ScoreStore) -> Self {
        let state = GameState::new(&tuning);
        let mut session = GameSession {
            state,
            tuning,
            rng,
            audio,
            scores,
            new_high_score: false,
        };
        session.audio.loop_cue(Cue::BackgroundMusic);
        session
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn scores(&self) -> &ScoreStore {
        &self.scores
    }

    /// Handle the edge-triggered actions, then simulate if playing.
    pub fn tick(&mut self, input: &InputSnapshot) -> Flow {
        if input.quit {
            return Flow::Quit;
        }

        match self.state.status {
            GameStatus::GameOver => {
                if input.restart {
                    self.restart();
                }
                return Flow::Continue;
            }
            GameStatus::Paused => {
                if input.pause {
                    self.state.status = GameStatus::Playing;
                }
                return Flow::Continue;
            }
            GameStatus::Playing => {
                if input.pause {
                    self.state.status = GameStatus::Paused;
                    return Flow::Continue;
                }
            }
        }

        self.step(input);
        Flow::Continue
    }

    /// Throw the finished game away and start over. The score list, RNG and
    /// audio sink carry across.
    fn restart(&mut self) {
        info!("[Session] Restarting after final score {}", self.state.score);
        self.state = GameState::new(&self.tuning);
        self.new_high_score = false;
        self.audio.loop_cue(Cue::BackgroundMusic);
    }

    fn step(&mut self, input: &InputSnapshot) {
        let tuning = &self.tuning;
        let state = &mut self.state;
        state.frame += 1;

        // ── 1-2. Player ───────────────────────────────────────────────────────
        let direction = input.direction();
        if input.dash {
            state.player.dash(direction, tuning);
        }
        state.player.move_by(direction, tuning);
        if input.shoot && state.player.can_shoot() {
            fire_player_pattern(state, tuning);
            self.audio.play(Cue::Shoot);
        }
        state.player.tick(tuning);

        // ── 3. Spawn ──────────────────────────────────────────────────────────
        if state.enemies.is_empty() {
            let wave = spawner::spawn_wave(&mut state.level, tuning, &mut self.rng);
            state.wave_size = wave.plan.wave_size;
            state.speed_multiplier = wave.plan.speed_multiplier;
            state.enemies = wave.enemies;
        }

        // ── 4. Bullets ────────────────────────────────────────────────────────
        for bullet in state.bullets.iter_mut().chain(state.enemy_bullets.iter_mut()) {
            bullet.move_step();
        }

        // ── 5. Enemies ────────────────────────────────────────────────────────
        let audio = self.audio.as_mut();
        let speed_multiplier = state.speed_multiplier;
        state.enemies.retain_mut(|enemy| {
            if enemy.exploding {
                enemy.explode(&mut *audio, tuning).is_some()
            } else {
                enemy.move_step(speed_multiplier, tuning);
                true
            }
        });

        // ── 6. Enemy fire ─────────────────────────────────────────────────────
        for enemy in state.enemies.iter().filter(|e| e.in_formation_phase()) {
            if enemy.should_shoot(tuning.enemy_shoot_chance, &mut self.rng) {
                state.enemy_bullets.push(Bullet::new(
                    enemy.x + ENEMY_SIZE / 2.0 - BULLET_WIDTH / 2.0,
                    enemy.y + ENEMY_SIZE,
                    tuning.enemy_bullet_speed,
                    BulletOwner::Enemy,
                ));
            }
        }

        // ── 7. Formation ──────────────────────────────────────────────────────
        let breached = formation::update_formation(&mut state.enemies, tuning).breached;

        // ── 8. Power-ups ──────────────────────────────────────────────────────
        for powerup in state.powerups.iter_mut() {
            powerup.fall();
        }
        state.powerups.retain(|p| p.y <= tuning.screen_height);

        // ── 9. Collisions ─────────────────────────────────────────────────────
        let report: CollisionReport =
            collision::resolve(state, tuning, &mut self.rng, self.audio.as_mut());

        if breached || report.player_killed {
            self.end_game(breached);
        }
    }

    fn end_game(&mut self, breached: bool) {
        self.state.status = GameStatus::GameOver;
        self.audio.stop(Cue::BackgroundMusic);
        self.audio.play(Cue::GameOver);
        info!(
            "[Session] Game over ({}) with score {} at level {}",
            if breached { "formation landed" } else { "out of lives" },
            self.state.score,
            self.state.level
        );
        self.new_high_score = self.scores.record(self.state.score);
    }

    pub fn hud(&self) -> Hud {
        let p = &self.state.player;
        let t = &self.tuning;
        let fraction = |left: u32, total: u32| {
            if total == 0 {
                0.0
            } else {
                left as f32 / total as f32
            }
        };
        Hud {
            score: self.state.score,
            level: self.state.level,
            lives: p.lives,
            power_level: p.power_level,
            power_remaining: fraction(p.power_timer, t.power_duration),
            shield_remaining: if p.shield_active {
                fraction(p.shield_timer, t.shield_duration)
            } else {
                0.0
            },
            dash_ready: 1.0 - fraction(p.dash_cooldown, t.dash_cooldown),
            status: self.state.status,
            new_high_score: self.new_high_score,
            high_scores: self.scores.scores().to_vec(),
        }
    }

    /// Emit one sprite per visible entity, back to front.
    pub fn render(&self, renderer: &mut dyn Renderer) {
        let state = &self.state;

        for barrier in &state.barriers {
            renderer.draw_sprite(Sprite::Barrier(barrier.health), barrier.x, barrier.y);
        }

        if state.player.visible {
            renderer.draw_sprite(Sprite::Player, state.player.x, state.player.y);
            if state.player.shield_active {
                renderer.draw_sprite(Sprite::PlayerShield, state.player.x, state.player.y);
            }
        }

        for enemy in &state.enemies {
            let sprite = if enemy.exploding {
                if enemy.explosion_frame >= self.tuning.explosion_frames {
                    continue;
                }
                Sprite::Explosion(enemy.explosion_frame)
            } else {
                Sprite::Enemy(enemy.kind)
            };
            renderer.draw_sprite(sprite, enemy.x, enemy.y);
        }

        for bullet in &state.bullets {
            renderer.draw_sprite(Sprite::PlayerBullet, bullet.x, bullet.y);
        }
        for bullet in &state.enemy_bullets {
            renderer.draw_sprite(Sprite::EnemyBullet, bullet.x, bullet.y);
        }
        for powerup in &state.powerups {
            renderer.draw_sprite(Sprite::Powerup(powerup.kind), powerup.x, powerup.y);
        }
    }
}

// ── Shooting ──────────────────────────────────────────────────────────────────

/// Spawn the player's volley for the current power level and start the
/// cooldown. Level 3 fires three bullets and reloads faster.
pub fn fire_player_pattern(state: &mut GameState, tuning: &Tuning) {
    let p = &state.player;
    let centre = p.x + PLAYER_SIZE / 2.0 - BULLET_WIDTH / 2.0;
    let left = p.x + PLAYER_SIZE / 4.0 - BULLET_WIDTH / 2.0;
    let right = p.x + PLAYER_SIZE * 3.0 / 4.0 - BULLET_WIDTH / 2.0;

    let (lanes, cooldown) = match p.power_level {
        1 => (vec![centre], tuning.shoot_cooldown),
        2 => (vec![left, right], tuning.shoot_cooldown),
        _ => (vec![centre, left, right], tuning.rapid_shoot_cooldown),
    };

    let y = p.y;
    state.bullets.extend(
        lanes
            .into_iter()
            .map(|x| Bullet::new(x, y, tuning.player_bullet_speed, BulletOwner::Player)),
    );
    state.player.shoot_cooldown = cooldown;
}
