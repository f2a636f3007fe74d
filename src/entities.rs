/// Game entities: pure state plus their per-tick rules. No rendering here.

use rand::Rng;

use crate::collaborators::{AudioCue, Cue};
use crate::config::Tuning;
use crate::geometry::{
    Bounded, Rect, BARRIER_HEIGHT, BARRIER_WIDTH, BULLET_HEIGHT, BULLET_WIDTH, ENEMY_SIZE,
    PLAYER_SIZE, POWERUP_SIZE,
};

// ── Kinds ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Scout,
    Fighter,
    Bomber,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    pub health: u32,
    pub score: u32,
    pub speed: f32,
}

const ENEMY_STATS: [EnemyStats; 3] = [
    EnemyStats { health: 1, score: 100, speed: 1.0 },
    EnemyStats { health: 2, score: 200, speed: 1.5 },
    EnemyStats { health: 3, score: 300, speed: 2.0 },
];

impl EnemyKind {
    pub fn index(self) -> usize {
        match self {
            EnemyKind::Scout => 0,
            EnemyKind::Fighter => 1,
            EnemyKind::Bomber => 2,
        }
    }

    pub fn stats(self) -> &'static EnemyStats {
        &ENEMY_STATS[self.index()]
    }

    /// Grid rows map to kinds: the front row is weakest, rows 2+ are bombers.
    pub fn for_row(row: u32) -> EnemyKind {
        match row {
            0 => EnemyKind::Scout,
            1 => EnemyKind::Fighter,
            _ => EnemyKind::Bomber,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerupKind {
    /// One more bullet per shot (max 3) for a limited time.
    Weapon,
    /// Personal shield that absorbs one hit.
    Shield,
    /// +1 life (max 5).
    Life,
    /// +1 movement speed (max 8).
    Speed,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 4] = [
        PowerupKind::Weapon,
        PowerupKind::Shield,
        PowerupKind::Life,
        PowerupKind::Speed,
    ];

    pub fn random(rng: &mut impl Rng) -> PowerupKind {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub lives: u32,
    pub shoot_cooldown: u32,
    pub power_level: u32,
    pub power_timer: u32,
    pub shield_active: bool,
    pub shield_timer: u32,
    pub invincible: bool,
    pub invincible_timer: u32,
    pub flicker_timer: u32,
    /// Cleared and set on alternate flicker intervals while invincible.
    pub visible: bool,
    pub dash_cooldown: u32,
    pub dash_remaining: u32,
    pub dash_direction: i32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Player {
            x: tuning.screen_width / 2.0 - PLAYER_SIZE / 2.0,
            y: tuning.screen_height - 100.0,
            speed: tuning.player_speed,
            lives: tuning.player_lives,
            shoot_cooldown: 0,
            power_level: 1,
            power_timer: 0,
            shield_active: false,
            shield_timer: 0,
            invincible: false,
            invincible_timer: 0,
            flicker_timer: 0,
            visible: true,
            dash_cooldown: 0,
            dash_remaining: 0,
            dash_direction: 0,
        }
    }

    /// A dash in progress overrides `direction` until it runs out.
    pub fn move_by(&mut self, direction: i32, tuning: &Tuning) {
        if self.dash_remaining > 0 {
            self.x += self.dash_direction as f32 * self.speed * tuning.dash_speed_factor;
            self.dash_remaining -= 1;
        } else {
            self.x += direction as f32 * self.speed;
        }
        self.x = self.x.clamp(0.0, tuning.screen_width - PLAYER_SIZE);
    }

    pub fn dash(&mut self, direction: i32, tuning: &Tuning) {
        if self.dash_cooldown == 0 && direction != 0 {
            self.dash_remaining = tuning.dash_duration;
            self.dash_direction = direction.signum();
            self.dash_cooldown = tuning.dash_cooldown;
        }
    }

    pub fn can_shoot(&self) -> bool {
        self.shoot_cooldown == 0
    }

    /// Advance every running timer by one tick.
    pub fn tick(&mut self, tuning: &Tuning) {
        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
        self.dash_cooldown = self.dash_cooldown.saturating_sub(1);

        if self.power_timer > 0 {
            self.power_timer -= 1;
            if self.power_timer == 0 {
                self.power_level = 1;
            }
        }

        if self.shield_timer > 0 {
            self.shield_timer -= 1;
            if self.shield_timer == 0 {
                self.shield_active = false;
            }
        }

        if self.invincible_timer > 0 {
            self.invincible_timer -= 1;
            self.flicker_timer += 1;
            if self.flicker_timer >= tuning.flicker_interval {
                self.visible = !self.visible;
                self.flicker_timer = 0;
            }
            if self.invincible_timer == 0 {
                self.invincible = false;
                self.visible = true;
                self.flicker_timer = 0;
            }
        }
    }

    /// Apply one hit. Returns `true` when it was fatal.
    pub fn hit(&mut self, tuning: &Tuning) -> bool {
        if self.shield_active {
            self.shield_active = false;
            self.shield_timer = 0;
            return false;
        }
        if self.invincible {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        if self.lives > 0 {
            self.invincible = true;
            self.invincible_timer = tuning.invincible_duration;
        }
        self.lives == 0
    }

    pub fn power_up(&mut self, kind: PowerupKind, tuning: &Tuning) {
        match kind {
            PowerupKind::Weapon => {
                self.power_level = (self.power_level + 1).min(3);
                self.power_timer = tuning.power_duration;
            }
            PowerupKind::Shield => {
                self.shield_active = true;
                self.shield_timer = tuning.shield_duration;
            }
            PowerupKind::Life => {
                self.lives = (self.lives + 1).min(tuning.player_max_lives);
            }
            PowerupKind::Speed => {
                self.speed = (self.speed + 1.0).min(tuning.player_max_speed);
            }
        }
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, PLAYER_SIZE, PLAYER_SIZE)
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub health: u32,
    pub x: f32,
    pub y: f32,
    /// +1 moving right, -1 moving left.
    pub direction: f32,
    pub entering: bool,
    pub entrance_speed: f32,
    /// Formation row the entrance glide ends on.
    pub final_y: f32,
    /// Pending descent target; the enemy eases down until it gets there.
    pub target_y: f32,
    pub exploding: bool,
    pub explosion_frame: u32,
    pub explosion_timer: u32,
}

impl Enemy {
    /// A fresh enemy starts just above the screen and glides down to `y`.
    pub fn new(kind: EnemyKind, x: f32, y: f32, entrance_speed: f32) -> Self {
        Enemy {
            kind,
            health: kind.stats().health,
            x,
            y: -ENEMY_SIZE,
            direction: 1.0,
            entering: true,
            entrance_speed,
            final_y: y,
            target_y: y,
            exploding: false,
            explosion_frame: 0,
            explosion_timer: 0,
        }
    }

    /// An enemy already settled in the formation, skipping the entrance.
    pub fn in_formation(kind: EnemyKind, x: f32, y: f32) -> Self {
        Enemy {
            y,
            entering: false,
            ..Enemy::new(kind, x, y, 0.0)
        }
    }

    pub fn score_value(&self) -> u32 {
        self.kind.stats().score
    }

    pub fn in_formation_phase(&self) -> bool {
        !self.entering && !self.exploding
    }

    pub fn move_step(&mut self, speed_multiplier: f32, tuning: &Tuning) {
        if self.entering {
            if self.y < self.final_y {
                self.y += self.entrance_speed;
            } else {
                self.entering = false;
                self.y = self.final_y;
            }
            return;
        }

        self.x += self.kind.stats().speed * self.direction * speed_multiplier;
        if self.y < self.target_y {
            let step = ((self.target_y - self.y) / 10.0).min(tuning.max_descent_speed);
            self.y += step;
        }
    }

    /// Independent roll every tick; stronger kinds fire more often.
    pub fn should_shoot(&self, base_chance: f64, rng: &mut impl Rng) -> bool {
        let chance = base_chance * (self.kind.index() + 1) as f64;
        rng.gen::<f64>() < chance
    }

    /// Returns `true` once health is used up.
    pub fn hit(&mut self) -> bool {
        self.health = self.health.saturating_sub(1);
        self.health == 0
    }

    /// Advance the explosion. The first call starts it and plays the cue.
    /// Returns the frame to draw, or `None` once the animation is over.
    pub fn explode(&mut self, audio: &mut dyn AudioCue, tuning: &Tuning) -> Option<u32> {
        if !self.exploding {
            self.exploding = true;
            audio.play(Cue::Explosion);
        }
        self.explosion_timer += 1;
        if self.explosion_timer >= tuning.explosion_frame_ticks {
            self.explosion_frame += 1;
            self.explosion_timer = 0;
        }
        (self.explosion_frame < tuning.explosion_frames).then_some(self.explosion_frame)
    }
}

impl Bounded for Enemy {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, ENEMY_SIZE, ENEMY_SIZE)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Clone, Debug)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub owner: BulletOwner,
}

impl Bullet {
    pub fn new(x: f32, y: f32, speed: f32, owner: BulletOwner) -> Self {
        Bullet { x, y, speed, owner }
    }

    /// Player bullets travel up, enemy bullets down.
    pub fn move_step(&mut self) {
        match self.owner {
            BulletOwner::Player => self.y -= self.speed,
            BulletOwner::Enemy => self.y += self.speed,
        }
    }

    pub fn is_off_screen(&self, screen_height: f32) -> bool {
        match self.owner {
            BulletOwner::Player => self.y < -BULLET_HEIGHT,
            BulletOwner::Enemy => self.y > screen_height,
        }
    }
}

impl Bounded for Bullet {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, BULLET_WIDTH, BULLET_HEIGHT)
    }
}

// ── Pickups & barriers ────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Powerup {
    pub x: f32,
    pub y: f32,
    pub kind: PowerupKind,
    pub speed: f32,
}

impl Powerup {
    pub fn new(x: f32, y: f32, kind: PowerupKind, speed: f32) -> Self {
        Powerup { x, y, kind, speed }
    }

    pub fn fall(&mut self) {
        self.y += self.speed;
    }
}

impl Bounded for Powerup {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, POWERUP_SIZE, POWERUP_SIZE)
    }
}

/// Stationary destructible cover between the player and the formation.
#[derive(Clone, Debug)]
pub struct Barrier {
    pub x: f32,
    pub y: f32,
    pub health: u32,
}

impl Barrier {
    pub fn new(x: f32, y: f32, health: u32) -> Self {
        Barrier { x, y, health }
    }

    /// Returns `true` when the barrier has crumbled.
    pub fn hit(&mut self) -> bool {
        self.health = self.health.saturating_sub(1);
        self.health == 0
    }
}

impl Bounded for Barrier {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, BARRIER_WIDTH, BARRIER_HEIGHT)
    }
}
