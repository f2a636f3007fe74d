/// Gameplay tuning and command-line options.
///
/// `Tuning::default()` reproduces the classic feel at 60 ticks per second;
/// every duration below is measured in ticks.

use std::path::PathBuf;

use clap::Parser;

use crate::geometry::{SCREEN_HEIGHT, SCREEN_WIDTH};

pub const FPS: u32 = 60;

#[derive(Clone, Debug, PartialEq)]
pub struct Tuning {
    pub screen_width: f32,
    pub screen_height: f32,

    // ── Player ────────────────────────────────────────────────────────────────
    pub player_speed: f32,
    pub player_max_speed: f32,
    pub player_lives: u32,
    pub player_max_lives: u32,
    pub shoot_cooldown: u32,
    /// Cooldown used at power level 3.
    pub rapid_shoot_cooldown: u32,
    pub power_duration: u32,
    pub shield_duration: u32,
    pub invincible_duration: u32,
    /// Visibility toggles after this many invincible ticks.
    pub flicker_interval: u32,
    pub dash_duration: u32,
    pub dash_cooldown: u32,
    pub dash_speed_factor: f32,

    // ── Projectiles & pickups ─────────────────────────────────────────────────
    pub player_bullet_speed: f32,
    pub enemy_bullet_speed: f32,
    pub powerup_fall_speed: f32,
    pub powerup_drop_chance: f64,

    // ── Enemies ───────────────────────────────────────────────────────────────
    pub enemy_shoot_chance: f64,
    pub entrance_speed_min: f32,
    pub entrance_speed_max: f32,
    pub max_descent_speed: f32,
    pub explosion_frames: u32,
    pub explosion_frame_ticks: u32,

    // ── Waves & formation ─────────────────────────────────────────────────────
    pub wave_base: u32,
    pub wave_increment: u32,
    pub wave_cap: u32,
    pub speed_factor: f32,
    pub max_columns: u32,
    pub grid_margin: f32,
    pub row_spacing: f32,
    pub edge_margin: f32,
    pub descent_step: f32,
    /// An enemy whose top edge passes this line ends the game.
    pub loss_line: f32,

    pub barrier_health: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            player_speed: 5.0,
            player_max_speed: 8.0,
            player_lives: 3,
            player_max_lives: 5,
            shoot_cooldown: 30,
            rapid_shoot_cooldown: 20,
            power_duration: FPS * 15,
            shield_duration: FPS * 10,
            invincible_duration: FPS * 2,
            flicker_interval: 6,
            dash_duration: 10,
            dash_cooldown: FPS * 2,
            dash_speed_factor: 3.0,

            player_bullet_speed: 7.0,
            enemy_bullet_speed: 3.0,
            powerup_fall_speed: 2.0,
            powerup_drop_chance: 0.2,

            enemy_shoot_chance: 0.001,
            entrance_speed_min: 1.0,
            entrance_speed_max: 2.0,
            max_descent_speed: 2.0,
            explosion_frames: 3,
            explosion_frame_ticks: 6,

            wave_base: 5,
            wave_increment: 2,
            wave_cap: 40,
            speed_factor: 0.1,
            max_columns: 10,
            grid_margin: 50.0,
            row_spacing: 50.0,
            edge_margin: 10.0,
            descent_step: 20.0,
            loss_line: SCREEN_HEIGHT - 100.0,

            barrier_health: 5,
        }
    }
}

/// Command-line options for the terminal front end.
#[derive(Debug, Parser)]
#[command(name = "space_invaders", about = "Defend the planet from descending waves")]
pub struct Cli {
    /// File holding the high-score list, one score per line.
    #[arg(long, default_value = "high_scores.txt")]
    pub scores_file: PathBuf,

    /// Target simulation rate in ticks per second.
    #[arg(long, default_value_t = FPS)]
    pub fps: u32,

    /// Seed the RNG for a reproducible run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable audio cues entirely.
    #[arg(long)]
    pub mute: bool,

    /// Log destination; the terminal itself is busy drawing the game.
    #[arg(long, default_value = "space_invaders.log")]
    pub log_file: PathBuf,
}
