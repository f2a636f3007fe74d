/// Wave generation: the only place difficulty grows.
///
/// Given a level the layout is fully deterministic; only each enemy's
/// entrance glide speed is rolled.

use log::info;
use rand::Rng;

use crate::config::Tuning;
use crate::entities::{Enemy, EnemyKind};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WavePlan {
    pub level: u32,
    pub wave_size: u32,
    pub columns: u32,
    pub rows: u32,
    pub speed_multiplier: f32,
}

impl WavePlan {
    pub fn for_level(level: u32, tuning: &Tuning) -> Self {
        let wave_size = (tuning.wave_base + level.saturating_sub(1) * tuning.wave_increment)
            .min(tuning.wave_cap);
        let columns = tuning.max_columns.min(wave_size).max(1);
        let rows = wave_size.div_ceil(columns);
        WavePlan {
            level,
            wave_size,
            columns,
            rows,
            speed_multiplier: 1.0 + level as f32 * tuning.speed_factor,
        }
    }
}

/// Formation slot for one enemy: kind plus resting position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slot {
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
}

/// Fill the grid row by row, left to right.
pub fn layout(plan: &WavePlan, tuning: &Tuning) -> Vec<Slot> {
    let usable = tuning.screen_width - 2.0 * tuning.grid_margin;
    let x_spacing = (usable / plan.columns as f32).floor();
    (0..plan.wave_size)
        .map(|i| {
            let row = i / plan.columns;
            let col = i % plan.columns;
            Slot {
                kind: EnemyKind::for_row(row),
                x: tuning.grid_margin + col as f32 * x_spacing,
                y: tuning.grid_margin + row as f32 * tuning.row_spacing,
            }
        })
        .collect()
}

#[derive(Clone, Debug)]
pub struct Wave {
    pub plan: WavePlan,
    pub enemies: Vec<Enemy>,
}

/// Build the wave for `*level` and advance the level counter.
pub fn spawn_wave(level: &mut u32, tuning: &Tuning, rng: &mut impl Rng) -> Wave {
    let plan = WavePlan::for_level(*level, tuning);
    let enemies = layout(&plan, tuning)
        .into_iter()
        .map(|slot| {
            let speed = rng.gen_range(tuning.entrance_speed_min..=tuning.entrance_speed_max);
            Enemy::new(slot.kind, slot.x, slot.y, speed)
        })
        .collect();

    info!(
        "[Spawner] Wave {} spawned: {} enemies in {}x{}, speed x{:.1}",
        plan.level, plan.wave_size, plan.columns, plan.rows, plan.speed_multiplier
    );
    *level += 1;
    Wave { plan, enemies }
}
