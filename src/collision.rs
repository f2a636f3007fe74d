/// Collision resolution, run once per tick after every entity has moved.
///
/// Phases run in a fixed order and each target list is scanned front to
/// back, so when one projectile overlaps several targets the earliest one
/// in its collection takes the hit. Removals are marked during a phase and
/// compacted at its end.

use rand::Rng;

use crate::collaborators::{AudioCue, Cue};
use crate::config::Tuning;
use crate::entities::{Barrier, Bullet, Enemy, Player, Powerup, PowerupKind};
use crate::geometry::Bounded;
use crate::session::GameState;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub score_gained: u32,
    pub enemies_destroyed: u32,
    pub powerups_collected: u32,
    /// The player lost their last life this tick.
    pub player_killed: bool,
}

pub fn resolve(
    state: &mut GameState,
    tuning: &Tuning,
    rng: &mut impl Rng,
    audio: &mut dyn AudioCue,
) -> CollisionReport {
    let mut report = CollisionReport::default();

    player_bullets(state, tuning, rng, audio, &mut report);
    enemy_bullets(state, tuning, &mut report);
    pickups(state, tuning, audio, &mut report);
    ramming(state, tuning, audio, &mut report);

    report
}

/// First barrier the bullet overlaps takes one point of damage.
fn strike_barrier(barriers: &mut [Barrier], bullet: &Bullet) -> bool {
    match barriers
        .iter_mut()
        .find(|b| b.health > 0 && bullet.collides_with(&**b))
    {
        Some(barrier) => {
            barrier.hit();
            true
        }
        None => false,
    }
}

fn roll_powerup(
    enemy: &Enemy,
    tuning: &Tuning,
    rng: &mut impl Rng,
    powerups: &mut Vec<Powerup>,
) {
    if rng.gen_bool(tuning.powerup_drop_chance) {
        let kind = PowerupKind::random(rng);
        powerups.push(Powerup::new(enemy.x, enemy.y, kind, tuning.powerup_fall_speed));
    }
}

// ── Phases 1-3: player bullets ────────────────────────────────────────────────

fn player_bullets(
    state: &mut GameState,
    tuning: &Tuning,
    rng: &mut impl Rng,
    audio: &mut dyn AudioCue,
    report: &mut CollisionReport,
) {
    let mut keep = vec![true; state.bullets.len()];

    for (bullet, keep) in state.bullets.iter().zip(keep.iter_mut()) {
        let target = state
            .enemies
            .iter_mut()
            .find(|e| !e.exploding && bullet.collides_with(&**e));

        if let Some(enemy) = target {
            if enemy.hit() {
                roll_powerup(enemy, tuning, rng, &mut state.powerups);
                report.score_gained += enemy.score_value();
                report.enemies_destroyed += 1;
                enemy.explode(audio, tuning);
            }
            *keep = false;
            continue;
        }

        if strike_barrier(&mut state.barriers, bullet) || bullet.is_off_screen(tuning.screen_height)
        {
            *keep = false;
        }
    }

    compact(&mut state.bullets, &keep);
    state.barriers.retain(|b| b.health > 0);
    state.score += report.score_gained;
}

// ── Phase 4: enemy bullets ────────────────────────────────────────────────────

fn enemy_bullets(state: &mut GameState, tuning: &Tuning, report: &mut CollisionReport) {
    let mut keep = vec![true; state.enemy_bullets.len()];

    for (bullet, keep) in state.enemy_bullets.iter().zip(keep.iter_mut()) {
        if state.player.visible && bullet.collides_with(&state.player) {
            if state.player.hit(tuning) {
                report.player_killed = true;
            }
            *keep = false;
            continue;
        }

        if strike_barrier(&mut state.barriers, bullet) || bullet.is_off_screen(tuning.screen_height)
        {
            *keep = false;
        }
    }

    compact(&mut state.enemy_bullets, &keep);
    state.barriers.retain(|b| b.health > 0);
}

// ── Phase 5: power-ups ────────────────────────────────────────────────────────

fn pickups(
    state: &mut GameState,
    tuning: &Tuning,
    audio: &mut dyn AudioCue,
    report: &mut CollisionReport,
) {
    let player: &mut Player = &mut state.player;
    state.powerups.retain(|powerup| {
        if !powerup.collides_with(&*player) {
            return true;
        }
        player.power_up(powerup.kind, tuning);
        audio.play(Cue::Powerup);
        report.powerups_collected += 1;
        false
    });
}

// ── Phase 6: player rams enemies ──────────────────────────────────────────────

fn ramming(
    state: &mut GameState,
    tuning: &Tuning,
    audio: &mut dyn AudioCue,
    report: &mut CollisionReport,
) {
    if state.player.invincible {
        return;
    }
    for enemy in state.enemies.iter_mut().filter(|e| !e.exploding) {
        if !enemy.collides_with(&state.player) {
            continue;
        }
        if state.player.hit(tuning) {
            report.player_killed = true;
        }
        if enemy.hit() {
            enemy.explode(audio, tuning);
        }
    }
}

fn compact<T>(items: &mut Vec<T>, keep: &[bool]) {
    let mut flags = keep.iter();
    items.retain(|_| flags.next().copied().unwrap_or(true));
}

#[cfg(test)]
mod tests {
    use super::compact;

    #[test]
    fn compact_keeps_order_of_survivors() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        compact(&mut items, &[true, false, true, false]);
        assert_eq!(items, vec!['a', 'c']);
    }
}
