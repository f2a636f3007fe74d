mod common;

use common::RecordingAudio;
use space_invaders::collaborators::Cue;
use space_invaders::config::Tuning;
use space_invaders::entities::*;
use space_invaders::geometry::{BULLET_HEIGHT, PLAYER_SIZE};

// ── Player: hits ──────────────────────────────────────────────────────────────

#[test]
fn shield_absorbs_hit() {
    let t = Tuning::default();
    let mut p = Player::new(&t);
    p.power_up(PowerupKind::Shield, &t);
    assert!(p.shield_active);

    let fatal = p.hit(&t);

    assert!(!fatal);
    assert!(!p.shield_active);
    assert_eq!(p.shield_timer, 0);
    assert_eq!(p.lives, 3);
    assert!(!p.invincible);
}

#[test]
fn hit_costs_a_life_and_grants_invincibility() {
    let t = Tuning::default();
    let mut p = Player::new(&t);

    assert!(!p.hit(&t));
    assert_eq!(p.lives, 2);
    assert!(p.invincible);
    assert_eq!(p.invincible_timer, t.invincible_duration);
}

#[test]
fn hit_while_invincible_is_free() {
    let t = Tuning::default();
    let mut p = Player::new(&t);
    p.hit(&t);

    assert!(!p.hit(&t));
    assert_eq!(p.lives, 2);
}

#[test]
fn last_life_is_fatal_and_lives_stay_at_zero() {
    let t = Tuning::default();
    let mut p = Player::new(&t);
    p.lives = 1;

    assert!(p.hit(&t));
    assert_eq!(p.lives, 0);
    assert!(!p.invincible);

    assert!(p.hit(&t));
    assert_eq!(p.lives, 0);
}

// ── Player: timers ────────────────────────────────────────────────────────────

#[test]
fn invincibility_flickers_then_restores_visibility() {
    let t = Tuning::default();
    let mut p = Player::new(&t);
    p.hit(&t);

    let mut toggles = 0;
    let mut last = p.visible;
    for _ in 0..t.invincible_duration - 1 {
        p.tick(&t);
        if p.visible != last {
            toggles += 1;
            last = p.visible;
        }
    }
    assert!(p.invincible);
    assert!(toggles >= 10);

    p.tick(&t);
    assert!(!p.invincible);
    assert!(p.visible);
}

#[test]
fn weapon_power_decays_to_one() {
    let t = Tuning::default();
    let mut p = Player::new(&t);
    p.power_up(PowerupKind::Weapon, &t);
    p.power_up(PowerupKind::Weapon, &t);
    p.power_up(PowerupKind::Weapon, &t);
    assert_eq!(p.power_level, 3);

    for _ in 0..t.power_duration - 1 {
        p.tick(&t);
    }
    assert_eq!(p.power_level, 3);
    p.tick(&t);
    assert_eq!(p.power_level, 1);
}

#[test]
fn shield_expires() {
    let t = Tuning::default();
    let mut p = Player::new(&t);
    p.power_up(PowerupKind::Shield, &t);
    for _ in 0..t.shield_duration {
        p.tick(&t);
    }
    assert!(!p.shield_active);
}

#[test]
fn life_and_speed_are_capped() {
    let t = Tuning::default();
    let mut p = Player::new(&t);
    for _ in 0..10 {
        p.power_up(PowerupKind::Life, &t);
        p.power_up(PowerupKind::Speed, &t);
    }
    assert_eq!(p.lives, 5);
    assert_eq!(p.speed, 8.0);
}

// ── Player: movement ──────────────────────────────────────────────────────────

#[test]
fn move_clamps_to_screen() {
    let t = Tuning::default();
    let mut p = Player::new(&t);
    p.x = 2.0;
    p.move_by(-1, &t);
    assert_eq!(p.x, 0.0);

    p.x = t.screen_width - PLAYER_SIZE - 1.0;
    p.move_by(1, &t);
    assert_eq!(p.x, t.screen_width - PLAYER_SIZE);
}

#[test]
fn dash_overrides_direction_until_spent() {
    let t = Tuning::default();
    let mut p = Player::new(&t);
    let start = p.x;
    p.dash(1, &t);
    assert_eq!(p.dash_cooldown, t.dash_cooldown);

    // Steering left has no effect while the dash runs
    p.move_by(-1, &t);
    assert_eq!(p.x, start + p.speed * t.dash_speed_factor);

    for _ in 1..t.dash_duration {
        p.move_by(-1, &t);
    }
    assert_eq!(p.dash_remaining, 0);

    let before = p.x;
    p.move_by(-1, &t);
    assert_eq!(p.x, before - p.speed);
}

#[test]
fn dash_respects_cooldown() {
    let t = Tuning::default();
    let mut p = Player::new(&t);
    p.dash(1, &t);
    for _ in 0..t.dash_duration {
        p.move_by(0, &t);
    }
    p.dash(-1, &t);
    assert_eq!(p.dash_remaining, 0);
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[test]
fn kind_table() {
    assert_eq!(EnemyKind::Scout.stats().health, 1);
    assert_eq!(EnemyKind::Fighter.stats().score, 200);
    assert_eq!(EnemyKind::Bomber.stats().speed, 2.0);
    assert_eq!(EnemyKind::for_row(0), EnemyKind::Scout);
    assert_eq!(EnemyKind::for_row(1), EnemyKind::Fighter);
    assert_eq!(EnemyKind::for_row(7), EnemyKind::Bomber);
}

#[test]
fn enemy_destroyed_exactly_on_last_hit() {
    for kind in [EnemyKind::Scout, EnemyKind::Fighter, EnemyKind::Bomber] {
        let mut e = Enemy::in_formation(kind, 100.0, 100.0);
        let health = kind.stats().health;
        for _ in 1..health {
            assert!(!e.hit());
        }
        assert!(e.hit());
    }
}

#[test]
fn entering_enemy_glides_into_formation() {
    let t = Tuning::default();
    let mut e = Enemy::new(EnemyKind::Scout, 100.0, 50.0, 2.0);
    assert!(e.entering);
    assert!(e.y < 0.0);

    let mut ticks = 0;
    while e.entering {
        e.move_step(1.0, &t);
        ticks += 1;
        assert!(ticks < 200);
    }
    assert_eq!(e.y, 50.0);
    // No sideways drift during the entrance
    assert_eq!(e.x, 100.0);
}

#[test]
fn formation_enemy_moves_and_eases_down() {
    let t = Tuning::default();
    let mut e = Enemy::in_formation(EnemyKind::Fighter, 100.0, 100.0);
    e.target_y = 120.0;

    e.move_step(2.0, &t);

    assert_eq!(e.x, 103.0);
    assert_eq!(e.y, 102.0);

    e.target_y = 500.0;
    e.move_step(1.0, &t);
    assert_eq!(e.y, 102.0 + t.max_descent_speed);
}

#[test]
fn should_shoot_is_a_bernoulli_roll() {
    let mut rng = common::seeded_rng();
    let e = Enemy::in_formation(EnemyKind::Scout, 0.0, 0.0);
    assert!((0..100).all(|_| !e.should_shoot(0.0, &mut rng)));
    assert!((0..100).all(|_| e.should_shoot(1.0, &mut rng)));
}

#[test]
fn explosion_runs_through_frames_then_ends() {
    let t = Tuning::default();
    let mut audio = RecordingAudio::default();
    let mut e = Enemy::in_formation(EnemyKind::Scout, 0.0, 0.0);

    let mut frames = Vec::new();
    while let Some(frame) = e.explode(&mut audio, &t) {
        frames.push(frame);
        assert!(frames.len() < 100);
    }

    assert!(e.exploding);
    assert_eq!(audio.played(Cue::Explosion), 1);
    assert_eq!(frames.first(), Some(&0));
    assert_eq!(frames.last(), Some(&(t.explosion_frames - 1)));
    assert_eq!(
        frames.len() as u32,
        t.explosion_frames * t.explosion_frame_ticks - 1
    );
}

// ── Bullets & pickups ─────────────────────────────────────────────────────────

#[test]
fn bullets_travel_by_owner() {
    let mut up = Bullet::new(10.0, 100.0, 7.0, BulletOwner::Player);
    let mut down = Bullet::new(10.0, 100.0, 3.0, BulletOwner::Enemy);
    up.move_step();
    down.move_step();
    assert_eq!(up.y, 93.0);
    assert_eq!(down.y, 103.0);
}

#[test]
fn off_screen_depends_on_owner() {
    let above = Bullet::new(0.0, -BULLET_HEIGHT - 1.0, 7.0, BulletOwner::Player);
    let below = Bullet::new(0.0, 601.0, 3.0, BulletOwner::Enemy);
    let visible = Bullet::new(0.0, -10.0, 7.0, BulletOwner::Player);
    assert!(above.is_off_screen(600.0));
    assert!(below.is_off_screen(600.0));
    assert!(!visible.is_off_screen(600.0));
}

#[test]
fn barrier_crumbles_after_five_hits() {
    let mut b = Barrier::new(0.0, 0.0, 5);
    for _ in 0..4 {
        assert!(!b.hit());
    }
    assert!(b.hit());
}
