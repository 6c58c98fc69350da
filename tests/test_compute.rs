mod common;

use approx::assert_relative_eq;
use common::{firing, idle, seeded_rng, CueLog};
use galactic_defense::audio::{Cue, Silent};
use galactic_defense::compute::*;
use galactic_defense::config::{Difficulty, BOSS_LEVEL_FRAMES};
use galactic_defense::entities::*;
use galactic_defense::geometry::Vec2;

fn session() -> Session {
    init_state(Difficulty::Normal, 0)
}

fn player_bullet(x: f32, y: f32) -> Projectile {
    Projectile::new(Vec2::new(x, y), Vec2::new(0.0, -10.0), 1, 1.2, Rgb::WHITE)
}

fn enemy_bullet_on_player(state: &Session) -> Projectile {
    Projectile::new(state.player.pos, Vec2::ZERO, 1, 1.2, Rgb::RED)
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_starts_clean() {
    let s = init_state(Difficulty::Hard, 1234);
    assert_eq!(s.difficulty, Difficulty::Hard);
    assert_eq!(s.score, 0);
    assert_eq!(s.high_score, 1234);
    assert_eq!(s.level, 1);
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.player.health(), 3);
    assert_relative_eq!(s.player.pos.x, 450.0);
    assert_relative_eq!(s.player.pos.y, 750.0);
    assert!(s.enemies.is_empty());
    assert!(s.boss.is_none());
    assert!(s.mothership.is_none());
    assert!(!s.mothership_spawned);
}

// ── Pacing tables ─────────────────────────────────────────────────────────────

#[test]
fn spawn_interval_by_level_and_difficulty() {
    assert_eq!(enemy_spawn_interval(1, 1.0), 55);
    assert_eq!(enemy_spawn_interval(1, 1.5), 36);
    assert_eq!(enemy_spawn_interval(1, 0.7), 78);
    assert_eq!(enemy_spawn_interval(5, 1.0), 35);
    assert_eq!(enemy_spawn_interval(9, 1.0), 20);
}

#[test]
fn score_awards() {
    assert_eq!(kill_score(1, 1.0), 15);
    assert_eq!(kill_score(2, 1.5), 30);
    assert_eq!(boss_score(1.0), 500);
    assert_eq!(boss_score(1.5), 750);
    assert_eq!(mothership_score(1.0), 1000);
    assert_eq!(mothership_score(1.5), 1500);
}

#[test]
fn mothership_countdown_window() {
    let mut s = session();
    s.score = 179;
    assert_eq!(mothership_countdown(&s), None);
    s.score = 185;
    assert_eq!(mothership_countdown(&s), Some(15));
    s.score = 200;
    assert_eq!(mothership_countdown(&s), None);
    s.score = 190;
    s.mothership_spawned = true;
    assert_eq!(mothership_countdown(&s), None);
}

// ── Spawning ──────────────────────────────────────────────────────────────────

#[test]
fn enemy_spawns_once_interval_passes() {
    let mut s = session();
    let mut rng = seeded_rng();
    let mut audio = CueLog::default();
    for _ in 0..55 {
        tick(&mut s, &idle(), &mut rng, &mut audio);
    }
    assert!(s.enemies.is_empty());

    tick(&mut s, &idle(), &mut rng, &mut audio);
    assert_eq!(s.enemies.len(), 1);
    let e = &s.enemies[0];
    // Heavy enemies sway a couple of pixels off their spawn column.
    assert!((45.0..=855.0).contains(&e.pos.x));
    assert!(e.pos.y < -45.0);
    assert_eq!(s.enemy_spawn_timer.frames(), 0);
}

#[test]
fn no_regular_spawns_during_boss_fight() {
    let mut s = session();
    s.boss = Some(Boss::new(Vec2::new(450.0, 150.0)));
    let mut rng = seeded_rng();
    let mut audio = CueLog::default();
    for _ in 0..200 {
        tick(&mut s, &idle(), &mut rng, &mut audio);
        s.enemy_bullets.clear();
    }
    assert!(s.enemies.is_empty());
    assert_eq!(s.enemy_spawn_timer.frames(), 0);
}

#[test]
fn boss_arrives_after_level_time_on_clear_sky() {
    let mut s = session();
    s.level_timer.set(BOSS_LEVEL_FRAMES - 1);
    let mut rng = seeded_rng();
    let mut audio = CueLog::default();

    tick(&mut s, &idle(), &mut rng, &mut audio);
    assert!(s.boss.is_none());

    tick(&mut s, &idle(), &mut rng, &mut audio);
    let boss = s.boss.as_ref().expect("boss should spawn");
    assert_eq!(boss.health(), 50);
}

#[test]
fn boss_waits_for_the_sky_to_clear() {
    let mut s = session();
    s.level_timer.set(BOSS_LEVEL_FRAMES + 10);
    s.enemies.push(Enemy::new(Vec2::new(100.0, 100.0), EnemyKind::Basic));
    tick(&mut s, &idle(), &mut seeded_rng(), &mut Silent);
    assert!(s.boss.is_none());
}

#[test]
fn power_up_roll_resets_its_timer() {
    let mut s = session();
    let mut rng = seeded_rng();
    let mut audio = CueLog::default();
    for _ in 0..900 {
        tick(&mut s, &idle(), &mut rng, &mut audio);
        s.enemies.clear();
        s.enemy_bullets.clear();
    }
    assert_eq!(s.power_up_spawn_timer.frames(), 900);
    assert!(s.power_ups.is_empty());

    tick(&mut s, &idle(), &mut rng, &mut audio);
    assert_eq!(s.power_up_spawn_timer.frames(), 0);
    assert!(s.power_ups.len() <= 1);
}

// ── Player bullets ────────────────────────────────────────────────────────────

#[test]
fn player_bullet_kills_basic_enemy() {
    let mut s = session();
    let mut audio = CueLog::default();
    s.enemies.push(Enemy::with_health(Vec2::new(450.0, 400.0), EnemyKind::Basic, 1));
    s.player_bullets.push(player_bullet(450.0, 440.0));

    tick(&mut s, &idle(), &mut seeded_rng(), &mut audio);

    assert!(s.enemies.is_empty());
    assert!(s.player_bullets.is_empty());
    assert_eq!(s.score, 15);
    assert!(audio.heard(Cue::Explosion));
    assert_eq!(s.particles.len(), 20);
}

#[test]
fn bullet_hits_only_one_enemy() {
    let mut s = session();
    s.enemies.push(Enemy::with_health(Vec2::new(450.0, 400.0), EnemyKind::Heavy, 3));
    s.enemies.push(Enemy::with_health(Vec2::new(455.0, 400.0), EnemyKind::Heavy, 3));
    s.player_bullets.push(player_bullet(452.0, 440.0));

    tick(&mut s, &idle(), &mut seeded_rng(), &mut CueLog::default());

    assert_eq!(s.enemies.len(), 2);
    let healths: Vec<i32> = s.enemies.iter().map(|e| e.health()).collect();
    assert_eq!(healths, vec![2, 3]);
    assert!(s.player_bullets.is_empty());
    assert_eq!(s.score, 0);
}

#[test]
fn holding_fire_spawns_bullets() {
    let mut s = session();
    let mut rng = seeded_rng();
    let mut audio = CueLog::default();
    for _ in 0..9 {
        tick(&mut s, &firing(), &mut rng, &mut audio);
    }
    assert_eq!(s.player_bullets.len(), 1);
    assert_eq!(s.player.ammo, 74);
    assert_eq!(audio.count(Cue::PlayerShoot), 1);
}

// ── Boss ──────────────────────────────────────────────────────────────────────

#[test]
fn boss_kill_awards_and_advances_level() {
    let mut s = session();
    let mut audio = CueLog::default();
    let mut boss = Boss::new(Vec2::new(450.0, 150.0));
    boss.take_damage(49);
    s.boss = Some(boss);
    s.level_timer.set(500);
    // Boss moves to x = 452 before collisions.
    s.player_bullets.push(player_bullet(452.0, 200.0));
    s.player_bullets.push(player_bullet(460.0, 200.0));

    tick(&mut s, &idle(), &mut seeded_rng(), &mut audio);

    assert!(s.boss.is_none());
    assert_eq!(s.level, 2);
    assert_eq!(s.score, 500);
    assert_eq!(s.level_timer.frames(), 0);
    assert_eq!(audio.count(Cue::BossHit), 1);
    // The bullet after the kill stays in flight.
    assert_eq!(s.player_bullets.len(), 1);
}

#[test]
fn every_overlapping_bullet_hits_the_boss() {
    let mut s = session();
    let mut audio = CueLog::default();
    s.boss = Some(Boss::new(Vec2::new(450.0, 150.0)));
    for x in [430.0, 452.0, 480.0] {
        s.player_bullets.push(player_bullet(x, 200.0));
    }

    tick(&mut s, &idle(), &mut seeded_rng(), &mut audio);

    assert_eq!(s.boss.as_ref().map(|b| b.health()), Some(47));
    assert_eq!(audio.count(Cue::BossHit), 3);
    assert!(s.player_bullets.is_empty());
}

// ── Mothership ────────────────────────────────────────────────────────────────

#[test]
fn reaching_threshold_brings_the_mothership() {
    let mut s = session();
    let mut audio = CueLog::default();
    s.score = 200;
    s.enemies.push(Enemy::new(Vec2::new(200.0, 300.0), EnemyKind::Fast));
    s.enemy_bullets
        .push(Projectile::new(Vec2::new(100.0, 100.0), Vec2::new(0.0, 4.0), 1, 1.2, Rgb::RED));
    s.power_ups.push(PowerUp::new(Vec2::new(700.0, 100.0), PowerUpKind::Heal));

    tick(&mut s, &idle(), &mut seeded_rng(), &mut audio);

    assert!(s.mothership.is_some());
    assert!(s.mothership_spawned);
    assert!(s.enemies.is_empty());
    assert!(s.enemy_bullets.is_empty());
    assert!(s.power_ups.is_empty());
    assert!(s.boss.is_none());
    assert_eq!(audio.count(Cue::MothershipSpawn), 1);
    assert!(audio.heard(Cue::Explosion));
    let banners = s
        .notifications
        .iter()
        .filter(|n| n.kind == NotificationKind::MothershipSpawned)
        .count();
    assert_eq!(banners, 1);
}

#[test]
fn mothership_takes_one_bullet_per_frame() {
    let mut s = session();
    let mut audio = CueLog::default();
    s.mothership = Some(Mothership::new(Vec2::new(450.0, 150.0)));
    s.mothership_spawned = true;
    s.player_bullets.push(player_bullet(452.0, 200.0));
    s.player_bullets.push(player_bullet(470.0, 200.0));

    tick(&mut s, &idle(), &mut seeded_rng(), &mut audio);

    assert_eq!(s.mothership.as_ref().map(|m| m.health()), Some(29));
    assert_eq!(s.player_bullets.len(), 1);
    assert_eq!(audio.count(Cue::BossHit), 1);
}

#[test]
fn destroying_the_mothership_pays_out_once() {
    let mut s = session();
    let mut rng = seeded_rng();
    let mut audio = CueLog::default();
    s.score = 200;
    tick(&mut s, &idle(), &mut rng, &mut audio);
    assert!(s.mothership.is_some());

    if let Some(ship) = s.mothership.as_mut() {
        ship.take_damage(29);
    }
    // The mothership drifts to x = 452 before collisions.
    s.player_bullets.push(player_bullet(452.0, 200.0));
    tick(&mut s, &idle(), &mut rng, &mut audio);

    assert!(s.mothership.is_none());
    assert_eq!(s.score, 1200);
    assert_eq!(s.level, 3);
    assert_eq!(s.power_ups.len(), 3);
    assert!(s
        .power_ups
        .iter()
        .all(|p| PowerUpKind::REWARDS.contains(&p.kind) && (100.0..=800.0).contains(&p.pos.x)));
    assert_eq!(audio.count(Cue::MothershipDestroy), 1);
    assert!(s
        .notifications
        .iter()
        .any(|n| n.kind == NotificationKind::MothershipDestroyed));

    for _ in 0..120 {
        tick(&mut s, &idle(), &mut rng, &mut audio);
        s.enemy_bullets.clear();
    }
    assert!(s.mothership.is_none());
    assert_eq!(audio.count(Cue::MothershipSpawn), 1);
}

// ── Player hits & pickups ─────────────────────────────────────────────────────

#[test]
fn enemy_bullet_damages_player() {
    let mut s = session();
    let bullet = enemy_bullet_on_player(&s);
    s.enemy_bullets.push(bullet);
    tick(&mut s, &idle(), &mut seeded_rng(), &mut CueLog::default());
    assert_eq!(s.player.health(), 4);
    assert!(s.enemy_bullets.is_empty());
    assert_eq!(s.status, GameStatus::Playing);
}

#[test]
fn shield_swallows_bullets() {
    let mut s = session();
    s.player.apply_power_up(PowerUpKind::Shield, &mut CueLog::default());
    for _ in 0..3 {
        let bullet = enemy_bullet_on_player(&s);
        s.enemy_bullets.push(bullet);
    }
    tick(&mut s, &idle(), &mut seeded_rng(), &mut CueLog::default());
    assert_eq!(s.player.health(), 5);
    assert!(s.enemy_bullets.is_empty());
}

#[test]
fn lethal_hit_ends_the_session() {
    let mut s = init_state(Difficulty::Normal, 100);
    let mut audio = CueLog::default();
    s.score = 150;
    for _ in 0..6 {
        let bullet = enemy_bullet_on_player(&s);
        s.enemy_bullets.push(bullet);
    }

    tick(&mut s, &idle(), &mut seeded_rng(), &mut audio);

    assert_eq!(s.status, GameStatus::GameOver);
    assert_eq!(s.player.health(), 0);
    assert_eq!(s.high_score, 150);
    assert_eq!(audio.count(Cue::GameOver), 1);
    // Processing stops at the fatal bullet.
    assert_eq!(s.enemy_bullets.len(), 1);

    let frame = s.frame;
    tick(&mut s, &idle(), &mut seeded_rng(), &mut audio);
    assert_eq!(s.frame, frame);
}

#[test]
fn dead_player_collects_nothing() {
    let mut s = init_state(Difficulty::Normal, 0);
    let mut audio = CueLog::default();
    s.score = 150;
    for _ in 0..10 {
        let bullet = enemy_bullet_on_player(&s);
        s.enemy_bullets.push(bullet);
    }
    s.power_ups.push(PowerUp::new(s.player.pos, PowerUpKind::Heal));

    tick(&mut s, &idle(), &mut seeded_rng(), &mut audio);

    assert_eq!(s.status, GameStatus::GameOver);
    assert_eq!(s.player.health(), 0);
    assert_eq!(s.score, 150);
    assert_eq!(s.high_score, 150);
    assert_eq!(s.power_ups.len(), 1);
    assert!(s.notifications.is_empty());
    assert!(!audio.heard(Cue::PowerUp));
}

#[test]
fn power_up_pickup_scores_and_announces() {
    let mut s = session();
    let mut audio = CueLog::default();
    s.power_ups.push(PowerUp::new(s.player.pos, PowerUpKind::Shield));

    tick(&mut s, &idle(), &mut seeded_rng(), &mut audio);

    assert!(s.power_ups.is_empty());
    assert_eq!(s.score, 50);
    assert!(s.player.is_shielded());
    assert!(audio.heard(Cue::PowerUp));
    assert!(audio.heard(Cue::ShieldActivate));
    assert_eq!(
        s.notifications.last().map(|n| n.kind),
        Some(NotificationKind::PowerUp(PowerUpKind::Shield))
    );
}

// ── Render view ───────────────────────────────────────────────────────────────

#[test]
fn sprites_cover_every_entity() {
    let mut s = session();
    s.enemies.push(Enemy::new(Vec2::new(100.0, 100.0), EnemyKind::Heavy));
    s.boss = Some(Boss::new(Vec2::new(450.0, 150.0)));
    s.player_bullets.push(player_bullet(300.0, 300.0));
    let kinds: Vec<SpriteKind> = sprites(&s).iter().map(|sp| sp.kind).collect();
    assert_eq!(kinds[0], SpriteKind::Player);
    assert!(kinds.contains(&SpriteKind::Enemy(EnemyKind::Heavy)));
    assert!(kinds.contains(&SpriteKind::Boss));
    assert!(kinds.contains(&SpriteKind::Projectile));
    assert_eq!(kinds.len(), 4);
}
