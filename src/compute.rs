//! The per-frame simulation.
//!
//! [`tick`] advances one [`Session`] by exactly one frame: timers, spawn
//! policies, entity updates, pruning, then collision resolution in a fixed
//! order. Randomness and audio come in as parameters, so a seeded RNG and a
//! recording sink make every frame reproducible in tests.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::audio::{AudioSink, Cue};
use crate::config::{
    Difficulty, BOSS_LEVEL_FRAMES, ENEMY_SPAWN_Y, GAME_AREA_WIDTH, MOTHERSHIP_REWARD_DROPS,
    MOTHERSHIP_SCORE, MOTHERSHIP_WARNING_SCORE, POWER_UP_PICKUP_SCORE, POWER_UP_SPAWN_CHANCE,
    POWER_UP_SPAWN_Y, REWARD_DROP_MARGIN, SCREEN_HEIGHT, SPAWN_MARGIN,
};
use crate::entities::effects::burst;
use crate::entities::{
    Boss, Damageable, Drawable, Enemy, EnemyKind, Mothership, Notification, NotificationKind,
    Particle, Player, PowerUp, PowerUpKind, Projectile, Rgb, Sprite,
};
use crate::geometry::{FrameCounter, Vec2};
use crate::input::PlayerInput;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Everything alive in one play-through, from difficulty pick to game over.
#[derive(Clone, Debug)]
pub struct Session {
    pub difficulty: Difficulty,
    pub player: Player,
    pub player_bullets: Vec<Projectile>,
    pub enemy_bullets: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub boss: Option<Boss>,
    pub mothership: Option<Mothership>,
    /// Latched the first time the mothership appears; never re-armed.
    pub mothership_spawned: bool,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    pub notifications: Vec<Notification>,
    pub score: u32,
    /// Best score seen so far, including this session once it is beaten.
    pub high_score: u32,
    pub level: u32,
    pub status: GameStatus,
    pub frame: u64,
    pub enemy_spawn_timer: FrameCounter,
    pub power_up_spawn_timer: FrameCounter,
    /// Frames since the current level began; gates the boss.
    pub level_timer: FrameCounter,
}

// ── Scoring & pacing tables ──────────────────────────────────────────────────

/// Frames between enemy spawns.
pub fn enemy_spawn_interval(level: u32, difficulty_mult: f64) -> u32 {
    let base = 60.0 - level as f64 * 5.0;
    ((base / difficulty_mult) as i64).max(20) as u32
}

/// Score for one regular enemy kill.
pub fn kill_score(level: u32, difficulty_mult: f64) -> u32 {
    ((10 + level * 5) as f64 * difficulty_mult) as u32
}

pub fn boss_score(difficulty_mult: f64) -> u32 {
    (500.0 * difficulty_mult) as u32
}

pub fn mothership_score(difficulty_mult: f64) -> u32 {
    (1000.0 * difficulty_mult) as u32
}

/// Points still needed before the mothership arrives, once close enough for
/// the HUD to start warning.
pub fn mothership_countdown(state: &Session) -> Option<u32> {
    let armed = !state.mothership_spawned && state.mothership.is_none();
    let close = (MOTHERSHIP_WARNING_SCORE..MOTHERSHIP_SCORE).contains(&state.score);
    (armed && close).then(|| MOTHERSHIP_SCORE - state.score)
}

fn screen_center() -> Vec2 {
    Vec2::new(GAME_AREA_WIDTH / 2.0, SCREEN_HEIGHT / 2.0)
}

fn top_center() -> Vec2 {
    Vec2::new(GAME_AREA_WIDTH / 2.0, 150.0)
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// A fresh session: level 1, score 0, empty sky.
pub fn init_state(difficulty: Difficulty, high_score: u32) -> Session {
    tracing::info!(difficulty = difficulty.name(), high_score, "session start");
    Session {
        difficulty,
        player: Player::new(
            Vec2::new(GAME_AREA_WIDTH / 2.0, SCREEN_HEIGHT - 150.0),
            difficulty,
        ),
        player_bullets: Vec::new(),
        enemy_bullets: Vec::new(),
        enemies: Vec::new(),
        boss: None,
        mothership: None,
        mothership_spawned: false,
        power_ups: Vec::new(),
        particles: Vec::new(),
        notifications: Vec::new(),
        score: 0,
        high_score,
        level: 1,
        status: GameStatus::Playing,
        frame: 0,
        enemy_spawn_timer: FrameCounter::default(),
        power_up_spawn_timer: FrameCounter::default(),
        level_timer: FrameCounter::default(),
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame. Does nothing once the game is over.
pub fn tick(
    state: &mut Session,
    input: &PlayerInput,
    rng: &mut impl Rng,
    audio: &mut impl AudioSink,
) {
    if state.status == GameStatus::GameOver {
        return;
    }
    state.frame += 1;
    state.level_timer.advance();
    let mult = state.difficulty.multiplier();

    // ── 1. Player ────────────────────────────────────────────────────────────
    state.player.update(input);
    if input.shoot {
        let shots = state.player.shoot(audio);
        state.player_bullets.extend(shots);
    }

    // ── 2. Bullets ───────────────────────────────────────────────────────────
    for bullet in &mut state.player_bullets {
        bullet.update();
    }
    state.player_bullets.retain(|b| !b.left_top());

    for bullet in &mut state.enemy_bullets {
        bullet.update();
    }
    state.enemy_bullets.retain(|b| !b.left_bottom());

    // ── 3. Enemies ───────────────────────────────────────────────────────────
    if state.boss.is_none() && state.mothership.is_none() {
        spawn_enemies(state, rng);
    }

    let player_x = state.player.pos.x;
    for enemy in &mut state.enemies {
        enemy.update(player_x, mult);
        if let Some(shot) = enemy.shoot(mult) {
            audio.play_cue(Cue::EnemyShoot);
            state.enemy_bullets.push(shot);
        }
    }
    state.enemies.retain(|e| !e.is_off_screen());

    // ── 4. Boss & mothership ─────────────────────────────────────────────────
    spawn_boss(state);
    if let Some(boss) = state.boss.as_mut() {
        boss.update();
        let shots = boss.shoot();
        if !shots.is_empty() {
            audio.play_cue(Cue::EnemyShoot);
        }
        state.enemy_bullets.extend(shots);
    }
    if let Some(mothership) = state.mothership.as_mut() {
        mothership.update();
        let shots = mothership.shoot();
        if !shots.is_empty() {
            audio.play_cue(Cue::EnemyShoot);
        }
        state.enemy_bullets.extend(shots);
    }
    spawn_mothership(state, rng, audio);

    // ── 5. Power-ups & effects ───────────────────────────────────────────────
    if state.mothership.is_none() {
        spawn_power_ups(state, rng);
    }
    for power_up in &mut state.power_ups {
        power_up.update();
    }
    state.power_ups.retain(|p| !p.is_off_screen());

    for particle in &mut state.particles {
        particle.update();
    }
    state.particles.retain(Particle::is_alive);

    for notification in &mut state.notifications {
        notification.update();
    }
    state.notifications.retain(Notification::is_alive);

    // ── 6. Collisions ────────────────────────────────────────────────────────
    handle_collisions(state, rng, audio);
}

// ── Spawn policies ───────────────────────────────────────────────────────────

fn spawn_enemies(state: &mut Session, rng: &mut impl Rng) {
    state.enemy_spawn_timer.advance();
    let interval = enemy_spawn_interval(state.level, state.difficulty.multiplier());
    if !state.enemy_spawn_timer.exceeds(interval) {
        return;
    }
    state.enemy_spawn_timer.reset();

    // Basic is twice as likely as either of the others.
    let kinds = [EnemyKind::Basic, EnemyKind::Basic, EnemyKind::Heavy, EnemyKind::Fast];
    let kind = *kinds.choose(rng).unwrap_or(&EnemyKind::Basic);
    let x = rng.gen_range(SPAWN_MARGIN..=GAME_AREA_WIDTH - SPAWN_MARGIN);
    state.enemies.push(Enemy::new(Vec2::new(x, ENEMY_SPAWN_Y), kind));
}

fn spawn_boss(state: &mut Session) {
    let clear_sky = state.enemies.is_empty() && state.boss.is_none() && state.mothership.is_none();
    if clear_sky && state.level_timer.exceeds(BOSS_LEVEL_FRAMES) {
        tracing::info!(level = state.level, "boss spawned");
        state.boss = Some(Boss::new(top_center()));
    }
}

/// One-shot: the first frame the score reaches the threshold, wipe the field
/// and bring in the mothership.
fn spawn_mothership(state: &mut Session, rng: &mut impl Rng, audio: &mut impl AudioSink) {
    if state.mothership_spawned || state.mothership.is_some() || state.score < MOTHERSHIP_SCORE {
        return;
    }

    let doomed: Vec<(Vec2, Rgb)> = state
        .enemies
        .iter()
        .map(|e| (e.pos, Rgb::ORANGE))
        .chain(state.boss.iter().map(|b| (b.pos, Rgb::YELLOW)))
        .collect();
    for (pos, color) in doomed {
        create_explosion(&mut state.particles, pos, color, rng, audio);
    }

    state.enemies.clear();
    state.boss = None;
    state.enemy_bullets.clear();
    state.power_ups.clear();

    state.mothership = Some(Mothership::new(top_center()));
    state.mothership_spawned = true;
    audio.play_cue(Cue::MothershipSpawn);
    state.particles.extend(burst(
        Vec2::new(GAME_AREA_WIDTH / 2.0, 100.0),
        &[Rgb::GREEN],
        50,
        5.0..15.0,
        rng,
    ));
    state
        .notifications
        .push(Notification::new(NotificationKind::MothershipSpawned, screen_center()));
    tracing::info!(score = state.score, "mothership spawned");
}

fn spawn_power_ups(state: &mut Session, rng: &mut impl Rng) {
    state.power_up_spawn_timer.advance();
    if !state
        .power_up_spawn_timer
        .exceeds(state.difficulty.power_up_interval())
    {
        return;
    }
    state.power_up_spawn_timer.reset();

    if rng.gen_bool(POWER_UP_SPAWN_CHANCE) {
        let kind = *PowerUpKind::ALL.choose(rng).unwrap_or(&PowerUpKind::Heal);
        let x = rng.gen_range(SPAWN_MARGIN..=GAME_AREA_WIDTH - SPAWN_MARGIN);
        state.power_ups.push(PowerUp::new(Vec2::new(x, POWER_UP_SPAWN_Y), kind));
    }
}

fn create_explosion(
    particles: &mut Vec<Particle>,
    pos: Vec2,
    color: Rgb,
    rng: &mut impl Rng,
    audio: &mut impl AudioSink,
) {
    audio.play_cue(Cue::Explosion);
    particles.extend(burst(pos, &[color], 20, 3.0..12.0, rng));
}

// ── Collisions ───────────────────────────────────────────────────────────────

/// Drop every item whose flag is set, keeping order.
fn compact<T>(items: &mut Vec<T>, removed: &[bool]) {
    let mut index = 0;
    items.retain(|_| {
        let keep = !removed[index];
        index += 1;
        keep
    });
}

fn handle_collisions(state: &mut Session, rng: &mut impl Rng, audio: &mut impl AudioSink) {
    let mult = state.difficulty.multiplier();

    // ── 1. Player bullets ↔ enemies ──────────────────────────────────────────
    // Each bullet hits at most the first live enemy it overlaps.
    let mut spent = vec![false; state.player_bullets.len()];
    let mut destroyed = vec![false; state.enemies.len()];
    let mut blasts: Vec<Vec2> = Vec::new();

    for (bi, bullet) in state.player_bullets.iter().enumerate() {
        let rect = bullet.rect();
        let target = state
            .enemies
            .iter()
            .enumerate()
            .find(|(ei, enemy)| !destroyed[*ei] && rect.intersects(&enemy.bounds()))
            .map(|(ei, _)| ei);
        let Some(ei) = target else {
            continue;
        };

        spent[bi] = true;
        if state.enemies[ei].take_damage(bullet.damage) {
            destroyed[ei] = true;
            state.score += kill_score(state.level, mult);
            blasts.push(state.enemies[ei].pos);
        }
    }
    compact(&mut state.player_bullets, &spent);
    compact(&mut state.enemies, &destroyed);
    for pos in blasts {
        create_explosion(&mut state.particles, pos, Rgb::ORANGE, rng, audio);
    }

    // ── 2. Player bullets ↔ boss ─────────────────────────────────────────────
    // Every overlapping bullet lands until the boss goes down.
    let mut boss_down = None;
    if let Some(boss) = state.boss.as_mut() {
        let mut spent = vec![false; state.player_bullets.len()];
        for (bi, bullet) in state.player_bullets.iter().enumerate() {
            if !bullet.rect().intersects(&boss.bounds()) {
                continue;
            }
            spent[bi] = true;
            audio.play_cue(Cue::BossHit);
            if boss.take_damage(bullet.damage) {
                boss_down = Some(boss.pos);
                break;
            }
        }
        compact(&mut state.player_bullets, &spent);
    }
    if let Some(pos) = boss_down {
        state.score += boss_score(mult);
        create_explosion(&mut state.particles, pos, Rgb::YELLOW, rng, audio);
        state.boss = None;
        state.level += 1;
        state.level_timer.reset();
        tracing::info!(level = state.level, score = state.score, "boss destroyed");
    }

    // ── 3. Player bullets ↔ mothership ───────────────────────────────────────
    // Only the first overlapping bullet counts each frame.
    let mut mothership_down = None;
    if let Some(mothership) = state.mothership.as_mut() {
        let hit = state
            .player_bullets
            .iter()
            .position(|b| b.rect().intersects(&mothership.bounds()));
        if let Some(bi) = hit {
            let bullet = state.player_bullets.remove(bi);
            audio.play_cue(Cue::BossHit);
            if mothership.take_damage(bullet.damage) {
                mothership_down = Some(mothership.pos);
            }
        }
    }
    if let Some(pos) = mothership_down {
        destroy_mothership(state, pos, rng, audio);
    }

    // ── 4. Enemy bullets ↔ player ────────────────────────────────────────────
    let player_rect = state.player.bounds();
    let mut spent = vec![false; state.enemy_bullets.len()];
    let mut player_down = false;
    for (bi, bullet) in state.enemy_bullets.iter().enumerate() {
        if !bullet.rect().intersects(&player_rect) {
            continue;
        }
        spent[bi] = true;
        if state.player.take_damage(bullet.damage) {
            player_down = true;
            break;
        }
    }
    compact(&mut state.enemy_bullets, &spent);
    if player_down {
        // A dead player collects nothing.
        end_session(state, audio);
        return;
    }

    // ── 5. Power-ups ↔ player ────────────────────────────────────────────────
    let mut collected = Vec::new();
    state.power_ups.retain(|p| {
        let touching = p.rect().intersects(&player_rect);
        if touching {
            collected.push(p.kind);
        }
        !touching
    });
    for kind in collected {
        state.player.apply_power_up(kind, audio);
        state.score += POWER_UP_PICKUP_SCORE;
        let above = Vec2::new(state.player.pos.x, state.player.pos.y - 80.0);
        state
            .notifications
            .push(Notification::new(NotificationKind::PowerUp(kind), above));
    }
}

fn destroy_mothership(
    state: &mut Session,
    pos: Vec2,
    rng: &mut impl Rng,
    audio: &mut impl AudioSink,
) {
    state.score += mothership_score(state.difficulty.multiplier());
    audio.play_cue(Cue::MothershipDestroy);
    state.particles.extend(burst(
        pos,
        &[Rgb::GREEN, Rgb::YELLOW, Rgb::WHITE],
        50,
        8.0..20.0,
        rng,
    ));
    state
        .notifications
        .push(Notification::new(NotificationKind::MothershipDestroyed, screen_center()));
    state.mothership = None;
    state.level += 2;

    for _ in 0..MOTHERSHIP_REWARD_DROPS {
        let kind = *PowerUpKind::REWARDS
            .choose(rng)
            .unwrap_or(&PowerUpKind::Ammo);
        let x = rng.gen_range(REWARD_DROP_MARGIN..=GAME_AREA_WIDTH - REWARD_DROP_MARGIN);
        state.power_ups.push(PowerUp::new(Vec2::new(x, POWER_UP_SPAWN_Y), kind));
    }
    tracing::info!(level = state.level, score = state.score, "mothership destroyed");
}

fn end_session(state: &mut Session, audio: &mut impl AudioSink) {
    state.status = GameStatus::GameOver;
    audio.play_cue(Cue::GameOver);
    if state.score > state.high_score {
        state.high_score = state.score;
    }
    tracing::info!(score = state.score, level = state.level, "game over");
}

// ── Render view ──────────────────────────────────────────────────────────────

/// Draw requests for everything on screen, back to front.
pub fn sprites(state: &Session) -> Vec<Sprite> {
    let mut out = vec![state.player.sprite()];
    out.extend(state.player_bullets.iter().map(Drawable::sprite));
    out.extend(state.enemy_bullets.iter().map(Drawable::sprite));
    out.extend(state.enemies.iter().map(Drawable::sprite));
    out.extend(state.boss.iter().map(Drawable::sprite));
    out.extend(state.mothership.iter().map(Drawable::sprite));
    out.extend(state.power_ups.iter().map(Drawable::sprite));
    out.extend(state.particles.iter().map(Drawable::sprite));
    out.extend(state.notifications.iter().map(Drawable::sprite));
    out
}
