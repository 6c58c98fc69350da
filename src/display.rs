//! Rendering layer: all terminal I/O lives here.
//!
//! The core hands over sprites in world coordinates (a 900×900 game area);
//! this module squeezes them onto the terminal grid, leaving a side panel
//! on the right for ammo, power-ups and the encounter status.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use galactic_defense::compute::{mothership_countdown, sprites, Session};
use galactic_defense::config::{
    Difficulty, GAME_AREA_WIDTH, INFO_PANEL_WIDTH, POWER_UP_DURATION, RELOAD_FRAMES,
    SCREEN_HEIGHT,
};
use galactic_defense::entities::mothership::MOTHERSHIP_HEALTH;
use galactic_defense::entities::player::VARIANT_SHIELD;
use galactic_defense::entities::{Damageable, EnemyKind, PowerUpKind, Rgb, Sprite, SpriteKind};
use galactic_defense::state::{App, Screen};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;
const C_TITLE: Color = Color::Cyan;
const C_WARNING: Color = Color::Green;

/// Minimum width of the side panel in columns.
const PANEL_COLS: u16 = 26;

fn rgb(c: Rgb) -> Color {
    Color::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

/// Terminal cells reserved for the game area, inside the border.
#[derive(Clone, Copy)]
struct Viewport {
    left: u16,
    top: u16,
    cols: u16,
    rows: u16,
    width: u16,
    height: u16,
}

impl Viewport {
    fn new(width: u16, height: u16) -> Self {
        let share = INFO_PANEL_WIDTH / (GAME_AREA_WIDTH + INFO_PANEL_WIDTH);
        let panel = ((width as f32 * share) as u16).max(PANEL_COLS);
        Self {
            left: 1,
            top: 2,
            cols: width.saturating_sub(panel + 2).max(1),
            rows: height.saturating_sub(4).max(1),
            width,
            height,
        }
    }

    /// Terminal cell for a world position, or `None` if it lies off screen.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if !(0.0..GAME_AREA_WIDTH).contains(&x) || !(0.0..SCREEN_HEIGHT).contains(&y) {
            return None;
        }
        let col = (x / GAME_AREA_WIDTH * self.cols as f32) as u16;
        let row = (y / SCREEN_HEIGHT * self.rows as f32) as u16;
        Some((self.left + col, self.top + row))
    }

    fn panel_left(&self) -> u16 {
        self.left + self.cols + 2
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame for whatever screen the app is on.
pub fn render<W: Write>(out: &mut W, app: &App) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let view = Viewport::new(width, height);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match (app.screen, app.session.as_ref()) {
        (Screen::Menu, _) => draw_menu(out, &view, app.high_score)?,
        (Screen::DifficultySelect, _) => draw_difficulty(out, &view, app.selected)?,
        (Screen::Playing, Some(session)) => draw_game(out, &view, session)?,
        (Screen::Paused, Some(session)) => {
            draw_game(out, &view, session)?;
            draw_banner(out, &view, &[("PAUSED", Color::Yellow)], "P - Resume   M - Menu")?;
        }
        (Screen::GameOver, Some(session)) => {
            draw_game(out, &view, session)?;
            draw_game_over(out, &view, session, app.high_score)?;
        }
        (_, None) => draw_menu(out, &view, app.high_score)?,
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn centered<W: Write>(
    out: &mut W,
    view: &Viewport,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (view.width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Menus ─────────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, view: &Viewport, high_score: u32) -> std::io::Result<()> {
    let cy = view.height / 2;
    centered(out, view, cy.saturating_sub(6), "★  GALACTIC  DEFENSE  ★", C_TITLE)?;
    centered(out, view, cy.saturating_sub(5), "S H O O T E R", C_TITLE)?;
    centered(out, view, cy.saturating_sub(2), "/▲\\", Color::Cyan)?;
    if high_score > 0 {
        let hs = format!("High Score: {high_score}");
        centered(out, view, cy, &hs, Color::Yellow)?;
    }
    centered(out, view, cy + 2, "SPACE - Select Difficulty", C_HUD)?;
    centered(out, view, cy + 3, "Q - Quit", C_HUD)?;
    Ok(())
}

fn draw_difficulty<W: Write>(
    out: &mut W,
    view: &Viewport,
    selected: Difficulty,
) -> std::io::Result<()> {
    let cy = view.height / 2;
    centered(out, view, cy.saturating_sub(6), "SELECT DIFFICULTY", C_TITLE)?;

    for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
        let color = match difficulty {
            Difficulty::Easy => Color::Green,
            Difficulty::Normal => Color::Yellow,
            Difficulty::Hard => Color::Red,
        };
        let marker = if *difficulty == selected { "▶" } else { " " };
        let line = format!(
            "{marker} [{}] {:<6} {}",
            i + 1,
            difficulty.name().to_uppercase(),
            difficulty.blurb()
        );
        let row = cy.saturating_sub(3) + i as u16 * 2;
        let color = if *difficulty == selected { color } else { C_HINT };
        centered(out, view, row, &line, color)?;
    }

    centered(out, view, cy + 4, "1/2/3 - Choose   ENTER - Start   ESC - Back", C_HINT)?;
    Ok(())
}

// ── Play field ────────────────────────────────────────────────────────────────

fn draw_game<W: Write>(out: &mut W, view: &Viewport, session: &Session) -> std::io::Result<()> {
    draw_border(out, view)?;
    draw_hud(out, view, session)?;

    for sprite in sprites(session) {
        draw_sprite(out, view, &sprite)?;
    }

    draw_panel(out, view, session)?;

    if let Some(points) = mothership_countdown(session) {
        let warning = format!("MOTHERSHIP IN {points} PTS!");
        let col = view.left + (view.cols / 2).saturating_sub(warning.len() as u16 / 2);
        out.queue(cursor::MoveTo(col, view.top + 2))?;
        out.queue(style::SetForegroundColor(C_WARNING))?;
        out.queue(Print(&warning))?;
    }
    Ok(())
}

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let inner = view.cols as usize;
    let right = view.left + view.cols;
    let bottom = view.top + view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(0, view.top - 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(inner))))?;
    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(inner))))?;
    for row in view.top..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(right, row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

fn draw_hud<W: Write>(out: &mut W, view: &Viewport, session: &Session) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "Score:{:>6}  Hi:{:>6}  Level:{:>2}  [{}]",
        session.score,
        session.high_score.max(session.score),
        session.level,
        session.difficulty.name().to_uppercase()
    )))?;

    let player = &session.player;
    let hearts: String = (0..player.max_health())
        .map(|i| if i < player.health() { '♥' } else { '♡' })
        .collect();
    let col = (view.left + view.cols).saturating_sub(hearts.chars().count() as u16);
    out.queue(cursor::MoveTo(col, 0))?;
    out.queue(style::SetForegroundColor(Color::Green))?;
    out.queue(Print(hearts))?;
    Ok(())
}

fn draw_sprite<W: Write>(out: &mut W, view: &Viewport, sprite: &Sprite) -> std::io::Result<()> {
    let glyph: String = match sprite.kind {
        SpriteKind::Player if sprite.variant & VARIANT_SHIELD != 0 => "(▲)".into(),
        SpriteKind::Player => "/▲\\".into(),
        SpriteKind::Enemy(EnemyKind::Basic) => "«▼»".into(),
        SpriteKind::Enemy(EnemyKind::Heavy) => "[▼]".into(),
        SpriteKind::Enemy(EnemyKind::Fast) => "<v>".into(),
        SpriteKind::Boss => match sprite.variant {
            1 => "<[=O=]>".into(),
            2 => "<<[=O=]>>".into(),
            _ => "<<<[#O#]>>>".into(),
        },
        SpriteKind::Mothership => match sprite.variant {
            1 => "(≡≡◎≡≡)".into(),
            2 => "•(≡≡◎≡≡)•".into(),
            _ => "•(≡≡◉≡≡)•".into(),
        },
        SpriteKind::Projectile if sprite.variant == 0 => "║".into(),
        SpriteKind::Projectile => "↓".into(),
        SpriteKind::PowerUp(kind) => match kind {
            PowerUpKind::TripleShot => "★".into(),
            PowerUpKind::Shield => "◈".into(),
            PowerUpKind::Heal => "♥".into(),
            PowerUpKind::Speed => "»".into(),
            PowerUpKind::Ammo => "≡".into(),
        },
        SpriteKind::Particle if sprite.scale > 0.5 => "*".into(),
        SpriteKind::Particle => "·".into(),
        SpriteKind::Notification(kind) if sprite.scale > 0.0 => kind.message().into(),
        SpriteKind::Notification(_) => return Ok(()),
    };

    let Some((col, row)) = view.cell(sprite.pos.x, sprite.pos.y) else {
        return Ok(());
    };
    let half = glyph.chars().count() as u16 / 2;
    let max_col = (view.left + view.cols).saturating_sub(glyph.chars().count() as u16);
    let col = col.saturating_sub(half).clamp(view.left, max_col.max(view.left));

    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(rgb(sprite.color)))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Info panel ────────────────────────────────────────────────────────────────

fn bar(filled: f32, width: usize) -> String {
    let full = ((filled.clamp(0.0, 1.0)) * width as f32).round() as usize;
    format!("{}{}", "█".repeat(full), "░".repeat(width - full))
}

/// Writes successive lines down the side panel.
struct Panel {
    left: u16,
    row: u16,
}

impl Panel {
    fn line<W: Write>(&mut self, out: &mut W, text: &str, color: Color) -> std::io::Result<()> {
        out.queue(cursor::MoveTo(self.left, self.row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(text))?;
        self.row += 1;
        Ok(())
    }
}

fn draw_panel<W: Write>(out: &mut W, view: &Viewport, session: &Session) -> std::io::Result<()> {
    let mut panel = Panel {
        left: view.panel_left(),
        row: view.top,
    };

    let player = &session.player;
    panel.line(out, "AMMO", C_HUD)?;
    if player.is_reloading() {
        let progress = 1.0 - player.reload_remaining() as f32 / RELOAD_FRAMES as f32;
        panel.line(out, &bar(progress, 20), Color::Yellow)?;
        panel.line(out, "RELOADING...", Color::Yellow)?;
    } else {
        let ratio = player.ammo as f32 / player.max_ammo().max(1) as f32;
        let color = if ratio > 0.5 {
            Color::Green
        } else if ratio > 0.2 {
            Color::DarkYellow
        } else {
            Color::Red
        };
        panel.line(out, &bar(ratio, 20), color)?;
        panel.line(out, &format!("{}/{}", player.ammo, player.max_ammo()), C_HUD)?;
    }
    if player.shows_no_ammo() {
        panel.line(out, "NO AMMO!", Color::Red)?;
    } else {
        panel.row += 1;
    }

    panel.line(out, "POWER-UPS", C_HUD)?;
    for (kind, label) in [
        (PowerUpKind::TripleShot, "Triple"),
        (PowerUpKind::Shield, "Shield"),
        (PowerUpKind::Speed, "Speed "),
    ] {
        let frames_left = player.power_up_remaining(kind);
        let color = if frames_left > 0 { rgb(kind.color()) } else { C_HINT };
        let fill = frames_left as f32 / POWER_UP_DURATION as f32;
        panel.line(out, &format!("{label} {}", bar(fill, 12)), color)?;
    }
    panel.row += 1;

    if let Some(boss) = &session.boss {
        panel.line(out, &format!("BOSS  phase {}", boss.phase()), Color::Yellow)?;
        let fill = boss.health() as f32 / boss.max_health() as f32;
        panel.line(out, &bar(fill, 20), Color::Yellow)?;
    }
    if let Some(mothership) = &session.mothership {
        let label = format!("MOTHERSHIP {}/{}", mothership.health().max(0), MOTHERSHIP_HEALTH);
        panel.line(out, &label, Color::Green)?;
        let fill = mothership.health() as f32 / MOTHERSHIP_HEALTH as f32;
        panel.line(out, &bar(fill, 20), Color::Green)?;
    }

    panel.row = view.top + view.rows.saturating_sub(4);
    panel.line(out, "CONTROLS", C_HUD)?;
    panel.line(out, "Arrows/WASD: Move", C_HINT)?;
    panel.line(out, "SPACE: Shoot", C_HINT)?;
    panel.line(out, "P: Pause  Q: Quit", C_HINT)?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    view: &Viewport,
    lines: &[(&str, Color)],
    hint: &str,
) -> std::io::Result<()> {
    let start = (view.height / 2).saturating_sub(lines.len() as u16 / 2 + 1);
    for (i, (text, color)) in lines.iter().enumerate() {
        centered(out, view, start + i as u16, text, *color)?;
    }
    centered(out, view, start + lines.len() as u16 + 1, hint, C_HUD)?;
    Ok(())
}

fn draw_game_over<W: Write>(
    out: &mut W,
    view: &Viewport,
    session: &Session,
    high_score: u32,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", session.score);
    let level_line = format!("Level Reached: {:>4}", session.level);
    let new_best = session.score >= high_score && session.score > 0;
    let best_line = if new_best {
        format!("★ NEW BEST: {:>6} ★", high_score)
    } else {
        format!("Best Score:  {:>6}", high_score)
    };
    let best_color = if new_best { Color::Yellow } else { C_HINT };

    draw_banner(
        out,
        view,
        &[
            ("╔════════════════════╗", Color::Red),
            ("║    GAME  OVER      ║", Color::Red),
            ("╚════════════════════╝", Color::Red),
            (score_line.as_str(), Color::Yellow),
            (level_line.as_str(), C_HUD),
            (best_line.as_str(), best_color),
        ],
        "R - Play Again   M - Menu   Q - Quit",
    )
}
