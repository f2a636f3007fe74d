/// Rendering layer — all terminal I/O lives here.
///
/// The simulation works in an 800x600 world; `TerminalRenderer` collects
/// the sprites it emits during `GameSession::render`, scales them onto the
/// terminal grid and paints them together with the HUD and overlays.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_invaders::collaborators::{Renderer, Sprite};
use space_invaders::entities::{EnemyKind, PowerupKind};
use space_invaders::geometry::{BARRIER_WIDTH, ENEMY_SIZE, PLAYER_SIZE};
use space_invaders::session::{GameSession, GameStatus, Hud};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Cyan;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_PLAYER_SHIELD: Color = Color::Green;
const C_SCOUT: Color = Color::Green;
const C_FIGHTER: Color = Color::Yellow;
const C_BOMBER: Color = Color::Red;
const C_EXPLOSION: Color = Color::DarkYellow;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_BARRIER: Color = Color::DarkGreen;
const C_HINT: Color = Color::DarkGrey;
const C_POWERUP_ACTIVE: Color = Color::Yellow;

// ── Sprite collection ─────────────────────────────────────────────────────────

pub struct TerminalRenderer {
    width: u16,
    height: u16,
    world_width: f32,
    world_height: f32,
    placed: Vec<(Sprite, u16, u16)>,
}

impl TerminalRenderer {
    pub fn new(width: u16, height: u16, world_width: f32, world_height: f32) -> Self {
        TerminalRenderer {
            width,
            height,
            world_width,
            world_height,
            placed: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Play area spans columns 1..width-1 and rows 2..height-2.
    fn play_cols(&self) -> f32 {
        self.width.saturating_sub(2).max(1) as f32
    }

    fn play_rows(&self) -> f32 {
        self.height.saturating_sub(4).max(1) as f32
    }

    /// World x → cell count, for sprite widths.
    fn cells_wide(&self, world: f32) -> u16 {
        ((world / self.world_width) * self.play_cols()).round().max(1.0) as u16
    }

    fn to_cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if y < 0.0 || y >= self.world_height || x < 0.0 {
            return None;
        }
        let col = 1.0 + (x / self.world_width) * self.play_cols();
        let row = 2.0 + (y / self.world_height) * self.play_rows();
        Some((col as u16, row as u16))
    }

    /// Render one complete frame.
    pub fn present<W: Write>(&mut self, out: &mut W, session: &GameSession) -> std::io::Result<()> {
        self.placed.clear();
        session.render(self);
        let hud = session.hud();

        out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.draw_border(out)?;
        self.draw_hud(out, &hud)?;

        for &(sprite, col, row) in &self.placed {
            self.draw_placed(out, sprite, col, row)?;
        }

        self.draw_controls_hint(out)?;
        match hud.status {
            GameStatus::GameOver => self.draw_game_over(out, &hud)?,
            GameStatus::Paused => self.draw_paused(out)?,
            GameStatus::Playing => {}
        }

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, self.height.saturating_sub(1)))?;
        out.flush()?;
        Ok(())
    }
}

impl Renderer for TerminalRenderer {
    fn draw_sprite(&mut self, sprite: Sprite, x: f32, y: f32) {
        if let Some((col, row)) = self.to_cell(x, y) {
            self.placed.push((sprite, col, row));
        }
    }
}

// ── Border, HUD, hints ────────────────────────────────────────────────────────

impl TerminalRenderer {
    fn draw_border<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let w = self.width as usize;
        let h = self.height;

        out.queue(style::SetForegroundColor(C_BORDER))?;

        out.queue(cursor::MoveTo(0, 1))?;
        out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

        out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
        out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

        for row in 2..h.saturating_sub(2) {
            out.queue(cursor::MoveTo(0, row))?;
            out.queue(Print("│"))?;
            out.queue(cursor::MoveTo(self.width.saturating_sub(1), row))?;
            out.queue(Print("│"))?;
        }

        Ok(())
    }

    fn draw_hud<W: Write>(&self, out: &mut W, hud: &Hud) -> std::io::Result<()> {
        // Score and best — left
        out.queue(cursor::MoveTo(1, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        let best = hud.high_scores.first().copied().unwrap_or(0).max(hud.score);
        out.queue(Print(format!("Score:{:>6}  Hi:{:>6}", hud.score, best)))?;

        // Level — centre
        let level_str = format!("[ WAVE {} ]", hud.level.saturating_sub(1).max(1));
        let lx = (self.width / 2).saturating_sub(level_str.len() as u16 / 2);
        out.queue(cursor::MoveTo(lx, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
        out.queue(Print(&level_str))?;

        // Power-ups, dash and lives — right
        let mut tags = String::new();
        if hud.power_remaining > 0.0 {
            tags.push_str(&format!("[PWR{} {:>3}%] ", hud.power_level, percent(hud.power_remaining)));
        }
        if hud.shield_remaining > 0.0 {
            tags.push_str(&format!("[SHLD {:>3}%] ", percent(hud.shield_remaining)));
        }
        if hud.dash_ready < 1.0 {
            tags.push_str(&format!("[DASH {:>3}%] ", percent(hud.dash_ready)));
        }
        let lives_str = format!("Lives:{}", "♥".repeat(hud.lives as usize));
        let right_len = (tags.chars().count() + lives_str.chars().count()) as u16;

        out.queue(cursor::MoveTo(self.width.saturating_sub(right_len + 1), 0))?;
        if !tags.is_empty() {
            out.queue(style::SetForegroundColor(C_POWERUP_ACTIVE))?;
            out.queue(Print(&tags))?;
        }
        out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
        out.queue(Print(&lives_str))?;

        Ok(())
    }

    fn draw_controls_hint<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.queue(cursor::MoveTo(1, self.height.saturating_sub(1)))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(
            "← → / A D : Move   SPACE : Shoot   SHIFT/X : Dash   P : Pause   Q : Quit",
        ))?;
        Ok(())
    }
}

fn percent(fraction: f32) -> u32 {
    (fraction.clamp(0.0, 1.0) * 100.0).round() as u32
}

// ── Entities ──────────────────────────────────────────────────────────────────

impl TerminalRenderer {
    fn draw_placed<W: Write>(
        &self,
        out: &mut W,
        sprite: Sprite,
        col: u16,
        row: u16,
    ) -> std::io::Result<()> {
        let (glyph, color, world_w) = match sprite {
            Sprite::Player => ("/▲\\".to_string(), C_PLAYER, PLAYER_SIZE),
            Sprite::PlayerShield => {
                // Brackets hugging the ship on both sides
                let right = col + self.cells_wide(PLAYER_SIZE);
                self.put(out, col.saturating_sub(1), row, "(", C_PLAYER_SHIELD)?;
                return self.put(out, right, row, ")", C_PLAYER_SHIELD);
            }
            Sprite::Enemy(kind) => {
                let (glyph, color) = match kind {
                    EnemyKind::Scout => ("«▼»", C_SCOUT),
                    EnemyKind::Fighter => ("(◎)", C_FIGHTER),
                    EnemyKind::Bomber => ("[▓]", C_BOMBER),
                };
                (glyph.to_string(), color, ENEMY_SIZE)
            }
            Sprite::Explosion(frame) => {
                let glyph = match frame {
                    0 => "·*·",
                    1 => "*✶*",
                    _ => "✺ ✺",
                };
                (glyph.to_string(), C_EXPLOSION, ENEMY_SIZE)
            }
            Sprite::PlayerBullet => return self.put(out, col, row, "║", C_BULLET_PLAYER),
            Sprite::EnemyBullet => return self.put(out, col, row, "↓", C_BULLET_ENEMY),
            Sprite::Powerup(kind) => {
                let (glyph, color) = match kind {
                    PowerupKind::Weapon => ("★", Color::Blue),
                    PowerupKind::Shield => ("◊", Color::Green),
                    PowerupKind::Life => ("♥", Color::Magenta),
                    PowerupKind::Speed => ("»", Color::DarkMagenta),
                };
                return self.put(out, col, row, glyph, color);
            }
            Sprite::Barrier(health) => {
                let fill = match health {
                    4.. => "▓",
                    2 | 3 => "▒",
                    _ => "░",
                };
                let cells = self.cells_wide(BARRIER_WIDTH) as usize;
                (fill.repeat(cells), C_BARRIER, BARRIER_WIDTH)
            }
        };

        // Centre the glyph within the sprite's scaled footprint
        let span = self.cells_wide(world_w);
        let len = glyph.chars().count() as u16;
        let offset = span.saturating_sub(len) / 2;
        self.put(out, col + offset, row, &glyph, color)
    }

    fn put<W: Write>(
        &self,
        out: &mut W,
        col: u16,
        row: u16,
        text: &str,
        color: Color,
    ) -> std::io::Result<()> {
        let max_col = self.width.saturating_sub(1);
        let max_row = self.height.saturating_sub(2);
        if col < 1 || col >= max_col || row < 2 || row >= max_row {
            return Ok(());
        }
        let room = (max_col - col) as usize;
        let clipped: String = text.chars().take(room).collect();
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(clipped))?;
        Ok(())
    }
}

// ── Overlays ──────────────────────────────────────────────────────────────────

impl TerminalRenderer {
    fn draw_centered<W: Write>(
        &self,
        out: &mut W,
        lines: &[(String, Color)],
    ) -> std::io::Result<()> {
        let cx = self.width / 2;
        let start_row = (self.height / 2).saturating_sub(lines.len() as u16 / 2);
        for (i, (msg, color)) in lines.iter().enumerate() {
            let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
            out.queue(cursor::MoveTo(col, start_row + i as u16))?;
            out.queue(style::SetForegroundColor(*color))?;
            out.queue(Print(msg))?;
        }
        Ok(())
    }

    fn draw_game_over<W: Write>(&self, out: &mut W, hud: &Hud) -> std::io::Result<()> {
        let best = hud.high_scores.first().copied().unwrap_or(0);
        let best_line = if hud.new_high_score {
            (format!("★ NEW HIGH SCORE: {:>6} ★", hud.score), Color::Yellow)
        } else {
            (format!("Best Score:  {:>6}", best), Color::DarkGrey)
        };

        let lines = [
            ("╔════════════════════╗".to_string(), Color::Red),
            ("║    GAME  OVER      ║".to_string(), Color::Red),
            ("╚════════════════════╝".to_string(), Color::Red),
            (format!("Final Score: {:>6}", hud.score), Color::Yellow),
            best_line,
            ("R - Play Again  Q - Quit".to_string(), Color::White),
        ];
        self.draw_centered(out, &lines)
    }

    fn draw_paused<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let lines = [
            ("── PAUSED ──".to_string(), Color::White),
            ("P - Resume".to_string(), C_HINT),
        ];
        self.draw_centered(out, &lines)
    }
}
