//! Terminal lifecycle, frame presentation, and the input loop.
//!
//! The panel runs full-screen on the alternate screen buffer with raw mode
//! and mouse capture enabled. [`TerminalSession`] owns that state and
//! restores it on drop, so the terminal comes back usable on every exit
//! path short of an abort.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::cursor::MoveTo;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::style::Print;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute, queue};
use parking_lot::Mutex;
use tokio::time::{self, MissedTickBehavior};

use asciiwx_core::AppError;
use asciiwx_grid::{hit, CachedCellMetrics, CellMetrics, FixedCellMetrics, Grid};

use crate::coordinator::RefreshCoordinator;
use crate::screen;
use crate::sink::RenderSink;

const FRAME_INTERVAL_MS: u64 = 16;

/// Guard over raw mode, the alternate screen, mouse capture, and the hidden
/// cursor. Dropping it undoes all four in reverse order.
pub struct TerminalSession;

/// Puts the terminal into panel mode.
///
/// # Errors
///
/// Fails if raw mode or the alternate screen cannot be entered; raw mode is
/// rolled back before returning.
pub fn init() -> Result<TerminalSession, AppError> {
    enable_raw_mode().map_err(|err| AppError::Terminal(format!("enter raw mode: {err}")))?;
    if let Err(err) = execute!(
        io::stdout(),
        EnterAlternateScreen,
        EnableMouseCapture,
        cursor::Hide
    ) {
        let _ = disable_raw_mode();
        return Err(AppError::Terminal(format!("terminal setup: {err}")));
    }
    Ok(TerminalSession)
}

fn restore() {
    let mut stdout = io::stdout();
    let _ = execute!(
        stdout,
        cursor::Show,
        DisableMouseCapture,
        LeaveAlternateScreen
    );
    let _ = disable_raw_mode();
    let _ = stdout.flush();
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore();
    }
}

/// Writes frames to stdout, one positioned line at a time.
pub struct TerminalSink {
    stdout: Mutex<Stdout>,
}

impl TerminalSink {
    pub fn new() -> Self {
        Self {
            stdout: Mutex::new(io::stdout()),
        }
    }
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSink for TerminalSink {
    fn present(&self, frame: &Grid) {
        let mut out = self.stdout.lock();
        if let Err(err) = draw(&mut out, frame) {
            tracing::warn!("Failed to draw frame: {}", err);
        }
    }
}

fn draw(out: &mut Stdout, frame: &Grid) -> io::Result<()> {
    let geometry = frame.geometry();
    let lines = frame.lines();
    if lines.len() != geometry.full_height
        || lines.iter().any(|line| line.chars().count() != geometry.full_width)
    {
        tracing::warn!(
            "Frame deviates from its declared {}x{} geometry",
            geometry.full_width,
            geometry.full_height
        );
    }
    if let Ok((cols, rows)) = crossterm::terminal::size() {
        if (cols as usize) < geometry.full_width || (rows as usize) < geometry.full_height {
            tracing::debug!(
                "Terminal {}x{} is smaller than the {}x{} frame",
                cols,
                rows,
                geometry.full_width,
                geometry.full_height
            );
        }
    }
    for (row, line) in lines.iter().enumerate() {
        queue!(out, MoveTo(0, row as u16), Print(line))?;
    }
    out.flush()
}

/// Polls input on a fixed cadence and drives the coordinator.
pub struct EventLoop {
    coordinator: RefreshCoordinator,
    auto_refresh: Option<Duration>,
    cell: CachedCellMetrics<FixedCellMetrics>,
}

impl EventLoop {
    /// `auto_refresh` of `None` disables the periodic refresh tick.
    ///
    /// Terminal mouse reporting is already cell-addressed, so the cell
    /// metrics are fixed at one unit per cell and cached for the life of
    /// the loop.
    pub fn new(coordinator: RefreshCoordinator, auto_refresh: Option<Duration>) -> Self {
        Self {
            coordinator,
            auto_refresh,
            cell: CachedCellMetrics::new(FixedCellMetrics(CellMetrics::UNIT)),
        }
    }

    /// Runs until the user quits. Input is polled every frame interval;
    /// the automatic refresh, when enabled, first fires one full period
    /// after startup since the caller has already kicked off a refresh.
    pub async fn run(self) -> Result<()> {
        let mut auto = self.auto_refresh.map(|every| {
            let mut interval = time::interval_at(time::Instant::now() + every, every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval
        });

        loop {
            tokio::select! {
                _ = time::sleep(Duration::from_millis(FRAME_INTERVAL_MS)) => {
                    if self.handle_input_tick()? {
                        break;
                    }
                }
                _ = next_auto_tick(auto.as_mut()) => {
                    tracing::debug!("Automatic refresh tick");
                    self.coordinator.refresh();
                }
            }
        }
        Ok(())
    }

    /// Drains at most one pending terminal event. Returns `Ok(true)` to
    /// quit.
    fn handle_input_tick(&self) -> Result<bool> {
        if !event::poll(Duration::from_millis(0))? {
            return Ok(false);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(self.handle_key_press(key)),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                Ok(false)
            }
            Event::Resize(_, _) => {
                self.coordinator.repaint();
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    fn handle_key_press(&self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
            // [L] re-runs the same locate-then-fetch pipeline as [R].
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Char('l') | KeyCode::Char('L') => {
                self.coordinator.refresh();
                false
            }
            _ => false,
        }
    }

    fn handle_mouse(&self, mouse: MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return;
        }
        let Some(metrics) = self.cell.get() else {
            return;
        };
        let frame = self.coordinator.last_frame();
        let (x, y) = (f64::from(mouse.column), f64::from(mouse.row));
        if hit(&frame, &screen::REFRESH_CONTROL, metrics, x, y) {
            tracing::debug!("Refresh control clicked at {}, {}", mouse.column, mouse.row);
            self.coordinator.refresh();
        }
    }
}

async fn next_auto_tick(interval: Option<&mut time::Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
