use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorCommand {
    SelectRoi,
    ToggleActuation,
    Quit,
}

pub const HELP: &str = "keys: r/enter select ROI, t/space toggle actuation, q/esc/ctrl+c quit";

/// Reads terminal keys on a dedicated thread until quit is pressed, the
/// terminal is unavailable, or the receiver is dropped.
pub fn spawn_input_loop(tx: mpsc::Sender<OperatorCommand>) {
    thread::spawn(move || input_loop(tx));
}

fn input_loop(tx: mpsc::Sender<OperatorCommand>) {
    let _raw_mode = RawModeGuard::new();
    while !tx.is_closed() {
        match event::poll(POLL_INTERVAL) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(err) => {
                tracing::debug!("operator input unavailable: {}", err);
                break;
            }
        }
        let key = match event::read() {
            Ok(Event::Key(key)) => key,
            Ok(_) => continue,
            Err(err) => {
                tracing::debug!("operator input unavailable: {}", err);
                break;
            }
        };
        let Some(command) = map_key(key) else {
            continue;
        };
        if tx.blocking_send(command).is_err() || command == OperatorCommand::Quit {
            break;
        }
    }
}

pub fn map_key(key: KeyEvent) -> Option<OperatorCommand> {
    if !matches!(key.kind, KeyEventKind::Press) {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(OperatorCommand::Quit)
        }
        KeyCode::Char('r') | KeyCode::Enter => Some(OperatorCommand::SelectRoi),
        KeyCode::Char('t') | KeyCode::Char(' ') => Some(OperatorCommand::ToggleActuation),
        KeyCode::Char('q') | KeyCode::Esc => Some(OperatorCommand::Quit),
        _ => None,
    }
}

struct RawModeGuard;

impl RawModeGuard {
    fn new() -> Self {
        let _ = terminal::enable_raw_mode();
        Self
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
