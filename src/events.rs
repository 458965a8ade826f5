use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;

/// What the tick loop has been asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Stop the loop at the next tick boundary
    Exit,

    /// Stop or resume stepping every tick
    TogglePause,

    /// Advance a single generation while paused
    Step,

    /// Reseed the world the same way it was first seeded
    Reseed,
}

/// Converts a crossterm event into a loop event
pub fn convert_event(event: CrossTermEvent) -> Option<Event> {
    let CrossTermEvent::Key(key_event) = event else {
        return None;
    };

    // Some terminals report releases as well as presses
    if key_event.kind == KeyEventKind::Release {
        return None;
    }

    match key_event {
        KeyEvent {
            code: KeyCode::Char('q') | KeyCode::Esc,
            ..
        }
        | KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Some(Event::Exit),
        KeyEvent {
            code: KeyCode::Char(' '),
            ..
        } => Some(Event::TogglePause),
        KeyEvent {
            code: KeyCode::Char('n'),
            ..
        } => Some(Event::Step),
        KeyEvent {
            code: KeyCode::Char('r'),
            ..
        } => Some(Event::Reseed),
        _ => None,
    }
}
