/// High-level events the marquee reacts to.
///
/// A thin projection of the crossterm event stream: the component only
/// cares about pointer position (hover), viewport size, and keys the
/// host may map to actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Key press.
    Key { key: Key, modifiers: Modifiers },
    /// Pointer moved (hover tracking).
    MouseMove { x: u16, y: u16 },
    /// Terminal resized.
    Resize { width: u16, height: u16 },
}

/// Simplified key representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

/// Convert raw crossterm events into marquee events.
///
/// Events the marquee has no use for (clicks, drags, focus, paste) are
/// dropped here.
pub fn convert(raw: &[crossterm::event::Event]) -> Vec<Event> {
    use crossterm::event::{Event as CtEvent, KeyEventKind, MouseEventKind};

    let mut events = Vec::new();
    for event in raw {
        match event {
            CtEvent::Key(key) if key.kind != KeyEventKind::Release => {
                events.push(Event::Key {
                    key: key.code.into(),
                    modifiers: key.modifiers.into(),
                });
            }
            CtEvent::Mouse(mouse) => {
                if matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
                    events.push(Event::MouseMove {
                        x: mouse.column,
                        y: mouse.row,
                    });
                }
            }
            CtEvent::Resize(width, height) => {
                events.push(Event::Resize {
                    width: *width,
                    height: *height,
                });
            }
            _ => {}
        }
    }
    events
}

impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            _ => Key::Other,
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}
