/// Translation of raw terminal events into game input.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// The terminal equivalent of closing the window.
    Quit,
    PointerMoved { column: u16, row: u16 },
    /// Any mouse button went down: a shot.
    PointerPressed { column: u16, row: u16 },
    Resized { columns: u16, rows: u16 },
}

/// Map one crossterm event to a game input, or `None` if the game
/// doesn't care about it.
pub fn translate(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) => {
            if *kind == KeyEventKind::Release {
                return None;
            }
            match code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(InputEvent::Quit),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(InputEvent::Quit)
                }
                _ => None,
            }
        }
        Event::Mouse(MouseEvent {
            kind, column, row, ..
        }) => match kind {
            MouseEventKind::Down(_) => Some(InputEvent::PointerPressed {
                column: *column,
                row: *row,
            }),
            MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Up(_) => {
                Some(InputEvent::PointerMoved {
                    column: *column,
                    row: *row,
                })
            }
            _ => None,
        },
        Event::Resize(columns, rows) => Some(InputEvent::Resized {
            columns: *columns,
            rows: *rows,
        }),
        _ => None,
    }
}

/// Last known pointer cell.  Read synchronously when a shot is handled
/// and every frame to place the crosshair.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
    pub column: u16,
    pub row: u16,
}

impl Pointer {
    pub fn track(&mut self, column: u16, row: u16) {
        self.column = column;
        self.row = row;
    }
}
