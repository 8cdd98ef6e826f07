use crate::error::HistoryError;
use crate::history::{HistoryCache, Removal};
use crossterm::event::KeyCode;
use ratatui::widgets::ListState;

pub enum Outcome {
    /// The chosen configuration, already moved to the front of the history.
    Selected(String),
    Quit,
}

pub struct Input<'a> {
    pub key: KeyCode,
    pub selected: &'a mut usize,
    pub list_state: &'a mut ListState,
    pub history: &'a mut HistoryCache,
    pub status: &'a mut String,
    pub vim_motion: bool,
}

pub fn handle_input(input: &mut Input) -> Option<Outcome> {
    let Input {
        key,
        selected,
        list_state,
        history,
        status,
        vim_motion,
    } = input;

    let selected = &mut **selected;
    let len = history.len();

    match key {
        // Navigation
        KeyCode::Down => move_down(selected, len, 1),
        KeyCode::Up => move_up(selected, 1),
        KeyCode::Char('j') if *vim_motion => move_down(selected, len, 1),
        KeyCode::Char('k') if *vim_motion => move_up(selected, 1),
        KeyCode::PageDown => move_down(selected, len, 5),
        KeyCode::PageUp => move_up(selected, 5),

        // Remove selected entry
        KeyCode::Char('d') => {
            **status = match history.clear_element(*selected + 1) {
                Ok(Removal::Removed(path)) => format!("Removed {path}"),
                Ok(Removal::EmptyList) => "History is empty".to_string(),
                Err(e) => e.to_string(),
            };
        }

        // Clear everything
        KeyCode::Char('c') => {
            **status = match history.clear_all() {
                Ok(()) => "History cleared".to_string(),
                Err(e) => e.to_string(),
            };
        }

        // Reload from disk
        KeyCode::Char('r') => {
            **status = match history.refresh() {
                Ok(()) => format!("Reloaded {} entries", history.len()),
                Err(e) => e.to_string(),
            };
        }

        // Select item
        KeyCode::Enter if len > 0 => match promote(history, *selected + 1) {
            Ok(path) => return Some(Outcome::Selected(path)),
            Err(e) => **status = e.to_string(),
        },

        // Quit
        KeyCode::Esc | KeyCode::Char('q') => return Some(Outcome::Quit),

        _ => {}
    }

    // Keep the cursor on a live row after removals.
    let len = history.len();
    if len == 0 {
        *selected = 0;
        list_state.select(None);
    } else {
        *selected = (*selected).min(len - 1);
        list_state.select(Some(*selected));
    }

    None
}

fn move_down(selected: &mut usize, len: usize, step: usize) {
    *selected = (*selected + step).min(len.saturating_sub(1));
}

fn move_up(selected: &mut usize, step: usize) {
    *selected = selected.saturating_sub(step);
}

// Moves the entry at `index` to the front. The copy is written before the old
// position is removed, so a failed write never drops the path from the file.
fn promote(history: &mut HistoryCache, index: usize) -> Result<String, HistoryError> {
    let Some(path) = history.get(index)? else {
        return Err(HistoryError::IndexOutOfRange { index, len: 0 });
    };
    history.set(&path)?;
    history.clear_element(index + 1)?;
    Ok(path)
}
