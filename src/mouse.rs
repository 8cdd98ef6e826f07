use crossterm::event::{MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::widgets::ListState;

pub struct MouseInput<'a> {
    pub me: MouseEvent,
    pub selected: &'a mut usize,
    pub list_state: &'a mut ListState,
    pub len: usize,
    pub list_area: &'a Rect,
}

pub fn handle_mouse(input: &mut MouseInput) {
    let MouseInput {
        me,
        selected,
        list_state,
        len,
        list_area,
    } = input;

    let selected = &mut **selected;

    match me.kind {
        // Click inside the list, below the top border
        MouseEventKind::Down(_) => {
            if me.column > list_area.x
                && me.column < list_area.x + list_area.width
                && me.row > list_area.y
                && me.row < list_area.y + list_area.height
            {
                let index = (me.row - list_area.y - 1) as usize + list_state.offset();
                if index < *len {
                    *selected = index;
                    list_state.select(Some(*selected));
                }
            }
        }

        MouseEventKind::ScrollUp => {
            if *selected > 0 {
                *selected -= 1;
                list_state.select(Some(*selected));
            }
        }
        MouseEventKind::ScrollDown => {
            if *selected < len.saturating_sub(1) {
                *selected += 1;
                list_state.select(Some(*selected));
            }
        }

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton};

    fn event(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn apply(me: MouseEvent, selected: &mut usize, len: usize) {
        let mut list_state = ListState::default();
        let area = Rect::new(0, 0, 20, 10);
        handle_mouse(&mut MouseInput {
            me,
            selected,
            list_state: &mut list_state,
            len,
            list_area: &area,
        });
    }

    #[test]
    fn click_selects_row_under_cursor() {
        let mut selected = 0;
        apply(event(MouseEventKind::Down(MouseButton::Left), 5, 3), &mut selected, 4);
        assert_eq!(selected, 2);

        // Past the last entry
        apply(event(MouseEventKind::Down(MouseButton::Left), 5, 8), &mut selected, 4);
        assert_eq!(selected, 2);
    }

    #[test]
    fn wheel_scrolls_within_bounds() {
        let mut selected = 0;
        apply(event(MouseEventKind::ScrollUp, 0, 0), &mut selected, 2);
        assert_eq!(selected, 0);
        for _ in 0..3 {
            apply(event(MouseEventKind::ScrollDown, 0, 0), &mut selected, 2);
        }
        assert_eq!(selected, 1);
    }
}
