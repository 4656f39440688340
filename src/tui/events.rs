use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use super::state::TuiState;

/// Handle a keyboard event, mutating TUI state and returning `true` if the loop should exit.
pub fn handle_key_event(key_event: KeyEvent, state: &mut TuiState, tabs: usize) -> bool {
    if key_event.kind != KeyEventKind::Press {
        return false;
    }

    if state.show_help {
        match key_event.code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc | KeyCode::Char('h') | KeyCode::F(1) => state.show_help = false,
            _ => {}
        }
        return false;
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('h') | KeyCode::F(1) => state.show_help = true,
        KeyCode::Char('l') => state.show_legend = !state.show_legend,
        KeyCode::Tab | KeyCode::Right => state.next_tab(tabs),
        KeyCode::BackTab | KeyCode::Left => state.previous_tab(tabs),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(layer) = c.to_digit(10) {
                state.toggle_layer(layer as usize - 1);
            }
        }
        KeyCode::Char('0') => state.hidden_layers.clear(),
        _ => {}
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn tab_cycles_through_charts() {
        let mut state = TuiState::default();
        assert!(!handle_key_event(press(KeyCode::Tab), &mut state, 3));
        assert_eq!(state.tab_index, 1);
        handle_key_event(press(KeyCode::Tab), &mut state, 3);
        handle_key_event(press(KeyCode::Tab), &mut state, 3);
        assert_eq!(state.tab_index, 0);
        handle_key_event(press(KeyCode::BackTab), &mut state, 3);
        assert_eq!(state.tab_index, 2);
    }

    #[test]
    fn digits_toggle_layers_and_tab_resets_them() {
        let mut state = TuiState::default();
        handle_key_event(press(KeyCode::Char('2')), &mut state, 2);
        assert!(state.hidden_layers.contains(&1));
        handle_key_event(press(KeyCode::Char('2')), &mut state, 2);
        assert!(state.hidden_layers.is_empty());
        handle_key_event(press(KeyCode::Char('1')), &mut state, 2);
        handle_key_event(press(KeyCode::Tab), &mut state, 2);
        assert!(state.hidden_layers.is_empty());
    }

    #[test]
    fn help_overlay_swallows_navigation() {
        let mut state = TuiState::default();
        handle_key_event(press(KeyCode::Char('h')), &mut state, 3);
        assert!(state.show_help);
        handle_key_event(press(KeyCode::Tab), &mut state, 3);
        assert_eq!(state.tab_index, 0);
        handle_key_event(press(KeyCode::Esc), &mut state, 3);
        assert!(!state.show_help);
        assert!(handle_key_event(press(KeyCode::Char('q')), &mut state, 3));
    }
}
