use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

/// Handle a single key input event.
pub fn handle_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // ── Quit ──
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }

        // ── Freeze the label ──
        KeyCode::Char('p') | KeyCode::Char('z') | KeyCode::Char('Z') => app.toggle_pause(),

        // ── Start the window over ──
        KeyCode::Char('r') => app.reset_requested = true,

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetLabelConfig;

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        handle_input(app, KeyEvent::new(code, modifiers));
    }

    #[test]
    fn quit_keys() {
        for (code, modifiers) in [
            (KeyCode::Char('q'), KeyModifiers::NONE),
            (KeyCode::Esc, KeyModifiers::NONE),
            (KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = App::new(&NetLabelConfig::default());
            press(&mut app, code, modifiers);
            assert!(app.should_quit);
        }
    }

    #[test]
    fn plain_c_does_not_quit() {
        let mut app = App::new(&NetLabelConfig::default());
        press(&mut app, KeyCode::Char('c'), KeyModifiers::NONE);
        assert!(!app.should_quit);
    }

    #[test]
    fn pause_toggles_and_reset_is_requested() {
        let mut app = App::new(&NetLabelConfig::default());
        press(&mut app, KeyCode::Char('p'), KeyModifiers::NONE);
        assert!(app.paused);
        press(&mut app, KeyCode::Char('z'), KeyModifiers::NONE);
        assert!(!app.paused);
        press(&mut app, KeyCode::Char('r'), KeyModifiers::NONE);
        assert!(app.reset_requested);
    }
}
