//! Text input handling (chars, paste, backspace)

use super::super::App;

impl App {
    pub(crate) fn handle_char(&mut self, c: char) {
        if self.state.modal.is_help() {
            return;
        }
        self.state.input.insert_char(c);
    }

    pub(crate) fn handle_paste(&mut self, text: &str) {
        if self.state.modal.is_help() {
            return;
        }
        self.state.input.insert_str(text);
    }

    pub(crate) fn handle_backspace(&mut self) {
        if self.state.modal.is_help() {
            return;
        }
        self.state.input.backspace();
    }
}

#[cfg(test)]
mod tests {
    use crate::app::tests::harness;
    use crate::input::Action;

    #[test]
    fn test_typing_and_paste() {
        let mut h = harness();
        h.app.handle_char('H');
        h.app.handle_char('i');
        h.app.handle_char('\n');
        h.app.handle_paste("From: x@y.z\r\n");
        h.app.handle_backspace();
        assert_eq!(h.app.state.input.text, "Hi\nFrom: x@y.z");
    }

    #[test]
    fn test_input_is_ignored_under_help() {
        let mut h = harness();
        h.app.handle_action(Action::Help);
        h.app.handle_char('x');
        h.app.handle_paste("pasted");
        assert!(h.app.state.input.text.is_empty());
    }

    #[test]
    fn test_typing_while_analyzing_is_allowed() {
        let mut h = harness();
        h.app.state.input.insert_str("first");
        h.app.submit();
        h.app.handle_char('n');
        assert_eq!(h.app.state.input.text, "n");
    }
}
