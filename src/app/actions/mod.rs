//! Action handlers for user input
//!
//! - `analysis`: submitting a turn and applying its outcome
//! - `input`: text input handling
//! - `navigation`: transcript scrolling

mod analysis;
mod input;
mod navigation;

use crate::app::state::ModalState;
use crate::constants::PAGE_SCROLL_LINES;
use crate::input::Action;

use super::App;

impl App {
    pub(crate) fn handle_action(&mut self, action: Action) {
        match action {
            // Transcript
            Action::ScrollUp => self.scroll_up(1),
            Action::ScrollDown => self.scroll_down(1),
            Action::PageUp => self.scroll_up(PAGE_SCROLL_LINES),
            Action::PageDown => self.scroll_down(PAGE_SCROLL_LINES),
            Action::Top => self.scroll_to_top(),
            Action::Bottom => self.scroll_to_bottom(),

            // Input
            Action::Submit => self.submit(),
            Action::ClearInput => self.state.input.clear(),

            // General
            Action::DismissError => {
                if self.state.modal.is_help() {
                    self.state.modal = ModalState::None;
                } else {
                    self.state.conversation.dismiss_error();
                }
            }
            Action::Help => self.toggle_help(),
            Action::Quit => {} // Handled in event loop
        }
    }

    fn toggle_help(&mut self) {
        self.state.modal = if self.state.modal.is_help() {
            ModalState::None
        } else {
            ModalState::Help {
                keybindings: self.bindings.all_bindings(),
            }
        };
    }
}
