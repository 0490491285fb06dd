//! Transcript scrolling

use super::super::App;

impl App {
    pub(crate) fn scroll_up(&mut self, lines: usize) {
        self.state.transcript.scroll_up(lines);
    }

    pub(crate) fn scroll_down(&mut self, lines: usize) {
        self.state.transcript.scroll_down(lines);
    }

    pub(crate) fn scroll_to_top(&mut self) {
        self.state.transcript.scroll_to_top();
    }

    pub(crate) fn scroll_to_bottom(&mut self) {
        self.state.transcript.snap_to_bottom();
    }

    /// Clamp the scroll offset against the transcript height for the current terminal size
    pub(crate) fn clamp_scroll(&mut self, width: u16, height: u16) {
        let max = crate::ui::max_transcript_scroll(&self.state, width, height);
        self.state.transcript.clamp(max);
    }
}
