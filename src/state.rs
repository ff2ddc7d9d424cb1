// The two display flags and the key commands that flip them.

/// What a key press asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Quit,        // Escape (or the window was closed)
    TogglePause, // 'a'
    ToggleMode,  // 'n'
}

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeState {
    pub ascii_mode: bool, // glyph art vs plain resized color
    pub paused: bool,     // reuse the last frame instead of grabbing a new one
}

impl Default for ModeState {
    fn default() -> Self {
        Self { ascii_mode: true, paused: false }
    }
}

impl ModeState {
    /// Apply one command. Each toggle flips exactly its own flag.
    pub fn apply(&mut self, cmd: KeyCommand) -> Flow {
        match cmd {
            KeyCommand::Quit => return Flow::Quit,
            KeyCommand::TogglePause => self.paused = !self.paused,
            KeyCommand::ToggleMode => self.ascii_mode = !self.ascii_mode,
        }
        tracing::debug!(ascii_mode = self.ascii_mode, paused = self.paused, "mode changed");
        Flow::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_ascii_running() {
        let s = ModeState::default();
        assert!(s.ascii_mode);
        assert!(!s.paused);
    }

    #[test]
    fn toggling_twice_restores_state() {
        let mut s = ModeState::default();
        assert_eq!(s.apply(KeyCommand::ToggleMode), Flow::Continue);
        assert_eq!(s, ModeState { ascii_mode: false, paused: false });
        s.apply(KeyCommand::ToggleMode);
        assert_eq!(s, ModeState::default());
    }

    #[test]
    fn flags_are_independent() {
        let mut s = ModeState::default();
        s.apply(KeyCommand::TogglePause);
        assert_eq!(s, ModeState { ascii_mode: true, paused: true });
        s.apply(KeyCommand::ToggleMode);
        assert_eq!(s, ModeState { ascii_mode: false, paused: true });
        s.apply(KeyCommand::TogglePause);
        assert_eq!(s, ModeState { ascii_mode: false, paused: false });
    }

    #[test]
    fn quit_leaves_flags_alone() {
        let mut s = ModeState::default();
        assert_eq!(s.apply(KeyCommand::Quit), Flow::Quit);
        assert_eq!(s, ModeState::default());
    }
}
