use crate::ledger::Ledger;

/// Which transaction, if any, currently has the shell's attention. One mode is
/// active at a time and every completed or cancelled action returns to
/// `Viewing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    #[default]
    Viewing,
    Editing(u64),
    ConfirmingDelete(u64),
}

/// Shared CLI runtime state: the in-memory ledger plus interactive metadata.
pub struct CliState {
    pub ledger: Ledger,
    mode: UiMode,
}

impl CliState {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger,
            mode: UiMode::Viewing,
        }
    }

    pub fn mode(&self) -> UiMode {
        self.mode
    }

    pub fn begin_edit(&mut self, id: u64) {
        self.mode = UiMode::Editing(id);
    }

    pub fn begin_delete(&mut self, id: u64) {
        self.mode = UiMode::ConfirmingDelete(id);
    }

    pub fn reset_mode(&mut self) {
        self.mode = UiMode::Viewing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_mode_at_a_time() {
        let mut state = CliState::new(Ledger::default());
        assert_eq!(state.mode(), UiMode::Viewing);

        state.begin_edit(3);
        assert_eq!(state.mode(), UiMode::Editing(3));

        // Starting a delete replaces the edit mode outright.
        state.begin_delete(3);
        assert_eq!(state.mode(), UiMode::ConfirmingDelete(3));

        state.reset_mode();
        assert_eq!(state.mode(), UiMode::Viewing);
    }
}
