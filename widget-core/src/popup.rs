//! City-search popup: a two-state toggle that owns the search listeners.

use crate::ui::{Listener, UiAdapter};

/// Listeners that exist only while the popup is open.
pub const SEARCH_LISTENERS: [Listener; 3] =
    [Listener::InputChange, Listener::CloseClick, Listener::FormSubmit];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopupState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Default)]
pub struct Popup {
    state: PopupState,
}

impl Popup {
    pub fn state(&self) -> PopupState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == PopupState::Open
    }

    /// Flip the popup, binding search listeners on open and unbinding them
    /// on close. Returns the new state.
    pub fn toggle<U: UiAdapter + ?Sized>(&mut self, ui: &mut U) -> PopupState {
        self.state = match self.state {
            PopupState::Closed => {
                for listener in SEARCH_LISTENERS {
                    ui.bind(listener);
                }
                ui.set_popup_visible(true);
                PopupState::Open
            }
            PopupState::Open => {
                for listener in SEARCH_LISTENERS {
                    ui.unbind(listener);
                }
                ui.set_popup_visible(false);
                PopupState::Closed
            }
        };

        tracing::debug!("Search popup is now {:?}", self.state);
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::RecordingUi;

    #[test]
    fn starts_closed() {
        assert_eq!(Popup::default().state(), PopupState::Closed);
    }

    #[test]
    fn opening_binds_exactly_the_search_listeners() {
        let mut ui = RecordingUi::default();
        let mut popup = Popup::default();

        assert_eq!(popup.toggle(&mut ui), PopupState::Open);
        assert_eq!(ui.bind_calls, SEARCH_LISTENERS.to_vec());
        assert!(ui.unbind_calls.is_empty());
        assert!(ui.popup_visible);
    }

    #[test]
    fn double_toggle_returns_to_closed_with_one_action_per_toggle() {
        let mut ui = RecordingUi::default();
        let mut popup = Popup::default();

        popup.toggle(&mut ui);
        assert_eq!((ui.bind_calls.len(), ui.unbind_calls.len()), (3, 0));

        assert_eq!(popup.toggle(&mut ui), PopupState::Closed);
        assert_eq!((ui.bind_calls.len(), ui.unbind_calls.len()), (3, 3));
        assert!(SEARCH_LISTENERS.iter().all(|l| !ui.is_bound(*l)));
        assert!(!ui.popup_visible);
    }

    #[test]
    fn repeated_cycles_never_stack_listeners() {
        let mut ui = RecordingUi::default();
        let mut popup = Popup::default();

        for _ in 0..5 {
            popup.toggle(&mut ui);
            popup.toggle(&mut ui);
        }
        popup.toggle(&mut ui);

        assert_eq!(ui.bound.len(), SEARCH_LISTENERS.len());
    }
}
