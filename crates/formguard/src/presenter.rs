// File: src/presenter.rs
// Purpose: Presentation adapter turning validation outcomes into visible error state

use crate::form::Form;

/// Where a field's error is rendered, resolved once when the validator is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Index into `Form::groups`
    Group(usize),
    /// Degraded mode: no container to render into. Validation still gates submit.
    Detached,
}

impl Slot {
    pub fn is_detached(&self) -> bool {
        matches!(self, Slot::Detached)
    }
}

/// Renders and clears field errors.
///
/// Implement this for a real UI toolkit; [`GroupPresenter`] writes into the
/// in-memory [`crate::form::FormGroup`]s.
pub trait Presenter {
    /// Marks the slot's container invalid and shows `message`
    fn show_error(&mut self, form: &mut Form, slot: Slot, message: &str);

    /// Removes the invalid marker and message, if set
    fn clear_error(&mut self, form: &mut Form, slot: Slot);
}

/// Default presenter backed by `FormGroup` state
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupPresenter;

impl Presenter for GroupPresenter {
    fn show_error(&mut self, form: &mut Form, slot: Slot, message: &str) {
        if let Slot::Group(index) = slot {
            if let Some(group) = form.group_at_mut(index) {
                group.mark_invalid(message);
            }
        }
    }

    fn clear_error(&mut self, form: &mut Form, slot: Slot) {
        if let Slot::Group(index) = slot {
            if let Some(group) = form.group_at_mut(index).filter(|g| g.is_invalid()) {
                group.clear();
            }
        }
    }
}
