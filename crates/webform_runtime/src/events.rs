/// Interaction triggers the renderer forwards to the session. Every trigger
/// recomputes submit enablement; all but a plain keypress also re-validate
/// the named field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Pointer hover/movement anywhere on the form surface. Wired per
    /// validated field so moving off an invalid field elsewhere still
    /// converges state.
    FormPointerMove,
    /// Pointer pressed on or moved off the field.
    PointerLeave,
    /// Keyboard focus left the field.
    FocusLeave,
    /// Key pressed while the field has focus. `advance_focus` is true for
    /// the move-focus-forward key (Tab), which validates before focus
    /// actually leaves.
    KeyPress { advance_focus: bool },
    /// Selection changed; wired for select fields only.
    SelectChange,
}

/// One discrete user interaction, dispatched by field name. The session
/// looks up current state by key; no live element references are involved.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEvent {
    pub field_name: String,
    pub trigger: Trigger,
}

impl FieldEvent {
    pub fn new(field_name: impl Into<String>, trigger: Trigger) -> Self {
        Self {
            field_name: field_name.into(),
            trigger,
        }
    }
}

/// Instructions for the renderer produced by a dispatch. Show/hide fades
/// are the renderer's concern and never block further validation.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ShowError { field: String, message: String },
    HideError { field: String },
    SetSubmitEnabled(bool),
}

/// Outcome of a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Errors exist; the default submit action is suppressed and nothing
    /// else happens.
    Blocked,
    /// The completion hook consumed the submission.
    Handled,
    /// No hook was supplied; the renderer performs the native POST.
    Native,
}
