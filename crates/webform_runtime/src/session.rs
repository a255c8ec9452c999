use crate::events::{Effect, FieldEvent, SubmitOutcome, Trigger};
use crate::validator::{evaluate, Pattern, Verdict};
use std::collections::HashMap;
use webform_forms::{
    build_field, build_form, BuildError, ControlNode, FieldDescriptor, FieldType, FormDescriptor,
};

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error("invalid filter pattern for field '{field}': {source}")]
    InvalidPattern {
        field: String,
        source: regex::Error,
    },
    #[error("duplicate field name '{0}'")]
    DuplicateField(String),
}

pub type SetupResult<T> = Result<T, SetupError>;

/// Current field values at submission time, keyed by field name.
pub type FormValues = HashMap<String, String>;

/// Invoked with the form's values on an error-free submission; absence
/// means the renderer performs the default POST.
pub type CompletionHook = Box<dyn FnMut(&FormValues)>;

/// Live validation state for one rendered field. Owned by the session and
/// keyed by field name, never stored on the rendered tree; the renderer
/// reads and writes only through session accessors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldState {
    pub value: String,
    pub has_error: bool,
    /// Select fields only: index of the chosen option. Index 0 is reserved
    /// for an unshifted placeholder, so 0 or below means no real selection.
    pub selected_index: i32,
}

struct FieldSlot {
    descriptor: FieldDescriptor,
    kind: FieldType,
    /// Present iff the field is wired for validation: a non-empty filter
    /// on any kind except hidden.
    pattern: Option<Pattern>,
    message: String,
    options: Vec<String>,
    state: FieldState,
}

/// One live form: the built control tree plus per-field validation state,
/// the error tracker and the event coordinator.
pub struct FormSession {
    tree: ControlNode,
    fields: HashMap<String, FieldSlot>,
    order: Vec<String>,
    completion: Option<CompletionHook>,
}

impl FormSession {
    /// Builds the control tree from the descriptor and wires validation
    /// state for every field.
    pub fn init(config: &FormDescriptor, completion: Option<CompletionHook>) -> SetupResult<Self> {
        let tree = build_form(config)?;

        let mut session = Self {
            tree,
            fields: HashMap::new(),
            order: Vec::new(),
            completion,
        };

        for descriptor in config.all_fields() {
            session.register(descriptor.clone())?;
        }

        Ok(session)
    }

    /// Builds and registers a single field added after the initial render.
    /// The returned subtree is the caller's to attach.
    pub fn create_field(&mut self, descriptor: FieldDescriptor) -> SetupResult<ControlNode> {
        let node = build_field(&descriptor)?;
        self.register(descriptor)?;
        Ok(node)
    }

    /// `create_field` with a creation hook receiving the form tree and the
    /// new field's control tree.
    pub fn create_field_with<F>(
        &mut self,
        descriptor: FieldDescriptor,
        hook: F,
    ) -> SetupResult<ControlNode>
    where
        F: FnOnce(&ControlNode, &ControlNode),
    {
        let node = self.create_field(descriptor)?;
        hook(&self.tree, &node);
        Ok(node)
    }

    /// Drops all per-field state and the completion hook. Tearing down the
    /// rendered tree is the renderer's job.
    pub fn destroy(&mut self) {
        self.fields.clear();
        self.order.clear();
        self.completion = None;
    }

    pub fn tree(&self) -> &ControlNode {
        &self.tree
    }

    pub fn field_names(&self) -> &[String] {
        &self.order
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.fields
            .get(field)
            .is_some_and(|slot| slot.state.has_error)
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(|slot| slot.state.value.as_str())
    }

    pub fn selected_index(&self, field: &str) -> Option<i32> {
        self.fields
            .get(field)
            .filter(|slot| slot.kind == FieldType::Select)
            .map(|slot| slot.state.selected_index)
    }

    /// Records the field's current value as typed/chosen by the user. For
    /// select fields the selected index follows the matching option, last
    /// occurrence winning as in a rendered menu.
    pub fn set_value(&mut self, field: &str, value: impl Into<String>) {
        let Some(slot) = self.fields.get_mut(field) else {
            return;
        };
        let value = value.into();
        if slot.kind == FieldType::Select {
            slot.state.selected_index = slot
                .options
                .iter()
                .rposition(|o| *o == value)
                .map(|i| i as i32)
                .unwrap_or(0);
        }
        slot.state.value = value;
    }

    /// Records a select menu's chosen option by index, syncing the value to
    /// the option's text.
    pub fn set_selected_index(&mut self, field: &str, index: i32) {
        let Some(slot) = self.fields.get_mut(field) else {
            return;
        };
        if slot.kind != FieldType::Select {
            return;
        }
        slot.state.selected_index = index;
        slot.state.value = usize::try_from(index)
            .ok()
            .and_then(|i| slot.options.get(i).cloned())
            .unwrap_or_default();
    }

    /// Routes one interaction: re-validate the named field (a plain
    /// keypress skips validation; only the focus-advance key validates
    /// early), then recompute submit enablement over the whole form. Each
    /// dispatch runs synchronously to completion.
    pub fn dispatch(&mut self, event: &FieldEvent) -> Vec<Effect> {
        let mut effects = Vec::new();

        let revalidate = match event.trigger {
            Trigger::KeyPress { advance_focus } => advance_focus,
            Trigger::FormPointerMove
            | Trigger::PointerLeave
            | Trigger::FocusLeave
            | Trigger::SelectChange => true,
        };

        if revalidate {
            effects.extend(self.validate_field(&event.field_name));
        }

        effects.push(Effect::SetSubmitEnabled(!self.has_form_errors()));
        effects
    }

    /// Full sweep of every field. Only text, password, radio, select and
    /// textarea kinds are in scope; file, hidden and checkbox fields never
    /// block submit. A field errors when it is required and empty (for
    /// select: no real option chosen) or its error flag is set.
    pub fn has_form_errors(&self) -> bool {
        self.fields.values().any(|slot| {
            if !slot.kind.blocks_submit() {
                return false;
            }

            let empty = match slot.kind {
                FieldType::Select => slot.state.selected_index <= 0,
                _ => slot.state.value.is_empty(),
            };

            (slot.descriptor.required && empty) || slot.state.has_error
        })
    }

    pub fn submit_enabled(&self) -> bool {
        !self.has_form_errors()
    }

    /// Current values of every field, keyed by name.
    pub fn values(&self) -> FormValues {
        self.order
            .iter()
            .filter_map(|name| {
                self.fields
                    .get(name)
                    .map(|slot| (name.clone(), slot.state.value.clone()))
            })
            .collect()
    }

    /// Attempts submission. Errors suppress it entirely; otherwise the
    /// completion hook consumes the values, or the caller performs the
    /// native POST.
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.has_form_errors() {
            return SubmitOutcome::Blocked;
        }

        let values = self.values();
        match self.completion.as_mut() {
            Some(hook) => {
                hook(&values);
                SubmitOutcome::Handled
            }
            None => SubmitOutcome::Native,
        }
    }

    fn register(&mut self, descriptor: FieldDescriptor) -> SetupResult<()> {
        let kind = descriptor
            .kind()
            .ok_or_else(|| BuildError::InvalidFieldType(descriptor.field_type.clone()))?;

        if self.fields.contains_key(&descriptor.name) {
            return Err(SetupError::DuplicateField(descriptor.name.clone()));
        }

        let pattern = match descriptor.active_filter() {
            Some(filter) if kind != FieldType::Hidden => Some(
                Pattern::compile(kind, filter).map_err(|source| SetupError::InvalidPattern {
                    field: descriptor.name.clone(),
                    source,
                })?,
            ),
            _ => None,
        };

        let options = match kind {
            FieldType::Select => descriptor.select_options(),
            FieldType::Radio => descriptor.filter_options(),
            _ => Vec::new(),
        };

        let state = initial_state(&descriptor, kind, &options);
        let message = descriptor.error.clone().unwrap_or_default();

        self.order.push(descriptor.name.clone());
        self.fields.insert(
            descriptor.name.clone(),
            FieldSlot {
                descriptor,
                kind,
                pattern,
                message,
                options,
                state,
            },
        );

        Ok(())
    }

    fn validate_field(&mut self, name: &str) -> Option<Effect> {
        let slot = self.fields.get_mut(name)?;
        let pattern = slot.pattern.as_ref()?;

        match evaluate(&slot.state.value, pattern, slot.state.has_error) {
            Verdict::Flag => {
                slot.state.has_error = true;
                Some(Effect::ShowError {
                    field: name.to_string(),
                    message: slot.message.clone(),
                })
            }
            Verdict::Clear => {
                slot.state.has_error = false;
                Some(Effect::HideError {
                    field: name.to_string(),
                })
            }
            Verdict::Unchanged => None,
        }
    }
}

fn initial_state(descriptor: &FieldDescriptor, kind: FieldType, options: &[String]) -> FieldState {
    match kind {
        FieldType::Select => {
            // Mirrors a rendered menu: the last option marked selected
            // wins, the first option is chosen when none is.
            let selected = options
                .iter()
                .rposition(|o| Some(o.as_str()) == descriptor.value.as_deref())
                .unwrap_or(0);
            FieldState {
                value: options.get(selected).cloned().unwrap_or_default(),
                has_error: false,
                selected_index: selected as i32,
            }
        }
        FieldType::Radio => {
            // Only a value naming one of the options starts checked.
            let checked = descriptor
                .value
                .as_deref()
                .filter(|v| options.iter().any(|o| o == v));
            FieldState {
                value: checked.unwrap_or_default().to_string(),
                has_error: false,
                selected_index: 0,
            }
        }
        _ => FieldState {
            value: descriptor.value.clone().unwrap_or_default(),
            has_error: false,
            selected_index: 0,
        },
    }
}
