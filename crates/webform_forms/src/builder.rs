use crate::control::{ControlKind, ControlNode};
use crate::descriptor::{FieldDescriptor, FieldType, FormDescriptor};
use std::collections::HashSet;

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("invalid or missing field type '{0}'")]
    InvalidFieldType(String),
    #[error("duplicate field name '{0}'")]
    DuplicateField(String),
}

pub type BuildResult<T> = Result<T, BuildError>;

/// Builds the full form control tree: hidden POST parameters, one fieldset
/// per field group, and the trailing submit block. Any bad field descriptor
/// aborts the whole build; a partially built form is unsafe to submit.
pub fn build_form(config: &FormDescriptor) -> BuildResult<ControlNode> {
    let mut form = ControlNode::new(ControlKind::Form).with_class("webform");

    if let Some(id) = &config.id {
        form.attrs.set("id", id.as_str());
    }

    if let Some(action) = &config.action {
        form.attrs.set("method", "POST");
        form.attrs.set("enctype", "multipart/form-data");
        form.attrs.set("action", action.as_str());
    }

    for (name, value) in config.param_pairs() {
        let mut hidden = ControlNode::new(ControlKind::Input);
        hidden.attrs.set("type", "hidden");
        hidden.attrs.set("name", name);
        if let Some(value) = value {
            hidden.attrs.set("value", value);
        }
        form.push(hidden);
    }

    let mut seen = HashSet::new();
    for (index, group) in config.fields.iter().enumerate() {
        let mut fieldset =
            ControlNode::new(ControlKind::Fieldset).with_class(format!("field_group{index}"));

        for field in group {
            if !seen.insert(field.name.clone()) {
                return Err(BuildError::DuplicateField(field.name.clone()));
            }
            fieldset.push(build_field(field)?);
        }

        form.push(fieldset);
    }

    let mut submit = ControlNode::new(ControlKind::Input);
    submit.attrs.set("type", "submit");
    submit.attrs.set("value", "Submit");

    let mut holder = ControlNode::new(ControlKind::Block).with_class("form_submit");
    holder.push(submit);
    form.push(holder);

    Ok(form)
}

/// Builds one field: wrapper block, label, the control itself and an
/// optional description paragraph.
pub fn build_field(config: &FieldDescriptor) -> BuildResult<ControlNode> {
    let kind = config
        .kind()
        .ok_or_else(|| BuildError::InvalidFieldType(config.field_type.clone()))?;

    let mut wrapper =
        ControlNode::new(ControlKind::Block).with_class(format!("field_{}", config.name));

    // Checkbox labels sit beside the control, not above it.
    if let Some(label) = &config.label {
        if kind != FieldType::Checkbox {
            let mut node = ControlNode::new(ControlKind::Label).with_text(label.clone());
            node.attrs.set("for", config.name.as_str());

            if config.required {
                node.push(
                    ControlNode::new(ControlKind::Span)
                        .with_class("required")
                        .with_text("*"),
                );
            }

            wrapper.push(node);
        }
    }

    let mut elm = match kind {
        FieldType::Text | FieldType::Password | FieldType::Hidden => input_elm(config, kind),
        FieldType::File => file_elm(config),
        FieldType::Textarea => textarea_elm(config),
        FieldType::Select => menu_elm(config),
        FieldType::Radio => radio_elm(config),
        FieldType::Checkbox => checkbox_elm(config),
    };

    if let Some(id) = &config.id {
        elm.attrs.set("id", id.as_str());
    }

    wrapper.push(elm);

    if let Some(description) = &config.description {
        wrapper.push(
            ControlNode::new(ControlKind::Paragraph)
                .with_class("field_desc")
                .with_text(description.clone()),
        );
    }

    Ok(wrapper)
}

/// The error message block the renderer attaches beside a failing field.
pub fn error_block(message: &str) -> ControlNode {
    let mut block = ControlNode::new(ControlKind::Paragraph)
        .with_class("error_mesg")
        .with_text(message);
    block.push(ControlNode::new(ControlKind::Span).with_class("arrow_lft"));
    block.push(ControlNode::new(ControlKind::Span).with_class("arrow_rgt"));
    block
}

fn input_elm(config: &FieldDescriptor, kind: FieldType) -> ControlNode {
    let mut input = ControlNode::new(ControlKind::Input);
    input.attrs.set("type", kind.as_str());
    input.attrs.set("name", config.name.as_str());

    if let Some(value) = config.value.as_deref().filter(|v| !v.is_empty()) {
        input.attrs.set("value", value);
    }
    if let Some(maxlength) = config.maxlength {
        input.attrs.set("maxlength", maxlength);
    }
    if config.required {
        input.attrs.set("required", true);
    }

    input
}

fn file_elm(config: &FieldDescriptor) -> ControlNode {
    let mut input = ControlNode::new(ControlKind::Input);
    input.attrs.set("type", "file");
    input.attrs.set("name", config.name.as_str());

    // For file inputs maxlength is a size hint, not a character limit.
    if let Some(maxlength) = config.maxlength {
        input.attrs.set("size", maxlength);
    }

    input
}

fn textarea_elm(config: &FieldDescriptor) -> ControlNode {
    let mut textarea = ControlNode::new(ControlKind::Textarea);
    textarea.attrs.set("id", config.name.as_str());
    textarea.attrs.set("name", config.name.as_str());

    // maxlength is deliberately not applied here; neither is a default
    // value.
    if config.required {
        textarea.attrs.set("required", true);
    }

    textarea
}

fn menu_elm(config: &FieldDescriptor) -> ControlNode {
    let mut wrapper = ControlNode::new(ControlKind::Block).with_class("menu");

    let mut select = ControlNode::new(ControlKind::Select);
    select.attrs.set("name", config.name.as_str());

    // A configured value is always unshifted as an extra leading option for
    // the current custom value, even when it equals a filter entry. That
    // first option carries no value attr.
    let mut first = config.has_value();

    for text in config.select_options() {
        let mut option = ControlNode::new(ControlKind::OptionItem).with_text(text.clone());

        if !first {
            option.attrs.set("value", text.as_str());
        } else {
            first = false;
        }

        if Some(text.as_str()) == config.value.as_deref() {
            option.attrs.set("selected", true);
        }

        select.push(option);
    }

    if config.required {
        select.attrs.set("required", true);
    }

    wrapper.push(select);
    wrapper
}

fn radio_elm(config: &FieldDescriptor) -> ControlNode {
    let mut wrapper = ControlNode::new(ControlKind::Block).with_class("radios");

    for value in config.filter_options() {
        let mut input = ControlNode::new(ControlKind::Input);
        input.attrs.set("type", "radio");
        input.attrs.set("name", config.name.as_str());
        input.attrs.set("value", value.as_str());

        if Some(value.as_str()) == config.value.as_deref() {
            input.attrs.set("checked", true);
        }

        wrapper.push(input);
        wrapper.push(ControlNode::new(ControlKind::Span).with_text(value));
    }

    wrapper
}

fn checkbox_elm(config: &FieldDescriptor) -> ControlNode {
    let mut wrapper = ControlNode::new(ControlKind::Block).with_class("checkbox");

    let mut input = ControlNode::new(ControlKind::Input);
    input.attrs.set("type", "checkbox");
    input.attrs.set("name", config.name.as_str());

    if let Some(value) = &config.value {
        input.attrs.set("value", value.as_str());
    }

    // Checked state and the required hint are both driven off a truthy
    // value; the descriptor's `required` flag has no effect at build time.
    if config.has_value() {
        input.attrs.set("checked", true);
        input.attrs.set("required", true);
    }

    wrapper.push(input);
    wrapper.push(
        ControlNode::new(ControlKind::Span)
            .with_text(config.label.clone().unwrap_or_default()),
    );

    wrapper
}
