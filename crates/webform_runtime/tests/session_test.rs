use std::cell::RefCell;
use std::rc::Rc;
use webform_forms::{ControlKind, FieldDescriptor, FieldType, FormDescriptor};
use webform_runtime::{FieldEvent, FormSession, FormValues, SetupError, SubmitOutcome, Trigger};

fn field(name: &str, field_type: FieldType) -> FieldDescriptor {
    FieldDescriptor::new(name, field_type)
}

fn form_of(fields: Vec<FieldDescriptor>) -> FormDescriptor {
    let mut config = FormDescriptor::new();
    config.fields = vec![fields];
    config
}

#[test]
fn test_error_sweep_scope() {
    let mut required_file = field("upload", FieldType::File);
    required_file.required = true;
    let mut required_checkbox = field("agree", FieldType::Checkbox);
    required_checkbox.required = true;
    let mut required_hidden = field("token", FieldType::Hidden);
    required_hidden.required = true;

    // Required file/checkbox/hidden fields never block submit.
    let session = FormSession::init(
        &form_of(vec![required_file, required_checkbox, required_hidden]),
        None,
    )
    .expect("init failed");
    assert!(!session.has_form_errors());

    // A required empty text field does.
    let mut required_text = field("name", FieldType::Text);
    required_text.required = true;
    let session =
        FormSession::init(&form_of(vec![required_text]), None).expect("init failed");
    assert!(session.has_form_errors());
}

#[test]
fn test_error_sweep_matrix() {
    let mut required_empty = field("a", FieldType::Text);
    required_empty.required = true;

    let mut required_filled = field("b", FieldType::Text);
    required_filled.required = true;
    required_filled.value = Some("ok".to_string());

    let mut flagged = field("c", FieldType::Text);
    flagged.filter = Some(r"^\d+$".to_string());
    flagged.error = Some("digits".to_string());

    let mut session = FormSession::init(
        &form_of(vec![required_empty, required_filled, flagged]),
        None,
    )
    .expect("init failed");

    // required-and-empty alone blocks.
    assert!(session.has_form_errors());

    session.set_value("a", "present");
    session.dispatch(&FieldEvent::new("a", Trigger::FocusLeave));
    assert!(!session.has_form_errors());

    // A tracked error flag blocks regardless of required.
    session.set_value("c", "not digits");
    session.dispatch(&FieldEvent::new("c", Trigger::FocusLeave));
    assert!(session.has_form_errors());

    session.set_value("c", "123");
    session.dispatch(&FieldEvent::new("c", Trigger::FocusLeave));
    assert!(!session.has_form_errors());
}

#[test]
fn test_required_select_placeholder_index_counts_empty() {
    let mut color = field("color", FieldType::Select);
    color.filter = Some("red|green|blue".to_string());
    color.value = Some("mauve".to_string());
    color.required = true;

    // The custom value sits at index 0, reserved for the placeholder, so
    // the selection does not satisfy required.
    let mut session = FormSession::init(&form_of(vec![color]), None).expect("init failed");
    assert_eq!(session.selected_index("color"), Some(0));
    assert_eq!(session.value("color"), Some("mauve"));
    assert!(session.has_form_errors());

    // Choosing a real option enables submit.
    session.set_selected_index("color", 2);
    assert_eq!(session.value("color"), Some("green"));
    assert!(!session.has_form_errors());
}

#[test]
fn test_select_value_matching_filter_starts_on_real_option() {
    let mut color = field("color", FieldType::Select);
    color.filter = Some("red|green|blue".to_string());
    color.value = Some("green".to_string());
    color.required = true;

    // Options are [green, red, green, blue]; the last selected mark wins,
    // like a rendered menu.
    let session = FormSession::init(&form_of(vec![color]), None).expect("init failed");
    assert_eq!(session.selected_index("color"), Some(2));
    assert!(!session.has_form_errors());
}

#[test]
fn test_set_value_on_select_tracks_index() {
    let mut color = field("color", FieldType::Select);
    color.filter = Some("red|green|blue".to_string());
    color.required = true;

    let mut session = FormSession::init(&form_of(vec![color]), None).expect("init failed");
    assert_eq!(session.selected_index("color"), Some(0));

    session.set_value("color", "blue");
    assert_eq!(session.selected_index("color"), Some(2));
    assert!(!session.has_form_errors());

    // An unknown value falls back to the top of the menu.
    session.set_value("color", "mauve");
    assert_eq!(session.selected_index("color"), Some(0));
    assert!(session.has_form_errors());
}

#[test]
fn test_submit_blocked_then_hook_consumes() {
    let seen: Rc<RefCell<Option<FormValues>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);

    let mut email = field("email", FieldType::Text);
    email.required = true;

    let mut session = FormSession::init(
        &form_of(vec![email]),
        Some(Box::new(move |values: &FormValues| {
            *sink.borrow_mut() = Some(values.clone());
        })),
    )
    .expect("init failed");

    assert_eq!(session.submit(), SubmitOutcome::Blocked);
    assert!(seen.borrow().is_none());

    session.set_value("email", "a@b.com");
    assert_eq!(session.submit(), SubmitOutcome::Handled);
    let values = seen.borrow().clone().expect("hook not called");
    assert_eq!(values.get("email").map(String::as_str), Some("a@b.com"));
}

#[test]
fn test_values_snapshot_covers_all_fields() {
    let mut name = field("name", FieldType::Text);
    name.value = Some("Ada".to_string());
    let mut color = field("color", FieldType::Select);
    color.filter = Some("red|blue".to_string());

    let session =
        FormSession::init(&form_of(vec![name, color]), None).expect("init failed");

    let values = session.values();
    assert_eq!(values.get("name").map(String::as_str), Some("Ada"));
    // A select with no configured value starts on its first real option.
    assert_eq!(values.get("color").map(String::as_str), Some("red"));
}

#[test]
fn test_create_field_registers_validation() {
    let mut session = FormSession::init(&FormDescriptor::new(), None).expect("init failed");

    let mut zip = field("zip", FieldType::Text);
    zip.filter = Some(r"^\d{5}$".to_string());
    zip.error = Some("bad zip".to_string());

    let hooked = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&hooked);
    let node = session
        .create_field_with(zip, |form_tree, field_tree| {
            assert_eq!(form_tree.kind, ControlKind::Form);
            assert!(field_tree.has_class("field_zip"));
            *flag.borrow_mut() = true;
        })
        .expect("create failed");

    assert!(*hooked.borrow());
    assert!(node.find_named(ControlKind::Input, "zip").is_some());

    session.set_value("zip", "abcde");
    session.dispatch(&FieldEvent::new("zip", Trigger::FocusLeave));
    assert!(session.has_error("zip"));
}

#[test]
fn test_create_field_rejects_duplicates() {
    let mut session =
        FormSession::init(&form_of(vec![field("email", FieldType::Text)]), None)
            .expect("init failed");

    match session.create_field(field("email", FieldType::Text)) {
        Err(SetupError::DuplicateField(name)) => assert_eq!(name, "email"),
        other => panic!("expected DuplicateField, got {:?}", other.err()),
    }
}

#[test]
fn test_destroy_clears_state() {
    let mut email = field("email", FieldType::Text);
    email.required = true;

    let mut session =
        FormSession::init(&form_of(vec![email]), None).expect("init failed");
    assert!(session.has_form_errors());

    session.destroy();
    assert!(session.field_names().is_empty());
    assert!(!session.has_form_errors());
    assert_eq!(session.submit(), SubmitOutcome::Native);
}
