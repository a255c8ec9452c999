use crate::attrs::{AttrBag, AttrValue};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlKind {
    Form,
    Fieldset,
    Block,
    Label,
    Span,
    Paragraph,
    Input,
    Select,
    OptionItem,
    Textarea,
}

impl ControlKind {
    /// The element name the renderer materializes for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            ControlKind::Form => "form",
            ControlKind::Fieldset => "fieldset",
            ControlKind::Block => "div",
            ControlKind::Label => "label",
            ControlKind::Span => "span",
            ControlKind::Paragraph => "p",
            ControlKind::Input => "input",
            ControlKind::Select => "select",
            ControlKind::OptionItem => "option",
            ControlKind::Textarea => "textarea",
        }
    }
}

/// One node of the abstract control tree handed to the external renderer:
/// an element kind, its attributes, CSS classes, text content and children.
/// When a node carries both children and text, the renderer places the
/// children ahead of the node's own text content — a label's required star
/// span precedes its caption. The renderer owns element construction and
/// event attachment; the node carries no live state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlNode {
    pub id: Uuid,
    pub kind: ControlKind,
    #[serde(default)]
    pub attrs: AttrBag,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub children: Vec<ControlNode>,
}

impl ControlNode {
    pub fn new(kind: ControlKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            attrs: AttrBag::new(),
            classes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.set(key, value);
        self
    }

    pub fn push(&mut self, child: ControlNode) {
        self.children.push(child);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr_string(&self, key: &str) -> Option<&str> {
        self.attrs.get_string(key)
    }

    pub fn attr_int(&self, key: &str) -> Option<i64> {
        self.attrs.get_int(key)
    }

    pub fn attr_bool(&self, key: &str) -> bool {
        self.attrs.get_bool(key).unwrap_or(false)
    }

    /// All nodes below this one, depth-first.
    pub fn descendants(&self) -> Vec<&ControlNode> {
        let mut out = Vec::new();
        self.collect(&mut out);
        out
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a ControlNode>) {
        for child in &self.children {
            out.push(child);
            child.collect(out);
        }
    }

    /// First descendant of the given kind carrying the given `name` attr.
    pub fn find_named(&self, kind: ControlKind, name: &str) -> Option<&ControlNode> {
        self.descendants()
            .into_iter()
            .find(|n| n.kind == kind && n.attr_string("name") == Some(name))
    }
}
