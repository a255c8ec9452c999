use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Password,
    Hidden,
    File,
    Textarea,
    Select,
    Radio,
    Checkbox,
}

impl FieldType {
    /// Parse a field type name (case-insensitive) into a FieldType variant.
    pub fn from_name(name: &str) -> Option<FieldType> {
        match name.to_lowercase().as_str() {
            "text" => Some(FieldType::Text),
            "password" => Some(FieldType::Password),
            "hidden" => Some(FieldType::Hidden),
            "file" => Some(FieldType::File),
            "textarea" => Some(FieldType::Textarea),
            "select" => Some(FieldType::Select),
            "radio" => Some(FieldType::Radio),
            "checkbox" => Some(FieldType::Checkbox),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::Password => "password",
            FieldType::Hidden => "hidden",
            FieldType::File => "file",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
        }
    }

    /// Field kinds the submit-gating sweep inspects. File, hidden and
    /// checkbox fields never block submit through that path.
    pub fn blocks_submit(&self) -> bool {
        matches!(
            self,
            FieldType::Text
                | FieldType::Password
                | FieldType::Radio
                | FieldType::Select
                | FieldType::Textarea
        )
    }

    /// Choice kinds read `filter` as a pipe-delimited option list that also
    /// supplies the display choices.
    pub fn is_choice(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::Radio)
    }
}

/// Declarative configuration for one form control. `field_type` stays a raw
/// string so an unrecognized name surfaces as a build-time configuration
/// error rather than a deserialization fault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "truthy_flag")]
    pub required: bool,
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub maxlength: Option<u32>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.as_str().to_string(),
            label: None,
            description: None,
            value: None,
            required: false,
            filter: None,
            error: None,
            id: None,
            maxlength: None,
        }
    }

    pub fn kind(&self) -> Option<FieldType> {
        FieldType::from_name(&self.field_type)
    }

    /// True when a non-empty default value is configured. Checkbox fields
    /// derive both their checked state and required hint from this.
    pub fn has_value(&self) -> bool {
        self.value.as_deref().is_some_and(|v| !v.is_empty())
    }

    /// An empty filter string counts as no filter at all; such fields are
    /// never wired for validation.
    pub fn active_filter(&self) -> Option<&str> {
        self.filter.as_deref().filter(|f| !f.is_empty())
    }

    /// Pipe-delimited entries of `filter`, the display choices for select
    /// and radio fields.
    pub fn filter_options(&self) -> Vec<String> {
        match self.active_filter() {
            Some(filter) => filter.split('|').map(String::from).collect(),
            None => Vec::new(),
        }
    }

    /// The ordered option texts of a select menu. A configured value is
    /// always unshifted as an extra leading option representing the current
    /// custom value, even when it equals one of the filter entries.
    pub fn select_options(&self) -> Vec<String> {
        let mut options = self.filter_options();
        if let Some(value) = self.value.as_deref().filter(|v| !v.is_empty()) {
            options.insert(0, value.to_string());
        }
        options
    }
}

/// Ordered field groups plus form-level submit configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDescriptor {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub params: Option<String>,
    #[serde(default, deserialize_with = "field_groups")]
    pub fields: Vec<Vec<FieldDescriptor>>,
}

impl FormDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().flatten()
    }

    /// Splits the literal `k1=v1&k2=v2` POST parameter string into pairs.
    /// No escaping or decoding; a pair without `=` yields a name with no
    /// value, and only the second `=`-segment counts as the value.
    pub fn param_pairs(&self) -> Vec<(String, Option<String>)> {
        let Some(params) = self.params.as_deref().filter(|p| !p.is_empty()) else {
            return Vec::new();
        };
        params
            .split('&')
            .map(|pair| {
                let mut segments = pair.split('=');
                let name = segments.next().unwrap_or_default().to_string();
                let value = segments.next().map(String::from);
                (name, value)
            })
            .collect()
    }
}

/// Accepts JSON `true`/`false` as well as the numeric `0`/`1` flags legacy
/// configs write for `required`.
fn truthy_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
    })
}

/// Accepts either a nested array of field groups or a single flat array of
/// descriptors, normalized to one group.
fn field_groups<'de, D>(deserializer: D) -> Result<Vec<Vec<FieldDescriptor>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Rows {
        Grouped(Vec<Vec<FieldDescriptor>>),
        Flat(Vec<FieldDescriptor>),
    }

    Ok(match Rows::deserialize(deserializer)? {
        Rows::Grouped(groups) => groups,
        Rows::Flat(fields) => vec![fields],
    })
}
