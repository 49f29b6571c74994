//! Item model and the view state produced by the controller.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::{Document, Fields};

/// An item as shown in the results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub content: String,
}

impl From<Document> for Item {
    fn from(doc: Document) -> Self {
        let fields = ItemFields::from(doc.fields);
        Self {
            id: doc.id,
            title: fields.title,
            content: fields.content,
        }
    }
}

/// Editable fields of an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFields {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl ItemFields {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert("title".to_string(), Value::String(self.title.clone()));
        fields.insert("content".to_string(), Value::String(self.content.clone()));
        fields
    }
}

impl From<Fields> for ItemFields {
    /// Missing or non-text values read as empty strings.
    fn from(fields: Fields) -> Self {
        let text = |key: &str| {
            fields
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            title: text("title"),
            content: text("content"),
        }
    }
}

/// Whether submitting the form creates a new item or updates one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// State of the item form, as submitted by the page.
///
/// `element_id` is the hidden field holding the id of the item under edit;
/// it is empty in create mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ItemForm {
    #[serde(rename = "elementId", default)]
    pub element_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl ItemForm {
    /// Create-mode form prefilled with `fields`.
    pub fn create(fields: ItemFields) -> Self {
        Self {
            element_id: String::new(),
            title: fields.title,
            content: fields.content,
        }
    }

    /// Edit-mode form for item `id`.
    pub fn edit(id: impl Into<String>, fields: ItemFields) -> Self {
        Self {
            element_id: id.into(),
            title: fields.title,
            content: fields.content,
        }
    }

    pub fn mode(&self) -> FormMode {
        if self.element_id.is_empty() {
            FormMode::Create
        } else {
            FormMode::Edit
        }
    }

    pub fn fields(&self) -> ItemFields {
        ItemFields::new(self.title.clone(), self.content.clone())
    }
}

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Danger,
}

impl Severity {
    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Success => "alert-success",
            Severity::Danger => "alert-danger",
        }
    }
}

/// User-visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub severity: Severity,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Danger,
        }
    }
}

/// Everything the page shows after an action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemView {
    pub form: ItemForm,
    pub rows: Vec<Item>,
    /// Notifications in the order they were raised.
    pub alerts: Vec<Alert>,
}
