//! Primitive form fields.
//!
//! The registry owns every fixed input on the sheet (text boxes, number
//! spinners, selects, textareas, checkboxes) and reads or writes them by id.
//! Registration order is preserved; for victory markers it is the display
//! order used when restoring a victory count.

use herosheet_domain::FieldValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Number,
    Select,
    Checkbox,
}

/// Tag for fields that belong to a group with shared behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGroup {
    Victory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub id: Option<String>,
    pub kind: FieldKind,
    pub group: Option<FieldGroup>,
    value: String,
    checked: bool,
}

impl FormField {
    pub fn new(id: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: Some(id.into()),
            kind,
            group: None,
            value: String::new(),
            checked: false,
        }
    }

    /// A control without an id. It is rendered but never saved or restored.
    pub fn anonymous(kind: FieldKind) -> Self {
        Self {
            id: None,
            kind,
            group: None,
            value: String::new(),
            checked: false,
        }
    }

    pub fn in_group(mut self, group: FieldGroup) -> Self {
        self.group = Some(group);
        self
    }

    pub fn is_checkbox(&self) -> bool {
        self.kind == FieldKind::Checkbox
    }

    /// Current value: checkboxes report a flag, every other kind its raw text.
    pub fn value(&self) -> FieldValue {
        if self.is_checkbox() {
            FieldValue::Flag(self.checked)
        } else {
            FieldValue::Text(self.value.clone())
        }
    }

    pub fn set_value(&mut self, value: &FieldValue) {
        if self.is_checkbox() {
            self.checked = value.is_truthy();
        } else {
            self.value = value.to_display_string();
        }
    }

    fn clear(&mut self) {
        self.value.clear();
        self.checked = false;
    }
}

#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: Vec<FormField>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed inputs of the hero sheet.
    pub fn hero_sheet() -> Self {
        use FieldKind::*;

        let mut registry = Self::new();
        for (id, kind) in [
            ("character-name", Text),
            ("level", Number),
            ("class", Select),
            ("ancestry", Select),
            ("subclass", Text),
            ("career", Select),
            ("might", Number),
            ("agility", Number),
            ("reason", Number),
            ("intuition", Number),
            ("presence", Number),
            ("stamina-max", Number),
            ("stamina-current", Number),
            ("stamina-temp", Number),
            ("recoveries-max", Number),
            ("recoveries-current", Number),
            ("recoveries-stamina", Number),
            ("surges-current", Number),
            ("heroic-current", Number),
            ("heroic-name", Text),
            ("culture", Text),
            ("languages", TextArea),
            ("project-points", Number),
            ("clear-storage", Checkbox),
        ] {
            registry.register(FormField::new(id, kind));
        }
        for n in 1..=6 {
            registry.register(
                FormField::new(format!("victory-{n}"), Checkbox).in_group(FieldGroup::Victory),
            );
        }
        registry.register(FormField::anonymous(Text));
        registry
    }

    pub fn register(&mut self, field: FormField) {
        self.fields.push(field);
    }

    pub fn get(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id.as_deref() == Some(id))
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.id.as_deref() == Some(id))
    }

    pub fn read(&self, id: &str) -> Option<FieldValue> {
        self.get(id).map(FormField::value)
    }

    /// Write a value to the field with `id`. Returns `false` when no such
    /// field exists.
    pub fn write(&mut self, id: &str, value: impl Into<FieldValue>) -> bool {
        let value = value.into();
        match self.get_mut(id) {
            Some(field) => {
                field.set_value(&value);
                true
            }
            None => false,
        }
    }

    /// Every field that has an id, in registration order.
    pub fn enumerate(&self) -> Vec<(String, FieldValue)> {
        self.fields
            .iter()
            .filter_map(|f| f.id.clone().map(|id| (id, f.value())))
            .collect()
    }

    pub fn victory_markers(&self) -> impl Iterator<Item = &FormField> {
        self.fields
            .iter()
            .filter(|f| f.group == Some(FieldGroup::Victory))
    }

    pub fn victory_count(&self) -> u32 {
        self.victory_markers().filter(|f| f.checked).count() as u32
    }

    /// Check exactly the first `count` markers and uncheck the rest.
    pub fn set_victory_count(&mut self, count: u32) {
        let mut remaining = count;
        for field in self
            .fields
            .iter_mut()
            .filter(|f| f.group == Some(FieldGroup::Victory))
        {
            field.checked = remaining > 0;
            remaining = remaining.saturating_sub(1);
        }
    }

    /// Empty every input and uncheck every box.
    pub fn clear_all(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
    }
}
