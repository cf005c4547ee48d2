use crate::core::{Field, FieldState, FormData, FormView, SelectOption};
use chrono::NaiveDate;
use std::collections::HashMap;

pub const DEFAULT_SUBMIT_LABEL: &str = "Invia Richiesta";

/// Form state held in memory; backs the CLI and tests.
#[derive(Debug, Clone)]
pub struct MemoryForm {
    data: FormData,
    field_states: HashMap<Field, FieldState>,
    submit_label: String,
    submit_disabled: bool,
    loading: bool,
    min_date: Option<NaiveDate>,
    time_options: Vec<SelectOption>,
    message_placeholder: Option<String>,
    slot_picker: bool,
    message_field: bool,
}

impl MemoryForm {
    pub fn new(data: FormData) -> Self {
        Self {
            data,
            field_states: HashMap::new(),
            submit_label: DEFAULT_SUBMIT_LABEL.to_string(),
            submit_disabled: false,
            loading: false,
            min_date: None,
            time_options: Vec::new(),
            message_placeholder: None,
            slot_picker: true,
            message_field: true,
        }
    }

    /// A page without the date/time pair.
    pub fn without_slot_picker(mut self) -> Self {
        self.slot_picker = false;
        self
    }

    pub fn without_message_field(mut self) -> Self {
        self.message_field = false;
        self
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn set_value(&mut self, key: &str, value: &str) {
        self.data.insert(key, value);
    }

    pub fn field_state(&self, field: Field) -> Option<FieldState> {
        self.field_states.get(&field).copied()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn min_date(&self) -> Option<NaiveDate> {
        self.min_date
    }

    pub fn time_options(&self) -> &[SelectOption] {
        &self.time_options
    }

    pub fn message_placeholder(&self) -> Option<&str> {
        self.message_placeholder.as_deref()
    }
}

impl FormView for MemoryForm {
    fn form_data(&self) -> FormData {
        self.data.clone()
    }

    fn set_field_state(&mut self, field: Field, state: FieldState) {
        self.field_states.insert(field, state);
    }

    fn submit_label(&self) -> String {
        self.submit_label.clone()
    }

    fn set_submit_label(&mut self, label: &str) {
        self.submit_label = label.to_string();
    }

    fn is_submit_disabled(&self) -> bool {
        self.submit_disabled
    }

    fn set_submit_disabled(&mut self, disabled: bool) {
        self.submit_disabled = disabled;
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn reset(&mut self) {
        self.data = FormData::new();
    }

    fn has_slot_picker(&self) -> bool {
        self.slot_picker
    }

    fn set_min_date(&mut self, date: NaiveDate) {
        self.min_date = Some(date);
    }

    fn set_time_options(&mut self, options: &[SelectOption]) {
        self.time_options = options.to_vec();
    }

    fn has_message_field(&self) -> bool {
        self.message_field
    }

    fn set_message_placeholder(&mut self, hint: &str) {
        self.message_placeholder = Some(hint.to_string());
    }
}
