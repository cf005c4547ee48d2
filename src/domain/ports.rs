use crate::domain::model::{Field, FieldState, FormData, Notification, SelectOption};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};

/// The appointment form as the page exposes it.
pub trait FormView {
    fn form_data(&self) -> FormData;
    fn set_field_state(&mut self, field: Field, state: FieldState);

    fn submit_label(&self) -> String;
    fn set_submit_label(&mut self, label: &str);
    fn is_submit_disabled(&self) -> bool;
    fn set_submit_disabled(&mut self, disabled: bool);
    fn set_loading(&mut self, loading: bool);

    /// Clears every input back to its initial value.
    fn reset(&mut self);

    /// Whether the page carries a date input paired with a time select.
    fn has_slot_picker(&self) -> bool {
        true
    }
    fn set_min_date(&mut self, _date: NaiveDate) {}
    fn set_time_options(&mut self, _options: &[SelectOption]) {}

    /// Whether the page carries a free-text message area.
    fn has_message_field(&self) -> bool {
        true
    }
    fn set_message_placeholder(&mut self, _hint: &str) {}
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Third-party endpoint that forwards submissions.
#[async_trait]
pub trait RelayClient: Send + Sync {
    /// `Ok` only for a 2xx answer.
    async fn submit(&self, fields: &[(String, String)]) -> Result<()>;
}

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    fn current_year(&self) -> i32 {
        self.today().year()
    }
}

/// Durable origin-scoped string store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Applies several writes together. `None` removes the key.
    fn set_many(&mut self, entries: &[(&str, Option<&str>)]) -> Result<()> {
        for (key, value) in entries {
            match value {
                Some(value) => self.set(key, value)?,
                None => self.remove(key)?,
            }
        }
        Ok(())
    }
}

/// Blocking yes/no prompt.
pub trait ConfirmDialog {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Sections that show a notice instead of the booking widget when its cookies are refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatedSection {
    Booking,
    ContactForm,
}

/// Page elements whose visibility depends on cookie consent.
pub trait ConsentSurface {
    fn set_banner_visible(&mut self, visible: bool);
    fn set_settings_visible(&mut self, visible: bool);
    fn set_settings_checkboxes(&mut self, analytics: bool, calendly: bool);
    fn grant_analytics(&mut self);
    fn set_calendly_widgets_visible(&mut self, visible: bool);

    fn has_section(&self, section: GatedSection) -> bool;
    fn has_cookie_message(&self, section: GatedSection) -> bool;
    fn append_cookie_message(&mut self, section: GatedSection, text: &str);
}

pub trait ConfigProvider: Send + Sync {
    fn relay_endpoint(&self) -> &str;
    fn relay_timeout_seconds(&self) -> u64;
    fn store_path(&self) -> &str;
}
