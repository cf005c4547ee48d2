use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Form inputs that take part in validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Phone,
    Service,
    Date,
    Time,
    Privacy,
}

impl Field {
    pub const REQUIRED: [Field; 7] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Service,
        Field::Date,
        Field::Time,
        Field::Privacy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Service => "service",
            Field::Date => "date",
            Field::Time => "time",
            Field::Privacy => "privacy",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    Support,
    Diagnostic,
    Psychotherapy,
    Consultation,
}

pub const GENERIC_MESSAGE_HINT: &str =
    "Descrivi brevemente il motivo della richiesta o eventuali preferenze...";

impl Service {
    pub const ALL: [Service; 4] = [
        Service::Support,
        Service::Diagnostic,
        Service::Psychotherapy,
        Service::Consultation,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.token() == token)
    }

    /// Value carried by the `<option>` and sent to the relay.
    pub fn token(&self) -> &'static str {
        match self {
            Service::Support => "support",
            Service::Diagnostic => "diagnostic",
            Service::Psychotherapy => "psychotherapy",
            Service::Consultation => "consultation",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Service::Support => "Sostegno Psicologico",
            Service::Diagnostic => "Consultazione Psicodiagnostica",
            Service::Psychotherapy => "Psicoterapia Individuale Adulti e Adolescenti",
            Service::Consultation => "Prima Consultazione",
        }
    }

    pub fn message_hint(&self) -> &'static str {
        match self {
            Service::Support => "Descrivi brevemente le difficoltà che stai affrontando e il tipo di supporto di cui hai bisogno...",
            Service::Diagnostic => "Descrivi il motivo della consultazione psicodiagnostica e le aree che vorresti valutare...",
            Service::Psychotherapy => "Descrivi le difficoltà psicologiche o relazionali che stai affrontando...",
            Service::Consultation => "Descrivi il motivo della prima consultazione e le tue aspettative...",
        }
    }
}

/// Raw field values as the page hands them over, in document order.
///
/// Unchecked checkboxes are simply absent, the way browsers serialize forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing an earlier value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Appends an entry even when `key` is already present, as repeated
    /// inputs with the same name do.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) {
        self.entries.retain(|(k, _)| k != key);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn field(&self, field: Field) -> Option<&str> {
        self.get(field.as_str())
    }

    /// Present and non-empty.
    pub fn is_filled(&self, field: Field) -> bool {
        self.field(field).is_some_and(|v| !v.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Multipart parts exactly as entered, repeated keys included.
    pub fn to_fields(&self) -> Vec<(String, String)> {
        self.entries.clone()
    }
}

/// A validated appointment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: Service,
    pub date: NaiveDate,
    pub time: String,
    pub message: Option<String>,
    pub privacy: bool,
    /// Hidden inputs that travel with the form but are not validated.
    pub extra: Vec<(String, String)>,
}

impl FormSubmission {
    /// Builds the typed submission. `None` when a required field is missing or
    /// does not parse, so callers validate first.
    pub fn from_form(data: &FormData) -> Option<Self> {
        let text = |field: Field| data.field(field).filter(|v| !v.is_empty());

        let known: Vec<&str> = Field::REQUIRED
            .iter()
            .map(Field::as_str)
            .chain(std::iter::once("message"))
            .collect();

        Some(Self {
            name: text(Field::Name)?.to_string(),
            email: text(Field::Email)?.to_string(),
            phone: text(Field::Phone)?.to_string(),
            service: Service::from_token(text(Field::Service)?)?,
            date: NaiveDate::parse_from_str(text(Field::Date)?, "%Y-%m-%d").ok()?,
            time: text(Field::Time)?.to_string(),
            message: data
                .get("message")
                .filter(|m| !m.trim().is_empty())
                .map(str::to_string),
            privacy: text(Field::Privacy).is_some(),
            extra: data
                .iter()
                .filter(|(k, _)| !known.contains(k))
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        })
    }
}

/// Per-field pass/fail flags from one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    fields: BTreeMap<Field, bool>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pass(&mut self, field: Field) {
        self.fields.entry(field).or_insert(true);
    }

    /// A failure sticks even if a later check passes the same field.
    pub fn fail(&mut self, field: Field) {
        self.fields.insert(field, false);
    }

    pub fn passed(&self, field: Field) -> bool {
        self.fields.get(&field).copied().unwrap_or(false)
    }

    pub fn is_valid(&self) -> bool {
        !self.fields.is_empty() && self.fields.values().all(|ok| *ok)
    }

    pub fn failed_fields(&self) -> Vec<Field> {
        self.fields
            .iter()
            .filter(|(_, ok)| !**ok)
            .map(|(f, _)| *f)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, bool)> + '_ {
        self.fields.iter().map(|(f, ok)| (*f, *ok))
    }
}

/// Border state painted on a field after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    Neutral,
    Error,
}

impl FieldState {
    pub fn border_color(&self) -> &'static str {
        match self {
            FieldState::Neutral => "#e2e8f0",
            FieldState::Error => "#e53e3e",
        }
    }
}

/// Bookable times for one calendar date, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlotSet {
    slots: Vec<&'static str>,
}

impl TimeSlotSet {
    pub fn new(slots: Vec<&'static str>) -> Self {
        Self { slots }
    }

    pub fn as_slice(&self) -> &[&'static str] {
        &self.slots
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

/// One `<option>` of a select input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

impl SelectOption {
    pub fn enabled(value: &str) -> Self {
        Self {
            value: value.to_string(),
            label: value.to_string(),
            disabled: false,
        }
    }

    pub fn placeholder(label: &str) -> Self {
        Self {
            value: String::new(),
            label: label.to_string(),
            disabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Invalid,
    Submitting,
    SubmittedSuccess,
    SubmittedError,
}

/// What the relay made of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    Success,
    Error(String),
}

/// Result of one submit attempt as seen by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitReport {
    /// The submit control was disabled; a submission is already in flight.
    Ignored,
    Invalid(ValidationResult),
    Submitted(RelayOutcome),
}

impl SubmitReport {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitReport::Submitted(RelayOutcome::Success))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentTier {
    #[default]
    None,
    Essential,
    All,
    Custom,
}

impl ConsentTier {
    /// Stored value, `None` when nothing is stored.
    pub fn stored_value(&self) -> Option<&'static str> {
        match self {
            ConsentTier::None => None,
            ConsentTier::Essential => Some("essential"),
            ConsentTier::All => Some("all"),
            ConsentTier::Custom => Some("custom"),
        }
    }

    /// Unknown stored values count as no consent so the banner is shown again.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("essential") => ConsentTier::Essential,
            Some("all") => ConsentTier::All,
            Some("custom") => ConsentTier::Custom,
            _ => ConsentTier::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CookiePreference {
    pub consent: ConsentTier,
    pub analytics_enabled: bool,
    pub calendly_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
