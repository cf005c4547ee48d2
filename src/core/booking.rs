//! Appointment form controller.
//!
//! One controller per form instance. It owns the validation pass, keeps the
//! time select in step with the chosen date, and runs the submission cycle
//! against the relay.

use crate::core::slots::{selector_options, time_slots_for};
use crate::core::{
    Clock, Field, FieldState, FormData, FormSubmission, FormView, Notification, NotificationKind,
    Notifier, RelayClient, RelayOutcome, Service, SubmissionState, SubmitReport, TimeSlotSet,
    ValidationResult, GENERIC_MESSAGE_HINT,
};
use crate::utils::validation::{is_valid_email, is_valid_phone};
use chrono::NaiveDate;

pub const SUBMITTING_LABEL: &str = "Invio in corso...";
pub const INVALID_FIELDS_MESSAGE: &str = "Per favore, controlla i campi evidenziati in rosso.";
pub const SUCCESS_MESSAGE: &str = "Grazie! La tua richiesta è stata inviata con successo. Ti contatteremo presto per confermare l'appuntamento.";
pub const FAILURE_MESSAGE: &str =
    "Errore nell'invio della richiesta. Riprova più tardi o contattaci direttamente.";

pub fn parse_form_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Checks every field in one pass; nothing short-circuits.
pub fn validate_form(data: &FormData, today: NaiveDate) -> ValidationResult {
    let mut result = ValidationResult::new();

    for field in Field::REQUIRED {
        if data.is_filled(field) {
            result.pass(field);
        } else {
            result.fail(field);
        }
    }

    if let Some(email) = data.field(Field::Email).filter(|v| !v.is_empty()) {
        if !is_valid_email(email) {
            result.fail(Field::Email);
        }
    }

    if let Some(phone) = data.field(Field::Phone).filter(|v| !v.is_empty()) {
        if !is_valid_phone(phone) {
            result.fail(Field::Phone);
        }
    }

    if let Some(service) = data.field(Field::Service).filter(|v| !v.is_empty()) {
        if Service::from_token(service).is_none() {
            result.fail(Field::Service);
        }
    }

    if let Some(date) = data.field(Field::Date).filter(|v| !v.is_empty()) {
        match parse_form_date(date) {
            Some(date) if date >= today => {}
            _ => result.fail(Field::Date),
        }
    }

    result
}

/// Holds the submit control in its busy state; dropping it restores the
/// original label, re-enables the control and clears the loading marker.
struct SubmitGuard<'a, F: FormView> {
    form: &'a mut F,
    original_label: String,
}

impl<'a, F: FormView> SubmitGuard<'a, F> {
    fn engage(form: &'a mut F) -> Self {
        let original_label = form.submit_label();
        form.set_submit_label(SUBMITTING_LABEL);
        form.set_submit_disabled(true);
        form.set_loading(true);
        Self {
            form,
            original_label,
        }
    }

    fn form(&mut self) -> &mut F {
        &mut *self.form
    }
}

impl<F: FormView> Drop for SubmitGuard<'_, F> {
    fn drop(&mut self) {
        self.form.set_submit_label(&self.original_label);
        self.form.set_submit_disabled(false);
        self.form.set_loading(false);
    }
}

pub struct BookingFormController<F, R, N, C>
where
    F: FormView,
    R: RelayClient,
    N: Notifier,
    C: Clock,
{
    form: F,
    relay: R,
    notifier: N,
    clock: C,
    state: SubmissionState,
    slot_picker: bool,
    message_hints: bool,
}

impl<F, R, N, C> BookingFormController<F, R, N, C>
where
    F: FormView,
    R: RelayClient,
    N: Notifier,
    C: Clock,
{
    pub fn new(mut form: F, relay: R, notifier: N, clock: C) -> Self {
        let slot_picker = form.has_slot_picker();
        let message_hints = form.has_message_field();

        if slot_picker {
            form.set_min_date(clock.today());
        } else {
            tracing::debug!("No date input on this page, time slots disabled");
        }

        Self {
            form,
            relay,
            notifier,
            clock,
            state: SubmissionState::Idle,
            slot_picker,
            message_hints,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    fn transition(&mut self, next: SubmissionState) {
        tracing::debug!("Booking form {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Rebuilds the time select for the currently entered date.
    ///
    /// Returns `None` when the page has no slot picker. An unreadable date
    /// yields an empty set.
    pub fn on_date_changed(&mut self) -> Option<TimeSlotSet> {
        if !self.slot_picker {
            return None;
        }

        let data = self.form.form_data();
        let slots = data
            .field(Field::Date)
            .and_then(parse_form_date)
            .map(time_slots_for)
            .unwrap_or_else(|| TimeSlotSet::new(Vec::new()));

        self.form.set_time_options(&selector_options(&slots));
        tracing::debug!("Offering {} time slots", slots.len());
        Some(slots)
    }

    /// Swaps the message placeholder for the selected service's hint.
    pub fn on_service_changed(&mut self) {
        if !self.message_hints {
            return;
        }

        let data = self.form.form_data();
        let hint = data
            .field(Field::Service)
            .and_then(Service::from_token)
            .map(|s| s.message_hint())
            .unwrap_or(GENERIC_MESSAGE_HINT);
        self.form.set_message_placeholder(hint);
    }

    /// Runs the validation pass and paints every field's border.
    pub fn validate(&mut self) -> ValidationResult {
        let data = self.form.form_data();
        let result = validate_form(&data, self.clock.today());

        for (field, ok) in result.iter() {
            let state = if ok {
                FieldState::Neutral
            } else {
                FieldState::Error
            };
            self.form.set_field_state(field, state);
        }

        result
    }

    pub async fn submit(&mut self) -> SubmitReport {
        if self.form.is_submit_disabled() {
            tracing::debug!("Submit ignored, a submission is already in flight");
            return SubmitReport::Ignored;
        }

        self.transition(SubmissionState::Validating);
        let result = self.validate();

        if !result.is_valid() {
            self.transition(SubmissionState::Invalid);
            tracing::info!("Booking rejected, invalid fields: {:?}", result.failed_fields());
            self.notifier.notify(Notification::new(
                NotificationKind::Error,
                INVALID_FIELDS_MESSAGE,
            ));
            self.transition(SubmissionState::Idle);
            return SubmitReport::Invalid(result);
        }

        let data = self.form.form_data();
        if let Some(submission) = FormSubmission::from_form(&data) {
            tracing::info!(
                "Relaying request for {} on {} at {}",
                submission.service.display_name(),
                submission.date,
                submission.time
            );
        }
        let fields = data.to_fields();

        self.transition(SubmissionState::Submitting);
        let outcome = {
            let mut guard = SubmitGuard::engage(&mut self.form);

            let outcome = match self.relay.submit(&fields).await {
                Ok(()) => RelayOutcome::Success,
                Err(e) => RelayOutcome::Error(e.to_string()),
            };

            if outcome == RelayOutcome::Success {
                guard.form().reset();
            }
            outcome
        };

        match &outcome {
            RelayOutcome::Success => {
                self.transition(SubmissionState::SubmittedSuccess);
                tracing::info!("Booking request relayed");
                self.notifier
                    .notify(Notification::new(NotificationKind::Success, SUCCESS_MESSAGE));
            }
            RelayOutcome::Error(reason) => {
                self.transition(SubmissionState::SubmittedError);
                tracing::error!("Booking relay failed: {}", reason);
                self.notifier
                    .notify(Notification::new(NotificationKind::Error, FAILURE_MESSAGE));
            }
        }

        self.transition(SubmissionState::Idle);
        SubmitReport::Submitted(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_form_date(s).unwrap()
    }

    fn valid_form() -> FormData {
        FormData::new()
            .with("name", "Marco Bianchi")
            .with("email", "marco@example.it")
            .with("phone", "+39 333 1234567")
            .with("service", "psychotherapy")
            .with("date", "2026-10-21")
            .with("time", "15:00")
            .with("privacy", "on")
    }

    #[test]
    fn test_complete_form_is_valid() {
        let result = validate_form(&valid_form(), date("2026-10-15"));
        assert!(result.is_valid());
    }

    #[test]
    fn test_each_missing_required_field_fails() {
        for field in Field::REQUIRED {
            let mut form = valid_form();
            form.remove(field.as_str());
            let result = validate_form(&form, date("2026-10-15"));
            assert!(!result.is_valid(), "{} missing should fail", field);
            assert_eq!(result.failed_fields(), vec![field]);
        }
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let mut form = valid_form();
        form.insert("name", "");
        assert_eq!(
            validate_form(&form, date("2026-10-15")).failed_fields(),
            vec![Field::Name]
        );
    }

    #[test]
    fn test_all_failures_reported_together() {
        let form = valid_form()
            .with("email", "abc")
            .with("phone", "123")
            .with("date", "2026-10-14");
        let result = validate_form(&form, date("2026-10-15"));
        assert_eq!(
            result.failed_fields(),
            vec![Field::Email, Field::Phone, Field::Date]
        );
        assert!(result.passed(Field::Name));
    }

    #[test]
    fn test_date_bounds() {
        let today = date("2026-10-15");
        let check = |d: &str| validate_form(&valid_form().with("date", d), today).passed(Field::Date);
        assert!(check("2026-10-15"));
        assert!(!check("2026-10-14"));
        assert!(check("2027-10-15"));
        assert!(!check("15/10/2026"));
    }

    #[test]
    fn test_unknown_service_fails() {
        let result = validate_form(&valid_form().with("service", "yoga"), date("2026-10-15"));
        assert_eq!(result.failed_fields(), vec![Field::Service]);
    }
}
