use crate::core::{SelectOption, TimeSlotSet};
use chrono::{Datelike, NaiveDate, Weekday};

pub const WEEKDAY_SLOTS: [&str; 8] = [
    "09:00", "10:00", "11:00", "14:00", "15:00", "16:00", "17:00", "18:00",
];
pub const SATURDAY_SLOTS: [&str; 3] = ["09:00", "10:00", "11:00"];

pub const SELECT_TIME_PLACEHOLDER: &str = "Seleziona un orario";
pub const NO_SLOTS_PLACEHOLDER: &str = "Nessun orario disponibile";

pub fn time_slots_for(date: NaiveDate) -> TimeSlotSet {
    match date.weekday() {
        Weekday::Sat => TimeSlotSet::new(SATURDAY_SLOTS.to_vec()),
        Weekday::Sun => TimeSlotSet::new(Vec::new()),
        _ => TimeSlotSet::new(WEEKDAY_SLOTS.to_vec()),
    }
}

/// Full option list for the time select, placeholders included.
pub fn selector_options(slots: &TimeSlotSet) -> Vec<SelectOption> {
    let mut options = vec![SelectOption::placeholder(SELECT_TIME_PLACEHOLDER)];
    options.extend(slots.as_slice().iter().map(|t| SelectOption::enabled(t)));
    if slots.is_empty() {
        options.push(SelectOption::placeholder(NO_SLOTS_PLACEHOLDER));
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_wednesday_gets_weekday_slots() {
        let slots = time_slots_for(date("2026-10-21"));
        assert_eq!(slots.as_slice(), &WEEKDAY_SLOTS);
    }

    #[test]
    fn test_every_weekday_matches() {
        // 2026-10-19 is a Monday
        for day in 19..=23 {
            let slots = time_slots_for(date(&format!("2026-10-{}", day)));
            assert_eq!(slots.len(), 8);
        }
    }

    #[test]
    fn test_saturday_gets_morning_slots() {
        let slots = time_slots_for(date("2026-10-24"));
        assert_eq!(slots.as_slice(), &["09:00", "10:00", "11:00"]);
    }

    #[test]
    fn test_sunday_options_show_no_availability() {
        let slots = time_slots_for(date("2026-10-25"));
        assert!(slots.is_empty());

        let options = selector_options(&slots);
        assert_eq!(options.len(), 2);
        assert_eq!(options[0], SelectOption::placeholder(SELECT_TIME_PLACEHOLDER));
        assert_eq!(options[1], SelectOption::placeholder(NO_SLOTS_PLACEHOLDER));
        assert!(options.iter().all(|o| o.disabled));
    }

    #[test]
    fn test_weekday_options_lead_with_placeholder() {
        let options = selector_options(&time_slots_for(date("2026-10-21")));
        assert_eq!(options.len(), 9);
        assert!(options[0].disabled);
        assert_eq!(options[1].value, "09:00");
        assert!(options[1..].iter().all(|o| !o.disabled));
    }
}
