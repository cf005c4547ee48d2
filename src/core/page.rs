use chrono::{Datelike, NaiveDate};

const WEEKDAYS_IT: [&str; 7] = [
    "lunedì",
    "martedì",
    "mercoledì",
    "giovedì",
    "venerdì",
    "sabato",
    "domenica",
];

const MONTHS_IT: [&str; 12] = [
    "gennaio",
    "febbraio",
    "marzo",
    "aprile",
    "maggio",
    "giugno",
    "luglio",
    "agosto",
    "settembre",
    "ottobre",
    "novembre",
    "dicembre",
];

/// Long Italian date, e.g. `mercoledì 21 ottobre 2026`.
pub fn format_date_it(date: NaiveDate) -> String {
    let weekday = WEEKDAYS_IT[date.weekday().num_days_from_monday() as usize];
    let month = MONTHS_IT[date.month0() as usize];
    format!("{} {} {} {}", weekday, date.day(), month, date.year())
}

/// Footer copyright with the hard-coded year swapped for the current one.
pub fn footer_text(text: &str, current_year: i32) -> String {
    text.replace("2024", &current_year.to_string())
}

/// "Leggi di più" expander on the about section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadMoreToggle {
    expanded: bool,
}

impl ReadMoreToggle {
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn label(&self) -> &'static str {
        if self.expanded {
            "Leggi di meno"
        } else {
            "Leggi di più"
        }
    }

    pub fn icon(&self) -> &'static str {
        if self.expanded {
            "fa-chevron-up"
        } else {
            "fa-chevron-down"
        }
    }
}

/// Whether a field's group keeps its focused look after blur.
pub fn stays_focused_after_blur(value: &str) -> bool {
    !value.is_empty()
}
