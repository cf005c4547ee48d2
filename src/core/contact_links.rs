use crate::core::ConfirmDialog;

/// A `tel:` or `mailto:` link that asks before leaving the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactLink {
    Phone(String),
    Email(String),
}

impl ContactLink {
    pub fn parse(href: &str) -> Option<Self> {
        if let Some(number) = href.strip_prefix("tel:") {
            return Some(ContactLink::Phone(number.to_string()));
        }
        href.strip_prefix("mailto:")
            .map(|address| ContactLink::Email(address.to_string()))
    }

    pub fn href(&self) -> String {
        match self {
            ContactLink::Phone(number) => format!("tel:{}", number),
            ContactLink::Email(address) => format!("mailto:{}", address),
        }
    }

    pub fn prompt(&self) -> String {
        match self {
            ContactLink::Phone(number) => format!("Vuoi chiamare {}?", number),
            ContactLink::Email(address) => format!("Vuoi inviare un'email a {}?", address),
        }
    }

    /// The href to navigate to, or `None` when the visitor declines.
    pub fn follow(&self, dialog: &dyn ConfirmDialog) -> Option<String> {
        if dialog.confirm(&self.prompt()) {
            Some(self.href())
        } else {
            tracing::debug!("Visitor declined {}", self.href());
            None
        }
    }
}
