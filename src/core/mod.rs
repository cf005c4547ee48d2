pub mod booking;
pub mod consent;
pub mod contact_links;
pub mod navigation;
pub mod notification;
pub mod page;
pub mod reveal;
pub mod slots;

pub use crate::domain::model::{
    ConsentTier, CookiePreference, Field, FieldState, FormData, FormSubmission, Notification,
    NotificationKind, RelayOutcome, SelectOption, Service, SubmissionState, SubmitReport,
    TimeSlotSet, ValidationResult, GENERIC_MESSAGE_HINT,
};
pub use crate::domain::ports::{
    Clock, ConfigProvider, ConfirmDialog, ConsentSurface, FormView, GatedSection, KeyValueStore,
    Notifier, RelayClient,
};
pub use crate::utils::error::Result;
