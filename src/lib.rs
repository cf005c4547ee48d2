pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command, ConsentAction, SubmitArgs};

pub use adapters::{
    clock::{FixedClock, SystemClock},
    form::MemoryForm,
    relay::HttpRelay,
    store::{FileStore, MemoryStore},
};
pub use config::SiteConfig;
pub use core::{booking::BookingFormController, consent::ConsentManager};
pub use utils::error::{BookingError, Result};
