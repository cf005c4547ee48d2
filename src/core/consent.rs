use crate::core::{ConsentSurface, ConsentTier, CookiePreference, GatedSection, KeyValueStore};
use crate::utils::error::Result;

pub const CONSENT_KEY: &str = "cookieConsent";
pub const ANALYTICS_KEY: &str = "analyticsCookies";
pub const CALENDLY_KEY: &str = "calendlyCookies";

pub const BOOKING_COOKIE_MESSAGE: &str =
    "Per prenotare un appuntamento, accetta i cookie Calendly nelle impostazioni.";
pub const CONTACT_COOKIE_MESSAGE: &str =
    "Per inviare un messaggio, accetta i cookie Calendly nelle impostazioni.";

/// Reads and writes the visitor's cookie choices.
///
/// Nothing expires: a stored choice stays in force until the visitor changes it.
pub struct ConsentManager<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ConsentManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn load(&self) -> Result<CookiePreference> {
        let consent = ConsentTier::from_stored(self.store.get(CONSENT_KEY)?.as_deref());
        if consent == ConsentTier::None {
            return Ok(CookiePreference::default());
        }

        Ok(CookiePreference {
            consent,
            analytics_enabled: self.flag(ANALYTICS_KEY)?,
            calendly_enabled: self.flag(CALENDLY_KEY)?,
        })
    }

    fn flag(&self, key: &str) -> Result<bool> {
        Ok(self.store.get(key)?.as_deref() == Some("true"))
    }

    fn save(&mut self, preference: CookiePreference) -> Result<CookiePreference> {
        let analytics = preference.analytics_enabled.to_string();
        let calendly = preference.calendly_enabled.to_string();
        // Consent last: per-key stores never pair a new consent with stale flags.
        self.store.set_many(&[
            (ANALYTICS_KEY, Some(analytics.as_str())),
            (CALENDLY_KEY, Some(calendly.as_str())),
            (CONSENT_KEY, preference.consent.stored_value()),
        ])?;
        tracing::info!(
            "Cookie consent saved: {:?} (analytics={}, calendly={})",
            preference.consent,
            preference.analytics_enabled,
            preference.calendly_enabled
        );
        Ok(preference)
    }

    pub fn accept_all(&mut self) -> Result<CookiePreference> {
        self.save(CookiePreference {
            consent: ConsentTier::All,
            analytics_enabled: true,
            calendly_enabled: true,
        })
    }

    pub fn accept_essential(&mut self) -> Result<CookiePreference> {
        self.save(CookiePreference {
            consent: ConsentTier::Essential,
            analytics_enabled: false,
            calendly_enabled: false,
        })
    }

    pub fn save_custom(&mut self, analytics: bool, calendly: bool) -> Result<CookiePreference> {
        self.save(CookiePreference {
            consent: ConsentTier::Custom,
            analytics_enabled: analytics,
            calendly_enabled: calendly,
        })
    }

    /// Forgets every stored choice so the banner shows on next load.
    pub fn reset(&mut self) -> Result<()> {
        self.store
            .set_many(&[(CONSENT_KEY, None), (ANALYTICS_KEY, None), (CALENDLY_KEY, None)])
    }

    /// Page-load entry point: prompt when nothing is stored, otherwise apply.
    pub fn on_page_load(&self, surface: &mut dyn ConsentSurface) -> Result<CookiePreference> {
        let preference = self.load()?;
        if preference.consent == ConsentTier::None {
            surface.set_banner_visible(true);
        } else {
            apply_preferences(&preference, surface);
        }
        Ok(preference)
    }

    /// Opens the settings dialog with the stored flags preloaded.
    pub fn open_settings(&self, surface: &mut dyn ConsentSurface) -> Result<()> {
        surface.set_settings_visible(true);
        surface.set_settings_checkboxes(self.flag(ANALYTICS_KEY)?, self.flag(CALENDLY_KEY)?);
        Ok(())
    }

    pub fn accept_all_on(&mut self, surface: &mut dyn ConsentSurface) -> Result<CookiePreference> {
        let preference = self.accept_all()?;
        surface.set_banner_visible(false);
        apply_preferences(&preference, surface);
        Ok(preference)
    }

    pub fn accept_essential_on(
        &mut self,
        surface: &mut dyn ConsentSurface,
    ) -> Result<CookiePreference> {
        let preference = self.accept_essential()?;
        surface.set_banner_visible(false);
        apply_preferences(&preference, surface);
        Ok(preference)
    }

    pub fn save_settings_on(
        &mut self,
        surface: &mut dyn ConsentSurface,
        analytics: bool,
        calendly: bool,
    ) -> Result<CookiePreference> {
        let preference = self.save_custom(analytics, calendly)?;
        surface.set_banner_visible(false);
        surface.set_settings_visible(false);
        apply_preferences(&preference, surface);
        Ok(preference)
    }
}

/// Turns stored choices into widget visibility.
pub fn apply_preferences(preference: &CookiePreference, surface: &mut dyn ConsentSurface) {
    if preference.analytics_enabled {
        surface.grant_analytics();
    }

    if preference.calendly_enabled {
        surface.set_calendly_widgets_visible(true);
        return;
    }

    surface.set_calendly_widgets_visible(false);
    for (section, text) in [
        (GatedSection::Booking, BOOKING_COOKIE_MESSAGE),
        (GatedSection::ContactForm, CONTACT_COOKIE_MESSAGE),
    ] {
        if surface.has_section(section) && !surface.has_cookie_message(section) {
            surface.append_cookie_message(section, text);
        }
    }
}
