use anyhow::Result;
use studio_booking::core::consent::{ANALYTICS_KEY, CALENDLY_KEY, CONSENT_KEY};
use studio_booking::core::{ConsentTier, KeyValueStore};
use studio_booking::{ConsentManager, FileStore};
use tempfile::TempDir;

/// A new page load reads the same file the previous one wrote.
fn reload(path: &std::path::Path) -> Result<ConsentManager<FileStore>> {
    Ok(ConsentManager::new(FileStore::open(path)?))
}

#[test]
fn test_accept_all_survives_reload() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("storage.json");

    reload(&path)?.accept_all()?;

    let preference = reload(&path)?.load()?;
    assert_eq!(preference.consent, ConsentTier::All);
    assert!(preference.analytics_enabled);
    assert!(preference.calendly_enabled);
    Ok(())
}

#[test]
fn test_accept_essential_survives_reload() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("storage.json");

    reload(&path)?.accept_essential()?;

    let preference = reload(&path)?.load()?;
    assert_eq!(preference.consent, ConsentTier::Essential);
    assert!(!preference.analytics_enabled);
    assert!(!preference.calendly_enabled);
    Ok(())
}

#[test]
fn test_stored_layout_uses_string_values() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("storage.json");

    reload(&path)?.save_custom(true, false)?;

    let store = FileStore::open(&path)?;
    assert_eq!(store.get(CONSENT_KEY)?.as_deref(), Some("custom"));
    assert_eq!(store.get(ANALYTICS_KEY)?.as_deref(), Some("true"));
    assert_eq!(store.get(CALENDLY_KEY)?.as_deref(), Some("false"));

    let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(raw["cookieConsent"], "custom");
    Ok(())
}

#[test]
fn test_missing_file_means_no_consent() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let preference = reload(&temp_dir.path().join("absent.json"))?.load()?;
    assert_eq!(preference.consent, ConsentTier::None);
    assert!(!preference.calendly_enabled);
    Ok(())
}
