//! Cookie-consent banner backed by a persisted boolean flag.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConsentError;

pub const CONSENT_KEY: &str = "cookiesAccepted";
pub const CONSENT_VALUE: &str = "true";
pub const DEFAULT_BANNER_DELAY: Duration = Duration::from_secs(2);

/// Key-value persistence for the consent flag.
pub trait ConsentStore {
    fn is_accepted(&self) -> Result<bool, ConsentError>;
    fn accept(&mut self) -> Result<(), ConsentError>;
}

impl<S: ConsentStore + ?Sized> ConsentStore for Box<S> {
    fn is_accepted(&self) -> Result<bool, ConsentError> {
        (**self).is_accepted()
    }

    fn accept(&mut self) -> Result<(), ConsentError> {
        (**self).accept()
    }
}

/// Volatile store, used in tests and when no file is configured.
#[derive(Debug, Default, Clone)]
pub struct MemoryConsentStore {
    accepted: bool,
}

impl MemoryConsentStore {
    pub fn new(accepted: bool) -> Self {
        Self { accepted }
    }
}

impl ConsentStore for MemoryConsentStore {
    fn is_accepted(&self) -> Result<bool, ConsentError> {
        Ok(self.accepted)
    }

    fn accept(&mut self) -> Result<(), ConsentError> {
        self.accepted = true;
        Ok(())
    }
}

/// JSON object on disk, e.g. `{"cookiesAccepted":"true"}`.
/// Other keys in the file are preserved.
#[derive(Debug, Clone)]
pub struct FileConsentStore {
    path: PathBuf,
}

impl FileConsentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<BTreeMap<String, String>, ConsentError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(ConsentError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&text).map_err(|source| ConsentError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }
}

impl ConsentStore for FileConsentStore {
    fn is_accepted(&self) -> Result<bool, ConsentError> {
        Ok(self.load()?.get(CONSENT_KEY).map(String::as_str) == Some(CONSENT_VALUE))
    }

    fn accept(&mut self) -> Result<(), ConsentError> {
        let mut entries = self.load()?;
        entries.insert(CONSENT_KEY.to_string(), CONSENT_VALUE.to_string());

        let io_err = |source: std::io::Error| ConsentError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(&entries).map_err(|source| ConsentError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(io_err)
    }
}

/// Shows itself after a delay unless consent was already given.
pub struct ConsentBanner<S: ConsentStore> {
    store: S,
    delay: Duration,
    /// Waiting for the delay to elapse before showing.
    pending: bool,
    visible: bool,
}

impl<S: ConsentStore> ConsentBanner<S> {
    /// Reads the persisted flag once. An unreadable store counts as "not
    /// accepted" so the banner still appears.
    pub fn new(store: S, delay: Duration) -> Self {
        let accepted = store.is_accepted().unwrap_or_else(|e| {
            log::warn!("consent flag unreadable, showing banner: {}", e);
            false
        });

        Self {
            store,
            delay,
            pending: !accepted,
            visible: false,
        }
    }

    /// `elapsed` is time since page startup.
    pub fn tick(&mut self, elapsed: Duration) {
        if self.pending && elapsed >= self.delay {
            self.pending = false;
            self.visible = true;
            log::info!("cookie banner shown");
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Persist the flag and hide. The banner is hidden even if persisting
    /// fails; the error is returned so the host can log it.
    pub fn accept(&mut self) -> Result<(), ConsentError> {
        self.pending = false;
        self.visible = false;
        self.store.accept()?;
        log::info!("cookie consent accepted");
        Ok(())
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "landing-fx-{}-{}-{}.json",
            name,
            std::process::id(),
            rand::random::<u32>()
        ))
    }

    #[test]
    fn shows_after_delay_when_absent() {
        let mut banner = ConsentBanner::new(MemoryConsentStore::default(), DEFAULT_BANNER_DELAY);
        banner.tick(Duration::from_millis(1999));
        assert!(!banner.is_visible());
        banner.tick(Duration::from_secs(2));
        assert!(banner.is_visible());
    }

    #[test]
    fn never_shows_when_already_accepted() {
        let mut banner = ConsentBanner::new(MemoryConsentStore::new(true), DEFAULT_BANNER_DELAY);
        banner.tick(Duration::from_secs(60));
        assert!(!banner.is_visible());
    }

    #[test]
    fn accept_hides_and_persists() {
        let mut banner = ConsentBanner::new(MemoryConsentStore::default(), DEFAULT_BANNER_DELAY);
        banner.tick(Duration::from_secs(3));
        banner.accept().unwrap();
        assert!(!banner.is_visible());
        banner.tick(Duration::from_secs(10));
        assert!(!banner.is_visible());

        // Next page load with the same store.
        let mut reloaded = ConsentBanner::new(banner.into_store(), DEFAULT_BANNER_DELAY);
        reloaded.tick(Duration::from_secs(10));
        assert!(!reloaded.is_visible());
    }

    #[test]
    fn accept_before_delay_cancels_showing() {
        let mut banner = ConsentBanner::new(MemoryConsentStore::default(), DEFAULT_BANNER_DELAY);
        banner.accept().unwrap();
        banner.tick(Duration::from_secs(5));
        assert!(!banner.is_visible());
    }

    #[test]
    fn file_store_round_trip() {
        let path = temp_path("consent");
        let mut store = FileConsentStore::new(&path);
        assert!(!store.is_accepted().unwrap());

        store.accept().unwrap();
        assert!(FileConsentStore::new(&path).is_accepted().unwrap());

        let raw: BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.get("cookiesAccepted").map(String::as_str), Some("true"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn corrupt_file_still_shows_banner() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json").unwrap();

        let store = FileConsentStore::new(&path);
        assert!(matches!(store.is_accepted(), Err(ConsentError::Corrupt { .. })));

        let mut banner = ConsentBanner::new(store, Duration::ZERO);
        banner.tick(Duration::ZERO);
        assert!(banner.is_visible());

        let _ = fs::remove_file(&path);
    }
}
