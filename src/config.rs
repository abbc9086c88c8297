use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

pub const CONFIG_ENV: &str = "LANDING_CONFIG";
pub const CONSENT_FILE_ENV: &str = "LANDING_CONSENT_FILE";

/// A `.section` block: document-space top and number of direct children.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SectionLayout {
    pub top: f32,
    pub children: usize,
}

/// Which mount points the page markup provides. A missing one leaves its
/// controller inactive.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    /// `#hero-canvas`
    pub hero_canvas: bool,
    /// `.header__burger` + `.header__nav`
    pub navigation: bool,
    /// `.marquee-wrapper` width in px, if present.
    pub marquee_width: Option<f32>,
    /// `#contactForm`
    pub contact_form: bool,
    /// `#cookiePopup` + `#acceptCookies`
    pub cookie_popup: bool,
    pub sections: Vec<SectionLayout>,
    /// Total document height in px.
    pub document_height: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            hero_canvas: true,
            navigation: true,
            marquee_width: Some(2400.0),
            contact_form: true,
            cookie_popup: true,
            sections: vec![
                SectionLayout { top: 900.0, children: 3 },
                SectionLayout { top: 1700.0, children: 4 },
                SectionLayout { top: 2600.0, children: 2 },
                SectionLayout { top: 3400.0, children: 5 },
            ],
            document_height: 4400.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// 0xRRGGBB clear color behind the particles.
    pub background: u32,
    pub page: PageLayout,
    /// Where the consent flag lives. `None` keeps it in memory.
    pub consent_file: Option<PathBuf>,
    pub consent_delay_ms: u64,
    pub submit_latency_ms: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Landing FX".to_string(),
            width: 1280,
            height: 800,
            background: 0x0A0A12,
            page: PageLayout::default(),
            consent_file: Some(PathBuf::from("consent.json")),
            consent_delay_ms: 2000,
            submit_latency_ms: 1500,
        }
    }
}

impl SiteConfig {
    /// Parse a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Defaults, overridden by the file named in `LANDING_CONFIG` and the
    /// `LANDING_CONSENT_FILE` variable. Call after `.env` is loaded.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match env::var_os(CONFIG_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                log::info!("loading config from {}", path.display());
                Self::from_file(&path)?
            }
            None => Self::default(),
        };

        if let Some(path) = env::var_os(CONSENT_FILE_ENV) {
            config.consent_file = Some(PathBuf::from(path));
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::WindowSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn consent_delay(&self) -> Duration {
        Duration::from_millis(self.consent_delay_ms)
    }

    pub fn submit_latency(&self) -> Duration {
        Duration::from_millis(self.submit_latency_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SiteConfig::from_json(r#"{ "title": "Студия", "page": { "contact_form": false } }"#)
            .unwrap();
        assert_eq!(config.title, "Студия");
        assert_eq!(config.width, 1280);
        assert!(!config.page.contact_form);
        assert!(config.page.hero_canvas);
        assert_eq!(config.submit_latency(), Duration::from_millis(1500));
    }

    #[test]
    fn sections_parse() {
        let config = SiteConfig::from_json(
            r#"{ "page": { "sections": [ { "top": 100, "children": 2 } ], "marquee_width": null } }"#,
        )
        .unwrap();
        assert_eq!(config.page.sections, vec![SectionLayout { top: 100.0, children: 2 }]);
        assert_eq!(config.page.marquee_width, None);
    }

    #[test]
    fn example_config_parses() {
        let config = SiteConfig::from_json(include_str!("../landing.example.json")).unwrap();
        assert_eq!(config.background, 0x0A0A12);
        assert_eq!(config.page.sections.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_window_is_rejected() {
        let config = SiteConfig::from_json(r#"{ "width": 0 }"#).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::WindowSize { .. })));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = SiteConfig::from_file(Path::new("/nonexistent/landing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
