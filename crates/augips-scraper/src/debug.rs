//! Debug artifacts: fetched HTML and browser screenshots saved when the
//! CLI runs with `--debug`.
//!
//! Writing an artifact never fails a scrape; problems are logged and the
//! caller carries on.

use std::path::{Path, PathBuf};

use chrono::Local;

#[derive(Debug, Clone, Default)]
pub struct DebugArtifacts {
    dir: Option<PathBuf>,
}

impl DebugArtifacts {
    /// Artifacts are written under `dir`.
    #[must_use]
    pub fn enabled(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// Every save is a no-op.
    #[must_use]
    pub fn disabled() -> Self {
        Self { dir: None }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.dir.is_some()
    }

    /// Save an HTML snapshot as `{scraper}_{label}_{timestamp}.html`.
    pub fn save_html(&self, scraper: &str, label: &str, html: &str) -> Option<PathBuf> {
        self.save(scraper, label, "html", html.as_bytes())
    }

    /// Save a PNG screenshot as `{scraper}_{label}_{timestamp}.png`.
    pub fn save_screenshot(&self, scraper: &str, label: &str, png: &[u8]) -> Option<PathBuf> {
        self.save(scraper, label, "png", png)
    }

    fn save(&self, scraper: &str, label: &str, ext: &str, bytes: &[u8]) -> Option<PathBuf> {
        let dir = self.dir.as_deref()?;
        let path = artifact_path(dir, scraper, label, ext);
        let result = std::fs::create_dir_all(dir).and_then(|()| std::fs::write(&path, bytes));
        match result {
            Ok(()) => {
                tracing::debug!(
                    path = %path.display(),
                    bytes = bytes.len(),
                    "saved debug artifact"
                );
                Some(path)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to save debug artifact");
                None
            }
        }
    }
}

fn artifact_path(dir: &Path, scraper: &str, label: &str, ext: &str) -> PathBuf {
    let stamp = Local::now().format("%Y%m%dT%H%M%S%.3f");
    dir.join(format!("{scraper}_{label}_{stamp}.{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_writes_nothing() {
        let artifacts = DebugArtifacts::disabled();
        assert!(!artifacts.is_enabled());
        assert!(artifacts.save_html("ikea", "page", "<html></html>").is_none());
    }

    #[test]
    fn enabled_writes_named_files() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("debug");
        let artifacts = DebugArtifacts::enabled(&dir);

        let html_path = artifacts
            .save_html("oreilly", "stores", "<html>hi</html>")
            .expect("html artifact written");
        let png_path = artifacts
            .save_screenshot("oreilly", "no_selectors", &[0x89, b'P', b'N', b'G'])
            .expect("png artifact written");

        let html_name = html_path.file_name().unwrap().to_string_lossy().to_string();
        assert!(html_name.starts_with("oreilly_stores_"));
        assert!(html_name.ends_with(".html"));
        assert_eq!(std::fs::read_to_string(&html_path).unwrap(), "<html>hi</html>");

        assert!(png_path.to_string_lossy().ends_with(".png"));
        assert_eq!(std::fs::read(&png_path).unwrap().len(), 4);
    }
}
