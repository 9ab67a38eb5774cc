use crate::error::{CatalogError, Result};
use crate::source::FsDirectory;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONTROLS_DIR: &str = "controls";
pub const DEFAULT_DOCUMENTS_DIR: &str = "documents";
pub const DEFAULT_SELECTIONS_DIR: &str = "selected_documents_agent";
pub const DEFAULT_TEMPLATE_FILE_NAME: &str = "template.md";

/// Options for the selection index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOptions {
    /// Compared case-insensitively against every file name
    pub template_file_name: String,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            template_file_name: DEFAULT_TEMPLATE_FILE_NAME.to_string(),
        }
    }
}

/// Where the three input folders live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub controls_dir: PathBuf,
    pub documents_dir: PathBuf,
    pub selections_dir: PathBuf,
    pub selection: SelectionOptions,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            controls_dir: PathBuf::from(DEFAULT_CONTROLS_DIR),
            documents_dir: PathBuf::from(DEFAULT_DOCUMENTS_DIR),
            selections_dir: PathBuf::from(DEFAULT_SELECTIONS_DIR),
            selection: SelectionOptions::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalogConfig {
    controls_dir: Option<PathBuf>,
    documents_dir: Option<PathBuf>,
    selections_dir: Option<PathBuf>,
    template_file_name: Option<String>,
}

impl CatalogConfig {
    /// Defaults with every folder resolved under `base`.
    pub fn rooted_at(base: &Path) -> Self {
        Self::default().resolve_against(base)
    }

    /// Parse TOML text. Relative folders stay relative.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let raw: RawCatalogConfig =
            toml::from_str(text).map_err(|e| CatalogError::config(e.to_string()))?;
        let defaults = Self::default();
        let cfg = Self {
            controls_dir: raw.controls_dir.unwrap_or(defaults.controls_dir),
            documents_dir: raw.documents_dir.unwrap_or(defaults.documents_dir),
            selections_dir: raw.selections_dir.unwrap_or(defaults.selections_dir),
            selection: SelectionOptions {
                template_file_name: raw
                    .template_file_name
                    .unwrap_or(defaults.selection.template_file_name),
            },
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read a TOML file; relative folders resolve against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::config(format!("reading {}: {e}", path.display())))?;
        let cfg = Self::from_toml_str(&text)
            .map_err(|e| CatalogError::config(format!("{}: {e}", path.display())))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(cfg.resolve_against(base))
    }

    pub fn resolve_against(mut self, base: &Path) -> Self {
        for dir in [
            &mut self.controls_dir,
            &mut self.documents_dir,
            &mut self.selections_dir,
        ] {
            if dir.is_relative() {
                let joined = base.join(&*dir);
                *dir = joined;
            }
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.selection.template_file_name.trim().is_empty() {
            return Err(CatalogError::config("template_file_name must not be empty"));
        }
        for (key, dir) in [
            ("controls_dir", &self.controls_dir),
            ("documents_dir", &self.documents_dir),
            ("selections_dir", &self.selections_dir),
        ] {
            if dir.as_os_str().is_empty() {
                return Err(CatalogError::config(format!("{key} must not be empty")));
            }
        }
        Ok(())
    }

    pub fn controls_source(&self) -> FsDirectory {
        FsDirectory::new(&self.controls_dir)
    }

    pub fn documents_source(&self) -> FsDirectory {
        FsDirectory::new(&self.documents_dir)
    }

    pub fn selections_source(&self) -> FsDirectory {
        FsDirectory::new(&self.selections_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn empty_toml_yields_defaults() {
        assert_eq!(CatalogConfig::from_toml_str("").unwrap(), CatalogConfig::default());
    }

    #[test]
    fn partial_toml_overrides_fields() {
        let cfg = CatalogConfig::from_toml_str(
            r#"
selections_dir = "selected_documents"
template_file_name = "skeleton.md"
"#,
        )
        .unwrap();
        assert_eq!(cfg.selections_dir, PathBuf::from("selected_documents"));
        assert_eq!(cfg.controls_dir, PathBuf::from(DEFAULT_CONTROLS_DIR));
        assert_eq!(cfg.selection.template_file_name, "skeleton.md");
    }

    #[test]
    fn rejects_unknown_keys_and_empty_template() {
        assert!(CatalogConfig::from_toml_str("control_dir = \"x\"").is_err());
        assert!(matches!(
            CatalogConfig::from_toml_str("template_file_name = \" \""),
            Err(CatalogError::Config(_))
        ));
    }

    #[test]
    fn load_resolves_relative_dirs_against_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("control-map.toml");
        std::fs::write(&path, "documents_dir = \"docs\"\ncontrols_dir = \"/abs/controls\"\n").unwrap();

        let cfg = CatalogConfig::load(&path).unwrap();
        assert_eq!(cfg.documents_dir, temp.path().join("docs"));
        assert_eq!(cfg.controls_dir, PathBuf::from("/abs/controls"));
        assert_eq!(cfg.selections_dir, temp.path().join(DEFAULT_SELECTIONS_DIR));
    }
}
