use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

use docchain_render::RenderConfig;
use docchain_server::ServerConfig;

/// Top-level `docchain.toml`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocchainConfig {
    pub render: RenderConfig,
    pub server: ServerConfig,
}

impl DocchainConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DocchainConfig::load(&dir.path().join("docchain.toml")).unwrap();
        assert_eq!(config, DocchainConfig::default());
        assert_eq!(config.render.currency, "AED");
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[render]\ncurrency = \"USD\"\n\n[server]\nseed_guide_chains = false"
        )
        .unwrap();

        let config = DocchainConfig::load(file.path()).unwrap();
        assert_eq!(config.render.currency, "USD");
        assert!(config.render.show_running_balance);
        assert!(!config.server.seed_guide_chains);
        assert_eq!(config.server.bind_addr, ServerConfig::default().bind_addr);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[render\ncurrency = ").unwrap();
        let err = DocchainConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("parsing"));
    }
}
