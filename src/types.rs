use std::path::PathBuf;

use anyhow::Context;

use crate::cli::Cli;

/// Run configuration, resolved once at startup and passed to whatever needs it.
#[derive(Debug, Clone)]
pub struct Settings {
    pub namespace: String,
    pub kubeconfig: PathBuf,
    pub openai_key: Option<String>,
    pub model: String,
}

impl Settings {
    /// Resolve settings from parsed flags and the process environment.
    pub fn from_env(cli: Cli) -> anyhow::Result<Self> {
        let home = std::env::var("HOME").context("HOME is not set, cannot locate kubeconfig")?;
        let key = std::env::var("OPENAI_KEY").ok();
        Ok(Self::from_parts(cli, &home, key))
    }

    pub fn from_parts(cli: Cli, home: &str, openai_key: Option<String>) -> Self {
        Self {
            namespace: cli.namespace,
            kubeconfig: PathBuf::from(home).join(".kube").join("config"),
            openai_key: openai_key.filter(|k| !k.is_empty()),
            model: cli.model,
        }
    }
}
