use crate::config::{merge::Merge, types::*};
use crate::constants::FAMILY_ENV_VAR;
use crate::family::FamilyKind;
use anyhow::{Context, Result, anyhow};
use std::path::PathBuf;

pub struct ConfigBuilder {
    config_input: ConfigInput,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config_input: ConfigInput::default(),
        }
    }

    pub fn with_file(mut self, file_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(file_input);
        self
    }

    pub fn with_cli_args(mut self, cli_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(cli_input);
        self
    }

    pub fn resolve(self) -> Result<Config> {
        let defaults = Config::default();

        Ok(Config {
            migration: self.resolve_migration(&defaults.migration)?,
            output: self.resolve_output(&defaults.output)?,
        })
    }

    fn resolve_migration(&self, defaults: &Migration) -> Result<Migration> {
        let mig_input = self.config_input.migration.as_ref();

        let family = match mig_input.and_then(|m| m.family) {
            Some(family) => family,
            None => match std::env::var(FAMILY_ENV_VAR) {
                Ok(value) => value
                    .parse::<FamilyKind>()
                    .with_context(|| format!("Invalid {} value", FAMILY_ENV_VAR))?,
                Err(_) => defaults.family,
            },
        };

        Ok(Migration {
            family,
            reject_unknown_versions: mig_input
                .and_then(|m| m.reject_unknown_versions)
                .unwrap_or(defaults.reject_unknown_versions),
        })
    }

    fn resolve_output(&self, defaults: &Output) -> Result<Output> {
        let out_input = self.config_input.output.as_ref();

        let output = Output {
            format: out_input
                .and_then(|o| o.format)
                .unwrap_or(defaults.format),
            dir: out_input
                .and_then(|o| o.dir.as_ref())
                .map(PathBuf::from)
                .or_else(|| defaults.dir.clone()),
            in_place: out_input
                .and_then(|o| o.in_place)
                .unwrap_or(defaults.in_place),
        };

        if output.in_place && output.dir.is_some() {
            return Err(anyhow!(
                "Output directory and in-place mode are mutually exclusive. Use --in-place or --output-dir, not both"
            ));
        }

        Ok(output)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
