use anyhow::{Context, Result};
use fortnight_core::PlannerSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{default_tasks_path, ensure_fortnight_home, fortnight_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageSection,
    pub planner: PlannerSettings,
    pub display: DisplaySection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// Task record file. Defaults to `$FORTNIGHT_HOME/tasks.txt`.
    pub tasks_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// Print the calendar from the last day back to today.
    pub newest_first: bool,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self { newest_first: true }
    }
}

impl Config {
    /// Task file to use: CLI override, then config, then the default path.
    pub fn tasks_path(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        match cli_override.or(self.storage.tasks_file.as_deref()) {
            Some(p) => Ok(p.to_path_buf()),
            None => default_tasks_path(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(fortnight_home()?.join("config.toml"))
}

pub fn parse_config(s: &str) -> Result<Config> {
    let cfg: Config = toml::from_str(s).context("parse config.toml")?;
    cfg.planner
        .validate()
        .map_err(anyhow::Error::msg)
        .context("invalid [planner] section")?;
    Ok(cfg)
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("load {}", p.display()))
}

pub fn save_config(cfg: &Config) -> Result<()> {
    ensure_fortnight_home()?;
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config(cfg: &Config, tasks_path: &Path) -> Result<()> {
    println!("# {}", config_path()?.display());
    println!("# tasks file in use: {}\n", tasks_path.display());
    print!("{}", toml::to_string_pretty(cfg).context("serialize config")?);
    Ok(())
}
