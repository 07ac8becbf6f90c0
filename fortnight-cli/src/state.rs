use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$FORTNIGHT_HOME`, else `~/.fortnight`.
pub fn fortnight_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("FORTNIGHT_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set (or set FORTNIGHT_HOME)")?;
    Ok(PathBuf::from(home).join(".fortnight"))
}

pub fn ensure_fortnight_home() -> Result<PathBuf> {
    let dir = fortnight_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn default_tasks_path() -> Result<PathBuf> {
    Ok(fortnight_home()?.join("tasks.txt"))
}
