//! Initialize a physarum project.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::config::{Config, CONFIG_FILE};

pub fn run(path: Option<PathBuf>, force: bool) -> Result<()> {
    let base_path = match path {
        Some(p) => p,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    println!("{} Initializing physarum project...", "→".blue());

    std::fs::create_dir_all(&base_path)
        .with_context(|| format!("Failed to create {}", base_path.display()))?;

    let config_path = write_default_config(&base_path, force)?;
    match config_path {
        Some(path) => println!("  {} Created {}", "✓".green(), path.display()),
        None => println!(
            "  {} {} already exists (use --force to overwrite)",
            "•".yellow(),
            base_path.join(CONFIG_FILE).display()
        ),
    }

    println!();
    println!("{} Project initialized!", "✓".green().bold());
    println!();
    println!("Next steps:");
    println!("  {} edit {}", "1.".blue(), CONFIG_FILE);
    println!("  {} physarum config validate", "2.".blue());
    println!("  {} physarum run --output report.json", "3.".blue());

    Ok(())
}

/// Write the default config into `dir`. Returns `None` if one exists and `force` is off.
fn write_default_config(dir: &Path, force: bool) -> Result<Option<PathBuf>> {
    let config_path = dir.join(CONFIG_FILE);
    if config_path.exists() && !force {
        return Ok(None);
    }
    Config::default().save(&config_path)?;
    Ok(Some(config_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_loadable_defaults() {
        let dir = tempdir().unwrap();
        let path = write_default_config(dir.path(), false).unwrap().unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn keeps_existing_config_unless_forced() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[run]\nsteps = 3\n").unwrap();

        assert!(write_default_config(dir.path(), false).unwrap().is_none());
        assert_eq!(Config::load_from(&path).unwrap().run.steps, 3);

        assert!(write_default_config(dir.path(), true).unwrap().is_some());
        assert_eq!(Config::load_from(&path).unwrap().run.steps, 1000);
    }
}
