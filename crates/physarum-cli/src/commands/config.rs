//! Show and check the effective configuration.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::{find_config_file, Config};

pub fn show(json: bool) -> Result<()> {
    let config = Config::load()?;
    if json {
        let content =
            serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
        println!("{content}");
    } else {
        print_source();
        print!("{}", config.to_toml()?);
    }
    Ok(())
}

pub fn validate() -> Result<()> {
    let config = Config::load()?;
    print_source();
    config.validate()?;

    let field = &config.field;
    let run = &config.run;
    println!("{} Configuration is valid", "✓".green().bold());
    println!(
        "  Field:     {}x{} (decay {}, diffusion {})",
        field.width.to_string().cyan(),
        field.height.to_string().cyan(),
        field.decay,
        field.diffusion_rate
    );
    println!("  Particles: {}", config.particles.count.to_string().cyan());
    println!(
        "  Run:       {} trials x {} steps",
        run.trials.to_string().cyan(),
        run.steps.to_string().cyan()
    );
    Ok(())
}

fn print_source() {
    let source = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_file(&cwd));
    match source {
        Some(path) => println!("{} {}", "#".dimmed(), path.display().to_string().dimmed()),
        None => println!("{}", "# no physarum.toml found, using defaults".dimmed()),
    }
}
