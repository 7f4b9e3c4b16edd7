//! Relational schema bootstrap command.

use anyhow::Result;
use colored::Colorize;
use polysync_db::{migrations, SourcePool};

use crate::config::Config;

pub fn execute(config: &Config, seed: bool) -> Result<()> {
    let pool = SourcePool::open(&config.source.path)?;

    migrations::run_migrations(&pool)?;
    println!(
        "{} {}",
        "Relational schema ready:".green().bold(),
        config.source.path.display()
    );

    if seed {
        migrations::seed_demo_data(&pool)?;
        println!("{}", "Demo data seeded.".green());
    }

    Ok(())
}
