//! Save-file maintenance CLI
//!
//! Inspect a stored session snapshot, list or delete library rosters, and
//! export the configured roster as a CSV playing-time template.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use ft_core::export::write_csv;
use ft_core::{GameSession, SaveManager};

#[derive(Parser)]
#[command(name = "ft_cli")]
#[command(about = "Inspect and convert fair-play clock save files", long_about = None)]
struct Cli {
    /// Directory holding session.dat / rosters.dat
    #[arg(long, default_value = "saves")]
    dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the stored session snapshot
    Inspect {
        /// Emit the full JSON view instead of a summary
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// List rosters stored in the library
    Rosters,

    /// Delete one roster from the library
    DeleteRoster {
        /// Name of the roster to delete
        name: String,
    },

    /// Write the stored roster as a CSV playing-time table template
    ExportCsv {
        /// Output CSV file path
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let manager = SaveManager::new(&cli.dir);

    match cli.command {
        Commands::Inspect { json } => inspect(&manager, json),
        Commands::Rosters => list_rosters(&manager),
        Commands::DeleteRoster { name } => delete_roster(&manager, &name),
        Commands::ExportCsv { out } => export_csv(&manager, &out),
    }
}

fn load_session(manager: &SaveManager) -> Result<GameSession> {
    let snapshot = manager
        .try_load_session()
        .with_context(|| format!("no readable session snapshot in {:?}", manager.session_path()))?;
    Ok(GameSession::from_snapshot(&snapshot))
}

fn inspect(manager: &SaveManager, json: bool) -> Result<()> {
    let session = load_session(manager)?;

    if json {
        println!("{}", ft_core::session_state_json(&session)?);
        return Ok(());
    }

    let config = session.config();
    println!("roster:    {}", session.roster_name());
    println!(
        "format:    {:?} ({} x {} min)",
        config.format(),
        config.period_count(),
        config.period_minutes()
    );
    println!("players:   {} ({} on court)", config.num_players(), config.on_court());
    println!(
        "timeouts:  {} used of {} ({} overtimes)",
        session.timeouts().used(),
        session.timeouts().cap(),
        session.timeouts().overtimes()
    );
    println!("overtime:  {} ms elapsed", session.overtime().elapsed_ms());
    for player in session.roster().players() {
        println!("  #{:<3} {}", player.id(), player.name());
    }
    Ok(())
}

fn list_rosters(manager: &SaveManager) -> Result<()> {
    let library = manager.load_rosters();
    if library.is_empty() {
        println!("roster library is empty");
        return Ok(());
    }
    for (name, roster) in library.iter() {
        println!("{:<24} {} players, {} on court", name, roster.num_players, roster.on_court);
    }
    Ok(())
}

fn delete_roster(manager: &SaveManager, name: &str) -> Result<()> {
    let mut library = manager.load_rosters();
    if !library.delete(name) {
        bail!("no roster named {:?}", name);
    }
    manager.store_rosters(&library).context("failed to store roster library")?;
    println!("deleted roster {:?}", name);
    Ok(())
}

fn export_csv(manager: &SaveManager, out: &Path) -> Result<()> {
    let session = load_session(manager)?;
    let file = std::fs::File::create(out)
        .with_context(|| format!("failed to create {:?}", out))?;
    write_csv(file, session.config().format(), session.roster())
        .context("failed to write CSV")?;
    println!("wrote {:?}", out);
    Ok(())
}
