//! `postulog`: command-line job-application tracker.
//!
//! # Usage
//!
//! ```text
//! postulog add --company Acme --role Buyer --next 2024-06-10
//! postulog list --status Interview --search lima
//! postulog export -o -
//! postulog --store /tmp/jobs.db agenda
//! ```

mod form;
mod render;
mod settings;

use std::{io::Write as _, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use form::FieldArgs;
use postulog_core::{
  application::today,
  query::{ApplicationQuery, Selection},
  store::Gateway,
  tracker::Tracker,
};
use postulog_store_sqlite::SqliteSlots;
use render::Painter;
use settings::{DEFAULT_CONFIG_PATH, Settings, expand_tilde};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "postulog", version, about = "Track job applications")]
struct Cli {
  /// Path to a TOML config file (store_path, slot_key).
  #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_PATH)]
  config: PathBuf,

  /// SQLite database to use instead of the configured one.
  #[arg(long, value_name = "FILE", env = "POSTULOG_STORE")]
  store: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Record a new application.
  Add(FieldArgs),
  /// Change fields of an existing application.
  Edit {
    /// Id or unique id prefix.
    id:     String,
    #[command(flatten)]
    fields: FieldArgs,
  },
  /// Delete an application.
  Rm {
    /// Id or unique id prefix.
    id: String,
  },
  /// Print every field of one application.
  Show {
    /// Id or unique id prefix.
    id: String,
  },
  /// List applications, newest first.
  List {
    /// Only this status ("All" for every status).
    #[arg(long, default_value = "All")]
    status:   String,
    /// Only this priority ("All" for every priority).
    #[arg(long, default_value = "All")]
    priority: String,
    /// Case-insensitive text search over most fields.
    #[arg(short, long, default_value = "")]
    search:   String,
  },
  /// Count applications per status.
  Stats,
  /// Upcoming next actions, grouped by day.
  Agenda,
  /// Write every application as CSV.
  Export {
    /// Output file, or `-` for stdout. Defaults to postulog_<today>.csv.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
  },
  /// Add the applications in a CSV file in front of the existing ones.
  Import {
    file: PathBuf,
  },
  /// Add two sample applications.
  Seed,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let mut settings = Settings::load(&cli.config)?;
  if let Some(store) = cli.store {
    settings.store_path = expand_tilde(&store);
  }
  tracing::debug!(?settings, "resolved settings");

  let slots = SqliteSlots::open(&settings.store_path).with_context(|| {
    format!("failed to open store at {}", settings.store_path.display())
  })?;
  let mut tracker = Tracker::open(Gateway::new(slots, settings.slot_key));

  run(cli.command, &mut tracker, &Painter::detect())
}

fn run(
  command: Command,
  tracker: &mut Tracker<SqliteSlots>,
  painter: &Painter,
) -> Result<()> {
  match command {
    Command::Add(fields) => {
      let app = fields.build(today())?;
      let id = app.id;
      tracker.create(app)?;
      if let Some(app) = tracker.get(id) {
        println!("{}", render::row(painter, app));
      }
    }
    Command::Edit { id, fields } => {
      let mut app = tracker.find_by_prefix(&id)?.clone();
      fields.apply(&mut app)?;
      let id = app.id;
      tracker.update(app)?;
      if let Some(app) = tracker.get(id) {
        println!("{}", render::row(painter, app));
      }
    }
    Command::Rm { id } => {
      let app = tracker.find_by_prefix(&id)?;
      let (id, company) = (app.id, app.company.clone());
      tracker.delete(id)?;
      println!("Eliminado: {company} ({id})");
    }
    Command::Show { id } => {
      print!("{}", render::detail(painter, tracker.find_by_prefix(&id)?));
    }
    Command::List {
      status,
      priority,
      search,
    } => {
      let query = ApplicationQuery {
        status:   status.parse::<Selection<_>>()?,
        priority: priority.parse::<Selection<_>>()?,
        text:     search,
      };
      print!("{}", render::table(painter, &tracker.list(&query)));
    }
    Command::Stats => print!("{}", render::stats(painter, &tracker.counts())),
    Command::Agenda => print!("{}", render::agenda(painter, &tracker.agenda())),
    Command::Export { output } => {
      let doc = postulog_csv::export_document(tracker.applications());
      let path = output
        .unwrap_or_else(|| PathBuf::from(postulog_csv::export_file_name(today())));
      if path.as_os_str() == "-" {
        std::io::stdout()
          .write_all(doc.as_bytes())
          .context("failed to write to stdout")?;
      } else {
        std::fs::write(&path, doc)
          .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!(
          "Exportadas {} postulaciones a {}",
          tracker.applications().len(),
          path.display()
        );
      }
    }
    Command::Import { file } => {
      let bytes = std::fs::read(&file)
        .with_context(|| format!("failed to read {}", file.display()))?;
      let records = postulog_csv::import_bytes(&bytes)
        .with_context(|| format!("failed to import {}", file.display()))?;
      let count = records.len();
      tracker.prepend(records)?;
      tracing::info!(count, file = %file.display(), "imported applications");
      println!("CSV importado: {count} postulaciones");
    }
    Command::Seed => {
      tracker.seed_demo(today())?;
      println!("Datos de ejemplo agregados");
    }
  }
  Ok(())
}
