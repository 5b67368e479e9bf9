//! Audit CLI commands
//!
//! Read-only views over the audit history, plus export.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use super::{parse_timestamp, PageArgs};
use crate::audit::{AuditAction, AuditFilter};
use crate::config::settings::Settings;
use crate::display::audit::{format_audit_details, format_audit_list, format_audit_statistics};
use crate::error::{RegistryError, RegistryResult};
use crate::export::{export_audit_csv, export_audit_json, export_audit_yaml};
use crate::models::{AuditId, BrandId, UserId};
use crate::services::{AuditService, BrandService};
use crate::storage::Storage;

/// Export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Yaml,
}

/// Audit subcommands
#[derive(Subcommand)]
pub enum AuditCommands {
    /// List audit records, newest first
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show the most recent audit records
    Recent {
        /// Number of records to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// History of one brand (works for deleted brands by ID)
    Brand {
        /// Brand ID, or the name of an existing brand
        brand: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Records made by one user
    User {
        /// User ID
        user_id: UserId,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Records of one action kind
    Action {
        /// create, update, delete or status-change
        action: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Records within a date range (inclusive)
    Range {
        /// Start date (YYYY-MM-DD or RFC 3339)
        start: String,
        /// End date (YYYY-MM-DD or RFC 3339)
        end: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Records whose brand name contains the text
    Search {
        /// Text contained in the brand name (case-insensitive)
        query: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Totals per action kind
    Stats,
    /// Show one audit record with its changes
    Show {
        /// Audit record ID
        id: AuditId,
    },
    /// Export the full audit history
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle an audit command
pub fn handle_audit_command(
    storage: &Storage,
    settings: &Settings,
    cmd: AuditCommands,
) -> RegistryResult<()> {
    let service = AuditService::with_limits(storage, settings.query);

    match cmd {
        AuditCommands::List { page } => {
            let records = service.search(&AuditFilter::default(), page.skip, page.limit)?;
            print!("{}", format_audit_list(&records));
        }

        AuditCommands::Recent { limit } => {
            let records = service.recent(limit)?;
            print!("{}", format_audit_list(&records));
        }

        AuditCommands::Brand { brand, page } => {
            let brand_id = match brand.parse::<BrandId>() {
                Ok(id) => id,
                Err(_) => BrandService::new(storage).resolve(&brand)?.id,
            };
            let records = service.by_brand(brand_id, page.skip, page.limit)?;
            print!("{}", format_audit_list(&records));
        }

        AuditCommands::User { user_id, page } => {
            let records = service.by_user(user_id, page.skip, page.limit)?;
            print!("{}", format_audit_list(&records));
        }

        AuditCommands::Action { action, page } => {
            let action = AuditAction::parse(&action).ok_or_else(|| {
                RegistryError::Validation(format!(
                    "Invalid action: '{}'. Valid actions: create, update, delete, status-change",
                    action
                ))
            })?;
            let records = service.by_action(action, page.skip, page.limit)?;
            print!("{}", format_audit_list(&records));
        }

        AuditCommands::Range { start, end, page } => {
            let start = parse_timestamp(&start, false)?;
            let end = parse_timestamp(&end, true)?;
            let records = service.by_date_range(start, end, page.skip, page.limit)?;
            print!("{}", format_audit_list(&records));
        }

        AuditCommands::Search { query, page } => {
            let records = service.search_by_brand_name(&query, page.skip, page.limit)?;
            print!("{}", format_audit_list(&records));
        }

        AuditCommands::Stats => {
            let stats = service.statistics()?;
            print!("{}", format_audit_statistics(&stats));
        }

        AuditCommands::Show { id } => {
            let record = service.get(id)?;
            print!("{}", format_audit_details(&record));
        }

        AuditCommands::Export { format, output } => match output {
            Some(path) => {
                let file = File::create(&path).map_err(|e| {
                    RegistryError::Export(format!("Failed to create {}: {}", path.display(), e))
                })?;
                let mut writer = BufWriter::new(file);
                write_export(storage, format, &mut writer)?;
                writer
                    .flush()
                    .map_err(|e| RegistryError::Export(e.to_string()))?;
                println!("Exported audit history to {}", path.display());
            }
            None => {
                let stdout = io::stdout();
                let mut writer = stdout.lock();
                write_export(storage, format, &mut writer)?;
                if format == ExportFormat::Json {
                    writeln!(writer).map_err(|e| RegistryError::Export(e.to_string()))?;
                }
            }
        },
    }

    Ok(())
}

fn write_export<W: Write>(storage: &Storage, format: ExportFormat, writer: W) -> RegistryResult<()> {
    match format {
        ExportFormat::Csv => export_audit_csv(&storage.audit.get_all()?, writer),
        ExportFormat::Json => export_audit_json(storage, writer),
        ExportFormat::Yaml => export_audit_yaml(storage, writer),
    }
}
