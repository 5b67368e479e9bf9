//! Brand CLI commands
//!
//! Implements CLI commands for brand management.

use clap::Subcommand;

use super::{IdentityArgs, PageArgs};
use crate::display::brand::{format_brand_details, format_brand_list};
use crate::error::{RegistryError, RegistryResult};
use crate::models::{BrandPatch, BrandStatus, NewBrand};
use crate::services::BrandService;
use crate::storage::Storage;

/// Brand subcommands
#[derive(Subcommand)]
pub enum BrandCommands {
    /// Register a new brand
    Create {
        /// Brand name
        name: String,
        /// Brand owner
        #[arg(short, long)]
        owner: String,
        /// Official registration number (must be unique)
        #[arg(short, long)]
        registration_number: Option<String>,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
        /// Initial status (defaults to PENDING)
        #[arg(short, long)]
        status: Option<String>,
    },
    /// List brands
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show brand details
    Show {
        /// Brand name or ID
        brand: String,
    },
    /// Edit a brand
    Edit {
        /// Brand name or ID
        brand: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New owner
        #[arg(short, long)]
        owner: Option<String>,
        /// New registration number (empty to clear)
        #[arg(short, long)]
        registration_number: Option<String>,
        /// New description (empty to clear)
        #[arg(short, long)]
        description: Option<String>,
        /// New status
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Change a brand's status
    Status {
        /// Brand name or ID
        brand: String,
        /// New status (pending, registered, rejected, expired, cancelled)
        status: String,
    },
    /// Delete a brand (its audit history is kept)
    Delete {
        /// Brand name or ID
        brand: String,
    },
    /// Search brands by name
    Search {
        /// Text contained in the name (case-insensitive)
        query: String,
    },
    /// List brands of an owner
    Owner {
        /// Owner (exact match)
        owner: String,
    },
    /// List brands with a given status
    ByStatus {
        /// Status to filter on
        status: String,
    },
    /// List registered brands
    Active,
}

/// Handle a brand command
pub fn handle_brand_command(
    storage: &Storage,
    identity: &IdentityArgs,
    cmd: BrandCommands,
) -> RegistryResult<()> {
    let service = BrandService::new(storage);

    match cmd {
        BrandCommands::Create {
            name,
            owner,
            registration_number,
            description,
            status,
        } => {
            let ctx = identity.context()?;
            let new = NewBrand {
                name,
                description,
                owner,
                registration_number,
                status: status.as_deref().map(parse_status).transpose()?,
                created_by: ctx.actor.user_id,
            };

            let brand = service.create(new, &ctx)?;
            println!("Created brand: {}", brand.name);
            println!("  Status: {}", brand.status);
            println!("  ID: {}", brand.id);
        }

        BrandCommands::List { page } => {
            let brands = service.list(page.skip, page.limit)?;
            print!("{}", format_brand_list(&brands));
        }

        BrandCommands::Show { brand } => {
            let found = service.resolve(&brand)?;
            print!("{}", format_brand_details(&found));
        }

        BrandCommands::Edit {
            brand,
            name,
            owner,
            registration_number,
            description,
            status,
        } => {
            let ctx = identity.context()?;
            let found = service.resolve(&brand)?;

            let patch = BrandPatch {
                name,
                description,
                owner,
                registration_number,
                status: status.as_deref().map(parse_status).transpose()?,
            };

            if patch.is_empty() {
                println!(
                    "No changes specified. Use --name, --owner, --registration-number, --description or --status."
                );
                return Ok(());
            }

            let updated = service.update(found.id, patch, &ctx)?;
            println!("Updated brand: {}", updated.name);
        }

        BrandCommands::Status { brand, status } => {
            let ctx = identity.context()?;
            let found = service.resolve(&brand)?;
            let status = parse_status(&status)?;

            let updated = service.set_status(found.id, status, &ctx)?;
            println!(
                "Brand '{}' status changed: {} → {}",
                updated.name, found.status, updated.status
            );
        }

        BrandCommands::Delete { brand } => {
            let ctx = identity.context()?;
            let found = service.resolve(&brand)?;

            let deleted = service.delete(found.id, &ctx)?;
            println!("Deleted brand: {} ({})", deleted.name, deleted.id);
        }

        BrandCommands::Search { query } => {
            let brands = service.search_by_name(&query)?;
            print!("{}", format_brand_list(&brands));
        }

        BrandCommands::Owner { owner } => {
            let brands = service.by_owner(&owner)?;
            print!("{}", format_brand_list(&brands));
        }

        BrandCommands::ByStatus { status } => {
            let brands = service.by_status(parse_status(&status)?)?;
            print!("{}", format_brand_list(&brands));
        }

        BrandCommands::Active => {
            let brands = service.active()?;
            print!("{}", format_brand_list(&brands));
        }
    }

    Ok(())
}

fn parse_status(s: &str) -> RegistryResult<BrandStatus> {
    BrandStatus::parse(s).ok_or_else(|| {
        RegistryError::Validation(format!(
            "Invalid status: '{}'. Valid statuses: pending, registered, rejected, expired, cancelled",
            s
        ))
    })
}
