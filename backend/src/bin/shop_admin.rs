//! Operator commands: apply or revert migrations and seed the category registry.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use shop_backend::domain::ports::{CategoryRegistry, SeedOutcome};
use shop_backend::domain::{
    CategoryDraft, CategoryName, CategoryRegistryService, CategoryValidationError, ItemRange,
};
use shop_backend::outbound::persistence::{
    DbPool, DieselCategoryRepository, PoolConfig, revert_all_migrations, run_pending_migrations,
};
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

const SEED_CATEGORY_NAME: &str = "Shop";
const SEED_ITEM_RANGE: i32 = 24;

/// `shop-admin` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "shop-admin",
    about = "Apply or revert schema migrations and seed reference data",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url", global = true)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply every pending embedded migration.
    Migrate,
    /// Insert the default category unless one with that name exists.
    Seed,
    /// Revert every applied migration, dropping all shop data.
    Reset {
        /// Required acknowledgement that every table is dropped.
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let database_url = resolve_database_url(args.database_url)?;

    match args.command {
        Command::Migrate => migrate(&database_url),
        Command::Reset { yes } => reset(&database_url, yes),
        Command::Seed => {
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
            runtime.block_on(seed(&database_url))
        }
    }
}

fn migrate(database_url: &str) -> io::Result<()> {
    let applied = run_pending_migrations(database_url)
        .map_err(|error| io::Error::other(format!("migrate: {error}")))?;
    println!("applied={}", applied.len());
    for version in applied {
        println!("version={version}");
    }
    Ok(())
}

fn reset(database_url: &str, confirmed: bool) -> io::Result<()> {
    if !confirmed {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "reset drops every shop table; pass --yes to confirm",
        ));
    }
    let reverted = revert_all_migrations(database_url)
        .map_err(|error| io::Error::other(format!("reset: {error}")))?;
    println!("reverted={}", reverted.len());
    for version in reverted {
        println!("version={version}");
    }
    Ok(())
}

async fn seed(database_url: &str) -> io::Result<()> {
    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;
    let registry = CategoryRegistryService::new(Arc::new(DieselCategoryRepository::new(pool)));

    let outcome = registry
        .seed(default_category()?)
        .await
        .map_err(|error| io::Error::other(format!("seed failed: {error}")))?;

    let (status, category) = match outcome {
        SeedOutcome::Created(category) => ("created", category),
        SeedOutcome::AlreadyPresent(category) => ("already_present", category),
    };
    println!("status={status}");
    println!("id={}", category.id());
    println!("name={}", category.name());
    println!("item_range={}", category.item_range().get());
    Ok(())
}

fn default_category() -> io::Result<CategoryDraft> {
    let invalid = |error: CategoryValidationError| {
        io::Error::new(io::ErrorKind::InvalidData, error.to_string())
    };
    Ok(CategoryDraft {
        name: CategoryName::new(SEED_CATEGORY_NAME).map_err(invalid)?,
        item_range: ItemRange::new(SEED_ITEM_RANGE).map_err(invalid)?,
    })
}

fn resolve_database_url(explicit: Option<String>) -> io::Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "--database-url must not be empty when provided",
            ));
        }
        return Ok(value);
    }

    let from_env = env::var("DATABASE_URL").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "database URL missing: set --database-url or DATABASE_URL",
        )
    })?;
    if from_env.trim().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "DATABASE_URL must not be empty",
        ));
    }
    Ok(from_env)
}
