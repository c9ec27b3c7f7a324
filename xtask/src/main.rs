// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! Lint, build, and test shortcuts for the workspace, plus a migration
//! check that needs no external services:
//!
//! - `cargo xtask check-migrations` applies the embedded `SQLite` migrations
//!   to an in-memory database, compares the resulting schema with the
//!   Diesel `table!` declarations, then reverts and re-applies every
//!   migration to prove the down scripts are clean.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{io, process::Output};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    eyre::{bail, eyre, Context},
    Result,
};
use diesel::sql_types::{Integer, Text};
use diesel::{QueryableByName, SqliteConnection};
use duct::cmd;
use std::collections::BTreeMap;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

/// Diesel schema the migrations must produce, relative to the workspace root.
const DIESEL_SCHEMA_PATH: &str = "crates/persistence/src/diesel_schema.rs";

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Everything CI runs: lint, build, test, then the migration check
    CI,

    /// Build every target in the workspace
    #[command(visible_alias = "b")]
    Build,

    /// Type-check every target without producing binaries
    #[command(visible_alias = "c")]
    Check,

    /// Apply, compare, revert and re-apply the `SQLite` migrations
    #[command(visible_alias = "cm")]
    CheckMigrations,

    /// Clippy with warnings denied, then a formatting check
    #[command(visible_alias = "l")]
    Lint,

    /// Format the workspace (or only check it with `--check`)
    Fmt {
        /// Fail instead of rewriting files
        #[arg(long)]
        check: bool,
    },

    /// Run the workspace test suites
    #[command(visible_alias = "t")]
    Test,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => run_cargo(vec!["build", "--workspace", "--all-targets"]),
            Self::Check => run_cargo(vec!["check", "--workspace", "--all-targets"]),
            Self::CheckMigrations => check_migrations(),
            Self::Lint => lint(),
            Self::Fmt { check } => fmt(check),
            Self::Test => run_cargo(vec!["test", "--workspace", "--all-targets"]),
        }
    }
}

fn ci() -> Result<()> {
    lint()?;
    Command::Build.run()?;
    Command::Test.run()?;
    check_migrations()
}

fn lint() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--workspace",
        "--all-targets",
        "--",
        "-D",
        "warnings",
    ])?;
    fmt(true)
}

/// Formatting uses nightly rustfmt for the workspace's import grouping.
fn fmt(check: bool) -> Result<()> {
    let mut args: Vec<&str> = vec!["fmt", "--all"];
    if check {
        args.push("--check");
    }
    cmd("cargo", args)
        // cargo sets CARGO for subcommands, which would pin the stable toolchain
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// Verify the embedded migrations against the Diesel schema.
///
/// ## What This Command Does
///
/// 1. Applies every migration to a fresh in-memory `SQLite` database
/// 2. Introspects the resulting tables and columns
/// 3. Compares them with the `table!` declarations Diesel compiles against
/// 4. Reverts every migration and checks no tables are left behind
/// 5. Re-applies the migrations to prove the cycle is repeatable
fn check_migrations() -> Result<()> {
    use diesel::Connection;
    use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

    const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");

    tracing::info!("Starting migration verification");

    let metadata = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;
    let schema_path = metadata.workspace_root.join(DIESEL_SCHEMA_PATH);
    let schema_text: String = std::fs::read_to_string(&schema_path)
        .wrap_err(format!("Failed to read {schema_path}"))?;
    let expected: Schema = parse_diesel_schema(&schema_text)?;

    let mut conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to open in-memory SQLite database")?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply migrations: {e}"))?;
    tracing::info!("Applied {} migration(s)", applied.len());

    let migrated: Schema = introspect_sqlite_schema(&mut conn)?;
    compare_schemas(&expected, &migrated)?;
    tracing::info!("✅ Migrated schema matches {}", DIESEL_SCHEMA_PATH);

    conn.revert_all_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to revert migrations: {e}"))?;
    let reverted: Schema = introspect_sqlite_schema(&mut conn)?;
    if !reverted.tables.is_empty() {
        bail!(
            "Tables left behind after reverting all migrations: {:?}",
            reverted.tables.keys().collect::<Vec<_>>()
        );
    }

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to re-apply migrations: {e}"))?;
    tracing::info!("✅ Migrations revert and re-apply cleanly");

    Ok(())
}

/// Normalized schema representation
#[derive(Debug, Clone, PartialEq, Eq)]
struct Schema {
    tables: BTreeMap<String, Table>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Table {
    columns: BTreeMap<String, Column>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Column {
    normalized_type: String,
    nullable: bool,
}

/// Parse the `diesel::table!` declarations of a generated schema file.
///
/// Only the shape Diesel CLI emits is understood: one `name (pk) {` header
/// per table and one `column -> Type,` line per column.
fn parse_diesel_schema(text: &str) -> Result<Schema> {
    let mut schema = Schema {
        tables: BTreeMap::new(),
    };
    let mut current: Option<(String, Table)> = None;

    for line in text.lines().map(str::trim) {
        if let Some((name, table)) = current.as_mut() {
            if line == "}" {
                let (name, table) = (name.clone(), std::mem::take(table));
                schema.tables.insert(name, table);
                current = None;
                continue;
            }
            let Some((column, sql_type)) = line.trim_end_matches(',').split_once(" -> ") else {
                bail!("Unrecognised line in table {name}: {line}");
            };
            let (nullable, inner) = sql_type
                .strip_prefix("Nullable<")
                .and_then(|t| t.strip_suffix('>'))
                .map_or((false, sql_type), |inner| (true, inner));
            table.columns.insert(
                column.to_string(),
                Column {
                    normalized_type: normalize_diesel_type(inner),
                    nullable,
                },
            );
        } else if let Some(header) = line.strip_suffix(" {") {
            if let Some((name, _pk)) = header.split_once(" (") {
                current = Some((name.to_string(), Table::default()));
            }
        }
    }

    if schema.tables.is_empty() {
        bail!("No table! declarations found in Diesel schema");
    }
    Ok(schema)
}

/// Introspect `SQLite` schema
fn introspect_sqlite_schema(conn: &mut SqliteConnection) -> Result<Schema> {
    use diesel::RunQueryDsl;

    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        r#type: String,
        #[diesel(sql_type = Integer)]
        notnull: i32,
        #[diesel(sql_type = Integer)]
        pk: i32,
    }

    let mut schema = Schema {
        tables: BTreeMap::new(),
    };

    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name"
    )
    .load(conn)
    .wrap_err("Failed to query SQLite tables")?;

    for table in tables {
        let columns: Vec<ColumnInfo> =
            diesel::sql_query(format!("PRAGMA table_info({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get columns for table {}", table.name))?;

        let mut table_info = Table::default();
        for col in columns {
            table_info.columns.insert(
                col.name,
                Column {
                    normalized_type: normalize_sqlite_type(&col.r#type),
                    // INTEGER PRIMARY KEY is never NULL even without the keyword
                    nullable: col.notnull == 0 && col.pk == 0,
                },
            );
        }
        schema.tables.insert(table.name, table_info);
    }

    Ok(schema)
}

/// Normalize `SQLite` type to common representation
fn normalize_sqlite_type(sqlite_type: &str) -> String {
    let normalized = sqlite_type.to_uppercase();
    if normalized.contains("INT") {
        "integer".to_string()
    } else if normalized.contains("REAL")
        || normalized.contains("FLOA")
        || normalized.contains("DOUB")
    {
        "real".to_string()
    } else if normalized.contains("BLOB") {
        "blob".to_string()
    } else {
        "text".to_string() // Default for SQLite
    }
}

/// Normalize a Diesel SQL type name to the same representation
fn normalize_diesel_type(diesel_type: &str) -> String {
    match diesel_type {
        "BigInt" | "Integer" | "SmallInt" | "Bool" => "integer".to_string(),
        "Float" | "Double" => "real".to_string(),
        "Binary" => "blob".to_string(),
        _ => "text".to_string(),
    }
}

/// Compare the Diesel schema with the migrated database
fn compare_schemas(expected: &Schema, migrated: &Schema) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    for (table_name, expected_table) in &expected.tables {
        let Some(migrated_table) = migrated.tables.get(table_name) else {
            errors.push(format!("Table '{table_name}' is declared but not created"));
            continue;
        };

        for (column_name, expected_column) in &expected_table.columns {
            match migrated_table.columns.get(column_name) {
                None => errors.push(format!(
                    "Column '{table_name}.{column_name}' is declared but not created"
                )),
                Some(column) if column != expected_column => errors.push(format!(
                    "Column '{table_name}.{column_name}' differs: declared {expected_column:?}, migrated {column:?}"
                )),
                Some(_) => {}
            }
        }

        for column_name in migrated_table.columns.keys() {
            if !expected_table.columns.contains_key(column_name) {
                errors.push(format!(
                    "Column '{table_name}.{column_name}' is created but not declared"
                ));
            }
        }
    }

    for table_name in migrated.tables.keys() {
        if !expected.tables.contains_key(table_name) {
            errors.push(format!("Table '{table_name}' is created but not declared"));
        }
    }

    if errors.is_empty() {
        return Ok(());
    }
    for error in &errors {
        tracing::error!("{error}");
    }
    bail!("Schema mismatch: {} difference(s) found", errors.len())
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
