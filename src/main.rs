//! Rolodex CLI - console contact book.
//!
//! This is the main entry point for the Rolodex command-line application.
//! Without a subcommand it runs the interactive menu.

mod menu;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use rolodex::prelude::*;

/// Rolodex - contact book stored in a local XML file
#[derive(Parser)]
#[command(name = "rolodex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the contact file
    #[arg(short, long, global = true, env = "ROLODEX_FILE", default_value = "contacts.xml")]
    file: PathBuf,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, env = "ROLODEX_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu (default)
    Menu,

    /// Add a contact
    Add {
        /// Contact name
        #[arg(short, long)]
        name: String,

        /// Phone number
        #[arg(short, long, default_value = "")]
        phone: String,

        /// Postal address
        #[arg(short, long, default_value = "")]
        address: String,
    },

    /// List all contacts
    List {
        /// Print contacts as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find a contact by name (case-insensitive)
    Find {
        /// Name to look up
        name: String,
    },

    /// Overwrite the first contact matching a name
    Update {
        /// Current name of the contact
        original: String,

        /// New name
        #[arg(short, long)]
        name: String,

        /// New phone number
        #[arg(short, long)]
        phone: String,

        /// New postal address
        #[arg(short, long)]
        address: String,
    },

    /// Delete the first contact matching a name
    Delete {
        /// Name of the contact to delete
        name: String,
    },

    /// Export contacts as a comma-separated table
    Export {
        /// Output file, or "-" for standard output
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    debug!(file = %cli.file.display(), "using contact file");
    let store = ContactStore::new(&cli.file);

    // Not fatal: every operation reports its own load failure.
    if let Err(e) = store.initialize() {
        eprintln!("Error initializing {}: {}", cli.file.display(), e);
    }

    let mut out = io::stdout().lock();

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            menu::run_menu(&store, io::stdin().lock(), out).context("Console I/O failed")?;
        }
        Commands::Add { name, phone, address } => {
            cmd_add(&store, &name, &phone, &address, &mut out)?;
        }
        Commands::List { json } => {
            cmd_list(&store, json, &mut out)?;
        }
        Commands::Find { name } => {
            cmd_find(&store, &name, &mut out)?;
        }
        Commands::Update { original, name, phone, address } => {
            cmd_update(&store, &original, &name, &phone, &address, &mut out)?;
        }
        Commands::Delete { name } => {
            cmd_delete(&store, &name, &mut out)?;
        }
        Commands::Export { output } => {
            cmd_export(&store, &output, &mut out)?;
        }
    }

    Ok(())
}

fn init_tracing(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn cmd_add<W: Write>(
    store: &ContactStore,
    name: &str,
    phone: &str,
    address: &str,
    out: &mut W,
) -> Result<()> {
    let contact = store
        .add(name, phone, address)
        .context("Failed to add contact")?;

    writeln!(out, "Contact added: {}", contact.name)?;

    Ok(())
}

fn cmd_list<W: Write>(store: &ContactStore, json: bool, out: &mut W) -> Result<()> {
    let contacts = store.list().context("Failed to list contacts")?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&contacts)?)?;
        return Ok(());
    }

    for (i, contact) in contacts.iter().enumerate() {
        writeln!(out, "{}", menu::contact_line(i + 1, contact))?;
    }

    writeln!(out, "\nTotal: {} contacts", contacts.len())?;

    Ok(())
}

fn cmd_find<W: Write>(store: &ContactStore, name: &str, out: &mut W) -> Result<()> {
    match store.find(name).context("Failed to search contacts")? {
        Some(contact) => writeln!(out, "Contact found: {}", contact)?,
        None => writeln!(out, "Contact not found: {}", name)?,
    }

    Ok(())
}

fn cmd_update<W: Write>(
    store: &ContactStore,
    original: &str,
    name: &str,
    phone: &str,
    address: &str,
    out: &mut W,
) -> Result<()> {
    let contact = store
        .update(original, name, phone, address)
        .with_context(|| format!("Failed to update contact {}", original))?;

    writeln!(out, "Contact updated: {}", contact.name)?;

    Ok(())
}

fn cmd_delete<W: Write>(store: &ContactStore, name: &str, out: &mut W) -> Result<()> {
    let contact = store
        .delete(name)
        .with_context(|| format!("Failed to delete contact {}", name))?;

    writeln!(out, "Contact deleted: {}", contact.name)?;

    Ok(())
}

fn cmd_export<W: Write>(store: &ContactStore, output: &Path, out: &mut W) -> Result<()> {
    let exporter = TableExporter::new(store);

    if output == Path::new("-") {
        exporter
            .write_table(out)
            .context("Failed to export contacts")?;
        return Ok(());
    }

    let rows = exporter
        .export_to_path(output)
        .context("Failed to export contacts")?;

    writeln!(out, "Exported {} contacts to {}", rows, output.display())?;

    Ok(())
}
