//! HotelDB CLI
//!
//! One-shot command-line access to the hotel tables.

use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use hoteldb::{Config, HotelError, Registry, Result, TableOps};
use tracing_subscriber::{fmt, EnvFilter};

/// HotelDB CLI
#[derive(Parser, Debug)]
#[command(name = "hoteldb-cli")]
#[command(about = "CLI for the HotelDB record store")]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./hoteldb_data")]
    data_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every record of a table
    List {
        /// Table name (customer, room, reservation, amenity, amenity_type, booking)
        table: String,
    },

    /// Look up a record by ID
    Get {
        table: String,

        /// Primary key
        id: i32,
    },

    /// Look up a record by name
    Find {
        table: String,

        /// Secondary key value
        name: String,
    },

    /// Insert a record (field values in table order)
    Insert {
        table: String,

        /// Field values
        #[arg(required = true, allow_hyphen_values = true)]
        fields: Vec<String>,
    },

    /// Replace the record with the given ID
    Update {
        table: String,

        /// Primary key of the record to replace
        id: i32,

        /// New field values
        #[arg(required = true, allow_hyphen_values = true)]
        fields: Vec<String>,
    },

    /// Delete a record by ID
    #[command(alias = "delete")]
    Del {
        table: String,

        /// Primary key
        id: i32,
    },

    /// Show the field order of a table
    Fields {
        table: String,
    },
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::builder().data_dir(&args.data_dir).build();

    let registry = match Registry::open(config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to open database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let outcome = execute(&registry, args.command);
    let closed = registry.close();

    match outcome.and(closed) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(registry: &Registry, command: Commands) -> Result<()> {
    match command {
        Commands::List { table } => {
            let table = registry.by_name(&table)?;
            table.display(&mut io::stdout().lock())?;
        }
        Commands::Get { table, id } => {
            let table = registry.by_name(&table)?;
            let line = table.render_by_id(id).ok_or(HotelError::NotFound(id))?;
            println!("{}", line);
        }
        Commands::Find { table, name } => {
            let table = registry.by_name(&table)?;
            if table.secondary_key().is_none() {
                return Err(HotelError::InvalidInput(format!(
                    "{} has no name field to search by",
                    table.name()
                )));
            }
            match table.render_by_name(&name) {
                Some(line) => println!("{}", line),
                None => println!("Record not found!"),
            }
        }
        Commands::Insert { table, fields } => {
            let table = registry.by_name(&table)?;
            table.insert_fields(&as_strs(&fields))?;
            println!("Record added successfully!");
        }
        Commands::Update { table, id, fields } => {
            let table = registry.by_name(&table)?;
            table.update_fields(id, &as_strs(&fields))?;
            println!("Record updated successfully!");
        }
        Commands::Del { table, id } => {
            let table = registry.by_name(&table)?;
            table.delete(id)?;
            println!("Record deleted successfully!");
        }
        Commands::Fields { table } => {
            print_fields(registry.by_name(&table)?);
        }
    }
    Ok(())
}

fn print_fields(table: &dyn TableOps) {
    println!("{} fields:", table.name());
    for (i, field) in table.fields().iter().enumerate() {
        println!("  {}. {}", i + 1, field);
    }
    if let Some(key) = table.secondary_key() {
        println!("Searchable by name: {}", key);
    }
}

fn as_strs(values: &[String]) -> Vec<&str> {
    values.iter().map(String::as_str).collect()
}
