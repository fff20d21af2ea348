//! HotelDB Console
//!
//! Interactive menu over every hotel table.

use std::io::{self, BufRead, Write};

use clap::Parser;
use hoteldb::{Config, HotelError, NameIndexPolicy, Registry, SnapshotMode, TableId, TableOps};
use tracing_subscriber::{fmt, EnvFilter};

/// HotelDB Console
#[derive(Parser, Debug)]
#[command(name = "hoteldb")]
#[command(about = "Interactive hotel management database")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./hoteldb_data")]
    data_dir: String,

    /// Hash index bucket count
    #[arg(short, long, default_value = "100")]
    buckets: usize,

    /// Keep the name index exact on update and delete
    #[arg(long)]
    maintain_name_index: bool,

    /// Wait for every snapshot before returning from insert/update
    #[arg(long)]
    sync_snapshots: bool,
}

fn main() {
    // Logs go to stderr so they do not interleave with the menus
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("HotelDB Console v{}", hoteldb::VERSION);
    tracing::info!("Data directory: {}", args.data_dir);

    let config = Config::builder()
        .data_dir(&args.data_dir)
        .bucket_count(args.buckets)
        .name_index_policy(if args.maintain_name_index {
            NameIndexPolicy::Maintained
        } else {
            NameIndexPolicy::Legacy
        })
        .snapshot_mode(if args.sync_snapshots {
            SnapshotMode::Synchronous
        } else {
            SnapshotMode::Background
        })
        .build();

    let registry = match Registry::open(config) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to open database: {}", e);
            std::process::exit(1);
        }
    };

    {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut console = Console::new(&registry, stdin.lock(), stdout.lock());

        if let Err(e) = console.run() {
            tracing::error!("Console error: {}", e);
        }
    }

    if let Err(e) = registry.close() {
        tracing::error!("Failed to flush tables on exit: {}", e);
        std::process::exit(1);
    }
}

// =============================================================================
// Console
// =============================================================================

struct Console<'a, I, O> {
    registry: &'a Registry,
    input: I,
    out: O,
}

impl<'a, I: BufRead, O: Write> Console<'a, I, O> {
    fn new(registry: &'a Registry, input: I, out: O) -> Self {
        Self {
            registry,
            input,
            out,
        }
    }

    /// Main menu; returns on exit or end of input
    fn run(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n\t\t*************************************************")?;
        writeln!(self.out, "\t\t*                HOTEL MANAGEMENT               *")?;
        writeln!(self.out, "\t\t*************************************************\n")?;

        let registry = self.registry;
        let exit_choice = TableId::ALL.len() as i32 + 1;

        loop {
            writeln!(self.out, "\nMain Menu:")?;
            for id in TableId::ALL {
                writeln!(self.out, "{}. {} Management", id.index() + 1, id)?;
            }
            writeln!(self.out, "{}. Exit", exit_choice)?;

            let Some(choice) = self.prompt_int("Enter choice")? else {
                return Ok(());
            };

            if choice == exit_choice {
                writeln!(self.out, "Thank you for using Hotel Management System!")?;
                return Ok(());
            }

            match usize::try_from(choice)
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(TableId::from_index)
            {
                Some(id) => {
                    if !self.table_menu(registry.table(id))? {
                        return Ok(());
                    }
                }
                None => writeln!(self.out, "Invalid choice!")?,
            }
        }
    }

    /// Per-table menu; returns false when input ran out
    fn table_menu(&mut self, table: &dyn TableOps) -> io::Result<bool> {
        loop {
            writeln!(self.out, "\n{} Operations:", table.name())?;
            writeln!(self.out, "1. Insert")?;
            writeln!(self.out, "2. Display")?;
            writeln!(self.out, "3. Update")?;
            writeln!(self.out, "4. Delete")?;
            writeln!(self.out, "5. Search")?;
            writeln!(self.out, "6. Return to Main Menu")?;

            let Some(choice) = self.prompt_int("Enter choice")? else {
                return Ok(false);
            };

            let outcome = match choice {
                1 => match self.read_fields(table)? {
                    Some(fields) => {
                        let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
                        table.insert_fields(&fields).map(|_| "Record added successfully!")
                    }
                    None => return Ok(false),
                },
                2 => table.display(&mut self.out).map(|_| ""),
                3 => {
                    let Some(id) = self.prompt_int("Enter ID to update")? else {
                        return Ok(false);
                    };
                    match self.read_fields(table)? {
                        Some(fields) => {
                            let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
                            table
                                .update_fields(id, &fields)
                                .map(|_| "Record updated successfully!")
                        }
                        None => return Ok(false),
                    }
                }
                4 => {
                    let Some(id) = self.prompt_int("Enter ID to delete")? else {
                        return Ok(false);
                    };
                    table.delete(id).map(|_| "Record deleted successfully!")
                }
                5 => {
                    if !self.search(table)? {
                        return Ok(false);
                    }
                    Ok("")
                }
                6 => return Ok(true),
                _ => Ok("Invalid choice!"),
            };

            match outcome {
                Ok("") => {}
                Ok(message) => writeln!(self.out, "{}", message)?,
                Err(HotelError::DuplicateKey(id)) => {
                    writeln!(self.out, "Record with ID {} already exists! Retry again.", id)?
                }
                Err(HotelError::NotFound(_)) => writeln!(self.out, "Record not found!")?,
                Err(e) => writeln!(self.out, "Error: {}", e)?,
            }
        }
    }

    /// Search by id or name; returns false when input ran out
    fn search(&mut self, table: &dyn TableOps) -> io::Result<bool> {
        writeln!(self.out, "You want the search by id or name")?;
        writeln!(self.out, "1- Id")?;
        writeln!(self.out, "2- Name")?;

        let Some(option) = self.prompt_int("Enter choice")? else {
            return Ok(false);
        };

        let found = match option {
            1 => {
                let Some(id) = self.prompt_int("Enter ID to search")? else {
                    return Ok(false);
                };
                writeln!(self.out, "Searching by id in {} table....", table.name())?;
                table.render_by_id(id)
            }
            2 => {
                let Some(label) = table.secondary_key() else {
                    writeln!(self.out, "{} has no name field to search by", table.name())?;
                    return Ok(true);
                };
                let Some(name) = self.prompt(&format!("Enter {} to search", label))? else {
                    return Ok(false);
                };
                writeln!(self.out, "Searching by name in {} table....", table.name())?;
                table.render_by_name(&name)
            }
            _ => {
                writeln!(self.out, "Invalid choice!")?;
                return Ok(true);
            }
        };

        match found {
            Some(line) => writeln!(self.out, "{}", line)?,
            None => writeln!(self.out, "Record not found!")?,
        }
        Ok(true)
    }

    /// Prompt for every field of the table
    fn read_fields(&mut self, table: &dyn TableOps) -> io::Result<Option<Vec<String>>> {
        let mut values = Vec::with_capacity(table.fields().len());
        for label in table.fields() {
            match self.prompt(&format!("Enter {}", label))? {
                Some(value) => values.push(value),
                None => return Ok(None),
            }
        }
        Ok(Some(values))
    }

    /// Read one trimmed line; `None` at end of input
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}: ", label)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompt until an integer is entered; `None` at end of input
    fn prompt_int(&mut self, label: &str) -> io::Result<Option<i32>> {
        loop {
            let Some(raw) = self.prompt(label)? else {
                return Ok(None);
            };
            match raw.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.out, "Please enter a number.")?,
            }
        }
    }
}
