//! Roster command-line front end.
//!
//! # Responsibility
//! - Map user commands onto `roster_core` use-cases.
//! - Print one notification line per outcome, success or failure.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, LevelFilter};
use roster_core::db::open_db;
use roster_core::{
    core_version, init_logging, logging_status, Employee, EmployeeForm, EmployeeStorage,
    RosterConfig, RosterQuery, RosterService, ServiceError, SlotRepository, SortKey, SortOrder,
    SqliteSlotRepository, DEFAULT_STORAGE_KEY,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "roster", version, about = "Manage a local employee roster")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// SQLite store file.
    #[arg(long, global = true, env = "ROSTER_DB", default_value = roster_core::config::DEFAULT_DB_FILE_NAME)]
    db: PathBuf,
    /// Slot holding the employee collection.
    #[arg(long, global = true, env = "ROSTER_STORAGE_KEY", default_value = DEFAULT_STORAGE_KEY)]
    key: String,
    /// off|error|warn|info|debug|trace; defaults by build mode.
    #[arg(long, global = true, env = "ROSTER_LOG_LEVEL")]
    log_level: Option<LevelFilter>,
    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, global = true, env = "ROSTER_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List employees, optionally filtered by name and sorted.
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "name")]
        sort: SortKey,
        #[arg(long, default_value = "asc")]
        order: SortOrder,
    },
    /// Add an employee.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        gender: String,
        #[arg(long)]
        salary: String,
    },
    /// Replace an employee's fields; omitted fields keep their value.
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        salary: Option<String>,
    },
    /// Delete an employee after confirmation.
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Write employees.json into a directory.
    Export {
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Load employees from a JSON file.
    Import {
        file: PathBuf,
        /// Append to the current roster instead of replacing it.
        #[arg(long)]
        merge: bool,
    },
    /// Show store and version details.
    Info,
}

impl GlobalArgs {
    fn into_config(self) -> Result<RosterConfig> {
        let defaults = RosterConfig::default();
        let config = RosterConfig {
            db_path: self.db,
            storage_key: self.key,
            log_level: self.log_level.unwrap_or(defaults.log_level),
            log_dir: self.log_dir,
        };
        Ok(config.validate()?)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.global.into_config()?;

    if let Some(log_dir) = &config.log_dir {
        init_logging(config.log_level, log_dir).map_err(anyhow::Error::msg)?;
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open store `{}`", config.db_path.display()))?;
    let repo = SqliteSlotRepository::try_new(&conn)?;
    let mut service = RosterService::open(EmployeeStorage::with_key(
        repo,
        config.storage_key.as_str(),
    ));

    run(cli.command, &mut service, &config)
}

fn run<R: SlotRepository>(
    command: Command,
    service: &mut RosterService<R>,
    config: &RosterConfig,
) -> Result<()> {
    match command {
        Command::List {
            search,
            sort,
            order,
        } => {
            let employees = service.query(&RosterQuery::new(search, sort, order));
            print_table(&employees);
        }
        Command::Add {
            name,
            gender,
            salary,
        } => {
            let outcome = service.add(EmployeeForm::new(name, gender, salary));
            report_mutation(outcome, "Employee added successfully")?;
        }
        Command::Edit {
            id,
            name,
            gender,
            salary,
        } => {
            let Some(current) = service.find(&id) else {
                bail!("employee not found: {id}");
            };
            let mut form = EmployeeForm::from_employee(current);
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(gender) = gender {
                form.gender = gender;
            }
            if let Some(salary) = salary {
                form.salary = salary;
            }
            let outcome = service.update(&id, form);
            report_mutation(outcome, "Employee updated successfully")?;
        }
        Command::Delete { id, yes } => {
            let Some(target) = service.find(&id) else {
                bail!("employee not found: {id}");
            };
            if !yes && !confirm(&format!("Are you sure you want to delete {}?", target.name))? {
                println!("Delete cancelled");
                return Ok(());
            }
            let outcome = service.delete(&id);
            report_mutation(outcome, "Employee deleted successfully")?;
        }
        Command::Export { out_dir } => {
            if service.export_all(&out_dir) {
                println!("Employees exported successfully");
            } else {
                bail!("Error exporting employees");
            }
        }
        Command::Import { file, merge } => match service.import_from_path(&file, merge) {
            Ok(summary) => {
                println!("Successfully imported {} employees", summary.count);
                if !summary.persisted {
                    eprintln!("warning: imported employees could not be saved to storage");
                }
            }
            Err(err) => bail!("Error importing employees: {err}"),
        },
        Command::Info => {
            println!("roster_core {}", core_version());
            println!("store: {}", config.db_path.display());
            println!("slot: {}", service.storage().key());
            println!("employees: {}", service.employees().len());
            match logging_status() {
                Some((level, dir)) => println!("logging: {level} -> {}", dir.display()),
                None => println!("logging: off"),
            }
        }
    }
    Ok(())
}

fn report_mutation<T>(outcome: Result<T, ServiceError>, success: &str) -> Result<()> {
    match outcome {
        Ok(_) => {
            info!("event=cli_mutation module=cli status=ok");
            println!("{success}");
            Ok(())
        }
        Err(ServiceError::Validation(errors)) => {
            for (field, message) in errors.iter() {
                eprintln!("{field}: {message}");
            }
            bail!("employee was not saved")
        }
        Err(ServiceError::Persistence) => bail!("Error saving employee"),
        Err(err) => Err(err.into()),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn print_table(employees: &[Employee]) {
    if employees.is_empty() {
        println!("No employees found");
        return;
    }
    println!("{:<38} {:<50} {:<8} {:>14}", "ID", "NAME", "GENDER", "SALARY");
    for employee in employees {
        println!(
            "{:<38} {:<50} {:<8} {:>14.2}",
            employee.id, employee.name, employee.gender, employee.salary
        );
    }
}
