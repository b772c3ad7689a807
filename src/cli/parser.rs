use clap::{ArgGroup, Parser, Subcommand};

/// Command-line interface definition for rWorkload
/// CLI application to redistribute hourly workload with SQLite
#[derive(Parser)]
#[command(
    name = "rworkload",
    version = env!("CARGO_PKG_VERSION"),
    about = "Hour-based workload redistribution: schedules, sign-ins and fair reassignment using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Pin the clock to "YYYY-MM-DD HH:MM" instead of the system time
    #[arg(global = true, long = "at", hide = true)]
    pub at: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity and ledger exclusivity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage employees
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },

    /// Manage tasks
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Manage clients
    Client {
        #[command(subcommand)]
        action: ClientAction,
    },

    /// Manage hour-based schedule entries
    Schedule {
        #[command(subcommand)]
        action: ScheduleAction,
    },

    /// Sign an employee in (restores their workload)
    Signin {
        employee: String,

        #[arg(long = "scheduled", help = "Expected sign-in time (HH:MM); defaults to the shift start")]
        scheduled: Option<String>,

        #[arg(long = "no-hook", help = "Skip the redistribution sweep after signing in")]
        no_hook: bool,
    },

    /// Sign an employee out
    Signout {
        employee: String,

        #[arg(long = "no-hook", help = "Skip the redistribution sweep after signing out")]
        no_hook: bool,
    },

    /// Show today's attendance
    Attendance,

    /// Redistribute an absent employee's current-hour workload
    Redistribute { employee: String },

    /// Restore an employee's scheduled workload
    Restore { employee: String },

    /// Run the hourly sweep now
    Sweep,

    /// Run the sweep at every interval boundary (default: every hour)
    Watch {
        #[arg(long = "passes", help = "Stop after this many passes")]
        passes: Option<usize>,
    },

    /// Per-employee view of the current hour
    Summary {
        #[arg(long = "json", help = "Print the summary as JSON")]
        json: bool,

        #[arg(long = "detail", help = "List the task and client ids behind each count")]
        detail: bool,
    },

    /// Live assignments of one employee, or who is signed in when no employee is given
    Assignments {
        employee: Option<String>,

        #[arg(long = "all-hours", help = "Include every hour slot, not only the current one")]
        all_hours: bool,

        #[arg(long = "json", help = "Print as JSON")]
        json: bool,
    },

    /// Show realtime assignment history
    Ledger {
        #[arg(long = "kind", help = "Only one ledger: task or client")]
        kind: Option<String>,

        #[arg(long = "hour", help = "Only one hour slot (0-23)")]
        hour: Option<i64>,

        #[arg(long = "active", help = "Only rows that are currently active")]
        active: bool,

        #[arg(long = "csv", value_name = "FILE", help = "Export the rows to a CSV file")]
        csv: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum EmployeeAction {
    /// Add an employee
    Add {
        id: String,
        name: String,

        #[arg(long = "role", default_value = "employee", help = "admin or employee")]
        role: String,

        #[arg(long = "shift-start", help = "Expected sign-in time (HH:MM)")]
        shift_start: Option<String>,
    },
    /// List employees
    List,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        id: String,
        title: String,

        #[arg(long = "assigned-to")]
        assigned_to: Option<String>,
    },
    /// List tasks with their current owner
    List,
}

#[derive(Subcommand)]
pub enum ClientAction {
    /// Add a client
    Add { id: String, name: String },
    /// List clients
    List,
}

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Create a schedule entry for an inclusive hour window
    #[command(group(ArgGroup::new("target").required(true).args(["task", "client"])))]
    Add {
        #[arg(long = "from", help = "First hour of the window (0-23)")]
        from: i64,

        #[arg(long = "to", help = "Last hour of the window (0-23)")]
        to: i64,

        #[arg(long = "task")]
        task: Option<String>,

        #[arg(long = "client")]
        client: Option<String>,

        #[arg(long = "assign", help = "Employee who owns the work")]
        assign: String,

        #[arg(long = "by", help = "Admin creating the entry")]
        by: String,

        #[arg(long = "once", help = "Not a recurring entry")]
        once: bool,
    },
    /// List every schedule entry
    List,
    /// Delete a schedule entry
    Del {
        id: i64,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}
