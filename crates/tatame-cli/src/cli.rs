//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};

/// Tatame: academy management for Brazilian Jiu-Jitsu.
#[derive(Debug, Parser)]
#[command(name = "tatame", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Data directory (defaults to the platform data dir).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Document host endpoint for device sync.
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Student roster.
    #[command(subcommand)]
    Roster(RosterCommand),
    /// Record a check-in for a student.
    Checkin(CheckinArgs),
    /// Interactive self-service check-in loop with background sync.
    Kiosk,
    /// Billing ledger.
    #[command(subcommand)]
    Finance(FinanceCommand),
    /// List membership plans.
    Plans,
    /// List the storefront catalog.
    Products,
    /// List the weekly class schedule.
    Schedule,
    /// Show graduation alerts.
    Alerts,
    /// Write the full state as one JSON document.
    Export(ExportArgs),
    /// Replace collections from an exported JSON document.
    Import(ImportArgs),
    /// Erase all local data.
    Reset(ResetArgs),
    /// Sign a user in for this device.
    Login(LoginArgs),
    /// Clear the session user.
    Logout,
    /// Device sync through the document host.
    #[command(subcommand)]
    Sync(SyncCommand),
}

#[derive(Debug, Subcommand)]
pub enum RosterCommand {
    /// List enrolled students.
    List,
    /// Enroll a student.
    Add(RosterAddArgs),
    /// Record a graduation: one more stripe by default (next belt after
    /// the 4th), or an explicit --belt/--stripes.
    Promote(PromoteArgs),
    /// Show one student, including graduation history.
    Show { student: String },
}

#[derive(Debug, Args)]
pub struct RosterAddArgs {
    #[arg(long)]
    pub name: String,
    /// Belt color (e.g. "Branca" or "white").
    #[arg(long, default_value = "Branca")]
    pub belt: String,
    #[arg(long, default_value_t = 0)]
    pub stripes: u8,
    /// Plan id (see `tatame plans`).
    #[arg(long, default_value = "p1")]
    pub plan: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long, default_value = "")]
    pub cpf: String,
    #[arg(long, default_value = "")]
    pub address: String,
    /// Birth date, YYYY-MM-DD.
    #[arg(long)]
    pub birth_date: Option<chrono::NaiveDate>,
    /// Enrollment date, YYYY-MM-DD (defaults to today).
    #[arg(long)]
    pub enrollment_date: Option<chrono::NaiveDate>,
    #[arg(long, default_value = "")]
    pub photo_url: String,
}

#[derive(Debug, Args)]
pub struct PromoteArgs {
    /// Student id or unique name prefix.
    pub student: String,
    /// New belt color.
    #[arg(long)]
    pub belt: Option<String>,
    /// New stripe count (0-4).
    #[arg(long)]
    pub stripes: Option<u8>,
}

#[derive(Debug, Args)]
pub struct CheckinArgs {
    /// Student id or unique name prefix.
    pub student: String,
    /// Class label to tag the record with.
    #[arg(long)]
    pub class: Option<String>,
    /// Record as a self-service kiosk check-in.
    #[arg(long)]
    pub kiosk: bool,
}

#[derive(Debug, Subcommand)]
pub enum FinanceCommand {
    /// List ledger entries with the paid balance.
    List(FinanceListArgs),
    /// Record a ledger entry.
    Add(FinanceAddArgs),
    /// Delete a ledger entry by id.
    Remove { id: String },
}

#[derive(Debug, Args)]
pub struct FinanceListArgs {
    /// Restrict the summary to one month, YYYY-MM.
    #[arg(long)]
    pub month: Option<String>,
}

#[derive(Debug, Args)]
pub struct FinanceAddArgs {
    /// Entry direction: income or expense.
    #[arg(long, default_value = "income")]
    pub kind: String,
    #[arg(long)]
    pub amount: f64,
    #[arg(long, default_value = "Mensalidade")]
    pub category: String,
    /// Settlement status (Pago, Pendente, Atrasado).
    #[arg(long, default_value = "Pago")]
    pub status: String,
    #[arg(long, default_value = "")]
    pub description: String,
    /// Student id the entry is tied to.
    #[arg(long)]
    pub student: Option<String>,
    /// Entry date, YYYY-MM-DD (defaults to today).
    #[arg(long)]
    pub date: Option<chrono::NaiveDate>,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output file (stdout when omitted).
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Exported JSON document.
    pub path: PathBuf,
}

#[derive(Debug, Args)]
pub struct ResetArgs {
    /// Skip the confirmation prompt.
    #[arg(long)]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub name: String,
    /// Role tag: admin, professor or student.
    #[arg(long, default_value = "professor")]
    pub role: String,
    #[arg(long, default_value = "")]
    pub email: String,
}

#[derive(Debug, Subcommand)]
pub enum SyncCommand {
    /// Create a remote document and print its identifier.
    Init,
    /// Adopt an identifier from another device and pull immediately.
    Adopt { id: String },
    /// Show the sync configuration and last activity.
    Status,
    /// Pull the remote document now.
    Pull,
    /// Keep the state mirrored: poll the remote and push local changes.
    Watch,
}
