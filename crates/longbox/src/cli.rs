//! Clap derive structures for the `longbox` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// longbox -- command-line client for a comic library server
#[derive(Debug, Parser)]
#[command(
    name = "longbox",
    version,
    about = "Browse and manage a comic library server from the command line",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Server profile to use
    #[arg(long, short = 'p', env = "LONGBOX_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Server URL (overrides profile)
    #[arg(long, short = 's', env = "LONGBOX_SERVER", global = true)]
    pub server: Option<String>,

    /// API token
    #[arg(long, env = "LONGBOX_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "LONGBOX_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "LONGBOX_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "LONGBOX_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Plain text, one identifier per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse the comic list
    #[command(alias = "c")]
    Comics(ComicsArgs),

    /// Manage blocked page hashes
    #[command(alias = "h")]
    Hashes(HashesArgs),

    /// List server accounts
    #[command(alias = "u")]
    Users(UsersArgs),

    /// Stay connected and print live updates and alerts
    Watch,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Comics ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ComicsArgs {
    #[command(subcommand)]
    pub command: ComicsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ComicsCommand {
    /// List one page of comics under a filter
    List(ComicsListArgs),
}

#[derive(Debug, Args)]
pub struct ComicsListArgs {
    /// Page size
    #[arg(long, default_value = "25")]
    pub page_size: u32,

    /// Page index (zero-based)
    #[arg(long, default_value = "0")]
    pub page: u32,

    /// Filter by publisher
    #[arg(long)]
    pub publisher: Option<String>,

    /// Filter by series
    #[arg(long)]
    pub series: Option<String>,

    /// Filter by cover year
    #[arg(long)]
    pub cover_year: Option<i32>,

    /// Filter by cover month (1-12)
    #[arg(long)]
    pub cover_month: Option<u32>,

    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,

    /// Only comics without a read marker
    #[arg(long)]
    pub unread: bool,

    /// Sort column
    #[arg(long, value_enum)]
    pub sort_by: Option<SortColumn>,

    /// Sort descending instead of ascending
    #[arg(long)]
    pub descending: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortColumn {
    AddedDate,
    CoverDate,
    IssueNumber,
    Series,
}

// ── Hashes ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct HashesArgs {
    #[command(subcommand)]
    pub command: HashesCommand,
}

#[derive(Debug, Subcommand)]
pub enum HashesCommand {
    /// List every blocked page hash
    List,

    /// Add a page hash to the block list
    Block { hash: String },

    /// Remove a page hash from the block list
    Unblock { hash: String },
}

// ── Users ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List every account on the server
    List,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
