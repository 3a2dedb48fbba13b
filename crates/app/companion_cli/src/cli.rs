use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use companion_api_client::DEFAULT_API_URL;

#[derive(Parser, Debug)]
#[command(name = "companion", version, about = "Event companion client")]
pub struct Cli {
    /// API base URL.
    #[arg(long, global = true, env = "COMPANION_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Bearer token to use instead of the stored one.
    #[arg(long, global = true, env = "COMPANION_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Where the admin token is stored.
    #[arg(long, global = true, env = "COMPANION_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,

    /// Print raw JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Event selector; defaults to the active event.
#[derive(Args, Debug, Clone, Default)]
pub struct EventArg {
    #[arg(long, short = 'e')]
    pub event: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print version information.
    Version,

    /// List module templates, or show the fields of one.
    Templates {
        /// UI kind, e.g. `speakers`.
        kind: Option<String>,
    },

    /// Show the event dashboard.
    Dashboard {
        #[command(flatten)]
        event: EventArg,
    },

    /// Browse the program.
    Program {
        #[command(flatten)]
        event: EventArg,
        #[arg(long)]
        day: Option<String>,
        #[arg(long = "type")]
        item_type: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        search: Option<String>,
        /// Only items with free places.
        #[arg(long)]
        available_only: bool,
    },

    /// Show one program item.
    Item { id: String },

    /// Register for a program item.
    Register { item_id: String },

    /// Cancel a registration.
    Unregister { item_id: String },

    /// List my registrations.
    Registrations {
        #[command(flatten)]
        event: EventArg,
    },

    /// List speakers, or show one.
    Speakers {
        #[command(flatten)]
        event: EventArg,
        id: Option<String>,
    },

    /// Show zones and locations.
    Map {
        #[command(flatten)]
        event: EventArg,
    },

    /// List news, or show one article.
    News {
        #[command(flatten)]
        event: EventArg,
        id: Option<String>,
    },

    /// Ask the event assistant. Interactive when no message is given.
    Chat {
        #[command(flatten)]
        event: EventArg,
        /// Program item the question is about.
        #[arg(long)]
        item: Option<String>,
        /// Module the question is about.
        #[arg(long)]
        module: Option<String>,
        message: Option<String>,
    },

    /// Log in as admin and store the token.
    Login {
        #[arg(long, short = 'u')]
        username: String,
        #[arg(long, env = "COMPANION_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored token.
    Logout,

    /// Admin console.
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// Show the logged-in admin.
    Whoami,

    /// List all events.
    Events,

    /// Create an event.
    CreateEvent {
        #[arg(long)]
        title: String,
        /// Start, RFC 3339 or `YYYY-MM-DDTHH:MM:SS`.
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// upcoming, active or finished.
        #[arg(long, default_value = "upcoming")]
        status: String,
    },

    /// Change an event.
    UpdateEvent {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },

    /// Delete an event.
    DeleteEvent {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// List server-side module types.
    ModuleTypes,

    /// List an event's modules in builder order.
    Modules {
        #[command(flatten)]
        event: EventArg,
    },

    /// Show a module's fields with their current values.
    Fields {
        #[command(flatten)]
        event: EventArg,
        /// Module id or 1-based position.
        module: String,
        /// Include fields hidden by their conditions.
        #[arg(long)]
        all: bool,
    },

    /// Enable or disable a module.
    Toggle {
        #[command(flatten)]
        event: EventArg,
        module: String,
    },

    /// Rename a module.
    Rename {
        #[command(flatten)]
        event: EventArg,
        module: String,
        name: String,
    },

    /// Move a module from one 1-based position to another.
    Move {
        #[command(flatten)]
        event: EventArg,
        from: usize,
        to: usize,
    },

    /// Add a module from a template.
    Add {
        #[command(flatten)]
        event: EventArg,
        /// UI kind, e.g. `networking`.
        kind: String,
    },

    /// Remove a module.
    Remove {
        #[command(flatten)]
        event: EventArg,
        module: String,
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Set one config field and save.
    Set {
        #[command(flatten)]
        event: EventArg,
        module: String,
        field: String,
        value: String,
    },
}
