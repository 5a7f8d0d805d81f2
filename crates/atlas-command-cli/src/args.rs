use atlas_command::ClientConfig;
use clap::{Args, Parser, Subcommand};

use crate::commands::{
    changed::ChangedSinceArgs, components::ComponentsCmd, entity::EntityCmd, object::ObjectCmd,
    task::TaskCmd,
};

#[derive(Parser, Debug)]
#[command(
    name = "atlas",
    version,
    about = "Command-line client for the Atlas Command entity, task and object API"
)]
pub struct Cli {
    #[command(flatten)]
    pub conn: ConnectionArgs,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check API health
    Health,
    /// Manage entities
    #[command(subcommand)]
    Entity(EntityCmd),
    /// Manage tasks
    #[command(subcommand)]
    Task(TaskCmd),
    /// Manage stored objects
    #[command(subcommand)]
    Object(ObjectCmd),
    /// List entities, tasks and objects changed since a timestamp
    ChangedSince(ChangedSinceArgs),
    /// Offline component tools
    #[command(subcommand)]
    Components(ComponentsCmd),
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// API base URL
    #[arg(
        long,
        global = true,
        env = "ATLAS_COMMAND_URL",
        default_value = "http://localhost:8000"
    )]
    pub url: String,

    /// Bearer token
    #[arg(long, global = true, env = "ATLAS_COMMAND_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "ATLAS_COMMAND_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,
}

impl ConnectionArgs {
    pub fn config(&self) -> ClientConfig {
        let config = ClientConfig::default()
            .with_base_url(&self.url)
            .with_timeout_secs(self.timeout);

        match self.token.as_deref().filter(|t| !t.is_empty()) {
            Some(token) => config.with_token(token),
            None => config,
        }
    }
}
