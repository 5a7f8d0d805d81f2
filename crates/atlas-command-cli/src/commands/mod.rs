pub mod changed;
pub mod components;
pub mod entity;
pub mod object;
pub mod task;

use anyhow::Context;
use atlas_command::AtlasCommandClient;
use serde::Serialize;

use crate::args::{Cli, Command, ConnectionArgs};
use crate::exit_codes::SUCCESS;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Health => {
            let health = connect(&cli.conn)?.health().await?;
            print_json(&health)?;
            Ok(SUCCESS)
        }
        Command::Entity(cmd) => entity::run(cmd, &connect(&cli.conn)?).await,
        Command::Task(cmd) => task::run(cmd, &connect(&cli.conn)?).await,
        Command::Object(cmd) => object::run(cmd, &connect(&cli.conn)?).await,
        Command::ChangedSince(args) => changed::run(args, &connect(&cli.conn)?).await,
        Command::Components(cmd) => components::run(cmd),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(SUCCESS)
        }
    }
}

fn connect(conn: &ConnectionArgs) -> anyhow::Result<AtlasCommandClient> {
    let config = conn.config();
    tracing::debug!(url = %config.base_url, authenticated = config.token.is_some(), "connecting");
    AtlasCommandClient::new(config).context("failed to create Atlas Command client")
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Parse an optional inline JSON argument.
pub(crate) fn parse_json_arg(
    name: &str,
    raw: Option<&str>,
) -> anyhow::Result<Option<serde_json::Value>> {
    raw.map(|raw| serde_json::from_str(raw).with_context(|| format!("--{} is not valid JSON", name)))
        .transpose()
}
