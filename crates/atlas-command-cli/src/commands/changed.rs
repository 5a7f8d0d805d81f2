use atlas_command::AtlasCommandClient;
use chrono::{DateTime, Utc};
use clap::Args;

use super::print_json;
use crate::exit_codes::SUCCESS;

#[derive(Args, Debug)]
pub struct ChangedSinceArgs {
    /// RFC 3339 timestamp, e.g. 2024-05-01T12:00:00Z
    pub since: DateTime<Utc>,
    /// Maximum results per resource type
    #[arg(long)]
    pub limit: Option<u32>,
}

pub async fn run(args: ChangedSinceArgs, client: &AtlasCommandClient) -> anyhow::Result<i32> {
    let dataset = client.get_changed_since(args.since, args.limit).await?;
    tracing::debug!(
        entities = dataset.entities.len(),
        tasks = dataset.tasks.len(),
        objects = dataset.objects.len(),
        "changed-since"
    );
    print_json(&dataset)?;
    Ok(SUCCESS)
}
