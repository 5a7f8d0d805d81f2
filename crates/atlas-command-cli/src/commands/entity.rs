//! Entity commands.

use std::path::PathBuf;

use anyhow::Context;
use atlas_command::{AtlasCommandClient, EntityComponents, ListEntities, NewEntity, Telemetry};
use clap::{Args, Subcommand};

use super::print_json;
use crate::exit_codes::SUCCESS;

#[derive(Subcommand, Debug)]
pub enum EntityCmd {
    /// List entities
    List(ListArgs),
    /// Show one entity
    Get { entity_id: String },
    /// Show an entity by alias
    GetByAlias { alias: String },
    /// Create an entity
    Create(CreateArgs),
    /// Delete an entity
    Delete { entity_id: String },
    /// Update an entity's telemetry
    Telemetry(TelemetryArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by entity type
    #[arg(long = "type")]
    pub entity_type: Option<String>,
    #[arg(long)]
    pub limit: Option<u32>,
    #[arg(long)]
    pub offset: Option<u32>,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    pub entity_id: String,
    #[arg(long = "type")]
    pub entity_type: String,
    #[arg(long)]
    pub alias: String,
    #[arg(long)]
    pub subtype: Option<String>,
    /// JSON file with the component mapping
    #[arg(long)]
    pub components: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct TelemetryArgs {
    pub entity_id: String,
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub alt: Option<f64>,
    #[arg(long)]
    pub speed: Option<f64>,
    #[arg(long)]
    pub heading: Option<f64>,
}

pub async fn run(cmd: EntityCmd, client: &AtlasCommandClient) -> anyhow::Result<i32> {
    match cmd {
        EntityCmd::List(args) => {
            let entities = client
                .list_entities(&ListEntities {
                    entity_type: args.entity_type,
                    limit: args.limit,
                    offset: args.offset,
                })
                .await?;
            print_json(&entities)?;
        }
        EntityCmd::Get { entity_id } => print_json(&client.get_entity(&entity_id).await?)?,
        EntityCmd::GetByAlias { alias } => {
            print_json(&client.get_entity_by_alias(&alias).await?)?
        }
        EntityCmd::Create(args) => {
            let mut entity = NewEntity::new(args.entity_id, args.entity_type, args.alias);
            entity.subtype = args.subtype;
            if let Some(path) = args.components {
                entity.components = Some(read_components(&path)?);
            }
            print_json(&client.create_entity(&entity).await?)?;
        }
        EntityCmd::Delete { entity_id } => {
            client.delete_entity(&entity_id).await?;
            eprintln!("deleted entity {}", entity_id);
        }
        EntityCmd::Telemetry(args) => {
            let telemetry = Telemetry {
                latitude: args.lat,
                longitude: args.lon,
                altitude_m: args.alt,
                speed_m_s: args.speed,
                heading_deg: args.heading,
            };
            print_json(
                &client
                    .update_entity_telemetry(&args.entity_id, &telemetry)
                    .await?,
            )?;
        }
    }
    Ok(SUCCESS)
}

fn read_components(path: &PathBuf) -> anyhow::Result<EntityComponents> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid component mapping", path.display()))
}
