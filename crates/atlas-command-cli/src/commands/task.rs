//! Task commands.

use atlas_command::{AtlasCommandClient, ListTasks, TaskStatus};
use clap::{Args, Subcommand};

use super::{parse_json_arg, print_json};
use crate::exit_codes::SUCCESS;

#[derive(Subcommand, Debug)]
pub enum TaskCmd {
    /// List tasks, optionally for one entity
    List(ListArgs),
    /// Show one task
    Get { task_id: String },
    /// Mark a task as in progress
    Start { task_id: String },
    /// Mark a task as completed
    Complete {
        task_id: String,
        /// Result payload as inline JSON
        #[arg(long)]
        result: Option<String>,
    },
    /// Mark a task as failed
    Fail {
        task_id: String,
        #[arg(long)]
        message: String,
        /// Error details as inline JSON
        #[arg(long)]
        details: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// pending, acknowledged, in_progress, completed, failed or cancelled
    #[arg(long)]
    pub status: Option<TaskStatus>,
    #[arg(long)]
    pub limit: Option<u32>,
    #[arg(long)]
    pub offset: Option<u32>,
    /// Only tasks assigned to this entity
    #[arg(long)]
    pub entity: Option<String>,
}

pub async fn run(cmd: TaskCmd, client: &AtlasCommandClient) -> anyhow::Result<i32> {
    match cmd {
        TaskCmd::List(args) => {
            let filter = ListTasks {
                status: args.status,
                limit: args.limit,
                offset: args.offset,
            };
            let tasks = match args.entity {
                Some(entity_id) => client.get_tasks_by_entity(&entity_id, &filter).await?,
                None => client.list_tasks(&filter).await?,
            };
            print_json(&tasks)?;
        }
        TaskCmd::Get { task_id } => print_json(&client.get_task(&task_id).await?)?,
        TaskCmd::Start { task_id } => print_json(&client.start_task(&task_id).await?)?,
        TaskCmd::Complete { task_id, result } => {
            let result = parse_json_arg("result", result.as_deref())?;
            print_json(&client.complete_task(&task_id, result).await?)?;
        }
        TaskCmd::Fail {
            task_id,
            message,
            details,
        } => {
            let details = parse_json_arg("details", details.as_deref())?;
            print_json(&client.fail_task(&task_id, &message, details).await?)?;
        }
    }
    Ok(SUCCESS)
}
