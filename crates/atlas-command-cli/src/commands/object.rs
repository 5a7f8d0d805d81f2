//! Stored object commands.

use std::path::PathBuf;

use anyhow::Context;
use atlas_command::{AtlasCommandClient, ListObjects, ObjectReference, UploadObject};
use clap::{Args, Subcommand};

use super::print_json;
use crate::exit_codes::SUCCESS;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Subcommand, Debug)]
pub enum ObjectCmd {
    /// List stored objects
    List(ListArgs),
    /// Show object metadata
    Get { object_id: String },
    /// Upload a file
    Upload(UploadArgs),
    /// Download object content
    Download {
        object_id: String,
        /// Write to this file instead of stdout
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },
    /// Delete an object
    Delete { object_id: String },
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long)]
    pub content_type: Option<String>,
    #[arg(long)]
    pub limit: Option<u32>,
    #[arg(long)]
    pub offset: Option<u32>,
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    pub file: PathBuf,
    /// Defaults to the file name
    #[arg(long)]
    pub object_id: Option<String>,
    #[arg(long, default_value = DEFAULT_CONTENT_TYPE)]
    pub content_type: String,
    #[arg(long)]
    pub usage_hint: Option<String>,
    /// Reference the object from this entity
    #[arg(long)]
    pub entity: Option<String>,
    /// Reference the object from this task
    #[arg(long)]
    pub task: Option<String>,
}

pub async fn run(cmd: ObjectCmd, client: &AtlasCommandClient) -> anyhow::Result<i32> {
    match cmd {
        ObjectCmd::List(args) => {
            let objects = client
                .list_objects(&ListObjects {
                    content_type: args.content_type,
                    limit: args.limit,
                    offset: args.offset,
                })
                .await?;
            print_json(&objects)?;
        }
        ObjectCmd::Get { object_id } => print_json(&client.get_object(&object_id).await?)?,
        ObjectCmd::Upload(args) => {
            let upload = build_upload(args)?;
            print_json(&client.upload_object(upload).await?)?;
        }
        ObjectCmd::Download { object_id, out } => {
            let download = client.download_object(&object_id).await?;
            match out {
                Some(path) => {
                    std::fs::write(&path, &download.data)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!(
                        "wrote {} bytes to {}",
                        download.data.len(),
                        path.display()
                    );
                }
                None => {
                    use std::io::Write;
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&download.data)?;
                    stdout.flush()?;
                }
            }
        }
        ObjectCmd::Delete { object_id } => {
            client.delete_object(&object_id).await?;
            eprintln!("deleted object {}", object_id);
        }
    }
    Ok(SUCCESS)
}

fn build_upload(args: UploadArgs) -> anyhow::Result<UploadObject> {
    let data = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let file_name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("{} has no file name", args.file.display()))?;
    let object_id = args.object_id.unwrap_or_else(|| file_name.clone());

    let mut upload = UploadObject::new(object_id, file_name, args.content_type, data);
    if let Some(hint) = args.usage_hint {
        upload = upload.with_usage_hint(hint);
    }
    if let Some(entity_id) = args.entity {
        upload = upload.referenced_by(ObjectReference::entity(entity_id));
    }
    if let Some(task_id) = args.task {
        upload = upload.referenced_by(ObjectReference::task(task_id));
    }
    Ok(upload)
}
