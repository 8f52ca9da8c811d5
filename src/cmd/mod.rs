use std::path::PathBuf;

use crate::{
    conf::settings,
    pkg::{
        internal::{
            adaptors::records::spec::RecordId,
            client::RemoteClient,
            controller::{ControllerOptions, DeleteStatus, FormController, SubmitStatus},
        },
        ui::{
            prompt::{AssumeYes, StdinConfirm},
            uispec::PageView,
        },
    },
    prelude::Result,
};
use clap::{Parser, Subcommand};
use standard_error::{Interpolate, StandardError};

mod browse;

#[derive(Parser)]
#[command(about = "uploads resumes and browses submitted records")]
struct Cmd {
    /// Overrides RESUMEDROP_BASE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Option<SubCommandType>,
}

#[derive(Subcommand)]
enum SubCommandType {
    /// Upload one resume
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long, env = "RESUMEDROP_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        resume: PathBuf,
    },
    /// Print one page of records
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Save a record's resume locally
    Download {
        #[arg(long)]
        id: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Delete a record after confirmation
    Delete {
        #[arg(long)]
        id: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        yes: bool,
    },
    /// Interactive form and list
    Browse,
}

fn controller(base_url: Option<String>, download_dir: Option<PathBuf>) -> Result<FormController> {
    let mut s = settings.clone();
    if let Some(base_url) = base_url {
        s.base_url = base_url;
    }
    let client = RemoteClient::from_settings(&s)?;
    let mut options = ControllerOptions::from_settings(&s);
    if let Some(dir) = download_dir {
        options.download_dir = dir;
    }
    Ok(FormController::new(client, options))
}

async fn open_page(c: &mut FormController, page: u32) {
    if page <= 1 {
        c.mount().await;
    } else {
        c.set_page(page).await;
    }
}

/// One-shot commands report a failed upload through the exit status.
fn submit_exit(status: SubmitStatus, message: &str) -> Result<()> {
    match status {
        SubmitStatus::Accepted => Ok(()),
        SubmitStatus::Duplicate | SubmitStatus::Failed => {
            Err(StandardError::new("ERR-HTTP-002").interpolate_err(message.to_string()))
        }
    }
}

/// A declined confirmation is the user's choice, not a failure.
fn delete_exit(status: DeleteStatus, id: &RecordId) -> Result<()> {
    match status {
        DeleteStatus::Deleted | DeleteStatus::Cancelled => Ok(()),
        DeleteStatus::Failed => {
            Err(StandardError::new("ERR-HTTP-002").interpolate_err(format!("delete {}", id)))
        }
    }
}

pub async fn run() -> Result<()> {
    let args = Cmd::parse();
    let Some(command) = args.command else {
        tracing::error!("no subcommand passed");
        return Ok(());
    };
    let download_dir = match &command {
        SubCommandType::Download { out, .. } => out.clone(),
        _ => None,
    };
    let mut c = controller(args.base_url, download_dir)?;
    match command {
        SubCommandType::Submit {
            name,
            password,
            resume,
        } => {
            c.update_name(&name);
            c.update_password(&password);
            c.pick_file(&resume).await?;
            let status = c.submit().await;
            if status == SubmitStatus::Accepted {
                println!("{}", PageView::from_controller(&c, false).display()?);
            } else {
                println!("{}", c.error_message().unwrap_or_default());
            }
            submit_exit(status, c.error_message().unwrap_or_default())?;
        }
        SubCommandType::List { page } => {
            open_page(&mut c, page).await;
            println!("{}", PageView::from_controller(&c, false).display()?);
        }
        SubCommandType::Download { id, page, .. } => {
            open_page(&mut c, page).await;
            let path = c.download_by_id(&RecordId(id)).await?;
            println!("saved {}", path.display());
        }
        SubCommandType::Delete { id, page, yes } => {
            open_page(&mut c, page).await;
            let id = RecordId(id);
            let status = if yes {
                c.delete_record(&id, &AssumeYes).await
            } else {
                c.delete_record(&id, &StdinConfirm).await
            };
            match status {
                DeleteStatus::Deleted => println!("{}", PageView::from_controller(&c, false).display()?),
                DeleteStatus::Cancelled => println!("cancelled"),
                DeleteStatus::Failed => println!("delete failed, see log"),
            }
            delete_exit(status, &id)?;
        }
        SubCommandType::Browse => browse::run(&mut c).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{delete_exit, submit_exit};
    use crate::pkg::internal::{
        adaptors::records::spec::RecordId,
        controller::{DeleteStatus, SubmitStatus, DUPLICATE_MESSAGE},
    };

    #[test]
    fn test_failed_submit_exits_with_error() {
        assert!(submit_exit(SubmitStatus::Accepted, "").is_ok());
        assert!(submit_exit(SubmitStatus::Duplicate, DUPLICATE_MESSAGE).is_err());
        assert!(submit_exit(SubmitStatus::Failed, "Upload failed. Please try again.").is_err());
    }

    #[test]
    fn test_failed_delete_exits_with_error() {
        let id = RecordId::from("4");
        assert!(delete_exit(DeleteStatus::Deleted, &id).is_ok());
        assert!(delete_exit(DeleteStatus::Cancelled, &id).is_ok());
        assert!(delete_exit(DeleteStatus::Failed, &id).is_err());
    }
}
