use std::io::{BufRead, Write};

use standard_error::{Interpolate, StandardError};

use crate::{
    pkg::{
        internal::{
            adaptors::records::spec::RecordId,
            controller::{DeleteStatus, FormController},
        },
        ui::{prompt::StdinConfirm, uispec::PageView},
    },
    prelude::Result,
};

const HELP: &str = "commands: name <text> | password <text> | file <path.pdf> | submit | next | prev | \
download <id> | delete <id> | dismiss | refresh | help | quit";

#[derive(Debug, PartialEq, Eq)]
enum Action {
    Name(String),
    Password(String),
    File(String),
    Submit,
    Next,
    Previous,
    Download(RecordId),
    Delete(RecordId),
    Dismiss,
    Refresh,
    Help,
    Quit,
}

fn parse(line: &str) -> Option<Action> {
    let line = line.trim();
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();
    let action = match (word.to_lowercase().as_str(), rest) {
        ("name", _) => Action::Name(rest.to_string()),
        ("password", _) => Action::Password(rest.to_string()),
        ("file", path) if !path.is_empty() => Action::File(path.to_string()),
        ("submit", "") => Action::Submit,
        ("next", "") => Action::Next,
        ("prev" | "previous", "") => Action::Previous,
        ("download", id) if !id.is_empty() => Action::Download(RecordId::from(id)),
        ("delete", id) if !id.is_empty() => Action::Delete(RecordId::from(id)),
        ("dismiss", "") => Action::Dismiss,
        ("refresh", "") => Action::Refresh,
        ("help" | "?", "") => Action::Help,
        ("quit" | "exit" | "q", "") => Action::Quit,
        _ => return None,
    };
    Some(action)
}

/// Next line of stdin off the runtime threads; `None` at end of input.
async fn read_line() -> Result<Option<String>> {
    tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map(|read| (read > 0).then_some(line))
    })
    .await
    .map_err(|e| StandardError::new("ERR-UI-002").interpolate_err(e.to_string()))?
    .map_err(|e| StandardError::new("ERR-UI-002").interpolate_err(e.to_string()))
}

fn show(c: &FormController) -> Result<()> {
    println!("{}", PageView::from_controller(c, true).display()?);
    Ok(())
}

pub async fn run(c: &mut FormController) -> Result<()> {
    c.mount().await;
    show(c)?;
    println!("{}", HELP);
    loop {
        print!("> ");
        std::io::stdout()
            .flush()
            .map_err(|e| StandardError::new("ERR-UI-002").interpolate_err(e.to_string()))?;
        let Some(line) = read_line().await? else {
            break;
        };
        let Some(action) = parse(&line) else {
            println!("{}", HELP);
            continue;
        };
        match action {
            Action::Name(name) => c.update_name(&name),
            Action::Password(password) => c.update_password(&password),
            Action::File(path) => {
                if let Err(e) = c.pick_file(&path).await {
                    tracing::warn!("file not picked: {:?}", e);
                    println!("only PDF files are allowed");
                    continue;
                }
            }
            Action::Submit => {
                c.submit().await;
            }
            Action::Next => {
                if !c.change_page(1).await {
                    println!("already at the last page");
                    continue;
                }
            }
            Action::Previous => {
                if !c.change_page(-1).await {
                    println!("already at the first page");
                    continue;
                }
            }
            Action::Download(id) => {
                match c.download_by_id(&id).await {
                    Ok(path) => println!("saved {}", path.display()),
                    Err(e) => {
                        tracing::error!("error downloading record {}: {:?}", id, e);
                        println!("no record {} on this page", id);
                    }
                }
                continue;
            }
            Action::Delete(id) => {
                if c.delete_record(&id, &StdinConfirm).await == DeleteStatus::Cancelled {
                    continue;
                }
            }
            Action::Dismiss => c.dismiss_error(),
            Action::Refresh => {
                c.refresh().await;
            }
            Action::Help => {
                println!("{}", HELP);
                continue;
            }
            Action::Quit => break,
        }
        show(c)?;
    }
    Ok(())
}
