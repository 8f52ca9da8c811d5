use std::collections::HashSet;
use std::path::{Path, PathBuf};

use standard_error::{Interpolate, StandardError};

use crate::{
    conf::Settings,
    pkg::internal::{
        adaptors::records::{
            mutators::{CreateRecordData, RecordMutator},
            selectors::RecordSelector,
            spec::{RecordEntry, RecordId, UploadOutcome},
        },
        client::RemoteClient,
        download::save_bytes,
        picker::SelectedFile,
    },
    prelude::Result,
};

pub const DUPLICATE_MESSAGE: &str = "Duplicate resume detected. Please upload a different resume.";
pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed. Please try again.";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this item?";

/// Interactive yes/no gate in front of destructive actions.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// A page shorter than this is taken as the end of the data.
    pub page_size: usize,
    pub download_dir: PathBuf,
    pub download_filename: String,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        ControllerOptions {
            page_size: 5,
            download_dir: PathBuf::from("."),
            download_filename: "resume.pdf".into(),
        }
    }
}

impl ControllerOptions {
    pub fn from_settings(s: &Settings) -> Self {
        ControllerOptions {
            page_size: s.page_size,
            download_dir: PathBuf::from(&s.download_dir),
            download_filename: s.download_filename.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Accepted,
    Duplicate,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteStatus {
    Cancelled,
    Deleted,
    Failed,
}

/// State behind the upload form and the paginated record list.
///
/// Every operation borrows the controller mutably for the whole request, so responses are
/// applied in the order they were asked for.
#[derive(Debug)]
pub struct FormController {
    client: RemoteClient,
    options: ControllerOptions,
    name: String,
    password: String,
    selected_file: Option<SelectedFile>,
    records: Vec<RecordEntry>,
    current_page: u32,
    total_pages: u32,
    is_loading: bool,
    is_submitting: bool,
    deleting: HashSet<RecordId>,
    error_message: Option<String>,
}

impl FormController {
    pub fn new(client: RemoteClient, options: ControllerOptions) -> Self {
        FormController {
            client,
            options,
            name: String::new(),
            password: String::new(),
            selected_file: None,
            records: Vec::new(),
            current_page: 1,
            total_pages: 1,
            is_loading: false,
            is_submitting: false,
            deleting: HashSet::new(),
            error_message: None,
        }
    }

    /// Initial load of the first page.
    pub async fn mount(&mut self) -> bool {
        self.refresh().await
    }

    pub fn update_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn update_password(&mut self, password: &str) {
        self.password = password.to_string();
    }

    pub fn select_file(&mut self, file: SelectedFile) {
        self.selected_file = Some(file);
    }

    /// Goes through the PDF-only picker. A refused pick leaves the previous selection alone.
    pub async fn pick_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let file = SelectedFile::pick(path).await?;
        self.select_file(file);
        Ok(())
    }

    pub async fn submit(&mut self) -> SubmitStatus {
        self.is_submitting = true;
        self.error_message = None;
        let outcome = RecordMutator::new(&self.client)
            .upload(CreateRecordData {
                name: &self.name,
                password: &self.password,
                resume: self.selected_file.as_ref(),
            })
            .await;
        let status = match outcome {
            Ok(UploadOutcome::Accepted(body)) => {
                tracing::debug!("upload accepted: {}", body);
                SubmitStatus::Accepted
            }
            Ok(rejection) if rejection.is_duplicate() => {
                tracing::info!("upload refused as duplicate");
                self.error_message = Some(DUPLICATE_MESSAGE.into());
                SubmitStatus::Duplicate
            }
            Ok(UploadOutcome::Rejected { status, error }) => {
                tracing::error!("error uploading resume: {} {}", status, &error);
                self.error_message = Some(format!("{} ({})", UPLOAD_FAILED_MESSAGE, error));
                SubmitStatus::Failed
            }
            Err(e) => {
                tracing::error!("error uploading resume: {:?}", e);
                self.error_message = Some(UPLOAD_FAILED_MESSAGE.into());
                SubmitStatus::Failed
            }
        };
        self.is_submitting = false;
        if status == SubmitStatus::Accepted {
            self.refresh().await;
        }
        status
    }

    /// Loads `page` into the list. On failure the previous list and page count stay.
    pub async fn fetch_page(&mut self, page: u32) -> bool {
        self.is_loading = true;
        let result = RecordSelector::new(&self.client).get_page(page).await;
        self.is_loading = false;
        match result {
            Ok(fetched) => {
                self.records = fetched.data;
                self.total_pages = fetched.total_pages;
                true
            }
            Err(e) => {
                tracing::error!("error fetching page {}: {:?}", page, e);
                false
            }
        }
    }

    pub async fn refresh(&mut self) -> bool {
        self.fetch_page(self.current_page).await
    }

    /// Moving to a different page loads it; staying put does nothing.
    pub async fn set_page(&mut self, page: u32) -> bool {
        if page == self.current_page || page == 0 {
            return false;
        }
        self.current_page = page;
        self.fetch_page(page).await;
        true
    }

    /// Steps by `delta` pages if the matching pager control is enabled.
    pub async fn change_page(&mut self, delta: i32) -> bool {
        let enabled = match delta {
            d if d < 0 => self.can_go_previous(),
            d if d > 0 => self.can_go_next(),
            _ => false,
        };
        if !enabled {
            tracing::debug!("page change by {} ignored, control disabled", delta);
            return false;
        }
        match self.current_page.checked_add_signed(delta) {
            Some(page) => self.set_page(page).await,
            None => false,
        }
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_page != 1
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page != self.total_pages && self.records.len() >= self.options.page_size
    }

    pub fn record(&self, id: &RecordId) -> Option<&RecordEntry> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// Saves the record's in-memory bytes under the fixed download name.
    pub async fn download_record(&self, record: &RecordEntry) -> Result<PathBuf> {
        save_bytes(
            &self.options.download_dir,
            &self.options.download_filename,
            record.file.as_bytes(),
        )
        .await
    }

    pub async fn download_by_id(&self, id: &RecordId) -> Result<PathBuf> {
        let record = self
            .record(id)
            .ok_or_else(|| StandardError::new("ERR-RECORD-404").interpolate_err(id.to_string()))?;
        self.download_record(record).await
    }

    pub async fn delete_record(&mut self, id: &RecordId, confirm: &impl Confirm) -> DeleteStatus {
        if !confirm.confirm(DELETE_PROMPT) {
            return DeleteStatus::Cancelled;
        }
        self.deleting.insert(id.clone());
        let result = RecordMutator::new(&self.client).delete(id).await;
        self.deleting.remove(id);
        match result {
            Ok(()) => {
                tracing::info!("deleted record {}", id);
                self.refresh().await;
                DeleteStatus::Deleted
            }
            Err(e) => {
                tracing::error!("error deleting record {}: {:?}", id, e);
                DeleteStatus::Failed
            }
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error_message = None;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn records(&self) -> &[RecordEntry] {
        &self.records
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn is_deleting(&self, id: &RecordId) -> bool {
        self.deleting.contains(id)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}
