use askama::Template;
use standard_error::{Interpolate, StandardError};

use crate::{pkg::internal::controller::FormController, prelude::Result};

pub struct RecordRow<'a> {
    pub id: String,
    pub name: &'a str,
    pub size: usize,
}

#[derive(Template)]
#[template(path = "page.txt")]
pub struct PageView<'a> {
    pub show_form: bool,
    pub has_error: bool,
    pub error: &'a str,
    pub name: &'a str,
    pub password_mask: String,
    pub file_name: &'a str,
    pub has_rows: bool,
    pub rows: Vec<RecordRow<'a>>,
    pub current_page: u32,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl<'a> PageView<'a> {
    pub fn from_controller(c: &'a FormController, show_form: bool) -> Self {
        let rows: Vec<RecordRow<'a>> = c
            .records()
            .iter()
            .map(|r| RecordRow {
                id: r.id.to_string(),
                name: &r.name,
                size: r.file.len(),
            })
            .collect();
        PageView {
            show_form,
            has_error: c.error_message().is_some(),
            error: c.error_message().unwrap_or_default(),
            name: c.name(),
            password_mask: "*".repeat(c.password().chars().count()),
            file_name: c
                .selected_file()
                .map(|f| f.file_name.as_str())
                .unwrap_or("(none)"),
            has_rows: !rows.is_empty(),
            rows,
            current_page: c.current_page(),
            prev_enabled: c.can_go_previous(),
            next_enabled: c.can_go_next(),
        }
    }

    pub fn display(&self) -> Result<String> {
        self.render()
            .map_err(|e| StandardError::new("ERR-UI-001").interpolate_err(e.to_string()))
    }
}
