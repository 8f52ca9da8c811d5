pub mod internal;
pub mod ui;
