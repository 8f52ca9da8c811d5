pub mod prompt;
pub mod uispec;
