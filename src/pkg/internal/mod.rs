pub mod adaptors;
pub mod client;
pub mod controller;
pub mod download;
pub mod picker;
