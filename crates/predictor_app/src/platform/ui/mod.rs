pub mod constants;
pub mod document;
pub mod layout;
pub mod render;
