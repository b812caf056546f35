pub mod columns;
pub mod pinning;
pub mod symbols;
pub mod text_ui;
pub mod validate;
