//! Application services

pub mod editor;

pub use editor::EditorService;
