//! UI components

pub mod dropdown;
pub mod search_bar;
pub mod theme;
