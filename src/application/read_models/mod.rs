//! Read models for the package table
//!
//! A [`TableView`] is the display-ready description of the table: every
//! label is formatted and every CSS class chosen. Renderers only lay it out.

mod table_view;
mod table_view_builder;

pub use table_view::{
    DisplayState, HeaderView, LinkView, PresetOption, RowView, SummaryView, TableView,
};
pub use table_view_builder::{Column, TableViewBuilder, COLUMNS};
