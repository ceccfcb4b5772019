pub mod number_format;
mod package_filter;
mod package_sorter;
pub mod presentation;
mod statistics;

pub use number_format::{compact_number, format_score, group_thousands};
pub use package_filter::PackageFilter;
pub use package_sorter::PackageSorter;
pub use presentation::{
    NameSegments, PackagePresentation, PackagePresenter, PresentationPolicy, RowAction,
    RowActionKind, Suggestion,
};
pub use statistics::CatalogStatistics;
