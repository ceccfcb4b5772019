/// Type alias for Result with anyhow::Error as the error type.
/// Typed `CatalogError` values travel inside it and can be recovered with `downcast_ref`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
