/// Zip assembly for export artifacts and previews
pub mod builder;
