pub mod catalog;
pub mod recommender;

pub use catalog::{AlternativeFood, CatalogProvider, CsvCatalog, StaticCatalog};
pub use recommender::{recommend_alternatives, Recommendation, Suggestion};
