pub mod model;
pub mod view;

pub use model::ResultsModel;
