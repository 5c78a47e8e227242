mod model;
mod repository;

pub use model::StatusDB;
pub use repository::StatusRepository;
