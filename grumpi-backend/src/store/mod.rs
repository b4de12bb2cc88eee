pub mod catalog;
pub mod error;
pub mod json_file;
pub mod trainers;

pub use catalog::CombatItemCatalog;
pub use error::StoreError;
pub use trainers::TrainerStore;
