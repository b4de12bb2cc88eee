pub mod trainer;

pub use trainer::{
    AssignItemRequest, CreateTrainerRequest, DepositRequest, ItemKind, Trainer,
    UpdateTrainerRequest,
};
