pub mod trainer;
pub mod train_config;

pub use trainer::{train_step, train_batch, eval_loss};
pub use train_config::TrainConfig;
