pub mod mse;
pub mod sum_squares;
pub mod loss_type;

pub use mse::MseLoss;
pub use sum_squares::SumSquaresLoss;
pub use loss_type::LossType;
