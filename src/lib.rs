pub mod activation;
pub mod loss;
pub mod regularization;
pub mod graph;
pub mod network;
pub mod train;

// Convenience re-exports
pub use activation::activation::ActivationFunction;
pub use loss::loss_type::LossType;
pub use regularization::regularization::Regularization;
pub use graph::{Link, LinkId, Node, NodeId};
pub use network::{LayerRole, Network, NetworkError, NetworkSpec};
pub use train::{eval_loss, train_batch, train_step, TrainConfig};
