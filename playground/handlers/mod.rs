pub mod network;
pub mod train;
