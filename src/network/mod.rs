pub mod error;
pub mod network;
pub mod spec;

pub use error::{LayerRole, NetworkError};
pub use network::Network;
pub use spec::NetworkSpec;
