mod activation;
mod feedforward;

pub use activation::{relu, relu_prime};
pub use feedforward::Network;
