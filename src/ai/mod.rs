mod agent;
pub mod networks;
pub mod state_encoding;

pub use agent::{Agent, MutationConfig, MutationTarget};
pub use networks::Network;
pub use state_encoding::{encode_features, FEATURE_COUNT};
