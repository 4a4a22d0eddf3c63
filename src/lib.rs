pub mod error;
pub mod generator;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod settings;
pub mod utils;

// Re-export the main proxy types for easier access
pub use models::{Proxy, ProxyType};

pub use error::{Error, Result};
pub use generator::{generate_clash_config, generate_meta_config, ClashDocument};
pub use parser::{explode, explode_sub, parse_subscription, ExplodeError};
pub use settings::Settings;
