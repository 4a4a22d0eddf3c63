pub mod explodes;
pub mod normalize;

pub use explodes::{explode, explode_sub, parse_subscription, ExplodeError};
pub use normalize::normalize_sub_content;
