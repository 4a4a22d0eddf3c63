pub mod clash;

pub use clash::{ClashDocument, ClashProxy, ClashProxyGroup};
