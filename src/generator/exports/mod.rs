pub mod proxy_to_clash;

pub use proxy_to_clash::proxy_to_clash;
