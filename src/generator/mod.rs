pub mod config;
pub mod exports;
pub mod yaml;

// Re-export common types
pub use config::{
    classify_node, default_template, generate_clash_config, generate_meta_config, load_template,
    load_template_or_default, TemplateError,
};
pub use exports::proxy_to_clash;
pub use yaml::{ClashDocument, ClashProxy, ClashProxyGroup};
