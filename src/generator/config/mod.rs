pub mod clash;
pub mod classify;
pub mod group;
pub mod template;

pub use clash::{generate_clash_config, generate_meta_config};
pub use classify::classify_node;
pub use template::{default_template, load_template, load_template_or_default, TemplateError};
