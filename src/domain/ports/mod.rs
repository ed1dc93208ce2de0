//! Hexagonal seams between domain/services and the outside world.

mod intent_committer;
mod keyword_chooser;
mod module_installer;
mod scrapers_config_provider;
mod upstream_tag_source;
mod version_store;

pub use intent_committer::IntentCommitter;
pub use keyword_chooser::{ChosenKeyword, KeywordChooser};
pub use module_installer::ModuleInstaller;
pub use scrapers_config_provider::ScrapersConfigProvider;
pub use upstream_tag_source::UpstreamTagSource;
pub use version_store::VersionStore;
