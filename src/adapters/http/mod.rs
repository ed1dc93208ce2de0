//! HTTP-backed adapters for the external collaborators (spec.md §3, §4.6).

pub mod intent_committer;
pub mod keyword_chooser;
pub mod scrapers_config_provider;
pub mod upstream_tag_source;

pub use intent_committer::HttpIntentCommitter;
pub use keyword_chooser::HttpKeywordChooser;
pub use scrapers_config_provider::HttpScrapersConfigProvider;
pub use upstream_tag_source::GitHubUpstreamTagSource;
