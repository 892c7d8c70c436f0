pub mod episode;
pub mod loaders;
pub mod prompt;
pub mod verdict;

pub use episode::EpisodeRef;
pub use loaders::load_prompt_config;
pub use prompt::{PromptConfig, TaskPrompt};
pub use verdict::{EpisodeVerdict, EvidenceItem, Metrics, VerdictCategory};
