pub mod episode_ctx;
pub mod episode_flow;

pub use episode_ctx::EpisodeCtx;
pub use episode_flow::{EpisodeFlow, ReviewOutcome};
