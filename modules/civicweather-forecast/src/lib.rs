pub mod corpus;
pub mod scorer;
pub mod shaping;
pub mod synthesizer;

pub use scorer::compute_metrics;
pub use shaping::{level, temperature_tier, Level, TemperatureTier};
pub use synthesizer::{synthesize, SynthesizerOptions, VoiceMode};
