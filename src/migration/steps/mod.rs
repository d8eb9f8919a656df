mod promote;
mod synthesize;

pub use promote::PromoteToContent;
pub use synthesize::SynthesizeNames;
