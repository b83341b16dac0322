pub mod markers;
pub mod projection;
pub mod prompts;
pub mod resolution;
pub mod sections;
