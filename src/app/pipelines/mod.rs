pub mod blog_pipeline;
pub mod updates_pipeline;

pub use blog_pipeline::BlogPipeline;
pub use updates_pipeline::{UpdatesPipeline, CUSTOM_RANGE_INTRO, WEEKLY_INTRO};
