pub mod classifier;
pub mod etl;
pub mod report;
pub mod sanitizer;
pub mod translate;
pub mod window;

pub use crate::domain::model::{
    BlogPost, DateRange, Document, FeedBatch, FeedEntry, Item, WeekRange,
};
pub use crate::domain::ports::{FeedSource, Pipeline, Storage, Translator};
pub use crate::utils::error::Result;
