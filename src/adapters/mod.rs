// Adapters layer: concrete implementations of the domain ports (http feeds, translation, storage).

pub mod http;
pub mod storage;
pub mod translate;
