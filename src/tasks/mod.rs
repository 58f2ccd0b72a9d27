pub mod feed_reader;
pub mod refresher;
