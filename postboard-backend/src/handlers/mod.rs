pub mod jobs;
pub mod posts;

pub mod utils;
