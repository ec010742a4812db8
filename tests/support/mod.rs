pub mod helpers;
pub mod recording;
