pub mod joke;
pub mod moderation;
pub mod shared;
pub mod submission;
