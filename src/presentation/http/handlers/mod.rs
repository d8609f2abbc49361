pub mod admin;
pub mod health;
pub mod jokes;
pub mod submissions;
