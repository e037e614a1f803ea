pub mod message;
pub mod user_connection;
