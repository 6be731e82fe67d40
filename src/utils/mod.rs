pub mod client;
pub mod credentials;
pub mod media;
pub mod slug;
pub mod time;
pub mod token;
