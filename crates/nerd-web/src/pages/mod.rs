//! Page Components

mod chat;
mod home;

pub use chat::NerdAiPage;
pub use home::HomePage;
