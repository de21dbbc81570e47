pub mod routes;
mod server;
pub use server::{app, serve};
pub mod public;
mod slots;
mod state;
pub use state::AppState;
mod utils;
pub use utils::API_KEY_HEADER;
