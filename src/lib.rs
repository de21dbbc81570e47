pub mod api;
pub mod calls;
pub mod cli;
pub mod core;
pub mod google;
pub mod scheduling;
