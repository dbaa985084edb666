pub mod errors;
pub mod log_entry;
pub mod request;
pub mod resource;
pub mod status;
