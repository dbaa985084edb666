pub mod pool;
pub mod response;
pub mod server;
