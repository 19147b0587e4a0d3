pub mod connection;
pub mod entity;
pub mod repository;
#[cfg(test)]
pub mod testing;

pub use connection::establish_connection;
