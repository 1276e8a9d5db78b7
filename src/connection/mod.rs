mod compat;
mod lifecycle;
mod savepoint;
mod statement;
mod tx;

pub use lifecycle::Connection;
