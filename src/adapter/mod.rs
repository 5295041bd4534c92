//! Adapters implementing the ports against concrete infrastructure.

pub mod sqlite;
