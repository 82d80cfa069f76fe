//! Interactive manager for a company directory of departments, roles and employees, kept in a
//! SQLite database.

pub mod choices;
pub mod config;
pub mod data_handling;
pub mod department;
pub mod gateway;
pub mod personnel;
pub mod role;
pub mod table;
pub mod textinterface;

/// Row identifier as stored in the database.
pub type DbId = i64;
