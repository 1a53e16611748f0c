pub mod auth;
pub mod error;
pub mod flash;
pub mod login;
pub mod outcome;
pub mod overview;
pub mod populate;
pub mod records;
pub mod routes;
pub mod session;
pub mod settings;
pub mod strings;
pub mod validation;
pub mod views;
