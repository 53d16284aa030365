pub mod admin;
pub mod health;
pub mod interest;
pub mod internal;
pub mod participants;
pub mod profile;
