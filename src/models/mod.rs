// src/models/mod.rs

pub mod flag;
pub mod question;
