#![allow(dead_code)]

pub mod pipeline;
pub mod temp_db;
