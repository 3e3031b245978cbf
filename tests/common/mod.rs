#![allow(dead_code)]

pub mod fake_requests;
pub mod fixtures;
