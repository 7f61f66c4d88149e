#![allow(dead_code)]

pub mod fake_zia;
pub mod fixtures;
