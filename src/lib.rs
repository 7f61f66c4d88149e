//! zia-probe library
//!
//! Resolves Zscaler credentials from the environment, builds a ZIA admin API
//! client for the selected authentication mode, and provisions a test URL
//! category.

pub mod cli;
pub mod color;
pub mod commands;
pub mod credentials;
pub mod format;
pub mod provision;
pub mod zia;
