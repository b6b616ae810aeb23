//! ifscan: network interface scanner
//!
//! A library for enumerating network interfaces, classifying them as wired
//! or wireless, detecting their connection state, and rescanning them
//! whenever the operating system reports a change.

pub mod config;
pub mod event;
pub mod network;
pub mod output;
pub mod probe;
pub mod scanner;
pub mod time;
