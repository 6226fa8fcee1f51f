//! Core Module
//!
//! Contém a lógica central do kernel: entry point de alto nível,
//! logging, panic handler e o subsistema de tempo.

pub mod entry;
pub mod logging;
pub mod panic;
pub mod time;
