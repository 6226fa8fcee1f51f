//! Drivers de hardware do Pulse.
//!
//! Apenas o essencial para o subsistema de tempo: porta serial para
//! logging, PIC 8259 para rotear a IRQ do timer e o PIT 8254 que gera
//! o heartbeat do sistema.

pub mod pic;
pub mod serial;
pub mod timer;
