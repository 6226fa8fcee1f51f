//! Tempo e Timers
//!
//! O subsistema central do Pulse:
//! - `jiffies`: contador monotônico de ticks, incrementado pela IRQ do timer.
//! - `sleep`: fila ordenada de tarefas dormindo + despachante de wakeups.
//! - `calibrate`: medição do busy-wait (loops por tick) para atrasos sub-tick.
//! - `timer`: fachada pública (sleep/delay em ticks e unidades de tempo).

pub mod calibrate;
pub mod jiffies;
pub mod sleep;
pub mod timer;

#[cfg(feature = "self_test")]
pub mod test;
