//! Núcleo do scheduler
//!
//! Exporta as primitivas consumidas pelo subsistema de tempo e pelo boot.

pub mod idle;
pub mod runqueue;
pub mod scheduler;
pub mod switch;

pub use scheduler::{
    current_tid, enqueue, exit_current, init, pick_next, sleep_until, timer_tick, yield_now,
    CURRENT,
};
