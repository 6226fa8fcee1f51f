//! Task management module

pub mod accounting;
pub mod context;
pub mod entity;
pub mod lifecycle;
pub mod state;

pub use crate::sys::Tid;
pub use entity::Task;
pub use state::TaskState;
