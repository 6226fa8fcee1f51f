//! # Primitivas de Sincronização
//!
//! ## Hierarquia de Uso
//!
//! ```text
//! Spinlock -> Seções críticas curtas, compartilhadas com handlers de IRQ
//! Mutex    -> Estado de configuração tocado apenas por contexto de thread
//! ```
//!
//! ## Regras
//!
//! - **Spinlock**: desabilita interrupções enquanto o guard vive. É a única
//!   primitiva que pode proteger estado tocado pelo handler do timer.
//!   Dentro de um handler use somente `try_lock`.
//! - **Mutex**: nunca usar em estado compartilhado com interrupções.
//! - **Nenhum lock** pode ser mantido através de uma troca de contexto.

pub mod mutex;
pub mod spinlock;

#[cfg(feature = "self_test")]
pub mod test;

pub use mutex::{Mutex, MutexGuard};
pub use spinlock::{Spinlock, SpinlockGuard};
