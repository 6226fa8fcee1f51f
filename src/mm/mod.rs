//! Gerenciamento de Memória do Pulse.
//!
//! Reduzido ao essencial: um heap de kernel sobre uma arena estática,
//! suficiente para `Box`, `VecDeque` e as stacks das tarefas.

pub mod heap;

/// Inicializa o subsistema de memória.
pub fn init() {
    heap::init();
}
