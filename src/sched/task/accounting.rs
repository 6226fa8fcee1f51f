//! Contabilidade de Recursos (Accounting)
//!
//! Rastreia o consumo de CPU por tarefa. O handler do timer incrementa o
//! total e decrementa o quantum da tarefa que estiver rodando.

use crate::core::time::jiffies::Tick;
use crate::sched::config::DEFAULT_QUANTUM;

/// Estatísticas de uso de uma tarefa
#[derive(Debug, Clone, Copy)]
pub struct Accounting {
    /// Total de ticks consumidos na CPU
    pub total_ticks: i64,

    /// Tick em que a tarefa ganhou a CPU pela última vez
    pub last_start_tick: Tick,

    /// Quantum restante nesta fatia de tempo (em ticks)
    pub quantum_left: i64,
}

impl Accounting {
    pub const fn new() -> Self {
        Self {
            total_ticks: 0,
            last_start_tick: 0,
            quantum_left: DEFAULT_QUANTUM,
        }
    }

    /// Registra o início de execução (quando a tarefa ganha a CPU)
    pub fn start_exec(&mut self, now: Tick) {
        self.last_start_tick = now;
        self.reset_quantum();
    }

    /// Reinicia o quantum da tarefa
    pub fn reset_quantum(&mut self) {
        self.quantum_left = DEFAULT_QUANTUM;
    }
}
