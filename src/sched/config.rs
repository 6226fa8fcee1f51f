//! Constantes de configuração do Scheduler

/// Prioridade padrão para tarefas de kernel
pub const PRIORITY_DEFAULT: u8 = 128;

/// Prioridade da tarefa Idle (a menor)
pub const PRIORITY_IDLE: u8 = 0;

/// Tamanho padrão da Stack de Kernel (em bytes)
pub const KERNEL_STACK_SIZE: usize = 16 * 1024; // 16KB

/// Quantum padrão (Timeslice) em ticks do timer
pub const DEFAULT_QUANTUM: i64 = 10;
