//! Pulse Kernel Library.
//!
//! Ponto central de exportação dos módulos do Kernel.
//! O Pulse é um kernel single-core cujo coração é o subsistema de tempo:
//! contador de ticks dirigido pelo PIT, fila de sleep ordenada e
//! busy-wait calibrado para atrasos sub-tick.

#![no_std]

// Habilitar alocação dinâmica (necessário para Box/VecDeque)
extern crate alloc;

// --- Módulos de Baixo Nível (Hardware) ---
pub mod arch; // HAL (CPU, IDT, Portas)
pub mod drivers; // Drivers Específicos (Serial, PIC, PIT)

// --- Módulos Centrais (Lógica do Kernel) ---
pub mod core; // Entry, Logging, Panic, Tempo
pub mod klib; // Utilitários Internos (Framework de Testes)
pub mod mm; // Heap do Kernel
pub mod sync; // Primitivas de Sincronização (Spinlock, Mutex)
pub mod sys; // Definições de Sistema (Tid, Errno)

// --- Subsistemas ---
pub mod sched; // Scheduler e Tarefas
