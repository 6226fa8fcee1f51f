//! # Hardware Abstraction Layer (HAL)
//!
//! O módulo `arch` é a única ponte entre o Kernel Core (lógica agnóstica)
//! e o hardware real. Toda interação com registradores, instruções
//! privilegiadas e controle de interrupções passa por aqui.
//!
//! 1. O Kernel Core importa `crate::arch::Cpu`.
//! 2. `Cpu` é um *type alias* para a implementação concreta (`x86_64::X64Cpu`).
//! 3. Funções como `Cpu::halt()` ou `Cpu::disable_interrupts()` viram
//!    instruções assembly específicas (`hlt`, `cli`).

pub mod traits;

// Seleção de Arquitetura: x86_64
#[cfg(target_arch = "x86_64")]
pub mod x86_64;

#[cfg(target_arch = "x86_64")]
pub use x86_64 as platform;

// Re-exports globais para o kernel usar
pub use platform::Cpu;
pub use traits::*;
