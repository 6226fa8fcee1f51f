//! Panic Handler.
//!
//! O "Airbag" do sistema. Quando o Rust detecta um estado irrecuperável
//! (assert violado, overflow em debug, alocação impossível), esta função
//! é chamada.
//!
//! # Comportamento
//! 1. Desabilita interrupções (evita loop de panics).
//! 2. Loga a localização na Serial (para o desenvolvedor).
//! 3. Trava a CPU (hlt loop).
//!
//! Todas as violações de precondição do subsistema de tempo (dormir com
//! interrupções desabilitadas, overflow na calibração) terminam aqui:
//! são erros de programação, não condições de runtime a recuperar.

use crate::arch::{Cpu, CpuOps};
use core::panic::PanicInfo;

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    // 1. Segurança imediata: parar interrupções
    Cpu::disable_interrupts();

    // 2. Log estruturado (serial é o que há de mais confiável aqui).
    // Sem core::fmt: emitimos arquivo e linha com os primitivos da serial.
    crate::kerror!("================ KERNEL PANIC ================");

    if let Some(location) = info.location() {
        crate::klog!("  em: ");
        crate::klog!(location.file());
        crate::klog!(" linha=", location.line() as u64);
        crate::knl!();
    }

    crate::kerror!("==============================================");

    // 3. Morrer com dignidade
    Cpu::hang();
}
