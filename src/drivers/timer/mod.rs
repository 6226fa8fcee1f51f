//! Driver do timer de sistema (PIT 8254).
//!
//! Este módulo conecta o hardware ao subsistema de tempo:
//! o PIT gera o "heartbeat" (IRQ 0) e `handle_timer_interrupt` é o
//! ponto de entrada chamado pelo stub assembly a cada tick.
//!
//! # Responsabilidades por tick
//! 1. Timekeeping: incrementar o contador global (atômico).
//! 2. Scheduling: contabilizar o quantum da tarefa corrente.
//! 3. Wakeups: varrer a fila de sleep e devolver tarefas prontas à RunQueue.
//! 4. Hardware ACK: avisar o PIC que a interrupção foi processada.
//!
//! Todo o trabalho feito aqui é limitado: nenhum passo pode bloquear nem
//! esperar indefinidamente por um lock, senão perdemos ticks.

pub mod pit;

use crate::arch::x86_64::idt::TIMER_VECTOR;
use crate::core::time::{jiffies, sleep};

/// Handler de Interrupção do Timer (IRQ 0 / Vetor 32).
///
/// Chamado pelo stub assembly (`arch::x86_64::interrupts`). Roda com
/// interrupções desabilitadas e até o fim; o hardware não reentra aqui.
pub fn handle_timer_interrupt() {
    // 1. Timekeeping (crítico e atômico)
    jiffies::inc();

    // 2. Scheduling (contabilidade de quantum; try_lock, nunca espera)
    crate::sched::core::timer_tick();

    // 3. Acordar tarefas cujo tick de despertar chegou
    sleep::wake_expired();

    // 4. Hardware ACK
    unsafe {
        crate::drivers::pic::PICS.lock().notify_eoi(TIMER_VECTOR);
    }
}

/// Retorna o tempo de atividade do sistema em segundos (aproximado).
pub fn uptime_seconds() -> i64 {
    jiffies::ticks() / jiffies::HZ
}
