//! Entry Point Lógico do Kernel.
//!
//! `kernel_main` é o primeiro código Rust de alto nível executado após o
//! trampolim assembly (`_start`).
//!
//! # Responsabilidades
//! 1. **Orquestração**: inicializa subsistemas na ordem estrita de
//!    dependência (Serial -> IDT -> Heap -> PIC/PIT -> Scheduler).
//! 2. **Transição**: habilita interrupções (o heartbeat começa), calibra o
//!    busy-wait e entrega a CPU ao scheduler.

use crate::arch::{Cpu, CpuOps};
use crate::core::time::jiffies::HZ;
use crate::core::time::{calibrate, timer};
use crate::sched::task::lifecycle;

/// Função principal do Kernel (High-Level).
///
/// Chamada pelo `_start` com a stack já configurada. Não retorna.
#[no_mangle]
pub extern "C" fn kernel_main() -> ! {
    // 1. Sistema de Logs (a partir daqui kinfo!/kerror! funcionam)
    crate::drivers::serial::init();
    crate::kinfo!("Pulse Kernel - Iniciando");

    // 2. Tratamento de interrupções e exceções
    // Crítico antes de qualquer operação que possa gerar falhas.
    unsafe {
        crate::arch::platform::idt::init();
    }

    // 3. Heap do kernel (habilita Box/VecDeque)
    crate::mm::init();

    // 4. Drivers de hardware do tempo (PIC + PIT)
    // O PIC roteia a IRQ 0 para o vetor 32; o PIT passa a gerar o
    // heartbeat na frequência configurada.
    unsafe {
        let mut pics = crate::drivers::pic::PICS.lock();
        pics.init();
        pics.unmask(0); // IRQ0 = Timer
    }

    {
        let mut pit = crate::drivers::timer::pit::PIT.lock();
        // Sem timer o sistema não pode operar; falha aqui é fatal.
        let freq = pit
            .set_frequency(HZ as u32)
            .expect("Falha ao configurar o PIT");
        crate::kinfo!("Timer configurado (Hz)=", freq as u64);
    }

    // 5. Scheduler (idle task + filas)
    crate::sched::core::init();

    // 6. Habilitar interrupções: os ticks começam a fluir
    crate::kinfo!("Habilitando Interrupções - Sistema Ativo");
    Cpu::enable_interrupts();

    // 7. Calibrar o busy-wait (precisa dos ticks andando)
    calibrate::calibrate();

    // 8. Self-tests que não dependem do scheduler
    #[cfg(feature = "self_test")]
    {
        crate::core::time::test::run_time_tests();
        crate::core::time::test::run_calibration_tests();
        crate::sched::test::run_sched_tests();
        crate::sync::test::run_sync_tests();
    }

    // 9. Primeira tarefa de verdade
    lifecycle::spawn("init", init_task_entry);

    // 10. Entregar a CPU ao scheduler. O contexto de boot é abandonado:
    // daqui em diante a idle task é o chão do sistema.
    Cpu::disable_interrupts();
    crate::sched::core::idle::enter_idle();
}

/// Primeira tarefa do sistema: roda os testes que precisam do scheduler
/// vivo e depois fica reportando estatísticas periodicamente.
extern "C" fn init_task_entry() {
    crate::kinfo!("(Init) Tarefa inicial rodando");

    #[cfg(feature = "self_test")]
    crate::core::time::test::run_sleep_tests();

    crate::kok!("Sistema pronto");

    loop {
        timer::sleep_for_ticks(5 * HZ);
        timer::print_stats();
    }
}
