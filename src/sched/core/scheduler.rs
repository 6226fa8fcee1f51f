//! Orquestrador de Agendamento (High-Level Scheduler)
//!
//! Coordena as transições de estado das tarefas (Running, Sleeping, Ready)
//! e decide quem ocupa a CPU a seguir.
//!
//! ## Mecanismos
//! - **Cooperativo:** tarefas cedem voluntariamente via `yield_now()` ou
//!   dormindo (`sleep_until`).
//! - **Tick:** o handler do timer chama `timer_tick()` para contabilidade;
//!   ele nunca troca de contexto diretamente.
//!
//! ## Sincronização
//! O slot `CURRENT` usa Spinlock (o handler o consulta com `try_lock`).
//! Todas as trocas de contexto acontecem com interrupções desabilitadas e
//! com todos os locks já soltos; nenhum lock atravessa um switch.

use crate::arch::{Cpu, CpuOps};
use crate::core::time::jiffies::Tick;
use crate::sched::task::context::CpuContext;
use crate::sched::task::{lifecycle, Task, TaskState};
use crate::sync::Spinlock;
use crate::sys::Tid;
use alloc::boxed::Box;
use core::pin::Pin;

use super::idle;
use super::runqueue::RUNQUEUE;
use super::switch;

/// Task atualmente em execução neste núcleo.
pub static CURRENT: Spinlock<Option<Pin<Box<Task>>>> = Spinlock::new(None);

/// Inicializa o subsistema de agendamento (cria a idle task).
pub fn init() {
    idle::init();
    crate::kinfo!("(Sched) Sistema de agendamento pronto");
}

/// Chamado a cada tick do relógio pelo handler do timer.
///
/// Contabiliza o quantum da tarefa corrente. Usa `try_lock`: em contexto
/// de interrupção não podemos esperar por um lock que uma thread detém.
pub fn timer_tick() {
    if let Some(mut current_guard) = CURRENT.try_lock() {
        if let Some(ref mut task) = *current_guard {
            if task.state == TaskState::Running {
                task.accounting.total_ticks += 1;
                if task.accounting.quantum_left > 0 {
                    task.accounting.quantum_left -= 1;
                }
            }
        }
    }
}

/// Retorna o TID da tarefa corrente (None se estamos no idle/boot).
pub fn current_tid() -> Option<Tid> {
    CURRENT.lock().as_ref().map(|task| task.tid)
}

/// Adiciona task à fila de execução.
/// Nunca bloqueia: seguro para o despachante de wakeups em contexto de IRQ.
pub fn enqueue(task: Pin<Box<Task>>) {
    crate::ktrace!("(Sched) RunQueue recebe TID=", task.tid.as_u32() as u64);
    RUNQUEUE.lock().push(task);
}

/// Seleciona próxima task para executar.
pub fn pick_next() -> Option<Pin<Box<Task>>> {
    RUNQUEUE.lock().pop()
}

/// Yield: cede a CPU voluntariamente.
pub fn yield_now() {
    Cpu::disable_interrupts();

    if let Some(next) = pick_next() {
        let mut current_guard = CURRENT.lock();
        match current_guard.take() {
            Some(mut old_task) => {
                old_task.state = TaskState::Ready;
                // O ponteiro continua válido depois do move: a Task vive no heap
                let old_ctx = &mut old_task.context as *mut CpuContext;
                RUNQUEUE.lock().push(old_task);
                unsafe { switch::prepare_and_switch_to(next, Some(old_ctx), current_guard) };
                // Retomada: outra tarefa nos devolveu a CPU
            }
            None => {
                // yield sem tarefa corrente (boot): devolver e seguir
                crate::kwarn!("(Sched) yield_now sem tarefa corrente");
                RUNQUEUE.lock().push(next);
            }
        }
    }

    Cpu::enable_interrupts();
}

/// Suspende a tarefa corrente até o tick absoluto `wake_at`.
///
/// Este é o ponto de bloqueio do subsistema de tempo. Sequência:
/// 1. tirar a tarefa do slot CURRENT (interrupções desabilitadas);
/// 2. marcar Sleeping e fixar o prazo;
/// 3. inserir ordenado na fila de sleep (lock solto logo em seguida);
/// 4. trocar de contexto para a próxima tarefa (ou idle).
///
/// O retorno só acontece quando o despachante de wakeups devolver a
/// tarefa à RunQueue e alguém escaloná-la de novo. Nenhum lock é mantido
/// através da troca: o lock da fila de sleep é liberado no passo 3, antes
/// do switch. Segurá-lo através do bloqueio travaria qualquer outra
/// thread (e o próprio despachante) que precisasse da fila.
pub fn sleep_until(wake_at: Tick) {
    Cpu::disable_interrupts();

    let task = CURRENT.lock().take();
    match task {
        Some(mut task) => {
            task.wake_at = Some(wake_at);
            task.state = TaskState::Sleeping;
            let old_ctx = &mut task.context as *mut CpuContext;

            // A posse vai para a fila de sleep; o guard interno é solto
            // antes de qualquer troca de contexto.
            crate::core::time::sleep::enqueue_sleeper(task);

            // CURRENT está vazio: despachar a próxima ou cair no idle.
            match pick_next() {
                Some(next) => {
                    let current_guard = CURRENT.lock();
                    unsafe { switch::prepare_and_switch_to(next, Some(old_ctx), current_guard) };
                }
                None => unsafe { idle::switch_to_idle(old_ctx) },
            }
            // Retomada: o prazo venceu e fomos re-escalonados
        }
        None => {
            crate::kerror!("(Sched) sleep_until sem tarefa corrente!");
        }
    }

    Cpu::enable_interrupts();
}

/// Exit: termina a tarefa corrente e nunca retorna.
pub fn exit_current() -> ! {
    Cpu::disable_interrupts();

    {
        let mut current_guard = CURRENT.lock();
        if let Some(mut old_task) = current_guard.take() {
            crate::kdebug!("(Sched) exit TID=", old_task.tid.as_u32() as u64);
            old_task.state = TaskState::Zombie;
            // Ainda estamos rodando na stack desta tarefa: quem libera é a
            // idle task, depois que trocarmos de contexto.
            lifecycle::add_zombie(old_task);
        }
    }

    if let Some(next) = pick_next() {
        let current_guard = CURRENT.lock();
        unsafe { switch::prepare_and_switch_to(next, None, current_guard) };
        // prepare_and_switch_to com old_ctx=None salta e não retorna
        unreachable!();
    }

    // Sem tarefas prontas: voltar para o idle sem salvar este contexto
    idle::enter_idle();
}
