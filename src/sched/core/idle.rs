//! Idle Task - fallback permanente quando não há tarefas prontas.
//!
//! A idle task mora numa variável estática própria (`IDLE_TASK`) e NUNCA
//! entra na RunQueue nem no slot CURRENT: enquanto o idle roda, CURRENT é
//! `None`. Isso garante que sempre existe um contexto válido para onde
//! voltar quando a última tarefa dorme ou termina.

use crate::arch::{Cpu, CpuOps};
use crate::sched::config::{KERNEL_STACK_SIZE, PRIORITY_IDLE};
use crate::sched::task::context::{self, CpuContext};
use crate::sched::task::{lifecycle, Task, TaskState};
use crate::sync::Spinlock;
use crate::sys::Tid;
use alloc::boxed::Box;
use alloc::vec;
use core::pin::Pin;

/// A idle task permanente.
pub static IDLE_TASK: Spinlock<Option<Pin<Box<Task>>>> = Spinlock::new(None);

/// Cria e registra a idle task (TID 0). Chamado uma vez por `sched::init`.
pub fn init() {
    let mut task = Box::pin(Task::new("idle"));
    task.tid = Tid::IDLE;
    task.priority = PRIORITY_IDLE;
    task.state = TaskState::Ready;

    let stack = vec![0u8; KERNEL_STACK_SIZE].into_boxed_slice();
    let stack_top = (stack.as_ptr() as u64 + KERNEL_STACK_SIZE as u64) & !0xF;
    task.stack = Some(stack);
    task.context.setup(idle_task_entry as usize as u64, stack_top);

    let mut idle_guard = IDLE_TASK.lock();
    if idle_guard.is_some() {
        crate::kwarn!("(Idle) init chamado mais de uma vez!");
        return;
    }
    *idle_guard = Some(task);

    crate::kdebug!("(Idle) Idle task criada (TID 0)");
}

/// Loop da idle task: economiza energia até a próxima interrupção e
/// despacha tarefas que ficarem prontas (acordadas pelo timer).
extern "C" fn idle_task_entry() {
    crate::kinfo!("(Idle) Idle task iniciada");

    loop {
        Cpu::enable_interrupts();
        Cpu::halt();
        Cpu::disable_interrupts();

        // Solo neutro: liberar tarefas que terminaram
        lifecycle::cleanup_zombies();

        dispatch_next();
        // Quando o sistema esvazia de novo, voltamos aqui
    }
}

/// Se houver tarefa pronta, troca para ela salvando o contexto do idle.
///
/// Chamado com interrupções desabilitadas, de dentro do loop do idle.
fn dispatch_next() {
    if let Some(next) = super::scheduler::pick_next() {
        let idle_ctx = idle_context_ptr();
        let current_guard = super::scheduler::CURRENT.lock();
        unsafe { super::switch::prepare_and_switch_to(next, Some(idle_ctx), current_guard) };
        // Retomada: o sistema ficou ocioso outra vez
    }
}

/// Ponteiro para o contexto da idle task.
///
/// O ponteiro permanece válido fora do lock: a Task vive pinned no heap e
/// `IDLE_TASK` nunca é esvaziada depois de `init`.
fn idle_context_ptr() -> *mut CpuContext {
    let mut idle_guard = IDLE_TASK.lock();
    match *idle_guard {
        Some(ref mut task) => &mut task.context as *mut CpuContext,
        None => panic!("(Idle) idle task não inicializada!"),
    }
}

/// Salva o contexto atual em `old_ctx` e retoma o idle.
///
/// Usado quando a última tarefa pronta acabou de dormir.
///
/// # Safety
/// Interrupções desabilitadas; `old_ctx` válido.
pub unsafe fn switch_to_idle(old_ctx: *mut CpuContext) {
    let idle_ctx = idle_context_ptr();
    context::switch(&mut *old_ctx, &*idle_ctx);
    // Retomada: a tarefa antiga voltou a ser escalonada
}

/// Entra no idle abandonando o contexto atual (boot ou exit).
pub fn enter_idle() -> ! {
    let idle_ctx = idle_context_ptr();
    unsafe { context::jump_to_context(&*idle_ctx) }
}
