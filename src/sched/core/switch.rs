//! Lógica de Troca de Contexto (Context Switching)

use crate::core::time::jiffies;
use crate::sched::task::context::{self, CpuContext};
use crate::sched::task::{Task, TaskState};
use crate::sync::SpinlockGuard;
use alloc::boxed::Box;
use core::pin::Pin;

/// Efetua a troca de contexto de baixo nível.
///
/// Marca `next` como Running, instala-a no slot CURRENT, solta o guard e
/// só então troca. Se `old_ctx` é `Some`, o contexto atual é salvo e esta
/// função RETORNA quando a tarefa antiga for re-escalonada; com `None` o
/// salto é definitivo (o contexto atual é abandonado).
///
/// # Safety
/// Deve ser chamada com interrupções desabilitadas e sem nenhum outro
/// lock em posse além do guard recebido.
pub unsafe fn prepare_and_switch_to(
    mut next: Pin<Box<Task>>,
    old_ctx: Option<*mut CpuContext>,
    mut current_guard: SpinlockGuard<'_, Option<Pin<Box<Task>>>>,
) {
    next.state = TaskState::Running;
    next.accounting.start_exec(jiffies::ticks());

    let new_ctx = &next.context as *const CpuContext;

    crate::ktrace!("(Sched) Trocando para TID=", next.tid.as_u32() as u64);

    // Transferir posse para o slot CURRENT e soltar o lock antes do salto
    *current_guard = Some(next);
    drop(current_guard);

    match old_ctx {
        Some(old) => context::switch(&mut *old, &*new_ctx),
        None => context::jump_to_context(&*new_ctx),
    }
}
