//! Ciclo de vida de tarefas: criação e limpeza.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec;
use core::pin::Pin;

use super::entity::Task;
use super::state::TaskState;
use crate::sched::config::KERNEL_STACK_SIZE;
use crate::sys::Tid;

/// Tarefas terminadas aguardando liberação de memória.
///
/// Uma tarefa não pode liberar a própria stack (está rodando nela quando
/// chama exit); quem libera é a idle task, em solo neutro.
/// Mutex de thread: só é tocada com interrupções desabilitadas, em
/// contexto de thread (exit e idle).
static ZOMBIES: spin::Mutex<VecDeque<Pin<Box<Task>>>> = spin::Mutex::new(VecDeque::new());

/// Cria uma tarefa de kernel e a coloca na RunQueue.
///
/// `entry` roda com interrupções habilitadas, numa stack própria de
/// `KERNEL_STACK_SIZE` bytes; se retornar, a tarefa é encerrada.
pub fn spawn(name: &str, entry: extern "C" fn()) -> Tid {
    let mut task = Box::pin(Task::new(name));

    // Stack própria; a posse fica com a Task (liberada no reaping)
    let stack = vec![0u8; KERNEL_STACK_SIZE].into_boxed_slice();
    let stack_top = (stack.as_ptr() as u64 + KERNEL_STACK_SIZE as u64) & !0xF;
    task.stack = Some(stack);

    task.context.setup(entry as usize as u64, stack_top);
    task.state = TaskState::Ready;

    let tid = task.tid;
    crate::kdebug!("(Sched) spawn TID=", tid.as_u32() as u64);

    crate::sched::core::enqueue(task);
    tid
}

/// Move uma tarefa terminada para a lista de zumbis.
pub fn add_zombie(task: Pin<Box<Task>>) {
    ZOMBIES.lock().push_back(task);
}

/// Libera todas as tarefas zumbis (chamado pela idle task).
pub fn cleanup_zombies() {
    let mut zombies = ZOMBIES.lock();
    while let Some(task) = zombies.pop_front() {
        crate::ktrace!("(Sched) Liberando zumbi TID=", task.tid.as_u32() as u64);
        drop(task);
    }
}
