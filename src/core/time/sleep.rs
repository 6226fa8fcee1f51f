//! Sleep Queue - fila ordenada de tarefas dormindo
//!
//! Mantém as tarefas suspensas por tempo, ordenadas pelo tick absoluto de
//! despertar (`wake_at`). A ordenação é o que permite ao handler do timer
//! verificar em O(1) se existe alguém para acordar: basta olhar a cabeça.
//!
//! # Disciplina de lock
//!
//! A fila é o único estado compartilhado entre contexto de thread (inserção,
//! em `sched::core::sleep_until`) e contexto de interrupção (remoção, em
//! `wake_expired`). As duas vias usam o mesmo `Spinlock`, mas com regras
//! diferentes:
//!
//! - Thread: `lock()` normal. O guard desabilita interrupções, então o
//!   handler nunca encontra a fila no meio de uma inserção.
//! - Interrupção: somente `try_lock()`. Se houver disputa, a varredura é
//!   adiada para o próximo tick; como a fila está ordenada e `wake_at` é
//!   absoluto, nenhum wakeup se perde, apenas atrasa um tick.
//!
//! O lock NUNCA atravessa a entrega de uma tarefa ao scheduler nem uma
//! troca de contexto.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use core::pin::Pin;

use super::jiffies::{self, Tick};
use crate::sched::task::{Task, TaskState};
use crate::sync::Spinlock;

/// Fila global de tarefas dormindo
pub static SLEEP_QUEUE: Spinlock<SleepQueue> = Spinlock::new(SleepQueue::new());

/// Fila ordenada por `wake_at` crescente; empates mantêm ordem de chegada
/// (FIFO), garantindo que duas tarefas que pediram o mesmo prazo acordem
/// na ordem em que pediram.
pub struct SleepQueue {
    entries: VecDeque<Pin<Box<Task>>>,
}

impl SleepQueue {
    pub const fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Insere uma tarefa mantendo a ordenação.
    ///
    /// O ponto de inserção é antes da primeira entrada com `wake_at`
    /// estritamente maior (busca linear; as filas típicas são curtas).
    /// `wake_at` é fixado na inserção e não muda enquanto a tarefa dorme.
    pub fn insert(&mut self, task: Pin<Box<Task>>) {
        let wake_at = match task.wake_at {
            Some(tick) => tick,
            None => {
                // Tarefa sem prazo na fila de sleep é bug do chamador;
                // tratamos como "acorda já" para não perder a tarefa.
                crate::kerror!("(Sleep) tarefa sem wake_at na fila!");
                0
            }
        };

        let position = self
            .entries
            .iter()
            .position(|queued| queued.wake_at.map_or(false, |w| w > wake_at));

        match position {
            Some(index) => self.entries.insert(index, task),
            None => self.entries.push_back(task),
        }
    }

    /// Remove e retorna a cabeça se o prazo dela já chegou.
    ///
    /// Nunca retorna uma tarefa antes do prazo: `wake_at <= now` é a única
    /// condição de saída da fila.
    pub fn pop_due(&mut self, now: Tick) -> Option<Pin<Box<Task>>> {
        let due = self
            .entries
            .front()
            .map_or(false, |head| head.wake_at.map_or(true, |w| w <= now));

        if due {
            self.entries.pop_front()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Verifica a invariante de ordenação (usado pelos self-tests).
    pub fn is_sorted(&self) -> bool {
        let mut previous: Option<Tick> = None;
        for task in &self.entries {
            let wake = task.wake_at.unwrap_or(Tick::MIN);
            if let Some(prev) = previous {
                if wake < prev {
                    return false;
                }
            }
            previous = Some(wake);
        }
        true
    }
}

/// Insere uma tarefa dormente na fila global (contexto de thread).
///
/// O chamador já deve ter marcado `state = Sleeping` e definido `wake_at`.
pub fn enqueue_sleeper(task: Pin<Box<Task>>) {
    SLEEP_QUEUE.lock().insert(task);
}

/// Despachante de wakeups. Chamado pelo handler do timer a cada tick,
/// logo depois do incremento do contador.
///
/// Acorda todas as tarefas cujo `wake_at` chegou, exatamente uma vez cada,
/// em ordem de prazo (e FIFO entre prazos iguais). O trabalho por tick é
/// limitado ao número de tarefas vencidas; com a fila ordenada, a primeira
/// cabeça não-vencida encerra a varredura.
pub fn wake_expired() {
    let now = jiffies::ticks();

    loop {
        // try_lock: em disputa, desiste e deixa para o próximo tick.
        let woken = match SLEEP_QUEUE.try_lock() {
            Some(mut queue) => queue.pop_due(now),
            None => return,
        };
        // O guard foi solto aqui: a entrega ao scheduler acontece sem o
        // lock da fila de sleep em mãos.

        match woken {
            Some(mut task) => {
                task.wake_at = None;
                task.state = TaskState::Ready;
                crate::sched::core::enqueue(task);
            }
            None => return,
        }
    }
}
