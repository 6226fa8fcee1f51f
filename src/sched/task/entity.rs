//! Thread Control Block

use super::accounting::Accounting;
use super::context::CpuContext;
use super::state::TaskState;
use crate::core::time::jiffies::Tick;
use crate::sys::Tid;
use alloc::boxed::Box;
use core::sync::atomic::{AtomicU32, Ordering};

/// Task ID counter (0 é reservado para a idle)
static NEXT_TID: AtomicU32 = AtomicU32::new(1);

/// Thread Control Block
pub struct Task {
    /// ID único
    pub tid: Tid,
    /// Estado atual
    pub state: TaskState,
    /// Contexto de CPU salvo
    pub context: CpuContext,
    /// Stack de kernel (posse da própria task)
    pub stack: Option<Box<[u8]>>,
    /// Prioridade (255 = maior)
    pub priority: u8,
    /// Estatísticas de contabilidade
    pub accounting: Accounting,
    /// Nome (debug)
    pub name: [u8; 32],
    /// Tick absoluto de despertar, se estiver dormindo.
    /// Fixado na entrada da fila de sleep, limpo no wakeup.
    pub wake_at: Option<Tick>,
}

impl Task {
    /// Cria nova task (sem stack; `lifecycle::spawn` completa o resto)
    pub fn new(name: &str) -> Self {
        let tid = Tid::new(NEXT_TID.fetch_add(1, Ordering::Relaxed));

        // Preparar buffer de nome
        let mut name_buf = [0u8; 32];
        let bytes = name.as_bytes();
        let len = bytes.len().min(31);
        name_buf[..len].copy_from_slice(&bytes[..len]);

        Self {
            tid,
            state: TaskState::Created,
            context: CpuContext::new(),
            stack: None,
            priority: crate::sched::config::PRIORITY_DEFAULT,
            accounting: Accounting::new(),
            name: name_buf,
            wake_at: None,
        }
    }
}
