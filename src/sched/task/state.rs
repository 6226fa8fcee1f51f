//! Estados de task

/// Estado de uma task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Recém criada, não executou ainda
    Created,
    /// Pronta para executar (na RunQueue)
    Ready,
    /// Executando (no slot CURRENT)
    Running,
    /// Dormindo até um tick absoluto (na fila de sleep)
    Sleeping,
    /// Terminada, esperando cleanup
    Zombie,
}

impl TaskState {
    /// Verifica se pode ser escalonada
    pub const fn is_runnable(self) -> bool {
        matches!(self, Self::Ready | Self::Running)
    }
}
