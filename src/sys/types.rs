//! Tipos fundamentais do sistema

/// Thread ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Tid(pub u32);

impl Tid {
    /// TID reservado da idle task
    pub const IDLE: Tid = Tid(0);

    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn as_u32(self) -> u32 {
        self.0
    }
}
