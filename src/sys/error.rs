//! # Standard Error Codes (Errno)
//!
//! Códigos de erro do kernel, seguindo a numeração POSIX/Linux para
//! facilitar entendimento e portabilidade futura.

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Errno {
    Success = 0,
    EPERM = 1,   // Operation not permitted
    EAGAIN = 11, // Try again
    ENOMEM = 12, // Out of memory
    EBUSY = 16,  // Device or resource busy
    EINVAL = 22, // Invalid argument
    ENOSYS = 38, // Function not implemented
}

impl Errno {
    /// Valor negativo para retorno em registrador (convenção de syscall).
    pub const fn as_isize(self) -> isize {
        -(self as i32 as isize)
    }
}
