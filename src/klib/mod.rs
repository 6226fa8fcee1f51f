//! Utilitários Internos do Kernel (klib)

pub mod test_framework;
