//! Pulse Kernel - Binário Principal.
//!
//! Responsabilidade:
//! 1. Configurar a Stack inicial.
//! 2. Saltar para `core::entry::kernel_main` (da biblioteca `pulse`).
//!
//! O loader que carrega este binário já deixa a CPU em modo longo com
//! a seção BSS zerada; aqui só trocamos para a stack do kernel e
//! entramos no Rust de alto nível.

#![no_std]
#![no_main]

use pulse::core as kernel_core;

// Stack do kernel (64 KB)
const BOOT_STACK_SIZE: usize = 64 * 1024;

#[repr(align(16))]
struct BootStack([u8; BOOT_STACK_SIZE]);

static mut BOOT_STACK: BootStack = BootStack([0; BOOT_STACK_SIZE]);

// Ponto de entrada.
// Configura o Stack Pointer (RSP), zera o frame pointer e chama kernel_main.
// Se kernel_main retornar (não deve acontecer), trava a CPU num halt loop.
core::arch::global_asm!(
    r#"
.global _start
_start:
    lea rax, [rip + {stack}]
    lea rsp, [rax + {stack_size}]
    xor rbp, rbp
    and rsp, -16
    call {kernel_main}
2:
    cli
    hlt
    jmp 2b
"#,
    stack = sym BOOT_STACK,
    stack_size = const BOOT_STACK_SIZE,
    kernel_main = sym kernel_core::entry::kernel_main,
);
