//! Stubs de Interrupção em Assembly.
//!
//! Cada stub salva todos os registradores de propósito geral, alinha a
//! stack conforme o System V ABI, chama o handler Rust correspondente e
//! retorna com `iretq`. Exceções sem código de erro empilham um código
//! falso para manter o layout da stack uniforme.

use crate::arch::traits::CpuOps;

/// Registradores salvos pelo stub + frame empilhado pela CPU.
///
/// O layout espelha exatamente a ordem de push em `isr_save_regs`.
#[repr(C)]
pub struct ContextFrame {
    pub rax: u64,
    pub rbx: u64,
    pub rcx: u64,
    pub rdx: u64,
    pub rsi: u64,
    pub rdi: u64,
    pub r8: u64,
    pub r9: u64,
    pub r10: u64,
    pub r11: u64,
    pub r12: u64,
    pub r13: u64,
    pub r14: u64,
    pub r15: u64,
    pub rbp: u64,
    pub error_code: u64,
    pub rip: u64,
    pub cs: u64,
    pub rflags: u64,
    pub rsp: u64,
    pub ss: u64,
}

// --- Handlers Rust ---

extern "C" fn breakpoint_handler_impl(frame: &ContextFrame) {
    crate::kinfo!("EXCEPTION: BREAKPOINT rip=", frame.rip);
}

extern "C" fn double_fault_handler_impl(frame: &ContextFrame) {
    crate::kerror!("EXCEPTION: DOUBLE FAULT rip=", frame.rip);
    crate::arch::Cpu::hang();
}

extern "C" fn general_protection_handler_impl(frame: &ContextFrame) {
    crate::kerror!("EXCEPTION: GPF rip=", frame.rip);
    crate::kerror!("Error Code=", frame.error_code);
    crate::arch::Cpu::hang();
}

extern "C" fn page_fault_handler_impl(frame: &ContextFrame) {
    let cr2: u64;
    // Ler endereço que causou a falha (CR2)
    unsafe {
        core::arch::asm!("mov {}, cr2", out(reg) cr2, options(nomem, nostack, preserves_flags));
    }
    crate::kerror!("EXCEPTION: PAGE FAULT rip=", frame.rip);
    crate::kerror!("Acessando=", cr2);
    crate::arch::Cpu::hang();
}

extern "C" fn timer_handler_impl() {
    // Chama o driver do timer para processar ticks, contabilidade e wakeups
    crate::drivers::timer::handle_timer_interrupt();
}

// --- Stubs Assembly ---
//
// Ordem de push: rbp, r15..r8, rdi, rsi, rdx, rcx, rbx, rax.
// O `sub rsp, 8` antes do call compensa a paridade da stack: a CPU deixa
// RSP ≡ 8 (mod 16) após empilhar o frame + código de erro + 15 registradores,
// e o System V ABI exige RSP ≡ 8 (mod 16) na entrada da função chamada.
core::arch::global_asm!(
    r#"
.macro isr_save_regs
    push rbp
    push r15
    push r14
    push r13
    push r12
    push r11
    push r10
    push r9
    push r8
    push rdi
    push rsi
    push rdx
    push rcx
    push rbx
    push rax
.endm

.macro isr_restore_regs
    pop rax
    pop rbx
    pop rcx
    pop rdx
    pop rsi
    pop rdi
    pop r8
    pop r9
    pop r10
    pop r11
    pop r12
    pop r13
    pop r14
    pop r15
    pop rbp
.endm

.global isr_breakpoint
isr_breakpoint:
    push 0
    isr_save_regs
    mov rdi, rsp
    sub rsp, 8
    call {breakpoint}
    add rsp, 8
    isr_restore_regs
    add rsp, 8
    iretq

.global isr_double_fault
isr_double_fault:
    isr_save_regs
    mov rdi, rsp
    sub rsp, 8
    call {double_fault}
    add rsp, 8
    isr_restore_regs
    add rsp, 8
    iretq

.global isr_general_protection
isr_general_protection:
    isr_save_regs
    mov rdi, rsp
    sub rsp, 8
    call {general_protection}
    add rsp, 8
    isr_restore_regs
    add rsp, 8
    iretq

.global isr_page_fault
isr_page_fault:
    isr_save_regs
    mov rdi, rsp
    sub rsp, 8
    call {page_fault}
    add rsp, 8
    isr_restore_regs
    add rsp, 8
    iretq

.global isr_timer
isr_timer:
    push 0
    isr_save_regs
    sub rsp, 8
    call {timer}
    add rsp, 8
    isr_restore_regs
    add rsp, 8
    iretq
"#,
    breakpoint = sym breakpoint_handler_impl,
    double_fault = sym double_fault_handler_impl,
    general_protection = sym general_protection_handler_impl,
    page_fault = sym page_fault_handler_impl,
    timer = sym timer_handler_impl,
);

extern "C" {
    pub fn isr_breakpoint();
    pub fn isr_double_fault();
    pub fn isr_general_protection();
    pub fn isr_page_fault();
    pub fn isr_timer();
}
