//! Context switch
//!
//! Gerencia a troca de contexto entre tasks.
//!
//! # Convenção de stack
//! O assembly de troca salva RSP ainda apontando para o slot do endereço
//! de retorno e restaura com `mov [rsp], rax; ret`, que consome o slot.
//! Por isso `setup` deixa RSP em `stack_top - 8`: tanto a primeira entrada
//! (via `jump_to_context`) quanto as retomadas normais terminam com RSP no
//! topo correto.

/// Contexto de CPU (registradores salvos)
///
/// Apenas os callee-saved do System V ABI: o resto é preservado pela
/// própria convenção de chamada no caminho cooperativo de troca.
#[repr(C)]
pub struct CpuContext {
    // Callee-saved registers (SysV ABI)
    pub rbx: u64,
    pub rbp: u64,
    pub r12: u64,
    pub r13: u64,
    pub r14: u64,
    pub r15: u64,

    // Stack pointer
    pub rsp: u64,

    // Instruction pointer (endereço de retomada)
    pub rip: u64,
}

impl CpuContext {
    /// Cria CpuContext zerado
    pub const fn new() -> Self {
        Self {
            rbx: 0,
            rbp: 0,
            r12: 0,
            r13: 0,
            r14: 0,
            r15: 0,
            rsp: 0,
            rip: 0,
        }
    }

    /// Configura o contexto para a primeira entrada de uma tarefa.
    ///
    /// A execução começa no trampolim assembly, que habilita interrupções
    /// e chama a função da tarefa guardada em R12.
    pub fn setup(&mut self, entry: u64, stack_top: u64) {
        self.rip = task_entry_trampoline as usize as u64;
        self.r12 = entry;
        self.rsp = stack_top - 8; // slot consumido pelo restore (ver nota do módulo)
        self.rbp = 0;
    }
}

/// Realiza context switch entre duas tasks.
///
/// Retorna quando a tarefa "old" for re-escalonada no futuro.
///
/// # Safety
///
/// - Interrupções devem estar desabilitadas
/// - old e new devem ser ponteiros válidos para contextos vivos
pub unsafe fn switch(old: &mut CpuContext, new: &CpuContext) {
    context_switch_asm(
        old as *mut CpuContext as u64,
        new as *const CpuContext as u64,
    );
}

/// Salta para um contexto sem salvar o atual.
///
/// Usado quando o contexto corrente nunca mais será retomado (boot
/// entrando no idle, tarefa terminando).
///
/// # Safety
///
/// - Interrupções devem estar desabilitadas
/// - ctx deve ser um ponteiro válido (fresco de `setup` ou salvo por `switch`)
pub unsafe fn jump_to_context(ctx: &CpuContext) -> ! {
    jump_to_context_asm(ctx as *const CpuContext as u64);
}

// Assembly de troca de contexto.
// RDI = old (mut ptr), RSI = new (ptr)
// Offsets (CpuContext):
// 0:rbx, 8:rbp, 16:r12, 24:r13, 32:r14, 40:r15, 48:rsp, 56:rip
//
// task_entry_trampoline: primeira entrada de toda tarefa. R12 carrega o
// ponteiro da função; se ela retornar, a tarefa é encerrada.
core::arch::global_asm!(
    r#"
.global context_switch_asm
context_switch_asm:
    // Salvar registradores callee-saved
    mov [rdi + 0x00], rbx
    mov [rdi + 0x08], rbp
    mov [rdi + 0x10], r12
    mov [rdi + 0x18], r13
    mov [rdi + 0x20], r14
    mov [rdi + 0x28], r15

    // Salvar stack pointer (ainda apontando para o endereço de retorno)
    mov [rdi + 0x30], rsp

    // Salvar instruction pointer (endereço de retorno)
    mov rax, [rsp]
    mov [rdi + 0x38], rax

    // --- Ponto de troca ---

    // Carregar novo contexto
    mov rbx, [rsi + 0x00]
    mov rbp, [rsi + 0x08]
    mov r12, [rsi + 0x10]
    mov r13, [rsi + 0x18]
    mov r14, [rsi + 0x20]
    mov r15, [rsi + 0x28]

    // Trocar stack
    mov rsp, [rsi + 0x30]

    // Sobrescrever o slot de retorno e consumir com ret
    mov rax, [rsi + 0x38]
    mov [rsp], rax
    ret

.global jump_to_context_asm
jump_to_context_asm:
    // RDI = ptr para CpuContext
    mov rbx, [rdi + 0x00]
    mov rbp, [rdi + 0x08]
    mov r12, [rdi + 0x10]
    mov r13, [rdi + 0x18]
    mov r14, [rdi + 0x20]
    mov r15, [rdi + 0x28]

    // Trocar stack
    mov rsp, [rdi + 0x30]

    // Consumir o slot de retorno que o 'ret' do caminho normal consumiria
    add rsp, 8

    // Saltar direto para o RIP salvo
    mov rax, [rdi + 0x38]
    jmp rax

.global task_entry_trampoline
task_entry_trampoline:
    // Garantir alinhamento System V antes de chamar código Rust
    and rsp, -16

    // Tarefas começam com interrupções habilitadas
    sti

    // Entrar na função da tarefa (ponteiro preparado por setup em R12)
    call r12

    // A função retornou: encerrar a tarefa (não retorna)
    call {task_exit}
"#,
    task_exit = sym task_exit_impl,
);

extern "C" {
    fn context_switch_asm(old: u64, new: u64);
    fn jump_to_context_asm(ctx: u64) -> !;
    pub fn task_entry_trampoline();
}

/// Destino final de toda tarefa cuja função de entrada retornou.
extern "C" fn task_exit_impl() -> ! {
    crate::sched::core::exit_current()
}
