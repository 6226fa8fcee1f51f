//! # Kernel Heap Allocator
//!
//! Fornece alocação dinâmica (`Box`, `VecDeque`) para o kernel através do
//! `linked_list_allocator`, registrado como `#[global_allocator]`.
//!
//! A memória vem de uma arena estática dentro do próprio binário: num
//! kernel de núcleo único sem paginação própria isso evita depender do
//! mapa de memória do loader.
//!
//! Falha de alocação é fatal: o kernel não tem estratégia de recuperação
//! para exaustão do heap, e descartar silenciosamente (por exemplo) um
//! pedido de sleep corromperia o contrato de wakeup do chamador.

use linked_list_allocator::LockedHeap;

/// Tamanho da arena do heap (1 MiB)
pub const HEAP_SIZE: usize = 1024 * 1024;

/// Arena estática que alimenta o alocador.
static mut HEAP_ARENA: [u8; HEAP_SIZE] = [0; HEAP_SIZE];

#[global_allocator]
static ALLOCATOR: LockedHeap = LockedHeap::empty();

/// Inicializa o heap do kernel.
///
/// Deve ser chamado uma única vez, antes de qualquer alocação
/// (e portanto antes do scheduler e das filas de tempo existirem).
pub fn init() {
    unsafe {
        ALLOCATOR
            .lock()
            .init(core::ptr::addr_of_mut!(HEAP_ARENA) as *mut u8, HEAP_SIZE);
    }

    crate::kinfo!("(Heap) Arena inicializada, bytes=", HEAP_SIZE as u64);
}

/// Endereço inicial da arena (para diagnósticos).
pub fn heap_start() -> usize {
    core::ptr::addr_of!(HEAP_ARENA) as usize
}
