//! Calibração do busy-wait (loops por tick).
//!
//! Para atrasos menores que um tick o kernel não pode usar a fila de
//! sleep: a resolução do timer não alcança. A alternativa é girar a CPU
//! um número conhecido de iterações. Este módulo mede, uma única vez no
//! boot, quantas iterações do laço trivial cabem em um tick.
//!
//! # Algoritmo
//! 1. Busca exponencial: a partir de 2^10, dobra o candidato enquanto o
//!    dobro ainda couber dentro de um único tick.
//! 2. Refinamento linear: liga os próximos 8 bits, do mais alto para o
//!    mais baixo, mantendo cada bit que ainda couber no tick. O valor só
//!    cresce durante o refinamento.
//!
//! "Caber em um tick" é medido esperando a borda de um tick e verificando
//! se o contador mudou durante a execução do laço candidato.
//!
//! O resultado fica imutável em `LOOPS_PER_TICK`. Overflow do candidato
//! durante a dobra é um assert fatal (com 64 bits, inalcançável na
//! prática: significaria hardware rápido além de qualquer realidade).

use core::sync::atomic::{AtomicU64, Ordering};

use super::jiffies::{self, HZ};
use crate::arch::{Cpu, CpuOps};

/// Loops por tick, medido por `calibrate`. Zero = ainda não calibrado.
static LOOPS_PER_TICK: AtomicU64 = AtomicU64::new(0);

/// Retorna a constante de calibração atual.
#[inline]
pub fn loops_per_tick() -> u64 {
    LOOPS_PER_TICK.load(Ordering::Relaxed)
}

/// Calibra o busy-wait. Chamar uma única vez no boot, depois que o PIT
/// está gerando ticks e com interrupções habilitadas (o algoritmo depende
/// de ver o contador avançar).
pub fn calibrate() {
    assert!(
        Cpu::are_interrupts_enabled(),
        "calibrate exige interrupções habilitadas"
    );

    crate::kinfo!("(Time) Calibrando busy-wait...");

    // Aproximação: maior potência de dois que ainda cabe num tick.
    let mut loops: u64 = 1 << 10;
    while !too_many_loops(loops << 1) {
        loops <<= 1;
        assert!(loops != 0, "overflow na calibração do busy-wait");
    }

    // Refinar os próximos 8 bits.
    let high_bit = loops;
    let mut test_bit = high_bit >> 1;
    while test_bit != high_bit >> 10 {
        if !too_many_loops(loops | test_bit) {
            loops |= test_bit;
        }
        test_bit >>= 1;
    }

    LOOPS_PER_TICK.store(loops, Ordering::Relaxed);

    crate::kinfo!("(Time) loops_per_tick=", loops);
    crate::kinfo!("(Time) loops/s=", loops * HZ as u64);
}

/// Verifica se `loops` iterações atravessam mais de um tick.
///
/// Espera a borda de um tick para começar a medir num tick "inteiro".
pub(crate) fn too_many_loops(loops: u64) -> bool {
    // Esperar a virada de um tick
    let start = jiffies::ticks();
    while jiffies::ticks() == start {
        Cpu::relax();
    }

    // Rodar o laço candidato dentro do tick recém-iniciado
    let start = jiffies::ticks();
    busy_wait(loops as i64);

    // Se o contador mudou, iteramos demais
    start != jiffies::ticks()
}

/// Gira `loops` iterações de um laço trivial.
///
/// `#[inline(never)]`: o alinhamento do código afeta o timing de forma
/// significativa; inlining em pontos diferentes tornaria a calibração
/// imprevisível. A barreira impede o compilador de eliminar o laço vazio.
#[inline(never)]
pub fn busy_wait(mut loops: i64) {
    while loops > 0 {
        // Barreira de compilador: o laço precisa existir de verdade
        unsafe {
            core::arch::asm!("", options(nomem, nostack, preserves_flags));
        }
        loops -= 1;
    }
}
