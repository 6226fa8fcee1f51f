//! Jiffies (Contador de ticks do sistema).
//!
//! "Jiffies" é o termo histórico (do Linux) para ticks de relógio.
//! É a unidade de tempo relativo do kernel: um tick por interrupção do PIT.
//!
//! - Usa AtomicI64 para ser lock-free: a leitura é um snapshot consistente
//!   em relação ao incremento feito pelo handler (num núcleo único, o load
//!   atômico dá a mesma garantia que desabilitar interrupções daria).
//! - Incrementado APENAS pelo timer interrupt handler.
//! - Nunca decrementa, nunca é zerado depois do boot.

use core::sync::atomic::{AtomicI64, Ordering};

/// Tick do sistema: contagem assinada de 64 bits.
/// Assinada para que aritmética de durações (`agora - referência`,
/// durações negativas pedidas pelo chamador) seja bem definida.
pub type Tick = i64;

/// Ticks desde o boot.
static JIFFIES: AtomicI64 = AtomicI64::new(0);

/// Frequência do Tick (Ticks por segundo)
pub const HZ: Tick = 100;

// O PIT divide 1.193182 MHz por um divisor de 16 bits: abaixo de 19 Hz o
// divisor não cabe, acima de 1000 Hz o overhead de interrupção domina.
const _: () = assert!(HZ >= 19, "PIT exige HZ >= 19");
const _: () = assert!(HZ <= 1000, "HZ <= 1000 recomendado");

/// Retorna o número atual de jiffies.
#[inline]
pub fn ticks() -> Tick {
    JIFFIES.load(Ordering::Relaxed)
}

/// Incrementa o contador de jiffies.
/// Deve ser chamado APENAS pelo handler de interrupção do timer.
#[inline]
pub(crate) fn inc() {
    JIFFIES.fetch_add(1, Ordering::Relaxed);
}

/// Converte segundos para ticks.
#[inline]
pub const fn seconds_to_ticks(seconds: i64) -> Tick {
    seconds * HZ
}

/// Converte milisegundos para ticks (truncando).
#[inline]
pub const fn millis_to_ticks(millis: i64) -> Tick {
    (millis * HZ) / 1000
}
