//! Fachada pública do subsistema de tempo.
//!
//! Concentra as operações que o resto do kernel usa:
//! - `timer_ticks` / `timer_elapsed`: leitura do relógio monotônico.
//! - `sleep_for_ticks` e variantes em ms/us/ns: suspendem a tarefa
//!   corrente entregando a CPU (via fila de sleep).
//! - `delay_*`: busy-wait calibrado, para atrasos sub-tick ou para
//!   contextos onde dormir é impossível.
//!
//! # Escolha entre sleep e delay
//! Os wrappers de sleep convertem a duração para ticks (truncando); se o
//! resultado for >= 1 tick, a tarefa dorme de verdade. Abaixo disso cai no
//! busy-wait, que convive com a preempção em vez de substituí-la; por
//! isso o caminho de sleep exige interrupções habilitadas (assert fatal).
//! Já os `delay_*` giram incondicionalmente: funcionam com interrupções
//! desabilitadas, mas girar um tick ou mais nesse estado perde ticks;
//! prefira os sleeps sempre que interrupções estiverem ligadas.

use super::calibrate::{self, loops_per_tick};
use super::jiffies::{self, Tick, HZ};
use crate::arch::{Cpu, CpuOps};

/// Retorna o número de ticks desde o boot.
#[inline]
pub fn timer_ticks() -> Tick {
    jiffies::ticks()
}

/// Retorna quantos ticks se passaram desde `since`, que deve ser um valor
/// retornado anteriormente por `timer_ticks`. Nunca negativo nesse caso.
#[inline]
pub fn timer_elapsed(since: Tick) -> Tick {
    jiffies::ticks() - since
}

/// Dorme por aproximadamente `ticks` ticks do timer.
///
/// - `ticks <= 0`: retorna imediatamente, sem suspender (no-op definido).
/// - Interrupções precisam estar habilitadas (assert fatal): é o handler
///   do timer quem vai nos acordar.
///
/// A tarefa corrente sai de execução, entra ordenada na fila de sleep e
/// só volta a rodar quando o despachante de wakeups a devolver à
/// RunQueue, nunca antes do prazo.
pub fn sleep_for_ticks(ticks: Tick) {
    if ticks <= 0 {
        return;
    }

    assert!(
        Cpu::are_interrupts_enabled(),
        "sleep_for_ticks exige interrupções habilitadas"
    );

    let wake_at = jiffies::ticks() + ticks;
    crate::sched::core::sleep_until(wake_at);
}

/// Dorme por aproximadamente `ms` milissegundos.
pub fn sleep_millis(ms: i64) {
    real_time_sleep(ms, 1_000);
}

/// Dorme por aproximadamente `us` microssegundos.
pub fn sleep_micros(us: i64) {
    real_time_sleep(us, 1_000_000);
}

/// Dorme por aproximadamente `ns` nanossegundos.
pub fn sleep_nanos(ns: i64) {
    real_time_sleep(ns, 1_000_000_000);
}

/// Busy-wait de aproximadamente `ms` milissegundos.
/// Não exige interrupções habilitadas (mas veja a nota do módulo).
pub fn delay_millis(ms: i64) {
    real_time_delay(ms, 1_000);
}

/// Busy-wait de aproximadamente `us` microssegundos.
pub fn delay_micros(us: i64) {
    real_time_delay(us, 1_000_000);
}

/// Busy-wait de aproximadamente `ns` nanossegundos.
pub fn delay_nanos(ns: i64) {
    real_time_delay(ns, 1_000_000_000);
}

/// Dorme por aproximadamente num/denom segundos.
fn real_time_sleep(num: i64, denom: i64) {
    // Converter num/denom segundos em ticks, truncando:
    //
    //   (num / denom) s
    //   ---------------- = num * HZ / denom ticks
    //   1 s / HZ ticks
    let ticks = num * HZ / denom;

    assert!(
        Cpu::are_interrupts_enabled(),
        "sleep exige interrupções habilitadas"
    );

    if ticks > 0 {
        // Pelo menos um tick inteiro: dormir de verdade cede a CPU.
        sleep_for_ticks(ticks);
    } else {
        // Fração de tick: busy-wait dá a precisão que a fila não tem.
        real_time_delay(num, denom);
    }
}

/// Busy-wait de aproximadamente num/denom segundos.
fn real_time_delay(num: i64, denom: i64) {
    // Reduzir numerador e denominador por 1000 para afastar o overflow
    // do produto loops_per_tick * num.
    assert!(denom % 1000 == 0, "denominador deve ser múltiplo de 1000");
    calibrate::busy_wait(loops_per_tick() as i64 * num / 1000 * HZ / (denom / 1000));
}

/// Loga estatísticas do timer (contagem de ticks e uptime).
pub fn print_stats() {
    crate::kinfo!("(Time) ticks=", timer_ticks() as u64);
    crate::kinfo!(
        "(Time) uptime_s=",
        crate::drivers::timer::uptime_seconds() as u64
    );
}
