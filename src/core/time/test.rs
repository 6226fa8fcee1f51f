//! Testes do subsistema de tempo
//!
//! Duas famílias:
//! - Suites puras (`run_time_tests`, `run_calibration_tests`): rodam no
//!   boot, antes do scheduler despachar tarefas.
//! - Suite de sleep (`run_sleep_tests`): roda dentro da tarefa init, com o
//!   timer batendo e o scheduler vivo, exercitando o caminho completo
//!   sleep -> fila -> wakeup -> RunQueue.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::pin::Pin;

use super::calibrate;
use super::jiffies::{self, Tick, HZ};
use super::sleep::SleepQueue;
use super::timer;
use crate::klib::test_framework::{run_test_suite, TestCase, TestResult};
use crate::sched::task::{lifecycle, Task, TaskState};
use crate::sync::Spinlock;

/// Testes que não dependem do scheduler
const TIME_TESTS: &[TestCase] = &[
    TestCase::new("tick_conversions", test_tick_conversions),
    TestCase::new("elapsed_non_negative", test_elapsed_non_negative),
    TestCase::new("queue_sorted_insert", test_queue_sorted_insert),
    TestCase::new("queue_fifo_ties", test_queue_fifo_ties),
    TestCase::new("queue_wakes_only_due", test_queue_wakes_only_due),
    TestCase::new("queue_drain_ordered", test_queue_drain_ordered),
    TestCase::new("pit_divisor_range", test_pit_divisor_range),
];

/// Testes da constante de calibração (rodar DEPOIS de `calibrate`)
const CALIBRATION_TESTS: &[TestCase] = &[
    TestCase::new("loops_per_tick_nonzero", test_loops_per_tick_nonzero),
    TestCase::new("busy_wait_fits_one_tick", test_busy_wait_fits_one_tick),
];

pub fn run_time_tests() {
    run_test_suite("Time", TIME_TESTS);
}

pub fn run_calibration_tests() {
    run_test_suite("Calibracao", CALIBRATION_TESTS);
}

/// Cria uma tarefa dormente avulsa para exercitar a fila.
fn sleeper(name: &str, wake_at: Tick) -> Pin<Box<Task>> {
    let mut task = Box::pin(Task::new(name));
    task.state = TaskState::Sleeping;
    task.wake_at = Some(wake_at);
    task
}

fn test_tick_conversions() -> TestResult {
    if jiffies::millis_to_ticks(1000) != HZ {
        return TestResult::Fail;
    }

    // 10ms a 100Hz é exatamente 1 tick; 9ms trunca para 0
    if jiffies::millis_to_ticks(10) != 1 || jiffies::millis_to_ticks(9) != 0 {
        return TestResult::Fail;
    }

    if jiffies::seconds_to_ticks(2) != 2 * HZ {
        return TestResult::Fail;
    }

    TestResult::Pass
}

fn test_elapsed_non_negative() -> TestResult {
    let elapsed = timer::timer_elapsed(timer::timer_ticks());
    if elapsed < 0 {
        crate::kerror!("(Time) elapsed negativo=", elapsed as u64);
        return TestResult::Fail;
    }
    TestResult::Pass
}

fn test_queue_sorted_insert() -> TestResult {
    let mut queue = SleepQueue::new();

    for wake_at in [50, 10, 30, 20, 40, 10, 60] {
        queue.insert(sleeper("t", wake_at));
    }

    if queue.len() != 7 || !queue.is_sorted() {
        return TestResult::Fail;
    }

    TestResult::Pass
}

fn test_queue_fifo_ties() -> TestResult {
    let mut queue = SleepQueue::new();

    let first = sleeper("a", 10);
    let second = sleeper("b", 10);
    let early = sleeper("c", 5);

    let first_tid = first.tid;
    let second_tid = second.tid;
    let early_tid = early.tid;

    // Empate em 10: "a" chegou antes de "b"; "c" vence antes de ambos
    queue.insert(first);
    queue.insert(second);
    queue.insert(early);

    let order = [
        queue.pop_due(10).map(|t| t.tid),
        queue.pop_due(10).map(|t| t.tid),
        queue.pop_due(10).map(|t| t.tid),
    ];

    if order != [Some(early_tid), Some(first_tid), Some(second_tid)] {
        return TestResult::Fail;
    }

    TestResult::Pass
}

fn test_queue_wakes_only_due() -> TestResult {
    let mut queue = SleepQueue::new();
    queue.insert(sleeper("soon", 10));
    queue.insert(sleeper("later", 20));

    // Em now=15 apenas a primeira venceu
    if queue.pop_due(15).is_none() {
        return TestResult::Fail;
    }
    if queue.pop_due(15).is_some() {
        return TestResult::Fail;
    }
    if queue.len() != 1 {
        return TestResult::Fail;
    }

    TestResult::Pass
}

fn test_queue_drain_ordered() -> TestResult {
    let mut queue = SleepQueue::new();

    // Gerador congruente simples para prazos pseudo-aleatórios
    let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
    for _ in 0..100 {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let wake_at = (seed >> 33) as Tick % 1000;
        queue.insert(sleeper("r", wake_at));
    }

    if !queue.is_sorted() {
        return TestResult::Fail;
    }

    // Depois que todos os prazos passaram, a fila esvazia em ordem
    let mut drained = 0;
    let mut previous = Tick::MIN;
    while let Some(task) = queue.pop_due(1000) {
        let wake = task.wake_at.unwrap_or(Tick::MIN);
        if wake < previous {
            return TestResult::Fail;
        }
        previous = wake;
        drained += 1;
    }

    if drained != 100 || !queue.is_empty() {
        return TestResult::Fail;
    }

    TestResult::Pass
}

fn test_pit_divisor_range() -> TestResult {
    use crate::drivers::timer::pit::Pit;

    // A frequência do sistema precisa caber no divisor de 16 bits
    match Pit::divisor_for(HZ as u32) {
        Ok(divisor) if divisor > 0 => {}
        _ => return TestResult::Fail,
    }

    // Fora da faixa suportada: rejeitado
    if Pit::divisor_for(0).is_ok() || Pit::divisor_for(10).is_ok() {
        return TestResult::Fail;
    }
    if Pit::divisor_for(2_000_000).is_ok() {
        return TestResult::Fail;
    }

    TestResult::Pass
}

fn test_loops_per_tick_nonzero() -> TestResult {
    if calibrate::loops_per_tick() == 0 {
        return TestResult::Fail;
    }
    TestResult::Pass
}

fn test_busy_wait_fits_one_tick() -> TestResult {
    let loops = calibrate::loops_per_tick();
    if loops == 0 {
        return TestResult::Skip;
    }

    // O contrato da calibração: girar loops_per_tick consome menos que um
    // tick inteiro de tempo de parede.
    if calibrate::too_many_loops(loops) {
        return TestResult::Fail;
    }

    TestResult::Pass
}

// ============================================================================
// Suite de sleep (precisa do scheduler vivo; roda na tarefa init)
// ============================================================================

const SLEEP_TESTS: &[TestCase] = &[
    TestCase::new("sleep_zero_is_noop", test_sleep_zero_is_noop),
    TestCase::new("sleep_waits_full_duration", test_sleep_waits_full_duration),
    TestCase::new("sleep_millis_one_tick", test_sleep_millis_one_tick),
    TestCase::new("subtick_falls_back_to_busy", test_subtick_falls_back_to_busy),
    TestCase::new("equal_deadlines_wake_fifo", test_equal_deadlines_wake_fifo),
];

pub fn run_sleep_tests() {
    run_test_suite("Sleep", SLEEP_TESTS);
}

/// Ordem em que as sondas de wakeup acordaram.
static WAKE_ORDER: Spinlock<Vec<u32>> = Spinlock::new(Vec::new());

/// Sonda: dorme um prazo fixo e registra o próprio TID ao acordar.
extern "C" fn wake_probe_entry() {
    let tid = crate::sched::core::current_tid();

    timer::sleep_for_ticks(10);

    if let Some(tid) = tid {
        WAKE_ORDER.lock().push(tid.as_u32());
    }
}

fn test_sleep_zero_is_noop() -> TestResult {
    let start = timer::timer_ticks();

    // Duração zero ou negativa: retorno imediato, sem suspensão
    timer::sleep_for_ticks(0);
    timer::sleep_for_ticks(-7);

    if timer::timer_elapsed(start) > 1 {
        return TestResult::Fail;
    }
    TestResult::Pass
}

fn test_sleep_waits_full_duration() -> TestResult {
    let start = timer::timer_ticks();
    timer::sleep_for_ticks(5);
    let elapsed = timer::timer_elapsed(start);

    // Nunca acorda cedo; a folga cobre o jitter de escalonamento
    if elapsed < 5 {
        crate::kerror!("(Time) acordou cedo, elapsed=", elapsed as u64);
        return TestResult::Fail;
    }
    if elapsed > 15 {
        crate::kerror!("(Time) acordou tarde demais, elapsed=", elapsed as u64);
        return TestResult::Fail;
    }

    TestResult::Pass
}

fn test_sleep_millis_one_tick() -> TestResult {
    let start = timer::timer_ticks();
    // 10ms a 100Hz = exatamente 1 tick: passa pela fila de sleep
    timer::sleep_millis(10);

    if timer::timer_elapsed(start) < 1 {
        return TestResult::Fail;
    }
    TestResult::Pass
}

fn test_subtick_falls_back_to_busy() -> TestResult {
    let start = timer::timer_ticks();
    // 100us << 1 tick: cai no busy-wait calibrado, não suspende
    timer::sleep_micros(100);

    if timer::timer_elapsed(start) > 1 {
        return TestResult::Fail;
    }
    TestResult::Pass
}

fn test_equal_deadlines_wake_fifo() -> TestResult {
    WAKE_ORDER.lock().clear();

    // Mesmo prazo, pedidos na ordem A depois B
    let first = lifecycle::spawn("wake-a", wake_probe_entry);
    let second = lifecycle::spawn("wake-b", wake_probe_entry);

    // Dormir o bastante para as duas sondas completarem o ciclo
    timer::sleep_for_ticks(30);

    let order = WAKE_ORDER.lock();
    if order.len() != 2 {
        crate::kerror!("(Time) sondas registradas=", order.len() as u64);
        return TestResult::Fail;
    }

    if order[0] != first.as_u32() || order[1] != second.as_u32() {
        return TestResult::Fail;
    }

    TestResult::Pass
}
