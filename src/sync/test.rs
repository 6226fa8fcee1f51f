//! Testes das primitivas de sincronização

use crate::arch::{Cpu, CpuOps};
use crate::klib::test_framework::{run_test_suite, TestCase, TestResult};
use crate::sync::{Mutex, Spinlock};

/// Casos de teste de sync
const SYNC_TESTS: &[TestCase] = &[
    TestCase::new("spinlock_mutual_exclusion", test_spinlock_mutual_exclusion),
    TestCase::new("spinlock_restores_interrupts", test_spinlock_restores_interrupts),
    TestCase::new("mutex_try_lock", test_mutex_try_lock),
];

/// Executa todos os testes de sync
pub fn run_sync_tests() {
    run_test_suite("Sync", SYNC_TESTS);
}

/// try_lock falha enquanto o lock está em posse de alguém
fn test_spinlock_mutual_exclusion() -> TestResult {
    static LOCK: Spinlock<u32> = Spinlock::new(0);

    {
        let mut guard = LOCK.lock();
        *guard += 1;

        if LOCK.try_lock().is_some() {
            return TestResult::Fail;
        }
    }

    // Solto: try_lock volta a funcionar
    match LOCK.try_lock() {
        Some(guard) if *guard == 1 => TestResult::Pass,
        _ => TestResult::Fail,
    }
}

/// O guard desabilita interrupções e restaura o estado anterior no drop
fn test_spinlock_restores_interrupts() -> TestResult {
    static LOCK: Spinlock<()> = Spinlock::new(());

    let before = Cpu::are_interrupts_enabled();

    {
        let _guard = LOCK.lock();
        if Cpu::are_interrupts_enabled() {
            return TestResult::Fail;
        }
    }

    if Cpu::are_interrupts_enabled() != before {
        return TestResult::Fail;
    }

    TestResult::Pass
}

/// Mutex: exclusão simples sem mexer em interrupções
fn test_mutex_try_lock() -> TestResult {
    static LOCK: Mutex<u32> = Mutex::new(7);

    {
        let guard = LOCK.lock();
        if *guard != 7 {
            return TestResult::Fail;
        }
        if LOCK.try_lock().is_some() {
            return TestResult::Fail;
        }
    }

    if LOCK.try_lock().is_none() {
        return TestResult::Fail;
    }

    TestResult::Pass
}
