//! Testes do Scheduler

use crate::klib::test_framework::{run_test_suite, TestCase, TestResult};
use crate::sched::config::KERNEL_STACK_SIZE;
use crate::sched::core::runqueue::RunQueue;
use crate::sched::task::{Task, TaskState};
use alloc::boxed::Box;

/// Casos de teste do Scheduler
const SCHED_TESTS: &[TestCase] = &[
    TestCase::new("task_initial_state", test_task_initial_state),
    TestCase::new("tid_monotonic", test_tid_monotonic),
    TestCase::new("runqueue_fifo", test_runqueue_fifo),
    TestCase::new("context_setup", test_context_setup),
    TestCase::new("stack_size_page_aligned", test_stack_size_page_aligned),
];

/// Executa todos os testes de scheduler
pub fn run_sched_tests() {
    run_test_suite("Scheduler", SCHED_TESTS);
}

/// Tarefa recém-criada nasce Created, sem prazo de despertar
fn test_task_initial_state() -> TestResult {
    let task = Task::new("probe");

    if task.state != TaskState::Created || task.wake_at.is_some() {
        return TestResult::Fail;
    }
    if !TaskState::Ready.is_runnable() || TaskState::Sleeping.is_runnable() {
        return TestResult::Fail;
    }

    TestResult::Pass
}

/// TIDs crescem e nunca repetem
fn test_tid_monotonic() -> TestResult {
    let first = Task::new("a");
    let second = Task::new("b");

    if second.tid.as_u32() <= first.tid.as_u32() {
        return TestResult::Fail;
    }

    TestResult::Pass
}

/// A RunQueue preserva ordem de chegada
fn test_runqueue_fifo() -> TestResult {
    let mut queue = RunQueue::new();

    let first = Box::pin(Task::new("fifo-a"));
    let second = Box::pin(Task::new("fifo-b"));
    let first_tid = first.tid;
    let second_tid = second.tid;

    queue.push(first);
    queue.push(second);

    match (queue.pop(), queue.pop()) {
        (Some(a), Some(b)) if a.tid == first_tid && b.tid == second_tid => {}
        _ => return TestResult::Fail,
    }

    if !queue.is_empty() {
        return TestResult::Fail;
    }

    TestResult::Pass
}

/// `setup` deixa o contexto pronto para a primeira entrada via trampolim
fn test_context_setup() -> TestResult {
    let mut task = Task::new("ctx");
    let fake_entry: u64 = 0x1234_5678;
    let stack_top: u64 = 0x8000;

    task.context.setup(fake_entry, stack_top);

    // RSP reserva o slot consumido pelo restore; R12 carrega a entry
    if task.context.rsp != stack_top - 8 {
        return TestResult::Fail;
    }
    if task.context.r12 != fake_entry {
        return TestResult::Fail;
    }
    if task.context.rip == 0 || task.context.rbp != 0 {
        return TestResult::Fail;
    }

    TestResult::Pass
}

/// Valida constantes de pilha
fn test_stack_size_page_aligned() -> TestResult {
    if KERNEL_STACK_SIZE % 4096 != 0 {
        crate::kwarn!("(Sched) Tamanho de pilha NÃO alinhado a página");
        return TestResult::Fail;
    }

    TestResult::Pass
}
