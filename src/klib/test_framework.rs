//! Framework de testes do kernel
//!
//! Os testes rodam dentro do próprio kernel (feature `self_test`), usando
//! a serial como saída. Cada subsistema mantém sua suite num módulo
//! `test.rs` próprio e a registra como um array de `TestCase`.

/// Resultado de teste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestResult {
    Pass,
    Fail,
    Skip,
}

/// Um caso de teste
pub struct TestCase {
    pub name: &'static str,
    pub func: fn() -> TestResult,
}

impl TestCase {
    pub const fn new(name: &'static str, func: fn() -> TestResult) -> Self {
        Self { name, func }
    }
}

/// Executa uma suite de testes e loga os resultados.
///
/// Retorna (passed, failed, skipped).
pub fn run_test_suite(name: &str, tests: &[TestCase]) -> (usize, usize, usize) {
    crate::klog!("=== Suite: ");
    crate::klog!(name);
    crate::knl!();

    let mut passed = 0;
    let mut failed = 0;
    let mut skipped = 0;

    for test in tests {
        match (test.func)() {
            TestResult::Pass => {
                crate::kok!(test.name);
                passed += 1;
            }
            TestResult::Fail => {
                crate::kfail!(test.name);
                failed += 1;
            }
            TestResult::Skip => {
                crate::kwarn!(test.name);
                skipped += 1;
            }
        }
    }

    crate::klog!("=== Resultado: passed=", passed as u64);
    crate::klog!(" failed=", failed as u64);
    crate::knl!();

    if failed > 0 {
        crate::kerror!("Suite com falhas!");
    }

    (passed, failed, skipped)
}
