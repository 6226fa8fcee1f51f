// =============================================================================
// KERNEL LOGGING SYSTEM - ZERO OVERHEAD
// =============================================================================
//
// Sistema de logging do Pulse com custo ZERO em release.
//
// - Usa features do Cargo para compile-time filtering
// - Com feature "no_logs", TODOS os macros viram expressões vazias
// - SEM core::fmt - Evita geração de código SSE/AVX
// - SEM alocação - Apenas strings e valores imediatos
// - Escreve APENAS na serial
//
// NÍVEIS (do mais crítico ao menos):
// - ERROR, WARN, INFO, DEBUG, TRACE
//
// COMO USAR:
//   kinfo!("(PIT) Inicializando...");          // Apenas string
//   kinfo!("(PIT) Freq=", freq);               // String + valor em hex
//   klog!("Start=", start, " End=", end);      // Múltiplos valores
//
// =============================================================================

// Prefixos com cores ANSI (1;31=Bold Red, 1;33=Bold Yellow, 32=Green,
// 36=Cyan, 35=Magenta, 0=Reset)
pub const P_ERROR: &str = "\x1b[1;31m[ERRO]\x1b[0m ";
pub const P_WARN: &str = "\x1b[1;33m[WARN]\x1b[0m ";
pub const P_INFO: &str = "\x1b[32m[INFO]\x1b[0m ";
pub const P_DEBUG: &str = "\x1b[36m[DEBG]\x1b[0m ";
pub const P_TRACE: &str = "\x1b[35m[TRAC]\x1b[0m ";

/// kerror! - Sempre ativo (exceto com no_logs).
/// Usado para erros críticos que podem causar crash.
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kerror {
    ($msg:expr) => {{
        $crate::drivers::serial::emit_str($crate::core::logging::P_ERROR);
        $crate::drivers::serial::emit_str($msg);
        $crate::drivers::serial::emit_nl();
    }};
    ($msg:expr, $val:expr) => {{
        $crate::drivers::serial::emit_str($crate::core::logging::P_ERROR);
        $crate::drivers::serial::emit_str($msg);
        $crate::drivers::serial::emit_hex($val as u64);
        $crate::drivers::serial::emit_nl();
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kerror {
    ($($t:tt)*) => {{}};
}

/// kwarn! - Situações suspeitas mas recuperáveis.
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kwarn {
    ($msg:expr) => {{
        $crate::drivers::serial::emit_str($crate::core::logging::P_WARN);
        $crate::drivers::serial::emit_str($msg);
        $crate::drivers::serial::emit_nl();
    }};
    ($msg:expr, $val:expr) => {{
        $crate::drivers::serial::emit_str($crate::core::logging::P_WARN);
        $crate::drivers::serial::emit_str($msg);
        $crate::drivers::serial::emit_hex($val as u64);
        $crate::drivers::serial::emit_nl();
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kwarn {
    ($($t:tt)*) => {{}};
}

/// kinfo! - Eventos importantes do fluxo normal.
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kinfo {
    ($msg:expr) => {{
        $crate::drivers::serial::emit_str($crate::core::logging::P_INFO);
        $crate::drivers::serial::emit_str($msg);
        $crate::drivers::serial::emit_nl();
    }};
    ($msg:expr, $val:expr) => {{
        $crate::drivers::serial::emit_str($crate::core::logging::P_INFO);
        $crate::drivers::serial::emit_str($msg);
        $crate::drivers::serial::emit_hex($val as u64);
        $crate::drivers::serial::emit_nl();
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kinfo {
    ($($t:tt)*) => {{}};
}

/// kdebug! - Informações de debugging (log_debug ou log_trace).
#[cfg(any(feature = "log_debug", feature = "log_trace"))]
#[macro_export]
macro_rules! kdebug {
    ($msg:expr) => {{
        $crate::drivers::serial::emit_str($crate::core::logging::P_DEBUG);
        $crate::drivers::serial::emit_str($msg);
        $crate::drivers::serial::emit_nl();
    }};
    ($msg:expr, $val:expr) => {{
        $crate::drivers::serial::emit_str($crate::core::logging::P_DEBUG);
        $crate::drivers::serial::emit_str($msg);
        $crate::drivers::serial::emit_hex($val as u64);
        $crate::drivers::serial::emit_nl();
    }};
}

#[cfg(not(any(feature = "log_debug", feature = "log_trace")))]
#[macro_export]
macro_rules! kdebug {
    ($($t:tt)*) => {{}};
}

/// ktrace! - Detalhes extremos de cada operação (apenas log_trace).
#[cfg(feature = "log_trace")]
#[macro_export]
macro_rules! ktrace {
    ($msg:expr) => {{
        $crate::drivers::serial::emit_str($crate::core::logging::P_TRACE);
        $crate::drivers::serial::emit_str($msg);
        $crate::drivers::serial::emit_nl();
    }};
    ($msg:expr, $val:expr) => {{
        $crate::drivers::serial::emit_str($crate::core::logging::P_TRACE);
        $crate::drivers::serial::emit_str($msg);
        $crate::drivers::serial::emit_hex($val as u64);
        $crate::drivers::serial::emit_nl();
    }};
}

#[cfg(not(feature = "log_trace"))]
#[macro_export]
macro_rules! ktrace {
    ($($t:tt)*) => {{}};
}

/// klog! - Log genérico sem prefixo de nível e sem newline.
///
/// Útil para construir linhas com múltiplos valores.
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! klog {
    ($msg:expr) => {{
        $crate::drivers::serial::emit_str($msg);
    }};
    ($msg:expr, $val:expr) => {{
        $crate::drivers::serial::emit_str($msg);
        $crate::drivers::serial::emit_hex($val as u64);
    }};
    ($msg1:expr, $val1:expr, $msg2:expr, $val2:expr) => {{
        $crate::drivers::serial::emit_str($msg1);
        $crate::drivers::serial::emit_hex($val1 as u64);
        $crate::drivers::serial::emit_str($msg2);
        $crate::drivers::serial::emit_hex($val2 as u64);
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! klog {
    ($($t:tt)*) => {{}};
}

/// knl! - Emite apenas newline.
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! knl {
    () => {{
        $crate::drivers::serial::emit_nl();
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! knl {
    () => {{}};
}

/// kok! - Log de sucesso (prefixo verde [OK]).
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kok {
    ($msg:expr) => {{
        $crate::drivers::serial::emit_str("\x1b[32m[OK]\x1b[0m ");
        $crate::drivers::serial::emit_str($msg);
        $crate::drivers::serial::emit_nl();
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kok {
    ($($t:tt)*) => {{}};
}

/// kfail! - Log de falha (prefixo vermelho [FAIL]).
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kfail {
    ($msg:expr) => {{
        $crate::drivers::serial::emit_str("\x1b[1;31m[FAIL]\x1b[0m ");
        $crate::drivers::serial::emit_str($msg);
        $crate::drivers::serial::emit_nl();
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kfail {
    ($($t:tt)*) => {{}};
}
