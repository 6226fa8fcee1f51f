//! Timer PIT (Programmable Interval Timer) - Intel 8253/8254.
//!
//! Gera as interrupções periódicas (timer ticks) no canal 0.
//!
//! # Limitações
//! - Frequência base fixa de ~1.19 MHz.
//! - Divisor de 16 bits: frequências válidas ficam entre ~19 Hz e a base.
//! - Não é preciso para medições de alta resolução.

use crate::arch::x86_64::ports::Port;
use crate::sync::Mutex;
use crate::sys::Errno;
use bitflags::bitflags;

/// Frequência base do oscilador do PIT (1.193182 MHz).
pub const BASE_FREQUENCY: u32 = 1_193_182;

// Portas de I/O do PIT
const PORT_CHANNEL0: u16 = 0x40; // Canal 0 (System Timer)
const PORT_COMMAND: u16 = 0x43; // Registrador de Comando

bitflags! {
    /// Byte de comando do PIT (porta 0x43).
    ///
    /// Formato: [canal (2 bits)][modo de acesso (2 bits)][modo de operação (3 bits)][BCD (1 bit)]
    #[derive(Debug, Clone, Copy)]
    pub struct PitCommand: u8 {
        /// Seleciona o canal 0 (system timer)
        const CHANNEL0 = 0b00 << 6;
        /// Acesso lobyte depois hibyte
        const ACCESS_LOHI = 0b11 << 4;
        /// Modo 2: rate generator (pulso periódico)
        const MODE_RATE_GENERATOR = 0b010 << 1;
    }
}

/// Driver do Programmable Interval Timer.
pub struct Pit {
    channel0: Port<u8>,
    command: Port<u8>,
    frequency: u32,
}

impl Pit {
    /// Cria uma interface para o PIT.
    ///
    /// # Safety
    /// O caller deve garantir que está rodando em hardware compatível com
    /// x86/IBM PC e que tem acesso exclusivo às portas 0x40 e 0x43.
    pub const unsafe fn new() -> Self {
        Self {
            channel0: Port::new(PORT_CHANNEL0),
            command: Port::new(PORT_COMMAND),
            frequency: 0,
        }
    }

    /// Calcula o divisor do canal 0 para uma frequência desejada.
    ///
    /// Separado de `set_frequency` para poder ser validado em testes sem
    /// tocar no hardware.
    pub fn divisor_for(freq: u32) -> Result<u16, Errno> {
        if freq == 0 || freq > BASE_FREQUENCY {
            return Err(Errno::EINVAL);
        }

        let divisor = BASE_FREQUENCY / freq;

        // O divisor deve caber em 16 bits (frequências < ~19 Hz não cabem)
        if divisor == 0 || divisor > 65535 {
            return Err(Errno::EINVAL);
        }

        Ok(divisor as u16)
    }

    /// Configura a frequência do Timer (em Hz).
    ///
    /// # Returns
    /// * `Ok(u32)`: Frequência real configurada (devido à precisão do divisor).
    /// * `Err(Errno)`: Se a frequência for inválida.
    pub fn set_frequency(&mut self, freq: u32) -> Result<u32, Errno> {
        let divisor = Self::divisor_for(freq)?;
        let actual_freq = BASE_FREQUENCY / divisor as u32;

        let command =
            PitCommand::CHANNEL0 | PitCommand::ACCESS_LOHI | PitCommand::MODE_RATE_GENERATOR;

        unsafe {
            self.command.write(command.bits());

            // Enviar divisor (Low byte, depois High byte)
            self.channel0.write((divisor & 0xFF) as u8);
            self.channel0.write((divisor >> 8) as u8);
        }

        self.frequency = actual_freq;
        crate::kinfo!("(PIT) Frequência configurada (Hz)=", actual_freq as u64);
        Ok(actual_freq)
    }

    /// Retorna a frequência atual configurada.
    pub fn frequency(&self) -> u32 {
        self.frequency
    }
}

/// Instância global do PIT.
/// Mutex de thread: só é tocada na configuração inicial do boot; o handler
/// de interrupção não precisa dela para incrementar ticks (usa Atomic).
pub static PIT: Mutex<Pit> = Mutex::new(unsafe { Pit::new() });
