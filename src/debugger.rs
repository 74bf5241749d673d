use colored::{ColoredString, Colorize};

use crate::err::MemoryError;
use crate::mems::memory::{Memory, MemoryExt};
use crate::regs::register_file::{Register, RegisterFile};

const WORD_SIZE: u64 = 4;

/// Prints register and memory state of a session.
pub struct Debugger {
    columns: usize,
}

impl Default for Debugger {
    fn default() -> Self {
        Debugger { columns: 4 }
    }
}

impl Debugger {
    pub fn new(columns: usize) -> Self {
        Debugger {
            columns: columns.max(1),
        }
    }

    pub fn print_debug_info<M: Memory>(
        &self,
        registers: &RegisterFile,
        memory: &mut M,
        words: u64,
    ) -> Result<(), MemoryError> {
        println!(
            "{}",
            "==================== Session ====================="
                .bright_cyan()
                .bold()
        );

        self.print_registers_grid(registers);

        println!(
            "{}",
            "--------------------------------------------------".bright_cyan()
        );

        self.print_memory_words(memory, words)
    }

    fn print_registers_grid(&self, registers: &RegisterFile) {
        println!("{}", "Registers:".bright_magenta().bold());

        let register_values: Vec<(Register, u32)> = registers.iter().collect();
        for chunk in register_values.chunks(self.columns) {
            let mut line = String::new();
            for (reg, value) in chunk {
                let colored_reg = format_register_name(*reg);
                let colored_value = format_register_value(*value);
                let column_text = &format!("{colored_reg}:{colored_value}");
                line.push_str(&format!("{column_text:>30}"));
            }
            println!("  {line}");
        }

        println!(
            "  {}:{}  {}:{}  {}:{}",
            "hi".bright_blue(),
            format_register_value(registers.hi),
            "lo".bright_blue(),
            format_register_value(registers.lo),
            "pc".bright_yellow(),
            format_register_value(registers.pc),
        );
    }

    // Reads go through `memory`, so pass the backing store rather than the
    // mapped memory if a dump must not consume stdin.
    fn print_memory_words<M: Memory>(
        &self,
        memory: &mut M,
        words: u64,
    ) -> Result<(), MemoryError> {
        println!("{}", "Memory:".bright_magenta().bold());

        let limit = memory.size() - memory.size() % WORD_SIZE;
        let end = words.saturating_mul(WORD_SIZE).min(limit);
        for address in (0..end).step_by(WORD_SIZE as usize) {
            let word = memory.read::<u32>(address)?;
            println!("  {:08x}:\t{}", address, format_memory_word(word));
        }
        Ok(())
    }
}

fn format_register_name(reg: Register) -> ColoredString {
    let name = reg.to_string();
    match reg {
        Register::ARG1 | Register::ARG2 => name.bright_green(),
        Register::FRAME_POINTER | Register::RETURN_ADDRESS => name.bright_yellow(),
        _ => name.bright_magenta(),
    }
}

fn format_register_value(value: u32) -> ColoredString {
    match value {
        0 => "0x00000000".bright_black(),
        v if v < 0x1000 => format!("{v:#010x}").bright_red(), // Likely small integers
        v if v >= 0xffff_0000 => format!("{v:#010x}").bright_cyan(), // Sentinels and device words
        v => format!("{v:#010x}").white(),
    }
}

fn format_memory_word(word: u32) -> ColoredString {
    match word {
        0 => format!("{word:#010x}").bright_black(),
        _ => format!("{word:#010x}").normal(),
    }
}
