//! Bit-packed virtual machine CLI.
//!
//! This binary provides the two halves of the toolchain:
//! 1. **Assemble:** Read a JSON instruction list, validate it, and write the
//!    packed binary image (optionally printing an intermediate listing).
//! 2. **Run:** Load a binary image into code memory, execute it, and write
//!    the JSON memory-dump report (optionally printing a per-instruction
//!    trace).

use clap::{Parser, Subcommand};
use std::fmt::Display;
use std::{fs, process};

use uvm_core::asm;
use uvm_core::isa::Instruction;
use uvm_core::machine::Machine;
use uvm_core::report::{DEFAULT_DUMP_END, RunReport};

#[derive(Parser, Debug)]
#[command(
    name = "uvm",
    author,
    version,
    about = "Bit-packed-instruction virtual machine",
    long_about = "Assemble a JSON instruction list into a packed binary image, or execute an \
image and write a JSON memory-dump report.\n\nExamples:\n  \
uvm asm program.json program.bin --listing\n  \
uvm run program.bin dump.json --dump-start 0 --dump-end 256 --trace"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble a JSON instruction list into a binary image.
    Asm {
        /// Program source: a JSON list of instruction records.
        input: String,

        /// Output path for the binary image.
        output: String,

        /// Print the intermediate representation and the image bytes.
        #[arg(long)]
        listing: bool,
    },

    /// Execute a binary image and write the memory-dump report.
    Run {
        /// Assembled binary image.
        program: String,

        /// Output path for the JSON report.
        report: String,

        /// First data-memory address included in the dump.
        #[arg(long, default_value_t = 0)]
        dump_start: usize,

        /// One past the last data-memory address included in the dump.
        #[arg(long, default_value_t = DEFAULT_DUMP_END)]
        dump_end: usize,

        /// Print one trace line per executed instruction.
        #[arg(long)]
        trace: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Asm {
            input,
            output,
            listing,
        } => cmd_asm(&input, &output, listing),
        Commands::Run {
            program,
            report,
            dump_start,
            dump_end,
            trace,
        } => cmd_run(&program, &report, dump_start, dump_end, trace),
    }
}

/// Prints the error and exits with code 1.
fn fatal(err: impl Display) -> ! {
    eprintln!("[!] FATAL: {err}");
    process::exit(1);
}

/// Assembles `input` into `output`, printing counts and the optional listing.
fn cmd_asm(input: &str, output: &str, listing: bool) {
    let text = fs::read_to_string(input)
        .unwrap_or_else(|e| fatal(format!("Could not read file '{input}': {e}")));

    let records = asm::parse_program(&text).unwrap_or_else(|e| fatal(e));
    let image = asm::assemble(&records).unwrap_or_else(|e| fatal(e));

    if listing {
        let instructions = asm::lower(&records).unwrap_or_else(|e| fatal(e));

        println!("Intermediate representation\n");
        for inst in &instructions {
            println!("{}", listing_line(inst));
        }

        println!("\nBinary representation\n");
        let bytes: Vec<String> = image.iter().map(|b| format!("{b:#04X}")).collect();
        println!("{}", bytes.join(", "));
        println!();
    }

    fs::write(output, &image)
        .unwrap_or_else(|e| fatal(format!("Could not write file '{output}': {e}")));

    println!("[*] Assembled {} instructions", records.len());
    println!("[*] Image size: {} bytes -> {}", image.len(), output);
}

/// Executes `program` and writes the JSON report to `report`.
fn cmd_run(program: &str, report: &str, dump_start: usize, dump_end: usize, trace: bool) {
    let image =
        fs::read(program).unwrap_or_else(|e| fatal(format!("Could not read file '{program}': {e}")));

    let mut machine = Machine::new();
    machine.load_program(&image).unwrap_or_else(|e| fatal(e));
    println!("[*] Loaded program: {} bytes", image.len());

    machine.run();

    if trace {
        for event in machine.trace() {
            println!("{event}");
        }
    }

    let run_report = RunReport::from_machine(&machine, dump_start, dump_end);
    let file = fs::File::create(report)
        .unwrap_or_else(|e| fatal(format!("Could not create file '{report}': {e}")));
    serde_json::to_writer_pretty(file, &run_report)
        .unwrap_or_else(|e| fatal(format!("Could not write report '{report}': {e}")));

    println!("[*] Execution finished at PC={:#06X}", machine.pc());
    println!(
        "[*] Instructions executed: {}",
        machine.instructions_executed()
    );
    if let Some(cause) = machine.halt_cause() {
        println!("[*] Halt: {cause}");
    }
    println!("[*] Report written: {report}");
}

/// Formats one record of the intermediate listing, tag first:
/// `{A=44, B=10, C=703710}`.
fn listing_line(inst: &Instruction) -> String {
    let tag = inst.opcode().tag();
    match *inst {
        Instruction::LoadConst { b, c }
        | Instruction::ReadMem { b, c }
        | Instruction::WriteMem { b, c } => format!("{{A={tag}, B={b}, C={c}}}"),
        Instruction::BitwiseOr { b, c, d } => format!("{{A={tag}, B={b}, C={c}, D={d}}}"),
    }
}
