use std::fs::File;
use std::io::Write;

use clap::Parser;
use color_print::cformat;

#[derive(Debug, clap::Parser)]
#[clap(version, about = "Disassembler for OMM ampersand modules")]
struct Args {
    /// Input files
    input: Vec<String>,
}

fn main() {
    let args = Args::parse();
    let mut stdout = std::io::stdout();
    for path in &args.input {
        if let Err(err) = disasm(path, &mut stdout) {
            eprintln!("{}", cformat!("<red,bold>{}</>: {}.", path, err));
            std::process::exit(1);
        }
    }
}

fn disasm(path: &str, out: &mut dyn Write) -> Result<(), ommdis::Error> {
    let file = File::open(path)?;
    let map = unsafe { memmap2::Mmap::map(&file)? };
    ommdis::disassemble(&map, out)
}
