#[macro_use]
extern crate clap;

use clap::{Arg, ArgGroup};
use std::fs::File;
use std::io::prelude::*;
use std::io::BufWriter;
use std::path::Path;

use bex::RunConfig;

#[derive(Debug)]
enum Error {
    Run(bex::Error),
    Clap(clap::Error),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Run(err) => write!(f, "{}", err),
            Error::Clap(err) => write!(f, "{}", err),
            Error::Io(err) => write!(f, "{}", err),
            Error::Json(err) => write!(f, "{}", err),
        }
    }
}

fn main() {
    pretty_env_logger::init();

    if let Err(err) = run() {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("PROGRAM")
                .help("Sets the program image to run")
                .index(1),
        )
        .arg(
            Arg::with_name("assembly")
                .short("a")
                .long("assembly")
                .takes_value(true)
                .value_name("ASSEMBLY")
                .help("Sets the assembly file to use"),
        )
        .group(
            ArgGroup::with_name("input")
                .args(&["PROGRAM", "assembly"])
                .required(true),
        )
        .arg(
            Arg::with_name("memory")
                .short("m")
                .long("memory")
                .takes_value(true)
                .default_value("1024")
                .help("Sets the size of the device memory"),
        )
        .arg(
            Arg::with_name("warp_width")
                .short("w")
                .long("warp-width")
                .takes_value(true)
                .default_value("4")
                .help("Sets the number of lockstep threads per warp"),
        )
        .arg(
            Arg::with_name("tb_size")
                .short("s")
                .long("tb-size")
                .takes_value(true)
                .default_value("4")
                .help("Sets the number of active threads per block"),
        )
        .arg(
            Arg::with_name("blocks")
                .short("b")
                .long("blocks")
                .takes_value(true)
                .default_value("1")
                .help("Sets the number of thread blocks to dispatch"),
        )
        .arg(
            Arg::with_name("dp_addr")
                .long("dp-addr")
                .takes_value(true)
                .default_value("0")
                .help("Sets the parameter block address"),
        )
        .arg(
            Arg::with_name("trace")
                .short("t")
                .long("trace")
                .takes_value(true)
                .value_name("TRACE")
                .help("Writes the register trace to the given file"),
        )
        .get_matches();

    let config = RunConfig {
        memory_size: value_t!(matches.value_of("memory"), u32).map_err(Error::Clap)?,
        warp_width: value_t!(matches.value_of("warp_width"), usize).map_err(Error::Clap)?,
        tb_size: value_t!(matches.value_of("tb_size"), u32).map_err(Error::Clap)?,
        n_blocks: value_t!(matches.value_of("blocks"), u32).map_err(Error::Clap)?,
        dp_addr: value_t!(matches.value_of("dp_addr"), u32).map_err(Error::Clap)?,
        tgroup_id: 0,
    };

    let output = match matches.value_of("PROGRAM") {
        Some(program) => {
            let bytes = read_file(Path::new(program))?;
            bex::run_binary(&bytes, &config).map_err(Error::Run)?
        }
        None => {
            let source = read_source(Path::new(matches.value_of("assembly").unwrap()))?;
            bex::run_asm(&source, &config).map_err(Error::Run)?
        }
    };

    println!("Dispatch complete: {} block(s) traced", output.traces.len());

    if let Some(trace_path) = matches.value_of("trace") {
        let writer = BufWriter::new(File::create(trace_path).map_err(Error::Io)?);
        bex::write_trace(writer, &output.traces).map_err(Error::Json)?;
        println!("Register trace saved to {}", trace_path);
    }

    Ok(())
}

fn read_file(path: &Path) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();
    File::open(path)
        .and_then(|mut f| f.read_to_end(&mut bytes))
        .map_err(Error::Io)?;
    Ok(bytes)
}

fn read_source(path: &Path) -> Result<String, Error> {
    let mut source = String::new();
    File::open(path)
        .and_then(|mut f| f.read_to_string(&mut source))
        .map_err(Error::Io)?;
    Ok(source)
}
