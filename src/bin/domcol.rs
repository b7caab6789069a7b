extern crate clap;
extern crate domcol;
extern crate env_logger;
extern crate log;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use domcol::config::{validate_extent, validate_name, validate_range, validate_size, Config};
use domcol::{plot, Builtin, Format};
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::str::FromStr;

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const RANGE: &str = "range";
const FUNCTION: &str = "function";
const FORMAT: &str = "format";
const THREADS: &str = "threads";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("domcol")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Domain coloring of complex functions")
        .arg(
            Arg::with_name(OUTPUT)
                .required(false)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file (default: standard output)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("400x400")
                .validator(validate_size)
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(RANGE)
                .required(false)
                .long(RANGE)
                .short("r")
                .takes_value(true)
                .default_value("4,4")
                .validator(validate_extent)
                .help("Width and height of the visible window, centered on the origin"),
        )
        .arg(
            Arg::with_name(FUNCTION)
                .required(false)
                .long(FUNCTION)
                .short("f")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .default_value("z")
                .validator(validate_name::<Builtin>)
                .help("Function to plot: z, z^2, z^3, 1/z, sin(z); repeat for several"),
        )
        .arg(
            Arg::with_name(FORMAT)
                .required(false)
                .long(FORMAT)
                .short("F")
                .takes_value(true)
                .validator(validate_name::<Format>)
                .help("sixel, png or pnm (default: from the output file, else sixel)"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in the renderer (default: all cores)"),
        )
        .get_matches()
}

fn configure(matches: &ArgMatches) -> domcol::Result<Config> {
    let threads = match matches.value_of(THREADS) {
        Some(t) => usize::from_str(t).unwrap_or(1),
        None => num_cpus::get(),
    };
    let functions: Vec<&str> = matches.values_of(FUNCTION).map(|v| v.collect()).unwrap_or_default();
    Config::from_args(
        matches.value_of(SIZE).unwrap_or("400x400"),
        matches.value_of(RANGE).unwrap_or("4,4"),
        functions,
        threads,
        matches.value_of(FORMAT),
        matches.value_of(OUTPUT),
    )
}

fn run(config: &Config) -> domcol::Result<()> {
    if let Some(ref path) = config.output {
        let function = &config.functions[0];
        let mut encoder = config.format.encoder(BufWriter::new(File::create(path)?));
        plot(config.size, config.extent, function, config.threads, &mut *encoder)?;
        info!("wrote {} as {} to {}", function.label(), config.format, path.display());
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for function in &config.functions {
        if config.format.is_terminal() {
            out.write_all(b"\t")?;
        }
        {
            let mut encoder = config.format.encoder(&mut out);
            plot(config.size, config.extent, function, config.threads, &mut *encoder)?;
        }
        if config.format.is_terminal() {
            writeln!(out, "{}\n", function.label())?;
        }
        info!("wrote {} as {}", function.label(), config.format);
    }
    out.flush()?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = args();
    let config = match configure(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&config) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
