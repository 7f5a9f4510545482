// STD Dependencies -----------------------------------------------------------
use std::path::PathBuf;
use std::process;


// External Dependencies ------------------------------------------------------
use clap::{crate_version, Arg, ArgAction, ArgMatches, Command};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;


// Internal Dependencies ------------------------------------------------------
use huffpack::file_io::{read_file, write_file};
use huffpack::{compress_with_report, decompress, Histogram, HuffmanCodec, HuffmanResult};


// Options --------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Compress { print_codes: bool },
    Decompress,
}

#[derive(Debug, Clone)]
struct Options {
    mode: Mode,
    input: PathBuf,
    output: PathBuf,
    level: Level,
}

impl Options {
    fn from_matches(matches: &ArgMatches) -> Option<Self> {
        let level = if matches.get_flag("QUIET") {
            Level::ERROR
        } else {
            match matches.get_count("VERBOSE") {
                0 => Level::INFO,
                1 => Level::DEBUG,
                _ => Level::TRACE,
            }
        };

        let (mode, sub) = match matches.subcommand()? {
            ("compress", sub) => (
                Mode::Compress {
                    print_codes: sub.get_flag("PRINT_CODES"),
                },
                sub,
            ),
            ("decompress", sub) => (Mode::Decompress, sub),
            _ => return None,
        };

        Some(Options {
            mode,
            input: sub.get_one::<PathBuf>("INPUT_FILE")?.clone(),
            output: sub.get_one::<PathBuf>("OUTPUT_FILE")?.clone(),
            level,
        })
    }
}


// CLI Interface --------------------------------------------------------------
fn main() {
    let matches = cli().get_matches();
    let Some(options) = Options::from_matches(&matches) else {
        // clap has already rejected anything but the two subcommands
        let _ = cli().print_help();
        process::exit(1);
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(options.level.into()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(&options) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn cli() -> Command {
    let files = [
        Arg::new("INPUT_FILE")
            .help("File to read")
            .value_parser(clap::value_parser!(PathBuf))
            .required(true)
            .index(1),
        Arg::new("OUTPUT_FILE")
            .help("File to create or overwrite")
            .value_parser(clap::value_parser!(PathBuf))
            .required(true)
            .index(2),
    ];

    Command::new("huffpack")
        .version(crate_version!())
        .about("Static Huffman file compressor")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(Arg::new("VERBOSE")
            .long("verbose")
            .short('v')
            .action(ArgAction::Count)
            .global(true)
            .help("log more detail (-v debug, -vv trace)")
        )
        .arg(Arg::new("QUIET")
            .long("quiet")
            .short('q')
            .action(ArgAction::SetTrue)
            .global(true)
            .conflicts_with("VERBOSE")
            .help("only log errors")
        )
        .subcommand(Command::new("compress")
            .about("compresses INPUT_FILE into a huffpack container")
            .args(files.clone())
            .arg(Arg::new("PRINT_CODES")
                .long("print-codes")
                .action(ArgAction::SetTrue)
                .help("print each byte's count and code to stdout")
            )
        )
        .subcommand(Command::new("decompress")
            .about("restores the original file from a huffpack container")
            .args(files)
        )
}

fn run(options: &Options) -> HuffmanResult<()> {
    let input = read_file(&options.input)?;

    let output = match options.mode {
        Mode::Compress { print_codes } => {
            if print_codes {
                print_codes_for(&input);
            }
            let (output, report) = compress_with_report(&input);
            info!("compressed {}", report);
            output
        }
        Mode::Decompress => {
            let output = decompress(&input)?;
            info!("decompressed {} -> {} bytes", input.len(), output.len());
            output
        }
    };

    write_file(&options.output, &output)
}

fn print_codes_for(input: &[u8]) {
    let histogram = Histogram::from_bytes(input);
    let Some(codec) = HuffmanCodec::from_histogram(&histogram) else {
        return;
    };
    for (byte, code) in codec.codes().iter() {
        println!("{:3} {:>10} {}", byte, histogram.count(byte), code);
    }
}
