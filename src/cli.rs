use crate::{StreamOptions, StreamRepairer, repair_to_string};
use std::env;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};

fn print_help(program: &str) {
    eprintln!(
        "Usage: {prog} [OPTIONS] [INPUT]\n\
         \n\
         INPUT: optional input file. When omitted, reads from stdin.\n\
         \n\
         Options:\n\
           -o, --output FILE       Write output to FILE (default stdout)\n\
               --overwrite         Write repaired text back to INPUT\n\
               --stream            Stream while parsing (bounded memory)\n\
               --chunk-size BYTES  Read size for streaming (default 65536)\n\
               --window-size BYTES Max buffered size of one value (default 65536)\n\
               --pretty            Pretty-print output (non-streaming)\n\
           -h, --help              Show this help\n",
        prog = program
    );
}

struct CliMode {
    input: Option<String>,
    output: Option<String>,
    overwrite: bool,
    stream: bool,
    pretty: bool,
}

fn parse_args() -> (StreamOptions, CliMode) {
    let mut args: Vec<String> = env::args().collect();
    let program = args
        .first()
        .cloned()
        .unwrap_or_else(|| "jsonmend".to_string());
    args.remove(0);

    let mut opts = StreamOptions::default();
    let mut input: Option<String> = None;
    let mut output: Option<String> = None;
    let mut overwrite = false;
    let mut stream = false;
    let mut pretty = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help(&program);
                std::process::exit(0);
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Missing FILE for --output");
                    std::process::exit(2);
                }
                output = Some(args[i].clone());
            }
            "--overwrite" => {
                overwrite = true;
            }
            "--stream" => {
                stream = true;
            }
            "--chunk-size" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Missing BYTES for --chunk-size");
                    std::process::exit(2);
                }
                opts.chunk_size = args[i].parse().unwrap_or(65536);
            }
            "--window-size" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Missing BYTES for --window-size");
                    std::process::exit(2);
                }
                opts.window_size = args[i].parse().unwrap_or(65536);
            }
            "--pretty" => {
                pretty = true;
            }
            s if s.starts_with('-') && s != "-" => {
                eprintln!("Unknown option: {}", s);
                std::process::exit(2);
            }
            path => {
                input = Some(path.to_string());
            }
        }
        i += 1;
    }

    // Rewriting the input file needs the whole output first.
    if overwrite {
        stream = false;
    }

    let mode = CliMode {
        input,
        output,
        overwrite,
        stream,
        pretty,
    };
    (opts, mode)
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (opts, mode) = parse_args();

    if mode.overwrite {
        let path = mode
            .input
            .as_ref()
            .ok_or("--overwrite requires an INPUT file")?;
        let content = fs::read_to_string(path)?;
        let repaired = repair_to_string(&content)?;
        if mode.pretty {
            #[cfg(feature = "serde")]
            {
                let value: serde_json::Value = serde_json::from_str(&repaired)?;
                fs::write(path, serde_json::to_string_pretty(&value)?)?;
                return Ok(());
            }
        }
        fs::write(path, repaired)?;
        return Ok(());
    }

    let mut writer: Box<dyn Write> = if let Some(ref path) = mode.output {
        Box::new(BufWriter::new(File::create(path)?))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };

    match (mode.stream, &mode.input) {
        (true, None) => {
            stream_repair(io::stdin(), &mut writer, &opts)?;
        }
        (true, Some(path)) => {
            stream_repair(BufReader::new(File::open(path)?), &mut writer, &opts)?;
        }
        (false, source) => {
            let content = match source {
                Some(path) => fs::read_to_string(path)?,
                None => {
                    let mut s = String::new();
                    io::stdin().read_to_string(&mut s)?;
                    s
                }
            };
            let repaired = repair_to_string(&content)?;
            write_output(&repaired, mode.pretty, &mut writer)?;
        }
    }

    writer.flush()?;
    Ok(())
}

fn write_output<W: Write>(
    repaired: &str,
    pretty: bool,
    writer: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    if pretty {
        #[cfg(feature = "serde")]
        {
            let value: serde_json::Value = serde_json::from_str(repaired)?;
            writer.write_all(serde_json::to_string_pretty(&value)?.as_bytes())?;
            return Ok(());
        }
    }
    writer.write_all(repaired.as_bytes())?;
    Ok(())
}

/// Pump a byte stream through the streaming repairer in `chunk_size` reads,
/// carrying incomplete UTF-8 sequences across chunk boundaries.
fn stream_repair<R: Read, W: Write>(
    mut reader: R,
    writer: &mut W,
    opts: &StreamOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut repairer = StreamRepairer::new(opts.clone());
    let mut buf = vec![0u8; opts.chunk_size.max(1024)];
    let mut pending: Vec<u8> = Vec::new();
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        pending.extend_from_slice(&buf[..n]);
        let valid_len = match std::str::from_utf8(&pending) {
            Ok(chunk) => {
                repairer.push_to_writer(chunk, writer)?;
                pending.clear();
                continue;
            }
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(_) => {
                return Err(
                    io::Error::new(io::ErrorKind::InvalidData, "input is not valid UTF-8").into(),
                );
            }
        };
        if valid_len > 0 {
            let chunk = std::str::from_utf8(&pending[..valid_len])
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "input is not valid UTF-8"))?;
            repairer.push_to_writer(chunk, writer)?;
            pending.drain(..valid_len);
        }
    }
    if !pending.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "input ends inside a UTF-8 sequence",
        )
        .into());
    }
    repairer.flush_to_writer(writer)
        .map_err(|e| e.into())
}
