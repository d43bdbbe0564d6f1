//! Interactive Hamming code demo: encode a message, send it through a
//! noisy channel and show what the decoder recovers.
//!
//! `cargo run --bin hamming-channel -- --message "Hello" --denominator 20 --seed 1`

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hamming_channel::hamming::{
    flip_probability_from_denominator, format_bit_stream, BinarySymmetricChannel, CodeConfig,
    HammingCode, SymbolMapping, DEFAULT_ORDER,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Hamming code transmission demo",
    long_about = "Encodes a message with a Hamming code, flips random bits to simulate a noisy \
                  channel, then corrects and decodes it. Without --message the demo asks for \
                  its inputs interactively."
)]
struct Args {
    /// Code order m (parity bits per word)
    #[arg(short = 'm', long, default_value_t = DEFAULT_ORDER)]
    order: u32,

    /// Message to send; prompts for one when omitted
    #[arg(long)]
    message: Option<String>,

    /// Flip each bit with probability 1 in DENOMINATOR (default 100)
    #[arg(short = 'd', long)]
    denominator: Option<String>,

    /// Seed for a reproducible channel
    #[arg(long)]
    seed: Option<u64>,

    /// Use colored text
    #[arg(long, conflicts_with = "nocolor")]
    color: bool,

    /// Don't use colored text
    #[arg(long)]
    nocolor: bool,

    /// Map symbols straight to the first 128 codewords
    #[arg(long)]
    direct_mapping: bool,

    /// Print the encoded bit stream
    #[arg(long)]
    show_encoded: bool,

    /// Print the received (corrupted) bit stream
    #[arg(long)]
    show_received: bool,

    /// Print the parity-check matrix and the codeword table
    #[arg(long)]
    print_tables: bool,
}

fn prompt(question: &str) -> io::Result<String> {
    print!("{}", question);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

fn divider(word_len: usize) -> String {
    "=".repeat(2 * word_len - 1)
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let use_color = if args.nocolor {
        false
    } else {
        args.color || !cfg!(windows)
    };
    let mapping = if args.direct_mapping {
        SymbolMapping::Direct
    } else {
        SymbolMapping::Scaled
    };

    let config = CodeConfig::new(args.order).with_mapping(mapping);
    let params = config.validate()?;
    let n = params.word_len();

    println!(
        "m: {}\nn: {}\nN: {}",
        params.order(),
        n,
        params.codeword_count()
    );
    println!("{}", divider(n));

    println!("Calculating words...");
    let code = HammingCode::with_config(config)?;
    println!("{}", divider(n));

    if args.print_tables {
        print!("{}", code.matrix());
        println!("{}", divider(n));
        for (index, word) in code.codebook().iter().enumerate() {
            println!("{:>6}  {}", index, format_bit_stream(word, n));
        }
        println!("{}", divider(n));
    }

    let interactive = args.message.is_none();
    let message = match args.message {
        Some(message) => message,
        None => prompt("Type the message you want to encode: ")?,
    };

    let show_encoded = if interactive {
        let answer = prompt("Do you want to see the encoded message? [Y/n] ")?;
        !answer.starts_with(&['n', 'N'][..])
    } else {
        args.show_encoded
    };

    let denominator = match args.denominator {
        Some(denominator) => denominator,
        None if interactive => {
            println!("Now, we will simulate sending the message by flipping a few bits randomly.");
            prompt("Please enter the chance of a bit being flipped (default: 1 in 100): 1 in ")?
        }
        None => String::new(),
    };
    let probability = flip_probability_from_denominator(&denominator);

    let mut channel = match args.seed {
        Some(seed) => BinarySymmetricChannel::with_seed(probability, seed)?,
        None => BinarySymmetricChannel::new(probability)?,
    };
    let sent = code.transmit(message.as_bytes(), &mut channel)?;

    if show_encoded {
        println!("{}", divider(n));
        println!("{}", format_bit_stream(&sent.encoded, n));
        println!("{}", divider(n));
    }

    let show_received = if interactive {
        let answer = prompt("Do you want to see the received (corrupted) message? [y/N] ")?;
        answer.starts_with(&['y', 'Y'][..])
    } else {
        args.show_received
    };
    if show_received {
        println!("{}", divider(n));
        println!("{}", format_bit_stream(&sent.received, n));
        println!("{}", divider(n));
    }

    println!("We will now correct the message!");
    println!(
        "The corrected message is: {}",
        sent.decoded.render(use_color)
    );
    println!("{}", divider(n));
    println!("{} words were corrected.", sent.decoded.corrections());

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
