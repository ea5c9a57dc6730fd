//! Command-line definition for the `galoisrs` binary

use clap::{Arg, ArgAction, Command};

/// Parse a list of non-negative integers separated by commas and/or whitespace
pub fn parse_symbols(input: &str) -> Result<Vec<u16>, String> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u16>()
                .map_err(|_| format!("'{}' is not a field symbol", s))
        })
        .collect()
}

/// Parse a polynomial bitmask given in decimal or with a 0x prefix
pub fn parse_polynomial(input: &str) -> Result<u64, String> {
    let parsed = match input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => input.parse(),
    };
    parsed.map_err(|_| format!("'{}' is not a polynomial", input))
}

fn selector_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("select")
            .short('s')
            .long("select")
            .help("Which polynomials to list")
            .value_parser(["min", "max", "all"])
            .default_value("all"),
    )
    .arg(
        Arg::new("weight")
            .short('w')
            .long("weight")
            .help("Only polynomials with this many nonzero coefficients")
            .value_name("W")
            .value_parser(clap::value_parser!(u32))
            .conflicts_with("select"),
    )
}

fn length_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .help(help)
        .required(true)
        .value_parser(clap::value_parser!(usize))
}

fn codeword_arg(help: &'static str) -> Arg {
    Arg::new("symbols")
        .help(help)
        .required(true)
        .value_parser(parse_symbols)
}

fn parity_arg(default: &'static str) -> Arg {
    Arg::new("parity")
        .short('p')
        .long("parity")
        .help("Position of the parity symbols")
        .value_parser(["beginning", "end"])
        .default_value(default)
}

fn parallel_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("threads")
            .short('j')
            .long("threads")
            .help("Number of CPU threads for decoding (0 = auto-detect)")
            .value_name("N")
            .default_value("0"),
    )
    .arg(
        Arg::new("no-parallel")
            .long("no-parallel")
            .help("Disable all parallel processing")
            .action(ArgAction::SetTrue),
    )
}

fn rs_root_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("fcr")
            .long("fcr")
            .help("First consecutive root of the generator")
            .value_parser(clap::value_parser!(usize))
            .requires("prim"),
    )
    .arg(
        Arg::new("prim")
            .long("prim")
            .help("Exponent of the primitive element generating the roots")
            .value_parser(clap::value_parser!(usize))
            .requires("fcr"),
    )
}

fn primpoly_arg() -> Arg {
    Arg::new("primpoly")
        .long("primpoly")
        .help("Primitive polynomial of the root field (0 = default)")
        .value_parser(parse_polynomial)
        .default_value("0")
}

pub fn build_cli() -> Command {
    Command::new("galoisrs")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Galois field arithmetic, cyclic codes, Reed-Solomon and BCH coding")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .subcommand(selector_args(
            Command::new("primpoly")
                .about("List primitive polynomials of degree m")
                .arg(
                    Arg::new("m")
                        .help("Polynomial degree")
                        .required(true)
                        .value_parser(clap::value_parser!(u32)),
                ),
        ))
        .subcommand(selector_args(
            Command::new("cyclpoly")
                .about("List generator polynomials of (n, k) binary cyclic codes")
                .arg(length_arg("n", "Codeword length"))
                .arg(length_arg("k", "Message length")),
        ))
        .subcommand(
            Command::new("cyclgen")
                .about("Parity-check and generator matrices of a binary cyclic code")
                .arg(length_arg("n", "Codeword length"))
                .arg(
                    Arg::new("poly")
                        .help("Generator polynomial bitmask (decimal or 0x hex)")
                        .required(true)
                        .value_parser(parse_polynomial),
                )
                .arg(
                    Arg::new("distance")
                        .short('d')
                        .long("distance")
                        .help("Also compute the minimum distance")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(rs_root_args(
            Command::new("rs-encode")
                .about("Reed-Solomon encode one message")
                .arg(length_arg("n", "Codeword length"))
                .arg(length_arg("k", "Message length"))
                .arg(codeword_arg("Message symbols, e.g. 1,2,3"))
                .arg(parity_arg("end")),
        ))
        .subcommand(parallel_args(rs_root_args(
            Command::new("rs-decode")
                .about("Reed-Solomon decode one codeword")
                .arg(length_arg("n", "Codeword length"))
                .arg(length_arg("k", "Message length"))
                .arg(codeword_arg("Codeword symbols"))
                .arg(parity_arg("end")),
        )))
        .subcommand(
            Command::new("bch-encode")
                .about("BCH encode one message")
                .arg(length_arg("n", "Codeword length"))
                .arg(length_arg("k", "Message length"))
                .arg(codeword_arg("Message bits, e.g. 1,0,1,1"))
                .arg(parity_arg("beginning"))
                .arg(primpoly_arg()),
        )
        .subcommand(parallel_args(
            Command::new("bch-decode")
                .about("BCH decode one codeword")
                .arg(length_arg("k", "Message length"))
                .arg(length_arg("t", "Bit errors to correct"))
                .arg(codeword_arg("Codeword bits"))
                .arg(parity_arg("beginning"))
                .arg(primpoly_arg()),
        ))
}

pub fn parse_args() -> clap::ArgMatches {
    build_cli().get_matches()
}
