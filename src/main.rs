//! `galoisrs` command-line front end over the library operations

use anyhow::{Context, Result};
use galoisrs::args::parse_args;
use galoisrs::{
    acquire_field, bch_decode_with_config, bch_encode, cyclic_generator_matrix,
    cyclic_polynomials, field_order_for_length, minimum_distance, primitive_polynomials,
    rs_decode_with_config, rs_encode, BchOptions, CodecConfig, DecodeResult, GaloisMatrix,
    GeneratorForm, NeverCancel, ParityPosition, PolySelector, RsOptions, MAX_ORDER,
};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let matches = parse_args();

    match matches.subcommand() {
        Some(("primpoly", sub)) => handle_primpoly(sub),
        Some(("cyclpoly", sub)) => handle_cyclpoly(sub),
        Some(("cyclgen", sub)) => handle_cyclgen(sub),
        Some(("rs-encode", sub)) => handle_rs_encode(sub),
        Some(("rs-decode", sub)) => handle_rs_decode(sub),
        Some(("bch-encode", sub)) => handle_bch_encode(sub),
        Some(("bch-decode", sub)) => handle_bch_decode(sub),
        Some((cmd, _)) => anyhow::bail!("Unknown command: {}", cmd),
        None => anyhow::bail!("No command specified"),
    }
}

fn required<'a, T: Clone + Send + Sync + 'static>(
    matches: &'a clap::ArgMatches,
    name: &str,
) -> Result<&'a T> {
    matches
        .get_one::<T>(name)
        .with_context(|| format!("missing argument '{}'", name))
}

fn selector(matches: &clap::ArgMatches) -> PolySelector {
    if let Some(&w) = matches.get_one::<u32>("weight") {
        return PolySelector::Weight(w);
    }
    match matches.get_one::<String>("select").map(String::as_str) {
        Some("min") => PolySelector::Min,
        Some("max") => PolySelector::Max,
        _ => PolySelector::All,
    }
}

fn parity(matches: &clap::ArgMatches) -> Result<ParityPosition> {
    let value = required::<String>(matches, "parity")?;
    value.parse().context("Invalid parity position")
}

fn join(symbols: &[u16]) -> String {
    symbols
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn print_matrix(label: &str, matrix: &GaloisMatrix) {
    println!("{}:", label);
    for r in 0..matrix.rows() {
        println!("  {}", join(matrix.row(r)));
    }
}

fn print_decoded(decoded: &DecodeResult) {
    println!("message: {}", join(decoded.message.row(0)));
    println!("errors: {}", decoded.error_counts[0]);
    println!("corrected: {}", join(decoded.corrected.row(0)));
}

fn handle_primpoly(matches: &clap::ArgMatches) -> Result<()> {
    let m = *required::<u32>(matches, "m")?;
    let polys = primitive_polynomials(m, selector(matches))
        .with_context(|| format!("Failed to search primitive polynomials of degree {}", m))?;
    for p in polys {
        println!("{:#x} ({})", p, p);
    }
    Ok(())
}

fn handle_cyclpoly(matches: &clap::ArgMatches) -> Result<()> {
    let n = *required::<usize>(matches, "n")?;
    let k = *required::<usize>(matches, "k")?;
    let polys = cyclic_polynomials(n, k, selector(matches), &NeverCancel)
        .with_context(|| format!("Failed to search ({}, {}) cyclic polynomials", n, k))?;
    for p in polys {
        println!("{:#x} ({})", p, p);
    }
    Ok(())
}

fn handle_cyclgen(matches: &clap::ArgMatches) -> Result<()> {
    let n = *required::<usize>(matches, "n")?;
    let poly = *required::<u64>(matches, "poly")?;
    let code = cyclic_generator_matrix(n, poly, GeneratorForm::Systematic)
        .with_context(|| format!("Failed to build cyclic code of length {}", n))?;

    println!("k: {}", code.k);
    print_matrix("parity-check", &code.parity);
    print_matrix("generator", &code.generator);
    if matches.get_flag("distance") {
        let d = minimum_distance(&code.generator, &NeverCancel)
            .context("Failed to compute minimum distance")?;
        println!("minimum distance: {}", d);
    }
    Ok(())
}

fn rs_options(matches: &clap::ArgMatches) -> Result<RsOptions> {
    let mut options = RsOptions::new().with_parity(parity(matches)?);
    if let (Some(&fcr), Some(&prim)) = (
        matches.get_one::<usize>("fcr"),
        matches.get_one::<usize>("prim"),
    ) {
        options = options.with_roots(fcr, prim);
    }
    Ok(options)
}

/// One-row matrix over the smallest field holding n-symbol codewords
fn rs_row(n: usize, symbols: &[u16]) -> Result<GaloisMatrix> {
    let m = field_order_for_length(n);
    anyhow::ensure!(m <= MAX_ORDER, "No field holds codewords of length {}", n);
    let field = acquire_field(m, 0)?;
    GaloisMatrix::row_vector(&field, symbols).context("Symbols outside the field")
}

fn handle_rs_encode(matches: &clap::ArgMatches) -> Result<()> {
    let n = *required::<usize>(matches, "n")?;
    let k = *required::<usize>(matches, "k")?;
    let message = rs_row(n, required::<Vec<u16>>(matches, "symbols")?)?;
    let code = rs_encode(&message, n, k, &rs_options(matches)?)
        .with_context(|| format!("Failed to RS({}, {}) encode", n, k))?;
    println!("{}", join(code.row(0)));
    Ok(())
}

fn handle_rs_decode(matches: &clap::ArgMatches) -> Result<()> {
    let n = *required::<usize>(matches, "n")?;
    let k = *required::<usize>(matches, "k")?;
    let code = rs_row(n, required::<Vec<u16>>(matches, "symbols")?)?;
    let config = CodecConfig::from_args(matches);
    let decoded = rs_decode_with_config(&code, n, k, &rs_options(matches)?, &config)
        .with_context(|| format!("Failed to RS({}, {}) decode", n, k))?;
    print_decoded(&decoded);
    Ok(())
}

fn bch_options(matches: &clap::ArgMatches) -> Result<BchOptions> {
    let primpoly = *required::<u64>(matches, "primpoly")?;
    let primpoly = u32::try_from(primpoly).context("Primitive polynomial too large")?;
    Ok(BchOptions::new()
        .with_parity(parity(matches)?)
        .with_primpoly(primpoly))
}

fn bits_row(symbols: &[u16]) -> Result<GaloisMatrix> {
    let gf2 = acquire_field(1, 0)?;
    GaloisMatrix::row_vector(&gf2, symbols).context("BCH symbols must be 0 or 1")
}

fn handle_bch_encode(matches: &clap::ArgMatches) -> Result<()> {
    let n = *required::<usize>(matches, "n")?;
    let k = *required::<usize>(matches, "k")?;
    let message = bits_row(required::<Vec<u16>>(matches, "symbols")?)?;
    let code = bch_encode(&message, n, k, &bch_options(matches)?)
        .with_context(|| format!("Failed to BCH({}, {}) encode", n, k))?;
    println!("{}", join(code.row(0)));
    Ok(())
}

fn handle_bch_decode(matches: &clap::ArgMatches) -> Result<()> {
    let k = *required::<usize>(matches, "k")?;
    let t = *required::<usize>(matches, "t")?;
    let code = bits_row(required::<Vec<u16>>(matches, "symbols")?)?;
    let config = CodecConfig::from_args(matches);
    let decoded = bch_decode_with_config(&code, k, t, &bch_options(matches)?, &config)
        .with_context(|| format!("Failed to BCH decode with k={} t={}", k, t))?;
    print_decoded(&decoded);
    Ok(())
}
