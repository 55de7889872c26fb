//! locksmith: inspect certificate extensions, resolve trust chains and order
//! certificate bundles.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use locksmith_lib::{
    Certificate, CertificatePool, EnglishResources, ExtensionDecoder, ResourceOverrides,
    ResourceProvider, TrustStoreLocation, X509SignatureVerifier,
};
use rayon::prelude::*;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "locksmith",
    about = "Decode X.509v3 extensions and resolve certificate trust chains",
    long_about = "locksmith decodes the extensions of X.509 certificates into readable\n\
                  text, resolves the chain from a certificate to a trusted root, and\n\
                  sorts unordered certificate bundles into chains.\n\n\
                  Input format (PEM vs DER) is auto-detected unless --pem or --der\n\
                  is specified. Commands read from stdin when no file is given.",
    after_help = "EXAMPLES:\n\
                  \n  locksmith show cert.pem\
                  \n  locksmith ext --oid 2.5.29.19 cert.pem\
                  \n  locksmith decode 2.5.29.15 03020780\
                  \n  locksmith trust --pool roots.pem leaf.pem\
                  \n  locksmith order --leaf-first bundle.pem\
                  \n  RUST_LOG=debug locksmith trust --system chain.pem"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file of display string overrides ({"key": "template", ...})
    #[arg(long, global = true, value_name = "FILE")]
    resources: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Display a certificate summary with decoded extensions
    Show {
        /// Certificate file (PEM or DER). Reads from stdin if omitted.
        file: Option<PathBuf>,
        /// Force DER input parsing (default: auto-detect)
        #[arg(long)]
        der: bool,
        /// Force PEM input parsing (default: auto-detect)
        #[arg(long)]
        pem: bool,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Display decoded extensions only (exit 1 in directory mode if any fail to decode)
    Ext {
        /// Certificate file or directory. Reads from stdin if omitted.
        file: Option<PathBuf>,
        /// Only show the extension with this OID
        #[arg(long, value_name = "OID")]
        oid: Option<String>,
        /// Force DER input parsing (default: auto-detect)
        #[arg(long)]
        der: bool,
        /// Force PEM input parsing (default: auto-detect)
        #[arg(long)]
        pem: bool,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
        /// Only print failures (directory mode)
        #[arg(long)]
        failures_only: bool,
        /// Recurse into subdirectories (directory mode)
        #[arg(short, long)]
        recurse: bool,
    },
    /// Decode one raw extension value given as hex
    #[command(after_help = "HEX is the extnValue contents, without the OCTET STRING wrapper.\n\
                      \nEXAMPLES:\n\
                      \n  locksmith decode 2.5.29.19 30060101ff020103\
                      \n  locksmith decode 2.5.29.15 03020780")]
    Decode {
        /// Dotted extension OID
        oid: String,
        /// DER value in hex (whitespace and colons are ignored)
        hex: String,
    },
    /// Resolve the chain from a certificate to a trusted root (exit 0 = trusted, 2 = not)
    #[command(
        after_help = "FILE is a PEM or DER certificate; further certificates in a PEM\n\
                      file join the pool as intermediates. A directory resolves every\n\
                      certificate file in it, in parallel.\n\
                      Without --pool or --pool-dir, the system trust store is used.\n\
                      \nEXAMPLES:\n\
                      \n  locksmith trust --pool roots.pem --pool intermediates.pem leaf.pem\
                      \n  locksmith trust --pool-dir /etc/ssl/certs leaf.pem\
                      \n  locksmith trust --system --failures-only certs/"
    )]
    Trust {
        /// Certificate file or directory. Reads from stdin if omitted.
        file: Option<PathBuf>,
        /// PEM file of pool certificates (repeatable)
        #[arg(long, value_name = "FILE")]
        pool: Vec<PathBuf>,
        /// Directory of PEM pool certificates
        #[arg(long, value_name = "DIR")]
        pool_dir: Option<PathBuf>,
        /// Add the system trust store to the pool
        #[arg(long)]
        system: bool,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
        /// Only print failures (directory mode)
        #[arg(long)]
        failures_only: bool,
        /// Recurse into subdirectories (directory mode)
        #[arg(short, long)]
        recurse: bool,
    },
    /// Sort a bundle into a chain, root first unless --leaf-first
    Order {
        /// PEM bundle. Reads from stdin if omitted.
        file: Option<PathBuf>,
        /// Emit the ordered bundle as PEM instead of subject lines
        #[arg(long)]
        pem: bool,
        /// Leaf first, root last
        #[arg(long)]
        leaf_first: bool,
    },
}

/// Maximum file size for certificate inputs (10 MiB).
const MAX_INPUT_BYTES: u64 = 10 * 1024 * 1024;

fn read_input(file: Option<&PathBuf>) -> Result<Vec<u8>> {
    match file {
        Some(path) => {
            let meta = std::fs::metadata(path)
                .with_context(|| format!("Failed to stat file: {}", path.display()))?;
            if meta.len() > MAX_INPUT_BYTES {
                anyhow::bail!(
                    "File too large ({} bytes, max {} bytes): {}",
                    meta.len(),
                    MAX_INPUT_BYTES,
                    path.display()
                );
            }
            std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .take(MAX_INPUT_BYTES)
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn parse_input(input: &[u8], der: bool, pem: bool) -> Result<Certificate> {
    if der {
        Ok(locksmith_lib::parse_der(input)?)
    } else if pem {
        Ok(locksmith_lib::parse_pem(input)?)
    } else {
        Ok(locksmith_lib::parse_cert(input)?)
    }
}

/// All certificates in the input: every block of a PEM bundle, or one DER certificate.
fn parse_bundle(input: &[u8]) -> Result<Vec<Certificate>> {
    if locksmith_lib::is_pem(input) {
        Ok(locksmith_lib::parse_pem_chain(input)?)
    } else {
        Ok(vec![locksmith_lib::parse_der(input)?])
    }
}

/// Parse hex from the command line, ignoring whitespace and colons.
fn parse_hex_arg(s: &str) -> Result<Vec<u8>> {
    let cleaned: String = s
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && *c != ':')
        .collect();
    hex::decode(&cleaned).with_context(|| format!("Invalid hex value: '{s}'"))
}

/// Check if a path has a certificate file extension (.pem, .der, .crt, .cer).
fn is_cert_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case("pem") || ext.eq_ignore_ascii_case("der")
            || ext.eq_ignore_ascii_case("crt") || ext.eq_ignore_ascii_case("cer")
    )
}

/// Find all certificate files in a directory, sorted by path.
fn find_cert_files(dir: &Path, recurse: bool) -> Vec<PathBuf> {
    let walker = if recurse {
        walkdir::WalkDir::new(dir)
    } else {
        walkdir::WalkDir::new(dir).max_depth(1)
    };
    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_cert_file(e.path()))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

fn find_cert_files_or_bail(dir: &Path, recurse: bool) -> Result<Vec<PathBuf>> {
    let files = find_cert_files(dir, recurse);
    if files.is_empty() {
        anyhow::bail!(
            "No certificate files (.pem, .der, .crt, .cer) found in {}",
            dir.display()
        );
    }
    Ok(files)
}

/// A single result from batch processing.
#[derive(Serialize)]
struct BatchResult {
    path: String,
    pass: bool,
    detail: String,
}

impl BatchResult {
    fn fail(path: String, detail: impl std::fmt::Display) -> Self {
        BatchResult {
            path,
            pass: false,
            detail: format!("FAIL ({})", detail),
        }
    }
}

/// Process files in parallel, printing `filename: result` (or one JSON array).
///
/// Returns the number of failures.
fn run_batch<F>(files: &[PathBuf], failures_only: bool, json: bool, op: F) -> Result<usize>
where
    F: Fn(&Path) -> BatchResult + Sync,
{
    let results: Vec<BatchResult> = files.par_iter().map(|f| op(f)).collect();
    let failures = results.iter().filter(|r| !r.pass).count();
    let shown: Vec<&BatchResult> = results
        .iter()
        .filter(|r| !(failures_only && r.pass))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(failures);
    }
    for r in shown {
        if r.pass {
            println!("{}: {}", r.path, r.detail);
        } else {
            eprintln!("{}: {}", r.path, r.detail);
        }
    }
    Ok(failures)
}

/// `-v` raises the default level; an explicit `RUST_LOG` wins.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("locksmith={level},locksmith_lib={level}").into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_resources(path: Option<&PathBuf>) -> Result<Box<dyn ResourceProvider>> {
    match path {
        Some(p) => {
            let overrides = ResourceOverrides::from_json_file(p)
                .with_context(|| format!("Failed to load resources: {}", p.display()))?;
            tracing::debug!(path = %p.display(), entries = overrides.len(), "loaded resource overrides");
            Ok(Box::new(overrides))
        }
        None => Ok(Box::new(EnglishResources)),
    }
}

fn build_pool(files: &[PathBuf], dir: Option<&PathBuf>, system: bool) -> Result<CertificatePool> {
    let mut pool = CertificatePool::new();
    for file in files {
        pool.add_pem_file(file)
            .with_context(|| format!("Failed to load pool file: {}", file.display()))?;
    }
    if let Some(dir) = dir {
        pool.add_pem_directory(dir)
            .with_context(|| format!("Failed to load pool directory: {}", dir.display()))?;
    }
    if system || (files.is_empty() && dir.is_none()) {
        pool.add_trust_store(&TrustStoreLocation::probe())
            .context("Failed to load the system trust store")?;
    }
    tracing::debug!(count = pool.len(), "pool ready");
    Ok(pool)
}

/// Resolve the first certificate of `bundle`; the rest join the pool.
fn resolve_bundle(
    bundle: Vec<Certificate>,
    pool: &CertificatePool,
) -> Result<locksmith_lib::ChainReport> {
    let mut certs = bundle.into_iter();
    let target = certs
        .next()
        .ok_or_else(|| anyhow::anyhow!("no certificate in input"))?;
    let rest: Vec<Certificate> = certs.collect();

    let report = if rest.is_empty() {
        let resolution = locksmith_lib::resolve(pool, &target, &X509SignatureVerifier);
        locksmith_lib::chain_report(&target, &resolution)
    } else {
        let mut extended = pool.clone();
        extended.extend(rest);
        let resolution = locksmith_lib::resolve(&extended, &target, &X509SignatureVerifier);
        locksmith_lib::chain_report(&target, &resolution)
    };
    Ok(report)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let resources = load_resources(cli.resources.as_ref())?;
    let resources: &dyn ResourceProvider = resources.as_ref();

    match &cli.command {
        Commands::Show {
            file,
            der,
            pem,
            json,
        } => {
            let input = read_input(file.as_ref())?;
            let cert = parse_input(&input, *der, *pem)?;
            let summary = locksmith_lib::summarize(&cert, resources);

            if *json {
                println!("{}", locksmith_lib::to_json(&summary)?);
            } else {
                print!("{}", locksmith_lib::display_text(&summary));
            }
        }
        Commands::Ext {
            file,
            oid,
            der,
            pem,
            json,
            failures_only,
            recurse,
        } => {
            if let Some(path) = file.as_ref().filter(|p| p.is_dir()) {
                let files = find_cert_files_or_bail(path, *recurse)?;
                let (force_der, force_pem) = (*der, *pem);
                let failures = run_batch(&files, *failures_only, *json, |f| {
                    let label = f.display().to_string();
                    let cert = match std::fs::read(f)
                        .map_err(anyhow::Error::from)
                        .and_then(|data| parse_input(&data, force_der, force_pem))
                    {
                        Ok(c) => c,
                        Err(e) => return BatchResult::fail(label, e),
                    };
                    let decoded = locksmith_lib::decode_certificate(&cert, resources);
                    let failed: Vec<&str> = decoded
                        .iter()
                        .filter(|d| d.error.is_some())
                        .map(|d| d.oid.as_str())
                        .collect();
                    if failed.is_empty() {
                        BatchResult {
                            path: label,
                            pass: true,
                            detail: format!("{} extension(s) decoded", decoded.len()),
                        }
                    } else {
                        BatchResult::fail(label, format!("undecodable: {}", failed.join(", ")))
                    }
                })?;
                if failures > 0 {
                    std::process::exit(1);
                }
                return Ok(());
            }

            let input = read_input(file.as_ref())?;
            let cert = parse_input(&input, *der, *pem)?;
            let mut decoded = locksmith_lib::decode_certificate(&cert, resources);
            if let Some(oid) = oid {
                decoded.retain(|d| d.oid == *oid);
                if decoded.is_empty() {
                    anyhow::bail!("Extension '{}' not found", oid);
                }
            }

            if *json {
                println!("{}", locksmith_lib::to_json(&decoded)?);
            } else {
                for ext in &decoded {
                    println!(
                        "{} ({}){}:",
                        ext.name,
                        ext.oid,
                        if ext.critical { " [critical]" } else { "" }
                    );
                    for line in ext.text.lines() {
                        println!("  {}", line);
                    }
                }
            }
        }
        Commands::Decode { oid, hex } => {
            let raw = parse_hex_arg(hex)?;
            let text = ExtensionDecoder::new(resources)
                .decode(oid, &raw)
                .with_context(|| format!("Failed to decode extension {}", oid))?;
            print!("{}", text);
            if !text.ends_with('\n') {
                println!();
            }
        }
        Commands::Trust {
            file,
            pool,
            pool_dir,
            system,
            json,
            failures_only,
            recurse,
        } => {
            let pool = build_pool(pool, pool_dir.as_ref(), *system)?;

            if let Some(path) = file.as_ref().filter(|p| p.is_dir()) {
                let files = find_cert_files_or_bail(path, *recurse)?;
                let failures = run_batch(&files, *failures_only, *json, |f| {
                    let label = f.display().to_string();
                    let report = std::fs::read(f)
                        .map_err(anyhow::Error::from)
                        .and_then(|data| parse_bundle(&data))
                        .and_then(|bundle| resolve_bundle(bundle, &pool));
                    match report {
                        Ok(r) if r.trusted => BatchResult {
                            path: label,
                            pass: true,
                            detail: format!("OK (depth {})", r.chain.len()),
                        },
                        Ok(r) if r.cycle_detected => BatchResult::fail(label, "not trusted, issuer cycle"),
                        Ok(_) => BatchResult::fail(label, "not trusted"),
                        Err(e) => BatchResult::fail(label, e),
                    }
                })?;
                if failures > 0 {
                    std::process::exit(2);
                }
                return Ok(());
            }

            let input = read_input(file.as_ref())?;
            let report = resolve_bundle(parse_bundle(&input)?, &pool)?;
            if *json {
                println!("{}", locksmith_lib::to_json(&report)?);
            } else if report.trusted {
                print!("{}", locksmith_lib::display_chain(&report));
            } else {
                eprint!("{}", locksmith_lib::display_chain(&report));
            }
            if !report.trusted {
                std::process::exit(2);
            }
        }
        Commands::Order {
            file,
            pem,
            leaf_first,
        } => {
            let input = read_input(file.as_ref())?;
            let bag = parse_bundle(&input)?;
            let ordered = if *leaf_first {
                locksmith_lib::order_leaf_first(&bag)?
            } else {
                locksmith_lib::order(&bag)?
            };
            if ordered.len() < bag.len() {
                tracing::warn!(
                    dropped = bag.len() - ordered.len(),
                    "some certificates are not linked to the chain"
                );
            }

            for cert in ordered {
                if *pem {
                    print!("{}", cert.to_pem());
                } else {
                    println!("{}", cert.subject);
                }
            }
        }
    }

    Ok(())
}
