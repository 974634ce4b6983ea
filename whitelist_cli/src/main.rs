mod config;
mod deploy;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use config::CliConfig;
use deploy::DeployArgs;
use log::info;
use std::path::PathBuf;
use whitelist_merkle::{verify, Address, MerkleProof, ProofManifest, Whitelist, WhitelistMerkleIndex, H256};

#[derive(Parser)]
#[command(name = "whitelist")]
#[command(about = "Whitelist Merkle root and proof tool for the NFT mint", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Whitelist JSON file (array of {"address": ...} records)
    #[arg(short, long, global = true)]
    whitelist: Option<PathBuf>,

    /// Config file (defaults to ./whitelist.config.json when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Drop repeated addresses before building the tree
    #[arg(long, global = true)]
    dedupe: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the Merkle root to register on the contract
    Root,

    /// Print the proof for one address
    Proof {
        /// Address to prove
        address: String,
    },

    /// Check a proof against a root
    Verify {
        /// Merkle root (hex)
        root: String,

        /// Claimed address
        address: String,

        /// Proof elements as hex, or a single JSON array
        proof: Vec<String>,
    },

    /// Write proofs for every whitelisted address
    Export {
        /// Output file
        #[arg(short, long, default_value = "proofs.json")]
        output: PathBuf,
    },

    /// Print the contract constructor arguments
    DeployArgs {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(path) = cli.whitelist.clone() {
        config.whitelist_path = path;
    }
    if cli.dedupe {
        config.dedupe = true;
    }

    match cli.command {
        Commands::Root => {
            let index = build_index(&config)?;
            println!("{}: {}", "Merkle root".bright_white(), index.root().to_hex().green());
            println!(
                "{}",
                format!("({} addresses, depth {})", index.len(), index.depth()).bright_black()
            );
        }

        Commands::Proof { address } => {
            let address = Address::parse(&address)?;
            let index = build_index(&config)?;
            match index.proof_for(&address) {
                Ok(proof) => {
                    println!("{}", serde_json::to_string_pretty(&proof)?);
                }
                Err(e) if e.is_not_found() => {
                    println!("{}", format!("{} is not eligible", address).yellow());
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Verify {
            root,
            address,
            proof,
        } => {
            let root = H256::from_hex(&root)?;
            let address = Address::parse(&address)?;
            let proof = parse_proof_args(&proof)?;
            if verify(&root, &address, &proof) {
                println!("{}", "Proof is valid".green());
            } else {
                println!("{}", "Proof is invalid".red());
                std::process::exit(1);
            }
        }

        Commands::Export { output } => {
            let index = build_index(&config)?;
            let manifest = ProofManifest::from_index(&index)?;
            output::write_file_atomic(&output, &manifest.to_json()?)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!(
                "{}",
                format!("Wrote {} proofs to {}", manifest.proofs.len(), output.display()).green()
            );
            println!("{}: {}", "Merkle root".bright_white(), manifest.root.to_hex().cyan());
        }

        Commands::DeployArgs { output } => {
            let index = build_index(&config)?;
            let args = DeployArgs::from_config(&config.deploy, index.root())?;
            let json = serde_json::to_string_pretty(&args.to_json())?;
            match output {
                Some(path) => {
                    output::write_file_atomic(&path, &json)?;
                    println!("{}", format!("Wrote deploy arguments to {}", path.display()).green());
                }
                None => println!("{}", json),
            }
        }
    }

    Ok(())
}

fn build_index(config: &CliConfig) -> Result<WhitelistMerkleIndex> {
    let validation = config.validate();
    validation.print_summary();
    if !validation.valid {
        anyhow::bail!("Configuration is invalid");
    }

    let whitelist = Whitelist::load(&config.whitelist_path)
        .with_context(|| format!("Failed to load whitelist {}", config.whitelist_path.display()))?;
    let whitelist = if config.dedupe {
        let deduped = whitelist.deduplicated();
        info!("dedupe removed {} entries", whitelist.len() - deduped.len());
        deduped
    } else {
        whitelist
    };

    Ok(WhitelistMerkleIndex::build(whitelist.addresses())?)
}

fn parse_proof_args(args: &[String]) -> Result<MerkleProof> {
    match args {
        [single] if single.trim_start().starts_with('[') => {
            serde_json::from_str(single).context("Failed to parse proof JSON array")
        }
        _ => Ok(MerkleProof::from_hex(args)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_proof_args_forms() {
        let h = H256::new([3u8; 32]).to_hex();
        let listed = parse_proof_args(&[h.clone(), h.clone()]).unwrap();
        let json = parse_proof_args(&[format!("[\"{}\", \"{}\"]", h, h)]).unwrap();
        assert_eq!(listed, json);
        assert_eq!(listed.len(), 2);
        assert!(parse_proof_args(&[]).unwrap().is_empty());
        assert!(parse_proof_args(&["0x00".to_string()]).is_err());
    }

    #[test]
    fn test_build_index_with_dedupe() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"[{"address":"0x1111111111111111111111111111111111111111"},
                 {"address":"0x1111111111111111111111111111111111111111"},
                 {"address":"0x2222222222222222222222222222222222222222"}]"#,
        )
        .unwrap();

        let mut config = CliConfig::default();
        config.whitelist_path = file.path().to_path_buf();
        assert_eq!(build_index(&config).unwrap().leaf_count(), 3);

        config.dedupe = true;
        assert_eq!(build_index(&config).unwrap().leaf_count(), 2);
    }

    #[test]
    fn test_build_index_empty_whitelist() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[]").unwrap();
        let mut config = CliConfig::default();
        config.whitelist_path = file.path().to_path_buf();
        assert!(build_index(&config).is_err());
    }
}
