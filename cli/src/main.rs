//! gate-cli: offline inspection of proposals and module configuration.

use alloy_primitives::{Address, U256};
use anyhow::{bail, Context};
use clap::Parser;
use gate_crypto::{build_question, hash_transaction_hashes, question_hash, transaction_hash, SigningDomain};
use gate_module::ModuleConfig;
use gate_types::{Proposal, TxHash};
use gate_utils::LogFormat;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gate-cli", about = "Oracle-gated module operator tool")]
struct Cli {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "warn", env = "GATE_LOG_LEVEL")]
    log_level: String,

    /// Log output format: "human" or "json".
    #[arg(long, default_value = "human", env = "GATE_LOG_FORMAT")]
    log_format: LogFormat,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print transaction hashes, question text and question id of a proposal.
    #[command(name = "show-proposal")]
    ShowProposal {
        /// JSON file holding `{ "id": ..., "transactions": [...] }`.
        #[arg(long)]
        proposal_file: PathBuf,

        /// Module configuration (TOML). Required for the question id.
        #[arg(long, env = "GATE_CONFIG")]
        config: Option<PathBuf>,

        /// Module address; overrides the config value.
        #[arg(long)]
        module: Option<String>,

        /// Chain id; overrides the config value.
        #[arg(long)]
        chain_id: Option<u64>,

        /// Retry nonce of the question.
        #[arg(long, default_value_t = 0)]
        nonce: u64,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Validate a module configuration file.
    #[command(name = "check-config")]
    CheckConfig {
        #[arg(long, env = "GATE_CONFIG")]
        config: PathBuf,
    },
}

/// Everything an operator needs to cross-check a proposal before asking.
#[derive(Debug, Serialize)]
struct ProposalReport {
    proposal_id: String,
    transaction_hashes: Vec<String>,
    combined_hash: String,
    question: String,
    question_hash: String,
    nonce: u64,
    question_id: Option<String>,
}

fn proposal_report(
    proposal: &Proposal,
    domain: &SigningDomain,
    config: Option<&ModuleConfig>,
    nonce: u64,
) -> ProposalReport {
    let tx_hashes: Vec<TxHash> = proposal
        .transactions
        .iter()
        .map(|tx| transaction_hash(domain, tx))
        .collect();
    let question = build_question(&proposal.id, &tx_hashes);
    let question_id = config.map(|config| config.question_id(&question, U256::from(nonce)).to_string());

    ProposalReport {
        proposal_id: proposal.id.clone(),
        combined_hash: format!("0x{}", hex::encode(hash_transaction_hashes(&tx_hashes))),
        question_hash: question_hash(&question).to_string(),
        transaction_hashes: tx_hashes.iter().map(TxHash::to_string).collect(),
        question,
        nonce,
        question_id,
    }
}

fn load_proposal(path: &Path) -> anyhow::Result<Proposal> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read proposal file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse proposal file {}", path.display()))
}

fn load_config(path: &Path) -> anyhow::Result<ModuleConfig> {
    let config = ModuleConfig::from_toml_file(path)
        .with_context(|| format!("failed to load config {}", path.display()))?;
    tracing::info!(path = %path.display(), variant = %config.variant, "loaded module config");
    Ok(config)
}

fn print_report(report: &ProposalReport) {
    println!("proposal:      {}", report.proposal_id);
    for (index, hash) in report.transaction_hashes.iter().enumerate() {
        println!("tx[{index}]:         {hash}");
    }
    println!("combined hash: {}", report.combined_hash);
    println!("question:      {}", report.question);
    println!("question hash: {}", report.question_hash);
    match &report.question_id {
        Some(id) => println!("question id:   {id} (nonce {})", report.nonce),
        None => println!("question id:   n/a (no config)"),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    gate_utils::init_logging(cli.log_format, &cli.log_level)?;

    match cli.command {
        Command::ShowProposal {
            proposal_file,
            config,
            module,
            chain_id,
            nonce,
            json,
        } => {
            let proposal = load_proposal(&proposal_file)?;
            let config = config.as_deref().map(load_config).transpose()?;

            let module = match (module, &config) {
                (Some(raw), _) => raw
                    .parse::<Address>()
                    .with_context(|| format!("invalid module address {raw}"))?,
                (None, Some(config)) => config.module,
                (None, None) => bail!("either --config or --module is required"),
            };
            let chain_id = chain_id
                .or(config.as_ref().map(|config| config.chain_id))
                .unwrap_or(1);
            tracing::debug!(module = %module, chain_id, transactions = proposal.len(), "hashing proposal");

            let domain = SigningDomain::new(chain_id, module);
            let report = proposal_report(&proposal, &domain, config.as_ref(), nonce);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Command::CheckConfig { config } => {
            let config = load_config(&config)?;
            config.validate().context("invalid module config")?;
            println!(
                "config ok: variant {}, timeout {}s, cooldown {}s, expiration {}s",
                config.variant, config.timeout, config.cooldown, config.answer_expiration
            );
        }
    }

    Ok(())
}
