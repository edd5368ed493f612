use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use varseq::genomics::record_line;
use varseq::{
    BcfVariantSource, ExtractorConfig, FaidxReference, Interval, VariantCatalog, VcfSeqExtractor,
};

#[derive(Parser, Debug)]
#[command(name = "varseq", about = "Apply VCF variants to reference intervals")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the sequence of a region with overlapping variants applied.
    Extract {
        /// Indexed FASTA reference (`.fai` alongside).
        #[arg(long)]
        fasta: PathBuf,
        /// Indexed VCF/BCF with the variants.
        #[arg(long)]
        vcf: PathBuf,
        /// Region as `chrom:start-end[:strand]`, 0-based half-open.
        #[arg(long)]
        region: Interval,
        /// Anchor coordinate (default: region start).
        #[arg(long)]
        anchor: Option<i64>,
        /// Only apply variants carried by this sample.
        #[arg(long)]
        sample: Option<String>,
        /// Let indels change the output length.
        #[arg(long)]
        variable_len: bool,
        /// Print one sequence per variant instead of one with all applied.
        #[arg(long)]
        per_variant: bool,
        /// Keep minus-strand regions in forward orientation.
        #[arg(long)]
        ignore_strand: bool,
    },
    /// Print the variants overlapping a region as VCF.
    Variants {
        /// Indexed VCF/BCF.
        #[arg(long)]
        vcf: PathBuf,
        /// Region as `chrom:start-end`, 0-based half-open.
        #[arg(long)]
        region: Interval,
        /// Only report variants carried by this sample.
        #[arg(long)]
        sample: Option<String>,
        /// Drop the region when it holds more variants than this.
        #[arg(long)]
        max_num: Option<usize>,
        /// Drop the region when it holds fewer variants than this.
        #[arg(long, default_value_t = 0)]
        min_num: usize,
    },
    /// Look up one variant by its `chrom:pos:ref:['alt']` identity.
    Lookup {
        /// Indexed VCF/BCF.
        #[arg(long)]
        vcf: PathBuf,
        /// Variant identity.
        #[arg(long)]
        id: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            fasta,
            vcf,
            region,
            anchor,
            sample,
            variable_len,
            per_variant,
            ignore_strand,
        } => {
            let config = ExtractorConfig::default().with_strand(!ignore_strand);
            let anchor = anchor.unwrap_or(region.start());
            run_extract(
                fasta,
                vcf,
                &region,
                anchor,
                sample.as_deref(),
                !variable_len,
                per_variant,
                config,
            )?
        }
        Commands::Variants {
            vcf,
            region,
            sample,
            max_num,
            min_num,
        } => run_variants(vcf, region, sample.as_deref(), max_num, min_num)?,
        Commands::Lookup { vcf, id } => run_lookup(vcf, &id)?,
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_extract(
    fasta_path: PathBuf,
    vcf_path: PathBuf,
    region: &Interval,
    anchor: i64,
    sample: Option<&str>,
    fixed_len: bool,
    per_variant: bool,
    config: ExtractorConfig,
) -> Result<()> {
    let reference = FaidxReference::from_path(&fasta_path)
        .with_context(|| format!("failed to open reference {}", fasta_path.display()))?;
    let source = open_variants(&vcf_path)?;
    let extractor = VcfSeqExtractor::with_config(reference, source, config);

    let seqs = if per_variant {
        extractor
            .extract_per_variant(region, anchor, sample, fixed_len)
            .with_context(|| format!("extraction failed for {region}"))?
    } else {
        vec![extractor
            .extract_combined(region, anchor, sample, fixed_len)
            .with_context(|| format!("extraction failed for {region}"))?]
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for seq in seqs {
        writeln!(out, "{seq}")?;
    }
    Ok(())
}

fn run_variants(
    vcf_path: PathBuf,
    region: Interval,
    sample: Option<&str>,
    max_num: Option<usize>,
    min_num: usize,
) -> Result<()> {
    let catalog = VariantCatalog::new(open_variants(&vcf_path)?);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    catalog
        .query_variants([region], sample)
        .with_progress()
        .filter_by_num(max_num, min_num)
        .write_vcf(&mut out)
        .context("variant query failed")
}

fn run_lookup(vcf_path: PathBuf, id: &str) -> Result<()> {
    let catalog = VariantCatalog::new(open_variants(&vcf_path)?);
    let variant = catalog
        .get_variant_by_id(id)
        .with_context(|| format!("lookup of {id} failed"))?;
    println!("{}", record_line(&variant, catalog.samples().len()));
    Ok(())
}

fn open_variants(path: &PathBuf) -> Result<BcfVariantSource> {
    BcfVariantSource::from_path(path)
        .with_context(|| format!("failed to open variants {}", path.display()))
}
