use anyhow::{anyhow, Result};
use std::io::Write;

use super::{GenotypeCall, Variant};

const META: &str = "##fileformat=VCFv4.3\n##source=varseq\n";
const GT_FORMAT: &str = "##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">\n";
const COLUMNS: &str = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO";

fn allele_or_dot(allele: &str) -> &str {
    if allele.is_empty() {
        "."
    } else {
        allele
    }
}

/// Write variants as a minimal VCF.
///
/// When `samples` is non-empty a `GT` column is emitted per sample; samples
/// without a stored call are written as `./.`.
pub fn write_vcf<'a, W, I>(writer: &mut W, samples: &[String], variants: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Variant>,
{
    writer.write_all(META.as_bytes())?;
    if !samples.is_empty() {
        writer.write_all(GT_FORMAT.as_bytes())?;
    }
    let mut columns = COLUMNS.to_string();
    if !samples.is_empty() {
        columns.push_str("\tFORMAT");
        for sample in samples {
            columns.push('\t');
            columns.push_str(sample);
        }
    }
    columns.push('\n');
    writer.write_all(columns.as_bytes())?;

    for variant in variants {
        let mut line = record_line(variant, samples.len());
        line.push('\n');
        writer.write_all(line.as_bytes())?;
    }

    writer.flush()?;
    Ok(())
}

/// One VCF data line (no trailing newline) with `sample_count` `GT` columns.
pub fn record_line(variant: &Variant, sample_count: usize) -> String {
    let alts = variant.alt_alleles().join(",");
    let mut line = format!(
        "{chrom}\t{pos}\t.\t{ref_allele}\t{alt}\t.\t.\t.",
        chrom = variant.chrom(),
        pos = variant.pos(),
        ref_allele = allele_or_dot(variant.ref_allele()),
        alt = allele_or_dot(&alts),
    );
    if sample_count > 0 {
        line.push_str("\tGT");
        for idx in 0..sample_count {
            let call = variant
                .genotypes()
                .get(idx)
                .copied()
                .unwrap_or(GenotypeCall::Unknown);
            line.push('\t');
            line.push_str(call.as_vcf_gt());
        }
    }
    line
}

/// Render variants into a VCF string (useful for tests and snapshots).
pub fn render_vcf<'a, I>(samples: &[String], variants: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Variant>,
{
    let mut buffer = Vec::new();
    write_vcf(&mut buffer, samples, variants)?;
    String::from_utf8(buffer).map_err(|_| anyhow!("rendered VCF is not valid UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sites_only_output_has_no_format_column() {
        let variants = vec![Variant::new("chr1", 5, "T", "C")];
        let vcf = render_vcf(&[], &variants).unwrap();
        let lines: Vec<&str> = vcf.lines().collect();
        assert_eq!(lines[2], COLUMNS);
        assert_eq!(lines[3], "chr1\t5\t.\tT\tC\t.\t.\t.");
    }

    #[test]
    fn missing_calls_render_as_unknown() {
        let samples = vec!["s1".to_string(), "s2".to_string()];
        let variants =
            vec![Variant::new("chr1", 5, "T", "").with_genotypes(vec![GenotypeCall::HomAlt])];
        let vcf = render_vcf(&samples, &variants).unwrap();
        assert!(vcf.ends_with("chr1\t5\t.\tT\t.\t.\t.\t.\tGT\t1/1\t./.\n"));
    }
}
