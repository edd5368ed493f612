//! Python bindings that expose the extractor via PyO3.
use pyo3::{
    exceptions::{PyIOError, PyValueError},
    prelude::*,
    types::PyModule,
};

use crate::extractor::{ExtractError, ExtractorConfig, VariantSeqExtractor};
use crate::genomics::{Interval, IntervalError, Strand, Variant, VariantId};
use crate::store::FaidxReference;

/// Python-facing extractor over an indexed FASTA file.
#[pyclass(unsendable, name = "VariantSeqExtractor")]
#[derive(Debug)]
pub struct PyVariantSeqExtractor {
    inner: VariantSeqExtractor<FaidxReference>,
}

#[pymethods]
impl PyVariantSeqExtractor {
    #[new]
    #[pyo3(signature = (fasta_file, use_strand = true))]
    /// Open `fasta_file` (indexed with `samtools faidx`).
    pub fn new(fasta_file: String, use_strand: bool) -> PyResult<Self> {
        let reference =
            FaidxReference::from_path(fasta_file).map_err(|err| PyIOError::new_err(err.to_string()))?;
        let config = ExtractorConfig::default().with_strand(use_strand);
        Ok(Self {
            inner: VariantSeqExtractor::with_config(reference, config),
        })
    }

    /// Apply variants to a reference interval.
    ///
    /// Args:
    ///     chrom: Chromosome name.
    ///     start: 0-based start (inclusive).
    ///     end: 0-based end (exclusive).
    ///     variants: List of `(chrom, pos, ref, alt)` tuples, `pos` 1-based.
    ///     anchor: Coordinate assembly walks outward from.
    ///     fixed_len: Keep the output at the interval length.
    ///     strand: `"+"`, `"-"` or `"."` (default).
    ///
    /// Returns:
    ///     The mutated sequence.
    #[allow(clippy::too_many_arguments)]
    #[pyo3(signature = (chrom, start, end, variants, anchor, fixed_len = true, strand = None))]
    pub fn extract(
        &self,
        chrom: String,
        start: i64,
        end: i64,
        variants: Vec<(String, i64, String, String)>,
        anchor: i64,
        fixed_len: bool,
        strand: Option<String>,
    ) -> PyResult<String> {
        let strand: Strand = strand
            .as_deref()
            .unwrap_or(".")
            .parse()
            .map_err(|err: IntervalError| PyValueError::new_err(err.to_string()))?;
        let interval = Interval::stranded(chrom, start, end, strand)
            .map_err(|err| PyValueError::new_err(err.to_string()))?;
        let variants: Vec<Variant> = variants
            .into_iter()
            .map(|(chrom, pos, ref_allele, alt)| Variant::new(chrom, pos, ref_allele, alt))
            .collect();

        self.inner
            .extract(&interval, &variants, anchor, fixed_len)
            .map_err(to_py_err)
    }
}

fn to_py_err(err: ExtractError) -> PyErr {
    match err {
        ExtractError::Store(_) => PyIOError::new_err(err.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

/// Canonical identity string `chrom:pos:ref:['alt']`.
#[pyfunction]
pub fn variant_to_id(chrom: String, pos: i64, ref_allele: String, alt: String) -> String {
    VariantId {
        chrom,
        pos,
        ref_allele,
        alt_allele: alt,
    }
    .to_string()
}

/// Create Python module.
#[pymodule]
pub fn varseq_py(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyVariantSeqExtractor>()?;
    m.add_function(wrap_pyfunction!(variant_to_id, m)?)?;
    Ok(())
}
