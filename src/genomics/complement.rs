use thiserror::Error;

/// Errors raised while transforming nucleotide sequences.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComplementError {
    /// Encountered a byte that is not an IUPAC nucleotide code.
    #[error("unsupported nucleotide '{0}' at position {1}")]
    UnsupportedBase(char, usize),
}

/// Complement of a single IUPAC nucleotide code, preserving case.
pub fn complement_base(base: u8) -> Option<u8> {
    let comp = match base.to_ascii_uppercase() {
        b'A' => b'T',
        b'T' => b'A',
        b'U' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        b'R' => b'Y',
        b'Y' => b'R',
        b'K' => b'M',
        b'M' => b'K',
        b'B' => b'V',
        b'V' => b'B',
        b'D' => b'H',
        b'H' => b'D',
        b'S' => b'S',
        b'W' => b'W',
        b'N' => b'N',
        _ => return None,
    };
    if base.is_ascii_lowercase() {
        Some(comp.to_ascii_lowercase())
    } else {
        Some(comp)
    }
}

/// Reverse complement of a nucleotide sequence.
pub fn reverse_complement(dna: &[u8]) -> Result<Vec<u8>, ComplementError> {
    dna.iter()
        .enumerate()
        .rev()
        .map(|(idx, &base)| {
            complement_base(base).ok_or(ComplementError::UnsupportedBase(base as char, idx))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement(b"NNATGCG").unwrap(), b"CGCATNN".to_vec());
        assert_eq!(reverse_complement(b"acgRY").unwrap(), b"RYcgt".to_vec());
        assert!(reverse_complement(b"").unwrap().is_empty());
    }

    #[test]
    fn test_reverse_complement_is_involution() {
        let seq = b"ACGTRYKMBVDHSWNacgtn";
        let twice = reverse_complement(&reverse_complement(seq).unwrap()).unwrap();
        assert_eq!(twice, seq.to_vec());
    }

    #[test]
    fn test_unsupported_base() {
        assert_eq!(
            reverse_complement(b"AC-GT"),
            Err(ComplementError::UnsupportedBase('-', 2))
        );
    }
}
