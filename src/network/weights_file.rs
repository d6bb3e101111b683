//! Plain-text weight files.
//!
//! One decimal number per line, no header: the input→hidden weights in
//! row-major order followed by the hidden→output weights in row-major order.
//! Numbers are written with Rust's shortest round-trip formatting, so a
//! save/load cycle reproduces every weight bit for bit.

use std::io::{BufWriter, Read, Write};

use crate::error::{NetworkError, Result};

/// Writes every weight of every slice, in order, one per line.
pub fn write_weights<W: Write>(writer: W, matrices: &[&[f64]]) -> std::io::Result<()> {
    let mut out = BufWriter::new(writer);
    for weight in matrices.iter().flat_map(|m| m.iter()) {
        writeln!(out, "{weight}")?;
    }
    out.flush()
}

/// Reads exactly `expected` finite numbers separated by whitespace.
///
/// Fewer tokens, extra tokens, unparsable tokens and non-finite values are all
/// `Format` errors. Nothing is returned unless the whole file is valid.
pub fn read_weights<R: Read>(mut reader: R, expected: usize) -> Result<Vec<f64>> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| NetworkError::Format(format!("weight file is not readable text: {e}")))?;

    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != expected {
        return Err(NetworkError::Format(format!(
            "expected {expected} weights, found {}",
            tokens.len()
        )));
    }

    let mut weights = Vec::with_capacity(expected);
    for (idx, token) in tokens.into_iter().enumerate() {
        let weight: f64 = token.parse().map_err(|_| {
            NetworkError::Format(format!("token {} ({token:?}) is not a number", idx + 1))
        })?;
        if !weight.is_finite() {
            return Err(NetworkError::Format(format!(
                "token {} ({token}) is not a finite weight",
                idx + 1
            )));
        }
        weights.push(weight);
    }

    Ok(weights)
}
