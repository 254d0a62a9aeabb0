//! Multi-file FASTA loader.
//!
//! Records are read in file order across all input files; the i-th record
//! overall becomes chromosome `i`. Only the record description (the text
//! after `>`) and the concatenated, uppercased sequence are kept; anything
//! besides A/C/G/T/N passes through unchanged.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use memchr::memchr;

use crate::buffers::DEFAULT_INPUT_BUFFER;
use crate::error::Result;

/// One loaded chromosome: its FASTA description and uppercased sequence.
pub struct FastaRecord {
    pub description: String,
    pub sequence: Vec<u8>,
}

/// Loads every record from `paths`, in file order, numbering them 0..n in
/// the order encountered.
pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<FastaRecord>> {
    let mut records = Vec::new();
    for path in paths {
        load_one(path.as_ref(), &mut records)?;
    }
    Ok(records)
}

fn load_one(path: &Path, out: &mut Vec<FastaRecord>) -> Result<()> {
    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(DEFAULT_INPUT_BUFFER, file);

    let mut line = Vec::with_capacity(256);
    let mut current: Option<FastaRecord> = None;

    loop {
        line.clear();
        let n = read_line(&mut reader, &mut line)?;
        if n == 0 {
            break;
        }
        if line.first() == Some(&b'>') {
            if let Some(rec) = current.take() {
                out.push(rec);
            }
            let description = String::from_utf8_lossy(&line[1..]).trim().to_string();
            current = Some(FastaRecord {
                description,
                sequence: Vec::new(),
            });
        } else if let Some(rec) = current.as_mut() {
            rec.sequence.extend(line.iter().map(|&b| uppercase(b)));
        }
    }
    if let Some(rec) = current.take() {
        out.push(rec);
    }
    Ok(())
}

fn uppercase(b: u8) -> u8 {
    match b {
        b'a' => b'A',
        b'c' => b'C',
        b'g' => b'G',
        b't' => b'T',
        b'n' => b'N',
        other => other,
    }
}

/// Reads one line (without its trailing newline) into `buf`, returning the
/// number of bytes read including the newline, or 0 at EOF.
fn read_line(reader: &mut impl BufRead, buf: &mut Vec<u8>) -> io::Result<usize> {
    let mut total = 0;
    loop {
        let available = reader.fill_buf()?;
        if available.is_empty() {
            break;
        }
        match memchr(b'\n', available) {
            Some(pos) => {
                buf.extend_from_slice(&available[..pos]);
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
                total += pos + 1;
                reader.consume(pos + 1);
                break;
            }
            None => {
                let len = available.len();
                buf.extend_from_slice(available);
                total += len;
                reader.consume(len);
            }
        }
    }
    Ok(total)
}
