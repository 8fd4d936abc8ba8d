/// Segmentation: split a payload into mode-tagged runs
use crate::encoder::bitstream::BitBuffer;
use crate::encoder::modes::Mode;
use crate::encoder::modes::alphanumeric::AlphanumericEncoder;
use crate::encoder::modes::byte::ByteEncoder;
use crate::encoder::modes::numeric::NumericEncoder;
use crate::error::EncodeError;
use crate::models::Version;

/// Default minimum length of a numeric or alphanumeric run that gets its own segment
pub const DEFAULT_MIN_RUN: usize = 20;

/// A contiguous run of payload encoded under a single mode
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// ASCII digits
    Numeric(Vec<u8>),
    /// Characters of the 45-symbol alphanumeric set
    Alphanumeric(Vec<u8>),
    /// Arbitrary bytes
    Byte(Vec<u8>),
}

impl Segment {
    /// Build a segment of `mode`, failing on the first byte the mode cannot carry
    pub fn with_mode(mode: Mode, data: &[u8]) -> Result<Self, EncodeError> {
        let seg = match mode {
            Mode::Numeric => Segment::Numeric(data.to_vec()),
            Mode::Alphanumeric => Segment::Alphanumeric(data.to_vec()),
            Mode::Byte => Segment::Byte(data.to_vec()),
        };
        seg.validate()?;
        Ok(seg)
    }

    /// Check every byte against the segment's mode
    pub fn validate(&self) -> Result<(), EncodeError> {
        let mode = self.mode();
        match self.data().iter().position(|&b| !mode.accepts(b)) {
            Some(position) => Err(EncodeError::InvalidCharacterForMode { mode, position }),
            None => Ok(()),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Segment::Numeric(_) => Mode::Numeric,
            Segment::Alphanumeric(_) => Mode::Alphanumeric,
            Segment::Byte(_) => Mode::Byte,
        }
    }

    /// Raw payload bytes of this segment
    pub fn data(&self) -> &[u8] {
        match self {
            Segment::Numeric(d) | Segment::Alphanumeric(d) | Segment::Byte(d) => d,
        }
    }

    /// Character count written into the count indicator
    pub fn char_count(&self) -> usize {
        self.data().len()
    }

    /// Indicator + count + payload bits at `version`
    pub fn encoded_bits(&self, version: Version) -> usize {
        let mode = self.mode();
        4 + mode.char_count_bits(version) + mode.data_bits(self.char_count())
    }

    /// Whether the character count fits the count indicator at `version`
    pub fn fits_count_field(&self, version: Version) -> bool {
        self.char_count() < 1 << self.mode().char_count_bits(version)
    }

    /// Append the full segment (header and payload) to `out`
    pub fn write_to(&self, out: &mut BitBuffer, version: Version) {
        let mode = self.mode();
        out.append_bits(mode.indicator(), 4);
        out.append_bits(self.char_count() as u32, mode.char_count_bits(version));
        match self {
            Segment::Numeric(d) => NumericEncoder::encode(d, out),
            Segment::Alphanumeric(d) => AlphanumericEncoder::encode(d, out),
            Segment::Byte(d) => ByteEncoder::encode(d, out),
        }
    }
}

/// Classifies payload bytes into segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segmenter {
    min_run: usize,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_RUN)
    }
}

impl Segmenter {
    /// `min_run` is the shortest numeric/alphanumeric run split out of a longer payload
    pub fn new(min_run: usize) -> Self {
        Self {
            min_run: min_run.max(1),
        }
    }

    /// Split `data` into segments.
    ///
    /// Payloads no longer than `min_run` become one segment in the narrowest mode
    /// covering all of it. Longer payloads are first split around digit runs of at
    /// least `min_run`, then the remaining chunks around alphanumeric runs of at
    /// least `min_run`; everything else is byte mode. Empty input yields no segments.
    pub fn segment(&self, data: &[u8]) -> Vec<Segment> {
        if data.is_empty() {
            return Vec::new();
        }
        if data.len() <= self.min_run {
            let seg = match Mode::narrowest_for(data) {
                Mode::Numeric => Segment::Numeric(data.to_vec()),
                Mode::Alphanumeric => Segment::Alphanumeric(data.to_vec()),
                Mode::Byte => Segment::Byte(data.to_vec()),
            };
            return vec![seg];
        }

        let mut segments = Vec::new();
        for (is_numeric, chunk) in split_runs(data, self.min_run, Mode::Numeric) {
            if is_numeric {
                segments.push(Segment::Numeric(chunk.to_vec()));
                continue;
            }
            for (is_alpha, sub) in split_runs(chunk, self.min_run, Mode::Alphanumeric) {
                if is_alpha {
                    segments.push(Segment::Alphanumeric(sub.to_vec()));
                } else {
                    segments.push(Segment::Byte(sub.to_vec()));
                }
            }
        }
        segments
    }
}

/// Split `data` into alternating chunks: maximal runs of bytes accepted by `mode`
/// that are at least `min_run` long (`true`), and everything between them (`false`).
fn split_runs(data: &[u8], min_run: usize, mode: Mode) -> Vec<(bool, &[u8])> {
    let mut chunks = Vec::new();
    let mut gap_start = 0;
    let mut i = 0;
    while i < data.len() {
        if !mode.accepts(data[i]) {
            i += 1;
            continue;
        }
        let run_start = i;
        while i < data.len() && mode.accepts(data[i]) {
            i += 1;
        }
        if i - run_start >= min_run {
            if gap_start < run_start {
                chunks.push((false, &data[gap_start..run_start]));
            }
            chunks.push((true, &data[run_start..i]));
            gap_start = i;
        }
    }
    if gap_start < data.len() {
        chunks.push((false, &data[gap_start..]));
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_payload_single_segment() {
        let seg = Segmenter::default();
        assert_eq!(seg.segment(b"12345"), vec![Segment::Numeric(b"12345".to_vec())]);
        assert_eq!(
            seg.segment(b"HELLO WORLD"),
            vec![Segment::Alphanumeric(b"HELLO WORLD".to_vec())]
        );
        assert_eq!(seg.segment(b"Hello"), vec![Segment::Byte(b"Hello".to_vec())]);
        assert!(seg.segment(b"").is_empty());
    }

    #[test]
    fn test_long_numeric_run_split_out() {
        let seg = Segmenter::new(4);
        let segments = seg.segment(b"abc123456def");
        assert_eq!(
            segments,
            vec![
                Segment::Byte(b"abc".to_vec()),
                Segment::Numeric(b"123456".to_vec()),
                Segment::Byte(b"def".to_vec()),
            ]
        );
    }

    #[test]
    fn test_alphanumeric_run_inside_byte_chunk() {
        let seg = Segmenter::new(4);
        let segments = seg.segment(b"https://EXAMPLE.COM/x");
        assert_eq!(
            segments,
            vec![
                Segment::Byte(b"https".to_vec()),
                Segment::Alphanumeric(b"://EXAMPLE.COM/".to_vec()),
                Segment::Byte(b"x".to_vec()),
            ]
        );
    }

    #[test]
    fn test_short_runs_stay_in_byte_mode() {
        let seg = Segmenter::new(20);
        let data = b"order 12345 shipped to warehouse";
        assert_eq!(seg.segment(data), vec![Segment::Byte(data.to_vec())]);
    }

    #[test]
    fn test_mode_override_rejects_bad_byte() {
        let err = Segment::with_mode(Mode::Numeric, b"12a4").unwrap_err();
        assert_eq!(
            err,
            EncodeError::InvalidCharacterForMode {
                mode: Mode::Numeric,
                position: 2
            }
        );
        assert!(Segment::with_mode(Mode::Byte, &[0, 255]).is_ok());
    }

    #[test]
    fn test_encoded_bits() {
        let seg = Segment::Alphanumeric(b"HELLO WORLD".to_vec());
        // 4 + 9 + 5 * 11 + 6
        assert_eq!(seg.encoded_bits(Version::MIN), 74);
        assert!(seg.fits_count_field(Version::MIN));
        assert!(!Segment::Byte(vec![0; 256]).fits_count_field(Version::MIN));
    }
}
