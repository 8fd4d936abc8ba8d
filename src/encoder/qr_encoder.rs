use crate::encoder::bitstream::{pack_data_codewords, total_bits};
use crate::encoder::ecc::final_bit_sequence;
use crate::encoder::function_mask::FunctionMask;
use crate::encoder::mask::{build_candidate, evaluate_masks, select_best};
use crate::encoder::modes::Mode;
use crate::encoder::placement::place_bits;
use crate::encoder::segment::{DEFAULT_MIN_RUN, Segment, Segmenter};
use crate::encoder::tables::{num_data_codewords, remainder_bits};
use crate::encoder::version::VersionInfo;
use crate::error::EncodeError;
use crate::models::{ECLevel, MaskPattern, QRCode, Version};

/// Per-call encoder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Requested error correction level
    pub ec_level: ECLevel,
    /// Pin the symbol to this version instead of picking the smallest that fits
    pub version: Option<Version>,
    /// Encode the whole payload as one segment of this mode
    pub mode: Option<Mode>,
    /// Use this mask instead of searching for the lowest penalty
    pub mask: Option<MaskPattern>,
    /// Raise the EC level as far as the chosen version still holds the payload
    pub boost_error_correction: bool,
    /// Shortest numeric/alphanumeric run split into its own segment
    pub min_run: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            ec_level: ECLevel::M,
            version: None,
            mode: None,
            mask: None,
            boost_error_correction: false,
            min_run: DEFAULT_MIN_RUN,
        }
    }
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ec_level(mut self, ec_level: ECLevel) -> Self {
        self.ec_level = ec_level;
        self
    }

    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_mask(mut self, mask: MaskPattern) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn with_boost_error_correction(mut self, boost: bool) -> Self {
        self.boost_error_correction = boost;
        self
    }

    pub fn with_min_run(mut self, min_run: usize) -> Self {
        self.min_run = min_run;
        self
    }
}

/// Orchestrates segmentation, packing, error correction, layout and masking
pub struct QrEncoder;

impl QrEncoder {
    /// Encode `data` into a finalized symbol
    #[tracing::instrument(level = "debug", skip_all, fields(len = data.len(), ec = %options.ec_level))]
    pub fn encode(data: &[u8], options: &EncodeOptions) -> Result<QRCode, EncodeError> {
        let segments = Self::segment(data, options)?;
        tracing::debug!(
            segments = segments.len(),
            modes = ?segments.iter().map(Segment::mode).collect::<Vec<_>>(),
            "segmented payload"
        );

        let (version, ec_level) = Self::choose_version(&segments, options)?;
        tracing::debug!(%version, %ec_level, "selected version");

        let codewords = pack_data_codewords(&segments, version, ec_level)?;
        Self::encode_codewords(&codewords, version, ec_level, options.mask)
    }

    /// Split the payload per the options' mode override or the segmenter
    pub fn segment(data: &[u8], options: &EncodeOptions) -> Result<Vec<Segment>, EncodeError> {
        match options.mode {
            Some(mode) => Ok(vec![Segment::with_mode(mode, data)?]),
            None => Ok(Segmenter::new(options.min_run).segment(data)),
        }
    }

    /// Smallest version (or the pinned one) holding the segments, and the final EC level
    pub fn choose_version(
        segments: &[Segment],
        options: &EncodeOptions,
    ) -> Result<(Version, ECLevel), EncodeError> {
        let requested = options.ec_level;

        let version = match options.version {
            Some(version) => {
                let capacity_bits = capacity_bits(version, requested)?;
                if !fits(segments, version, capacity_bits) {
                    return Err(EncodeError::InvalidVersionOverride {
                        version,
                        required_bits: total_bits(segments, version),
                        capacity_bits,
                    });
                }
                version
            }
            None => {
                let mut found = None;
                for version in Version::all() {
                    if fits(segments, version, capacity_bits(version, requested)?) {
                        found = Some(version);
                        break;
                    }
                }
                match found {
                    Some(version) => version,
                    None => {
                        return Err(EncodeError::CapacityExceeded {
                            ec_level: requested,
                            required_bits: total_bits(segments, Version::MAX),
                            capacity_bits: capacity_bits(Version::MAX, requested)?,
                        });
                    }
                }
            }
        };

        let mut ec_level = requested;
        if options.boost_error_correction {
            for level in ECLevel::ALL.into_iter().filter(|&l| l > requested) {
                if fits(segments, version, capacity_bits(version, level)?) {
                    ec_level = level;
                }
            }
        }
        Ok((version, ec_level))
    }

    /// Build the symbol from complete data codewords
    pub fn encode_codewords(
        data_codewords: &[u8],
        version: Version,
        ec_level: ECLevel,
        mask: Option<MaskPattern>,
    ) -> Result<QRCode, EncodeError> {
        let bits = final_bit_sequence(data_codewords, version, ec_level)?;
        let codeword_bits = bits.len() - remainder_bits(version);

        let func = FunctionMask::new(version);
        if func.data_modules_count() != bits.len() {
            return Err(EncodeError::MalformedSegmentTable { version, ec_level });
        }
        let (mut base, kinds) = place_bits(func, &bits, codeword_bits);
        VersionInfo::write(&mut base, version);

        let chosen = match mask {
            Some(mask) => build_candidate(&base, &kinds, ec_level, mask),
            None => {
                let candidates = evaluate_masks(&base, &kinds, ec_level);
                for c in &candidates {
                    tracing::trace!(mask = c.mask.bits(), penalty = c.score.total(), "mask candidate");
                }
                select_best(candidates)
                    .ok_or(EncodeError::MalformedSegmentTable { version, ec_level })?
            }
        };
        tracing::debug!(
            mask = chosen.mask.bits(),
            penalty = chosen.score.total(),
            "selected mask"
        );

        Ok(QRCode {
            version,
            error_correction: ec_level,
            mask_pattern: chosen.mask,
            modules: chosen.matrix,
            kinds,
        })
    }
}

fn capacity_bits(version: Version, ec_level: ECLevel) -> Result<usize, EncodeError> {
    num_data_codewords(version, ec_level)
        .map(|n| n * 8)
        .ok_or(EncodeError::MalformedSegmentTable { version, ec_level })
}

fn fits(segments: &[Segment], version: Version, capacity_bits: usize) -> bool {
    segments.iter().all(|s| s.fits_count_field(version))
        && total_bits(segments, version) <= capacity_bits
}
