//! Mask application, penalty scoring and mask selection

use rayon::prelude::*;

use crate::encoder::format::FormatInfo;
use crate::models::{BitMatrix, ECLevel, MaskPattern, ModuleMap};

const PENALTY_N1: u32 = 3;
const PENALTY_N2: u32 = 3;
const PENALTY_N3: u32 = 40;
const PENALTY_N4: u32 = 10;

/// The four penalty terms of a masked symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PenaltyScore {
    /// Runs of five or more same-coloured modules in a row or column
    pub runs: u32,
    /// 2x2 blocks of one colour
    pub blocks: u32,
    /// 1:1:3:1:1 finder look-alikes with a four-module light border on one side
    pub finder_like: u32,
    /// Deviation of the dark share from 50%
    pub balance: u32,
}

impl PenaltyScore {
    pub fn total(&self) -> u32 {
        self.runs + self.blocks + self.finder_like + self.balance
    }
}

/// A masked symbol with format information written, ready to be scored or kept
#[derive(Debug, Clone)]
pub struct MaskCandidate {
    pub mask: MaskPattern,
    pub matrix: BitMatrix,
    pub score: PenaltyScore,
}

/// XOR `mask` into every data and remainder module; function modules are left alone
pub fn apply_mask(matrix: &mut BitMatrix, mask: MaskPattern, kinds: &ModuleMap) {
    let size = kinds.size();
    for y in 0..size {
        for x in 0..size {
            if kinds.get(x, y).is_maskable() && mask.is_masked(y, x) {
                matrix.toggle(x, y);
            }
        }
    }
}

/// Build the finalized symbol for one mask from an unmasked copy of `base`
pub fn build_candidate(
    base: &BitMatrix,
    kinds: &ModuleMap,
    ec_level: ECLevel,
    mask: MaskPattern,
) -> MaskCandidate {
    let mut matrix = base.clone();
    apply_mask(&mut matrix, mask, kinds);
    FormatInfo::new(ec_level, mask).write(&mut matrix);
    let score = penalty_score(&matrix);
    MaskCandidate {
        mask,
        matrix,
        score,
    }
}

/// Score all eight masks in parallel, returned in mask index order
pub fn evaluate_masks(base: &BitMatrix, kinds: &ModuleMap, ec_level: ECLevel) -> Vec<MaskCandidate> {
    MaskPattern::ALL
        .par_iter()
        .map(|&mask| build_candidate(base, kinds, ec_level, mask))
        .collect()
}

/// Lowest total penalty wins; ties go to the lowest mask index
pub fn select_best(candidates: Vec<MaskCandidate>) -> Option<MaskCandidate> {
    candidates
        .into_iter()
        .min_by_key(|c| (c.score.total(), c.mask.bits()))
}

/// Compute all penalty terms for a (square or rectangular) module matrix
pub fn penalty_score(matrix: &BitMatrix) -> PenaltyScore {
    let (w, h) = (matrix.width(), matrix.height());
    let rows = (0..h).map(|y| (0..w).map(move |x| (x, y)).collect::<Vec<_>>());
    let cols = (0..w).map(|x| (0..h).map(move |y| (x, y)).collect::<Vec<_>>());

    let mut runs = 0;
    let mut finder_like = 0;
    for line in rows.chain(cols) {
        let values: Vec<bool> = line.iter().map(|&(x, y)| matrix.get(x, y)).collect();
        runs += run_penalty(&values);
        finder_like += finder_penalty(&values);
    }

    PenaltyScore {
        runs,
        blocks: block_penalty(matrix),
        finder_like,
        balance: balance_penalty(matrix),
    }
}

fn run_penalty(line: &[bool]) -> u32 {
    let mut penalty = 0;
    let mut run = 0usize;
    for (i, &v) in line.iter().enumerate() {
        if i > 0 && v == line[i - 1] {
            run += 1;
        } else {
            run = 1;
        }
        if run == 5 {
            penalty += PENALTY_N1;
        } else if run > 5 {
            penalty += 1;
        }
    }
    penalty
}

fn block_penalty(matrix: &BitMatrix) -> u32 {
    let mut penalty = 0;
    for y in 1..matrix.height() {
        for x in 1..matrix.width() {
            let v = matrix.get(x, y);
            if v == matrix.get(x - 1, y) && v == matrix.get(x, y - 1) && v == matrix.get(x - 1, y - 1)
            {
                penalty += PENALTY_N2;
            }
        }
    }
    penalty
}

/// dark-light-dark-dark-dark-light-dark preceded or followed by four light modules.
/// Modules outside the symbol count as light.
fn finder_penalty(line: &[bool]) -> u32 {
    const CORE: [bool; 7] = [true, false, true, true, true, false, true];
    let light = |i: isize| i < 0 || i as usize >= line.len() || !line[i as usize];

    let mut penalty = 0;
    if line.len() < CORE.len() {
        return 0;
    }
    for start in 0..=line.len() - CORE.len() {
        if line[start..start + CORE.len()] != CORE {
            continue;
        }
        let s = start as isize;
        let before = (s - 4..s).all(light);
        let after = (s + 7..s + 11).all(light);
        if before || after {
            penalty += PENALTY_N3;
        }
    }
    penalty
}

/// 10 points per full 5% step away from a 50% dark share
fn balance_penalty(matrix: &BitMatrix) -> u32 {
    let total = matrix.width() * matrix.height();
    if total == 0 {
        return 0;
    }
    let dark = matrix.count_dark();
    let deviation = (dark * 2).abs_diff(total) * 10 / total;
    deviation as u32 * PENALTY_N4
}
