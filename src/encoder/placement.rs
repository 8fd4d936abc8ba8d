/// Data placement into the QR matrix following the zigzag pattern
use crate::encoder::bitstream::BitBuffer;
use crate::encoder::function_mask::FunctionMask;
use crate::models::{BitMatrix, ModuleKind, ModuleMap};

/// Write `bits` into every data module of `func`'s layout.
///
/// Column pairs are visited right to left (column 6 is skipped as a whole),
/// alternating upward and downward, right column before left within a row.
/// Bits at index `codeword_bits` and beyond are remainder bits; their modules
/// are tagged [`ModuleKind::Remainder`]. Returns the matrix and the role map.
pub fn place_bits(
    func: FunctionMask,
    bits: &BitBuffer,
    codeword_bits: usize,
) -> (BitMatrix, ModuleMap) {
    let (mut matrix, mut kinds) = func.into_parts();
    let order = placement_order(&kinds);
    debug_assert_eq!(order.len(), bits.len());

    for (idx, &(x, y)) in order.iter().enumerate() {
        matrix.set(x, y, bits.get(idx));
        if idx >= codeword_bits {
            kinds.set(x, y, ModuleKind::Remainder);
        }
    }
    (matrix, kinds)
}

/// Data module coordinates `(x, y)` in placement order
pub fn placement_order(kinds: &ModuleMap) -> Vec<(usize, usize)> {
    let dimension = kinds.size();
    let mut order = Vec::with_capacity(dimension * dimension);
    let mut upward = true;
    let mut col = dimension as i32 - 1;
    while col > 0 {
        if col == 6 {
            col -= 1;
            continue;
        }
        for step in 0..dimension {
            let row = if upward { dimension - 1 - step } else { step };
            for c in [col as usize, col as usize - 1] {
                if kinds.get(c, row).is_maskable() {
                    order.push((c, row));
                }
            }
        }
        upward = !upward;
        col -= 2;
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Version;

    #[test]
    fn test_first_codeword_in_bottom_right() {
        let func = FunctionMask::new(Version::MIN);
        let mut bits = BitBuffer::new();
        bits.append_bits(0b1011_0001, 8);
        for _ in 8..func.data_modules_count() {
            bits.push(false);
        }
        let (m, _) = place_bits(func, &bits, 208);
        // Upward from (20,20): (20,20) (19,20) (20,19) (19,19) ...
        assert!(m.get(20, 20));
        assert!(!m.get(19, 20));
        assert!(m.get(20, 19));
        assert!(m.get(19, 19));
        assert!(!m.get(20, 18));
        assert!(!m.get(19, 18));
        assert!(!m.get(20, 17));
        assert!(m.get(19, 17));
    }

    #[test]
    fn test_function_modules_untouched() {
        let func = FunctionMask::new(Version::new(2).unwrap());
        let before = func.modules().clone();
        let n = func.data_modules_count();
        let mut bits = BitBuffer::new();
        for _ in 0..n {
            bits.push(true);
        }
        let (m, kinds) = place_bits(func, &bits, n - 7);
        for y in 0..25 {
            for x in 0..25 {
                match kinds.get(x, y) {
                    ModuleKind::Data | ModuleKind::Remainder => assert!(m.get(x, y)),
                    _ => assert_eq!(m.get(x, y), before.get(x, y)),
                }
            }
        }
        assert_eq!(kinds.count(ModuleKind::Remainder), 7);
    }

    #[test]
    fn test_order_covers_every_data_module_once() {
        let func = FunctionMask::new(Version::new(7).unwrap());
        let order = placement_order(func.kinds());
        assert_eq!(order.len(), func.data_modules_count());
        let mut seen = std::collections::HashSet::new();
        assert!(order.iter().all(|p| seen.insert(*p)));
        assert_eq!(order[0], (44, 44));
    }
}
