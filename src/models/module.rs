/// Role of a single module in the symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModuleKind {
    /// Finder, separator, timing, alignment patterns and the fixed dark module
    Function,
    /// One of the two 15-bit format information copies
    FormatInfo,
    /// One of the two 18-bit version information blocks (version 7+)
    VersionInfo,
    /// Carries a data or error correction codeword bit
    #[default]
    Data,
    /// Data-region module past the last codeword (remainder bits, always 0 before masking)
    Remainder,
}

impl ModuleKind {
    /// Whether a mask pattern applies to this module
    pub fn is_maskable(self) -> bool {
        matches!(self, ModuleKind::Data | ModuleKind::Remainder)
    }
}

/// Per-module role map for one symbol, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMap {
    size: usize,
    kinds: Vec<ModuleKind>,
}

impl ModuleMap {
    /// All modules start out as data modules
    pub fn new(size: usize) -> Self {
        Self {
            size,
            kinds: vec![ModuleKind::Data; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Role of module (x, y); out-of-range coordinates report `Function`
    pub fn get(&self, x: usize, y: usize) -> ModuleKind {
        if x >= self.size || y >= self.size {
            return ModuleKind::Function;
        }
        self.kinds[y * self.size + x]
    }

    pub fn set(&mut self, x: usize, y: usize, kind: ModuleKind) {
        if x < self.size && y < self.size {
            self.kinds[y * self.size + x] = kind;
        }
    }

    /// Number of modules with the given role
    pub fn count(&self, kind: ModuleKind) -> usize {
        self.kinds.iter().filter(|&&k| k == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_map_defaults_to_data() {
        let mut map = ModuleMap::new(21);
        assert_eq!(map.count(ModuleKind::Data), 441);
        map.set(0, 0, ModuleKind::Function);
        map.set(30, 0, ModuleKind::FormatInfo); // ignored
        assert_eq!(map.get(0, 0), ModuleKind::Function);
        assert_eq!(map.get(21, 0), ModuleKind::Function);
        assert_eq!(map.count(ModuleKind::FormatInfo), 0);
        assert!(!map.get(0, 0).is_maskable());
        assert!(map.get(1, 1).is_maskable());
        assert!(ModuleKind::Remainder.is_maskable());
    }
}
