use crate::models::{BitMatrix, ModuleKind, ModuleMap, Version};

/// Function pattern layout for a specific QR version.
///
/// Holds the symbol with finder, separator, timing and alignment patterns drawn,
/// and the role of every module. Format and version areas are reserved (light)
/// and filled in after masking.
#[derive(Debug, Clone)]
pub struct FunctionMask {
    modules: BitMatrix,
    kinds: ModuleMap,
}

impl FunctionMask {
    pub fn new(version: Version) -> Self {
        let size = version.size();
        let mut this = Self {
            modules: BitMatrix::square(size),
            kinds: ModuleMap::new(size),
        };

        // Timing patterns (row 6 and column 6); finders overwrite the ends
        for i in 0..size {
            this.set_function(6, i, i % 2 == 0);
            this.set_function(i, 6, i % 2 == 0);
        }

        // Finder patterns + separators (9x9 areas centred on each finder, clipped to bounds)
        this.draw_finder(3, 3);
        this.draw_finder(size - 4, 3);
        this.draw_finder(3, size - 4);

        // Alignment patterns
        let align = alignment_pattern_positions(version);
        let last = align.len().saturating_sub(1);
        for (i, &cx) in align.iter().enumerate() {
            for (j, &cy) in align.iter().enumerate() {
                // Skip the three finder corners
                if (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0) {
                    continue;
                }
                this.draw_alignment(cx, cy);
            }
        }

        // Format info areas: around the top-left finder, then split between the
        // top-right and bottom-left finders
        for i in 0..9 {
            if i != 6 {
                this.kinds.set(8, i, ModuleKind::FormatInfo);
                this.kinds.set(i, 8, ModuleKind::FormatInfo);
            }
        }
        for i in 0..8 {
            this.kinds.set(size - 1 - i, 8, ModuleKind::FormatInfo);
        }
        for i in 0..7 {
            this.kinds.set(8, size - 1 - i, ModuleKind::FormatInfo);
        }

        // Dark module
        this.set_function(8, size - 8, true);

        // Version info (v7+): 6x3 above the bottom-left finder, 3x6 left of the top-right
        if version.has_version_info() {
            for a in 0..6 {
                for b in 0..3 {
                    this.kinds.set(size - 11 + b, a, ModuleKind::VersionInfo);
                    this.kinds.set(a, size - 11 + b, ModuleKind::VersionInfo);
                }
            }
        }

        this
    }

    pub fn size(&self) -> usize {
        self.modules.width()
    }

    pub fn is_function(&self, x: usize, y: usize) -> bool {
        !self.kinds.get(x, y).is_maskable()
    }

    pub fn kind(&self, x: usize, y: usize) -> ModuleKind {
        self.kinds.get(x, y)
    }

    /// Symbol with only function patterns drawn
    pub fn modules(&self) -> &BitMatrix {
        &self.modules
    }

    pub fn kinds(&self) -> &ModuleMap {
        &self.kinds
    }

    pub fn data_modules_count(&self) -> usize {
        self.kinds.count(ModuleKind::Data) + self.kinds.count(ModuleKind::Remainder)
    }

    /// Split into the function-pattern matrix and the role map
    pub fn into_parts(self) -> (BitMatrix, ModuleMap) {
        (self.modules, self.kinds)
    }

    fn set_function(&mut self, x: usize, y: usize, dark: bool) {
        self.modules.set(x, y, dark);
        self.kinds.set(x, y, ModuleKind::Function);
    }

    /// 7x7 finder centred on (cx, cy) with its one-module light separator
    fn draw_finder(&mut self, cx: usize, cy: usize) {
        for dy in -4i32..=4 {
            for dx in -4i32..=4 {
                let x = cx as i32 + dx;
                let y = cy as i32 + dy;
                if x < 0 || y < 0 || x as usize >= self.size() || y as usize >= self.size() {
                    continue;
                }
                let dist = dx.abs().max(dy.abs());
                self.set_function(x as usize, y as usize, dist != 2 && dist != 4);
            }
        }
    }

    /// 5x5 alignment pattern centred on (cx, cy)
    fn draw_alignment(&mut self, cx: usize, cy: usize) {
        for dy in -2i32..=2 {
            for dx in -2i32..=2 {
                let dist = dx.abs().max(dy.abs());
                let x = (cx as i32 + dx) as usize;
                let y = (cy as i32 + dy) as usize;
                self.set_function(x, y, dist != 1);
            }
        }
    }
}

/// Alignment pattern centre coordinates (used on both axes) for a given version.
pub fn alignment_pattern_positions(version: Version) -> Vec<usize> {
    let ver = version.number() as usize;
    if ver == 1 {
        return Vec::new();
    }
    let num_align = ver / 7 + 2;
    let size = version.size();
    let step = if ver == 32 {
        26
    } else {
        (ver * 4 + num_align * 2 + 1) / (num_align * 2 - 2) * 2
    };

    let mut positions = vec![0usize; num_align];
    positions[0] = 6;
    let mut pos = size - 7;
    for i in (1..num_align).rev() {
        positions[i] = pos;
        pos = pos.saturating_sub(step);
    }
    positions
}
