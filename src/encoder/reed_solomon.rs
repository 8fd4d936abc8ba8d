/// Reed-Solomon error correction for QR codes
/// QR codes use RS over GF(256) with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
/// GF(256) field operations using log/exp tables
pub struct Gf256;

const PRIMITIVE_POLY: u16 = 0x11D;

const fn build_exp_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut value: u16 = 1;
    let mut i = 0;
    while i < 255 {
        table[i] = value as u8;
        value <<= 1;
        if value & 0x100 != 0 {
            value ^= PRIMITIVE_POLY;
        }
        i += 1;
    }
    // alpha^255 == alpha^0
    table[255] = 1;
    table
}

const fn build_log_table(exp: &[u8; 256]) -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[exp[i] as usize] = i as u8;
        i += 1;
    }
    table
}

const EXP: [u8; 256] = build_exp_table();

// Built at compile time, read-only afterwards.
static EXP_TABLE: [u8; 256] = EXP;
static LOG_TABLE: [u8; 256] = build_log_table(&EXP);

impl Gf256 {
    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let log_a = LOG_TABLE[a as usize] as usize;
        let log_b = LOG_TABLE[b as usize] as usize;
        EXP_TABLE[(log_a + log_b) % 255]
    }

    /// alpha^n for the primitive element alpha = 2
    pub fn exp(n: usize) -> u8 {
        EXP_TABLE[n % 255]
    }
}

/// Reed-Solomon encoder for a fixed number of error correction codewords
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReedSolomonEncoder {
    /// Generator polynomial coefficients without the leading 1, highest degree first
    divisor: Vec<u8>,
}

impl ReedSolomonEncoder {
    /// Generator polynomial has roots alpha^0 .. alpha^(num_ecc_codewords-1).
    pub fn new(num_ecc_codewords: usize) -> Self {
        let degree = num_ecc_codewords;
        let mut divisor = vec![0u8; degree];
        if let Some(last) = divisor.last_mut() {
            *last = 1;
        }

        // Multiply by (x - alpha^i) for each root, dropping the implicit leading term
        for i in 0..degree {
            let root = Gf256::exp(i);
            for j in 0..degree {
                divisor[j] = Gf256::mul(divisor[j], root);
                if j + 1 < degree {
                    divisor[j] ^= divisor[j + 1];
                }
            }
        }
        Self { divisor }
    }

    pub fn num_ecc_codewords(&self) -> usize {
        self.divisor.len()
    }

    /// Remainder of `data * x^n` divided by the generator: the EC codewords
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        let n = self.divisor.len();
        let mut remainder = vec![0u8; n];
        if n == 0 {
            return remainder;
        }
        for &d in data {
            let factor = d ^ remainder[0];
            remainder.rotate_left(1);
            remainder[n - 1] = 0;
            for (r, &coeff) in remainder.iter_mut().zip(&self.divisor) {
                *r ^= Gf256::mul(coeff, factor);
            }
        }
        remainder
    }
}
