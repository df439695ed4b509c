use rand::RngExt;

use crate::domain::repository::CodeGenerator;

const DIGITS: &[u8] = b"0123456789";

/// Thread-rng code source. Leading zeros are allowed, so a 5-digit code
/// covers the full 00000–99999 range.
#[derive(Clone, Copy, Default)]
pub struct RandCodeGenerator;

impl CodeGenerator for RandCodeGenerator {
    fn random_digits(&self, len: usize) -> String {
        let mut rng = rand::rng();
        (0..len)
            .map(|_| DIGITS[rng.random_range(0..DIGITS.len())] as char)
            .collect()
    }
}
