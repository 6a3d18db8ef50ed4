//! Room code generation.
//!
//! Room codes are 4-character strings over the uppercase alphanumeric
//! alphabet. With ~1.7M possible codes, collisions are likely enough at
//! scale that callers must check the store and regenerate on a hit; see
//! `services::rooms`.

use rand::Rng;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a room code.
pub const CODE_LEN: usize = 4;

/// Generate a candidate room code.
///
/// Uniqueness is NOT guaranteed here; the room registry retries against the
/// store until an unused code comes up.
pub fn generate_room_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut code = String::with_capacity(CODE_LEN);
    for _ in 0..CODE_LEN {
        let idx = rng.random_range(0..ALPHABET.len());
        code.push(ALPHABET[idx] as char);
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_code_has_correct_length() {
        let mut rng = rand::rng();
        let code = generate_room_code(&mut rng);
        assert_eq!(code.len(), CODE_LEN);
    }

    #[test]
    fn test_room_code_uses_uppercase_alphanumerics_only() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let code = generate_room_code(&mut rng);
            assert!(code
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_room_code_is_deterministic_under_a_seeded_rng() {
        use rand::SeedableRng;
        let mut a = rand_chacha::ChaCha8Rng::seed_from_u64(7);
        let mut b = rand_chacha::ChaCha8Rng::seed_from_u64(7);
        assert_eq!(generate_room_code(&mut a), generate_room_code(&mut b));
    }
}
