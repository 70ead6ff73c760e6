use rand::Rng;

/// Uppercase letters and digits without the look-alikes I, O, 0 and 1.
pub const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

pub const CODE_LEN: usize = 6;

/// Draws a quiz code uniformly from [`ALPHABET`], with replacement.
pub fn generate_quiz_code() -> String {
    let mut rng = rand::thread_rng();
    let mut output = String::with_capacity(CODE_LEN);
    for _ in 0..CODE_LEN {
        let index = rng.gen_range(0..ALPHABET.len());
        output.push(ALPHABET[index] as char);
    }
    output
}
