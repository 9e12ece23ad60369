//! Security utilities: OTP digests, code generation, and gateway
//! signature verification.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use eggcart_types::OtpCode;

/// Generates a uniformly random 6-digit code.
///
/// The range starts at 100000, so codes never carry a leading zero.
pub fn generate_otp() -> OtpCode {
    use rand::Rng;

    let n: u32 = rand::rng().random_range(100_000..=999_999);
    OtpCode::from_number(n)
}

/// Hashes an OTP code using SHA-256. Only this digest is ever stored.
pub fn hash_otp(code: &OtpCode) -> String {
    let hash = Sha256::digest(code.as_str().as_bytes());
    hex::encode(hash)
}

/// Verifies a submitted code against a stored digest using constant-time
/// comparison.
pub fn verify_otp_hash(code: &OtpCode, stored_hash: &str) -> bool {
    let input_hash = hash_otp(code);
    input_hash.as_bytes().ct_eq(stored_hash.as_bytes()).into()
}

/// Computes the gateway checkout signature: HMAC-SHA256 over the literal
/// payload `{order_id}|{payment_id}`, keyed by the gateway secret,
/// lowercase hex encoded.
pub fn payment_signature(order_id: &str, payment_id: &str, secret: &str) -> String {
    use hmac::{Hmac, Mac};

    type HmacSha256 = Hmac<Sha256>;

    let payload = format!("{}|{}", order_id, payment_id);
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies a submitted checkout signature using constant-time comparison.
pub fn verify_payment_signature(
    order_id: &str,
    payment_id: &str,
    signature: &str,
    secret: &str,
) -> bool {
    let expected = payment_signature(order_id, payment_id, secret);
    expected.as_bytes().ct_eq(signature.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_codes_are_six_digits() {
        for _ in 0..200 {
            let code = generate_otp();
            assert_eq!(code.as_str().len(), 6);
            let n: u32 = code.as_str().parse().unwrap();
            assert!((100_000..=999_999).contains(&n));
        }
    }

    #[test]
    fn test_otp_hashing_known_vector() {
        let code = OtpCode::parse("123456").unwrap();
        assert_eq!(
            hash_otp(&code),
            "8d969eef6ecad3c29a3a629280e686cf0c3f5d5a86aff3ca12020c923adc6c92"
        );
    }

    #[test]
    fn test_otp_verification() {
        let code = OtpCode::parse("654321").unwrap();
        let hash = hash_otp(&code);

        assert!(verify_otp_hash(&code, &hash));
        let wrong = OtpCode::parse("000000").unwrap();
        assert!(!verify_otp_hash(&wrong, &hash));
    }

    #[test]
    fn test_payment_signature_known_vector() {
        // HMAC-SHA256("o1|p1", key = "s"), lowercase hex
        assert_eq!(
            payment_signature("o1", "p1", "s"),
            "a23a35a9cc17304682813499f610ed21e20e5e98e04bc2fbe9a198a68b058546"
        );
    }

    #[test]
    fn test_payment_signature_verification() {
        let sig = payment_signature("order_x", "pay_y", "test_secret");
        assert!(verify_payment_signature("order_x", "pay_y", &sig, "test_secret"));
        assert!(!verify_payment_signature("order_x", "pay_y", &sig, "wrong_secret"));
        assert!(!verify_payment_signature("order_z", "pay_y", &sig, "test_secret"));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let sig = payment_signature("order_x", "pay_y", "test_secret");
        // Flip the last hex digit
        let mut tampered = sig.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == '0' { '1' } else { '0' });
        assert!(!verify_payment_signature(
            "order_x",
            "pay_y",
            &tampered,
            "test_secret"
        ));
    }
}
