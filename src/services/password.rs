use bcrypt::{hash, verify, DEFAULT_COST};

pub struct PasswordService;

impl PasswordService {
    pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
        hash(password, DEFAULT_COST)
    }

    /// Verification failures and malformed hashes both read as a mismatch.
    pub fn verify_password(password: &str, hashed: &str) -> bool {
        verify(password, hashed).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_original_password() {
        let hashed = PasswordService::hash_password("correct horse").unwrap();
        assert_ne!(hashed, "correct horse");
        assert!(PasswordService::verify_password("correct horse", &hashed));
    }

    #[test]
    fn wrong_password_is_rejected() {
        let hashed = PasswordService::hash_password("correct horse").unwrap();
        assert!(!PasswordService::verify_password("battery staple", &hashed));
    }

    #[test]
    fn malformed_hash_is_a_mismatch() {
        assert!(!PasswordService::verify_password("anything", "not-a-bcrypt-hash"));
    }
}
