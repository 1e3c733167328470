//! 비밀번호 해싱 및 강도 검증.
//!
//! Argon2id 기반 비밀번호 해싱. 솔트는 해시마다 무작위 생성되므로
//! 같은 비밀번호라도 매번 다른 해시가 나오며, 둘 다 검증 가능합니다.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// 비밀번호 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("비밀번호 해싱 실패")]
    HashingFailed,
    #[error("{0}")]
    TooWeak(&'static str),
}

/// 비밀번호 해싱.
///
/// Argon2id 알고리즘을 사용하며 PHC 형식의 해시 문자열(솔트 포함)을
/// 반환합니다.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| PasswordError::HashingFailed)?;

    Ok(hash.to_string())
}

/// 비밀번호 검증.
///
/// 저장된 해시와 입력된 비밀번호를 상수 시간 비교합니다.
/// 해시 형식이 잘못되어도 에러 대신 `false`를 반환합니다.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// 비밀번호 강도 검증.
///
/// 등록/재설정/변경 시 *새* 비밀번호에만 적용합니다.
///
/// # 요구사항
///
/// - 최소 8자 이상
/// - 대문자 / 소문자 / 숫자 각 1개 이상
pub fn validate_password_strength(password: &str) -> Result<(), PasswordError> {
    if password.chars().count() < 8 {
        return Err(PasswordError::TooWeak(
            "비밀번호는 최소 8자 이상이어야 합니다",
        ));
    }

    if !password.chars().any(|c| c.is_uppercase()) {
        return Err(PasswordError::TooWeak(
            "비밀번호에 최소 1개의 대문자가 포함되어야 합니다",
        ));
    }

    if !password.chars().any(|c| c.is_lowercase()) {
        return Err(PasswordError::TooWeak(
            "비밀번호에 최소 1개의 소문자가 포함되어야 합니다",
        ));
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordError::TooWeak(
            "비밀번호에 최소 1개의 숫자가 포함되어야 합니다",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let password = "Abc12345";
        let hash = hash_password(password).unwrap();

        // 해시 형식 확인 (argon2id)
        assert!(hash.starts_with("$argon2id$"));

        assert!(verify_password(password, &hash));
        assert!(!verify_password("Wrong12345", &hash));
    }

    #[test]
    fn test_same_password_different_hashes() {
        let hash1 = hash_password("Abc12345").unwrap();
        let hash2 = hash_password("Abc12345").unwrap();

        // 솔트가 다르므로 해시가 다름
        assert_ne!(hash1, hash2);

        // 하지만 둘 다 검증 가능
        assert!(verify_password("Abc12345", &hash1));
        assert!(verify_password("Abc12345", &hash2));
    }

    #[test]
    fn test_malformed_hash_returns_false() {
        // 잘못된 해시 형식은 에러가 아니라 false
        assert!(!verify_password("Abc12345", "not-a-valid-hash"));
        assert!(!verify_password("Abc12345", ""));
    }

    #[test]
    fn test_password_strength_rules() {
        // 유효한 비밀번호
        assert!(validate_password_strength("Abc12345").is_ok());
        assert!(validate_password_strength("Newuser123!").is_ok());

        // 너무 짧음
        assert!(validate_password_strength("Abc123").is_err());

        // 대문자 없음
        assert!(validate_password_strength("abc12345").is_err());

        // 소문자 없음
        assert!(validate_password_strength("ABC12345").is_err());

        // 숫자 없음
        assert!(validate_password_strength("Abcdefgh").is_err());

        // 빈 비밀번호
        assert!(validate_password_strength("").is_err());
    }
}
