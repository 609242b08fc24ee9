//! Password strength meter shown on the sign-up form.

/// Score from 0 to 5 with a display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PasswordStrength {
    score: u8,
}

impl PasswordStrength {
    pub const MAX: u8 = 5;

    /// One point each for length of at least 8, an uppercase letter, a
    /// lowercase letter, a digit and a character outside `[A-Za-z0-9]`.
    pub fn of(password: &str) -> Self {
        if password.is_empty() {
            return Self { score: 0 };
        }

        let checks = [
            password.chars().count() >= 8,
            password.chars().any(|c| c.is_ascii_uppercase()),
            password.chars().any(|c| c.is_ascii_lowercase()),
            password.chars().any(|c| c.is_ascii_digit()),
            password.chars().any(|c| !c.is_ascii_alphanumeric()),
        ];
        Self {
            score: checks.iter().filter(|&&passed| passed).count() as u8,
        }
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    /// Empty for an empty password.
    pub fn label(&self) -> &'static str {
        match self.score {
            0 => "",
            1 => "Very Weak",
            2 => "Weak",
            3 => "Fair",
            4 => "Good",
            _ => "Strong",
        }
    }
}

impl std::fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} {}", self.score, Self::MAX, self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password_has_no_label() {
        let strength = PasswordStrength::of("");
        assert_eq!(strength.score(), 0);
        assert_eq!(strength.label(), "");
    }

    #[test]
    fn test_scores() {
        assert_eq!(PasswordStrength::of("abc").label(), "Very Weak");
        assert_eq!(PasswordStrength::of("abcDEF").label(), "Weak");
        assert_eq!(PasswordStrength::of("abcdefgH").label(), "Fair");
        assert_eq!(PasswordStrength::of("abcdefH1").label(), "Good");
        assert_eq!(PasswordStrength::of("Shine#2024").label(), "Strong");
    }

    #[test]
    fn test_unicode_counts_as_symbol() {
        // "é" is outside [A-Za-z0-9], so it scores as a symbol, not a lowercase letter.
        assert_eq!(PasswordStrength::of("é").score(), 1);
    }
}
