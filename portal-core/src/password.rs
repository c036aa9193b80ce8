use std::fmt::Display;

const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Strength {
    Weak = 1,
    Fair = 2,
    Good = 3,
    Strong = 4,
}

impl Strength {
    pub fn score(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            Strength::Weak => "Fraca",
            Strength::Fair => "Média",
            Strength::Good => "Boa",
            Strength::Strong => "Forte",
        }
    }
}

impl Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}/4)", self.label(), self.score())
    }
}

/// Rates a password; an empty one has no strength at all.
pub fn strength(password: &str) -> Option<Strength> {
    if password.is_empty() {
        return None;
    }
    let checks = [
        password.chars().count() >= 8,
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(char::is_lowercase) && password.chars().any(char::is_uppercase),
        password.chars().any(|c| SPECIAL_CHARS.contains(c)),
    ];
    let score = checks.iter().filter(|&&passed| passed).count();
    Some(match score {
        0 | 1 => Strength::Weak,
        2 => Strength::Fair,
        3 => Strength::Good,
        _ => Strength::Strong,
    })
}
