use std::fmt::Display;

use validator::validate_email;

/// `From` header value, either `addr@domain` or `Display Name <addr@domain>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderEmail(String);

impl SenderEmail {
    pub fn parse(s: String) -> Result<Self, String> {
        let address = match (s.rfind('<'), s.rfind('>')) {
            (Some(open), Some(close)) if open < close && close == s.trim_end().len() - 1 => {
                &s[open + 1..close]
            }
            (None, None) => s.trim(),
            _ => return Err(format!("{:?} is not a valid sender", s)),
        };

        match validate_email(address) {
            true => Ok(Self(s.trim().to_owned())),
            false => Err(format!("{:?} is not a valid sender", s)),
        }
    }
}

impl Display for SenderEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SenderEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
