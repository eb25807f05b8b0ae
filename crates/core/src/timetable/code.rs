use uuid::Uuid;

/// A caller-supplied code, classified by whether it is a canonical identity.
///
/// A raw code is an identity if and only if it parses as a UUID; everything
/// else is free text to be searched for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawCode {
    Identity(Uuid),
    Text(String),
}

impl RawCode {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match Uuid::parse_str(trimmed) {
            Ok(identity) => RawCode::Identity(identity),
            Err(_) => RawCode::Text(trimmed.to_string()),
        }
    }
}
