//! Delivery mode of a session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionType {
    #[serde(rename = "online")]
    Online,
    #[serde(rename = "in-person")]
    InPerson,
}

impl SessionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::Online => "online",
            SessionType::InPerson => "in-person",
        }
    }

    /// Online sessions receive a meeting link on confirmation.
    pub fn needs_meeting_link(&self) -> bool {
        matches!(self, SessionType::Online)
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(SessionType::Online),
            "in-person" | "in_person" => Ok(SessionType::InPerson),
            other => Err(ValidationError::invalid_format(
                "type",
                format!("unknown session type '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_person_uses_hyphenated_wire_name() {
        assert_eq!(serde_json::to_string(&SessionType::InPerson).unwrap(), "\"in-person\"");
        let parsed: SessionType = serde_json::from_str("\"in-person\"").unwrap();
        assert_eq!(parsed, SessionType::InPerson);
    }

    #[test]
    fn from_str_accepts_underscore_alias() {
        assert_eq!("in_person".parse::<SessionType>().unwrap(), SessionType::InPerson);
        assert!("phone".parse::<SessionType>().is_err());
    }

    #[test]
    fn only_online_needs_a_link() {
        assert!(SessionType::Online.needs_meeting_link());
        assert!(!SessionType::InPerson.needs_meeting_link());
    }
}
