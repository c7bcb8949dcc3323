use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::MalformedActions;

/// The connection guarantee a user-data permission requires.
///
/// `NONE` is not a variant: it parses to `None` and is equivalent to omitting
/// the transport type altogether.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransportType {
    /// Data integrity must be protected.
    Integral,
    /// Data confidentiality must be protected.
    Confidential,
}

impl TransportType {
    /// Parse `INTEGRAL`, `CONFIDENTIAL` or `NONE`, ignoring ASCII case.
    pub fn parse(value: &str) -> Result<Option<Self>, MalformedActions> {
        if value.eq_ignore_ascii_case("INTEGRAL") {
            Ok(Some(Self::Integral))
        } else if value.eq_ignore_ascii_case("CONFIDENTIAL") {
            Ok(Some(Self::Confidential))
        } else if value.eq_ignore_ascii_case("NONE") {
            Ok(None)
        } else {
            Err(MalformedActions::UnknownTransport {
                transport: value.to_string(),
            })
        }
    }

    /// The canonical upper-case keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integral => "INTEGRAL",
            Self::Confidential => "CONFIDENTIAL",
        }
    }
}

impl FromStr for TransportType {
    type Err = MalformedActions;

    /// Unlike [`TransportType::parse`], `NONE` is an error here since it has
    /// no variant.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)?.ok_or_else(|| MalformedActions::UnknownTransport {
            transport: value.to_string(),
        })
    }
}

impl Display for TransportType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_parses_transport_keywords() {
        assert_eq!(TransportType::parse("INTEGRAL"), Ok(Some(TransportType::Integral)));
        assert_eq!(TransportType::parse("confidential"), Ok(Some(TransportType::Confidential)));
        assert_eq!(TransportType::parse("NONE"), Ok(None));
        assert_eq!(TransportType::parse("none"), Ok(None));
        assert_eq!(
            TransportType::parse("SECRET"),
            Err(MalformedActions::UnknownTransport {
                transport: "SECRET".into()
            })
        );
        assert!(TransportType::parse("").is_err());
    }

    #[test]
    fn it_has_no_variant_for_none() {
        assert!("NONE".parse::<TransportType>().is_err());
        assert_eq!("INTEGRAL".parse::<TransportType>(), Ok(TransportType::Integral));
        assert_eq!(TransportType::Confidential.to_string(), "CONFIDENTIAL");
    }
}
