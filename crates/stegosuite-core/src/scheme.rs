use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StegoSuiteError;

/// Embedding scheme executed by the transformation service.
///
/// The client performs no scheme specific logic, the selection is passed
/// through as its wire code. Decoding has to use the same scheme that was
/// used for encoding, the service does not auto-detect it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Least Significant Bit-Matching
    Lsbm,
    /// Edge Region Data Embedding
    Erde,
    /// Discrete Cosine Transform domain
    #[default]
    Dct,
    /// Pixel Value Differencing
    Pvd,
}

impl Scheme {
    /// All schemes in the order they are offered to the user
    pub const ALL: [Scheme; 4] = [Scheme::Lsbm, Scheme::Erde, Scheme::Dct, Scheme::Pvd];

    /// Short lowercase identifier sent in the `scheme` form field
    pub fn code(&self) -> &'static str {
        match self {
            Scheme::Lsbm => "lsbm",
            Scheme::Erde => "erde",
            Scheme::Dct => "dct",
            Scheme::Pvd => "pvd",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Scheme::Lsbm => "Least Significant Bit-Matching (LSB-M)",
            Scheme::Erde => "Edge Region Data Embedding (ERDE)",
            Scheme::Dct => "Discrete Cosine Transform (DCT)",
            Scheme::Pvd => "Pixel Value Differencing (PVD)",
        }
    }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Scheme {
    type Err = StegoSuiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        Scheme::ALL
            .into_iter()
            .find(|scheme| scheme.code() == code)
            .ok_or_else(|| StegoSuiteError::UnknownScheme(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_dct() {
        assert_eq!(Scheme::default(), Scheme::Dct);
    }

    #[test]
    fn should_parse_wire_codes_case_insensitive() {
        assert_eq!("lsbm".parse::<Scheme>().unwrap(), Scheme::Lsbm);
        assert_eq!("ERDE".parse::<Scheme>().unwrap(), Scheme::Erde);
        assert_eq!(" Pvd ".parse::<Scheme>().unwrap(), Scheme::Pvd);
    }

    #[test]
    fn should_reject_unknown_codes() {
        match "lsb".parse::<Scheme>() {
            Err(StegoSuiteError::UnknownScheme(code)) => assert_eq!(code, "lsb"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn codes_and_labels_are_distinct() {
        for (i, a) in Scheme::ALL.iter().enumerate() {
            for b in &Scheme::ALL[i + 1..] {
                assert_ne!(a.code(), b.code());
                assert_ne!(a.label(), b.label());
            }
        }
    }

    #[test]
    fn should_display_as_wire_code() {
        assert_eq!(Scheme::Dct.to_string(), "dct");
        assert_eq!(format!("{}", Scheme::Lsbm), "lsbm");
    }
}
