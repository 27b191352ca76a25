use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Name not found in the asset registry.
    UnknownAsset(String),
    NoAssets,
    /// A resolved asset came back from loading without a series.
    MissingSeries(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EngineError::UnknownAsset(name) => write!(f, "unknown asset: {}", name),
            EngineError::NoAssets => write!(f, "no assets selected"),
            EngineError::MissingSeries(name) => write!(f, "no series loaded for {}", name),
        }
    }
}

impl Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_asset() {
        assert_eq!(
            EngineError::UnknownAsset("Dogecoin".to_string()).to_string(),
            "unknown asset: Dogecoin"
        );
        assert_eq!(
            EngineError::MissingSeries("Gold".to_string()).to_string(),
            "no series loaded for Gold"
        );
    }
}
