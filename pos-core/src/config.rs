//! Parâmetros do decodificador.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Probabilidade de emissão usada quando nem a palavra nem a sua classe de
/// sufixo foram vistas com a tag candidata.
pub const DEFAULT_UNSEEN_EMISSION: f64 = 0.001;

/// Configuração do Viterbi.
///
/// `unseen_emission` é a única suavização do modelo. Com o valor padrão
/// (`0.001`) uma palavra inédita ainda pode receber qualquer tag, mas uma tag
/// já observada com a palavra (ou com a classe dela) quase sempre vence.
/// Com `0.0` combinações inéditas são podadas e a sentença pode ficar sem
/// etiquetagem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    pub unseen_emission: f64,
}

impl DecoderConfig {
    pub fn new(unseen_emission: f64) -> Result<Self> {
        let config = Self { unseen_emission };
        config.validate()?;
        Ok(config)
    }

    /// Rejeita valores fora de `[0, 1]` (inclusive NaN).
    pub fn validate(&self) -> Result<()> {
        if (0.0..=1.0).contains(&self.unseen_emission) {
            Ok(())
        } else {
            Err(Error::InvalidConfig(format!(
                "unseen_emission must be within [0, 1], got {}",
                self.unseen_emission
            )))
        }
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            unseen_emission: DEFAULT_UNSEEN_EMISSION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_unseen_emission() {
        assert_eq!(DecoderConfig::default().unseen_emission, 0.001);
    }

    #[test]
    fn test_validation() {
        assert!(DecoderConfig::new(0.0).is_ok());
        assert!(DecoderConfig::new(0.5).is_ok());
        assert!(DecoderConfig::new(1.5).is_err());
        assert!(DecoderConfig::new(-0.1).is_err());
        assert!(DecoderConfig::new(f64::NAN).is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DecoderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, DecoderConfig::default());
    }
}
