use crate::error::{QaoaError, Result};
use serde::{Deserialize, Serialize};

/// Which collaborator supplies the permutation used for odd layer counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermutationMode {
    /// Routing metadata (or swap gates) of the cost layer.
    #[default]
    Routing,
    /// Layout handed over by the pipeline.
    Layout,
}

/// Settings for one ansatz assembly.
///
/// # Examples
///
/// ```
/// use qaoa_swap::qaoa::{PermutationMode, QaoaConfig};
///
/// let config = QaoaConfig::from_json(r#"{"num_qubits": 4, "num_layers": 3}"#).unwrap();
/// assert_eq!(config.gamma_name, "γ");
/// assert_eq!(config.permutation_mode, PermutationMode::Routing);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QaoaConfig {
    /// Width of the ansatz register, also the number of classical bits.
    pub num_qubits: usize,
    /// Number of (cost, mixer) repetitions.
    pub num_layers: usize,
    /// Base name of the cost-angle vector.
    pub gamma_name: String,
    /// Base name of the mixer-angle vector.
    pub beta_name: String,
    pub permutation_mode: PermutationMode,
}

impl Default for QaoaConfig {
    fn default() -> Self {
        Self {
            num_qubits: 0,
            num_layers: 1,
            gamma_name: "γ".to_string(),
            beta_name: "β".to_string(),
            permutation_mode: PermutationMode::Routing,
        }
    }
}

impl QaoaConfig {
    pub fn new(num_qubits: usize, num_layers: usize) -> Self {
        Self {
            num_qubits,
            num_layers,
            ..Self::default()
        }
    }

    pub fn with_gamma_name(mut self, name: impl Into<String>) -> Self {
        self.gamma_name = name.into();
        self
    }

    pub fn with_beta_name(mut self, name: impl Into<String>) -> Self {
        self.beta_name = name.into();
        self
    }

    pub fn with_permutation_mode(mut self, mode: PermutationMode) -> Self {
        self.permutation_mode = mode;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| QaoaError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_qubits == 0 {
            return Err(QaoaError::EmptyRegister);
        }
        if self.gamma_name.is_empty() || self.beta_name.is_empty() {
            return Err(QaoaError::Config(
                "parameter vector names must not be empty".to_string(),
            ));
        }
        if self.gamma_name == self.beta_name {
            return Err(QaoaError::Config(format!(
                "cost and mixer angles share the name '{}'",
                self.gamma_name
            )));
        }
        Ok(())
    }
}
