/// Where a secret is loaded from
#[derive(Debug, Clone)]
pub enum SecretType {
    /// Environment variable
    EnvVar { name: String },
}

impl SecretType {
    pub fn name(&self) -> &str {
        match self {
            SecretType::EnvVar { name } => name,
        }
    }
}

/// Loading rules for a single secret
#[derive(Debug, Clone)]
pub struct SecretConfig {
    pub secret_type: SecretType,
    /// Missing required secrets abort startup
    pub required: bool,
    /// Minimum length (None = no minimum)
    pub min_length: Option<usize>,
}

impl SecretConfig {
    pub fn env_var(name: &str) -> Self {
        Self {
            secret_type: SecretType::EnvVar {
                name: name.to_string(),
            },
            required: true,
            min_length: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    pub fn name(&self) -> &str {
        self.secret_type.name()
    }
}
