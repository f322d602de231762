//! Forwarding mode definitions

/// How a forwarding layer relays the pending operation beneath it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForwardingMode {
    /// Every layer suspends on its callee's result before returning its own
    Standard,
    /// Layers hand the pending operation through; only the innermost await
    /// suspends
    Optimized,
}

impl ForwardingMode {
    /// Parse mode from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" => Some(Self::Standard),
            "optimized" => Some(Self::Optimized),
            _ => None,
        }
    }

    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Optimized => "optimized",
        }
    }

    /// Suspension events a single call records for a chain of `depth`
    /// forwarding layers
    ///
    /// The data source always contributes one; standard mode adds one per
    /// layer on top of it.
    pub fn suspensions_per_call(&self, depth: usize) -> u64 {
        match self {
            Self::Standard => 1 + depth as u64,
            Self::Optimized => 1,
        }
    }
}

impl std::fmt::Display for ForwardingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
