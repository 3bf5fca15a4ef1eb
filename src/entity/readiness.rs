use std::fmt;

/// Deployment state of an exchange contract as seen by the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessStatus {
    NotDeployed,
    NotReady,
    Ready,
}

impl ReadinessStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl fmt::Display for ReadinessStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::NotDeployed => write!(f, "NOT_DEPLOYED"),
            Self::NotReady => write!(f, "NOT_READY"),
            Self::Ready => write!(f, "READY"),
        }
    }
}
