#![forbid(unsafe_code)]

//! Global ownership arbitration between responders sharing one input stream.
//!
//! Recognizers whose props carry an ownership predicate ask for exclusive
//! ownership when their drag threshold is crossed. The arbiter decides.
//!
//! - [`ArbitrationMode::FirstWins`]: granted when nobody owns the stream or
//!   the requester already does.
//! - [`ArbitrationMode::LastWins`]: always granted; the previous owner is
//!   displaced.
//!
//! Releases are scoped to the caller: a responder cannot release ownership it
//! does not hold.

use std::cell::RefCell;
use std::rc::Rc;

/// Identity of one responder registered with a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResponderId(pub u32);

/// Policy for contested ownership requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "config",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum ArbitrationMode {
    #[default]
    FirstWins,
    LastWins,
}

impl ArbitrationMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstWins => "first-wins",
            Self::LastWins => "last-wins",
        }
    }
}

/// Result of one ownership request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipDecision {
    /// The stream was free.
    Granted,
    /// The requester already owned the stream.
    AlreadyOwner,
    /// Granted by taking ownership from `previous`.
    Displaced { previous: ResponderId },
    /// Refused; `owner` keeps the stream.
    Denied { owner: ResponderId },
}

impl OwnershipDecision {
    #[inline]
    #[must_use]
    pub const fn is_granted(self) -> bool {
        !matches!(self, Self::Denied { .. })
    }
}

/// Counters for arbitration outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArbiterStats {
    pub grants: u64,
    pub denials: u64,
    pub displacements: u64,
    pub releases: u64,
}

/// Single owner of the global input stream.
#[derive(Debug, Clone, Default)]
pub struct OwnershipArbiter {
    mode: ArbitrationMode,
    owner: Option<ResponderId>,
    stats: ArbiterStats,
}

/// Arbiter shared by every host on one thread.
pub type SharedArbiter = Rc<RefCell<OwnershipArbiter>>;

impl OwnershipArbiter {
    #[must_use]
    pub const fn new(mode: ArbitrationMode) -> Self {
        Self {
            mode,
            owner: None,
            stats: ArbiterStats {
                grants: 0,
                denials: 0,
                displacements: 0,
                releases: 0,
            },
        }
    }

    /// Wrap a new arbiter for sharing between hosts.
    #[must_use]
    pub fn shared(mode: ArbitrationMode) -> SharedArbiter {
        Rc::new(RefCell::new(Self::new(mode)))
    }

    #[inline]
    #[must_use]
    pub const fn mode(&self) -> ArbitrationMode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub const fn owner(&self) -> Option<ResponderId> {
        self.owner
    }

    #[inline]
    #[must_use]
    pub fn is_owner(&self, id: ResponderId) -> bool {
        self.owner == Some(id)
    }

    #[inline]
    #[must_use]
    pub const fn stats(&self) -> ArbiterStats {
        self.stats
    }

    /// Ask for exclusive ownership on behalf of `id`.
    pub fn request(&mut self, id: ResponderId) -> OwnershipDecision {
        let decision = match (self.owner, self.mode) {
            (None, _) => OwnershipDecision::Granted,
            (Some(owner), _) if owner == id => OwnershipDecision::AlreadyOwner,
            (Some(previous), ArbitrationMode::LastWins) => OwnershipDecision::Displaced { previous },
            (Some(owner), ArbitrationMode::FirstWins) => OwnershipDecision::Denied { owner },
        };

        match decision {
            OwnershipDecision::Denied { .. } => self.stats.denials += 1,
            OwnershipDecision::Displaced { .. } => {
                self.stats.displacements += 1;
                self.stats.grants += 1;
                self.owner = Some(id);
            }
            OwnershipDecision::Granted | OwnershipDecision::AlreadyOwner => {
                self.stats.grants += 1;
                self.owner = Some(id);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            responder = id.0,
            mode = self.mode.as_str(),
            decision = ?decision,
            "ownership request decided"
        );

        decision
    }

    /// Release ownership held by `id`. Returns whether anything was released.
    pub fn release(&mut self, id: ResponderId) -> bool {
        if self.owner != Some(id) {
            return false;
        }
        self.owner = None;
        self.stats.releases += 1;

        #[cfg(feature = "tracing")]
        tracing::debug!(responder = id.0, "ownership released");

        true
    }
}
