use std::fmt;
use std::str::FromStr;

use memsim_error::{errconfig, errinput, Error};
use serde::{Deserialize, Serialize};

use super::{FifoReplacer, LruReplacer, OptimalReplacer, ReferenceString, Replacer};
use crate::typedef::PageKey;
use crate::Result;

/// The page-replacement policies the simulator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    Fifo,
    Lru,
    /// Needs the whole reference string up front.
    Optimal,
}

impl Policy {
    pub const ALL: [Policy; 3] = [Policy::Fifo, Policy::Lru, Policy::Optimal];

    /// Returns true for policies that need to see future references.
    pub fn needs_lookahead(&self) -> bool {
        matches!(self, Policy::Optimal)
    }

    /// Builds a fresh replacer for this policy. `lookahead` is required for [`Policy::Optimal`]
    /// and ignored otherwise.
    pub fn build_replacer<P: PageKey>(
        self,
        lookahead: Option<&[P]>,
    ) -> Result<Box<dyn Replacer<P>>> {
        match self {
            Policy::Fifo => Ok(Box::new(FifoReplacer::new())),
            Policy::Lru => Ok(Box::new(LruReplacer::new())),
            Policy::Optimal => match lookahead {
                Some(references) => Ok(Box::new(OptimalReplacer::new(ReferenceString::from(
                    references,
                )))),
                None => errconfig!("the optimal policy needs the full reference string"),
            },
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Fifo => write!(f, "FIFO"),
            Policy::Lru => write!(f, "LRU"),
            Policy::Optimal => write!(f, "Optimal"),
        }
    }
}

impl FromStr for Policy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" => Ok(Policy::Fifo),
            "lru" => Ok(Policy::Lru),
            "optimal" | "opt" => Ok(Policy::Optimal),
            other => errinput!("unknown replacement policy '{}'", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_str() {
        assert_eq!(Ok(Policy::Fifo), "fifo".parse());
        assert_eq!(Ok(Policy::Lru), " LRU ".parse());
        assert_eq!(Ok(Policy::Optimal), "opt".parse());
        assert!(matches!("clock".parse::<Policy>(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_policy_display_round_trips_through_from_str() {
        for policy in Policy::ALL {
            assert_eq!(Ok(policy), policy.to_string().parse());
        }
    }

    #[test]
    fn test_build_replacer() {
        let fifo = Policy::Fifo.build_replacer::<u32>(None).unwrap();
        assert_eq!(Policy::Fifo, fifo.policy());

        let lru = Policy::Lru.build_replacer::<u32>(None).unwrap();
        assert_eq!(Policy::Lru, lru.policy());

        let trace = [1u32, 2, 3];
        let optimal = Policy::Optimal.build_replacer(Some(&trace[..])).unwrap();
        assert_eq!(Policy::Optimal, optimal.policy());
    }

    #[test]
    fn test_optimal_without_lookahead_is_rejected() {
        let result = Policy::Optimal.build_replacer::<u32>(None);
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
        assert!(Policy::Optimal.needs_lookahead());
        assert!(!Policy::Lru.needs_lookahead());
    }
}
