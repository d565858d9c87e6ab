//! Generation gate: the threshold policy deciding whether a low-scoring
//! match may still proceed to generation.

/// Match percent below which generation is blocked unless forced.
pub const MATCH_THRESHOLD: u32 = 40;

/// Outcome of the gate check. `Block` carries the offending percent so the
/// caller can render a warning and offer the escalation choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Block { percent: u32 },
}

/// Decides whether generation may proceed for the given match percent.
/// `force` is the explicit user override and wins unconditionally.
/// Stateless and total.
pub fn decide(percent: u32, force: bool) -> GateDecision {
    if percent >= MATCH_THRESHOLD || force {
        GateDecision::Allow
    } else {
        GateDecision::Block { percent }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_iff_below_threshold_and_not_forced() {
        for percent in [0, 39, 40, 41, 100] {
            for force in [false, true] {
                let decision = decide(percent, force);
                if percent < MATCH_THRESHOLD && !force {
                    assert_eq!(decision, GateDecision::Block { percent });
                } else {
                    assert_eq!(decision, GateDecision::Allow, "percent={percent} force={force}");
                }
            }
        }
    }

    #[test]
    fn test_block_carries_the_blocking_percent() {
        assert_eq!(decide(25, false), GateDecision::Block { percent: 25 });
    }

    #[test]
    fn test_force_overrides_zero_percent() {
        assert_eq!(decide(0, true), GateDecision::Allow);
    }
}
