//! Execution gate: answer, bond and time-window checks.
//!
//! Every check reads the clock value passed in; nothing here waits.

use crate::config::ModuleConfig;
use crate::variant::ModuleVariant;
use crate::ModuleError;
use alloy_primitives::U256;
use gate_oracle::Oracle;
use gate_types::{QuestionId, Timestamp};
use gate_utils::format_duration;
use tracing::debug;

/// Check that the oracle resolved `question_id` to yes with enough bond, that
/// the cooldown after finalization is over and, where the variant applies
/// it, that the answer has not expired.
pub fn check_resolved_answer<O: Oracle>(
    oracle: &O,
    question_id: &QuestionId,
    config: &ModuleConfig,
    variant: ModuleVariant,
    now: Timestamp,
) -> Result<(), ModuleError> {
    let answer = oracle.result_for(question_id)?;
    if !answer.is_accepted() {
        debug!(question_id = %question_id, answer = %answer, "answer does not approve execution");
        return Err(ModuleError::NotApproved);
    }

    if variant.bond_check && config.minimum_bond > U256::ZERO {
        let bond = oracle.get_bond(question_id)?;
        if bond < config.minimum_bond {
            debug!(question_id = %question_id, bond = %bond, minimum = %config.minimum_bond, "bond below minimum");
            return Err(ModuleError::BondTooLow {
                have: bond,
                need: config.minimum_bond,
            });
        }
    }

    let finalized_at = oracle.get_finalize_ts(question_id)?;
    let elapsed = finalized_at.elapsed_since(now);
    check_cooldown(elapsed, config.cooldown)?;
    if variant.applies_expiration() {
        check_not_expired(elapsed, config.answer_expiration)?;
    }
    Ok(())
}

/// `elapsed >= cooldown`.
pub fn check_cooldown(elapsed: u64, cooldown: u32) -> Result<(), ModuleError> {
    let cooldown = u64::from(cooldown);
    if elapsed < cooldown {
        let remaining = cooldown - elapsed;
        debug!(remaining = %format_duration(remaining), "cooldown not over");
        return Err(ModuleError::CooldownActive {
            remaining_secs: remaining,
        });
    }
    Ok(())
}

/// With a non-zero expiration, `elapsed <= expiration`.
pub fn check_not_expired(elapsed: u64, expiration: u32) -> Result<(), ModuleError> {
    if expiration != 0 && elapsed > u64::from(expiration) {
        debug!(
            elapsed = %format_duration(elapsed),
            expiration = %format_duration(u64::from(expiration)),
            "answer expired"
        );
        return Err(ModuleError::AnswerExpired);
    }
    Ok(())
}

/// Opposite of [`check_not_expired`], used to claim an expired answer.
pub fn check_expired(elapsed: u64, expiration: u32) -> Result<(), ModuleError> {
    if elapsed > u64::from(expiration) {
        Ok(())
    } else {
        Err(ModuleError::AnswerNotExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;
    use gate_nullables::NullOracle;
    use gate_types::Answer;

    fn config(cooldown: u32, expiration: u32, bond: u64) -> ModuleConfig {
        let mut config = ModuleConfig::new(
            Address::repeat_byte(1),
            Address::repeat_byte(2),
            Address::repeat_byte(2),
            Address::repeat_byte(4),
            Address::repeat_byte(5),
        );
        config.cooldown = cooldown;
        config.answer_expiration = expiration;
        config.minimum_bond = U256::from(bond);
        config
    }

    fn qid() -> QuestionId {
        QuestionId::new([3; 32])
    }

    #[test]
    fn cooldown_boundary() {
        assert!(matches!(
            check_cooldown(23, 24),
            Err(ModuleError::CooldownActive { remaining_secs: 1 })
        ));
        assert!(check_cooldown(24, 24).is_ok());
        assert!(check_cooldown(0, 0).is_ok());
    }

    #[test]
    fn expiration_boundary() {
        assert!(check_not_expired(90, 90).is_ok());
        assert!(matches!(check_not_expired(91, 90), Err(ModuleError::AnswerExpired)));
        assert!(check_not_expired(u64::MAX, 0).is_ok());

        assert!(matches!(check_expired(90, 90), Err(ModuleError::AnswerNotExpired)));
        assert!(check_expired(91, 90).is_ok());
    }

    #[test]
    fn only_exact_accepted_answer_passes() {
        let oracle = NullOracle::new(Address::repeat_byte(4), Address::repeat_byte(5));
        let config = config(0, 0, 0);
        let now = Timestamp::new(1_000);

        for answer in [Answer::REJECTED, Answer::from_u64(2), Answer::INVALIDATED] {
            oracle.resolve(qid(), answer, Timestamp::new(10));
            assert!(matches!(
                check_resolved_answer(&oracle, &qid(), &config, ModuleVariant::plain(), now),
                Err(ModuleError::NotApproved)
            ));
        }

        oracle.resolve(qid(), Answer::ACCEPTED, Timestamp::new(10));
        assert!(check_resolved_answer(&oracle, &qid(), &config, ModuleVariant::plain(), now).is_ok());
    }

    #[test]
    fn bond_only_checked_when_enabled() {
        let oracle = NullOracle::new(Address::repeat_byte(4), Address::repeat_byte(5));
        oracle.resolve(qid(), Answer::ACCEPTED, Timestamp::new(10));
        oracle.set_bond(qid(), U256::from(5));
        let config = config(0, 0, 10);
        let now = Timestamp::new(100);

        assert!(matches!(
            check_resolved_answer(&oracle, &qid(), &config, ModuleVariant::bonded(), now),
            Err(ModuleError::BondTooLow { .. })
        ));
        assert!(check_resolved_answer(&oracle, &qid(), &config, ModuleVariant::plain(), now).is_ok());

        oracle.set_bond(qid(), U256::from(10));
        assert!(check_resolved_answer(&oracle, &qid(), &config, ModuleVariant::bonded(), now).is_ok());
    }

    #[test]
    fn unresolved_question_propagates_oracle_error() {
        let oracle = NullOracle::new(Address::repeat_byte(4), Address::repeat_byte(5));
        let result = check_resolved_answer(
            &oracle,
            &qid(),
            &config(0, 0, 0),
            ModuleVariant::plain(),
            Timestamp::new(0),
        );
        assert!(matches!(result, Err(ModuleError::Oracle(_))));
    }
}
