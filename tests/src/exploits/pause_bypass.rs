//! # Pause Bypass
//!
//! While the ledger is paused, every mutation except `unpause` must fail
//! with `SystemPaused`, whichever path the caller takes. Reads stay open.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use token_ledger::prelude::*;

    fn paused_service() -> TestService {
        let service = funded_service(&[(ALICE, 10_000)]);
        service.approve(ALICE, BOB, U256::from(5_000)).unwrap();
        service.pause(GOV).unwrap();
        service.sink().drain();
        service
    }

    #[test]
    fn test_value_paths_blocked() {
        let service = paused_service();
        let paused = Err(TokenError::SystemPaused);

        assert_eq!(service.transfer(ALICE, BOB, U256::one()).map(|_| ()), paused);
        assert_eq!(
            service.transfer_from(BOB, ALICE, BOB, U256::one()).map(|_| ()),
            paused
        );
        assert_eq!(service.mint(ORACLE, ALICE, U256::one()), paused);
        assert_eq!(service.mint(RBS, MALLORY, U256::one()), paused);
        assert_eq!(service.balance_of(ALICE), U256::from(10_000));
    }

    #[test]
    fn test_allowance_paths_blocked() {
        let service = paused_service();
        assert_eq!(
            service.approve(ALICE, MALLORY, U256::MAX),
            Err(TokenError::SystemPaused)
        );
        assert_eq!(
            service.increase_allowance(ALICE, BOB, U256::one()),
            Err(TokenError::SystemPaused)
        );
        assert_eq!(
            service.decrease_allowance(ALICE, BOB, U256::one()),
            Err(TokenError::SystemPaused)
        );
        assert_eq!(service.allowance(ALICE, BOB), U256::from(5_000));
        assert_eq!(service.allowance(ALICE, MALLORY), U256::zero());
    }

    #[test]
    fn test_governance_setters_blocked_even_when_confirmed() {
        let service = paused_service();
        let paused = Err(TokenError::SystemPaused);

        assert_eq!(service.set_governance(GOV, CAROL), paused);
        assert_eq!(service.set_oracle(GOV, CAROL), paused);
        assert_eq!(service.set_rbs(GOV, CAROL), paused);
        assert_eq!(service.set_treasury(GOV, CAROL), paused);
        assert_eq!(service.set_authorization_collaborator(GOV, CAROL), paused);
        assert_eq!(
            service.set_tax_rates(GOV, BasisPoints::ZERO, BasisPoints::ZERO),
            paused
        );
        assert_eq!(service.update_whitelist(GOV, CAROL, true), paused);
        assert_eq!(
            service.update_governance_list(GOV, CAROL, GovernanceList::Short, true),
            paused
        );
        assert!(service.sink().is_empty());
    }

    #[test]
    fn test_pause_gate_precedes_access_gate() {
        // An unconfirmed caller learns only that the ledger is paused
        let service = paused_service();
        assert_eq!(
            service.set_treasury(MALLORY, MALLORY),
            Err(TokenError::SystemPaused)
        );
    }

    #[test]
    fn test_reads_stay_open() {
        let service = paused_service();
        assert!(service.is_paused());
        assert_eq!(service.balance_of(ALICE), U256::from(10_000));
        assert_eq!(service.governance(), GOV);
        assert_eq!(service.buy_tax(), BasisPoints::new(500));
        assert!(service.quote_tax(ALICE, BOB, U256::from(100)).is_ok());
    }

    #[test]
    fn test_only_governance_can_resume() {
        let service = paused_service();
        assert_eq!(
            service.unpause(MALLORY),
            Err(TokenError::NotAuthorized { caller: MALLORY })
        );
        service.unpause(GOV).unwrap();
        assert!(service.transfer(ALICE, BOB, U256::one()).is_ok());
    }
}
