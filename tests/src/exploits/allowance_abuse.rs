//! # Allowance Abuse
//!
//! A spender tries to move more than it was granted:
//!
//! - spending past the allowance in one call or across calls
//! - exploiting a failed balance check to keep a consumed allowance
//! - wrapping an allowance through `increase_allowance`

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use token_ledger::prelude::*;

    #[test]
    fn test_cannot_overspend_across_calls() {
        let service = funded_service(&[(ALICE, 10_000)]);
        service.approve(ALICE, MALLORY, U256::from(1_000)).unwrap();

        service
            .transfer_from(MALLORY, ALICE, MALLORY, U256::from(600))
            .unwrap();
        assert!(matches!(
            service.transfer_from(MALLORY, ALICE, MALLORY, U256::from(600)),
            Err(TokenError::InsufficientAllowance { .. })
        ));
        service
            .transfer_from(MALLORY, ALICE, MALLORY, U256::from(400))
            .unwrap();
        assert_eq!(service.allowance(ALICE, MALLORY), U256::zero());
        assert_eq!(service.balance_of(MALLORY), U256::from(1_000));
    }

    #[test]
    fn test_failed_balance_check_keeps_allowance_intact() {
        let service = funded_service(&[(ALICE, 100)]);
        service.approve(ALICE, MALLORY, U256::from(1_000)).unwrap();

        assert!(matches!(
            service.transfer_from(MALLORY, ALICE, MALLORY, U256::from(500)),
            Err(TokenError::InsufficientBalance { .. })
        ));
        assert_eq!(service.allowance(ALICE, MALLORY), U256::from(1_000));
    }

    #[test]
    fn test_allowance_is_per_spender() {
        let service = funded_service(&[(ALICE, 1_000)]);
        service.approve(ALICE, BOB, U256::from(1_000)).unwrap();

        assert!(matches!(
            service.transfer_from(MALLORY, ALICE, MALLORY, U256::one()),
            Err(TokenError::InsufficientAllowance { .. })
        ));
    }

    #[test]
    fn test_increase_cannot_wrap() {
        let service = funded_service(&[]);
        service.approve(ALICE, MALLORY, U256::MAX - 1).unwrap();
        assert_eq!(
            service.increase_allowance(ALICE, MALLORY, U256::from(2)),
            Err(TokenError::ArithmeticOverflow)
        );
        assert_eq!(service.allowance(ALICE, MALLORY), U256::MAX - 1);
    }

    #[test]
    fn test_zero_address_endpoints_rejected() {
        let service = funded_service(&[(ALICE, 1_000)]);
        service.approve(ALICE, MALLORY, U256::from(1_000)).unwrap();
        assert_eq!(
            service
                .transfer_from(MALLORY, ALICE, Address::ZERO, U256::one())
                .map(|_| ()),
            Err(TokenError::ZeroAddress)
        );
        assert_eq!(
            service
                .transfer_from(MALLORY, Address::ZERO, MALLORY, U256::one())
                .map(|_| ()),
            Err(TokenError::ZeroAddress)
        );
    }
}
